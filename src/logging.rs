use std::sync::Once;

/// Where the logger takes its filter from. `env_filter` is whatever was passed
/// to `--log`, in `env_logger` syntax (e.g. "debug" or "rust_solar=debug,kiss3d=warn").
/// Without it, `RUST_LOG` is consulted, and failing that everything at info and up
/// is printed.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static LOGGER: Once = Once::new();

/// Sets up `env_logger` for the renderer. Called from `main` before the window
/// opens; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(log::LevelFilter::Info),
        };
        builder.write_style(config.write_style).init();

        log::debug!("logger ready");
    });
}
