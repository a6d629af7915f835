use std::convert::TryFrom;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::ConfigError;
use crate::file::{default_system, read_file};
use crate::logging::LoggingConfig;
use crate::math::mesh::UvSphere;
use crate::model::{SatelliteParams, SolarSystem, StarField, TransformSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SatellitePreset {
    /// Satellites use their own distance and phase
    Independent,
    /// Satellites borrow distance and phase from their parent
    Copied,
}

impl From<SatellitePreset> for SatelliteParams {
    fn from(preset: SatellitePreset) -> Self {
        match preset {
            SatellitePreset::Independent => SatelliteParams::Independent,
            SatellitePreset::Copied => SatelliteParams::CopiedFromParent,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "solar", about = "Renders a stylized solar system")]
pub struct Args {
    /// Bodies file (`name parent distance speed scale`, one header line)
    #[arg(long)]
    pub bodies: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = SatellitePreset::Independent)]
    pub satellite_params: SatellitePreset,

    /// Spin satellites about their own axis
    #[arg(long)]
    pub satellite_spin: bool,

    #[arg(long, default_value_t = 1000)]
    pub stars: usize,

    #[arg(long, default_value_t = 0x5eed)]
    pub star_seed: u64,

    /// Half-width of the cube the stars are scattered in
    #[arg(long, default_value_t = 60.0)]
    pub star_extent: f32,

    #[arg(long, default_value_t = 24)]
    pub sphere_rings: usize,

    #[arg(long, default_value_t = 48)]
    pub sphere_segments: usize,

    /// Log filter, in `env_logger` syntax; overrides RUST_LOG
    #[arg(long = "log")]
    pub log_filter: Option<String>,
}

/// Everything the renderer needs, resolved from the command line.
#[derive(Debug)]
pub struct Config {
    pub system: SolarSystem,
    pub transform: TransformSettings,
    pub stars: StarField,
    pub sphere: UvSphere,
}

impl Args {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }

    pub fn resolve(&self) -> Result<Config, ConfigError> {
        self.check_star_field()?;

        let system = match &self.bodies {
            Some(path) => {
                log::info!("loading bodies from {}", path.display());
                read_file(path)?
            }
            None => default_system()?,
        };

        Ok(Config {
            system,
            transform: TransformSettings {
                satellite_params: self.satellite_params.into(),
                satellite_spin: self.satellite_spin,
            },
            stars: StarField::generate(self.stars, self.star_extent, self.star_seed),
            sphere: UvSphere {
                rings: self.sphere_rings,
                segments: self.sphere_segments,
            },
        })
    }

    // The star count ends up as a GL draw count, and both ends of the extent
    // range have to stay finite once sampled.
    fn check_star_field(&self) -> Result<(), ConfigError> {
        if i32::try_from(self.stars).is_err() {
            return Err(ConfigError::InvalidArgument {
                flag: "stars",
                message: format!("{} is more than a draw call can hold", self.stars),
            });
        }
        let extent = self.star_extent;
        if !extent.is_finite() || !(2.0 * extent).is_finite() {
            return Err(ConfigError::InvalidArgument {
                flag: "star-extent",
                message: format!("{} is not a usable half-width", extent),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["solar"]);
        let config = args.resolve().unwrap();

        assert_eq!(config.system.len(), 10);
        assert_eq!(config.stars.len(), 1000);
        assert_eq!(
            config.transform.satellite_params,
            SatelliteParams::Independent
        );
        assert!(!config.transform.satellite_spin);
        assert!(args.logging().env_filter.is_none());
    }

    #[test]
    fn test_presets() {
        let args = Args::parse_from([
            "solar",
            "--satellite-params",
            "copied",
            "--satellite-spin",
            "--stars",
            "12",
            "--log",
            "debug",
        ]);
        let config = args.resolve().unwrap();

        assert_eq!(
            config.transform.satellite_params,
            SatelliteParams::CopiedFromParent
        );
        assert!(config.transform.satellite_spin);
        assert_eq!(config.stars.len(), 12);
        assert_eq!(args.logging().env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_bodies_file() {
        let args = Args::parse_from(["solar", "--bodies", "/definitely/not/here.txt"]);
        assert!(matches!(args.resolve(), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_unusable_star_extent() {
        for extent in ["inf", "-inf", "NaN", "3e38"] {
            let flag = format!("--star-extent={}", extent);
            let args = Args::parse_from(["solar", flag.as_str()]);
            assert!(
                matches!(
                    args.resolve(),
                    Err(ConfigError::InvalidArgument {
                        flag: "star-extent",
                        ..
                    })
                ),
                "extent {} was accepted",
                extent
            );
        }

        // Negative and zero extents are still fine
        for extent in ["-5", "0"] {
            let flag = format!("--star-extent={}", extent);
            let args = Args::parse_from(["solar", flag.as_str()]);
            assert!(args.resolve().is_ok());
        }
    }

    #[test]
    fn test_star_count_fits_draw_call() {
        let too_many = (i32::MAX as u64 + 1).to_string();
        let args = Args::parse_from(["solar", "--stars", too_many.as_str()]);
        assert!(matches!(
            args.resolve(),
            Err(ConfigError::InvalidArgument { flag: "stars", .. })
        ));
    }
}
