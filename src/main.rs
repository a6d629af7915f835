use clap::Parser;
use kiss3d::window::Window;

use rust_solar::config::Args;
use rust_solar::gui::Simulation;
use rust_solar::logging::init_logging;

// W,S - depth
// H,L - horizontal
// J,K - vertical
// Up,Down - pitch
// Left,Right - yaw
// Esc - quit
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.logging());

    let config = args.resolve()?;
    log::info!("{} bodies, {} stars", config.system.len(), config.stars.len());

    let mut window = Window::new("Solar System");
    window.set_framerate_limit(Some(60));
    window.set_background_color(0.0, 0.0, 0.0);

    let simulation = Simulation::new(config, &mut window)?;
    window.render_loop(simulation);
    Ok(())
}
