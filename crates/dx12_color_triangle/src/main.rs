//! Draws a triangle with red, green and blue corners. Any key exits.

#[cfg(windows)]
mod color_triangle;

use dx12_demo_common::config::DemoConfig;
use dx12_demo_common::logging;
use dx12_demo_common::windy_error::MyResult;
use tracing::info;

#[cfg(windows)]
fn main() -> MyResult<()> {
    use dx12_demo_common::demo::run_demo;
    use dx12_demo_common::error_dialog::show_error_dialog;

    logging::init()?;
    let config = DemoConfig::from_args(std::env::args().skip(1))?;
    info!(?config, "Starting");

    if let Err(e) = run_demo::<color_triangle::ColorTriangle>(&config) {
        show_error_dialog(&e);
        return Err(e);
    }
    Ok(())
}

#[cfg(not(windows))]
fn main() -> MyResult<()> {
    logging::init()?;
    let config = DemoConfig::from_args(std::env::args().skip(1))?;
    info!(?config, "Parsed configuration");
    tracing::error!("Direct3D 12 is only available on Windows");
    std::process::exit(1)
}
