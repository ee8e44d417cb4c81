//! Opens a window and clears it to a solid color every frame. Any key exits.

use dx12_demo_common::config::DemoConfig;
use dx12_demo_common::logging;
use dx12_demo_common::windy_error::MyResult;
use tracing::info;

#[cfg(windows)]
mod clear {
    use dx12_demo_common::demo::Demo;
    use dx12_demo_common::frame_resources::FrameResources;
    use dx12_demo_common::windy_error::MyResult;
    use windows::Win32::Graphics::Direct3D12::ID3D12Device;

    /// Nothing beyond the clear, so no root signature or pipeline either.
    pub struct ClearFramebuffer;

    impl Demo for ClearFramebuffer {
        const TITLE: &'static str = "dx12 clear framebuffer";
        const CLEAR_COLOR: [f32; 4] = [0.0, 0.2, 0.4, 1.0];

        fn new(_device: &ID3D12Device, _frame: &mut FrameResources) -> MyResult<Self> {
            Ok(Self)
        }
    }
}

#[cfg(windows)]
fn main() -> MyResult<()> {
    use dx12_demo_common::demo::run_demo;
    use dx12_demo_common::error_dialog::show_error_dialog;

    logging::init()?;
    let config = DemoConfig::from_args(std::env::args().skip(1))?;
    info!(?config, "Starting");

    if let Err(e) = run_demo::<clear::ClearFramebuffer>(&config) {
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
