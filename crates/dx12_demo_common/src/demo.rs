use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::config::DemoConfig;
use crate::create_device::create_device;
use crate::create_window::create_window;
use crate::create_window::destroy_window;
use crate::debug_messages::print_dxgi_debug_messages;
use crate::frame_resources::FrameResources;
use crate::window_class::KeyPressExit;
use crate::window_class::create_window_class_struct;
use crate::windy_error::MyResult;
use crate::windy_window_class_id::register_window_class;

/// What a demo adds on top of clearing the back buffer.
///
/// Anything the GPU reads while drawing must be owned by the implementor so it
/// stays alive until [`run_demo`] has waited for the GPU to go idle.
pub trait Demo: Sized {
    const TITLE: &'static str;
    const CLEAR_COLOR: [f32; 4];

    /// Builds the demo's GPU objects. One-off uploads go through
    /// [`FrameResources::execute_setup`].
    fn new(device: &ID3D12Device, frame: &mut FrameResources) -> MyResult<Self>;

    fn root_signature(&self) -> Option<&ID3D12RootSignature> {
        None
    }

    fn pipeline_state(&self) -> Option<&ID3D12PipelineState> {
        None
    }

    /// Records draw commands between the clear and the present transition.
    fn record(&self, _command_list: &ID3D12GraphicsCommandList) -> MyResult<()> {
        Ok(())
    }
}

pub fn run_demo<D: Demo>(config: &DemoConfig) -> MyResult<()> {
    let our_module = unsafe { GetModuleHandleW(None)? };

    let window_class = create_window_class_struct::<KeyPressExit>(our_module)?;
    let class_atom = register_window_class(&window_class)?;

    let mut title = D::TITLE.to_string();
    if config.use_warp_device {
        title.push_str(" (WARP)");
    }

    // Boxed so the address handed to the window procedure never moves.
    let mut window_data = Box::new(KeyPressExit::default());
    let hwnd = create_window(
        our_module,
        &class_atom,
        &config.window,
        &title,
        window_data.as_mut(),
    )?;

    let outcome = drive::<D>(config, hwnd, &title);

    if let Some(key) = window_data.key_pressed {
        info!("Exited on key {key:#04x}");
    }

    // The window procedure reads window_data, so the window goes first. This
    // fails harmlessly when WM_DESTROY is what ended the loop.
    if let Err(e) = destroy_window(hwnd) {
        debug!("DestroyWindow: {e}");
    }
    drop(window_data);

    outcome
}

fn drive<D: Demo>(config: &DemoConfig, hwnd: HWND, title: &str) -> MyResult<()> {
    let context = create_device(config)?;
    let mut frame = match FrameResources::bind_to_window(&context, hwnd, config) {
        Ok(frame) => frame,
        Err(e) => {
            print_dxgi_debug_messages(context.info_queue.as_ref());
            return Err(e);
        }
    };
    let demo = match D::new(&context.device, &mut frame) {
        Ok(demo) => demo,
        Err(e) => {
            print_dxgi_debug_messages(context.info_queue.as_ref());
            return Err(e);
        }
    };

    unsafe { _ = ShowWindow(hwnd, SW_SHOW) };
    info!(title, "Window shown, press any key to exit");

    let mut outcome = Ok(());
    let mut frames_rendered = 0u64;
    loop {
        let mut message = MSG::default();
        if unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.into() {
            if message.message == WM_QUIT {
                break;
            }
            unsafe {
                _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
        } else if let Err(e) = render_frame(&demo, &mut frame) {
            error!("Render error after {frames_rendered} frames");
            print_dxgi_debug_messages(context.info_queue.as_ref());
            outcome = Err(e);
            break;
        } else {
            frames_rendered += 1;
        }
    }
    info!(frames_rendered, "Message loop finished");

    // The demo's buffers and the back buffers must not be released while in use.
    if let Err(e) = frame.wait_for_gpu_idle() {
        warn!("Failed waiting for the GPU before shutdown: {e}");
    }
    drop(demo);
    drop(frame);

    outcome
}

fn render_frame<D: Demo>(demo: &D, frame: &mut FrameResources) -> MyResult<()> {
    frame.begin_frame(demo.root_signature(), demo.pipeline_state(), &D::CLEAR_COLOR)?;
    demo.record(&frame.command_list)?;
    frame.end_frame()
}
