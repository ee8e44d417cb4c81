use tracing::info;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::*;

use crate::windy_error::MyResult;

/// Per-window state that receives messages through [`wndproc`].
///
/// The state lives in `GWLP_USERDATA`, set from `lpCreateParams` on `WM_CREATE`,
/// so it must outlive the window.
pub trait WindowClass {
    const ID: PCWSTR;

    /// Returns true when the message was handled and `DefWindowProcW` should be skipped.
    fn handle(&mut self, window: HWND, message: u32, wparam: WPARAM) -> bool;
}

/// Closes the demo on any key press.
#[derive(Default)]
pub struct KeyPressExit {
    pub key_pressed: Option<u8>,
}

impl WindowClass for KeyPressExit {
    const ID: PCWSTR = w!("DXSampleClass");

    fn handle(&mut self, _window: HWND, message: u32, wparam: WPARAM) -> bool {
        match message {
            WM_KEYDOWN => {
                let key = wparam.0 as u8;
                info!("Key {key:#04x} pressed, exiting");
                self.key_pressed = Some(key);
                unsafe { PostQuitMessage(0) };
                true
            }
            // Rendering happens in the idle branch of the message loop, so
            // WM_PAINT goes to DefWindowProcW to validate the region.
            _ => false,
        }
    }
}

pub fn create_window_class_struct<W: WindowClass>(instance: HMODULE) -> MyResult<WNDCLASSEXW> {
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc::<W>),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
        lpszClassName: W::ID,
        ..Default::default()
    };
    Ok(wc)
}

extern "system" fn wndproc<W: WindowClass>(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_CREATE {
        unsafe {
            let create_struct: &CREATESTRUCTW = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
        }
        return LRESULT(0);
    }

    let user_data = unsafe { GetWindowLongPtrW(window, GWLP_USERDATA) };
    let Some(mut state) = std::ptr::NonNull::<W>::new(user_data as *mut W) else {
        // Messages can arrive before WM_CREATE or after WM_DESTROY.
        return unsafe { DefWindowProcW(window, message, wparam, lparam) };
    };

    let handled = match message {
        WM_DESTROY => {
            unsafe {
                SetWindowLongPtrW(window, GWLP_USERDATA, 0);
                PostQuitMessage(0);
            }
            true
        }
        _ => {
            // A panic must not unwind across the FFI boundary.
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe {
                state.as_mut().handle(window, message, wparam)
            }))
            .unwrap_or(false)
        }
    };

    if handled {
        LRESULT(0)
    } else {
        unsafe { DefWindowProcW(window, message, wparam, lparam) }
    }
}
