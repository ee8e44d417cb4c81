use eyre::WrapErr;
use widestring::U16CString;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::*;

use crate::config::WindowPlacement;
use crate::window_class::WindowClass;
use crate::windy_error::MyResult;
use crate::windy_window_class_id::ClassIdAtom;

/// Creates a hidden `WS_OVERLAPPEDWINDOW` whose client area matches `placement`.
///
/// `window_data` is handed to the window procedure and must stay at the same
/// address for as long as the window exists.
pub fn create_window<W: WindowClass>(
    our_module: HMODULE,
    class: &ClassIdAtom,
    placement: &WindowPlacement,
    title: &str,
    window_data: &mut W,
) -> MyResult<HWND> {
    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: placement.width as i32,
        bottom: placement.height as i32,
    };
    unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false)? };

    let title = U16CString::from_str(title).wrap_err("window title contains a nul")?;

    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            placement.x,
            placement.y,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None,
            None,
            Some(our_module.into()),
            Some(window_data as *mut W as _),
        )
    }?;
    Ok(hwnd)
}

/// Destroys `hwnd` without leaving a `WM_QUIT` behind.
///
/// The window state is detached first so `WM_DESTROY` reaches
/// `DefWindowProcW` instead of posting a quit. A queued quit would dismiss the
/// next modal dialog, such as the fatal error box, as soon as it opened.
pub fn destroy_window(hwnd: HWND) -> MyResult<()> {
    unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
    let destroyed = unsafe { DestroyWindow(hwnd) };

    let mut message = MSG::default();
    while unsafe { PeekMessageW(&mut message, None, WM_QUIT, WM_QUIT, PM_REMOVE) }.as_bool() {}

    destroyed?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_class::create_window_class_struct;
    use crate::windy_window_class_id::register_window_class;
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;

    #[derive(Default)]
    struct Passive;

    impl WindowClass for Passive {
        const ID: PCWSTR = w!("Dx12DemoDestroyWindowTest");

        fn handle(&mut self, _window: HWND, _message: u32, _wparam: WPARAM) -> bool {
            false
        }
    }

    #[test]
    fn destroying_the_window_leaves_no_quit_for_a_dialog() {
        let our_module = unsafe { GetModuleHandleW(None) }.unwrap();
        let class = create_window_class_struct::<Passive>(our_module).unwrap();
        let atom = register_window_class(&class).unwrap();

        let mut state = Passive;
        let hwnd = create_window(
            our_module,
            &atom,
            &WindowPlacement::default(),
            "destroy test",
            &mut state,
        )
        .unwrap();

        destroy_window(hwnd).unwrap();

        let mut message = MSG::default();
        let quit_pending =
            unsafe { PeekMessageW(&mut message, None, WM_QUIT, WM_QUIT, PM_REMOVE) }.as_bool();
        assert!(!quit_pending);
    }
}
