use windows::Win32::UI::WindowsAndMessaging::RegisterClassExW;
use windows::Win32::UI::WindowsAndMessaging::WNDCLASSEXW;
use windows::core::Error;
use windows::core::PCWSTR;
use windows::core::Param;
use windows::core::ParamValue;

use crate::windy_error::MyResult;

/// Equivalent to the MAKEINTATOM macro: the atom in the low word of a
/// pointer-sized class name.
///
/// https://learn.microsoft.com/en-us/windows/win32/api/winbase/nf-winbase-makeintatom
#[allow(non_snake_case)]
pub fn MAKEINTATOM(atom: u16) -> PCWSTR {
    PCWSTR(atom as usize as *const u16)
}

/// A registered window class, usable anywhere a class name is expected.
#[derive(Clone, Copy, Debug)]
pub struct ClassIdAtom(u16);

impl Param<PCWSTR> for &ClassIdAtom {
    unsafe fn param(self) -> ParamValue<PCWSTR> {
        ParamValue::Owned(MAKEINTATOM(self.0))
    }
}

pub fn register_window_class(class: &WNDCLASSEXW) -> MyResult<ClassIdAtom> {
    let atom = unsafe { RegisterClassExW(class) };
    if atom == 0 {
        return Err(Error::from_win32().into());
    }
    Ok(ClassIdAtom(atom))
}
