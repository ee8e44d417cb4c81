use tracing::error;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::*;

use crate::windy_error::MyReport;

/// Shows `report` in a modal "Error!" box. Blocks until dismissed.
pub fn show_error_dialog(report: &MyReport) {
    let mut text = format!("{report:#}");
    if let Some(code) = report.windows_code() {
        text.push_str(&format!("\n\nHRESULT {:#010x}", code.0 as u32));
    }
    error!("{report:?}");

    let text = HSTRING::from(text);
    unsafe { MessageBoxW(None, &text, w!("Error!"), MB_OK | MB_ICONERROR) };
}
