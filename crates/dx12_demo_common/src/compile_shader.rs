use eyre::OptionExt;
use tracing::error;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::core::*;

use crate::windy_error::MyResult;
use crate::windy_error::WrappedWindowsError;

/// HLSL compiled into the binary with `include_bytes!`.
pub struct ShaderSource {
    /// Used by the compiler in diagnostics. Must be nul terminated, use `s!`.
    pub name: PCSTR,
    pub code: &'static [u8],
}

pub fn compile_shader(source: &ShaderSource, entry_point: PCSTR, target: PCSTR) -> MyResult<ID3DBlob> {
    let flags = if cfg!(debug_assertions) {
        D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION
    } else {
        0
    };

    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompile(
            source.code.as_ptr() as _,
            source.code.len(),
            source.name,
            None,
            None,
            entry_point,
            target,
            flags,
            0,
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    let describe = || unsafe {
        format!(
            "{} {} {}",
            String::from_utf8_lossy(source.name.as_bytes()),
            String::from_utf8_lossy(entry_point.as_bytes()),
            String::from_utf8_lossy(target.as_bytes()),
        )
    };

    if let Err(e) = result {
        let details = error_blob.as_ref().map(blob_text).unwrap_or_default();
        error!("Shader compile error ({}):\n{details}", describe());
        let report = eyre::Report::new(WrappedWindowsError::from(e))
            .wrap_err(format!("compiling {}: {details}", describe()));
        return Err(report.into());
    }

    Ok(shader_blob.ok_or_eyre("D3DCompile succeeded without returning bytecode")?)
}

/// Interprets a blob filled by the compiler or root signature serializer as text.
pub fn blob_text(blob: &ID3DBlob) -> String {
    let bytes = unsafe {
        std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize())
    };
    String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string()
}

/// Borrows a blob's contents for the lifetime of the blob.
pub fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe { std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize()) }
}
