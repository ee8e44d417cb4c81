use tracing::debug;
use tracing::info;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::D3D12CreateDevice;
use windows::Win32::Graphics::Direct3D12::ID3D12Device;
use windows::Win32::Graphics::Dxgi::*;
use windows::core::*;

/// Returns the first hardware adapter that can host a Direct3D 12 device at
/// feature level 11.0.
///
/// Software adapters are skipped; ask for WARP explicitly instead. The probe
/// passes a null device pointer so no device is actually created.
pub fn get_hardware_adapter(factory: &IDXGIFactory4) -> Result<IDXGIAdapter1> {
    for i in 0.. {
        let adapter = match unsafe { factory.EnumAdapters1(i) } {
            Ok(a) => a,
            Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => break,
            Err(e) => return Err(e),
        };

        let desc = unsafe { adapter.GetDesc1()? };
        let adapter_name = String::from_utf16_lossy(&desc.Description);
        let adapter_name = adapter_name.trim_end_matches('\0');

        if (DXGI_ADAPTER_FLAG(desc.Flags as i32) & DXGI_ADAPTER_FLAG_SOFTWARE)
            != DXGI_ADAPTER_FLAG_NONE
        {
            debug!("Adapter {i}: {adapter_name} is a software adapter, skipping");
            continue;
        }

        if unsafe {
            D3D12CreateDevice(
                &adapter,
                D3D_FEATURE_LEVEL_11_0,
                std::ptr::null_mut::<Option<ID3D12Device>>(),
            )
        }
        .is_ok()
        {
            info!("Using hardware adapter {i}: {adapter_name}");
            return Ok(adapter);
        }
        debug!("Adapter {i}: {adapter_name} lacks feature level 11.0");
    }

    Err(Error::new(
        DXGI_ERROR_NOT_FOUND,
        "No Direct3D 12 capable hardware adapter found.",
    ))
}
