use eyre::OptionExt;
use tracing::info;
use tracing::warn;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

use crate::adapter_utils::get_hardware_adapter;
use crate::config::DemoConfig;
use crate::windy_error::MyResult;

/// The objects every demo needs before it has a window to draw into.
pub struct DeviceContext {
    pub dxgi_factory: IDXGIFactory4,
    pub device: ID3D12Device,
    /// Present only when the debug layer came up.
    pub info_queue: Option<IDXGIInfoQueue>,
}

pub fn create_device(config: &DemoConfig) -> MyResult<DeviceContext> {
    let mut factory_flags = DXGI_CREATE_FACTORY_FLAGS(0);
    let mut info_queue = None;

    if config.debug_layer {
        if enable_debug_layer() {
            factory_flags |= DXGI_CREATE_FACTORY_DEBUG;
            match unsafe { DXGIGetDebugInterface1::<IDXGIInfoQueue>(0) } {
                Ok(queue) => info_queue = Some(queue),
                Err(e) => warn!("DXGI info queue unavailable: {e:?}"),
            }
        } else {
            warn!("D3D12 debug layer unavailable, continuing without it");
        }
    }

    let dxgi_factory: IDXGIFactory4 = unsafe { CreateDXGIFactory2(factory_flags) }?;

    let adapter: IDXGIAdapter1 = if config.use_warp_device {
        info!("Using WARP adapter");
        unsafe { dxgi_factory.EnumWarpAdapter()? }
    } else {
        get_hardware_adapter(&dxgi_factory)?
    };

    let mut device: Option<ID3D12Device> = None;
    unsafe { D3D12CreateDevice(&adapter, D3D_FEATURE_LEVEL_11_0, &mut device) }?;
    let device = device.ok_or_eyre("D3D12CreateDevice succeeded without returning a device")?;

    Ok(DeviceContext {
        dxgi_factory,
        device,
        info_queue,
    })
}

// Must run before the device is created.
fn enable_debug_layer() -> bool {
    let mut debug1: Option<ID3D12Debug1> = None;
    if unsafe { D3D12GetDebugInterface(&mut debug1) }.is_ok() {
        if let Some(debug1) = debug1 {
            unsafe {
                debug1.EnableDebugLayer();
                debug1.SetEnableGPUBasedValidation(true);
            }
            info!("D3D12 debug layer enabled with GPU based validation");
            return true;
        }
    }

    let mut debug: Option<ID3D12Debug> = None;
    if unsafe { D3D12GetDebugInterface(&mut debug) }.is_ok() {
        if let Some(debug) = debug {
            unsafe { debug.EnableDebugLayer() };
            info!("D3D12 debug layer enabled");
            return true;
        }
    }

    false
}
