use eyre::OptionExt;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::core::*;

use crate::windy_error::MyResult;

/// Descriptor for a plain buffer of `width` bytes.
pub fn buffer_desc(width: u64) -> D3D12_RESOURCE_DESC {
    D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_BUFFER,
        Alignment: 0,
        Width: width,
        Height: 1,
        DepthOrArraySize: 1,
        MipLevels: 1,
        Format: DXGI_FORMAT_UNKNOWN,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_ROW_MAJOR,
        Flags: D3D12_RESOURCE_FLAG_NONE,
    }
}

/// A CPU writable buffer in the upload heap, left in `GENERIC_READ`.
pub fn create_upload_buffer(device: &ID3D12Device, size: u64) -> MyResult<ID3D12Resource> {
    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_UPLOAD,
        ..Default::default()
    };

    let mut buffer: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &buffer_desc(size),
            D3D12_RESOURCE_STATE_GENERIC_READ,
            None,
            &mut buffer,
        )?
    };
    Ok(buffer.ok_or_eyre("CreateCommittedResource returned no buffer")?)
}

/// Copies `vertices` into an upload heap buffer and describes it for the input
/// assembler.
///
/// Upload heaps are read over PCIe on every draw; fine for a handful of
/// vertices.
pub fn create_vertex_buffer<V: Copy>(
    device: &ID3D12Device,
    vertices: &[V],
    name: PCWSTR,
) -> MyResult<(ID3D12Resource, D3D12_VERTEX_BUFFER_VIEW)> {
    let vertex_buffer_size = std::mem::size_of_val(vertices) as u64;
    let vertex_buffer = create_upload_buffer(device, vertex_buffer_size)?;
    unsafe { vertex_buffer.SetName(name) }.ok();

    unsafe {
        let mut data_ptr = std::ptr::null_mut();
        // We do not intend to read from this resource on the CPU.
        let read_range = D3D12_RANGE { Begin: 0, End: 0 };
        vertex_buffer.Map(0, Some(&read_range), Some(&mut data_ptr))?;
        std::ptr::copy_nonoverlapping(vertices.as_ptr(), data_ptr as *mut V, vertices.len());
        vertex_buffer.Unmap(0, None);
    }

    let vbv = D3D12_VERTEX_BUFFER_VIEW {
        BufferLocation: unsafe { vertex_buffer.GetGPUVirtualAddress() },
        StrideInBytes: std::mem::size_of::<V>() as u32,
        SizeInBytes: vertex_buffer_size as u32,
    };

    Ok((vertex_buffer, vbv))
}
