use eyre::OptionExt;
use tracing::debug;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::core::*;

use crate::create_vertex_buffer::create_upload_buffer;
use crate::texels::Rgba8Image;
use crate::texels::TEXTURE_DATA_PITCH_ALIGNMENT;
use crate::texels::align_up;
use crate::transition_barrier::transition_barrier;
use crate::windy_error::MyResult;

pub const TEXTURE_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

/// A texture in the default heap plus the staging buffer its copy reads from.
pub struct TextureUpload {
    pub texture: ID3D12Resource,
    /// Must outlive execution of the recorded copy.
    pub upload_buffer: ID3D12Resource,
}

/// Records the copy of `image` into a new `TEXTURE2D` and the transition that
/// makes it readable by pixel shaders.
pub fn upload_texture(
    device: &ID3D12Device,
    command_list: &ID3D12GraphicsCommandList,
    image: &Rgba8Image,
) -> MyResult<TextureUpload> {
    let texture_desc = D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_TEXTURE2D,
        Alignment: 0,
        Width: image.width() as u64,
        Height: image.height(),
        DepthOrArraySize: 1,
        MipLevels: 1,
        Format: TEXTURE_FORMAT,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_UNKNOWN,
        Flags: D3D12_RESOURCE_FLAG_NONE,
    };

    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_DEFAULT,
        CPUPageProperty: D3D12_CPU_PAGE_PROPERTY_UNKNOWN,
        MemoryPoolPreference: D3D12_MEMORY_POOL_UNKNOWN,
        CreationNodeMask: 1,
        VisibleNodeMask: 1,
    };

    let mut texture: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &texture_desc,
            D3D12_RESOURCE_STATE_COPY_DEST,
            None,
            &mut texture,
        )?
    };
    let texture = texture.ok_or_eyre("CreateCommittedResource returned no texture")?;
    unsafe { texture.SetName(w!("Texture")) }.ok();

    let mut layout = D3D12_PLACED_SUBRESOURCE_FOOTPRINT::default();
    let mut upload_size = 0u64;
    unsafe {
        device.GetCopyableFootprints(
            &texture_desc,
            0,
            1,
            0,
            Some(&mut layout),
            None,
            None,
            Some(&mut upload_size),
        )
    };
    let row_pitch = layout.Footprint.RowPitch;
    debug_assert_eq!(
        row_pitch,
        align_up(image.row_bytes() as u32, TEXTURE_DATA_PITCH_ALIGNMENT)
    );
    debug!(row_pitch, upload_size, "Texture upload footprint");

    let upload_buffer = create_upload_buffer(device, upload_size)?;
    unsafe { upload_buffer.SetName(w!("TextureUpload")) }.ok();

    unsafe {
        let mut data_ptr = std::ptr::null_mut();
        upload_buffer.Map(0, None, Some(&mut data_ptr))?;
        let staging = std::slice::from_raw_parts_mut(data_ptr as *mut u8, upload_size as usize);
        let copied = image.copy_into_pitched(
            &mut staging[layout.Offset as usize..],
            row_pitch as usize,
        );
        upload_buffer.Unmap(0, None);
        copied?;
    }

    let dst = D3D12_TEXTURE_COPY_LOCATION {
        pResource: unsafe { std::mem::transmute_copy(&texture) },
        Type: D3D12_TEXTURE_COPY_TYPE_SUBRESOURCE_INDEX,
        Anonymous: D3D12_TEXTURE_COPY_LOCATION_0 {
            SubresourceIndex: 0,
        },
    };
    let src = D3D12_TEXTURE_COPY_LOCATION {
        pResource: unsafe { std::mem::transmute_copy(&upload_buffer) },
        Type: D3D12_TEXTURE_COPY_TYPE_PLACED_FOOTPRINT,
        Anonymous: D3D12_TEXTURE_COPY_LOCATION_0 {
            PlacedFootprint: layout,
        },
    };

    unsafe {
        command_list.CopyTextureRegion(&dst, 0, 0, 0, &src, None);
        command_list.ResourceBarrier(&[transition_barrier(
            &texture,
            D3D12_RESOURCE_STATE_COPY_DEST,
            D3D12_RESOURCE_STATE_PIXEL_SHADER_RESOURCE,
        )]);
    }

    Ok(TextureUpload {
        texture,
        upload_buffer,
    })
}

/// Writes a 2D SRV for `texture` into the first slot of `heap`.
pub fn create_texture_srv(
    device: &ID3D12Device,
    texture: &ID3D12Resource,
    heap: &ID3D12DescriptorHeap,
) {
    let srv_desc = D3D12_SHADER_RESOURCE_VIEW_DESC {
        Format: TEXTURE_FORMAT,
        ViewDimension: D3D12_SRV_DIMENSION_TEXTURE2D,
        Shader4ComponentMapping: D3D12_DEFAULT_SHADER_4_COMPONENT_MAPPING,
        Anonymous: D3D12_SHADER_RESOURCE_VIEW_DESC_0 {
            Texture2D: D3D12_TEX2D_SRV {
                MipLevels: 1,
                ..Default::default()
            },
        },
    };
    unsafe {
        device.CreateShaderResourceView(
            texture,
            Some(&srv_desc),
            heap.GetCPUDescriptorHandleForHeapStart(),
        )
    };
}
