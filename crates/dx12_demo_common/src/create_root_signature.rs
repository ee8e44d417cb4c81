use tracing::debug;
use tracing::error;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;

use crate::compile_shader::blob_bytes;
use crate::compile_shader::blob_text;
use crate::windy_error::MyResult;
use crate::windy_error::WrappedWindowsError;

/// A root signature with no parameters that still lets the input assembler
/// read vertex buffers.
pub fn create_empty_root_signature(device: &ID3D12Device) -> MyResult<ID3D12RootSignature> {
    let desc = D3D12_VERSIONED_ROOT_SIGNATURE_DESC {
        Version: D3D_ROOT_SIGNATURE_VERSION_1_0,
        Anonymous: D3D12_VERSIONED_ROOT_SIGNATURE_DESC_0 {
            Desc_1_0: D3D12_ROOT_SIGNATURE_DESC {
                Flags: D3D12_ROOT_SIGNATURE_FLAG_ALLOW_INPUT_ASSEMBLER_INPUT_LAYOUT,
                ..Default::default()
            },
        },
    };
    serialize_and_create(device, &desc)
}

/// One descriptor table holding a single SRV at `t0` and a static point
/// sampler at `s0`, both visible to the pixel shader only.
///
/// Root signature 1.1 is used when the driver supports it so the range can be
/// marked `DATA_STATIC`.
pub fn create_texture_root_signature(device: &ID3D12Device) -> MyResult<ID3D12RootSignature> {
    let sampler = D3D12_STATIC_SAMPLER_DESC {
        Filter: D3D12_FILTER_MIN_MAG_MIP_POINT,
        AddressU: D3D12_TEXTURE_ADDRESS_MODE_BORDER,
        AddressV: D3D12_TEXTURE_ADDRESS_MODE_BORDER,
        AddressW: D3D12_TEXTURE_ADDRESS_MODE_BORDER,
        MipLODBias: 0.0,
        MaxAnisotropy: 0,
        ComparisonFunc: D3D12_COMPARISON_FUNC_NEVER,
        BorderColor: D3D12_STATIC_BORDER_COLOR_TRANSPARENT_BLACK,
        MinLOD: 0.0,
        MaxLOD: D3D12_FLOAT32_MAX,
        ShaderRegister: 0,
        RegisterSpace: 0,
        ShaderVisibility: D3D12_SHADER_VISIBILITY_PIXEL,
    };
    let flags = D3D12_ROOT_SIGNATURE_FLAG_ALLOW_INPUT_ASSEMBLER_INPUT_LAYOUT;

    if highest_root_signature_version(device) == D3D_ROOT_SIGNATURE_VERSION_1_1 {
        let range = D3D12_DESCRIPTOR_RANGE1 {
            RangeType: D3D12_DESCRIPTOR_RANGE_TYPE_SRV,
            NumDescriptors: 1,
            BaseShaderRegister: 0,
            RegisterSpace: 0,
            Flags: D3D12_DESCRIPTOR_RANGE_FLAG_DATA_STATIC,
            OffsetInDescriptorsFromTableStart: D3D12_DESCRIPTOR_RANGE_OFFSET_APPEND,
        };
        let parameter = D3D12_ROOT_PARAMETER1 {
            ParameterType: D3D12_ROOT_PARAMETER_TYPE_DESCRIPTOR_TABLE,
            Anonymous: D3D12_ROOT_PARAMETER1_0 {
                DescriptorTable: D3D12_ROOT_DESCRIPTOR_TABLE1 {
                    NumDescriptorRanges: 1,
                    pDescriptorRanges: &range,
                },
            },
            ShaderVisibility: D3D12_SHADER_VISIBILITY_PIXEL,
        };
        let desc = D3D12_VERSIONED_ROOT_SIGNATURE_DESC {
            Version: D3D_ROOT_SIGNATURE_VERSION_1_1,
            Anonymous: D3D12_VERSIONED_ROOT_SIGNATURE_DESC_0 {
                Desc_1_1: D3D12_ROOT_SIGNATURE_DESC1 {
                    NumParameters: 1,
                    pParameters: &parameter,
                    NumStaticSamplers: 1,
                    pStaticSamplers: &sampler,
                    Flags: flags,
                },
            },
        };
        serialize_and_create(device, &desc)
    } else {
        let range = D3D12_DESCRIPTOR_RANGE {
            RangeType: D3D12_DESCRIPTOR_RANGE_TYPE_SRV,
            NumDescriptors: 1,
            BaseShaderRegister: 0,
            RegisterSpace: 0,
            OffsetInDescriptorsFromTableStart: D3D12_DESCRIPTOR_RANGE_OFFSET_APPEND,
        };
        let parameter = D3D12_ROOT_PARAMETER {
            ParameterType: D3D12_ROOT_PARAMETER_TYPE_DESCRIPTOR_TABLE,
            Anonymous: D3D12_ROOT_PARAMETER_0 {
                DescriptorTable: D3D12_ROOT_DESCRIPTOR_TABLE {
                    NumDescriptorRanges: 1,
                    pDescriptorRanges: &range,
                },
            },
            ShaderVisibility: D3D12_SHADER_VISIBILITY_PIXEL,
        };
        let desc = D3D12_VERSIONED_ROOT_SIGNATURE_DESC {
            Version: D3D_ROOT_SIGNATURE_VERSION_1_0,
            Anonymous: D3D12_VERSIONED_ROOT_SIGNATURE_DESC_0 {
                Desc_1_0: D3D12_ROOT_SIGNATURE_DESC {
                    NumParameters: 1,
                    pParameters: &parameter,
                    NumStaticSamplers: 1,
                    pStaticSamplers: &sampler,
                    Flags: flags,
                },
            },
        };
        serialize_and_create(device, &desc)
    }
}

fn highest_root_signature_version(device: &ID3D12Device) -> D3D_ROOT_SIGNATURE_VERSION {
    let mut feature_data = D3D12_FEATURE_DATA_ROOT_SIGNATURE {
        HighestVersion: D3D_ROOT_SIGNATURE_VERSION_1_1,
    };
    let supported = unsafe {
        device.CheckFeatureSupport(
            D3D12_FEATURE_ROOT_SIGNATURE,
            &mut feature_data as *mut _ as *mut _,
            std::mem::size_of::<D3D12_FEATURE_DATA_ROOT_SIGNATURE>() as u32,
        )
    };
    if supported.is_err() {
        feature_data.HighestVersion = D3D_ROOT_SIGNATURE_VERSION_1_0;
    }
    debug!("Highest root signature version: {:?}", feature_data.HighestVersion);
    feature_data.HighestVersion
}

fn serialize_and_create(
    device: &ID3D12Device,
    desc: &D3D12_VERSIONED_ROOT_SIGNATURE_DESC,
) -> MyResult<ID3D12RootSignature> {
    let mut signature_blob = None;
    let mut error_blob = None;

    let serialized =
        unsafe { D3D12SerializeVersionedRootSignature(desc, &mut signature_blob, Some(&mut error_blob)) };

    if let Err(e) = serialized {
        let details = error_blob.as_ref().map(blob_text).unwrap_or_default();
        error!("Root signature serialization error: {details}");
        let report = eyre::Report::new(WrappedWindowsError::from(e))
            .wrap_err(format!("serializing root signature: {details}"));
        return Err(report.into());
    }

    let signature_blob = signature_blob
        .ok_or_else(|| eyre::eyre!("root signature serializer returned no blob"))?;

    Ok(unsafe { device.CreateRootSignature(0, blob_bytes(&signature_blob)) }?)
}
