use dx12_demo_common::compile_shader::ShaderSource;
use dx12_demo_common::create_pipeline_state::create_pipeline_state;
use dx12_demo_common::create_root_signature::create_texture_root_signature;
use dx12_demo_common::create_vertex_buffer::create_vertex_buffer;
use dx12_demo_common::demo::Demo;
use dx12_demo_common::frame_resources::FrameResources;
use dx12_demo_common::geometry::QUAD_VERTICES;
use dx12_demo_common::geometry::TexturedVertex;
use dx12_demo_common::texels::Rgba8Image;
use dx12_demo_common::upload_texture::create_texture_srv;
use dx12_demo_common::upload_texture::upload_texture;
use dx12_demo_common::windy_error::MyResult;
use eyre::OptionExt;
use tracing::debug;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::core::*;

const SHADERS: ShaderSource = ShaderSource {
    name: s!("sprite_shaders.hlsl"),
    code: include_bytes!("sprite_shaders.hlsl"),
};

pub struct TexturedQuad {
    root_signature: ID3D12RootSignature,
    pipeline_state: ID3D12PipelineState,
    srv_heap: ID3D12DescriptorHeap,
    _texture: ID3D12Resource,
    _vertex_buffer: ID3D12Resource,
    vertex_buffer_view: D3D12_VERTEX_BUFFER_VIEW,
}

impl Demo for TexturedQuad {
    const TITLE: &'static str = "dx12 textured quad";
    const CLEAR_COLOR: [f32; 4] = [1.0, 0.2, 0.4, 1.0];

    fn new(device: &ID3D12Device, frame: &mut FrameResources) -> MyResult<Self> {
        let root_signature = create_texture_root_signature(device)?;

        let input_element_descs = [
            D3D12_INPUT_ELEMENT_DESC {
                SemanticName: s!("POSITION"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: std::mem::offset_of!(TexturedVertex, position) as u32,
                InputSlotClass: D3D12_INPUT_CLASSIFICATION_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
            D3D12_INPUT_ELEMENT_DESC {
                SemanticName: s!("TEXCOORD"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: std::mem::offset_of!(TexturedVertex, uv) as u32,
                InputSlotClass: D3D12_INPUT_CLASSIFICATION_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
        ];
        let pipeline_state =
            create_pipeline_state(device, &root_signature, &SHADERS, &input_element_descs)?;

        let srv_heap: ID3D12DescriptorHeap = unsafe {
            device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
                Type: D3D12_DESCRIPTOR_HEAP_TYPE_CBV_SRV_UAV,
                NumDescriptors: 1,
                Flags: D3D12_DESCRIPTOR_HEAP_FLAG_SHADER_VISIBLE,
                ..Default::default()
            })?
        };

        let (vertex_buffer, vertex_buffer_view) =
            create_vertex_buffer(device, &QUAD_VERTICES, w!("QuadVertices"))?;

        let image = Rgba8Image::checker_2x2();
        let mut uploaded = None;
        frame.execute_setup(Some(&pipeline_state), |command_list| {
            uploaded = Some(upload_texture(device, command_list, &image)?);
            Ok(())
        })?;
        // execute_setup waited for the copy, so the staging buffer can go.
        let texture = uploaded
            .ok_or_eyre("texture upload was not recorded")?
            .texture;
        create_texture_srv(device, &texture, &srv_heap);
        debug!(
            width = image.width(),
            height = image.height(),
            "Checkerboard texture uploaded"
        );

        Ok(Self {
            root_signature,
            pipeline_state,
            srv_heap,
            _texture: texture,
            _vertex_buffer: vertex_buffer,
            vertex_buffer_view,
        })
    }

    fn root_signature(&self) -> Option<&ID3D12RootSignature> {
        Some(&self.root_signature)
    }

    fn pipeline_state(&self) -> Option<&ID3D12PipelineState> {
        Some(&self.pipeline_state)
    }

    fn record(&self, command_list: &ID3D12GraphicsCommandList) -> MyResult<()> {
        unsafe {
            command_list.SetDescriptorHeaps(&[Some(self.srv_heap.clone())]);
            command_list
                .SetGraphicsRootDescriptorTable(0, self.srv_heap.GetGPUDescriptorHandleForHeapStart());
            command_list.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
            command_list.IASetVertexBuffers(0, Some(&[self.vertex_buffer_view]));
            command_list.DrawInstanced(QUAD_VERTICES.len() as u32, 1, 0, 0);
        }
        Ok(())
    }
}
