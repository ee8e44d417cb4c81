use dx12_demo_common::compile_shader::ShaderSource;
use dx12_demo_common::create_pipeline_state::create_pipeline_state;
use dx12_demo_common::create_root_signature::create_empty_root_signature;
use dx12_demo_common::create_vertex_buffer::create_vertex_buffer;
use dx12_demo_common::demo::Demo;
use dx12_demo_common::frame_resources::FrameResources;
use dx12_demo_common::geometry::ColorVertex;
use dx12_demo_common::geometry::TRIANGLE_VERTICES;
use dx12_demo_common::windy_error::MyResult;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::core::*;

const SHADERS: ShaderSource = ShaderSource {
    name: s!("shaders.hlsl"),
    code: include_bytes!("shaders.hlsl"),
};

pub struct ColorTriangle {
    root_signature: ID3D12RootSignature,
    pipeline_state: ID3D12PipelineState,
    // Read by the GPU on every draw.
    _vertex_buffer: ID3D12Resource,
    vertex_buffer_view: D3D12_VERTEX_BUFFER_VIEW,
}

impl Demo for ColorTriangle {
    const TITLE: &'static str = "dx12 color triangle";
    const CLEAR_COLOR: [f32; 4] = [1.0, 0.2, 0.4, 1.0];

    fn new(device: &ID3D12Device, _frame: &mut FrameResources) -> MyResult<Self> {
        let root_signature = create_empty_root_signature(device)?;

        let input_element_descs = [
            D3D12_INPUT_ELEMENT_DESC {
                SemanticName: s!("POSITION"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: std::mem::offset_of!(ColorVertex, position) as u32,
                InputSlotClass: D3D12_INPUT_CLASSIFICATION_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
            D3D12_INPUT_ELEMENT_DESC {
                SemanticName: s!("COLOR"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32A32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: std::mem::offset_of!(ColorVertex, color) as u32,
                InputSlotClass: D3D12_INPUT_CLASSIFICATION_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
        ];
        let pipeline_state =
            create_pipeline_state(device, &root_signature, &SHADERS, &input_element_descs)?;

        let (vertex_buffer, vertex_buffer_view) =
            create_vertex_buffer(device, &TRIANGLE_VERTICES, w!("TriangleVertices"))?;

        Ok(Self {
            root_signature,
            pipeline_state,
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
            command_list.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
            command_list.IASetVertexBuffers(0, Some(&[self.vertex_buffer_view]));
            command_list.DrawInstanced(TRIANGLE_VERTICES.len() as u32, 1, 0, 0);
        }
        Ok(())
    }
}
