use tracing::debug;
use tracing::warn;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;
use windows::Win32::System::Threading::*;
use windows::core::*;

use crate::config::DemoConfig;
use crate::config::FRAME_COUNT;
use crate::create_device::DeviceContext;
use crate::transition_barrier::transition_barrier;
use crate::windy_error::MyResult;

pub const BACK_BUFFER_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

/// Everything tied to the swap chain: back buffers and their views, the
/// command list that draws into them and the fence that paces the CPU.
pub struct FrameResources {
    pub command_queue: ID3D12CommandQueue,
    pub swap_chain: IDXGISwapChain3,
    pub frame_index: u32,
    pub render_targets: [ID3D12Resource; FRAME_COUNT as usize],
    pub rtv_heap: ID3D12DescriptorHeap,
    pub rtv_descriptor_size: u32,
    pub viewport: D3D12_VIEWPORT,
    pub scissor_rect: RECT,
    pub command_allocators: [ID3D12CommandAllocator; FRAME_COUNT as usize],
    pub command_list: ID3D12GraphicsCommandList,
    pub fence: ID3D12Fence,
    /// Value the fence reaches once the work last submitted for each back buffer is done.
    pub fence_values: [u64; FRAME_COUNT as usize],
    pub fence_event: HANDLE,
    pub sync_interval: u32,
}

impl FrameResources {
    pub fn bind_to_window(
        context: &DeviceContext,
        hwnd: HWND,
        config: &DemoConfig,
    ) -> MyResult<Self> {
        let device = &context.device;
        let (width, height) = (config.window.width, config.window.height);

        let command_queue: ID3D12CommandQueue = unsafe {
            device.CreateCommandQueue(&D3D12_COMMAND_QUEUE_DESC {
                Type: D3D12_COMMAND_LIST_TYPE_DIRECT,
                Flags: D3D12_COMMAND_QUEUE_FLAG_NONE,
                ..Default::default()
            })?
        };

        let swap_chain_desc = DXGI_SWAP_CHAIN_DESC1 {
            BufferCount: FRAME_COUNT,
            Width: width,
            Height: height,
            Format: BACK_BUFFER_FORMAT,
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            ..Default::default()
        };

        let swap_chain: IDXGISwapChain1 = unsafe {
            context
                .dxgi_factory
                .CreateSwapChainForHwnd(&command_queue, hwnd, &swap_chain_desc, None, None)?
        };
        let swap_chain: IDXGISwapChain3 = swap_chain.cast()?;

        // Fullscreen transitions are not supported.
        unsafe {
            context
                .dxgi_factory
                .MakeWindowAssociation(hwnd, DXGI_MWA_NO_ALT_ENTER)?
        };

        let frame_index = unsafe { swap_chain.GetCurrentBackBufferIndex() };

        let rtv_heap: ID3D12DescriptorHeap = unsafe {
            device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
                NumDescriptors: FRAME_COUNT,
                Type: D3D12_DESCRIPTOR_HEAP_TYPE_RTV,
                Flags: D3D12_DESCRIPTOR_HEAP_FLAG_NONE,
                ..Default::default()
            })?
        };
        let rtv_descriptor_size =
            unsafe { device.GetDescriptorHandleIncrementSize(D3D12_DESCRIPTOR_HEAP_TYPE_RTV) };
        let rtv_start = unsafe { rtv_heap.GetCPUDescriptorHandleForHeapStart() };

        let render_targets: [ID3D12Resource; FRAME_COUNT as usize] =
            array_init::try_array_init(|i| -> Result<ID3D12Resource> {
                let resource: ID3D12Resource = unsafe { swap_chain.GetBuffer(i as u32)? };
                unsafe {
                    device.CreateRenderTargetView(
                        &resource,
                        None,
                        D3D12_CPU_DESCRIPTOR_HANDLE {
                            ptr: rtv_start.ptr + i * rtv_descriptor_size as usize,
                        },
                    )
                };
                Ok(resource)
            })?;

        let command_allocators: [ID3D12CommandAllocator; FRAME_COUNT as usize] =
            array_init::try_array_init(|_| unsafe {
                device.CreateCommandAllocator(D3D12_COMMAND_LIST_TYPE_DIRECT)
            })?;

        let command_list: ID3D12GraphicsCommandList = unsafe {
            device.CreateCommandList(
                0,
                D3D12_COMMAND_LIST_TYPE_DIRECT,
                &command_allocators[frame_index as usize],
                None::<&ID3D12PipelineState>,
            )
        }?;
        // Lists are created open; the frame loop expects to reset a closed one.
        unsafe { command_list.Close()? };

        let fence: ID3D12Fence = unsafe { device.CreateFence(0, D3D12_FENCE_FLAG_NONE)? };
        let fence_event = unsafe { CreateEventW(None, false, false, None)? };

        let viewport = D3D12_VIEWPORT {
            TopLeftX: 0.0,
            TopLeftY: 0.0,
            Width: width as f32,
            Height: height as f32,
            MinDepth: D3D12_MIN_DEPTH,
            MaxDepth: D3D12_MAX_DEPTH,
        };

        let scissor_rect = RECT {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };

        let mut frame = Self {
            command_queue,
            swap_chain,
            frame_index,
            render_targets,
            rtv_heap,
            rtv_descriptor_size,
            viewport,
            scissor_rect,
            command_allocators,
            command_list,
            fence,
            fence_values: [0; FRAME_COUNT as usize],
            fence_event,
            sync_interval: config.sync_interval,
        };
        frame.wait_for_gpu()?;

        debug!(
            width,
            height,
            aspect_ratio = config.aspect_ratio(),
            frame_index,
            "Swap chain bound to window"
        );
        Ok(frame)
    }

    pub fn current_render_target(&self) -> &ID3D12Resource {
        &self.render_targets[self.frame_index as usize]
    }

    pub fn current_rtv(&self) -> D3D12_CPU_DESCRIPTOR_HANDLE {
        D3D12_CPU_DESCRIPTOR_HANDLE {
            ptr: unsafe { self.rtv_heap.GetCPUDescriptorHandleForHeapStart() }.ptr
                + (self.frame_index * self.rtv_descriptor_size) as usize,
        }
    }

    fn reset_command_list(&self, pso: Option<&ID3D12PipelineState>) -> MyResult<()> {
        // Safe to reset: the fence wait in move_to_next_frame or wait_for_gpu
        // guarantees the GPU is done with this allocator.
        let command_allocator = &self.command_allocators[self.frame_index as usize];
        unsafe {
            command_allocator.Reset()?;
            self.command_list.Reset(command_allocator, pso)?;
        }
        Ok(())
    }

    fn execute_command_list(&self) -> MyResult<()> {
        unsafe { self.command_list.Close()? };
        let command_lists = [Some(self.command_list.cast::<ID3D12CommandList>()?)];
        unsafe { self.command_queue.ExecuteCommandLists(&command_lists) };
        Ok(())
    }

    /// Records one-off work such as uploads, submits it and blocks until the GPU
    /// has finished, so anything `record` referenced may be released afterwards.
    pub fn execute_setup<F>(&mut self, pso: Option<&ID3D12PipelineState>, record: F) -> MyResult<()>
    where
        F: FnOnce(&ID3D12GraphicsCommandList) -> MyResult<()>,
    {
        self.reset_command_list(pso)?;
        record(&self.command_list)?;
        self.execute_command_list()?;
        self.wait_for_gpu()
    }

    /// Opens the command list for this frame and clears the back buffer.
    pub fn begin_frame(
        &self,
        root_signature: Option<&ID3D12RootSignature>,
        pso: Option<&ID3D12PipelineState>,
        clear_color: &[f32; 4],
    ) -> MyResult<()> {
        self.reset_command_list(pso)?;

        let command_list = &self.command_list;
        unsafe {
            if let Some(root_signature) = root_signature {
                command_list.SetGraphicsRootSignature(root_signature);
            }
            command_list.RSSetViewports(&[self.viewport]);
            command_list.RSSetScissorRects(&[self.scissor_rect]);

            command_list.ResourceBarrier(&[transition_barrier(
                self.current_render_target(),
                D3D12_RESOURCE_STATE_PRESENT,
                D3D12_RESOURCE_STATE_RENDER_TARGET,
            )]);

            let rtv_handle = self.current_rtv();
            command_list.OMSetRenderTargets(1, Some(&rtv_handle), false, None);
            command_list.ClearRenderTargetView(rtv_handle, clear_color, None);
        }
        Ok(())
    }

    /// Closes and submits the frame, presents it and waits for the next back buffer.
    pub fn end_frame(&mut self) -> MyResult<()> {
        unsafe {
            self.command_list.ResourceBarrier(&[transition_barrier(
                self.current_render_target(),
                D3D12_RESOURCE_STATE_RENDER_TARGET,
                D3D12_RESOURCE_STATE_PRESENT,
            )]);
        }
        self.execute_command_list()?;

        unsafe { self.swap_chain.Present(self.sync_interval, DXGI_PRESENT(0)) }.ok()?;

        self.move_to_next_frame()
    }

    /// Blocks until the GPU reaches the current frame's fence value, then bumps it.
    pub fn wait_for_gpu(&mut self) -> MyResult<()> {
        let current_frame_index = self.frame_index as usize;
        let fence_value = self.fence_values[current_frame_index];

        unsafe { self.command_queue.Signal(&self.fence, fence_value)? };
        self.wait_for_fence_value(fence_value)?;

        self.fence_values[current_frame_index] += 1;
        Ok(())
    }

    pub fn move_to_next_frame(&mut self) -> MyResult<()> {
        let fence_value_to_signal = self.fence_values[self.frame_index as usize];
        unsafe { self.command_queue.Signal(&self.fence, fence_value_to_signal)? };

        self.frame_index = unsafe { self.swap_chain.GetCurrentBackBufferIndex() };
        let next_frame_index = self.frame_index as usize;

        // Wait if the GPU still has commands in flight for the buffer we are about to reuse.
        self.wait_for_fence_value(self.fence_values[next_frame_index])?;

        self.fence_values[next_frame_index] = fence_value_to_signal + 1;
        Ok(())
    }

    /// Waits for everything submitted so far. Call before releasing anything the
    /// GPU might still read.
    pub fn wait_for_gpu_idle(&mut self) -> MyResult<()> {
        let idle_fence_value = self.fence_values.iter().copied().max().unwrap_or(0);
        unsafe { self.command_queue.Signal(&self.fence, idle_fence_value)? };
        self.wait_for_fence_value(idle_fence_value)
    }

    fn wait_for_fence_value(&self, fence_value: u64) -> MyResult<()> {
        if unsafe { self.fence.GetCompletedValue() } < fence_value {
            unsafe {
                self.fence
                    .SetEventOnCompletion(fence_value, self.fence_event)?;
                WaitForSingleObjectEx(self.fence_event, INFINITE, false);
            }
        }
        Ok(())
    }
}

impl Drop for FrameResources {
    fn drop(&mut self) {
        if !self.fence_event.is_invalid() {
            if let Err(e) = unsafe { CloseHandle(self.fence_event) } {
                warn!("Failed to close fence event: {e:?}");
            }
        }
    }
}
