//! Shared setup for the Direct3D 12 demo programs.
//!
//! Everything that touches Win32, DXGI or Direct3D 12 is behind `cfg(windows)`.
//! The configuration, vertex data, texel layout and error plumbing are plain
//! Rust so they build and test on any host.

pub mod config;
pub mod geometry;
pub mod logging;
pub mod texels;
pub mod windy_error;

#[cfg(windows)]
pub mod adapter_utils;
#[cfg(windows)]
pub mod compile_shader;
#[cfg(windows)]
pub mod create_device;
#[cfg(windows)]
pub mod create_pipeline_state;
#[cfg(windows)]
pub mod create_root_signature;
#[cfg(windows)]
pub mod create_vertex_buffer;
#[cfg(windows)]
pub mod create_window;
#[cfg(windows)]
pub mod debug_messages;
#[cfg(windows)]
pub mod demo;
#[cfg(windows)]
pub mod error_dialog;
#[cfg(windows)]
pub mod frame_resources;
#[cfg(windows)]
pub mod transition_barrier;
#[cfg(windows)]
pub mod upload_texture;
#[cfg(windows)]
pub mod window_class;
#[cfg(windows)]
pub mod windy_window_class_id;
