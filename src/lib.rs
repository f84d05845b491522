//! Frame-sequenced textures for sprite animations on top of wgpu.

/// GPU device handle, textures and animated textures
pub mod gpu;
/// Sizes and timing
pub mod math;
/// Predefined types and traits for easy access
pub mod prelude;
/// Logging setup
pub mod utils;
/// Repaint requests towards the windowing layer
pub mod window;

/// Start building a headless GPU device.
pub fn create_gpu() -> gpu::GPUBuilder {
    gpu::GPUBuilder::new()
}
