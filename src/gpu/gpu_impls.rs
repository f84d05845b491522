use std::sync::Arc;

use crate::gpu::{
    gpu_inner::{GPUError, GPUInner},
    texture,
};

/// Handle to a wgpu device and queue that textures are created on.
#[derive(Debug, Clone)]
pub struct GPU {
    pub(crate) inner: Arc<GPUInner>,
}

impl GPU {
    /// Wraps a device owned by the host application.
    pub fn from_wgpu(device: wgpu::Device, queue: wgpu::Queue) -> GPU {
        GPU {
            inner: Arc::new(GPUInner::from_wgpu(device, queue)),
        }
    }

    pub(crate) async fn new_headless(limits: Option<wgpu::Limits>) -> Result<GPU, GPUError> {
        let inner = Arc::new(GPUInner::new_headless(limits).await?);

        Ok(GPU { inner })
    }

    /// Name of the adapter, when the device was created by this crate.
    pub fn adapter_name(&self) -> Option<&str> {
        self.inner.adapter_info.as_ref().map(|info| info.name.as_str())
    }

    /// Largest width or height a texture may have on this device.
    pub fn max_texture_dimension(&self) -> u32 {
        self.inner.max_texture_dimension()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.inner.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.inner.queue
    }

    /// Create a new texture.
    pub fn create_texture<'a>(&self) -> texture::TextureBuilder<'a> {
        texture::TextureBuilder::new(self.inner.clone())
    }

    /// Create a new animated texture.
    pub fn create_animated_texture<'a>(&self) -> texture::AnimatedTextureBuilder<'a> {
        texture::AnimatedTextureBuilder::new(self.inner.clone())
    }
}

pub struct GPUBuilder {
    limits: Option<wgpu::Limits>,
}

impl GPUBuilder {
    pub(crate) fn new() -> Self {
        GPUBuilder { limits: None }
    }

    /// Overrides the device limits requested from the adapter.
    pub fn set_limits(mut self, limits: wgpu::Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Creates a headless device on the default adapter.
    pub fn build(self) -> Result<GPU, GPUError> {
        futures::executor::block_on(GPU::new_headless(self.limits))
    }
}
