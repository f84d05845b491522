#[derive(Debug)]
pub(crate) struct GPUInner {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_info: Option<wgpu::AdapterInfo>,
}

impl GPUInner {
    pub fn from_wgpu(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            adapter_info: None,
        }
    }

    pub async fn new_headless(limits: Option<wgpu::Limits>) -> Result<Self, GPUError> {
        Self::new_headless_with(limits, false).await
    }

    /// Like [`GPUInner::new_headless`], optionally restricted to the
    /// software fallback adapter.
    pub async fn new_headless_with(
        limits: Option<wgpu::Limits>,
        force_fallback_adapter: bool,
    ) -> Result<Self, GPUError> {
        let instance_descriptor = wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        };

        let instance = wgpu::Instance::new(&instance_descriptor);

        let adapter_descriptor = wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter,
        };

        let adapter = match instance.request_adapter(&adapter_descriptor).await {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("failed to request adapter: {:?}", e);
                return Err(GPUError::AdapterNotFound);
            }
        };

        let required_limits = limits.unwrap_or_else(|| {
            if cfg!(target_arch = "wasm32") {
                wgpu::Limits::downlevel_webgl2_defaults()
            } else {
                wgpu::Limits::default()
            }
        });

        let device_descriptor = wgpu::DeviceDescriptor {
            label: Some("Device"),
            required_features: wgpu::Features::empty(),
            required_limits,
            memory_hints: Default::default(),
            ..Default::default()
        };

        let (device, queue) = match adapter.request_device(&device_descriptor).await {
            Ok(pair) => pair,
            Err(e) => {
                log::error!("failed to request device: {}", e);
                return Err(GPUError::DeviceRequestFailed);
            }
        };

        let info = adapter.get_info();
        log::debug!("using adapter {} ({:?})", info.name, info.backend);

        Ok(Self {
            device,
            queue,
            adapter_info: Some(info),
        })
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPUError {
    AdapterNotFound,
    DeviceRequestFailed,
}

impl std::fmt::Display for GPUError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GPUError::AdapterNotFound => write!(f, "No compatible GPU adapter found"),
            GPUError::DeviceRequestFailed => write!(f, "Failed to request GPU device"),
        }
    }
}

impl std::error::Error for GPUError {}
