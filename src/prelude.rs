pub use super::create_gpu;
pub use super::gpu::*;
pub use super::math::*;
pub use super::utils::{LoggingConfig, init_logging};
pub use super::window::*;
