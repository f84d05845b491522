mod texture;

mod gpu_impls;
pub(crate) mod gpu_inner;

pub use gpu_impls::*;
pub use gpu_inner::GPUError;
pub(crate) use gpu_inner::GPUInner;

pub use texture::*;
