use super::{TextureError, TextureId};

/// A single texture that can be played as one frame of an animation.
///
/// [`super::Texture`] is the GPU implementation; anything with a stable id
/// and the same sampling knobs can be animated.
pub trait FrameTexture {
    /// Stable identifier of the backing resource.
    fn id(&self) -> TextureId;

    /// Makes the backing resource resident. Calling it on a resident texture
    /// does nothing.
    fn create(&mut self) -> Result<(), TextureError>;

    fn build_hardware_mipmaps(&mut self) -> Result<(), TextureError>;

    fn set_smooth(&mut self, smooth: bool);

    fn set_repeat(&mut self, repeat: bool);
}
