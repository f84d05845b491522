pub mod animated;
pub mod decode;

mod frame;
mod mipmap;
mod types;

pub use animated::{AnimatedTexture, AnimatedTextureBuilder, AnimationFrame};
pub use decode::{AnimationData, decode_animation};
pub use frame::FrameTexture;
pub use mipmap::{build_mip_chain, mip_level_count};
pub use types::*;

use std::sync::Arc;

use image::RgbaImage;

use crate::math::Point2;

use super::GPUInner;

/// Texels are uploaded as 8-bit sRGB RGBA.
const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Validates a texture size against the device limit.
///
/// `max_dimension` of `None` skips the upper bound check.
pub(crate) fn setup_size(size: Point2, max_dimension: Option<u32>) -> Result<(), TextureError> {
    if size.is_empty() {
        log::error!("invalid texture size {}x{}", size.x, size.y);
        return Err(TextureError::InvalidTextureSize);
    }

    if let Some(max) = max_dimension {
        if size.width().max(size.height()) > max {
            log::error!(
                "texture {}x{} exceeds the device limit of {}",
                size.x,
                size.y,
                max
            );
            return Err(TextureError::TextureTooLarge);
        }
    }

    Ok(())
}

/// A GPU texture built from a CPU image.
///
/// The pixels stay on the CPU side until [`Texture::create`] is called (or the
/// texture is drawn through an animated texture), which uploads them together
/// with the mip chain when mipmaps are enabled.
#[derive(Debug)]
pub struct Texture {
    pub(crate) graphics: Arc<GPUInner>,
    pub(crate) inner: Option<TextureInner>,

    id: TextureId,
    size: Point2,
    image: RgbaImage,
    mip_chain: Vec<RgbaImage>,

    has_mipmaps: bool,
    compress: bool,
    smooth: bool,
    repeat: bool,
    sampler_info: TextureSampler,
}

#[derive(Debug)]
pub(crate) struct TextureInner {
    pub(crate) wgpu_texture: wgpu::Texture,
    pub(crate) wgpu_view: wgpu::TextureView,
    pub(crate) wgpu_sampler: wgpu::Sampler,
}

impl Texture {
    pub(crate) fn from_image(
        graphics: Arc<GPUInner>,
        image: RgbaImage,
        build_mipmaps: bool,
        compress: bool,
        flip_vertical: bool,
    ) -> Result<Self, TextureError> {
        let size = Point2::from(image.dimensions());
        setup_size(size, Some(graphics.max_texture_dimension()))?;

        let image = if flip_vertical {
            image::imageops::flip_vertical(&image)
        } else {
            image
        };

        if compress {
            log::debug!("texture compression requested; RGBA frames are uploaded uncompressed");
        }

        let mip_chain = if build_mipmaps {
            build_mip_chain(&image)
        } else {
            Vec::new()
        };

        Ok(Self {
            graphics,
            inner: None,

            id: TextureId::next(),
            size,
            image,
            mip_chain,

            has_mipmaps: build_mipmaps,
            compress,
            smooth: false,
            repeat: false,
            sampler_info: TextureSampler::from_flags(false, false, build_mipmaps),
        })
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn size(&self) -> Point2 {
        self.size
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn is_created(&self) -> bool {
        self.inner.is_some()
    }

    pub fn has_mipmaps(&self) -> bool {
        self.has_mipmaps
    }

    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    pub fn mip_level_count(&self) -> u32 {
        1 + self.mip_chain.len() as u32
    }

    pub fn sampler_info(&self) -> TextureSampler {
        self.sampler_info
    }

    /// View over every mip level. `None` until the texture is created.
    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.inner.as_ref().map(|inner| &inner.wgpu_view)
    }

    pub fn sampler(&self) -> Option<&wgpu::Sampler> {
        self.inner.as_ref().map(|inner| &inner.wgpu_sampler)
    }

    pub fn wgpu_texture(&self) -> Option<&wgpu::Texture> {
        self.inner.as_ref().map(|inner| &inner.wgpu_texture)
    }

    /// Uploads the texture to the GPU if it is not resident yet.
    pub fn create(&mut self) -> Result<(), TextureError> {
        if self.inner.is_some() {
            return Ok(());
        }

        self.inner = Some(self.upload()?);
        Ok(())
    }

    /// Builds the full mip chain. A resident texture is re-uploaded so the
    /// GPU copy carries every level, and its sampler is rebuilt even when
    /// there is only one level.
    pub fn build_hardware_mipmaps(&mut self) -> Result<(), TextureError> {
        if !self.has_mipmaps {
            self.mip_chain = build_mip_chain(&self.image);
            self.has_mipmaps = true;
            self.refresh_sampler();
        }

        if self.inner.is_some() && self.wgpu_mip_level_count() != self.mip_level_count() {
            self.inner = Some(self.upload()?);
        }

        Ok(())
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
        self.refresh_sampler();
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
        self.refresh_sampler();
    }

    fn wgpu_mip_level_count(&self) -> u32 {
        self.inner
            .as_ref()
            .map(|inner| inner.wgpu_texture.mip_level_count())
            .unwrap_or(0)
    }

    fn refresh_sampler(&mut self) {
        self.sampler_info = TextureSampler::from_flags(self.smooth, self.repeat, self.has_mipmaps);

        if let Some(inner) = self.inner.as_mut() {
            inner.wgpu_sampler = self.sampler_info.make_wgpu(&self.graphics.device);
        }
    }

    fn upload(&self) -> Result<TextureInner, TextureError> {
        let device = &self.graphics.device;
        let queue = &self.graphics.queue;

        let tex_label = format!("Animated Frame {}", self.id.get());
        let view_label = format!("Animated Frame View {}", self.id.get());

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(tex_label.as_str()),
            size: self.size.into(),
            mip_level_count: self.mip_level_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let levels = std::iter::once(&self.image).chain(self.mip_chain.iter());
        for (mip_level, level) in levels.enumerate() {
            let (width, height) = level.dimensions();

            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                level.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(view_label.as_str()),
            ..Default::default()
        });
        let sampler = self.sampler_info.make_wgpu(device);

        let validation = futures::executor::block_on(device.pop_error_scope());
        let out_of_memory = futures::executor::block_on(device.pop_error_scope());

        if let Some(err) = validation.or(out_of_memory) {
            log::error!("failed to create texture {}: {}", self.id, err);
            return Err(TextureError::GpuError);
        }

        log::debug!(
            "created texture {} ({}x{}, {} mip levels)",
            self.id,
            self.size.x,
            self.size.y,
            self.mip_level_count()
        );

        Ok(TextureInner {
            wgpu_texture: texture,
            wgpu_view: view,
            wgpu_sampler: sampler,
        })
    }
}

impl FrameTexture for Texture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn create(&mut self) -> Result<(), TextureError> {
        Texture::create(self)
    }

    fn build_hardware_mipmaps(&mut self) -> Result<(), TextureError> {
        Texture::build_hardware_mipmaps(self)
    }

    fn set_smooth(&mut self, smooth: bool) {
        Texture::set_smooth(self, smooth)
    }

    fn set_repeat(&mut self, repeat: bool) {
        Texture::set_repeat(self, repeat)
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Texture {}

pub enum TextureBuilderData<'a> {
    None,
    Data(&'a [u8]),
    Image(RgbaImage),
}

pub struct TextureBuilder<'a> {
    pub(crate) graphics: Arc<GPUInner>,
    pub(crate) data: TextureBuilderData<'a>,
    pub(crate) mipmaps: bool,
    pub(crate) compress: bool,
    pub(crate) flip_vertical: bool,
}

impl<'a> TextureBuilder<'a> {
    pub(crate) fn new(graphics: Arc<GPUInner>) -> Self {
        Self {
            graphics,
            data: TextureBuilderData::None,
            mipmaps: false,
            compress: false,
            flip_vertical: false,
        }
    }

    /// Sets the texture data from encoded image bytes (PNG, GIF, ...).
    pub fn set_file_data(mut self, data: &'a [u8]) -> Self {
        self.data = TextureBuilderData::Data(data);
        self
    }

    /// Sets the texture data from decoded RGBA pixels.
    pub fn set_image(mut self, image: RgbaImage) -> Self {
        self.data = TextureBuilderData::Image(image);
        self
    }

    /// Builds the mip chain at construction time.
    pub fn set_mipmaps(mut self, mipmaps: bool) -> Self {
        self.mipmaps = mipmaps;
        self
    }

    pub fn set_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Flips rows so the first row of the image ends up at the bottom.
    pub fn set_flip_vertical(mut self, flip: bool) -> Self {
        self.flip_vertical = flip;
        self
    }

    pub fn build(self) -> Result<Texture, TextureError> {
        let image = match self.data {
            TextureBuilderData::Data(data) => match image::load_from_memory(data) {
                Ok(image) => image.to_rgba8(),
                Err(e) => {
                    log::debug!("failed to load image from memory: {}", e);
                    return Err(TextureError::InvalidTextureData);
                }
            },
            TextureBuilderData::Image(image) => image,
            TextureBuilderData::None => return Err(TextureError::InvalidTextureData),
        };

        Texture::from_image(
            self.graphics,
            image,
            self.mipmaps,
            self.compress,
            self.flip_vertical,
        )
    }
}
