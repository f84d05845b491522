use std::sync::atomic::{AtomicU64, Ordering};

static TEXTURE_REF_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a texture resource.
///
/// Assigned once when the texture is built and kept across GPU
/// (re)materialization, so renderers can cache bindings by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(u64);

impl TextureId {
    pub(crate) fn next() -> Self {
        Self(TEXTURE_REF_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TextureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Hash, Copy, PartialEq, Eq)]
pub enum AddressMode {
    ClampToEdge,
    Repeat,
}

impl Into<wgpu::AddressMode> for AddressMode {
    fn into(self) -> wgpu::AddressMode {
        match self {
            AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AddressMode::Repeat => wgpu::AddressMode::Repeat,
        }
    }
}

#[derive(Clone, Debug, Hash, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

impl Into<wgpu::FilterMode> for FilterMode {
    fn into(self) -> wgpu::FilterMode {
        match self {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Sampler state derived from a texture's smooth / repeat / mipmap flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureSampler {
    pub address_mode: AddressMode,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub mipmap_filter: FilterMode,
    pub lod_max_clamp: f32,
}

impl TextureSampler {
    /// Smooth textures filter linearly, and blend between mip levels when a
    /// mip chain is present. Everything else samples the nearest texel.
    pub fn from_flags(smooth: bool, repeat: bool, mipmapped: bool) -> Self {
        let filter = if smooth {
            FilterMode::Linear
        } else {
            FilterMode::Nearest
        };

        Self {
            address_mode: if repeat {
                AddressMode::Repeat
            } else {
                AddressMode::ClampToEdge
            },
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: if smooth && mipmapped {
                FilterMode::Linear
            } else {
                FilterMode::Nearest
            },
            lod_max_clamp: if mipmapped { 32.0 } else { 0.0 },
        }
    }

    pub fn make_wgpu(&self, device: &wgpu::Device) -> wgpu::Sampler {
        let desc = wgpu::SamplerDescriptor {
            label: Some("animated texture sampler"),
            address_mode_u: self.address_mode.into(),
            address_mode_v: self.address_mode.into(),
            address_mode_w: self.address_mode.into(),
            mag_filter: self.mag_filter.into(),
            min_filter: self.min_filter.into(),
            mipmap_filter: self.mipmap_filter.into(),
            lod_min_clamp: 0.0,
            lod_max_clamp: self.lod_max_clamp,
            compare: None,
            anisotropy_clamp: 1,
            border_color: None,
        };

        device.create_sampler(&desc)
    }

    pub const DEFAULT: Self = Self {
        address_mode: AddressMode::ClampToEdge,
        mag_filter: FilterMode::Nearest,
        min_filter: FilterMode::Nearest,
        mipmap_filter: FilterMode::Nearest,
        lod_max_clamp: 0.0,
    };
}

impl Default for TextureSampler {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureError {
    InvalidTextureData,
    InvalidTextureSize,
    TextureTooLarge,
    FrameSizeMismatch,
    NoFrames,
    NotAnimated,
    GpuError,
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::InvalidTextureData => write!(f, "Invalid texture data"),
            TextureError::InvalidTextureSize => write!(f, "Invalid texture size"),
            TextureError::TextureTooLarge => {
                write!(f, "Texture exceeds the device's maximum dimension")
            }
            TextureError::FrameSizeMismatch => {
                write!(f, "Frame dimensions differ from the texture size")
            }
            TextureError::NoFrames => write!(f, "Animated texture has no frames"),
            TextureError::NotAnimated => write!(f, "Image is not animated"),
            TextureError::GpuError => write!(f, "GPU rejected the texture"),
        }
    }
}

impl std::error::Error for TextureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_nonzero() {
        let a = TextureId::next();
        let b = TextureId::next();

        assert_ne!(a, b);
        assert!(a.get() > 0 && b.get() > 0);
    }

    #[test]
    fn sharp_clamped_sampler_is_the_default() {
        assert_eq!(
            TextureSampler::from_flags(false, false, false),
            TextureSampler::DEFAULT
        );
    }

    #[test]
    fn smooth_mipmapped_sampler_blends_levels() {
        let sampler = TextureSampler::from_flags(true, true, true);

        assert_eq!(sampler.address_mode, AddressMode::Repeat);
        assert_eq!(sampler.mag_filter, FilterMode::Linear);
        assert_eq!(sampler.min_filter, FilterMode::Linear);
        assert_eq!(sampler.mipmap_filter, FilterMode::Linear);
        assert!(sampler.lod_max_clamp > 0.0);
    }

    #[test]
    fn smooth_without_mipmaps_keeps_a_single_level() {
        let sampler = TextureSampler::from_flags(true, false, false);

        assert_eq!(sampler.min_filter, FilterMode::Linear);
        assert_eq!(sampler.mipmap_filter, FilterMode::Nearest);
        assert_eq!(sampler.lod_max_clamp, 0.0);
    }
}
