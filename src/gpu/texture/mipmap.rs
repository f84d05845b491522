use image::{RgbaImage, imageops};

/// Number of levels in a full mip chain for the given base size, base included.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    u32::BITS - largest.leading_zeros()
}

/// Builds every level below the base image, halving each axis (floored,
/// never below one texel) until the level is 1x1.
pub fn build_mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let (mut width, mut height) = base.dimensions();
    let mut levels: Vec<RgbaImage> = Vec::new();

    while width > 1 || height > 1 {
        width = (width / 2).max(1);
        height = (height / 2).max(1);

        let next = imageops::resize(
            levels.last().unwrap_or(base),
            width,
            height,
            imageops::FilterType::Triangle,
        );
        levels.push(next);
    }

    levels
}
