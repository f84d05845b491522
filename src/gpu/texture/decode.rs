//! Decoding of animated image files into frames and per-frame delays.

use std::{io::Cursor, time::Duration};

use image::{
    AnimationDecoder, Frame, ImageFormat, RgbaImage,
    codecs::{gif::GifDecoder, png::PngDecoder, webp::WebPDecoder},
};

use crate::math::Point2;

use super::TextureError;

/// Decoded animation: the canvas size and every frame with its display time.
#[derive(Debug, Clone)]
pub struct AnimationData {
    pub size: Point2,
    pub frames: Vec<(RgbaImage, Duration)>,
}

impl AnimationData {
    pub fn total_duration(&self) -> Duration {
        self.frames
            .iter()
            .fold(Duration::ZERO, |total, (_, delay)| total.saturating_add(*delay))
    }
}

fn invalid_data(e: image::ImageError) -> TextureError {
    log::debug!("failed to decode animation: {}", e);
    TextureError::InvalidTextureData
}

/// Decodes an animated GIF, APNG or animated WebP.
///
/// Every frame is composited onto the full canvas, so all frames share the
/// size of the first one. Still images, including animation containers that
/// hold a single frame, yield [`TextureError::NotAnimated`].
pub fn decode_animation(data: &[u8]) -> Result<AnimationData, TextureError> {
    let format = image::guess_format(data).map_err(invalid_data)?;

    let frames: Vec<Frame> = match format {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(Cursor::new(data)).map_err(invalid_data)?;
            decoder.into_frames().collect_frames().map_err(invalid_data)?
        }
        ImageFormat::Png => {
            let decoder = PngDecoder::new(Cursor::new(data)).map_err(invalid_data)?;
            if !decoder.is_apng().map_err(invalid_data)? {
                return Err(TextureError::NotAnimated);
            }

            let decoder = decoder.apng().map_err(invalid_data)?;
            decoder.into_frames().collect_frames().map_err(invalid_data)?
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(Cursor::new(data)).map_err(invalid_data)?;
            if !decoder.has_animation() {
                return Err(TextureError::NotAnimated);
            }

            decoder.into_frames().collect_frames().map_err(invalid_data)?
        }
        other => {
            log::debug!("{:?} images carry no animation", other);
            return Err(TextureError::NotAnimated);
        }
    };

    let frames: Vec<(RgbaImage, Duration)> = frames
        .into_iter()
        .map(|frame| {
            let delay = Duration::from(frame.delay());
            (frame.into_buffer(), delay)
        })
        .collect();

    let size = match frames.as_slice() {
        [] => return Err(TextureError::NoFrames),
        [_] => {
            log::debug!("{:?} file holds a single frame", format);
            return Err(TextureError::NotAnimated);
        }
        [(image, _), ..] => Point2::from(image.dimensions()),
    };

    log::debug!(
        "decoded {:?} animation: {} frames, {}x{}",
        format,
        frames.len(),
        size.x,
        size.y
    );

    Ok(AnimationData { size, frames })
}

/// Encodes solid 4x3 frames of the given colors as a GIF.
#[cfg(test)]
pub(crate) fn encode_test_gif(colors: &[[u8; 4]], delay_ms: u32) -> Vec<u8> {
    use image::{Delay, Rgba, codecs::gif::GifEncoder};

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        for color in colors {
            let buffer = RgbaImage::from_pixel(4, 3, Rgba(*color));
            let frame = Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
            encoder.encode_frame(frame).expect("encode gif frame");
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn gif_frames_keep_their_delays() {
        let bytes = encode_test_gif(
            &[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]],
            100,
        );

        let animation = decode_animation(&bytes).expect("decode gif");

        assert_eq!(animation.size, Point2::new(4, 3));
        assert_eq!(animation.frames.len(), 3);
        for (image, delay) in &animation.frames {
            assert_eq!(image.dimensions(), (4, 3));
            assert_eq!(*delay, Duration::from_millis(100));
        }
        assert_eq!(animation.total_duration(), Duration::from_millis(300));
    }

    #[test]
    fn single_frame_gif_is_not_animated() {
        let bytes = encode_test_gif(&[[255, 0, 0, 255]], 0);

        assert_eq!(
            decode_animation(&bytes).unwrap_err(),
            TextureError::NotAnimated
        );
    }

    #[test]
    fn total_duration_saturates() {
        let still = RgbaImage::new(1, 1);
        let animation = AnimationData {
            size: Point2::ONE,
            frames: vec![(still.clone(), Duration::MAX), (still, Duration::from_secs(1))],
        };

        assert_eq!(animation.total_duration(), Duration::MAX);
    }

    #[test]
    fn still_png_is_not_animated() {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");

        assert_eq!(
            decode_animation(&bytes).unwrap_err(),
            TextureError::NotAnimated
        );
    }

    #[test]
    fn garbage_is_invalid_data() {
        assert_eq!(
            decode_animation(b"definitely not an image").unwrap_err(),
            TextureError::InvalidTextureData
        );
    }
}
