use std::{sync::Arc, time::Duration};

use image::RgbaImage;

use crate::{
    gpu::GPUInner,
    math::{Point2, Stopwatch, Timer},
    window::{NoRepaint, RepaintRequester},
};

use super::{FrameTexture, Texture, TextureError, TextureId, decode_animation, setup_size};

/// One frame of an animation and how long it stays on screen.
#[derive(Debug, Clone)]
pub struct AnimationFrame<T> {
    pub texture: T,
    pub delay: Duration,
}

impl<T> AnimationFrame<T> {
    pub fn new(texture: T, delay: Duration) -> Self {
        Self { texture, delay }
    }
}

/// A texture that cycles through timed frames.
///
/// The owner polls [`AnimatedTexture::update_animation`] once per render
/// tick. When the current frame has been visible for at least its delay the
/// next frame (wrapping to the first) becomes current, is made resident, and
/// a repaint is requested. A zero delay advances on every poll.
pub struct AnimatedTexture<T: FrameTexture = Texture, C: Stopwatch = Timer> {
    size: Point2,
    frames: Vec<AnimationFrame<T>>,
    current_frame: usize,
    id: TextureId,
    timer: C,

    has_mipmaps: bool,
    smooth: bool,
    repeat: bool,

    repaint: Arc<dyn RepaintRequester>,
}

impl<T: FrameTexture> AnimatedTexture<T, Timer> {
    pub fn from_frames(
        size: Point2,
        frames: Vec<AnimationFrame<T>>,
        has_mipmaps: bool,
        repaint: Arc<dyn RepaintRequester>,
    ) -> Result<Self, TextureError> {
        Self::from_frames_with_timer(size, frames, has_mipmaps, repaint, Timer::new())
    }
}

impl<T: FrameTexture, C: Stopwatch> AnimatedTexture<T, C> {
    /// Builds an animated texture from already constructed frames.
    ///
    /// Fails when the size is empty or there are no frames. The timer is
    /// restarted so the first frame starts its delay now.
    pub fn from_frames_with_timer(
        size: Point2,
        frames: Vec<AnimationFrame<T>>,
        has_mipmaps: bool,
        repaint: Arc<dyn RepaintRequester>,
        mut timer: C,
    ) -> Result<Self, TextureError> {
        setup_size(size, None)?;

        let id = match frames.first() {
            Some(frame) => frame.texture.id(),
            None => return Err(TextureError::NoFrames),
        };

        timer.restart();

        Ok(Self {
            size,
            frames,
            current_frame: 0,
            id,
            timer,

            has_mipmaps,
            smooth: false,
            repeat: false,

            repaint,
        })
    }

    /// Id of the frame renderers should bind right now.
    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn size(&self) -> Point2 {
        self.size
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_texture(&self) -> &T {
        &self.frames[self.current_frame].texture
    }

    pub fn frame(&self, index: usize) -> Option<&AnimationFrame<T>> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[AnimationFrame<T>] {
        &self.frames
    }

    pub fn frame_delay(&self, index: usize) -> Option<Duration> {
        self.frames.get(index).map(|frame| frame.delay)
    }

    /// Length of one full loop.
    pub fn total_duration(&self) -> Duration {
        self.frames
            .iter()
            .fold(Duration::ZERO, |total, frame| total.saturating_add(frame.delay))
    }

    pub fn timer(&self) -> &C {
        &self.timer
    }

    pub fn has_mipmaps(&self) -> bool {
        self.has_mipmaps
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    pub fn is_animated(&self) -> bool {
        true
    }

    /// Builds mipmaps on every frame. Always reports success; a frame that
    /// fails is logged and keeps its current levels.
    pub fn build_hardware_mipmaps(&mut self) -> bool {
        for (index, frame) in self.frames.iter_mut().enumerate() {
            if let Err(e) = frame.texture.build_hardware_mipmaps() {
                log::warn!(
                    "failed to build mipmaps for frame {} ({}): {}",
                    index,
                    frame.texture.id(),
                    e
                );
            }
        }

        self.has_mipmaps = true;
        true
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        for frame in self.frames.iter_mut() {
            frame.texture.set_smooth(smooth);
        }
        self.smooth = smooth;
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        for frame in self.frames.iter_mut() {
            frame.texture.set_repeat(repeat);
        }
        self.repeat = repeat;
    }

    /// Advances to the next frame once the current one has been shown for
    /// its delay. Returns whether the visible frame changed.
    pub fn update_animation(&mut self) -> bool {
        if self.timer.elapsed() < self.frames[self.current_frame].delay {
            return false;
        }

        self.current_frame = (self.current_frame + 1) % self.frames.len();

        let texture = &mut self.frames[self.current_frame].texture;
        if let Err(e) = texture.create() {
            log::warn!(
                "failed to create frame {} ({}): {}",
                self.current_frame,
                texture.id(),
                e
            );
        }

        self.id = texture.id();
        self.timer.restart();

        self.repaint.repaint();
        true
    }
}

impl<T: FrameTexture, C: Stopwatch> std::fmt::Debug for AnimatedTexture<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedTexture")
            .field("size", &self.size)
            .field("frames", &self.frames.len())
            .field("current_frame", &self.current_frame)
            .field("id", &self.id)
            .field("has_mipmaps", &self.has_mipmaps)
            .field("smooth", &self.smooth)
            .field("repeat", &self.repeat)
            .finish()
    }
}

pub struct AnimatedTextureBuilder<'a> {
    pub(crate) graphics: Arc<GPUInner>,
    pub(crate) size: Option<Point2>,
    pub(crate) frames: Vec<(RgbaImage, Duration)>,
    pub(crate) file_data: Option<&'a [u8]>,
    pub(crate) mipmaps: bool,
    pub(crate) compress: bool,
    pub(crate) repaint: Option<Arc<dyn RepaintRequester>>,
}

impl<'a> AnimatedTextureBuilder<'a> {
    pub(crate) fn new(graphics: Arc<GPUInner>) -> Self {
        Self {
            graphics,
            size: None,
            frames: Vec::new(),
            file_data: None,
            mipmaps: false,
            compress: false,
            repaint: None,
        }
    }

    /// Sets the size every frame must have. Defaults to the first frame's size.
    pub fn set_size(mut self, size: Point2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn add_frame(mut self, image: RgbaImage, delay: Duration) -> Self {
        self.frames.push((image, delay));
        self
    }

    pub fn set_frames(mut self, frames: Vec<(RgbaImage, Duration)>) -> Self {
        self.frames = frames;
        self
    }

    /// Loads frames and delays from an animated GIF, APNG or WebP file.
    /// Replaces any frames added before.
    pub fn set_file_data(mut self, data: &'a [u8]) -> Self {
        self.file_data = Some(data);
        self
    }

    pub fn set_mipmaps(mut self, mipmaps: bool) -> Self {
        self.mipmaps = mipmaps;
        self
    }

    pub fn set_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Sink notified whenever the visible frame changes. Defaults to
    /// [`NoRepaint`].
    pub fn set_repaint(mut self, repaint: Arc<dyn RepaintRequester>) -> Self {
        self.repaint = Some(repaint);
        self
    }

    pub fn build(self) -> Result<AnimatedTexture, TextureError> {
        let (size, frames) = resolve_frames(
            self.size,
            self.frames,
            self.file_data,
            Some(self.graphics.max_texture_dimension()),
        )?;

        let mut textures = Vec::with_capacity(frames.len());
        for (image, delay) in frames {
            let texture = Texture::from_image(
                self.graphics.clone(),
                image,
                self.mipmaps,
                self.compress,
                false,
            )?;
            textures.push(AnimationFrame::new(texture, delay));
        }

        let repaint = self.repaint.unwrap_or_else(|| Arc::new(NoRepaint));
        AnimatedTexture::from_frames(size, textures, self.mipmaps, repaint)
    }
}

/// Picks the frame source and size for a builder and checks every frame
/// against it, before anything touches the GPU.
///
/// Encoded file data wins over frames added one by one. Without an explicit
/// size the first frame's dimensions are used.
pub(crate) fn resolve_frames(
    size: Option<Point2>,
    frames: Vec<(RgbaImage, Duration)>,
    file_data: Option<&[u8]>,
    max_dimension: Option<u32>,
) -> Result<(Point2, Vec<(RgbaImage, Duration)>), TextureError> {
    let (size, frames) = match file_data {
        Some(data) => {
            let animation = decode_animation(data)?;
            (size.unwrap_or(animation.size), animation.frames)
        }
        None => {
            let size = match (size, frames.first()) {
                (Some(size), _) => size,
                (None, Some((image, _))) => Point2::from(image.dimensions()),
                (None, None) => return Err(TextureError::NoFrames),
            };
            (size, frames)
        }
    };

    setup_size(size, max_dimension)?;

    if frames.is_empty() {
        return Err(TextureError::NoFrames);
    }

    for (index, (image, _)) in frames.iter().enumerate() {
        if Point2::from(image.dimensions()) != size {
            log::error!(
                "frame {} is {}x{}, expected {}x{}",
                index,
                image.width(),
                image.height(),
                size.x,
                size.y
            );
            return Err(TextureError::FrameSizeMismatch);
        }
    }

    Ok((size, frames))
}
