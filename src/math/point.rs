use num_traits::ToPrimitive;
use winit::dpi::PhysicalSize;

/// Integer 2D extent, used for texture sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub fn new<T: ToPrimitive>(x: T, y: T) -> Self {
        Self {
            x: x.to_i32().unwrap_or(0),
            y: y.to_i32().unwrap_or(0),
        }
    }

    pub const ZERO: Self = Self { x: 0, y: 0 };
    pub const ONE: Self = Self { x: 1, y: 1 };

    /// Returns true when either axis is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.x <= 0 || self.y <= 0
    }

    pub fn width(&self) -> u32 {
        self.x.max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.y.max(0) as u32
    }
}

impl Default for Point2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Into<wgpu::Extent3d> for Point2 {
    fn into(self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width(),
            height: self.height(),
            depth_or_array_layers: 1,
        }
    }
}

impl From<PhysicalSize<u32>> for Point2 {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<(i32, i32)> for Point2 {
    fn from(tuple: (i32, i32)) -> Self {
        Self {
            x: tuple.0,
            y: tuple.1,
        }
    }
}

impl From<(u32, u32)> for Point2 {
    fn from(tuple: (u32, u32)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}
