//! Per-pixel XYZRGBA point cloud aligned to the RGB view.

use ndarray::Array2;

/// One point-cloud sample: position in millimeters plus the color of the RGB
/// pixel it is aligned to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3fRGBA {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Point3fRGBA {
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            ..Default::default()
        }
    }
}

/// Dense point-cloud map addressable by pixel coordinate.
pub struct PointCloudMap {
    // row-major: (row, col) is (y, x)
    points: Array2<Point3fRGBA>,
}

impl PointCloudMap {
    /// Build a map from a per-pixel closure `f(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> Point3fRGBA,
    {
        let points = Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
            f(col as u32, row as u32)
        });
        Self { points }
    }

    pub fn width(&self) -> u32 {
        self.points.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.points.nrows() as u32
    }

    /// Sample the point aligned to pixel `(x, y)`. Out-of-bounds coordinates
    /// yield `None`.
    pub fn get(&self, x: u32, y: u32) -> Option<Point3fRGBA> {
        self.points.get((y as usize, x as usize)).copied()
    }
}
