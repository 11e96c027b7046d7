//! Center-pixel distance measurement and validity classification.

use crate::pointcloud::Point3fRGBA;

/// Outcome of classifying one point-cloud sample.
///
/// This is the sole gate deciding whether a grabbed frame advances the frame
/// counter: only `Valid` measurements consume a frame slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Euclidean distance from the camera, in millimeters.
    Valid(f32),
    /// The sample carried NaN or infinite coordinates; no depth could be
    /// estimated at that pixel.
    Invalid,
}

impl Measurement {
    /// Classify `point` by its Euclidean distance `sqrt(x² + y² + z²)`.
    pub fn of_point(point: &Point3fRGBA) -> Self {
        let distance =
            (point.x * point.x + point.y * point.y + point.z * point.z).sqrt();
        if distance.is_finite() {
            Measurement::Valid(distance)
        } else {
            Measurement::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Measurement::Valid(_))
    }
}

/// Pixel at the exact image center: `round(width / 2), round(height / 2)`,
/// the vendor sample convention.
pub fn center_pixel(width: u32, height: u32) -> (u32, u32) {
    (
        (width as f64 / 2.0).round() as u32,
        (height as f64 / 2.0).round() as u32,
    )
}
