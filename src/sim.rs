//! Simulated depth camera producing scripted grab sequences.
//!
//! The built-in backend for the binary and the workhorse of the test suite.
//! Real vendor SDKs are adapted to [`DepthCamera`] out of tree.

use image::{GrayImage, Luma, Rgb, RgbImage};
use tracing::debug;

use crate::common::RuntimeParameters;
use crate::config::CaptureConfig;
use crate::device::{DepthCamera, GrabData};
use crate::error::{CaptureError, Result};
use crate::measure::center_pixel;
use crate::pointcloud::{Point3fRGBA, PointCloudMap};

/// Center distance of the default synthetic scene, in millimeters.
pub const DEFAULT_SCENE_DISTANCE_MM: f32 = 1500.0;

/// Outcome of one scripted grab.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedGrab {
    /// Transient device-level grab failure.
    Fail,
    /// A successful grab whose center-pixel point-cloud sample is
    /// `(x, y, z)`, in millimeters.
    Point { x: f32, y: f32, z: f32 },
}

impl ScriptedGrab {
    pub fn point(x: f32, y: f32, z: f32) -> Self {
        Self::Point { x, y, z }
    }

    /// A grab whose center sample cannot be measured (NaN coordinates).
    pub fn unmeasurable() -> Self {
        Self::Point {
            x: f32::NAN,
            y: f32::NAN,
            z: f32::NAN,
        }
    }
}

/// Simulated stereo depth camera.
///
/// Plays back a script of center-pixel samples, synthesizing gradient RGB and
/// depth imagery around each one. Once the script drains, grabs fail hard so
/// a runaway acquisition loop terminates instead of spinning.
pub struct SimulatedCamera {
    width: u32,
    height: u32,
    script: std::vec::IntoIter<ScriptedGrab>,
    repeat: Option<ScriptedGrab>,
    min_mm: Option<f32>,
    max_mm: Option<f32>,
    grabs: u64,
}

impl SimulatedCamera {
    /// Open the simulated device with the resolved configuration, viewing a
    /// fixed scene [`DEFAULT_SCENE_DISTANCE_MM`] straight ahead.
    pub fn open(config: &CaptureConfig, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CaptureError::OpenFailed(format!(
                "unsupported resolution {width}x{height}"
            )));
        }
        let mut camera = Self::fixed_scene(width, height, DEFAULT_SCENE_DISTANCE_MM);
        camera.min_mm = config.min_distance_mm();
        camera.max_mm = config.max_distance_mm();
        Ok(camera)
    }

    /// Camera that plays `script` once and then fails unrecoverably.
    pub fn scripted(width: u32, height: u32, script: Vec<ScriptedGrab>) -> Self {
        Self {
            width,
            height,
            script: script.into_iter(),
            repeat: None,
            min_mm: None,
            max_mm: None,
            grabs: 0,
        }
    }

    /// Camera that yields the same valid center distance on every grab, like
    /// a wall `distance_mm` straight ahead.
    pub fn fixed_scene(width: u32, height: u32, distance_mm: f32) -> Self {
        Self {
            width,
            height,
            script: Vec::new().into_iter(),
            repeat: Some(ScriptedGrab::point(0.0, 0.0, distance_mm)),
            min_mm: None,
            max_mm: None,
            grabs: 0,
        }
    }

    /// Total grabs requested so far, including failed ones.
    pub fn grabs(&self) -> u64 {
        self.grabs
    }

    /// Apply the configured perception range: samples outside it are reported
    /// as unmeasurable, the way a device leaves out-of-range pixels
    /// uncomputed.
    fn clamp_to_range(&self, point: Point3fRGBA) -> Point3fRGBA {
        let distance =
            (point.x * point.x + point.y * point.y + point.z * point.z).sqrt();
        let below = self.min_mm.is_some_and(|min| distance < min);
        let beyond = self.max_mm.is_some_and(|max| distance > max);
        if below || beyond {
            Point3fRGBA::from_xyz(f32::NAN, f32::NAN, f32::NAN)
        } else {
            point
        }
    }

    fn synthesize(&self, center: Point3fRGBA) -> GrabData {
        let rgb = RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb([((x + y) % 256) as u8, (x % 256) as u8, (y % 256) as u8])
        });
        let depth = GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([((x + y) % 256) as u8])
        });
        let (cx, cy) = center_pixel(self.width, self.height);
        let point_cloud = PointCloudMap::from_fn(self.width, self.height, |x, y| {
            if (x, y) == (cx, cy) {
                center
            } else {
                Point3fRGBA::from_xyz(x as f32, y as f32, 1000.0)
            }
        });
        GrabData {
            rgb,
            depth,
            point_cloud,
        }
    }
}

impl DepthCamera for SimulatedCamera {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn grab(&mut self, _params: &RuntimeParameters) -> Result<Option<GrabData>> {
        self.grabs += 1;
        match self.script.next().or(self.repeat) {
            None => Err(CaptureError::GrabFailed(
                "simulated grab script exhausted".to_string(),
            )),
            Some(ScriptedGrab::Fail) => {
                debug!(grab = self.grabs, "scripted grab failure");
                Ok(None)
            }
            Some(ScriptedGrab::Point { x, y, z }) => {
                let center = self.clamp_to_range(Point3fRGBA::from_xyz(x, y, z));
                Ok(Some(self.synthesize(center)))
            }
        }
    }
}
