//! The vendor-SDK boundary: a capability interface the capture core drives.
//!
//! The core depends only on [`DepthCamera`], so any stereo depth SDK can back
//! it with an adapter, and tests run against scripted grabs from
//! [`crate::sim::SimulatedCamera`].

use image::{GrayImage, RgbImage};

use crate::common::RuntimeParameters;
use crate::error::Result;
use crate::pointcloud::PointCloudMap;

/// The three outputs of one synchronized grab.
///
/// The depth view and point cloud are aligned on the left RGB view, which is
/// why a single grab yields all three atomically instead of three independent
/// reads.
pub struct GrabData {
    pub rgb: RgbImage,
    pub depth: GrayImage,
    pub point_cloud: PointCloudMap,
}

/// A stereo depth camera able to produce synchronized captures.
///
/// Opening a device is a constructor on the concrete backend; closing happens
/// on drop.
pub trait DepthCamera {
    /// Sensor resolution `(width, height)` of the RGB view.
    fn resolution(&self) -> (u32, u32);

    /// Request one synchronized capture.
    ///
    /// `Ok(Some(_))` carries the aligned RGB view, depth view, and point
    /// cloud for a single capture instant. `Ok(None)` is a transient
    /// device-level failure and callers retry. `Err(_)` is unrecoverable and
    /// ends the session.
    fn grab(&mut self, params: &RuntimeParameters) -> Result<Option<GrabData>>;
}
