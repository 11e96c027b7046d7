//! Stereo depth camera capture: synchronized RGB + depth frames with
//! center-pixel distance logging, written to per-session folders.

pub mod capture;
pub mod common;
pub mod config;
pub mod device;
pub mod error;
pub mod measure;
pub mod pointcloud;
pub mod session;
pub mod sim;

// Re-export main types for convenience
pub use crate::capture::{acquire_frames, run_sessions};
pub use crate::common::{DepthMode, RuntimeParameters, SensingMode};
pub use crate::config::{CaptureArgs, CaptureConfig};
pub use crate::device::{DepthCamera, GrabData};
pub use crate::error::{CaptureError, Result};
pub use crate::measure::{Measurement, center_pixel};
pub use crate::pointcloud::{Point3fRGBA, PointCloudMap};
pub use crate::session::Session;
pub use crate::sim::{ScriptedGrab, SimulatedCamera};
