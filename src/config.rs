//! Capture configuration: CLI surface and validation.
//!
//! All range and enum checks happen here, before any device interaction;
//! unresolvable input aborts the process without touching camera resources.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::common::{DepthMode, SensingMode};
use crate::error::{CaptureError, Result};

/// Accepted `--min_distance` range, in meters.
pub const MIN_DISTANCE_RANGE_M: (f32, f32) = (0.3, 3.0);

/// Enforced `--max_distance` ceiling, in meters. Deliberately looser than the
/// 40 m quoted in the flag help text; kept as-is rather than corrected.
pub const MAX_DISTANCE_RANGE_M: (f32, f32) = (0.0, 100.0);

/// Accepted `--num_frames` range. The upper bound excludes 50.
pub const NUM_FRAMES_RANGE: (u32, u32) = (1, 49);

/// Command-line surface of the capture tool.
#[derive(Debug, Parser)]
#[command(name = "stereocap")]
#[command(about = "Capture synchronized RGB + depth frames with center-pixel distance logging")]
pub struct CaptureArgs {
    /// Depth mode used by the device
    #[arg(long = "depth_mode", value_enum, default_value_t = DepthMode::Performance)]
    pub depth_mode: DepthMode,

    /// Sensing mode used by the device
    #[arg(long = "sensing_mode", value_enum, default_value_t = SensingMode::Standard)]
    pub sensing_mode: SensingMode,

    /// Minimum distance recognized by the device between 0.3-3m; data before
    /// this range will not be computed
    #[arg(long = "min_distance", allow_negative_numbers = true)]
    pub min_distance: Option<f32>,

    /// Maximum distance recognized by the device between 0-40m; data beyond
    /// this range will not be computed
    #[arg(long = "max_distance", allow_negative_numbers = true)]
    pub max_distance: Option<f32>,

    /// Number of frames to capture
    #[arg(long = "num_frames", default_value_t = 1)]
    pub num_frames: u32,

    /// Run session after session until manual exit
    #[arg(short = 'l', long = "loop")]
    pub loop_enabled: bool,

    /// Give up on a frame slot after this many consecutive grabs without a
    /// valid measurement; unset retries forever
    #[arg(long = "max_invalid_retries")]
    pub max_invalid_retries: Option<u32>,

    /// Base directory for session output folders
    #[arg(long = "output", default_value = ".")]
    pub output: PathBuf,
}

/// Resolved capture parameters. Immutable once resolved; created once per
/// process from user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub depth_mode: DepthMode,
    pub sensing_mode: SensingMode,
    pub min_distance_m: Option<f32>,
    pub max_distance_m: Option<f32>,
    pub num_frames: u32,
    pub loop_enabled: bool,
    pub max_invalid_retries: Option<u32>,
}

impl CaptureConfig {
    /// Validate and normalize user-supplied parameters.
    pub fn resolve(args: &CaptureArgs) -> Result<Self> {
        if let Some(v) = args.min_distance {
            let (lo, hi) = MIN_DISTANCE_RANGE_M;
            if !(lo..=hi).contains(&v) {
                return Err(CaptureError::InvalidConfiguration(format!(
                    "min_distance {v} not in range [{lo}, {hi}]"
                )));
            }
        }
        if let Some(v) = args.max_distance {
            let (lo, hi) = MAX_DISTANCE_RANGE_M;
            if !(lo..=hi).contains(&v) {
                return Err(CaptureError::InvalidConfiguration(format!(
                    "max_distance {v} not in range [{lo}, {hi}]"
                )));
            }
        }
        let (lo, hi) = NUM_FRAMES_RANGE;
        if !(lo..=hi).contains(&args.num_frames) {
            return Err(CaptureError::InvalidConfiguration(format!(
                "num_frames {} not in range [{lo}, {hi}]",
                args.num_frames
            )));
        }
        if args.max_invalid_retries == Some(0) {
            return Err(CaptureError::InvalidConfiguration(
                "max_invalid_retries must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            depth_mode: args.depth_mode,
            sensing_mode: args.sensing_mode,
            min_distance_m: args.min_distance,
            max_distance_m: args.max_distance,
            num_frames: args.num_frames,
            loop_enabled: args.loop_enabled,
            max_invalid_retries: args.max_invalid_retries,
        })
    }

    /// Minimum perception distance in device units (millimeters).
    pub fn min_distance_mm(&self) -> Option<f32> {
        self.min_distance_m.map(|m| m * 1000.0)
    }

    /// Maximum perception distance in device units (millimeters).
    pub fn max_distance_mm(&self) -> Option<f32> {
        self.max_distance_m.map(|m| m * 1000.0)
    }
}
