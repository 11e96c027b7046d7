use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Device-side quality/performance tradeoff for depth computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepthMode {
    #[default]
    Performance,
    Ultra,
    Quality,
}

/// Device-side policy for filling occluded or unknown depth regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensingMode {
    #[default]
    Standard,
    Fill,
}

impl fmt::Display for DepthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for SensingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Parameters handed to the device on every grab.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeParameters {
    pub sensing_mode: SensingMode,
}
