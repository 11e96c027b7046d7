//! Capture binary: CLI glue around the stereocap library.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::error;

use stereocap::capture::run_sessions;
use stereocap::config::{CaptureArgs, CaptureConfig};
use stereocap::sim::SimulatedCamera;

const SESSION_FOLDER_NAME: &str = "captured";
const SENSOR_RESOLUTION: (u32, u32) = (1280, 720);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CaptureArgs::parse();
    let config = match CaptureConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    // Real vendor backends implement `DepthCamera` against their SDK; the
    // built-in backend synthesizes a fixed scene.
    let (width, height) = SENSOR_RESOLUTION;
    let mut camera = match SimulatedCamera::open(&config, width, height) {
        Ok(camera) => camera,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_sessions(
        &mut camera,
        &config,
        &args.output,
        SESSION_FOLDER_NAME,
        stdin_prompt,
    ) {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Blocking continue/quit prompt between sessions: empty input starts a new
/// session, anything else quits.
fn stdin_prompt() -> stereocap::Result<bool> {
    println!("Press enter to continue. Enter any other key to quit.");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().is_empty())
}
