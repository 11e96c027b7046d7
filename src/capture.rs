//! Frame acquisition and session orchestration.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::common::RuntimeParameters;
use crate::config::CaptureConfig;
use crate::device::DepthCamera;
use crate::error::{CaptureError, Result};
use crate::measure::{Measurement, center_pixel};
use crate::session::Session;

/// Produce exactly `config.num_frames` valid frames for `session`.
///
/// Each grab is validated at the image-center pixel; transient grab failures
/// and invalid measurements are retried without consuming a frame slot. A
/// valid measurement persists `rgb_img{i}.png` and `depth_img{i}.png` into
/// the session folder, appends the distance log line, and advances the
/// counter.
///
/// When `config.max_invalid_retries` is set, that many consecutive
/// unproductive grabs for a single slot abort with
/// [`CaptureError::RetriesExhausted`]. When unset the loop retries until the
/// scene yields a valid measurement, which can spin forever if it never does.
pub fn acquire_frames<C: DepthCamera>(
    camera: &mut C,
    config: &CaptureConfig,
    session: &mut Session,
) -> Result<()> {
    let params = RuntimeParameters {
        sensing_mode: config.sensing_mode,
    };
    let mut index = 0u32;
    let mut unproductive = 0u32;

    while index < config.num_frames {
        let Some(grab) = camera.grab(&params)? else {
            debug!("grab failed, retrying");
            unproductive += 1;
            check_retry_budget(config, unproductive)?;
            continue;
        };

        let (width, height) = grab.rgb.dimensions();
        let (cx, cy) = center_pixel(width, height);
        let measurement = match grab.point_cloud.get(cx, cy) {
            Some(point) => Measurement::of_point(&point),
            None => Measurement::Invalid,
        };

        match measurement {
            Measurement::Valid(distance) => {
                let distance_mm = distance.round() as i64;
                info!("Distance at the center {} mm", distance_mm);

                grab.rgb
                    .save(session.folder().join(format!("rgb_img{index}.png")))?;
                grab.depth
                    .save(session.folder().join(format!("depth_img{index}.png")))?;
                session.log_frame(index, distance_mm)?;

                index += 1;
                unproductive = 0;
            }
            Measurement::Invalid => {
                warn!("Can't estimate distance at this position, move the camera");
                unproductive += 1;
                check_retry_budget(config, unproductive)?;
            }
        }
    }

    Ok(())
}

fn check_retry_budget(config: &CaptureConfig, unproductive: u32) -> Result<()> {
    match config.max_invalid_retries {
        Some(limit) if unproductive >= limit => Err(CaptureError::RetriesExhausted {
            attempts: unproductive,
        }),
        _ => Ok(()),
    }
}

/// Run capture sessions until the configuration or the user says stop.
///
/// One session is active at a time: `Idle → SessionActive → (LoopPrompt →
/// SessionActive) | Terminated`. With looping disabled exactly one session
/// runs and `prompt` is never consulted. With looping enabled `prompt` runs
/// between sessions; `Ok(true)` starts a fresh session, `Ok(false)`
/// terminates.
pub fn run_sessions<C, P>(
    camera: &mut C,
    config: &CaptureConfig,
    base: &Path,
    name: &str,
    mut prompt: P,
) -> Result<()>
where
    C: DepthCamera,
    P: FnMut() -> Result<bool>,
{
    loop {
        let mut session = Session::create(base, name, config)?;
        acquire_frames(camera, config, &mut session)?;
        let folder = session.folder().to_path_buf();
        session.finish()?;
        info!(
            "session complete: {} frames in {}",
            config.num_frames,
            folder.display()
        );

        if !config.loop_enabled {
            return Ok(());
        }
        if !prompt()? {
            return Ok(());
        }
    }
}
