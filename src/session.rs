//! Session-scoped resources: output folder and distance log.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::config::CaptureConfig;
use crate::error::Result;

/// Per-session distance log file name.
pub const DISTANCE_LOG: &str = "centerDist.txt";

/// Per-session snapshot of the resolved configuration.
pub const CONFIG_SNAPSHOT: &str = "capture_config.json";

/// One bounded capture run: a fresh output folder plus an append-only
/// distance log, released when the session ends. Exactly one session is
/// active at a time.
pub struct Session {
    folder: PathBuf,
    log: BufWriter<File>,
    frames_logged: u32,
    finished: bool,
}

impl Session {
    /// Create the next free `{name}{n}` folder under `base`, snapshot the
    /// resolved configuration, and open the distance log with a start
    /// timestamp.
    pub fn create(base: &Path, name: &str, config: &CaptureConfig) -> Result<Self> {
        let folder = next_free_folder(base, name);
        fs::create_dir_all(&folder)?;

        let snapshot = File::create(folder.join(CONFIG_SNAPSHOT))?;
        serde_json::to_writer_pretty(snapshot, config)?;

        let mut log = BufWriter::new(File::create(folder.join(DISTANCE_LOG))?);
        writeln!(log, "Start Time: {}", Local::now())?;

        info!("session started in {}", folder.display());
        Ok(Self {
            folder,
            log,
            frames_logged: 0,
            finished: false,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn frames_logged(&self) -> u32 {
        self.frames_logged
    }

    /// Append the log line for one persisted frame.
    pub fn log_frame(&mut self, index: u32, distance_mm: i64) -> Result<()> {
        writeln!(
            self.log,
            "Frame: {index} Distance at the center {distance_mm} mm"
        )?;
        self.frames_logged += 1;
        Ok(())
    }

    /// Write the end timestamp and flush the log.
    pub fn finish(mut self) -> Result<()> {
        self.write_end()
    }

    fn write_end(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        writeln!(self.log, "End Time: {}", Local::now())?;
        self.log.flush()?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // the end line still lands if the acquisition loop bailed out early
        let _ = self.write_end();
    }
}

/// First `{name}{n}` path under `base` that does not exist yet, so repeated
/// runs and loop iterations never collide.
fn next_free_folder(base: &Path, name: &str) -> PathBuf {
    let mut n = 0u32;
    loop {
        let candidate = base.join(format!("{name}{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
