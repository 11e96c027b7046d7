use std::fs;
use std::path::Path;

use tempfile::TempDir;

use stereocap::{
    CaptureConfig, CaptureError, DepthMode, ScriptedGrab, SensingMode, Session, SimulatedCamera,
    acquire_frames, run_sessions,
};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;

fn config(num_frames: u32) -> CaptureConfig {
    CaptureConfig {
        depth_mode: DepthMode::Performance,
        sensing_mode: SensingMode::Standard,
        min_distance_m: None,
        max_distance_m: None,
        num_frames,
        loop_enabled: false,
        max_invalid_retries: None,
    }
}

fn count_files_with_prefix(folder: &Path, prefix: &str) -> usize {
    fs::read_dir(folder)
        .expect("session folder should exist")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .count()
}

fn distance_log(folder: &Path) -> String {
    fs::read_to_string(folder.join("centerDist.txt")).expect("distance log should exist")
}

#[test]
fn invalid_grabs_never_consume_a_frame_slot() {
    let dir = TempDir::new().unwrap();
    let cfg = config(1);
    let mut camera = SimulatedCamera::scripted(
        WIDTH,
        HEIGHT,
        vec![
            ScriptedGrab::unmeasurable(),
            ScriptedGrab::unmeasurable(),
            ScriptedGrab::point(30.0, 40.0, 0.0),
        ],
    );

    let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
    acquire_frames(&mut camera, &cfg, &mut session).unwrap();
    let folder = session.folder().to_path_buf();
    session.finish().unwrap();

    assert_eq!(camera.grabs(), 3);
    assert_eq!(count_files_with_prefix(&folder, "rgb_img"), 1);
    assert_eq!(count_files_with_prefix(&folder, "depth_img"), 1);

    let log = distance_log(&folder);
    assert!(log.contains("Frame: 0 Distance at the center 50 mm"), "{log}");
    assert_eq!(log.matches("Frame:").count(), 1);
}

#[test]
fn completed_session_persists_exactly_the_target_count() {
    let dir = TempDir::new().unwrap();
    let cfg = config(3);
    let mut camera = SimulatedCamera::scripted(
        WIDTH,
        HEIGHT,
        vec![
            ScriptedGrab::point(0.0, 0.0, 1200.0),
            ScriptedGrab::unmeasurable(),
            ScriptedGrab::point(0.0, 0.0, 1300.0),
            ScriptedGrab::Fail,
            ScriptedGrab::point(0.0, 0.0, 1400.0),
        ],
    );

    let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
    acquire_frames(&mut camera, &cfg, &mut session).unwrap();
    let folder = session.folder().to_path_buf();
    session.finish().unwrap();

    assert_eq!(count_files_with_prefix(&folder, "rgb_img"), 3);
    assert_eq!(count_files_with_prefix(&folder, "depth_img"), 3);

    let log = distance_log(&folder);
    assert_eq!(log.matches("Frame:").count(), 3);
    assert!(log.contains("Frame: 0 Distance at the center 1200 mm"));
    assert!(log.contains("Frame: 1 Distance at the center 1300 mm"));
    assert!(log.contains("Frame: 2 Distance at the center 1400 mm"));
}

#[test]
fn transient_grab_failures_are_retried_silently() {
    let dir = TempDir::new().unwrap();
    let cfg = config(1);
    let mut camera = SimulatedCamera::scripted(
        WIDTH,
        HEIGHT,
        vec![
            ScriptedGrab::Fail,
            ScriptedGrab::Fail,
            ScriptedGrab::point(0.0, 0.0, 800.0),
        ],
    );

    let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
    acquire_frames(&mut camera, &cfg, &mut session).unwrap();
    assert_eq!(session.frames_logged(), 1);
    assert_eq!(camera.grabs(), 3);
}

#[test]
fn retry_budget_aborts_a_hopeless_scene() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(1);
    cfg.max_invalid_retries = Some(2);
    let mut camera =
        SimulatedCamera::scripted(WIDTH, HEIGHT, vec![ScriptedGrab::unmeasurable(); 5]);

    let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
    let err = acquire_frames(&mut camera, &cfg, &mut session).unwrap_err();
    match err {
        CaptureError::RetriesExhausted { attempts } => assert_eq!(attempts, 2),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.frames_logged(), 0);
}

#[test]
fn valid_frame_resets_the_retry_budget() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(2);
    cfg.max_invalid_retries = Some(2);
    // one unproductive grab before each valid frame stays within budget
    let mut camera = SimulatedCamera::scripted(
        WIDTH,
        HEIGHT,
        vec![
            ScriptedGrab::unmeasurable(),
            ScriptedGrab::point(0.0, 0.0, 700.0),
            ScriptedGrab::unmeasurable(),
            ScriptedGrab::point(0.0, 0.0, 900.0),
        ],
    );

    let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
    acquire_frames(&mut camera, &cfg, &mut session).unwrap();
    assert_eq!(session.frames_logged(), 2);
}

#[test]
fn drained_script_surfaces_a_device_error() {
    let dir = TempDir::new().unwrap();
    let cfg = config(2);
    let mut camera =
        SimulatedCamera::scripted(WIDTH, HEIGHT, vec![ScriptedGrab::point(0.0, 0.0, 600.0)]);

    let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
    let err = acquire_frames(&mut camera, &cfg, &mut session).unwrap_err();
    assert!(matches!(err, CaptureError::GrabFailed(_)), "{err}");
}

#[test]
fn single_session_runs_without_prompting() {
    let dir = TempDir::new().unwrap();
    let cfg = config(1);
    let mut camera = SimulatedCamera::fixed_scene(WIDTH, HEIGHT, 1500.0);

    let mut prompted = false;
    run_sessions(&mut camera, &cfg, dir.path(), "captured", || {
        prompted = true;
        Ok(false)
    })
    .unwrap();

    assert!(!prompted, "prompt must not run when looping is disabled");
    assert!(dir.path().join("captured0").is_dir());
    assert!(!dir.path().join("captured1").exists());
}

#[test]
fn looping_creates_distinct_session_folders() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(2);
    cfg.loop_enabled = true;
    let mut camera = SimulatedCamera::fixed_scene(WIDTH, HEIGHT, 2000.0);

    // continue once, then quit
    let mut prompts = 0u32;
    run_sessions(&mut camera, &cfg, dir.path(), "captured", || {
        prompts += 1;
        Ok(prompts == 1)
    })
    .unwrap();

    assert_eq!(prompts, 2);
    let first = dir.path().join("captured0");
    let second = dir.path().join("captured1");
    assert!(first.is_dir());
    assert!(second.is_dir());
    assert_ne!(first, second);
    assert_eq!(count_files_with_prefix(&first, "rgb_img"), 2);
    assert_eq!(count_files_with_prefix(&second, "rgb_img"), 2);
}

#[test]
fn aborted_acquisition_still_closes_the_log() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(1);
    cfg.max_invalid_retries = Some(1);
    let mut camera =
        SimulatedCamera::scripted(WIDTH, HEIGHT, vec![ScriptedGrab::unmeasurable(); 3]);

    let folder = {
        let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
        let folder = session.folder().to_path_buf();
        assert!(acquire_frames(&mut camera, &cfg, &mut session).is_err());
        folder
        // session dropped here without finish()
    };

    let log = distance_log(&folder);
    assert!(log.contains("Start Time:"), "{log}");
    assert!(log.contains("End Time:"), "{log}");
}

#[test]
fn configured_range_turns_out_of_range_scenes_unmeasurable() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(1);
    cfg.max_distance_m = Some(1.0);
    cfg.max_invalid_retries = Some(1);

    // the fixed scene sits 1.5 m ahead, beyond the configured 1 m ceiling
    let mut camera = SimulatedCamera::open(&cfg, WIDTH, HEIGHT).unwrap();
    let mut session = Session::create(dir.path(), "captured", &cfg).unwrap();
    let err = acquire_frames(&mut camera, &cfg, &mut session).unwrap_err();
    assert!(matches!(err, CaptureError::RetriesExhausted { .. }), "{err}");
}
