//! Frame Export Tests
//!
//! Full synthetic-clock runs into a temporary directory.

mod common;

use common::init_tracing;
use room213_core::export::frames::{frame_file_name, CUE_SHEET_NAME};
use room213_core::export::render_export;
use room213_core::{ExportConfig, FontBook, Storyboard, NARRATIVE_SCRIPT};

fn low_rate_config(dir: &std::path::Path) -> ExportConfig {
    ExportConfig {
        out_dir: dir.to_path_buf(),
        fps: 1,
        batch_size: 8,
        ..ExportConfig::default()
    }
}

#[test]
fn exports_every_frame_through_the_final_one() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = low_rate_config(dir.path());
    let summary = render_export(Storyboard::new(FontBook::empty()), &config).unwrap();

    // 0s..=60s at 1 fps.
    assert_eq!(summary.frames, 61);
    assert!(dir.path().join(frame_file_name(0)).exists());
    assert!(dir.path().join(frame_file_name(60)).exists());
    assert!(!dir.path().join(frame_file_name(61)).exists());

    let last = image::open(dir.path().join("frame_00060.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(last.dimensions(), (720, 1280));
}

#[test]
fn cue_sheet_lists_each_segment_once_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let summary =
        render_export(Storyboard::new(FontBook::empty()), &low_rate_config(dir.path())).unwrap();

    let indices: Vec<usize> = summary.cues.iter().map(|c| c.index).collect();
    assert_eq!(indices, (0..NARRATIVE_SCRIPT.len()).collect::<Vec<_>>());
    for cue in &summary.cues {
        // At 1 fps every segment start lands exactly on a frame.
        assert_eq!(cue.dispatched_at_ms, cue.start_ms);
        assert_eq!(cue.frame as f64, cue.start_ms / 1000.0);
    }

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(CUE_SHEET_NAME)).unwrap())
            .unwrap();
    let cues = json.as_array().unwrap();
    assert_eq!(cues.len(), 7);
    assert_eq!(cues[1]["start_ms"], 7000.0);
    assert_eq!(cues[6]["text"], NARRATIVE_SCRIPT[6].text);
}

#[test]
fn hud_frames_differ_from_plain_frames() {
    let plain_dir = tempfile::tempdir().unwrap();
    let hud_dir = tempfile::tempdir().unwrap();
    render_export(
        Storyboard::new(FontBook::empty()),
        &low_rate_config(plain_dir.path()),
    )
    .unwrap();
    render_export(
        Storyboard::new(FontBook::empty()),
        &ExportConfig {
            hud: true,
            ..low_rate_config(hud_dir.path())
        },
    )
    .unwrap();

    let name = frame_file_name(30);
    let plain = image::open(plain_dir.path().join(&name)).unwrap().to_rgba8();
    let hud = image::open(hud_dir.path().join(&name)).unwrap().to_rgba8();
    assert_ne!(plain, hud);
}

#[test]
fn zero_fps_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig {
        fps: 0,
        ..low_rate_config(dir.path())
    };
    assert!(render_export(Storyboard::new(FontBook::empty()), &config).is_err());
}
