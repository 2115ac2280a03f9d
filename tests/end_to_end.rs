//! End-to-end runs through the facade crate.

use room213::core::export::render_export;
use room213::core::hud::{transcript_lines, ControlAffordance};
use room213::core::systems::renderer::frame_surface;
use room213::tts::backends::RecordingSpeech;
use room213::{
    ExportConfig, FontBook, PlaybackDriver, PlaybackPhase, PlaybackSession, Storyboard,
    TickOutcome, NARRATIVE_SCRIPT,
};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A 60 Hz run on a real surface: every caption once, then Finished, then a clean replay.
#[test]
fn realtime_run_and_replay() {
    init_tracing();
    let speech = RecordingSpeech::new();
    let session = PlaybackSession::new(Some(Arc::new(speech.clone())));
    let mut driver = PlaybackDriver::new(Storyboard::new(FontBook::empty()), session);
    let mut surface = frame_surface().unwrap();

    assert_eq!(
        ControlAffordance::for_phase(driver.phase()),
        ControlAffordance::Start
    );

    let mut request = driver.play();
    let mut ticks = 0;
    let mut timestamp = 1_234.0;
    loop {
        ticks += 1;
        // Sample every 25th tick onto the surface to keep the test quick.
        let canvas = if ticks % 25 == 0 {
            Some(surface.canvas())
        } else {
            None
        };
        match driver.tick(request, timestamp, canvas) {
            TickOutcome::Finished(report) => {
                assert_eq!(report.snapshot.phase, PlaybackPhase::Finished);
                break;
            }
            TickOutcome::Rendered(_) => {}
            TickOutcome::Stale => panic!("live request went stale"),
        }
        request = driver.pending_frame().unwrap();
        timestamp += 1000.0 / 60.0;
    }
    assert!(ticks >= 3600);
    assert_eq!(speech.spoken().len(), NARRATIVE_SCRIPT.len());
    assert_eq!(
        ControlAffordance::for_phase(driver.phase()).label(),
        "Replay Room 213"
    );

    speech.clear();
    let request = driver.play();
    driver.tick(request, 0.0, None);
    assert_eq!(speech.spoken().len(), 1);
    assert!(transcript_lines(driver.snapshot().active_segment)[0].active);
}

#[test]
fn export_writes_frames_and_cues() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig {
        out_dir: dir.path().to_path_buf(),
        fps: 1,
        crossfade_ms: 500.0,
        ..ExportConfig::default()
    };
    let summary = render_export(Storyboard::new(FontBook::empty()), &config).unwrap();
    assert_eq!(summary.frames, 61);
    assert_eq!(summary.cues.len(), 7);
    assert!(summary.cue_sheet.exists());
}
