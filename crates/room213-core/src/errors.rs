use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create surface")]
    SurfaceFailure,
    #[error("Failed to read pixels back from surface")]
    ReadbackFailure,
    #[error("Failed to encode frame {frame}: {reason}")]
    EncodeFailure { frame: usize, reason: String },
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// A scene or narration table that does not partition the running time.
#[derive(Error, Debug, PartialEq)]
pub enum TimelineError {
    #[error("Timeline is empty")]
    Empty,
    #[error("Entry {index} starts at {start_ms}ms, expected {expected_ms}ms")]
    Gap {
        index: usize,
        start_ms: f64,
        expected_ms: f64,
    },
    #[error("Entry {index} has non-positive length ({start_ms}ms..{end_ms}ms)")]
    Degenerate {
        index: usize,
        start_ms: f64,
        end_ms: f64,
    },
    #[error("Timeline ends at {end_ms}ms, expected {total_ms}ms")]
    Coverage { end_ms: f64, total_ms: f64 },
}
