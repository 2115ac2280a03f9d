//! # Playback
//!
//! The driver state machine (`Idle`, `Playing`, `Finished`), the per-run narration session and
//! the dispatcher that hands due segments to the speech backend.

pub mod driver;
pub mod narrator;
pub mod session;

pub use driver::{
    FrameRequest, PlaybackDriver, PlaybackPhase, PlaybackSnapshot, SnapshotListener, TickOutcome,
    TickReport,
};
pub use narrator::{Narrator, NARRATION_PARAMS};
pub use session::PlaybackSession;
