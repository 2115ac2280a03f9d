//! # Export Module
//!
//! Offline rendering of a full run.
//!
//! ## Responsibilities
//! - **PNG Sequence**: One image per synthetic-clock tick.
//! - **Cue Sheet**: `narration.json`, the dispatched segments in order.

pub mod frames;

pub use crate::systems::renderer::{render_frame, snapshot_png};
pub use frames::{render_export, ExportSummary, NarrationCue};
