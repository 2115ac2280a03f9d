use super::narrator::Narrator;
use super::session::PlaybackSession;
use crate::script::{active_segment_index, NARRATIVE_SCRIPT};
use crate::storyboard::{ActiveScene, Storyboard};
use crate::types::TOTAL_DURATION_MS;
use serde::Serialize;
use skia_safe::Canvas;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    Idle,
    Playing,
    Finished,
}

/// Observable playback state: what the progress bar, timecode and transcript render from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub phase: PlaybackPhase,
    pub elapsed_ms: f64,
    /// `elapsed / total`, in `[0, 1]`.
    pub progress: f64,
    /// `None` while idle.
    pub active_scene: Option<usize>,
    /// `None` once elapsed reaches the end, since segment spans are right-open.
    pub active_segment: Option<usize>,
}

/// Handle for the one tick the driver is waiting for.
///
/// Any tick presented with a different handle (an older run, or a frame superseded by
/// play/stop) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest {
    run: u64,
    serial: u64,
}

impl FrameRequest {
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub snapshot: PlaybackSnapshot,
    pub scene: ActiveScene,
    /// Narration segments dispatched during this tick, in order.
    pub dispatched: Vec<usize>,
    /// `false` when no surface was attached.
    pub drew: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The request was cancelled or superseded. Nothing changed.
    Stale,
    /// A frame was processed and the next one is pending.
    Rendered(TickReport),
    /// Elapsed reached the end. No further frame is pending.
    Finished(TickReport),
}

impl TickOutcome {
    pub fn is_stale(&self) -> bool {
        matches!(self, TickOutcome::Stale)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TickOutcome::Finished(_))
    }

    pub fn report(&self) -> Option<&TickReport> {
        match self {
            TickOutcome::Stale => None,
            TickOutcome::Rendered(report) | TickOutcome::Finished(report) => Some(report),
        }
    }
}

pub type SnapshotListener = Box<dyn FnMut(&PlaybackSnapshot) + Send>;

/// The timestamp-driven playback loop.
///
/// The host owns the clock and the refresh cadence: after [`play`](Self::play) it feeds
/// [`tick`](Self::tick) the pending [`FrameRequest`] and a timestamp once per refresh, until
/// the outcome is [`TickOutcome::Finished`] or the request goes stale.
pub struct PlaybackDriver {
    storyboard: Storyboard,
    session: PlaybackSession,
    phase: PlaybackPhase,
    run: u64,
    serial: u64,
    pending: Option<FrameRequest>,
    start_ms: Option<f64>,
    elapsed_ms: f64,
    current_scene: Option<usize>,
    listeners: Vec<SnapshotListener>,
}

impl PlaybackDriver {
    pub fn new(storyboard: Storyboard, session: PlaybackSession) -> Self {
        Self {
            storyboard,
            session,
            phase: PlaybackPhase::Idle,
            run: 0,
            serial: 0,
            pending: None,
            start_ms: None,
            elapsed_ms: 0.0,
            current_scene: None,
            listeners: Vec::new(),
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn storyboard(&self) -> &Storyboard {
        &self.storyboard
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let active_scene = match self.phase {
            PlaybackPhase::Idle => None,
            _ => Some(self.storyboard.resolve(self.elapsed_ms).index),
        };
        PlaybackSnapshot {
            phase: self.phase,
            elapsed_ms: self.elapsed_ms,
            progress: (self.elapsed_ms / TOTAL_DURATION_MS).clamp(0.0, 1.0),
            active_scene,
            active_segment: active_segment_index(self.elapsed_ms),
        }
    }

    /// Registers an observer for published snapshots.
    ///
    /// A run publishes on play, on every tick, once on the Finished transition, and on a
    /// stop that changes phase.
    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackSnapshot) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Starts a fresh run from any phase and returns the first frame to wait for.
    ///
    /// The run's start timestamp is taken from its first tick.
    pub fn play(&mut self) -> FrameRequest {
        self.session.reset();
        self.run += 1;
        self.phase = PlaybackPhase::Playing;
        self.elapsed_ms = 0.0;
        self.start_ms = None;
        self.current_scene = None;
        info!(run = self.run, "Playback started");
        self.publish();
        self.schedule()
    }

    /// Cancels the pending frame and any narration. Safe to call in any phase.
    pub fn stop(&mut self) {
        self.pending = None;
        self.start_ms = None;
        self.session.reset();
        if self.phase != PlaybackPhase::Idle {
            info!(run = self.run, elapsed = self.elapsed_ms, "Playback stopped");
            self.phase = PlaybackPhase::Idle;
            self.current_scene = None;
            self.publish();
        }
    }

    /// Runs one tick: advance the clock, publish, narrate, draw, then finish or reschedule.
    pub fn tick(
        &mut self,
        request: FrameRequest,
        timestamp_ms: f64,
        surface: Option<&Canvas>,
    ) -> TickOutcome {
        if self.phase != PlaybackPhase::Playing || self.pending != Some(request) {
            trace!(?request, pending = ?self.pending, "Ignoring stale tick");
            return TickOutcome::Stale;
        }
        self.pending = None;

        // Only a finite reading may anchor the run; until one arrives elapsed holds.
        if self.start_ms.is_none() && timestamp_ms.is_finite() {
            self.start_ms = Some(timestamp_ms);
        }
        let elapsed = match self.start_ms {
            // f64::max drops a NaN reading in favour of the previous elapsed.
            Some(start) => (timestamp_ms - start)
                .clamp(0.0, TOTAL_DURATION_MS)
                .max(self.elapsed_ms),
            None => {
                debug!(timestamp_ms, "Non-finite first timestamp, start not anchored");
                self.elapsed_ms
            }
        };
        self.elapsed_ms = elapsed;
        self.publish();

        let scene = self.storyboard.resolve(elapsed);
        if self.current_scene != Some(scene.index) {
            debug!(
                scene = scene.index,
                kind = scene.kind.label(),
                at_ms = elapsed,
                "Scene change"
            );
            self.current_scene = Some(scene.index);
        }

        let dispatched = Narrator::dispatch_due(&mut self.session, &NARRATIVE_SCRIPT, elapsed);

        let drew = match surface {
            Some(canvas) => {
                self.storyboard.draw(canvas, elapsed);
                true
            }
            None => {
                debug!(at_ms = elapsed, "No surface attached, skipping draw");
                false
            }
        };

        if elapsed >= TOTAL_DURATION_MS {
            self.phase = PlaybackPhase::Finished;
            self.start_ms = None;
            info!(run = self.run, "Playback finished");
            // Last publication of the run.
            self.publish();
            return TickOutcome::Finished(TickReport {
                snapshot: self.snapshot(),
                scene,
                dispatched,
                drew,
            });
        }

        self.schedule();
        TickOutcome::Rendered(TickReport {
            snapshot: self.snapshot(),
            scene,
            dispatched,
            drew,
        })
    }

    fn schedule(&mut self) -> FrameRequest {
        self.serial += 1;
        let request = FrameRequest {
            run: self.run,
            serial: self.serial,
        };
        self.pending = Some(request);
        request
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }
}
