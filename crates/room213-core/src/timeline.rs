//! Active-interval lookup over small ordered tables.
//!
//! Scene and narration tables hold a handful of entries, so lookup is a plain ordered scan.
//! Spans are right-open: at an exact boundary the later entry is active, never both.

use crate::errors::TimelineError;
use crate::types::TimeSpan;

/// Anything that occupies a span of the playback clock.
pub trait Timed {
    fn span(&self) -> TimeSpan;
}

impl Timed for TimeSpan {
    fn span(&self) -> TimeSpan {
        *self
    }
}

/// Index of the first entry whose span contains `t`.
pub fn find_active<T: Timed>(items: &[T], t: f64) -> Option<usize> {
    items.iter().position(|item| item.span().contains(t))
}

/// Like [`find_active`], but falls back to the last entry once `t` has run past the table.
///
/// Clock overshoot (or a clamped elapsed of exactly the total) must still resolve to a scene.
pub fn find_active_or_last<T: Timed>(items: &[T], t: f64) -> Option<usize> {
    find_active(items, t).or_else(|| {
        let last = items.len().checked_sub(1)?;
        (t >= items[last].span().end_ms).then_some(last)
    })
}

/// Checks that `items` are ordered, contiguous and cover `[0, total_ms)` exactly.
pub fn validate_partition<T: Timed>(items: &[T], total_ms: f64) -> Result<(), TimelineError> {
    if items.is_empty() {
        return Err(TimelineError::Empty);
    }
    let mut expected = 0.0;
    for (index, item) in items.iter().enumerate() {
        let span = item.span();
        if span.start_ms != expected {
            return Err(TimelineError::Gap {
                index,
                start_ms: span.start_ms,
                expected_ms: expected,
            });
        }
        if span.end_ms <= span.start_ms {
            return Err(TimelineError::Degenerate {
                index,
                start_ms: span.start_ms,
                end_ms: span.end_ms,
            });
        }
        expected = span.end_ms;
    }
    if expected != total_ms {
        return Err(TimelineError::Coverage {
            end_ms: expected,
            total_ms,
        });
    }
    Ok(())
}
