/*!
 * Linear re-synchronization of subtitle timestamps.
 *
 * Two anchors are enough to correct a constant offset combined with a constant
 * rate error (e.g. a 25 fps rip played against a 23.976 fps video): the start
 * of the first cue is moved to `synced_first_ms`, the start of the last cue to
 * `synced_last_ms`, and every other timestamp follows the same straight line.
 */

use log::{debug, warn};

use crate::errors::SyncError;
use crate::subtitle_processor::Document;
use crate::timecode::format_time;

/// Affine map `new = slope * old + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapping {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearMapping {
    /// The mapping that leaves every timestamp unchanged
    pub fn identity() -> Self {
        LinearMapping {
            slope: 1.0,
            intercept: 0.0,
        }
    }

    /// Line through `(desynced_first, synced_first)` and `(desynced_last, synced_last)`.
    ///
    /// When both desynced anchors coincide the line is undefined; if the targets
    /// coincide as well the result is a pure shift, otherwise it is an error.
    pub fn from_anchors(
        desynced_first: u64,
        desynced_last: u64,
        synced_first: u64,
        synced_last: u64,
    ) -> Result<Self, SyncError> {
        if desynced_first == desynced_last {
            if synced_first != synced_last {
                return Err(SyncError::IdenticalAnchors {
                    start_ms: desynced_first,
                });
            }
            return Ok(LinearMapping {
                slope: 1.0,
                intercept: synced_first as f64 - desynced_first as f64,
            });
        }

        let (x1, x2) = (desynced_first as f64, desynced_last as f64);
        let (y1, y2) = (synced_first as f64, synced_last as f64);

        let slope = (y2 - y1) / (x2 - x1);
        let intercept = y2 - slope * x2;

        Ok(LinearMapping { slope, intercept })
    }

    /// Unrounded image of `ms`
    pub fn apply(&self, ms: u64) -> f64 {
        self.slope * ms as f64 + self.intercept
    }

    /// Rounded image of `ms`; negative results are clamped to zero
    pub fn map(&self, ms: u64) -> u64 {
        let rounded = round_half_away_from_zero(self.apply(ms));
        if rounded < 0.0 {
            warn!(
                "Timestamp {} maps before zero ({} ms), clamping to 00:00:00,000",
                format_time(ms),
                rounded
            );
            return 0;
        }
        rounded as u64
    }
}

/// Known-correct start times for the first and last cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTarget {
    pub first_ms: u64,
    pub last_ms: u64,
}

impl SyncTarget {
    pub fn new(first_ms: u64, last_ms: u64) -> Self {
        SyncTarget { first_ms, last_ms }
    }

    /// Fill omitted anchors with the document's current first/last start,
    /// which turns that end into a no-op anchor.
    pub fn resolve(
        first_ms: Option<u64>,
        last_ms: Option<u64>,
        document: &Document,
    ) -> Result<Self, SyncError> {
        let (first, last) = match (document.first(), document.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(SyncError::EmptyDocument),
        };

        Ok(SyncTarget {
            first_ms: first_ms.unwrap_or(first.start),
            last_ms: last_ms.unwrap_or(last.start),
        })
    }

    /// The first anchor may not come after the last one
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.first_ms > self.last_ms {
            return Err(SyncError::FirstAfterLast {
                first_ms: self.first_ms,
                last_ms: self.last_ms,
            });
        }
        Ok(())
    }
}

/// Round to the nearest integer, ties away from zero.
///
/// `2.5 -> 3`, `-2.5 -> -3`, `2.4 -> 2`, `-2.4 -> -2`.
pub fn round_half_away_from_zero(value: f64) -> f64 {
    let frac = value - value.trunc();
    if frac >= 0.5 {
        value.ceil()
    } else if frac > 0.0 {
        value.floor()
    } else if frac <= -0.5 {
        value.floor()
    } else if frac < 0.0 {
        value.ceil()
    } else {
        value
    }
}

/// Re-time every cue in place so the first cue starts at `synced_first_ms`
/// and the last cue at `synced_last_ms`.
///
/// Both `start` and `end` of every cue go through the same mapping. Text is
/// never touched. Ordering of the targets is the caller's concern.
pub fn resync(
    document: &mut Document,
    synced_first_ms: u64,
    synced_last_ms: u64,
) -> Result<LinearMapping, SyncError> {
    let (desynced_first, desynced_last) = match (document.first(), document.last()) {
        (Some(first), Some(last)) => (first.start, last.start),
        _ => return Err(SyncError::EmptyDocument),
    };

    let mapping = LinearMapping::from_anchors(
        desynced_first,
        desynced_last,
        synced_first_ms,
        synced_last_ms,
    )?;
    debug!(
        "Mapping {} -> {}, {} -> {} (slope {:.6}, intercept {:.3} ms)",
        format_time(desynced_first),
        format_time(synced_first_ms),
        format_time(desynced_last),
        format_time(synced_last_ms),
        mapping.slope,
        mapping.intercept
    );

    for cue in document.cues.iter_mut() {
        cue.start = mapping.map(cue.start);
        cue.end = mapping.map(cue.end);
    }

    Ok(mapping)
}
