// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Centroid and pinch geometry over a touch history.
//!
//! All functions here are pure reads of a [`TouchHistory`]. Results that
//! depend on touches being present are `Option`s: `None` means "no
//! qualifying touches", which gesture engines treat as a zero motion
//! contribution rather than an error.
//!
//! The `changed_after` variants restrict the computation to touches whose
//! timestamp strictly exceeds a cutoff. An engine that has already folded
//! samples up to time `t` into its running state passes `t` as the cutoff so
//! touches that did not move since then are not counted twice when several
//! touches update across nominally simultaneous platform events.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use tactile_touch::TouchHistory;
//! use tactile_touch::centroid::{centroid_of_touches_changed_after, Sample};
//!
//! let mut history = TouchHistory::new();
//! history.touch_down(0, Point::new(0.0, 0.0), 100.0);
//! history.touch_down(1, Point::new(10.0, 0.0), 100.0);
//! history.touch_move(0, Point::new(4.0, 0.0), 200.0);
//!
//! // Only touch 0 changed after t=100; touch 1 is filtered out.
//! let current = centroid_of_touches_changed_after(&history, 100.0, Sample::Current);
//! let previous = centroid_of_touches_changed_after(&history, 100.0, Sample::Previous);
//! assert_eq!(current, Some(Point::new(4.0, 0.0)));
//! assert_eq!(previous, Some(Point::new(0.0, 0.0)));
//! ```

use kurbo::{Point, Vec2};

use crate::{Touch, TouchHistory};

/// Which sample of a touch to read: the most recent one or the one before it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sample {
    /// The touch's current position.
    Current,
    /// The touch's previous position.
    Previous,
}

impl Sample {
    fn position(self, touch: &Touch) -> Point {
        match self {
            Self::Current => touch.position,
            Self::Previous => touch.previous_position,
        }
    }
}

/// Mean current position of all active touches, or `None` when no touch is
/// active.
#[must_use]
pub fn centroid(history: &TouchHistory) -> Option<Point> {
    mean(history.touches().map(|t| t.position))
}

/// Mean position of active touches whose timestamp strictly exceeds
/// `cutoff`, reading the sample selected by `sample`.
///
/// Returns `None` when no touch qualifies; callers treat that as no motion
/// contribution.
#[must_use]
pub fn centroid_of_touches_changed_after(
    history: &TouchHistory,
    cutoff: f64,
    sample: Sample,
) -> Option<Point> {
    mean(
        history
            .touches()
            .filter(|t| t.timestamp > cutoff)
            .map(|t| sample.position(t)),
    )
}

/// Distance between the two most-recently-updated active touches that
/// changed after `cutoff`, reading the sample selected by `sample`.
///
/// Returns `None` when fewer than two touches qualify. On equal timestamps
/// the selection is stable: later bank entries rank as more recent.
#[must_use]
pub fn pinch_distance(history: &TouchHistory, cutoff: f64, sample: Sample) -> Option<f64> {
    let mut newest: Option<&Touch> = None;
    let mut second: Option<&Touch> = None;
    for touch in history.touches().filter(|t| t.timestamp > cutoff) {
        match newest {
            Some(n) if touch.timestamp < n.timestamp => {
                if second.is_none_or(|s| touch.timestamp >= s.timestamp) {
                    second = Some(touch);
                }
            }
            _ => {
                second = newest;
                newest = Some(touch);
            }
        }
    }
    let (a, b) = (newest?, second?);
    Some(sample.position(a).distance(sample.position(b)))
}

fn mean(positions: impl Iterator<Item = Point>) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for p in positions {
        sum += p.to_vec2();
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some((sum / count as f64).to_point())
    }
}
