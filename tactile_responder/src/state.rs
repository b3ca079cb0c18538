// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived gesture state: centroid motion, velocity, pinch, and tap flags.

use kurbo::{Point, Vec2};
use tactile_touch::TouchHistory;
use tactile_touch::centroid::{Sample, centroid_of_touches_changed_after, pinch_distance};

/// Longest interval, in normalized time units, between a grant and a lift
/// that still counts as a tap, and between two taps that still count as a
/// double tap.
pub const TAP_UP_TIME_THRESHOLD: f64 = 400.0;

/// Normalize an elapsed-time value to the coarse (millisecond-flavored)
/// unit.
///
/// Platform timestamps arrive in one of two encodings depending on the
/// source; an interval measured in the finer unit is six orders of magnitude
/// larger than the same interval in the coarse one. Any elapsed value above
/// `1_000_000` is assumed to be fine-grained and rescaled down.
///
/// This is a magnitude heuristic, not a guarantee: a genuinely enormous
/// coarse interval would be misclassified. Hosts that can declare their unit
/// should pre-normalize timestamps and never hit the rescale branch.
#[must_use]
pub fn normalize_interval(interval: f64) -> f64 {
    if interval > 1_000_000.0 {
        interval / 1_000_000.0
    } else {
        interval
    }
}

/// The derived, mutable record a [`GestureResponder`] maintains across the
/// lifetime of one gesture.
///
/// Host callbacks receive a shared reference to this on every transition.
/// The flags [`single_tap_up`](Self::single_tap_up) and
/// [`double_tap_up`](Self::double_tap_up) are meaningful only at or after
/// the end/release transitions of a gesture.
///
/// [`GestureResponder`]: crate::GestureResponder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Current centroid position of the gesture's touches.
    pub move_pos: Point,
    /// Centroid position at the moment the responder was granted.
    pub start_pos: Point,
    /// Cumulative centroid displacement since the grant.
    pub translation: Vec2,
    /// Instantaneous centroid velocity, in position units per normalized
    /// time unit. Zero when the last update had no elapsed time.
    pub velocity: Vec2,
    /// Number of touches currently on the surface.
    pub active_touch_count: usize,
    /// Pairwise distance between the two most recent touches, or `None`
    /// with fewer than two touches.
    pub pinch: Option<f64>,
    /// [`pinch`](Self::pinch) at the previous sample.
    pub previous_pinch: Option<f64>,
    /// The gesture ended quickly enough, with all touches lifted, to count
    /// as a tap.
    pub single_tap_up: bool,
    /// The gesture's release followed a prior tap within the double-tap
    /// window.
    pub double_tap_up: bool,

    // Bookkeeping. `accounts_for_moves_up_to` is the cutoff already folded
    // into `translation`/`velocity`; it never moves backward within one
    // gesture. The `last_*` fields survive `reset` so the next gesture can
    // evaluate a double tap against this one.
    pub(crate) accounts_for_moves_up_to: f64,
    pub(crate) grant_timestamp: f64,
    pub(crate) last_release_timestamp: f64,
    pub(crate) last_single_tap_up: bool,
    pub(crate) single_tap_failed: bool,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            move_pos: Point::ZERO,
            start_pos: Point::ZERO,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            active_touch_count: 0,
            pinch: None,
            previous_pinch: None,
            single_tap_up: false,
            double_tap_up: false,
            accounts_for_moves_up_to: 0.0,
            grant_timestamp: 0.0,
            last_release_timestamp: 0.0,
            last_single_tap_up: false,
            single_tap_failed: false,
        }
    }
}

impl GestureState {
    /// The timestamp up to which touch motion has been folded into this
    /// state. Monotonically non-decreasing within a gesture; resets to zero
    /// when a new touch sequence begins.
    #[must_use]
    pub fn accounts_for_moves_up_to(&self) -> f64 {
        self.accounts_for_moves_up_to
    }

    /// Reinitialize for a new gesture.
    ///
    /// Clears everything except the previous gesture's release record
    /// (`last_single_tap_up`, `last_release_timestamp`, `grant_timestamp`),
    /// which double-tap evaluation reads across the reset that follows a
    /// release.
    pub(crate) fn reset(&mut self) {
        self.move_pos = Point::ZERO;
        self.start_pos = Point::ZERO;
        self.translation = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.active_touch_count = 0;
        self.pinch = None;
        self.previous_pinch = None;
        self.single_tap_up = false;
        self.double_tap_up = false;
        self.accounts_for_moves_up_to = 0.0;
        self.single_tap_failed = false;
    }

    /// Fold the touches that changed since the last update into the running
    /// motion state.
    pub(crate) fn update_on_move(&mut self, history: &TouchHistory) {
        let cutoff = self.accounts_for_moves_up_to;
        let current = centroid_of_touches_changed_after(history, cutoff, Sample::Current);
        let previous = centroid_of_touches_changed_after(history, cutoff, Sample::Previous);
        // No qualifying touches means no motion contribution, not an error.
        let delta = match (current, previous) {
            (Some(current), Some(previous)) => current - previous,
            _ => Vec2::ZERO,
        };

        self.active_touch_count = history.active_touch_count();
        if let Some(current) = current {
            self.move_pos = current;
        }

        let dt = normalize_interval(history.most_recent_timestamp() - cutoff);
        self.velocity = if dt > 0.0 { delta / dt } else { Vec2::ZERO };
        self.translation += delta;
        self.accounts_for_moves_up_to = self
            .accounts_for_moves_up_to
            .max(history.most_recent_timestamp());

        self.pinch = pinch_distance(history, cutoff, Sample::Current);
        self.previous_pinch = pinch_distance(history, cutoff, Sample::Previous);
    }
}
