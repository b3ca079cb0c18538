// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use smallvec::SmallVec;

/// One tracked touch in a [`TouchHistory`].
///
/// A record persists across the touch's lifetime: `touch_down` activates it,
/// `touch_move` rolls `position` into `previous_position`, and `touch_up`
/// deactivates it without removing it, so an identifier reused by the
/// platform reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Platform-assigned touch identifier.
    pub id: u64,
    /// Position at the most recent sample.
    pub position: Point,
    /// Position at the sample before the most recent one.
    ///
    /// Equal to `position` until the touch has moved at least once.
    pub previous_position: Point,
    /// Timestamp of the most recent sample, in platform units.
    ///
    /// Non-decreasing over the record's lifetime.
    pub timestamp: f64,
    /// Whether the touch is currently on the surface.
    pub active: bool,
}

/// Ordered bank of touch samples, maintained by the host's input layer.
///
/// The bank holds up to four touches inline; more spill to the heap. Gesture
/// engines read the history through [`touches`](Self::touches),
/// [`active_touch_count`](Self::active_touch_count) and
/// [`most_recent_timestamp`](Self::most_recent_timestamp); only the host
/// calls the `touch_*` maintenance methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchHistory {
    bank: SmallVec<[Touch; 4]>,
    most_recent_timestamp: f64,
}

impl TouchHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the most recent mutation (down, move, or up), in
    /// platform units. Zero for an empty history.
    #[must_use]
    pub fn most_recent_timestamp(&self) -> f64 {
        self.most_recent_timestamp
    }

    /// Number of touches currently on the surface.
    #[must_use]
    pub fn active_touch_count(&self) -> usize {
        self.bank.iter().filter(|t| t.active).count()
    }

    /// Iterate over the active touches, in bank order (oldest identifier
    /// first).
    pub fn touches(&self) -> impl Iterator<Item = &Touch> {
        self.bank.iter().filter(|t| t.active)
    }

    /// Record a touch landing on the surface.
    ///
    /// A known identifier is re-activated and rebased at `position` (its
    /// previous position is reset so the landing contributes no motion); an
    /// unknown identifier appends a new record.
    pub fn touch_down(&mut self, id: u64, position: Point, timestamp: f64) {
        self.most_recent_timestamp = self.most_recent_timestamp.max(timestamp);
        if let Some(touch) = self.bank.iter_mut().find(|t| t.id == id) {
            touch.timestamp = touch.timestamp.max(timestamp);
            touch.position = position;
            touch.previous_position = position;
            touch.active = true;
        } else {
            self.bank.push(Touch {
                id,
                position,
                previous_position: position,
                timestamp,
                active: true,
            });
        }
    }

    /// Record a touch moving to `position`.
    ///
    /// The prior position rolls into `previous_position`. A move for an
    /// unknown identifier is treated as a landing.
    pub fn touch_move(&mut self, id: u64, position: Point, timestamp: f64) {
        let Some(touch) = self.bank.iter_mut().find(|t| t.id == id && t.active) else {
            self.touch_down(id, position, timestamp);
            return;
        };
        self.most_recent_timestamp = self.most_recent_timestamp.max(timestamp);
        touch.previous_position = touch.position;
        touch.position = position;
        // Per-touch timestamps never decrease; clamp out-of-order samples.
        touch.timestamp = touch.timestamp.max(timestamp);
    }

    /// Record a touch lifting off the surface.
    ///
    /// The record stays in the bank (inactive) so the platform can reuse the
    /// identifier. Unknown identifiers are ignored.
    pub fn touch_up(&mut self, id: u64, timestamp: f64) {
        if let Some(touch) = self.bank.iter_mut().find(|t| t.id == id && t.active) {
            self.most_recent_timestamp = self.most_recent_timestamp.max(timestamp);
            touch.previous_position = touch.position;
            touch.timestamp = touch.timestamp.max(timestamp);
            touch.active = false;
        }
    }

    /// Drop all records and reset the most-recent timestamp.
    pub fn clear(&mut self) {
        self.bank.clear();
        self.most_recent_timestamp = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_has_no_touches() {
        let history = TouchHistory::new();
        assert_eq!(history.active_touch_count(), 0);
        assert_eq!(history.most_recent_timestamp(), 0.0);
        assert!(history.touches().next().is_none());
    }

    #[test]
    fn down_activates_and_rebases() {
        let mut history = TouchHistory::new();
        history.touch_down(7, Point::new(1.0, 2.0), 10.0);

        assert_eq!(history.active_touch_count(), 1);
        let touch = history.touches().next().unwrap();
        assert_eq!(touch.id, 7);
        assert_eq!(touch.position, Point::new(1.0, 2.0));
        assert_eq!(touch.previous_position, touch.position);
        assert_eq!(touch.timestamp, 10.0);
    }

    #[test]
    fn move_rolls_previous_position() {
        let mut history = TouchHistory::new();
        history.touch_down(0, Point::new(0.0, 0.0), 10.0);
        history.touch_move(0, Point::new(5.0, 3.0), 20.0);

        let touch = history.touches().next().unwrap();
        assert_eq!(touch.previous_position, Point::new(0.0, 0.0));
        assert_eq!(touch.position, Point::new(5.0, 3.0));
        assert_eq!(touch.timestamp, 20.0);
        assert_eq!(history.most_recent_timestamp(), 20.0);
    }

    #[test]
    fn move_for_unknown_id_lands_the_touch() {
        let mut history = TouchHistory::new();
        history.touch_move(3, Point::new(4.0, 4.0), 15.0);

        assert_eq!(history.active_touch_count(), 1);
        let touch = history.touches().next().unwrap();
        assert_eq!(touch.previous_position, touch.position);
    }

    #[test]
    fn up_deactivates_but_keeps_record() {
        let mut history = TouchHistory::new();
        history.touch_down(0, Point::new(0.0, 0.0), 10.0);
        history.touch_up(0, 25.0);

        assert_eq!(history.active_touch_count(), 0);
        assert_eq!(history.most_recent_timestamp(), 25.0);

        // Identifier reuse reactivates the same slot with a fresh base.
        history.touch_down(0, Point::new(9.0, 9.0), 30.0);
        assert_eq!(history.active_touch_count(), 1);
        let touch = history.touches().next().unwrap();
        assert_eq!(touch.previous_position, Point::new(9.0, 9.0));
        assert_eq!(touch.timestamp, 30.0);
    }

    #[test]
    fn timestamps_never_decrease() {
        let mut history = TouchHistory::new();
        history.touch_down(0, Point::new(0.0, 0.0), 100.0);
        history.touch_move(0, Point::new(1.0, 1.0), 90.0);

        let touch = history.touches().next().unwrap();
        assert_eq!(touch.timestamp, 100.0);
        assert_eq!(history.most_recent_timestamp(), 100.0);
    }

    #[test]
    fn most_recent_timestamp_spans_all_touches() {
        let mut history = TouchHistory::new();
        history.touch_down(0, Point::new(0.0, 0.0), 10.0);
        history.touch_down(1, Point::new(1.0, 1.0), 12.0);
        history.touch_move(0, Point::new(2.0, 2.0), 14.0);

        assert_eq!(history.most_recent_timestamp(), 14.0);
        // Lifting the newest touch still advances the clock.
        history.touch_up(1, 16.0);
        assert_eq!(history.most_recent_timestamp(), 16.0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut history = TouchHistory::new();
        history.touch_down(0, Point::new(0.0, 0.0), 10.0);
        history.clear();

        assert_eq!(history.active_touch_count(), 0);
        assert_eq!(history.most_recent_timestamp(), 0.0);
    }
}
