// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The responder state machine: lifecycle orchestration over gesture state.
//!
//! ## Lifecycle
//!
//! A responder moves through four conceptual states, driven entirely by the
//! host's serial event delivery:
//!
//! - **Idle**: no touches, fresh [`GestureState`].
//! - **Negotiating**: touches are present and the `*_should_set` predicates
//!   are being polled, but the responder has not been granted.
//! - **Active**: [`grant`](GestureResponder::grant) succeeded; the
//!   interaction claim is held and move/start/end events update the state.
//! - **Released** / **Terminated**: terminal; the claim is returned, the
//!   host is notified, and the state resets back to Idle.
//!
//! The machine keeps no explicit state variable; each entry point implements
//! its transition's contract and the host's responder negotiation decides
//! which entry points fire. This matches how view hierarchies drive
//! negotiation: the same events are offered to many candidate responders and
//! only the winner sees the active-phase entry points.
//!
//! ## Re-entrancy
//!
//! Every entry point takes `&mut self`; a callback cannot feed a new event
//! into the responder that invoked it. Delivery is single-threaded and each
//! transition runs to completion.

use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::Vec2;
use tactile_touch::centroid::centroid;

use crate::config::{ResponderConfig, TouchEvent};
use crate::interaction::{InteractionClaim, InteractionScheduler};
use crate::state::{GestureState, TAP_UP_TIME_THRESHOLD, normalize_interval};

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(1);

/// Recognizes drag, pinch, tap, and double-tap gestures from the touch
/// events a host view hierarchy delivers, and claims an exclusive
/// interaction with the host scheduler `S` while a gesture is in flight.
///
/// Construct one per logical responder and attach its entry points to the
/// view's responder-negotiation slots. See the crate docs for a worked
/// example.
#[derive(Debug)]
pub struct GestureResponder<S: InteractionScheduler> {
    config: ResponderConfig,
    scheduler: S,
    claim: InteractionClaim,
    state: GestureState,
    state_id: u64,
}

impl<S: InteractionScheduler> GestureResponder<S> {
    /// Create a responder with the given callback configuration and
    /// interaction scheduler.
    pub fn new(config: ResponderConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            claim: InteractionClaim::default(),
            state: GestureState::default(),
            state_id: NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The current derived gesture state.
    #[must_use]
    pub fn gesture_state(&self) -> &GestureState {
        &self.state
    }

    /// Process-unique identifier for this responder's state, for debugging
    /// and log correlation.
    #[must_use]
    pub fn state_id(&self) -> u64 {
        self.state_id
    }

    /// The interaction scheduler this responder claims against.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Whether an interaction claim is currently outstanding.
    #[must_use]
    pub fn holds_interaction(&self) -> bool {
        self.claim.is_held()
    }

    /// Bubble-phase query: should this view become the responder for a
    /// starting touch? Pure delegation; default `false`.
    pub fn start_should_set(&mut self, event: &TouchEvent<'_>) -> bool {
        match &mut self.config.start_should_set {
            Some(hook) => hook(event, &self.state),
            None => false,
        }
    }

    /// Bubble-phase query: should this view become the responder for a
    /// moving touch? Pure delegation; default `false`.
    pub fn move_should_set(&mut self, event: &TouchEvent<'_>) -> bool {
        match &mut self.config.move_should_set {
            Some(hook) => hook(event, &self.state),
            None => false,
        }
    }

    /// Capture-phase query for a starting touch.
    ///
    /// An event carrying exactly one touch means a new touch sequence is
    /// beginning, so the gesture state reinitializes before the predicate
    /// runs. The active-touch count refreshes either way. Default `false`.
    pub fn start_should_set_capture(&mut self, event: &TouchEvent<'_>) -> bool {
        if event.touch_count == 1 {
            self.state.reset();
        }
        self.state.active_touch_count = event.history.active_touch_count();
        match &mut self.config.start_should_set_capture {
            Some(hook) => hook(event, &self.state),
            None => false,
        }
    }

    /// Capture-phase query for a moving touch.
    ///
    /// When several touches change in one logical tick the host dispatches a
    /// move per touch; only the first carries a new timestamp. Repeats
    /// short-circuit to `false` without recomputation. Default `false`.
    pub fn move_should_set_capture(&mut self, event: &TouchEvent<'_>) -> bool {
        let history = event.history;
        if self.state.accounts_for_moves_up_to() == history.most_recent_timestamp() {
            return false;
        }
        self.state.update_on_move(history);
        match &mut self.config.move_should_set_capture {
            Some(hook) => hook(event, &self.state),
            None => false,
        }
    }

    /// The host granted this view responder status.
    ///
    /// Acquires the interaction claim (idempotently), records the grant
    /// timestamp, rebases the start position at the current centroid, zeroes
    /// the running translation, and notifies
    /// [`on_grant`](ResponderConfig::on_grant). Returns whether a competing
    /// native responder should be blocked (default `true`).
    pub fn grant(&mut self, event: &TouchEvent<'_>) -> bool {
        self.claim.acquire(&mut self.scheduler);
        self.state.grant_timestamp = event.history.most_recent_timestamp();
        if let Some(origin) = centroid(event.history) {
            self.state.start_pos = origin;
        }
        self.state.translation = Vec2::ZERO;
        if let Some(hook) = &mut self.config.on_grant {
            hook(event, &self.state);
        }
        match &mut self.config.should_block_native {
            Some(hook) => hook(),
            None => true,
        }
    }

    /// Responder negotiation failed.
    ///
    /// Releases the claim and notifies the host. The gesture state is left
    /// as-is: the touch sequence continues and a later event may win the
    /// negotiation.
    pub fn reject(&mut self, event: &TouchEvent<'_>) {
        self.claim.release(&mut self.scheduler);
        if let Some(hook) = &mut self.config.on_reject {
            hook(event, &self.state);
        }
    }

    /// The gesture ended: the last touch lifted while this view was the
    /// responder.
    ///
    /// Evaluates the double tap — a tap on this gesture, a recorded tap on
    /// the previous one, and less than [`TAP_UP_TIME_THRESHOLD`] between
    /// the releases — records the release, returns the claim, notifies
    /// [`on_release`](ResponderConfig::on_release), and reinitializes for
    /// the next gesture.
    pub fn release(&mut self, event: &TouchEvent<'_>) {
        let now = event.history.most_recent_timestamp();
        if self.state.single_tap_up {
            if self.state.last_single_tap_up
                && normalize_interval(now - self.state.last_release_timestamp)
                    < TAP_UP_TIME_THRESHOLD
            {
                self.state.double_tap_up = true;
            }
            self.state.last_single_tap_up = true;
        }
        self.state.last_release_timestamp = now;

        self.claim.release(&mut self.scheduler);
        if let Some(hook) = &mut self.config.on_release {
            hook(event, &self.state);
        }
        self.state.reset();
    }

    /// A touch started while this view is the responder. Refreshes the
    /// active-touch count and notifies the host; geometry is untouched.
    pub fn responder_start(&mut self, event: &TouchEvent<'_>) {
        self.state.active_touch_count = event.history.active_touch_count();
        if let Some(hook) = &mut self.config.on_start {
            hook(event, &self.state);
        }
    }

    /// A touch moved while this view is the responder.
    ///
    /// Applies the same duplicate-dispatch guard as
    /// [`move_should_set_capture`](Self::move_should_set_capture); a genuine
    /// new timestamp folds the motion into the state and notifies
    /// [`on_move`](ResponderConfig::on_move).
    pub fn responder_move(&mut self, event: &TouchEvent<'_>) {
        let history = event.history;
        if self.state.accounts_for_moves_up_to() == history.most_recent_timestamp() {
            return;
        }
        self.state.update_on_move(history);
        if let Some(hook) = &mut self.config.on_move {
            hook(event, &self.state);
        }
    }

    /// A touch ended while this view is the responder.
    ///
    /// Evaluates tap failure — the gesture cannot be a tap once a touch
    /// remains on the surface at an end, or once the gesture has outlived
    /// [`TAP_UP_TIME_THRESHOLD`] since its grant — sets
    /// [`single_tap_up`](GestureState::single_tap_up) if it never failed,
    /// returns the claim, and notifies the host. State is not reinitialized;
    /// [`release`](Self::release) follows separately.
    pub fn responder_end(&mut self, event: &TouchEvent<'_>) {
        let history = event.history;
        self.state.active_touch_count = history.active_touch_count();

        if history.active_touch_count() > 0
            || normalize_interval(history.most_recent_timestamp() - self.state.grant_timestamp)
                > TAP_UP_TIME_THRESHOLD
        {
            self.state.single_tap_failed = true;
        }
        if !self.state.single_tap_failed {
            self.state.single_tap_up = true;
        }

        self.claim.release(&mut self.scheduler);
        if let Some(hook) = &mut self.config.on_end {
            hook(event, &self.state);
        }
    }

    /// The host forcibly revoked responder status (a competing gesture
    /// won). Returns the claim, notifies the host, and reinitializes.
    pub fn terminate(&mut self, event: &TouchEvent<'_>) {
        self.claim.release(&mut self.scheduler);
        if let Some(hook) = &mut self.config.on_terminate {
            hook(event, &self.state);
        }
        self.state.reset();
    }

    /// Something else is asking this responder to give up. Pure delegation;
    /// default `true` (permit termination).
    pub fn termination_request(&mut self, event: &TouchEvent<'_>) -> bool {
        match &mut self.config.on_termination_request {
            Some(hook) => hook(event, &self.state),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::{Point, Vec2};
    use tactile_touch::TouchHistory;

    fn responder(config: ResponderConfig) -> GestureResponder<()> {
        GestureResponder::new(config, ())
    }

    fn one_touch_at(pos: Point, timestamp: f64) -> TouchHistory {
        let mut history = TouchHistory::new();
        history.touch_down(0, pos, timestamp);
        history
    }

    #[test]
    fn should_set_defaults_are_false() {
        let mut r = responder(ResponderConfig::new());
        let history = one_touch_at(Point::ZERO, 1.0);
        let event = TouchEvent::new(&history);

        assert!(!r.start_should_set(&event));
        assert!(!r.move_should_set(&event));
        assert!(!r.start_should_set_capture(&event));
        assert!(!r.move_should_set_capture(&event));
    }

    #[test]
    fn termination_request_defaults_to_permit() {
        let mut r = responder(ResponderConfig::new());
        let history = one_touch_at(Point::ZERO, 1.0);
        assert!(r.termination_request(&TouchEvent::new(&history)));

        let mut r = responder(ResponderConfig::new().on_termination_request(|_, _| false));
        assert!(!r.termination_request(&TouchEvent::new(&history)));
    }

    #[test]
    fn capture_start_with_one_touch_reinitializes() {
        let mut r = responder(ResponderConfig::new());
        let history = one_touch_at(Point::new(5.0, 5.0), 100.0);
        r.state.translation = Vec2::new(9.0, 9.0);
        r.state.single_tap_up = true;

        r.start_should_set_capture(&TouchEvent::with_touch_count(&history, 1));

        assert_eq!(r.state.translation, Vec2::ZERO);
        assert!(!r.state.single_tap_up);
        assert_eq!(r.state.active_touch_count, 1);
    }

    #[test]
    fn capture_start_with_second_touch_keeps_state() {
        let mut r = responder(ResponderConfig::new());
        let mut history = one_touch_at(Point::ZERO, 100.0);
        history.touch_down(1, Point::new(4.0, 0.0), 110.0);
        r.state.translation = Vec2::new(3.0, 0.0);

        r.start_should_set_capture(&TouchEvent::with_touch_count(&history, 2));

        assert_eq!(r.state.translation, Vec2::new(3.0, 0.0));
        assert_eq!(r.state.active_touch_count, 2);
    }

    #[test]
    fn grant_rebases_origin_and_blocks_native_by_default() {
        let mut r = responder(ResponderConfig::new());
        let history = one_touch_at(Point::new(30.0, 40.0), 100.0);
        r.state.translation = Vec2::new(2.0, 2.0);

        assert!(r.grant(&TouchEvent::new(&history)));
        assert_eq!(r.state.start_pos, Point::new(30.0, 40.0));
        assert_eq!(r.state.translation, Vec2::ZERO);
        assert!(r.holds_interaction());
    }

    #[test]
    fn grant_honors_block_native_predicate() {
        let mut r = responder(ResponderConfig::new().should_block_native(|| false));
        let history = one_touch_at(Point::ZERO, 100.0);
        assert!(!r.grant(&TouchEvent::new(&history)));
    }

    #[test]
    fn grant_notification_sees_rebased_state() {
        let seen = Rc::new(Cell::new(Point::ZERO));
        let inner = seen.clone();
        let mut r = responder(
            ResponderConfig::new().on_grant(move |_, state| inner.set(state.start_pos)),
        );
        let history = one_touch_at(Point::new(7.0, 8.0), 100.0);

        r.grant(&TouchEvent::new(&history));

        assert_eq!(seen.get(), Point::new(7.0, 8.0));
    }

    #[test]
    fn duplicate_move_dispatch_is_suppressed() {
        let moves = Rc::new(Cell::new(0u32));
        let inner = moves.clone();
        let mut r = responder(ResponderConfig::new().on_move(move |_, _| inner.set(inner.get() + 1)));

        let mut history = one_touch_at(Point::ZERO, 100.0);
        r.grant(&TouchEvent::new(&history));
        history.touch_move(0, Point::new(10.0, 0.0), 200.0);

        r.responder_move(&TouchEvent::new(&history));
        let after_first = *r.gesture_state();

        // Second dispatch for the same logical tick: same timestamp.
        r.responder_move(&TouchEvent::new(&history));

        assert_eq!(moves.get(), 1);
        assert_eq!(*r.gesture_state(), after_first);
        assert_eq!(r.gesture_state().translation, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn move_capture_shares_the_duplicate_guard() {
        let mut r = responder(ResponderConfig::new().move_should_set_capture(|_, _| true));
        let mut history = one_touch_at(Point::ZERO, 100.0);
        history.touch_move(0, Point::new(1.0, 0.0), 200.0);

        assert!(r.move_should_set_capture(&TouchEvent::new(&history)));
        // Repeat at the same timestamp short-circuits to false.
        assert!(!r.move_should_set_capture(&TouchEvent::new(&history)));
    }

    #[test]
    fn quick_clean_end_is_a_single_tap() {
        let mut r = responder(ResponderConfig::new());
        let mut history = one_touch_at(Point::ZERO, 1_000.0);
        r.grant(&TouchEvent::new(&history));

        history.touch_up(0, 1_200.0);
        r.responder_end(&TouchEvent::new(&history));

        assert!(r.gesture_state().single_tap_up);
        assert!(!r.holds_interaction());
    }

    #[test]
    fn slow_end_fails_the_tap() {
        let mut r = responder(ResponderConfig::new());
        let mut history = one_touch_at(Point::ZERO, 1_000.0);
        r.grant(&TouchEvent::new(&history));

        history.touch_up(0, 1_500.0);
        r.responder_end(&TouchEvent::new(&history));

        assert!(!r.gesture_state().single_tap_up);
    }

    #[test]
    fn end_with_remaining_touches_fails_the_tap() {
        let mut r = responder(ResponderConfig::new());
        let mut history = one_touch_at(Point::ZERO, 1_000.0);
        history.touch_down(1, Point::new(1.0, 1.0), 1_000.0);
        r.grant(&TouchEvent::new(&history));

        // First finger lifts quickly, but the second is still down.
        history.touch_up(0, 1_100.0);
        r.responder_end(&TouchEvent::new(&history));
        assert!(!r.gesture_state().single_tap_up);

        // Tap failure sticks for the rest of the gesture.
        history.touch_up(1, 1_150.0);
        r.responder_end(&TouchEvent::new(&history));
        assert!(!r.gesture_state().single_tap_up);
    }

    #[test]
    fn release_resets_state_after_notifying() {
        let seen_tap = Rc::new(Cell::new(false));
        let inner = seen_tap.clone();
        let mut r = responder(
            ResponderConfig::new().on_release(move |_, state| inner.set(state.single_tap_up)),
        );
        let mut history = one_touch_at(Point::ZERO, 1_000.0);
        r.grant(&TouchEvent::new(&history));
        history.touch_up(0, 1_100.0);
        r.responder_end(&TouchEvent::new(&history));
        r.release(&TouchEvent::new(&history));

        // The callback observed the tap; the post-release state is fresh.
        assert!(seen_tap.get());
        assert!(!r.gesture_state().single_tap_up);
        assert_eq!(r.gesture_state().translation, Vec2::ZERO);
        assert_eq!(r.gesture_state().accounts_for_moves_up_to(), 0.0);
    }

    #[test]
    fn reject_releases_claim_but_keeps_state() {
        let mut r = responder(ResponderConfig::new());
        let mut history = one_touch_at(Point::ZERO, 100.0);
        r.grant(&TouchEvent::new(&history));
        history.touch_move(0, Point::new(5.0, 0.0), 200.0);
        r.responder_move(&TouchEvent::new(&history));

        r.reject(&TouchEvent::new(&history));

        assert!(!r.holds_interaction());
        // Negotiation may retry; the gesture's motion is preserved.
        assert_eq!(r.gesture_state().translation, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn terminate_releases_claim_and_resets() {
        let terminated = Rc::new(Cell::new(false));
        let inner = terminated.clone();
        let mut r =
            responder(ResponderConfig::new().on_terminate(move |_, _| inner.set(true)));
        let mut history = one_touch_at(Point::ZERO, 100.0);
        r.grant(&TouchEvent::new(&history));
        history.touch_move(0, Point::new(5.0, 0.0), 200.0);
        r.responder_move(&TouchEvent::new(&history));

        r.terminate(&TouchEvent::new(&history));

        assert!(terminated.get());
        assert!(!r.holds_interaction());
        assert_eq!(r.gesture_state().translation, Vec2::ZERO);
    }

    #[test]
    fn terminate_without_claim_is_a_noop() {
        let mut r = responder(ResponderConfig::new());
        let history = one_touch_at(Point::ZERO, 100.0);
        r.terminate(&TouchEvent::new(&history));
        assert!(!r.holds_interaction());
    }

    #[test]
    fn responders_get_distinct_state_ids() {
        let a = responder(ResponderConfig::new());
        let b = responder(ResponderConfig::new());
        assert_ne!(a.state_id(), b.state_id());
    }
}
