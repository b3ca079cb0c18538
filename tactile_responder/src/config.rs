// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event facet and callback configuration for a responder.

use alloc::boxed::Box;
use core::fmt;

use tactile_touch::TouchHistory;

use crate::state::GestureState;

/// The two facets of a host event the engine reads: the touch-history
/// snapshot and, for capture-phase start events, the raw count of touches in
/// the platform event itself. Everything else about the host's event type is
/// opaque to the engine.
#[derive(Debug, Clone, Copy)]
pub struct TouchEvent<'a> {
    /// Snapshot of the touch history at this event.
    pub history: &'a TouchHistory,
    /// Number of touches on the surface as carried by the raw platform
    /// event.
    ///
    /// Only the capture-phase start transition reads this (a count of one
    /// marks the beginning of a new touch sequence). It can differ from
    /// [`TouchHistory::active_touch_count`] mid-dispatch when the platform
    /// batches several touch changes into one tick.
    pub touch_count: usize,
}

impl<'a> TouchEvent<'a> {
    /// Event over `history`, with the raw touch count taken from the
    /// history's active count.
    #[must_use]
    pub fn new(history: &'a TouchHistory) -> Self {
        Self {
            history,
            touch_count: history.active_touch_count(),
        }
    }

    /// Event over `history` with an explicit raw touch count.
    #[must_use]
    pub fn with_touch_count(history: &'a TouchHistory, touch_count: usize) -> Self {
        Self {
            history,
            touch_count,
        }
    }
}

/// Predicate hook: `(event, gesture state) -> bool`.
pub type ShouldSetHandler = Box<dyn FnMut(&TouchEvent<'_>, &GestureState) -> bool>;

/// Notification hook: `(event, gesture state)`.
pub type GestureHandler = Box<dyn FnMut(&TouchEvent<'_>, &GestureState)>;

/// Zero-argument predicate hook, used for native-responder blocking.
pub type BlockNativeHandler = Box<dyn FnMut() -> bool>;

/// Optional callbacks a host installs on a [`GestureResponder`].
///
/// Every hook is optional; an absent hook falls back to its documented
/// default at the call site (`false` for the should-set predicates, `true`
/// for [`should_block_native`](Self::should_block_native) and
/// [`on_termination_request`](Self::on_termination_request), no-op for the
/// notifications). Hooks are resolved once at construction; the engine never
/// re-reads the configuration.
///
/// [`GestureResponder`]: crate::GestureResponder
#[derive(Default)]
pub struct ResponderConfig {
    /// Polled on touch start in the bubble phase. Default `false`.
    pub start_should_set: Option<ShouldSetHandler>,
    /// Polled on touch move in the bubble phase. Default `false`.
    pub move_should_set: Option<ShouldSetHandler>,
    /// Polled on touch start in the capture phase. Default `false`.
    pub start_should_set_capture: Option<ShouldSetHandler>,
    /// Polled on touch move in the capture phase. Default `false`.
    pub move_should_set_capture: Option<ShouldSetHandler>,
    /// Notified when the responder is granted.
    pub on_grant: Option<GestureHandler>,
    /// Polled after a grant to decide whether a competing native responder
    /// should be blocked. Default `true`.
    pub should_block_native: Option<BlockNativeHandler>,
    /// Notified when responder negotiation fails.
    pub on_reject: Option<GestureHandler>,
    /// Notified when the gesture is released (all touches lifted).
    pub on_release: Option<GestureHandler>,
    /// Notified when a touch starts while this responder is active.
    pub on_start: Option<GestureHandler>,
    /// Notified on each processed move while active.
    pub on_move: Option<GestureHandler>,
    /// Notified when a touch ends while this responder is active.
    pub on_end: Option<GestureHandler>,
    /// Notified when the host forcibly revokes responder status.
    pub on_terminate: Option<GestureHandler>,
    /// Polled when something else requests this responder's termination.
    /// Default `true` (permit).
    pub on_termination_request: Option<ShouldSetHandler>,
}

impl ResponderConfig {
    /// An empty configuration: every hook at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the bubble-phase start predicate.
    #[must_use]
    pub fn start_should_set(
        mut self,
        hook: impl FnMut(&TouchEvent<'_>, &GestureState) -> bool + 'static,
    ) -> Self {
        self.start_should_set = Some(Box::new(hook));
        self
    }

    /// Install the bubble-phase move predicate.
    #[must_use]
    pub fn move_should_set(
        mut self,
        hook: impl FnMut(&TouchEvent<'_>, &GestureState) -> bool + 'static,
    ) -> Self {
        self.move_should_set = Some(Box::new(hook));
        self
    }

    /// Install the capture-phase start predicate.
    #[must_use]
    pub fn start_should_set_capture(
        mut self,
        hook: impl FnMut(&TouchEvent<'_>, &GestureState) -> bool + 'static,
    ) -> Self {
        self.start_should_set_capture = Some(Box::new(hook));
        self
    }

    /// Install the capture-phase move predicate.
    #[must_use]
    pub fn move_should_set_capture(
        mut self,
        hook: impl FnMut(&TouchEvent<'_>, &GestureState) -> bool + 'static,
    ) -> Self {
        self.move_should_set_capture = Some(Box::new(hook));
        self
    }

    /// Install the grant notification.
    #[must_use]
    pub fn on_grant(mut self, hook: impl FnMut(&TouchEvent<'_>, &GestureState) + 'static) -> Self {
        self.on_grant = Some(Box::new(hook));
        self
    }

    /// Install the native-responder blocking predicate.
    #[must_use]
    pub fn should_block_native(mut self, hook: impl FnMut() -> bool + 'static) -> Self {
        self.should_block_native = Some(Box::new(hook));
        self
    }

    /// Install the rejection notification.
    #[must_use]
    pub fn on_reject(mut self, hook: impl FnMut(&TouchEvent<'_>, &GestureState) + 'static) -> Self {
        self.on_reject = Some(Box::new(hook));
        self
    }

    /// Install the release notification.
    #[must_use]
    pub fn on_release(
        mut self,
        hook: impl FnMut(&TouchEvent<'_>, &GestureState) + 'static,
    ) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    /// Install the touch-start notification.
    #[must_use]
    pub fn on_start(mut self, hook: impl FnMut(&TouchEvent<'_>, &GestureState) + 'static) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    /// Install the move notification.
    #[must_use]
    pub fn on_move(mut self, hook: impl FnMut(&TouchEvent<'_>, &GestureState) + 'static) -> Self {
        self.on_move = Some(Box::new(hook));
        self
    }

    /// Install the touch-end notification.
    #[must_use]
    pub fn on_end(mut self, hook: impl FnMut(&TouchEvent<'_>, &GestureState) + 'static) -> Self {
        self.on_end = Some(Box::new(hook));
        self
    }

    /// Install the termination notification.
    #[must_use]
    pub fn on_terminate(
        mut self,
        hook: impl FnMut(&TouchEvent<'_>, &GestureState) + 'static,
    ) -> Self {
        self.on_terminate = Some(Box::new(hook));
        self
    }

    /// Install the termination-request predicate.
    #[must_use]
    pub fn on_termination_request(
        mut self,
        hook: impl FnMut(&TouchEvent<'_>, &GestureState) -> bool + 'static,
    ) -> Self {
        self.on_termination_request = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for ResponderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hooks are opaque closures; report their presence.
        f.debug_struct("ResponderConfig")
            .field("start_should_set", &self.start_should_set.is_some())
            .field("move_should_set", &self.move_should_set.is_some())
            .field(
                "start_should_set_capture",
                &self.start_should_set_capture.is_some(),
            )
            .field(
                "move_should_set_capture",
                &self.move_should_set_capture.is_some(),
            )
            .field("on_grant", &self.on_grant.is_some())
            .field("should_block_native", &self.should_block_native.is_some())
            .field("on_reject", &self.on_reject.is_some())
            .field("on_release", &self.on_release.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_terminate", &self.on_terminate.is_some())
            .field(
                "on_termination_request",
                &self.on_termination_request.is_some(),
            )
            .finish()
    }
}
