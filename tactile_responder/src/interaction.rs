// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exclusive-interaction claim against a host scheduler.
//!
//! A long-running gesture signals the host's scheduler so it can deprioritize
//! other work while the user's finger is down. The scheduler is an injected
//! capability — anything implementing [`InteractionScheduler`] — so tests can
//! substitute a counting double, and hosts without a scheduler can pass `()`.
//!
//! [`InteractionClaim`] guards the handle: at most one is outstanding per
//! claim, acquisition is idempotent, and releasing an empty claim is a no-op.

/// Opaque token for one outstanding exclusive interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InteractionHandle(pub u64);

/// Capability interface to the host's long-running-interaction scheduler.
///
/// Both calls are synchronous requests; the engine never waits on them.
pub trait InteractionScheduler {
    /// Request a handle marking the start of an exclusive interaction.
    fn create_interaction_handle(&mut self) -> InteractionHandle;

    /// Return a handle, marking the interaction as finished.
    fn clear_interaction_handle(&mut self, handle: InteractionHandle);
}

/// The unit scheduler: for hosts with no interaction scheduling. Handles are
/// issued and discarded without effect.
impl InteractionScheduler for () {
    fn create_interaction_handle(&mut self) -> InteractionHandle {
        InteractionHandle(0)
    }

    fn clear_interaction_handle(&mut self, _handle: InteractionHandle) {}
}

/// At most one outstanding [`InteractionHandle`], owned by a single
/// responder.
#[derive(Debug, Default)]
pub struct InteractionClaim {
    handle: Option<InteractionHandle>,
}

impl InteractionClaim {
    /// Acquire a handle if none is held. Idempotent.
    pub fn acquire<S: InteractionScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.handle.is_none() {
            self.handle = Some(scheduler.create_interaction_handle());
        }
    }

    /// Release the held handle, if any. Safe to call when nothing is held.
    pub fn release<S: InteractionScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.handle.take() {
            scheduler.clear_interaction_handle(handle);
        }
    }

    /// Whether a handle is currently held.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.handle.is_some()
    }
}
