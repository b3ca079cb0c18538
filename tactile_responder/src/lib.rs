// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Responder: drag, pinch, tap, and double-tap recognition over a
//! touch sample stream.
//!
//! ## Overview
//!
//! A [`GestureResponder`] turns the raw touch events a host view hierarchy
//! delivers into derived motion — displacement, velocity, centroid, pinch
//! distance — and discrete tap classifications, while coordinating one
//! exclusive interaction claim with the host's scheduler. The host attaches
//! the responder's entry points to a view's responder-negotiation slots and
//! feeds every event a [`TouchEvent`] wrapping its [`TouchHistory`]
//! snapshot; the engine never observes wall-clock time and never runs off
//! the host's event thread.
//!
//! The pieces:
//!
//! - [`GestureState`]: the derived record callbacks receive on every
//!   transition — translation, velocity, pinch, tap flags.
//! - [`ResponderConfig`]: optional host callbacks, one per lifecycle point,
//!   with documented defaults when absent.
//! - [`InteractionScheduler`] / [`InteractionClaim`]: the injected
//!   capability through which a gesture claims an exclusive interaction for
//!   its duration.
//! - [`GestureResponder`]: the state machine tying them together.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use tactile_responder::{GestureResponder, ResponderConfig, TouchEvent};
//! use tactile_touch::TouchHistory;
//!
//! let config = ResponderConfig::new().start_should_set(|_, _| true);
//! // `()` is the unit scheduler: no interaction handles to manage.
//! let mut responder = GestureResponder::new(config, ());
//!
//! // One finger lands; the host polls negotiation and grants.
//! let mut history = TouchHistory::new();
//! history.touch_down(0, Point::new(0.0, 0.0), 0.0);
//! let down = TouchEvent::with_touch_count(&history, 1);
//! responder.start_should_set_capture(&down);
//! assert!(responder.start_should_set(&down));
//! assert!(responder.grant(&down)); // block native responders by default
//!
//! // The finger drags 10 units over 100 time units.
//! history.touch_move(0, Point::new(10.0, 0.0), 100.0);
//! responder.responder_move(&TouchEvent::new(&history));
//!
//! let state = responder.gesture_state();
//! assert_eq!(state.translation.x, 10.0);
//! assert_eq!(state.velocity.x, 0.1);
//!
//! // The finger lifts quickly: a single tap.
//! history.touch_up(0, 150.0);
//! responder.responder_end(&TouchEvent::new(&history));
//! assert!(responder.gesture_state().single_tap_up);
//! responder.release(&TouchEvent::new(&history));
//! ```
//!
//! ## Event model
//!
//! Events arrive serially on one logical thread and each entry point runs to
//! completion; there is no internal threading and no timer. Time-based
//! decisions (the 400-unit tap window) compare delivered event timestamps
//! only. Timestamps may arrive in either a coarse or a fine platform unit;
//! elapsed values are normalized by [`normalize_interval`] before use.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod interaction;
mod responder;
mod state;

pub use config::{
    BlockNativeHandler, GestureHandler, ResponderConfig, ShouldSetHandler, TouchEvent,
};
pub use interaction::{InteractionClaim, InteractionHandle, InteractionScheduler};
pub use responder::GestureResponder;
pub use state::{GestureState, TAP_UP_TIME_THRESHOLD, normalize_interval};
