// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Touch: touch sample history and centroid/pinch geometry.
//!
//! ## Overview
//!
//! This crate provides the touch-side building blocks for gesture
//! recognition:
//!
//! - [`Touch`] and [`TouchHistory`]: an ordered bank of touch samples, each
//!   carrying an identifier, its current and previous position, and a
//!   monotonically non-decreasing timestamp. The host's input layer maintains
//!   the history (one mutation per physical touch event); gesture engines
//!   only ever read it.
//! - [`centroid`]: pure functions over a history — mean touch position,
//!   cutoff-filtered centroid deltas, and pairwise pinch distance.
//!
//! Timestamps are opaque `f64` values in whatever unit the platform delivers;
//! the only requirement is that they never decrease for a given touch. The
//! history clamps them to enforce this.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use tactile_touch::{TouchHistory, centroid};
//!
//! let mut history = TouchHistory::new();
//! history.touch_down(0, Point::new(10.0, 20.0), 100.0);
//! history.touch_down(1, Point::new(30.0, 40.0), 100.0);
//!
//! assert_eq!(history.active_touch_count(), 2);
//! assert_eq!(history.most_recent_timestamp(), 100.0);
//!
//! // Centroid of the two touches.
//! let c = centroid::centroid(&history).unwrap();
//! assert_eq!(c, Point::new(20.0, 30.0));
//!
//! // One finger lifts; the other remains.
//! history.touch_up(1, 150.0);
//! assert_eq!(history.active_touch_count(), 1);
//! assert_eq!(history.most_recent_timestamp(), 150.0);
//! ```
//!
//! ## Integration
//!
//! `tactile_responder` consumes a `&TouchHistory` per delivered event and
//! derives drag/pinch/tap gesture state from it. Nothing in this crate is
//! specific to that engine; any recognizer that needs positions over time can
//! read the same history.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod centroid;

mod history;

pub use history::{Touch, TouchHistory};
