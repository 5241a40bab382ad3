#![forbid(unsafe_code)]

//! Core: geometry, input events, and tap recognition for scrim.
//!
//! # Role in scrim
//! `scrim-core` is the input layer. It owns the canonical event types the
//! overlay consumes and the stateful tap detector that turns raw mouse
//! traffic into tap gestures.
//!
//! # How it fits in the system
//! `scrim-render` builds its hit grid on the geometry defined here, and
//! `scrim-widgets` feeds [`event::Event`] values through
//! [`gesture::TapRecognizer`] to drive tap-to-dismiss behavior. Neither
//! lower layer knows anything about widgets.

pub mod event;
pub mod geometry;
pub mod gesture;
