#![forbid(unsafe_code)]

//! Render target for scrim: packed color, tint buffer, and hit grid.
//!
//! # Role in scrim
//! `scrim-render` owns the surface an overlay draws into. A [`frame::Frame`]
//! bundles a per-cell tint layer (what the dimming writes) with an optional
//! [`frame::HitGrid`] (what mouse dispatch reads).
//!
//! # How it fits in the system
//! `scrim-widgets` composites backdrop color into the frame and registers
//! hit regions; hosts query the frame to route mouse events. This crate is
//! independent of input handling.

pub mod cell;
pub mod frame;

pub use cell::PackedRgba;
pub use frame::{Frame, HitData, HitGrid, HitId, HitRegion, HitTestable};
