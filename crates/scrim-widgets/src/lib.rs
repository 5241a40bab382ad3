#![forbid(unsafe_code)]

//! Dimming backdrop widget for modal and sheet presentation.

pub mod dimmed;

use scrim_core::geometry::Rect;
use scrim_render::frame::Frame;

pub use dimmed::{DIM_HIT_BACKDROP, DimConfig, DimState, DimmedView, HitTarget};

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}
