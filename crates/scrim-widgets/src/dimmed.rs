#![forbid(unsafe_code)]

//! Dimming backdrop ("scrim") shown behind a sheet or modal.
//!
//! [`DimmedView`] renders a tinted layer over its area and participates in
//! mouse dispatch three ways:
//!
//! 1. Content registered on top of it (later hit registrations) shadows it,
//!    so interactive elements above the scrim keep receiving input.
//! 2. A configured pass-through target is consulted for points the scrim
//!    would otherwise absorb, so a designated surface *beneath* the scrim
//!    (e.g. a search bar outside the sheet) stays interactive.
//! 3. Everywhere else the scrim claims the point, which is what makes
//!    tap-to-dismiss work.
//!
//! Opacity is driven by a three-valued [`DimState`]; transitioning state is
//! a pure recomputation of opacity with no other side effect. No animation
//! is implied — callers own any transition animation.

use std::rc::Weak;
use std::time::Instant;

use scrim_core::event::Event;
use scrim_core::geometry::Rect;
use scrim_core::gesture::{Tap, TapConfig, TapRecognizer};
use scrim_render::cell::PackedRgba;
use scrim_render::frame::{Frame, HitData, HitId, HitRegion, HitTestable};
use tracing::trace;

use crate::Widget;

/// Hit region tag for the scrim backdrop.
pub const DIM_HIT_BACKDROP: HitRegion = HitRegion::Custom(1);

/// The possible states of the dimmed view: fully dimmed, invisible, or a
/// percentage of the base opacity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DimState {
    /// Fully dimmed (opacity = base `dim_alpha`).
    Max,
    /// Invisible (opacity = 0).
    #[default]
    Off,
    /// A fraction of `dim_alpha`; the payload is clamped to `[0, 1]`
    /// before use.
    Percent(f32),
}

/// Scrim configuration (base opacity + color).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimConfig {
    /// Base maximum opacity in `[0.0, 1.0]`, reached in [`DimState::Max`].
    pub dim_alpha: f32,
    /// Backdrop color (alpha is derived from the dim state).
    pub color: PackedRgba,
}

impl DimConfig {
    /// Create a new scrim config.
    pub fn new(dim_alpha: f32, color: PackedRgba) -> Self {
        Self { dim_alpha, color }
    }

    /// Set the base opacity.
    pub fn dim_alpha(mut self, dim_alpha: f32) -> Self {
        self.dim_alpha = dim_alpha;
        self
    }

    /// Set the backdrop color.
    pub fn color(mut self, color: PackedRgba) -> Self {
        self.color = color;
        self
    }
}

impl Default for DimConfig {
    fn default() -> Self {
        Self {
            dim_alpha: 0.7,
            color: PackedRgba::BLACK,
        }
    }
}

/// Resolution of a hit-test query against the scrim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A surface registered above the scrim claimed the point.
    Subview(HitId, HitRegion, HitData),
    /// The configured pass-through target claimed the point.
    PassThrough(HitId, HitRegion, HitData),
    /// The scrim absorbs the point.
    Dimmed(HitId),
}

/// A dim view for use as an overlay over content you want dimmed.
///
/// Invariants:
/// - `alpha()` is always `dim_alpha * f` for some `f` in `[0, 1]` derived
///   from the current state; [`set_dim_state`](DimmedView::set_dim_state)
///   is the sole mutator of opacity.
/// - The pass-through reference is non-owning; a dropped target behaves
///   exactly as an unset one.
///
/// Failure modes: none. All operations are total; out-of-range percentages
/// are clamped, absent optional fields are no-ops.
pub struct DimmedView {
    dim_alpha: f32,
    color: PackedRgba,
    state: DimState,
    alpha: f32,
    hit_id: HitId,
    pass_through: Option<Weak<dyn HitTestable>>,
    on_tap: Option<Box<dyn FnMut(Tap)>>,
    taps: TapRecognizer,
}

impl std::fmt::Debug for DimmedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimmedView")
            .field("state", &self.state)
            .field("alpha", &self.alpha)
            .field("hit_id", &self.hit_id)
            .field("pass_through", &self.pass_through.is_some())
            .field("on_tap", &self.on_tap.is_some())
            .finish()
    }
}

impl DimmedView {
    /// Create a scrim with the default configuration (0.7 base opacity,
    /// black). The view starts invisible ([`DimState::Off`]).
    #[must_use]
    pub fn new(hit_id: HitId) -> Self {
        Self::with_config(hit_id, DimConfig::default())
    }

    /// Create a scrim with an explicit configuration.
    ///
    /// `dim_alpha` and `color` are fixed for the lifetime of the view.
    #[must_use]
    pub fn with_config(hit_id: HitId, config: DimConfig) -> Self {
        Self {
            dim_alpha: config.dim_alpha,
            color: config.color,
            state: DimState::Off,
            alpha: 0.0,
            hit_id,
            pass_through: None,
            on_tap: None,
            taps: TapRecognizer::new(TapConfig::default()),
        }
    }

    /// The scrim's hit ID.
    #[inline]
    #[must_use]
    pub const fn hit_id(&self) -> HitId {
        self.hit_id
    }

    /// Base maximum opacity, fixed at construction.
    #[inline]
    #[must_use]
    pub const fn dim_alpha(&self) -> f32 {
        self.dim_alpha
    }

    /// Backdrop color, fixed at construction.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> PackedRgba {
        self.color
    }

    /// Current dim state.
    #[inline]
    #[must_use]
    pub const fn dim_state(&self) -> DimState {
        self.state
    }

    /// Current opacity derived from the dim state.
    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Transition to a new dim state, recomputing opacity.
    ///
    /// | new state    | resulting opacity                 |
    /// |--------------|-----------------------------------|
    /// | `Max`        | `dim_alpha`                       |
    /// | `Off`        | `0.0`                             |
    /// | `Percent(p)` | `dim_alpha * clamp(p, 0.0, 1.0)`  |
    pub fn set_dim_state(&mut self, state: DimState) {
        self.state = state;
        self.alpha = match state {
            DimState::Max => self.dim_alpha,
            DimState::Off => 0.0,
            DimState::Percent(p) => self.dim_alpha * p.clamp(0.0, 1.0),
        };
        trace!(state = ?self.state, alpha = self.alpha, "dim state changed");
    }

    /// Set the pass-through target.
    ///
    /// The scrim holds a non-owning reference; the target's owner controls
    /// its lifetime, and a dead reference is treated as unset.
    pub fn set_pass_through(&mut self, target: Weak<dyn HitTestable>) {
        self.pass_through = Some(target);
    }

    /// Remove the pass-through target.
    pub fn clear_pass_through(&mut self) {
        self.pass_through = None;
    }

    /// Set the closure invoked when a tap lands on the scrim.
    pub fn set_on_tap(&mut self, callback: impl FnMut(Tap) + 'static) {
        self.on_tap = Some(Box::new(callback));
    }

    /// Remove the tap callback. Taps on the scrim become no-ops.
    pub fn clear_on_tap(&mut self) {
        self.on_tap = None;
    }

    /// Resolve which surface owns the point at (x, y).
    ///
    /// 1. If the frame's hit grid reports a surface other than the scrim,
    ///    that surface wins (content above the scrim).
    /// 2. Otherwise a live pass-through target is consulted at the same
    ///    point.
    /// 3. Otherwise the scrim absorbs the point.
    #[must_use]
    pub fn hit_test(&self, frame: &Frame, x: u16, y: u16) -> HitTarget {
        if let Some((id, region, data)) = frame.hit_test(x, y)
            && id != self.hit_id
        {
            return HitTarget::Subview(id, region, data);
        }

        if let Some(target) = self.pass_through.as_ref().and_then(Weak::upgrade)
            && let Some((id, region, data)) = target.hit_test(x, y)
        {
            return HitTarget::PassThrough(id, region, data);
        }

        HitTarget::Dimmed(self.hit_id)
    }

    /// Feed an input event to the scrim's tap recognizer.
    ///
    /// Returns the tap when one is recognized *and* resolves to the scrim
    /// itself; the stored `on_tap` callback (if any) is invoked exactly
    /// once for it. Taps landing on content above the scrim or on the
    /// pass-through target are not the scrim's to claim.
    ///
    /// The event is never consumed: callers keep dispatching it through
    /// their normal path regardless of the return value.
    pub fn handle_event(&mut self, event: &Event, frame: &Frame, now: Instant) -> Option<Tap> {
        let tap = self.taps.process(event, now)?;
        match self.hit_test(frame, tap.pos.x, tap.pos.y) {
            HitTarget::Dimmed(_) => {
                trace!(x = tap.pos.x, y = tap.pos.y, "scrim tapped");
                if let Some(callback) = self.on_tap.as_mut() {
                    callback(tap);
                }
                Some(tap)
            }
            HitTarget::Subview(..) | HitTarget::PassThrough(..) => None,
        }
    }
}

impl Widget for DimmedView {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        if self.alpha > 0.0 {
            frame.fill_tint(area, self.color.with_opacity(self.alpha));
        }

        // Registered before content renders, so content above the scrim
        // overlays more specific hit regions on top.
        frame.register_hit(area, self.hit_id, DIM_HIT_BACKDROP, 0);
    }
}
