#![forbid(unsafe_code)]

//! Tap recognition: transforms raw mouse events into tap gestures.
//!
//! [`TapRecognizer`] is a stateful detector that watches mouse-down →
//! mouse-up sequences and emits a [`Tap`] when the press stays within a
//! position tolerance and a time window.
//!
//! # Invariants
//!
//! 1. A drag beyond the tolerance never produces a `Tap`, even if the
//!    mouse returns to the press position before release.
//! 2. A release of a different button than the press never produces a `Tap`.
//! 3. After `reset()` or focus loss the recognizer is idle; the next
//!    mouse-up emits nothing until a new mouse-down arms it.
//! 4. The recognizer never consumes events. Callers keep dispatching the
//!    same event through their normal path after feeding it here.

use std::time::{Duration, Instant};

use crate::event::{Event, MouseButton, MouseEventKind};
use crate::geometry::Point;

/// Thresholds for tap recognition.
#[derive(Debug, Clone)]
pub struct TapConfig {
    /// Maximum manhattan distance (cells) between press and release
    /// (default: 1).
    pub tolerance: u16,
    /// Maximum duration between press and release (default: 500ms).
    pub timeout: Duration,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            tolerance: 1,
            timeout: Duration::from_millis(500),
        }
    }
}

/// A recognized tap gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tap {
    /// Release position of the tap.
    pub pos: Point,
    /// Button that performed the tap.
    pub button: MouseButton,
}

/// Tracks an armed (pressed, not yet released) tap candidate.
#[derive(Debug, Clone, Copy)]
struct Armed {
    pos: Point,
    button: MouseButton,
    time: Instant,
}

/// Stateful tap detector.
///
/// Call [`process`](TapRecognizer::process) for each incoming [`Event`].
#[derive(Debug)]
pub struct TapRecognizer {
    config: TapConfig,
    armed: Option<Armed>,
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(TapConfig::default())
    }
}

impl TapRecognizer {
    /// Create a new tap recognizer with the given configuration.
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            armed: None,
        }
    }

    /// Process a raw event, returning a tap if one was recognized.
    pub fn process(&mut self, event: &Event, now: Instant) -> Option<Tap> {
        match event {
            Event::Mouse(mouse) => {
                let pos = Point::new(mouse.x, mouse.y);
                match mouse.kind {
                    MouseEventKind::Down(button) => {
                        self.armed = Some(Armed { pos, button, time: now });
                        None
                    }
                    MouseEventKind::Drag(_) => {
                        // A drag past the tolerance is never a tap.
                        if let Some(armed) = self.armed
                            && armed.pos.manhattan_distance(pos) > u32::from(self.config.tolerance)
                        {
                            self.armed = None;
                        }
                        None
                    }
                    MouseEventKind::Up(button) => {
                        let armed = self.armed.take()?;
                        let within_tolerance = armed.pos.manhattan_distance(pos)
                            <= u32::from(self.config.tolerance);
                        let within_timeout =
                            now.duration_since(armed.time) <= self.config.timeout;
                        if armed.button == button && within_tolerance && within_timeout {
                            Some(Tap { pos, button })
                        } else {
                            None
                        }
                    }
                    MouseEventKind::Moved => None,
                }
            }
            Event::Focus(false) => {
                self.armed = None;
                None
            }
            Event::Focus(true) => None,
        }
    }

    /// Whether a press is currently armed.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Reset to idle.
    pub fn reset(&mut self) {
        self.armed = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TapConfig {
        &self.config
    }
}
