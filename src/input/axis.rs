//! Axis Frame Coalescer
//!
//! `wl_pointer` reports a scroll as a burst of loosely related events (axis,
//! axis_discrete, axis_source) closed by a `frame`. The source decides how
//! the other events have to be read, and it may arrive after them, so the
//! whole burst is buffered and resolved when the frame closes.
//!
//! | source               | honored entries | delta                    |
//! |----------------------|-----------------|--------------------------|
//! | wheel, wheel_tilt    | discrete        | steps × 120              |
//! | finger, continuous   | continuous      | trunc(value × 120 / 10)  |
//! | anything else        | none            |                          |

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::input::coordinates::CoordinateScaler;
use crate::input::error::Result;
use crate::input::sink::WireSink;
use crate::input::wheel::{send_wheel, ScrollAxis};

/// Wheel delta of one notch
pub const WHEEL_STEP: i32 = 120;

/// Divisor applied to continuous (touchpad) scroll distances
pub const CONTINUOUS_DIVISOR: f64 = 10.0;

/// `wl_fixed_t`: signed 24.8 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed(pub i32);

impl Fixed {
    /// Convert from floating point, rounding to the nearest 1/256
    pub fn from_f64(value: f64) -> Self {
        Fixed((value * 256.0).round() as i32)
    }

    /// Convert to floating point
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }
}

/// `wl_pointer.axis_source`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSource {
    /// Physical wheel with notches
    Wheel,
    /// Finger on a touchpad
    Finger,
    /// Continuous device without notches (trackpoint, knob)
    Continuous,
    /// Sideways tilt of a wheel
    WheelTilt,
    /// Source unknown to this client
    Other(u32),
}

impl AxisSource {
    /// Map a raw `wl_pointer.axis_source` value
    pub fn from_wayland(source: u32) -> Self {
        match source {
            0 => AxisSource::Wheel,
            1 => AxisSource::Finger,
            2 => AxisSource::Continuous,
            3 => AxisSource::WheelTilt,
            other => AxisSource::Other(other),
        }
    }
}

/// One buffered scroll notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisEvent {
    /// `wl_pointer.axis`: continuous distance
    Continuous {
        /// Pointer X (window pixels)
        x: u32,
        /// Pointer Y (window pixels)
        y: u32,
        /// Scroll axis
        axis: ScrollAxis,
        /// Distance along the axis
        value: Fixed,
    },
    /// `wl_pointer.axis_discrete`: notch count
    Discrete {
        /// Pointer X (window pixels)
        x: u32,
        /// Pointer Y (window pixels)
        y: u32,
        /// Scroll axis
        axis: ScrollAxis,
        /// Number of notches
        steps: i32,
    },
    /// `wl_pointer.axis_source`
    Source(AxisSource),
}

/// A scroll delta ready for the wheel quantizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedScroll {
    /// Pointer X (window pixels)
    pub x: u32,
    /// Pointer Y (window pixels)
    pub y: u32,
    /// Scroll axis
    pub axis: ScrollAxis,
    /// Signed delta in 1/120 notch units
    pub delta: i32,
}

/// Resolve a frame's worth of events
///
/// Returns nothing when the frame carries no source. If it carries several,
/// the last one applies.
pub fn resolve(events: &[AxisEvent]) -> Vec<ResolvedScroll> {
    let source = events.iter().rev().find_map(|e| match e {
        AxisEvent::Source(source) => Some(*source),
        _ => None,
    });

    let Some(source) = source else {
        return Vec::new();
    };

    events
        .iter()
        .filter_map(|event| match (source, *event) {
            (
                AxisSource::Wheel | AxisSource::WheelTilt,
                AxisEvent::Discrete { x, y, axis, steps },
            ) => Some(ResolvedScroll {
                x,
                y,
                axis,
                delta: steps.saturating_mul(WHEEL_STEP),
            }),
            (
                AxisSource::Finger | AxisSource::Continuous,
                AxisEvent::Continuous { x, y, axis, value },
            ) => Some(ResolvedScroll {
                x,
                y,
                axis,
                delta: (value.to_f64() * WHEEL_STEP as f64 / CONTINUOUS_DIVISOR) as i32,
            }),
            _ => None,
        })
        .collect()
}

/// Per-frame scroll buffer
#[derive(Debug, Default)]
pub struct AxisFrame {
    events: Vec<AxisEvent>,
}

impl AxisFrame {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer one notification until the frame closes
    pub fn push(&mut self, event: AxisEvent) {
        self.events.push(event);
    }

    /// Number of buffered notifications
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Buffered notifications in arrival order
    pub fn pending(&self) -> &[AxisEvent] {
        &self.events
    }

    /// Close the frame: resolve, send, and clear
    ///
    /// The buffer is empty afterwards whatever happens. Every resolved delta
    /// is attempted; the first failure is returned. On success returns the
    /// number of wheel PDUs sent.
    pub fn finish(&mut self, sink: &mut dyn WireSink, scaler: &dyn CoordinateScaler) -> Result<usize> {
        let events = std::mem::take(&mut self.events);
        let resolved = resolve(&events);

        if resolved.is_empty() {
            debug!("Axis frame: {} event(s), nothing to send", events.len());
            return Ok(0);
        }

        let mut sent = 0;
        let mut first_error = None;

        for scroll in resolved {
            match send_wheel(sink, scaler, scroll.x, scroll.y, scroll.axis, scroll.delta) {
                Ok(n) => sent += n,
                Err(e) => {
                    warn!("Axis frame: wheel {:?} failed: {}", scroll, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(sent),
        }
    }
}
