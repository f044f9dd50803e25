//! Wheel Quantizer
//!
//! Turns a signed scroll delta (120 units per notch) into TS_POINTER_EVENT
//! wheel PDUs. The wire carries at most 0xFF units per PDU, so larger deltas
//! are split into several PDUs, each carrying the sign.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::input::coordinates::{to_wire, CoordinateScaler, ScaleDirection};
use crate::input::error::Result;
use crate::input::flags::pointer;
use crate::input::sink::WireSink;

/// Largest magnitude one wheel PDU can carry
pub const MAX_WHEEL_CHUNK: u32 = 0xFF;

/// Scroll axis as reported by `wl_pointer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAxis {
    /// wl_pointer axis 0
    Vertical,
    /// wl_pointer axis 1
    Horizontal,
}

impl ScrollAxis {
    /// Map a raw `wl_pointer.axis` value
    pub fn from_wayland(axis: u32) -> Option<Self> {
        match axis {
            0 => Some(ScrollAxis::Vertical),
            1 => Some(ScrollAxis::Horizontal),
            _ => None,
        }
    }

    /// Base wheel flag for this axis
    pub fn wheel_flag(self) -> u16 {
        match self {
            ScrollAxis::Vertical => pointer::WHEEL,
            ScrollAxis::Horizontal => pointer::HWHEEL,
        }
    }

    /// Whether `delta` is sent with `WHEEL_NEGATIVE`.
    ///
    /// The axes are mirrored. On the vertical axis a positive delta (scroll
    /// down) is a negative rotation; on the horizontal axis a negative delta
    /// (scroll left) is.
    pub fn is_negative(self, delta: i32) -> bool {
        match self {
            ScrollAxis::Vertical => delta > 0,
            ScrollAxis::Horizontal => delta < 0,
        }
    }
}

/// Iterator over the pointer flags of each wheel PDU for one delta
#[derive(Debug, Clone)]
pub struct WheelSteps {
    flags: u16,
    negative: bool,
    remaining: u32,
}

impl Iterator for WheelSteps {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.remaining == 0 {
            return None;
        }

        let chunk = self.remaining.min(MAX_WHEEL_CHUNK) as u16;
        self.remaining -= chunk as u32;

        // Negative rotation goes out as 9-bit two's complement.
        let flags = if self.negative {
            (self.flags & 0xFF00) | (0x100 - chunk)
        } else {
            self.flags | chunk
        };

        Some(flags)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.div_ceil(MAX_WHEEL_CHUNK) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for WheelSteps {}

/// Quantize a signed delta into wheel PDU flags
pub fn quantize(axis: ScrollAxis, delta: i32) -> WheelSteps {
    let negative = axis.is_negative(delta);
    let mut flags = axis.wheel_flag();
    if negative {
        flags |= pointer::WHEEL_NEGATIVE;
    }

    WheelSteps {
        flags,
        negative,
        remaining: delta.unsigned_abs(),
    }
}

/// Decode the signed rotation carried by one wheel PDU
pub fn rotation_of(flags: u16) -> i32 {
    let magnitude = (flags & 0x00FF) as i32;
    if flags & pointer::WHEEL_NEGATIVE != 0 {
        magnitude - 0x100
    } else {
        magnitude
    }
}

/// Scale the position and send one wheel PDU per chunk of `delta`
///
/// Stops at the first failed send; chunks already sent stay sent.
pub fn send_wheel(
    sink: &mut dyn WireSink,
    scaler: &dyn CoordinateScaler,
    x: u32,
    y: u32,
    axis: ScrollAxis,
    delta: i32,
) -> Result<usize> {
    let (sx, sy) = scaler.scale(x, y, ScaleDirection::LocalToRemote)?;
    let (wx, wy) = to_wire(sx, sy)?;

    let steps = quantize(axis, delta);
    let count = steps.len();
    debug!(
        "Wheel: {:?} delta={} at ({}, {}) -> {} PDU(s)",
        axis, delta, wx, wy, count
    );

    for flags in steps {
        trace!("Wheel PDU flags=0x{:04X}", flags);
        sink.send_mouse(flags, wx, wy)?;
    }

    Ok(count)
}
