//! Pointer Event Handling
//!
//! Maps `wl_pointer` enter, motion and button events to RDP pointer PDUs.
//! Left, right and middle go out as TS_POINTER_EVENT; side and extra go out as
//! TS_POINTERX_EVENT. The two shapes are never mixed in one call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::coordinates::{to_wire, CoordinateScaler, ScaleDirection};
use crate::input::error::Result;
use crate::input::flags::{pointer, pointer_x};
use crate::input::sink::WireSink;

/// Linux evdev button codes
pub mod buttons {
    /// Left button
    pub const BTN_LEFT: u32 = 0x110;
    /// Right button
    pub const BTN_RIGHT: u32 = 0x111;
    /// Middle button
    pub const BTN_MIDDLE: u32 = 0x112;
    /// Side (back) button
    pub const BTN_SIDE: u32 = 0x113;
    /// Extra (forward) button
    pub const BTN_EXTRA: u32 = 0x114;
}

/// Mouse buttons the wire protocol can express
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Side button
    Side,
    /// Extra button
    Extra,
}

/// The PDU shape a button travels in, with its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonFlags {
    /// TS_POINTER_EVENT flags
    Primary(u16),
    /// TS_POINTERX_EVENT flags
    Extended(u16),
}

impl MouseButton {
    /// Convert from a Linux evdev button code
    pub fn from_linux_button(code: u32) -> Option<Self> {
        match code {
            buttons::BTN_LEFT => Some(MouseButton::Left),
            buttons::BTN_RIGHT => Some(MouseButton::Right),
            buttons::BTN_MIDDLE => Some(MouseButton::Middle),
            buttons::BTN_SIDE => Some(MouseButton::Side),
            buttons::BTN_EXTRA => Some(MouseButton::Extra),
            _ => None,
        }
    }

    /// Linux evdev button code
    pub fn to_linux_button(self) -> u32 {
        match self {
            MouseButton::Left => buttons::BTN_LEFT,
            MouseButton::Right => buttons::BTN_RIGHT,
            MouseButton::Middle => buttons::BTN_MIDDLE,
            MouseButton::Side => buttons::BTN_SIDE,
            MouseButton::Extra => buttons::BTN_EXTRA,
        }
    }

    /// Wire flags for a press or release of this button
    pub fn wire_flags(self, pressed: bool) -> ButtonFlags {
        let down = |flag: u16| if pressed { flag } else { 0 };

        match self {
            MouseButton::Left => ButtonFlags::Primary(pointer::BUTTON1 | down(pointer::DOWN)),
            MouseButton::Right => ButtonFlags::Primary(pointer::BUTTON2 | down(pointer::DOWN)),
            MouseButton::Middle => ButtonFlags::Primary(pointer::BUTTON3 | down(pointer::DOWN)),
            MouseButton::Side => {
                ButtonFlags::Extended(pointer_x::BUTTON1 | down(pointer_x::DOWN))
            }
            MouseButton::Extra => {
                ButtonFlags::Extended(pointer_x::BUTTON2 | down(pointer_x::DOWN))
            }
        }
    }
}

/// Scale a window position and narrow it to the wire fields
fn wire_position(scaler: &dyn CoordinateScaler, x: u32, y: u32) -> Result<(u16, u16)> {
    let (sx, sy) = scaler.scale(x, y, ScaleDirection::LocalToRemote)?;
    to_wire(sx, sy)
}

/// Pointer entered the window
pub fn handle_enter(
    sink: &mut dyn WireSink,
    scaler: &dyn CoordinateScaler,
    x: u32,
    y: u32,
) -> Result<()> {
    let (wx, wy) = wire_position(scaler, x, y)?;
    debug!("Pointer enter: local({}, {}) -> remote({}, {})", x, y, wx, wy);
    sink.send_mouse(pointer::MOVE, wx, wy)
}

/// Pointer moved inside the window
pub fn handle_motion(
    sink: &mut dyn WireSink,
    scaler: &dyn CoordinateScaler,
    x: u32,
    y: u32,
) -> Result<()> {
    let (wx, wy) = wire_position(scaler, x, y)?;
    debug!("Pointer motion: local({}, {}) -> remote({}, {})", x, y, wx, wy);
    sink.send_mouse(pointer::MOVE, wx, wy)
}

/// Button pressed or released
///
/// Buttons without a wire representation are dropped; that is not an error.
/// Returns whether a PDU was sent.
pub fn handle_button(
    sink: &mut dyn WireSink,
    scaler: &dyn CoordinateScaler,
    x: u32,
    y: u32,
    button: u32,
    pressed: bool,
) -> Result<bool> {
    let (wx, wy) = wire_position(scaler, x, y)?;

    let Some(mouse_button) = MouseButton::from_linux_button(button) else {
        debug!("Pointer button 0x{:X} has no wire mapping, dropped", button);
        return Ok(false);
    };

    debug!(
        "Pointer button: {:?} {} at remote({}, {})",
        mouse_button,
        if pressed { "down" } else { "up" },
        wx,
        wy
    );

    match mouse_button.wire_flags(pressed) {
        ButtonFlags::Primary(flags) => sink.send_mouse(flags, wx, wy)?,
        ButtonFlags::Extended(flags) => sink.send_extended_mouse(flags, wx, wy)?,
    }

    Ok(true)
}
