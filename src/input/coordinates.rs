//! Coordinate Scaling
//!
//! Maps between the local window's pixel space and the remote desktop's
//! pixel space. With smart-sizing off both spaces are the same; with it on,
//! the desktop is stretched to the window and pointer positions have to be
//! scaled back before they go on the wire.

use crate::input::error::{InputError, Result};
use tracing::trace;

/// Direction of a scaling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDirection {
    /// Window pixels to remote desktop pixels
    LocalToRemote,
    /// Remote desktop pixels to window pixels
    RemoteToLocal,
}

/// Bidirectional mapping between window and remote desktop coordinates
///
/// Implementations must return values strictly below `i32::MAX`.
#[cfg_attr(test, mockall::automock)]
pub trait CoordinateScaler: Send {
    /// Scale an unsigned point
    fn scale(&self, x: u32, y: u32, direction: ScaleDirection) -> Result<(u32, u32)>;
}

/// Scale a signed point (touch positions arrive signed)
///
/// Negative input is rejected before it reaches the scaler.
pub fn scale_signed(
    scaler: &dyn CoordinateScaler,
    x: i32,
    y: i32,
    direction: ScaleDirection,
) -> Result<(i32, i32)> {
    let (ux, uy) = match (u32::try_from(x), u32::try_from(y)) {
        (Ok(ux), Ok(uy)) => (ux, uy),
        _ => return Err(InputError::NegativeCoordinate(x, y)),
    };

    let (sx, sy) = scaler.scale(ux, uy, direction)?;

    match (i32::try_from(sx), i32::try_from(sy)) {
        (Ok(sx), Ok(sy)) if sx < i32::MAX && sy < i32::MAX => Ok((sx, sy)),
        _ => Err(InputError::ScalingFailed(format!(
            "scaled point ({}, {}) exceeds signed range",
            sx, sy
        ))),
    }
}

/// Narrow a scaled point to the 16-bit wire fields
pub fn to_wire(x: u32, y: u32) -> Result<(u16, u16)> {
    match (u16::try_from(x), u16::try_from(y)) {
        (Ok(wx), Ok(wy)) => Ok((wx, wy)),
        _ => Err(InputError::CoordinateOutOfRange(x, y)),
    }
}

/// Narrow a signed scaled point to the 16-bit wire fields
pub fn signed_to_wire(x: i32, y: i32) -> Result<(u16, u16)> {
    match (u16::try_from(x), u16::try_from(y)) {
        (Ok(wx), Ok(wy)) => Ok((wx, wy)),
        _ => Err(InputError::CoordinateOutOfRange(x as u32, y as u32)),
    }
}

/// Smart-sizing scaler between a window and a remote desktop
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopScaler {
    smart_sizing: bool,
    window_width: u32,
    window_height: u32,
    desktop_width: u32,
    desktop_height: u32,
}

impl DesktopScaler {
    /// Scaler that stretches a `desktop`-sized session into a `window`
    pub fn new(window: (u32, u32), desktop: (u32, u32)) -> Self {
        Self {
            smart_sizing: true,
            window_width: window.0,
            window_height: window.1,
            desktop_width: desktop.0,
            desktop_height: desktop.1,
        }
    }

    /// Scaler for sessions shown 1:1 (smart-sizing off)
    pub fn identity() -> Self {
        Self {
            smart_sizing: false,
            window_width: 0,
            window_height: 0,
            desktop_width: 0,
            desktop_height: 0,
        }
    }

    /// Track a window resize
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Track a remote desktop resize
    pub fn set_desktop_size(&mut self, width: u32, height: u32) {
        self.desktop_width = width;
        self.desktop_height = height;
    }

    /// Whether smart-sizing is active
    pub fn is_smart_sizing(&self) -> bool {
        self.smart_sizing
    }

    /// Window-to-desktop ratios (sx, sy)
    fn ratios(&self) -> Result<(f64, f64)> {
        if self.window_width == 0
            || self.window_height == 0
            || self.desktop_width == 0
            || self.desktop_height == 0
        {
            return Err(InputError::ScalingFailed(format!(
                "degenerate geometry: window {}x{}, desktop {}x{}",
                self.window_width, self.window_height, self.desktop_width, self.desktop_height
            )));
        }

        Ok((
            self.window_width as f64 / self.desktop_width as f64,
            self.window_height as f64 / self.desktop_height as f64,
        ))
    }
}

impl Default for DesktopScaler {
    fn default() -> Self {
        Self::identity()
    }
}

fn checked_component(value: f64) -> Result<u32> {
    // Truncate toward zero.
    let value = value.trunc();
    if !(0.0..(i32::MAX as f64)).contains(&value) {
        return Err(InputError::ScalingFailed(format!(
            "scaled coordinate {} out of range",
            value
        )));
    }
    Ok(value as u32)
}

impl CoordinateScaler for DesktopScaler {
    fn scale(&self, x: u32, y: u32, direction: ScaleDirection) -> Result<(u32, u32)> {
        if !self.smart_sizing {
            if x >= i32::MAX as u32 || y >= i32::MAX as u32 {
                return Err(InputError::ScalingFailed(format!(
                    "coordinate ({}, {}) out of range",
                    x, y
                )));
            }
            return Ok((x, y));
        }

        let (sx, sy) = self.ratios()?;
        let (fx, fy) = match direction {
            ScaleDirection::LocalToRemote => (x as f64 / sx, y as f64 / sy),
            ScaleDirection::RemoteToLocal => (x as f64 * sx, y as f64 * sy),
        };

        let scaled = (checked_component(fx)?, checked_component(fy)?);
        trace!("Scale {:?}: ({}, {}) -> {:?}", direction, x, y, scaled);
        Ok(scaled)
    }
}
