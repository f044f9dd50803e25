//! Keyboard Event Handling
//!
//! Translates `wl_keyboard` key events to RDP scancodes, releases the
//! keyboard grab on the configured key, and synchronizes lock state once
//! after the window gains keyboard focus.

use tracing::{debug, warn};

use crate::input::error::Result;
use crate::input::flags::{pointer, sync};
use crate::input::mapper::{keycodes, ScancodeMapper, X11_KEYCODE_OFFSET};
use crate::input::sink::{SeatControl, WireSink};

/// Compositor modifier mask bits (xkb default modifier indices)
pub mod modifier_mask {
    /// Shift
    pub const SHIFT: u32 = 0x01;
    /// Caps Lock
    pub const CAPS: u32 = 0x02;
    /// Control
    pub const CTRL: u32 = 0x04;
    /// Alt (Mod1)
    pub const ALT: u32 = 0x08;
    /// Num Lock (Mod2)
    pub const NUM: u32 = 0x10;
    /// Super (Mod4)
    pub const LOGO: u32 = 0x40;
}

/// Lock keys reported by a modifiers event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockState {
    /// Caps Lock active
    pub caps_lock: bool,
    /// Num Lock active
    pub num_lock: bool,
}

impl LockState {
    /// Extract lock state from a compositor modifier mask
    pub fn from_mask(mask: u32) -> Self {
        Self {
            caps_lock: mask & modifier_mask::CAPS != 0,
            num_lock: mask & modifier_mask::NUM != 0,
        }
    }

    /// Synchronize-event toggle flags
    pub fn sync_flags(self) -> u16 {
        let mut flags = 0;
        if self.caps_lock {
            flags |= sync::CAPS_LOCK;
        }
        if self.num_lock {
            flags |= sync::NUM_LOCK;
        }
        flags
    }
}

/// Keyboard translator
#[derive(Debug)]
pub struct KeyboardHandler {
    /// Keycode mapper
    mapper: ScancodeMapper,

    /// Whether the window holds a keyboard grab (shortcuts inhibited)
    grab_keyboard: bool,

    /// evdev key that releases the grab
    release_key: u32,

    /// Set on focus gain, consumed by the next modifiers event
    focus_pending: bool,
}

impl KeyboardHandler {
    /// Create a handler without keyboard grab
    pub fn new() -> Self {
        Self {
            mapper: ScancodeMapper::new(),
            grab_keyboard: false,
            release_key: keycodes::KEY_RIGHTCTRL,
            focus_pending: false,
        }
    }

    /// Enable or disable grab mode and choose its release key
    pub fn set_grab(&mut self, grab_keyboard: bool, release_key: u32) {
        self.grab_keyboard = grab_keyboard;
        self.release_key = release_key;
    }

    /// Whether grab mode is on
    pub fn is_grabbing(&self) -> bool {
        self.grab_keyboard
    }

    /// Whether a focus synchronization is owed
    pub fn focus_pending(&self) -> bool {
        self.focus_pending
    }

    /// Key pressed or released; `raw_key` is the evdev keycode
    ///
    /// Returns whether a keyboard PDU was sent.
    pub fn handle_key(
        &mut self,
        sink: &mut dyn WireSink,
        seat: Option<&mut dyn SeatControl>,
        raw_key: u32,
        pressed: bool,
    ) -> Result<bool> {
        if self.grab_keyboard && raw_key == self.release_key {
            self.release_grab(seat);
        }

        let Some(scancode) = self
            .mapper
            .scancode_for_x11_keycode(raw_key.saturating_add(X11_KEYCODE_OFFSET))
        else {
            debug!("Key {} has no scancode, dropped", raw_key);
            return Ok(false);
        };

        debug!(
            "Key {}: evdev={} scancode=0x{:03X}",
            if pressed { "down" } else { "up" },
            raw_key,
            scancode
        );

        sink.send_keyboard(pressed, scancode)?;
        Ok(true)
    }

    fn release_grab(&mut self, seat: Option<&mut dyn SeatControl>) {
        let Some(seat) = seat else {
            warn!("Grab release key pressed but no seat to release");
            return;
        };

        match seat.inhibit_shortcuts(false) {
            Ok(()) => debug!("Keyboard grab released"),
            Err(e) => warn!("Failed to release keyboard grab: {}", e),
        }
    }

    /// Keyboard focus entered the window
    pub fn handle_focus_gained(&mut self) {
        self.focus_pending = true;
    }

    /// Modifier state changed
    ///
    /// Only the first notification after a focus gain is forwarded, as a
    /// focus-in carrying the lock state followed by a pointer move to the
    /// origin. Returns whether anything was sent.
    pub fn handle_modifiers(&mut self, sink: &mut dyn WireSink, locks: LockState) -> Result<bool> {
        let flags = locks.sync_flags();

        if !self.focus_pending {
            return Ok(false);
        }
        self.focus_pending = false;

        debug!("Focus sync: lock flags 0x{:04X}", flags);

        sink.send_focus_in(flags)?;
        sink.send_mouse(pointer::MOVE, 0, 0)?;
        Ok(true)
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}
