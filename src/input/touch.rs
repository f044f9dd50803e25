//! Touch Contact Tracking
//!
//! Correlates `wl_touch` down/motion/up events by contact id in a table of
//! fixed capacity. Each contact is routed either to the multi-touch channel
//! or, when no channel was available at touch-down, emulated as a left-button
//! mouse drag (login screens run without the channel). The choice is made
//! once per contact and never revisited.

use tracing::debug;

use crate::input::coordinates::{scale_signed, signed_to_wire, CoordinateScaler, ScaleDirection};
use crate::input::error::{InputError, Result};
use crate::input::flags::pointer;
use crate::input::sink::{TouchChannel, WireSink};

/// Default number of simultaneous contacts
pub const MAX_CONTACTS: usize = 20;

/// How a contact reaches the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMode {
    /// Forwarded over the multi-touch channel
    Native,
    /// Translated into left-button mouse events
    EmulatedMouse,
}

/// One live touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    /// Compositor contact id (never 0)
    pub id: i32,
    /// Last known position (window pixels)
    pub x: f64,
    /// Last known position (window pixels)
    pub y: f64,
    /// Routing chosen at touch-down
    pub mode: ContactMode,
}

impl TouchContact {
    fn moved_to(&self, x: f64, y: f64) -> bool {
        (self.x - x).abs() >= f64::EPSILON || (self.y - y).abs() >= f64::EPSILON
    }
}

/// Fixed-capacity contact table
#[derive(Debug)]
pub struct TouchTracker {
    slots: Box<[Option<TouchContact>]>,
}

impl TouchTracker {
    /// Create a table with room for `capacity` contacts
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    /// Table capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live contacts
    pub fn active_contacts(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Contact id held by a slot; `0` for a free slot
    pub fn contact_id(&self, slot: usize) -> Option<i32> {
        self.slots.get(slot).map(|s| s.map_or(0, |c| c.id))
    }

    /// Live contact with this id
    pub fn contact(&self, id: i32) -> Option<&TouchContact> {
        self.slots.iter().flatten().find(|c| c.id == id)
    }

    fn slot_of(&self, id: i32) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| matches!(s, Some(c) if c.id == id))
    }

    /// Drop every contact (session teardown)
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Touch down
    ///
    /// `channel` is the multi-touch channel as it is right now; its presence
    /// decides the contact's mode for good.
    pub fn begin(
        &mut self,
        sink: &mut dyn WireSink,
        scaler: &dyn CoordinateScaler,
        channel: Option<&mut dyn TouchChannel>,
        id: i32,
        x: f64,
        y: f64,
    ) -> Result<ContactMode> {
        if id == 0 || self.slot_of(id).is_some() {
            return Err(InputError::InvalidContact(id));
        }

        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(InputError::ContactTableFull {
                capacity: self.capacity(),
            })?;

        let (sx, sy) = scale_signed(scaler, x as i32, y as i32, ScaleDirection::LocalToRemote)?;

        let mode = match channel {
            None => {
                // Narrowed before the slot is taken: no press, no contact.
                let (wx, wy) = signed_to_wire(sx, sy)?;
                self.slots[slot] = Some(TouchContact {
                    id,
                    x,
                    y,
                    mode: ContactMode::EmulatedMouse,
                });
                sink.send_mouse(pointer::DOWN | pointer::MOVE | pointer::BUTTON1, wx, wy)?;
                ContactMode::EmulatedMouse
            }
            Some(channel) => {
                self.slots[slot] = Some(TouchContact {
                    id,
                    x,
                    y,
                    mode: ContactMode::Native,
                });
                let assigned = channel.touch_begin(id, sx, sy)?;
                debug!("Touch channel assigned contact {} to id {}", assigned, id);
                ContactMode::Native
            }
        };

        debug!(
            "Touch down: id={} slot={} local({:.1}, {:.1}) remote({}, {}) mode={:?}",
            id, slot, x, y, sx, sy, mode
        );

        Ok(mode)
    }

    /// Touch motion
    ///
    /// Returns whether anything was sent; sub-epsilon moves are swallowed.
    pub fn motion(
        &mut self,
        sink: &mut dyn WireSink,
        scaler: &dyn CoordinateScaler,
        channel: Option<&mut dyn TouchChannel>,
        id: i32,
        x: f64,
        y: f64,
    ) -> Result<bool> {
        let slot = self.slot_of(id).ok_or(InputError::ContactNotFound(id))?;
        let Some(contact) = self.slots[slot].as_mut() else {
            return Err(InputError::ContactNotFound(id));
        };

        if !contact.moved_to(x, y) {
            return Ok(false);
        }
        contact.x = x;
        contact.y = y;
        let mode = contact.mode;

        let (sx, sy) = scale_signed(scaler, x as i32, y as i32, ScaleDirection::LocalToRemote)?;
        debug!(
            "Touch motion: id={} local({:.1}, {:.1}) remote({}, {})",
            id, x, y, sx, sy
        );

        match (mode, channel) {
            (ContactMode::EmulatedMouse, _) => {
                let (wx, wy) = signed_to_wire(sx, sy)?;
                sink.send_mouse(pointer::MOVE, wx, wy)?;
            }
            (ContactMode::Native, Some(channel)) => {
                channel.touch_update(id, sx, sy)?;
            }
            (ContactMode::Native, None) => return Err(InputError::TouchChannelUnavailable(id)),
        }

        Ok(true)
    }

    /// Touch up
    pub fn end(
        &mut self,
        sink: &mut dyn WireSink,
        scaler: &dyn CoordinateScaler,
        channel: Option<&mut dyn TouchChannel>,
        id: i32,
    ) -> Result<()> {
        let contact = self
            .slot_of(id)
            .and_then(|slot| self.slots[slot].take())
            .ok_or(InputError::ContactNotFound(id))?;

        let (sx, sy) = scale_signed(
            scaler,
            contact.x as i32,
            contact.y as i32,
            ScaleDirection::LocalToRemote,
        )?;
        debug!("Touch up: id={} remote({}, {})", id, sx, sy);

        match (contact.mode, channel) {
            (ContactMode::EmulatedMouse, _) => {
                let (wx, wy) = signed_to_wire(sx, sy)?;
                sink.send_mouse(pointer::BUTTON1, wx, wy)
            }
            (ContactMode::Native, Some(channel)) => channel.touch_end(id, sx, sy).map(|_| ()),
            (ContactMode::Native, None) => Err(InputError::TouchChannelUnavailable(id)),
        }
    }
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(MAX_CONTACTS)
    }
}
