//! Collaborator contracts
//!
//! The translator never talks to a transport directly. Wire messages go out
//! through [`WireSink`], multi-touch contacts through an optional
//! [`TouchChannel`], and the keyboard-grab release through [`SeatControl`].
//!
//! [`RecordingSink`] implements all three on top of one shared, ordered log.
//! It backs the replay tool and the integration tests.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::trace;

use crate::input::error::{InputError, Result};

/// Wire-protocol send primitives of an established session
#[cfg_attr(test, mockall::automock)]
pub trait WireSink: Send {
    /// Send a TS_POINTER_EVENT
    fn send_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()>;

    /// Send a TS_POINTERX_EVENT
    fn send_extended_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()>;

    /// Send a keyboard event; `scancode` carries `KBDEXT` for extended keys
    fn send_keyboard(&mut self, pressed: bool, scancode: u16) -> Result<()>;

    /// Send the focus-in synchronize event with the current lock state
    fn send_focus_in(&mut self, lock_flags: u16) -> Result<()>;
}

/// Multi-touch virtual channel (RDPEI)
///
/// Each call returns the contact id assigned by the channel.
#[cfg_attr(test, mockall::automock)]
pub trait TouchChannel: Send {
    /// A new contact touched down
    fn touch_begin(&mut self, id: i32, x: i32, y: i32) -> Result<i32>;

    /// A live contact moved
    fn touch_update(&mut self, id: i32, x: i32, y: i32) -> Result<i32>;

    /// A live contact lifted
    fn touch_end(&mut self, id: i32, x: i32, y: i32) -> Result<i32>;
}

/// Seat-level requests to the compositor
#[cfg_attr(test, mockall::automock)]
pub trait SeatControl: Send {
    /// Enable or disable keyboard shortcut inhibition
    fn inhibit_shortcuts(&mut self, inhibit: bool) -> Result<()>;
}

/// One entry of a [`RecordingSink`] log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordedEvent {
    /// TS_POINTER_EVENT
    Mouse {
        /// Pointer flags
        flags: u16,
        /// Remote X
        x: u16,
        /// Remote Y
        y: u16,
    },
    /// TS_POINTERX_EVENT
    ExtendedMouse {
        /// Extended pointer flags
        flags: u16,
        /// Remote X
        x: u16,
        /// Remote Y
        y: u16,
    },
    /// Keyboard scancode event
    Keyboard {
        /// Key pressed (true) or released (false)
        pressed: bool,
        /// RDP scancode
        scancode: u16,
    },
    /// Focus-in synchronize event
    FocusIn {
        /// Lock state flags
        lock_flags: u16,
    },
    /// Touch channel: contact down
    TouchBegin {
        /// Contact id
        id: i32,
        /// Remote X
        x: i32,
        /// Remote Y
        y: i32,
    },
    /// Touch channel: contact moved
    TouchUpdate {
        /// Contact id
        id: i32,
        /// Remote X
        x: i32,
        /// Remote Y
        y: i32,
    },
    /// Touch channel: contact lifted
    TouchEnd {
        /// Contact id
        id: i32,
        /// Remote X
        x: i32,
        /// Remote Y
        y: i32,
    },
    /// Seat shortcut inhibition changed
    InhibitShortcuts {
        /// New inhibition state
        inhibit: bool,
    },
}

impl RecordedEvent {
    /// Whether this entry is an RDP input PDU (not a channel or seat call)
    pub fn is_wire_event(&self) -> bool {
        matches!(
            self,
            RecordedEvent::Mouse { .. }
                | RecordedEvent::ExtendedMouse { .. }
                | RecordedEvent::Keyboard { .. }
                | RecordedEvent::FocusIn { .. }
        )
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    events: Vec<RecordedEvent>,
    /// Remaining successful calls before every call fails
    budget: Option<usize>,
}

/// In-memory collaborator that records everything it is asked to send
///
/// Clones share the same log, so a sink and the touch channel obtained from
/// [`RecordingSink::touch_channel`] interleave their entries in call order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Let the next `calls` calls succeed and fail every call after them
    pub fn fail_after(&self, calls: usize) {
        self.state.lock().budget = Some(calls);
    }

    /// Touch channel sharing this recorder's log
    pub fn touch_channel(&self) -> RecordingTouchChannel {
        RecordingTouchChannel {
            sink: self.clone(),
        }
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.state.lock().events.clone()
    }

    /// Remove and return everything recorded so far
    pub fn take_events(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.state.lock().events)
    }

    /// Number of recorded wire PDUs
    pub fn wire_event_count(&self) -> usize {
        self.state
            .lock()
            .events
            .iter()
            .filter(|e| e.is_wire_event())
            .count()
    }

    fn record(&self, what: &'static str, event: RecordedEvent) -> Result<()> {
        let mut state = self.state.lock();

        if let Some(budget) = state.budget.as_mut() {
            if *budget == 0 {
                return Err(InputError::send_failed(what, "recording sink closed"));
            }
            *budget -= 1;
        }

        trace!(?event, "recorded");
        state.events.push(event);
        Ok(())
    }
}

impl WireSink for RecordingSink {
    fn send_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()> {
        self.record("mouse event", RecordedEvent::Mouse { flags, x, y })
    }

    fn send_extended_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()> {
        self.record(
            "extended mouse event",
            RecordedEvent::ExtendedMouse { flags, x, y },
        )
    }

    fn send_keyboard(&mut self, pressed: bool, scancode: u16) -> Result<()> {
        self.record(
            "keyboard event",
            RecordedEvent::Keyboard { pressed, scancode },
        )
    }

    fn send_focus_in(&mut self, lock_flags: u16) -> Result<()> {
        self.record("focus-in event", RecordedEvent::FocusIn { lock_flags })
    }
}

impl SeatControl for RecordingSink {
    fn inhibit_shortcuts(&mut self, inhibit: bool) -> Result<()> {
        self.record(
            "shortcut inhibit request",
            RecordedEvent::InhibitShortcuts { inhibit },
        )
        .map_err(|e| InputError::Seat(e.to_string()))
    }
}

/// Touch channel half of a [`RecordingSink`]
///
/// Echoes the caller's id back as the channel-assigned id.
#[derive(Debug, Clone)]
pub struct RecordingTouchChannel {
    sink: RecordingSink,
}

impl RecordingTouchChannel {
    fn record(&self, event: RecordedEvent, id: i32) -> Result<i32> {
        self.sink
            .record("touch contact", event)
            .map(|()| id)
            .map_err(|e| InputError::TouchChannel(e.to_string()))
    }
}

impl TouchChannel for RecordingTouchChannel {
    fn touch_begin(&mut self, id: i32, x: i32, y: i32) -> Result<i32> {
        self.record(RecordedEvent::TouchBegin { id, x, y }, id)
    }

    fn touch_update(&mut self, id: i32, x: i32, y: i32) -> Result<i32> {
        self.record(RecordedEvent::TouchUpdate { id, x, y }, id)
    }

    fn touch_end(&mut self, id: i32, x: i32, y: i32) -> Result<i32> {
        self.record(RecordedEvent::TouchEnd { id, x, y }, id)
    }
}
