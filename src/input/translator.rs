//! Input Event Translator
//!
//! Top-level coordinator: receives one Wayland input event at a time and
//! routes it to the pointer, axis, touch or keyboard handler, which emit
//! RDP input PDUs through the attached [`WireSink`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::axis::{AxisEvent, AxisFrame, AxisSource, Fixed};
use crate::input::coordinates::CoordinateScaler;
use crate::input::error::{InputError, Result};
use crate::input::keyboard::{KeyboardHandler, LockState};
use crate::input::mapper::keycodes;
use crate::input::mouse;
use crate::input::sink::{SeatControl, TouchChannel, WireSink};
use crate::input::touch::{TouchTracker, MAX_CONTACTS};
use crate::input::wheel::ScrollAxis;

/// Wayland input events consumed by the translator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaylandInputEvent {
    /// `wl_pointer.enter`
    PointerEnter {
        /// Surface-local X
        x: u32,
        /// Surface-local Y
        y: u32,
    },
    /// `wl_pointer.motion`
    PointerMotion {
        /// Surface-local X
        x: u32,
        /// Surface-local Y
        y: u32,
    },
    /// `wl_pointer.button`
    PointerButton {
        /// Surface-local X
        x: u32,
        /// Surface-local Y
        y: u32,
        /// evdev button code
        button: u32,
        /// Pressed (true) or released (false)
        pressed: bool,
    },
    /// `wl_pointer.axis`
    PointerAxis {
        /// Surface-local X
        x: u32,
        /// Surface-local Y
        y: u32,
        /// Scroll axis
        axis: ScrollAxis,
        /// Scroll distance
        value: f64,
    },
    /// `wl_pointer.axis_discrete`
    PointerAxisDiscrete {
        /// Surface-local X
        x: u32,
        /// Surface-local Y
        y: u32,
        /// Scroll axis
        axis: ScrollAxis,
        /// Notch count
        steps: i32,
    },
    /// `wl_pointer.axis_source`
    PointerAxisSource {
        /// Source device kind
        source: AxisSource,
    },
    /// `wl_pointer.frame`
    PointerFrame,
    /// `wl_keyboard.key`
    Key {
        /// evdev keycode
        key: u32,
        /// Pressed (true) or released (false)
        pressed: bool,
    },
    /// `wl_keyboard.enter`
    KeyboardEnter,
    /// `wl_keyboard.modifiers`
    Modifiers {
        /// Combined modifier mask (depressed | latched | locked)
        mask: u32,
    },
    /// `wl_touch.down`
    TouchDown {
        /// Contact id
        id: i32,
        /// Surface-local X
        x: f64,
        /// Surface-local Y
        y: f64,
    },
    /// `wl_touch.motion`
    TouchMotion {
        /// Contact id
        id: i32,
        /// Surface-local X
        x: f64,
        /// Surface-local Y
        y: f64,
    },
    /// `wl_touch.up`
    TouchUp {
        /// Contact id
        id: i32,
    },
}

/// Translator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Keyboard grab active (shortcuts inhibited)
    pub grab_keyboard: bool,
    /// evdev key that releases the grab
    pub release_key: u32,
    /// Touch contact table size
    pub max_contacts: usize,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            grab_keyboard: false,
            release_key: keycodes::KEY_RIGHTCTRL,
            max_contacts: MAX_CONTACTS,
        }
    }
}

/// Counts successful sends on the way through
struct CountingSink<'a> {
    inner: &'a mut dyn WireSink,
    sent: u64,
}

impl<'a> CountingSink<'a> {
    fn new(inner: &'a mut dyn WireSink) -> Self {
        Self { inner, sent: 0 }
    }

    fn count<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.sent += 1;
        }
        result
    }
}

impl WireSink for CountingSink<'_> {
    fn send_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()> {
        let result = self.inner.send_mouse(flags, x, y);
        self.count(result)
    }

    fn send_extended_mouse(&mut self, flags: u16, x: u16, y: u16) -> Result<()> {
        let result = self.inner.send_extended_mouse(flags, x, y);
        self.count(result)
    }

    fn send_keyboard(&mut self, pressed: bool, scancode: u16) -> Result<()> {
        let result = self.inner.send_keyboard(pressed, scancode);
        self.count(result)
    }

    fn send_focus_in(&mut self, lock_flags: u16) -> Result<()> {
        let result = self.inner.send_focus_in(lock_flags);
        self.count(result)
    }
}

fn touch_channel(channel: &mut Option<Box<dyn TouchChannel>>) -> Option<&mut dyn TouchChannel> {
    match channel {
        Some(channel) => Some(channel.as_mut()),
        None => None,
    }
}

fn seat_control(seat: &mut Option<Box<dyn SeatControl>>) -> Option<&mut dyn SeatControl> {
    match seat {
        Some(seat) => Some(seat.as_mut()),
        None => None,
    }
}

/// Input event translator
pub struct InputTranslator {
    /// Window <-> desktop coordinate mapping
    scaler: Box<dyn CoordinateScaler>,

    /// Session input PDU sink; `None` while no session is attached
    sink: Option<Box<dyn WireSink>>,

    /// Multi-touch channel, when the server opened one
    touch_channel: Option<Box<dyn TouchChannel>>,

    /// Compositor seat, for releasing the keyboard grab
    seat: Option<Box<dyn SeatControl>>,

    /// Keyboard and focus state
    keyboard: KeyboardHandler,

    /// Scroll events of the current pointer frame
    axis_frame: AxisFrame,

    /// Live touch contacts
    touch: TouchTracker,

    /// Total events processed
    events_processed: u64,

    /// Total PDUs handed to the sink successfully
    wire_events_sent: u64,
}

impl InputTranslator {
    /// Create a translator with no session attached
    pub fn new(scaler: Box<dyn CoordinateScaler>, options: TranslatorOptions) -> Self {
        let mut keyboard = KeyboardHandler::new();
        keyboard.set_grab(options.grab_keyboard, options.release_key);

        Self {
            scaler,
            sink: None,
            touch_channel: None,
            seat: None,
            keyboard,
            axis_frame: AxisFrame::new(),
            touch: TouchTracker::new(options.max_contacts),
            events_processed: 0,
            wire_events_sent: 0,
        }
    }

    /// Bind to a session's input sink
    pub fn attach_sink(&mut self, sink: Box<dyn WireSink>) {
        self.sink = Some(sink);
    }

    /// Unbind from the session; buffered scroll and live contacts are dropped
    pub fn detach_sink(&mut self) -> Option<Box<dyn WireSink>> {
        self.axis_frame = AxisFrame::new();
        self.touch.reset();
        self.sink.take()
    }

    /// Whether a session sink is attached
    pub fn is_connected(&self) -> bool {
        self.sink.is_some()
    }

    /// Install or remove the multi-touch channel
    ///
    /// Contacts already down keep the mode they started with.
    pub fn set_touch_channel(&mut self, channel: Option<Box<dyn TouchChannel>>) {
        self.touch_channel = channel;
    }

    /// Install or remove the seat used for keyboard-grab release
    pub fn set_seat(&mut self, seat: Option<Box<dyn SeatControl>>) {
        self.seat = seat;
    }

    /// Enter or leave keyboard grab mode
    pub fn set_grab(&mut self, grab_keyboard: bool, release_key: u32) {
        self.keyboard.set_grab(grab_keyboard, release_key);
    }

    /// Replace the coordinate scaler (window resized, smart-sizing toggled)
    pub fn set_scaler(&mut self, scaler: Box<dyn CoordinateScaler>) {
        self.scaler = scaler;
    }

    /// Translate one event
    pub fn handle_event(&mut self, event: WaylandInputEvent) -> Result<()> {
        match event {
            WaylandInputEvent::PointerEnter { x, y } => self.pointer_enter(x, y),
            WaylandInputEvent::PointerMotion { x, y } => self.pointer_motion(x, y),
            WaylandInputEvent::PointerButton {
                x,
                y,
                button,
                pressed,
            } => self.pointer_button(x, y, button, pressed),
            WaylandInputEvent::PointerAxis { x, y, axis, value } => {
                self.pointer_axis(x, y, axis, Fixed::from_f64(value))
            }
            WaylandInputEvent::PointerAxisDiscrete { x, y, axis, steps } => {
                self.pointer_axis_discrete(x, y, axis, steps)
            }
            WaylandInputEvent::PointerAxisSource { source } => self.pointer_axis_source(source),
            WaylandInputEvent::PointerFrame => self.pointer_frame(),
            WaylandInputEvent::Key { key, pressed } => self.key(key, pressed),
            WaylandInputEvent::KeyboardEnter => self.keyboard_enter(),
            WaylandInputEvent::Modifiers { mask } => self.modifiers(LockState::from_mask(mask)),
            WaylandInputEvent::TouchDown { id, x, y } => self.touch_down(id, x, y),
            WaylandInputEvent::TouchMotion { id, x, y } => self.touch_motion(id, x, y),
            WaylandInputEvent::TouchUp { id } => self.touch_up(id),
        }
    }

    /// Run `f` against the attached sink, counting what it sends
    fn with_sink<T>(
        &mut self,
        f: impl FnOnce(&mut CountingSink<'_>, &mut Parts<'_>) -> Result<T>,
    ) -> Result<T> {
        self.events_processed += 1;

        let sink = self.sink.as_deref_mut().ok_or(InputError::NotConnected)?;
        let mut counting = CountingSink::new(sink);
        let mut parts = Parts {
            scaler: self.scaler.as_ref(),
            touch_channel: touch_channel(&mut self.touch_channel),
            seat: seat_control(&mut self.seat),
            keyboard: &mut self.keyboard,
            axis_frame: &mut self.axis_frame,
            touch: &mut self.touch,
        };

        let result = f(&mut counting, &mut parts);
        self.wire_events_sent += counting.sent;
        result
    }

    /// Buffer one scroll event for the current frame
    fn buffer_axis(&mut self, event: AxisEvent) -> Result<()> {
        self.events_processed += 1;
        if self.sink.is_none() {
            return Err(InputError::NotConnected);
        }
        self.axis_frame.push(event);
        Ok(())
    }

    /// `wl_pointer.enter`
    pub fn pointer_enter(&mut self, x: u32, y: u32) -> Result<()> {
        self.with_sink(|sink, parts| mouse::handle_enter(sink, parts.scaler, x, y))
    }

    /// `wl_pointer.motion`
    pub fn pointer_motion(&mut self, x: u32, y: u32) -> Result<()> {
        self.with_sink(|sink, parts| mouse::handle_motion(sink, parts.scaler, x, y))
    }

    /// `wl_pointer.button`
    pub fn pointer_button(&mut self, x: u32, y: u32, button: u32, pressed: bool) -> Result<()> {
        self.with_sink(|sink, parts| {
            mouse::handle_button(sink, parts.scaler, x, y, button, pressed).map(|_| ())
        })
    }

    /// `wl_pointer.axis`: buffered until the frame closes
    pub fn pointer_axis(&mut self, x: u32, y: u32, axis: ScrollAxis, value: Fixed) -> Result<()> {
        self.buffer_axis(AxisEvent::Continuous { x, y, axis, value })
    }

    /// `wl_pointer.axis_discrete`: buffered until the frame closes
    pub fn pointer_axis_discrete(
        &mut self,
        x: u32,
        y: u32,
        axis: ScrollAxis,
        steps: i32,
    ) -> Result<()> {
        self.buffer_axis(AxisEvent::Discrete { x, y, axis, steps })
    }

    /// `wl_pointer.axis_source`: buffered until the frame closes
    pub fn pointer_axis_source(&mut self, source: AxisSource) -> Result<()> {
        self.buffer_axis(AxisEvent::Source(source))
    }

    /// `wl_pointer.frame`: resolve and send the buffered scroll
    ///
    /// The buffer is empty afterwards whatever the outcome.
    pub fn pointer_frame(&mut self) -> Result<()> {
        let result =
            self.with_sink(|sink, parts| parts.axis_frame.finish(sink, parts.scaler).map(|_| ()));
        if !self.axis_frame.is_empty() {
            debug!("Dropping {} scroll events at frame end", self.axis_frame.len());
            self.axis_frame = AxisFrame::new();
        }
        result
    }

    /// `wl_keyboard.key`
    pub fn key(&mut self, key: u32, pressed: bool) -> Result<()> {
        self.with_sink(|sink, parts| {
            let seat = parts.seat.take();
            parts.keyboard.handle_key(sink, seat, key, pressed).map(|_| ())
        })
    }

    /// `wl_keyboard.enter`
    pub fn keyboard_enter(&mut self) -> Result<()> {
        self.events_processed += 1;
        debug!("Keyboard focus gained, lock sync pending");
        self.keyboard.handle_focus_gained();
        Ok(())
    }

    /// `wl_keyboard.modifiers`
    pub fn modifiers(&mut self, locks: LockState) -> Result<()> {
        self.with_sink(|sink, parts| parts.keyboard.handle_modifiers(sink, locks).map(|_| ()))
    }

    /// `wl_touch.down`
    pub fn touch_down(&mut self, id: i32, x: f64, y: f64) -> Result<()> {
        self.with_sink(|sink, parts| {
            let channel = parts.touch_channel.take();
            parts
                .touch
                .begin(sink, parts.scaler, channel, id, x, y)
                .map(|_| ())
        })
    }

    /// `wl_touch.motion`
    pub fn touch_motion(&mut self, id: i32, x: f64, y: f64) -> Result<()> {
        self.with_sink(|sink, parts| {
            let channel = parts.touch_channel.take();
            parts
                .touch
                .motion(sink, parts.scaler, channel, id, x, y)
                .map(|_| ())
        })
    }

    /// `wl_touch.up`
    pub fn touch_up(&mut self, id: i32) -> Result<()> {
        self.with_sink(|sink, parts| {
            let channel = parts.touch_channel.take();
            parts.touch.end(sink, parts.scaler, channel, id)
        })
    }

    /// Total events processed
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Total PDUs sent
    pub fn wire_events_sent(&self) -> u64 {
        self.wire_events_sent
    }

    /// Live touch contacts
    pub fn touch_tracker(&self) -> &TouchTracker {
        &self.touch
    }

    /// Scroll events waiting for the frame marker
    pub fn pending_axis_events(&self) -> usize {
        self.axis_frame.len()
    }

    /// Whether a focus sync is owed
    pub fn focus_pending(&self) -> bool {
        self.keyboard.focus_pending()
    }
}

/// Borrowed translator state handed to a handler alongside the sink
struct Parts<'a> {
    scaler: &'a dyn CoordinateScaler,
    touch_channel: Option<&'a mut dyn TouchChannel>,
    seat: Option<&'a mut dyn SeatControl>,
    keyboard: &'a mut KeyboardHandler,
    axis_frame: &'a mut AxisFrame,
    touch: &'a mut TouchTracker,
}
