//! Input Event Translation
//!
//! Turns the input a Wayland compositor delivers to the client window into
//! RDP input PDUs for the remote session.
//!
//! # Features
//!
//! - **Pointer**
//!   - Enter and motion as absolute moves
//!   - Left, right and middle in TS_POINTER_EVENT; side and extra in TS_POINTERX_EVENT
//!   - Scroll bursts coalesced per `wl_pointer.frame`, split into wire-sized wheel steps
//!
//! - **Touch**
//!   - Up to [`touch::MAX_CONTACTS`] concurrent contacts
//!   - Native multi-touch channel when present, left-button emulation otherwise
//!   - Sub-pixel jitter suppressed
//!
//! - **Keyboard**
//!   - evdev keycode to set-1 scancode, extended keys flagged
//!   - Keyboard-grab release key
//!   - One-shot Caps/Num Lock synchronization after focus gain
//!
//! - **Smart-sizing**
//!   - Window <-> desktop coordinate scaling in both directions
//!
//! # Architecture
//!
//! ```text
//! Wayland input events
//!       ↓
//! ┌─────────────────────────┐
//! │  InputTranslator        │ ← Main coordinator
//! │  - Event routing        │
//! │  - Statistics tracking  │
//! └─────────────────────────┘
//!    ↓         ↓          ↓          ↓
//! ┌───────┐ ┌────────┐ ┌────────┐ ┌──────────┐
//! │ Mouse │ │  Axis  │ │ Touch  │ │ Keyboard │
//! │       │ │ Frame  │ │Tracker │ │ Handler  │
//! └───────┘ └────────┘ └────────┘ └──────────┘
//!    ↓         ↓          ↓          ↓
//! ┌─────────────────────┐ ┌────────────────┐
//! │ Coordinate scaler   │ │ Scancode Mapper│
//! │ Wheel quantizer     │ └────────────────┘
//! └─────────────────────┘
//!       ↓
//! WireSink / TouchChannel / SeatControl
//! ```
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use wl_rdp_input::input::{
//!     DesktopScaler, InputTranslator, RecordingSink, TranslatorOptions, WaylandInputEvent,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = RecordingSink::new();
//! let mut translator = InputTranslator::new(
//!     Box::new(DesktopScaler::new((960, 540), (1920, 1080))),
//!     TranslatorOptions::default(),
//! );
//! translator.attach_sink(Box::new(sink.clone()));
//!
//! translator.handle_event(WaylandInputEvent::PointerMotion { x: 100, y: 50 })?;
//! translator.handle_event(WaylandInputEvent::Key { key: 30, pressed: true })?;
//!
//! println!("Sent: {:?}", sink.events());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every operation returns `Result<T, InputError>`. [`classify_error`] sorts
//! failures; only [`ErrorClass::Downstream`] ones mean the session is gone.

// Core modules
pub mod axis;
pub mod coordinates;
pub mod error;
pub mod flags;
pub mod keyboard;
pub mod mapper;
pub mod mouse;
pub mod sink;
pub mod touch;
pub mod translator;
pub mod wheel;

// Re-export main types for convenience
pub use axis::{AxisEvent, AxisFrame, AxisSource, Fixed};
pub use coordinates::{CoordinateScaler, DesktopScaler, ScaleDirection};
pub use error::{classify_error, ErrorClass, InputError, Result};
pub use keyboard::{KeyboardHandler, LockState};
pub use mapper::{keycodes, ScancodeMapper};
pub use mouse::MouseButton;
pub use sink::{RecordedEvent, RecordingSink, RecordingTouchChannel, SeatControl, TouchChannel, WireSink};
pub use touch::{ContactMode, TouchTracker};
pub use translator::{InputTranslator, TranslatorOptions, WaylandInputEvent};
pub use wheel::ScrollAxis;
