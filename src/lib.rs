//! # wl-rdp-input
//!
//! Input translation layer of a Wayland RDP client.
//!
//! Converts what the compositor reports to the client window (pointer
//! motion and buttons, scroll frames, touch contacts, keys and lock state)
//! into RDP input PDUs for the remote session.
//!
//! # Architecture
//!
//! ```text
//! wl-rdp-input
//!   ├─> Input Translator (event routing, statistics)
//!   │     ├─> Pointer / Axis Frame / Touch / Keyboard handlers
//!   │     └─> Coordinate Scaler (smart-sizing)
//!   ├─> Config (TOML)
//!   └─> Replay (JSON-lines traces through a recording sink)
//! ```
//!
//! # Data Flow
//!
//! **Input Path:** Compositor → Wayland events → InputTranslator → WireSink → Session
//!
//! **Touch Path:** Compositor → TouchTracker → TouchChannel, or WireSink when emulated

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Client configuration
pub mod config;

/// Input event translation
pub mod input;

/// Trace replay
pub mod replay;

/// Utility functions
pub mod utils;
