//! Utility Functions
//!
//! User-friendly error formatting for the replay tool.
//!
//! ## Error Formatting
//!
//! The [`errors`] module provides user-friendly error messages:
//!
//! ```rust,no_run
//! use wl_rdp_input::utils::format_user_error;
//!
//! # fn operation() -> anyhow::Result<()> { Ok(()) }
//! if let Err(e) = operation() {
//!     eprintln!("{}", format_user_error(&e));
//! }
//! ```
//!
//! Error categories with context-aware help:
//! - Input errors → classified by [`crate::input::ErrorClass`]
//! - Trace errors → file access, malformed event lines
//! - Config errors → syntax, out-of-range values

pub mod errors;

pub use errors::format_user_error;
