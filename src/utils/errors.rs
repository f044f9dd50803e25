//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common error scenarios.

use std::fmt::Write;

use crate::input::{classify_error, ErrorClass, InputError};

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    // Header
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    let error_msg = error.to_string();

    // Input errors carry their own classification; everything else is
    // recognised by message.
    if let Some(input_error) = error.chain().find_map(|e| e.downcast_ref::<InputError>()) {
        format_input_error(&mut output, input_error);
    } else if error_msg.contains("trace") {
        format_trace_error(&mut output, &error_msg);
    } else if error_msg.contains("config") {
        format_config_error(&mut output, &error_msg);
    } else {
        format_generic_error(&mut output, &error_msg);
    }

    // Technical details
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{:#}", error).ok();
    writeln!(&mut output).ok();

    // Footer with help
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: wl-rdp-input-replay -vv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Set RUST_LOG=wl_rdp_input=trace to see every wire PDU"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

fn format_input_error(output: &mut String, error: &InputError) {
    match classify_error(error) {
        ErrorClass::Downstream => {
            writeln!(output, "Session Send Failure").ok();
            writeln!(output).ok();
            writeln!(output, "A wire PDU could not be handed to the session.").ok();
            writeln!(output).ok();
            writeln!(output, "Common Causes:").ok();
            writeln!(output).ok();
            writeln!(output, "  1. The session was torn down mid-trace").ok();
            writeln!(output, "     → Re-run with --keep-going to see the rest").ok();
        }
        ErrorClass::Coordinate => {
            writeln!(output, "Coordinate Error").ok();
            writeln!(output).ok();
            writeln!(output, "A position could not be mapped to the desktop.").ok();
            writeln!(output).ok();
            writeln!(output, "Common Causes:").ok();
            writeln!(output).ok();
            writeln!(output, "  1. Window or desktop size is zero").ok();
            writeln!(output, "     → Check the [display] section").ok();
            writeln!(output).ok();
            writeln!(output, "  2. Position beyond 65535 after scaling").ok();
            writeln!(output, "     → Check window_width/desktop_width ratio").ok();
        }
        ErrorClass::Malformed | ErrorClass::Capacity | ErrorClass::Lookup => {
            writeln!(output, "Input Event Rejected").ok();
            writeln!(output).ok();
            writeln!(output, "Error: {}", error).ok();
            writeln!(output).ok();
            writeln!(output, "The event stream is inconsistent (for example a").ok();
            writeln!(output, "touch up without its touch down).").ok();
        }
    }
}

fn format_trace_error(output: &mut String, _error: &str) {
    writeln!(output, "Trace File Error").ok();
    writeln!(output).ok();
    writeln!(output, "The input trace could not be read.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. File does not exist or is not readable").ok();
    writeln!(output).ok();
    writeln!(output, "  2. A line is not a JSON event object").ok();
    writeln!(output, "     → One event per line, tagged by \"type\"").ok();
    writeln!(
        output,
        "     → Example: {{\"type\":\"pointer_motion\",\"x\":10,\"y\":20}}"
    )
    .ok();
}

fn format_config_error(output: &mut String, _error: &str) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "The configuration file has a problem.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. File not found").ok();
    writeln!(output, "     → Pass --config with the right path").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Out-of-range values").ok();
    writeln!(output, "     → max_contacts must be at least 1").ok();
    writeln!(output, "     → display sizes must be non-zero with smart_sizing").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Replay Error").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}
