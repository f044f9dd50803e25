//! Input trace replay
//!
//! Feeds a JSON-lines trace of [`WaylandInputEvent`]s through an
//! [`InputTranslator`]. One event per line; blank lines and lines starting
//! with `#` are skipped.

use std::io::BufRead;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::input::{InputTranslator, WaylandInputEvent};

/// Replay behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Continue past session-fatal errors
    pub keep_going: bool,
}

/// An event the translator rejected
#[derive(Debug, Clone, Serialize)]
pub struct ReplayFailure {
    /// 1-based trace line
    pub line: usize,
    /// Rendered error
    pub error: String,
    /// Whether the error means the session is gone
    pub fatal: bool,
}

/// Outcome of one replay
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    /// Events parsed and handed to the translator
    pub events_read: usize,
    /// Events the translator rejected
    pub failures: Vec<ReplayFailure>,
    /// Line of the session-fatal error that ended the replay, if any
    pub stopped_at: Option<usize>,
    /// Translator's event counter after the run
    pub events_processed: u64,
    /// Translator's PDU counter after the run
    pub wire_events_sent: u64,
}

impl ReplayReport {
    /// Whether every event was accepted
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replay a trace, stopping at the first session-fatal error
pub fn replay_trace<R: BufRead>(
    reader: R,
    translator: &mut InputTranslator,
) -> Result<ReplayReport> {
    replay_trace_with(reader, translator, ReplayOptions::default())
}

/// Replay a trace with explicit options
///
/// Unreadable or unparsable lines abort the replay with an error. Events
/// the translator rejects are recorded in the report.
pub fn replay_trace_with<R: BufRead>(
    reader: R,
    translator: &mut InputTranslator,
    options: ReplayOptions,
) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.context(format!("Failed to read trace line {}", line_no))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: WaylandInputEvent = serde_json::from_str(trimmed)
            .context(format!("Invalid trace event at line {}", line_no))?;
        report.events_read += 1;
        debug!("Trace line {}: {:?}", line_no, event);

        let Err(e) = translator.handle_event(event) else {
            continue;
        };

        let fatal = e.is_session_fatal();
        warn!("Trace line {}: event rejected: {}", line_no, e);
        report.failures.push(ReplayFailure {
            line: line_no,
            error: e.to_string(),
            fatal,
        });

        if fatal && !options.keep_going {
            report.stopped_at = Some(line_no);
            break;
        }
    }

    report.events_processed = translator.events_processed();
    report.wire_events_sent = translator.wire_events_sent();

    info!(
        "Replay finished: {} event(s), {} rejected, {} PDU(s) sent",
        report.events_read,
        report.failures.len(),
        report.wire_events_sent
    );

    Ok(report)
}
