pub mod logger;

pub mod logging_defs;
#[macro_use]
pub mod macros;

use logger::PerfListener;
use logging_defs::*;
use std::time::Duration;
use std::time::Instant;

/// A [`PerfListener`] that prints every span event to stderr.  Registered
/// when [`crate::ExtractOptions::debug`] is set.
pub struct PerfConsoleListener;

impl PerfListener for PerfConsoleListener {
    fn is_interested_in_span(&self, _span_id: u64) -> bool {
        true
    }

    fn on_span_start(&self, span_id: u64, _start_time: Instant) {
        eprintln!("Start of span: {}", name(span_id));
    }

    fn on_check_point(&self, span_id: u64, since_last: Duration, label: &str) {
        eprintln!(
            "Span: \"{}\" point: \"{}\": {} seconds",
            name(span_id),
            label,
            since_last.as_secs_f64()
        );
    }

    fn on_count(&self, span_id: u64, label: &str, count: usize) {
        eprintln!("Span: \"{}\" {}: {}", name(span_id), label, count);
    }

    fn on_span_end(&self, span_id: u64, span_duration: Duration) {
        eprintln!(
            "Span ended: \"{}\": {} seconds",
            name(span_id),
            span_duration.as_secs_f64()
        );
    }
}
