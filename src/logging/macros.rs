//! Thin wrappers around [`super::logger::PerfLogger`] that compile to a no-op
//! in release builds (guarded by `cfg!(debug_assertions)`).
//!
//! | Macro | Forwards to |
//! |---|---|
//! | `start_span!` | `PerfLogger::start` |
//! | `end_span!` | `PerfLogger::end` |
//! | `add_point_to_span!` | `PerfLogger::check_point` |
//! | `count_in_span!` | `PerfLogger::count` |

macro_rules! start_span {
    ($logger:ident, $span_id:ident) => {
        if cfg!(debug_assertions) {
            $logger.start($span_id);
        }
    };
}

macro_rules! add_point_to_span {
    ($logger:ident, $span_id:ident, $label:expr) => {
        if cfg!(debug_assertions) {
            $logger.check_point($span_id, $label);
        }
    };
}

macro_rules! count_in_span {
    ($logger:ident, $span_id:ident, $label:expr, $count:expr) => {
        if cfg!(debug_assertions) {
            $logger.count($span_id, $label, $count);
        }
    };
}

macro_rules! end_span {
    ($logger:ident, $span_id:ident) => {
        if cfg!(debug_assertions) {
            $logger.end($span_id);
        }
    };
}
