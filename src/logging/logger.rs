use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

/// Observer interface for extraction span events.  Implement this trait and
/// wrap it in a [`Listener`] to receive timing and count data from
/// [`crate::extract_with_options`].
///
/// Callbacks run synchronously on the extracting thread.
pub trait PerfListener {
    /// Return whether this listener cares about the given span.  If `false`,
    /// none of the other callbacks fire for that span.
    fn is_interested_in_span(&self, span_id: u64) -> bool;
    /// Called when a span begins.
    fn on_span_start(&self, span_id: u64, start_time: Instant);
    /// Called at each checkpoint, with the wall-clock duration since the
    /// previous checkpoint (or span start).
    fn on_check_point(&self, span_id: u64, since_last: Duration, label: &str);
    /// Called when a category count is recorded inside a span.
    fn on_count(&self, span_id: u64, label: &str, count: usize);
    /// Called when a span ends, with its total duration.
    fn on_span_end(&self, span_id: u64, span_duration: Duration);
}

/// A cheaply clonable handle to a shared [`PerfListener`].
#[derive(Clone)]
pub struct Listener {
    inner_impl: Rc<dyn PerfListener>,
}

impl Listener {
    pub fn new(listener: Rc<dyn PerfListener>) -> Listener {
        Listener {
            inner_impl: listener,
        }
    }
}

impl Deref for Listener {
    type Target = dyn PerfListener;
    fn deref(&self) -> &Self::Target {
        &*self.inner_impl
    }
}

struct OpenSpan {
    span_id: u64,
    start_time: Instant,
    last_point: Instant,
    listeners: Vec<Listener>,
}

impl OpenSpan {
    fn point(&mut self, label: &str) {
        let now = Instant::now();
        let since_last = now.duration_since(self.last_point);
        self.last_point = now;
        for l in &self.listeners {
            l.on_check_point(self.span_id, since_last, label);
        }
    }

    fn count(&self, label: &str, count: usize) {
        for l in &self.listeners {
            l.on_count(self.span_id, label, count);
        }
    }
}

/// Tracks in-flight spans for a single extraction and fans events out to
/// the registered [`Listener`]s.
///
/// Not `Send`: each extraction call builds its own logger, so nothing is
/// shared between calls.
pub struct PerfLogger {
    spans: RefCell<HashMap<u64, OpenSpan>>,
    listeners: Vec<Listener>,
}

impl PerfLogger {
    /// Create a logger.  An empty `listeners` list makes every call a map
    /// lookup and nothing more.
    pub fn new(listeners: Vec<Listener>) -> PerfLogger {
        PerfLogger {
            spans: RefCell::new(HashMap::new()),
            listeners,
        }
    }

    /// Begin the span `span_id`.  Only listeners interested in it are
    /// notified for the rest of its lifetime.
    pub fn start(&self, span_id: u64) {
        let listeners = self
            .listeners
            .iter()
            .filter(|l| l.is_interested_in_span(span_id))
            .cloned()
            .collect::<Vec<_>>();
        if listeners.is_empty() {
            return;
        }
        let start_time = Instant::now();
        for l in &listeners {
            l.on_span_start(span_id, start_time);
        }
        self.spans.borrow_mut().insert(
            span_id,
            OpenSpan {
                span_id,
                start_time,
                last_point: start_time,
                listeners,
            },
        );
    }

    /// Record a labelled checkpoint inside an open span.
    pub fn check_point(&self, span_id: u64, label: &str) {
        if let Some(span) = self.spans.borrow_mut().get_mut(&span_id) {
            span.point(label);
        }
    }

    /// Record how many items a category produced inside an open span.
    pub fn count(&self, span_id: u64, label: &str, count: usize) {
        if let Some(span) = self.spans.borrow().get(&span_id) {
            span.count(label, count);
        }
    }

    /// Close the span and report its total duration.
    pub fn end(&self, span_id: u64) {
        if let Some(span) = self.spans.borrow_mut().remove(&span_id) {
            let duration = span.start_time.elapsed();
            for l in &span.listeners {
                l.on_span_end(span_id, duration);
            }
        }
    }
}
