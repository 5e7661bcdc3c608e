/// Span IDs for extraction perf events.  Each ID must be unique; increment
/// when adding a new span.
pub const EXTRACT: u64 = 1;
pub const PARSE: u64 = 2;
pub const INDEX_TEXT: u64 = 3;
pub const SCAN_ELEMENTS: u64 = 4;
pub const TABLES: u64 = 5;
pub const FORMS: u64 = 6;
pub const BLOCKS: u64 = 7;

pub fn name(span_id: u64) -> &'static str {
    match span_id {
        EXTRACT => "EXTRACT",
        PARSE => "PARSE",
        INDEX_TEXT => "INDEX_TEXT",
        SCAN_ELEMENTS => "SCAN_ELEMENTS",
        TABLES => "TABLES",
        FORMS => "FORMS",
        BLOCKS => "BLOCKS",
        _ => "UNKNOWN",
    }
}
