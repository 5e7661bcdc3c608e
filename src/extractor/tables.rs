use crate::logging::logger::PerfLogger;
use crate::logging::logging_defs::TABLES;
use crate::models::Table;
use crate::node_ext::{NodeTextExt, TextIndex};
use crate::parser::{NodeExt, NodeRef};
use crate::utils::select_descendants;

/// Build one [`Table`] per `<table>` element.
///
/// The header and row scans of each table cover its whole subtree on their
/// own, so the cells of a nested table are reported by the inner table and
/// again by every table around it.
pub fn extract_tables(
    tables: &[NodeRef],
    text_index: &TextIndex,
    logger: &PerfLogger,
) -> Vec<Table> {
    start_span!(logger, TABLES);
    let extracted = tables
        .iter()
        .map(|table| extract_table(table, text_index))
        .collect::<Vec<_>>();
    count_in_span!(logger, TABLES, "tables", extracted.len());
    end_span!(logger, TABLES);
    extracted
}

fn extract_table(table: &NodeRef, text_index: &TextIndex) -> Table {
    let headers = select_descendants(table, "th")
        .iter()
        .map(|th| th.visible_text(text_index))
        .collect();

    // rows made only of <th> cells are header rows
    let rows = select_descendants(table, "tr")
        .iter()
        .filter_map(|tr| {
            let cells = tr
                .element_children()
                .iter()
                .filter(|cell| cell.is_element("td"))
                .map(|td| td.visible_text(text_index))
                .collect::<Vec<_>>();
            if cells.is_empty() { None } else { Some(cells) }
        })
        .collect();

    Table { headers, rows }
}
