mod blocks;
mod forms;
mod tables;

use crate::logging::PerfConsoleListener;
use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::models::HEADING_LEVELS;
use crate::node_ext::{NodeTextExt, TextIndex};
use crate::parser::{NodeExt, NodeRef, parse_html};
use crate::utils::{Edge, Visit, to_absolute_uri, walk};
use crate::*;
use indexmap::IndexMap;
use std::rc::Rc;

fn create_perf_logger(debug: bool) -> PerfLogger {
    let mut listeners = vec![];
    if debug {
        listeners.push(Listener::new(Rc::new(PerfConsoleListener)));
    }
    PerfLogger::new(listeners)
}

/// Categories that read element or page text.  The text index is skipped
/// when none of them is requested.
const TEXT_SECTIONS: Sections = Sections::HEADINGS
    .union(Sections::TEXT)
    .union(Sections::LINKS)
    .union(Sections::TABLES)
    .union(Sections::DIVS)
    .union(Sections::SPANS);

/// The elements of interest in one document, each list in document order.
#[derive(Default)]
struct ElementScan {
    title: Option<NodeRef>,
    base: Option<NodeRef>,
    metas: Vec<NodeRef>,
    headings: Vec<(usize, NodeRef)>,
    anchors: Vec<NodeRef>,
    images: Vec<NodeRef>,
    tables: Vec<NodeRef>,
    forms: Vec<NodeRef>,
    divs: Vec<NodeRef>,
    spans: Vec<NodeRef>,
}

impl ElementScan {
    fn collect(document: &NodeRef) -> ElementScan {
        let mut scan = ElementScan::default();
        walk(document, |edge| {
            let node = match edge {
                Edge::Open(node) => node,
                Edge::Close(_) => return Visit::Descend,
            };
            let Some(name) = node.element_name() else {
                return Visit::Descend;
            };
            match name {
                "title" if scan.title.is_none() => scan.title = Some(node.clone()),
                "base" if scan.base.is_none() => scan.base = Some(node.clone()),
                "meta" => scan.metas.push(node.clone()),
                "a" => scan.anchors.push(node.clone()),
                "img" => scan.images.push(node.clone()),
                "table" => scan.tables.push(node.clone()),
                "form" => scan.forms.push(node.clone()),
                "div" => scan.divs.push(node.clone()),
                "span" => scan.spans.push(node.clone()),
                _ => {
                    if let Some(level) = HEADING_LEVELS.iter().position(|h| *h == name) {
                        scan.headings.push((level, node.clone()));
                    }
                }
            }
            Visit::Descend
        });
        scan
    }
}

/// Resolves link and image URLs when a base URL was configured.
struct UrlResolver {
    doc_uri: String,
    base_path: String,
}

impl UrlResolver {
    fn new(options: &ExtractOptions, base: Option<&NodeRef>) -> Option<UrlResolver> {
        let doc_uri = options.base_url.clone()?;
        let base_path = base.and_then(|b| b.attr_value("href")).unwrap_or_default();
        Some(UrlResolver { doc_uri, base_path })
    }

    fn resolve(&self, uri: &str) -> String {
        to_absolute_uri(uri, self.doc_uri.as_str(), self.base_path.as_str())
    }
}

fn resolve_url(resolver: Option<&UrlResolver>, uri: String) -> String {
    match resolver {
        Some(r) => r.resolve(uri.as_str()),
        None => uri,
    }
}

fn extract_title(title: Option<&NodeRef>) -> Option<String> {
    title
        .and_then(|t| t.own_text())
        .map(|text| text.trim().to_string())
}

fn extract_meta(metas: &[NodeRef]) -> IndexMap<String, String> {
    let mut values = IndexMap::new();
    for meta in metas {
        let key = meta
            .attr_value("name")
            .or_else(|| meta.attr_value("property"))
            .unwrap_or_else(|| String::from("unknown"));
        let content = meta.attr_value("content").unwrap_or_default();
        // IndexMap keeps the first position of a repeated key.
        values.insert(key, content);
    }
    values
}

fn extract_headings(
    headings: &[(usize, NodeRef)],
    text_index: &TextIndex,
) -> IndexMap<String, Vec<String>> {
    let mut by_level = HEADING_LEVELS
        .iter()
        .map(|level| (level.to_string(), vec![]))
        .collect::<IndexMap<String, Vec<String>>>();
    for (level, node) in headings {
        by_level[*level].push(node.visible_text(text_index));
    }
    by_level
}

fn extract_links(
    anchors: &[NodeRef],
    text_index: &TextIndex,
    resolver: Option<&UrlResolver>,
) -> Vec<Link> {
    anchors
        .iter()
        .filter_map(|a| {
            let href = a.attr_value("href")?;
            Some(Link {
                text: a.visible_text(text_index),
                href: resolve_url(resolver, href),
            })
        })
        .collect()
}

fn extract_images(images: &[NodeRef], resolver: Option<&UrlResolver>) -> Vec<Image> {
    images
        .iter()
        .map(|img| Image {
            alt: img.attr_value("alt").unwrap_or_default(),
            src: img.attr_value("src").map(|src| resolve_url(resolver, src)),
        })
        .collect()
}

pub struct Extractor<'a> {
    pub html: &'a str,
    pub options: ExtractOptions,
    logger: PerfLogger,
}

impl Extractor<'_> {
    pub fn new(html: &str, options: ExtractOptions) -> Extractor<'_> {
        let logger = create_perf_logger(options.debug);
        Extractor {
            html,
            options,
            logger,
        }
    }

    pub fn extract(self) -> ExtractedDocument {
        let logger = &self.logger;
        let sections = self.options.sections;
        start_span!(logger, EXTRACT);

        start_span!(logger, PARSE);
        let document = parse_html(self.html);
        end_span!(logger, PARSE);
        add_point_to_span!(logger, EXTRACT, "parsed");

        start_span!(logger, INDEX_TEXT);
        let text_index = if sections.intersects(TEXT_SECTIONS) {
            TextIndex::build(&document)
        } else {
            TextIndex::default()
        };
        count_in_span!(logger, INDEX_TEXT, "fragments", text_index.fragment_count());
        end_span!(logger, INDEX_TEXT);
        add_point_to_span!(logger, EXTRACT, "text_indexed");

        start_span!(logger, SCAN_ELEMENTS);
        let scan = ElementScan::collect(&document);
        let resolver = UrlResolver::new(&self.options, scan.base.as_ref());
        let resolver = resolver.as_ref();
        let mut product = ExtractedDocument::default();

        if sections.contains(Sections::TITLE) {
            product.title = extract_title(scan.title.as_ref());
        }
        if sections.contains(Sections::META) {
            product.meta = extract_meta(&scan.metas);
            count_in_span!(logger, SCAN_ELEMENTS, "meta", product.meta.len());
        }
        if sections.contains(Sections::HEADINGS) {
            product.headings = extract_headings(&scan.headings, &text_index);
            count_in_span!(logger, SCAN_ELEMENTS, "headings", scan.headings.len());
        }
        if sections.contains(Sections::TEXT) {
            product.text = text_index.document_text();
        }
        if sections.contains(Sections::LINKS) {
            product.links = extract_links(&scan.anchors, &text_index, resolver);
            count_in_span!(logger, SCAN_ELEMENTS, "links", product.links.len());
        }
        if sections.contains(Sections::IMAGES) {
            product.images = extract_images(&scan.images, resolver);
            count_in_span!(logger, SCAN_ELEMENTS, "images", product.images.len());
        }
        end_span!(logger, SCAN_ELEMENTS);
        add_point_to_span!(logger, EXTRACT, "elements_scanned");

        if sections.contains(Sections::TABLES) {
            product.tables = tables::extract_tables(&scan.tables, &text_index, logger);
        }
        if sections.contains(Sections::FORMS) {
            product.forms = forms::extract_forms(&scan.forms, logger);
        }
        if sections.intersects(Sections::DIVS | Sections::SPANS) {
            start_span!(logger, BLOCKS);
            if sections.contains(Sections::DIVS) {
                product.divs = blocks::extract_text_blocks(&scan.divs, &text_index);
                count_in_span!(logger, BLOCKS, "divs", product.divs.len());
            }
            if sections.contains(Sections::SPANS) {
                product.spans = blocks::extract_text_blocks(&scan.spans, &text_index);
                count_in_span!(logger, BLOCKS, "spans", product.spans.len());
            }
            end_span!(logger, BLOCKS);
        }

        end_span!(logger, EXTRACT);
        product
    }
}
