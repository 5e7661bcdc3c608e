//! Structured extraction from HTML: title, `<meta>` values, headings,
//! visible text, links, images, tables, forms and text-bearing
//! `<div>`/`<span>` blocks, pulled out of an arbitrary (possibly
//! malformed) HTML fragment or document.
//!
//! ## Quick start
//!
//! ```rust
//! use html_digest::extract;
//!
//! let html = r#"<title>Hi</title><a href="/a">A</a><a>no href</a>"#;
//! let doc = extract(html).unwrap();
//!
//! assert_eq!(doc.title.as_deref(), Some("Hi"));
//! assert_eq!(doc.links.len(), 1);
//! let json = doc.to_json().unwrap();
//! assert!(json.starts_with(r#"{"title":"Hi","#));
//! ```
//!
//! ## Module layout
//!
//! * **Top level** – [`extract`], [`extract_with_options`], [`extract_bytes`]
//!   and [`extract_reader`] are the entry points.  [`ExtractedDocument`] and
//!   [`ExtractOptions`] are the main public types.
//! * [`parser`] – thin wrappers around the underlying HTML parser ([`parser::NodeRef`],
//!   [`parser::parse_html`]).
//! * [`shared_utils`] – the depth-first walker every category is built on,
//!   plus text and URL helpers.
//! * [`TextIndex`] / [`NodeTextExt`] – per-document visible-text index used
//!   to read element texts without re-walking subtrees.
//!
//! Extraction is a pure function of its input: no state survives a call, so
//! calls may run on any number of threads at once.

#[macro_use]
mod logging;
mod error;
mod extractor;

mod models;
mod node_ext;
mod node_utils;
mod utils;

pub use error::ParseError;
pub use models::{
    ExtractOptions, ExtractedDocument, Form, FormInput, HEADING_LEVELS, Image, Link, Sections,
    Table, TextBlock,
};
pub use node_ext::{NodeTextExt, TextIndex};
pub use node_utils::NodeExt;

use std::io::Read;

/// The depth-first walker and the text / URL helpers the extractor uses,
/// for callers that post-process the parsed tree themselves.
pub mod shared_utils {
    pub use crate::utils::{
        Edge, Visit, normalize_text, resolve_base_uri, select_descendants,
        select_descendants_by, to_absolute_uri, walk,
    };
}

/// Thin wrappers around the underlying HTML parser.
///
/// [`NodeRef`] is the reference-counted DOM node type used throughout the crate.
/// [`parse_html`] parses a complete HTML document into a [`NodeRef`] tree.
pub mod parser {
    use kuchikikiki::traits::TendrilSink;
    pub use kuchikikiki::NodeRef;
    pub use crate::node_utils::NodeExt;

    /// Parse an HTML string into a [`NodeRef`] document tree.
    ///
    /// The parser follows the HTML5 specification; an implicit `<html>`, `<head>`,
    /// and `<body>` are synthesised when missing, and unclosed tags are
    /// closed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use html_digest::parser::parse_html;
    ///
    /// let doc = parse_html("<div><p>hello");
    /// assert!(doc.select_first("body > div > p").is_ok());
    /// ```
    pub fn parse_html(html: &str) -> NodeRef {
        kuchikikiki::parse_html().one(html)
    }
}

/// Extract the structured content of an HTML document with default
/// [`ExtractOptions`].
///
/// Fails only when no document tree can be built; for a `&str` input under
/// the default options that never happens, and unusual or broken markup is
/// repaired by the parser instead.  A document without e.g. a title still
/// succeeds, with `title == None`.
///
/// # Examples
///
/// ```rust
/// use html_digest::extract;
///
/// let doc = extract("<div class=\"a b\">x</div><div></div>").unwrap();
/// assert_eq!(doc.divs.len(), 1);
/// assert_eq!(doc.divs[0].class, Some(vec!["a".to_string(), "b".to_string()]));
/// ```
pub fn extract(html: &str) -> Result<ExtractedDocument, ParseError> {
    extract_with_options(html, ExtractOptions::default())
}

/// Extract the structured content of an HTML document.
///
/// # Errors
///
/// [`ParseError::TooLarge`] if [`ExtractOptions::max_input_bytes`] is set and
/// `html` is longer.
pub fn extract_with_options(
    html: &str,
    options: ExtractOptions,
) -> Result<ExtractedDocument, ParseError> {
    check_size(html.len(), &options)?;
    let processor = extractor::Extractor::new(html, options);
    Ok(processor.extract())
}

/// Like [`extract_with_options`], for raw bytes that must be UTF-8.
///
/// # Errors
///
/// [`ParseError::Encoding`] for undecodable input, [`ParseError::TooLarge`]
/// as for [`extract_with_options`].
pub fn extract_bytes(
    bytes: &[u8],
    options: ExtractOptions,
) -> Result<ExtractedDocument, ParseError> {
    check_size(bytes.len(), &options)?;
    let html = std::str::from_utf8(bytes)?;
    extract_with_options(html, options)
}

/// Read a whole document from `reader` and extract it as
/// [`extract_bytes`] does.  With a size limit configured, at most one byte
/// past the limit is read, so a [`ParseError::TooLarge`] from here reports
/// `limit + 1` rather than the full length.
///
/// # Errors
///
/// [`ParseError::Io`] when reading fails, otherwise as [`extract_bytes`].
pub fn extract_reader<R: Read>(
    reader: R,
    options: ExtractOptions,
) -> Result<ExtractedDocument, ParseError> {
    let mut bytes = vec![];
    match options.max_input_bytes {
        Some(limit) => {
            let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
            reader.take(cap).read_to_end(&mut bytes)?;
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut bytes)?;
        }
    }
    extract_bytes(&bytes, options)
}

fn check_size(size: usize, options: &ExtractOptions) -> Result<(), ParseError> {
    match options.max_input_bytes {
        Some(limit) if size > limit => Err(ParseError::TooLarge { size, limit }),
        _ => Ok(()),
    }
}
