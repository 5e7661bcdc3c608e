use bitflags::bitflags;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The heading levels reported in [`ExtractedDocument::headings`], in the
/// order they appear in the map.
pub const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// The output of [`crate::extract`]: everything the engine pulled out of a
/// single document.  Owned by the caller and detached from the parsed tree.
///
/// Serialises (see [`ExtractedDocument::to_json`]) with exactly these field
/// names; external clients depend on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Text of the first `<title>` element, trimmed.  `None` when there is no
    /// title element or it holds no text.
    pub title: Option<String>,
    /// `<meta>` values keyed by `name`, else `property`, else `"unknown"`.
    /// A repeated key keeps its first position and its last value.
    pub meta: IndexMap<String, String>,
    /// Heading texts per level, `"h1"` through `"h6"`.  Every level is
    /// present, possibly with an empty list.
    pub headings: IndexMap<String, Vec<String>>,
    /// All visible text of the page, whitespace-collapsed.
    pub text: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub tables: Vec<Table>,
    pub forms: Vec<Form>,
    /// `<div>` elements with non-empty text.
    pub divs: Vec<TextBlock>,
    /// `<span>` elements with non-empty text.
    pub spans: Vec<TextBlock>,
}

impl ExtractedDocument {
    /// Serialise to compact JSON using the wire field names.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialise to indented JSON using the wire field names.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// An `<a>` element carrying an `href`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An `<img>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// The `alt` attribute, or empty when absent.
    pub alt: String,
    pub src: Option<String>,
}

/// A `<table>` element.  Header and row scans cover the whole subtree, so
/// cells of a nested table also show up in every enclosing table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Text of every `<th>` in the subtree.
    pub headers: Vec<String>,
    /// One entry per `<tr>` with at least one `<td>` child, holding the
    /// text of those `<td>` children.
    pub rows: Vec<Vec<String>>,
}

/// A `<form>` element and the inputs inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub action: String,
    /// Lower-cased `method`, `"get"` when absent.
    pub method: String,
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub input_type: String,
}

/// A `<div>` or `<span>` with visible text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Tokens of the `class` attribute.  `None` when the attribute is
    /// missing, `Some(vec![])` when it is present but blank.
    pub class: Option<Vec<String>>,
    pub text: String,
}

bitflags! {
    /// Selects which categories [`crate::extract_with_options`] fills in.
    /// Disabled categories keep their empty value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sections: u32 {
        const TITLE    = 1 << 0;
        const META     = 1 << 1;
        const HEADINGS = 1 << 2;
        const TEXT     = 1 << 3;
        const LINKS    = 1 << 4;
        const IMAGES   = 1 << 5;
        const TABLES   = 1 << 6;
        const FORMS    = 1 << 7;
        const DIVS     = 1 << 8;
        const SPANS    = 1 << 9;
    }
}

impl Default for Sections {
    fn default() -> Sections {
        Sections::all()
    }
}

/// Knobs for [`crate::extract_with_options`].
///
/// The defaults reproduce the plain [`crate::extract`] contract: every
/// category, attribute values verbatim, no input limit.
///
/// # Examples
///
/// ```rust
/// use html_digest::{ExtractOptions, Sections};
///
/// let mut opts = ExtractOptions::default();
/// opts.sections = Sections::LINKS | Sections::IMAGES;
/// opts.base_url = Some("https://example.com/blog/".to_string());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Print span timings and per-category counts to stderr (debug builds
    /// only).
    pub debug: bool,
    /// Categories to extract.
    pub sections: Sections,
    /// When set, link `href` and image `src` values are resolved to
    /// absolute URLs against this URL and any `<base href>` in the page.
    pub base_url: Option<String>,
    /// Reject inputs longer than this many bytes with
    /// [`crate::ParseError::TooLarge`] before parsing.
    pub max_input_bytes: Option<usize>,
}
