//! Declarative structural coupling to the upstream pages.
//!
//! Every class name, element id and JSON key the scrapers rely on is written
//! down as data ([`FieldSpec`], [`JsonPathSpec`]) in the scraper modules and
//! compiled here. When a page stops matching, [`check_containers`] turns the
//! silence into a diagnostic.

use crate::error::{Error, Result};
use crate::models::{Diagnostic, Source};
use scraper::{ElementRef, Selector};
use serde_json::Value as Json;

/// How a field's value is read from the first element matching its selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// All descendant text, concatenated as-is.
    Text,
    /// Each text fragment trimmed, empty fragments dropped, then concatenated.
    StrippedText,
    /// The named attribute.
    Attr(&'static str),
}

/// One `selector → field` rule, relative to a container element.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub selector: &'static str,
    pub read: Read,
}

impl FieldSpec {
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            read: Read::Text,
        }
    }

    pub const fn stripped(selector: &'static str) -> Self {
        Self {
            selector,
            read: Read::StrippedText,
        }
    }

    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            read: Read::Attr(name),
        }
    }

    pub fn compile(&self) -> Result<Field> {
        Ok(Field {
            selector: selector(self.selector)?,
            read: self.read,
        })
    }
}

/// A compiled [`FieldSpec`].
#[derive(Debug)]
pub struct Field {
    selector: Selector,
    read: Read,
}

impl Field {
    /// Value of this field inside `container`, or `None` when the element
    /// (or attribute) is missing.
    pub fn extract(&self, container: ElementRef<'_>) -> Option<String> {
        let element = container.select(&self.selector).next()?;
        match self.read {
            Read::Text => Some(element.text().collect()),
            Read::StrippedText => Some(stripped_text(element)),
            Read::Attr(name) => element.value().attr(name).map(str::to_string),
        }
    }
}

/// Compile a CSS selector, mapping failures to [`Error::Parse`].
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("invalid selector '{css}': {e}")))
}

fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Emit a diagnostic when a page matched no containers at all.
pub fn check_containers(source: Source, container: &str, matched: usize) -> Option<Diagnostic> {
    (matched == 0).then(|| {
        Diagnostic::new(
            source,
            format!("no elements matched '{container}'; the page layout may have changed"),
        )
    })
}

/// Where a JSON payload lives in a page and how to walk it.
#[derive(Debug, Clone, Copy)]
pub struct JsonPathSpec {
    /// `id` of the `<script>` element holding the payload.
    pub script_id: &'static str,
    /// Keys from the payload root to the list of sections.
    pub sections: &'static [&'static str],
    /// Key of the item list inside each section.
    pub items: &'static str,
}

impl JsonPathSpec {
    pub fn script_selector(&self) -> Result<Selector> {
        selector(&format!("script[id=\"{}\"]", self.script_id))
    }
}

/// Follow `path` from `root`; every key is required.
///
/// The error names the first missing key.
pub fn require<'a>(root: &'a Json, path: &[&str]) -> std::result::Result<&'a Json, String> {
    path.iter().try_fold(root, |value, key| {
        value.get(*key).ok_or_else(|| format!("missing key '{key}'"))
    })
}

/// Follow `path` from `root`, resolving to `None` at the first missing link.
pub fn optional<'a>(root: &'a Json, path: &[&str]) -> Option<&'a Json> {
    path.iter().try_fold(root, |value, key| value.get(*key))
}
