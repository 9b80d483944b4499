//! Data models for scraped article records and per-source results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRecord`]: One normalized article, the only entity written to disk
//! - [`Source`]: The three outlets, in the order they are aggregated
//! - [`Category`]: The closed label set offered to the classifier
//! - [`Extraction`]: The `(records, diagnostics)` pair every scraper returns
//!
//! Records are built once per run and never mutated afterwards.

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category used when a record has no text to classify.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A news outlet scraped by this tool.
///
/// The variant order is the aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Vogue,
    #[serde(rename = "BBC")]
    Bbc,
    #[serde(rename = "AP News")]
    ApNews,
}

impl Source {
    /// All sources in aggregation order.
    pub const ALL: [Source; 3] = [Source::Vogue, Source::Bbc, Source::ApNews];

    /// Display name, identical to the serialized `source` field.
    pub fn name(&self) -> &'static str {
        match self {
            Source::Vogue => "Vogue",
            Source::Bbc => "BBC",
            Source::ApNews => "AP News",
        }
    }

    /// The page fetched for this source.
    pub fn default_url(&self) -> &'static str {
        match self {
            Source::Vogue => "https://www.vogue.com/fashion",
            Source::Bbc => "https://www.bbc.com/news/",
            Source::ApNews => "https://apnews.com/",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The closed set of labels a derived category is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Political,
    Fashion,
    Tech,
    Sports,
    Entertainment,
}

impl Category {
    /// Candidate labels in the order they are offered to the model.
    pub const ALL: [Category; 6] = [
        Category::Business,
        Category::Political,
        Category::Fashion,
        Category::Tech,
        Category::Sports,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Political => "political",
            Category::Fashion => "fashion",
            Category::Tech => "tech",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// A normalized article as written to the output document.
///
/// Field order here is the serialized key order. The key set depends on the
/// source: Vogue records carry `author` and no `description`, BBC and AP
/// News records carry `description` and no `author`. Every key a source
/// carries is always written, as `null` when nothing could be extracted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArticleRecord {
    pub headline: Option<String>,
    pub link: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: String,
    pub source: Source,
}

impl Serialize for ArticleRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bylined = self.source == Source::Vogue;
        let mut state = serializer.serialize_struct("ArticleRecord", 6)?;
        state.serialize_field("headline", &self.headline)?;
        state.serialize_field("link", &self.link)?;
        if bylined {
            state.serialize_field("author", &self.author)?;
            state.skip_field("description")?;
        } else {
            state.skip_field("author")?;
            state.serialize_field("description", &self.description)?;
        }
        state.serialize_field("image", &self.image)?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("source", &self.source)?;
        state.end()
    }
}

/// A non-fatal problem one source ran into.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub source: Source,
    pub message: String,
}

impl Diagnostic {
    pub fn new(source: Source, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source, self.message)
    }
}

/// What one scraper produced: its records plus anything worth reporting.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ArticleRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// An empty result carrying a single diagnostic.
    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            records: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }
}
