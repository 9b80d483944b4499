//! Per-site extractors.
//!
//! Each scraper follows the same two-step pattern:
//!
//! 1. **Parsing**: `parse(html)` is a pure function from page markup to
//!    records (or pending records), so it can be exercised on fixtures
//! 2. **Scraping**: `scrape(...)` fetches the page, parses it and, where the
//!    source has no intrinsic category, classifies each headline
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Category |
//! |--------|--------|--------|----------|
//! | Vogue | [`vogue`] | HTML containers | Always `fashion` |
//! | BBC News | [`bbc`] | Embedded `__NEXT_DATA__` JSON | Classified title |
//! | AP News | [`apnews`] | HTML promo containers | Classified headline |
//!
//! Every scraper returns an [`Extraction`]: records plus diagnostics. Field
//! gaps degrade to sentinels or `None`, structural failures become
//! diagnostics, and only fetch and classifier failures surface as errors.

pub mod apnews;
pub mod bbc;
pub mod vogue;

use crate::classify::{Classify, categorize};
use crate::error::Result;
use crate::models::{ArticleRecord, Diagnostic, Extraction, Source, UNKNOWN_CATEGORY};
use tracing::{info, instrument};

/// A record still waiting for its derived category.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    pub headline: Option<String>,
    pub link: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Output of a parse step for sources with derived categories.
#[derive(Debug, Default)]
pub struct Parsed {
    pub items: Vec<Pending>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify each pending record's headline, one call per record, in order.
///
/// The headline text goes to the classifier as extracted. Records without a
/// headline get [`UNKNOWN_CATEGORY`] and no classifier call.
#[instrument(level = "info", skip_all, fields(source = %source, count = parsed.items.len()))]
pub async fn categorize_all<C: Classify>(
    source: Source,
    parsed: Parsed,
    classifier: &C,
) -> Result<Extraction> {
    let mut records = Vec::with_capacity(parsed.items.len());

    for item in parsed.items {
        let category = match item.headline.as_deref() {
            Some(text) => categorize(classifier, text).await?.to_string(),
            None => UNKNOWN_CATEGORY.to_string(),
        };
        records.push(ArticleRecord {
            headline: item.headline,
            link: item.link,
            author: None,
            description: item.description,
            image: item.image,
            category,
            source,
        });
    }

    info!(count = records.len(), "Categorized records");
    Ok(Extraction {
        records,
        diagnostics: parsed.diagnostics,
    })
}
