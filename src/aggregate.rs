//! Runs every scraper in order and merges their output.
//!
//! Sources run one after another, always Vogue, then BBC, then AP News, and
//! their records are concatenated in that order. The [`Policy`] decides what
//! is fatal:
//!
//! - By default a fetch or classifier error aborts the run.
//! - `isolate_sources` turns such an error into a diagnostic for that source.
//! - `strict` fails the run when any diagnostic was reported.
//!
//! Duplicates are kept unless `dedupe` is set.

use crate::classify::Classify;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::{ArticleRecord, Diagnostic, Extraction, Source};
use crate::scrapers::{apnews, bbc, vogue};
use itertools::Itertools;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    pub isolate_sources: bool,
    pub strict: bool,
    pub dedupe: bool,
}

/// All records of one run, plus every diagnostic the sources reported.
#[derive(Debug, Default)]
pub struct Collection {
    pub records: Vec<ArticleRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

async fn scrape_source<F: Fetch, C: Classify>(
    source: Source,
    fetcher: &F,
    classifier: &C,
) -> Result<Extraction> {
    let url = source.default_url();
    match source {
        Source::Vogue => vogue::scrape(fetcher, url).await,
        Source::Bbc => bbc::scrape(fetcher, classifier, url).await,
        Source::ApNews => apnews::scrape(fetcher, classifier, url).await,
    }
}

/// Scrape all sources and merge the results under `policy`.
#[instrument(level = "info", skip(fetcher, classifier))]
pub async fn collect<F: Fetch, C: Classify>(
    fetcher: &F,
    classifier: &C,
    policy: Policy,
) -> Result<Collection> {
    let mut collection = Collection::default();

    for source in Source::ALL {
        let t0 = Instant::now();
        let extraction = match scrape_source(source, fetcher, classifier).await {
            Ok(extraction) => extraction,
            Err(e) if policy.isolate_sources => {
                warn!(%source, error = %e, "Source failed; continuing without it");
                Extraction::failed(Diagnostic::new(source, e.to_string()))
            }
            Err(e) => {
                error!(%source, error = %e, "Source failed; aborting run");
                return Err(e);
            }
        };

        info!(
            %source,
            records = extraction.records.len(),
            diagnostics = extraction.diagnostics.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Source done"
        );
        for d in &extraction.diagnostics {
            warn!(diagnostic = %d, "Source diagnostic");
        }

        collection.records.extend(extraction.records);
        collection.diagnostics.extend(extraction.diagnostics);
    }

    if policy.dedupe {
        let before = collection.records.len();
        collection.records = dedupe_by_link(collection.records);
        info!(
            before,
            after = collection.records.len(),
            "Dropped records with repeated links"
        );
    }

    if policy.strict && !collection.diagnostics.is_empty() {
        error!(count = collection.diagnostics.len(), "Diagnostics reported in strict mode");
        return Err(Error::Diagnostics(collection.diagnostics.len()));
    }

    info!(
        records = collection.records.len(),
        diagnostics = collection.diagnostics.len(),
        "Collected articles from all sources"
    );
    Ok(collection)
}

/// Keep the first record for each link. Sentinel links never collide.
fn dedupe_by_link(records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    records
        .into_iter()
        .enumerate()
        .unique_by(|(i, r)| {
            let slot = (r.link == vogue::NO_LINK).then_some(*i);
            (r.link.clone(), slot)
        })
        .map(|(_, r)| r)
        .collect()
}
