//! # combined_news
//!
//! Scrapes article metadata (headline, link, author, image, category) from
//! Vogue, BBC News and AP News and writes one combined JSON collection.
//!
//! ## Usage
//!
//! ```sh
//! combined_news -o combined_articles.json
//! ```
//!
//! ## Architecture
//!
//! A short sequential pipeline:
//! 1. **Fetching**: One GET per source page
//! 2. **Extraction**: Site-specific rules turn markup into records
//! 3. **Classification**: BBC and AP headlines get a zero-shot category
//! 4. **Output**: All records, in source order, written as one JSON array

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod classify;
mod cli;
mod error;
mod fetch;
mod models;
mod outputs;
mod schema;
mod scrapers;
mod utils;

use aggregate::Policy;
use classify::{Classifier, FixedLabel, ZeroShotClient};
use cli::Cli;
use fetch::{HttpFetcher, http_client};
use outputs::json;
use utils::ensure_writable_parent;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("combined_news starting up");

    let args = Cli::parse();
    debug!(output = %args.output.display(), fixed_category = ?args.fixed_category, "Parsed CLI arguments");

    // Fail before any network work if the output cannot be written
    if let Err(e) = ensure_writable_parent(&args.output).await {
        error!(
            path = %args.output.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let timeout = args.timeout_secs.map(Duration::from_secs);
    let fetcher = HttpFetcher::new(timeout)?;
    let classifier = match args.fixed_category {
        Some(category) => {
            info!(%category, "Using fixed category instead of the classifier");
            Classifier::Fixed(FixedLabel(category))
        }
        None => {
            info!(endpoint = %args.classifier_url, "Using zero-shot classifier");
            Classifier::ZeroShot(ZeroShotClient::new(
                http_client(timeout)?,
                args.classifier_url.clone(),
                args.classifier_token.clone(),
            ))
        }
    };

    let policy = Policy {
        isolate_sources: args.isolate_sources,
        strict: args.strict,
        dedupe: args.dedupe,
    };

    let collection = aggregate::collect(&fetcher, &classifier, policy).await?;
    json::write_articles(&collection.records, &args.output).await?;

    println!("Data saved to {}", args.output.display());

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        records = collection.records.len(),
        diagnostics = collection.diagnostics.len(),
        "Execution complete"
    );

    Ok(())
}
