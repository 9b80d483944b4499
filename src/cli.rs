//! Command-line interface definitions for combined_news.
//!
//! All options can be provided via command-line flags, and the classifier
//! settings also via environment variables.

use crate::classify::DEFAULT_CLASSIFIER_URL;
use crate::models::Category;
use crate::outputs::json::DEFAULT_OUTPUT;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Default run, writes ./combined_articles.json
/// combined_news
///
/// # Keep going when one site is down, fail on layout drift
/// combined_news --isolate-sources --strict
///
/// # No model calls at all
/// combined_news --fixed-category tech -o /tmp/articles.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the combined JSON document (overwritten)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Zero-shot classification endpoint
    #[arg(long, env = "CLASSIFIER_URL", default_value = DEFAULT_CLASSIFIER_URL)]
    pub classifier_url: Url,

    /// Bearer token for the classification endpoint
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub classifier_token: Option<String>,

    /// Skip the model and give every derived category this label
    #[arg(long)]
    pub fixed_category: Option<Category>,

    /// HTTP timeout in seconds (transport default when unset)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Record a failing source as a diagnostic instead of aborting the run
    #[arg(long)]
    pub isolate_sources: bool,

    /// Fail the run if any source reported a diagnostic
    #[arg(long)]
    pub strict: bool,

    /// Drop records whose link repeats an earlier record
    #[arg(long)]
    pub dedupe: bool,
}
