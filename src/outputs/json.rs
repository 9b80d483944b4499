//! JSON output of the combined article collection.
//!
//! The document is an array of article objects, pretty-printed with 4-space
//! indentation and a stable key order per record. An existing file at the
//! target path is overwritten.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Default output filename, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "combined_articles.json";

/// Serialize `records` as a 4-space indented JSON array.
pub fn to_pretty_json(records: &[ArticleRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `records` to `path`, replacing any previous content.
///
/// # Errors
///
/// [`Error::Persist`] when the file cannot be written. Nothing is retried
/// and a partially written file may be left behind.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_articles(records: &[ArticleRecord], path: &Path) -> Result<()> {
    let json = to_pretty_json(records)?;

    info!(bytes = json.len(), count = records.len(), "Writing JSON");
    if let Err(e) = fs::write(path, &json).await {
        error!(error = %e, "Failed to write JSON");
        return Err(Error::Persist {
            path: path.display().to_string(),
            source: e,
        });
    }
    info!(count = records.len(), "Wrote combined articles JSON");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Policy, collect, fixtures::fixture_fetcher};
    use crate::classify::FixedLabel;
    use crate::models::{Category, Source};

    fn record(source: Source) -> ArticleRecord {
        ArticleRecord {
            headline: Some("Headline".to_string()),
            link: "/x".to_string(),
            author: None,
            description: Some("Desc".to_string()),
            image: None,
            category: "tech".to_string(),
            source,
        }
    }

    #[test]
    fn test_four_space_indent() {
        let bytes = to_pretty_json(&[record(Source::Bbc)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("[\n    {\n        \"headline\": \"Headline\""));
        assert!(text.contains("\n        \"image\": null,"));
        assert!(text.ends_with("    }\n]"));
    }

    #[test]
    fn test_empty_collection() {
        let bytes = to_pretty_json(&[]).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(DEFAULT_OUTPUT);
        std::fs::write(&path, "stale content that is longer than the new one").unwrap();

        write_articles(&[], &path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_is_persist_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("does/not/exist.json");
        let res = write_articles(&[record(Source::ApNews)], &path).await;
        assert!(matches!(res, Err(Error::Persist { .. })));
    }

    #[tokio::test]
    async fn test_end_to_end_document() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(DEFAULT_OUTPUT);
        let classifier = FixedLabel(Category::Tech);

        let collection = collect(&fixture_fetcher(), &classifier, Policy::default())
            .await
            .unwrap();
        write_articles(&collection.records, &path).await.unwrap();

        let written: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let sources: Vec<&str> = written.iter().map(|r| r["source"].as_str().unwrap()).collect();
        assert_eq!(sources, vec!["Vogue", "Vogue", "BBC", "AP News", "AP News"]);

        for r in &written {
            let expected = if r["source"] == "Vogue" { "fashion" } else { "tech" };
            assert_eq!(r["category"], expected);
            assert_eq!(r.get("author").is_some(), r["source"] == "Vogue");
        }
        assert_eq!(written[2]["image"], "https://ichef.bbci.co.uk/r1.jpg");
        assert_eq!(written[3]["image"], "https://img.apnews.com/a1.jpg");
        assert_eq!(written[1]["author"], "Unknown author");
    }

    #[tokio::test]
    async fn test_repeated_runs_are_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("first.json");
        let second = tmp.path().join("second.json");
        let classifier = FixedLabel(Category::Tech);

        for path in [&first, &second] {
            let collection = collect(&fixture_fetcher(), &classifier, Policy::default())
                .await
                .unwrap();
            write_articles(&collection.records, path).await.unwrap();
        }

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }
}
