//! BBC News scraper.
//!
//! The BBC front page is a Next.js app; its articles live in the JSON blob of
//! the `__NEXT_DATA__` script, under
//! `props.pageProps.page["@\"news\","].sections[].content[]`.
//!
//! A page without that script yields nothing. A blob that does not follow the
//! expected path aborts this source only: the problem is logged, reported as
//! a diagnostic, and the run continues with no BBC records.

use super::{Parsed, Pending, categorize_all};
use crate::classify::Classify;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{Diagnostic, Extraction, Source};
use crate::schema::{self, JsonPathSpec};
use scraper::Html;
use serde_json::Value as Json;
use tracing::{debug, error, info, instrument, warn};

const PATH: JsonPathSpec = JsonPathSpec {
    script_id: "__NEXT_DATA__",
    sections: &["props", "pageProps", "page", "@\"news\",", "sections"],
    items: "content",
};

const IMAGE_PATH: &[&str] = &["image", "model", "blocks", "src"];

/// Parse a BBC front page into records awaiting classification.
pub fn parse(html: &str) -> Result<Parsed> {
    let script_selector = PATH.script_selector()?;
    let document = Html::parse_document(html);

    let Some(script) = document.select(&script_selector).next() else {
        warn!(script_id = PATH.script_id, "BBC data script not found");
        return Ok(Parsed {
            items: Vec::new(),
            diagnostics: vec![Diagnostic::new(
                Source::Bbc,
                format!("no <script id=\"{}\"> element; no articles extracted", PATH.script_id),
            )],
        });
    };

    let raw: String = script.text().collect();
    match walk(&raw) {
        Ok(items) => {
            debug!(count = items.len(), "Parsed BBC content items");
            Ok(Parsed {
                items,
                diagnostics: Vec::new(),
            })
        }
        Err(reason) => {
            error!(%reason, "Unexpected BBC JSON structure; skipping BBC");
            Ok(Parsed {
                items: Vec::new(),
                diagnostics: vec![Diagnostic::new(
                    Source::Bbc,
                    format!("{reason} - please check the JSON structure"),
                )],
            })
        }
    }
}

/// Walk the embedded blob. Any structural failure aborts the whole walk.
fn walk(raw: &str) -> std::result::Result<Vec<Pending>, String> {
    let data: Json = serde_json::from_str(raw.trim()).map_err(|e| format!("invalid JSON: {e}"))?;

    let sections = schema::require(&data, PATH.sections)?
        .as_array()
        .ok_or("'sections' is not a list")?;

    let mut items = Vec::new();
    for section in sections {
        let content = schema::require(section, &[PATH.items])?
            .as_array()
            .ok_or_else(|| format!("'{}' is not a list", PATH.items))?;

        for entry in content {
            items.push(Pending {
                headline: Some(required_str(entry, "title")?.to_string()),
                link: required_str(entry, "href")?.to_string(),
                description: schema::require(entry, &["description"])?
                    .as_str()
                    .map(str::to_string),
                image: schema::optional(entry, IMAGE_PATH)
                    .and_then(Json::as_str)
                    .map(str::to_string),
            });
        }
    }
    Ok(items)
}

fn required_str<'a>(entry: &'a Json, key: &str) -> std::result::Result<&'a str, String> {
    schema::require(entry, &[key])?
        .as_str()
        .ok_or_else(|| format!("key '{key}' is not a string"))
}

/// Fetch the BBC front page, parse it and classify every title.
///
/// Fetch and classifier failures propagate.
#[instrument(level = "info", skip(fetcher, classifier))]
pub async fn scrape<F: Fetch, C: Classify>(
    fetcher: &F,
    classifier: &C,
    url: &str,
) -> Result<Extraction> {
    let html = fetcher.fetch(url).await?;
    let parsed = parse(&html)?;
    let extraction = categorize_all(Source::Bbc, parsed, classifier).await?;
    info!(count = extraction.records.len(), "Extracted BBC articles");
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FixedLabel;
    use crate::fetch::fixtures::FixtureFetcher;
    use crate::models::Category;
    use serde_json::json;

    fn page_with(data: &Json) -> String {
        format!(
            r#"<html><head><script id="__NEXT_DATA__" type="application/json">{data}</script></head><body></body></html>"#
        )
    }

    fn news(sections: Json) -> Json {
        json!({"props": {"pageProps": {"page": {"@\"news\",": {"sections": sections}}}}})
    }

    #[test]
    fn test_entries_across_sections() {
        let data = news(json!([
            {"content": [
                {
                    "title": "Storm hits coast",
                    "href": "/news/articles/1",
                    "description": "Thousands without power",
                    "image": {"model": {"blocks": {"src": "https://ichef.bbci.co.uk/1.jpg"}}}
                },
                {"title": "Vote count", "href": "/news/articles/2", "description": null}
            ]},
            {"content": [
                {"title": "Transfer news", "href": "/sport/3", "description": "Deadline day", "image": {"model": {}}}
            ]}
        ]));
        let parsed = parse(&page_with(&data)).unwrap();
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.items.len(), 3);

        let first = &parsed.items[0];
        assert_eq!(first.headline.as_deref(), Some("Storm hits coast"));
        assert_eq!(first.link, "/news/articles/1");
        assert_eq!(first.description.as_deref(), Some("Thousands without power"));
        assert_eq!(first.image.as_deref(), Some("https://ichef.bbci.co.uk/1.jpg"));

        assert_eq!(parsed.items[1].description, None);
        assert_eq!(parsed.items[1].image, None);
        assert_eq!(parsed.items[2].image, None);
    }

    #[test]
    fn test_missing_script_yields_empty() {
        let parsed = parse("<html><body><p>No data here</p></body></html>").unwrap();
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn test_malformed_path_yields_empty_with_diagnostic() {
        let data = json!({"props": {"pageProps": {"page": {"@\"sport\",": {"sections": []}}}}});
        let parsed = parse(&page_with(&data)).unwrap();
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("missing key '@\"news\",'"));
    }

    #[test]
    fn test_entry_missing_title_aborts_source() {
        let data = news(json!([
            {"content": [
                {"title": "Fine", "href": "/1", "description": "ok"},
                {"href": "/2", "description": "no title"}
            ]}
        ]));
        let parsed = parse(&page_with(&data)).unwrap();
        assert!(parsed.items.is_empty());
        assert!(parsed.diagnostics[0].message.contains("missing key 'title'"));
    }

    #[test]
    fn test_invalid_json_is_diagnostic() {
        let html = r#"<script id="__NEXT_DATA__">{not json</script>"#;
        let parsed = parse(html).unwrap();
        assert!(parsed.items.is_empty());
        assert!(parsed.diagnostics[0].message.starts_with("invalid JSON"));
    }

    #[tokio::test]
    async fn test_scrape_classifies_titles() {
        let url = Source::Bbc.default_url();
        let data = news(json!([{"content": [
            {"title": "Chip shortage eases", "href": "/news/1", "description": "Supply"}
        ]}]));
        let fetcher = FixtureFetcher::default().with(url, &page_with(&data));
        let out = scrape(&fetcher, &FixedLabel(Category::Tech), url).await.unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].category, "tech");
        assert_eq!(out.records[0].source, Source::Bbc);
        assert_eq!(out.records[0].author, None);
    }

    #[tokio::test]
    async fn test_scrape_fetch_failure_propagates() {
        let fetcher = FixtureFetcher::default();
        let res = scrape(&fetcher, &FixedLabel(Category::Tech), Source::Bbc.default_url()).await;
        assert!(matches!(res, Err(crate::error::Error::Fetch { .. })));
    }
}
