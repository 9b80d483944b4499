//! Vogue fashion section scraper.
//!
//! Articles are `SummaryItemWrapper` cards on <https://www.vogue.com/fashion>.
//! Nothing here ever fails mid-record: a missing headline, link, byline or
//! image becomes a fixed sentinel string. Every record is `fashion`.

use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{ArticleRecord, Category, Diagnostic, Extraction, Source};
use crate::schema::{self, Field, FieldSpec};
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

pub const NO_HEADLINE: &str = "No headline available";
pub const NO_LINK: &str = "No link available";
pub const NO_AUTHOR: &str = "Unknown author";
pub const NO_IMAGE: &str = "No image available";

const CONTAINER: &str = "div.SummaryItemWrapper-iwvBff";

struct VogueSchema {
    headline: FieldSpec,
    link: FieldSpec,
    author: FieldSpec,
    image: FieldSpec,
}

const SCHEMA: VogueSchema = VogueSchema {
    headline: FieldSpec::text("h3"),
    link: FieldSpec::attr("a", "href"),
    author: FieldSpec::text("p.Byline-iwvBff"),
    image: FieldSpec::attr("img", "src"),
};

struct Compiled {
    container: Selector,
    headline: Field,
    link: Field,
    author: Field,
    image: Field,
}

impl Compiled {
    fn new() -> Result<Self> {
        Ok(Self {
            container: schema::selector(CONTAINER)?,
            headline: SCHEMA.headline.compile()?,
            link: SCHEMA.link.compile()?,
            author: SCHEMA.author.compile()?,
            image: SCHEMA.image.compile()?,
        })
    }
}

/// Parse a Vogue section page into records, one per card.
pub fn parse(html: &str) -> Result<Extraction> {
    let compiled = Compiled::new()?;
    let document = Html::parse_document(html);

    let records: Vec<ArticleRecord> = document
        .select(&compiled.container)
        .map(|card| ArticleRecord {
            headline: Some(
                compiled
                    .headline
                    .extract(card)
                    .unwrap_or_else(|| NO_HEADLINE.to_string()),
            ),
            link: compiled.link.extract(card).unwrap_or_else(|| NO_LINK.to_string()),
            author: Some(
                compiled
                    .author
                    .extract(card)
                    .unwrap_or_else(|| NO_AUTHOR.to_string()),
            ),
            description: None,
            image: Some(compiled.image.extract(card).unwrap_or_else(|| NO_IMAGE.to_string())),
            category: Category::Fashion.to_string(),
            source: Source::Vogue,
        })
        .collect();

    let diagnostics = schema::check_containers(Source::Vogue, CONTAINER, records.len())
        .into_iter()
        .collect();

    debug!(count = records.len(), "Parsed Vogue cards");
    Ok(Extraction {
        records,
        diagnostics,
    })
}

/// Fetch and parse the Vogue fashion page.
///
/// A failed fetch degrades to an empty extraction with a diagnostic.
#[instrument(level = "info", skip(fetcher))]
pub async fn scrape<F: Fetch>(fetcher: &F, url: &str) -> Result<Extraction> {
    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Vogue fetch failed; continuing without Vogue");
            return Ok(Extraction::failed(Diagnostic::new(Source::Vogue, e.to_string())));
        }
    };

    let extraction = parse(&html)?;
    info!(count = extraction.records.len(), "Extracted Vogue articles");
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fixtures::FixtureFetcher;

    const FULL_CARD: &str = r#"
        <div class="SummaryItemWrapper-iwvBff">
          <a href="/article/met-gala-looks"><h3>Met Gala looks</h3></a>
          <p class="Byline-iwvBff">By Anna Smith</p>
          <img src="https://assets.vogue.com/met.jpg">
        </div>"#;

    fn page(cards: &[&str]) -> String {
        format!("<html><body>{}</body></html>", cards.join("\n"))
    }

    #[test]
    fn test_full_card() {
        let out = parse(&page(&[FULL_CARD])).unwrap();
        assert_eq!(out.records.len(), 1);
        assert!(out.diagnostics.is_empty());

        let r = &out.records[0];
        assert_eq!(r.headline.as_deref(), Some("Met Gala looks"));
        assert_eq!(r.link, "/article/met-gala-looks");
        assert_eq!(r.author.as_deref(), Some("By Anna Smith"));
        assert_eq!(r.image.as_deref(), Some("https://assets.vogue.com/met.jpg"));
        assert_eq!(r.description, None);
        assert_eq!(r.category, "fashion");
        assert_eq!(r.source, Source::Vogue);
    }

    #[test]
    fn test_each_missing_field_gets_its_sentinel() {
        let no_headline = r#"<div class="SummaryItemWrapper-iwvBff">
            <a href="/a">x</a><p class="Byline-iwvBff">A</p><img src="i.jpg"></div>"#;
        let no_link = r#"<div class="SummaryItemWrapper-iwvBff">
            <h3>H</h3><p class="Byline-iwvBff">A</p><img src="i.jpg"></div>"#;
        let no_author = r#"<div class="SummaryItemWrapper-iwvBff">
            <h3>H</h3><a href="/a">x</a><img src="i.jpg"></div>"#;
        let no_image = r#"<div class="SummaryItemWrapper-iwvBff">
            <h3>H</h3><a href="/a">x</a><p class="Byline-iwvBff">A</p></div>"#;

        let out = parse(&page(&[no_headline, no_link, no_author, no_image])).unwrap();
        assert_eq!(out.records.len(), 4);

        let r = &out.records[0];
        assert_eq!(r.headline.as_deref(), Some(NO_HEADLINE));
        assert_eq!(r.link, "/a");
        assert_eq!(r.author.as_deref(), Some("A"));
        assert_eq!(r.image.as_deref(), Some("i.jpg"));

        let r = &out.records[1];
        assert_eq!(r.headline.as_deref(), Some("H"));
        assert_eq!(r.link, NO_LINK);
        assert_eq!(r.author.as_deref(), Some("A"));

        let r = &out.records[2];
        assert_eq!(r.author.as_deref(), Some(NO_AUTHOR));
        assert_eq!(r.link, "/a");
        assert_eq!(r.image.as_deref(), Some("i.jpg"));

        let r = &out.records[3];
        assert_eq!(r.image.as_deref(), Some(NO_IMAGE));
        assert_eq!(r.headline.as_deref(), Some("H"));
    }

    #[test]
    fn test_anchor_without_href_is_sentinel() {
        let card = r#"<div class="SummaryItemWrapper-iwvBff"><h3>H</h3><a name="top">x</a></div>"#;
        let out = parse(&page(&[card])).unwrap();
        assert_eq!(out.records[0].link, NO_LINK);
    }

    #[test]
    fn test_record_count_matches_cards_and_ignores_other_divs() {
        let out = parse(&page(&[FULL_CARD, FULL_CARD, "<div class=\"Other\"><h3>no</h3></div>", FULL_CARD]))
            .unwrap();
        assert_eq!(out.records.len(), 3);
    }

    #[test]
    fn test_no_cards_reports_layout_drift() {
        let out = parse(&page(&["<div class=\"Redesigned\"></div>"])).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.diagnostics.len(), 1);
        assert!(out.diagnostics[0].message.contains(CONTAINER));
    }

    #[tokio::test]
    async fn test_scrape_fetch_failure_degrades() {
        let fetcher = FixtureFetcher::default();
        let out = scrape(&fetcher, Source::Vogue.default_url()).await.unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].source, Source::Vogue);
    }

    #[tokio::test]
    async fn test_scrape_parses_fetched_page() {
        let url = Source::Vogue.default_url();
        let fetcher = FixtureFetcher::default().with(url, &page(&[FULL_CARD, FULL_CARD]));
        let out = scrape(&fetcher, url).await.unwrap();
        assert_eq!(out.records.len(), 2);
    }
}
