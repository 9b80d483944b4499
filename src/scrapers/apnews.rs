//! AP News front page scraper.
//!
//! Articles are `PagePromo` blocks on <https://apnews.com/>. Text fields are
//! stripped fragment by fragment. A promo without an `a.Link` href cannot
//! produce a record; it is skipped and reported instead of failing the
//! source.

use super::{Parsed, Pending, categorize_all};
use crate::classify::Classify;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{Diagnostic, Extraction, Source};
use crate::schema::{self, Field, FieldSpec};
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

const CONTAINER: &str = "div.PagePromo";

struct ApSchema {
    headline: FieldSpec,
    link: FieldSpec,
    description: FieldSpec,
    srcset: FieldSpec,
}

const SCHEMA: ApSchema = ApSchema {
    headline: FieldSpec::stripped("h3.PagePromo-title"),
    link: FieldSpec::attr("a.Link", "href"),
    description: FieldSpec::stripped("div.PagePromo-description"),
    srcset: FieldSpec::attr("img.Image", "srcset"),
};

struct Compiled {
    container: Selector,
    headline: Field,
    link: Field,
    description: Field,
    srcset: Field,
}

impl Compiled {
    fn new() -> Result<Self> {
        Ok(Self {
            container: schema::selector(CONTAINER)?,
            headline: SCHEMA.headline.compile()?,
            link: SCHEMA.link.compile()?,
            description: SCHEMA.description.compile()?,
            srcset: SCHEMA.srcset.compile()?,
        })
    }
}

/// URL of the first candidate in a `srcset` attribute.
///
/// `"url1 100w, url2 200w"` gives `url1`. The first candidate is split on
/// single spaces, so an empty attribute or a leading space gives `""`.
pub fn first_srcset_url(srcset: &str) -> String {
    let candidate = srcset.split(',').next().unwrap_or_default();
    candidate.split(' ').next().unwrap_or_default().to_string()
}

/// Parse the AP News front page into records awaiting classification.
pub fn parse(html: &str) -> Result<Parsed> {
    let compiled = Compiled::new()?;
    let document = Html::parse_document(html);

    let mut parsed = Parsed::default();
    let mut matched = 0usize;

    for (index, promo) in document.select(&compiled.container).enumerate() {
        matched += 1;
        let headline = compiled.headline.extract(promo);

        let Some(link) = compiled.link.extract(promo) else {
            warn!(index, ?headline, "AP promo has no link; skipping");
            parsed.diagnostics.push(Diagnostic::new(
                Source::ApNews,
                format!(
                    "promo #{index} ({}) has no a.Link href; skipped",
                    headline.as_deref().unwrap_or("no headline")
                ),
            ));
            continue;
        };

        parsed.items.push(Pending {
            headline,
            link,
            description: compiled.description.extract(promo),
            image: compiled
                .srcset
                .extract(promo)
                .map(|s| first_srcset_url(&s)),
        });
    }

    parsed
        .diagnostics
        .extend(schema::check_containers(Source::ApNews, CONTAINER, matched));

    debug!(matched, kept = parsed.items.len(), "Parsed AP promos");
    Ok(parsed)
}

/// Fetch the AP News front page, parse it and classify every headline.
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
    let extraction = categorize_all(Source::ApNews, parsed, classifier).await?;
    info!(count = extraction.records.len(), "Extracted AP News articles");
    Ok(extraction)
}
