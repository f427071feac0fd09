use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::config::HotlistConfig;
use crate::models::{Item, ItemType};
use crate::normalize::parse_date;

use super::SourceAdapter;

/// Papers with Code trending page. Scraped markup, so extraction is
/// best-effort: cards missing a title or link are skipped.
pub struct PwcTrending {
    client: Client,
    url: String,
}

impl PwcTrending {
    pub fn new(config: &HotlistConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .user_agent("Mozilla/5.0 (compatible; AiHotlist/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.pwc_trending_url.clone(),
        })
    }
}

#[async_trait]
impl SourceAdapter for PwcTrending {
    fn name(&self) -> &'static str {
        "Papers with Code trending"
    }

    async fn collect(&self) -> Result<Vec<Item>> {
        let html = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_trending(&html)
    }
}

fn sel(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector {}: {}", selector, e))
}

fn parse_trending(html: &str) -> Result<Vec<Item>> {
    let doc = Html::parse_document(html);
    let card_sel = sel("div.paper-card")?;
    let h1_sel = sel("h1 a")?;
    let h2_sel = sel("h2 a")?;
    let abstract_sel = sel("p.item-strip-abstract")?;
    let date_sel = sel("span[itemprop='datePublished']")?;

    let mut items = Vec::new();
    for (index, card) in doc.select(&card_sel).enumerate() {
        let rank = (index + 1) as f64;
        let Some(title_el) = card
            .select(&h1_sel)
            .next()
            .or_else(|| card.select(&h2_sel).next())
        else {
            continue;
        };
        let title = element_text(&title_el);
        let Some(href) = title_el.value().attr("href") else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let mut item = Item::new(
            ItemType::Paper,
            title,
            format!("https://paperswithcode.com{}", href),
        );
        item.summary = card
            .select(&abstract_sel)
            .next()
            .map(|el| element_text(&el));
        item.date = card
            .select(&date_sel)
            .next()
            .and_then(|el| parse_date(&element_text(&el)));
        item.source = "Papers with Code".to_string();
        item.metrics.set_num("pwc_trending_rank", rank);
        items.push(item);
    }
    Ok(items)
}

fn element_text(el: &scraper::ElementRef) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SAMPLE: &str = r#"
        <html><body>
        <div class="paper-card">
          <h1><a href="/paper/first">First  Trending
            Paper</a></h1>
          <p class="item-strip-abstract">A promising approach.</p>
          <span itemprop="datePublished">2026-07-30</span>
        </div>
        <div class="paper-card">
          <h2><a href="/paper/second">Second Paper</a></h2>
        </div>
        <div class="paper-card">
          <p class="item-strip-abstract">No title here.</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_trending_cards() {
        let items = parse_trending(SAMPLE).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "First Trending Paper");
        assert_eq!(items[0].url, "https://paperswithcode.com/paper/first");
        assert_eq!(items[0].summary.as_deref(), Some("A promising approach."));
        assert_eq!(
            items[0].date,
            Some(Utc.with_ymd_and_hms(2026, 7, 30, 0, 0, 0).unwrap())
        );
        assert_eq!(items[0].metrics.num("pwc_trending_rank"), Some(1.0));

        // h2 fallback, no abstract or date
        assert_eq!(items[1].title, "Second Paper");
        assert_eq!(items[1].summary, None);
        assert_eq!(items[1].date, None);
        assert_eq!(items[1].metrics.num("pwc_trending_rank"), Some(2.0));
    }

    #[test]
    fn test_unrecognized_markup_yields_empty_not_error() {
        let items = parse_trending("<html><body><p>redesigned page</p></body></html>").unwrap();
        assert!(items.is_empty());
    }
}
