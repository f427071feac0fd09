use anyhow::{Context, Result};
use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;

use crate::config::HotlistConfig;
use crate::models::{Item, ItemType};
use crate::normalize::within_days;

use super::SourceAdapter;

const ARXIV_API: &str = "http://export.arxiv.org/api/query";
const ARXIV_CATEGORIES: &[&str] = &["cs.CL", "cs.LG", "cs.CV", "cs.AI"];
const MAX_RESULTS: usize = 200;

/// Recent preprints from the arXiv Atom export API.
pub struct ArxivSearch {
    client: Client,
    days: i64,
}

impl ArxivSearch {
    pub fn new(config: &HotlistConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; AiHotlist/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            days: config.days,
        })
    }
}

#[async_trait]
impl SourceAdapter for ArxivSearch {
    fn name(&self) -> &'static str {
        "arXiv"
    }

    async fn collect(&self) -> Result<Vec<Item>> {
        let query = ARXIV_CATEGORIES
            .iter()
            .map(|c| format!("cat:{}", c))
            .collect::<Vec<_>>()
            .join(" OR ");
        let url = format!(
            "{}?search_query={}&sortBy=submittedDate&sortOrder=descending&max_results={}",
            ARXIV_API,
            urlencoding::encode(&query),
            MAX_RESULTS
        );

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let feed = parser::parse(body.as_ref()).context("Failed to parse arXiv response")?;

        let mut items = Vec::new();
        for entry in feed.entries {
            let published = entry.published.or(entry.updated);
            if !within_days(published.as_ref(), self.days) {
                continue;
            }
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_else(|| entry.id.clone());
            let title = entry
                .title
                .map(|t| collapse_whitespace(&t.content))
                .unwrap_or_default();
            if title.is_empty() {
                continue;
            }

            let mut item = Item::new(ItemType::Paper, title, link);
            item.summary = entry.summary.map(|s| collapse_whitespace(&s.content));
            item.date = published;
            item.source = "arXiv".to_string();
            item.metrics.set_num("authors", entry.authors.len() as f64);
            let categories = entry
                .categories
                .iter()
                .map(|c| c.term.clone())
                .collect::<Vec<_>>()
                .join(",");
            if !categories.is_empty() {
                item.metrics.set_text("categories", categories);
            }
            items.push(item);
        }
        Ok(items)
    }
}

/// Titles and abstracts arrive with hard line wraps.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
