use anyhow::{Context, Result};
use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;

use crate::config::HotlistConfig;
use crate::models::{Item, ItemType};
use crate::normalize::{normalize_url, within_days};

use super::SourceAdapter;

/// Editorial weight per known outlet; anything else weighs 1.
const SOURCE_WEIGHTS: &[(&str, f64)] = &[
    ("QbitAI", 3.0),
    ("Synced", 3.0),
    ("AI Frontline", 2.0),
    ("36Kr", 2.0),
    ("TMTPost", 2.0),
    ("OpenAI", 3.0),
    ("Google AI Blog", 3.0),
];

/// RSS/Atom news feeds. A dead or malformed feed only skips that feed.
pub struct NewsFeeds {
    client: Client,
    feeds: Vec<String>,
    days: i64,
}

impl NewsFeeds {
    pub fn new(config: &HotlistConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; AiHotlist/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            feeds: config.rss_feeds.clone(),
            days: config.days,
        })
    }

    async fn collect_feed(&self, feed_url: &str) -> Result<Vec<Item>> {
        let body = self
            .client
            .get(feed_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let feed = parser::parse(body.as_ref())
            .with_context(|| format!("Failed to parse feed {}", feed_url))?;
        let feed_title = feed.title.map(|t| t.content);
        let source = source_label(feed_url, feed_title.as_deref());
        let weight = source_weight(&source);

        let mut items = Vec::new();
        for entry in feed.entries {
            let Some(link) = entry.links.first().map(|l| normalize_url(&l.href)) else {
                continue;
            };
            let title = entry.title.map(|t| t.content).unwrap_or_default();
            if title.is_empty() {
                continue;
            }
            let published = entry.published.or(entry.updated);
            if !within_days(published.as_ref(), self.days) {
                continue;
            }

            let mut item = Item::new(ItemType::News, title, link);
            item.summary = entry.summary.map(|s| flatten_html(&s.content));
            item.date = published;
            item.source = source.clone();
            item.metrics.set_num("source_weight", weight);
            items.push(item);
        }
        Ok(items)
    }
}

#[async_trait]
impl SourceAdapter for NewsFeeds {
    fn name(&self) -> &'static str {
        "news feeds"
    }

    async fn collect(&self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        for feed_url in &self.feeds {
            match self.collect_feed(feed_url).await {
                Ok(mut batch) => items.append(&mut batch),
                Err(e) => eprintln!("  ⚠ Skipping feed {}: {:#}", feed_url, e),
            }
        }
        Ok(items)
    }
}

/// Feed summaries routinely carry markup; flatten to a single plain-text line.
fn flatten_html(html: &str) -> String {
    let text = html2text::from_read(html.as_bytes(), 400);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stable labels for known hosts (they key the weight table), then the feed's
/// own title, then the bare host.
fn source_label(feed_url: &str, feed_title: Option<&str>) -> String {
    let host = url::Url::parse(feed_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));

    if let Some(host) = host.as_deref() {
        if host.contains("qbitai") {
            return "QbitAI".to_string();
        }
        if host.contains("openai.com") {
            return "OpenAI".to_string();
        }
        if host.contains("googleblog") {
            return "Google AI Blog".to_string();
        }
    }
    if let Some(title) = feed_title {
        if !title.trim().is_empty() {
            return title.trim().to_string();
        }
    }
    host.unwrap_or_else(|| "RSS".to_string())
}

fn source_weight(source: &str) -> f64 {
    SOURCE_WEIGHTS
        .iter()
        .find(|(name, _)| *name == source)
        .map(|(_, w)| *w)
        .unwrap_or(1.0)
}
