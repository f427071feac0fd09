use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::config::HotlistConfig;
use crate::models::{Item, ItemType};
use crate::normalize::{days_ago, parse_date, within_days};

use super::SourceAdapter;

const GITHUB_API: &str = "https://api.github.com";

/// Repositories created inside the window, via the REST search API.
/// An API token is optional; unauthenticated requests just rate-limit sooner.
pub struct GitHubSearch {
    client: Client,
    days: i64,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepoRow>,
}

#[derive(Debug, Deserialize)]
struct RepoRow {
    full_name: Option<String>,
    html_url: Option<String>,
    description: Option<String>,
    created_at: Option<String>,
    stargazers_count: Option<f64>,
    forks_count: Option<f64>,
    language: Option<String>,
}

impl GitHubSearch {
    pub fn new(config: &HotlistConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; AiHotlist/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            days: config.days,
            token: config.github_token(),
        })
    }
}

#[async_trait]
impl SourceAdapter for GitHubSearch {
    fn name(&self) -> &'static str {
        "GitHub search"
    }

    async fn collect(&self) -> Result<Vec<Item>> {
        let since = days_ago(self.days).format("%Y-%m-%d").to_string();
        let query = format!("created:>={}", since);
        let url = format!(
            "{}/search/repositories?q={}&sort=stars&order=desc&per_page=100",
            GITHUB_API,
            urlencoding::encode(&query)
        );

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let data: SearchResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse GitHub search response")?;

        let mut items = Vec::new();
        for row in data.items {
            let (Some(full_name), Some(html_url)) = (row.full_name, row.html_url) else {
                continue;
            };
            let created = row.created_at.as_deref().and_then(parse_date);
            if !within_days(created.as_ref(), self.days) {
                continue;
            }

            let mut item = Item::new(ItemType::OpenSource, full_name, html_url);
            item.summary = row.description;
            item.date = created;
            item.source = "GitHub".to_string();
            item.metrics.set_opt_num("stars", row.stargazers_count);
            item.metrics.set_opt_num("forks", row.forks_count);
            item.metrics.set_opt_text("language", row.language);
            items.push(item);
        }
        Ok(items)
    }
}

/// The monthly trending page, which has no API. Markup extraction is
/// deliberately lenient: anything that does not match yields an absent metric
/// rather than an error.
pub struct GitHubTrending {
    client: Client,
    url: String,
}

impl GitHubTrending {
    pub fn new(config: &HotlistConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; AiHotlist/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.github_trending_url.clone(),
        })
    }
}

#[async_trait]
impl SourceAdapter for GitHubTrending {
    fn name(&self) -> &'static str {
        "GitHub trending"
    }

    async fn collect(&self) -> Result<Vec<Item>> {
        let html = self
            .client
            .get(&self.url)
            .header("Accept", "text/html,application/xhtml+xml")
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
    let row_sel = sel("article.Box-row")?;
    let link_sel = sel("h2 a")?;
    let lang_sel = sel("span[itemprop='programmingLanguage']")?;

    let mut items = Vec::new();
    for (index, row) in doc.select(&row_sel).enumerate() {
        let rank = (index + 1) as f64;
        let Some(link) = row.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let full_name = href.trim_matches('/').to_string();
        if full_name.is_empty() {
            continue;
        }

        let language = row
            .select(&lang_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        let mut item = Item::new(
            ItemType::OpenSource,
            full_name,
            format!("https://github.com/{}", href.trim_matches('/')),
        );
        item.source = "GitHub Trending".to_string();
        item.metrics.set_num("trending_rank", rank);
        item.metrics.set_opt_num("new_stars", extract_new_stars(&row));
        item.metrics.set_opt_text("language", language);
        items.push(item);
    }
    Ok(items)
}

/// Best-effort read of the "N stars this month" line. The markup shifts over
/// time; on any mismatch the metric is simply absent.
fn extract_new_stars(row: &scraper::ElementRef) -> Option<f64> {
    for text in row.text() {
        let lower = text.to_lowercase();
        if lower.contains("stars this") || (lower.contains("stars") && lower.contains("since")) {
            let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                return None;
            }
            return digits.parse::<f64>().ok();
        }
    }
    None
}
