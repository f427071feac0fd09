use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::HotlistConfig;
use crate::models::{Item, ItemType};
use crate::normalize::{parse_date, within_days};

use super::SourceAdapter;

const LISTING_LIMIT: usize = 100;

fn listing_client() -> Result<Client> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent("Mozilla/5.0 (compatible; AiHotlist/1.0)")
        .build()
        .context("Failed to create HTTP client")
}

fn listing_url(endpoint: &str) -> String {
    format!(
        "{}?sort=lastModified&direction=-1&limit={}",
        endpoint, LISTING_LIMIT
    )
}

/// Recently updated models from the Hugging Face hub listing API.
pub struct HfModels {
    client: Client,
    endpoint: String,
    days: i64,
}

#[derive(Debug, Deserialize)]
struct ModelRow {
    #[serde(rename = "modelId")]
    model_id: Option<String>,
    id: Option<String>,
    downloads: Option<f64>,
    likes: Option<f64>,
    pipeline_tag: Option<String>,
    #[serde(rename = "lastModified")]
    last_modified: Option<String>,
    #[serde(rename = "downloadsLastMonth")]
    downloads_last_month: Option<f64>,
}

impl HfModels {
    pub fn new(config: &HotlistConfig) -> Result<Self> {
        Ok(Self {
            client: listing_client()?,
            endpoint: config.hf_models_endpoint.clone(),
            days: config.days,
        })
    }
}

#[async_trait]
impl SourceAdapter for HfModels {
    fn name(&self) -> &'static str {
        "Hugging Face models"
    }

    async fn collect(&self) -> Result<Vec<Item>> {
        let rows: Vec<ModelRow> = self
            .client
            .get(listing_url(&self.endpoint))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Hugging Face models response")?;

        let mut items = Vec::new();
        for row in rows {
            let Some(name) = row.model_id.or(row.id) else {
                continue;
            };
            let last_modified = row.last_modified.as_deref().and_then(parse_date);
            if !within_days(last_modified.as_ref(), self.days) {
                continue;
            }

            let mut item = Item::new(
                ItemType::Model,
                name.clone(),
                format!("https://huggingface.co/{}", name),
            );
            item.date = last_modified;
            item.source = "Hugging Face".to_string();
            item.metrics.set_opt_num("downloads", row.downloads);
            item.metrics.set_opt_num("downloads_last_month", row.downloads_last_month);
            item.metrics.set_opt_num("likes", row.likes);
            item.metrics.set_opt_text("pipeline_tag", row.pipeline_tag);
            items.push(item);
        }
        Ok(items)
    }
}

/// Recently updated datasets; emitted as `model` items (the combined report
/// bucket treats models and datasets alike), distinguished by source and URL.
pub struct HfDatasets {
    client: Client,
    endpoint: String,
    days: i64,
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    id: Option<String>,
    downloads: Option<f64>,
    likes: Option<f64>,
    #[serde(rename = "lastModified")]
    last_modified: Option<String>,
    #[serde(rename = "downloadsLastMonth")]
    downloads_last_month: Option<f64>,
    #[serde(rename = "cardData")]
    card_data: Option<serde_json::Value>,
}

impl HfDatasets {
    pub fn new(config: &HotlistConfig) -> Result<Self> {
        Ok(Self {
            client: listing_client()?,
            endpoint: config.hf_datasets_endpoint.clone(),
            days: config.days,
        })
    }
}

#[async_trait]
impl SourceAdapter for HfDatasets {
    fn name(&self) -> &'static str {
        "Hugging Face datasets"
    }

    async fn collect(&self) -> Result<Vec<Item>> {
        let rows: Vec<DatasetRow> = self
            .client
            .get(listing_url(&self.endpoint))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Hugging Face datasets response")?;

        let mut items = Vec::new();
        for row in rows {
            let Some(name) = row.id else {
                continue;
            };
            let last_modified = row.last_modified.as_deref().and_then(parse_date);
            if !within_days(last_modified.as_ref(), self.days) {
                continue;
            }

            let mut item = Item::new(
                ItemType::Model,
                name.clone(),
                format!("https://huggingface.co/datasets/{}", name),
            );
            item.date = last_modified;
            item.source = "Hugging Face Datasets".to_string();
            item.metrics.set_opt_num("downloads", row.downloads);
            item.metrics.set_opt_num("downloads_last_month", row.downloads_last_month);
            item.metrics.set_opt_num("likes", row.likes);
            item.metrics
                .set_opt_text("task", task_categories(row.card_data.as_ref()));
            items.push(item);
        }
        Ok(items)
    }
}

/// Dataset cards store task categories as a list, a single string, or not at
/// all; read whatever is there.
fn task_categories(card_data: Option<&serde_json::Value>) -> Option<String> {
    let value = card_data?.get("task_categories")?;
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(values) => {
            let tasks: Vec<&str> = values.iter().filter_map(|v| v.as_str()).collect();
            if tasks.is_empty() {
                None
            } else {
                Some(tasks.join(","))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_categories_reads_list_or_string() {
        let list = json!({"task_categories": ["text-generation", "summarization"]});
        assert_eq!(
            task_categories(Some(&list)),
            Some("text-generation,summarization".to_string())
        );

        let single = json!({"task_categories": "translation"});
        assert_eq!(task_categories(Some(&single)), Some("translation".to_string()));
    }

    #[test]
    fn test_task_categories_tolerates_anything_else() {
        assert_eq!(task_categories(None), None);
        assert_eq!(task_categories(Some(&json!({}))), None);
        assert_eq!(task_categories(Some(&json!({"task_categories": 7}))), None);
        assert_eq!(task_categories(Some(&json!({"task_categories": []}))), None);
    }

    #[test]
    fn test_model_rows_tolerate_missing_fields() {
        let rows: Vec<ModelRow> =
            serde_json::from_str(r#"[{"modelId": "org/model-x"}, {"downloads": 5}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model_id.as_deref(), Some("org/model-x"));
        assert!(rows[1].model_id.is_none() && rows[1].id.is_none());
    }
}
