use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::config::HotlistConfig;
use crate::models::Item;

pub mod arxiv;
pub mod github;
pub mod huggingface;
pub mod news;
pub mod pwc;

/// One origin of items. Every adapter makes a single attempt per run and
/// returns fully-formed items (kind, title and url always set); a failure is
/// isolated to that adapter.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &'static str;
    async fn collect(&self) -> Result<Vec<Item>>;
}

/// Explicit per-adapter result, so the orchestrator can log failures and
/// concatenate successes without a blanket catch-all.
pub struct SourceOutcome {
    pub source: &'static str,
    pub result: Result<Vec<Item>>,
}

/// Every adapter this build knows about, configured for one run.
pub fn build_adapters(config: &HotlistConfig) -> Result<Vec<Box<dyn SourceAdapter>>> {
    Ok(vec![
        Box::new(news::NewsFeeds::new(config)?),
        Box::new(arxiv::ArxivSearch::new(config)?),
        Box::new(pwc::PwcTrending::new(config)?),
        Box::new(github::GitHubSearch::new(config)?),
        Box::new(github::GitHubTrending::new(config)?),
        Box::new(huggingface::HfModels::new(config)?),
        Box::new(huggingface::HfDatasets::new(config)?),
    ])
}

/// Fetch from all adapters with bounded concurrency. `buffered` (not
/// unordered) keeps outcome order aligned with adapter registration, which
/// keeps the deduplicator's first-writer rule reproducible across runs.
pub async fn collect_all(adapters: Vec<Box<dyn SourceAdapter>>) -> Vec<SourceOutcome> {
    stream::iter(adapters)
        .map(|adapter| async move {
            let source = adapter.name();
            let result = adapter.collect().await;
            SourceOutcome { source, result }
        })
        .buffered(4)
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use anyhow::anyhow;

    struct StaticSource {
        name: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl SourceAdapter for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn collect(&self) -> Result<Vec<Item>> {
            if self.fail {
                Err(anyhow!("connection refused"))
            } else {
                Ok(vec![Item::new(ItemType::News, self.name, "https://x")])
            }
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_adapter() {
        let adapters: Vec<Box<dyn SourceAdapter>> = vec![
            Box::new(StaticSource { name: "first", fail: false }),
            Box::new(StaticSource { name: "broken", fail: true }),
            Box::new(StaticSource { name: "third", fail: false }),
        ];

        let outcomes = collect_all(adapters).await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_outcomes_keep_registration_order() {
        let adapters: Vec<Box<dyn SourceAdapter>> = vec![
            Box::new(StaticSource { name: "a", fail: false }),
            Box::new(StaticSource { name: "b", fail: false }),
            Box::new(StaticSource { name: "c", fail: false }),
        ];

        let outcomes = collect_all(adapters).await;
        let names: Vec<&str> = outcomes.iter().map(|o| o.source).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
