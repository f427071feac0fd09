use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use crate::config::HotlistConfig;
use crate::dedup::deduplicate;
use crate::filter::filter_by_keywords;
use crate::io;
use crate::models::{Digest, Item, ItemType};
use crate::report::ReportGenerator;
use crate::scoring::score_item;
use crate::sources;
use crate::summarizer;

#[derive(Debug)]
pub struct RunCounts {
    pub total: usize,
    pub news: usize,
    pub papers: usize,
    pub open_source_and_models: usize,
}

#[derive(Debug)]
pub struct RunSummary {
    pub raw_path: PathBuf,
    pub aggregated_path: PathBuf,
    pub report_path: PathBuf,
    pub counts: RunCounts,
}

/// One full batch run: collect from every source, assemble the digest, write
/// the artifacts. Losing sources degrades the digest; failing to write it
/// fails the run.
pub async fn run(config: &HotlistConfig) -> Result<RunSummary> {
    io::ensure_dirs(&[&config.output_dir_data, &config.output_dir_reports])?;

    let adapters = sources::build_adapters(config)?;
    let outcomes = sources::collect_all(adapters).await;

    let mut items: Vec<Item> = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(batch) => {
                println!("✓ {}: {} items", outcome.source, batch.len());
                items.extend(batch);
            }
            Err(e) => eprintln!("⚠ {} failed: {:#}", outcome.source, e),
        }
    }

    let date_stamp = Utc::now().format("%Y%m%d").to_string();
    let (raw, digest) = assemble(items, &date_stamp, config);

    let raw_path = io::dump_json(
        &config.output_dir_data,
        &format!("ai_hotlist_raw_{}.json", date_stamp),
        &raw,
    )?;
    let aggregated_path = io::dump_json(
        &config.output_dir_data,
        &format!("ai_hotlist_{}.json", date_stamp),
        &digest,
    )?;
    let report = ReportGenerator::generate(&digest);
    let report_path = io::dump_text(
        &config.output_dir_reports,
        &format!("ai-hotlist-{}.md", date_stamp),
        &report,
    )?;

    Ok(RunSummary {
        raw_path,
        aggregated_path,
        report_path,
        counts: RunCounts {
            total: raw.len(),
            news: digest.news.len(),
            papers: digest.papers.len(),
            open_source_and_models: digest.open_source_and_models.len(),
        },
    })
}

/// The pure post-collection pipeline: filter, dedup, score and summarize,
/// sort, bucket and cap. Returns the full scored list (the raw artifact) and
/// the capped digest.
pub fn assemble(items: Vec<Item>, date_stamp: &str, config: &HotlistConfig) -> (Vec<Item>, Digest) {
    let items = filter_by_keywords(items, &config.allowlist, &config.denylist);
    let mut items = deduplicate(items);

    for item in &mut items {
        item.score = Some(score_item(item));
        summarizer::apply(item);
    }

    // Stable sort: equal scores keep their collection order, so reruns over
    // the same input render identically.
    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let (mut news, mut papers, mut oss) = categorize(&items);
    news.truncate(config.max_items_per_section);
    papers.truncate(config.max_items_per_section);
    oss.truncate(config.max_items_per_section);

    let digest = Digest {
        date: date_stamp.to_string(),
        news,
        papers,
        open_source_and_models: oss,
    };
    (items, digest)
}

/// Three report buckets: things you read (news, papers) stay apart; things
/// you can use (open-source and models) share one bucket.
fn categorize(items: &[Item]) -> (Vec<Item>, Vec<Item>, Vec<Item>) {
    let mut news = Vec::new();
    let mut papers = Vec::new();
    let mut oss = Vec::new();

    for item in items {
        match item.kind {
            ItemType::News => news.push(item.clone()),
            ItemType::Paper => papers.push(item.clone()),
            ItemType::OpenSource | ItemType::Model => oss.push(item.clone()),
            ItemType::Other => {}
        }
    }
    (news, papers, oss)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HotlistConfig {
        HotlistConfig::default()
    }

    fn item(kind: ItemType, title: &str, url: &str) -> Item {
        Item::new(kind, title, url)
    }

    // ==================== Bucket Tests ====================

    #[test]
    fn test_bucket_partition_one_of_each() {
        let items = vec![
            item(ItemType::News, "n", "https://n"),
            item(ItemType::Paper, "p", "https://p"),
            item(ItemType::OpenSource, "o", "https://o"),
            item(ItemType::Model, "m", "https://m"),
        ];
        let (_, digest) = assemble(items, "20260801", &config());
        assert_eq!(digest.news.len(), 1);
        assert_eq!(digest.papers.len(), 1);
        assert_eq!(digest.open_source_and_models.len(), 2);
    }

    #[test]
    fn test_per_bucket_cap_keeps_highest_scored() {
        let mut items = Vec::new();
        for i in 0..150 {
            let mut it = item(ItemType::Paper, &format!("paper {}", i), "");
            // Distinct descending scores via author counts under the cap.
            it.metrics.set_num("authors", (150 - i) as f64 / 20.0);
            items.push(it);
        }
        let (raw, digest) = assemble(items, "20260801", &config());

        assert_eq!(raw.len(), 150);
        assert_eq!(digest.papers.len(), 100);
        // The cap discards the lowest-scored tail.
        let min_kept = digest.papers.last().unwrap().score.unwrap();
        assert!(raw[100..].iter().all(|i| i.score.unwrap() <= min_kept));
        assert_eq!(digest.papers[0].title, "paper 0");
    }

    #[test]
    fn test_sort_is_stable_for_equal_scores() {
        let items = vec![
            item(ItemType::News, "first", "https://1"),
            item(ItemType::News, "second", "https://2"),
            item(ItemType::News, "third", "https://3"),
        ];
        let (raw, _) = assemble(items, "20260801", &config());
        let titles: Vec<&str> = raw.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    // ==================== End-to-End Assembly Tests ====================

    #[test]
    fn test_duplicate_titles_merge_before_bucketing() {
        let mut a = item(ItemType::OpenSource, "Foo", "https://x/foo");
        a.metrics.set_num("stars", 100.0);
        let mut b = item(ItemType::OpenSource, "foo", "https://x/foo");
        b.metrics.set_num("stars", 150.0);

        let (raw, digest) = assemble(vec![a, b], "20260801", &config());

        assert_eq!(raw.len(), 1);
        assert_eq!(digest.open_source_and_models.len(), 1);
        let merged = &digest.open_source_and_models[0];
        assert_eq!(merged.title, "Foo");
        assert_eq!(merged.metrics.num("stars"), Some(150.0));
        assert!(merged.score.is_some());
        assert!(merged.one_liner.is_some());
    }

    #[test]
    fn test_filter_applies_before_dedup_and_scoring() {
        let mut cfg = config();
        cfg.denylist = vec!["blockchain".to_string()];
        let items = vec![
            item(ItemType::News, "AI breakthrough", "https://1"),
            item(ItemType::News, "Blockchain pivot", "https://2"),
        ];
        let (raw, digest) = assemble(items, "20260801", &cfg);
        assert_eq!(raw.len(), 1);
        assert_eq!(digest.news.len(), 1);
        assert_eq!(digest.news[0].title, "AI breakthrough");
    }

    #[test]
    fn test_every_surviving_item_is_scored_and_summarized() {
        let items = vec![
            item(ItemType::News, "n", "https://n"),
            item(ItemType::Paper, "p", "https://p"),
        ];
        let (raw, _) = assemble(items, "20260801", &config());
        for it in &raw {
            assert!(it.score.is_some());
            assert!(it.one_liner.is_some());
            assert!(!it.highlights.is_empty());
        }
    }

    #[test]
    fn test_empty_input_produces_empty_digest() {
        let (raw, digest) = assemble(Vec::new(), "20260801", &config());
        assert!(raw.is_empty());
        assert!(digest.news.is_empty());
        assert!(digest.papers.is_empty());
        assert!(digest.open_source_and_models.is_empty());
        assert_eq!(digest.date, "20260801");
    }
}
