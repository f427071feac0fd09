use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::models::Item;
use crate::normalize::normalize_text;

/// Merge items that describe the same underlying thing, preserving the order
/// of first occurrence.
///
/// Identity key: normalized title, falling back to normalized URL. An item
/// with neither is unkeyable; it is always kept as-is and never merged.
///
/// The first-seen item survives. Later duplicates only contribute their
/// metrics (union-merge, numeric max) and a date when the survivor has none;
/// title, url, source and kind stay first-writer-wins.
pub fn deduplicate(items: Vec<Item>) -> Vec<Item> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Item> = Vec::with_capacity(items.len());

    for item in items {
        let key = identity_key(&item);
        if key.is_empty() {
            out.push(item);
            continue;
        }
        match seen.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(out.len());
                out.push(item);
            }
            Entry::Occupied(slot) => {
                let survivor = &mut out[*slot.get()];
                survivor.metrics.merge(&item.metrics);
                if survivor.date.is_none() {
                    survivor.date = item.date;
                }
            }
        }
    }

    out
}

fn identity_key(item: &Item) -> String {
    let key = normalize_text(&item.title);
    if key.is_empty() {
        normalize_text(&item.url)
    } else {
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use chrono::{TimeZone, Utc};

    fn oss(title: &str, url: &str, source: &str, stars: f64) -> Item {
        let mut item = Item::new(ItemType::OpenSource, title, url);
        item.source = source.to_string();
        item.metrics.set_num("stars", stars);
        item
    }

    #[test]
    fn test_title_variants_collapse_to_one_item() {
        let items = vec![
            oss("GPT-5 Released!", "https://a", "S1", 100.0),
            oss("gpt-5   released", "https://b", "S2", 150.0),
        ];
        let out = deduplicate(items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].metrics.num("stars"), Some(150.0));
    }

    #[test]
    fn test_first_writer_wins_for_non_metric_fields() {
        let items = vec![
            oss("X", "https://a", "S1", 1.0),
            oss("x", "https://b", "S2", 2.0),
        ];
        let out = deduplicate(items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "S1");
        assert_eq!(out[0].title, "X");
        assert_eq!(out[0].url, "https://a");
    }

    #[test]
    fn test_metrics_union_across_duplicates() {
        let mut a = oss("Repo", "https://a", "GitHub", 500.0);
        a.metrics.set_text("language", "Rust");
        let mut b = Item::new(ItemType::OpenSource, "repo", "https://a");
        b.metrics.set_num("trending_rank", 3.0);
        b.metrics.set_num("stars", 120.0);

        let out = deduplicate(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].metrics.num("stars"), Some(500.0));
        assert_eq!(out[0].metrics.num("trending_rank"), Some(3.0));
        assert_eq!(out[0].metrics.text("language"), Some("Rust"));
    }

    #[test]
    fn test_date_backfilled_only_when_missing() {
        let d1 = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();

        let mut a = oss("A", "https://a", "S1", 1.0);
        let mut b = oss("a", "https://a", "S2", 1.0);
        b.date = Some(d1);
        let out = deduplicate(vec![a.clone(), b]);
        assert_eq!(out[0].date, Some(d1));

        a.date = Some(d2);
        let mut c = oss("a", "https://a", "S2", 1.0);
        c.date = Some(d1);
        let out = deduplicate(vec![a, c]);
        assert_eq!(out[0].date, Some(d2));
    }

    #[test]
    fn test_url_key_when_title_empty() {
        let a = oss("", "https://x/foo", "S1", 10.0);
        let b = oss("", "https://x/foo", "S2", 20.0);
        let out = deduplicate(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].metrics.num("stars"), Some(20.0));
    }

    #[test]
    fn test_unkeyable_items_always_kept() {
        let a = oss("", "", "S1", 1.0);
        let b = oss("", "", "S2", 2.0);
        let out = deduplicate(vec![a, b]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_order_preserved_for_first_occurrences() {
        let items = vec![
            oss("A", "https://a", "S", 1.0),
            oss("B", "https://b", "S", 1.0),
            oss("a", "https://a2", "S", 1.0),
            oss("C", "https://c", "S", 1.0),
        ];
        let out = deduplicate(items);
        let titles: Vec<&str> = out.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }
}
