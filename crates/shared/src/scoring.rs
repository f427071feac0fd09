use crate::models::{Item, ItemType};

/// Heuristic popularity score: a per-kind base formula over the item's
/// metrics, plus a flat +2 when any date is present. Metrics are read
/// defensively (missing reads as zero) and root/power inputs are clamped
/// non-negative, so the function is total over every item an adapter can
/// produce. Rounded to 2 decimal places.
pub fn score_item(item: &Item) -> f64 {
    let m = &item.metrics;
    let base = match item.kind {
        ItemType::News => {
            let source_weight = m.num_or_zero("source_weight");
            let share_count = m.num_or_zero("share_count");
            10.0 + source_weight + 0.5 * share_count
        }
        ItemType::Paper => {
            let authors = m.num_or_zero("authors");
            let pwc_rank = m.num_or_zero("pwc_trending_rank");
            let trending_bonus = if pwc_rank > 0.0 { 10.0 } else { 0.0 };
            25.0 + (authors / 2.0).min(10.0) + trending_bonus + (5.0 - pwc_rank).max(0.0)
        }
        ItemType::OpenSource => {
            let stars = m.num_or_zero("stars");
            let new_stars = m.num_or_zero("new_stars");
            let trending_rank = m.num_or_zero("trending_rank");
            20.0 + sqrt_clamped(stars) + sqrt_clamped(new_stars) + (10.0 - trending_rank).max(0.0)
        }
        ItemType::Model => {
            let downloads = m
                .num("downloads_last_month")
                .unwrap_or_else(|| m.num_or_zero("downloads"));
            let likes = m.num_or_zero("likes");
            20.0 + sqrt_clamped(downloads) + pow_clamped(likes, 0.3)
        }
        ItemType::Other => 10.0,
    };

    // Recency boost: any parseable timestamp counts, regardless of age.
    let boosted = if item.date.is_some() { base + 2.0 } else { base };

    (boosted * 100.0).round() / 100.0
}

fn sqrt_clamped(v: f64) -> f64 {
    v.max(0.0).sqrt()
}

fn pow_clamped(v: f64, exp: f64) -> f64 {
    v.max(0.0).powf(exp)
}
