use crate::models::Item;
use crate::normalize::normalize_text;

/// Keep items whose normalized title+summary matches the allowlist (when one
/// is given) and avoids the denylist. Both lists empty is the default state
/// and passes everything through untouched.
pub fn filter_by_keywords(items: Vec<Item>, allow: &[String], deny: &[String]) -> Vec<Item> {
    if allow.is_empty() && deny.is_empty() {
        return items;
    }

    // Terms arrive from config/CLI in arbitrary case; the haystack is already
    // lowercased, so fold the terms too.
    let allow: Vec<String> = allow.iter().map(|t| t.to_lowercase()).collect();
    let deny: Vec<String> = deny.iter().map(|t| t.to_lowercase()).collect();

    items
        .into_iter()
        .filter(|item| {
            let text = format!(
                "{} {}",
                normalize_text(&item.title),
                normalize_text(item.summary.as_deref().unwrap_or(""))
            );
            let allowed = allow.is_empty() || allow.iter().any(|t| text.contains(t.as_str()));
            let denied = !deny.is_empty() && deny.iter().any(|t| text.contains(t.as_str()));
            allowed && !denied
        })
        .collect()
}
