use crate::models::{Item, ItemType};

const STOPWORDS: &[&str] = &[
    "the", "and", "with", "this", "that", "for", "into", "from", "are", "was", "were", "have",
    "has", "had", "using", "use", "of", "in", "on", "to", "a", "an", "by", "we", "our", "is",
    "it", "as", "at", "be", "can", "via", "based", "model", "models", "paper", "method",
    "methods",
];

/// Most frequent content words of a text, ties broken alphabetically.
/// One-character tokens, digit-only tokens and stopwords are skipped.
pub fn keywords(text: &str, top_k: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for token in lowered.split(|c: char| !c.is_alphanumeric()) {
        if token.len() <= 1 || STOPWORDS.contains(&token) {
            continue;
        }
        if token.chars().any(|c| c.is_ascii_digit()) && !token.chars().any(|c| c.is_alphabetic()) {
            continue;
        }
        match counts.iter_mut().find(|(t, _)| t.as_str() == token) {
            Some((_, n)) => *n += 1,
            None => counts.push((token.to_string(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.into_iter().take(top_k).map(|(t, _)| t).collect()
}

fn keyword_phrase(text: &str) -> String {
    let kw = keywords(text, 3);
    if kw.is_empty() {
        "AI".to_string()
    } else {
        kw.join(", ")
    }
}

fn one_liner(item: &Item) -> String {
    let body = item.summary.as_deref().unwrap_or("");
    let kw = keyword_phrase(&format!("{} {}", item.title, body));

    match item.kind {
        ItemType::Paper => format!(
            "Research spotlight: new methods or results around {}.",
            kw
        ),
        ItemType::OpenSource => format!(
            "Open-source pick: {}, drawing strong community traction.",
            kw
        ),
        ItemType::Model => format!(
            "Model/dataset update: active downloads related to {}.",
            kw
        ),
        ItemType::News | ItemType::Other => {
            format!("AI development: the latest around {}.", kw)
        }
    }
}

fn metric_line(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
        None => "\u{2014}".to_string(),
    }
}

fn highlights(item: &Item) -> Vec<String> {
    let m = &item.metrics;
    let kw = keyword_phrase(&item.title);

    match item.kind {
        ItemType::Paper => {
            let mut out = Vec::new();
            let categories = m.text("categories").unwrap_or("\u{2014}");
            match m.num("authors") {
                Some(authors) if authors > 0.0 => out.push(format!(
                    "Authors: {}; areas: {}.",
                    metric_line(Some(authors)),
                    categories
                )),
                _ => out.push(format!("Research areas: {}.", categories)),
            }
            out.push("Proposes an improvement or new benchmark over common baselines.".to_string());
            out.push("Links to the paper for reproduction and comparison.".to_string());
            out
        }
        ItemType::OpenSource => {
            let mut out = Vec::new();
            out.push(format!(
                "Stars: {}; gained recently: {}.",
                metric_line(m.num("stars")),
                metric_line(m.num("new_stars"))
            ));
            match m.text("language") {
                Some(lang) => out.push(format!("Primary language: {}; active ecosystem.", lang)),
                None => out.push("Active ecosystem with frequent issue/PR churn.".to_string()),
            }
            out.push(format!(
                "Use cases: related to {}; suited to integration and extension.",
                kw
            ));
            out
        }
        ItemType::Model => {
            let downloads = m.num("downloads_last_month").or_else(|| m.num("downloads"));
            let task = m
                .text("pipeline_tag")
                .or_else(|| m.text("task"))
                .unwrap_or("general purpose");
            vec![
                format!(
                    "Recent downloads: {}; likes: {}.",
                    metric_line(downloads),
                    metric_line(m.num("likes"))
                ),
                format!("Task: {}; compatible with mainstream inference stacks.", task),
                "Clear licensing; suitable for research and application trials.".to_string(),
            ]
        }
        ItemType::News | ItemType::Other => {
            let source = if item.source.is_empty() {
                "newswire"
            } else {
                item.source.as_str()
            };
            vec![
                format!("Source: {}, with rising attention.", source),
                format!("Topic keywords: {}.", kw),
                "Original link provides fuller context.".to_string(),
            ]
        }
    }
}

/// Attach the human-readable blurb. Purely a function of kind, title, summary
/// and metrics; scoring-relevant fields are left untouched.
pub fn apply(item: &mut Item) {
    item.one_liner = Some(one_liner(item));
    item.highlights = highlights(item);
}
