use crate::models::{Digest, Item};

pub struct ReportGenerator;

impl ReportGenerator {
    /// Render the capped digest as a Markdown document: one section per
    /// bucket, each item as a link line with score and flattened metrics,
    /// then its one-liner and up to 3 highlight bullets.
    pub fn generate(digest: &Digest) -> String {
        let mut md = String::new();

        md.push_str(&format!("# AI Hotlist ({})\n\n", digest.date));
        md.push_str(
            "Automated digest of public AI activity signals: news, papers, and \
             open-source/model releases, ranked by combined popularity.\n\n",
        );

        Self::section(&mut md, "News", &digest.news);
        Self::section(&mut md, "Papers", &digest.papers);
        Self::section(&mut md, "Open Source & Models", &digest.open_source_and_models);

        md.push_str(
            "_Signals include GitHub stars, Hugging Face downloads, Papers with Code \
             trending ranks, and news source weights._\n",
        );
        md
    }

    fn section(md: &mut String, title: &str, items: &[Item]) {
        md.push_str(&format!("## {}\n", title));
        for item in items {
            let score = item
                .score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "- [{}]({}) | score: {} | signals: {}\n",
                item.title,
                item.url,
                score,
                Self::metrics_line(item)
            ));
            if let Some(one_liner) = &item.one_liner {
                md.push_str(&format!("  - {}\n", one_liner));
            }
            for highlight in item.highlights.iter().take(3) {
                md.push_str(&format!("  - {}\n", highlight));
            }
        }
        md.push('\n');
    }

    fn metrics_line(item: &Item) -> String {
        if item.metrics.is_empty() {
            return "-".to_string();
        }
        item.metrics
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
