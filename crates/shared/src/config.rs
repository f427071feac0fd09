use std::env;
use std::path::PathBuf;

/// Per-run configuration, built once in main and passed by reference through
/// the pipeline. Plain data; no shared mutable state.
#[derive(Debug, Clone)]
pub struct HotlistConfig {
    /// Collection window in days; items older than this are skipped by the
    /// window-aware adapters.
    pub days: i64,
    pub allowlist: Vec<String>,
    pub denylist: Vec<String>,
    pub max_items_per_section: usize,
    pub output_dir_data: PathBuf,
    pub output_dir_reports: PathBuf,

    // Sources
    pub rss_feeds: Vec<String>,
    /// Name of the environment variable holding an optional GitHub API token.
    pub github_token_env: String,
    pub github_trending_url: String,
    pub hf_models_endpoint: String,
    pub hf_datasets_endpoint: String,
    pub pwc_trending_url: String,
}

impl Default for HotlistConfig {
    fn default() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            days: 30,
            allowlist: Vec::new(),
            denylist: Vec::new(),
            max_items_per_section: 100,
            output_dir_data: cwd.join("data"),
            output_dir_reports: cwd.join("reports"),
            rss_feeds: vec![
                // Availability varies; collection is resilient to dead feeds.
                "https://www.qbitai.com/feed".to_string(),
                "https://ai.googleblog.com/feeds/posts/default".to_string(),
                "https://openai.com/blog/rss.xml".to_string(),
                "https://rsshub.app/zhihu/collection/26444956".to_string(),
            ],
            github_token_env: "GITHUB_TOKEN".to_string(),
            github_trending_url: "https://github.com/trending?since=monthly".to_string(),
            hf_models_endpoint: "https://huggingface.co/api/models".to_string(),
            hf_datasets_endpoint: "https://huggingface.co/api/datasets".to_string(),
            pwc_trending_url: "https://paperswithcode.com/trending".to_string(),
        }
    }
}

impl HotlistConfig {
    /// Load `.env` so the optional GitHub token can live outside the shell
    /// profile. Tries locations in order of preference.
    pub fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/ai-hotlist/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("ai-hotlist").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() && dotenvy::from_path(&home_path).is_ok() {
                return;
            }
        }

        // Nothing found is fine - the token may be set system-wide, or absent.
    }

    /// The optional GitHub token, read at collection time.
    pub fn github_token(&self) -> Option<String> {
        env::var(&self.github_token_env).ok().filter(|t| !t.is_empty())
    }
}

/// Split a comma-separated CLI list into trimmed, non-empty terms.
pub fn parse_keyword_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
