use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category tag carried by every item; drives scoring and bucket assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    News,
    Paper,
    OpenSource,
    Model,
    /// Catch-all so foreign data deserializes leniently; scored at a fixed baseline.
    #[serde(other)]
    Other,
}

/// One metric value. Numeric values feed the scorer, text values only annotate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Num(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_num(&self) -> Option<f64> {
        match self {
            MetricValue::Num(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }

    /// Non-zero number or non-empty string.
    fn is_truthy(&self) -> bool {
        match self {
            MetricValue::Num(n) => *n != 0.0,
            MetricValue::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Num(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            MetricValue::Num(n) => write!(f, "{}", n),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Per-item metric store. Keys are adapter-specific; every read goes through a
/// defaulting accessor so a missing key is zero/unknown, never a failure.
/// BTreeMap keeps artifact JSON and report lines deterministically ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<String, MetricValue>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_num(&mut self, key: &str, value: f64) {
        self.0.insert(key.to_string(), MetricValue::Num(value));
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), MetricValue::Text(value.into()));
    }

    /// Insert only when the source actually supplied a value; unknown stays absent.
    pub fn set_opt_num(&mut self, key: &str, value: Option<f64>) {
        if let Some(v) = value {
            self.set_num(key, v);
        }
    }

    pub fn set_opt_text(&mut self, key: &str, value: Option<String>) {
        if let Some(v) = value {
            self.set_text(key, v);
        }
    }

    pub fn num(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(MetricValue::as_num)
    }

    /// Defensive numeric read: missing or non-numeric reads as zero.
    pub fn num_or_zero(&self, key: &str) -> f64 {
        self.num(key).unwrap_or(0.0)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(MetricValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetricValue)> {
        self.0.iter()
    }

    /// Union-merge with an incoming store: both numeric takes the max, otherwise
    /// the existing value wins unless it is empty/zero.
    pub fn merge(&mut self, incoming: &Metrics) {
        for (key, theirs) in incoming.iter() {
            match self.0.get(key) {
                Some(ours) => {
                    if let (Some(a), Some(b)) = (ours.as_num(), theirs.as_num()) {
                        self.0.insert(key.clone(), MetricValue::Num(a.max(b)));
                    } else if !ours.is_truthy() {
                        self.0.insert(key.clone(), theirs.clone());
                    }
                }
                None => {
                    self.0.insert(key.clone(), theirs.clone());
                }
            }
        }
    }
}

/// The unit flowing through the pipeline: created by one source adapter,
/// possibly merged with duplicates, then scored and annotated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub title: String,
    pub url: String,
    pub summary: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub source: String,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub one_liner: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub highlights: Vec<String>,
}

impl Item {
    pub fn new(kind: ItemType, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            url: url.into(),
            summary: None,
            date: None,
            source: String::new(),
            metrics: Metrics::new(),
            score: None,
            one_liner: None,
            highlights: Vec::new(),
        }
    }
}

/// The aggregated artifact: capped buckets keyed by the run's date stamp.
#[derive(Debug, Serialize, Deserialize)]
pub struct Digest {
    pub date: String,
    pub news: Vec<Item>,
    pub papers: Vec<Item>,
    pub open_source_and_models: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Metric Merge Tests ====================

    #[test]
    fn test_merge_numeric_takes_max() {
        let mut a = Metrics::new();
        a.set_num("stars", 100.0);
        let mut b = Metrics::new();
        b.set_num("stars", 150.0);

        a.merge(&b);
        assert_eq!(a.num("stars"), Some(150.0));

        let mut c = Metrics::new();
        c.set_num("stars", 50.0);
        a.merge(&c);
        assert_eq!(a.num("stars"), Some(150.0));
    }

    #[test]
    fn test_merge_keeps_existing_non_empty_text() {
        let mut a = Metrics::new();
        a.set_text("language", "Rust");
        let mut b = Metrics::new();
        b.set_text("language", "Python");

        a.merge(&b);
        assert_eq!(a.text("language"), Some("Rust"));
    }

    #[test]
    fn test_merge_empty_existing_falls_back_to_incoming() {
        let mut a = Metrics::new();
        a.set_text("language", "");
        let mut b = Metrics::new();
        b.set_text("language", "Python");

        a.merge(&b);
        assert_eq!(a.text("language"), Some("Python"));
    }

    #[test]
    fn test_merge_inserts_missing_keys() {
        let mut a = Metrics::new();
        a.set_num("stars", 10.0);
        let mut b = Metrics::new();
        b.set_num("forks", 3.0);

        a.merge(&b);
        assert_eq!(a.num("stars"), Some(10.0));
        assert_eq!(a.num("forks"), Some(3.0));
    }

    // ==================== Accessor Tests ====================

    #[test]
    fn test_num_or_zero_defaults_missing_and_text() {
        let mut m = Metrics::new();
        m.set_text("language", "Rust");
        assert_eq!(m.num_or_zero("stars"), 0.0);
        assert_eq!(m.num_or_zero("language"), 0.0);
    }

    #[test]
    fn test_set_opt_skips_none() {
        let mut m = Metrics::new();
        m.set_opt_num("new_stars", None);
        m.set_opt_text("language", None);
        assert!(m.is_empty());
    }

    // ==================== Display Tests ====================

    #[test]
    fn test_metric_display_trims_integral_floats() {
        assert_eq!(MetricValue::Num(1500.0).to_string(), "1500");
        assert_eq!(MetricValue::Num(2.5).to_string(), "2.5");
        assert_eq!(MetricValue::Text("cs.CL".into()).to_string(), "cs.CL");
    }
}
