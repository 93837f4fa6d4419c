pub mod count;
pub mod vdj;

use crate::{
    error::ExtractError,
    websummary::{
        classify,
        types::{Alarms, MetricTable, SampleInfo},
        Variant,
    },
};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub use count::extract_count;
pub use vdj::extract_vdj;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

pub type MetricRecord = BTreeMap<String, MetricValue>;

/// What one web summary yields.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub variant: Variant,
    /// `summary.sample.id`, when the report carries a non-empty one.
    pub sample_name: Option<String>,
    pub record: MetricRecord,
    pub warnings: Vec<String>,
}

/// Classifies the payload and runs the matching extractor.
pub fn extract_payload(payload: &Value) -> Result<Extraction, ExtractError> {
    match classify(payload)? {
        Variant::Count => extract_count(payload),
        Variant::Vdj => extract_vdj(payload),
    }
}

/// Maps row labels onto record keys. Patterns are tried when no exact label matches;
/// their key is a `Captures::expand` template and is lowercased.
pub(crate) struct MetricRules {
    pub exact: &'static [(&'static str, &'static str)],
    pub patterns: Vec<(Regex, &'static str)>,
}

impl MetricRules {
    pub fn new(exact: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            exact,
            patterns: Vec::new(),
        }
    }

    pub fn with_patterns(mut self, patterns: &[(&str, &'static str)]) -> Self {
        for (pattern, template) in patterns {
            let re = Regex::new(pattern).expect("valid metric label pattern");
            self.patterns.push((re, *template));
        }
        self
    }

    pub fn key_for(&self, label: &str) -> Option<String> {
        if let Some((_, key)) = self.exact.iter().find(|(l, _)| *l == label) {
            return Some((*key).to_string());
        }
        self.patterns.iter().find_map(|(re, template)| {
            let caps = re.captures(label)?;
            let mut key = String::new();
            caps.expand(template, &mut key);
            Some(key.to_ascii_lowercase())
        })
    }
}

/// Parses a displayed metric value. Thousands separators are dropped and a trailing
/// `%` is stripped, so percentages stay on the 0-100 scale they are shown in.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            let cleaned = cleaned.strip_suffix('%').unwrap_or(cleaned.as_str());
            cleaned.trim().parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

pub(crate) fn collect_numbers(
    record: &mut MetricRecord,
    table: &MetricTable,
    rules: &MetricRules,
    prefix: &str,
) {
    for (label, value) in table.labeled_rows() {
        let Some(key) = rules.key_for(label) else {
            continue;
        };
        if let Some(n) = parse_number(value) {
            record.insert(format!("{prefix}{key}"), MetricValue::Number(n));
        }
    }
}

const PIPELINE_INFO: &[(&str, &str)] = &[
    ("Chemistry", "chemistry"),
    ("Pipeline Version", "pipeline_version"),
    ("Cell Ranger Version", "pipeline_version"),
    ("Transcriptome", "reference"),
    ("Reference Path", "reference"),
    ("V(D)J Reference", "reference"),
];

pub(crate) fn collect_pipeline_info(record: &mut MetricRecord, table: &MetricTable) {
    for (label, value) in table.labeled_rows() {
        let Some((_, key)) = PIPELINE_INFO.iter().find(|(l, _)| *l == label) else {
            continue;
        };
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        if !text.is_empty() {
            record.insert((*key).to_string(), MetricValue::Text(text));
        }
    }
}

pub(crate) fn require(
    record: &MetricRecord,
    variant: Variant,
    keys: &[&'static str],
) -> Result<(), ExtractError> {
    for &metric in keys {
        if record.get(metric).and_then(MetricValue::as_f64).is_none() {
            return Err(ExtractError::MissingMetric { variant, metric });
        }
    }
    Ok(())
}

/// One string per alarm, in source order: the title plus the displayed value.
pub(crate) fn collect_warnings(alarms: Option<&Alarms>) -> Vec<String> {
    let Some(alarms) = alarms else {
        return Vec::new();
    };
    alarms
        .alarms
        .iter()
        .filter_map(|alarm| {
            let title = alarm.title.trim();
            let title = if title.is_empty() {
                alarm.message.as_deref().map(str::trim).unwrap_or_default()
            } else {
                title
            };
            if title.is_empty() {
                return None;
            }
            match alarm.formatted_value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => Some(format!("{title} ({v})")),
                _ => Some(title.to_string()),
            }
        })
        .collect()
}

pub(crate) fn sample_id(sample: Option<&SampleInfo>) -> Option<String> {
    sample
        .and_then(|s| s.id.as_deref())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
