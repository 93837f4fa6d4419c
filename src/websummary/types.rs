//! Serde views over the web summary JSON.
//!
//! Only the parts the extractors read are modeled. Unknown keys (plots, help text,
//! clonotype tables) are ignored. Sections named as plain fields are required, so a
//! decode fails when the report is structurally incomplete for its variant.

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct SampleInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A `{"rows": [[label, value], ...]}` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricTable {
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl MetricTable {
    /// Rows whose first cell is a string label, paired with their value cell.
    pub fn labeled_rows(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.rows.iter().filter_map(|row| match row.as_slice() {
            [Value::String(label), value, ..] => Some((label.trim(), value)),
            _ => None,
        })
    }
}

/// A card in the summary tab: a table plus help text we ignore.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricSection {
    pub table: MetricTable,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alarms {
    #[serde(default)]
    pub alarms: Vec<Alarm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alarm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub formatted_value: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountWebSummary {
    pub summary: CountSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountSummary {
    #[serde(default)]
    pub sample: Option<SampleInfo>,
    pub summary_tab: CountSummaryTab,
    #[serde(default)]
    pub antibody_tab: Option<AntibodyTab>,
    #[serde(default)]
    pub alarms: Option<Alarms>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountSummaryTab {
    #[serde(default)]
    pub pipeline_info_table: Option<MetricTable>,
    pub sequencing: MetricSection,
    pub cells: MetricSection,
    pub mapping: MetricSection,
}

/// The antibody capture tab mixes metric cards with plots, so it is kept loose.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct AntibodyTab {
    pub entries: Map<String, Value>,
}

impl AntibodyTab {
    /// Metric cards in source order. Entries that are not tables are skipped.
    pub fn sections(&self) -> impl Iterator<Item = MetricSection> + '_ {
        self.entries
            .values()
            .filter_map(|v| MetricSection::deserialize(v).ok())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VdjWebSummary {
    pub summary: VdjSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VdjSummary {
    #[serde(default)]
    pub sample: Option<SampleInfo>,
    pub summary_tab: VdjSummaryTab,
    #[serde(default)]
    pub alarms: Option<Alarms>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VdjSummaryTab {
    #[serde(default)]
    pub pipeline_info_table: Option<MetricTable>,
    pub sequencing: MetricSection,
    pub cells: MetricSection,
    pub vdj_enrichment: MetricSection,
    pub vdj_annotation: MetricSection,
    #[serde(default)]
    pub vdj_expression: Option<MetricSection>,
}
