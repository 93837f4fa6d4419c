use crate::{
    extract::MetricRecord,
    host::{Host, ModuleInfo, MODULE_INFO},
    pipeline::{Counts, RunOutcome},
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info, trace, warn, Level};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub module: ModuleInfo,
    pub started: String,
    pub finished: String,
    pub status: RunStatus,
    pub counts: Counts,
    pub tables: BTreeMap<String, Vec<SampleReport>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    NoSamples,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub sample: String,
    pub metrics: MetricRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub message: String,
}

/// Host that keeps everything in memory and forwards log lines to `tracing`.
#[derive(Debug, Default)]
pub struct ReportCollector {
    tables: BTreeMap<String, Vec<SampleReport>>,
    logs: Vec<LogLine>,
}

impl ReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &BTreeMap<String, Vec<SampleReport>> {
        &self.tables
    }

    pub fn sample(&self, module: &str, sample_name: &str) -> Option<&SampleReport> {
        self.tables
            .get(module)?
            .iter()
            .find(|s| s.sample == sample_name)
    }

    pub fn logs(&self) -> &[LogLine] {
        &self.logs
    }

    pub fn into_report(self, outcome: RunOutcome, started: String, finished: String) -> RunReport {
        let (status, counts) = match outcome {
            RunOutcome::Found(counts) => (RunStatus::Ok, counts),
            RunOutcome::NoSamplesFound => (RunStatus::NoSamples, Counts::default()),
        };
        RunReport {
            module: MODULE_INFO,
            started,
            finished,
            status,
            counts,
            tables: self.tables,
        }
    }

    fn entry(&mut self, module: &str, sample_name: &str) -> &mut SampleReport {
        let rows = self.tables.entry(module.to_string()).or_default();
        let i = match rows.iter().position(|s| s.sample == sample_name) {
            Some(i) => i,
            None => {
                rows.push(SampleReport {
                    sample: sample_name.to_string(),
                    metrics: MetricRecord::new(),
                    warnings: Vec::new(),
                });
                rows.len() - 1
            }
        };
        &mut rows[i]
    }
}

impl Host for ReportCollector {
    fn add_sample_record(&mut self, module: &str, sample_name: &str, record: &MetricRecord) {
        let entry = self.entry(module, sample_name);
        entry.metrics = record.clone();
        entry.warnings.clear();
    }

    fn add_warnings(&mut self, module: &str, sample_name: &str, warnings: &[String]) {
        self.entry(module, sample_name).warnings = warnings.to_vec();
    }

    fn log(&mut self, level: Level, message: &str) {
        match level {
            Level::ERROR => error!("{message}"),
            Level::WARN => warn!("{message}"),
            Level::INFO => info!("{message}"),
            Level::DEBUG => debug!("{message}"),
            _ => trace!("{message}"),
        }
        self.logs.push(LogLine {
            level,
            message: message.to_string(),
        });
    }
}
