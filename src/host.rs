//! The surface this module shares with the report-aggregation host.

use crate::{error::ExtractError, extract::MetricRecord};
use serde::Serialize;
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModuleInfo {
    pub name: &'static str,
    pub anchor: &'static str,
    pub href: &'static str,
    pub info: &'static str,
    pub doi: &'static str,
}

pub const MODULE_INFO: ModuleInfo = ModuleInfo {
    name: "Cell Ranger",
    anchor: "cellranger",
    href: "https://support.10xgenomics.com/single-cell-gene-expression/software/pipelines/latest/what-is-cell-ranger",
    info: "Analyzes single cell expression or VDJ data produced by 10X Genomics.",
    doi: "10.1038/ncomms14049",
};

/// Sink for parsed samples and log lines. `module` is the variant's table id.
pub trait Host {
    fn add_sample_record(&mut self, module: &str, sample_name: &str, record: &MetricRecord);
    fn add_warnings(&mut self, module: &str, sample_name: &str, warnings: &[String]);
    fn log(&mut self, level: Level, message: &str);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn add_sample_record(&mut self, module: &str, sample_name: &str, record: &MetricRecord) {
        (**self).add_sample_record(module, sample_name, record)
    }

    fn add_warnings(&mut self, module: &str, sample_name: &str, warnings: &[String]) {
        (**self).add_warnings(module, sample_name, warnings)
    }

    fn log(&mut self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}

#[derive(Debug, Clone)]
enum Contents {
    Disk,
    Inline(String),
}

/// A file handed over by discovery, with the sample name inferred from its path.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub sample_name: String,
    contents: Contents,
}

impl CandidateFile {
    pub fn on_disk(path: impl Into<PathBuf>, sample_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sample_name: sample_name.into(),
            contents: Contents::Disk,
        }
    }

    /// A candidate whose text is already in memory.
    pub fn inline(
        path: impl Into<PathBuf>,
        sample_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            sample_name: sample_name.into(),
            contents: Contents::Inline(text.into()),
        }
    }

    /// Reads the whole file. Invalid UTF-8 is replaced rather than rejected; the
    /// embedded JSON is ASCII-escaped by Cell Ranger.
    pub fn read(&self, max_bytes: u64) -> Result<Cow<'_, str>, ExtractError> {
        match &self.contents {
            Contents::Inline(text) => {
                check_size(text.len() as u64, max_bytes)?;
                Ok(Cow::Borrowed(text.as_str()))
            }
            Contents::Disk => {
                let unreadable = |source| ExtractError::Unreadable {
                    path: self.path.clone(),
                    source,
                };
                let meta = std::fs::metadata(&self.path).map_err(unreadable)?;
                check_size(meta.len(), max_bytes)?;
                let bytes = std::fs::read(&self.path).map_err(unreadable)?;
                Ok(Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
            }
        }
    }
}

fn check_size(bytes: u64, limit: u64) -> Result<(), ExtractError> {
    if limit > 0 && bytes > limit {
        return Err(ExtractError::TooLarge { bytes, limit });
    }
    Ok(())
}
