use crate::websummary::Variant;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single candidate file was skipped. None of these abort a run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no embedded web summary data found")]
    NotFound,
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("file is {bytes} bytes, over the {limit} byte limit")]
    TooLarge { bytes: u64, limit: u64 },
    #[error("embedded data is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{variant} report is missing a required section: {source}")]
    Schema {
        variant: Variant,
        source: serde_json::Error,
    },
    #[error("{variant} report is missing required metric `{metric}`")]
    MissingMetric {
        variant: Variant,
        metric: &'static str,
    },
    #[error("payload matches neither the count nor the vdj layout")]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipKind {
    NotFound,
    DecodeError,
    Unrecognized,
}

impl ExtractError {
    pub fn kind(&self) -> SkipKind {
        match self {
            ExtractError::NotFound
            | ExtractError::Unreadable { .. }
            | ExtractError::TooLarge { .. } => SkipKind::NotFound,
            ExtractError::Decode(_)
            | ExtractError::Schema { .. }
            | ExtractError::MissingMetric { .. } => SkipKind::DecodeError,
            ExtractError::Unrecognized => SkipKind::Unrecognized,
        }
    }
}
