//! Quality-control metrics from Cell Ranger `web_summary.html` reports.
//!
//! A report is located, classified as a count or VDJ run, and flattened into one
//! metric record per sample. [`pipeline::Pipeline`] drives a batch and hands the
//! records to a [`host::Host`].

pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod host;
pub mod pipeline;
pub mod report;
pub mod util;
pub mod websummary;
