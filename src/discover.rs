use crate::{config::Config, host::CandidateFile};
use anyhow::{anyhow, Context, Result};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const REPORT_SUFFIX: &str = "web_summary.html";

// Directory names Cell Ranger uses below the sample folder.
const LAYOUT_DIRS: &[&str] = &[
    "outs",
    "per_sample_outs",
    "multi",
    "count",
    "vdj_t",
    "vdj_b",
    "vdj_t_gd",
];

/// Expands each input into candidate web summaries. Files are taken as given;
/// directories are searched recursively for `discovery.pattern`. The result is
/// sorted by path with duplicates removed.
pub fn find_candidates(cfg: &Config, inputs: &[PathBuf]) -> Result<Vec<CandidateFile>> {
    let opts = MatchOptions {
        case_sensitive: cfg.discovery.case_sensitive,
        require_literal_separator: true,
        require_literal_leading_dot: !cfg.discovery.include_hidden,
    };

    let mut paths = BTreeSet::new();
    for input in inputs {
        if input.is_file() {
            paths.insert(input.clone());
            continue;
        }
        if !input.is_dir() {
            return Err(anyhow!("input does not exist: {}", input.display()));
        }

        let root = input
            .to_str()
            .ok_or_else(|| anyhow!("input path is not UTF-8: {}", input.display()))?;
        let pattern = format!(
            "{}/**/{}",
            Pattern::escape(root.trim_end_matches('/')),
            cfg.discovery.pattern
        );
        debug!("searching {pattern}");

        let entries = glob::glob_with(&pattern, opts)
            .with_context(|| format!("invalid discovery pattern: {}", cfg.discovery.pattern))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    paths.insert(path);
                }
                Ok(_) => {}
                Err(err) => warn!("skipping unreadable path: {err}"),
            }
        }
    }

    Ok(paths
        .into_iter()
        .map(|path| {
            let name = infer_sample_name(&path);
            CandidateFile::on_disk(path, name)
        })
        .collect())
}

/// `PBMC_web_summary.html` gives `PBMC`. A bare `web_summary.html` takes the name of
/// the nearest ancestor that is not part of the Cell Ranger output layout, so
/// `runs/PBMC/outs/web_summary.html` also gives `PBMC`.
pub fn infer_sample_name(path: &Path) -> String {
    let file = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or_default();
    let stem = file
        .strip_suffix(REPORT_SUFFIX)
        .or_else(|| file.strip_suffix(".html"))
        .unwrap_or(file)
        .trim_end_matches(&['_', '.', '-'][..]);
    if !stem.is_empty() {
        return stem.to_string();
    }

    path.ancestors()
        .skip(1)
        .filter_map(|dir| dir.file_name().and_then(|n| n.to_str()))
        .find(|name| !LAYOUT_DIRS.contains(name))
        .unwrap_or("web_summary")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_file_name() {
        assert_eq!(infer_sample_name(Path::new("x/PBMC_1k_web_summary.html")), "PBMC_1k");
        assert_eq!(infer_sample_name(Path::new("lib.web_summary.html")), "lib");
    }

    #[test]
    fn bare_file_uses_sample_directory() {
        assert_eq!(
            infer_sample_name(Path::new("/data/runs/PBMC/outs/web_summary.html")),
            "PBMC"
        );
        assert_eq!(
            infer_sample_name(Path::new("run/outs/per_sample_outs/S2/count/web_summary.html")),
            "S2"
        );
    }

    #[test]
    fn bare_file_without_parent() {
        assert_eq!(infer_sample_name(Path::new("web_summary.html")), "web_summary");
    }
}
