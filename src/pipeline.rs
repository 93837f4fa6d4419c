use crate::{
    config::Config,
    error::{ExtractError, SkipKind},
    extract::{extract_payload, MetricRecord},
    host::{CandidateFile, Host},
    websummary::{locate, Variant},
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub count: usize,
    pub vdj: usize,
}

impl Counts {
    fn bump(&mut self, variant: Variant) {
        match variant {
            Variant::Count => self.count += 1,
            Variant::Vdj => self.vdj += 1,
        }
    }

    pub fn get(&self, variant: Variant) -> usize {
        match variant {
            Variant::Count => self.count,
            Variant::Vdj => self.vdj,
        }
    }

    pub fn total(&self) -> usize {
        self.count + self.vdj
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Found(Counts),
    /// Nothing usable in the batch; the host should drop this module's section.
    NoSamplesFound,
}

/// One successfully parsed web summary, named and ready for the host.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedSample {
    pub variant: Variant,
    pub sample_name: String,
    pub path: PathBuf,
    pub record: MetricRecord,
    pub warnings: Vec<String>,
}

pub struct Pipeline<H: Host> {
    cfg: Config,
    host: H,
}

impl<H: Host> Pipeline<H> {
    pub fn new(cfg: &Config, host: H) -> Self {
        Self {
            cfg: cfg.clone(),
            host,
        }
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Parses every candidate in order and hands one record per sample to the host.
    /// A sample name seen again replaces the earlier record and warnings.
    pub fn run(&mut self, candidates: &[CandidateFile]) -> RunOutcome {
        let mut counts = Counts::default();
        let mut samples: Vec<ParsedSample> = Vec::new();
        let mut index: HashMap<(Variant, String), usize> = HashMap::new();

        for candidate in candidates {
            let parsed = match self.process(candidate) {
                Ok(parsed) => parsed,
                Err(err) => {
                    self.log_skip(candidate, &err);
                    continue;
                }
            };
            self.host.log(
                Level::DEBUG,
                &format!(
                    "{}: {} report for sample {}",
                    candidate.path.display(),
                    parsed.variant,
                    parsed.sample_name
                ),
            );
            counts.bump(parsed.variant);

            let key = (parsed.variant, parsed.sample_name.clone());
            match index.get(&key) {
                Some(&i) => {
                    self.host.log(
                        Level::DEBUG,
                        &format!(
                            "duplicate sample name {}; {} replaces {}",
                            parsed.sample_name,
                            parsed.path.display(),
                            samples[i].path.display()
                        ),
                    );
                    samples[i] = parsed;
                }
                None => {
                    index.insert(key, samples.len());
                    samples.push(parsed);
                }
            }
        }

        for sample in &samples {
            let module = sample.variant.table_id();
            self.host
                .add_sample_record(module, &sample.sample_name, &sample.record);
            // Always sent, empty or not: it replaces what the host holds for this sample.
            self.host
                .add_warnings(module, &sample.sample_name, &sample.warnings);
        }

        if counts.total() == 0 {
            return RunOutcome::NoSamplesFound;
        }
        for variant in [Variant::Count, Variant::Vdj] {
            let n = counts.get(variant);
            if n > 0 {
                self.host.log(
                    Level::INFO,
                    &format!("Found {n} Cell Ranger {variant} reports"),
                );
            }
        }
        RunOutcome::Found(counts)
    }

    /// Read, locate, classify and extract a single candidate.
    pub fn process(&self, candidate: &CandidateFile) -> Result<ParsedSample, ExtractError> {
        let html = candidate.read(self.cfg.limits.max_file_bytes)?;
        let payload = locate(&html)?;
        drop(html);
        let extraction = extract_payload(&payload)?;

        let sample_name = match extraction.sample_name {
            Some(id) if self.cfg.extraction.prefer_report_sample_id => id,
            _ => candidate.sample_name.clone(),
        };

        Ok(ParsedSample {
            variant: extraction.variant,
            sample_name,
            path: candidate.path.clone(),
            record: extraction.record,
            warnings: extraction.warnings,
        })
    }

    fn log_skip(&mut self, candidate: &CandidateFile, err: &ExtractError) {
        let level = match err.kind() {
            SkipKind::NotFound | SkipKind::DecodeError => Level::WARN,
            SkipKind::Unrecognized => Level::DEBUG,
        };
        self.host.log(
            level,
            &format!("{}: skipping, {err}", candidate.path.display()),
        );
    }
}
