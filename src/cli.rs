use crate::{
    config::Config,
    discover,
    host::CandidateFile,
    pipeline::{Pipeline, RunOutcome},
    report::{ReportCollector, RunStatus},
    util::{ensure_dir, now_rfc3339},
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "cellranger-qc")]
#[command(about = "Extract QC metrics from Cell Ranger count and VDJ web summaries")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./cellranger-qc.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse every web summary found under the inputs.
    Scan {
        #[arg(long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print what a single web summary yields.
    Inspect {
        #[arg(long)]
        input: PathBuf,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    match &args.cmd {
        Command::Scan { input, out_dir } => scan(&args, &cfg, input, out_dir.as_deref()),
        Command::Inspect { input } => {
            let _guard = init_logging(&args, &cfg, None)?;
            inspect(&cfg, input)
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("cellranger-qc.toml");
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match args.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(cfg.logging.level.as_str())),
    };

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn scan(args: &Args, cfg: &Config, inputs: &[PathBuf], out_override: Option<&Path>) -> Result<()> {
    let out_dir = out_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.output.out_dir));
    ensure_dir(&out_dir)?;

    let log_path = resolve_log_path(cfg, &out_dir);
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    if cfg.debug.dump_effective_config {
        let raw = toml::to_string(cfg).context("serializing effective config")?;
        std::fs::write(out_dir.join("effective-config.toml"), raw)?;
    }

    let candidates = discover::find_candidates(cfg, inputs)?;
    info!("found {} candidate web summaries", candidates.len());

    let started = now_rfc3339();
    let mut pipeline = Pipeline::new(cfg, ReportCollector::new());
    let outcome = pipeline.run(&candidates);
    let report = pipeline
        .into_host()
        .into_report(outcome, started, now_rfc3339());

    let json_path = out_dir.join(&cfg.output.json_filename);
    match outcome {
        RunOutcome::Found(counts) => {
            info!("parsed {} count and {} vdj reports", counts.count, counts.vdj);
            if cfg.output.write_json {
                std::fs::write(&json_path, serde_json::to_string_pretty(&report)?)
                    .with_context(|| format!("writing {}", json_path.display()))?;
            }
        }
        RunOutcome::NoSamplesFound => {
            info!("no Cell Ranger web summaries found; nothing written");
        }
    }

    if cfg.output.print_summary {
        let written = report.status == RunStatus::Ok && cfg.output.write_json;
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": report.status,
                "counts": report.counts,
                "output": written.then_some(&json_path),
            }))?
        );
    }

    Ok(())
}

fn inspect(cfg: &Config, input: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(anyhow!("input does not exist: {}", input.display()));
    }
    let candidate = CandidateFile::on_disk(input, discover::infer_sample_name(input));
    let pipeline = Pipeline::new(cfg, ReportCollector::new());

    let out = match pipeline.process(&candidate) {
        Ok(parsed) => serde_json::json!({
            "input": input,
            "parsed": parsed,
        }),
        Err(err) => serde_json::json!({
            "input": input,
            "skipped": err.kind(),
            "reason": err.to_string(),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn resolve_log_path(cfg: &Config, out_dir: &Path) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(out_dir.join("cellranger-qc.log"))
}
