mod common;

use cellranger_qc::{
    config::Config,
    discover::find_candidates,
    pipeline::{Counts, Pipeline, RunOutcome},
    report::ReportCollector,
};
use common::{count_payload, vdj_payload, web_summary_html};
use std::fs;

#[test]
fn finds_reports_at_any_depth() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("PBMC/outs")).unwrap();
    fs::create_dir_all(root.join("TCR/outs")).unwrap();
    fs::write(
        root.join("PBMC/outs/web_summary.html"),
        web_summary_html(&count_payload("PBMC", "5,000", "20,000")),
    )
    .unwrap();
    fs::write(
        root.join("TCR/outs/web_summary.html"),
        web_summary_html(&vdj_payload("TCR", "3,000")),
    )
    .unwrap();
    fs::write(root.join("Lib2_web_summary.html"), "<html></html>").unwrap();
    fs::write(root.join("PBMC/outs/metrics_summary.csv"), "a,b\n1,2\n").unwrap();

    let cfg = Config::default();
    let found = find_candidates(&cfg, &[root.to_path_buf()]).unwrap();
    let names: Vec<_> = found.iter().map(|c| c.sample_name.as_str()).collect();
    assert_eq!(names, ["Lib2", "PBMC", "TCR"]);

    let mut pipeline = Pipeline::new(&cfg, ReportCollector::new());
    let outcome = pipeline.run(&found);
    assert_eq!(outcome, RunOutcome::Found(Counts { count: 1, vdj: 1 }));
}

#[test]
fn explicit_files_are_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("S1_web_summary.html");
    fs::write(&file, "<html></html>").unwrap();

    let cfg = Config::default();
    let found = find_candidates(&cfg, &[file.clone(), dir.path().to_path_buf(), file]).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sample_name, "S1");
}

#[test]
fn hidden_files_are_skipped_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".S1_web_summary.html"), "<html></html>").unwrap();

    let mut cfg = Config::default();
    assert!(find_candidates(&cfg, &[dir.path().to_path_buf()]).unwrap().is_empty());

    cfg.discovery.include_hidden = true;
    assert_eq!(find_candidates(&cfg, &[dir.path().to_path_buf()]).unwrap().len(), 1);
}

#[test]
fn missing_input_is_an_error() {
    let cfg = Config::default();
    let err = find_candidates(&cfg, &["/definitely/not/here".into()]).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
