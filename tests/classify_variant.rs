mod common;

use cellranger_qc::{
    error::ExtractError,
    websummary::{classify, Variant},
};
use common::{count_payload, section, vdj_payload};
use serde_json::json;

#[test]
fn count_report_is_count() {
    let payload = count_payload("PBMC", "5,000", "20,000");
    assert_eq!(classify(&payload).unwrap(), Variant::Count);
}

#[test]
fn full_vdj_report_is_vdj() {
    // Real VDJ reports carry a `cells` card too.
    let payload = vdj_payload("T1", "3,000");
    assert!(Variant::Count.matches_signature(&payload));
    assert_eq!(classify(&payload).unwrap(), Variant::Vdj);
}

#[test]
fn vdj_marker_alone_is_vdj() {
    let payload = json!({
        "summary": {"summary_tab": {"vdj_annotation": section(&[])}}
    });
    assert!(!Variant::Count.matches_signature(&payload));
    assert_eq!(classify(&payload).unwrap(), Variant::Vdj);
}

#[test]
fn both_markers_resolve_to_vdj() {
    let payload = json!({
        "summary": {"summary_tab": {
            "cells": section(&[]),
            "mapping": section(&[]),
            "vdj_annotation": section(&[]),
        }}
    });
    assert_eq!(classify(&payload).unwrap(), Variant::Vdj);
}

#[test]
fn neither_marker_is_unrecognized() {
    for payload in [
        json!({}),
        json!([1, 2, 3]),
        json!({"summary": {"summary_tab": {"sequencing": section(&[])}}}),
        json!({"summary": {"summary_tab": {"cells": null}}}),
        json!({"summary": {"summary_tab": {"vdj_annotation": "n/a"}}}),
    ] {
        assert!(
            matches!(classify(&payload), Err(ExtractError::Unrecognized)),
            "{payload}"
        );
    }
}

#[test]
fn classification_is_deterministic() {
    let payloads = [
        count_payload("A", "1", "1"),
        vdj_payload("B", "1"),
        json!({"summary": {}}),
    ];
    for payload in &payloads {
        let first = classify(payload).ok();
        for _ in 0..5 {
            assert_eq!(classify(payload).ok(), first);
        }
    }
}
