mod common;

use cellranger_qc::{
    error::{ExtractError, SkipKind},
    websummary::locate,
};
use common::{alarms, count_payload, web_summary_html};

#[test]
fn decodes_embedded_payload() {
    let payload = count_payload("PBMC", "5,000", "20,000");
    let html = web_summary_html(&payload);
    let found = locate(&html).expect("payload");
    assert_eq!(found, payload);
}

#[test]
fn html_escapes_are_undone_by_json_decoding() {
    let mut payload = count_payload("PBMC", "5,000", "20,000");
    payload["summary"]["alarms"] = alarms(&[("Low Fraction <Reads> & Cells", "45.0%")]);
    let html = web_summary_html(&payload);
    assert!(!html.contains("<Reads>"));

    let found = locate(&html).expect("payload");
    assert_eq!(
        found["summary"]["alarms"]["alarms"][0]["title"],
        "Low Fraction <Reads> & Cells"
    );
}

#[test]
fn page_without_marker_is_not_found() {
    let html = "<html><body><script>var x = {\"summary\": {}};</script></body></html>";
    let err = locate(html).unwrap_err();
    assert!(matches!(err, ExtractError::NotFound));
    assert_eq!(err.kind(), SkipKind::NotFound);
}

#[test]
fn truncated_payload_is_a_decode_error() {
    let html = web_summary_html(&count_payload("PBMC", "5,000", "20,000"));
    let cut = html.find("\"mapping\"").expect("mapping key");
    let truncated = format!("{}</script></html>", &html[..cut]);

    let err = locate(&truncated).unwrap_err();
    assert!(matches!(err, ExtractError::Decode(_)));
    assert_eq!(err.kind(), SkipKind::DecodeError);
}
