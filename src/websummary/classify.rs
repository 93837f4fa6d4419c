use super::Variant;
use crate::error::ExtractError;
use serde::Deserialize;
use serde_json::{Map, Value};

// Minimal shapes that identify a variant. Each must decode strictly: the marker
// section has to be present and be an object.
#[derive(Deserialize)]
struct Signature<T> {
    #[allow(dead_code)]
    summary: SignatureSummary<T>,
}

#[derive(Deserialize)]
struct SignatureSummary<T> {
    #[allow(dead_code)]
    summary_tab: T,
}

#[derive(Deserialize)]
struct CountMarker {
    #[allow(dead_code)]
    cells: Map<String, Value>,
}

#[derive(Deserialize)]
struct VdjMarker {
    #[allow(dead_code)]
    vdj_annotation: Map<String, Value>,
}

/// Order in which signatures are tried. VDJ reports also carry a `cells` card, while
/// `vdj_annotation` is never written by a count run, so the VDJ signature goes first.
pub const PRECEDENCE: [Variant; 2] = [Variant::Vdj, Variant::Count];

impl Variant {
    pub fn matches_signature(self, payload: &Value) -> bool {
        match self {
            Variant::Count => Signature::<CountMarker>::deserialize(payload).is_ok(),
            Variant::Vdj => Signature::<VdjMarker>::deserialize(payload).is_ok(),
        }
    }
}

pub fn classify(payload: &Value) -> Result<Variant, ExtractError> {
    PRECEDENCE
        .into_iter()
        .find(|variant| variant.matches_signature(payload))
        .ok_or(ExtractError::Unrecognized)
}
