//! Reading the data blob that Cell Ranger embeds in `web_summary.html`.

pub mod classify;
pub mod locate;
pub mod types;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use classify::classify;
pub use locate::locate;

/// The two pipeline modes a web summary can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Count,
    Vdj,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Count => "count",
            Variant::Vdj => "vdj",
        }
    }

    /// Key under which records of this variant are handed to the host.
    pub fn table_id(self) -> &'static str {
        match self {
            Variant::Count => "cellranger_count",
            Variant::Vdj => "cellranger_vdj",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
