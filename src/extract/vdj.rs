use super::{
    collect_numbers, collect_pipeline_info, collect_warnings, require, sample_id, Extraction,
    MetricRecord, MetricRules,
};
use crate::{
    error::ExtractError,
    websummary::{types::VdjWebSummary, Variant},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

const VDJ_LABELS: &[(&str, &str)] = &[
    // sequencing
    ("Number of Read Pairs", "number_of_read_pairs"),
    ("Valid Barcodes", "valid_barcodes"),
    ("Q30 Bases in Barcode", "q30_bases_in_barcode"),
    ("Q30 Bases in RNA Read 1", "q30_bases_in_rna_read"),
    ("Q30 Bases in RNA Read", "q30_bases_in_rna_read"),
    ("Q30 Bases in RNA Read 2", "q30_bases_in_rna_read_2"),
    ("Q30 Bases in UMI", "q30_bases_in_umi"),
    // cells
    ("Estimated Number of Cells", "estimated_number_of_cells"),
    ("Mean Read Pairs per Cell", "mean_read_pairs_per_cell"),
    ("Mean Used Read Pairs per Cell", "mean_used_read_pairs_per_cell"),
    ("Fraction Reads in Cells", "fraction_reads_in_cells"),
    (
        "Number of Cells With Productive V-J Spanning Pair",
        "number_of_cells_with_productive_vj_spanning_pair",
    ),
    // enrichment
    ("Reads Mapped to Any V(D)J Gene", "reads_mapped_to_any_vdj_gene"),
    // annotation
    (
        "Cells With Productive V-J Spanning Pair",
        "cells_with_productive_vj_spanning_pair",
    ),
    ("Paired Clonotype Diversity", "paired_clonotype_diversity"),
];

const CHAIN: &str = "(TRA|TRB|TRG|TRD|IGH|IGK|IGL)";

static VDJ_RULES: LazyLock<MetricRules> = LazyLock::new(|| {
    let patterns = [
        (format!(r"^Reads Mapped to {CHAIN}$"), "reads_mapped_to_${1}"),
        (format!(r"^Median {CHAIN} UMIs per Cell$"), "median_${1}_umis_per_cell"),
        (
            format!(r"^Cells With Productive V-J Spanning \({CHAIN}, {CHAIN}\) Pair$"),
            "cells_with_productive_vj_spanning_${1}_${2}_pair",
        ),
        (format!(r"^Cells With {CHAIN} Contig$"), "cells_with_${1}_contig"),
        (
            format!(r"^Cells With CDR3-annotated {CHAIN} Contig$"),
            "cells_with_cdr3_annotated_${1}_contig",
        ),
        (
            format!(r"^Cells With V-J Spanning {CHAIN} Contig$"),
            "cells_with_vj_spanning_${1}_contig",
        ),
        (
            format!(r"^Cells With Productive {CHAIN} Contig$"),
            "cells_with_productive_${1}_contig",
        ),
    ];
    let patterns: Vec<(&str, &'static str)> =
        patterns.iter().map(|(p, t)| (p.as_str(), *t)).collect();
    MetricRules::new(VDJ_LABELS).with_patterns(&patterns)
});

const REQUIRED: &[&str] = &["estimated_number_of_cells"];

/// Extracts a V(D)J report. Chain-specific rows (TRA, IGH, ...) become keys such as
/// `median_tra_umis_per_cell`.
pub fn extract_vdj(payload: &Value) -> Result<Extraction, ExtractError> {
    let ws = VdjWebSummary::deserialize(payload).map_err(|source| ExtractError::Schema {
        variant: Variant::Vdj,
        source,
    })?;
    let summary = ws.summary;
    let tab = &summary.summary_tab;

    let mut record = MetricRecord::new();
    if let Some(info) = &tab.pipeline_info_table {
        collect_pipeline_info(&mut record, info);
    }
    let sections = [
        Some(&tab.sequencing),
        Some(&tab.cells),
        Some(&tab.vdj_enrichment),
        tab.vdj_expression.as_ref(),
        Some(&tab.vdj_annotation),
    ];
    for section in sections.into_iter().flatten() {
        collect_numbers(&mut record, &section.table, &VDJ_RULES, "");
    }
    require(&record, Variant::Vdj, REQUIRED)?;

    Ok(Extraction {
        variant: Variant::Vdj,
        sample_name: sample_id(summary.sample.as_ref()),
        record,
        warnings: collect_warnings(summary.alarms.as_ref()),
    })
}
