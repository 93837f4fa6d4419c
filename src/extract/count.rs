use super::{
    collect_numbers, collect_pipeline_info, collect_warnings, require, sample_id, Extraction,
    MetricRecord, MetricRules,
};
use crate::{
    error::ExtractError,
    websummary::{types::CountWebSummary, Variant},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

const GEX_LABELS: &[(&str, &str)] = &[
    // sequencing
    ("Number of Reads", "number_of_reads"),
    ("Valid Barcodes", "valid_barcodes"),
    ("Valid UMIs", "valid_umis"),
    ("Sequencing Saturation", "sequencing_saturation"),
    ("Q30 Bases in Barcode", "q30_bases_in_barcode"),
    ("Q30 Bases in RNA Read", "q30_bases_in_rna_read"),
    ("Q30 Bases in RNA Read 2", "q30_bases_in_rna_read_2"),
    ("Q30 Bases in UMI", "q30_bases_in_umi"),
    // mapping
    ("Reads Mapped to Genome", "reads_mapped_to_genome"),
    ("Reads Mapped Confidently to Genome", "reads_mapped_confidently_to_genome"),
    (
        "Reads Mapped Confidently to Intergenic Regions",
        "reads_mapped_confidently_to_intergenic_regions",
    ),
    (
        "Reads Mapped Confidently to Intronic Regions",
        "reads_mapped_confidently_to_intronic_regions",
    ),
    (
        "Reads Mapped Confidently to Exonic Regions",
        "reads_mapped_confidently_to_exonic_regions",
    ),
    (
        "Reads Mapped Confidently to Transcriptome",
        "reads_mapped_confidently_to_transcriptome",
    ),
    ("Reads Mapped Antisense to Gene", "reads_mapped_antisense_to_gene"),
    // cells
    ("Estimated Number of Cells", "estimated_number_of_cells"),
    ("Mean Reads per Cell", "mean_reads_per_cell"),
    ("Median Genes per Cell", "median_genes_per_cell"),
    ("Total Genes Detected", "total_genes_detected"),
    ("Median UMI Counts per Cell", "median_umi_counts_per_cell"),
    ("Fraction Reads in Cells", "fraction_reads_in_cells"),
];

const ANTIBODY_LABELS: &[(&str, &str)] = &[
    ("Number of Reads", "number_of_reads"),
    ("Mean Reads per Cell", "mean_reads_per_cell"),
    ("Valid Barcodes", "valid_barcodes"),
    ("Valid UMIs", "valid_umis"),
    ("Sequencing Saturation", "sequencing_saturation"),
    ("Q30 Bases in Barcode", "q30_bases_in_barcode"),
    ("Q30 Bases in Antibody Read", "q30_bases_in_antibody_read"),
    ("Q30 Bases in UMI", "q30_bases_in_umi"),
    ("Estimated Number of Cells", "estimated_number_of_cells"),
    ("Fraction Antibody Reads", "fraction_antibody_reads"),
    ("Fraction Antibody Reads Usable", "fraction_antibody_reads_usable"),
    ("Antibody Reads Usable per Cell", "reads_usable_per_cell"),
    ("Fraction Antibody Reads in Aggregate Barcodes", "fraction_reads_in_aggregate_barcodes"),
    ("Fraction Unrecognized Antibody", "fraction_unrecognized_antibody"),
    ("Antibody Reads in Cells", "fraction_reads_in_cells"),
    ("Fraction Antibody Reads in Cells", "fraction_reads_in_cells"),
    (
        "Median UMIs per Cell (summed over all recovered antibodies)",
        "median_umis_per_cell",
    ),
];

const REQUIRED: &[&str] = &["estimated_number_of_cells", "mean_reads_per_cell"];

static GEX_RULES: LazyLock<MetricRules> = LazyLock::new(|| MetricRules::new(GEX_LABELS));
static ANTIBODY_RULES: LazyLock<MetricRules> =
    LazyLock::new(|| MetricRules::new(ANTIBODY_LABELS));

/// Extracts a gene expression report. Antibody capture metrics are added with an
/// `antibody_` prefix when the report has an antibody tab.
pub fn extract_count(payload: &Value) -> Result<Extraction, ExtractError> {
    let ws = CountWebSummary::deserialize(payload).map_err(|source| ExtractError::Schema {
        variant: Variant::Count,
        source,
    })?;
    let summary = ws.summary;
    let tab = &summary.summary_tab;

    let mut record = MetricRecord::new();
    if let Some(info) = &tab.pipeline_info_table {
        collect_pipeline_info(&mut record, info);
    }
    for section in [&tab.sequencing, &tab.mapping, &tab.cells] {
        collect_numbers(&mut record, &section.table, &GEX_RULES, "");
    }
    require(&record, Variant::Count, REQUIRED)?;

    if let Some(antibody) = &summary.antibody_tab {
        for section in antibody.sections() {
            collect_numbers(&mut record, &section.table, &ANTIBODY_RULES, "antibody_");
        }
    }

    Ok(Extraction {
        variant: Variant::Count,
        sample_name: sample_id(summary.sample.as_ref()),
        record,
        warnings: collect_warnings(summary.alarms.as_ref()),
    })
}
