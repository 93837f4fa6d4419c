#![allow(dead_code)]

use serde_json::{json, Value};

/// A summary-tab card with the given `[label, value]` rows.
pub fn section(rows: &[(&str, &str)]) -> Value {
    let rows: Vec<Value> = rows.iter().map(|(l, v)| json!([l, v])).collect();
    json!({
        "help": {"title": "", "data": []},
        "table": {"rows": rows},
    })
}

pub fn count_payload(sample_id: &str, cells: &str, reads_per_cell: &str) -> Value {
    json!({
        "summary": {
            "sample": {"id": sample_id, "description": ""},
            "summary_tab": {
                "pipeline_info_table": {"rows": [
                    ["Sample ID", sample_id],
                    ["Chemistry", "Single Cell 3' v3"],
                    ["Transcriptome", "GRCh38-2020-A"],
                    ["Pipeline Version", "cellranger-7.1.0"],
                ]},
                "sequencing": section(&[
                    ("Number of Reads", "100,000,000"),
                    ("Valid Barcodes", "97.8%"),
                    ("Sequencing Saturation", "45.2%"),
                    ("Q30 Bases in Barcode", "96.1%"),
                ]),
                "mapping": section(&[
                    ("Reads Mapped to Genome", "95.0%"),
                    ("Reads Mapped Confidently to Transcriptome", "60.5%"),
                ]),
                "cells": section(&[
                    ("Estimated Number of Cells", cells),
                    ("Mean Reads per Cell", reads_per_cell),
                    ("Median Genes per Cell", "2,100"),
                    ("Fraction Reads in Cells", "91.3%"),
                ]),
            },
        }
    })
}

pub fn vdj_payload(sample_id: &str, cells: &str) -> Value {
    json!({
        "summary": {
            "sample": {"id": sample_id},
            "summary_tab": {
                "pipeline_info_table": {"rows": [["V(D)J Reference", "vdj_GRCh38_alts_ensembl-7.1.0"]]},
                "sequencing": section(&[
                    ("Number of Read Pairs", "20,000,000"),
                    ("Q30 Bases in RNA Read 1", "91.0%"),
                ]),
                "cells": section(&[
                    ("Estimated Number of Cells", cells),
                    ("Mean Read Pairs per Cell", "6,500"),
                ]),
                "vdj_enrichment": section(&[
                    ("Reads Mapped to Any V(D)J Gene", "88.0%"),
                    ("Reads Mapped to TRA", "30.1%"),
                    ("Reads Mapped to TRB", "50.2%"),
                ]),
                "vdj_expression": section(&[
                    ("Median TRA UMIs per Cell", "4"),
                    ("Median TRB UMIs per Cell", "9"),
                ]),
                "vdj_annotation": section(&[
                    ("Cells With Productive V-J Spanning Pair", "75.5%"),
                    ("Cells With Productive V-J Spanning (TRA, TRB) Pair", "75.5%"),
                    ("Paired Clonotype Diversity", "2,345.6"),
                    ("Cells With TRA Contig", "85.0%"),
                    ("Cells With Productive TRB Contig", "90.1%"),
                ]),
            },
        }
    })
}

pub fn alarms(entries: &[(&str, &str)]) -> Value {
    let alarms: Vec<Value> = entries
        .iter()
        .map(|(title, value)| {
            json!({
                "level": "WARN",
                "title": title,
                "formatted_value": value,
                "message": "Ideal > 70%.",
            })
        })
        .collect();
    json!({ "alarms": alarms })
}

/// Wraps a payload in a page laid out the way Cell Ranger writes it, including its
/// HTML-safe escaping of the JSON.
pub fn web_summary_html(payload: &Value) -> String {
    let json = serde_json::to_string(payload)
        .unwrap()
        .replace('<', r"\u003c")
        .replace('>', r"\u003e")
        .replace('&', r"\u0026");
    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n    \
         <style>body {{ margin: 0 }}</style>\n  </head>\n  <body>\n    <div id=\"root\">\n\n    \
         <script type=\"text/javascript\">\n      const data = {json}\n    </script>\n    \
         <script>var bundle = function() {{ return 1; }};</script>\n  </body>\n</html>\n"
    )
}
