//! Annotation-Gap Detection
//!
//! Inspects a completed analysis and derives human-readable caveats about
//! missing gene or phenotype data, so a sparse report is never presented as
//! a clean bill of health. Rules are evaluated independently; every rule
//! that applies contributes one caveat, in a fixed order.

use crate::drugs::required_gene;
use crate::models::{AnalysisReport, BatchResult, SingleResult};

pub const PARSING_CAVEAT: &str =
    "The uploaded VCF could not be fully parsed; results may be incomplete.";
pub const NO_VARIANTS_CAVEAT: &str =
    "No pharmacogenomic variants were detected in the uploaded file.";
pub const GENE_CAVEAT: &str = "The primary gene for this analysis could not be determined.";
pub const PHENOTYPE_CAVEAT: &str =
    "No metabolizer phenotype could be inferred from the uploaded file.";
pub const EMPTY_BATCH_CAVEAT: &str =
    "No per-drug annotations were returned for this batch request.";

fn incomplete_caveat(drug: &str, gene: &str) -> String {
    format!("Analysis incomplete for {drug}: no {gene} annotation was found.")
}

fn missing_summary_caveat(count: usize) -> String {
    format!("{count} of the analyzed drugs are missing gene or phenotype annotations.")
}

/// Absent, empty, or the backend's literal "Unknown" placeholder.
fn is_missing(value: Option<&str>) -> bool {
    match value {
        Some(v) => v.is_empty() || v == "Unknown",
        None => true,
    }
}

/// Derive the ordered caveat list for the current report. Empty when no
/// gaps are found.
pub fn detect(report: &AnalysisReport) -> Vec<String> {
    match report {
        AnalysisReport::Single(single) => detect_single(single),
        AnalysisReport::Batch(batch) => detect_batch(batch),
    }
}

fn detect_single(result: &SingleResult) -> Vec<String> {
    let mut caveats = Vec::new();
    let profile = result.pharmacogenomic_profile.as_ref();

    let parsing_failed = result
        .quality_metrics
        .as_ref()
        .and_then(|m| m.vcf_parsing_success)
        == Some(false);
    if parsing_failed {
        caveats.push(PARSING_CAVEAT.to_string());
    }

    // An absent variant list is indistinguishable from "not reported"; only
    // an explicitly empty list counts as zero detections.
    let zero_variants = profile
        .and_then(|p| p.detected_variants.as_ref())
        .is_some_and(|v| v.is_empty());
    if zero_variants {
        caveats.push(NO_VARIANTS_CAVEAT.to_string());
    }

    let gene = profile.and_then(|p| p.primary_gene.as_deref());
    if is_missing(gene) {
        caveats.push(GENE_CAVEAT.to_string());
    }

    let phenotype = profile.and_then(|p| p.phenotype.as_deref());
    if is_missing(phenotype) {
        caveats.push(PHENOTYPE_CAVEAT.to_string());
    }

    if let Some(required) = result.drug.as_deref().and_then(required_gene) {
        if is_missing(gene) {
            let drug = result.drug.as_deref().unwrap_or("Unknown");
            caveats.push(incomplete_caveat(drug, required));
        }
    }

    caveats
}

fn detect_batch(result: &BatchResult) -> Vec<String> {
    let mut caveats = Vec::new();

    let Some(results) = result.results.as_ref().filter(|m| !m.is_empty()) else {
        return vec![EMPTY_BATCH_CAVEAT.to_string()];
    };

    let missing = results
        .values()
        .filter(|s| is_missing(s.gene.as_deref()) || is_missing(s.phenotype.as_deref()))
        .count();
    if missing > 0 {
        caveats.push(missing_summary_caveat(missing));
    }

    let mut drugs: Vec<&String> = results.keys().collect();
    drugs.sort();
    for drug in drugs {
        if let Some(required) = required_gene(drug) {
            if is_missing(results[drug].gene.as_deref()) {
                caveats.push(incomplete_caveat(drug, required));
            }
        }
    }

    caveats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DrugSummary, PgxProfile, QualityMetrics};
    use std::collections::HashMap;

    fn single_with_profile(drug: &str, gene: Option<&str>, phenotype: Option<&str>) -> SingleResult {
        SingleResult {
            drug: Some(drug.to_string()),
            pharmacogenomic_profile: Some(PgxProfile {
                primary_gene: gene.map(String::from),
                phenotype: phenotype.map(String::from),
                detected_variants: Some(vec![Default::default()]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn parsing_failure_always_yields_the_parsing_caveat() {
        let mut result = single_with_profile("CODEINE", Some("CYP2D6"), Some("Poor Metabolizer"));
        result.quality_metrics = Some(QualityMetrics {
            vcf_parsing_success: Some(false),
            ..Default::default()
        });
        let caveats = detect(&AnalysisReport::Single(result));
        assert!(caveats.contains(&PARSING_CAVEAT.to_string()));
    }

    #[test]
    fn absent_parsing_flag_is_not_a_failure() {
        let result = single_with_profile("CODEINE", Some("CYP2D6"), Some("Poor Metabolizer"));
        let caveats = detect(&AnalysisReport::Single(result));
        assert!(caveats.is_empty());
    }

    #[test]
    fn explicitly_zero_variants_yield_caveat() {
        let mut result = single_with_profile("CODEINE", Some("CYP2D6"), Some("Poor Metabolizer"));
        result
            .pharmacogenomic_profile
            .as_mut()
            .unwrap()
            .detected_variants = Some(Vec::new());
        let caveats = detect(&AnalysisReport::Single(result));
        assert_eq!(caveats, vec![NO_VARIANTS_CAVEAT.to_string()]);
    }

    #[test]
    fn absent_variant_list_is_not_zero() {
        let mut result = single_with_profile("CODEINE", Some("CYP2D6"), Some("Poor Metabolizer"));
        result
            .pharmacogenomic_profile
            .as_mut()
            .unwrap()
            .detected_variants = None;
        let caveats = detect(&AnalysisReport::Single(result));
        assert!(!caveats.contains(&NO_VARIANTS_CAVEAT.to_string()));
    }

    #[test]
    fn missing_gene_for_known_drug_names_drug_and_gene() {
        let result = single_with_profile("WARFARIN", None, Some("Normal Metabolizer"));
        let caveats = detect(&AnalysisReport::Single(result));
        assert!(caveats.contains(&GENE_CAVEAT.to_string()));
        assert!(caveats
            .iter()
            .any(|c| c.contains("WARFARIN") && c.contains("CYP2C9")));
    }

    #[test]
    fn literal_unknown_gene_counts_as_missing() {
        let result = single_with_profile("WARFARIN", Some("Unknown"), Some("Normal Metabolizer"));
        let caveats = detect(&AnalysisReport::Single(result));
        assert!(caveats.iter().any(|c| c.contains("CYP2C9")));
    }

    #[test]
    fn unknown_drug_never_triggers_required_gene_caveat() {
        let result = single_with_profile("ASPIRIN", None, None);
        let caveats = detect(&AnalysisReport::Single(result));
        assert_eq!(
            caveats,
            vec![GENE_CAVEAT.to_string(), PHENOTYPE_CAVEAT.to_string()]
        );
    }

    #[test]
    fn empty_batch_results_yield_exactly_one_caveat() {
        let report = AnalysisReport::Batch(BatchResult {
            results: Some(HashMap::new()),
            ..Default::default()
        });
        assert_eq!(detect(&report), vec![EMPTY_BATCH_CAVEAT.to_string()]);

        let absent = AnalysisReport::Batch(BatchResult::default());
        assert_eq!(detect(&absent), vec![EMPTY_BATCH_CAVEAT.to_string()]);
    }

    #[test]
    fn batch_summary_counts_entries_missing_gene_or_phenotype() {
        let mut results = HashMap::new();
        results.insert(
            "CODEINE".to_string(),
            DrugSummary {
                gene: Some("CYP2D6".into()),
                phenotype: Some("Poor Metabolizer".into()),
                ..Default::default()
            },
        );
        results.insert(
            "WARFARIN".to_string(),
            DrugSummary {
                phenotype: Some("Normal Metabolizer".into()),
                ..Default::default()
            },
        );
        results.insert(
            "ASPIRIN".to_string(),
            DrugSummary::default(),
        );
        let report = AnalysisReport::Batch(BatchResult {
            results: Some(results),
            ..Default::default()
        });

        let caveats = detect(&report);
        assert_eq!(
            caveats[0],
            "2 of the analyzed drugs are missing gene or phenotype annotations."
        );
        // WARFARIN is in the gene table and missing its gene; ASPIRIN is not
        // in the table and must not produce a per-drug caveat.
        assert!(caveats
            .iter()
            .any(|c| c.contains("WARFARIN") && c.contains("CYP2C9")));
        assert!(!caveats.iter().any(|c| c.contains("ASPIRIN") && c.contains("incomplete")));
        assert_eq!(caveats.len(), 2);
    }
}
