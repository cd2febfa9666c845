//! Wire model for the analysis backend's JSON responses.
//!
//! The backend is untrusted: every field is optional and consumers degrade
//! to a placeholder ("Unknown"/"N/A") instead of failing when one is absent.

use std::collections::HashMap;

/// A completed analysis. Exactly one shape exists at a time; selecting a new
/// analysis replaces the whole value. The shape is decided by the endpoint
/// that produced the body, not sniffed from the JSON, so this enum only
/// serializes untagged and is never deserialized directly.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Single(SingleResult),
    Batch(BatchResult),
}

impl AnalysisReport {
    pub fn patient_id(&self) -> Option<&str> {
        match self {
            AnalysisReport::Single(r) => r.patient_id.as_deref(),
            AnalysisReport::Batch(r) => r.patient_id.as_deref(),
        }
    }

    pub fn timestamp(&self) -> Option<&str> {
        match self {
            AnalysisReport::Single(r) => r.timestamp.as_deref(),
            AnalysisReport::Batch(r) => r.timestamp.as_deref(),
        }
    }
}

/// One patient, one drug.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SingleResult {
    pub patient_id: Option<String>,
    pub drug: Option<String>,
    pub timestamp: Option<String>,
    pub risk_assessment: Option<RiskAssessment>,
    pub pharmacogenomic_profile: Option<PgxProfile>,
    pub clinical_recommendation: Option<ClinicalRecommendation>,
    pub llm_explanation: Option<LlmExplanation>,
    pub quality_metrics: Option<QualityMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    pub risk_label: Option<String>,
    pub severity: Option<String>,
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PgxProfile {
    pub primary_gene: Option<String>,
    pub phenotype: Option<String>,
    pub diplotype: Option<String>,
    pub detected_variants: Option<Vec<DetectedVariant>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectedVariant {
    pub rsid: Option<String>,
    pub gene: Option<String>,
    pub allele: Option<String>,
    pub function: Option<String>,
    pub genotype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClinicalRecommendation {
    pub action: Option<String>,
    pub guideline_source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LlmExplanation {
    pub summary: Option<String>,
    pub mechanism: Option<String>,
    pub recommendation: Option<String>,
    pub citations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QualityMetrics {
    pub total_variants: Option<u64>,
    pub pgx_variants_detected: Option<u64>,
    pub vcf_parsing_success: Option<bool>,
}

/// One patient, multiple drugs.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BatchResult {
    pub patient_id: Option<String>,
    pub timestamp: Option<String>,
    pub drugs_analyzed: Option<Vec<String>>,
    pub polypharmacy_warnings: Option<Vec<PolypharmacyWarning>>,
    pub llm_explanations: Option<HashMap<String, LlmExplanation>>,
    pub results: Option<HashMap<String, DrugSummary>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolypharmacyWarning {
    pub warning: Option<String>,
    pub clinical_note: Option<String>,
}

/// Flattened per-drug record in a batch response.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DrugSummary {
    pub risk_label: Option<String>,
    pub severity: Option<String>,
    pub confidence_score: Option<f64>,
    pub gene: Option<String>,
    pub phenotype: Option<String>,
    pub diplotype: Option<String>,
    pub recommendation: Option<String>,
}

/// Render an optional string field with the standard placeholder.
pub fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => "Unknown",
    }
}

/// Render an optional string field as "N/A" when absent.
pub fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_result_tolerates_missing_fields() {
        let raw = r#"{"patient_id": "PT-001", "risk_assessment": {"risk_label": "Safe"}}"#;
        let result: SingleResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.patient_id.as_deref(), Some("PT-001"));
        assert_eq!(
            result.risk_assessment.as_ref().unwrap().risk_label.as_deref(),
            Some("Safe")
        );
        assert!(result.pharmacogenomic_profile.is_none());
        assert!(result.quality_metrics.is_none());
    }

    #[test]
    fn batch_result_tolerates_empty_body() {
        let result: BatchResult = serde_json::from_str("{}").unwrap();
        assert!(result.results.is_none());
        assert!(result.polypharmacy_warnings.is_none());
    }

    #[test]
    fn report_roundtrips_through_pretty_json() {
        let raw = r#"{
            "patient_id": "PT-042",
            "drug": "CODEINE",
            "timestamp": "2025-11-02T10:00:00Z",
            "risk_assessment": {"risk_label": "Toxic", "severity": "high", "confidence_score": 0.91},
            "pharmacogenomic_profile": {
                "primary_gene": "CYP2D6",
                "phenotype": "Ultrarapid Metabolizer",
                "diplotype": "*1/*1xN",
                "detected_variants": [
                    {"rsid": "rs3892097", "gene": "CYP2D6", "allele": "*4", "function": "no function", "genotype": "0/1"}
                ]
            },
            "quality_metrics": {"total_variants": 1042, "pgx_variants_detected": 7, "vcf_parsing_success": true}
        }"#;
        let single: SingleResult = serde_json::from_str(raw).unwrap();
        let report = AnalysisReport::Single(single.clone());

        // The untagged serialization is exactly the inner result body.
        let pretty = serde_json::to_string_pretty(&report).unwrap();
        let reparsed: SingleResult = serde_json::from_str(&pretty).unwrap();
        assert_eq!(single, reparsed);
    }

    #[test]
    fn batch_report_serializes_as_inner_body() {
        let raw = r#"{
            "patient_id": "PT-001",
            "drugs_analyzed": ["CODEINE", "WARFARIN"],
            "results": {
                "CODEINE": {"risk_label": "Safe", "gene": "CYP2D6"},
                "WARFARIN": {"risk_label": "Adjust Dosage", "gene": "CYP2C9"}
            }
        }"#;
        let batch: BatchResult = serde_json::from_str(raw).unwrap();
        let report = AnalysisReport::Batch(batch.clone());

        let pretty = serde_json::to_string_pretty(&report).unwrap();
        let reparsed: BatchResult = serde_json::from_str(&pretty).unwrap();
        assert_eq!(batch, reparsed);
        assert_eq!(reparsed.results.unwrap().len(), 2);
    }

    #[test]
    fn placeholders_cover_absent_and_empty() {
        assert_eq!(or_unknown(None), "Unknown");
        assert_eq!(or_unknown(Some("")), "Unknown");
        assert_eq!(or_unknown(Some("CYP2D6")), "CYP2D6");
        assert_eq!(or_na(None), "N/A");
    }
}
