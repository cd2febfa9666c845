//! Report Derivation
//!
//! Pure functions that turn an [`AnalysisReport`] into display data: risk
//! cards, tone classification, summary counts and the detected-gene set.
//! Nothing here is stored; the view recomputes it whenever the report
//! changes.

use crate::models::{AnalysisReport, BatchResult, SingleResult};

/// Display tone of a risk label, driving card color and summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTone {
    Safe,
    Adjust,
    Toxic,
    Unknown,
}

/// Case-insensitive substring rules mapping a risk label to a tone, checked
/// in order. Policy data, kept separate from the matching code.
const TONE_RULES: &[(&str, RiskTone)] = &[
    ("safe", RiskTone::Safe),
    ("adjust", RiskTone::Adjust),
    ("toxic", RiskTone::Toxic),
    ("ineffective", RiskTone::Toxic),
];

/// Classify a risk label. Substring matching, not equality: "Likely Safe"
/// and "safe (high confidence)" both land on [`RiskTone::Safe`].
pub fn classify_tone(label: Option<&str>) -> RiskTone {
    let Some(label) = label else {
        return RiskTone::Unknown;
    };
    let label = label.to_lowercase();
    TONE_RULES
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map(|(_, tone)| *tone)
        .unwrap_or(RiskTone::Unknown)
}

/// Normalize a confidence score to an integer percentage, clamped to
/// [0, 100].
pub fn confidence_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// One renderable risk card, flattened from either result shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskCard {
    pub drug: String,
    pub risk_label: Option<String>,
    pub severity: Option<String>,
    pub confidence_percent: Option<u8>,
    pub gene: Option<String>,
    pub phenotype: Option<String>,
    pub diplotype: Option<String>,
    pub recommendation: Option<String>,
    pub tone: RiskTone,
}

/// Tone tally across all cards of the current report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToneCounts {
    pub safe: usize,
    pub adjust: usize,
    pub toxic: usize,
    pub unknown: usize,
}

impl ToneCounts {
    pub fn tally(cards: &[RiskCard]) -> Self {
        let mut counts = Self::default();
        for card in cards {
            match card.tone {
                RiskTone::Safe => counts.safe += 1,
                RiskTone::Adjust => counts.adjust += 1,
                RiskTone::Toxic => counts.toxic += 1,
                RiskTone::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}

/// Flatten the current report into risk cards. Batch cards are ordered by
/// drug name so the layout is stable across frames.
pub fn derive_cards(report: &AnalysisReport) -> Vec<RiskCard> {
    match report {
        AnalysisReport::Single(single) => vec![single_card(single)],
        AnalysisReport::Batch(batch) => batch_cards(batch),
    }
}

fn single_card(single: &SingleResult) -> RiskCard {
    let risk = single.risk_assessment.as_ref();
    let profile = single.pharmacogenomic_profile.as_ref();
    let label = risk.and_then(|r| r.risk_label.clone());
    RiskCard {
        drug: single.drug.clone().unwrap_or_else(|| "Unknown".to_string()),
        tone: classify_tone(label.as_deref()),
        risk_label: label,
        severity: risk.and_then(|r| r.severity.clone()),
        confidence_percent: risk.and_then(|r| r.confidence_score).map(confidence_percent),
        gene: profile.and_then(|p| p.primary_gene.clone()),
        phenotype: profile.and_then(|p| p.phenotype.clone()),
        diplotype: profile.and_then(|p| p.diplotype.clone()),
        recommendation: single
            .clinical_recommendation
            .as_ref()
            .and_then(|r| r.action.clone()),
    }
}

fn batch_cards(batch: &BatchResult) -> Vec<RiskCard> {
    let Some(results) = batch.results.as_ref() else {
        return Vec::new();
    };
    let mut drugs: Vec<&String> = results.keys().collect();
    drugs.sort();

    drugs
        .into_iter()
        .map(|drug| {
            let summary = &results[drug];
            RiskCard {
                drug: drug.clone(),
                tone: classify_tone(summary.risk_label.as_deref()),
                risk_label: summary.risk_label.clone(),
                severity: summary.severity.clone(),
                confidence_percent: summary.confidence_score.map(confidence_percent),
                gene: summary.gene.clone(),
                phenotype: summary.phenotype.clone(),
                diplotype: summary.diplotype.clone(),
                recommendation: summary.recommendation.clone(),
            }
        })
        .collect()
}

/// Distinct genes mentioned anywhere in the report, sorted.
pub fn detected_genes(report: &AnalysisReport) -> Vec<String> {
    let mut genes: Vec<String> = Vec::new();
    let mut push = |gene: Option<&String>| {
        if let Some(gene) = gene {
            if !gene.is_empty() && gene != "Unknown" && !genes.contains(gene) {
                genes.push(gene.clone());
            }
        }
    };

    match report {
        AnalysisReport::Single(single) => {
            if let Some(profile) = &single.pharmacogenomic_profile {
                push(profile.primary_gene.as_ref());
                for variant in profile.detected_variants.iter().flatten() {
                    push(variant.gene.as_ref());
                }
            }
        }
        AnalysisReport::Batch(batch) => {
            for summary in batch.results.iter().flat_map(|m| m.values()) {
                push(summary.gene.as_ref());
            }
        }
    }

    genes.sort();
    genes
}
