//! Risk Card Rendering
//!
//! Builds the scrollable result body: summary counts, per-drug risk cards,
//! profile details, polypharmacy warnings and caveats. Everything is
//! derived from the current report on each frame.

use crate::models::{or_na, or_unknown, AnalysisReport};
use crate::report::RiskCard;
use crate::tui::app::App;
use crate::tui::theme::{Icons, Theme};
use ratatui::text::{Line, Span};

/// Build the full result body for the current report.
pub fn results_lines(app: &App) -> Vec<Line<'static>> {
    let Some(report) = app.report.as_ref() else {
        return Vec::new();
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Patient: ", Theme::text_secondary()),
        Span::styled(or_unknown(report.patient_id()).to_string(), Theme::heading()),
        Span::styled("   Analyzed: ", Theme::text_secondary()),
        Span::styled(or_na(report.timestamp()).to_string(), Theme::text()),
    ]));

    let counts = app.tone_counts();
    lines.push(Line::from(vec![
        Span::styled(format!("{} Safe {}", Icons::DOT, counts.safe), Theme::success()),
        Span::raw("   "),
        Span::styled(format!("{} Adjust {}", Icons::DOT, counts.adjust), Theme::warning()),
        Span::raw("   "),
        Span::styled(format!("{} Toxic {}", Icons::DOT, counts.toxic), Theme::error()),
        Span::raw("   "),
        Span::styled(
            format!("{} Unknown {}", Icons::DOT, counts.unknown),
            Theme::text_secondary(),
        ),
    ]));

    let genes = app.detected_gene_list();
    if !genes.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Detected genes: ", Theme::text_secondary()),
            Span::styled(genes.join(", "), Theme::text()),
        ]));
    }

    for card in app.cards() {
        lines.push(Line::from(""));
        lines.extend(card_lines(&card));
    }

    match report {
        AnalysisReport::Single(single) => {
            if let Some(profile) = &single.pharmacogenomic_profile {
                if let Some(variants) = profile.detected_variants.as_ref().filter(|v| !v.is_empty())
                {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled("Detected variants", Theme::heading())));
                    for variant in variants {
                        lines.push(Line::from(vec![
                            Span::raw("  "),
                            Span::styled(
                                or_na(variant.rsid.as_deref()).to_string(),
                                Theme::text(),
                            ),
                            Span::raw("  "),
                            Span::styled(
                                or_unknown(variant.gene.as_deref()).to_string(),
                                Theme::text_secondary(),
                            ),
                            Span::raw("  "),
                            Span::styled(
                                or_na(variant.allele.as_deref()).to_string(),
                                Theme::text_secondary(),
                            ),
                            Span::raw("  "),
                            Span::styled(
                                or_na(variant.function.as_deref()).to_string(),
                                Theme::text_secondary(),
                            ),
                            Span::raw("  "),
                            Span::styled(
                                or_na(variant.genotype.as_deref()).to_string(),
                                Theme::text_secondary(),
                            ),
                        ]));
                    }
                }
            }

            if let Some(explanation) = &single.llm_explanation {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Explanation", Theme::heading())));
                push_labeled(&mut lines, "Summary", explanation.summary.as_deref());
                push_labeled(&mut lines, "Mechanism", explanation.mechanism.as_deref());
                push_labeled(&mut lines, "Advice", explanation.recommendation.as_deref());
                for citation in explanation.citations.iter().flatten() {
                    lines.push(Line::from(vec![
                        Span::raw("    "),
                        Span::styled(format!("[{citation}]"), Theme::text_dim()),
                    ]));
                }
            }

            if let Some(metrics) = &single.quality_metrics {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Quality: ", Theme::text_secondary()),
                    Span::styled(
                        format!(
                            "{} variants total, {} pharmacogenomic",
                            metrics
                                .total_variants
                                .map(|n| n.to_string())
                                .unwrap_or_else(|| "N/A".into()),
                            metrics
                                .pgx_variants_detected
                                .map(|n| n.to_string())
                                .unwrap_or_else(|| "N/A".into()),
                        ),
                        Theme::text(),
                    ),
                ]));
            }
        }
        AnalysisReport::Batch(batch) => {
            if let Some(warnings) = batch
                .polypharmacy_warnings
                .as_ref()
                .filter(|w| !w.is_empty())
            {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Polypharmacy warnings",
                    Theme::warning(),
                )));
                for warning in warnings {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {} ", Icons::DOT), Theme::warning()),
                        Span::styled(
                            or_unknown(warning.warning.as_deref()).to_string(),
                            Theme::text(),
                        ),
                    ]));
                    if let Some(note) = warning.clinical_note.as_deref().filter(|n| !n.is_empty()) {
                        lines.push(Line::from(vec![
                            Span::raw("    "),
                            Span::styled(note.to_string(), Theme::text_secondary()),
                        ]));
                    }
                }
            }

            if let Some(explanations) = batch.llm_explanations.as_ref() {
                let mut drugs: Vec<&String> = explanations.keys().collect();
                drugs.sort();
                for drug in drugs {
                    if let Some(summary) = explanations[drug].summary.as_deref() {
                        lines.push(Line::from(""));
                        lines.push(Line::from(vec![
                            Span::styled(format!("{drug}: "), Theme::heading()),
                            Span::styled(summary.to_string(), Theme::text()),
                        ]));
                    }
                }
            }
        }
    }

    let caveats = app.caveat_list();
    if !caveats.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Caveats", Theme::warning())));
        for caveat in caveats {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", Icons::DOT), Theme::warning()),
                Span::styled(caveat, Theme::text()),
            ]));
        }
    }

    lines
}

/// One card: tone-colored title plus the flattened fields.
fn card_lines(card: &RiskCard) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut title = vec![
        Span::styled(format!("[ {} ]", card.drug), Theme::tone_style(card.tone)),
        Span::raw("  "),
        Span::styled(
            or_unknown(card.risk_label.as_deref()).to_string(),
            Theme::tone_style(card.tone),
        ),
    ];
    if let Some(pct) = card.confidence_percent {
        title.push(Span::styled(
            format!("  {pct}% confidence"),
            Theme::text_secondary(),
        ));
    }
    lines.push(Line::from(title));

    push_labeled(&mut lines, "Severity", card.severity.as_deref());
    lines.push(Line::from(vec![
        Span::styled("  Gene      : ", Theme::text_dim()),
        Span::styled(or_unknown(card.gene.as_deref()).to_string(), Theme::text()),
        Span::styled("   Diplotype: ", Theme::text_dim()),
        Span::styled(or_na(card.diplotype.as_deref()).to_string(), Theme::text()),
    ]));
    push_labeled(&mut lines, "Phenotype", card.phenotype.as_deref());
    push_labeled(&mut lines, "Action", card.recommendation.as_deref());

    lines
}

fn push_labeled(lines: &mut Vec<Line<'static>>, label: &str, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return;
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:<10}: "), Theme::text_dim()),
        Span::styled(value.to_string(), Theme::text()),
    ]));
}
