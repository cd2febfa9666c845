//! Report Export
//!
//! Copies the displayed report to the system clipboard (OSC 52 escape, so
//! it works over SSH without a windowing system) or writes it as a JSON
//! file named after the patient.

use crate::models::AnalysisReport;
use crate::types::{AppError, AppResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Pretty-printed JSON body of the report, exactly what the raw-JSON panel
/// shows.
pub fn pretty_json(report: &AnalysisReport) -> AppResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| AppError::Export(e.to_string()))
}

/// Push text onto the system clipboard through the OSC 52 escape sequence.
/// The terminal may refuse or ignore the sequence; a write failure surfaces
/// as a non-fatal export error.
pub fn copy_to_clipboard(text: &str) -> AppResult<()> {
    let payload = BASE64.encode(text.as_bytes());
    let mut stdout = std::io::stdout();
    write!(stdout, "\x1b]52;c;{payload}\x07").map_err(|e| AppError::Export(e.to_string()))?;
    stdout.flush().map_err(|e| AppError::Export(e.to_string()))?;
    Ok(())
}

/// File name for a saved report: `pgx_report_{patient_id}.json`, with the
/// literal "patient" when the identifier is absent.
pub fn export_file_name(patient_id: Option<&str>) -> String {
    let patient = match patient_id {
        Some(id) if !id.trim().is_empty() => id.trim(),
        _ => "patient",
    };
    format!("pgx_report_{patient}.json")
}

/// Directory reports are saved into: the user's downloads directory when
/// known, the working directory otherwise.
pub fn download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Write the report into `dir` and return the full path.
pub async fn save_report(report: &AnalysisReport, dir: &Path) -> AppResult<PathBuf> {
    let json = pretty_json(report)?;
    let path = dir.join(export_file_name(report.patient_id()));
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| AppError::Export(e.to_string()))?;
    info!(path = %path.display(), "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SingleResult;

    #[test]
    fn file_name_uses_patient_id_with_fallback() {
        assert_eq!(export_file_name(Some("PT-042")), "pgx_report_PT-042.json");
        assert_eq!(export_file_name(None), "pgx_report_patient.json");
        assert_eq!(export_file_name(Some("  ")), "pgx_report_patient.json");
    }

    #[tokio::test]
    async fn saved_report_parses_back_identically() {
        let report = AnalysisReport::Single(SingleResult {
            patient_id: Some("PT-042".into()),
            drug: Some("CODEINE".into()),
            ..Default::default()
        });

        let dir = tempfile::tempdir().unwrap();
        let path = save_report(&report, dir.path()).await.unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "pgx_report_PT-042.json"
        );

        let written = std::fs::read_to_string(&path).unwrap();
        let reparsed: SingleResult = serde_json::from_str(&written).unwrap();
        assert_eq!(reparsed.patient_id.as_deref(), Some("PT-042"));
        assert_eq!(reparsed.drug.as_deref(), Some("CODEINE"));
    }
}
