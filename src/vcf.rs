//! VCF Upload Validation
//!
//! Shallow pre-upload inspection of a candidate variant file: name, size and
//! a sniff of the leading text. This is deliberately not a VCF parser; the
//! backend owns real parsing. The checks here only keep obviously wrong
//! files off the wire.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Upload size ceiling: 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
/// Human-readable form of the ceiling, used in error text.
pub const MAX_UPLOAD_HUMAN: &str = "5 MiB";

/// How many leading characters of the file are sniffed.
const SNIFF_CHARS: usize = 12_000;
/// How many leading lines of the sniffed text are considered.
const SNIFF_LINES: usize = 120;
/// Minimum tab-separated fields in a VCF data row.
const MIN_DATA_FIELDS: usize = 8;

/// Errors that reject a candidate file before any network call. The display
/// strings double as the raw messages the error normalizer matches on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VcfError {
    #[error("Invalid file type: only .vcf files are supported")]
    InvalidType,

    #[error("File too large: the upload limit is {MAX_UPLOAD_HUMAN}")]
    TooLarge,

    #[error("The file is empty or unreadable")]
    Empty,

    #[error("Missing required VCF headers (##fileformat and #CHROM)")]
    MissingHeaders,

    #[error("VCF structure incomplete: no variant data rows were found")]
    NoDataRows,

    #[error("Unable to read file: {0}")]
    Unreadable(String),
}

/// A file that passed validation and may be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    /// Share of the upload limit this file occupies, clamped to 100.
    pub fn usage_percent(&self) -> u8 {
        let pct = (self.size_bytes as f64 / MAX_UPLOAD_BYTES as f64) * 100.0;
        pct.round().min(100.0) as u8
    }
}

/// Check the file name extension. Case-insensitive.
pub fn validate_name(name: &str) -> Result<(), VcfError> {
    if name.to_lowercase().ends_with(".vcf") {
        Ok(())
    } else {
        Err(VcfError::InvalidType)
    }
}

/// Check the byte size against the upload ceiling.
pub fn validate_size(size_bytes: u64) -> Result<(), VcfError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        Err(VcfError::TooLarge)
    } else {
        Ok(())
    }
}

/// Sniff the leading text of the file for VCF structure: the two mandatory
/// header lines and at least one plausible variant row.
pub fn validate_content(sample: &str) -> Result<(), VcfError> {
    if sample.is_empty() {
        return Err(VcfError::Empty);
    }

    let lines: Vec<&str> = sample.lines().take(SNIFF_LINES).collect();

    let has_fileformat = lines.iter().any(|l| l.starts_with("##fileformat=VCF"));
    let has_chrom = lines.iter().any(|l| l.starts_with("#CHROM"));
    if !has_fileformat || !has_chrom {
        return Err(VcfError::MissingHeaders);
    }

    let has_data_row = lines
        .iter()
        .any(|l| !l.starts_with('#') && l.split('\t').count() >= MIN_DATA_FIELDS);
    if !has_data_row {
        return Err(VcfError::NoDataRows);
    }

    Ok(())
}

/// Run the full check sequence against a file on disk. Pure inspection: the
/// file is read but never modified, and any I/O or decoding failure is
/// reported rather than propagated as a panic.
pub async fn inspect_file(path: &Path) -> Result<SelectedFile, VcfError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    validate_name(&name)?;

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| VcfError::Unreadable(e.to_string()))?;
    validate_size(metadata.len())?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| VcfError::Unreadable(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| VcfError::Unreadable(e.to_string()))?;
    let sample: String = text.chars().take(SNIFF_CHARS).collect();
    validate_content(&sample)?;

    debug!(file = %name, size = metadata.len(), "accepted VCF upload candidate");
    Ok(SelectedFile {
        path: path.to_path_buf(),
        name,
        size_bytes: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_SAMPLE: &str = "##fileformat=VCFv4.2\n\
        ##source=test\n\
        #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
        22\t42522613\trs3892097\tG\tA\t100\tPASS\tGENE=CYP2D6\n";

    #[test]
    fn rejects_wrong_extension_regardless_of_content() {
        assert_eq!(validate_name("variants.txt"), Err(VcfError::InvalidType));
        assert_eq!(validate_name("variants.vcf.gz"), Err(VcfError::InvalidType));
        assert_eq!(validate_name("variants"), Err(VcfError::InvalidType));
    }

    #[test]
    fn accepts_vcf_extension_case_insensitively() {
        assert_eq!(validate_name("sample.vcf"), Ok(()));
        assert_eq!(validate_name("SAMPLE.VCF"), Ok(()));
        assert_eq!(validate_name("Sample.Vcf"), Ok(()));
    }

    #[test]
    fn rejects_files_over_the_limit() {
        assert_eq!(validate_size(MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(validate_size(5_242_881), Err(VcfError::TooLarge));
    }

    #[test]
    fn too_large_message_names_the_limit() {
        assert!(VcfError::TooLarge.to_string().contains("5 MiB"));
    }

    #[test]
    fn accepts_well_formed_sample() {
        assert_eq!(validate_content(VALID_SAMPLE), Ok(()));
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let crlf = VALID_SAMPLE.replace('\n', "\r\n");
        assert_eq!(validate_content(&crlf), Ok(()));
    }

    #[test]
    fn rejects_empty_sample() {
        assert_eq!(validate_content(""), Err(VcfError::Empty));
    }

    #[test]
    fn rejects_when_either_header_is_missing() {
        let no_fileformat = VALID_SAMPLE.replace("##fileformat=VCFv4.2\n", "");
        assert_eq!(validate_content(&no_fileformat), Err(VcfError::MissingHeaders));

        let no_chrom: String = VALID_SAMPLE
            .lines()
            .filter(|l| !l.starts_with("#CHROM"))
            .map(|l| format!("{l}\n"))
            .collect();
        assert_eq!(validate_content(&no_chrom), Err(VcfError::MissingHeaders));
    }

    #[test]
    fn rejects_header_only_sample() {
        let header_only = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
        assert_eq!(validate_content(header_only), Err(VcfError::NoDataRows));
    }

    #[test]
    fn rejects_narrow_data_rows() {
        let narrow = "##fileformat=VCFv4.2\n#CHROM\tPOS\n22\t42522613\trs3892097\n";
        assert_eq!(validate_content(narrow), Err(VcfError::NoDataRows));
    }

    #[test]
    fn usage_percent_is_clamped() {
        let small = SelectedFile {
            path: PathBuf::from("a.vcf"),
            name: "a.vcf".into(),
            size_bytes: MAX_UPLOAD_BYTES / 2,
        };
        assert_eq!(small.usage_percent(), 50);

        let full = SelectedFile {
            path: PathBuf::from("b.vcf"),
            name: "b.vcf".into(),
            size_bytes: MAX_UPLOAD_BYTES,
        };
        assert_eq!(full.usage_percent(), 100);
    }

    #[tokio::test]
    async fn inspect_file_accepts_a_real_vcf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.vcf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(VALID_SAMPLE.as_bytes()).unwrap();

        let selected = inspect_file(&path).await.unwrap();
        assert_eq!(selected.name, "sample.vcf");
        assert_eq!(selected.size_bytes, VALID_SAMPLE.len() as u64);
    }

    #[tokio::test]
    async fn inspect_file_reports_missing_file_as_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.vcf");
        match inspect_file(&path).await {
            Err(VcfError::Unreadable(_)) => {}
            other => panic!("expected unreadable error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn inspect_file_reports_invalid_utf8_as_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.vcf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x01]).unwrap();

        match inspect_file(&path).await {
            Err(VcfError::Unreadable(_)) => {}
            other => panic!("expected unreadable error, got {other:?}"),
        }
    }
}
