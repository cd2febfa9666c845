//! Error Message Normalization
//!
//! Maps raw backend and local error strings onto a single user-facing
//! sentence. Matching is case-insensitive substring search over an ordered
//! table, so the table can track incidental backend wording without
//! touching any call site.

/// Ordered (phrase → message) table. The first phrase found in the raw
/// message wins.
const KNOWN_PHRASES: &[(&str, &str)] = &[
    (
        "invalid file type",
        "Only .vcf files are accepted. Please choose a Variant Call Format file.",
    ),
    (
        "too large",
        "The selected file exceeds the 5 MiB upload limit. Please choose a smaller VCF.",
    ),
    (
        "vcf header",
        "The file is missing the required VCF header lines and cannot be analyzed.",
    ),
    (
        "not found",
        "The analysis endpoint could not be found. Is the backend service running?",
    ),
    (
        "internal server error",
        "The analysis service hit an internal error. Please try again in a moment.",
    ),
    (
        "error sending request",
        "Could not reach the analysis service. Check that the backend is running.",
    ),
    (
        "request failed",
        "The analysis request failed. Please check the backend service and try again.",
    ),
];

const GENERIC_FAILURE: &str = "Analysis failed. Please verify the file and try again.";

/// Normalize a raw error message into one user-facing sentence. Unrecognized
/// messages pass through unchanged; an empty message becomes a generic
/// failure sentence.
pub fn normalize_error_message(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return GENERIC_FAILURE.to_string();
    }

    let lowered = raw.to_lowercase();
    for (phrase, message) in KNOWN_PHRASES {
        if lowered.contains(phrase) {
            return (*message).to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_phrases_map_to_tailored_messages() {
        assert!(normalize_error_message("Invalid file type: only .vcf files are supported")
            .contains("Variant Call Format"));
        assert!(normalize_error_message("File too large: the upload limit is 5 MiB")
            .contains("5 MiB upload limit"));
        assert!(normalize_error_message("Missing required VCF headers (##fileformat and #CHROM)")
            .contains("header lines"));
        assert!(normalize_error_message("Not Found").contains("backend service running"));
        assert!(normalize_error_message("500 Internal Server Error").contains("internal error"));
        assert!(
            normalize_error_message("error sending request for url (http://127.0.0.1:8000/analyze)")
                .contains("Could not reach")
        );
        assert!(normalize_error_message("Request failed (status 502)")
            .contains("analysis request failed"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            normalize_error_message("INVALID FILE TYPE"),
            normalize_error_message("invalid file type")
        );
    }

    #[test]
    fn first_match_in_table_order_wins() {
        // Contains both "invalid file type" and "too large"; the table lists
        // the type check first.
        let message = normalize_error_message("invalid file type and too large");
        assert!(message.contains("Variant Call Format"));
    }

    #[test]
    fn unknown_messages_pass_through() {
        assert_eq!(
            normalize_error_message("quota exceeded for tenant"),
            "quota exceeded for tenant"
        );
    }

    #[test]
    fn empty_message_becomes_generic_sentence() {
        assert_eq!(normalize_error_message(""), GENERIC_FAILURE);
        assert_eq!(normalize_error_message("   "), GENERIC_FAILURE);
    }
}
