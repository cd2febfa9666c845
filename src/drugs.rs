//! Drug Selection
//!
//! Parses the free-text drug input into normalized tokens and carries the
//! fixed drug→gene table used for annotation-gap detection. The table is
//! policy data (a versionable lookup), not behavior.

use thiserror::Error;

/// Gene required for a meaningful analysis of each known drug, keyed by the
/// normalized (uppercase) drug token. Pairs follow the CPIC level-A
/// gene-drug guidelines. Drugs outside this table never trigger a
/// required-gene caveat.
pub const DRUG_REQUIRED_GENE: &[(&str, &str)] = &[
    ("CODEINE", "CYP2D6"),
    ("TRAMADOL", "CYP2D6"),
    ("WARFARIN", "CYP2C9"),
    ("PHENYTOIN", "CYP2C9"),
    ("CLOPIDOGREL", "CYP2C19"),
    ("OMEPRAZOLE", "CYP2C19"),
    ("SIMVASTATIN", "SLCO1B1"),
    ("AZATHIOPRINE", "TPMT"),
    ("MERCAPTOPURINE", "TPMT"),
    ("FLUOROURACIL", "DPYD"),
    ("CAPECITABINE", "DPYD"),
];

/// Look up the gene a drug's analysis depends on.
pub fn required_gene(drug: &str) -> Option<&'static str> {
    let drug = drug.trim().to_uppercase();
    DRUG_REQUIRED_GENE
        .iter()
        .find(|(name, _)| *name == drug)
        .map(|(_, gene)| *gene)
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DrugInputError {
    #[error("No drug selected: enter at least one drug name")]
    Empty,

    #[error("Drug names may only contain letters, digits, spaces and hyphens: {0:?}")]
    InvalidToken(String),
}

/// Split the raw drug input on commas into trimmed, uppercased, de-duplicated
/// tokens. A single malformed token rejects the whole input; no partial
/// acceptance.
pub fn parse_drug_tokens(input: &str) -> Result<Vec<String>, DrugInputError> {
    let mut tokens: Vec<String> = Vec::new();

    for raw in input.split(',') {
        let token = raw.trim().to_uppercase();
        if token.is_empty() {
            continue;
        }
        if !token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == ' ')
        {
            return Err(DrugInputError::InvalidToken(token));
        }
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    if tokens.is_empty() {
        return Err(DrugInputError::Empty);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_trimmed_uppercased_and_deduplicated() {
        let tokens = parse_drug_tokens(" codeine, Warfarin ,codeine,, ").unwrap();
        assert_eq!(tokens, vec!["CODEINE", "WARFARIN"]);
    }

    #[test]
    fn hyphens_digits_and_spaces_are_allowed() {
        let tokens = parse_drug_tokens("st-john4 wort").unwrap();
        assert_eq!(tokens, vec!["ST-JOHN4 WORT"]);
    }

    #[test]
    fn one_bad_token_rejects_the_whole_input() {
        let err = parse_drug_tokens("codeine, aspirin!").unwrap_err();
        assert_eq!(err, DrugInputError::InvalidToken("ASPIRIN!".into()));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_drug_tokens(""), Err(DrugInputError::Empty));
        assert_eq!(parse_drug_tokens(" , ,"), Err(DrugInputError::Empty));
    }

    #[test]
    fn required_gene_lookup_covers_known_pairs() {
        assert_eq!(required_gene("WARFARIN"), Some("CYP2C9"));
        assert_eq!(required_gene("codeine"), Some("CYP2D6"));
        assert_eq!(required_gene(" simvastatin "), Some("SLCO1B1"));
        assert_eq!(required_gene("ASPIRIN"), None);
    }
}
