//! The ordered email defect pipeline.

use std::sync::LazyLock;

use ahash::AHashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classify::domains::{DOMAIN_TYPOS, POPULAR_DOMAINS, PROVIDER_NAMES, TLD_TYPOS};
use crate::classify::levenshtein::levenshtein_within;

/// Overall address shape: a non-empty local part, an `@`, and a domain
/// containing a dot. Deliberately loose: whitespace and extra `@` signs
/// still pass, so the later, more specific checks get to claim them.
static SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^@]+@.+\..+$").unwrap());

/// A domain whose TLD is a dot followed by at least two letters.
static TLD_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[a-z]{2,}$").unwrap());

/// Maximum edit distance at which a domain is considered a near miss of a
/// popular provider domain.
const SIMILARITY_CUTOFF: usize = 2;

/// Terminal classification status of an email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    /// No defect detected.
    Valid,
    /// A defect with a mechanical correction.
    Fixable,
    /// A defect with no mechanical correction.
    Invalid,
}

/// The defect taxonomy. Every non-valid classification carries exactly one
/// kind; the pipeline reports the first defect it finds, never several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Empty,
    MissingAt,
    InvalidFormat,
    ContainsSpaces,
    MultipleAt,
    ContainsWww,
    DomainTypo,
    InvalidTld,
    TldTypo,
    DomainSimilarity,
}

impl ErrorKind {
    /// Stable snake_case code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Empty => "empty",
            ErrorKind::MissingAt => "missing_at",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::ContainsSpaces => "contains_spaces",
            ErrorKind::MultipleAt => "multiple_at",
            ErrorKind::ContainsWww => "contains_www",
            ErrorKind::DomainTypo => "domain_typo",
            ErrorKind::InvalidTld => "invalid_tld",
            ErrorKind::TldTypo => "tld_typo",
            ErrorKind::DomainSimilarity => "domain_similarity",
        }
    }

    /// Fixed human-readable label for reporting collaborators.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Empty => "Empty email",
            ErrorKind::MissingAt => "Missing @ sign",
            ErrorKind::InvalidFormat => "Invalid email format",
            ErrorKind::ContainsSpaces => "Contains spaces",
            ErrorKind::MultipleAt => "Multiple @ signs",
            ErrorKind::ContainsWww => "Contains www.",
            ErrorKind::DomainTypo => "Misspelled domain",
            ErrorKind::InvalidTld => "Missing or invalid domain ending",
            ErrorKind::TldTypo => "Misspelled domain ending",
            ErrorKind::DomainSimilarity => "Domain resembles a popular provider",
        }
    }
}

/// The outcome of running one address through the defect pipeline.
///
/// A suggestion is present exactly when the status is [`EmailStatus::Fixable`];
/// the constructors make any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Terminal status.
    pub status: EmailStatus,
    /// The detected defect, absent for valid addresses.
    pub error: Option<ErrorKind>,
    /// Mechanically corrected address, present for fixable defects.
    pub suggestion: Option<String>,
}

impl Classification {
    fn valid() -> Self {
        Classification {
            status: EmailStatus::Valid,
            error: None,
            suggestion: None,
        }
    }

    fn invalid(kind: ErrorKind) -> Self {
        Classification {
            status: EmailStatus::Invalid,
            error: Some(kind),
            suggestion: None,
        }
    }

    fn fixable(kind: ErrorKind, suggestion: String) -> Self {
        Classification {
            status: EmailStatus::Fixable,
            error: Some(kind),
            suggestion: Some(suggestion),
        }
    }

    /// Check if a mechanical correction exists.
    pub fn is_fixable(&self) -> bool {
        self.status == EmailStatus::Fixable
    }
}

/// Runs addresses through the ordered defect pipeline.
///
/// Checks run in a fixed order and the first hit wins: an address with both
/// interior whitespace and a misspelled domain reports only the whitespace.
/// The dictionaries are immutable process-wide tables; the classifier holds
/// references so alternates can be swapped in for tests.
#[derive(Debug, Clone)]
pub struct EmailClassifier {
    domain_typos: &'static AHashMap<&'static str, &'static str>,
    tld_typos: &'static [(&'static str, &'static str)],
    popular_domains: &'static [&'static str],
    providers: &'static [&'static str],
}

impl EmailClassifier {
    /// Create a classifier over the built-in provider dictionaries.
    pub fn new() -> Self {
        EmailClassifier {
            domain_typos: &DOMAIN_TYPOS,
            tld_typos: TLD_TYPOS,
            popular_domains: POPULAR_DOMAINS,
            providers: PROVIDER_NAMES,
        }
    }

    /// Classify one raw email value.
    ///
    /// The value is trimmed and lower-cased before any check runs.
    pub fn classify(&self, raw_email: &str) -> Classification {
        let email = raw_email.trim().to_lowercase();

        if email.is_empty() {
            return Classification::invalid(ErrorKind::Empty);
        }

        if !email.contains('@') {
            return self.classify_missing_at(&email);
        }

        if !SHAPE.is_match(&email) {
            return Classification::invalid(ErrorKind::InvalidFormat);
        }

        if email.chars().any(char::is_whitespace) {
            let stripped: String = email.chars().filter(|c| !c.is_whitespace()).collect();
            return Classification::fixable(ErrorKind::ContainsSpaces, stripped);
        }

        if email.matches('@').count() > 1 {
            // Keep the text before the first sign as the local part and
            // splice the rest back together without the extra signs.
            let Some((local, rest)) = email.split_once('@') else {
                return Classification::invalid(ErrorKind::InvalidFormat);
            };
            let domain: String = rest.chars().filter(|&c| c != '@').collect();
            return Classification::fixable(ErrorKind::MultipleAt, format!("{local}@{domain}"));
        }

        if email.contains("www.") {
            return Classification::fixable(ErrorKind::ContainsWww, email.replace("www.", ""));
        }

        // Exactly one `@` from here on.
        let Some((local, domain)) = email.split_once('@') else {
            return Classification::invalid(ErrorKind::InvalidFormat);
        };

        if let Some(&canonical) = self.domain_typos.get(domain) {
            if canonical == domain {
                // A recognized provider domain that merely resembles a typo.
                return Classification::valid();
            }
            return Classification::fixable(ErrorKind::DomainTypo, format!("{local}@{canonical}"));
        }

        if !TLD_SHAPE.is_match(domain) {
            // Unreachable while the shape check requires a dotted domain;
            // kept so a dotless domain still gets a correction if the check
            // order ever changes.
            if !domain.contains('.') {
                return Classification::fixable(ErrorKind::InvalidTld, format!("{email}.com"));
            }
            return Classification::invalid(ErrorKind::InvalidTld);
        }

        for &(typo, canonical) in self.tld_typos {
            if let Some(stem) = domain.strip_suffix(typo) {
                return Classification::fixable(
                    ErrorKind::TldTypo,
                    format!("{local}@{stem}{canonical}"),
                );
            }
        }

        if let Some((candidate, distance)) = self.closest_popular_domain(domain)
            && distance > 0
        {
            return Classification::fixable(
                ErrorKind::DomainSimilarity,
                format!("{local}@{candidate}"),
            );
        }

        Classification::valid()
    }

    /// Reclassify a manually edited address.
    ///
    /// Manual edits only re-run the cheap structural checks (empty,
    /// missing `@`, overall shape); the dictionary and similarity checks are
    /// reserved for full validation passes.
    pub fn classify_edited(&self, raw_email: &str) -> Classification {
        let email = raw_email.trim().to_lowercase();

        if email.is_empty() {
            return Classification::invalid(ErrorKind::Empty);
        }

        if !email.contains('@') {
            return self.classify_missing_at(&email);
        }

        if !SHAPE.is_match(&email) {
            return Classification::invalid(ErrorKind::InvalidFormat);
        }

        Classification::valid()
    }

    /// Reconstruct an address that has no `@` sign.
    ///
    /// When a known provider name appears in the text, everything before it
    /// becomes the local part and the provider substring (completed with
    /// `.com` when no dot follows it) becomes the domain. Otherwise the
    /// first dot-separated token is tried as the local part.
    fn classify_missing_at(&self, email: &str) -> Classification {
        for &provider in self.providers {
            if let Some(index) = email.find(provider) {
                let local = email[..index].trim();
                let domain = &email[index..];
                let after_provider = &domain[provider.len()..];

                let suggestion = if after_provider.contains('.') {
                    format!("{local}@{domain}")
                } else {
                    format!("{local}@{domain}.com")
                };
                return Classification::fixable(ErrorKind::MissingAt, suggestion);
            }
        }

        if let Some((local, domain)) = email.split_once('.')
            && !local.is_empty()
            && !domain.is_empty()
        {
            return Classification::fixable(
                ErrorKind::MissingAt,
                format!("{}@{}", local.trim(), domain.trim()),
            );
        }

        Classification::invalid(ErrorKind::MissingAt)
    }

    /// Find the popular domain nearest to `domain` within the similarity
    /// cutoff. Ties keep the earliest candidate.
    fn closest_popular_domain(&self, domain: &str) -> Option<(&'static str, usize)> {
        let mut best: Option<(&'static str, usize)> = None;

        for &candidate in self.popular_domains {
            if let Some(distance) = levenshtein_within(domain, candidate, SIMILARITY_CUTOFF)
                && best.is_none_or(|(_, d)| distance < d)
            {
                best = Some((candidate, distance));
            }
        }

        best
    }
}

impl Default for EmailClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(email: &str) -> Classification {
        EmailClassifier::new().classify(email)
    }

    fn assert_fixable(c: &Classification, kind: ErrorKind, suggestion: &str) {
        assert_eq!(c.status, EmailStatus::Fixable);
        assert_eq!(c.error, Some(kind));
        assert_eq!(c.suggestion.as_deref(), Some(suggestion));
    }

    #[test]
    fn test_valid_address() {
        let c = classify("john.doe@example.com");
        assert_eq!(c.status, EmailStatus::Valid);
        assert_eq!(c.error, None);
        assert_eq!(c.suggestion, None);
    }

    #[test]
    fn test_empty_email() {
        for raw in ["", "   ", "\t"] {
            let c = classify(raw);
            assert_eq!(c.status, EmailStatus::Invalid);
            assert_eq!(c.error, Some(ErrorKind::Empty));
            assert_eq!(c.suggestion, None);
        }
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let c = classify("  John.Doe@Example.COM  ");
        assert_eq!(c.status, EmailStatus::Valid);
    }

    #[test]
    fn test_missing_at_with_provider() {
        let c = classify("bob gmail.com");
        assert_fixable(&c, ErrorKind::MissingAt, "bob@gmail.com");
    }

    #[test]
    fn test_missing_at_provider_without_dot() {
        let c = classify("bobgmail");
        assert_fixable(&c, ErrorKind::MissingAt, "bob@gmail.com");
    }

    #[test]
    fn test_missing_at_without_provider_splits_on_dot() {
        let c = classify("bob.example.com");
        assert_fixable(&c, ErrorKind::MissingAt, "bob@example.com");
    }

    #[test]
    fn test_missing_at_unfixable() {
        let c = classify("bobexample");
        assert_eq!(c.status, EmailStatus::Invalid);
        assert_eq!(c.error, Some(ErrorKind::MissingAt));
        assert_eq!(c.suggestion, None);
    }

    #[test]
    fn test_invalid_format() {
        for raw in ["a@bc", "@example.com", "a@b", "john@com"] {
            let c = classify(raw);
            assert_eq!(c.status, EmailStatus::Invalid, "raw: {raw}");
            assert_eq!(c.error, Some(ErrorKind::InvalidFormat), "raw: {raw}");
        }
    }

    #[test]
    fn test_contains_spaces() {
        let c = classify("john doe@example.com");
        assert_fixable(&c, ErrorKind::ContainsSpaces, "johndoe@example.com");
    }

    #[test]
    fn test_spaces_win_over_multiple_at() {
        // First-match-wins: the pipeline never reports a second defect.
        let c = classify("a @b@c.com");
        assert_eq!(c.error, Some(ErrorKind::ContainsSpaces));
        assert_eq!(c.suggestion.as_deref(), Some("a@b@c.com"));
    }

    #[test]
    fn test_multiple_at() {
        let c = classify("a@b@c.com");
        assert_fixable(&c, ErrorKind::MultipleAt, "a@bc.com");
    }

    #[test]
    fn test_contains_www() {
        let c = classify("www.john@example.com");
        assert_fixable(&c, ErrorKind::ContainsWww, "john@example.com");

        let c = classify("john@www.example.com");
        assert_fixable(&c, ErrorKind::ContainsWww, "john@example.com");
    }

    #[test]
    fn test_domain_typo() {
        let c = classify("john.doe@gmail.con");
        assert_fixable(&c, ErrorKind::DomainTypo, "john.doe@gmail.com");
    }

    #[test]
    fn test_domain_typo_wins_over_tld_typo() {
        // gmail.con is an exact dictionary hit, so the suffix table never
        // sees it.
        let c = classify("x@gmail.con");
        assert_eq!(c.error, Some(ErrorKind::DomainTypo));
    }

    #[test]
    fn test_identity_lookalike_is_valid() {
        // yahoo.ca is distance 2 from yahoo.com; the identity entry protects
        // it from the similarity fallback.
        let c = classify("jane@yahoo.ca");
        assert_eq!(c.status, EmailStatus::Valid);
        assert_eq!(c.suggestion, None);
    }

    #[test]
    fn test_invalid_tld_without_suggestion() {
        let c = classify("john@example.c");
        assert_eq!(c.status, EmailStatus::Invalid);
        assert_eq!(c.error, Some(ErrorKind::InvalidTld));
        assert_eq!(c.suggestion, None);
    }

    #[test]
    fn test_tld_typo_suffix() {
        let c = classify("jane@example.cmo");
        assert_fixable(&c, ErrorKind::TldTypo, "jane@example.com");

        let c = classify("jane@example.ogr");
        assert_fixable(&c, ErrorKind::TldTypo, "jane@example.org");
    }

    #[test]
    fn test_domain_similarity() {
        let c = classify("jane@yah00.com");
        assert_fixable(&c, ErrorKind::DomainSimilarity, "jane@yahoo.com");
    }

    #[test]
    fn test_far_domain_is_valid() {
        let c = classify("jane@university.edu");
        assert_eq!(c.status, EmailStatus::Valid);
    }

    #[test]
    fn test_exact_popular_domain_is_valid() {
        let c = classify("jane@gmail.com");
        assert_eq!(c.status, EmailStatus::Valid);
    }

    #[test]
    fn test_similarity_tie_breaks_on_declaration_order() {
        let classifier = EmailClassifier::new();
        // aol.com is the unique nearest candidate here.
        let (candidate, distance) = classifier.closest_popular_domain("aoll.com").unwrap();
        assert_eq!(candidate, "aol.com");
        assert_eq!(distance, 1);
    }

    #[test]
    fn test_edited_reduced_pipeline() {
        let classifier = EmailClassifier::new();

        let c = classifier.classify_edited("");
        assert_eq!(c.error, Some(ErrorKind::Empty));

        let c = classifier.classify_edited("bob gmail.com");
        assert_fixable(&c, ErrorKind::MissingAt, "bob@gmail.com");

        let c = classifier.classify_edited("a@bc");
        assert_eq!(c.error, Some(ErrorKind::InvalidFormat));

        // The reduced pipeline skips the dictionary checks entirely, so a
        // misspelled domain sails through.
        let c = classifier.classify_edited("john@gmail.con");
        assert_eq!(c.status, EmailStatus::Valid);
    }

    #[test]
    fn test_fixable_always_carries_suggestion() {
        let samples = [
            "",
            "bob gmail.com",
            "a @b@c.com",
            "a@b@c.com",
            "www.a@b.com",
            "x@gmail.con",
            "x@example.cmo",
            "x@yah00.com",
            "x@example.c",
            "plainstring",
        ];
        for raw in samples {
            let c = classify(raw);
            assert_eq!(
                c.status == EmailStatus::Fixable,
                c.suggestion.is_some(),
                "invariant broken for: {raw}"
            );
        }
    }
}
