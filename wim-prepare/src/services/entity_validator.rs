//! Namespaced entity identifier validation
//!
//! Storywrangler accepts identifiers of the form `namespace:value`. Two
//! namespaces get structural checks:
//! - `wikidata:Q<digits>`
//! - `local:<collection>:<key>`
//!
//! Any other namespace only needs a non-empty value.

/// Identifier validation collaborator
pub trait IdentifierValidator: Send + Sync {
    /// Whether `identifier` is acceptable to the ingestion API
    fn validate(&self, identifier: &str) -> bool;
}

/// Default validator for `namespace:value` identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespacedIdValidator;

impl NamespacedIdValidator {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierValidator for NamespacedIdValidator {
    fn validate(&self, identifier: &str) -> bool {
        if identifier
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return false;
        }

        let Some((namespace, value)) = identifier.split_once(':') else {
            return false;
        };

        if !is_namespace(namespace) || value.is_empty() {
            return false;
        }

        match namespace {
            "wikidata" => is_qid(value),
            "local" => match value.split_once(':') {
                Some((collection, key)) => is_namespace(collection) && !key.is_empty(),
                None => false,
            },
            _ => true,
        }
    }
}

/// Lowercase ASCII letters, digits and hyphens, non-empty
fn is_namespace(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// `Q` followed by one or more digits
fn is_qid(s: &str) -> bool {
    match s.strip_prefix('Q') {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_wikidata_ids() {
        let v = NamespacedIdValidator::new();
        assert!(v.validate("wikidata:Q7259"));
        assert!(v.validate("wikidata:Q1"));
    }

    #[test]
    fn test_rejects_malformed_wikidata_ids() {
        let v = NamespacedIdValidator::new();
        assert!(!v.validate("wikidata:"));
        assert!(!v.validate("wikidata:Q"));
        assert!(!v.validate("wikidata:P31"));
        assert!(!v.validate("wikidata:q7259"));
        assert!(!v.validate("wikidata:Q72a"));
    }

    #[test]
    fn test_accepts_local_ids() {
        let v = NamespacedIdValidator::new();
        assert!(v.validate("local:women-in-math:rachel_adams"));
        assert!(v.validate("local:women-in-math:émilie_du_châtelet"));
        assert!(v.validate("local:women-in-math:o'brien-smith"));
    }

    #[test]
    fn test_rejects_malformed_local_ids() {
        let v = NamespacedIdValidator::new();
        assert!(!v.validate("local:women-in-math:"));
        assert!(!v.validate("local:rachel_adams"));
        assert!(!v.validate("local:Women In Math:x"));
        assert!(!v.validate("local:women-in-math:rachel adams"));
    }

    #[test]
    fn test_rejects_missing_namespace() {
        let v = NamespacedIdValidator::new();
        assert!(!v.validate("Q7259"));
        assert!(!v.validate(":Q7259"));
        assert!(!v.validate(""));
        assert!(!v.validate("Wikidata:Q7259"));
    }

    #[test]
    fn test_other_namespaces_need_value() {
        let v = NamespacedIdValidator::new();
        assert!(v.validate("orcid:0000-0002-1825-0097"));
        assert!(!v.validate("orcid:"));
        assert!(!v.validate("line\nbreak:x"));
    }
}
