use thiserror::Error;

/// Errors that can occur during rule matching.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rule's stored pattern is not a valid regular expression.
    #[error("invalid pattern in rule '{rule}': {source}")]
    InvalidPattern {
        /// Name of the offending rule.
        rule: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_rule() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = RuleError::InvalidPattern {
            rule: "Broken Rule".into(),
            source,
        };
        assert!(err.to_string().contains("Broken Rule"));
    }
}
