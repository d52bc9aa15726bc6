use regex::Regex;
use tracing::warn;

use hookline_core::{ConfigId, DispatchRule};

use crate::error::RuleError;

/// Compile a rule's stored pattern.
///
/// Used both by the scan below and by callers that want to reject a bad
/// pattern up front (e.g. when a rule is created or edited).
pub fn compile_pattern(rule: &DispatchRule) -> Result<Regex, RuleError> {
    Regex::new(&rule.pattern).map_err(|source| RuleError::InvalidPattern {
        rule: rule.name.clone(),
        source,
    })
}

/// A non-fatal diagnostic for a rule whose pattern failed to compile.
///
/// The offending rule is skipped during the scan; the diagnostic lets the
/// console surface misconfigured rules to the operator.
#[derive(Debug, Clone)]
pub struct PatternDiagnostic {
    pub rule_id: ConfigId,
    pub rule_name: String,
    pub error: String,
}

/// The result of scanning a rule collection for one request URL.
#[derive(Debug)]
pub struct MatchOutcome<'a> {
    /// The first active rule whose pattern matched, if any.
    pub rule: Option<&'a DispatchRule>,
    /// One entry per rule skipped for an invalid pattern.
    pub diagnostics: Vec<PatternDiagnostic>,
}

/// Find the first active rule whose pattern matches the request URL.
///
/// Rules are scanned in collection order; inactive rules are never
/// considered, and later matches are ignored (first-match-wins). A rule with
/// an invalid pattern is skipped after recording a diagnostic rather than
/// aborting the scan.
pub fn first_match<'a>(url: &str, rules: &'a [DispatchRule]) -> MatchOutcome<'a> {
    let mut diagnostics = Vec::new();

    for rule in rules {
        if !rule.meta.is_active {
            continue;
        }
        match compile_pattern(rule) {
            Ok(regex) => {
                if regex.is_match(url) {
                    return MatchOutcome {
                        rule: Some(rule),
                        diagnostics,
                    };
                }
            }
            Err(err) => {
                warn!(
                    rule = %rule.name,
                    pattern = %rule.pattern,
                    error = %err,
                    "skipping rule with invalid pattern"
                );
                diagnostics.push(PatternDiagnostic {
                    rule_id: rule.meta.id.clone(),
                    rule_name: rule.name.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    MatchOutcome {
        rule: None,
        diagnostics,
    }
}
