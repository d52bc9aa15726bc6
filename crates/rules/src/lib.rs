pub mod error;
pub mod matcher;

pub use error::RuleError;
pub use matcher::{compile_pattern, first_match, MatchOutcome, PatternDiagnostic};
