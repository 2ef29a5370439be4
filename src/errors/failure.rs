use super::category::ErrorCategory;
use super::hints::hints_for;
use super::translator::{line_number_hint, translate};
use serde::Serialize;

pub const UNEXPECTED_FAILURE: &str = "Unexpected failure while running code.";

/// Everything the learner sees about a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureInfo {
    pub raw_message: String,
    pub category: ErrorCategory,
    pub friendly_message: String,
    pub line_number: Option<usize>,
    pub hints: Vec<String>,
}

impl FailureInfo {
    /// Failure raised by the submitted program itself.
    pub fn from_program_error(raw: &str) -> Self {
        match translate(raw) {
            Some(t) => Self {
                raw_message: raw.to_string(),
                hints: hints_for(&t.friendly_message),
                category: t.category,
                friendly_message: t.friendly_message,
                line_number: t.line_number,
            },
            // An exception with an empty description still counts as a failure.
            None => Self {
                raw_message: String::new(),
                category: ErrorCategory::GenericRuntime,
                friendly_message: format!("{}: (no details)", ErrorCategory::GenericRuntime.label()),
                line_number: None,
                hints: Vec::new(),
            },
        }
    }

    /// Failure to drive the interpreter at all.
    pub fn unexpected(raw: &str) -> Self {
        Self {
            raw_message: raw.to_string(),
            category: ErrorCategory::Unexpected,
            friendly_message: UNEXPECTED_FAILURE.to_string(),
            line_number: line_number_hint(raw),
            hints: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_error_carries_hints() {
        let info = FailureInfo::from_program_error(
            "  File \"<string>\", line 1\n    if x\n        ^\nSyntaxError: expected ':'",
        );
        assert_eq!(info.category, ErrorCategory::Syntax);
        assert_eq!(info.line_number, Some(1));
        assert_eq!(info.hints.len(), 2);
    }

    #[test]
    fn unexpected_has_no_hints() {
        let info = FailureInfo::unexpected("bootstrap crashed on line 7");
        assert_eq!(info.category, ErrorCategory::Unexpected);
        assert_eq!(info.friendly_message, UNEXPECTED_FAILURE);
        assert_eq!(info.line_number, Some(7));
        assert!(info.hints.is_empty());
    }
}
