use serde::{Deserialize, Serialize};

/// One physical line of a submission, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub line_number: usize,
    pub text: String,
}

/// Classifier output for a single source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRecord {
    pub line_number: usize,
    pub text: String,
    pub explanation: String,
}
