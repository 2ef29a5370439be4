use super::classifier::classify_line;
use super::types::{ExplanationRecord, SourceLine};
use tracing::debug;

/// Split a submission into physical lines, keeping empty ones.
///
/// A trailing line break yields a trailing empty line, and a `\r` left over
/// from CRLF endings is dropped from each line's text.
pub fn source_lines(source: &str) -> Vec<SourceLine> {
    source
        .split('\n')
        .enumerate()
        .map(|(i, text)| SourceLine {
            line_number: i + 1,
            text: text.strip_suffix('\r').unwrap_or(text).to_string(),
        })
        .collect()
}

/// Explain every line of `source`, in document order.
pub fn explain_source(source: &str) -> Vec<ExplanationRecord> {
    let records: Vec<ExplanationRecord> = source_lines(source)
        .into_iter()
        .map(|line| ExplanationRecord {
            explanation: classify_line(&line.text).to_string(),
            line_number: line.line_number,
            text: line.text,
        })
        .collect();

    debug!(lines = records.len(), "explained submission");
    records
}
