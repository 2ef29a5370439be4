mod analysis;
mod classifier;
mod types;

pub use analysis::{explain_source, source_lines};
pub use classifier::{classify, classify_line, LineKind};
pub use types::{ExplanationRecord, SourceLine};
