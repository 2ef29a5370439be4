//! Beginner Python playground core.
//!
//! ```text
//! source ──► explain::explain_source ──► per-line explanations
//!        └─► executor::ExecutionCoordinator ──► interpreter ──► errors::FailureInfo
//! ```
//!
//! The two classifiers ([`explain::classify_line`] and [`errors::translate`])
//! are pure ordered pattern chains. Execution goes through the
//! [`interpreter::Interpreter`] trait; [`interpreter::PythonProcess`] drives a
//! local `python3`.

pub mod config;
pub mod errors;
pub mod executor;
pub mod explain;
pub mod interpreter;
pub mod server;

pub use errors::{ErrorCategory, FailureInfo};
pub use executor::{run_and_translate, ExecutionCoordinator, ExecutionResult};
pub use explain::{classify_line, explain_source, ExplanationRecord};
