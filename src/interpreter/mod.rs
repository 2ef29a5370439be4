mod input;
mod process;

pub use input::{InputProvider, ScriptedInput, TerminalInput};
pub use process::PythonProcess;

use std::io;
use thiserror::Error;

/// Receives program output one chunk at a time, in emission order.
pub trait OutputSink {
    fn write_chunk(&mut self, chunk: &str);
}

/// Host hooks installed for exactly one run.
pub struct RunHooks<'a> {
    pub output: &'a mut dyn OutputSink,
    pub input: &'a mut dyn InputProvider,
}

/// The interpreter could not be brought up.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("interpreter command is empty")]
    EmptyCommand,

    #[error("could not parse interpreter command line: {0}")]
    InvalidCommand(String),

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("interpreter did not report ready: {0}")]
    NotReady(String),
}

/// Outcome of a run that did not succeed.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The submitted program raised. Carries the raw traceback text.
    #[error("{0}")]
    Program(String),

    /// The interpreter itself could not run the program.
    #[error("interpreter failure: {0}")]
    Infrastructure(String),
}

impl From<io::Error> for ExecutionError {
    fn from(e: io::Error) -> Self {
        ExecutionError::Infrastructure(e.to_string())
    }
}

/// Sandboxed interpreter collaborator.
pub trait Interpreter {
    /// Boot the interpreter. Called once before the first run.
    fn initialize(&mut self) -> Result<(), InterpreterError>;

    /// Run `source` as a whole program. Output and input flow only through
    /// `hooks`, never through the return value.
    fn execute(&mut self, source: &str, hooks: RunHooks<'_>) -> Result<(), ExecutionError>;
}
