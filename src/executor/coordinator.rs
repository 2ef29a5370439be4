use super::capture::CaptureBuffer;
use super::status::Status;
use crate::errors::{ErrorCategory, FailureInfo};
use crate::interpreter::{ExecutionError, InputProvider, Interpreter, RunHooks};
use serde::Serialize;
use std::sync::mpsc::Sender;
use tracing::{info, warn};

pub const NO_OUTPUT: &str = "(no output)";
pub const NO_OUTPUT_DUE_TO_ERROR: &str = "(no output due to error)";

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub captured_output: String,
    pub failure: Option<FailureInfo>,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run `source` once and turn whatever happens into an [`ExecutionResult`].
///
/// A fresh capture buffer is created for this run and dropped with it, so no
/// output leaks between runs.
pub fn run_and_translate<I>(
    source: &str,
    interpreter: &mut I,
    input: &mut dyn InputProvider,
) -> ExecutionResult
where
    I: Interpreter + ?Sized,
{
    let mut buffer = CaptureBuffer::new();
    let outcome = interpreter.execute(
        source,
        RunHooks {
            output: &mut buffer,
            input,
        },
    );

    match outcome {
        Ok(()) => {
            let text = buffer.into_trimmed();
            ExecutionResult {
                captured_output: if text.is_empty() {
                    NO_OUTPUT.to_string()
                } else {
                    text
                },
                failure: None,
            }
        }
        Err(ExecutionError::Program(raw)) => {
            let text = buffer.into_trimmed();
            ExecutionResult {
                captured_output: if text.is_empty() {
                    NO_OUTPUT_DUE_TO_ERROR.to_string()
                } else {
                    text
                },
                failure: Some(FailureInfo::from_program_error(&raw)),
            }
        }
        Err(ExecutionError::Infrastructure(raw)) => {
            warn!("interpreter failure: {}", raw);
            ExecutionResult {
                captured_output: String::new(),
                failure: Some(FailureInfo::unexpected(&raw)),
            }
        }
    }
}

/// Owns the interpreter and walks it through boot and runs.
///
/// Runs take `&mut self`, so a caller cannot start a second run while one is
/// in flight.
pub struct ExecutionCoordinator<I> {
    interpreter: I,
    status: Status,
    boot_error: Option<String>,
    listener: Option<Sender<Status>>,
}

impl<I: Interpreter> ExecutionCoordinator<I> {
    pub fn new(interpreter: I) -> Self {
        Self {
            interpreter,
            status: Status::NotReady,
            boot_error: None,
            listener: None,
        }
    }

    /// Publish every status change on `tx`.
    pub fn with_status_listener(mut self, tx: Sender<Status>) -> Self {
        self.listener = Some(tx);
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        !matches!(self.status, Status::NotReady | Status::Unavailable)
    }

    pub fn boot_error(&self) -> Option<&str> {
        self.boot_error.as_deref()
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        info!(?status, "{}", status.message());
        if let Some(tx) = &self.listener {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(status);
        }
    }

    /// Boot the interpreter. Returns whether it is usable.
    pub fn initialize(&mut self) -> bool {
        match self.interpreter.initialize() {
            Ok(()) => {
                self.boot_error = None;
                self.set_status(Status::Ready);
                true
            }
            Err(e) => {
                warn!("interpreter failed to boot: {}", e);
                self.boot_error = Some(e.to_string());
                self.set_status(Status::Unavailable);
                false
            }
        }
    }

    /// Execute one submission. Boots the interpreter first if needed.
    pub fn run(&mut self, source: &str, input: &mut dyn InputProvider) -> ExecutionResult {
        if self.status == Status::NotReady && !self.initialize() {
            return self.unavailable();
        }
        if self.status == Status::Unavailable {
            return self.unavailable();
        }

        self.set_status(Status::Preparing);
        self.set_status(Status::Running);
        let result = run_and_translate(source, &mut self.interpreter, input);

        let status = match &result.failure {
            None => Status::Finished,
            Some(f) if f.category == ErrorCategory::Unexpected => Status::Failed,
            Some(_) => Status::FinishedWithErrors,
        };
        self.set_status(status);
        result
    }

    fn unavailable(&mut self) -> ExecutionResult {
        let raw = self
            .boot_error
            .clone()
            .unwrap_or_else(|| Status::Unavailable.message().to_string());
        self.set_status(Status::Unavailable);
        ExecutionResult {
            captured_output: String::new(),
            failure: Some(FailureInfo::unexpected(&raw)),
        }
    }
}
