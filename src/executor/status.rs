use serde::Serialize;
use std::fmt;

/// Advisory phase of the execution coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    NotReady,
    Ready,
    Unavailable,
    Preparing,
    Running,
    Finished,
    FinishedWithErrors,
    Failed,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::NotReady => "Loading Python runtime...",
            Status::Ready => "Python runtime ready.",
            Status::Unavailable => "Python runtime not available.",
            Status::Preparing => "Preparing sandbox...",
            Status::Running => "Running code in sandbox...",
            Status::Finished => "Execution finished.",
            Status::FinishedWithErrors => "Execution finished with errors.",
            Status::Failed => "Execution failed.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
