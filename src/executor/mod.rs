mod capture;
mod coordinator;
mod status;

pub use capture::CaptureBuffer;
pub use coordinator::{
    run_and_translate, ExecutionCoordinator, ExecutionResult, NO_OUTPUT, NO_OUTPUT_DUE_TO_ERROR,
};
pub use status::Status;
