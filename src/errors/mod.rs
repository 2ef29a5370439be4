mod category;
mod failure;
mod hints;
mod translator;

pub use category::ErrorCategory;
pub use failure::{FailureInfo, UNEXPECTED_FAILURE};
pub use hints::hints_for;
pub use translator::{line_number_hint, translate, Translation};
