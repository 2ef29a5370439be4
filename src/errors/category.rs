use serde::Serialize;

/// Closed set of failure categories shown to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    Syntax,
    Name,
    Type,
    Index,
    Indentation,
    Key,
    Value,
    ZeroDivision,
    Attribute,
    FileNotFound,
    Unexpected,
    GenericRuntime,
}

impl ErrorCategory {
    /// Label that opens every friendly message of this category.
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Syntax => "Syntax error",
            ErrorCategory::Name => "Name error",
            ErrorCategory::Type => "Type error",
            ErrorCategory::Index => "Index error",
            ErrorCategory::Indentation => "Indentation error",
            ErrorCategory::Key => "Key error",
            ErrorCategory::Value => "Value error",
            ErrorCategory::ZeroDivision => "Zero division error",
            ErrorCategory::Attribute => "Attribute error",
            ErrorCategory::FileNotFound => "File not found",
            ErrorCategory::Unexpected => "Unexpected failure",
            ErrorCategory::GenericRuntime => "Runtime error",
        }
    }
}
