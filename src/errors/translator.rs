use super::category::ErrorCategory;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static SOURCE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"File "<string>", line (\d+)"#).unwrap());
static LOOSE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"line (\d+)").unwrap());
static UNDEFINED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"NameError: name '(.+?)' is not defined").unwrap());

/// Exception markers in priority order. Raw tracebacks can mention several
/// exception names, so the first hit decides.
const MARKERS: &[(&str, ErrorCategory)] = &[
    ("SyntaxError", ErrorCategory::Syntax),
    ("NameError", ErrorCategory::Name),
    ("TypeError", ErrorCategory::Type),
    ("IndexError", ErrorCategory::Index),
    ("IndentationError", ErrorCategory::Indentation),
    ("KeyError", ErrorCategory::Key),
    ("ValueError", ErrorCategory::Value),
    ("ZeroDivisionError", ErrorCategory::ZeroDivision),
    ("AttributeError", ErrorCategory::Attribute),
    ("FileNotFoundError", ErrorCategory::FileNotFound),
];

/// Friendly reading of a raw interpreter failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub category: ErrorCategory,
    pub friendly_message: String,
    pub line_number: Option<usize>,
}

/// Translate raw traceback text. Returns `None` for empty input.
pub fn translate(raw: &str) -> Option<Translation> {
    if raw.is_empty() {
        return None;
    }

    let line_number = SOURCE_LINE_RE
        .captures(raw)
        .and_then(|c| c[1].parse::<usize>().ok());
    let line_info = line_number
        .map(|n| format!(" (Line {})", n))
        .unwrap_or_default();

    let category = MARKERS
        .iter()
        .find(|(marker, _)| raw.contains(marker))
        .map(|(_, category)| *category)
        .unwrap_or(ErrorCategory::GenericRuntime);

    let label = category.label();
    let friendly_message = match category {
        ErrorCategory::Syntax => format!(
            "{label}{line_info}: Python couldn't parse part of your code. Check missing colons, parentheses, or indentation."
        ),
        ErrorCategory::Name => match UNDEFINED_NAME_RE.captures(raw) {
            Some(c) => format!(
                "{label}{line_info}: '{}' is not defined. Did you misspell it or forget to assign it?",
                &c[1]
            ),
            None => format!("{label}{line_info}: a name was used before it was defined."),
        },
        ErrorCategory::Type => format!(
            "{label}{line_info}: an operation received a value of the wrong type (e.g., adding text to a number)."
        ),
        ErrorCategory::Index => format!(
            "{label}{line_info}: tried to access an item outside a list/string range. Check lengths and indices."
        ),
        ErrorCategory::Indentation => format!(
            "{label}{line_info}: Python relies on indentation to group code. Use consistent spaces (recommended)."
        ),
        ErrorCategory::Key => format!(
            "{label}{line_info}: you're trying to access a dictionary key that doesn't exist. Double-check key names."
        ),
        ErrorCategory::Value => format!(
            "{label}{line_info}: a function received a value of the right type but wrong format. Example: converting 'abc' to int."
        ),
        ErrorCategory::ZeroDivision => format!(
            "{label}{line_info}: you're dividing by zero. Adjust your logic or check inputs before dividing."
        ),
        ErrorCategory::Attribute => format!(
            "{label}{line_info}: you're trying to access an attribute or method that doesn't exist on this object."
        ),
        ErrorCategory::FileNotFound => format!(
            "{label}{line_info}: Python couldn't locate the file you're trying to open."
        ),
        ErrorCategory::Unexpected | ErrorCategory::GenericRuntime => {
            format!("{}{line_info}: {raw}", ErrorCategory::GenericRuntime.label())
        }
    };

    debug!(?category, ?line_number, "translated interpreter failure");

    Some(Translation {
        category,
        friendly_message,
        line_number,
    })
}

/// First `line N` anywhere in the text. Used when the failure did not come
/// from the learner's program, so the traceback shape is unknown.
pub fn line_number_hint(raw: &str) -> Option<usize> {
    LOOSE_LINE_RE
        .captures(raw)
        .and_then(|c| c[1].parse::<usize>().ok())
}
