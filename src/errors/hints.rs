/// Fixed suggestions keyed by the label a friendly message carries.
const HINTS: &[(&str, &[&str])] = &[
    (
        "Syntax error",
        &[
            "Check for missing ':' at the end of control lines (if/for/while/def/class).",
            "Ensure parentheses and quotes are balanced and indents match.",
        ],
    ),
    (
        "Name error",
        &[
            "Check spelling of variable/function names and define them before use.",
            "Make sure you imported the module that provides the name, if needed.",
        ],
    ),
    (
        "Indentation error",
        &["Use 4 spaces per indent level and avoid mixing tabs and spaces."],
    ),
    (
        "Type error",
        &["Print values and their types with type(x) to diagnose incorrect types."],
    ),
    (
        "Index error",
        &["Verify list/string lengths and ensure indices are within range."],
    ),
];

/// Quick-fix suggestions for a friendly message. Each keyword is checked on
/// its own, so one message can collect hints from several groups.
pub fn hints_for(friendly: &str) -> Vec<String> {
    if friendly.is_empty() {
        return Vec::new();
    }
    HINTS
        .iter()
        .filter(|(keyword, _)| friendly.contains(keyword))
        .flat_map(|(_, hints)| hints.iter().map(|h| h.to_string()))
        .collect()
}
