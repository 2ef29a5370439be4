use pyexplain::errors::{hints_for, translate, ErrorCategory};
use pyexplain::explain::{classify, classify_line, explain_source, LineKind};
use pyexplain::interpreter::{
    ExecutionError, Interpreter, InterpreterError, RunHooks, ScriptedInput,
};
use pyexplain::run_and_translate;

/// In-memory interpreter: prints every `print(...)` argument verbatim and
/// fails with whatever traceback it was given.
struct EchoInterpreter {
    traceback: Option<String>,
}

impl Interpreter for EchoInterpreter {
    fn initialize(&mut self) -> Result<(), InterpreterError> {
        Ok(())
    }

    fn execute(&mut self, source: &str, mut hooks: RunHooks<'_>) -> Result<(), ExecutionError> {
        for line in source.lines() {
            let t = line.trim();
            if let Some(inner) = t.strip_prefix("print(").and_then(|s| s.strip_suffix(')')) {
                hooks.output.write_chunk(&format!("{}\n", inner.trim_matches('\'')));
            } else if t.contains("input(") {
                let answer = hooks.input.read_input(None);
                hooks.output.write_chunk(&format!("{}\n", answer));
            }
        }
        match &self.traceback {
            Some(t) => Err(ExecutionError::Program(t.clone())),
            None => Ok(()),
        }
    }
}

fn echo() -> EchoInterpreter {
    EchoInterpreter { traceback: None }
}

#[cfg(test)]
mod classifier_tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify_line(""), classify_line("   "));
        assert_eq!(classify(""), LineKind::Blank);
    }

    #[test]
    fn test_comment_and_assignment() {
        assert_eq!(classify_line("# note"), LineKind::Comment.explanation());
        assert_eq!(classify_line("x = 5"), LineKind::Assignment.explanation());
    }

    #[test]
    fn test_equality_is_not_assignment() {
        assert_ne!(classify_line("x == 5"), LineKind::Assignment.explanation());
        assert_eq!(classify_line("x == 5"), LineKind::Comparison.explanation());
    }

    #[test]
    fn test_for_loop_beats_range() {
        assert_eq!(classify("for i in range(3):"), LineKind::ForLoop);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let samples = [
            "def add(a, b):",
            "    return a + b",
            "print(add(1, 2))",
            "data = {'k': [1, 2]}",
            "while True:",
            "    break",
        ];
        for line in samples {
            assert_eq!(classify_line(line), classify_line(line));
            assert!(!classify_line(line).is_empty());
        }
    }

    #[test]
    fn test_default_example_explanations() {
        let records = explain_source("# Example:\nfor i in range(3):\n    print(i)\n");
        let kinds: Vec<LineKind> = records.iter().map(|r| classify(&r.text)).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Comment,
                LineKind::ForLoop,
                LineKind::Print,
                LineKind::Blank
            ]
        );
    }

    #[test]
    fn test_record_count_matches_split() {
        for source in ["", "a=1", "a=1\nb=2\n", "\n\n", "x\r\ny"] {
            let records = explain_source(source);
            assert_eq!(records.len(), source.split('\n').count());
            for (i, r) in records.iter().enumerate() {
                assert_eq!(r.line_number, i + 1);
            }
        }
    }
}

#[cfg(test)]
mod translation_tests {
    use super::*;

    #[test]
    fn test_name_error() {
        let t = translate("NameError: name 'foo' is not defined").unwrap();
        assert_eq!(t.category, ErrorCategory::Name);
        assert!(t.friendly_message.contains("'foo'"));
    }

    #[test]
    fn test_line_number_is_appended() {
        let raw = "Traceback (most recent call last):\n  File \"<string>\", line 3, in <module>\nIndexError: list index out of range";
        let t = translate(raw).unwrap();
        assert_eq!(t.category, ErrorCategory::Index);
        assert_eq!(t.line_number, Some(3));
        assert!(t.friendly_message.contains("(Line 3)"));
    }

    #[test]
    fn test_every_marker_maps_to_its_category() {
        let cases = [
            ("SyntaxError: invalid syntax", ErrorCategory::Syntax),
            ("TypeError: can only concatenate str", ErrorCategory::Type),
            ("IndentationError: expected an indented block", ErrorCategory::Indentation),
            ("KeyError: 'x'", ErrorCategory::Key),
            ("ValueError: invalid literal for int()", ErrorCategory::Value),
            ("ZeroDivisionError: division by zero", ErrorCategory::ZeroDivision),
            ("AttributeError: 'int' object has no attribute 'x'", ErrorCategory::Attribute),
            ("FileNotFoundError: [Errno 2] No such file", ErrorCategory::FileNotFound),
            ("whatever happened", ErrorCategory::GenericRuntime),
        ];
        for (raw, expected) in cases {
            assert_eq!(translate(raw).unwrap().category, expected, "raw: {}", raw);
        }
    }

    #[test]
    fn test_unknown_text_is_kept() {
        let t = translate("whatever happened").unwrap();
        assert!(t.friendly_message.contains("whatever happened"));
    }

    #[test]
    fn test_hints_follow_the_message() {
        let syntax = translate("SyntaxError: invalid syntax").unwrap();
        assert_eq!(hints_for(&syntax.friendly_message).len(), 2);

        let key = translate("KeyError: 'x'").unwrap();
        assert!(hints_for(&key.friendly_message).is_empty());
    }
}

#[cfg(test)]
mod execution_tests {
    use super::*;

    #[test]
    fn test_output_is_captured() {
        let result = run_and_translate(
            "print('a')\nprint('b')\n",
            &mut echo(),
            &mut ScriptedInput::default(),
        );
        assert!(result.is_success());
        assert_eq!(result.captured_output, "a\nb");
    }

    #[test]
    fn test_failure_and_output_are_both_reported() {
        let mut interp = EchoInterpreter {
            traceback: Some(
                "  File \"<string>\", line 2, in <module>\nTypeError: unsupported operand".into(),
            ),
        };
        let result = run_and_translate(
            "print('start')\nx = 'a' + 1\n",
            &mut interp,
            &mut ScriptedInput::default(),
        );
        assert_eq!(result.captured_output, "start");
        let failure = result.failure.expect("failure expected");
        assert_eq!(failure.category, ErrorCategory::Type);
        assert_eq!(failure.line_number, Some(2));
        assert_eq!(failure.hints.len(), 1);
    }

    #[test]
    fn test_scripted_input_is_consumed_in_order() {
        let mut input = ScriptedInput::new(["first", "second"]);
        let result = run_and_translate(
            "a = input()\nb = input()\nc = input()\n",
            &mut echo(),
            &mut input,
        );
        assert_eq!(result.captured_output, "first\nsecond");
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_result_serializes_in_camel_case() {
        let result = run_and_translate("", &mut echo(), &mut ScriptedInput::default());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["capturedOutput"], "(no output)");
        assert!(value["failure"].is_null());
    }
}
