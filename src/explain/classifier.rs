use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(from|import)\s+\w+").unwrap());
static DEF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^def\s+\w+\s*\(").unwrap());
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^class\s+\w+").unwrap());
static FOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^for\s+").unwrap());
static WHILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^while\s+").unwrap());
static IF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^if\s+").unwrap());
static ELIF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^elif\s+").unwrap());
static ELSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^else\s*:").unwrap());
static TRY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^try\s*:").unwrap());
static EXCEPT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^except\b").unwrap());
static FINALLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^finally\s*:").unwrap());
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\brange\s*\(").unwrap());
static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\binput\s*\(").unwrap());
static LEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\blen\s*\(").unwrap());
static PRINT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^print\s*\(").unwrap());
static GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.+\]|\{.+\}|\(.+\)").unwrap());
static INDEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+\s*\[[^\]]*\]").unwrap());
static FOR_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bfor\b").unwrap());
static LOOP_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(for|while)\b").unwrap());
static ARITH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+\-*/%]").unwrap());
static COMPARE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"==|!=|<=|>=|<|>").unwrap());
static BOOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(and|or|not)\b").unwrap());
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+\.\w+\s*\(").unwrap());
static CALL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+\s*\(.*\)").unwrap());
static RETURN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\breturn\b").unwrap());
static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());

/// Every outcome the line classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    Blank,
    Comment,
    Import,
    FunctionDef,
    ClassDef,
    ForLoop,
    WhileLoop,
    If,
    Elif,
    Else,
    Try,
    Except,
    Finally,
    Sequence,
    Input,
    Length,
    Print,
    ListLiteral,
    DictLiteral,
    TupleLiteral,
    Collection,
    Indexing,
    Arithmetic,
    Comparison,
    BooleanLogic,
    Pass,
    Break,
    Continue,
    MethodCall,
    FunctionCall,
    Return,
    ReturnInLoop,
    Assignment,
    VariableReference,
    Statement,
}

impl LineKind {
    pub fn explanation(self) -> &'static str {
        match self {
            LineKind::Blank => {
                "Blank line: used to separate logical sections and make the code easier to read."
            }
            LineKind::Comment => {
                "Comment: a human-readable note ignored by Python. Comments explain why something is done, helping future readers."
            }
            LineKind::Import => {
                "Import statement: brings in a module or specific functions so you can use pre-built tools and utilities."
            }
            LineKind::FunctionDef => {
                "Function definition: declares a named block of reusable logic. Call the function later to perform that task."
            }
            LineKind::ClassDef => {
                "Class definition: creates a blueprint for objects that bundle data (attributes) and behavior (methods)."
            }
            LineKind::ForLoop => {
                "For-loop: repeats the indented block for each item in a sequence (list, range, etc.), useful for iteration."
            }
            LineKind::WhileLoop => {
                "While-loop: repeats as long as a condition stays true; be careful to ensure the condition becomes false eventually."
            }
            LineKind::If => {
                "If statement: checks a condition and runs the following block when the condition is true (decision-making)."
            }
            LineKind::Elif => {
                "Elif (else-if): an additional condition checked if previous if/elif branches were false."
            }
            LineKind::Else => {
                "Else: fallback branch that runs when none of the preceding conditions evaluated to true."
            }
            LineKind::Try => {
                "Try block: runs the indented code while watching for errors, so they can be handled instead of crashing the program."
            }
            LineKind::Except => {
                "Except block: runs only when the try block raised a matching error, letting you recover gracefully."
            }
            LineKind::Finally => {
                "Finally block: always runs after try/except, whether or not an error happened. Good for clean-up work."
            }
            LineKind::Sequence => {
                "Range: produces a sequence of numbers, most often used to control how many times a loop runs."
            }
            LineKind::Input => {
                "Input: pauses the program and waits for the user to type something. The answer always arrives as text (a string)."
            }
            LineKind::Length => {
                "Length: len() counts the items in a list, the characters in a string, or the keys in a dictionary."
            }
            LineKind::Print => {
                "Print: displays text or values in the console. Useful for results and simple debugging."
            }
            LineKind::ListLiteral => {
                "List: an ordered collection of values written inside square brackets. Lists can grow, shrink and change."
            }
            LineKind::DictLiteral => {
                "Dictionary: a collection of key-value pairs written inside curly braces, used to look values up by name."
            }
            LineKind::TupleLiteral => {
                "Tuple: an ordered group of values written inside parentheses. Unlike a list, a tuple cannot be changed."
            }
            LineKind::Collection => {
                "Collection or mapping: this appears to create or access lists/dicts/tuples used to store multiple values."
            }
            LineKind::Indexing => {
                "Indexing: picks out one item from a list, string or dictionary using its position or key in square brackets."
            }
            LineKind::Arithmetic => {
                "Arithmetic: calculates a new value using math operators such as +, -, *, / or %."
            }
            LineKind::Comparison => {
                "Comparison: checks how two values relate (equal, not equal, bigger, smaller) and produces True or False."
            }
            LineKind::BooleanLogic => {
                "Boolean logic: combines or flips True/False values with and, or and not."
            }
            LineKind::Pass => {
                "Pass: a placeholder that does nothing. Python needs something in a block, so pass fills the gap."
            }
            LineKind::Break => "Break: stops the nearest loop immediately and continues after it.",
            LineKind::Continue => {
                "Continue: skips the rest of this loop round and jumps to the next iteration."
            }
            LineKind::MethodCall => {
                "Method call: asks an object to perform one of its own actions (for example list.append or text.upper)."
            }
            LineKind::FunctionCall => {
                "Function call: executes a function (built-in, library, or user-defined) and may return a value."
            }
            LineKind::Return => {
                "Return: exits a function and optionally provides a value back to the caller."
            }
            LineKind::ReturnInLoop => {
                "Return: exits a function and provides a value back to the caller. The value is built by looping over items on this same line."
            }
            LineKind::Assignment => {
                "Assignment: stores a value into a variable so you can reuse it later in the program."
            }
            LineKind::VariableReference => {
                "Variable reference: uses the value currently stored under this name."
            }
            LineKind::Statement => {
                "Python statement: performs an operation (expression, access, or call) that contributes to the program's behavior."
            }
        }
    }
}

/// One entry of the ordered rule chain.
struct Rule {
    kind: LineKind,
    matches: fn(&str) -> bool,
}

fn is_blank(t: &str) -> bool {
    t.is_empty()
}

fn is_comment(t: &str) -> bool {
    t.starts_with('#')
}

fn is_whole_literal(t: &str, open: char, close: char) -> bool {
    t.len() >= 2 && t.starts_with(open) && t.ends_with(close)
}

fn is_collection(t: &str) -> bool {
    GROUP_RE.is_match(t) && t.contains(':')
}

fn is_indexing(t: &str) -> bool {
    INDEX_RE.is_match(t) && !FOR_WORD_RE.is_match(t)
}

fn is_arithmetic(t: &str) -> bool {
    ARITH_RE.is_match(t) && !t.starts_with("print")
}

fn is_return_in_loop(t: &str) -> bool {
    RETURN_RE.is_match(t) && LOOP_WORD_RE.is_match(t)
}

fn is_assignment(t: &str) -> bool {
    t.contains('=') && !t.contains("==")
}

/// First match wins, so the order of this table is the contract.
static RULES: &[Rule] = &[
    Rule { kind: LineKind::Blank, matches: is_blank },
    Rule { kind: LineKind::Comment, matches: is_comment },
    Rule { kind: LineKind::Import, matches: |t| IMPORT_RE.is_match(t) },
    Rule { kind: LineKind::FunctionDef, matches: |t| DEF_RE.is_match(t) },
    Rule { kind: LineKind::ClassDef, matches: |t| CLASS_RE.is_match(t) },
    Rule { kind: LineKind::ForLoop, matches: |t| FOR_RE.is_match(t) },
    Rule { kind: LineKind::WhileLoop, matches: |t| WHILE_RE.is_match(t) },
    Rule { kind: LineKind::If, matches: |t| IF_RE.is_match(t) },
    Rule { kind: LineKind::Elif, matches: |t| ELIF_RE.is_match(t) },
    Rule { kind: LineKind::Else, matches: |t| ELSE_RE.is_match(t) },
    Rule { kind: LineKind::Except, matches: |t| EXCEPT_RE.is_match(t) },
    Rule { kind: LineKind::Try, matches: |t| TRY_RE.is_match(t) },
    Rule { kind: LineKind::Finally, matches: |t| FINALLY_RE.is_match(t) },
    Rule { kind: LineKind::Sequence, matches: |t| RANGE_RE.is_match(t) },
    Rule { kind: LineKind::Input, matches: |t| INPUT_RE.is_match(t) },
    Rule { kind: LineKind::Length, matches: |t| LEN_RE.is_match(t) },
    Rule { kind: LineKind::Print, matches: |t| PRINT_RE.is_match(t) },
    Rule { kind: LineKind::ListLiteral, matches: |t| is_whole_literal(t, '[', ']') },
    Rule { kind: LineKind::DictLiteral, matches: |t| is_whole_literal(t, '{', '}') },
    Rule { kind: LineKind::TupleLiteral, matches: |t| is_whole_literal(t, '(', ')') },
    Rule { kind: LineKind::Collection, matches: is_collection },
    Rule { kind: LineKind::Indexing, matches: is_indexing },
    Rule { kind: LineKind::Arithmetic, matches: is_arithmetic },
    Rule { kind: LineKind::Comparison, matches: |t| COMPARE_RE.is_match(t) },
    Rule { kind: LineKind::BooleanLogic, matches: |t| BOOL_RE.is_match(t) },
    Rule { kind: LineKind::Pass, matches: |t| t == "pass" },
    Rule { kind: LineKind::Break, matches: |t| t == "break" },
    Rule { kind: LineKind::Continue, matches: |t| t == "continue" },
    Rule { kind: LineKind::MethodCall, matches: |t| METHOD_RE.is_match(t) },
    Rule { kind: LineKind::FunctionCall, matches: |t| CALL_RE.is_match(t) },
    Rule { kind: LineKind::ReturnInLoop, matches: is_return_in_loop },
    Rule { kind: LineKind::Return, matches: |t| RETURN_RE.is_match(t) },
    Rule { kind: LineKind::Assignment, matches: is_assignment },
    Rule { kind: LineKind::VariableReference, matches: |t| IDENT_RE.is_match(t) },
];

/// Classify one line of source. Only the trimmed text is inspected.
pub fn classify(line: &str) -> LineKind {
    let t = line.trim();
    RULES
        .iter()
        .find(|rule| (rule.matches)(t))
        .map(|rule| rule.kind)
        .unwrap_or(LineKind::Statement)
}

/// Explanation text for one line of source.
pub fn classify_line(line: &str) -> &'static str {
    classify(line).explanation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_whitespace_lines() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("\t"), LineKind::Blank);
    }

    #[test]
    fn structural_keywords() {
        assert_eq!(classify("# note"), LineKind::Comment);
        assert_eq!(classify("import math"), LineKind::Import);
        assert_eq!(classify("from os import path"), LineKind::Import);
        assert_eq!(classify("def greet(name):"), LineKind::FunctionDef);
        assert_eq!(classify("class Dog:"), LineKind::ClassDef);
        assert_eq!(classify("class Dog(Animal):"), LineKind::ClassDef);
        assert_eq!(classify("while n > 0:"), LineKind::WhileLoop);
        assert_eq!(classify("if x > 3:"), LineKind::If);
        assert_eq!(classify("elif x < 0:"), LineKind::Elif);
        assert_eq!(classify("else:"), LineKind::Else);
    }

    #[test]
    fn exception_handling_keywords() {
        assert_eq!(classify("try:"), LineKind::Try);
        assert_eq!(classify("except ValueError:"), LineKind::Except);
        assert_eq!(classify("except:"), LineKind::Except);
        assert_eq!(classify("finally:"), LineKind::Finally);
    }

    #[test]
    fn for_loop_wins_over_range_call() {
        assert_eq!(classify("for i in range(3):"), LineKind::ForLoop);
        assert_eq!(classify("numbers = list(range(10))"), LineKind::Sequence);
    }

    #[test]
    fn builtin_calls() {
        assert_eq!(classify("name = input('Name? ')"), LineKind::Input);
        assert_eq!(classify("n = len(items)"), LineKind::Length);
        assert_eq!(classify("print(i)"), LineKind::Print);
        assert_eq!(classify("print (a + b)"), LineKind::Print);
    }

    #[test]
    fn literals_precede_generic_collection() {
        assert_eq!(classify("[1, 2, 3]"), LineKind::ListLiteral);
        assert_eq!(classify("{'a': 1}"), LineKind::DictLiteral);
        assert_eq!(classify("(1, 2)"), LineKind::TupleLiteral);
        assert_eq!(classify("ages = {'bob': 3}"), LineKind::Collection);
    }

    #[test]
    fn indexing_outside_comprehension() {
        assert_eq!(classify("first = items[0]"), LineKind::Indexing);
        assert_eq!(
            classify("heads = [n[0] for n in pairs]"),
            LineKind::Assignment
        );
    }

    #[test]
    fn assignment_excludes_equality() {
        assert_eq!(classify("x = 5"), LineKind::Assignment);
        assert_eq!(classify("x == 5"), LineKind::Comparison);
        assert_ne!(classify_line("x == 5"), LineKind::Assignment.explanation());
    }

    #[test]
    fn operators_precede_assignment() {
        assert_eq!(classify("total = a + b"), LineKind::Arithmetic);
        assert_eq!(classify("count += 1"), LineKind::Arithmetic);
        assert_eq!(classify("ok = a and b"), LineKind::BooleanLogic);
        assert_eq!(classify("x = [1, 2]"), LineKind::Assignment);
    }

    #[test]
    fn string_literals_keep_operator_false_positives() {
        assert_eq!(classify("label = 'a+b'"), LineKind::Arithmetic);
    }

    #[test]
    fn control_flow_words() {
        assert_eq!(classify("pass"), LineKind::Pass);
        assert_eq!(classify("  break  "), LineKind::Break);
        assert_eq!(classify("continue"), LineKind::Continue);
    }

    #[test]
    fn calls_and_returns() {
        assert_eq!(classify("items.append(4)"), LineKind::MethodCall);
        assert_eq!(classify("greet('Ann')"), LineKind::FunctionCall);
        assert_eq!(classify("return result"), LineKind::Return);
        assert_eq!(classify("return"), LineKind::Return);
        assert_eq!(classify("return [x for x in xs]"), LineKind::ReturnInLoop);
    }

    #[test]
    fn identifiers_and_fallback() {
        assert_eq!(classify("result"), LineKind::VariableReference);
        assert_eq!(classify("@decorator"), LineKind::Statement);
        assert_eq!(classify("raise"), LineKind::VariableReference);
        assert_eq!(classify("del things"), LineKind::Statement);
    }

    #[test]
    fn explanations_are_never_empty_and_stable() {
        for line in ["", "x", "x = 1", "???", "for", "lambda: 0", "  # hi"] {
            let first = classify_line(line);
            assert!(!first.is_empty());
            assert_eq!(first, classify_line(line));
        }
    }
}
