//! This module implements the fix-error judge's stderr-based failure taxonomy (§4.5): since the
//! external runner does not report a separate compile step for interpreted languages, a syntax
//! error must be told apart from a runtime error by pattern-matching stderr.
//!
//! The pattern table is closed and authoritative for the languages this judge currently supports.
//! Any new language should default to `RuntimeError` unless proven syntactic (see the design notes
//! open question in SPEC_FULL.md §12).
//!

use crate::Language;
use serde::Serialize;

/// One of the five failure kinds the fix-error judge distinguishes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixErrorFailureKind {
    CompileError,
    RuntimeError,
    Timeout,
    WrongAnswer,
    ValidatorError,
}

/// Patterns in stderr that indicate a syntactic (compile-time) failure rather than a semantic
/// (runtime) one, per language.
fn syntactic_patterns(language: Language) -> &'static [&'static str] {
    match language {
        Language::Python => &["SyntaxError", "IndentationError"],
        Language::Javascript => &["SyntaxError"],
        Language::Typescript => &["error TS"],
    }
}

/// Returns whether `stderr` matches this language's syntactic-failure patterns.
pub fn is_syntactic_stderr(language: Language, stderr: &str) -> bool {
    syntactic_patterns(language).iter().any(|pattern| stderr.contains(pattern))
}

/// Classify a sandbox outcome for the fix-error judge into `CompileError`, `Timeout`,
/// `RuntimeError`, or `None` if the program ran to completion and the caller must go on to
/// compare output. `WrongAnswer` and `ValidatorError` are not produced here: they depend on
/// output/validator comparison the caller performs afterwards.
pub fn classify_execution_failure(
    language: Language,
    timed_out: bool,
    exit_code: i32,
    stderr: &str,
) -> Option<FixErrorFailureKind> {
    if timed_out {
        return Some(FixErrorFailureKind::Timeout);
    }
    if exit_code != 0 && !stderr.is_empty() {
        return Some(if is_syntactic_stderr(language, stderr) {
            FixErrorFailureKind::CompileError
        } else {
            FixErrorFailureKind::RuntimeError
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_syntax_error_detected() {
        assert!(is_syntactic_stderr(Language::Python, "  File \"x.py\"\nSyntaxError: invalid syntax"));
        assert!(is_syntactic_stderr(Language::Python, "IndentationError: unexpected indent"));
        assert!(!is_syntactic_stderr(Language::Python, "ZeroDivisionError: division by zero"));
    }

    #[test]
    fn typescript_compile_error_detected() {
        assert!(is_syntactic_stderr(Language::Typescript, "x.ts(1,5): error TS1005: ';' expected."));
        assert!(!is_syntactic_stderr(Language::Typescript, "TypeError: Cannot read properties of undefined"));
    }

    #[test]
    fn classify_prioritizes_timeout() {
        assert_eq!(
            Some(FixErrorFailureKind::Timeout),
            classify_execution_failure(Language::Python, true, 1, "SyntaxError: bad")
        );
    }

    #[test]
    fn classify_no_failure_when_clean_exit() {
        assert_eq!(None, classify_execution_failure(Language::Python, false, 0, ""));
    }

    #[test]
    fn classify_runtime_vs_compile() {
        assert_eq!(
            Some(FixErrorFailureKind::RuntimeError),
            classify_execution_failure(Language::Python, false, 1, "ZeroDivisionError: division by zero")
        );
        assert_eq!(
            Some(FixErrorFailureKind::CompileError),
            classify_execution_failure(Language::Python, false, 1, "SyntaxError: invalid syntax")
        );
    }
}
