//! This module implements the response shaper: mode-aware redaction of a `JudgeResponse` so that
//! hidden test data is never reconstructable from a submit-mode response (§4.6).
//!

use crate::{JudgeMode, JudgeResponse, PerCaseResult};

/// Error class names that are safe to surface verbatim in a submit-mode visible case. Any other
/// error string collapses to the generic "Runtime Error" label.
const KNOWN_ERROR_CLASSES: [&str; 10] = [
    "TypeError",
    "ValueError",
    "IndexError",
    "KeyError",
    "ZeroDivisionError",
    "AttributeError",
    "NameError",
    "SyntaxError",
    "ReferenceError",
    "RangeError",
];

const GENERIC_RUNTIME_ERROR: &str = "Runtime Error";

/// Shape a `JudgeResponse` for the given mode. Run mode is a no-op: full transparency, detailed
/// error strings preserved. Submit mode redacts hidden cases and reduces error strings to their
/// class prefix (or a generic label).
pub fn shape(mode: JudgeMode, mut response: JudgeResponse) -> JudgeResponse {
    if mode == JudgeMode::Run {
        return response;
    }

    shape_results(&mut response.test_results);

    if !response.verdict.is_accepted() {
        response.error = None;
    }

    response
}

/// Redact hidden-case detail and collapse error strings in place. Shared by `shape` above and by
/// the fix-error judge, whose response type lives outside this crate and so cannot be passed
/// through `shape` directly.
pub fn shape_results(results: &mut [PerCaseResult]) {
    for case in results.iter_mut() {
        shape_case(case);
    }
}

fn shape_case(case: &mut PerCaseResult) {
    if case.is_visible {
        if let Some(err) = case.error.take() {
            case.error = Some(classify_error_string(&err));
        }
    } else {
        case.actual_output = None;
        case.expected_output = None;
        if case.error.is_some() {
            case.error = Some(GENERIC_RUNTIME_ERROR.to_string());
        }
    }
}

/// Reduce an error string of the form `"ClassName: message"` (as produced by the harness driver)
/// to just its class name, unless that class is unknown, in which case it collapses to the
/// generic label.
fn classify_error_string(error: &str) -> String {
    let class = error.split(':').next().unwrap_or("").trim();
    if KNOWN_ERROR_CLASSES.contains(&class) {
        class.to_string()
    } else {
        GENERIC_RUNTIME_ERROR.to_string()
    }
}
