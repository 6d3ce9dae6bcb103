//! This module implements output normalization and line-level diffing, used by the fix-error
//! judge's `output_comparison` mode and by the predict-output judge.
//!

use serde::Serialize;

/// Normalize raw program output: CRLF becomes LF, and at most one trailing LF is stripped.
/// Everything else is preserved byte-for-byte.
pub fn normalize_output(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n");
    match unified.strip_suffix('\n') {
        Some(stripped) => stripped.to_string(),
        None => unified,
    }
}

/// A single line-aligned diff entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiffLine {
    Match { line: usize, text: String },
    Incorrect { line: usize, expected: String, actual: String },
    Missing { line: usize, expected: String },
    Extra { line: usize, actual: String },
}

/// Compute a line-aligned diff between normalized expected and actual output. No line-reordering
/// heuristics are applied; ordering is stable and follows input order.
pub fn diff_lines(expected: &str, actual: &str) -> Vec<DiffLine> {
    let expected_lines: Vec<&str> = if expected.is_empty() { Vec::new() } else { expected.split('\n').collect() };
    let actual_lines: Vec<&str> = if actual.is_empty() { Vec::new() } else { actual.split('\n').collect() };

    let total = expected_lines.len().max(actual_lines.len());
    let mut out = Vec::with_capacity(total);

    for i in 0..total {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        let entry = match (e, a) {
            (Some(e), Some(a)) if e == a => DiffLine::Match { line: i + 1, text: e.to_string() },
            (Some(e), Some(a)) => DiffLine::Incorrect { line: i + 1, expected: e.to_string(), actual: a.to_string() },
            (Some(e), None) => DiffLine::Missing { line: i + 1, expected: e.to_string() },
            (None, Some(a)) => DiffLine::Extra { line: i + 1, actual: a.to_string() },
            (None, None) => unreachable!("index bounded by max of both lengths"),
        };
        out.push(entry);
    }

    out
}
