//! This crate implements the core logic of the judge: the data model shared by all three judges,
//! the value normalizer, the output normalizer and diff engine, the verdict engine and the
//! response shaper.
//!
//! Everything in this crate is pure: no file I/O, no network I/O, no sandboxing. Execution of
//! untrusted code is delegated to the `sandbox-client` crate, and per-language driver generation
//! lives in the `harness` crate. This crate only decides what a judge request normalizes to, and
//! what verdict a set of per-case outcomes deserves.
//!

#[macro_use]
extern crate error_chain;

pub mod diff;
pub mod heuristics;
pub mod shaper;
pub mod value;
pub mod verdict;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use diff::DiffLine;
pub use heuristics::FixErrorFailureKind;
pub use value::RuntimeValue;

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
}

/// A language a judge request may be written in. The set is closed: the harness generator and the
/// sandbox client both dispatch on it exhaustively.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Typescript,
}

impl Language {
    /// Parse a language tag from a request body. Returns `None` for any tag outside the closed
    /// set, which the dispatcher turns into a 400 input-shape error.
    pub fn parse(tag: &str) -> Option<Language> {
        match tag {
            "python" => Some(Language::Python),
            "javascript" => Some(Language::Javascript),
            "typescript" => Some(Language::Typescript),
            _ => None,
        }
    }

    /// The identifier this language is known by to the external runner.
    pub fn runner_identifier(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
        }
    }
}

/// Execution mode of a judge request: `Run` gives the caller full transparency, `Submit` redacts
/// hidden test data. See the Response Shaper contract in `shaper`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeMode {
    Run,
    Submit,
}

impl Default for JudgeMode {
    fn default() -> Self {
        JudgeMode::Run
    }
}

/// Resource limits forwarded to the sandbox client for a single judge request.
#[derive(Clone, Copy, Debug)]
pub struct ResourceLimits {
    /// Wall-clock execution limit, in milliseconds.
    pub time_limit_ms: u64,

    /// Memory limit, in megabytes. `None` means the runner's default applies.
    pub memory_limit_mb: Option<u64>,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        ResourceLimits {
            time_limit_ms: 5000,
            memory_limit_mb: None,
        }
    }
}

/// A single test case as received from a caller, before normalization. Both the functional and
/// predict-output judges share this shape: named parameter values plus an expected return value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TestCase {
    /// Identifier, unique within the request.
    pub id: String,

    /// Named parameter values, raw (pre-normalization).
    #[serde(default)]
    pub inputs: BTreeMap<String, serde_json::Value>,

    /// Expected return value (functional: compared by structural equality; predict-output:
    /// compared as normalized text).
    #[serde(default)]
    pub expected_output: serde_json::Value,

    /// Whether this case's inputs/outputs may be echoed back to the caller in submit mode.
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

/// A `TestCase` with all raw values coerced to `RuntimeValue`s. Normalization is pure and
/// idempotent (see `value::normalize`).
#[derive(Clone, Debug)]
pub struct NormalizedCase {
    pub id: String,
    pub inputs: BTreeMap<String, RuntimeValue>,
    pub expected_output: RuntimeValue,
    pub is_visible: bool,
}

impl NormalizedCase {
    /// Normalize a raw `TestCase`. This function never fails; a case whose `inputs` map is
    /// missing a declared parameter is detected separately by the caller (see
    /// `NormalizedCase::missing_parameter`), since that is a dispatcher-level concern, not a
    /// normalizer concern.
    pub fn from_raw(raw: &TestCase) -> NormalizedCase {
        let inputs = raw
            .inputs
            .iter()
            .map(|(name, v)| (name.clone(), value::normalize(v)))
            .collect();
        NormalizedCase {
            id: raw.id.clone(),
            inputs,
            expected_output: value::normalize(&raw.expected_output),
            is_visible: raw.is_visible,
        }
    }

    /// Returns the first declared parameter name absent from this case's `inputs` map, if any.
    pub fn missing_parameter<'a>(&self, parameter_names: &'a [String]) -> Option<&'a str> {
        parameter_names
            .iter()
            .find(|name| !self.inputs.contains_key(name.as_str()))
            .map(|name| name.as_str())
    }
}

/// Result of running a single test case through a judge.
#[derive(Clone, Debug, Serialize)]
pub struct PerCaseResult {
    pub id: String,
    pub pass: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<RuntimeValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<RuntimeValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip)]
    pub is_visible: bool,
}

impl PerCaseResult {
    /// Create a passing result.
    pub fn passed(
        id: impl Into<String>,
        actual: RuntimeValue,
        expected: RuntimeValue,
        runtime_ms: u64,
        is_visible: bool,
    ) -> Self {
        PerCaseResult {
            id: id.into(),
            pass: true,
            actual_output: Some(actual),
            expected_output: Some(expected),
            runtime_ms: Some(runtime_ms),
            error: None,
            is_visible,
        }
    }

    /// Create a failing result with an actual/expected pair (wrong answer shape).
    pub fn failed(
        id: impl Into<String>,
        actual: RuntimeValue,
        expected: RuntimeValue,
        runtime_ms: u64,
        is_visible: bool,
    ) -> Self {
        PerCaseResult {
            id: id.into(),
            pass: false,
            actual_output: Some(actual),
            expected_output: Some(expected),
            runtime_ms: Some(runtime_ms),
            error: None,
            is_visible,
        }
    }

    /// Create a failing result whose cause is an error string rather than a value mismatch.
    pub fn errored(id: impl Into<String>, error: impl Into<String>, is_visible: bool) -> Self {
        PerCaseResult {
            id: id.into(),
            pass: false,
            actual_output: None,
            expected_output: None,
            runtime_ms: None,
            error: Some(error.into()),
            is_visible,
        }
    }
}

/// Final verdict classification. Ordering here doubles as judge engine priority: variants earlier
/// in this list are never downgraded by a later check (see `verdict::derive`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    RuntimeError,
    TimeLimitExceeded,
    CompilationError,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// The full response returned by a functional or predict-output judge invocation.
#[derive(Clone, Debug, Serialize)]
pub struct JudgeResponse {
    pub verdict: Verdict,
    pub passed_count: usize,
    pub total_count: usize,
    pub test_results: Vec<PerCaseResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub total_runtime_ms: u64,
}

impl JudgeResponse {
    /// Build a response from per-case results, deriving verdict and counts. `upstream` carries the
    /// sandbox-level signals (compile error, timeout, ...) that take priority over per-case
    /// outcomes; see `verdict::derive`.
    pub fn from_results(
        results: Vec<PerCaseResult>,
        upstream: verdict::UpstreamSignal,
        total_runtime_ms: u64,
    ) -> JudgeResponse {
        let passed_count = results.iter().filter(|r| r.pass).count();
        let total_count = results.len();
        let verdict = verdict::derive(upstream, &results);
        JudgeResponse {
            verdict,
            passed_count,
            total_count,
            test_results: results,
            error: None,
            total_runtime_ms,
        }
    }

    /// Build a response representing a dispatcher-level failure with zero cases, e.g. "missing
    /// required parameter" or "upstream runner unavailable".
    pub fn failure(verdict: Verdict, error: impl Into<String>) -> JudgeResponse {
        JudgeResponse {
            verdict,
            passed_count: 0,
            total_count: 0,
            test_results: Vec::new(),
            error: Some(error.into()),
            total_runtime_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parse_closed_set() {
        assert_eq!(Some(Language::Python), Language::parse("python"));
        assert_eq!(Some(Language::Javascript), Language::parse("javascript"));
        assert_eq!(Some(Language::Typescript), Language::parse("typescript"));
        assert_eq!(None, Language::parse("ruby"));
    }

    #[test]
    fn missing_parameter_detected() {
        let mut raw = TestCase {
            id: "1".into(),
            ..Default::default()
        };
        raw.inputs.insert("a".into(), serde_json::json!("2"));
        let normalized = NormalizedCase::from_raw(&raw);
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(Some("b"), normalized.missing_parameter(&names));
    }

    #[test]
    fn judge_response_invariants() {
        let results = vec![
            PerCaseResult::passed("1", RuntimeValue::Int(5), RuntimeValue::Int(5), 1, true),
            PerCaseResult::failed("2", RuntimeValue::Int(4), RuntimeValue::Int(5), 1, true),
        ];
        let resp = JudgeResponse::from_results(results, verdict::UpstreamSignal::None, 2);
        assert_eq!(resp.passed_count, 1);
        assert_eq!(resp.total_count, 2);
        assert_eq!(resp.verdict, Verdict::WrongAnswer);
    }
}
