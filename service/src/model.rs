//! Wire types for the inbound judge API (§6). Request shapes mirror the JSON the spec describes;
//! response shapes extend `judge_core::JudgeResponse` with the fix-error judge's extra fields.
//!

use judge_core::{DiffLine, JudgeMode, PerCaseResult, TestCase, Verdict};
use serde::{Deserialize, Serialize};

/// Functional judge request: run a named function against positional, typed test cases.
#[derive(Debug, Deserialize)]
pub struct FunctionalRequest {
    pub code: String,
    pub language: String,
    pub function_name: String,
    pub parameter_names: Vec<String>,
    pub test_cases: Vec<TestCase>,
    pub mode: Option<JudgeMode>,
    pub time_limit_ms: Option<u64>,
    pub memory_limit_mb: Option<u64>,
}

/// Predict-output judge request: identical wire shape to the functional judge (§6) — the same
/// named-function invocation, batched into a single runner call — compared as normalized text
/// rather than by structural equality.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub code: String,
    pub language: String,
    pub function_name: String,
    pub parameter_names: Vec<String>,
    pub test_cases: Vec<TestCase>,
    pub mode: Option<JudgeMode>,
    pub time_limit_ms: Option<u64>,
    pub memory_limit_mb: Option<u64>,
}

/// The three ways a fix-error submission is checked.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationType {
    OutputComparison,
    TestCases,
    CustomFunction,
}

/// A single fix-error test case: `input` is source text appended to the learner's program before
/// execution (an invocation snippet), not stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct FixErrorCase {
    pub input: String,
    pub expected_output: String,
    pub is_hidden: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FixErrorRequest {
    pub code: String,
    pub language: String,
    pub validation_type: ValidationType,
    pub expected_output: Option<String>,
    pub test_cases: Option<Vec<FixErrorCase>>,
    pub custom_validator: Option<String>,
    pub mode: Option<JudgeMode>,
    pub time_limit_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FixErrorStatus {
    Pass,
    Fail,
}

/// Response envelope for the fix-error judge: the common `JudgeResponse` fields plus the
/// fix-error-specific ones from §6.
#[derive(Debug, Serialize)]
pub struct FixErrorResponse {
    pub verdict: Verdict,
    pub passed_count: usize,
    pub total_count: usize,
    pub test_results: Vec<PerCaseResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub total_runtime_ms: u64,
    pub status: FixErrorStatus,

    #[serde(rename = "failureType", skip_serializing_if = "Option::is_none")]
    pub failure_type: Option<judge_core::FixErrorFailureKind>,

    #[serde(rename = "summaryMessage")]
    pub summary_message: String,

    pub stdout: String,
    pub stderr: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<DiffLine>>,
}
