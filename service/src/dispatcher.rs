//! The Dispatcher (§4.7): request validation, mode selection, judge selection, and wiring the
//! Harness Generator, Sandbox Client, Verdict Engine and Response Shaper together into the three
//! judge operations the service exposes.
//!
//! Control flow matches §2: Dispatcher → Normalizer → Harness Generator → Sandbox Client →
//! result parse → Verdict Engine → Response Shaper → HTTP response. The functional and
//! predict-output judges share this full pipeline; fix-error skips the Harness Generator and
//! branches three ways on `validation_type` instead (see `SPEC_FULL.md` §12).
//!

use std::time::Instant;

use harness::HarnessSpec;
use judge_core::verdict::UpstreamSignal;
use judge_core::{
    diff, heuristics, value, FixErrorFailureKind, JudgeMode, JudgeResponse, Language,
    NormalizedCase, PerCaseResult, RuntimeValue, Verdict,
};
use sandbox_client::ExecuteOutcome;
use serde::Deserialize;

use crate::error::ApiError;
use crate::model::{FixErrorCase, FixErrorRequest, FixErrorResponse, FixErrorStatus, FunctionalRequest, PredictRequest, ValidationType};
use crate::state::AppState;

const GENERIC_UNAVAILABLE: &str = "Code execution service unavailable";
const GENERIC_PARSE_FAILURE: &str = "Failed to parse execution results";

fn parse_language(tag: &str) -> Result<Language, ApiError> {
    Language::parse(tag).ok_or_else(|| ApiError::BadRequest(format!("unsupported language '{tag}'")))
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::BadRequest(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

fn classify_single(outcome: &ExecuteOutcome) -> UpstreamSignal {
    if outcome.compile_stderr.is_some() {
        UpstreamSignal::CompileError
    } else if outcome.timed_out {
        UpstreamSignal::Timeout
    } else if outcome.exit_code != 0 && !outcome.stderr.is_empty() && outcome.stdout.is_empty() {
        UpstreamSignal::RuntimeErrorNoOutput
    } else {
        UpstreamSignal::None
    }
}

/// Truncate an upstream-reported message to the same 200-char bound the harness driver applies
/// to its own captured exceptions, so submit-mode responses never grow unbounded error text.
fn truncate_error(message: &str) -> String {
    message.chars().take(200).collect()
}

fn unavailable_response<'a>(cases: impl Iterator<Item = (&'a str, bool)>) -> JudgeResponse {
    let results: Vec<PerCaseResult> = cases
        .map(|(id, visible)| PerCaseResult::errored(id, GENERIC_UNAVAILABLE, visible))
        .collect();
    JudgeResponse {
        verdict: Verdict::RuntimeError,
        passed_count: 0,
        total_count: results.len(),
        test_results: results,
        error: Some(GENERIC_UNAVAILABLE.to_string()),
        total_runtime_ms: 0,
    }
}

fn all_errored<'a>(cases: impl Iterator<Item = (&'a str, bool)>, message: &str, verdict: Verdict) -> JudgeResponse {
    let results: Vec<PerCaseResult> = cases
        .map(|(id, visible)| PerCaseResult::errored(id, message, visible))
        .collect();
    JudgeResponse {
        verdict,
        passed_count: 0,
        total_count: results.len(),
        test_results: results,
        error: Some(message.to_string()),
        total_runtime_ms: 0,
    }
}

fn select_active_normalized(cases: Vec<NormalizedCase>, mode: JudgeMode) -> Vec<NormalizedCase> {
    if mode == JudgeMode::Run {
        cases.into_iter().filter(|c| c.is_visible).collect()
    } else {
        cases
    }
}

/// One record of the JSON array the generated driver prints to stdout (§4.3).
#[derive(Deserialize)]
struct DriverRecord {
    id: String,
    pass: bool,
    actual: serde_json::Value,
    expected: serde_json::Value,
    runtime_ms: u64,
    error: Option<String>,
}

/// Stringify a raw JSON value the way it would read as printed text: a JSON string passes through
/// unquoted, everything else renders as its JSON text. Used to compare the driver's typed
/// `actual`/`expected` fields as plain output text for the predict-output judge.
fn json_as_text(raw: &serde_json::Value) -> String {
    match raw {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse the driver's per-case records, trusting its own typed comparator's `pass` verdict.
/// Used by the functional judge.
fn parse_driver_records(stdout: &str, active: &[NormalizedCase]) -> Option<Vec<PerCaseResult>> {
    let records: Vec<DriverRecord> = serde_json::from_str(stdout).ok()?;
    let visible_by_id = |id: &str| active.iter().find(|c| c.id == id).map(|c| c.is_visible).unwrap_or(true);

    Some(
        records
            .into_iter()
            .map(|record| {
                let is_visible = visible_by_id(&record.id);
                if let Some(error) = record.error {
                    PerCaseResult::errored(record.id, error, is_visible)
                } else {
                    let actual = value::normalize(&record.actual);
                    let expected = value::normalize(&record.expected);
                    if record.pass {
                        PerCaseResult::passed(record.id, actual, expected, record.runtime_ms, is_visible)
                    } else {
                        PerCaseResult::failed(record.id, actual, expected, record.runtime_ms, is_visible)
                    }
                }
            })
            .collect(),
    )
}

/// Parse the driver's per-case records, ignoring its typed comparator and instead re-deriving
/// `pass` from normalized text equality between the stringified `actual`/`expected` fields. Used
/// by the predict-output judge, whose comparator is textual rather than structural.
fn parse_driver_records_as_text(stdout: &str, active: &[NormalizedCase]) -> Option<Vec<PerCaseResult>> {
    let records: Vec<DriverRecord> = serde_json::from_str(stdout).ok()?;
    let visible_by_id = |id: &str| active.iter().find(|c| c.id == id).map(|c| c.is_visible).unwrap_or(true);

    Some(
        records
            .into_iter()
            .map(|record| {
                let is_visible = visible_by_id(&record.id);
                if let Some(error) = record.error {
                    PerCaseResult::errored(record.id, error, is_visible)
                } else {
                    let actual = diff::normalize_output(&json_as_text(&record.actual));
                    let expected = diff::normalize_output(&json_as_text(&record.expected));
                    if actual == expected {
                        PerCaseResult::passed(record.id, RuntimeValue::Str(actual), RuntimeValue::Str(expected), record.runtime_ms, is_visible)
                    } else {
                        PerCaseResult::failed(record.id, RuntimeValue::Str(actual), RuntimeValue::Str(expected), record.runtime_ms, is_visible)
                    }
                }
            })
            .collect(),
    )
}

/// Shared outer shape for the functional and predict-output judges: classify the sandbox-level
/// signal first, falling back to `parse` (the two judges differ only in how a driver record's
/// `pass` is derived).
fn build_response_from_driver_output(
    active: &[NormalizedCase],
    outcome: &ExecuteOutcome,
    parse: impl Fn(&str, &[NormalizedCase]) -> Option<Vec<PerCaseResult>>,
) -> JudgeResponse {
    match classify_single(outcome) {
        UpstreamSignal::CompileError => all_errored(
            active.iter().map(|c| (c.id.as_str(), c.is_visible)),
            &truncate_error(outcome.compile_stderr.as_deref().unwrap_or("Compilation failed")),
            Verdict::CompilationError,
        ),
        UpstreamSignal::Timeout => all_errored(
            active.iter().map(|c| (c.id.as_str(), c.is_visible)),
            "Time limit exceeded",
            Verdict::TimeLimitExceeded,
        ),
        UpstreamSignal::RuntimeErrorNoOutput => all_errored(
            active.iter().map(|c| (c.id.as_str(), c.is_visible)),
            &truncate_error(&outcome.stderr),
            Verdict::RuntimeError,
        ),
        _ => match parse(&outcome.stdout, active) {
            Some(results) => {
                let total_runtime_ms = results.iter().filter_map(|r| r.runtime_ms).sum();
                JudgeResponse::from_results(results, UpstreamSignal::None, total_runtime_ms)
            }
            None => all_errored(
                active.iter().map(|c| (c.id.as_str(), c.is_visible)),
                GENERIC_PARSE_FAILURE,
                Verdict::RuntimeError,
            ),
        },
    }
}

/// Run the functional judge: generate a driver, execute it once against every active case, parse
/// and shape the result.
pub async fn functional(state: &AppState, req: FunctionalRequest) -> Result<JudgeResponse, ApiError> {
    require_non_empty(&req.code, "code")?;
    let language = parse_language(&req.language)?;
    require_non_empty(&req.function_name, "function_name")?;
    if req.test_cases.is_empty() {
        return Err(ApiError::BadRequest("test_cases must not be empty".to_string()));
    }

    let mode = req.mode.unwrap_or_default();
    let limits = state.config.clamp_limits(req.time_limit_ms, req.memory_limit_mb);

    let normalized: Vec<NormalizedCase> = req.test_cases.iter().map(NormalizedCase::from_raw).collect();
    if let Some(missing) = normalized.iter().find_map(|c| c.missing_parameter(&req.parameter_names)) {
        return Ok(JudgeResponse::failure(
            Verdict::RuntimeError,
            format!("Invalid input format: missing parameter '{missing}'"),
        ));
    }

    let active = select_active_normalized(normalized, mode);

    let source = harness::generate(
        language,
        &HarnessSpec {
            source: req.code,
            function_name: req.function_name,
            parameter_names: req.parameter_names,
            cases: active.clone(),
        },
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let outcome = match state.sandbox.execute(language, None, &source, None, limits).await {
        Ok(outcome) => outcome,
        Err(_) => return Ok(unavailable_response(active.iter().map(|c| (c.id.as_str(), c.is_visible)))),
    };

    Ok(judge_core::shaper::shape(
        mode,
        build_response_from_driver_output(&active, &outcome, parse_driver_records),
    ))
}

/// Run the predict-output judge: the identical batched harness path as the functional judge
/// (§5/§6), distinguished only by its comparator — `pass` is re-derived from normalized stdout
/// text rather than trusting the driver's structural comparator.
pub async fn predict(state: &AppState, req: PredictRequest) -> Result<JudgeResponse, ApiError> {
    require_non_empty(&req.code, "code")?;
    let language = parse_language(&req.language)?;
    require_non_empty(&req.function_name, "function_name")?;
    if req.test_cases.is_empty() {
        return Err(ApiError::BadRequest("test_cases must not be empty".to_string()));
    }

    let mode = req.mode.unwrap_or_default();
    let limits = state.config.clamp_limits(req.time_limit_ms, req.memory_limit_mb);

    let normalized: Vec<NormalizedCase> = req.test_cases.iter().map(NormalizedCase::from_raw).collect();
    if let Some(missing) = normalized.iter().find_map(|c| c.missing_parameter(&req.parameter_names)) {
        return Ok(JudgeResponse::failure(
            Verdict::RuntimeError,
            format!("Invalid input format: missing parameter '{missing}'"),
        ));
    }

    let active = select_active_normalized(normalized, mode);

    let source = harness::generate(
        language,
        &HarnessSpec {
            source: req.code,
            function_name: req.function_name,
            parameter_names: req.parameter_names,
            cases: active.clone(),
        },
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let outcome = match state.sandbox.execute(language, None, &source, None, limits).await {
        Ok(outcome) => outcome,
        Err(_) => return Ok(unavailable_response(active.iter().map(|c| (c.id.as_str(), c.is_visible)))),
    };

    Ok(judge_core::shaper::shape(
        mode,
        build_response_from_driver_output(&active, &outcome, parse_driver_records_as_text),
    ))
}

fn fix_error_unavailable() -> FixErrorResponse {
    FixErrorResponse {
        verdict: Verdict::RuntimeError,
        passed_count: 0,
        total_count: 1,
        test_results: vec![PerCaseResult::errored("1", GENERIC_UNAVAILABLE, true)],
        error: Some(GENERIC_UNAVAILABLE.to_string()),
        total_runtime_ms: 0,
        status: FixErrorStatus::Fail,
        failure_type: None,
        summary_message: GENERIC_UNAVAILABLE.to_string(),
        stdout: String::new(),
        stderr: String::new(),
        diff: None,
    }
}

/// Classify a sandbox outcome against the fix-error judge's failure taxonomy (§4.5). A runner
/// that reported a distinct compile stage is trusted directly; otherwise the run stage's stderr
/// is matched against the per-language syntactic patterns the `heuristics` module knows, since the
/// runner does not separate compile from run for interpreted languages.
fn fix_error_signal(language: Language, outcome: &ExecuteOutcome) -> Option<FixErrorFailureKind> {
    if outcome.compile_stderr.is_some() {
        return Some(FixErrorFailureKind::CompileError);
    }
    heuristics::classify_execution_failure(language, outcome.timed_out, outcome.exit_code, &outcome.stderr)
}

fn fix_error_kind_rank(kind: FixErrorFailureKind) -> u8 {
    match kind {
        FixErrorFailureKind::CompileError => 4,
        FixErrorFailureKind::Timeout => 3,
        FixErrorFailureKind::RuntimeError => 2,
        FixErrorFailureKind::WrongAnswer | FixErrorFailureKind::ValidatorError => 1,
    }
}

fn kind_to_verdict(kind: FixErrorFailureKind) -> Verdict {
    match kind {
        FixErrorFailureKind::CompileError => Verdict::CompilationError,
        FixErrorFailureKind::Timeout => Verdict::TimeLimitExceeded,
        FixErrorFailureKind::RuntimeError => Verdict::RuntimeError,
        FixErrorFailureKind::WrongAnswer => Verdict::WrongAnswer,
        FixErrorFailureKind::ValidatorError => Verdict::RuntimeError,
    }
}

fn fix_error_execution_failure(language: Language, outcome: &ExecuteOutcome) -> Option<FixErrorResponse> {
    let kind = fix_error_signal(language, outcome)?;
    let verdict = kind_to_verdict(kind);
    let message = match kind {
        FixErrorFailureKind::CompileError => truncate_error(outcome.compile_stderr.as_deref().unwrap_or("Compilation failed")),
        FixErrorFailureKind::Timeout => "Time limit exceeded".to_string(),
        FixErrorFailureKind::RuntimeError => truncate_error(&outcome.stderr),
        FixErrorFailureKind::WrongAnswer | FixErrorFailureKind::ValidatorError => {
            unreachable!("classify_execution_failure never produces WrongAnswer/ValidatorError")
        }
    };

    Some(FixErrorResponse {
        verdict,
        passed_count: 0,
        total_count: 1,
        test_results: vec![PerCaseResult::errored("1", message.clone(), true)],
        error: None,
        total_runtime_ms: 0,
        status: FixErrorStatus::Fail,
        failure_type: Some(kind),
        summary_message: message,
        stdout: outcome.stdout.clone(),
        stderr: outcome.stderr.clone(),
        diff: None,
    })
}

async fn output_comparison(state: &AppState, req: &FixErrorRequest, language: Language, limits: judge_core::ResourceLimits) -> Result<FixErrorResponse, ApiError> {
    let expected = req
        .expected_output
        .clone()
        .ok_or_else(|| ApiError::BadRequest("expected_output is required for output_comparison".to_string()))?;

    let outcome = match state.sandbox.execute(language, None, &req.code, None, limits).await {
        Ok(outcome) => outcome,
        Err(_) => return Ok(fix_error_unavailable()),
    };

    if let Some(failure) = fix_error_execution_failure(language, &outcome) {
        return Ok(failure);
    }

    let actual = diff::normalize_output(&outcome.stdout);
    let expected = diff::normalize_output(&expected);

    if actual == expected {
        Ok(FixErrorResponse {
            verdict: Verdict::Accepted,
            passed_count: 1,
            total_count: 1,
            test_results: vec![PerCaseResult::passed("1", RuntimeValue::Str(actual), RuntimeValue::Str(expected), 0, true)],
            error: None,
            total_runtime_ms: 0,
            status: FixErrorStatus::Pass,
            failure_type: None,
            summary_message: "Output matches expected output".to_string(),
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            diff: None,
        })
    } else {
        let diff_lines = diff::diff_lines(&expected, &actual);
        Ok(FixErrorResponse {
            verdict: Verdict::WrongAnswer,
            passed_count: 0,
            total_count: 1,
            test_results: vec![PerCaseResult::failed("1", RuntimeValue::Str(actual), RuntimeValue::Str(expected), 0, true)],
            error: None,
            total_runtime_ms: 0,
            status: FixErrorStatus::Fail,
            failure_type: Some(FixErrorFailureKind::WrongAnswer),
            summary_message: "Output does not match expected output".to_string(),
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            diff: Some(diff_lines),
        })
    }
}

async fn test_cases_mode(state: &AppState, req: &FixErrorRequest, language: Language, mode: JudgeMode, limits: judge_core::ResourceLimits) -> Result<FixErrorResponse, ApiError> {
    let cases = req
        .test_cases
        .clone()
        .ok_or_else(|| ApiError::BadRequest("test_cases is required for test_cases mode".to_string()))?;
    if cases.is_empty() {
        return Err(ApiError::BadRequest("test_cases must not be empty".to_string()));
    }

    let active: Vec<(usize, FixErrorCase)> = if mode == JudgeMode::Run {
        cases.into_iter().enumerate().filter(|(_, c)| !c.is_hidden.unwrap_or(false)).collect()
    } else {
        cases.into_iter().enumerate().collect()
    };

    let mut results = Vec::new();
    let mut worst_kind: Option<FixErrorFailureKind> = None;
    let mut total_runtime_ms = 0u64;
    let mut last_stdout = String::new();
    let mut last_stderr = String::new();

    for (index, case) in &active {
        let id = index.to_string();
        let is_visible = !case.is_hidden.unwrap_or(false);
        let combined = format!("{}\n{}", req.code, case.input);

        let started = Instant::now();
        let outcome = match state.sandbox.execute(language, None, &combined, None, limits).await {
            Ok(outcome) => outcome,
            Err(_) => return Ok(fix_error_unavailable()),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        last_stdout = outcome.stdout.clone();
        last_stderr = outcome.stderr.clone();

        let (result, kind) = match fix_error_signal(language, &outcome) {
            Some(FixErrorFailureKind::CompileError) => (
                PerCaseResult::errored(id.clone(), truncate_error(outcome.compile_stderr.as_deref().unwrap_or("Compilation failed")), is_visible),
                Some(FixErrorFailureKind::CompileError),
            ),
            Some(FixErrorFailureKind::Timeout) => (
                PerCaseResult::errored(id.clone(), "Time limit exceeded", is_visible),
                Some(FixErrorFailureKind::Timeout),
            ),
            Some(FixErrorFailureKind::RuntimeError) => (
                PerCaseResult::errored(id.clone(), truncate_error(&outcome.stderr), is_visible),
                Some(FixErrorFailureKind::RuntimeError),
            ),
            Some(_) => unreachable!("classify_execution_failure never produces WrongAnswer/ValidatorError"),
            None => {
                let actual = diff::normalize_output(&outcome.stdout);
                let expected = diff::normalize_output(&case.expected_output);
                if actual == expected {
                    (
                        PerCaseResult::passed(id.clone(), RuntimeValue::Str(actual), RuntimeValue::Str(expected), elapsed_ms, is_visible),
                        None,
                    )
                } else {
                    (
                        PerCaseResult::failed(id.clone(), RuntimeValue::Str(actual), RuntimeValue::Str(expected), elapsed_ms, is_visible),
                        Some(FixErrorFailureKind::WrongAnswer),
                    )
                }
            }
        };

        if let Some(kind) = kind {
            if worst_kind.map_or(true, |current| fix_error_kind_rank(kind) > fix_error_kind_rank(current)) {
                worst_kind = Some(kind);
            }
        }

        total_runtime_ms += elapsed_ms;
        let stop = kind.is_some() && mode == JudgeMode::Run;
        results.push(result);
        if stop {
            break;
        }
    }

    let verdict = worst_kind.map(kind_to_verdict).unwrap_or(Verdict::Accepted);
    let passed_count = results.iter().filter(|r| r.pass).count();
    let total_count = results.len();
    let status = if verdict.is_accepted() { FixErrorStatus::Pass } else { FixErrorStatus::Fail };
    let summary_message = if verdict.is_accepted() {
        "All test cases passed".to_string()
    } else {
        "One or more test cases failed".to_string()
    };

    Ok(FixErrorResponse {
        verdict,
        passed_count,
        total_count,
        test_results: results,
        error: None,
        total_runtime_ms,
        status,
        failure_type: worst_kind,
        summary_message,
        stdout: last_stdout,
        stderr: last_stderr,
        diff: None,
    })
}

#[derive(Deserialize)]
struct ValidatorOutput {
    pass: bool,
    message: String,
}

async fn custom_function_mode(state: &AppState, req: &FixErrorRequest, language: Language, limits: judge_core::ResourceLimits) -> Result<FixErrorResponse, ApiError> {
    let validator = req
        .custom_validator
        .clone()
        .ok_or_else(|| ApiError::BadRequest("custom_validator is required for custom_function".to_string()))?;

    let outcome = match state.sandbox.execute(language, None, &req.code, None, limits).await {
        Ok(outcome) => outcome,
        Err(_) => return Ok(fix_error_unavailable()),
    };

    if let Some(failure) = fix_error_execution_failure(language, &outcome) {
        return Ok(failure);
    }

    let injection = match language {
        Language::Python => format!("__judge_stdout = {}\n", harness::python_literal(&RuntimeValue::Str(outcome.stdout.clone()))),
        Language::Javascript | Language::Typescript => {
            format!("const __judge_stdout = {};\n", harness::json_literal(&RuntimeValue::Str(outcome.stdout.clone())))
        }
    };
    let validator_program = format!("{}\n{}{}", req.code, injection, validator);

    let validator_outcome = match state.sandbox.execute(language, None, &validator_program, None, limits).await {
        Ok(outcome) => outcome,
        Err(_) => return Ok(fix_error_unavailable()),
    };

    if fix_error_signal(language, &validator_outcome).is_some() {
        return Ok(FixErrorResponse {
            verdict: Verdict::RuntimeError,
            passed_count: 0,
            total_count: 1,
            test_results: vec![PerCaseResult::errored("1", "Internal validation error", true)],
            error: None,
            total_runtime_ms: 0,
            status: FixErrorStatus::Fail,
            failure_type: Some(FixErrorFailureKind::ValidatorError),
            summary_message: "Internal validation error".to_string(),
            stdout: validator_outcome.stdout.clone(),
            stderr: validator_outcome.stderr.clone(),
            diff: None,
        });
    }

    match serde_json::from_str::<ValidatorOutput>(&validator_outcome.stdout) {
        Ok(validation) => {
            let verdict = if validation.pass { Verdict::Accepted } else { Verdict::WrongAnswer };
            Ok(FixErrorResponse {
                verdict,
                passed_count: if validation.pass { 1 } else { 0 },
                total_count: 1,
                test_results: vec![if validation.pass {
                    PerCaseResult::passed("1", RuntimeValue::Str(outcome.stdout.clone()), RuntimeValue::Null, 0, true)
                } else {
                    PerCaseResult::failed("1", RuntimeValue::Str(outcome.stdout.clone()), RuntimeValue::Null, 0, true)
                }],
                error: None,
                total_runtime_ms: 0,
                status: if validation.pass { FixErrorStatus::Pass } else { FixErrorStatus::Fail },
                failure_type: if validation.pass { None } else { Some(FixErrorFailureKind::WrongAnswer) },
                summary_message: validation.message,
                stdout: outcome.stdout,
                stderr: outcome.stderr,
                diff: None,
            })
        }
        Err(_) => Ok(FixErrorResponse {
            verdict: Verdict::RuntimeError,
            passed_count: 0,
            total_count: 1,
            test_results: vec![PerCaseResult::errored("1", "Internal validation error", true)],
            error: None,
            total_runtime_ms: 0,
            status: FixErrorStatus::Fail,
            failure_type: Some(FixErrorFailureKind::ValidatorError),
            summary_message: "Internal validation error".to_string(),
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            diff: None,
        }),
    }
}

/// Shape a `FixErrorResponse` for the given mode (§4.6), mirroring `judge_core::shaper::shape` for
/// the extra fields this response type carries that `JudgeResponse` does not. Run mode is a no-op.
/// Submit mode redacts `test_results` the same way the functional/predict responses are redacted,
/// and withholds the top-level `stdout`/`stderr`/`diff` whenever the case they describe (the last
/// one executed) is hidden, so a hidden `test_cases` case's raw output never leaks through those
/// top-level fields either.
fn shape_fix_error(mode: JudgeMode, mut response: FixErrorResponse) -> FixErrorResponse {
    if mode == JudgeMode::Run {
        return response;
    }

    let last_visible = response.test_results.last().map(|c| c.is_visible).unwrap_or(true);

    judge_core::shaper::shape_results(&mut response.test_results);

    if !last_visible {
        response.stdout = String::new();
        response.stderr = String::new();
        response.diff = None;
    }

    if !response.verdict.is_accepted() {
        response.error = None;
    }

    response
}

/// Run the fix-error judge under whichever of the three `validation_type` modes the request
/// selects (§4.5).
pub async fn fix_error(state: &AppState, req: FixErrorRequest) -> Result<FixErrorResponse, ApiError> {
    require_non_empty(&req.code, "code")?;
    let language = parse_language(&req.language)?;
    let mode = req.mode.unwrap_or_default();
    let limits = state.config.clamp_limits(req.time_limit_ms, None);

    let response = match req.validation_type {
        ValidationType::OutputComparison => output_comparison(state, &req, language, limits).await,
        ValidationType::TestCases => test_cases_mode(state, &req, language, mode, limits).await,
        ValidationType::CustomFunction => custom_function_mode(state, &req, language, limits).await,
    }?;

    Ok(shape_fix_error(mode, response))
}
