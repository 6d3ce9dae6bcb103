//! This module implements the verdict engine: combining per-case outcomes and sandbox-level
//! signals into a single `Verdict`, per the priority order in §4.5.
//!

use crate::{PerCaseResult, Verdict};

/// Sandbox-level signals that take priority over per-case pass/fail when deriving the overall
/// verdict. These come from the sandbox client's classification of the runner's raw response, not
/// from the harness driver's per-case comparator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpstreamSignal {
    /// No sandbox-level signal; derive purely from per-case results.
    None,

    /// The runner reported a non-empty `compile_stderr`.
    CompileError,

    /// The runner reported kill-by-timeout.
    Timeout,

    /// Non-zero exit, non-empty stderr, empty stdout: a crash before any driver output.
    RuntimeErrorNoOutput,

    /// The driver's stdout did not contain a parseable JSON array of per-case records.
    ParseFailure,
}

/// Derive the overall verdict for a judge response, in the priority order of §4.5:
///
/// 1. compile-error signal,
/// 2. timeout signal,
/// 3. non-zero exit with stderr and empty stdout,
/// 4. parse failure, or any case carrying an error without a pass,
/// 5. any case failed,
/// 6. all cases passed.
pub fn derive(upstream: UpstreamSignal, results: &[PerCaseResult]) -> Verdict {
    match upstream {
        UpstreamSignal::CompileError => return Verdict::CompilationError,
        UpstreamSignal::Timeout => return Verdict::TimeLimitExceeded,
        UpstreamSignal::RuntimeErrorNoOutput => return Verdict::RuntimeError,
        UpstreamSignal::ParseFailure => return Verdict::RuntimeError,
        UpstreamSignal::None => {}
    }

    if results.iter().any(|r| !r.pass && r.error.is_some()) {
        return Verdict::RuntimeError;
    }

    if results.iter().any(|r| !r.pass) {
        return Verdict::WrongAnswer;
    }

    Verdict::Accepted
}
