//! Classification of a raw runner response into the four concepts the rest of the judge reasons
//! about (§4.4): stdout, stderr, exit code, timed-out, plus an optional compile-time stderr.
//!

use crate::wire::ExecuteResponse;

/// A runner response reduced to what the Verdict Engine needs, independent of the runner's own
/// wire shape.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecuteOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
    pub compile_stderr: Option<String>,
}

/// Signals a runner uses to report that it killed the process for exceeding its time limit.
/// Closed table; an unrecognized signal surfaces as an ordinary non-zero exit instead.
const TIMEOUT_SIGNALS: [&str; 2] = ["SIGKILL", "SIGTERM"];

pub fn classify(response: ExecuteResponse) -> ExecuteOutcome {
    let compile_stderr = response
        .compile
        .as_ref()
        .map(|stage| stage.stderr.clone())
        .filter(|stderr| !stderr.is_empty());

    match response.run {
        Some(run) => {
            let timed_out = run
                .signal
                .as_deref()
                .map(|s| TIMEOUT_SIGNALS.contains(&s))
                .unwrap_or(false);
            ExecuteOutcome {
                stdout: run.stdout,
                stderr: run.stderr,
                exit_code: run.code.unwrap_or(-1),
                timed_out,
                compile_stderr,
            }
        }
        None => ExecuteOutcome {
            compile_stderr,
            exit_code: -1,
            ..Default::default()
        },
    }
}
