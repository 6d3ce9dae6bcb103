//! Wire types for the external runner's execute operation (§6), modeled on the Piston-style
//! execution API: `POST /execute` with `{language, version, files, run_timeout}` returning
//! `{compile?, run?}`.
//!

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ExecuteRequest<'a> {
    pub language: &'a str,
    pub version: &'a str,
    pub files: Vec<FileEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<&'a str>,
    pub run_timeout: u64,
}

#[derive(Serialize)]
pub struct FileEntry<'a> {
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteResponse {
    pub compile: Option<StageResult>,
    pub run: Option<StageResult>,
}

#[derive(Debug, Deserialize)]
pub struct StageResult {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
    pub signal: Option<String>,
}
