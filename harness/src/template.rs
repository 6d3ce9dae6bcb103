//! Literal-rendering primitives shared by the per-language generators: turning a `RuntimeValue`
//! into source text that is valid in the target language and round-trips exactly.
//!

use judge_core::RuntimeValue;

/// Render `value` as a JSON literal. Valid as-is in JavaScript/TypeScript source, since JSON is a
/// subset of ECMAScript expression syntax.
pub fn json_literal(value: &RuntimeValue) -> String {
    serde_json::to_string(&value.to_json()).expect("RuntimeValue always serializes")
}

/// Render `value` as a Python literal. Differs from JSON only in the null/boolean spellings;
/// strings, numbers, lists and dicts reuse JSON's escaping rules, which Python's lexer accepts.
pub fn python_literal(value: &RuntimeValue) -> String {
    match value {
        RuntimeValue::Null => "None".to_string(),
        RuntimeValue::Bool(true) => "True".to_string(),
        RuntimeValue::Bool(false) => "False".to_string(),
        RuntimeValue::Int(i) => i.to_string(),
        RuntimeValue::Float(f) => format!("{:?}", f),
        RuntimeValue::Str(s) => json_string_literal(s),
        RuntimeValue::Seq(items) => {
            let parts: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", parts.join(", "))
        }
        RuntimeValue::Map(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", json_string_literal(k), python_literal(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn json_string_literal(s: &str) -> String {
    serde_json::to_string(s).expect("strings always serialize")
}

/// A syntactically valid identifier in every language this crate targets: starts with an ASCII
/// letter or underscore, continues with ASCII alphanumerics or underscores. Rejecting anything
/// else before splicing a caller-supplied name into generated source keeps the Harness Generator
/// from ever emitting broken (or injected) code on its behalf.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
