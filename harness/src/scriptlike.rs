//! Shared driver body for the two ECMAScript-family targets (JavaScript, TypeScript). The two
//! differ only in a leading pragma TypeScript needs to tolerate the driver's dynamically-typed
//! case table; the comparator and result-collection logic are identical.
//!

use crate::template::json_literal;
use crate::HarnessSpec;

const RUNNER_TEMPLATE: &str = r#"
function __judgeCompare(expected, actual) {
  if (expected === null || actual === null) {
    return expected === null && actual === null;
  }
  if (typeof expected === "boolean" || typeof actual === "boolean") {
    return expected === actual;
  }
  if (typeof expected === "number" && typeof actual === "number") {
    if (!Number.isInteger(expected) || !Number.isInteger(actual)) {
      return Math.abs(expected - actual) < 1e-9;
    }
    return expected === actual;
  }
  if (Array.isArray(expected) && Array.isArray(actual)) {
    if (expected.length !== actual.length) {
      return false;
    }
    return expected.every((e, i) => __judgeCompare(e, actual[i]));
  }
  if (typeof expected === "object" && typeof actual === "object") {
    const expectedKeys = Object.keys(expected).sort();
    const actualKeys = Object.keys(actual).sort();
    if (expectedKeys.length !== actualKeys.length) {
      return false;
    }
    if (!expectedKeys.every((k, i) => k === actualKeys[i])) {
      return false;
    }
    return expectedKeys.every((k) => __judgeCompare(expected[k], actual[k]));
  }
  return expected === actual;
}

const __judgeResults = [];
for (const [__caseId, __caseArgs, __caseExpected] of __JUDGE_CASES__) {
  const __start = Date.now();
  try {
    const __actual = __JUDGE_FUNCTION__(...__caseArgs);
    __judgeResults.push({
      id: __caseId,
      pass: __judgeCompare(__caseExpected, __actual),
      actual: __actual,
      expected: __caseExpected,
      runtime_ms: Date.now() - __start,
      error: null,
    });
  } catch (__exc) {
    const __message = `${__exc.name}: ${__exc.message}`.slice(0, 200);
    __judgeResults.push({
      id: __caseId,
      pass: false,
      actual: null,
      expected: __caseExpected,
      runtime_ms: Date.now() - __start,
      error: __message,
    });
  }
}

console.log(JSON.stringify(__judgeResults));
"#;

pub fn generate(spec: &HarnessSpec, leading_pragma: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(pragma) = leading_pragma {
        out.push_str(pragma);
        out.push('\n');
    }
    out.push_str(&spec.source);
    out.push_str("\n\nconst __JUDGE_CASES__ = [\n");
    for case in &spec.cases {
        let args: Vec<String> = spec
            .parameter_names
            .iter()
            .map(|name| json_literal(case.inputs.get(name).unwrap_or(&judge_core::RuntimeValue::Null)))
            .collect();
        out.push_str(&format!(
            "  [{}, [{}], {}],\n",
            json_literal(&judge_core::RuntimeValue::Str(case.id.clone())),
            args.join(", "),
            json_literal(&case.expected_output),
        ));
    }
    out.push_str("];\n");
    out.push_str(&RUNNER_TEMPLATE.replace("__JUDGE_FUNCTION__", &spec.function_name));
    out
}
