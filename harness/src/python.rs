//! Driver generation for the Python language provider.
//!

use crate::template::python_literal;
use crate::HarnessSpec;

const RUNNER_TEMPLATE: &str = r#"
import json as __judge_json
import time as __judge_time


def __judge_compare(expected, actual):
    if expected is None or actual is None:
        return expected is None and actual is None
    if isinstance(expected, bool) or isinstance(actual, bool):
        return expected == actual
    if isinstance(expected, (int, float)) and isinstance(actual, (int, float)):
        if isinstance(expected, float) or isinstance(actual, float):
            return abs(float(expected) - float(actual)) < 1e-9
        return expected == actual
    if isinstance(expected, list) and isinstance(actual, list):
        if len(expected) != len(actual):
            return False
        return all(__judge_compare(e, a) for e, a in zip(expected, actual))
    if isinstance(expected, dict) and isinstance(actual, dict):
        if set(expected.keys()) != set(actual.keys()):
            return False
        return all(__judge_compare(expected[k], actual[k]) for k in expected)
    return expected == actual


__judge_results = []
for __case_id, __case_args, __case_expected in __JUDGE_CASES__:
    __start = __judge_time.perf_counter()
    try:
        __actual = __JUDGE_FUNCTION__(*__case_args)
        __runtime_ms = int((__judge_time.perf_counter() - __start) * 1000)
        __judge_results.append({
            "id": __case_id,
            "pass": __judge_compare(__case_expected, __actual),
            "actual": __actual,
            "expected": __case_expected,
            "runtime_ms": __runtime_ms,
            "error": None,
        })
    except Exception as __exc:
        __runtime_ms = int((__judge_time.perf_counter() - __start) * 1000)
        __message = "{}: {}".format(type(__exc).__name__, str(__exc))[:200]
        __judge_results.append({
            "id": __case_id,
            "pass": False,
            "actual": None,
            "expected": __case_expected,
            "runtime_ms": __runtime_ms,
            "error": __message,
        })

print(__judge_json.dumps(__judge_results))
"#;

pub fn generate(spec: &HarnessSpec) -> String {
    let mut out = String::new();
    out.push_str(&spec.source);
    out.push_str("\n\n__JUDGE_CASES__ = [\n");
    for case in &spec.cases {
        let args: Vec<String> = spec
            .parameter_names
            .iter()
            .map(|name| python_literal(case.inputs.get(name).unwrap_or(&judge_core::RuntimeValue::Null)))
            .collect();
        out.push_str(&format!(
            "    ({}, [{}], {}),\n",
            python_literal(&judge_core::RuntimeValue::Str(case.id.clone())),
            args.join(", "),
            python_literal(&case.expected_output),
        ));
    }
    out.push_str("]\n");
    out.push_str(&RUNNER_TEMPLATE.replace("__JUDGE_FUNCTION__", &spec.function_name));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use judge_core::{NormalizedCase, TestCase};

    fn one_case() -> NormalizedCase {
        let mut raw = TestCase {
            id: "1".into(),
            ..Default::default()
        };
        raw.inputs.insert("a".into(), serde_json::json!(1));
        raw.expected_output = serde_json::json!(1);
        NormalizedCase::from_raw(&raw)
    }

    #[test]
    fn embeds_source_and_cases() {
        let spec = HarnessSpec {
            source: "def identity(a):\n    return a\n".to_string(),
            function_name: "identity".to_string(),
            parameter_names: vec!["a".to_string()],
            cases: vec![one_case()],
        };
        let generated = generate(&spec);
        assert!(generated.contains("def identity(a):"));
        assert!(generated.contains("identity(*__case_args)"));
        assert!(generated.contains("__judge_json.dumps(__judge_results)"));
    }
}
