//! Driver generation for the JavaScript language provider.
//!

use crate::scriptlike;
use crate::HarnessSpec;

pub fn generate(spec: &HarnessSpec) -> String {
    scriptlike::generate(spec, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use judge_core::{NormalizedCase, TestCase};

    #[test]
    fn embeds_source_and_cases() {
        let mut raw = TestCase {
            id: "1".into(),
            ..Default::default()
        };
        raw.inputs.insert("a".into(), serde_json::json!(1));
        raw.expected_output = serde_json::json!(1);
        let spec = HarnessSpec {
            source: "function identity(a) { return a; }".to_string(),
            function_name: "identity".to_string(),
            parameter_names: vec!["a".to_string()],
            cases: vec![NormalizedCase::from_raw(&raw)],
        };
        let generated = generate(&spec);
        assert!(generated.contains("function identity(a)"));
        assert!(generated.contains("identity(...__caseArgs)"));
        assert!(generated.contains("JSON.stringify(__judgeResults)"));
    }
}
