//! Driver generation for the TypeScript language provider.
//!
//! The generated case table is necessarily dynamically typed (it mixes values of whatever shape
//! each case's parameters require), so the driver opens with `// @ts-nocheck` rather than trying
//! to infer a sound static type for it.
//!

use crate::scriptlike;
use crate::HarnessSpec;

pub fn generate(spec: &HarnessSpec) -> String {
    scriptlike::generate(spec, Some("// @ts-nocheck"))
}
