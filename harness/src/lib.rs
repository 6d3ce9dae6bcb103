//! This crate implements the Harness Generator (§4.3): emitting a self-contained driver program
//! that loads learner code, runs every normalized case against a named function, times and
//! compares each invocation, and prints a single JSON array of per-case records.
//!
//! Generation is pure: no process spawning, no filesystem access. The generated text is handed to
//! `sandbox-client` for execution; this crate never talks to the runner itself.
//!

#[macro_use]
extern crate error_chain;

mod javascript;
mod python;
mod scriptlike;
pub mod template;
mod typescript;

use judge_core::{Language, NormalizedCase};

pub use template::{json_literal, python_literal};

error_chain! {
    errors {
        InvalidIdentifier(name: String) {
            description("invalid identifier")
            display("'{}' is not a valid identifier", name)
        }
    }
}

/// Everything the generator needs to build a driver for one judge invocation.
pub struct HarnessSpec {
    /// Learner-submitted source, embedded verbatim ahead of the generated driver code.
    pub source: String,

    /// Name of the function under test.
    pub function_name: String,

    /// Declared parameter names, in the order arguments are passed positionally.
    pub parameter_names: Vec<String>,

    /// Normalized cases to run, in the order they should appear in the emitted result array.
    pub cases: Vec<NormalizedCase>,
}

/// Generate a driver program for `language`. Fails only if `function_name` or a parameter name is
/// not a valid identifier in the target language; the dispatcher treats this as an input-shape
/// error.
pub fn generate(language: Language, spec: &HarnessSpec) -> Result<String> {
    validate_identifier(&spec.function_name)?;
    for name in &spec.parameter_names {
        validate_identifier(name)?;
    }

    Ok(match language {
        Language::Python => python::generate(spec),
        Language::Javascript => javascript::generate(spec),
        Language::Typescript => typescript::generate(spec),
    })
}

fn validate_identifier(name: &str) -> Result<()> {
    if template::is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ErrorKind::InvalidIdentifier(name.to_string()).into())
    }
}
