//! Validation of configuration objects and call shapes.
//!
//! ## Purpose
//!
//! This module checks everything that can be wrong with a call before the
//! mapping loop starts: the shape of a configuration object, the arity of a
//! specialized mapper, and the count and lengths of the input buffers.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Shape only**: Option values are checked for type, not meaning; a
//!   `dtype` string naming no known kind passes here and fails on allocation.
//! * **Forward-compatible**: Unrecognized option keys are ignored.
//!
//! ## Invariants
//!
//! * On error the target options are left untouched.
//! * Validation is deterministic and performs no writes to any buffer.
//!
//! ## Non-goals
//!
//! * This module does not resolve kind names or allocate buffers.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;
#[cfg(feature = "std")]
use std::string::ToString;

// External dependencies
use serde_json::Value;

// Internal dependencies
use crate::engine::options::{ApplyOptions, DTypeSpec};
use crate::primitives::buffer::NumericBuffer;
use crate::primitives::errors::ApplyError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for options and call shapes.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Options Validation
    // ========================================================================

    /// Validate a configuration object and copy recognized fields onto `target`.
    ///
    /// # Notes
    ///
    /// * `candidate` must be a JSON object; arrays, strings, numbers,
    ///   booleans and `null` are rejected.
    /// * `dtype` must be a string and `out` must be a boolean when present.
    pub fn validate_options(target: &mut ApplyOptions, candidate: &Value) -> Result<(), ApplyError> {
        let Value::Object(map) = candidate else {
            return Err(ApplyError::InvalidOptions(candidate.to_string()));
        };

        let dtype = match map.get("dtype") {
            None => None,
            Some(Value::String(name)) => Some(DTypeSpec::Named(name.clone())),
            Some(other) => {
                return Err(ApplyError::InvalidOption {
                    option: "dtype",
                    expected: "a string",
                    received: other.to_string(),
                });
            }
        };

        let out = match map.get("out") {
            None => None,
            Some(Value::Bool(flag)) => Some(*flag),
            Some(other) => {
                return Err(ApplyError::InvalidOption {
                    option: "out",
                    expected: "a boolean",
                    received: other.to_string(),
                });
            }
        };

        if dtype.is_some() {
            target.dtype = dtype;
        }
        if let Some(flag) = out {
            target.out = flag;
        }

        Ok(())
    }

    // ========================================================================
    // Shape Validation
    // ========================================================================

    /// Validate that a fixed arity is a positive integer.
    pub fn validate_arity(arity: usize) -> Result<(), ApplyError> {
        if arity == 0 {
            return Err(ApplyError::InvalidArity(arity));
        }
        Ok(())
    }

    /// Validate that exactly `expected` input buffers were supplied.
    pub fn validate_arity_match(expected: usize, got: usize) -> Result<(), ApplyError> {
        if expected != got {
            return Err(ApplyError::ArityMismatch { expected, got });
        }
        Ok(())
    }

    /// Validate input buffers and return the common length.
    ///
    /// The required length is `required` when an output buffer was supplied,
    /// otherwise the length of the first input.
    pub fn validate_inputs(
        inputs: &[&dyn NumericBuffer],
        required: Option<usize>,
    ) -> Result<usize, ApplyError> {
        let first = inputs.first().ok_or(ApplyError::NoInputs)?;
        let len = required.unwrap_or_else(|| first.len());

        for (index, buffer) in inputs.iter().enumerate() {
            if buffer.len() != len {
                return Err(ApplyError::MismatchedLengths {
                    index,
                    expected: len,
                    got: buffer.len(),
                });
            }
        }

        Ok(len)
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), ApplyError> {
        if let Some(param) = duplicate_param {
            return Err(ApplyError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
