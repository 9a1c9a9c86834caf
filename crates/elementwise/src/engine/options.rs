//! Mapping options: output kind selection and output mode.
//!
//! ## Purpose
//!
//! [`ApplyOptions`] is the normalized form of a configuration object. It is
//! filled either through fluent setters or by the validator from a JSON
//! object, then consulted by the engine to decide how the output buffer is
//! provisioned.
//!
//! ## Design notes
//!
//! * **Deferred resolution**: A kind given by name is stored as-is and only
//!   resolved when an output buffer must be allocated.
//! * **Out mode wins**: When `out` is set the requested kind is never
//!   resolved, so an unknown name is harmless in that mode.
//!
//! ## Invariants
//!
//! * The default options allocate `float64` outputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use serde_json::Value;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::dtype::DType;
use crate::primitives::errors::ApplyError;

// ============================================================================
// DTypeSpec
// ============================================================================

/// A requested output kind, either known statically or given by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DTypeSpec {
    /// Kind selected through the `DType` enum.
    Known(DType),
    /// Kind given as a string; resolved through the name table on use.
    Named(String),
}

impl DTypeSpec {
    /// Resolve to a concrete kind.
    pub fn resolve(&self) -> Result<DType, ApplyError> {
        match self {
            DTypeSpec::Known(dtype) => Ok(*dtype),
            DTypeSpec::Named(name) => {
                DType::from_name(name).ok_or_else(|| ApplyError::UnsupportedDType(name.clone()))
            }
        }
    }
}

impl From<DType> for DTypeSpec {
    fn from(dtype: DType) -> Self {
        DTypeSpec::Known(dtype)
    }
}

// ============================================================================
// Output Mode
// ============================================================================

/// How the output buffer of a call is obtained, after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Allocate a fresh buffer of the given kind.
    Allocate(DType),
    /// The caller supplies the output buffer.
    Provided,
}

// ============================================================================
// ApplyOptions
// ============================================================================

/// Options recognized by the mapping engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Kind of a freshly allocated output (default `float64`).
    pub dtype: Option<DTypeSpec>,

    /// Whether the caller supplies the output buffer.
    pub out: bool,
}

impl ApplyOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a JSON configuration object into options.
    pub fn from_value(candidate: &Value) -> Result<Self, ApplyError> {
        let mut options = Self::default();
        Validator::validate_options(&mut options, candidate)?;
        Ok(options)
    }

    /// Select the output kind.
    pub fn dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(DTypeSpec::Known(dtype));
        self
    }

    /// Select the output kind by name; unknown names fail on allocation.
    pub fn dtype_name(mut self, name: impl Into<String>) -> Self {
        self.dtype = Some(DTypeSpec::Named(name.into()));
        self
    }

    /// Signal that the caller supplies the output buffer.
    pub fn out(mut self, enabled: bool) -> Self {
        self.out = enabled;
        self
    }

    /// Resolve how the output buffer is obtained.
    ///
    /// The requested kind is only looked up when `out` is not set.
    pub fn output_mode(&self) -> Result<OutputMode, ApplyError> {
        if self.out {
            return Ok(OutputMode::Provided);
        }
        let dtype = match &self.dtype {
            Some(spec) => spec.resolve()?,
            None => DType::default(),
        };
        Ok(OutputMode::Allocate(dtype))
    }
}
