//! High-level API for element-wise mapping.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: the dynamic mapping
//! functions, and a fluent builder (the factory) producing specialized
//! mappers with a fixed arity, configuration and optional function.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults (`float64`
//!   allocation).
//! * **Typed slots**: Binding a function changes the builder's type, so the
//!   resulting mapper's call shape is known statically.
//! * **Validated**: Arity, duplicates and the output kind are checked when
//!   `.build()` is called, not at first use.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`MapperBuilder`] via `Mapper::new()`.
//! 2. Chain configuration methods (`.arity()`, `.dtype()`, `.function()`, ...).
//! 3. Call `.build()` to get a [`SpecializedMapper`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use serde_json::Value;
use tracing::debug;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::adapters::dynamic::{
    apply, apply_into, apply_value, apply_value_into, apply_with, try_apply_into, try_apply_with,
};
pub use crate::adapters::specialized::{Bound, SpecializedMapper, Unbound};
pub use crate::engine::options::{ApplyOptions, DTypeSpec, OutputMode};
pub use crate::primitives::array::TypedArray;
pub use crate::primitives::buffer::{NumericBuffer, OutputBuffer};
pub use crate::primitives::dtype::DType;
pub use crate::primitives::element::{Clamped, Element};
pub use crate::primitives::errors::{ApplyError, ErrorKind};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for specialized mappers.
#[derive(Debug, Clone)]
pub struct MapperBuilder<F = Unbound> {
    /// Number of input buffers per call.
    pub arity: Option<usize>,

    /// Kind of freshly allocated outputs (default `float64`).
    pub dtype: Option<DTypeSpec>,

    /// Whether callers supply the output buffer (default `false`).
    pub out: Option<bool>,

    /// Function slot.
    pub function: F,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,

    /// Error raised while configuring, reported by `build`.
    #[doc(hidden)]
    pub deferred_error: Option<ApplyError>,
}

impl Default for MapperBuilder<Unbound> {
    fn default() -> Self {
        Self::new()
    }
}

impl MapperBuilder<Unbound> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            arity: None,
            dtype: None,
            out: None,
            function: Unbound,
            duplicate_param: None,
            deferred_error: None,
        }
    }

    /// Fix the mapping function; the built mapper then takes only buffers.
    pub fn function<G>(self, f: G) -> MapperBuilder<Bound<G>>
    where
        G: Fn(&[f64]) -> f64,
    {
        MapperBuilder {
            arity: self.arity,
            dtype: self.dtype,
            out: self.out,
            function: Bound(f),
            duplicate_param: self.duplicate_param,
            deferred_error: self.deferred_error,
        }
    }
}

impl<F> MapperBuilder<F> {
    /// Set the number of input buffers every call must supply.
    pub fn arity(mut self, arity: usize) -> Self {
        if self.arity.is_some() {
            self.duplicate_param = Some("arity");
        }
        self.arity = Some(arity);
        self
    }

    /// Set the kind of freshly allocated outputs.
    pub fn dtype(self, dtype: DType) -> Self {
        self.set_dtype(DTypeSpec::Known(dtype))
    }

    /// Set the kind of freshly allocated outputs by name.
    pub fn dtype_name(self, name: impl Into<String>) -> Self {
        self.set_dtype(DTypeSpec::Named(name.into()))
    }

    /// Require callers to supply the output buffer.
    pub fn out(mut self, enabled: bool) -> Self {
        if self.out.is_some() {
            self.duplicate_param = Some("out");
        }
        self.out = Some(enabled);
        self
    }

    /// Apply every field of `options`.
    ///
    /// Counts as setting `out`, and `dtype` when `options.dtype` is present.
    pub fn options(self, options: ApplyOptions) -> Self {
        let builder = match options.dtype {
            Some(spec) => self.set_dtype(spec),
            None => self,
        };
        builder.out(options.out)
    }

    /// Apply the options present in a JSON configuration object.
    ///
    /// Keys absent from the object leave the builder unchanged. Validation
    /// errors are reported by `build`.
    pub fn options_value(mut self, candidate: &Value) -> Self {
        let mut parsed = ApplyOptions::default();
        if let Err(err) = Validator::validate_options(&mut parsed, candidate) {
            self.deferred_error.get_or_insert(err);
            return self;
        }

        if let Some(spec) = parsed.dtype {
            self = self.set_dtype(spec);
        }
        if candidate.get("out").is_some() {
            self = self.out(parsed.out);
        }
        self
    }

    fn set_dtype(mut self, spec: DTypeSpec) -> Self {
        if self.dtype.is_some() {
            self.duplicate_param = Some("dtype");
        }
        self.dtype = Some(spec);
        self
    }

    /// Validate the configuration and produce a specialized mapper.
    pub fn build(self) -> Result<SpecializedMapper<F>, ApplyError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Arity is required and positive
        let arity = self.arity.ok_or(ApplyError::MissingParameter { parameter: "arity" })?;
        Validator::validate_arity(arity)?;

        // Resolve the output kind now so unknown names fail here
        let options = ApplyOptions {
            dtype: self.dtype,
            out: self.out.unwrap_or(false),
        };
        let mode = options.output_mode()?;

        debug!(arity, mode = ?mode, "built specialized mapper");
        Ok(SpecializedMapper::from_parts(arity, mode, self.function))
    }
}

// ============================================================================
// Factory Functions
// ============================================================================

/// Build a mapper of `arity` inputs whose function is supplied per call.
pub fn factory(arity: usize, options: &ApplyOptions) -> Result<SpecializedMapper, ApplyError> {
    MapperBuilder::new()
        .arity(arity)
        .options(options.clone())
        .build()
}

/// Build a mapper of `arity` inputs with `f` fixed.
pub fn factory_with<F>(
    f: F,
    arity: usize,
    options: &ApplyOptions,
) -> Result<SpecializedMapper<Bound<F>>, ApplyError>
where
    F: Fn(&[f64]) -> f64,
{
    MapperBuilder::new()
        .function(f)
        .arity(arity)
        .options(options.clone())
        .build()
}
