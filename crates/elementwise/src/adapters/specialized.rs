//! Specialized mappers with a fixed arity, function and configuration.
//!
//! ## Purpose
//!
//! A [`SpecializedMapper`] is produced once by the factory (see `api`) and
//! then called many times. Arity, output mode and (optionally) the mapping
//! function are fixed at construction, so a call only supplies buffers.
//!
//! ## Design notes
//!
//! * **Tagged family**: The function slot is either [`Unbound`] (function
//!   supplied per call) or [`Bound`] (function fixed); the output mode is
//!   either `Allocate(kind)` or `Provided`. Each of the four combinations
//!   has its own call shape.
//! * **Pre-resolved**: The output kind is resolved when the mapper is built,
//!   so an unknown kind name never reaches a call.
//! * **Immutable**: Calls take `&self`; a mapper whose function is `Sync`
//!   can be shared across threads.
//!
//! ## Invariants
//!
//! * `arity >= 1`.
//! * Every call supplies exactly `arity` input buffers of one length.

// External dependencies
use tracing::trace;

// Internal dependencies
use crate::engine::executor::MapExecutor;
use crate::engine::options::{DTypeSpec, OutputMode};
use crate::engine::validator::Validator;
use crate::primitives::array::TypedArray;
use crate::primitives::buffer::{NumericBuffer, OutputBuffer};
use crate::primitives::errors::ApplyError;

// ============================================================================
// Function Slots
// ============================================================================

/// Marker for a mapper that takes its function on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbound;

/// A mapping function fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct Bound<F>(pub F);

// ============================================================================
// Specialized Mapper
// ============================================================================

/// Mapper with a fixed arity and output mode.
#[derive(Debug, Clone)]
pub struct SpecializedMapper<F = Unbound> {
    arity: usize,
    mode: OutputMode,
    function: F,
}

impl<F> SpecializedMapper<F> {
    /// Assemble a mapper from already validated parts.
    pub(crate) fn from_parts(arity: usize, mode: OutputMode, function: F) -> Self {
        Self {
            arity,
            mode,
            function,
        }
    }

    /// Number of input buffers every call must supply.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Output mode fixed at construction.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn check_arity(&self, inputs: &[&dyn NumericBuffer]) -> Result<(), ApplyError> {
        Validator::validate_arity_match(self.arity, inputs.len())
    }

    fn alloc<G>(&self, f: G, inputs: &[&dyn NumericBuffer]) -> Result<TypedArray, ApplyError>
    where
        G: Fn(&[f64]) -> f64,
    {
        let dtype = MapExecutor::allocation_dtype(self.mode)?;
        self.check_arity(inputs)?;
        trace!(arity = self.arity, dtype = %dtype, "specialized apply");
        MapExecutor::map_alloc(
            &MapExecutor::lift(f),
            inputs,
            Some(&DTypeSpec::Known(dtype)),
        )
    }

    fn fill<'o, G, O>(
        &self,
        f: G,
        out: &'o mut O,
        inputs: &[&dyn NumericBuffer],
    ) -> Result<&'o mut O, ApplyError>
    where
        G: Fn(&[f64]) -> f64,
        O: OutputBuffer + ?Sized,
    {
        MapExecutor::require_provided(self.mode)?;
        self.check_arity(inputs)?;
        trace!(arity = self.arity, len = out.len(), "specialized apply into");
        MapExecutor::map_into(&MapExecutor::lift(f), inputs, out)
    }
}

// ============================================================================
// Function Supplied per Call
// ============================================================================

impl SpecializedMapper<Unbound> {
    /// Map `f` over exactly `arity` inputs into a new array.
    pub fn apply<G>(&self, f: G, inputs: &[&dyn NumericBuffer]) -> Result<TypedArray, ApplyError>
    where
        G: Fn(&[f64]) -> f64,
    {
        self.alloc(f, inputs)
    }

    /// Map `f` over exactly `arity` inputs, writing into `out`.
    pub fn apply_into<'o, G, O>(
        &self,
        f: G,
        out: &'o mut O,
        inputs: &[&dyn NumericBuffer],
    ) -> Result<&'o mut O, ApplyError>
    where
        G: Fn(&[f64]) -> f64,
        O: OutputBuffer + ?Sized,
    {
        self.fill(f, out, inputs)
    }
}

// ============================================================================
// Function Fixed at Construction
// ============================================================================

impl<F> SpecializedMapper<Bound<F>>
where
    F: Fn(&[f64]) -> f64,
{
    /// Map the fixed function over exactly `arity` inputs into a new array.
    pub fn apply(&self, inputs: &[&dyn NumericBuffer]) -> Result<TypedArray, ApplyError> {
        self.alloc(&self.function.0, inputs)
    }

    /// Map the fixed function over exactly `arity` inputs, writing into `out`.
    pub fn apply_into<'o, O>(
        &self,
        out: &'o mut O,
        inputs: &[&dyn NumericBuffer],
    ) -> Result<&'o mut O, ApplyError>
    where
        O: OutputBuffer + ?Sized,
    {
        self.fill(&self.function.0, out, inputs)
    }
}
