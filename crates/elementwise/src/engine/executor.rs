//! Execution engine for element-wise mapping.
//!
//! ## Purpose
//!
//! This module provides the core loop shared by every entry point: gather
//! the i-th element of each input into a row, call the mapping function with
//! that row, and store the result at index i of the output. It also
//! provisions a fresh output buffer when the caller did not supply one.
//!
//! ## Design notes
//!
//! * Validation happens in full before the first write; the loop itself
//!   assumes the call shape is sound.
//! * The row slot is allocated once per call and reused for every index.
//! * The loop is fallible so that mapping functions returning `Result` share
//!   it; infallible functions are lifted into it with `Infallible`.
//!
//! ## Invariants
//!
//! * All inputs and the output have the same length when the loop starts.
//! * Inputs are read in positional order.
//! * When the mapping function fails at index i, elements `0..i` of the
//!   output hold results and elements `i..` are left as they were.
//!
//! ## Non-goals
//!
//! * This module does not validate options or shapes (handled by `validator`).
//! * This module does not roll back partially written outputs.
//! * This module does not parallelize or vectorize the loop.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;
#[cfg(feature = "std")]
use std::string::ToString;

// External dependencies
use core::convert::Infallible;
use core::fmt::Display;
use tracing::{debug, warn};

// Internal dependencies
use crate::engine::options::{DTypeSpec, OutputMode};
use crate::engine::validator::Validator;
use crate::primitives::array::TypedArray;
use crate::primitives::buffer::{NumericBuffer, OutputBuffer, Row};
use crate::primitives::dtype::DType;
use crate::primitives::errors::ApplyError;

// ============================================================================
// Executor
// ============================================================================

/// Core mapping loop and output provisioning.
pub struct MapExecutor;

impl MapExecutor {
    /// Allocate a zero-filled output of `dtype` and `len` elements.
    pub fn provision(dtype: DType, len: usize) -> TypedArray {
        debug!(dtype = %dtype, len, "allocating output buffer");
        TypedArray::zeros(dtype, len)
    }

    /// Lift an infallible mapping function into the fallible loop signature.
    pub fn lift<F>(f: F) -> impl Fn(&[f64]) -> Result<f64, Infallible>
    where
        F: Fn(&[f64]) -> f64,
    {
        move |row: &[f64]| Ok(f(row))
    }

    /// Run a fallible mapping function over validated inputs.
    ///
    /// Stops at the first failure and returns its index with the error.
    pub fn run_fallible<F, O, E>(
        f: &F,
        inputs: &[&dyn NumericBuffer],
        out: &mut O,
    ) -> Result<(), (usize, E)>
    where
        F: Fn(&[f64]) -> Result<f64, E> + ?Sized,
        O: OutputBuffer + ?Sized,
    {
        let len = out.len();
        let mut row = Row::new(inputs.len());

        for i in 0..len {
            let value = f(row.gather(inputs, i)).map_err(|e| (i, e))?;
            out.set(i, value);
        }

        Ok(())
    }

    // ========================================================================
    // Validated Entry Points
    // ========================================================================

    /// Validate inputs, allocate an output of the requested kind, and fill it.
    ///
    /// The kind is resolved after the inputs are validated; `None` selects
    /// `float64`.
    pub fn map_alloc<F, E>(
        f: &F,
        inputs: &[&dyn NumericBuffer],
        dtype: Option<&DTypeSpec>,
    ) -> Result<TypedArray, ApplyError>
    where
        F: Fn(&[f64]) -> Result<f64, E> + ?Sized,
        E: Display,
    {
        let len = Validator::validate_inputs(inputs, None)?;
        let dtype = match dtype {
            Some(spec) => spec.resolve()?,
            None => DType::default(),
        };
        let mut out = Self::provision(dtype, len);
        Self::run_fallible(f, inputs, &mut out).map_err(Self::callback_error)?;
        Ok(out)
    }

    /// Validate inputs against a supplied output and fill it in place.
    pub fn map_into<'o, F, O, E>(
        f: &F,
        inputs: &[&dyn NumericBuffer],
        out: &'o mut O,
    ) -> Result<&'o mut O, ApplyError>
    where
        F: Fn(&[f64]) -> Result<f64, E> + ?Sized,
        O: OutputBuffer + ?Sized,
        E: Display,
    {
        Validator::validate_inputs(inputs, Some(out.len()))?;
        Self::run_fallible(f, inputs, out).map_err(Self::callback_error)?;
        Ok(out)
    }

    /// Resolve the output of an allocating call from its mode.
    pub fn allocation_dtype(mode: OutputMode) -> Result<DType, ApplyError> {
        match mode {
            OutputMode::Allocate(dtype) => Ok(dtype),
            OutputMode::Provided => Err(ApplyError::OutputMode { expects_out: true }),
        }
    }

    /// Check that a call supplying an output is allowed by its mode.
    pub fn require_provided(mode: OutputMode) -> Result<(), ApplyError> {
        match mode {
            OutputMode::Provided => Ok(()),
            OutputMode::Allocate(_) => Err(ApplyError::OutputMode { expects_out: false }),
        }
    }

    fn callback_error<E: Display>((index, err): (usize, E)) -> ApplyError {
        warn!(index, error = %err, "mapping function failed; output left partially written");
        ApplyError::Callback {
            index,
            message: err.to_string(),
        }
    }
}
