//! Dynamic entry points: map any number of buffers per call.
//!
//! ## Purpose
//!
//! These functions take the mapping function, the input buffers and the
//! configuration on every call. The number of inputs is whatever the caller
//! passes; it only has to be at least one.
//!
//! ## Design notes
//!
//! * **Explicit call shapes**: Allocating calls (`apply`, `apply_with`,
//!   `apply_value`) and in-place calls (`apply_into`, `apply_value_into`) are
//!   separate functions instead of one function guessing what its last
//!   argument is.
//! * **Ordering**: Options are checked first, then input count and lengths,
//!   then the output kind is resolved, then the loop runs.
//! * **Fallible variants**: `try_*` accept mapping functions returning
//!   `Result`; the first failure aborts the loop.
//!
//! ## Invariants
//!
//! * The output has the same length as every input.
//! * `apply_into` returns the same buffer it was given.
//!
//! ## Non-goals
//!
//! * Broadcasting inputs of different lengths.

// External dependencies
use core::fmt::Display;
use serde_json::Value;
use tracing::trace;

// Internal dependencies
use crate::engine::executor::MapExecutor;
use crate::engine::options::ApplyOptions;
use crate::primitives::array::TypedArray;
use crate::primitives::buffer::{NumericBuffer, OutputBuffer};
use crate::primitives::errors::ApplyError;

// ============================================================================
// Allocating Calls
// ============================================================================

/// Map `f` over `inputs` into a new `float64` array.
pub fn apply<F>(f: F, inputs: &[&dyn NumericBuffer]) -> Result<TypedArray, ApplyError>
where
    F: Fn(&[f64]) -> f64,
{
    apply_with(f, inputs, &ApplyOptions::default())
}

/// Map `f` over `inputs` into a new array of the kind selected by `options`.
///
/// Fails with [`ApplyError::OutputMode`] when `options.out` is set; use
/// [`apply_into`] to supply the output buffer.
pub fn apply_with<F>(
    f: F,
    inputs: &[&dyn NumericBuffer],
    options: &ApplyOptions,
) -> Result<TypedArray, ApplyError>
where
    F: Fn(&[f64]) -> f64,
{
    try_apply_with(MapExecutor::lift(f), inputs, options)
}

/// Map `f` over `inputs` using a JSON configuration object.
///
/// The object is validated first; only the allocating shape is available
/// here, so `{"out": true}` fails with [`ApplyError::OutputMode`].
pub fn apply_value<F>(
    f: F,
    inputs: &[&dyn NumericBuffer],
    config: &Value,
) -> Result<TypedArray, ApplyError>
where
    F: Fn(&[f64]) -> f64,
{
    let options = ApplyOptions::from_value(config)?;
    apply_with(f, inputs, &options)
}

/// Fallible form of [`apply_with`].
pub fn try_apply_with<F, E>(
    f: F,
    inputs: &[&dyn NumericBuffer],
    options: &ApplyOptions,
) -> Result<TypedArray, ApplyError>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: Display,
{
    if options.out {
        return Err(ApplyError::OutputMode { expects_out: true });
    }
    trace!(arity = inputs.len(), "dynamic apply");
    MapExecutor::map_alloc(&f, inputs, options.dtype.as_ref())
}

// ============================================================================
// In-Place Calls
// ============================================================================

/// Map `f` over `inputs`, writing into `out`, and return `out`.
///
/// Every input must have `out.len()` elements. Results are coerced to the
/// element kind of `out`.
pub fn apply_into<'o, F, O>(
    f: F,
    out: &'o mut O,
    inputs: &[&dyn NumericBuffer],
) -> Result<&'o mut O, ApplyError>
where
    F: Fn(&[f64]) -> f64,
    O: OutputBuffer + ?Sized,
{
    try_apply_into(MapExecutor::lift(f), out, inputs)
}

/// Map `f` over `inputs` into `out` using a JSON configuration object.
///
/// The object must set `"out": true`; any `dtype` it carries is validated
/// for shape but otherwise ignored, since `out` fixes the element kind.
pub fn apply_value_into<'o, F, O>(
    f: F,
    out: &'o mut O,
    inputs: &[&dyn NumericBuffer],
    config: &Value,
) -> Result<&'o mut O, ApplyError>
where
    F: Fn(&[f64]) -> f64,
    O: OutputBuffer + ?Sized,
{
    let options = ApplyOptions::from_value(config)?;
    if !options.out {
        return Err(ApplyError::OutputMode { expects_out: false });
    }
    apply_into(f, out, inputs)
}

/// Fallible form of [`apply_into`].
///
/// On failure `out` holds results for every index before the failing one.
pub fn try_apply_into<'o, F, O, E>(
    f: F,
    out: &'o mut O,
    inputs: &[&dyn NumericBuffer],
) -> Result<&'o mut O, ApplyError>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    O: OutputBuffer + ?Sized,
    E: Display,
{
    trace!(arity = inputs.len(), len = out.len(), "dynamic apply into");
    MapExecutor::map_into(&f, inputs, out)
}
