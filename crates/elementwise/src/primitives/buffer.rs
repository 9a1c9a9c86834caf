//! Buffer abstractions and scratch space for the mapping loop.
//!
//! ## Purpose
//!
//! This module defines what it means to be "buffer-like": an addressable,
//! length-bearing sequence of numbers with a known element kind. Inputs are
//! read through [`NumericBuffer`]; outputs are written through
//! [`OutputBuffer`]. It also provides the reusable row slot that gathers the
//! i-th element of every input before the mapping function is called.
//!
//! ## Design notes
//!
//! * **Object-safe**: Both traits are used as `&dyn` so heterogeneous inputs
//!   (an `Int8` buffer next to a `Float32` one) fit in one slice.
//! * **Scalar interface**: Reads widen to `f64`, writes narrow from `f64`
//!   using the element's storage rule.
//! * **Fixed length**: No trait method changes a buffer's length.
//!
//! ## Key concepts
//!
//! * **NumericBuffer**: Read side; `len`, `get`, `dtype`.
//! * **OutputBuffer**: Write side; adds `set`.
//! * **Row**: Fixed-size slot holding one gathered row of inputs.
//!
//! ## Invariants
//!
//! * `get(i)` and `set(i, _)` are only called with `i < len()`.
//! * A `Row` keeps one slot per input buffer for the whole loop.
//!
//! ## Non-goals
//!
//! * Broadcasting, strides, or views over part of a buffer.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::Deref;

// Internal dependencies
use crate::primitives::dtype::DType;
use crate::primitives::element::Element;

// ============================================================================
// Buffer Traits
// ============================================================================

/// A fixed-length, index-addressable numeric sequence.
pub trait NumericBuffer {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the buffer holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, widened to `f64`.
    fn get(&self, index: usize) -> f64;

    /// Element kind of this buffer.
    fn dtype(&self) -> DType;
}

/// A numeric buffer that can be written in place.
pub trait OutputBuffer: NumericBuffer {
    /// Store `value` at `index`, coerced to this buffer's element kind.
    fn set(&mut self, index: usize, value: f64);
}

// ============================================================================
// Implementations for Standard Containers
// ============================================================================

impl<E: Element> NumericBuffer for Vec<E> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn get(&self, index: usize) -> f64 {
        self[index].to_f64()
    }

    #[inline]
    fn dtype(&self) -> DType {
        E::DTYPE
    }
}

impl<E: Element> OutputBuffer for Vec<E> {
    #[inline]
    fn set(&mut self, index: usize, value: f64) {
        self[index] = E::from_f64(value);
    }
}

impl<E: Element, const N: usize> NumericBuffer for [E; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> f64 {
        self[index].to_f64()
    }

    #[inline]
    fn dtype(&self) -> DType {
        E::DTYPE
    }
}

impl<E: Element, const N: usize> OutputBuffer for [E; N] {
    #[inline]
    fn set(&mut self, index: usize, value: f64) {
        self[index] = E::from_f64(value);
    }
}

impl<E: Element> NumericBuffer for &[E] {
    #[inline]
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> f64 {
        self[index].to_f64()
    }

    #[inline]
    fn dtype(&self) -> DType {
        E::DTYPE
    }
}

impl<E: Element> NumericBuffer for &mut [E] {
    #[inline]
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> f64 {
        self[index].to_f64()
    }

    #[inline]
    fn dtype(&self) -> DType {
        E::DTYPE
    }
}

impl<E: Element> OutputBuffer for &mut [E] {
    #[inline]
    fn set(&mut self, index: usize, value: f64) {
        self[index] = E::from_f64(value);
    }
}

// ============================================================================
// Row - Gather Slot for the Mapping Loop
// ============================================================================

/// Reusable slot holding the i-th element of every input buffer.
#[derive(Debug, Clone, Default)]
pub struct Row(Vec<f64>);

impl Row {
    /// Create a row with one slot per input buffer.
    #[inline]
    pub fn new(width: usize) -> Self {
        Self(Vec::with_capacity(width))
    }

    /// Overwrite the row with element `index` of each input, in order.
    #[inline]
    pub fn gather(&mut self, inputs: &[&dyn NumericBuffer], index: usize) -> &[f64] {
        self.0.clear();
        self.0.extend(inputs.iter().map(|buffer| buffer.get(index)));
        &self.0
    }
}

impl Deref for Row {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
