//! Owned numeric buffers of a runtime-selected kind.
//!
//! ## Purpose
//!
//! When the caller does not supply an output buffer, the engine allocates a
//! [`TypedArray`] of the requested [`DType`]. Each variant owns a plain `Vec`
//! of the matching element type.
//!
//! ## Design notes
//!
//! * **Static dispatch**: `zeros` matches on the closed `DType` enum; no
//!   lookup table is involved once the kind is known.
//! * **Zero-initialized**: Fresh arrays are filled with the element default.
//! * **Generic**: The `Generic` variant is a plain `f64` sequence that
//!   stores results without coercion.
//!
//! ## Invariants
//!
//! * `TypedArray::zeros(d, n).dtype() == d` and `.len() == n`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::buffer::{NumericBuffer, OutputBuffer};
use crate::primitives::dtype::DType;
use crate::primitives::element::{Clamped, Element};

// ============================================================================
// TypedArray
// ============================================================================

/// An owned numeric buffer whose element kind is chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    /// `int8` elements.
    Int8(Vec<i8>),
    /// `uint8` elements.
    Uint8(Vec<u8>),
    /// `uint8_clamped` elements.
    Uint8Clamped(Vec<Clamped>),
    /// `int16` elements.
    Int16(Vec<i16>),
    /// `uint16` elements.
    Uint16(Vec<u16>),
    /// `int32` elements.
    Int32(Vec<i32>),
    /// `uint32` elements.
    Uint32(Vec<u32>),
    /// `float32` elements.
    Float32(Vec<f32>),
    /// `float64` elements.
    Float64(Vec<f64>),
    /// Plain sequence.
    Generic(Vec<f64>),
}

/// Apply the same expression to whichever vector a `TypedArray` holds.
macro_rules! each_variant {
    ($array:expr, $v:ident => $body:expr) => {
        match $array {
            TypedArray::Int8($v) => $body,
            TypedArray::Uint8($v) => $body,
            TypedArray::Uint8Clamped($v) => $body,
            TypedArray::Int16($v) => $body,
            TypedArray::Uint16($v) => $body,
            TypedArray::Int32($v) => $body,
            TypedArray::Uint32($v) => $body,
            TypedArray::Float32($v) => $body,
            TypedArray::Float64($v) => $body,
            TypedArray::Generic($v) => $body,
        }
    };
}

impl TypedArray {
    /// Allocate a zero-filled array of `len` elements of kind `dtype`.
    pub fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::Int8 => TypedArray::Int8(vec![0; len]),
            DType::Uint8 => TypedArray::Uint8(vec![0; len]),
            DType::Uint8Clamped => TypedArray::Uint8Clamped(vec![Clamped(0); len]),
            DType::Int16 => TypedArray::Int16(vec![0; len]),
            DType::Uint16 => TypedArray::Uint16(vec![0; len]),
            DType::Int32 => TypedArray::Int32(vec![0; len]),
            DType::Uint32 => TypedArray::Uint32(vec![0; len]),
            DType::Float32 => TypedArray::Float32(vec![0.0; len]),
            DType::Float64 => TypedArray::Float64(vec![0.0; len]),
            DType::Generic => TypedArray::Generic(vec![0.0; len]),
        }
    }

    /// Build an array of kind `dtype` from `f64` values, coercing each one.
    pub fn from_f64s(dtype: DType, values: &[f64]) -> Self {
        let mut array = Self::zeros(dtype, values.len());
        for (i, &v) in values.iter().enumerate() {
            array.set(i, v);
        }
        array
    }

    /// Widen every element to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        each_variant!(self, v => v.iter().map(|e| e.to_f64()).collect())
    }

    /// Borrow the elements as `f64` if this is a `Float64` or `Generic` array.
    pub fn as_f64_slice(&self) -> Option<&[f64]> {
        match self {
            TypedArray::Float64(v) | TypedArray::Generic(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the elements as `f32` if this is a `Float32` array.
    pub fn as_f32_slice(&self) -> Option<&[f32]> {
        match self {
            TypedArray::Float32(v) => Some(v),
            _ => None,
        }
    }
}

impl NumericBuffer for TypedArray {
    fn len(&self) -> usize {
        each_variant!(self, v => v.as_slice().len())
    }

    fn get(&self, index: usize) -> f64 {
        each_variant!(self, v => v[index].to_f64())
    }

    fn dtype(&self) -> DType {
        match self {
            TypedArray::Int8(_) => DType::Int8,
            TypedArray::Uint8(_) => DType::Uint8,
            TypedArray::Uint8Clamped(_) => DType::Uint8Clamped,
            TypedArray::Int16(_) => DType::Int16,
            TypedArray::Uint16(_) => DType::Uint16,
            TypedArray::Int32(_) => DType::Int32,
            TypedArray::Uint32(_) => DType::Uint32,
            TypedArray::Float32(_) => DType::Float32,
            TypedArray::Float64(_) => DType::Float64,
            TypedArray::Generic(_) => DType::Generic,
        }
    }
}

impl OutputBuffer for TypedArray {
    fn set(&mut self, index: usize, value: f64) {
        each_variant!(self, v => v[index] = Element::from_f64(value))
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from_vec {
    ($t:ty, $variant:ident) => {
        impl From<Vec<$t>> for TypedArray {
            fn from(values: Vec<$t>) -> Self {
                TypedArray::$variant(values)
            }
        }
    };
}

impl_from_vec!(i8, Int8);
impl_from_vec!(u8, Uint8);
impl_from_vec!(Clamped, Uint8Clamped);
impl_from_vec!(i16, Int16);
impl_from_vec!(u16, Uint16);
impl_from_vec!(i32, Int32);
impl_from_vec!(u32, Uint32);
impl_from_vec!(f32, Float32);
impl_from_vec!(f64, Float64);

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for TypedArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let prefix = match self.dtype() {
            DType::Int8 => "Int8Array",
            DType::Uint8 => "Uint8Array",
            DType::Uint8Clamped => "Uint8ClampedArray",
            DType::Int16 => "Int16Array",
            DType::Uint16 => "Uint16Array",
            DType::Int32 => "Int32Array",
            DType::Uint32 => "Uint32Array",
            DType::Float32 => "Float32Array",
            DType::Float64 => "Float64Array",
            DType::Generic => "Array",
        };
        write!(f, "{prefix}[")?;
        for i in 0..self.len() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.get(i))?;
        }
        write!(f, "]")
    }
}
