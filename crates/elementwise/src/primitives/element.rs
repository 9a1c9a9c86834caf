//! Scalar element types and their storage coercion rules.
//!
//! ## Purpose
//!
//! Mapping functions work on `f64` scalars. This module defines how each
//! element kind widens to `f64` when read and how an `f64` result narrows
//! back when stored.
//!
//! ## Design notes
//!
//! * **Integer kinds**: Non-finite values store as 0; finite values are
//!   truncated toward zero and wrapped modulo 2^bits.
//! * **Clamped kind**: Values clamp to [0, 255] and round half to even;
//!   NaN stores as 0.
//! * **Float kinds**: `f32` rounds to nearest; `f64` stores as-is.
//! * **No-std**: Rounding goes through `num_traits::Float` (backed by `libm`).
//!
//! ## Invariants
//!
//! * `E::from_f64(e.to_f64()) == e` for every representable element `e`.
//! * Coercion never panics.

// External dependencies
use core::fmt::Debug;
use num_traits::{Float, ToPrimitive};

// Internal dependencies
use crate::primitives::dtype::DType;

// ============================================================================
// Element Trait
// ============================================================================

/// A scalar that can live in a numeric buffer.
pub trait Element: Copy + Default + Debug + PartialEq + 'static {
    /// Kind reported by buffers of this element.
    const DTYPE: DType;

    /// Narrow an `f64` to this element using the kind's storage rule.
    fn from_f64(value: f64) -> Self;

    /// Widen this element to `f64`.
    fn to_f64(self) -> f64;
}

/// Truncate toward zero and wrap into `[0, 2^bits)`; non-finite becomes 0.
#[inline]
fn wrap_unsigned(value: f64, bits: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let modulus = (1u64 << bits) as f64;
    let r = Float::trunc(value) % modulus;
    if r < 0.0 {
        r + modulus
    } else {
        r
    }
}

/// Like [`wrap_unsigned`], then reinterpret the upper half as negative.
#[inline]
fn wrap_signed(value: f64, bits: u32) -> f64 {
    let r = wrap_unsigned(value, bits);
    let half = (1u64 << (bits - 1)) as f64;
    if r >= half {
        r - 2.0 * half
    } else {
        r
    }
}

macro_rules! impl_integer_element {
    ($t:ty, $dtype:expr, $wrap:ident, $bits:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn from_f64(value: f64) -> Self {
                $wrap(value, $bits) as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_integer_element!(i8, DType::Int8, wrap_signed, 8);
impl_integer_element!(u8, DType::Uint8, wrap_unsigned, 8);
impl_integer_element!(i16, DType::Int16, wrap_signed, 16);
impl_integer_element!(u16, DType::Uint16, wrap_unsigned, 16);
impl_integer_element!(i32, DType::Int32, wrap_signed, 32);
impl_integer_element!(u32, DType::Uint32, wrap_unsigned, 32);

impl Element for f32 {
    const DTYPE: DType = DType::Float32;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::Float64;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

// ============================================================================
// Clamped
// ============================================================================

/// Unsigned byte that saturates instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Clamped(pub u8);

impl Clamped {
    /// Saturate and round an `f64` into a byte (round half to even).
    pub fn saturate(value: f64) -> Self {
        if value.is_nan() || value <= 0.0 {
            return Clamped(0);
        }
        if value >= 255.0 {
            return Clamped(255);
        }
        let floor = Float::floor(value);
        let rounded = match value - floor {
            d if d < 0.5 => floor,
            d if d > 0.5 => floor + 1.0,
            _ if floor % 2.0 == 0.0 => floor,
            _ => floor + 1.0,
        };
        Clamped(rounded.to_u8().unwrap_or(u8::MAX))
    }
}

impl Element for Clamped {
    const DTYPE: DType = DType::Uint8Clamped;

    #[inline]
    fn from_f64(value: f64) -> Self {
        Clamped::saturate(value)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl From<u8> for Clamped {
    fn from(value: u8) -> Self {
        Clamped(value)
    }
}

impl From<Clamped> for u8 {
    fn from(value: Clamped) -> Self {
        value.0
    }
}
