//! Numeric element kinds and the name-to-kind resolver.
//!
//! ## Purpose
//!
//! This module defines the closed set of numeric kinds an output buffer can be
//! allocated with, and the lookup table that maps kind names (as they appear
//! in configuration objects) to those kinds.
//!
//! ## Design notes
//!
//! * **Closed**: Every supported kind is a `DType` variant, so allocation is
//!   dispatched statically once a kind is known.
//! * **Runtime fallback**: Names are only consulted when a kind arrives as a
//!   string (e.g. from a JSON configuration).
//! * **Serde**: Serializes as its lowercase name, matching the lookup table.
//!
//! ## Invariants
//!
//! * `DType::from_name(k.name()) == Some(k)` for every kind `k`.
//! * Unknown names resolve to `None`; the caller decides how to report it.
//!
//! ## Non-goals
//!
//! * This module does not allocate buffers (see `array`).
//! * This module does not coerce values (see `element`).

// External dependencies
use core::fmt::{Display, Formatter, Result};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::ApplyError;

// ============================================================================
// DType
// ============================================================================

/// Numeric element kind of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer (wrapping).
    Uint8,
    /// Unsigned 8-bit integer (clamping, round half to even).
    Uint8Clamped,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// 32-bit IEEE float.
    Float32,
    /// 64-bit IEEE float.
    #[default]
    Float64,
    /// Plain sequence; values are stored without coercion.
    Generic,
}

/// Name table used to resolve kinds given as strings.
const DTYPE_TABLE: [(&str, DType); 10] = [
    ("int8", DType::Int8),
    ("uint8", DType::Uint8),
    ("uint8_clamped", DType::Uint8Clamped),
    ("int16", DType::Int16),
    ("uint16", DType::Uint16),
    ("int32", DType::Int32),
    ("uint32", DType::Uint32),
    ("float32", DType::Float32),
    ("float64", DType::Float64),
    ("generic", DType::Generic),
];

impl DType {
    /// All supported kinds, in table order.
    pub const ALL: [DType; 10] = [
        DType::Int8,
        DType::Uint8,
        DType::Uint8Clamped,
        DType::Int16,
        DType::Uint16,
        DType::Int32,
        DType::Uint32,
        DType::Float32,
        DType::Float64,
        DType::Generic,
    ];

    /// Resolve a kind from its name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<DType> {
        DTYPE_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, dtype)| dtype)
    }

    /// Canonical lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            DType::Int8 => "int8",
            DType::Uint8 => "uint8",
            DType::Uint8Clamped => "uint8_clamped",
            DType::Int16 => "int16",
            DType::Uint16 => "uint16",
            DType::Int32 => "int32",
            DType::Uint32 => "uint32",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Generic => "generic",
        }
    }

    /// Storage width of one element in bytes.
    pub fn byte_width(self) -> usize {
        match self {
            DType::Int8 | DType::Uint8 | DType::Uint8Clamped => 1,
            DType::Int16 | DType::Uint16 => 2,
            DType::Int32 | DType::Uint32 | DType::Float32 => 4,
            DType::Float64 | DType::Generic => 8,
        }
    }

    /// Whether elements are stored as floating point.
    pub fn is_float(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64 | DType::Generic)
    }

    /// Whether elements can hold negative values.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Float32 | DType::Float64 | DType::Generic
        )
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = ApplyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        DType::from_name(s).ok_or_else(|| ApplyError::UnsupportedDType(s.into()))
    }
}
