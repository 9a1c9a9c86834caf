//! # elementwise — N-ary element-wise mapping over numeric buffers
//!
//! Apply a function of N scalars to N equal-length numeric buffers and
//! collect the results into an output buffer, either freshly allocated with
//! a chosen element kind or supplied by the caller.
//!
//! ## Quick Start
//!
//! ### Dynamic mapping
//!
//! ```rust
//! use elementwise::prelude::*;
//!
//! let a: Vec<i8> = vec![1, 1, 1, 1];
//! let b: Vec<f32> = vec![2.0, 2.0, 2.0, 2.0];
//!
//! // Default output kind is float64
//! let out = apply(|x| x[0] + x[1], &[&a, &b])?;
//! assert_eq!(out, TypedArray::Float64(vec![3.0; 4]));
//!
//! // Select the output kind
//! let out = apply_with(|x| x[0] + 1.0, &[&a], &ApplyOptions::new().dtype(Float32))?;
//! assert_eq!(out, TypedArray::Float32(vec![2.0; 4]));
//! # Result::<(), ApplyError>::Ok(())
//! ```
//!
//! ### Writing into an existing buffer
//!
//! ```rust
//! use elementwise::prelude::*;
//!
//! let a: Vec<u16> = vec![1, 2, 3];
//! let mut out: Vec<u8> = vec![0; 3];
//!
//! apply_into(|x| x[0] * 100.0, &mut out, &[&a])?;
//! assert_eq!(out, vec![100, 200, 44]); // uint8 storage wraps
//! # Result::<(), ApplyError>::Ok(())
//! ```
//!
//! ### Specialized mappers
//!
//! ```rust
//! use elementwise::prelude::*;
//!
//! let add = |x: &[f64]| x[0] + x[1];
//!
//! // Arity and output kind fixed, function bound
//! let mapper = Mapper::new().function(add).arity(2).dtype(Int32).build()?;
//!
//! let a: Vec<u16> = vec![1, 1, 1, 1];
//! let b: Vec<u32> = vec![2, 2, 2, 2];
//! let out = mapper.apply(&[&a, &b])?;
//! assert_eq!(out, TypedArray::Int32(vec![3; 4]));
//!
//! // Wrong number of inputs
//! assert!(matches!(
//!     mapper.apply(&[&a]),
//!     Err(ApplyError::ArityMismatch { expected: 2, got: 1 })
//! ));
//! # Result::<(), ApplyError>::Ok(())
//! ```
//!
//! ### JSON configuration
//!
//! ```rust
//! use elementwise::prelude::*;
//! use serde_json::json;
//!
//! let a: Vec<i8> = vec![1, 1];
//! let out = apply_value(|x| x[0] + 1.0, &[&a], &json!({ "dtype": "uint8_clamped" }))?;
//! assert_eq!(out.dtype(), Uint8Clamped);
//!
//! let err = apply_value(|x| x[0], &[&a], &json!({ "dtype": "beep" })).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Configuration);
//! # Result::<(), ApplyError>::Ok(())
//! ```
//!
//! ## Errors
//!
//! Every entry point returns `Result<_, ApplyError>`. Errors are detected
//! before the first write to the output, except for failures of the mapping
//! function itself (`try_*` entry points), which stop the loop and leave the
//! output written up to the failing index.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Layer 1: Primitives - element kinds, buffers and errors.
mod primitives;

// Layer 2: Engine - validation and the mapping loop.
mod engine;

// Layer 3: Adapters - dynamic and specialized entry points.
mod adapters;

// High-level API and factory builder.
mod api;

// Standard prelude.
pub mod prelude {
    pub use crate::api::{
        apply, apply_into, apply_value, apply_value_into, apply_with, factory, factory_with,
        try_apply_into, try_apply_with, ApplyError, ApplyOptions, Bound, Clamped,
        DType::{
            Float32, Float64, Generic, Int16, Int32, Int8, Uint16, Uint32, Uint8, Uint8Clamped,
        },
        DType, DTypeSpec, Element, ErrorKind, MapperBuilder as Mapper, NumericBuffer,
        OutputBuffer, OutputMode, SpecializedMapper, TypedArray, Unbound,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
