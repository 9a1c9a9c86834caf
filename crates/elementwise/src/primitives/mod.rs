//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the element kinds, buffer abstractions, owned arrays
//! and error types used throughout the crate. It has zero internal
//! dependencies outside itself.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Adapters
//!   ↓
//! Layer 2: Engine
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Numeric kinds and the name resolver.
pub mod dtype;

/// Element storage coercion.
pub mod element;

/// Buffer traits and gather scratch.
pub mod buffer;

/// Owned typed arrays.
pub mod array;

/// Shared error types.
pub mod errors;
