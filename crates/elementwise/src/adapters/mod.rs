//! Layer 3: Adapters
//!
//! # Purpose
//!
//! This layer provides the two ways of calling the engine:
//!
//! - **Dynamic**: function, inputs and configuration supplied on every call
//! - **Specialized**: arity, configuration and optionally the function fixed
//!   once, then reused across calls
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Adapters ← You are here
//!   ↓
//! Layer 2: Engine
//!   ↓
//! Layer 1: Primitives
//! ```

/// Variadic per-call mapping.
pub mod dynamic;

/// Mappers with a fixed arity and configuration.
pub mod specialized;
