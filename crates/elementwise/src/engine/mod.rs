//! Layer 2: Engine
//!
//! # Purpose
//!
//! This layer validates call shapes, provisions output buffers and runs the
//! element-wise mapping loop shared by every entry point.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Adapters
//!   ↓
//! Layer 2: Engine ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Core mapping loop.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Mapping options.
pub mod options;
