//! Error types for element-wise mapping operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while validating
//! a configuration, negotiating arity and shape, provisioning an output
//! buffer, or running the mapping loop.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending value (received lengths,
//!   option values, kind names).
//! * **Classified**: Every variant maps to an [`ErrorKind`] so callers can
//!   branch on the category without matching every variant.
//! * **No-std**: Uses `alloc` for dynamic messages.
//!
//! ## Key concepts
//!
//! 1. **Type errors**: Wrong shape for an argument or option.
//! 2. **Arity errors**: Missing inputs, wrong input count, unequal lengths.
//! 3. **Configuration errors**: A kind name with no allocation strategy.
//! 4. **Callback errors**: The mapping function itself failed mid-loop.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Kind
// ============================================================================

/// Coarse classification of an [`ApplyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument or option has the wrong shape.
    Type,
    /// Input count or lengths disagree.
    Arity,
    /// A syntactically valid option names an unsupported kind.
    Configuration,
    /// The mapping function reported a failure.
    Callback,
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for element-wise mapping operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyError {
    /// The configuration candidate is not an object.
    InvalidOptions(String),

    /// A recognized option has a value of the wrong type.
    InvalidOption {
        /// Option name (`dtype` or `out`).
        option: &'static str,
        /// Description of the accepted type.
        expected: &'static str,
        /// Rendering of the value received.
        received: String,
    },

    /// Arity must be a positive integer.
    InvalidArity(usize),

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// The call shape does not match the configured output mode.
    OutputMode {
        /// Whether the configuration expects a caller-supplied output.
        expects_out: bool,
    },

    /// No input buffers were supplied.
    NoInputs,

    /// The number of input buffers differs from the fixed arity.
    ArityMismatch {
        /// Arity fixed at construction.
        expected: usize,
        /// Number of input buffers supplied.
        got: usize,
    },

    /// An input buffer's length differs from the required length.
    MismatchedLengths {
        /// Position of the offending input buffer.
        index: usize,
        /// Required length (first input, or the supplied output).
        expected: usize,
        /// Length of the offending input buffer.
        got: usize,
    },

    /// The requested output kind has no allocation strategy.
    UnsupportedDType(String),

    /// The mapping function failed; the output is written up to `index`.
    Callback {
        /// Element index at which the loop stopped.
        index: usize,
        /// Rendered failure reported by the mapping function.
        message: String,
    },
}

impl ApplyError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOptions(_)
            | Self::InvalidOption { .. }
            | Self::InvalidArity(_)
            | Self::MissingParameter { .. }
            | Self::DuplicateParameter { .. }
            | Self::OutputMode { .. } => ErrorKind::Type,
            Self::NoInputs | Self::ArityMismatch { .. } | Self::MismatchedLengths { .. } => {
                ErrorKind::Arity
            }
            Self::UnsupportedDType(_) => ErrorKind::Configuration,
            Self::Callback { .. } => ErrorKind::Callback,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for ApplyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidOptions(value) => {
                write!(f, "Invalid options: must be an object (received `{value}`)")
            }
            Self::InvalidOption {
                option,
                expected,
                received,
            } => {
                write!(
                    f,
                    "Invalid option `{option}`: must be {expected} (received `{received}`)"
                )
            }
            Self::InvalidArity(arity) => {
                write!(f, "Invalid arity: {arity} (must be a positive integer)")
            }
            Self::MissingParameter { parameter } => {
                write!(f, "Missing parameter '{parameter}'")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::OutputMode { expects_out: true } => {
                write!(f, "Output mode mismatch: an output buffer must be provided")
            }
            Self::OutputMode { expects_out: false } => {
                write!(
                    f,
                    "Output mode mismatch: output buffer provided but `out` is not enabled"
                )
            }
            Self::NoInputs => write!(f, "Insufficient inputs: must provide input buffers"),
            Self::ArityMismatch { expected, got } => {
                write!(f, "Arity mismatch: expected {expected} input buffers, got {got}")
            }
            Self::MismatchedLengths {
                index,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Length mismatch: input {index} has {got} elements, expected {expected}"
                )
            }
            Self::UnsupportedDType(name) => {
                write!(
                    f,
                    "Unsupported dtype: `{name}` has no corresponding buffer kind"
                )
            }
            Self::Callback { index, message } => {
                write!(f, "Mapping function failed at index {index}: {message}")
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for ApplyError {}
