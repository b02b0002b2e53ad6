//! Error types for tilemul operations.
//!
//! Configuration and caller-contract mistakes surface through these types
//! from the checked entry points; the unchecked fast paths treat them as
//! programmer errors and do not report them.

use std::fmt;

/// Errors that can occur while setting up or validating a GEMM call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GemmError {
    /// Workspace layout parameters are invalid or exceed the configured
    /// maximum. This is a configuration error and is detected at setup,
    /// before any compute begins.
    Layout {
        /// The total size implied by the blocking parameters.
        size: usize,
        /// The alignment in effect.
        alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// An aligned allocation could not be described.
    Allocation {
        /// The size that was requested to be allocated.
        requested_size: usize,
        /// The alignment that was requested.
        requested_alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Caller-contract violation: mismatched dimensions, insufficient
    /// buffer capacity, or a stride smaller than the logical width.
    Validation {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for GemmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GemmError::Layout {
                size,
                alignment,
                message,
            } => write!(
                f,
                "Invalid workspace layout: {} (size: {}, alignment: {})",
                message, size, alignment
            ),
            GemmError::Allocation {
                requested_size,
                requested_alignment,
                message,
            } => write!(
                f,
                "Memory allocation failed: {} (requested {} bytes with {} byte alignment)",
                message, requested_size, requested_alignment
            ),
            GemmError::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for GemmError {}

/// Result type alias for tilemul operations.
pub type Result<T> = std::result::Result<T, GemmError>;

/// Creates a layout error.
pub fn layout_error(size: usize, alignment: usize, message: impl Into<String>) -> GemmError {
    GemmError::Layout {
        size,
        alignment,
        message: message.into(),
    }
}

/// Creates an allocation error.
pub fn allocation_error(size: usize, alignment: usize, message: impl Into<String>) -> GemmError {
    GemmError::Allocation {
        requested_size: size,
        requested_alignment: alignment,
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> GemmError {
    GemmError::Validation {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display() {
        let error = layout_error(1 << 30, 128, "exceeds maximum workspace size");
        let display = format!("{}", error);
        assert!(display.contains("Invalid workspace layout"));
        assert!(display.contains("exceeds maximum workspace size"));
        assert!(display.contains("alignment: 128"));
    }

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(1024, 128, "out of memory");
        let display = format!("{}", error);
        assert!(display.contains("Memory allocation failed"));
        assert!(display.contains("1024 bytes"));
        assert!(display.contains("128 byte alignment"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("leading dimension smaller than column count");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("leading dimension"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = validation_error("test");
        let error2 = validation_error("test");
        let error3 = validation_error("other");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = layout_error(0, 0, "test error");

        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
