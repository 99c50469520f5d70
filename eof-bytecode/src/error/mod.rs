//! Error types for container construction and layout reading

use thiserror::Error;

/// Main error type for container operations
///
/// These are programmer errors in fixture construction. Validation failures
/// of the modeled format live in [`crate::ValidationError`] and are data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("Invalid hex code {input:?}: {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("Payload of {len} bytes does not fit the 16-bit initcode length field")]
    PayloadTooLarge { len: usize },

    #[error("Unknown extension identifier: EIP-{0}")]
    UnknownEip(u16),

    #[error("Unexpected end of input at offset {offset:#x} while reading {what}")]
    Truncated { offset: usize, what: &'static str },

    #[error("Not an EOF container: expected format marker {expected:#04x}, found {found:#04x}")]
    NotAContainer { expected: u8, found: u8 },
}

/// Convenient Result type
pub type Result<T> = std::result::Result<T, ContainerError>;
