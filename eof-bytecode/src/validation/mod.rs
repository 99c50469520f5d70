//! Validation failures a conforming EOF validator must be able to report
//!
//! Fixtures carry one of these as their expected outcome. Nothing in this
//! workspace raises them.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidationError {
    UnexpectedEOF,
    InvalidMagic,
    InvalidVersion,
    MissingTypeHeader,
    InvalidTypeSize,
    MissingCodeHeader,
    InvalidCodeHeader,
    MissingDataHeader,
    MissingTerminator,
    TooManyInputs,
    TooManyOutputs,
    TooLargeMaxStackHeight,
    InvalidSection0Type,
    InvalidCodeSize,
    InvalidContainerSize,
    UndefinedInstruction,
    TruncatedImmediate,
    InvalidSectionArgument,
    InvalidJumpDest,
    ConflictingStack,
    InvalidBranchCount,
    StackUnderflow,
    StackOverflow,
    InvalidOutputs,
    InvalidMaxStackHeight,
    InvalidCodeTermination,
    UnreachableCode,
}

impl ValidationError {
    pub const ALL: [ValidationError; 27] = [
        ValidationError::UnexpectedEOF,
        ValidationError::InvalidMagic,
        ValidationError::InvalidVersion,
        ValidationError::MissingTypeHeader,
        ValidationError::InvalidTypeSize,
        ValidationError::MissingCodeHeader,
        ValidationError::InvalidCodeHeader,
        ValidationError::MissingDataHeader,
        ValidationError::MissingTerminator,
        ValidationError::TooManyInputs,
        ValidationError::TooManyOutputs,
        ValidationError::TooLargeMaxStackHeight,
        ValidationError::InvalidSection0Type,
        ValidationError::InvalidCodeSize,
        ValidationError::InvalidContainerSize,
        ValidationError::UndefinedInstruction,
        ValidationError::TruncatedImmediate,
        ValidationError::InvalidSectionArgument,
        ValidationError::InvalidJumpDest,
        ValidationError::ConflictingStack,
        ValidationError::InvalidBranchCount,
        ValidationError::StackUnderflow,
        ValidationError::StackOverflow,
        ValidationError::InvalidOutputs,
        ValidationError::InvalidMaxStackHeight,
        ValidationError::InvalidCodeTermination,
        ValidationError::UnreachableCode,
    ];

    /// Stable identifier matched against a validator's reported reason
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationError::UnexpectedEOF => "UnexpectedEOF",
            ValidationError::InvalidMagic => "InvalidMagic",
            ValidationError::InvalidVersion => "InvalidVersion",
            ValidationError::MissingTypeHeader => "MissingTypeHeader",
            ValidationError::InvalidTypeSize => "InvalidTypeSize",
            ValidationError::MissingCodeHeader => "MissingCodeHeader",
            ValidationError::InvalidCodeHeader => "InvalidCodeHeader",
            ValidationError::MissingDataHeader => "MissingDataHeader",
            ValidationError::MissingTerminator => "MissingTerminator",
            ValidationError::TooManyInputs => "TooManyInputs",
            ValidationError::TooManyOutputs => "TooManyOutputs",
            ValidationError::TooLargeMaxStackHeight => "TooLargeMaxStackHeight",
            ValidationError::InvalidSection0Type => "InvalidSection0Type",
            ValidationError::InvalidCodeSize => "InvalidCodeSize",
            ValidationError::InvalidContainerSize => "InvalidContainerSize",
            ValidationError::UndefinedInstruction => "UndefinedInstruction",
            ValidationError::TruncatedImmediate => "TruncatedImmediate",
            ValidationError::InvalidSectionArgument => "InvalidSectionArgument",
            ValidationError::InvalidJumpDest => "InvalidJumpDest",
            ValidationError::ConflictingStack => "ConflictingStack",
            ValidationError::InvalidBranchCount => "InvalidBranchCount",
            ValidationError::StackUnderflow => "StackUnderflow",
            ValidationError::StackOverflow => "StackOverflow",
            ValidationError::InvalidOutputs => "InvalidOutputs",
            ValidationError::InvalidMaxStackHeight => "InvalidMaxStackHeight",
            ValidationError::InvalidCodeTermination => "InvalidCodeTermination",
            ValidationError::UnreachableCode => "UnreachableCode",
        }
    }

    /// Reasons that need stack-height analysis; no fixture targets them yet
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            ValidationError::ConflictingStack
                | ValidationError::InvalidBranchCount
                | ValidationError::StackUnderflow
                | ValidationError::StackOverflow
                | ValidationError::InvalidOutputs
                | ValidationError::InvalidMaxStackHeight
                | ValidationError::UnreachableCode
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown validation error identifier: {0}")]
pub struct UnknownValidationError(pub String);

impl FromStr for ValidationError {
    type Err = UnknownValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidationError::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownValidationError(s.to_string()))
    }
}
