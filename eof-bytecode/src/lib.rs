//! EVM Object Format v1 bytecode model
//!
//! Structured containers and their byte-exact serializer, the opcode
//! metadata table that drives immediate and jump checks, and the closed set
//! of validation failures a conforming validator must be able to report.

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{
    code::{Code, generate_initcode},
    container::{Container, Section, SectionKind, TypeEntry},
    features::Eips,
    layout::ContainerLayout,
    opcodes::{Opcode, OpcodeTable},
};

pub use crate::error::{ContainerError, Result};
pub use crate::validation::ValidationError;

/// First byte of every EOF container, shared with the legacy `INVALID` opcode
pub const EOF_FORMAT_MARKER: u8 = 0xEF;

/// Second magic byte, chosen to avoid clashes with contracts already deployed
pub const EOF_MAGIC: u8 = 0x00;

/// Full two byte magic sequence
pub const EOF_MAGIC_BYTES: [u8; 2] = [EOF_FORMAT_MARKER, EOF_MAGIC];

/// Byte that terminates the section header list
pub const EOF_HEADER_TERMINATOR: u8 = 0x00;

/// Latest existing EOF version
pub const LATEST_EOF_VERSION: u8 = 0x01;

/// Highest section kind understood by version 1
pub const VERSION_MAX_SECTION_KIND: u8 = 3;

/// Upper bound on code sections once functions are enabled
pub const MAX_CODE_SECTIONS: usize = 1024;
