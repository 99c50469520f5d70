//! EOF v1 container model and serializer
//!
//! A [`Container`] is transcribed to bytes exactly as described, without
//! validating or repairing anything. Every override field exists so that a
//! fixture can break exactly one rule of the canonical layout:
//!
//! ```text
//! EF 00 | version | (kind size_hi size_lo)* | terminator | bodies* | trailing
//! ```

use crate::core::code::Code;
use crate::{
    EOF_FORMAT_MARKER, EOF_HEADER_TERMINATOR, EOF_MAGIC, LATEST_EOF_VERSION,
    VERSION_MAX_SECTION_KIND,
};
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// Section kind byte
///
/// Kept as a raw byte so that kinds outside the defined set can be written
/// into headers for negative fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKind(pub u8);

impl SectionKind {
    pub const CODE: SectionKind = SectionKind(1);
    pub const DATA: SectionKind = SectionKind(2);
    pub const TYPE: SectionKind = SectionKind(3);

    pub fn is_known(&self) -> bool {
        (1..=VERSION_MAX_SECTION_KIND).contains(&self.0)
    }
}

impl From<u8> for SectionKind {
    fn from(value: u8) -> Self {
        SectionKind(value)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SectionKind::CODE => f.write_str("code"),
            SectionKind::DATA => f.write_str("data"),
            SectionKind::TYPE => f.write_str("type"),
            SectionKind(other) => write!(f, "unknown({other:#04x})"),
        }
    }
}

/// One entry of a type section: function inputs, outputs and stack bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeEntry {
    pub inputs: u8,
    pub outputs: u8,
    pub max_stack_height: u16,
}

impl TypeEntry {
    pub const ENCODED_LEN: usize = 4;

    pub fn new(inputs: u8, outputs: u8, max_stack_height: u16) -> Self {
        Self {
            inputs,
            outputs,
            max_stack_height,
        }
    }

    pub fn encode(&self) -> [u8; 4] {
        let mut bytes = [self.inputs, self.outputs, 0, 0];
        BigEndian::write_u16(&mut bytes[2..], self.max_stack_height);
        bytes
    }
}

/// What a section contributes to the byte stream
#[derive(Debug, Clone, PartialEq, Eq)]
enum SectionBody {
    /// Body emitted, header size taken from its length
    Data(Code),
    /// Header only, no body emitted
    SizeOnly(u32),
    /// Body emitted under a header size that may not match it
    Sized(Code, u32),
}

/// A typed region of a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    kind: SectionKind,
    body: SectionBody,
}

impl Section {
    pub fn new(kind: impl Into<SectionKind>, data: impl Into<Code>) -> Self {
        Self {
            kind: kind.into(),
            body: SectionBody::Data(data.into()),
        }
    }

    pub fn code(data: impl Into<Code>) -> Self {
        Self::new(SectionKind::CODE, data)
    }

    pub fn data(data: impl Into<Code>) -> Self {
        Self::new(SectionKind::DATA, data)
    }

    /// Type section holding `4 * entries.len()` bytes
    pub fn types(entries: &[TypeEntry]) -> Self {
        let body: Vec<u8> = entries.iter().flat_map(TypeEntry::encode).collect();
        Self::new(SectionKind::TYPE, body)
    }

    /// Header-only section: the size is declared but no body is emitted
    pub fn size_only(kind: impl Into<SectionKind>, size: u32) -> Self {
        Self {
            kind: kind.into(),
            body: SectionBody::SizeOnly(size),
        }
    }

    /// Override the size written to the header, independent of the body
    pub fn with_declared_size(mut self, size: u32) -> Self {
        self.body = match self.body {
            SectionBody::Data(code) | SectionBody::Sized(code, _) => SectionBody::Sized(code, size),
            SectionBody::SizeOnly(_) => SectionBody::SizeOnly(size),
        };
        self
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Body contents, `None` for header-only sections
    pub fn contents(&self) -> Option<&Code> {
        match &self.body {
            SectionBody::Data(code) | SectionBody::Sized(code, _) => Some(code),
            SectionBody::SizeOnly(_) => None,
        }
    }

    pub fn declared_size(&self) -> Option<u32> {
        match self.body {
            SectionBody::Data(_) => None,
            SectionBody::SizeOnly(size) | SectionBody::Sized(_, size) => Some(size),
        }
    }

    /// Size written to the header: the declared size if set, else body length
    pub fn header_size(&self) -> u32 {
        match &self.body {
            SectionBody::Data(code) => code.len() as u32,
            SectionBody::SizeOnly(size) | SectionBody::Sized(_, size) => *size,
        }
    }

    /// Kind byte followed by the 16-bit big-endian size
    ///
    /// Sizes above `u16::MAX` are truncated to their low 16 bits.
    pub fn header(&self) -> [u8; 3] {
        let size = self.header_size();
        if size > u16::MAX as u32 {
            tracing::trace!(kind = %self.kind, size, "section size truncated to 16 bits");
        }
        let mut header = [self.kind.0, 0, 0];
        BigEndian::write_u16(&mut header[1..], size as u16);
        header
    }

    /// Bytes emitted in the body area, empty for header-only sections
    pub fn body(&self) -> Vec<u8> {
        self.contents().map(Code::to_bytes).unwrap_or_default()
    }
}

/// EOF v1 container
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Container {
    pub sections: Vec<Section>,
    /// Replaces the second magic byte
    pub magic_override: Option<u8>,
    pub version_override: Option<u8>,
    /// Replaces the header terminator; an empty vector omits it
    pub terminator_override: Option<Vec<u8>>,
    /// Garbage appended after the last section body
    pub trailing_bytes: Option<Vec<u8>>,
    pub name: Option<String>,
}

impl Container {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            ..Default::default()
        }
    }

    pub fn with_magic(mut self, magic: u8) -> Self {
        self.magic_override = Some(magic);
        self
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version_override = Some(version);
        self
    }

    pub fn with_terminator(mut self, terminator: impl Into<Vec<u8>>) -> Self {
        self.terminator_override = Some(terminator.into());
        self
    }

    pub fn without_terminator(self) -> Self {
        self.with_terminator(Vec::new())
    }

    pub fn with_trailing_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.trailing_bytes = Some(bytes.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn magic(&self) -> u8 {
        self.magic_override.unwrap_or(EOF_MAGIC)
    }

    pub fn version(&self) -> u8 {
        self.version_override.unwrap_or(LATEST_EOF_VERSION)
    }

    pub fn terminator(&self) -> &[u8] {
        match &self.terminator_override {
            Some(terminator) => terminator,
            None => std::slice::from_ref(&EOF_HEADER_TERMINATOR),
        }
    }

    /// Bytes before the first section body
    pub fn header(&self) -> Vec<u8> {
        let mut header = Vec::with_capacity(3 + 3 * self.sections.len() + 1);
        header.push(EOF_FORMAT_MARKER);
        header.push(self.magic());
        header.push(self.version());
        for section in &self.sections {
            header.extend_from_slice(&section.header());
        }
        header.extend_from_slice(self.terminator());
        header
    }

    /// Serialize the container exactly as described, valid or not
    pub fn assemble(&self) -> Vec<u8> {
        let mut bytes = self.header();
        for section in &self.sections {
            bytes.extend(section.body());
        }
        if let Some(trailing) = &self.trailing_bytes {
            bytes.extend_from_slice(trailing);
        }
        bytes
    }

    /// Total length implied by the header: header bytes plus every size field
    ///
    /// Differs from `assemble().len()` whenever a declared size disagrees with
    /// the body or trailing bytes are present.
    pub fn declared_len(&self) -> usize {
        self.header().len()
            + self
                .sections
                .iter()
                .map(|s| (s.header_size() & 0xFFFF) as usize)
                .sum::<usize>()
    }

    pub fn count_sections(&self, kind: SectionKind) -> usize {
        self.sections.iter().filter(|s| s.kind() == kind).count()
    }
}
