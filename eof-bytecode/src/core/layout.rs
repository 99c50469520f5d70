//! Structural reader for container bytes
//!
//! Splits bytes back into magic, version, section headers, bodies and
//! trailing garbage by trusting the size fields. This is not a validator:
//! unknown kinds, duplicate sections and mismatched versions are all read
//! back as they are. A kind byte of `0x00` always ends the header list.

use crate::core::container::{Container, Section, SectionKind};
use crate::error::{ContainerError, Result};
use crate::{EOF_FORMAT_MARKER, EOF_HEADER_TERMINATOR};
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub kind: SectionKind,
    pub size: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLayout {
    pub magic: u8,
    pub version: u8,
    pub headers: Vec<SectionHeader>,
    pub bodies: Vec<Vec<u8>>,
    /// Bytes left over after the last body
    pub trailing: Vec<u8>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8]> {
        let end = self.offset + n;
        if end > self.bytes.len() {
            return Err(ContainerError::Truncated {
                offset: self.offset,
                what,
            });
        }
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn byte(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.offset..];
        self.offset = self.bytes.len();
        rest
    }
}

impl ContainerLayout {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader { bytes, offset: 0 };

        let marker = reader.byte("format marker")?;
        if marker != EOF_FORMAT_MARKER {
            return Err(ContainerError::NotAContainer {
                expected: EOF_FORMAT_MARKER,
                found: marker,
            });
        }
        let magic = reader.byte("magic")?;
        let version = reader.byte("version")?;

        let mut headers = Vec::new();
        loop {
            let kind = reader.byte("section kind")?;
            if kind == EOF_HEADER_TERMINATOR {
                break;
            }
            let size = BigEndian::read_u16(reader.take(2, "section size")?);
            headers.push(SectionHeader {
                kind: SectionKind(kind),
                size,
            });
        }

        let bodies = headers
            .iter()
            .map(|h| reader.take(h.size as usize, "section body").map(<[u8]>::to_vec))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            magic,
            version,
            headers,
            bodies,
            trailing: reader.rest().to_vec(),
        })
    }

    /// Rebuild a container whose sections carry the parsed bodies
    pub fn to_container(&self) -> Container {
        let sections = self
            .headers
            .iter()
            .zip(&self.bodies)
            .map(|(h, body)| Section::new(h.kind, body.clone()))
            .collect();
        let mut container = Container::new(sections)
            .with_magic(self.magic)
            .with_version(self.version);
        if !self.trailing.is_empty() {
            container = container.with_trailing_bytes(self.trailing.clone());
        }
        container
    }

    pub fn total_len(&self) -> usize {
        3 + 3 * self.headers.len()
            + 1
            + self.bodies.iter().map(Vec::len).sum::<usize>()
            + self.trailing.len()
    }
}

impl fmt::Display for ContainerLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "magic:   {:#04x}", self.magic)?;
        writeln!(f, "version: {:#04x}", self.version)?;
        for (i, (header, body)) in self.headers.iter().zip(&self.bodies).enumerate() {
            writeln!(
                f,
                "section {i}: {} size={} body=0x{}",
                header.kind,
                header.size,
                hex::encode(body)
            )?;
        }
        if !self.trailing.is_empty() {
            writeln!(f, "trailing: 0x{}", hex::encode(&self.trailing))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::code::Code;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_code_and_data() {
        let bytes = Code::from_hex("ef00 01 01 0001 02 0002 00 fe aabb").unwrap().to_bytes();
        let layout = ContainerLayout::parse(&bytes).unwrap();

        assert_eq!(layout.magic, 0x00);
        assert_eq!(layout.version, 0x01);
        assert_eq!(
            layout.headers,
            vec![
                SectionHeader { kind: SectionKind::CODE, size: 1 },
                SectionHeader { kind: SectionKind::DATA, size: 2 },
            ]
        );
        assert_eq!(layout.bodies, vec![vec![0xFE], vec![0xAA, 0xBB]]);
        assert!(layout.trailing.is_empty());
        assert_eq!(layout.total_len(), bytes.len());
    }

    #[test]
    fn test_parse_keeps_trailing_bytes() {
        let bytes = Code::from_hex("ef00 01 01 0001 00 00 deadbeef").unwrap().to_bytes();
        let layout = ContainerLayout::parse(&bytes).unwrap();
        assert_eq!(layout.trailing, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(layout.to_container().assemble(), bytes);
    }

    #[test]
    fn test_parse_truncated_body() {
        let bytes = Code::from_hex("ef00 01 01 0002 00 00").unwrap().to_bytes();
        assert_eq!(
            ContainerLayout::parse(&bytes),
            Err(ContainerError::Truncated {
                offset: 7,
                what: "section body"
            })
        );
    }

    #[test]
    fn test_parse_rejects_legacy_code() {
        assert_eq!(
            ContainerLayout::parse(&[0x60, 0x00]),
            Err(ContainerError::NotAContainer {
                expected: 0xEF,
                found: 0x60
            })
        );
    }
}
