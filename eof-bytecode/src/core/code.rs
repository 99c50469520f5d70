//! Code values: raw bytecode or a structured container
//!
//! Anything that can end up as bytes inside a fixture is a [`Code`]. A
//! container nested inside a section is just another `Code` value, resolved
//! to bytes through [`Code::to_bytes`].

use crate::core::container::Container;
use crate::core::opcodes::Opcode;
use crate::error::{ContainerError, Result};
use byteorder::{BigEndian, ByteOrder};
use std::fmt;
use std::ops::Add;

/// Length of the legacy deployment prefix emitted by [`generate_initcode`]
pub const INITCODE_TEMPLATE_LENGTH: u8 = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    Raw(Vec<u8>),
    Container(Box<Container>),
}

impl Code {
    pub fn empty() -> Self {
        Code::Raw(Vec::new())
    }

    /// Parse hex text such as `"0x60 00 00"`; whitespace is ignored and the
    /// `0x` prefix is optional
    pub fn from_hex(input: &str) -> Result<Self> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let digits = compact.strip_prefix("0x").unwrap_or(&compact);
        hex::decode(digits)
            .map(Code::Raw)
            .map_err(|e| ContainerError::InvalidHex {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Code::Raw(bytes) => bytes.clone(),
            Code::Container(container) => container.assemble(),
        }
    }

    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    pub fn len(&self) -> usize {
        match self {
            Code::Raw(bytes) => bytes.len(),
            Code::Container(container) => container.assemble().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Code {
    fn default() -> Self {
        Code::empty()
    }
}

impl From<Vec<u8>> for Code {
    fn from(bytes: Vec<u8>) -> Self {
        Code::Raw(bytes)
    }
}

impl From<&[u8]> for Code {
    fn from(bytes: &[u8]) -> Self {
        Code::Raw(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Code {
    fn from(bytes: [u8; N]) -> Self {
        Code::Raw(bytes.to_vec())
    }
}

impl From<Container> for Code {
    fn from(container: Container) -> Self {
        Code::Container(Box::new(container))
    }
}

impl From<Opcode> for Code {
    fn from(opcode: Opcode) -> Self {
        Code::Raw(vec![opcode.value])
    }
}

/// Concatenation always yields raw bytes
impl<T: Into<Code>> Add<T> for Code {
    type Output = Code;

    fn add(self, other: T) -> Code {
        let mut bytes = self.to_bytes();
        bytes.extend(other.into().to_bytes());
        Code::Raw(bytes)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Legacy initcode that deploys `code` as the contract's runtime code
///
/// Layout: `PUSH2 len, PUSH1 0, DUP2, PUSH1 11, DUP3, CODECOPY, RETURN`
/// followed by the payload, which is copied from the initcode's own tail.
pub fn generate_initcode(code: &Code) -> Result<Code> {
    let payload = code.to_bytes();
    let len = u16::try_from(payload.len())
        .map_err(|_| ContainerError::PayloadTooLarge { len: payload.len() })?;

    let mut initcode = Vec::with_capacity(INITCODE_TEMPLATE_LENGTH as usize + payload.len());
    // PUSH2: length of the payload
    let mut len_bytes = [0u8; 2];
    BigEndian::write_u16(&mut len_bytes, len);
    initcode.extend(Opcode::PUSH2.with_immediate(&len_bytes));
    // PUSH1: source/destination offset 0
    initcode.extend(Opcode::PUSH1.with_immediate(&[0x00]));
    initcode.push(Opcode::DUP2.value);
    // PUSH1: payload starts right after this template
    initcode.extend(Opcode::PUSH1.with_immediate(&[INITCODE_TEMPLATE_LENGTH]));
    initcode.push(Opcode::DUP3.value);
    // CODECOPY(destOffset=0, offset=11, length)
    initcode.push(Opcode::CODECOPY.value);
    // RETURN(offset=0, length)
    initcode.push(Opcode::RETURN.value);
    debug_assert_eq!(initcode.len(), INITCODE_TEMPLATE_LENGTH as usize);

    initcode.extend(payload);
    Ok(Code::Raw(initcode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_hex() {
        assert_eq!(Code::from_hex("").unwrap(), Code::empty());
        assert_eq!(Code::from_hex("0x").unwrap(), Code::empty());
        assert_eq!(Code::from_hex("0x01").unwrap(), Code::Raw(vec![0x01]));
        assert_eq!(Code::from_hex("01").unwrap(), Code::Raw(vec![0x01]));
        assert_eq!(
            Code::from_hex("0x 60 00\n 00").unwrap(),
            Code::Raw(vec![0x60, 0x00, 0x00])
        );
        assert!(matches!(
            Code::from_hex("0xabc"),
            Err(ContainerError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_concatenation() {
        let code = Code::from(Opcode::ORIGIN) + Opcode::STOP + vec![0xAA];
        assert_eq!(code.to_bytes(), vec![0x32, 0x00, 0xAA]);
        assert_eq!(code.to_hex(), "0x3200aa");
    }

    #[test]
    fn test_initcode_template_length() {
        let initcode = generate_initcode(&Code::empty()).unwrap();
        assert_eq!(initcode.len(), INITCODE_TEMPLATE_LENGTH as usize);
        // The PUSH1 argument points exactly past the template
        assert_eq!(initcode.to_bytes()[7], initcode.len() as u8);
    }

    #[test]
    fn test_initcode_single_byte_payload() {
        let initcode = generate_initcode(&Code::Raw(vec![0x00])).unwrap();
        assert_eq!(
            initcode,
            Code::from_hex("0x 610001 6000 81 600B 82 39 F3 00").unwrap()
        );
    }

    #[test]
    fn test_initcode_large_payload() {
        let payload = Code::Raw(vec![0xFF; 1000]);
        let initcode = generate_initcode(&payload).unwrap().to_bytes();
        assert_eq!(&initcode[..11], &hex::decode("6103e8600081600b8239f3").unwrap()[..]);
        assert_eq!(&initcode[11..], &[0xFF; 1000][..]);

        let max = Code::Raw(vec![0x00; 0xFFFF]);
        assert!(generate_initcode(&max).is_ok());
    }

    #[test]
    fn test_initcode_rejects_oversized_payload() {
        let payload = Code::Raw(vec![0x00; 0x10000]);
        assert_eq!(
            generate_initcode(&payload),
            Err(ContainerError::PayloadTooLarge { len: 0x10000 })
        );
    }
}
