//! Code validation: final instructions, undefined bytes and immediates

use super::{RuleResult, code_with_data};
use crate::fixture::Fixture;
use eof_bytecode::{Opcode, OpcodeTable, ValidationError};

/// Code made of a single byte that may not end a code section
///
/// The reason depends on what the byte is: an undefined instruction is
/// reported before its position, and an opcode with an immediate runs out of
/// bytes before it can be checked as the last instruction.
pub(super) fn non_terminating_opcodes(table: &OpcodeTable) -> RuleResult {
    table
        .non_terminating_bytes()
        .into_iter()
        .map(|byte| {
            let error = match table.lookup(byte) {
                None => ValidationError::UndefinedInstruction,
                Some(op) if op.has_immediate() => ValidationError::TruncatedImmediate,
                Some(_) => ValidationError::InvalidCodeTermination,
            };
            let container =
                code_with_data(vec![byte]).named(format!("invalid_terminating_opcode_0x{byte:02x}"));
            Fixture::from_container(container, Some(error))
        })
        .collect()
}

/// Every undefined byte followed by a legal final `STOP`
pub(super) fn undefined_opcodes(table: &OpcodeTable) -> RuleResult {
    table
        .undefined_bytes()
        .into_iter()
        .map(|byte| {
            let container = code_with_data(vec![byte, Opcode::STOP.value])
                .named(format!("undefined_opcode_0x{byte:02x}"));
            Fixture::from_container(container, Some(ValidationError::UndefinedInstruction))
        })
        .collect()
}

/// Immediate operands cut short, or complete but ending the code
pub(super) fn truncated_immediates(table: &OpcodeTable) -> RuleResult {
    let mut fixtures = Vec::new();
    for op in table.immediate_opcodes() {
        let name = |suffix: &str| format!("truncated_opcode_{}_{suffix}", op.name);

        fixtures.push(Fixture::from_container(
            code_with_data(op).named(name("no_data")),
            Some(ValidationError::TruncatedImmediate),
        )?);

        if op.immediate_length > 1 {
            fixtures.push(Fixture::from_container(
                code_with_data(op.with_immediate(&[Opcode::STOP.value])).named(name("one_byte")),
                Some(ValidationError::TruncatedImmediate),
            )?);
        }

        // A relative jump must land on an instruction, so it targets itself
        let code = if op.is_relative_jump() {
            Opcode::relative_jump(-3, op == Opcode::RJUMPI).to_vec()
        } else {
            op.with_immediate(&vec![Opcode::STOP.value; op.immediate_length as usize])
        };
        fixtures.push(Fixture::from_container(
            code_with_data(code).named(name("terminating")),
            Some(ValidationError::InvalidCodeTermination),
        )?);
    }
    Ok(fixtures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eof_bytecode::Eips;
    use pretty_assertions::assert_eq;

    fn outcome_of(fixtures: &[Fixture], name: &str) -> Option<ValidationError> {
        fixtures.iter().find(|f| f.name == name).and_then(|f| f.expected)
    }

    #[test]
    fn test_terminator_reason_depends_on_byte() {
        let fixtures = non_terminating_opcodes(&OpcodeTable::default()).unwrap();
        assert_eq!(fixtures.len(), 250);
        assert_eq!(
            outcome_of(&fixtures, "invalid_terminating_opcode_0x01"),
            Some(ValidationError::InvalidCodeTermination)
        );
        assert_eq!(
            outcome_of(&fixtures, "invalid_terminating_opcode_0x60"),
            Some(ValidationError::TruncatedImmediate)
        );
        assert_eq!(
            outcome_of(&fixtures, "invalid_terminating_opcode_0x0c"),
            Some(ValidationError::UndefinedInstruction)
        );
    }

    #[test]
    fn test_jumps_undefined_without_extension() {
        let table = OpcodeTable::new(Eips::EOF | Eips::CODE_VALIDATION);
        let fixtures = non_terminating_opcodes(&table).unwrap();
        assert_eq!(
            outcome_of(&fixtures, "invalid_terminating_opcode_0x5c"),
            Some(ValidationError::UndefinedInstruction)
        );
        assert!(undefined_opcodes(&table).unwrap().iter().any(|f| f.name == "undefined_opcode_0x5c"));
    }

    #[test]
    fn test_truncated_push2() {
        let fixtures = truncated_immediates(&OpcodeTable::default()).unwrap();
        let bytes_of = |name: &str| {
            fixtures
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.bytes())
                .unwrap()
        };
        // header is 10 bytes, code starts right after it
        assert_eq!(&bytes_of("truncated_opcode_PUSH2_no_data")[10..], &[0x61, 0x00]);
        assert_eq!(&bytes_of("truncated_opcode_PUSH2_one_byte")[10..], &[0x61, 0x00, 0x00]);
        assert_eq!(&bytes_of("truncated_opcode_PUSH2_terminating")[10..], &[0x61, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes_of("truncated_opcode_RJUMPI_terminating")[10..], &[0x5D, 0xFF, 0xFD, 0x00]);
        assert!(!fixtures.iter().any(|f| f.name == "truncated_opcode_PUSH1_one_byte"));
    }
}
