//! Static relative jumps
//!
//! Offsets are relative to the byte following the 3-byte jump instruction,
//! so `RJUMP 0` falls through and `RJUMP -3` loops on itself.

use super::{RuleResult, code_with_data};
use crate::fixture::Fixture;
use eof_bytecode::{Code, Opcode, OpcodeTable, ValidationError};

fn rjump(offset: i16) -> Code {
    Opcode::relative_jump(offset, false).into()
}

fn rjumpi(offset: i16) -> Code {
    Opcode::relative_jump(offset, true).into()
}

fn push1(value: u8) -> Code {
    Opcode::PUSH1.with_immediate(&[value]).into()
}

pub(super) fn valid_relative_jumps(_: &OpcodeTable) -> RuleResult {
    let stop = Opcode::STOP;
    let cases = [
        ("zero_relative_jump", rjump(0) + stop),
        ("minus_three_relative_jump", rjump(-3) + stop),
        ("one_relative_jump_to_jumpdest", rjump(1) + stop + Opcode::JUMPDEST + stop),
        ("one_relative_jump_to_stop", rjump(1) + stop + stop),
        ("relative_jump_to_relative_jump", rjump(1) + stop + rjump(-4) + stop),
        ("zero_conditional_relative_jump", push1(1) + rjumpi(0) + stop),
    ];

    cases
        .into_iter()
        .map(|(name, code)| {
            Fixture::from_container(code_with_data(code).named(format!("valid_rjump_{name}")), None)
        })
        .collect()
}

/// Jump targets before the code, past its end or inside an immediate
pub(super) fn invalid_relative_jumps(_: &OpcodeTable) -> RuleResult {
    let stop = Opcode::STOP;
    let cases = [
        ("minus_one_relative_jump", rjump(-1) + stop),
        ("minus_two_relative_jump", rjump(-2) + stop),
        ("one_relative_jump_to_push_data", rjump(1) + push1(0) + stop),
        ("one_relative_jump_outside_of_code", rjump(1) + stop),
        ("two_relative_jump_outside_of_code", rjump(2) + stop),
        ("minus_4_relative_jump_outside_of_code", rjump(-4) + stop),
        ("relative_jump_into_relative_jump_immediate", rjump(2) + stop + rjump(0) + stop),
        ("conditional_relative_jump_into_own_immediate", push1(1) + rjumpi(-2) + stop),
    ];

    cases
        .into_iter()
        .map(|(name, code)| {
            Fixture::from_container(
                code_with_data(code).named(format!("invalid_rjump_{name}")),
                Some(ValidationError::InvalidJumpDest),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_jump_encodings() {
        assert_eq!((rjump(-3) + Opcode::STOP).to_hex(), "0x5cfffd00");
        assert_eq!(
            (rjump(1) + Opcode::STOP + rjump(-4) + Opcode::STOP).to_hex(),
            "0x5c0001005cfffc00"
        );
        assert_eq!((push1(1) + rjumpi(-2) + Opcode::STOP).to_hex(), "0x60015dfffe00");
    }

    #[test]
    fn test_push_data_target_is_inside_immediate() {
        let fixtures = invalid_relative_jumps(&OpcodeTable::default()).unwrap();
        let fixture = &fixtures[2];
        assert_eq!(fixture.name, "invalid_rjump_one_relative_jump_to_push_data");
        // jump lands on offset 4, the immediate of PUSH1 at offset 3
        assert_eq!(&fixture.bytes()[10..], &[0x5C, 0x00, 0x01, 0x60, 0x00, 0x00, 0x00]);
    }
}
