use super::{RuleResult, code_with_data};
use crate::fixture::Fixture;
use eof_bytecode::{Code, Container, Opcode, OpcodeTable, Section};

pub(super) fn basic_containers(_: &OpcodeTable) -> RuleResult {
    Ok(vec![
        Fixture::from_container(
            Container::new(vec![Section::code(vec![0x00])]).named("single_code_section"),
            None,
        )?,
        Fixture::from_container(
            code_with_data(vec![0x00]).named("single_code_single_data_section"),
            None,
        )?,
    ])
}

/// Each legal final instruction, preceded by enough `ORIGIN` pushes to
/// satisfy its stack requirement
pub(super) fn terminating_opcodes(table: &OpcodeTable) -> RuleResult {
    table
        .terminating_opcodes()
        .into_iter()
        .map(|op| {
            let padding = vec![Opcode::ORIGIN.value; op.min_stack_height as usize];
            let code = Code::from(padding) + op;
            let name = format!("valid_terminating_opcode_{}", op.name.to_lowercase());
            Fixture::from_container(code_with_data(code).named(name), None)
        })
        .collect()
}
