//! Corruptions of the fixed prefix and of the section header list

use super::RuleResult;
use crate::fixture::Fixture;
use eof_bytecode::{
    Container, Eips, LATEST_EOF_VERSION, OpcodeTable, Section, SectionKind, ValidationError,
};

fn single_code() -> Container {
    Container::new(vec![Section::code(vec![0x00])])
}

pub(super) fn magic_and_version(_: &OpcodeTable) -> RuleResult {
    let containers = [
        (single_code().with_magic(0x01).named("invalid_magic_01"), ValidationError::InvalidMagic),
        (single_code().with_magic(0xFF).named("invalid_magic_ff"), ValidationError::InvalidMagic),
        (single_code().with_version(0x00).named("invalid_version_zero"), ValidationError::InvalidVersion),
        (
            single_code()
                .with_version(LATEST_EOF_VERSION + 1)
                .named("invalid_version_low"),
            ValidationError::InvalidVersion,
        ),
        (single_code().with_version(0xFF).named("invalid_version_high"), ValidationError::InvalidVersion),
    ];

    let mut fixtures = vec![
        Fixture::invalid("incomplete_magic", vec![0xEF], ValidationError::InvalidMagic),
        Fixture::invalid("no_version", vec![0xEF, 0x00], ValidationError::InvalidVersion),
    ];
    for (container, error) in containers {
        fixtures.push(Fixture::from_container(container, Some(error))?);
    }
    Ok(fixtures)
}

pub(super) fn missing_headers(_: &OpcodeTable) -> RuleResult {
    let containers = [
        Container::new(Vec::new()).named("no_sections"),
        Container::new(vec![Section::data(vec![0x00])]).named("no_code_section"),
        Container::new(vec![Section::data(vec![0xDE, 0xAD, 0xBE, 0xEF])])
            .named("data_section_without_code_section"),
        Container::new(vec![
            Section::data(vec![0xDE, 0xAD, 0xBE, 0xEF]),
            Section::code(vec![0x00]),
        ])
        .named("data_section_preceding_code_section"),
    ];

    let mut fixtures = vec![Fixture::invalid(
        "no_section_headers",
        vec![0xEF, 0x00, LATEST_EOF_VERSION],
        ValidationError::MissingCodeHeader,
    )];
    for container in containers {
        fixtures.push(Fixture::from_container(
            container,
            Some(ValidationError::MissingCodeHeader),
        )?);
    }
    Ok(fixtures)
}

/// Byte strings that end inside a section kind or size field
///
/// Type headers only exist once functions are enabled.
pub(super) fn incomplete_sizes(table: &OpcodeTable) -> RuleResult {
    let code = SectionKind::CODE.0;
    let data = SectionKind::DATA.0;
    let types = SectionKind::TYPE.0;
    let prefix = [0xEF, 0x00, LATEST_EOF_VERSION];

    let mut cases: Vec<(&str, Vec<u8>)> = Vec::new();
    if table.eips().contains(Eips::EOF_FUNCTIONS) {
        cases.push(("no_type_section_size", vec![types]));
        cases.push(("type_section_size_incomplete", vec![types, 0x00]));
    }
    cases.extend([
        ("no_code_section_size", vec![code]),
        ("code_section_size_incomplete", vec![code, 0x00]),
        ("no_data_section_size", vec![code, 0x00, data, data]),
        ("data_section_size_incomplete", vec![code, 0x00, data, data, 0x00]),
    ]);

    Ok(cases
        .into_iter()
        .map(|(name, tail)| {
            let bytes = [prefix.as_slice(), tail.as_slice()].concat();
            Fixture::invalid(name, bytes, ValidationError::UnexpectedEOF)
        })
        .collect())
}

pub(super) fn missing_terminator(_: &OpcodeTable) -> RuleResult {
    let containers = [
        Container::new(vec![Section::size_only(SectionKind::CODE, 3)])
            .named("no_section_terminator_1"),
        Container::new(vec![Section::code(vec![0x60, 0x00, 0x00])])
            .named("no_section_terminator_2"),
        Container::new(vec![Section::code(vec![0x02, 0x00, 0x04])])
            .named("no_section_terminator_3"),
        Container::new(vec![
            Section::code(vec![0x60, 0x00, 0x00]),
            Section::data(vec![0xAA, 0xBB, 0xCC, 0xDD]),
        ])
        .named("no_section_terminator_4"),
    ];

    containers
        .into_iter()
        .map(|c| {
            Fixture::from_container(
                c.without_terminator(),
                Some(ValidationError::MissingTerminator),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncated_size_fields() {
        let fixtures = incomplete_sizes(&OpcodeTable::default()).unwrap();
        let bytes: Vec<String> = fixtures.iter().map(|f| f.code.to_hex()).collect();
        assert_eq!(
            bytes,
            vec![
                "0xef000103",
                "0xef00010300",
                "0xef000101",
                "0xef00010100",
                "0xef000101000202",
                "0xef00010100020200",
            ]
        );
    }

    #[test]
    fn test_type_size_fields_need_functions() {
        let table = OpcodeTable::new(Eips::V1 - Eips::EOF_FUNCTIONS);
        let fixtures = incomplete_sizes(&table).unwrap();
        assert_eq!(fixtures.len(), 4);
        assert!(!fixtures.iter().any(|f| f.name.contains("type_section")));
    }

    #[test]
    fn test_terminator_is_omitted() {
        let fixtures = missing_terminator(&OpcodeTable::default()).unwrap();
        assert_eq!(fixtures[0].code.to_hex(), "0xef0001010003");
        assert_eq!(fixtures[1].code.to_hex(), "0xef0001010003600000");
    }
}
