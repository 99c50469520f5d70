//! Section bodies, sizes and cardinality

use super::RuleResult;
use crate::fixture::Fixture;
use eof_bytecode::{
    Container, Eips, MAX_CODE_SECTIONS, OpcodeTable, Section, SectionKind, TypeEntry,
    VERSION_MAX_SECTION_KIND, ValidationError,
};

const PUSH_ZERO_STOP: [u8; 3] = [0x60, 0x00, 0x00];

/// Declared sizes larger than the bodies actually present
pub(super) fn incomplete_contents(_: &OpcodeTable) -> RuleResult {
    let containers = [
        Container::new(vec![Section::code(Vec::new()).with_declared_size(1)])
            .named("no_code_section_contents"),
        Container::new(vec![Section::code(vec![0x00]).with_declared_size(2)])
            .named("incomplete_code_section_contents"),
        Container::new(vec![
            Section::code(PUSH_ZERO_STOP),
            Section::data(Vec::new()).with_declared_size(1),
        ])
        .named("no_data_section_contents"),
        Container::new(vec![
            Section::code(PUSH_ZERO_STOP),
            Section::data(vec![0xAA, 0xBB, 0xCC]).with_declared_size(4),
        ])
        .named("data_section_contents_incomplete"),
    ];

    containers
        .into_iter()
        .map(|c| Fixture::from_container(c, Some(ValidationError::InvalidContainerSize)))
        .collect()
}

pub(super) fn trailing_bytes(_: &OpcodeTable) -> RuleResult {
    let containers = [
        Container::new(vec![Section::code(PUSH_ZERO_STOP)])
            .with_trailing_bytes(vec![0xDE, 0xAD, 0xBE, 0xEF])
            .named("trailing_bytes_after_code_section"),
        Container::new(vec![
            Section::code(PUSH_ZERO_STOP),
            Section::data(vec![0xAA, 0xBB, 0xCC, 0xDD]),
        ])
        .with_trailing_bytes(vec![0xEE])
        .named("trailing_bytes_after_data_section"),
    ];

    containers
        .into_iter()
        .map(|c| Fixture::from_container(c, Some(ValidationError::InvalidContainerSize)))
        .collect()
}

pub(super) fn empty_sections(_: &OpcodeTable) -> RuleResult {
    let containers = [
        (
            Container::new(vec![Section::code(Vec::new())]).named("empty_code_section"),
            ValidationError::InvalidCodeSize,
        ),
        (
            Container::new(vec![
                Section::code(Vec::new()),
                Section::data(vec![0xDE, 0xAD, 0xBE, 0xEF]),
            ])
            .named("empty_code_section_with_non_empty_data"),
            ValidationError::InvalidCodeSize,
        ),
        (
            Container::new(vec![Section::code(vec![0x00]), Section::data(Vec::new())])
                .named("empty_data_section"),
            ValidationError::InvalidContainerSize,
        ),
    ];

    containers
        .into_iter()
        .map(|(c, error)| Fixture::from_container(c, Some(error)))
        .collect()
}

/// Repeated and misplaced code and data sections
///
/// Several code sections are only legal together with a type section, so
/// the expected reason for a bare repeat depends on the functions extension.
pub(super) fn section_cardinality(table: &OpcodeTable) -> RuleResult {
    let functions = table.eips().contains(Eips::EOF_FUNCTIONS);
    let repeated_code = if functions {
        ValidationError::MissingTypeHeader
    } else {
        ValidationError::InvalidCodeHeader
    };

    let mut fixtures = vec![
        Fixture::from_container(
            Container::new(vec![Section::code(PUSH_ZERO_STOP), Section::code(PUSH_ZERO_STOP)])
                .named("multiple_code_sections"),
            Some(repeated_code),
        )?,
        Fixture::from_container(
            Container::new(vec![
                Section::code(vec![0x00]),
                Section::code(vec![0x00]),
                Section::data(vec![0xAA]),
                Section::data(vec![0xAA]),
            ])
            .named("multiple_code_and_data_sections_1"),
            Some(repeated_code),
        )?,
        Fixture::from_container(
            Container::new(vec![
                Section::code(PUSH_ZERO_STOP),
                Section::data(vec![0xAA, 0xBB, 0xCC]),
                Section::data(vec![0xAA, 0xBB, 0xCC]),
            ])
            .named("multiple_data_sections"),
            Some(ValidationError::MissingTerminator),
        )?,
        Fixture::from_container(
            Container::new(vec![
                Section::code(vec![0x00]),
                Section::data(vec![0xAA]),
                Section::code(vec![0x00]),
                Section::data(vec![0xAA]),
            ])
            .named("multiple_code_and_data_sections_2"),
            Some(ValidationError::MissingTerminator),
        )?,
    ];

    if functions {
        fixtures.push(Fixture::from_container(
            too_many_code_sections(),
            Some(ValidationError::InvalidCodeHeader),
        )?);
    }
    Ok(fixtures)
}

/// A fully typed container with one code section more than allowed
fn too_many_code_sections() -> Container {
    let count = MAX_CODE_SECTIONS + 1;
    let types = vec![TypeEntry::default(); count];

    let mut sections = Vec::with_capacity(count + 2);
    sections.push(Section::types(&types));
    sections.extend((0..count).map(|_| Section::code(vec![0x00])));
    sections.push(Section::data(vec![0x00]));
    Container::new(sections).named("code_sections_above_1024")
}

/// Kinds outside the defined set in every header position
///
/// Kind `0x00` is left out since it reads as the header terminator.
pub(super) fn unknown_section_kinds(_: &OpcodeTable) -> RuleResult {
    let mut fixtures = Vec::new();
    for kind in [VERSION_MAX_SECTION_KIND + 1, 0xFF] {
        let unknown = SectionKind(kind);
        let placements = [
            (
                "before_code",
                vec![Section::new(unknown, vec![0x01]), Section::code(vec![0x00])],
                ValidationError::MissingCodeHeader,
            ),
            (
                "after_code",
                vec![Section::code(vec![0x00]), Section::new(unknown, vec![0x01])],
                ValidationError::MissingTerminator,
            ),
            (
                "between_code_and_data",
                vec![
                    Section::code(vec![0x00]),
                    Section::new(unknown, vec![0x01]),
                    Section::data(vec![0x00]),
                ],
                ValidationError::MissingTerminator,
            ),
            (
                "after_data",
                vec![
                    Section::code(vec![0x00]),
                    Section::data(vec![0x00]),
                    Section::new(unknown, vec![0x01]),
                ],
                ValidationError::MissingTerminator,
            ),
            (
                "empty_after_code",
                vec![Section::code(vec![0x00]), Section::new(unknown, Vec::new())],
                ValidationError::MissingTerminator,
            ),
        ];

        for (position, sections, error) in placements {
            let name = format!("unknown_section_0x{kind:02x}_{position}");
            fixtures.push(Fixture::from_container(
                Container::new(sections).named(name),
                Some(error),
            )?);
        }
    }
    Ok(fixtures)
}
