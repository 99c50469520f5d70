use eof_bytecode::{
    Code, ContainerLayout, EOF_MAGIC, Eips, LATEST_EOF_VERSION, OpcodeTable, SectionKind,
    ValidationError,
};
use eof_fillers::{FixtureEnumerator, FixtureSet};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::collections::{HashMap, HashSet};

#[fixture]
fn v1() -> FixtureSet {
    FixtureEnumerator::new(Eips::V1).generate().unwrap()
}

fn count_prefixed(set: &FixtureSet, prefix: &str) -> usize {
    set.fixtures().filter(|f| f.name.starts_with(prefix)).count()
}

#[rstest]
fn test_generation_is_deterministic(v1: FixtureSet) {
    let again = FixtureEnumerator::new(Eips::V1).generate().unwrap();
    let first: Vec<_> = v1.iter().collect();
    let second: Vec<_> = again.iter().collect();
    assert_eq!(first, second);
}

#[rstest]
fn test_names_are_unique(v1: FixtureSet) {
    let names: HashSet<&str> = v1.fixtures().map(|f| f.name.as_str()).collect();
    assert_eq!(names.len(), v1.len());
}

#[rstest]
fn test_valid_and_invalid_bytes_are_disjoint(v1: FixtureSet) {
    let valid: HashSet<Vec<u8>> = v1.valid.iter().map(|f| f.bytes()).collect();
    assert!(v1.invalid.iter().all(|f| !valid.contains(&f.bytes())));
}

#[rstest]
fn test_identical_bytes_expect_the_same_reason(v1: FixtureSet) {
    let mut seen: HashMap<Vec<u8>, (String, Option<ValidationError>)> = HashMap::new();
    for fixture in &v1.invalid {
        if let Some((name, expected)) = seen.get(&fixture.bytes()) {
            assert_eq!(*expected, fixture.expected, "{name} and {}", fixture.name);
        } else {
            seen.insert(fixture.bytes(), (fixture.name.clone(), fixture.expected));
        }
    }
}

#[rstest]
fn test_opcode_rules_are_exhaustive(v1: FixtureSet) {
    let table = OpcodeTable::new(Eips::V1);
    assert_eq!(count_prefixed(&v1, "undefined_opcode_"), 256 - table.defined_bytes().len());
    assert_eq!(
        count_prefixed(&v1, "invalid_terminating_opcode_"),
        256 - table.terminating_opcodes().len()
    );
}

#[rstest]
fn test_valid_fixtures_read_back(v1: FixtureSet) {
    for fixture in &v1.valid {
        let Code::Container(container) = &fixture.code else {
            panic!("{} is not built from a container", fixture.name);
        };
        let bytes = fixture.bytes();
        let layout = ContainerLayout::parse(&bytes).unwrap();

        assert_eq!(layout.magic, EOF_MAGIC, "{}", fixture.name);
        assert_eq!(layout.version, LATEST_EOF_VERSION, "{}", fixture.name);
        assert_eq!(layout.headers[0].kind, SectionKind::CODE, "{}", fixture.name);
        assert_eq!(layout.headers.len(), container.sections.len(), "{}", fixture.name);
        for ((header, body), section) in layout
            .headers
            .iter()
            .zip(&layout.bodies)
            .zip(&container.sections)
        {
            assert_eq!(header.kind, section.kind(), "{}", fixture.name);
            assert_eq!(header.size as u32, section.header_size(), "{}", fixture.name);
            assert_eq!(body, &section.body(), "{}", fixture.name);
        }
        assert!(layout.trailing.is_empty(), "{}", fixture.name);
        assert_eq!(layout.total_len(), bytes.len());
    }
}

#[rstest]
fn test_only_reachable_reasons_are_expected(v1: FixtureSet) {
    assert!(
        v1.invalid
            .iter()
            .filter_map(|f| f.expected)
            .all(|e| !e.is_reserved())
    );
    assert!(v1.valid.iter().all(|f| f.expected.is_none()));
}

#[rstest]
#[case::incomplete_magic("incomplete_magic", "0xef", Some(ValidationError::InvalidMagic))]
#[case::no_version("no_version", "0xef00", Some(ValidationError::InvalidVersion))]
#[case::no_section_headers("no_section_headers", "0xef0001", Some(ValidationError::MissingCodeHeader))]
#[case::no_sections("no_sections", "0xef000100", Some(ValidationError::MissingCodeHeader))]
#[case::data_size_incomplete(
    "data_section_size_incomplete",
    "0xef00010100020200",
    Some(ValidationError::UnexpectedEOF)
)]
#[case::no_type_section_size(
    "no_type_section_size",
    "0xef000103",
    Some(ValidationError::UnexpectedEOF)
)]
#[case::type_size_incomplete(
    "type_section_size_incomplete",
    "0xef00010300",
    Some(ValidationError::UnexpectedEOF)
)]
#[case::unknown_between_code_and_data(
    "unknown_section_0xff_between_code_and_data",
    "0xef0001 010001 ff0001 020001 00 00 01 00",
    Some(ValidationError::MissingTerminator)
)]
#[case::incomplete_code_contents(
    "incomplete_code_section_contents",
    "0xef0001010002 00 00",
    Some(ValidationError::InvalidContainerSize)
)]
#[case::trailing_after_data(
    "trailing_bytes_after_data_section",
    "0xef0001 010003 020004 00 600000 aabbccdd ee",
    Some(ValidationError::InvalidContainerSize)
)]
#[case::multiple_code_sections(
    "multiple_code_sections",
    "0xef0001 010003 010003 00 600000 600000",
    Some(ValidationError::MissingTypeHeader)
)]
#[case::unknown_before_code(
    "unknown_section_0x04_before_code",
    "0xef0001 040001 010001 00 01 00",
    Some(ValidationError::MissingCodeHeader)
)]
#[case::undefined_opcode(
    "undefined_opcode_0xef",
    "0xef0001 010002 020001 00 ef00 00",
    Some(ValidationError::UndefinedInstruction)
)]
#[case::valid_single_code("single_code_section", "0xef0001 010001 00 00", None)]
#[case::valid_rjump_minus_three(
    "valid_rjump_minus_three_relative_jump",
    "0xef0001 010004 020001 00 5cfffd00 00",
    None
)]
#[case::invalid_rjump_into_immediate(
    "invalid_rjump_relative_jump_into_relative_jump_immediate",
    "0xef0001 010008 020001 00 5c0002005c000000 00",
    Some(ValidationError::InvalidJumpDest)
)]
fn test_named_fixture(
    v1: FixtureSet,
    #[case] name: &str,
    #[case] hex: &str,
    #[case] expected: Option<ValidationError>,
) {
    let fixture = v1.find(name).unwrap();
    let expected_bytes = Code::from_hex(hex).unwrap().to_bytes();
    assert_eq!(fixture.bytes(), expected_bytes);
    assert_eq!(fixture.expected, expected);
}

#[test]
fn test_repeated_code_without_functions() {
    let eips = Eips::V1 - Eips::EOF_FUNCTIONS;
    let set = FixtureEnumerator::new(eips).generate().unwrap();
    assert_eq!(
        set.find("multiple_code_sections").and_then(|f| f.expected),
        Some(ValidationError::InvalidCodeHeader)
    );
    assert!(set.find("code_sections_above_1024").is_none());
    assert!(set.find("no_type_section_size").is_none());
    assert!(set.find("valid_terminating_opcode_retf").is_none());
}

#[test]
fn test_jump_rules_follow_extension() {
    let set = FixtureEnumerator::new(Eips::EOF | Eips::CODE_VALIDATION)
        .generate()
        .unwrap();
    assert_eq!(count_prefixed(&set, "valid_rjump_"), 0);
    assert_eq!(count_prefixed(&set, "invalid_rjump_"), 0);
    assert!(set.find("truncated_opcode_RJUMP_no_data").is_none());
}

#[test]
fn test_stack_validation_adds_nothing_yet() {
    let base = FixtureEnumerator::new(Eips::V1).generate().unwrap();
    let with_stack = FixtureEnumerator::new(Eips::V1 | Eips::STACK_VALIDATION)
        .generate()
        .unwrap();
    assert_eq!(base.len(), with_stack.len());
}

#[test]
fn test_code_validation_without_container_format() {
    let set = FixtureEnumerator::new(Eips::CODE_VALIDATION).generate().unwrap();
    assert!(set.is_empty());
}
