//! Fixture generation rules
//!
//! Each rule targets one structural invariant of the format and is gated on
//! the extension that introduces it, together with the container format
//! itself. Rules are listed in generation order; reordering them changes the
//! fixture sequence.

mod header;
mod jumps;
mod opcodes;
mod sections;
mod valid;

use crate::fixture::{Fixture, FixtureError};
use eof_bytecode::{Code, Container, Eips, OpcodeTable, Section};

pub type RuleResult = Result<Vec<Fixture>, FixtureError>;

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    /// Extensions that must all be enabled for the rule to run
    pub requires: Eips,
    pub generate: fn(&OpcodeTable) -> RuleResult,
}

impl Rule {
    const fn new(name: &'static str, requires: Eips, generate: fn(&OpcodeTable) -> RuleResult) -> Self {
        Self {
            name,
            requires,
            generate,
        }
    }

    pub fn is_enabled(&self, eips: Eips) -> bool {
        eips.contains(self.requires)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .finish()
    }
}

const CODE_VALIDATION: Eips = Eips::EOF.union(Eips::CODE_VALIDATION);
const RELATIVE_JUMPS: Eips = CODE_VALIDATION.union(Eips::STATIC_RELATIVE_JUMPS);

pub const VALID_RULES: &[Rule] = &[
    Rule::new("basic_containers", Eips::EOF, valid::basic_containers),
    Rule::new("terminating_opcodes", CODE_VALIDATION, valid::terminating_opcodes),
    Rule::new("relative_jumps", RELATIVE_JUMPS, jumps::valid_relative_jumps),
];

pub const INVALID_RULES: &[Rule] = &[
    Rule::new("magic_and_version", Eips::EOF, header::magic_and_version),
    Rule::new("missing_headers", Eips::EOF, header::missing_headers),
    Rule::new("incomplete_sizes", Eips::EOF, header::incomplete_sizes),
    Rule::new("missing_terminator", Eips::EOF, header::missing_terminator),
    Rule::new("incomplete_contents", Eips::EOF, sections::incomplete_contents),
    Rule::new("trailing_bytes", Eips::EOF, sections::trailing_bytes),
    Rule::new("empty_sections", Eips::EOF, sections::empty_sections),
    Rule::new("section_cardinality", Eips::EOF, sections::section_cardinality),
    Rule::new("unknown_section_kinds", Eips::EOF, sections::unknown_section_kinds),
    Rule::new("non_terminating_opcodes", CODE_VALIDATION, opcodes::non_terminating_opcodes),
    Rule::new("undefined_opcodes", CODE_VALIDATION, opcodes::undefined_opcodes),
    Rule::new("truncated_immediates", CODE_VALIDATION, opcodes::truncated_immediates),
    Rule::new("invalid_relative_jumps", RELATIVE_JUMPS, jumps::invalid_relative_jumps),
];

/// Canonical single-function layout: the given code followed by a one-byte
/// data section
fn code_with_data(code: impl Into<Code>) -> Container {
    Container::new(vec![Section::code(code), Section::data(vec![0x00])])
}
