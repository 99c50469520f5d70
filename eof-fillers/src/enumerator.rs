//! Deterministic generation of the complete fixture set

use crate::fixture::{Fixture, FixtureError, FixtureSet};
use crate::rules::{INVALID_RULES, Rule, VALID_RULES};
use eof_bytecode::{Eips, OpcodeTable};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureEnumerator {
    table: OpcodeTable,
}

impl FixtureEnumerator {
    pub fn new(eips: Eips) -> Self {
        Self {
            table: OpcodeTable::new(eips),
        }
    }

    pub fn eips(&self) -> Eips {
        self.table.eips()
    }

    /// Run every enabled rule in order and check the result is usable as a
    /// test suite: unique names and no valid/invalid byte overlap
    pub fn generate(&self) -> Result<FixtureSet, FixtureError> {
        let eips = self.eips();
        tracing::debug!(eips = ?eips.numbers(), "generating fixtures");

        if !eips.contains(Eips::EOF) {
            tracing::warn!("container format extension disabled, no fixtures generated");
        }
        if eips.contains(Eips::STACK_VALIDATION) {
            tracing::warn!("stack validation fixtures are not generated yet");
        }

        let set = FixtureSet {
            valid: self.run_rules(VALID_RULES)?,
            invalid: self.run_rules(INVALID_RULES)?,
        };
        check_names(&set)?;
        check_disjoint(&set)?;

        tracing::info!(
            valid = set.valid.len(),
            invalid = set.invalid.len(),
            "fixtures generated"
        );
        Ok(set)
    }

    fn run_rules(&self, rules: &[Rule]) -> Result<Vec<Fixture>, FixtureError> {
        let mut fixtures = Vec::new();
        for rule in rules {
            if !rule.is_enabled(self.eips()) {
                tracing::debug!(rule = rule.name, "skipped");
                continue;
            }
            let generated = (rule.generate)(&self.table)?;
            tracing::debug!(rule = rule.name, count = generated.len(), "rule applied");
            fixtures.extend(generated);
        }
        Ok(fixtures)
    }
}

impl Default for FixtureEnumerator {
    fn default() -> Self {
        Self::new(Eips::default())
    }
}

fn check_names(set: &FixtureSet) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for fixture in set.fixtures() {
        if !seen.insert(fixture.name.as_str()) {
            return Err(FixtureError::DuplicateName(fixture.name.clone()));
        }
    }
    Ok(())
}

fn check_disjoint(set: &FixtureSet) -> Result<(), FixtureError> {
    let valid: HashMap<Vec<u8>, &str> = set
        .valid
        .iter()
        .map(|f| (f.bytes(), f.name.as_str()))
        .collect();
    for fixture in &set.invalid {
        if let Some(name) = valid.get(&fixture.bytes()) {
            return Err(FixtureError::Overlap {
                valid: name.to_string(),
                invalid: fixture.name.clone(),
            });
        }
    }
    Ok(())
}
