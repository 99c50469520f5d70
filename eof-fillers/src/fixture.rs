//! Named fixtures and the generated fixture set

use eof_bytecode::{Code, Container, ContainerError, ValidationError, generate_initcode};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("Fixture name {0:?} is used more than once")]
    DuplicateName(String),

    #[error("Fixture built from an unnamed container")]
    Unnamed,

    #[error("Valid fixture {valid:?} and invalid fixture {invalid:?} have identical bytes")]
    Overlap { valid: String, invalid: String },

    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// One generated test case: a byte string and the outcome a conforming
/// validator must report for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub name: String,
    pub code: Code,
    /// `None` for containers that must be accepted
    pub expected: Option<ValidationError>,
}

impl Fixture {
    pub fn valid(name: impl Into<String>, code: impl Into<Code>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            expected: None,
        }
    }

    pub fn invalid(name: impl Into<String>, code: impl Into<Code>, error: ValidationError) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            expected: Some(error),
        }
    }

    /// Fixture named after the container it wraps
    pub fn from_container(
        container: Container,
        expected: Option<ValidationError>,
    ) -> Result<Self, FixtureError> {
        let name = container.name.clone().ok_or(FixtureError::Unnamed)?;
        Ok(Self {
            name,
            code: container.into(),
            expected,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.expected.is_none()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.code.to_bytes()
    }

    /// Legacy initcode deploying this fixture as runtime code
    pub fn initcode(&self) -> Result<Code, FixtureError> {
        Ok(generate_initcode(&self.code)?)
    }

    /// `"valid"` or the identifier of the expected validation error
    pub fn outcome(&self) -> &'static str {
        self.expected.map_or("valid", |e| e.as_str())
    }
}

/// Both generated sequences, each in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSet {
    pub valid: Vec<Fixture>,
    pub invalid: Vec<Fixture>,
}

impl FixtureSet {
    /// Every fixture as `(name, bytes, expected)`, valid ones first
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<u8>, Option<ValidationError>)> + '_ {
        self.fixtures()
            .map(|f| (f.name.as_str(), f.bytes(), f.expected))
    }

    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> + '_ {
        self.valid.iter().chain(&self.invalid)
    }

    pub fn find(&self, name: &str) -> Option<&Fixture> {
        self.fixtures().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eof_bytecode::Section;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixture_from_named_container() {
        let container = Container::new(vec![Section::code(vec![0x00])]).named("single");
        let fixture = Fixture::from_container(container, None).unwrap();
        assert_eq!(fixture.name, "single");
        assert_eq!(fixture.bytes(), vec![0xEF, 0x00, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(fixture.outcome(), "valid");
    }

    #[test]
    fn test_unnamed_container_is_rejected() {
        let container = Container::new(vec![Section::code(vec![0x00])]);
        assert_eq!(
            Fixture::from_container(container, None),
            Err(FixtureError::Unnamed)
        );
    }

    #[test]
    fn test_initcode_wraps_fixture_bytes() {
        let fixture = Fixture::invalid("raw", vec![0xEF], ValidationError::InvalidMagic);
        let initcode = fixture.initcode().unwrap().to_bytes();
        assert_eq!(initcode.len(), 12);
        assert_eq!(&initcode[11..], &[0xEF]);
        assert_eq!(fixture.outcome(), "InvalidMagic");
    }

    #[test]
    fn test_set_iterates_valid_first() {
        let set = FixtureSet {
            valid: vec![Fixture::valid("a", vec![0x00])],
            invalid: vec![Fixture::invalid("b", vec![0xEF], ValidationError::InvalidMagic)],
        };
        let names: Vec<&str> = set.iter().map(|(name, _, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(set.len(), 2);
        assert!(set.find("b").is_some_and(|f| !f.is_valid()));
    }
}
