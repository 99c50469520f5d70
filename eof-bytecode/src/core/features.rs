//! Format extensions that can be switched on for fixture generation

use crate::error::{ContainerError, Result};
use bitflags::bitflags;

bitflags! {
    /// Set of enabled EOF extensions, each identified by its EIP number
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Eips: u8 {
        /// EIP-3540: container format
        const EOF = 0b00000001;

        /// EIP-3670: code validation
        const CODE_VALIDATION = 0b00000010;

        /// EIP-4200: static relative jumps
        const STATIC_RELATIVE_JUMPS = 0b00000100;

        /// EIP-4750: functions
        const EOF_FUNCTIONS = 0b00001000;

        /// EIP-5450: stack validation (fixtures not generated yet)
        const STACK_VALIDATION = 0b00010000;
    }
}

impl Eips {
    /// Extensions making up EOF v1 as currently implemented
    pub const V1: Eips = Eips::EOF
        .union(Eips::CODE_VALIDATION)
        .union(Eips::STATIC_RELATIVE_JUMPS)
        .union(Eips::EOF_FUNCTIONS);

    const NUMBERED: [(u16, Eips); 5] = [
        (3540, Eips::EOF),
        (3670, Eips::CODE_VALIDATION),
        (4200, Eips::STATIC_RELATIVE_JUMPS),
        (4750, Eips::EOF_FUNCTIONS),
        (5450, Eips::STACK_VALIDATION),
    ];

    /// Map a single EIP number to its flag
    pub fn from_number(number: u16) -> Result<Self> {
        Self::NUMBERED
            .iter()
            .find(|(n, _)| *n == number)
            .map(|(_, flag)| *flag)
            .ok_or(ContainerError::UnknownEip(number))
    }

    /// Build a set from a list of EIP numbers
    pub fn from_numbers(numbers: &[u16]) -> Result<Self> {
        numbers
            .iter()
            .try_fold(Eips::empty(), |acc, n| Ok(acc | Self::from_number(*n)?))
    }

    /// EIP numbers of the enabled flags, in ascending order
    pub fn numbers(&self) -> Vec<u16> {
        Self::NUMBERED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(n, _)| *n)
            .collect()
    }
}

impl Default for Eips {
    fn default() -> Self {
        Eips::V1
    }
}
