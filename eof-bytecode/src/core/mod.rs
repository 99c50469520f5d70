pub mod code;
pub mod container;
pub mod features;
pub mod layout;
pub mod opcodes;

// Re-export core types
pub use self::code::{Code, INITCODE_TEMPLATE_LENGTH, generate_initcode};
pub use self::container::{Container, Section, SectionKind, TypeEntry};
pub use self::features::Eips;
pub use self::layout::{ContainerLayout, SectionHeader};
pub use self::opcodes::{ALL_OPCODES, Opcode, OpcodeTable};
