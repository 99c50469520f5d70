//! Opcode metadata for code inside an EOF v1 container
//!
//! Every defined opcode lives in a fixed 256-slot table indexed by its byte
//! value. Holes in the table are undefined instructions, so the set of
//! invalid opcodes is simply the complement of the table.

use crate::core::features::Eips;
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// Stack effect and immediate length of a single opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub value: u8,
    pub name: &'static str,
    pub popped: u8,
    pub pushed: u8,
    /// Stack items required before execution, `popped` unless overridden
    pub min_stack_height: u8,
    /// Number of immediate bytes following the opcode
    pub immediate_length: u8,
}

impl Opcode {
    const fn new(value: u8, name: &'static str) -> Self {
        Self {
            value,
            name,
            popped: 0,
            pushed: 0,
            min_stack_height: 0,
            immediate_length: 0,
        }
    }

    const fn pops(mut self, n: u8) -> Self {
        self.popped = n;
        self.min_stack_height = n;
        self
    }

    const fn pushes(mut self, n: u8) -> Self {
        self.pushed = n;
        self
    }

    const fn min_stack(mut self, n: u8) -> Self {
        self.min_stack_height = n;
        self
    }

    const fn immediate(mut self, n: u8) -> Self {
        self.immediate_length = n;
        self
    }

    // Arithmetic (0x00 - 0x0B)
    pub const STOP: Opcode = Opcode::new(0x00, "STOP");
    pub const ADD: Opcode = Opcode::new(0x01, "ADD").pops(2).pushes(1);
    pub const MUL: Opcode = Opcode::new(0x02, "MUL").pops(2).pushes(1);
    pub const SUB: Opcode = Opcode::new(0x03, "SUB").pops(2).pushes(1);
    pub const DIV: Opcode = Opcode::new(0x04, "DIV").pops(2).pushes(1);
    pub const SDIV: Opcode = Opcode::new(0x05, "SDIV").pops(2).pushes(1);
    pub const MOD: Opcode = Opcode::new(0x06, "MOD").pops(2).pushes(1);
    pub const SMOD: Opcode = Opcode::new(0x07, "SMOD").pops(2).pushes(1);
    pub const ADDMOD: Opcode = Opcode::new(0x08, "ADDMOD").pops(3).pushes(1);
    pub const MULMOD: Opcode = Opcode::new(0x09, "MULMOD").pops(3).pushes(1);
    pub const EXP: Opcode = Opcode::new(0x0A, "EXP").pops(2).pushes(1);
    pub const SIGNEXTEND: Opcode = Opcode::new(0x0B, "SIGNEXTEND").pops(2).pushes(1);

    // Comparison and bitwise (0x10 - 0x1D)
    pub const LT: Opcode = Opcode::new(0x10, "LT").pops(2).pushes(1);
    pub const GT: Opcode = Opcode::new(0x11, "GT").pops(2).pushes(1);
    pub const SLT: Opcode = Opcode::new(0x12, "SLT").pops(2).pushes(1);
    pub const SGT: Opcode = Opcode::new(0x13, "SGT").pops(2).pushes(1);
    pub const EQ: Opcode = Opcode::new(0x14, "EQ").pops(2).pushes(1);
    pub const ISZERO: Opcode = Opcode::new(0x15, "ISZERO").pops(1).pushes(1);
    pub const AND: Opcode = Opcode::new(0x16, "AND").pops(2).pushes(1);
    pub const OR: Opcode = Opcode::new(0x17, "OR").pops(2).pushes(1);
    pub const XOR: Opcode = Opcode::new(0x18, "XOR").pops(2).pushes(1);
    pub const NOT: Opcode = Opcode::new(0x19, "NOT").pops(1).pushes(1);
    pub const BYTE: Opcode = Opcode::new(0x1A, "BYTE").pops(2).pushes(1);
    pub const SHL: Opcode = Opcode::new(0x1B, "SHL").pops(2).pushes(1);
    pub const SHR: Opcode = Opcode::new(0x1C, "SHR").pops(2).pushes(1);
    pub const SAR: Opcode = Opcode::new(0x1D, "SAR").pops(2).pushes(1);

    pub const SHA3: Opcode = Opcode::new(0x20, "SHA3").pops(2).pushes(1);

    // Environment (0x30 - 0x3F)
    pub const ADDRESS: Opcode = Opcode::new(0x30, "ADDRESS").pushes(1);
    pub const BALANCE: Opcode = Opcode::new(0x31, "BALANCE").pops(1).pushes(1);
    pub const ORIGIN: Opcode = Opcode::new(0x32, "ORIGIN").pushes(1);
    pub const CALLER: Opcode = Opcode::new(0x33, "CALLER").pushes(1);
    pub const CALLVALUE: Opcode = Opcode::new(0x34, "CALLVALUE").pushes(1);
    pub const CALLDATALOAD: Opcode = Opcode::new(0x35, "CALLDATALOAD").pops(1).pushes(1);
    pub const CALLDATASIZE: Opcode = Opcode::new(0x36, "CALLDATASIZE").pushes(1);
    pub const CALLDATACOPY: Opcode = Opcode::new(0x37, "CALLDATACOPY").pops(3);
    pub const CODESIZE: Opcode = Opcode::new(0x38, "CODESIZE").pushes(1);
    pub const CODECOPY: Opcode = Opcode::new(0x39, "CODECOPY").pops(3);
    pub const GASPRICE: Opcode = Opcode::new(0x3A, "GASPRICE").pushes(1);
    pub const EXTCODESIZE: Opcode = Opcode::new(0x3B, "EXTCODESIZE").pops(1).pushes(1);
    pub const EXTCODECOPY: Opcode = Opcode::new(0x3C, "EXTCODECOPY").pops(4);
    pub const RETURNDATASIZE: Opcode = Opcode::new(0x3D, "RETURNDATASIZE").pushes(1);
    pub const RETURNDATACOPY: Opcode = Opcode::new(0x3E, "RETURNDATACOPY").pops(3);
    pub const EXTCODEHASH: Opcode = Opcode::new(0x3F, "EXTCODEHASH").pops(1).pushes(1);

    // Block information (0x40 - 0x48)
    pub const BLOCKHASH: Opcode = Opcode::new(0x40, "BLOCKHASH").pops(1).pushes(1);
    pub const COINBASE: Opcode = Opcode::new(0x41, "COINBASE").pushes(1);
    pub const TIMESTAMP: Opcode = Opcode::new(0x42, "TIMESTAMP").pushes(1);
    pub const NUMBER: Opcode = Opcode::new(0x43, "NUMBER").pushes(1);
    pub const PREVRANDAO: Opcode = Opcode::new(0x44, "PREVRANDAO").pushes(1);
    pub const GASLIMIT: Opcode = Opcode::new(0x45, "GASLIMIT").pushes(1);
    pub const CHAINID: Opcode = Opcode::new(0x46, "CHAINID").pushes(1);
    pub const SELFBALANCE: Opcode = Opcode::new(0x47, "SELFBALANCE").pushes(1);
    pub const BASEFEE: Opcode = Opcode::new(0x48, "BASEFEE").pushes(1);

    // Stack, memory, storage and flow (0x50 - 0x5F)
    pub const POP: Opcode = Opcode::new(0x50, "POP").pops(1);
    pub const MLOAD: Opcode = Opcode::new(0x51, "MLOAD").pops(1).pushes(1);
    pub const MSTORE: Opcode = Opcode::new(0x52, "MSTORE").pops(2);
    pub const MSTORE8: Opcode = Opcode::new(0x53, "MSTORE8").pops(2);
    pub const SLOAD: Opcode = Opcode::new(0x54, "SLOAD").pops(1).pushes(1);
    pub const SSTORE: Opcode = Opcode::new(0x55, "SSTORE").pops(2);
    pub const JUMP: Opcode = Opcode::new(0x56, "JUMP").pops(1);
    pub const JUMPI: Opcode = Opcode::new(0x57, "JUMPI").pops(2);
    pub const PC: Opcode = Opcode::new(0x58, "PC").pushes(1);
    pub const MSIZE: Opcode = Opcode::new(0x59, "MSIZE").pushes(1);
    pub const GAS: Opcode = Opcode::new(0x5A, "GAS").pushes(1);
    pub const JUMPDEST: Opcode = Opcode::new(0x5B, "JUMPDEST");
    pub const RJUMP: Opcode = Opcode::new(0x5C, "RJUMP").immediate(2);
    pub const RJUMPI: Opcode = Opcode::new(0x5D, "RJUMPI").pops(1).immediate(2);
    pub const PUSH0: Opcode = Opcode::new(0x5F, "PUSH0").pushes(1);

    // Push (0x60 - 0x7F)
    pub const PUSH1: Opcode = Opcode::new(0x60, "PUSH1").pushes(1).immediate(1);
    pub const PUSH2: Opcode = Opcode::new(0x61, "PUSH2").pushes(1).immediate(2);
    pub const PUSH3: Opcode = Opcode::new(0x62, "PUSH3").pushes(1).immediate(3);
    pub const PUSH4: Opcode = Opcode::new(0x63, "PUSH4").pushes(1).immediate(4);
    pub const PUSH5: Opcode = Opcode::new(0x64, "PUSH5").pushes(1).immediate(5);
    pub const PUSH6: Opcode = Opcode::new(0x65, "PUSH6").pushes(1).immediate(6);
    pub const PUSH7: Opcode = Opcode::new(0x66, "PUSH7").pushes(1).immediate(7);
    pub const PUSH8: Opcode = Opcode::new(0x67, "PUSH8").pushes(1).immediate(8);
    pub const PUSH9: Opcode = Opcode::new(0x68, "PUSH9").pushes(1).immediate(9);
    pub const PUSH10: Opcode = Opcode::new(0x69, "PUSH10").pushes(1).immediate(10);
    pub const PUSH11: Opcode = Opcode::new(0x6A, "PUSH11").pushes(1).immediate(11);
    pub const PUSH12: Opcode = Opcode::new(0x6B, "PUSH12").pushes(1).immediate(12);
    pub const PUSH13: Opcode = Opcode::new(0x6C, "PUSH13").pushes(1).immediate(13);
    pub const PUSH14: Opcode = Opcode::new(0x6D, "PUSH14").pushes(1).immediate(14);
    pub const PUSH15: Opcode = Opcode::new(0x6E, "PUSH15").pushes(1).immediate(15);
    pub const PUSH16: Opcode = Opcode::new(0x6F, "PUSH16").pushes(1).immediate(16);
    pub const PUSH17: Opcode = Opcode::new(0x70, "PUSH17").pushes(1).immediate(17);
    pub const PUSH18: Opcode = Opcode::new(0x71, "PUSH18").pushes(1).immediate(18);
    pub const PUSH19: Opcode = Opcode::new(0x72, "PUSH19").pushes(1).immediate(19);
    pub const PUSH20: Opcode = Opcode::new(0x73, "PUSH20").pushes(1).immediate(20);
    pub const PUSH21: Opcode = Opcode::new(0x74, "PUSH21").pushes(1).immediate(21);
    pub const PUSH22: Opcode = Opcode::new(0x75, "PUSH22").pushes(1).immediate(22);
    pub const PUSH23: Opcode = Opcode::new(0x76, "PUSH23").pushes(1).immediate(23);
    pub const PUSH24: Opcode = Opcode::new(0x77, "PUSH24").pushes(1).immediate(24);
    pub const PUSH25: Opcode = Opcode::new(0x78, "PUSH25").pushes(1).immediate(25);
    pub const PUSH26: Opcode = Opcode::new(0x79, "PUSH26").pushes(1).immediate(26);
    pub const PUSH27: Opcode = Opcode::new(0x7A, "PUSH27").pushes(1).immediate(27);
    pub const PUSH28: Opcode = Opcode::new(0x7B, "PUSH28").pushes(1).immediate(28);
    pub const PUSH29: Opcode = Opcode::new(0x7C, "PUSH29").pushes(1).immediate(29);
    pub const PUSH30: Opcode = Opcode::new(0x7D, "PUSH30").pushes(1).immediate(30);
    pub const PUSH31: Opcode = Opcode::new(0x7E, "PUSH31").pushes(1).immediate(31);
    pub const PUSH32: Opcode = Opcode::new(0x7F, "PUSH32").pushes(1).immediate(32);

    // Duplication (0x80 - 0x8F)
    pub const DUP1: Opcode = Opcode::new(0x80, "DUP1").pushes(1).min_stack(1);
    pub const DUP2: Opcode = Opcode::new(0x81, "DUP2").pushes(1).min_stack(2);
    pub const DUP3: Opcode = Opcode::new(0x82, "DUP3").pushes(1).min_stack(3);
    pub const DUP4: Opcode = Opcode::new(0x83, "DUP4").pushes(1).min_stack(4);
    pub const DUP5: Opcode = Opcode::new(0x84, "DUP5").pushes(1).min_stack(5);
    pub const DUP6: Opcode = Opcode::new(0x85, "DUP6").pushes(1).min_stack(6);
    pub const DUP7: Opcode = Opcode::new(0x86, "DUP7").pushes(1).min_stack(7);
    pub const DUP8: Opcode = Opcode::new(0x87, "DUP8").pushes(1).min_stack(8);
    pub const DUP9: Opcode = Opcode::new(0x88, "DUP9").pushes(1).min_stack(9);
    pub const DUP10: Opcode = Opcode::new(0x89, "DUP10").pushes(1).min_stack(10);
    pub const DUP11: Opcode = Opcode::new(0x8A, "DUP11").pushes(1).min_stack(11);
    pub const DUP12: Opcode = Opcode::new(0x8B, "DUP12").pushes(1).min_stack(12);
    pub const DUP13: Opcode = Opcode::new(0x8C, "DUP13").pushes(1).min_stack(13);
    pub const DUP14: Opcode = Opcode::new(0x8D, "DUP14").pushes(1).min_stack(14);
    pub const DUP15: Opcode = Opcode::new(0x8E, "DUP15").pushes(1).min_stack(15);
    pub const DUP16: Opcode = Opcode::new(0x8F, "DUP16").pushes(1).min_stack(16);

    // Exchange (0x90 - 0x9F)
    pub const SWAP1: Opcode = Opcode::new(0x90, "SWAP1").min_stack(2);
    pub const SWAP2: Opcode = Opcode::new(0x91, "SWAP2").min_stack(3);
    pub const SWAP3: Opcode = Opcode::new(0x92, "SWAP3").min_stack(4);
    pub const SWAP4: Opcode = Opcode::new(0x93, "SWAP4").min_stack(5);
    pub const SWAP5: Opcode = Opcode::new(0x94, "SWAP5").min_stack(6);
    pub const SWAP6: Opcode = Opcode::new(0x95, "SWAP6").min_stack(7);
    pub const SWAP7: Opcode = Opcode::new(0x96, "SWAP7").min_stack(8);
    pub const SWAP8: Opcode = Opcode::new(0x97, "SWAP8").min_stack(9);
    pub const SWAP9: Opcode = Opcode::new(0x98, "SWAP9").min_stack(10);
    pub const SWAP10: Opcode = Opcode::new(0x99, "SWAP10").min_stack(11);
    pub const SWAP11: Opcode = Opcode::new(0x9A, "SWAP11").min_stack(12);
    pub const SWAP12: Opcode = Opcode::new(0x9B, "SWAP12").min_stack(13);
    pub const SWAP13: Opcode = Opcode::new(0x9C, "SWAP13").min_stack(14);
    pub const SWAP14: Opcode = Opcode::new(0x9D, "SWAP14").min_stack(15);
    pub const SWAP15: Opcode = Opcode::new(0x9E, "SWAP15").min_stack(16);
    pub const SWAP16: Opcode = Opcode::new(0x9F, "SWAP16").min_stack(17);

    // Logging (0xA0 - 0xA4)
    pub const LOG0: Opcode = Opcode::new(0xA0, "LOG0").pops(2);
    pub const LOG1: Opcode = Opcode::new(0xA1, "LOG1").pops(3);
    pub const LOG2: Opcode = Opcode::new(0xA2, "LOG2").pops(4);
    pub const LOG3: Opcode = Opcode::new(0xA3, "LOG3").pops(5);
    pub const LOG4: Opcode = Opcode::new(0xA4, "LOG4").pops(6);

    // Functions and transient storage (0xB0 - 0xB4)
    // CALLF/RETF stack requirements depend on the callee type; 0 is a placeholder
    pub const CALLF: Opcode = Opcode::new(0xB0, "CALLF").min_stack(0).immediate(2);
    pub const RETF: Opcode = Opcode::new(0xB1, "RETF").min_stack(0);
    pub const TLOAD: Opcode = Opcode::new(0xB3, "TLOAD").pops(1).pushes(1);
    pub const TSTORE: Opcode = Opcode::new(0xB4, "TSTORE").pops(2);

    // System (0xF0 - 0xFF)
    pub const CREATE: Opcode = Opcode::new(0xF0, "CREATE").pops(3).pushes(1);
    pub const CALL: Opcode = Opcode::new(0xF1, "CALL").pops(7).pushes(1);
    pub const CALLCODE: Opcode = Opcode::new(0xF2, "CALLCODE").pops(7).pushes(1);
    pub const RETURN: Opcode = Opcode::new(0xF3, "RETURN").pops(2);
    pub const DELEGATECALL: Opcode = Opcode::new(0xF4, "DELEGATECALL").pops(6).pushes(1);
    pub const CREATE2: Opcode = Opcode::new(0xF5, "CREATE2").pops(4).pushes(1);
    pub const STATICCALL: Opcode = Opcode::new(0xFA, "STATICCALL").pops(6).pushes(1);
    pub const REVERT: Opcode = Opcode::new(0xFD, "REVERT").pops(2);
    pub const INVALID: Opcode = Opcode::new(0xFE, "INVALID");
    pub const SELFDESTRUCT: Opcode = Opcode::new(0xFF, "SELFDESTRUCT").pops(1);

    /// Look an opcode up in the full table, ignoring extension gating
    pub fn from_byte(byte: u8) -> Option<Self> {
        OPCODE_TABLE[byte as usize]
    }

    /// Extensions that must be enabled for this opcode to be defined
    pub fn required_eips(&self) -> Eips {
        match self.value {
            0x5C | 0x5D => Eips::STATIC_RELATIVE_JUMPS,
            0xB0 | 0xB1 => Eips::EOF_FUNCTIONS,
            _ => Eips::empty(),
        }
    }

    pub fn has_immediate(&self) -> bool {
        self.immediate_length > 0
    }

    pub fn is_relative_jump(&self) -> bool {
        matches!(self.value, 0x5C | 0x5D)
    }

    /// The opcode byte followed by the given immediate bytes
    pub fn with_immediate(&self, immediate: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + immediate.len());
        bytes.push(self.value);
        bytes.extend_from_slice(immediate);
        bytes
    }

    /// Encode `RJUMP` or `RJUMPI` with a signed big-endian offset
    ///
    /// The offset is relative to the position right after the 3-byte
    /// instruction.
    pub fn relative_jump(offset: i16, conditional: bool) -> [u8; 3] {
        let mut bytes = [0u8; 3];
        bytes[0] = if conditional {
            Self::RJUMPI.value
        } else {
            Self::RJUMP.value
        };
        BigEndian::write_i16(&mut bytes[1..], offset);
        bytes
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// All opcodes defined for code inside an EOF v1 container
#[rustfmt::skip]
pub const ALL_OPCODES: [Opcode; 150] = [
    Opcode::STOP, Opcode::ADD, Opcode::MUL, Opcode::SUB, Opcode::DIV, Opcode::SDIV,
    Opcode::MOD, Opcode::SMOD, Opcode::ADDMOD, Opcode::MULMOD, Opcode::EXP,
    Opcode::SIGNEXTEND,
    Opcode::LT, Opcode::GT, Opcode::SLT, Opcode::SGT, Opcode::EQ, Opcode::ISZERO,
    Opcode::AND, Opcode::OR, Opcode::XOR, Opcode::NOT, Opcode::BYTE, Opcode::SHL,
    Opcode::SHR, Opcode::SAR,
    Opcode::SHA3,
    Opcode::ADDRESS, Opcode::BALANCE, Opcode::ORIGIN, Opcode::CALLER, Opcode::CALLVALUE,
    Opcode::CALLDATALOAD, Opcode::CALLDATASIZE, Opcode::CALLDATACOPY, Opcode::CODESIZE,
    Opcode::CODECOPY, Opcode::GASPRICE, Opcode::EXTCODESIZE, Opcode::EXTCODECOPY,
    Opcode::RETURNDATASIZE, Opcode::RETURNDATACOPY, Opcode::EXTCODEHASH,
    Opcode::BLOCKHASH, Opcode::COINBASE, Opcode::TIMESTAMP, Opcode::NUMBER,
    Opcode::PREVRANDAO, Opcode::GASLIMIT, Opcode::CHAINID, Opcode::SELFBALANCE,
    Opcode::BASEFEE,
    Opcode::POP, Opcode::MLOAD, Opcode::MSTORE, Opcode::MSTORE8, Opcode::SLOAD,
    Opcode::SSTORE, Opcode::JUMP, Opcode::JUMPI, Opcode::PC, Opcode::MSIZE, Opcode::GAS,
    Opcode::JUMPDEST, Opcode::RJUMP, Opcode::RJUMPI, Opcode::PUSH0,
    Opcode::PUSH1, Opcode::PUSH2, Opcode::PUSH3, Opcode::PUSH4, Opcode::PUSH5,
    Opcode::PUSH6, Opcode::PUSH7, Opcode::PUSH8, Opcode::PUSH9, Opcode::PUSH10,
    Opcode::PUSH11, Opcode::PUSH12, Opcode::PUSH13, Opcode::PUSH14, Opcode::PUSH15,
    Opcode::PUSH16, Opcode::PUSH17, Opcode::PUSH18, Opcode::PUSH19, Opcode::PUSH20,
    Opcode::PUSH21, Opcode::PUSH22, Opcode::PUSH23, Opcode::PUSH24, Opcode::PUSH25,
    Opcode::PUSH26, Opcode::PUSH27, Opcode::PUSH28, Opcode::PUSH29, Opcode::PUSH30,
    Opcode::PUSH31, Opcode::PUSH32,
    Opcode::DUP1, Opcode::DUP2, Opcode::DUP3, Opcode::DUP4, Opcode::DUP5, Opcode::DUP6,
    Opcode::DUP7, Opcode::DUP8, Opcode::DUP9, Opcode::DUP10, Opcode::DUP11,
    Opcode::DUP12, Opcode::DUP13, Opcode::DUP14, Opcode::DUP15, Opcode::DUP16,
    Opcode::SWAP1, Opcode::SWAP2, Opcode::SWAP3, Opcode::SWAP4, Opcode::SWAP5,
    Opcode::SWAP6, Opcode::SWAP7, Opcode::SWAP8, Opcode::SWAP9, Opcode::SWAP10,
    Opcode::SWAP11, Opcode::SWAP12, Opcode::SWAP13, Opcode::SWAP14, Opcode::SWAP15,
    Opcode::SWAP16,
    Opcode::LOG0, Opcode::LOG1, Opcode::LOG2, Opcode::LOG3, Opcode::LOG4,
    Opcode::CALLF, Opcode::RETF, Opcode::TLOAD, Opcode::TSTORE,
    Opcode::CREATE, Opcode::CALL, Opcode::CALLCODE, Opcode::RETURN,
    Opcode::DELEGATECALL, Opcode::CREATE2, Opcode::STATICCALL, Opcode::REVERT,
    Opcode::INVALID, Opcode::SELFDESTRUCT,
];

const fn build_table() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < ALL_OPCODES.len() {
        table[ALL_OPCODES[i].value as usize] = Some(ALL_OPCODES[i]);
        i += 1;
    }
    table
}

static OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

/// Opcode table as seen under a particular set of enabled extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeTable {
    eips: Eips,
}

impl OpcodeTable {
    pub fn new(eips: Eips) -> Self {
        Self { eips }
    }

    pub fn eips(&self) -> Eips {
        self.eips
    }

    /// Metadata for `byte`, or `None` if it is an undefined instruction
    pub fn lookup(&self, byte: u8) -> Option<Opcode> {
        Opcode::from_byte(byte).filter(|op| self.eips.contains(op.required_eips()))
    }

    pub fn is_defined(&self, byte: u8) -> bool {
        self.lookup(byte).is_some()
    }

    /// Defined opcodes in ascending byte order
    pub fn opcodes(&self) -> impl Iterator<Item = Opcode> + '_ {
        (0..=u8::MAX).filter_map(move |b| self.lookup(b))
    }

    pub fn defined_bytes(&self) -> Vec<u8> {
        self.opcodes().map(|op| op.value).collect()
    }

    /// Complement of the table: every byte that is an undefined instruction
    pub fn undefined_bytes(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|b| !self.is_defined(*b)).collect()
    }

    /// Opcodes carrying immediate bytes
    pub fn immediate_opcodes(&self) -> Vec<Opcode> {
        self.opcodes().filter(Opcode::has_immediate).collect()
    }

    /// Opcodes that may legally end a code section
    pub fn terminating_opcodes(&self) -> Vec<Opcode> {
        let mut terminating = vec![
            Opcode::STOP,
            Opcode::RETURN,
            Opcode::REVERT,
            Opcode::INVALID,
            Opcode::SELFDESTRUCT,
        ];
        if self.eips.contains(Eips::EOF_FUNCTIONS) {
            terminating.push(Opcode::RETF);
        }
        terminating
    }

    pub fn is_terminating(&self, byte: u8) -> bool {
        self.terminating_opcodes().iter().any(|op| op.value == byte)
    }

    /// Every byte that is not a legal final instruction
    pub fn non_terminating_bytes(&self) -> Vec<u8> {
        let terminating = self.terminating_opcodes();
        (0..=u8::MAX)
            .filter(|b| !terminating.iter().any(|op| op.value == *b))
            .collect()
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new(Eips::V1)
    }
}
