use serde::Serialize;

use crate::error::Error;
use crate::instructions::{Format, Opcode};
use crate::registers::Register;

/// Jump destination. The assembler parses labels; the decoder yields raw
/// addresses until branch reconstruction names them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Target {
    Label(String),
    Address(u16),
}

/// Operand payload, one variant per [`Format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operands {
    RegImm { rd: Register, imm: u8 },
    ImmOnly { imm: u8 },
    RegOnly { rd: Register },
    ThreeReg { rd: Register, rs: Register, rt: Register },
    Bare,
    Branch { target: Target },
}

impl Operands {
    pub fn format(&self) -> Format {
        match self {
            Operands::RegImm { .. } => Format::RegImm,
            Operands::ImmOnly { .. } => Format::ImmOnly,
            Operands::RegOnly { .. } => Format::RegOnly,
            Operands::ThreeReg { .. } => Format::ThreeReg,
            Operands::Bare => Format::Bare,
            Operands::Branch { .. } => Format::Branch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub op: Opcode,
    pub operands: Operands,
}

impl Instruction {
    /// Raw target address of a decoded branch.
    pub fn branch_target(&self) -> Option<u16> {
        match &self.operands {
            Operands::Branch { target: Target::Address(a) } => Some(*a),
            _ => None,
        }
    }
}

/// One decoded word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub word: u16,
    pub insn: Instruction,
}

pub trait Decoder {
    fn decode(&self, word: u16) -> Result<Decoded, Error>;
}
