use serde::{Deserialize, Serialize};

/// Operations of the hue16 instruction set. The discriminant is the 5-bit
/// opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    Add = 0b00000,
    Sub = 0b00001,
    Mul = 0b00010,
    Div = 0b00011,
    And = 0b00100,
    Or = 0b00101,
    Not = 0b00110,
    Load = 0b00111,
    Store = 0b01000,
    Jump = 0b01001,
    // Colour ops: I/O and signalling
    Red = 0b01010,
    Blue = 0b01011,
    Green = 0b01100,
    Yellow = 0b01101,
    Black = 0b01110,
    White = 0b01111,
    Orange = 0b10000,
    Pink = 0b10001,
    Gray = 0b10010,
    Purple = 0b10011,
}

impl Opcode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        TABLE[self as usize].mnemonic
    }
}

/// Bit layout of an instruction word. Always derived from the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// opcode(5) rd(3) imm(8)
    RegImm,
    /// opcode(5) fill(3) imm(8)
    ImmOnly,
    /// opcode(5) rd(3), low byte zero
    RegOnly,
    /// opcode(5) rd(3) rs(3) rt(3) pad(2)
    ThreeReg,
    /// opcode(5), rest zero
    Bare,
    /// opcode(5) target(11)
    Branch,
}

impl Format {
    /// Number of source operands the format takes.
    pub fn arity(self) -> usize {
        match self {
            Format::Bare => 0,
            Format::ImmOnly | Format::RegOnly | Format::Branch => 1,
            Format::RegImm => 2,
            Format::ThreeReg => 3,
        }
    }

    pub fn syntax(self) -> &'static str {
        match self {
            Format::RegImm => "<reg>, <imm8>",
            Format::ImmOnly => "<imm8>",
            Format::RegOnly => "<reg>",
            Format::ThreeReg => "<rd>, <rs>, <rt>",
            Format::Bare => "no operands",
            Format::Branch => "<label>",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Opcode,
    pub mnemonic: &'static str,
    pub format: Format,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Opcode::Add,
        mnemonic: "ADD",
        format: Format::ThreeReg,
    },
    InstrDesc {
        op: Opcode::Sub,
        mnemonic: "SUB",
        format: Format::ThreeReg,
    },
    InstrDesc {
        op: Opcode::Mul,
        mnemonic: "MUL",
        format: Format::ThreeReg,
    },
    InstrDesc {
        op: Opcode::Div,
        mnemonic: "DIV",
        format: Format::ThreeReg,
    },
    InstrDesc {
        op: Opcode::And,
        mnemonic: "AND",
        format: Format::ThreeReg,
    },
    InstrDesc {
        op: Opcode::Or,
        mnemonic: "OR",
        format: Format::ThreeReg,
    },
    InstrDesc {
        op: Opcode::Not,
        mnemonic: "NOT",
        format: Format::RegOnly,
    },
    InstrDesc {
        op: Opcode::Load,
        mnemonic: "LOAD",
        format: Format::RegImm,
    },
    InstrDesc {
        op: Opcode::Store,
        mnemonic: "STORE",
        format: Format::RegImm,
    },
    InstrDesc {
        op: Opcode::Jump,
        mnemonic: "JUMP",
        format: Format::Branch,
    },
    InstrDesc {
        op: Opcode::Red,
        mnemonic: "RED",
        format: Format::ImmOnly,
    },
    InstrDesc {
        op: Opcode::Blue,
        mnemonic: "BLUE",
        format: Format::ImmOnly,
    },
    InstrDesc {
        op: Opcode::Green,
        mnemonic: "GREEN",
        format: Format::ImmOnly,
    },
    InstrDesc {
        op: Opcode::Yellow,
        mnemonic: "YELLOW",
        format: Format::Bare,
    },
    InstrDesc {
        op: Opcode::Black,
        mnemonic: "BLACK",
        format: Format::Bare,
    },
    InstrDesc {
        op: Opcode::White,
        mnemonic: "WHITE",
        format: Format::Bare,
    },
    InstrDesc {
        op: Opcode::Orange,
        mnemonic: "ORANGE",
        format: Format::ImmOnly,
    },
    InstrDesc {
        op: Opcode::Pink,
        mnemonic: "PINK",
        format: Format::Bare,
    },
    InstrDesc {
        op: Opcode::Gray,
        mnemonic: "GRAY",
        format: Format::ThreeReg,
    },
    InstrDesc {
        op: Opcode::Purple,
        mnemonic: "PURPLE",
        format: Format::RegImm,
    },
];
