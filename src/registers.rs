use serde::{Deserialize, Serialize};

/// Register operands. R0..R3 are general purpose; R, B, G and A0 are the
/// special-purpose colour/accumulator registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R,
    B,
    G,
    A0,
}

/// Code written into a register field that the format does not use.
pub const FILL: u8 = 0b000;

#[derive(Debug, Clone, Copy)]
pub struct RegDesc {
    pub reg: Register,
    pub mnemonic: &'static str,
    pub code: u8,
}

pub const REGISTERS: &[RegDesc] = &[
    RegDesc {
        reg: Register::R0,
        mnemonic: "R0",
        code: 0b000,
    },
    RegDesc {
        reg: Register::R1,
        mnemonic: "R1",
        code: 0b001,
    },
    RegDesc {
        reg: Register::R2,
        mnemonic: "R2",
        code: 0b010,
    },
    RegDesc {
        reg: Register::R3,
        mnemonic: "R3",
        code: 0b011,
    },
    RegDesc {
        reg: Register::R,
        mnemonic: "R",
        code: 0b100,
    },
    RegDesc {
        reg: Register::B,
        mnemonic: "B",
        code: 0b101,
    },
    RegDesc {
        reg: Register::G,
        mnemonic: "G",
        code: 0b110,
    },
    RegDesc {
        reg: Register::A0,
        mnemonic: "A0",
        code: 0b111,
    },
];

impl Register {
    fn desc(self) -> &'static RegDesc {
        &REGISTERS[self as usize]
    }

    pub fn code(self) -> u8 {
        self.desc().code
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }
}
