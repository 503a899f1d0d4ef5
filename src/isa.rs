//! Bidirectional lookup over the instruction and register tables.
//!
//! An [`Isa`] is built once and handed by reference to both the assembler and
//! the decoder, so the two directions can never disagree about which format an
//! opcode uses.

pub mod hue16;

use std::collections::HashMap;

use crate::error::Error;
use crate::instructions::{InstrDesc, Opcode, TABLE};
use crate::registers::{RegDesc, Register, REGISTERS};

/// Width of the opcode field in bits.
pub const OPCODE_BITS: u32 = 5;
/// Largest value the `Branch` target field can hold.
pub const MAX_BRANCH_TARGET: usize = (1 << 11) - 1;

#[derive(Debug, Clone)]
pub struct Isa {
    by_mnemonic: HashMap<&'static str, &'static InstrDesc>,
    by_opcode: [Option<&'static InstrDesc>; 1 << OPCODE_BITS],
    regs_by_name: HashMap<&'static str, &'static RegDesc>,
    regs_by_code: [Option<&'static RegDesc>; 8],
}

impl Isa {
    pub fn new() -> Self {
        let mut by_mnemonic = HashMap::with_capacity(TABLE.len());
        let mut by_opcode = [None; 1 << OPCODE_BITS];
        for d in TABLE {
            by_mnemonic.insert(d.mnemonic, d);
            by_opcode[d.op.code() as usize] = Some(d);
        }
        let mut regs_by_name = HashMap::with_capacity(REGISTERS.len());
        let mut regs_by_code = [None; 8];
        for r in REGISTERS {
            regs_by_name.insert(r.mnemonic, r);
            regs_by_code[r.code as usize] = Some(r);
        }
        Self {
            by_mnemonic,
            by_opcode,
            regs_by_name,
            regs_by_code,
        }
    }

    /// Case-insensitive mnemonic lookup.
    pub fn instruction(&self, mnemonic: &str) -> Result<&'static InstrDesc, Error> {
        self.by_mnemonic
            .get(mnemonic.to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| Error::UnknownInstruction { mnemonic: mnemonic.to_string() })
    }

    /// Lookup by the 5-bit opcode field. `word` is only used for the error.
    pub fn opcode(&self, code: u8, word: u16) -> Result<&'static InstrDesc, Error> {
        self.by_opcode
            .get(code as usize)
            .copied()
            .flatten()
            .ok_or(Error::UnknownOpcode { opcode: code, word })
    }

    pub fn describe(&self, op: Opcode) -> &'static InstrDesc {
        &TABLE[op.code() as usize]
    }

    /// Case-insensitive register lookup.
    pub fn register(&self, name: &str) -> Result<Register, Error> {
        self.regs_by_name
            .get(name.to_ascii_uppercase().as_str())
            .map(|r| r.reg)
            .ok_or_else(|| Error::UnknownRegister { name: name.to_string() })
    }

    pub fn register_by_code(&self, code: u8) -> Result<Register, Error> {
        self.regs_by_code
            .get(code as usize)
            .copied()
            .flatten()
            .map(|r| r.reg)
            .ok_or_else(|| Error::UnknownRegister { name: format!("{code:#05b}") })
    }
}

impl Default for Isa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_inverse() {
        let isa = Isa::new();
        for d in TABLE {
            let by_name = isa.instruction(d.mnemonic).unwrap();
            let by_code = isa.opcode(d.op.code(), 0).unwrap();
            assert_eq!(by_name.op, by_code.op);
            assert_eq!(by_name.format, by_code.format);
        }
        for r in REGISTERS {
            assert_eq!(isa.register(r.mnemonic).unwrap(), r.reg);
            assert_eq!(isa.register_by_code(r.code).unwrap(), r.reg);
        }
    }

    #[test]
    fn mnemonics_are_case_insensitive() {
        let isa = Isa::new();
        assert_eq!(isa.instruction("load").unwrap().op, Opcode::Load);
        assert_eq!(isa.register("a0").unwrap(), Register::A0);
    }

    #[test]
    fn unknown_keys_fail() {
        let isa = Isa::new();
        assert!(matches!(isa.instruction("NOP"), Err(Error::UnknownInstruction { .. })));
        assert!(matches!(isa.opcode(0b10100, 0xA000), Err(Error::UnknownOpcode { opcode: 0b10100, .. })));
        assert!(matches!(isa.register("R9"), Err(Error::UnknownRegister { .. })));
        assert!(matches!(isa.register_by_code(8), Err(Error::UnknownRegister { .. })));
    }
}
