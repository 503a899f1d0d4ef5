use tracing::debug;

use crate::decoder::{Decoded, Decoder, Instruction, Operands, Target};
use crate::error::Error;
use crate::instructions::{Format, Opcode};
use crate::isa::{Isa, MAX_BRANCH_TARGET};
use crate::registers::{Register, FILL};

// Field positions, counted from bit 0 = LSB of the 16-bit word.
const OP_SHIFT: u32 = 11;
const RD_SHIFT: u32 = 8;
const RS_SHIFT: u32 = 5;
const RT_SHIFT: u32 = 2;
const REG_MASK: u16 = 0b111;
const IMM_MASK: u16 = 0xFF;
const TARGET_MASK: u16 = MAX_BRANCH_TARGET as u16;

/// Bits each format leaves unused; they are written as zero.
fn reserved_mask(format: Format) -> u16 {
    match format {
        Format::RegImm | Format::Branch => 0,
        Format::ImmOnly => REG_MASK << RD_SHIFT,
        Format::RegOnly => IMM_MASK,
        Format::ThreeReg => 0b11,
        Format::Bare => TARGET_MASK,
    }
}

fn reg(r: Register) -> u16 {
    r.code() as u16
}

/// Pack an instruction into its word. The operands must already match the
/// opcode's format, and branch targets must be resolved to addresses; a
/// label target is reported as undefined.
pub fn encode(isa: &Isa, insn: &Instruction) -> Result<u16, Error> {
    debug_assert_eq!(
        isa.describe(insn.op).format,
        insn.operands.format(),
        "operands do not match the format of {}",
        insn.op.mnemonic()
    );
    let op = (insn.op.code() as u16) << OP_SHIFT;
    let fields = match &insn.operands {
        Operands::RegImm { rd, imm } => (reg(*rd) << RD_SHIFT) | *imm as u16,
        Operands::ImmOnly { imm } => ((FILL as u16) << RD_SHIFT) | *imm as u16,
        Operands::RegOnly { rd } => reg(*rd) << RD_SHIFT,
        Operands::ThreeReg { rd, rs, rt } => {
            (reg(*rd) << RD_SHIFT) | (reg(*rs) << RS_SHIFT) | (reg(*rt) << RT_SHIFT)
        }
        Operands::Bare => 0,
        Operands::Branch { target: Target::Address(a) } => {
            if *a as usize > MAX_BRANCH_TARGET {
                return Err(Error::AddressOverflow { label: a.to_string(), address: *a as usize });
            }
            *a
        }
        Operands::Branch { target: Target::Label(l) } => {
            return Err(Error::UndefinedLabel { name: l.clone() });
        }
    };
    Ok(op | fields)
}

/// hue16 decoder. Field extraction is driven solely by the opcode's format.
pub struct Hue16Decoder<'a> {
    isa: &'a Isa,
}

impl<'a> Hue16Decoder<'a> {
    pub fn new(isa: &'a Isa) -> Self {
        Self { isa }
    }
}

impl Decoder for Hue16Decoder<'_> {
    fn decode(&self, word: u16) -> Result<Decoded, Error> {
        let code = (word >> OP_SHIFT) as u8;
        let desc = self.isa.opcode(code, word)?;
        let field = |shift: u32| -> Result<Register, Error> {
            self.isa.register_by_code(((word >> shift) & REG_MASK) as u8)
        };
        let imm = (word & IMM_MASK) as u8;

        let stray = word & reserved_mask(desc.format);
        if stray != 0 {
            debug!(word, stray, "ignoring non-zero reserved bits");
        }

        let operands = match desc.format {
            Format::RegImm => Operands::RegImm { rd: field(RD_SHIFT)?, imm },
            Format::ImmOnly => Operands::ImmOnly { imm },
            Format::RegOnly => Operands::RegOnly { rd: field(RD_SHIFT)? },
            Format::ThreeReg => Operands::ThreeReg {
                rd: field(RD_SHIFT)?,
                rs: field(RS_SHIFT)?,
                rt: field(RT_SHIFT)?,
            },
            Format::Bare => Operands::Bare,
            Format::Branch => Operands::Branch { target: Target::Address(word & TARGET_MASK) },
        };
        Ok(Decoded { word, insn: Instruction { op: desc.op, operands } })
    }
}
