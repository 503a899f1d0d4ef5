pub mod reconstruct;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::decoder::{Decoded, Decoder, Instruction, Operands, Target};
use crate::error::{Diagnostic, Location};
use crate::isa::hue16::Hue16Decoder;
use crate::isa::Isa;
use crate::word::Word;

pub use reconstruct::{branch_targets, label_name, reconstruct};

pub fn fmt_insn(insn: &Instruction) -> String {
    let mn = insn.op.mnemonic();
    match &insn.operands {
        Operands::RegImm { rd, imm } => format!("{} {}, {}", mn, rd.mnemonic(), imm),
        Operands::ImmOnly { imm } => format!("{} {}", mn, imm),
        Operands::RegOnly { rd } => format!("{} {}", mn, rd.mnemonic()),
        Operands::ThreeReg { rd, rs, rt } => {
            format!("{} {}, {}, {}", mn, rd.mnemonic(), rs.mnemonic(), rt.mnemonic())
        }
        Operands::Bare => mn.to_string(),
        Operands::Branch { target: Target::Label(l) } => format!("{} {}", mn, l),
        Operands::Branch { target: Target::Address(a) } => format!("{} {}", mn, a),
    }
}

pub fn fmt_decoded(d: &Decoded) -> String {
    fmt_insn(&d.insn)
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fmt_insn(self))
    }
}

/// Result of decoding one word: an instruction, or the raw word when its
/// opcode is unassigned.
pub type Slot = Result<Decoded, Word>;

/// One line of a disassembly listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListingLine {
    Label { name: String },
    Insn { index: usize, word: Word, text: String },
    /// A word emitted as `.word`: either its opcode is unassigned or it is a
    /// jump no label can name. Re-assembles to the same bits.
    Raw { index: usize, word: Word },
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingLine::Label { name } => write!(f, "{name}:"),
            ListingLine::Insn { text, .. } => f.write_str(text),
            ListingLine::Raw { word, .. } => write!(f, ".word {word:#06x}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Disassembly {
    pub slots: Vec<Slot>,
    pub lines: Vec<ListingLine>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Disassembly {
    /// The listing as assembler source, one line per entry.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for l in &self.lines {
            out.push_str(&l.to_string());
            out.push('\n');
        }
        out
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Decode every word without naming branch targets. Unknown opcodes are
/// reported and kept as raw words.
pub fn decode_all<D: Decoder>(dec: &D, words: &[Word]) -> (Vec<Slot>, Vec<Diagnostic>) {
    let mut slots = Vec::with_capacity(words.len());
    let mut diags = Vec::new();
    for (index, &w) in words.iter().enumerate() {
        match dec.decode(w) {
            Ok(d) => slots.push(Ok(d)),
            Err(e) => {
                diags.push(Diagnostic::error(Location::Word(index), e));
                slots.push(Err(w));
            }
        }
    }
    (slots, diags)
}

/// Decode `words` and rebuild symbolic branch targets.
pub fn disassemble(isa: &Isa, words: &[Word]) -> Disassembly {
    let dec = Hue16Decoder::new(isa);
    let (slots, mut diagnostics) = decode_all(&dec, words);
    let (lines, warnings) = reconstruct(&slots);
    diagnostics.extend(warnings);
    debug!(words = words.len(), lines = lines.len(), "disassembled");
    Disassembly { slots, lines, diagnostics }
}
