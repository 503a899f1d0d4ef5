//! Branch target reconstruction.
//!
//! Every distinct address referenced by a `JUMP` gets a `BRANCH<address>:`
//! declaration in front of the instruction at that index, and every `JUMP`
//! is rewritten to name it. Addresses count words from 0, labels take no
//! slot: the same scheme the assembler uses, so the listing re-assembles to
//! the same words.

use std::collections::BTreeSet;

use tracing::warn;

use crate::decoder::{Instruction, Operands, Target};
use crate::disasm::{fmt_insn, ListingLine, Slot};
use crate::error::{Diagnostic, Error, Location};
use crate::isa::MAX_BRANCH_TARGET;

pub fn label_name(address: u16) -> String {
    format!("BRANCH{address}")
}

pub fn branch_targets(slots: &[Slot]) -> BTreeSet<u16> {
    slots
        .iter()
        .filter_map(|s| s.as_ref().ok())
        .filter_map(|d| d.insn.branch_target())
        .collect()
}

fn named(insn: &Instruction) -> Instruction {
    match insn.branch_target() {
        Some(a) => Instruction {
            op: insn.op,
            operands: Operands::Branch { target: Target::Label(label_name(a)) },
        },
        None => insn.clone(),
    }
}

/// Build the listing for `slots`. Targets at or past the end of the program
/// are reported as warnings. A target equal to the word count still gets a
/// trailing label, since the assembler resolves a trailing label to the word
/// count; a jump beyond that is listed as a raw `.word`.
pub fn reconstruct(slots: &[Slot]) -> (Vec<ListingLine>, Vec<Diagnostic>) {
    let targets = branch_targets(slots);
    let count = slots.len();
    let mut lines = Vec::with_capacity(count + targets.len());
    let mut diags = Vec::new();

    for (index, slot) in slots.iter().enumerate() {
        if index <= MAX_BRANCH_TARGET && targets.contains(&(index as u16)) {
            lines.push(ListingLine::Label { name: label_name(index as u16) });
        }
        let d = match slot {
            Ok(d) => d,
            Err(word) => {
                lines.push(ListingLine::Raw { index, word: *word });
                continue;
            }
        };
        if let Some(t) = d.insn.branch_target() {
            if t as usize >= count {
                warn!(index, target = t, count, "branch target outside program");
                diags.push(Diagnostic::warning(
                    Location::Word(index),
                    Error::DanglingBranchTarget { target: t, count },
                ));
            }
            // nothing past the trailing label can be named
            if t as usize > count {
                lines.push(ListingLine::Raw { index, word: d.word });
                continue;
            }
        }
        lines.push(ListingLine::Insn {
            index,
            word: d.word,
            text: fmt_insn(&named(&d.insn)),
        });
    }

    if count <= MAX_BRANCH_TARGET && targets.contains(&(count as u16)) {
        lines.push(ListingLine::Label { name: label_name(count as u16) });
    }
    (lines, diags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::decode_all;
    use crate::isa::hue16::Hue16Decoder;
    use crate::isa::Isa;

    fn listing(words: &[u16]) -> (Vec<String>, Vec<Diagnostic>) {
        let isa = Isa::new();
        let (slots, _) = decode_all(&Hue16Decoder::new(&isa), words);
        let (lines, diags) = reconstruct(&slots);
        (lines.iter().map(|l| l.to_string()).collect(), diags)
    }

    const JUMP: u16 = 0b01001 << 11;
    const PINK: u16 = 0b10001 << 11;

    #[test]
    fn every_target_gets_one_label() {
        let (lines, diags) = listing(&[JUMP | 2, PINK, PINK, JUMP | 2, JUMP]);
        assert_eq!(
            lines,
            vec!["BRANCH0:", "JUMP BRANCH2", "PINK", "BRANCH2:", "PINK", "JUMP BRANCH2", "JUMP BRANCH0"]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn no_jumps_no_labels() {
        let (lines, _) = listing(&[PINK, PINK]);
        assert_eq!(lines, vec!["PINK", "PINK"]);
    }

    #[test]
    fn end_of_program_target_is_trailing_label() {
        let (lines, diags) = listing(&[JUMP | 2, PINK]);
        assert_eq!(lines, vec!["JUMP BRANCH2", "PINK", "BRANCH2:"]);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn dangling_target_warns_and_continues() {
        let (lines, diags) = listing(&[JUMP | 40, PINK]);
        assert_eq!(lines, vec![".word 0x4828", "PINK"]);
        assert_eq!(diags.len(), 1);
        assert!(!diags[0].is_error());
        assert_eq!(diags[0].error, Error::DanglingBranchTarget { target: 40, count: 2 });
    }
}
