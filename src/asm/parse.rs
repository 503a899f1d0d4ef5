//! Line-level parsing for the assembler.
//!
//! Grammar, per line (after comments are removed):
//!   `name:`                  label declaration
//!   `name: MNEMONIC ops...`  label followed by an instruction
//!   `MNEMONIC ops...`        instruction; operands split on commas/spaces
//!   `.word n`                raw word (decimal or 0x hex)

use crate::config::AsmConfig;
use crate::decoder::{Instruction, Operands, Target};
use crate::error::Error;
use crate::instructions::Format;
use crate::isa::Isa;
use crate::registers::Register;

/// Something that occupies an address slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Instr(Instruction),
    Word(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Label(String),
    Body(Body),
}

/// A parsed item tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub line: usize,
    pub kind: ItemKind,
}

/// Drop comments: a `#` as the first non-blank character comments out the
/// whole line, `;` comments out the rest of it.
pub fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    let s = match line.find(';') {
        Some(p) => &line[..p],
        None => line,
    };
    s.trim()
}

pub fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn is_mnemonic(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split a leading `name:` off a (comment-free, trimmed) line. Returns the
/// label, if any, and whatever follows it.
pub fn split_label(line: &str) -> Result<(Option<&str>, &str), Error> {
    let head = line.split_whitespace().next().unwrap_or("");
    let Some(name) = head.strip_suffix(':') else {
        return Ok((None, line));
    };
    if !is_label_name(name) {
        return Err(Error::UnrecognizedLine { line: line.to_string() });
    }
    Ok((Some(name), line[head.len()..].trim()))
}

/// Parse the instruction part of a line. `line` is the full source text,
/// used to name the line in errors.
pub fn parse_body(isa: &Isa, cfg: &AsmConfig, body: &str, line: &str) -> Result<Option<Body>, Error> {
    let mut tokens: Vec<&str> = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    let mnemonic = tokens.remove(0);

    let malformed = |reason: String| Error::MalformedOperands { line: line.to_string(), reason };

    if mnemonic.eq_ignore_ascii_case(".word") {
        let [value] = tokens.as_slice() else {
            return Err(malformed("expected .word <value>".to_string()));
        };
        let value = *value;
        let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            Some(hex) => u16::from_str_radix(hex, 16),
            None => value.parse::<u16>(),
        };
        return parsed
            .map(|w| Some(Body::Word(w)))
            .map_err(|_| malformed(format!("`{value}` is not a 16-bit value")));
    }
    if let (Some(prefix), Some(last)) = (cfg.operand_prefix.as_deref(), tokens.last_mut()) {
        let tok: &str = *last;
        if tok.len() > prefix.len() {
            if let Some(rest) = tok.strip_prefix(prefix) {
                *last = rest;
            }
        }
    }

    if !is_mnemonic(mnemonic) {
        return Err(Error::UnrecognizedLine { line: line.to_string() });
    }

    let desc = isa.instruction(mnemonic)?;
    if tokens.len() != desc.format.arity() {
        return Err(malformed(format!(
            "{} takes {}, found {} operand(s)",
            desc.mnemonic,
            desc.format.syntax(),
            tokens.len()
        )));
    }

    let reg = |t: &str| -> Result<Register, Error> { isa.register(t) };
    let imm = |t: &str| -> Result<u8, Error> {
        parse_imm(t).map_err(|e| e.unwrap_or_else(|| malformed(format!("`{t}` is not a number"))))
    };

    let operands = match desc.format {
        Format::RegImm => Operands::RegImm { rd: reg(tokens[0])?, imm: imm(tokens[1])? },
        Format::ImmOnly => Operands::ImmOnly { imm: imm(tokens[0])? },
        Format::RegOnly => Operands::RegOnly { rd: reg(tokens[0])? },
        Format::ThreeReg => Operands::ThreeReg {
            rd: reg(tokens[0])?,
            rs: reg(tokens[1])?,
            rt: reg(tokens[2])?,
        },
        Format::Bare => Operands::Bare,
        Format::Branch => {
            if !is_label_name(tokens[0]) {
                return Err(malformed(format!("`{}` is not a label name", tokens[0])));
            }
            Operands::Branch { target: Target::Label(tokens[0].to_string()) }
        }
    };
    Ok(Some(Body::Instr(Instruction { op: desc.op, operands })))
}

/// Decimal 8-bit immediate. `Err(None)` means the token is not a number at
/// all; `Err(Some(_))` means it is a number outside `0..=255`.
fn parse_imm(tok: &str) -> Result<u8, Option<Error>> {
    let digits = tok.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(tok);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(None);
    }
    tok.parse::<u8>().map_err(|_| Some(Error::ImmediateOverflow { value: tok.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Opcode;

    fn body(src: &str) -> Result<Option<Body>, Error> {
        parse_body(&Isa::new(), &AsmConfig::default(), src, src)
    }

    #[test]
    fn comments_are_removed() {
        assert_eq!(strip_comment("  # whole line"), "");
        assert_eq!(strip_comment("LOAD R1, 5 ; load five"), "LOAD R1, 5");
    }

    #[test]
    fn label_split() {
        assert_eq!(split_label("LOOP:").unwrap(), (Some("LOOP"), ""));
        assert_eq!(split_label("LOOP: SUB R1, R2, R3").unwrap(), (Some("LOOP"), "SUB R1, R2, R3"));
        assert_eq!(split_label("NOT R1").unwrap(), (None, "NOT R1"));
        assert!(matches!(split_label("9lives:"), Err(Error::UnrecognizedLine { .. })));
    }

    #[test]
    fn commas_are_optional() {
        let a = body("ADD R1, R2, R3").unwrap();
        let b = body("ADD R1 R2 R3").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn format_comes_from_the_table() {
        // RED's operand is an immediate even though it is a lone token
        let Some(Body::Instr(i)) = body("RED 12").unwrap() else { panic!() };
        assert_eq!(i.op, Opcode::Red);
        assert_eq!(i.operands, Operands::ImmOnly { imm: 12 });
        // and a register name there is not a number
        assert!(matches!(body("RED R1"), Err(Error::MalformedOperands { .. })));
    }

    #[test]
    fn immediate_bounds() {
        assert!(body("LOAD R1, 255").is_ok());
        assert!(matches!(body("LOAD R1, 256"), Err(Error::ImmediateOverflow { .. })));
        assert!(matches!(body("LOAD R1, -1"), Err(Error::ImmediateOverflow { .. })));
        assert!(matches!(body("LOAD R1, five"), Err(Error::MalformedOperands { .. })));
    }

    #[test]
    fn operand_count_is_checked() {
        assert!(matches!(body("YELLOW R1"), Err(Error::MalformedOperands { .. })));
        assert!(matches!(body("ADD R1, R2"), Err(Error::MalformedOperands { .. })));
        assert!(matches!(body("JUMP"), Err(Error::MalformedOperands { .. })));
    }

    #[test]
    fn memory_prefix_is_stripped() {
        let Some(Body::Instr(i)) = body("STORE R1, 0x1F642").unwrap() else { panic!() };
        assert_eq!(i.operands, Operands::RegImm { rd: Register::R1, imm: 42 });
    }

    #[test]
    fn word_directive() {
        assert_eq!(body(".word 0xA000").unwrap(), Some(Body::Word(0xA000)));
        assert_eq!(body(".word 17").unwrap(), Some(Body::Word(17)));
        assert!(matches!(body(".word 0x10000"), Err(Error::MalformedOperands { .. })));
    }

    #[test]
    fn unknown_and_unrecognized() {
        assert!(matches!(body("NOP"), Err(Error::UnknownInstruction { .. })));
        assert!(matches!(body("LOAD Q1, 3"), Err(Error::UnknownRegister { .. })));
        assert!(matches!(body("..."), Err(Error::UnrecognizedLine { .. })));
        assert!(matches!(body("}"), Err(Error::UnrecognizedLine { .. })));
    }
}
