//! Two-pass assembler: source lines in, 16-bit words out.

pub mod parse;
pub mod symbols;

use tracing::{debug, warn};

use crate::config::{AsmConfig, UnrecognizedPolicy};
use crate::decoder::{Instruction, Operands, Target};
use crate::error::{Diagnostic, Error, Location};
use crate::isa::{hue16, Isa, MAX_BRANCH_TARGET};
use crate::word::Word;

use parse::{Body, Item, ItemKind};
pub use symbols::{Symbol, SymbolTable};

/// Output of one assembly run. Per-line problems end up in `diagnostics`;
/// the lines that caused them contribute no word.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub words: Vec<Word>,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// No words and at least one error: nothing worth writing.
    pub fn is_failure(&self) -> bool {
        self.words.is_empty() && self.has_errors()
    }
}

pub struct Assembler<'a> {
    isa: &'a Isa,
    config: AsmConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(isa: &'a Isa, config: AsmConfig) -> Self {
        Self { isa, config }
    }

    /// Classify every line. Lines that fail to parse are reported and take no
    /// address slot. Only an unrecognized line under
    /// [`UnrecognizedPolicy::Fail`] aborts.
    pub fn parse(&self, source: &str) -> Result<(Vec<Item>, Vec<Diagnostic>), Error> {
        let mut items = Vec::new();
        let mut diags = Vec::new();
        for (i, raw) in source.lines().enumerate() {
            let line = i + 1;
            let text = parse::strip_comment(raw);
            if text.is_empty() {
                continue;
            }
            let body = match parse::split_label(text) {
                Ok((label, body)) => {
                    if let Some(name) = label {
                        items.push(Item { line, kind: ItemKind::Label(name.to_string()) });
                    }
                    parse::parse_body(self.isa, &self.config, body, text)
                }
                Err(e) => Err(e),
            };
            match body {
                Ok(Some(b)) => items.push(Item { line, kind: ItemKind::Body(b) }),
                Ok(None) => {}
                Err(e @ Error::UnrecognizedLine { .. }) => match self.config.unrecognized {
                    UnrecognizedPolicy::Fail => return Err(e),
                    UnrecognizedPolicy::Skip => {
                        warn!(line, text, "skipping unrecognized line");
                        diags.push(Diagnostic::warning(Location::Line(line), e));
                    }
                },
                Err(e) => diags.push(Diagnostic::error(Location::Line(line), e)),
            }
        }
        Ok((items, diags))
    }

    /// Assemble a whole program. Fails outright on a duplicate label (and on
    /// an unrecognized line when configured to); everything else is reported
    /// per line in the returned [`Assembly`].
    ///
    /// A line that yields no word takes no address slot, whichever stage
    /// rejects it. Jumps to undeclared labels are dropped before addresses
    /// are assigned. Jumps whose target does not fit the address field are
    /// dropped and the table rebuilt until every remaining jump fits;
    /// dropping a slot only lowers later addresses, so this settles.
    pub fn assemble(&self, source: &str) -> Result<Assembly, Error> {
        let (mut items, mut diagnostics) = self.parse(source)?;

        let (declared, _) = SymbolTable::build(&items)?;
        items.retain(|it| match branch_label(it) {
            Some(name) if declared.lookup(name).is_none() => {
                let e = Error::UndefinedLabel { name: name.to_string() };
                diagnostics.push(Diagnostic::error(Location::Line(it.line), e));
                false
            }
            _ => true,
        });

        let (symbols, count) = loop {
            let (symbols, count) = SymbolTable::build(&items)?;
            let before = items.len();
            items.retain(|it| {
                let Some(name) = branch_label(it) else { return true };
                match symbols.address(name) {
                    Some(address) if address > MAX_BRANCH_TARGET => {
                        let e = Error::AddressOverflow { label: name.to_string(), address };
                        diagnostics.push(Diagnostic::error(Location::Line(it.line), e));
                        false
                    }
                    _ => true,
                }
            });
            if items.len() == before {
                break (symbols, count);
            }
        };
        debug!(labels = symbols.len(), instructions = count, "pass 1 complete");

        let mut words = Vec::with_capacity(count);
        for it in &items {
            let ItemKind::Body(body) = &it.kind else { continue };
            match self.encode(body, &symbols) {
                Ok(w) => words.push(w),
                Err(e) => diagnostics.push(Diagnostic::error(Location::Line(it.line), e)),
            }
        }
        diagnostics.sort_by_key(|d| d.location);
        debug!(words = words.len(), diagnostics = diagnostics.len(), "pass 2 complete");

        Ok(Assembly { words, symbols, diagnostics })
    }

    fn encode(&self, body: &Body, symbols: &SymbolTable) -> Result<Word, Error> {
        match body {
            Body::Word(w) => Ok(*w),
            Body::Instr(insn) => {
                let resolved = resolve(insn, symbols)?;
                hue16::encode(self.isa, resolved.as_ref().unwrap_or(insn))
            }
        }
    }
}

/// Label named by a branch item, if it has one.
fn branch_label(it: &Item) -> Option<&str> {
    match &it.kind {
        ItemKind::Body(Body::Instr(Instruction {
            operands: Operands::Branch { target: Target::Label(name) },
            ..
        })) => Some(name.as_str()),
        _ => None,
    }
}

/// Swap a branch's label for its address. `None` when there is nothing to
/// resolve.
fn resolve(insn: &Instruction, symbols: &SymbolTable) -> Result<Option<Instruction>, Error> {
    let Operands::Branch { target: Target::Label(name) } = &insn.operands else {
        return Ok(None);
    };
    let address = symbols
        .address(name)
        .ok_or_else(|| Error::UndefinedLabel { name: name.clone() })?;
    if address > MAX_BRANCH_TARGET {
        return Err(Error::AddressOverflow { label: name.clone(), address });
    }
    Ok(Some(Instruction {
        op: insn.op,
        operands: Operands::Branch { target: Target::Address(address as u16) },
    }))
}

/// Assemble `source` with a fresh symbol table.
pub fn assemble(isa: &Isa, config: &AsmConfig, source: &str) -> Result<Assembly, Error> {
    Assembler::new(isa, config.clone()).assemble(source)
}
