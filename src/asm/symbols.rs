//! Symbol table management for labels

use std::collections::HashMap;

use serde::Serialize;

use crate::asm::parse::{Item, ItemKind};
use crate::error::Error;

/// A label bound to an instruction address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    /// 0-based index of the word the label precedes.
    pub address: usize,
    /// Source line of the declaration.
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Pass 1: walk the items with an address counter starting at 0. Labels
    /// bind to the counter without advancing it; every word-producing item
    /// advances it by one. Returns the table and the instruction count.
    pub fn build(items: &[Item]) -> Result<(Self, usize), Error> {
        let mut table = Self::default();
        let mut address = 0usize;
        for it in items {
            match &it.kind {
                ItemKind::Label(name) => table.insert(name, address, it.line)?,
                ItemKind::Body(_) => address += 1,
            }
        }
        Ok((table, address))
    }

    fn insert(&mut self, name: &str, address: usize, line: usize) -> Result<(), Error> {
        if let Some(existing) = self.lookup(name) {
            return Err(Error::DuplicateLabel { name: name.to_string(), first_line: existing.line });
        }
        self.index.insert(name.to_string(), self.symbols.len());
        self.symbols.push(Symbol { name: name.to_string(), address, line });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    pub fn address(&self, name: &str) -> Option<usize> {
        self.lookup(name).map(|s| s.address)
    }

    /// Symbols in declaration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::parse::Body;

    fn label(line: usize, name: &str) -> Item {
        Item { line, kind: ItemKind::Label(name.to_string()) }
    }

    fn word(line: usize) -> Item {
        Item { line, kind: ItemKind::Body(Body::Word(0)) }
    }

    #[test]
    fn labels_take_no_slot() {
        let items = [label(1, "START"), word(2), word(3), label(4, "MID"), label(5, "ALSO"), word(6), label(7, "END")];
        let (table, count) = SymbolTable::build(&items).unwrap();
        assert_eq!(count, 3);
        assert_eq!(table.address("START"), Some(0));
        assert_eq!(table.address("MID"), Some(2));
        assert_eq!(table.address("ALSO"), Some(2));
        assert_eq!(table.address("END"), Some(3));
        assert_eq!(table.address("start"), None);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn duplicate_is_rejected() {
        let items = [label(1, "L"), word(2), label(3, "L")];
        let err = SymbolTable::build(&items).unwrap_err();
        assert_eq!(err, Error::DuplicateLabel { name: "L".into(), first_line: 1 });
    }
}
