//! Word I/O: the textual `0`/`1` form and the big-endian binary form.

use bitvec::prelude::*;

use crate::error::{Diagnostic, Error, Location};

pub type Word = u16;

pub const WORD_BITS: usize = 16;

/// Render a word as 16 binary digits, most significant bit first.
pub fn to_bits(word: Word) -> String {
    word.view_bits::<Msb0>().iter().map(|b| if *b { '1' } else { '0' }).collect()
}

pub fn parse_bits(text: &str) -> Result<Word, Error> {
    let text = text.trim();
    let malformed = || Error::MalformedWord { text: text.to_string() };
    if text.len() != WORD_BITS {
        return Err(malformed());
    }
    let mut bits = BitArray::<Word, Msb0>::ZERO;
    for (i, c) in text.chars().enumerate() {
        match c {
            '0' => {}
            '1' => bits.set(i, true),
            _ => return Err(malformed()),
        }
    }
    Ok(bits.into_inner())
}

/// Parse a text listing, one word per line. Blank lines are ignored; bad
/// lines are reported with their 1-based line number and skipped.
pub fn parse_listing(text: &str) -> (Vec<Word>, Vec<Diagnostic>) {
    let mut words = Vec::new();
    let mut diags = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_bits(line) {
            Ok(w) => words.push(w),
            Err(e) => diags.push(Diagnostic::error(Location::Line(i + 1), e)),
        }
    }
    (words, diags)
}

pub fn render_listing(words: &[Word]) -> String {
    let mut out = String::with_capacity(words.len() * (WORD_BITS + 1));
    for w in words {
        out.push_str(&to_bits(*w));
        out.push('\n');
    }
    out
}

pub fn to_be_bytes(words: &[Word]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

/// Reassemble big-endian words. A trailing odd byte is returned separately.
pub fn from_be_bytes(bytes: &[u8]) -> (Vec<Word>, Option<u8>) {
    let chunks = bytes.chunks_exact(2);
    let rest = chunks.remainder().first().copied();
    (chunks.map(|c| u16::from_be_bytes([c[0], c[1]])).collect(), rest)
}
