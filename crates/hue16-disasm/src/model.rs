use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::Path;

use hue16::word::{self, Word};
use hue16::Diagnostic;

/// On-disk word encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WordFormat {
    /// One 16-digit `0`/`1` string per line
    Text,
    /// Big-endian 16-bit words, no header
    Bin,
}

#[derive(Debug, Clone)]
pub struct Image {
    pub words: Vec<Word>,
    /// Lines of a text image that were not valid words.
    pub diagnostics: Vec<Diagnostic>,
}

pub fn load_words(path: &Path, format: WordFormat) -> Result<Image> {
    match format {
        WordFormat::Text => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let (words, diagnostics) = word::parse_listing(&text);
            Ok(Image { words, diagnostics })
        }
        WordFormat::Bin => {
            let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let (words, rest) = word::from_be_bytes(&bytes);
            anyhow::ensure!(rest.is_none(), "{} has an odd number of bytes", path.display());
            Ok(Image { words, diagnostics: Vec::new() })
        }
    }
}

pub fn encode_words(words: &[Word], format: WordFormat) -> Vec<u8> {
    match format {
        WordFormat::Text => word::render_listing(words).into_bytes(),
        WordFormat::Bin => word::to_be_bytes(words),
    }
}

pub fn write_words(path: &Path, words: &[Word], format: WordFormat) -> Result<()> {
    std::fs::write(path, encode_words(words, format))
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_bin_load_the_same_words() {
        let dir = std::env::temp_dir();
        let words = [0b0011100100000101u16, 0b0100100000000000];
        for (fmt, name) in [(WordFormat::Text, "_hue16_words.txt"), (WordFormat::Bin, "_hue16_words.bin")] {
            let path = dir.join(name);
            write_words(&path, &words, fmt).unwrap();
            let img = load_words(&path, fmt).unwrap();
            assert_eq!(img.words, words);
            assert!(img.diagnostics.is_empty());
            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn odd_binary_is_rejected() {
        let path = std::env::temp_dir().join("_hue16_odd.bin");
        std::fs::write(&path, [0x39u8, 0x05, 0x01]).unwrap();
        assert!(load_words(&path, WordFormat::Bin).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
