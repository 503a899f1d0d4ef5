use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

use hue16::{disassemble, Isa};
use hue16_disasm::{init_tracing, load_words, report, WordFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "hue16 disassembler CLI", long_about = None)]
struct Cli {
    /// Input word file
    #[arg(value_name = "WORDFILE")]
    input: PathBuf,
    /// Encoding of the input file
    #[arg(long, value_enum, default_value_t = WordFormat::Text)]
    input_format: WordFormat,
    /// Output format: assembler source or a JSON report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Export reconstructed labels to JSON (Vec<{ addr, name }>)
    #[arg(long, value_name = "FILE")]
    labels_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let img = load_words(&cli.input, cli.input_format)?;
    for d in &img.diagnostics {
        eprintln!("{}: {d}", cli.input.display());
    }
    anyhow::ensure!(
        !img.words.is_empty() || img.diagnostics.is_empty(),
        "no valid words in {}",
        cli.input.display()
    );

    let isa = Isa::new();
    let dis = disassemble(&isa, &img.words);
    info!(words = img.words.len(), lines = dis.lines.len(), "disassembly done");
    for d in &dis.diagnostics {
        eprintln!("{}: {d}", cli.input.display());
    }

    let rep = report(&dis);
    if let Some(path) = &cli.labels_out {
        std::fs::write(path, serde_json::to_string_pretty(&rep.labels)?)?;
    }
    match cli.format {
        OutputFormat::Text => emit(cli.out.as_deref(), &dis.text())?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&rep)?;
            json.push('\n');
            emit(cli.out.as_deref(), &json)?;
        }
    }
    Ok(())
}
