use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use hue16::{AsmConfig, Assembler, Isa, UnrecognizedPolicy};
use hue16_disasm::{init_tracing, write_words, WordFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "hue16 assembler")]
struct Opts {
    /// Input assembly file (one label and/or instruction per line)
    #[arg(short, long)]
    input: PathBuf,
    /// Output word file
    #[arg(short, long)]
    output: PathBuf,
    /// Encoding of the output file
    #[arg(long, value_enum, default_value_t = WordFormat::Text)]
    format: WordFormat,
    /// Abort on lines that are neither labels nor instructions
    #[arg(long)]
    strict: bool,
    /// Assembler settings as JSON (see AsmConfig)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Export the symbol table to JSON
    #[arg(long, value_name = "FILE")]
    symbols_out: Option<PathBuf>,
}

fn load_config(opts: &Opts) -> Result<AsmConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            AsmConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => AsmConfig::default(),
    };
    if opts.strict {
        cfg.unrecognized = UnrecognizedPolicy::Fail;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    init_tracing();
    let opts = Opts::parse();
    let cfg = load_config(&opts)?;
    let text = fs::read_to_string(&opts.input).with_context(|| format!("reading {}", opts.input.display()))?;

    let isa = Isa::new();
    let asm = Assembler::new(&isa, cfg);
    let out = asm
        .assemble(&text)
        .with_context(|| format!("assembling {}", opts.input.display()))?;

    for d in &out.diagnostics {
        eprintln!("{}: {d}", opts.input.display());
    }
    anyhow::ensure!(!out.is_failure(), "{}: no words produced", opts.input.display());

    write_words(&opts.output, &out.words, opts.format)?;
    if let Some(path) = &opts.symbols_out {
        fs::write(path, serde_json::to_string_pretty(out.symbols.symbols())?)?;
    }
    info!(words = out.words.len(), labels = out.symbols.len(), "assembly done");
    Ok(())
}
