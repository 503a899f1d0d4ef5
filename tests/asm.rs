use hue16::word::to_bits;
use hue16::{assemble, AsmConfig, Error, Isa, Location, Severity};

fn asm(src: &str) -> hue16::Assembly {
    assemble(&Isa::new(), &AsmConfig::default(), src).unwrap()
}

#[test]
fn load_immediate_layout() {
    let out = asm("LOAD R1, 5\n");
    assert_eq!(out.words.len(), 1);
    assert_eq!(to_bits(out.words[0]), "0011100100000101");
}

#[test]
fn one_word_per_format() {
    let src = "\
STORE A0, 255
BLUE 3
NOT B
DIV R3, R2, R1
BLACK
";
    let bits: Vec<String> = asm(src).words.iter().map(|w| to_bits(*w)).collect();
    assert_eq!(
        bits,
        vec![
            "0100011111111111", // STORE A0, 255
            "0101100000000011", // BLUE 3, register field is fill
            "0011010100000000", // NOT B
            "0001101101000100", // DIV R3, R2, R1
            "0111000000000000", // BLACK
        ]
    );
}

#[test]
fn loop_symbol_table() {
    let out = asm("LOOP: SUB R1, R2, R3\nJUMP LOOP\n");
    assert_eq!(out.symbols.address("LOOP"), Some(0));
    assert_eq!(to_bits(out.words[1]), "0100100000000000");
    assert!(out.diagnostics.is_empty());
}

#[test]
fn duplicate_label_fails_whole_run() {
    let err = assemble(&Isa::new(), &AsmConfig::default(), "L:\nPINK\nL:\nPINK\n").unwrap_err();
    assert!(matches!(err, Error::DuplicateLabel { ref name, first_line: 1 } if name == "L"));
}

#[test]
fn per_line_errors_keep_other_words() {
    let src = "\
LOAD R1, 256
LOAD R1, -1
ADD R1, R2
FLY R1
NOT R7
PINK
";
    let out = asm(src);
    assert_eq!(out.words, vec![0b10001 << 11]);
    let kinds: Vec<(&str, Location)> = out.diagnostics.iter().map(|d| (d.error.kind(), d.location)).collect();
    assert_eq!(
        kinds,
        vec![
            ("ImmediateOverflow", Location::Line(1)),
            ("ImmediateOverflow", Location::Line(2)),
            ("MalformedOperands", Location::Line(3)),
            ("UnknownInstruction", Location::Line(4)),
            ("UnknownRegister", Location::Line(5)),
        ]
    );
    assert!(out.diagnostics.iter().all(|d| d.severity == Severity::Error));
    assert!(!out.is_failure());
}

#[test]
fn malformed_operands_name_the_line() {
    let out = asm("  GREEN R1 ; oops\n");
    let err = &out.diagnostics[0].error;
    assert!(matches!(err, Error::MalformedOperands { line, .. } if line == "GREEN R1"));
    assert!(out.is_failure());
}

#[test]
fn comments_blanks_and_case() {
    let out = asm("# header\n\n  load r1, 5   ; trailing\nyellow\n");
    assert_eq!(out.words, vec![0b00111_001_00000101, 0b01101 << 11]);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn translator_placeholders_are_skipped_by_default() {
    let src = "LOAD R2, 1\nLOAD R3, 2\nSUB R1, R2, R3\nJUMP IFZERO0\n...\nIFZERO0:\nPINK\n";
    let out = asm(src);
    assert_eq!(out.words.len(), 5);
    assert_eq!(out.words[3], (0b01001 << 11) | 4);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].severity, Severity::Warning);
    assert!(!out.has_errors());

    let strict = assemble(&Isa::new(), &AsmConfig::strict(), src);
    assert!(matches!(strict, Err(Error::UnrecognizedLine { line }) if line == "..."));
}

#[test]
fn prefixed_memory_operand() {
    let out = asm("STORE R1, 0x1F67\n");
    assert_eq!(out.words, vec![0b01000_001_00000111]);

    let cfg = AsmConfig { operand_prefix: None, ..AsmConfig::default() };
    let raw = assemble(&Isa::new(), &cfg, "STORE R1, 0x1F67\n").unwrap();
    assert!(raw.words.is_empty());
    assert!(matches!(raw.diagnostics[0].error, Error::MalformedOperands { .. }));
}

#[test]
fn raw_word_directive_takes_a_slot() {
    let out = asm(".word 0xA000\nEND:\nJUMP END\n");
    assert_eq!(out.words, vec![0xA000, (0b01001 << 11) | 1]);
}

#[test]
fn failed_lines_never_shift_labels() {
    let src = "\
LOAD R1, 300
JUMP nowhere
L:
PINK
JUMP L
";
    let out = asm(src);
    assert_eq!(out.symbols.address("L"), Some(0));
    assert_eq!(out.words, vec![0b10001 << 11, 0b01001 << 11]);
    let kinds: Vec<(&str, Location)> = out.diagnostics.iter().map(|d| (d.error.kind(), d.location)).collect();
    assert_eq!(
        kinds,
        vec![("ImmediateOverflow", Location::Line(1)), ("UndefinedLabel", Location::Line(2))]
    );
}
