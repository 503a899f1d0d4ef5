use std::fmt;

use serde::Serialize;

/// Everything that can go wrong while assembling or disassembling.
///
/// Whether a given error stops a run or only affects one line is decided by
/// the caller and recorded in a [`Diagnostic`]; the variants themselves carry
/// just enough context to point at the offending input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown instruction `{mnemonic}`")]
    UnknownInstruction { mnemonic: String },
    #[error("unknown register `{name}`")]
    UnknownRegister { name: String },
    #[error("unknown opcode {opcode:#07b} in word {word:#06x}")]
    UnknownOpcode { opcode: u8, word: u16 },
    #[error("label `{name}` already defined on line {first_line}")]
    DuplicateLabel { name: String, first_line: usize },
    #[error("undefined label `{name}`")]
    UndefinedLabel { name: String },
    #[error("immediate `{value}` does not fit in 8 bits")]
    ImmediateOverflow { value: String },
    #[error("label `{label}` resolves to {address}, beyond the 11-bit address field")]
    AddressOverflow { label: String, address: usize },
    #[error("malformed operands in `{line}`: {reason}")]
    MalformedOperands { line: String, reason: String },
    #[error("branch target {target} is outside the program ({count} instructions)")]
    DanglingBranchTarget { target: u16, count: usize },
    #[error("unrecognized line `{line}`")]
    UnrecognizedLine { line: String },
    #[error("malformed word `{text}`: expected 16 binary digits")]
    MalformedWord { text: String },
}

impl Error {
    /// Short machine-friendly name of the error kind, used in JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownInstruction { .. } => "UnknownInstruction",
            Error::UnknownRegister { .. } => "UnknownRegister",
            Error::UnknownOpcode { .. } => "UnknownOpcode",
            Error::DuplicateLabel { .. } => "DuplicateLabel",
            Error::UndefinedLabel { .. } => "UndefinedLabel",
            Error::ImmediateOverflow { .. } => "ImmediateOverflow",
            Error::AddressOverflow { .. } => "AddressOverflow",
            Error::MalformedOperands { .. } => "MalformedOperands",
            Error::DanglingBranchTarget { .. } => "DanglingBranchTarget",
            Error::UnrecognizedLine { .. } => "UnrecognizedLine",
            Error::MalformedWord { .. } => "MalformedWord",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Where a diagnostic points: a 1-based source line or a 0-based word index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "at", rename_all = "lowercase")]
pub enum Location {
    Line(usize),
    Word(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line(n) => write!(f, "line {n}"),
            Location::Word(i) => write!(f, "word {i}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Location,
    pub severity: Severity,
    pub error: Error,
}

impl Diagnostic {
    pub fn error(location: Location, error: Error) -> Self {
        Self { location, severity: Severity::Error, error }
    }

    pub fn warning(location: Location, error: Error) -> Self {
        Self { location, severity: Severity::Warning, error }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.error)
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut st = s.serialize_struct("Diagnostic", 4)?;
        st.serialize_field("location", &self.location)?;
        st.serialize_field("severity", &self.severity)?;
        st.serialize_field("kind", self.error.kind())?;
        st.serialize_field("message", &self.error.to_string())?;
        st.end()
    }
}
