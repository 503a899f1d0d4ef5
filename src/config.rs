use serde::{Deserialize, Serialize};

/// What the assembler does with a line that is neither a label nor shaped
/// like an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnrecognizedPolicy {
    /// Record a warning and drop the line.
    #[default]
    Skip,
    /// Abort the whole run.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub unrecognized: UnrecognizedPolicy,
    /// Memory-base prefix stripped from the last operand (translator output
    /// writes data addresses as `0x1F6<n>`).
    pub operand_prefix: Option<String>,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            unrecognized: UnrecognizedPolicy::Skip,
            operand_prefix: Some("0x1F6".to_string()),
        }
    }
}

impl AsmConfig {
    pub fn strict() -> Self {
        Self { unrecognized: UnrecognizedPolicy::Fail, ..Self::default() }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
