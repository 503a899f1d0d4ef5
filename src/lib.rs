pub mod asm;
pub mod config;
pub mod decoder;
pub mod disasm;
pub mod error;
pub mod instructions;
pub mod isa;
pub mod registers;
pub mod word;

pub use asm::{assemble, Assembler, Assembly, Symbol, SymbolTable};
pub use config::{AsmConfig, UnrecognizedPolicy};
pub use decoder::{Decoded, Decoder, Instruction, Operands, Target};
pub use disasm::{disassemble, Disassembly, ListingLine};
pub use error::{Diagnostic, Error, Location, Severity};
pub use instructions::{Format, Opcode};
pub use isa::{hue16::Hue16Decoder, Isa};
pub use registers::Register;
pub use word::Word;
