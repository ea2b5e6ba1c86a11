use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::{EnumIter, IntoEnumIterator};

/// Width of one code in an intermediate-file error list.
pub const CODE_WIDTH: usize = 4;

/// Per-line diagnostics. Each code is written to the intermediate file as a
/// fixed 4-digit string; a line may carry several, concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Code {
    InvalidOperand,
    DuplicateSymbol,
    InvalidOpcode,
    InvalidSymbol,
    MissingQuotes,
    OddHexDigits,
    StringTooLong,
    HexTooLong,
    BadSpecifier,
    SymbolTooLong,
    SymbolStartsNonLetter,
    SymbolNotAlphanumeric,
    OperandNotAlphanumeric,
    MissingStartOperand,
    MisplacedStart,
    IllegalStartOperand,
    IllegalEndOperand,
}

impl Code {
    pub fn code(self) -> &'static str {
        match self {
            Code::InvalidOperand => "0001",
            Code::DuplicateSymbol => "0002",
            Code::InvalidOpcode => "0003",
            Code::InvalidSymbol => "0004",
            Code::MissingQuotes => "0005",
            Code::OddHexDigits => "0006",
            Code::StringTooLong => "0007",
            Code::HexTooLong => "0008",
            Code::BadSpecifier => "0009",
            Code::SymbolTooLong => "0010",
            Code::SymbolStartsNonLetter => "0011",
            Code::SymbolNotAlphanumeric => "0012",
            Code::OperandNotAlphanumeric => "0013",
            Code::MissingStartOperand => "0014",
            Code::MisplacedStart => "0015",
            Code::IllegalStartOperand => "0016",
            Code::IllegalEndOperand => "0017",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Code::InvalidOperand => "Invalid Operand",
            Code::DuplicateSymbol => "Duplicate Symbol",
            Code::InvalidOpcode => "Invalid Opcode",
            Code::InvalidSymbol => "Invalid Symbol",
            Code::MissingQuotes => "Missing Quotes",
            Code::OddHexDigits => "Odd number of hex digits",
            Code::StringTooLong => "String too long",
            Code::HexTooLong => "Hex too long",
            Code::BadSpecifier => "Specifier must be C or X",
            Code::SymbolTooLong => "Symbol too long",
            Code::SymbolStartsNonLetter => "Symbol starts with a non-letter character",
            Code::SymbolNotAlphanumeric => "Symbol contains non-alphanumeric characters",
            Code::OperandNotAlphanumeric => "Operand contains non-alphanumeric characters",
            Code::MissingStartOperand => "Missing START operand",
            Code::MisplacedStart => "Misplaced/Duplicate START",
            Code::IllegalStartOperand => "Illegal START Operand",
            Code::IllegalEndOperand => "Illegal END operand",
        }
    }
}

static CODE_TEXT: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| Code::iter().map(|c| (c.code(), c.text())).collect());

/// Decodes a 4-character chunk read back from the intermediate file.
pub fn describe(code: &str) -> Option<&'static str> {
    CODE_TEXT.get(code).copied()
}

/// Error-code accumulator for one source line.
#[derive(Debug, Default)]
pub struct ErrList(String);

impl ErrList {
    pub fn new() -> Self {
        ErrList(String::new())
    }

    pub fn push(&mut self, code: Code) {
        self.0.push_str(code.code());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
