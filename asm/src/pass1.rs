use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use arch::{Op, WORD_SIZE};

use crate::code::{Code, ErrList};
use crate::error::Error;
use crate::parser::Line;
use crate::util;
use crate::{Assembler, INTERMEDIATE_FILE};

/// Character limit of a BYTE C'...' constant.
const STRING_LIMIT: usize = 30;
/// Digit limit of a BYTE X'...' constant.
const HEX_LIMIT: usize = 32;

impl Assembler {
    /// Pass 1: walks the source line by line, assigns each line its address,
    /// collects the symbol table and writes the intermediate stream.
    ///
    /// A source that cannot be opened is reported on stdout and the pass
    /// returns without touching the intermediate file; the message is part
    /// of the external contract.
    pub fn pass1(&mut self, source: &Path) -> Result<(), Error> {
        let file = match File::open(source) {
            Ok(file) => file,
            Err(_) => {
                println!("Failed to load specified file");
                return Ok(());
            }
        };
        let inter_path = self.workdir.join(INTERMEDIATE_FILE);
        let inter = File::create(&inter_path)
            .map_err(|e| Error::FileCreate(inter_path.display().to_string(), e))?;
        let mut inter = BufWriter::new(inter);

        let mut start_found = false;
        for raw in BufReader::new(file).lines() {
            let raw = raw.map_err(Error::FileRead)?;
            if raw.is_empty() {
                continue;
            }
            if raw.starts_with('.') {
                continue;
            }
            let line = Line::parse(&raw);
            if line.is_blank() {
                continue;
            }
            let mut errors = ErrList::new();

            if line.opcode == "START" {
                if start_found {
                    errors.push(Code::MisplacedStart);
                    self.any_errors = true;
                }
                start_found = true;
                if !line.label.is_empty() && !util::is_valid_symbol(&line.label, &mut errors) {
                    errors.push(Code::InvalidSymbol);
                }
                match util::str_to_int(&line.operand, 16) {
                    Some(address) => {
                        self.locctr = address;
                        self.starting_address = address;
                    }
                    None => {
                        self.locctr = 0;
                        self.starting_address = 0;
                        errors.push(Code::InvalidOperand);
                    }
                }
                self.write_block(&mut inter, &line, "START", &errors)?;
                continue;
            }
            // The first real line was not START: the program loads at zero.
            if !start_found {
                start_found = true;
                self.locctr = 0;
                self.starting_address = 0;
            }

            if !matches!(line.opcode.as_str(), "BYTE" | "WORD" | "RESW" | "RESB")
                && !util::is_valid_operand(&line.operand, &mut errors)
            {
                errors.push(Code::InvalidOperand);
            }

            if line.opcode == "END" {
                if !util::is_valid_symbol(&line.operand, &mut errors)
                    && !util::is_hex_symbol(&line.operand)
                {
                    errors.push(Code::IllegalEndOperand);
                }
                self.write_block(&mut inter, &line, "END", &errors)?;
                self.program_length = self.locctr - self.starting_address;
                break;
            }

            if !line.label.is_empty() {
                if self.symtab.contains(&line.label) {
                    errors.push(Code::DuplicateSymbol);
                } else if util::is_valid_symbol(&line.label, &mut errors) {
                    self.symtab.insert(line.label.clone(), self.locctr);
                } else {
                    errors.push(Code::InvalidSymbol);
                }
            }

            let mut resolved = line.opcode.clone();
            let mut increment = 0;
            match line.opcode.as_str() {
                "WORD" => {
                    if util::str_to_int(&line.operand, 10).is_none() {
                        errors.push(Code::InvalidOperand);
                    }
                    increment = WORD_SIZE;
                }
                "RESW" => match util::str_to_int(&line.operand, 10) {
                    Some(n) => increment = WORD_SIZE.saturating_mul(n),
                    None => errors.push(Code::InvalidOperand),
                },
                "RESB" => match util::str_to_int(&line.operand, 10) {
                    Some(n) => increment = n,
                    None => errors.push(Code::InvalidOperand),
                },
                "BYTE" => match constant_length(&line.operand, &mut errors) {
                    Some(length) => increment = length,
                    None => errors.push(Code::InvalidOperand),
                },
                _ => match Op::parse(&line.opcode) {
                    Ok(op) => {
                        resolved = format!("{:x}", u8::from(op));
                        increment = WORD_SIZE;
                    }
                    Err(_) => errors.push(Code::InvalidOpcode),
                },
            }
            self.write_block(&mut inter, &line, &resolved, &errors)?;
            self.locctr = self.locctr.saturating_add(increment);
        }
        Ok(())
    }

    /// One intermediate block: source, resolved opcode, address, operand,
    /// error list.
    fn write_block<W: Write>(
        &self,
        out: &mut W,
        line: &Line,
        opcode: &str,
        errors: &ErrList,
    ) -> Result<(), Error> {
        let wrap = |e| Error::FileWrite(INTERMEDIATE_FILE.to_string(), e);
        writeln!(out, "{}", line.raw).map_err(wrap)?;
        writeln!(out, "{}", opcode).map_err(wrap)?;
        writeln!(out, "{:x}", self.locctr).map_err(wrap)?;
        writeln!(out, "{}", line.operand).map_err(wrap)?;
        writeln!(out, "{}", errors.as_str()).map_err(wrap)?;
        Ok(())
    }
}

/// Size in bytes of a BYTE constant, or `None` when the operand is
/// malformed. The specific violation lands in `errors`; the caller adds the
/// generic Invalid Operand code on top.
fn constant_length(operand: &str, errors: &mut ErrList) -> Option<i32> {
    let bytes = operand.as_bytes();
    // shortest well-formed constant is C'' / X'' plus one payload character
    if bytes.len() < 4 {
        return None;
    }
    if bytes[0] != b'C' && bytes[0] != b'X' {
        errors.push(Code::BadSpecifier);
        return None;
    }
    if bytes[1] != b'\'' || bytes[bytes.len() - 1] != b'\'' {
        errors.push(Code::MissingQuotes);
        return None;
    }
    let body = &bytes[2..bytes.len() - 1];
    if bytes[0] == b'C' {
        if body.len() > STRING_LIMIT {
            errors.push(Code::StringTooLong);
            return None;
        }
        Some(body.len() as i32)
    } else {
        if !body.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        if body.len() > HEX_LIMIT {
            errors.push(Code::HexTooLong);
            return None;
        }
        if body.len() % 2 == 1 {
            errors.push(Code::OddHexDigits);
            return None;
        }
        Some((body.len() / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(operand: &str) -> (Option<i32>, String) {
        let mut errors = ErrList::new();
        let length = constant_length(operand, &mut errors);
        (length, errors.as_str().to_string())
    }

    macro_rules! test_byte {
        ($($name:ident: $operand:expr => ($len:expr, $codes:expr),)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(length($operand), ($len, $codes.to_string()));
                }
            )*
        }
    }

    test_byte! {
        char_constant: "C'AB'" => (Some(2), ""),
        char_constant_max: "C'ABCDEFGHIJKLMNOPQRSTUVWXYZ1234'" => (Some(30), ""),
        char_constant_too_long: "C'ABCDEFGHIJKLMNOPQRSTUVWXYZ12345'" => (None, "0007"),
        hex_constant: "X'0F0F'" => (Some(2), ""),
        hex_constant_odd: "X'F0F'" => (None, "0006"),
        hex_constant_single: "X'F'" => (None, "0006"),
        hex_constant_too_long: "X'000000000000000000000000000000000F'" => (None, "0008"),
        hex_constant_bad_digit: "X'0G'" => (None, ""),
        bad_specifier: "Y'AB'" => (None, "0009"),
        missing_quotes: "CABCD" => (None, "0005"),
        too_short: "C''" => (None, ""),
    }
}
