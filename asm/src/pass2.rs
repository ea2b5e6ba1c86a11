use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};

use arch::{Op, INDEX_BIT, MSIZE};

use crate::error::Error;
use crate::listing;
use crate::record;
use crate::util;
use crate::{Assembler, INTERMEDIATE_FILE, LISTING_FILE, OBJECT_FILE};

/// Placeholder object code for lines that resolve to nothing.
const NO_CODE: &str = "------";

impl Assembler {
    /// Pass 2: reads the intermediate stream back in five-line blocks,
    /// synthesizes object code, packs text records and emits the listing
    /// and object files. The object file is removed again when any line
    /// carried errors or a post-pass check failed.
    pub fn pass2(&mut self) -> Result<(), Error> {
        let inter_path = self.workdir.join(INTERMEDIATE_FILE);
        let inter = match File::open(&inter_path) {
            Ok(file) => file,
            Err(_) => {
                println!("Failed to load the intermediate file!");
                return Ok(());
            }
        };
        let listing_path = self.workdir.join(LISTING_FILE);
        let object_path = self.workdir.join(OBJECT_FILE);
        let mut listing = BufWriter::new(
            File::create(&listing_path)
                .map_err(|e| Error::FileCreate(listing_path.display().to_string(), e))?,
        );
        let mut object = BufWriter::new(
            File::create(&object_path)
                .map_err(|e| Error::FileCreate(object_path.display().to_string(), e))?,
        );
        let wl = |e| Error::FileWrite(LISTING_FILE.to_string(), e);
        let wo = |e| Error::FileWrite(OBJECT_FILE.to_string(), e);

        // Machine code accumulated for the open text record.
        let mut buffer = String::new();
        let mut start_set = false;
        let mut end_found = false;
        // A reserve directive closed the record; the next one opens at the
        // address of the next line that yields object code.
        let mut defer_open = false;

        let mut blocks = BufReader::new(inter).lines();
        loop {
            let source = match blocks.next() {
                None => break,
                Some(line) => line.map_err(Error::FileRead)?,
            };
            let opcode = next_line(&mut blocks)?;
            let address = next_line(&mut blocks)?;
            let operand = next_line(&mut blocks)?;
            let errors = next_line(&mut blocks)?;

            if !self.any_errors && !errors.is_empty() {
                self.any_errors = true;
            }

            if opcode == "START" {
                listing::write_row(&mut listing, &address, "", &source, &errors).map_err(wl)?;
                if !start_set {
                    // program name: the source line up to the first space
                    let name: String = source.chars().take_while(|&c| c != ' ').collect();
                    record::header(&mut object, &name, &address, self.program_length)
                        .map_err(wo)?;
                    record::open_text(&mut object, &address).map_err(wo)?;
                }
                start_set = true;
                continue;
            }
            if !start_set {
                start_set = true;
                record::header(&mut object, "NONAME", "00000", self.program_length).map_err(wo)?;
                record::open_text(&mut object, &address).map_err(wo)?;
            }

            if opcode == "END" {
                if !buffer.is_empty() {
                    record::close_text(&mut object, &buffer).map_err(wo)?;
                }
                listing::write_row(&mut listing, "", "", &source, &errors).map_err(wl)?;
                record::end(&mut object, self.starting_address).map_err(wo)?;
                end_found = true;
                break;
            }

            let object_code = if errors.is_empty() {
                self.object_code(&opcode, &operand)
            } else {
                NO_CODE.to_string()
            };
            listing::write_row(&mut listing, &address, &object_code, &source, &errors)
                .map_err(wl)?;

            if !object_code.is_empty() && defer_open {
                record::open_text(&mut object, &address).map_err(wo)?;
                defer_open = false;
            }
            // A reserve directive (empty object code) or a full record closes
            // the open one.
            if object_code.is_empty() || buffer.len() + object_code.len() > record::DATA_CAP {
                if !buffer.is_empty() {
                    record::close_text(&mut object, &buffer).map_err(wo)?;
                    if !object_code.is_empty() {
                        record::open_text(&mut object, &address).map_err(wo)?;
                    } else {
                        defer_open = true;
                    }
                    buffer.clear();
                }
            }
            if !object_code.is_empty() {
                buffer.push_str(&object_code);
            }
        }

        if self.locctr > MSIZE {
            write!(
                listing,
                "\nFATAL ERROR\nProgram exceeds maximum memory capacity of {} bytes\n Last program address is: {}",
                MSIZE, self.locctr
            )
            .map_err(wl)?;
            self.any_errors = true;
        }
        if !end_found {
            writeln!(listing, "Error: Missing END directive").map_err(wl)?;
            self.any_errors = true;
        }

        listing.flush().map_err(wl)?;
        object.flush().map_err(wo)?;
        drop(object);
        if self.any_errors {
            fs::remove_file(&object_path)
                .map_err(|e| Error::FileRemove(object_path.display().to_string(), e))?;
        }
        Ok(())
    }

    /// Synthesizes the object code for one intermediate block. `opcode` is
    /// the resolved field of the block: a hex byte for instructions, the
    /// mnemonic itself for directives.
    fn object_code(&self, opcode: &str, operand: &str) -> String {
        if opcode == "RESB" || opcode == "RESW" {
            return String::new();
        }
        if opcode == "BYTE" {
            return byte_constant(operand);
        }
        if opcode == "WORD" {
            if let Some(value) = util::str_to_int(operand, 10) {
                return format!("{:06x}", value);
            }
            return NO_CODE.to_string();
        }

        let indexed = is_indexed(operand);
        let bare = if indexed {
            operand.split(',').next().unwrap_or_default()
        } else {
            operand
        };

        if util::is_hex_symbol(bare) {
            if let Some(address) = util::str_to_int(bare, 16) {
                return format!("{:0>2}{:04x}", opcode, address);
            }
        }
        if let Some(mut address) = self.symtab.get(bare) {
            if indexed {
                address |= INDEX_BIT;
            }
            return format!("{:0>2}{:04x}", opcode, address);
        }
        // RSUB ignores its operand field entirely
        if util::str_to_int(opcode, 16) == Some(i32::from(u8::from(Op::RSUB))) {
            return format!("{:0<6}", opcode);
        }
        NO_CODE.to_string()
    }
}

/// The remaining lines of a five-line block; missing trailing lines read as
/// empty, matching a truncated intermediate file.
fn next_line<R: BufRead>(lines: &mut Lines<R>) -> Result<String, Error> {
    match lines.next() {
        None => Ok(String::new()),
        Some(line) => line.map_err(Error::FileRead),
    }
}

/// `,X` suffix marks indexed addressing; the operand proper precedes the
/// first comma.
fn is_indexed(operand: &str) -> bool {
    operand.len() >= 3 && operand.ends_with(",X")
}

/// BYTE constants: C'...' emits each character's ASCII value as two hex
/// digits, X'...' passes the digits through verbatim.
fn byte_constant(operand: &str) -> String {
    let bytes = operand.as_bytes();
    if bytes.len() <= 3 {
        return String::new();
    }
    let body = &bytes[2..bytes.len() - 1];
    match bytes[0] {
        b'C' => body.iter().map(|b| format!("{:02x}", b)).collect(),
        b'X' => String::from_utf8_lossy(body).into_owned(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_assembler() -> Assembler {
        let mut assembler = Assembler::new();
        assembler.symtab.insert("BUFFER".to_string(), 0x0036);
        assembler.symtab.insert("FIRST".to_string(), 0x1000);
        assembler
    }

    #[test]
    fn reserves_have_no_object_code() {
        let assembler = bare_assembler();
        assert_eq!(assembler.object_code("RESB", "10"), "");
        assert_eq!(assembler.object_code("RESW", "2"), "");
    }

    #[test]
    fn byte_char_constant() {
        assert_eq!(byte_constant("C'AB'"), "4142");
        assert_eq!(byte_constant("C'EOF'"), "454f46");
    }

    #[test]
    fn byte_hex_constant_passes_through() {
        assert_eq!(byte_constant("X'0F0F'"), "0F0F");
    }

    #[test]
    fn word_is_six_hex_digits() {
        let assembler = bare_assembler();
        assert_eq!(assembler.object_code("WORD", "5"), "000005");
        assert_eq!(assembler.object_code("WORD", "4096"), "001000");
    }

    #[test]
    fn hex_operand() {
        let assembler = bare_assembler();
        assert_eq!(assembler.object_code("0", "0001"), "000001");
        assert_eq!(assembler.object_code("3c", "0F00"), "3c0f00");
    }

    #[test]
    fn symbol_operand() {
        let assembler = bare_assembler();
        assert_eq!(assembler.object_code("0", "FIRST"), "001000");
    }

    #[test]
    fn indexed_symbol_sets_high_bit() {
        let assembler = bare_assembler();
        assert_eq!(assembler.object_code("0", "BUFFER,X"), "008036");
    }

    #[test]
    fn rsub_pads_right() {
        let assembler = bare_assembler();
        assert_eq!(assembler.object_code("4c", "FOO"), "4c0000");
    }

    #[test]
    fn unresolvable_operand_yields_placeholder() {
        let assembler = bare_assembler();
        assert_eq!(assembler.object_code("0", "NOWHERE"), "------");
    }
}
