use std::io::{self, Write};

/// Hex-character capacity of one text record's machine-code section
/// (30 bytes of object code).
pub const DATA_CAP: usize = 60;

/// H record: program name (space-padded to six columns), load address,
/// program length.
pub fn header<W: Write>(out: &mut W, name: &str, address: &str, length: i32) -> io::Result<()> {
    writeln!(
        out,
        "H{:<6}{:0>6}{:06X}",
        name,
        address.to_ascii_uppercase(),
        length
    )
}

/// Opens a text record. The header is written eagerly; the byte count and
/// data follow when the record is closed.
pub fn open_text<W: Write>(out: &mut W, address: &str) -> io::Result<()> {
    write!(out, "T{:0>6}", address.to_ascii_uppercase())
}

/// Closes a text record with its byte count and the accumulated machine
/// code. `data` holds two hex characters per byte.
pub fn close_text<W: Write>(out: &mut W, data: &str) -> io::Result<()> {
    writeln!(out, "{:02X}{}", data.len() / 2, data.to_ascii_uppercase())
}

/// E record: execution entry point. No trailing newline.
pub fn end<W: Write>(out: &mut W, start: i32) -> io::Result<()> {
    write!(out, "E{:06X}", start)
}
