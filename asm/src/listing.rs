use std::io::{self, Write};

use crate::code::{self, CODE_WIDTH};

/// One listing row: address, object code, source text, decoded errors.
///
/// The address column is four characters, zero-filled when an address is
/// present and blank when the row has none (the END row). The object-code
/// column is eight characters, blank-filled. Both are uppercased.
pub fn write_row<W: Write>(
    out: &mut W,
    address: &str,
    object_code: &str,
    source: &str,
    errors: &str,
) -> io::Result<()> {
    let address = address.to_ascii_uppercase();
    let object_code = object_code.to_ascii_uppercase();
    if address.is_empty() {
        write!(out, "{:>4} ", address)?;
    } else {
        write!(out, "{:0>4} ", address)?;
    }
    write!(out, "{:>8} {}", object_code, source)?;
    write_errors(out, errors)?;
    writeln!(out)
}

/// Decodes the fixed-width error list into human-readable text. Codes that
/// are not in the table (a corrupted intermediate file) get a fixed notice.
fn write_errors<W: Write>(out: &mut W, errors: &str) -> io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    write!(out, "\tErrors: ")?;
    let mut rest = errors;
    while rest.len() >= CODE_WIDTH {
        let (chunk, tail) = rest.split_at(CODE_WIDTH);
        match code::describe(chunk) {
            Some(text) => write!(out, "{}, ", text)?,
            None => write!(
                out,
                "Unknown error reported. Something went wrong in the intermediate file.\t"
            )?,
        }
        rest = tail;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(address: &str, object_code: &str, source: &str, errors: &str) -> String {
        let mut out = Vec::new();
        write_row(&mut out, address, object_code, source, errors).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_row() {
        assert_eq!(
            row("1000", "000001", "FIRST LDA 0001", ""),
            "1000   000001 FIRST LDA 0001\n"
        );
    }

    #[test]
    fn address_is_zero_filled() {
        assert_eq!(row("33", "", " RSUB FOO", ""), "0033           RSUB FOO\n");
    }

    #[test]
    fn blank_address_row() {
        assert_eq!(row("", "", " END FIRST", ""), "               END FIRST\n");
    }

    #[test]
    fn object_code_is_upcased() {
        assert_eq!(
            row("1000", "00803f", " LDA BUF,X", ""),
            "1000   00803F  LDA BUF,X\n"
        );
    }

    #[test]
    fn errors_are_decoded() {
        assert_eq!(
            row("0", "------", "X WORD 5", "0002"),
            "0000   ------ X WORD 5\tErrors: Duplicate Symbol, \n"
        );
    }

    #[test]
    fn multiple_errors_decode_in_order() {
        let text = row("0", "------", "C BYTE X'F'", "00060001");
        assert!(text.ends_with("\tErrors: Odd number of hex digits, Invalid Operand, \n"));
    }

    #[test]
    fn unknown_code_gets_notice() {
        let text = row("0", "------", " LDA A", "9999");
        assert!(text.contains("Unknown error reported"));
    }
}
