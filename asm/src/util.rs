use crate::code::{Code, ErrList};

/// Longest symbol name the assembler accepts.
pub const SYMBOL_LIMIT: usize = 6;

/// A symbol is 1-6 characters, alphabetic first, alphanumeric rest.
///
/// The specific violation is appended to `errors`; callers add the generic
/// Invalid Symbol code on top when the context calls for it. An empty string
/// counts as starting with a non-letter.
pub fn is_valid_symbol(s: &str, errors: &mut ErrList) -> bool {
    if s.len() > SYMBOL_LIMIT {
        errors.push(Code::SymbolTooLong);
        return false;
    }
    match s.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            errors.push(Code::SymbolStartsNonLetter);
            return false;
        }
    }
    for c in s.chars().skip(1) {
        if !c.is_ascii_alphanumeric() {
            errors.push(Code::SymbolNotAlphanumeric);
            return false;
        }
    }
    true
}

/// Operand check for plain instructions. BYTE, WORD, RESB and RESW operands
/// are validated by their own sizing rules instead.
///
/// An operand is either a hex literal (leading `0`) or an alphanumeric
/// symbol, optionally suffixed `,X` for indexed addressing. Empty operands
/// are invalid; callers add the Invalid Operand code on failure.
pub fn is_valid_operand(s: &str, errors: &mut ErrList) -> bool {
    if s.is_empty() {
        return false;
    }
    if s.starts_with('0') && !is_hex_symbol(s) {
        return false;
    }
    // indexing needs at least "C,X"
    if s.len() >= 3 {
        if let Some(body) = s.strip_suffix(",X") {
            for c in body.chars() {
                if !c.is_ascii_alphanumeric() {
                    errors.push(Code::OperandNotAlphanumeric);
                    return false;
                }
            }
            return true;
        }
    }
    for c in s.chars() {
        if !c.is_ascii_alphanumeric() {
            errors.push(Code::OperandNotAlphanumeric);
            return false;
        }
    }
    true
}

/// A hex-literal operand: leading `0`, uppercase hex digits throughout.
pub fn is_hex_symbol(s: &str) -> bool {
    s.starts_with('0') && s.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F'))
}

/// Base-parametric string-to-integer conversion for bases 2-16.
///
/// Rejects empty input and any non-alphanumeric character, so signed forms
/// like `-5` never parse. Bases up to 10 accept decimal digits only; base 16
/// accepts hex digits. Overflow yields `None`.
pub fn str_to_int(s: &str, base: i32) -> Option<i32> {
    if s.is_empty() {
        return None;
    }
    let mut sum: i32 = 0;
    for c in s.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_alphanumeric() {
            return None;
        }
        if base <= 10 && !c.is_ascii_digit() {
            return None;
        }
        if base == 16 && !matches!(c, '0'..='9' | 'A'..='F') {
            return None;
        }
        let digit = if c.is_ascii_digit() {
            c as i32 - '0' as i32
        } else {
            c as i32 - 'A' as i32 + 10
        };
        sum = sum.checked_mul(base)?.checked_add(digit)?;
    }
    Some(sum)
}
