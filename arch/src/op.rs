use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The SIC instruction set. Every instruction occupies one word; the
/// discriminant is the opcode byte of the standard (non-XE) machine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Op {
    LDA = 0x00,
    LDX = 0x04,
    LDL = 0x08,
    STA = 0x0C,
    STX = 0x10,
    STL = 0x14,
    ADD = 0x18,
    SUB = 0x1C,
    MUL = 0x20,
    DIV = 0x24,
    COMP = 0x28,
    TIX = 0x2C,
    JEQ = 0x30,
    JGT = 0x34,
    JLT = 0x38,
    J = 0x3C,
    OR = 0x44,
    JSUB = 0x48,
    RSUB = 0x4C,
    LDCH = 0x50,
    STCH = 0x54,
    AND = 0x58,
    RD = 0xD8,
    WD = 0xDC,
    TD = 0xE0,
}

impl Op {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Unknown mnemonic: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_op {
        ($($name:ident: $mnemonic:expr => $byte:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let op = Op::parse($mnemonic).unwrap();
                    assert_eq!(u8::from(op), $byte);
                    assert_eq!(op.to_string(), $mnemonic);
                    assert_eq!(Op::try_from($byte).unwrap(), op);
                }
            )*
        }
    }

    test_op! {
        test_add: "ADD" => 0x18,
        test_and: "AND" => 0x58,
        test_comp: "COMP" => 0x28,
        test_div: "DIV" => 0x24,
        test_j: "J" => 0x3C,
        test_jeq: "JEQ" => 0x30,
        test_jgt: "JGT" => 0x34,
        test_jlt: "JLT" => 0x38,
        test_jsub: "JSUB" => 0x48,
        test_lda: "LDA" => 0x00,
        test_ldch: "LDCH" => 0x50,
        test_ldl: "LDL" => 0x08,
        test_ldx: "LDX" => 0x04,
        test_mul: "MUL" => 0x20,
        test_or: "OR" => 0x44,
        test_rd: "RD" => 0xD8,
        test_rsub: "RSUB" => 0x4C,
        test_sta: "STA" => 0x0C,
        test_stch: "STCH" => 0x54,
        test_stl: "STL" => 0x14,
        test_stx: "STX" => 0x10,
        test_sub: "SUB" => 0x1C,
        test_td: "TD" => 0xE0,
        test_tix: "TIX" => 0x2C,
        test_wd: "WD" => 0xDC,
    }

    #[test]
    fn parse_folds_case() {
        assert_eq!(Op::parse("lda").unwrap(), Op::LDA);
    }

    #[test]
    fn unknown_mnemonic() {
        assert!(Op::parse("NOP").is_err());
        assert!(Op::try_from(0x40u8).is_err());
    }
}
