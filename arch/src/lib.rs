pub mod op;

pub use op::Op;

/// SIC memory size in bytes. Addresses are 15 bits wide.
pub const MSIZE: i32 = 32768;

/// Size of a machine word (and of every instruction) in bytes.
pub const WORD_SIZE: i32 = 3;

/// Indexed-addressing flag: the MSB of the 16-bit address field.
pub const INDEX_BIT: i32 = 1 << 15;
