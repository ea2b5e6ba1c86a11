pub mod code;
pub mod error;
mod listing;
pub mod parser;
mod pass1;
mod pass2;
mod record;
pub mod symtab;
pub mod util;

use std::path::{Path, PathBuf};

use error::Error;
use symtab::SymTab;

/// Pass-1 → pass-2 handoff file. It is left on disk after assembly.
pub const INTERMEDIATE_FILE: &str = "intermediate.txt";
/// Annotated listing, written unconditionally by pass 2.
pub const LISTING_FILE: &str = "listing.txt";
/// H/T/E object file, removed again when the assembly reported errors.
pub const OBJECT_FILE: &str = "object.txt";

/// Two-pass SIC assembler.
///
/// Pass 1 walks the source, assigns an address to every line, collects the
/// symbol table and writes the intermediate stream. Pass 2 reads the stream
/// back, synthesizes object code, and emits the listing and object files.
#[derive(Debug)]
pub struct Assembler {
    workdir: PathBuf,
    locctr: i32,
    starting_address: i32,
    program_length: i32,
    any_errors: bool,
    symtab: SymTab,
}

impl Assembler {
    /// An assembler working in the current directory.
    pub fn new() -> Self {
        Self::in_dir(".")
    }

    /// An assembler writing its intermediate and output files under `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Assembler {
            workdir: dir.into(),
            locctr: 0,
            starting_address: 0,
            program_length: 0,
            any_errors: false,
            symtab: SymTab::new(),
        }
    }

    /// Runs pass 1 then pass 2.
    pub fn assemble(&mut self, source: &Path) -> Result<(), Error> {
        self.pass1(source)?;
        self.pass2()
    }

    /// True once any line reported a diagnostic or a post-pass check failed.
    pub fn had_errors(&self) -> bool {
        self.any_errors
    }

    /// The symbol table collected by pass 1, in definition order.
    pub fn symbols(&self) -> &SymTab {
        &self.symtab
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
