use std::path::PathBuf;
use std::process::ExitCode;

use asm::Assembler;
use clap::Parser;
use color_print::cprintln;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Assembly source file
    input: PathBuf,

    /// Print the symbol table after assembly
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!("SIC Assembler");

    let mut assembler = Assembler::new();

    println!("1. Pass 1: collect symbols, size each line");
    println!("  < {}", args.input.display());
    if let Err(e) = assembler.pass1(&args.input) {
        cprintln!("<red,bold>error</>: {}", e);
        return ExitCode::FAILURE;
    }

    println!("2. Pass 2: generate listing and object file");
    if let Err(e) = assembler.pass2() {
        cprintln!("<red,bold>error</>: {}", e);
        return ExitCode::FAILURE;
    }
    println!("  > {}", asm::LISTING_FILE);

    if args.dump {
        println!("Symbol Table: ");
        for (name, address) in assembler.symbols().iter() {
            cprintln!("  <green>{:<6}</> <yellow>{:04X}</>", name, address);
        }
    }

    if assembler.had_errors() {
        cprintln!(
            "<red,bold>error</>: assembly failed, see {}",
            asm::LISTING_FILE
        );
        return ExitCode::FAILURE;
    }
    println!("  > {}", asm::OBJECT_FILE);
    ExitCode::SUCCESS
}
