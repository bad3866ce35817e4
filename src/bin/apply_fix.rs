use anyhow::Result;
use clap::{ArgGroup, Parser};
use debloat_align::{
    init_tracing,
    patch::{parse_line_ranges, patch_file, PatchMode},
};
use std::path::PathBuf;

/// Edits lines of FILE in place, using REFERENCE for the original content.
///
/// By default the lines are copied back from REFERENCE.
#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
#[command(group(ArgGroup::new("mode")))]
struct Args {
    /// Comma separated 1-based inclusive ranges, e.g. "1-2,5-6".
    #[arg(long, value_name = "RANGES")]
    lines: String,
    /// Empty the lines instead.
    #[arg(long, group = "mode")]
    remove: bool,
    /// Make the first line of each range exit the program instead.
    #[arg(long, group = "mode")]
    exit: bool,
    #[arg(value_name = "FILE")]
    file: PathBuf,
    #[arg(value_name = "REFERENCE")]
    reference: PathBuf,
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let mode = if args.remove {
        PatchMode::Remove
    } else if args.exit {
        PatchMode::InsertExit
    } else {
        PatchMode::AddBack
    };
    let ranges = parse_line_ranges(&args.lines);
    patch_file(&args.file, &args.reference, &ranges, mode)?;
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
