use anyhow::{Context, Result};
use clap::Parser;
use debloat_align::{
    init_tracing,
    input::{read_file, split_lines},
    line_diff::{debloated_lines, format_line_list},
};
use std::path::PathBuf;

/// Lists the lines of an aligned debloated file that differ from the aligned original.
#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
struct Args {
    #[arg(short, long, default_value = "debloated-lines.txt", value_name = "OUTPUT")]
    output: PathBuf,
    #[arg(value_name = "DEBLOATED")]
    debloated: PathBuf,
    #[arg(value_name = "ORIGINAL")]
    original: PathBuf,
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let debloated = split_lines(&read_file(&args.debloated)?);
    let original = split_lines(&read_file(&args.original)?);

    let lines = debloated_lines(&debloated, &original);
    tracing::debug!(count = lines.len(), "found debloated lines");

    std::fs::write(&args.output, format_line_list(&lines))
        .with_context(|| format!("writing '{}'", args.output.display()))?;
    println!("Output debloated lines to file '{}'.", args.output.display());
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
