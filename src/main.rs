use anyhow::Result;
use clap::Parser;
use debloat_align::{
    algorithm::align_sources,
    config::{load_config, ConfigOpt},
    init_tracing,
    input::{read_source, ExternalReformatter, NoReformat, Reformatter},
    output::{aligned_output_path, unaligned_report, write_lines},
    validate::{print_errors, validate},
};
use std::path::PathBuf;

/// Aligns a debloated source file with its original, padding both so that corresponding lines
/// have the same line number.
#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
struct Args {
    #[arg(value_name = "FILE1")]
    file1: PathBuf,
    #[arg(value_name = "FILE2")]
    file2: PathBuf,
    /// Config file to use instead of the default one.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(flatten)]
    config_opt: ConfigOpt,
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.config_opt)?;
    tracing::debug!(?config, "loaded config");

    let reformatter: Box<dyn Reformatter> = if config.reformat {
        Box::new(ExternalReformatter::from_command_line(&config.reformat_command, &config.reformat_style)?)
    } else {
        Box::new(NoReformat)
    };

    let paths = [args.file1, args.file2];
    let inputs = [
        read_source(&paths[0], reformatter.as_ref())?,
        read_source(&paths[1], reformatter.as_ref())?,
    ];
    let alignment = align_sources(inputs.clone());

    print_errors(&validate(&alignment, [&inputs[0], &inputs[1]]));

    let debloated = alignment.debloated_input;
    let output_paths = [
        aligned_output_path(&paths[debloated], &config.output_dir),
        aligned_output_path(&paths[1 - debloated], &config.output_dir),
    ];
    for (path, lines) in output_paths.iter().zip(&alignment.lines) {
        write_lines(path, lines)?;
    }

    println!("{}", unaligned_report(&alignment.unaligned_lines));
    println!(
        "Output aligned source files to '{}' and '{}'.",
        output_paths[0].display(),
        output_paths[1].display()
    );
    Ok(())
}

fn main() {
    init_tracing();
    // Returning Result from main() would print the error with Debug.
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
