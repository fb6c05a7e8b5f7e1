use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the renderers registered by scriv-babel
// We need to duplicate this here since build scripts can't access src/ modules
const OUTPUT_FORMATS: &[&str] = &["docx", "pdf"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("scriv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markup text to DOCX or PDF")
        .arg_required_else_help(true)
        .arg(
            Arg::new("source")
                .help("Path to the markup source file")
                .required_unless_present("list-formats")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("format")
                .help("Output format (docx or pdf)")
                .required_unless_present("list-formats")
                .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS))
                .index(2)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output-base")
                .help("Output path without extension")
                .required_unless_present("list-formats")
                .index(3)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("title").long("title").value_name("TEXT"))
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "scriv", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "scriv", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "scriv", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
