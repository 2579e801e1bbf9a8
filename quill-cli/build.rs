use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of INSPECT_FORMATS from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const INSPECT_FORMATS: &[&str] = &["treeviz"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("quillmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich-text editor HTML to Markdown")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quill.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the tree the HTML parser produced")
                .arg(
                    Arg::new("path")
                        .help("Path to the HTML file, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("format")
                        .help("Tree format. Defaults to 'treeviz'")
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_FORMATS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other))
                .arg(Arg::new("to").long("to").value_hint(ValueHint::Other))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("strict").long("strict").action(ArgAction::SetTrue)),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "quillmd", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "quillmd", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "quillmd", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
