// Command-line interface for quill-md
//
// This binary converts the HTML produced by a rich-text editor into Markdown, and lets you
// look at the tree the HTML parser built when the output is not what you expected.
//
// The core capabilities use the quill-babel crate. This crate is only the shell around it:
// argument parsing, configuration, file and stdin handling.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension
// (falling back to the configured default, html), the to defaults to markdown. Both can be
// set explicitly.
// Usage:
//  quillmd <input> [--to <format>] [--from <format>] [--output <file>]  - Convert (default)
//  quillmd convert <input> ...                                         - Same as above (explicit)
//  quillmd inspect <input> [<format>]                                  - Dump the parsed tree
//  quillmd --list-formats                                              - List available formats
//
// <input> can be "-" to read from stdin.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  quillmd notes.html --extra-max-depth 64 --extra-footnotes false

use clap::{Arg, ArgAction, Command, ValueHint};
use quill_babel::format::Direction;
use quill_babel::{FormatRegistry, MarkdownOptions, MarkdownSerializer};
use quill_config::{Loader, QuillConfig};
use std::collections::HashMap;
use std::fs;
use std::io::Read;

/// Formats the inspect command can render the parsed tree with.
const INSPECT_FORMATS: &[&str] = &["treeviz"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A following "-" is the stdin input, not a value
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("quillmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich-text editor HTML to Markdown")
        .long_about(
            "quillmd converts the HTML content of a rich-text editor into canonical Markdown:\n\
            headings, emphasis, lists (bullet, ordered, task), tables, fenced code, links,\n\
            images and footnotes from word-processor exports, markdown-it output or bare\n\
            superscript markers.\n\n\
            Commands:\n  \
            - convert: HTML to Markdown (default, the subcommand name can be omitted)\n  \
            - inspect: Show the tree the HTML parser produced\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            quillmd notes.html                           # Markdown to stdout\n  \
            quillmd notes.html -o notes.md               # Markdown to a file\n  \
            cat notes.html | quillmd -                   # Read from stdin\n  \
            quillmd notes.html --extra-footnotes false   # Leave footnote markup alone\n  \
            quillmd inspect notes.html                   # Dump the parsed tree"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .long_about(
                    "Print the parsed HTML as a tree, one node per line.\n\n\
                    Nodes the Markdown serializer treats as footnote references, definitions\n\
                    or footnote sections are marked, which helps when a footnote is missing\n\
                    from the output.\n\n\
                    Extra Parameters:\n  \
                    --extra-label-width <n>     Truncate node labels to n characters\n  \
                    --extra-footnotes false     Leave out the footnote markers\n\n\
                    Examples:\n  \
                    quillmd inspect notes.html\n  \
                    quillmd inspect notes.html --extra-label-width 60"
                )
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
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_FORMATS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert a document between formats.\n\n\
                    Supported formats:\n  \
                    - html:     parse only (.html, .htm)\n  \
                    - markdown: serialize only (.md)\n  \
                    - treeviz:  serialize only, the parsed tree\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Markdown parameters:\n  \
                    --extra-max-depth <n>       Drop elements nested deeper than n\n  \
                    --extra-footnotes <bool>    Recognize footnotes (default true)\n\n\
                    Examples:\n  \
                    quillmd convert notes.html                  # Markdown (stdout)\n  \
                    quillmd convert notes.html -o notes.md      # Markdown file\n  \
                    quillmd convert - --from html < notes.html  # From stdin"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to markdown)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail instead of warning when content had to be dropped")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare input path means the convert subcommand
            if cleaned_args.len() > 1
                && (cleaned_args[1] == "-" || !cleaned_args[1].starts_with('-'))
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                exit_with("Error: an input path is required");
            };
            let format = sub_matches
                .get_one::<String>("format")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            handle_inspect_command(path, format, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with("Error: an input path is required");
            };
            let registry = FormatRegistry::default();
            let from = sub_matches
                .get_one::<String>("from")
                .cloned()
                .or_else(|| registry.detect_format_from_filename(input))
                .unwrap_or_else(|| config.convert.from.clone());
            let to = sub_matches
                .get_one::<String>("to")
                .cloned()
                .unwrap_or_else(|| config.convert.to.clone());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let strict = sub_matches.get_flag("strict");
            handle_convert_command(
                &registry,
                ConvertRequest {
                    input,
                    from: &from,
                    to: &to,
                    output,
                    strict,
                },
                &extra_params,
                &config,
            );
        }
        _ => {
            exit_with("Unknown subcommand. Use --help for usage information.");
        }
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

/// Read the input file, or stdin when the path is "-".
fn read_input(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| exit_with(&format!("Error reading stdin: {e}")));
        return source;
    }
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with(&format!("Error reading file '{path}': {e}")))
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    format: &str,
    extra_params: &HashMap<String, String>,
    config: &QuillConfig,
) {
    let source = read_input(path);
    let registry = FormatRegistry::default();
    let doc = registry
        .parse(&source, "html")
        .unwrap_or_else(|e| exit_with(&format!("Parse error: {e}")));

    let params = build_inspect_params(config, extra_params);
    let output = registry
        .serialize_with_options(&doc, format, &params)
        .unwrap_or_else(|e| exit_with(&format!("Execution error: {e}")));

    print!("{output}");
}

struct ConvertRequest<'a> {
    input: &'a str,
    from: &'a str,
    to: &'a str,
    output: Option<&'a str>,
    strict: bool,
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    request: ConvertRequest,
    extra_params: &HashMap<String, String>,
    config: &QuillConfig,
) {
    for name in [request.from, request.to] {
        if let Err(e) = registry.get(name) {
            exit_with(&format!("Error: {e}"));
        }
    }

    let source = read_input(request.input);
    let doc = registry
        .parse(&source, request.from)
        .unwrap_or_else(|e| exit_with(&format!("Parse error: {e}")));

    let result = if request.to == "markdown" {
        let mut params = markdown_params_from_config(config);
        params.extend(extra_params.iter().map(|(k, v)| (k.clone(), v.clone())));
        let options = MarkdownOptions::from_params(&params)
            .unwrap_or_else(|e| exit_with(&format!("Serialization error: {e}")));

        let conversion = MarkdownSerializer::new(options).convert(&doc);
        if let Some(err) = conversion.errors.first() {
            if request.strict {
                exit_with(&format!("Serialization error: {err}"));
            }
        }
        for err in &conversion.errors {
            eprintln!("Warning: {err}");
        }
        conversion.markdown
    } else {
        let params = if request.to == "treeviz" {
            build_inspect_params(config, extra_params)
        } else {
            extra_params.clone()
        };
        registry
            .serialize_with_options(&doc, request.to, &params)
            .unwrap_or_else(|e| exit_with(&format!("Serialization error: {e}")))
    };

    match request.output {
        Some(path) => {
            fs::write(path, result)
                .unwrap_or_else(|e| exit_with(&format!("Error writing file '{path}': {e}")));
        }
        None => print!("{result}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let directions: Vec<String> = Direction::ALL
            .into_iter()
            .filter(|direction| format.supports(*direction))
            .map(|direction| direction.to_string())
            .collect();
        println!(
            "  {name:<10} {:<16} {}",
            directions.join(", "),
            format.description()
        );
    }
    println!("\nInspect formats:");
    for name in INSPECT_FORMATS {
        println!("  {name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> QuillConfig {
    let loader = Loader::new().with_optional_file("quill.toml");
    let loader = if let Some(path) = explicit_path {
        log::debug!("layering configuration file {path}");
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| exit_with(&format!("Failed to load configuration: {err}")))
}

/// Move `--extra-*` values that shadow configuration keys into the configuration.
fn apply_config_overrides(config: &mut QuillConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("max-depth") {
        config.convert.markdown.max_depth = parse_count_arg("max-depth", &raw);
    }
    if let Some(raw) = extra_params.remove("footnotes") {
        config.convert.markdown.footnotes = parse_bool_arg("footnotes", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["label-width", "width"]) {
        config.inspect.label_width = parse_count_arg("label-width", &raw);
    }
}

fn markdown_params_from_config(config: &QuillConfig) -> HashMap<String, String> {
    let markdown = &config.convert.markdown;
    let mut params = HashMap::new();
    params.insert("max-depth".to_string(), markdown.max_depth.to_string());
    params.insert("footnotes".to_string(), markdown.footnotes.to_string());
    params
}

fn build_inspect_params(
    config: &QuillConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    params.insert(
        "label-width".to_string(),
        config.inspect.label_width.to_string(),
    );
    params.insert(
        "footnotes".to_string(),
        config.convert.markdown.footnotes.to_string(),
    );

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => exit_with(&format!("Invalid boolean value '{other}' for --extra-{flag}")),
    }
}

fn parse_count_arg(flag: &str, raw: &str) -> usize {
    raw.trim()
        .parse()
        .unwrap_or_else(|_| exit_with(&format!("Invalid number '{raw}' for --extra-{flag}")))
}
