// Command-line interface for duet
//
// This binary is an external collaborator of the conversion engine: it owns
// file access and hands the engine complete strings. Two commands:
//
//  duet <input.md> [-o <file>]          - Parse and re-serialize canonically (default)
//  duet convert <input.md> [-o <file>]  - Same as above (explicit)
//  duet inspect <input.md> [--compact]  - Dump the parsed tree as JSON
//
// A duet.toml in the working directory (or --config <path>) layers over the
// built-in defaults; [markdown.rules] keys reach the engine as MarkdownRules.

use clap::{Arg, ArgAction, Command, ValueHint};
use duet_config::{DuetConfig, Loader};
use duet_engine::markdown::{parse_with_rules, MarkdownRules};
use duet_engine::session::EditorSession;
use std::fs;

fn build_cli() -> Command {
    Command::new("duet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for normalizing and inspecting Markdown documents")
        .long_about(
            "duet works with Markdown files through the duet conversion engine.\n\n\
            Commands:\n  \
            - convert: parse a Markdown file and re-serialize it canonically\n  \
            - inspect: view the parsed document tree as JSON\n\n\
            Examples:\n  \
            duet notes.md                   # Canonical markdown to stdout\n  \
            duet notes.md -o clean.md       # Write the canonical form to a file\n  \
            duet inspect notes.md           # View the document tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a duet.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Parse a Markdown file and re-serialize it canonically (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input Markdown file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Dump the parsed document tree as JSON")
                .arg(
                    Arg::new("input")
                        .help("Input Markdown file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Force single-line JSON output")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::init();

    // If no subcommand is provided and the first argument looks like a
    // file, inject "convert".
    let args: Vec<String> = std::env::args().collect();
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(error) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "convert"
                && args[1] != "inspect"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(matches) => matches,
                    Err(retry_error) => retry_error.exit(),
                }
            } else {
                error.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &config);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let compact = sub_matches.get_flag("compact");
            handle_inspect_command(input, compact, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(path: Option<&str>) -> DuetConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("duet.toml"),
    };
    loader.build().unwrap_or_else(|error| {
        eprintln!("Error loading configuration: {error}");
        std::process::exit(1);
    })
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|error| {
        eprintln!("Error reading file '{path}': {error}");
        std::process::exit(1);
    })
}

/// Import then export: the engine parses the file into a tree and hands
/// back its canonical Markdown.
fn handle_convert_command(input: &str, output: Option<&str>, config: &DuetConfig) {
    let source = read_input(input);
    let rules: MarkdownRules = (&config.markdown.rules).into();

    let session = EditorSession::open_with_rules(&source, rules);
    let markdown = session.export();

    match output {
        Some(path) => {
            fs::write(path, markdown).unwrap_or_else(|error| {
                eprintln!("Error writing file '{path}': {error}");
                std::process::exit(1);
            });
        }
        None => print!("{markdown}"),
    }
}

fn handle_inspect_command(input: &str, compact: bool, config: &DuetConfig) {
    let source = read_input(input);
    let rules: MarkdownRules = (&config.markdown.rules).into();

    let tree = parse_with_rules(&source, &rules);
    let json = if config.inspect.pretty && !compact {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(error) => {
            eprintln!("Error serializing tree to JSON: {error}");
            std::process::exit(1);
        }
    }
}
