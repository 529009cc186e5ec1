//! Command-line interface for the patent section tools
//! This binary splits OCR output (or, with an engine configured, PDFs and scans) into description,
//! claims and abstract.
//!
//! Usage:
//!   patent split `<path>` [--format text|json|yaml] [--persist] [--output `<dir>`]
//!   patent clean `<path>`                       - Print the cleaned text
//!   patent drawings `<path>` [--persist]        - Print the drawings text
//!   patent list-extractors                    - List the configured extraction engines
//!
//! Configuration is read from the built-in defaults, then `<config dir>/patent/config.toml`, then
//! `--config <file>`. `-v` raises the log level.

mod output;

use clap::{Arg, ArgAction, ArgMatches, Command};
use patent_config::{Loader, PatentConfig};
use patent_parser::patent::extraction::ExtractorRegistry;
use patent_parser::patent::persistence::{persist_drawings, DirectorySink};
use patent_parser::patent::{CleaningPipeline, DocumentReader, SectionSplitter, SplitOptions};
use std::path::{Path, PathBuf};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(verbosity(&matches));

    if let Err(message) = run(&matches) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("patent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Split OCR-extracted patent documents into description, claims and abstract")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("split")
                .about("Split a document into its sections")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(output::OUTPUT_FORMATS.to_vec())
                        .default_value("text"),
                )
                .arg(
                    Arg::new("abstract-priority")
                        .long("abstract-priority")
                        .help("Abstract to keep when one precedes and one follows the claims")
                        .value_parser(["trailing", "leading"]),
                )
                .arg(persist_arg())
                .arg(output_dir_arg()),
        )
        .subcommand(
            Command::new("clean")
                .about("Print the cleaned text of a document")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("drawings")
                .about("Print the drawings text of a document")
                .arg(path_arg())
                .arg(persist_arg())
                .arg(output_dir_arg()),
        )
        .subcommand(
            Command::new("list-extractors").about("List the configured extraction engines"),
        )
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the document (markdown, text, or any format an engine handles)")
        .required(true)
        .index(1)
}

fn persist_arg() -> Arg {
    Arg::new("persist")
        .long("persist")
        .help("Write each section to <slot>_text.txt in the output directory")
        .action(ArgAction::SetTrue)
}

fn output_dir_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_name("DIR")
        .help("Output directory for persisted sections (implies --persist)")
}

/// `-v` may be given before or after the subcommand
fn verbosity(matches: &ArgMatches) -> u8 {
    let nested = matches
        .subcommand()
        .map(|(_, sub)| sub.get_count("verbose"))
        .unwrap_or(0);
    matches.get_count("verbose").max(nested)
}

fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    match matches.subcommand() {
        Some(("split", sub)) => handle_split_command(matches, sub),
        Some(("clean", sub)) => handle_clean_command(matches, sub),
        Some(("drawings", sub)) => handle_drawings_command(matches, sub),
        Some(("list-extractors", sub)) => handle_list_extractors_command(matches, sub),
        _ => Err("no subcommand given".to_string()),
    }
}

/// Load the configuration, applying the flags of `sub` as overrides
fn load_config(root: &ArgMatches, sub: &ArgMatches) -> Result<PatentConfig, String> {
    let mut loader = Loader::for_user();
    let config_file = sub
        .try_get_one::<String>("config")
        .ok()
        .flatten()
        .or_else(|| root.get_one::<String>("config"));
    if let Some(file) = config_file {
        loader = loader.with_file(file);
    }
    if let Some(priority) = sub.try_get_one::<String>("abstract-priority").ok().flatten() {
        loader = loader
            .set_override("segmentation.abstract_priority", priority.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(dir) = sub.try_get_one::<String>("output").ok().flatten() {
        loader = loader
            .set_override("output.directory", dir.as_str())
            .and_then(|l| l.set_override("output.persist", true))
            .map_err(|e| e.to_string())?;
    }
    if sub
        .try_get_one::<bool>("persist")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
    {
        loader = loader
            .set_override("output.persist", true)
            .map_err(|e| e.to_string())?;
    }
    loader
        .build()
        .map_err(|e| format!("Invalid configuration: {}", e))
}

fn build_registry(config: &PatentConfig) -> Result<ExtractorRegistry, String> {
    let mut registry = ExtractorRegistry::with_defaults();
    let engine = config
        .extraction
        .command_extractor()
        .map_err(|e| format!("Invalid configuration: {}", e))?;
    if let Some(engine) = engine {
        registry.register(engine);
    }
    Ok(registry)
}

fn build_reader(config: &PatentConfig) -> Result<DocumentReader, String> {
    let splitter = SectionSplitter::with_options(&SplitOptions::from(&config.segmentation))
        .map_err(|e| format!("Invalid configuration: {}", e))?;
    let cleaning = CleaningPipeline::from_options(&config.cleaning.into());
    Ok(DocumentReader::with_parts(
        build_registry(config)?,
        cleaning,
        splitter,
    ))
}

fn output_sink(config: &PatentConfig) -> Option<DirectorySink> {
    config
        .output
        .persist
        .then(|| DirectorySink::new(&config.output.directory))
}

/// Handle the split command
fn handle_split_command(root: &ArgMatches, sub: &ArgMatches) -> Result<(), String> {
    let config = load_config(root, sub)?;
    let reader = build_reader(&config)?;
    let path = input_path(sub);
    let format = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    let doc = reader.read(&path).map_err(|e| e.to_string())?;
    if let Some(mut sink) = output_sink(&config) {
        let written = doc.persist(&mut sink).map_err(|e| e.to_string())?;
        log::info!(
            "persisted {} section(s) to {}",
            written.len(),
            sink.dir().display()
        );
    }

    print!("{}", output::render_sections(&doc.sections, format)?);
    Ok(())
}

/// Handle the clean command
fn handle_clean_command(root: &ArgMatches, sub: &ArgMatches) -> Result<(), String> {
    let config = load_config(root, sub)?;
    let reader = build_reader(&config)?;
    let doc = reader.read(&input_path(sub)).map_err(|e| e.to_string())?;
    println!("{}", doc.cleaned.trim_end());
    Ok(())
}

/// Handle the drawings command
fn handle_drawings_command(root: &ArgMatches, sub: &ArgMatches) -> Result<(), String> {
    let config = load_config(root, sub)?;
    let reader = build_reader(&config)?;
    let drawings = reader
        .read_drawings(&input_path(sub))
        .map_err(|e| e.to_string())?;
    if let Some(mut sink) = output_sink(&config) {
        persist_drawings(&drawings, &mut sink).map_err(|e| e.to_string())?;
    }
    println!("{}", drawings);
    Ok(())
}

/// Handle the list-extractors command
fn handle_list_extractors_command(root: &ArgMatches, sub: &ArgMatches) -> Result<(), String> {
    let config = load_config(root, sub)?;
    let registry = build_registry(&config)?;
    println!("Available extractors:\n");
    for (name, formats) in registry.list() {
        let formats = formats
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}", name);
        println!("    {}", formats);
        println!();
    }
    Ok(())
}

fn input_path(sub: &ArgMatches) -> PathBuf {
    sub.get_one::<String>("path")
        .map(|p| Path::new(p).to_path_buf())
        .unwrap_or_default()
}
