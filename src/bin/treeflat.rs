//! Command-line interface for treeflat
//! Converts XML documents into nested JSON/YAML values and renders book catalogs.
//!
//! Usage:
//!   treeflat flatten `<path>` [--format `<format>`] [--output `<file>`]
//!                                                      - Flatten an XML document (`-` reads stdin)
//!   treeflat books `<path>` [--format json|html] [--init] - Print a book catalog
//!   treeflat json `<path>`                               - Validate and pretty-print a JSON body
//!   treeflat list-formats                              - List available output formats
//!
//! Global options: `--config <file>` layers a TOML file over the defaults,
//! `--log <filter>` sets the log filter.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use treeflat::catalog::{self, CatalogOptions};
use treeflat::config::{Loader, TreeflatConfig};
use treeflat::registry::FormatRegistry;
use treeflat::{flatten, input, logging, FlatValue, ParseOptions};

fn main() {
    let matches = Command::new("treeflat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Flatten XML element trees into nested maps, lists and strings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Log filter directive (e.g. 'debug', 'treeflat=trace')"),
        )
        .subcommand(
            Command::new("flatten")
                .about("Flatten an XML document and print the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the XML file, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats); defaults to the output file's extension, then output.format"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the result to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("books")
                .about("Print the books of a catalog file")
                .arg(
                    Arg::new("path")
                        .help("Path to the catalog XML file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "html"])
                        .default_value("json"),
                )
                .arg(
                    Arg::new("init")
                        .long("init")
                        .help("Write the sample catalog first if the file does not exist")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("json")
                .about("Validate a JSON body and pretty-print it")
                .arg(
                    Arg::new("path")
                        .help("Path to the JSON file, or '-' for stdin")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| fail(e));
    logging::init(global_arg(&matches, "log"), &config.logging.filter);

    match matches.subcommand() {
        Some(("flatten", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            let output = sub.get_one::<String>("output").map(String::as_str);
            let format = sub.get_one::<String>("format").map(String::as_str);
            handle_flatten_command(&config, path, format, output);
        }
        Some(("books", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            let format = sub.get_one::<String>("format").expect("format has a default");
            handle_books_command(&config, path, format, sub.get_flag("init"));
        }
        Some(("json", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            handle_json_command(path);
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn load_config(matches: &ArgMatches) -> Result<TreeflatConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = global_arg(matches, "config") {
        loader = loader.with_file(path);
    }
    loader.build()
}

/// Value of a global option, whether it was given before or after the subcommand.
fn global_arg<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<String>(name))
        .or_else(|| matches.get_one::<String>(name))
        .map(String::as_str)
}

/// Print an error and exit with status 1.
fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

/// Open `path`, or stdin for `-`.
fn open_source(path: &str) -> Box<dyn Read> {
    if path == "-" {
        return Box::new(io::stdin().lock());
    }
    match File::open(path) {
        Ok(file) => Box::new(file),
        Err(e) => fail(format!("cannot open {}: {}", path, e)),
    }
}

/// Output format for `flatten`: explicit `--format`, else the one claiming
/// the output file's extension, else the configured default.
fn resolve_flatten_format<'a>(
    registry: &'a FormatRegistry,
    explicit: Option<&'a str>,
    output: Option<&str>,
    default: &'a str,
) -> &'a str {
    if let Some(format) = explicit {
        return format;
    }
    output
        .and_then(|path| Path::new(path).extension())
        .and_then(|ext| ext.to_str())
        .and_then(|ext| registry.find_by_extension(ext))
        .map(|format| format.name())
        .unwrap_or(default)
}

/// Handle the flatten command
fn handle_flatten_command(
    config: &TreeflatConfig,
    path: &str,
    format: Option<&str>,
    output_path: Option<&str>,
) {
    let options = ParseOptions::from(&config.parser);
    let root = input::read_xml(open_source(path), &options).unwrap_or_else(|e| fail(e));

    // A childless root flattens to an empty map, like any other leaf
    let value = FlatValue::Map(flatten(&root));

    let registry = FormatRegistry::with_defaults();
    let format = resolve_flatten_format(&registry, format, output_path, &config.output.format);
    let output = registry
        .serialize(&value, format)
        .unwrap_or_else(|e| fail(e));

    match output_path {
        Some(target) => {
            fs::write(target, format!("{}\n", output.trim_end()))
                .unwrap_or_else(|e| fail(format!("cannot write {}: {}", target, e)));
            tracing::info!(path = target, format, "wrote flattened document");
        }
        None => println!("{}", output.trim_end()),
    }
}

/// Handle the books command
fn handle_books_command(config: &TreeflatConfig, path: &str, format: &str, init: bool) {
    if init {
        catalog::ensure_sample_catalog(path).unwrap_or_else(|e| fail(e));
    }

    let books = catalog::load_books(
        path,
        &ParseOptions::from(&config.parser),
        &CatalogOptions::from(&config.catalog),
    )
    .unwrap_or_else(|e| {
        // JSON consumers still get a parseable body
        if format == "json" {
            println!("{}", catalog::error_envelope(&e));
        }
        fail(e)
    });

    let output = match format {
        "html" => catalog::render_html_table(&books),
        _ => catalog::books_to_json(&books).unwrap_or_else(|e| fail(e)),
    };
    println!("{}", output.trim_end());
}

/// Handle the json command
fn handle_json_command(path: &str) {
    let value = input::read_json(open_source(path)).unwrap_or_else(|e| fail(e));
    let output = serde_json::to_string_pretty(&value).unwrap_or_else(|e| fail(e));
    println!("{}", output);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", format.description());
            println!();
        }
    }
}
