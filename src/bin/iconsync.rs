//! Command-line interface for iconsync
//! Browses icon metadata exported from a design tool and turns exported SVGs into
//! normalized, canonically named icon files.
//!
//! Usage:
//!   iconsync browse `<metadata_file>` [--list] [--search `<q>`] [--section `<s>`] [--sections] [--json]
//!   iconsync optimize `<input>` `<output_dir>` [--outlined | --filled] [--batch] [--size `<n>`]

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use iconsync::icons::config::{IconSyncConfig, Loader};
use iconsync::icons::files::{process_batch, process_icon_file, read_metadata};
use iconsync::icons::formats::{sections_listing, FormatRegistry};
use iconsync::icons::query::{distinct_sections, filter_by_section, search};
use iconsync::icons::{parse, ProcessingError, VariantOverride};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Optional project-level configuration picked up from the working directory.
const LOCAL_CONFIG: &str = "iconsync.toml";

fn main() {
    let matches = Command::new("iconsync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse design-tool icon metadata and optimize exported SVG icons")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter for stderr output (e.g. 'debug'); defaults to RUST_LOG or 'warn'"),
        )
        .subcommand(
            Command::new("browse")
                .about("Browse and search icon metadata")
                .arg(
                    Arg::new("metadata_file")
                        .help("File containing the metadata export")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("list")
                        .long("list")
                        .short('l')
                        .action(ArgAction::SetTrue)
                        .help("List all icons"),
                )
                .arg(
                    Arg::new("search")
                        .long("search")
                        .short('s')
                        .help("Search for icons by name"),
                )
                .arg(
                    Arg::new("section")
                        .long("section")
                        .help("Filter by section name"),
                )
                .arg(
                    Arg::new("sections")
                        .long("sections")
                        .action(ArgAction::SetTrue)
                        .help("List all sections"),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .short('v')
                        .action(ArgAction::SetTrue)
                        .help("Show node id, section and variant for each icon"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .conflicts_with("json")
                        .help("Output format (list, verbose, json, yaml, summary)"),
                ),
        )
        .subcommand(
            Command::new("optimize")
                .about("Normalize SVG icons and give them canonical file names")
                .arg(
                    Arg::new("input")
                        .help("Input SVG file, or a directory with --batch")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output_dir")
                        .help("Output directory for processed icons")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("outlined")
                        .long("outlined")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("filled")
                        .help("Treat the icon as the outlined variant"),
                )
                .arg(
                    Arg::new("filled")
                        .long("filled")
                        .action(ArgAction::SetTrue)
                        .help("Treat the icon as the filled variant"),
                )
                .arg(
                    Arg::new("batch")
                        .long("batch")
                        .action(ArgAction::SetTrue)
                        .help("Process every SVG file in the input directory"),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .value_parser(value_parser!(u32))
                        .help("Canvas size in pixels (overrides the configuration)"),
                ),
        )
        .get_matches();

    init_logging(matches.get_one::<String>("log-level").map(String::as_str));

    let result = match matches.subcommand() {
        Some(("browse", browse_matches)) => handle_browse_command(browse_matches),
        Some(("optimize", optimize_matches)) => handle_optimize_command(optimize_matches),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then `iconsync.toml` if present, then `--config`, then `--size`.
fn load_config(matches: &ArgMatches) -> Result<IconSyncConfig, ProcessingError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(size) = matches.try_get_one::<u32>("size").ok().flatten() {
        loader = loader.with_size(*size)?;
    }
    Ok(loader.build()?)
}

/// Handle the browse command
fn handle_browse_command(matches: &ArgMatches) -> Result<(), ProcessingError> {
    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("metadata_file")
        .expect("metadata_file is required");

    let content = read_metadata(Path::new(path))?;
    let mut icons = parse(&content);
    println!("Found {} icons in metadata\n", icons.len());

    let query = matches.get_one::<String>("search");
    if let Some(query) = query {
        icons = search(&icons, query);
        println!("Search results for '{}': {} icons\n", query, icons.len());
    }

    let section = matches.get_one::<String>("section");
    if let Some(section) = section {
        icons = filter_by_section(&icons, section);
        println!("Icons in section '{}': {}\n", section, icons.len());
    }

    if matches.get_flag("sections") {
        println!("{}", sections_listing(&distinct_sections(&icons)));
        return Ok(());
    }

    let format = if let Some(format) = matches.get_one::<String>("format") {
        format.as_str()
    } else if matches.get_flag("json") {
        "json"
    } else if matches.get_flag("list") || query.is_some() || section.is_some() {
        if matches.get_flag("verbose") {
            "verbose"
        } else {
            "list"
        }
    } else {
        config.browse.format.as_str()
    };

    let registry = FormatRegistry::default();
    let output = registry.format(&icons, format)?;
    println!("{}", output.trim_end_matches('\n'));
    if format == "summary" {
        println!("\nUse --list to see all icons, --search to find specific icons");
    }
    Ok(())
}

/// Handle the optimize command
fn handle_optimize_command(matches: &ArgMatches) -> Result<(), ProcessingError> {
    let options = load_config(matches)?.processor_options();
    let input = Path::new(
        matches
            .get_one::<String>("input")
            .expect("input is required"),
    );
    let output_dir = Path::new(
        matches
            .get_one::<String>("output_dir")
            .expect("output_dir is required"),
    );

    if !matches.get_flag("batch") {
        let variant =
            VariantOverride::from_flags(matches.get_flag("outlined"), matches.get_flag("filled"));
        let output = process_icon_file(input, output_dir, variant, &options)?;
        println!("Created: {}", output.display());
        return Ok(());
    }

    let report = process_batch(input, output_dir, &options)?;
    for (source, output) in &report.processed {
        println!("Processed: {} -> {}", source.display(), output.display());
    }
    for (source, err) in &report.failed {
        eprintln!("Error processing {}: {}", source.display(), err);
    }
    println!("\nProcessed {} icons", report.processed.len());
    Ok(())
}
