//! Command-line interface for folio
//! This binary batch-processes directories of digitized court records into
//! page-scoped plaintext files.
//!
//! Usage:
//!   folio transcripts `<xml-dir>` [--collection `<name>`] [--out `<dir>`]  - Extract proceedings transcripts
//!   folio opinions `<html-dir>` [--out `<dir>`]                          - Extract appellate opinions

mod files;
mod opinions;
mod transcripts;

use clap::{Arg, Command};
use std::path::PathBuf;

use folio_config::{Encoding, FolioConfig, Loader};

fn main() {
    let matches = Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Page-scoped plaintext extraction from digitized court records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .subcommand(
            Command::new("transcripts")
                .about("Extract page text from proceedings XML")
                .arg(
                    Arg::new("xml-dir")
                        .help("Directory containing the transcription XML files")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("collection")
                        .long("collection")
                        .help("Configured collection supplying encoding and file names"),
                )
                .arg(
                    Arg::new("patch")
                        .long("patch")
                        .help("CSV table of pointer corrections"),
                )
                .arg(
                    Arg::new("pointers-out")
                        .long("pointers-out")
                        .help("File receiving the sorted pointer list"),
                )
                .arg(
                    Arg::new("json-out")
                        .long("json-out")
                        .help("File receiving every page as a single JSON object"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Directory receiving one text file per page"),
                )
                .arg(
                    Arg::new("depth")
                        .long("depth")
                        .help("Recursion ceiling for the tree walkers"),
                ),
        )
        .subcommand(
            Command::new("opinions")
                .about("Extract page text from rendered opinion HTML")
                .arg(
                    Arg::new("html-dir")
                        .help("Directory containing the opinion HTML files")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Directory receiving one text file per page"),
                ),
        )
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("transcripts", sub)) => {
            let config = load_config(sub.get_one::<String>("config"));
            let task = resolve_transcripts_task(sub, &config);
            finish(transcripts::run(&task));
        }
        Some(("opinions", sub)) => {
            let config = load_config(sub.get_one::<String>("config"));
            let html_dir = PathBuf::from(sub.get_one::<String>("html-dir").unwrap());
            let out_dir = sub
                .get_one::<String>("out")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(&config.opinions.output_dir));
            let task = opinions::OpinionsTask {
                html_dir,
                out_dir,
                exclude: config.opinions.exclude.clone(),
            };
            finish(opinions::run(&task));
        }
        _ => unreachable!(),
    }
}

fn load_config(path: Option<&String>) -> FolioConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

/// Merge the subcommand flags with the selected collection's settings.
/// Explicit flags win; the collection fills in whatever is left.
fn resolve_transcripts_task(
    sub: &clap::ArgMatches,
    config: &FolioConfig,
) -> transcripts::TranscriptsTask {
    let xml_dir = PathBuf::from(sub.get_one::<String>("xml-dir").unwrap());

    let collection = match sub.get_one::<String>("collection") {
        Some(name) => match config.transcripts.collection(name) {
            Some(collection) => Some(collection.clone()),
            None => {
                eprintln!("Unknown collection: {}", name);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let encoding = collection
        .as_ref()
        .map(|c| c.encoding)
        .unwrap_or(Encoding::Utf8);
    let explicit_patch = sub.get_one::<String>("patch").map(PathBuf::from);
    let patch_required = explicit_patch.is_some();
    let patch_file =
        explicit_patch.or_else(|| collection.as_ref().map(|c| PathBuf::from(&c.patch_file)));
    let pointers_out = sub
        .get_one::<String>("pointers-out")
        .map(PathBuf::from)
        .or_else(|| collection.as_ref().map(|c| PathBuf::from(&c.pointers_file)));
    let json_out = sub
        .get_one::<String>("json-out")
        .map(PathBuf::from)
        .or_else(|| collection.as_ref().map(|c| PathBuf::from(&c.text_file)));
    let pages_out = sub.get_one::<String>("out").map(PathBuf::from);
    let depth_limit = match sub.get_one::<String>("depth") {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid depth: {}", raw);
            std::process::exit(1);
        }),
        None => config.transcripts.depth_limit,
    };

    transcripts::TranscriptsTask {
        xml_dir,
        encoding,
        patch_file,
        patch_required,
        pointers_out,
        json_out,
        pages_out,
        depth_limit,
    }
}

/// Exit nonzero when the run errored out or any document failed.
fn finish(result: Result<usize, String>) {
    match result {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}
