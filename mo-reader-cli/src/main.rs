use clap::{Arg, ArgAction, ArgMatches, Command};
use mo_reader::{Catalog, MoReader};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Looked up after every load; a catalog must never translate it.
const PROBE_MSGID: &str = "__nonexistent_string_42__";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let path = matches
        .get_one::<PathBuf>("path")
        .ok_or("missing catalog path")?;

    if path.is_dir() {
        check_directory(path)
    } else {
        inspect_file(path, &matches)
    }
}

fn cli() -> Command {
    Command::new("mo-lookup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Load GNU gettext .mo catalogs and look up translations")
        .arg(
            Arg::new("path")
                .help(".mo file to load, or a directory whose *.mo files are all checked")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("msgid")
                .help("Source string to translate")
                .index(2),
        )
        .arg(
            Arg::new("context")
                .long("context")
                .short('c')
                .help("msgctxt to look the msgid up in (falls back to no context)"),
        )
        .arg(
            Arg::new("expected")
                .long("expected")
                .short('e')
                .requires("msgid")
                .help("Fail unless the translation equals this text"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the whole catalog (or the metadata with --metadata) as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .help("Print the catalog's header fields")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser diagnostics (overridden by RUST_LOG)")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn inspect_file(path: &Path, matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = MoReader::new();
    reader
        .load_from_file(path)
        .map_err(|e| format!("could not load {}: {}", path.display(), e))?;

    let json = matches.get_flag("json");
    let metadata = matches.get_flag("metadata");

    if json && !metadata {
        if let Some(catalog) = reader.catalog() {
            println!("{}", serde_json::to_string_pretty(&catalog_as_map(catalog))?);
        }
        return probe(&reader);
    }

    println!("Loaded {} strings from {}", reader.size(), path.display());

    if metadata {
        let fields = reader.metadata().unwrap_or_default();
        if json {
            println!("{}", serde_json::to_string_pretty(&fields)?);
        } else {
            for field in fields.fields() {
                println!("  {}: {}", field.name, field.value);
            }
        }
    }

    if let Some(msgid) = matches.get_one::<String>("msgid") {
        let translation = match matches.get_one::<String>("context") {
            Some(context) => reader.get_translation_with_context(msgid, context),
            None => reader.get_translation(msgid),
        };
        if translation.is_empty() {
            return Err(format!("no translation for {:?}", msgid).into());
        }
        println!("  {:?} => {:?}", msgid, translation);

        if let Some(expected) = matches.get_one::<String>("expected") {
            if translation != expected.as_str() {
                return Err(format!("expected {:?} but got {:?}", expected, translation).into());
            }
            println!("  MATCH OK");
        }
    }

    probe(&reader)
}

fn probe(reader: &MoReader) -> Result<(), Box<dyn std::error::Error>> {
    if !reader.get_translation(PROBE_MSGID).is_empty() {
        return Err(format!("{} returned a translation", PROBE_MSGID).into());
    }
    Ok(())
}

fn check_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_mo_files(dir)?;
    if files.is_empty() {
        return Err(format!("no .mo files found in {}", dir.display()).into());
    }

    let mut ok = 0;
    let mut failed = 0;
    let mut reader = MoReader::new();

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let result = reader
            .load_from_file(path)
            .map_err(|e| e.to_string())
            .and_then(|()| probe(&reader).map_err(|e| e.to_string()));
        match result {
            Ok(()) => {
                println!("  OK  {}: {} strings", name, reader.size());
                ok += 1;
            }
            Err(e) => {
                println!("FAIL  {}: {}", name, e);
                failed += 1;
            }
        }
    }

    info!(ok, failed, "checked catalogs in {}", dir.display());
    println!(
        "\nResults: {} OK, {} FAILED out of {} catalogs",
        ok,
        failed,
        ok + failed
    );

    if failed > 0 {
        return Err(format!("{} catalog(s) failed to load", failed).into());
    }
    Ok(())
}

/// `*.mo` files directly inside `dir`, sorted by name.
fn collect_mo_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory '{}': {}", dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("mo") {
            files.push(path);
        }
    }
    files.sort();
    debug!(count = files.len(), "found catalogs in {}", dir.display());
    Ok(files)
}

/// Catalog contents as a sorted map with lossily decoded strings.
fn catalog_as_map(catalog: &Catalog) -> BTreeMap<String, String> {
    catalog
        .iter()
        .map(|(key, value)| {
            (
                String::from_utf8_lossy(key).into_owned(),
                String::from_utf8_lossy(value).into_owned(),
            )
        })
        .collect()
}
