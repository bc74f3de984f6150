mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use overview_core::{Overview, ReferenceTables, TableSources, load_overview};
use overview_render::{group_listings, render_json_summary, render_overview};
use tracing::info;

use logging::{LogConfig, LogFormat, init_logging};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Overview file to operate on.
    #[arg(short = 'f', long = "file", value_name = "OVERVIEW.yaml")]
    file: PathBuf,
    /// Write per-category group listings from the `all` preset instead of
    /// printing the overview.
    #[arg(long = "update-groups")]
    update_groups: bool,
    #[arg(long = "groups-dir", value_name = "DIR", default_value = "groups")]
    groups_dir: PathBuf,
    #[arg(long, value_name = "CSV")]
    categories: Option<PathBuf>,
    #[arg(long, value_name = "CSV")]
    groups: Option<PathBuf>,
    #[arg(long, value_name = "CSV")]
    states: Option<PathBuf>,
    /// Print a JSON summary of the overview instead of the YAML.
    #[arg(long, conflicts_with = "update_groups")]
    json: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose, cli.log_format));

    let sources = TableSources {
        categories: cli.categories.clone(),
        groups: cli.groups.clone(),
        states: cli.states.clone(),
    };
    let tables = ReferenceTables::load(&sources).unwrap_or_else(|e| {
        eprintln!("ERROR: unable to load reference tables: {e}");
        process::exit(1);
    });

    let overview = load_overview(&cli.file).unwrap_or_else(|e| {
        eprintln!("ERROR: unable to load overview file: {e}");
        process::exit(1);
    });

    if cli.update_groups {
        if let Err(e) = write_group_listings(&overview, &tables, &cli.groups_dir) {
            eprintln!("ERROR: unable to update {}: {e}", cli.groups_dir.display());
            process::exit(1);
        }
        return;
    }

    if cli.json {
        let summary = render_json_summary(&overview, &tables);
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("ERROR: unable to serialize summary: {e}");
                process::exit(1);
            }
        }
        return;
    }

    match render_overview(&overview, &tables) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("ERROR: unable to marshal back to yaml: {e}");
            process::exit(1);
        }
    }
}

fn write_group_listings(
    overview: &Overview,
    tables: &ReferenceTables,
    dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let listings = group_listings(overview, tables)?;
    fs::create_dir_all(dir)?;
    for listing in listings {
        let path = dir.join(&listing.file_name);
        fs::write(&path, &listing.contents)
            .map_err(|e| format!("writing {}: {e}", path.display()))?;
        info!(
            path = %path.display(),
            groups = listing.contents.lines().count(),
            "wrote group listing"
        );
    }
    Ok(())
}
