use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use futstat::data::model::Roster;
use futstat::data::{filter, loader};
use futstat::snapshot::SnapshotStore;
use futstat::{histogram, report, stats, Error};

#[derive(Parser)]
#[command(name = "futstat", about = "Roster analytics for FUT club exports", version)]
struct Cli {
    /// Directory holding snapshot CSV files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for rendered histogram images.
    #[arg(long, default_value = "plots")]
    plots_dir: PathBuf,

    /// Downloads directory to adopt fresh exports from.
    #[arg(long)]
    downloads_dir: Option<PathBuf>,

    /// Snapshot file stem.
    #[arg(long, default_value = "club-analyzer")]
    stem: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics for a snapshot
    Summary {
        /// Snapshot stem to load instead of the latest one.
        #[arg(long)]
        snapshot: Option<String>,

        /// Emit CSV rows instead of a Markdown table.
        #[arg(long)]
        csv: bool,
    },
    /// List the distinct leagues in the latest snapshot
    Leagues,
    /// Print a league's players grouped by position
    League {
        /// League name as it appears in the export.
        name: String,
    },
    /// List available snapshot files
    Files,
    /// Adopt a downloaded export and date-stamp the default file
    Refresh,
    /// Render the rating histogram for a snapshot
    Histogram {
        /// Snapshot stem to load instead of the latest one.
        #[arg(long)]
        snapshot: Option<String>,

        /// Re-render even if the image already exists.
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli { data_dir, plots_dir, downloads_dir, stem, command } = cli;

    let mut store = SnapshotStore::new(data_dir, stem);
    if let Some(dir) = downloads_dir {
        store = store.with_downloads_dir(dir);
    }

    match command {
        Commands::Summary { snapshot, csv } => {
            let roster = load_snapshot(&store, snapshot.as_deref())?;
            let summary = stats::summarize(&roster)?;
            if csv {
                print!("{}", summary.to_csv()?);
            } else {
                print!("{}", summary.to_markdown());
            }
        }
        Commands::Leagues => {
            let roster = load_snapshot(&store, None)?;
            for league in filter::leagues(&roster) {
                println!("{league}");
            }
        }
        Commands::League { name } => {
            let roster = load_snapshot(&store, None)?;
            let listing = report::league_listing(&roster, &name);
            if listing.is_empty() {
                println!("no players in league '{name}'");
            }
            for (label, lines) in listing {
                println!("{label}:");
                for line in lines {
                    println!("  {line}");
                }
            }
        }
        Commands::Files => {
            for name in store.data_files()? {
                println!("{name}");
            }
        }
        Commands::Refresh => {
            if store.import_downloaded()? {
                println!("adopted downloaded export into {}", store.default_path().display());
            }
            match store.finalize_default()? {
                Some(path) => println!("finalized {}", path.display()),
                None => println!("nothing to finalize"),
            }
        }
        Commands::Histogram { snapshot, force } => {
            // No snapshot is not an error here: there is simply nothing to plot.
            let path = match resolve_snapshot(&store, snapshot.as_deref()) {
                Ok(path) => path,
                Err(Error::NoSnapshot { .. }) => {
                    println!(
                        "no snapshot in {}; nothing to render",
                        store.data_dir().display()
                    );
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };
            let roster = load_roster(&path)?;
            let output = plots_dir.join(format!("{}.png", file_stem(&path, &store)));

            let rendered = if force {
                histogram::render(&roster, &output)?;
                true
            } else {
                histogram::render_if_absent(&roster, &output)?
            };
            if rendered {
                println!("wrote {}", output.display());
            } else {
                println!(
                    "{} already exists; skipped (use --force to re-render)",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

/// Resolve which snapshot file a command should read. A named stem points at
/// `{data_dir}/{name}.csv`; otherwise the store picks the latest snapshot.
fn resolve_snapshot(store: &SnapshotStore, named: Option<&str>) -> futstat::Result<PathBuf> {
    match named {
        Some(name) => Ok(store.data_dir().join(format!("{name}.csv"))),
        None => store.latest(),
    }
}

fn load_snapshot(store: &SnapshotStore, named: Option<&str>) -> Result<Roster> {
    let path = resolve_snapshot(store, named)?;
    load_roster(&path)
}

fn load_roster(path: &Path) -> Result<Roster> {
    loader::load_roster(path).with_context(|| format!("failed to load {}", path.display()))
}

fn file_stem(path: &Path, store: &SnapshotStore) -> String {
    path.file_stem()
        .map_or_else(|| store.stem().to_string(), |s| s.to_string_lossy().into_owned())
}
