use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use lotview::data::loader;
use lotview::data::model::{Direction, SortKey, SortSpec};
use lotview::report;

/// Print a dashboard report for a directory of inventory CSV tables.
#[derive(Debug, Parser)]
#[command(name = "lotview", version)]
struct Args {
    /// Directory holding the eleven inventory CSV files.
    #[arg(default_value = "data")]
    data_dir: PathBuf,

    /// Sort the inventory listing: KEY[:asc|:desc], e.g. `price:desc`.
    #[arg(long)]
    sort: Option<String>,

    /// Emit the full dashboard payload as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sort = args.sort.as_deref().map(parse_sort).transpose()?;

    let store = loader::load_dir(&args.data_dir)?;
    let missing = store.missing_tables();
    if !missing.is_empty() {
        log::warn!("Snapshot is partial: {} of 11 tables missing", missing.len());
    }

    if args.json {
        let dash = report::dashboard(&store, sort.as_ref())?;
        println!("{}", serde_json::to_string_pretty(&dash)?);
    } else {
        print!("{}", report::render(&store, sort.as_ref())?);
    }
    Ok(())
}

fn parse_sort(spec: &str) -> Result<SortSpec> {
    let (key, direction) = match spec.split_once(':') {
        None => (spec, Direction::Ascending),
        Some((key, "asc")) => (key, Direction::Ascending),
        Some((key, "desc")) => (key, Direction::Descending),
        Some((_, other)) => bail!("invalid sort direction '{other}' (use asc or desc)"),
    };
    if key.is_empty() {
        bail!("empty sort key");
    }
    Ok(SortSpec {
        key: SortKey::from_field(key),
        direction,
    })
}
