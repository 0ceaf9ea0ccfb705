//! Address index comparison tool.
//!
//! Loads two builds of the same region and reports differences in cities,
//! streets, buildings and intersections, either as text on stdout or as an
//! OSM file of review nodes.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use addrcmp::sink::{DiffSink, OsmSink, TextSink};
use addrcmp::{Category, CategorySet, CompareOptions, HierarchyDiffer, SnapshotIndex, Thresholds};

#[derive(Parser, Debug)]
#[command(name = "addrcmp")]
#[command(about = "Compare two builds of an address index")]
struct Args {
    /// Report extra and possibly duplicated cities
    #[arg(long)]
    cities: bool,

    /// Report cities whose localized names differ
    #[arg(long)]
    city_names: bool,

    /// Report streets missing on either side
    #[arg(long)]
    streets: bool,

    /// Report street name and street order differences
    #[arg(long)]
    street_names: bool,

    /// Report building count, name and postcode differences
    #[arg(long)]
    buildings: bool,

    /// Report intersection count, name and location differences
    #[arg(long)]
    intersections: bool,

    /// Write an OSM file of review nodes instead of text
    #[arg(long, value_name = "FILE")]
    osm: Option<PathBuf>,

    /// TOML file overriding distance thresholds
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address index snapshots; the first two are compared
    #[arg(required = true, num_args = 2..)]
    files: Vec<PathBuf>,
}

impl Args {
    fn categories(&self) -> CategorySet {
        let selected = [
            (self.cities, Category::Cities),
            (self.city_names, Category::CityNames),
            (self.streets, Category::Streets),
            (self.street_names, Category::StreetNames),
            (self.buildings, Category::Buildings),
            (self.intersections, Category::Intersections),
        ];
        CategorySet::from_selection(
            selected
                .into_iter()
                .filter(|(on, _)| *on)
                .map(|(_, category)| category),
        )
    }
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the text report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let thresholds = match &args.config {
        Some(path) => Thresholds::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Thresholds::default(),
    };
    let options = CompareOptions::new(args.categories()).with_thresholds(thresholds);

    info!(
        "Enabled categories: {}",
        options
            .categories
            .iter()
            .map(|c| c.flag())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if args.files.len() > 2 {
        warn!(
            "Ignoring {} extra input file(s); only the first two are compared",
            args.files.len() - 2
        );
    }
    let first = SnapshotIndex::open(&args.files[0]).context("Failed to open first index")?;
    let second = SnapshotIndex::open(&args.files[1]).context("Failed to open second index")?;
    info!("Comparing '{}' against '{}'", first.name(), second.name());

    let mut differ = HierarchyDiffer::new(options);
    let mut sink: Box<dyn DiffSink> = match &args.osm {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            info!("Writing review nodes to {}", path.display());

            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len}")?
                    .progress_chars("#>-"),
            );
            differ = differ.with_progress(pb);

            Box::new(OsmSink::new(BufWriter::new(file)))
        }
        None => Box::new(TextSink::new(BufWriter::new(io::stdout().lock()))),
    };

    let summary = differ
        .run(&first, &second, sink.as_mut())
        .context("Comparison failed")?;

    info!(
        "Cities: {} vs {}, {} matched",
        summary.cities_first, summary.cities_second, summary.matched_cities
    );
    for (category, count) in &summary.events {
        info!("  {}: {}", category, count);
    }
    info!("Total discrepancies: {}", summary.total_events());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_needs_two_inputs() {
        let err = Args::try_parse_from(["addrcmp", "a.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooFewValues);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Args::try_parse_from(["addrcmp", "--bogus", "a.json", "b.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_osm_path_and_extra_inputs() {
        let args =
            Args::try_parse_from(["addrcmp", "--osm=out.osm", "--streets", "a", "b", "c"]).unwrap();
        assert_eq!(args.osm, Some(PathBuf::from("out.osm")));
        assert_eq!(args.files.len(), 3);
        assert_eq!(
            args.categories(),
            CategorySet::from_selection([Category::Streets])
        );
    }

    #[test]
    fn test_no_flags_enable_all_categories() {
        let args = Args::try_parse_from(["addrcmp", "a.json", "b.json"]).unwrap();
        assert!(args.osm.is_none());
        assert_eq!(args.categories(), CategorySet::all());
    }
}
