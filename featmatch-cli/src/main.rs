use clap::{Parser, Subcommand};
use featmatch::image::io::load_rgb_image;
use featmatch::{
    batch, Binding, BindingSpec, FeatureKind, FeatureStore, MatchResult, Matcher, Query, Region,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "FeatMatch CLI (feature generation and query)")]
struct Cli {
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate feature databases from a directory of images.
    Generate {
        /// Input image directory.
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,
        /// Feature types, repeatable or comma-separated.
        #[arg(
            short,
            long,
            value_name = "TYPE",
            value_delimiter = ',',
            required = true
        )]
        feature: Vec<String>,
        /// Region to extract from (whole | top | bottom | center).
        #[arg(short = 'p', long, value_name = "REGION", default_value = "whole")]
        region: String,
        /// Output base path; each database lands at <base>_<feature>.csv.
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
    },
    /// Rank catalog images against a target image.
    Query {
        /// Target image path.
        #[arg(short, long, value_name = "IMG")]
        target: String,
        /// Binding spec `feature:region:metric[:weight]=db.csv`,
        /// repeatable or comma-separated.
        #[arg(
            short,
            long,
            value_name = "SPEC",
            value_delimiter = ',',
            required = true
        )]
        db: Vec<String>,
        /// Number of matches to return.
        #[arg(short = 'n', long, value_name = "N", default_value_t = 5)]
        top: usize,
        /// Optional JSON output path.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    id: String,
    distance: f32,
}

impl From<MatchResult> for MatchRecord {
    fn from(value: MatchResult) -> Self {
        Self {
            id: value.id,
            distance: value.distance,
        }
    }
}

#[derive(Debug, Serialize)]
struct QueryOutput {
    target: String,
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("featmatch=info".parse()?))
            .with_target(false)
            .init();
    }

    match cli.command {
        Command::Generate {
            input,
            feature,
            region,
            output,
        } => run_generate(&input, &feature, &region, &output),
        Command::Query {
            target,
            db,
            top,
            output,
        } => run_query(&target, &db, top, output.as_deref()),
    }
}

fn run_generate(
    input: &Path,
    features: &[String],
    region_str: &str,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let region = Region::parse(region_str)
        .ok_or_else(|| format!("unknown region '{region_str}' (whole | top | bottom | center)"))?;

    let mut kinds = Vec::with_capacity(features.len());
    for name in features {
        let kind =
            FeatureKind::parse(name).ok_or_else(|| format!("unknown feature type '{name}'"))?;
        kinds.push(kind);
    }

    for kind in kinds {
        let store = batch::generate_from_dir(input, kind, region)?;
        let path = database_path(output, kind);
        store.save(&path)?;
        println!("wrote {} records to {}", store.len(), path.display());
    }
    Ok(())
}

/// Database files are named `<base>_<feature>.csv` so a single base path
/// can hold one database per feature type.
fn database_path(base: &Path, kind: FeatureKind) -> PathBuf {
    let mut stem = base.to_string_lossy().into_owned();
    if let Some(trimmed) = stem.strip_suffix(".csv") {
        stem = trimmed.to_string();
    }
    PathBuf::from(format!("{stem}_{kind}.csv"))
}

fn run_query(
    target: &str,
    specs: &[String],
    top: usize,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if top == 0 {
        return Err("top must be at least 1".into());
    }

    // Reject malformed specs before touching any file.
    let mut parsed = Vec::with_capacity(specs.len());
    for spec in specs {
        parsed.push(BindingSpec::parse(spec)?);
    }

    // Unreadable or empty databases degrade to a warning; the remaining
    // bindings still produce a ranking.
    let mut loaded: Vec<(BindingSpec, FeatureStore)> = Vec::new();
    for spec in parsed {
        match FeatureStore::load(Path::new(&spec.db_path)) {
            Ok(store) if store.is_empty() => {
                eprintln!("warning: database '{}' is empty, skipping binding", spec.db_path);
            }
            Ok(store) => loaded.push((spec, store)),
            Err(err) => {
                eprintln!("warning: skipping binding for '{}': {err}", spec.db_path);
            }
        }
    }
    if loaded.is_empty() {
        println!("No matches (no usable databases).");
        return Ok(());
    }

    // Decode the target only when some store lacks its stored vector.
    let needs_image = loaded.iter().any(|(_, store)| store.find(target).is_none());
    let image = if needs_image {
        Some(load_rgb_image(target)?)
    } else {
        None
    };

    let bindings: Vec<Binding<'_>> = loaded
        .iter()
        .map(|(spec, store)| Binding {
            feature: spec.feature,
            region: spec.region,
            metric: spec.metric,
            weight: spec.weight,
            store,
        })
        .collect();

    let query = Query {
        id: target,
        image: image.as_ref(),
    };
    let results = Matcher::rank(&query, &bindings, top)?;

    if results.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    println!("Top {} matches for {target}:", results.len());
    for (rank, result) in results.iter().enumerate() {
        println!("{:>3}. {}  {:.6}", rank + 1, result.id, result.distance);
    }

    if let Some(path) = output {
        let report = QueryOutput {
            target: target.to_string(),
            matches: results.into_iter().map(MatchRecord::from).collect(),
        };
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    Ok(())
}
