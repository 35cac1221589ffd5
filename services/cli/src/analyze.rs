use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use storepulse::analytics::snapshot::{MetricSnapshot, SnapshotParts};
use storepulse::analytics::{BenchmarkSet, EngineConfig, RecommendationEngine};
use storepulse::ingest::MetricsCsvImporter;
use tracing::info;

use crate::cli::AnalyzeArgs;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::render;

pub(crate) fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<(), AppError> {
    let AnalyzeArgs {
        snapshot,
        metrics_csv,
        benchmarks,
        limit,
        json,
    } = args;

    // clap guarantees exactly one of the two inputs is present.
    let snapshot = match (snapshot, metrics_csv) {
        (Some(path), _) => load_snapshot(&path)?,
        (None, Some(path)) => MetricsCsvImporter::from_path(path)?,
        (None, None) => unreachable!("clap enforces an input source"),
    };

    let benchmarks = match benchmarks {
        Some(path) => load_benchmarks(&path)?,
        None => BenchmarkSet::industry_default(),
    };

    let limit = limit.or(config.default_limit);
    info!(?limit, period = ?snapshot.period, "running analysis");

    let engine = RecommendationEngine::new(EngineConfig::default());
    let ranked = engine.generate(&snapshot, &benchmarks, limit);

    render::emit(&snapshot, &benchmarks, ranked, json)
}

fn load_snapshot(path: &Path) -> Result<MetricSnapshot, AppError> {
    let file = File::open(path)?;
    let parts: SnapshotParts = serde_json::from_reader(BufReader::new(file))?;
    Ok(MetricSnapshot::new(parts)?)
}

fn load_benchmarks(path: &Path) -> Result<BenchmarkSet, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
