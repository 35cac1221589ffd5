//! StorePulse core: turns a store's metric snapshot into a prioritized,
//! deduplicated list of scored recommendations.

pub mod analytics;
pub mod ingest;
pub mod telemetry;

pub use analytics::{
    generate_recommendations, BenchmarkSet, EngineConfig, MetricSnapshot, RankedList,
    RecommendationEngine,
};
