use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use intake_bank::standard_bank;
use intake_engine::aggregate::parse_snapshot;
use intake_engine::config::{load_config, EngineConfig};
use intake_engine::error::EngineError;
use intake_engine::AssessmentEngine;

#[derive(Args)]
pub struct AggregateArgs {
    /// Snapshot JSON files, one per completed session
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Engine configuration file (trend threshold)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: AggregateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let engine = AssessmentEngine::new(standard_bank(), config)?;
    tracing::debug!(trend_change = engine.config().trend_change, "aggregating");
    let results = args.files.iter().map(|path| {
        let label = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(json) => parse_snapshot(&label, &json),
            Err(e) => Err(EngineError::PartialAnalysis {
                label,
                reason: e.to_string(),
            }),
        }
    });

    let aggregate = engine.aggregate(results);
    tracing::info!(
        total = aggregate.metadata.total_files,
        failed = aggregate.metadata.failed_analyses,
        "aggregate computed"
    );
    println!("{}", serde_json::to_string_pretty(&aggregate)?);
    Ok(())
}
