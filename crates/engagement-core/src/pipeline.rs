//! End-to-end run: validate, generate, export.

use std::path::Path;

use tracing::{debug, info};

use crate::config::ChartConfig;
use crate::error::Result;
use crate::generator::TableGenerator;
use crate::render::{ExportSummary, Exporter, PngExporter};
use crate::table::EngagementTable;

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub table: EngagementTable,
    pub summary: ExportSummary,
}

/// Generate the table for a configuration without exporting it.
///
/// # Errors
///
/// Returns a validation error if the score model is inconsistent.
pub fn build_table(config: &ChartConfig) -> Result<EngagementTable> {
    config.model.validate()?;
    Ok(TableGenerator::new(config.model.clone()).seeded(config.seed))
}

/// Run the whole chart pipeline with the PNG exporter.
pub fn run(config: &ChartConfig) -> Result<RunReport> {
    run_with(config, &PngExporter::new())
}

/// Run the whole chart pipeline with a caller-supplied exporter.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the export fails.
pub fn run_with<E: Exporter>(config: &ChartConfig, exporter: &E) -> Result<RunReport> {
    config.validate()?;
    debug!(seed = config.seed, output = %config.output.display(), "starting chart run");

    let table = build_table(config)?;
    let summary = exporter.export(&table, &config.style, Path::new(&config.output))?;

    info!(
        path = %summary.path.display(),
        width = summary.width,
        height = summary.height,
        "chart written"
    );
    Ok(RunReport { table, summary })
}
