// In app/src/export.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use engine::StrategyRun;
use events::PipelineEvent;
use serde::Serialize;

/// The JSON document handed to charting front ends.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub provider: &'a str,
    #[serde(flatten)]
    pub run: &'a StrategyRun,
    pub events: &'a [PipelineEvent],
}

pub fn write_json(path: &Path, document: &ExportDocument<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| format!("Failed to serialize run to {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
