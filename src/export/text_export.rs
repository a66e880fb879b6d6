use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::IngestReport;
use crate::export::Exporter;

/// Writes only the normalized text, newline-terminated.
#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for TextExporter {
    fn export(&self, report: &IngestReport) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        let mut text = report.text.clone();
        if !text.is_empty() {
            text.push('\n');
        }

        let path = self.out_dir.join("ingest.txt");
        fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
