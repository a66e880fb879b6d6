use std::path::Path;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

use crate::core::config::ExtractorConfig;
use crate::core::model::{IngestReport, IngestSource, UploadedFile};
use crate::export::json_export::JsonExporter;
use crate::export::text_export::TextExporter;
use crate::export::Exporter;
use crate::extract::{PdfToText, TextExtractor};
use crate::normalize::normalize_str;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub extractor: ExtractorConfig,
}

impl PipelineConfig {
    pub fn new(extractor: ExtractorConfig) -> Self {
        Self { extractor }
    }
}

/// Paste or upload in, canonical practice text out.
pub fn ingest(config: &PipelineConfig, source: IngestSource) -> Result<IngestReport> {
    let extractor = PdfToText::new(config.extractor.clone());
    ingest_with(config, &extractor, source)
}

pub fn ingest_with(
    config: &PipelineConfig,
    extractor: &dyn TextExtractor,
    source: IngestSource,
) -> Result<IngestReport> {
    let source_kind = source.kind();
    let (raw, display_name, media_type) = match source {
        IngestSource::Pasted(text) => (text, None, None),
        IngestSource::Upload(file) => {
            let raw = extractor
                .extract(&file.bytes, &file.display_name)
                .with_context(|| format!("failed to extract text from {}", file.display_name))?;
            (raw, Some(file.display_name), Some(file.media_type))
        }
    };

    let report = IngestReport {
        source_kind,
        display_name,
        media_type,
        raw_chars: raw.chars().count(),
        text: normalize_str(&raw),
    };
    if let Some(line) = diagnostic_line(&config.extractor, &report) {
        log::debug!("{line}");
    }
    Ok(report)
}

fn diagnostic_line(config: &ExtractorConfig, report: &IngestReport) -> Option<String> {
    config.debug.then(|| {
        format!(
            "ingested {} chars ({} raw) from {:?}",
            report.text.chars().count(),
            report.raw_chars,
            report.source_kind
        )
    })
}

/// Runs `ingest` on a worker thread so the external tool never blocks
/// the caller. No timeout is applied here.
pub fn spawn_ingest(config: PipelineConfig, source: IngestSource) -> JoinHandle<Result<IngestReport>> {
    thread::spawn(move || ingest(&config, source))
}

pub fn ingest_pdf_file(config: &PipelineConfig, path: &Path) -> Result<IngestReport> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let display_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    ingest(config, IngestSource::Upload(UploadedFile::new(bytes, display_name)))
}

pub fn export_report(report: &IngestReport, output: &Path) -> Result<()> {
    let json_exporter = JsonExporter::new(output.to_path_buf());
    json_exporter.export(report)?;

    let text_exporter = TextExporter::new(output.to_path_buf());
    text_exporter.export(report)?;

    Ok(())
}
