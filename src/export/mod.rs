pub mod json_export;
pub mod text_export;

use anyhow::Result;

use crate::core::model::IngestReport;

pub use json_export::JsonExporter;
pub use text_export::TextExporter;

pub trait Exporter {
    fn export(&self, report: &IngestReport) -> Result<()>;
}
