pub mod config;
pub mod error;
pub mod model;

pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use model::{IngestReport, IngestSource, SourceKind, UploadedFile};
