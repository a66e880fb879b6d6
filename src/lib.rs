pub mod core;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod pipeline;

pub use crate::core::error::ExtractError;
pub use crate::core::model::{IngestReport, IngestSource, UploadedFile};
pub use normalize::normalize;
