use serde::{Deserialize, Serialize};

/// An uploaded file as handed over by the upload layer.
///
/// The media type is carried along for reporting only; gating uploads by
/// type happens before the payload reaches this crate.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub display_name: String,
    pub media_type: String,
}

impl UploadedFile {
    pub fn new(bytes: Vec<u8>, display_name: impl Into<String>) -> Self {
        Self {
            bytes,
            display_name: display_name.into(),
            media_type: "application/pdf".to_string(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }
}

/// Where the text of a new practice entry comes from.
#[derive(Debug, Clone)]
pub enum IngestSource {
    Pasted(String),
    Upload(UploadedFile),
}

impl IngestSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            IngestSource::Pasted(_) => SourceKind::Pasted,
            IngestSource::Upload(_) => SourceKind::Pdf,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pasted,
    Pdf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub source_kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Character count before cleanup.
    pub raw_chars: usize,
    pub text: String,
}
