use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::error::{ExtractError, ExtractResult};

const PREFIX: &str = "typist-upload-";
const SUFFIX: &str = ".pdf";

/// A uniquely named `.pdf` scratch copy of an upload.
///
/// The file lives exactly as long as this guard. Removal happens on drop,
/// on every exit path, and a failed removal is logged instead of being
/// returned so it can never replace the outcome of the extraction.
#[derive(Debug)]
pub struct ScratchPdf {
    file: Option<NamedTempFile>,
}

impl ScratchPdf {
    pub fn write(bytes: &[u8]) -> ExtractResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile()
            .map_err(ExtractError::Scratch)?;
        file.write_all(bytes).map_err(ExtractError::Scratch)?;
        file.flush().map_err(ExtractError::Scratch)?;
        Ok(Self { file: Some(file) })
    }

    pub fn path(&self) -> &Path {
        // `file` is only taken in `drop`.
        match &self.file {
            Some(file) => file.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for ScratchPdf {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            if let Err(err) = file.close() {
                log::warn!("failed to remove scratch file {}: {err}", path.display());
            }
        }
    }
}
