use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Output};

use crate::core::config::ExtractorConfig;
use crate::core::error::{ExtractError, ExtractResult};
use crate::extract::scratch::ScratchPdf;
use crate::extract::TextExtractor;

/// Extracts text by running poppler's `pdftotext` against a scratch copy
/// of the upload.
#[derive(Debug, Clone, Default)]
pub struct PdfToText {
    config: ExtractorConfig,
}

impl PdfToText {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Returns the tool's version banner, or `ToolNotFound`.
    ///
    /// Some builds exit non-zero for `-v`, so only the banner is checked.
    pub fn probe(&self) -> ExtractResult<String> {
        let output = self.spawn(Command::new(&self.config.program).arg("-v"))?;
        let banner = [output.stderr.as_slice(), output.stdout.as_slice()]
            .into_iter()
            .map(String::from_utf8_lossy)
            .find_map(|text| {
                text.lines()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .map(str::to_string)
            });

        banner.ok_or_else(|| {
            ExtractError::ExtractionFailed(format!(
                "{} -v printed nothing",
                self.config.program.display()
            ))
        })
    }

    fn run(&self, pdf_path: &Path) -> ExtractResult<String> {
        if self.config.debug {
            log::debug!(
                "running {} -enc UTF-8 {} -",
                self.config.program.display(),
                pdf_path.display()
            );
        }

        let output = self.spawn(
            Command::new(&self.config.program)
                .arg("-enc")
                .arg("UTF-8")
                .arg(pdf_path)
                .arg("-"),
        )?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let message = if stderr.is_empty() {
                format!(
                    "{} exited with status {}",
                    self.config.program.display(),
                    output.status
                )
            } else {
                stderr.to_string()
            };
            return Err(ExtractError::ExtractionFailed(message));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if self.config.debug {
            log::debug!(
                "{} returned {} bytes, {} chars after trim",
                self.config.program.display(),
                output.stdout.len(),
                text.chars().count()
            );
        }

        if text.is_empty() {
            return Err(ExtractError::EmptyExtraction);
        }
        Ok(text)
    }

    fn spawn(&self, command: &mut Command) -> ExtractResult<Output> {
        command.output().map_err(|err| match err.kind() {
            ErrorKind::NotFound => ExtractError::ToolNotFound {
                program: self.config.program.clone(),
            },
            _ => ExtractError::ExtractionFailed(format!(
                "failed to invoke {}: {err}",
                self.config.program.display()
            )),
        })
    }
}

impl TextExtractor for PdfToText {
    fn extract(&self, bytes: &[u8], display_name: &str) -> ExtractResult<String> {
        if bytes.is_empty() {
            return Err(ExtractError::EmptyUpload);
        }

        let scratch = ScratchPdf::write(bytes)?;
        if self.config.debug {
            log::debug!(
                "extracting {display_name} ({} bytes) via {}",
                bytes.len(),
                scratch.path().display()
            );
        }

        self.run(scratch.path())
    }
}
