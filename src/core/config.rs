use std::path::PathBuf;

pub const DEFAULT_PROGRAM: &str = "pdftotext";

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub program: PathBuf,
    /// Emit invocation and size diagnostics at debug level.
    pub debug: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            debug: false,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
