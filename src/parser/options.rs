//! Parsing options and configuration.

/// Options for parsing PDF documents.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Which pages get raw-text extraction
    pub raw_text: RawTextMode,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be read).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set raw-text extraction mode.
    pub fn with_raw_text(mut self, mode: RawTextMode) -> Self {
        self.raw_text = mode;
        self
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}

/// Raw text is only consulted for the title fallback, which reads page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawTextMode {
    /// Extract raw text of the first page only
    #[default]
    FirstPage,
    /// Extract raw text of every page
    AllPages,
    /// Skip raw-text extraction; layout text is used instead
    Skip,
}

impl RawTextMode {
    /// Whether the page at `position` (0-based) needs raw text.
    pub fn includes(self, position: usize) -> bool {
        match self {
            RawTextMode::FirstPage => position == 0,
            RawTextMode::AllPages => true,
            RawTextMode::Skip => false,
        }
    }
}
