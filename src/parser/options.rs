//! Parsing options and configuration.

/// Options for decoding AFP print streams.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How unknown structured-field type codes are handled
    pub error_mode: ErrorMode,

    /// Whether overlay inclusions are merged into page element lists
    pub incorporate_overlays: bool,

    /// Whether image and raw-block resources are kept on the model.
    /// Text overlays are always kept; pages need them.
    pub extract_resources: bool,
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

    /// Enable permissive mode (keep unknown fields, count them).
    pub fn permissive(mut self) -> Self {
        self.error_mode = ErrorMode::Permissive;
        self
    }

    /// Enable or disable overlay incorporation.
    pub fn with_overlays(mut self, incorporate: bool) -> Self {
        self.incorporate_overlays = incorporate;
        self
    }

    /// Skip overlay inclusion fields when building pages.
    pub fn without_overlays(mut self) -> Self {
        self.incorporate_overlays = false;
        self
    }

    /// Enable or disable retention of image and raw-block resources.
    pub fn with_resources(mut self, extract: bool) -> Self {
        self.extract_resources = extract;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            incorporate_overlays: true,
            extract_resources: true,
        }
    }
}

/// Handling of structured-field type codes outside the known-field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the load on the first unknown field
    #[default]
    Strict,
    /// Keep unknown fields and count them as a diagnostic
    Permissive,
}
