//! Configuration for generated source text.

use crate::CancellationToken;

/// Line terminator used in generated files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Configuration for a generation run.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Spaces per indentation level
    pub(crate) indent_width: usize,
    /// Whether to start each file with `// <auto-generated/>`
    pub(crate) auto_generated_header: bool,
    pub(crate) line_ending: LineEnding,
    pub(crate) cancellation: CancellationToken,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            auto_generated_header: true,
            line_ending: LineEnding::default(),
            cancellation: CancellationToken::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of spaces per indentation level.
    pub fn indent_width(mut self, value: usize) -> Self {
        self.indent_width = value;
        self
    }

    /// Set whether generated files carry the `// <auto-generated/>` marker.
    pub fn auto_generated_header(mut self, value: bool) -> Self {
        self.auto_generated_header = value;
        self
    }

    pub fn line_ending(mut self, value: LineEnding) -> Self {
        self.line_ending = value;
        self
    }

    /// Set the token checked between units of work.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }
}
