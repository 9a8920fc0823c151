//! Indenting text writer shared by the generators.

use std::fmt::{self, Write};

use crate::config::GeneratorConfig;
use crate::model::{GenerationContext, PartialClassInfo};

/// Writes C# with the configured indentation and line ending.
///
/// `\n` in written text is translated to the configured line ending, and each
/// non-empty line is prefixed with the current indentation.
pub struct CodeWriter<'c> {
    config: &'c GeneratorConfig,
    out: String,
    depth: usize,
    at_line_start: bool,
}

impl<'c> CodeWriter<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self {
            config,
            out: String::new(),
            depth: 0,
            at_line_start: true,
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes `header` and an opening brace, then indents.
    pub fn open(&mut self, header: impl fmt::Display) -> fmt::Result {
        writeln!(self, "{header}")?;
        writeln!(self, "{{")?;
        self.indent();
        Ok(())
    }

    /// Dedents and writes a closing brace followed by `suffix`.
    pub fn close(&mut self, suffix: &str) -> fmt::Result {
        self.dedent();
        writeln!(self, "}}{suffix}")
    }

    /// File header, namespace and the opening of every partial class level.
    pub fn begin_file(&mut self, context: &GenerationContext) -> fmt::Result {
        if self.config.auto_generated_header {
            writeln!(self, "// <auto-generated/>")?;
            writeln!(self)?;
        }
        writeln!(self, "#nullable enable")?;
        writeln!(self)?;
        if let Some(namespace) = &context.namespace {
            writeln!(self, "namespace {namespace};")?;
            writeln!(self)?;
        }
        for level in &context.hierarchy {
            self.open(level.declaration())?;
        }
        Ok(())
    }

    pub fn end_file(&mut self, hierarchy: &[PartialClassInfo]) -> fmt::Result {
        for _ in hierarchy {
            self.close("")?;
        }
        Ok(())
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Write for CodeWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for (i, part) in s.split('\n').enumerate() {
            if i > 0 {
                self.out.push_str(self.config.line_ending.as_str());
                self.at_line_start = true;
            }
            if part.is_empty() {
                continue;
            }
            if self.at_line_start {
                let width = self.depth * self.config.indent_width;
                self.out.extend(std::iter::repeat_n(' ', width));
                self.at_line_start = false;
            }
            self.out.push_str(part);
        }
        Ok(())
    }
}

/// Runs `body` between the file preamble and the closing braces.
///
/// Returns an empty string when the hierarchy is empty.
pub fn render_file(
    config: &GeneratorConfig,
    namespace: Option<&str>,
    hierarchy: &[PartialClassInfo],
    body: impl FnOnce(&mut CodeWriter<'_>) -> fmt::Result,
) -> String {
    if hierarchy.is_empty() {
        return String::new();
    }
    let context = GenerationContext {
        namespace: namespace.map(str::to_string),
        hierarchy: hierarchy.to_vec(),
    };
    let mut w = CodeWriter::new(config);
    let written = w
        .begin_file(&context)
        .and_then(|()| body(&mut w))
        .and_then(|()| w.end_file(hierarchy));
    // Writing into a `String` cannot fail.
    match written {
        Ok(()) => w.finish(),
        Err(fmt::Error) => String::new(),
    }
}
