//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::message::{Diagnostic, Severity};
use crate::source_map::SourceMap;

/// Builder for rendering diagnostics against the sources they point into.
pub struct DiagnosticsPrinter<'a> {
    diagnostics: Vec<Diagnostic>,
    sources: &'a SourceMap,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(diagnostics: Vec<Diagnostic>, sources: &'a SourceMap) -> Self {
        Self {
            diagnostics,
            sources,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let source = self.sources.content(diag.source);
            let range = adjust_range(diag.range, source.len());

            // The title carries the message; the primary caret stays unlabeled.
            let mut snippet = Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range.clone()));
            if let Some(path) = self.sources.path(diag.source) {
                snippet = snippet.path(path);
            }

            let mut foreign = Vec::new();
            for related in &diag.related {
                if related.span.source == diag.source {
                    snippet = snippet.annotation(
                        AnnotationKind::Context
                            .span(adjust_range(related.span.range, source.len()))
                            .label(&related.message),
                    );
                } else {
                    foreign.push(related);
                }
            }

            let level = severity_to_level(diag.severity());
            let mut title_group = level.primary_title(&diag.message).element(snippet);

            for related in foreign {
                let other = self.sources.content(related.span.source);
                let mut other_snippet = Snippet::source(other).line_start(1).annotation(
                    AnnotationKind::Context
                        .span(adjust_range(related.span.range, other.len()))
                        .label(&related.message),
                );
                if let Some(path) = self.sources.path(related.span.source) {
                    other_snippet = other_snippet.path(path);
                }
                title_group = title_group.element(other_snippet);
            }

            for hint in &diag.hints {
                title_group = title_group.element(Level::HELP.message(hint));
            }

            let mut report: Vec<Group> = vec![title_group];

            if let Some(fix) = &diag.fix {
                report.push(
                    Level::HELP.secondary_title(&fix.description).element(
                        Snippet::source(source)
                            .line_start(1)
                            .patch(Patch::new(range, &fix.replacement)),
                    ),
                );
            }

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
