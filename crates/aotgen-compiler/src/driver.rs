//! End-to-end generation over a compilation, with an output cache.
//!
//! The driver keeps the primitive entry and generated text of the previous
//! run per hint name. When a later run produces an equal entry, the cached
//! text is reused and the generator does not run.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::codegen;
use crate::config::GeneratorConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::discover::{self, KnownSymbols};
use crate::model::GenerationEntry;
use crate::semantic::{Compilation, TypeDefId};
use crate::transform::{
    CandidateClassData, ProcessedSchemaData, candidate_class, generated_type_data,
    schema_attribute_data,
};
use crate::Result;

/// One generated C# file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSource {
    pub hint_name: String,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub sources: Vec<GeneratedSource>,
    /// Parse, bind and generator diagnostics.
    pub diagnostics: Diagnostics,
    /// Sources taken from the previous run's cache.
    pub reused: usize,
}

/// Intermediate results for one schema class.
#[derive(Debug)]
pub struct SchemaAnalysis {
    pub schema_class: TypeDefId,
    pub data: CandidateClassData,
    pub processed: ProcessedSchemaData,
    pub entries: Vec<GenerationEntry>,
}

#[derive(Debug, Default)]
pub struct Analysis {
    pub schemas: Vec<SchemaAnalysis>,
    /// Generator diagnostics only.
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default)]
pub struct GeneratorDriver {
    config: GeneratorConfig,
    cache: HashMap<String, (GenerationEntry, String)>,
}

impl GeneratorDriver {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs every stage up to the primitive model.
    pub fn analyze(&self, compilation: &Compilation) -> Result<Analysis> {
        let cancellation = self.config.cancellation_token();
        let mut analysis = Analysis::default();

        let candidates = discover::candidate_classes(compilation);
        let Some(first) = candidates.first() else {
            return Ok(analysis);
        };

        let known = KnownSymbols::resolve(compilation);
        if !known.is_available() {
            analysis
                .diagnostics
                .report_at(first.span(), DiagnosticKind::LibraryNotReferenced)
                .emit();
            return Ok(analysis);
        }

        let mut seen: IndexSet<TypeDefId> = IndexSet::new();
        for candidate in &candidates {
            cancellation.check()?;
            if !seen.insert(candidate.symbol) {
                continue;
            }
            let diagnostics = &mut analysis.diagnostics;
            let Some(attributes) =
                candidate_class::transform(candidate, &known, compilation, diagnostics)
            else {
                continue;
            };
            let data = candidate_class::normalize(attributes, compilation, diagnostics);
            let processed = schema_attribute_data::process(
                &data,
                &known,
                compilation,
                cancellation,
                diagnostics,
            )?;
            let entries = generated_type_data::transform(&data, &processed, &known, compilation);
            analysis.schemas.push(SchemaAnalysis {
                schema_class: candidate.symbol,
                data,
                processed,
                entries,
            });
        }
        Ok(analysis)
    }

    /// Generates every source, reusing cached text for unchanged entries.
    pub fn run(&mut self, compilation: &Compilation) -> Result<RunResult> {
        let analysis = self.analyze(compilation)?;
        let cancellation = self.config.cancellation_token().clone();

        let mut result = RunResult {
            diagnostics: compilation.diagnostics().clone(),
            ..RunResult::default()
        };
        result.diagnostics.extend(analysis.diagnostics);

        let mut cache = HashMap::new();
        for entry in analysis.schemas.into_iter().flat_map(|s| s.entries) {
            cancellation.check()?;
            let hint_name = entry.hint_name();
            let text = match self.cache.remove(&hint_name) {
                Some((previous, text)) if previous == entry => {
                    tracing::debug!(hint_name, "reusing cached source");
                    result.reused += 1;
                    text
                }
                _ => {
                    tracing::debug!(hint_name, "generating source");
                    codegen::generate_entry(&self.config, &entry)
                }
            };
            if text.is_empty() {
                continue;
            }
            result.sources.push(GeneratedSource {
                hint_name: hint_name.clone(),
                text: text.clone(),
            });
            cache.insert(hint_name, (entry, text));
        }
        self.cache = cache;

        tracing::debug!(
            sources = result.sources.len(),
            reused = result.reused,
            "generation finished"
        );
        Ok(result)
    }
}
