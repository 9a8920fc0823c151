//! C# source generators over the primitive model.
//!
//! Each generator is a pure function of its inputs: equal data yields
//! byte-identical text. Missing data or an empty class hierarchy yields an
//! empty string.

pub mod input_graph_type;
pub mod output_graph_type;
pub mod schema_configuration;
mod writer;

#[cfg(test)]
mod input_graph_type_tests;
#[cfg(test)]
mod output_graph_type_tests;
#[cfg(test)]
mod writer_tests;

pub use writer::CodeWriter;

use crate::config::GeneratorConfig;
use crate::model::GenerationEntry;

/// Source text of one generation entry.
pub fn generate_entry(config: &GeneratorConfig, entry: &GenerationEntry) -> String {
    let context = entry.context();
    let namespace = context.namespace.as_deref();
    let hierarchy = &context.hierarchy;
    match entry {
        GenerationEntry::Schema { data, .. } => {
            schema_configuration::generate_with(config, namespace, hierarchy, Some(data))
        }
        GenerationEntry::Output { data, .. } => {
            output_graph_type::generate_with(config, namespace, hierarchy, Some(data))
        }
        GenerationEntry::Input { data, .. } => {
            input_graph_type::generate_with(config, namespace, hierarchy, Some(data))
        }
    }
}
