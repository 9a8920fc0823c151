//! Symbol-level transformations, from schema attributes to the primitive model.
//!
//! Stages run in order:
//! - `candidate_class` lowers marker attributes into [`SchemaAttributeData`]
//! - `schema_attribute_data` walks the type graph, scanning each CLR type
//!   with `type_symbol`
//! - `generated_type_data` projects the result onto [`crate::model`]

pub mod candidate_class;
pub mod generated_type_data;
pub mod schema_attribute_data;
pub mod type_symbol;

#[cfg(test)]
mod candidate_class_tests;
#[cfg(test)]
mod generated_type_data_tests;
#[cfg(test)]
mod schema_attribute_data_tests;

pub use candidate_class::{CandidateClassData, SchemaAttributeData};
pub use schema_attribute_data::{Direction, ProcessedSchemaData};
pub use type_symbol::{ScanMemberTypes, TypeScanResult};
