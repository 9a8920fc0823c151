//! Grammar productions for the C# declaration subset.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Declarations (namespaces, types, members, attributes, type references) get full structure;
//! method bodies and non-constant expressions are kept as opaque token runs.

mod attributes;
mod expressions;
mod items;
mod members;
mod types;
