//! Helpers shared by unit tests.

use crate::semantic::{Compilation, CompilationBuilder, MetadataReferences, TypeDefId, TypeSymbol};
use crate::source_map::SourceMap;

/// Compiles one inline source against every reference library.
pub fn compile(src: &str) -> Compilation {
    CompilationBuilder::new(SourceMap::inline(src))
        .build()
        .expect("compilation must not run out of fuel")
}

/// Like [`compile`], but fails the test on any diagnostic.
pub fn compile_clean(src: &str) -> Compilation {
    let compilation = compile(src);
    assert!(
        compilation.diagnostics().is_empty(),
        "unexpected diagnostics:\n{}",
        compilation.diagnostics().render(compilation.source_map())
    );
    compilation
}

/// Compiles against the base class library only.
pub fn compile_without_library(src: &str) -> Compilation {
    CompilationBuilder::new(SourceMap::inline(src))
        .with_references(MetadataReferences::SystemOnly)
        .build()
        .expect("compilation must not run out of fuel")
}

/// Definition by metadata name; panics when missing.
pub fn def(compilation: &Compilation, metadata_name: &str) -> TypeDefId {
    compilation
        .get_type_by_metadata_name(metadata_name)
        .unwrap_or_else(|| panic!("type `{metadata_name}` not found"))
}

/// Non-generic named type by metadata name.
pub fn named(compilation: &Compilation, metadata_name: &str) -> TypeSymbol {
    TypeSymbol::named(def(compilation, metadata_name), Vec::new())
}

/// Generic type constructed over `args`.
pub fn generic(compilation: &Compilation, metadata_name: &str, args: Vec<TypeSymbol>) -> TypeSymbol {
    TypeSymbol::named(def(compilation, metadata_name), args)
}
