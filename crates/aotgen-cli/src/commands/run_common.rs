//! Steps shared by every command: load sources, then bind them.

use std::path::PathBuf;

use aotgen_compiler::{Compilation, CompilationBuilder};

use super::source_loader::load_sources;

/// Loads and binds `paths`, exiting with status 1 when that is impossible.
pub fn build_compilation(paths: &[PathBuf]) -> Compilation {
    let sources = match load_sources(paths) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if sources.is_empty() {
        eprintln!("error: no sources to compile");
        std::process::exit(1);
    }

    match CompilationBuilder::new(sources).build() {
        Ok(compilation) => compilation,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
