use std::path::PathBuf;

use aotgen_compiler::{Diagnostics, GeneratorDriver};

use super::run_common::build_compilation;

pub struct CheckArgs {
    pub paths: Vec<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let compilation = build_compilation(&args.paths);

    // Generator warnings only surface when the pipeline runs.
    let result = match GeneratorDriver::default().run(&compilation) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if !result.diagnostics.is_empty() {
        eprint!(
            "{}",
            result
                .diagnostics
                .render_colored(compilation.source_map(), args.color)
        );
    }

    if !is_valid(&result.diagnostics, args.strict) {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

pub fn is_valid(diagnostics: &Diagnostics, strict: bool) -> bool {
    if strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        !diagnostics.has_errors()
    }
}
