use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use aotgen_compiler::config::LineEnding;
use aotgen_compiler::{GeneratedSource, GeneratorConfig, GeneratorDriver};

use super::run_common::build_compilation;

pub struct GenerateArgs {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: usize,
    pub crlf: bool,
    pub header: bool,
    pub color: bool,
}

impl GenerateArgs {
    pub fn config(&self) -> GeneratorConfig {
        let line_ending = if self.crlf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        GeneratorConfig::new()
            .indent_width(self.indent)
            .auto_generated_header(self.header)
            .line_ending(line_ending)
    }
}

pub fn run(args: GenerateArgs) {
    let compilation = build_compilation(&args.paths);

    let mut driver = GeneratorDriver::new(args.config());
    let result = match driver.run(&compilation) {
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
    if result.diagnostics.has_errors() {
        std::process::exit(1);
    }

    match &args.output {
        Some(dir) => {
            if let Err(e) = write_sources(dir, &result.sources) {
                eprintln!("error: failed to write into '{}': {}", dir.display(), e);
                std::process::exit(1);
            }
            tracing::info!(files = result.sources.len(), dir = %dir.display(), "sources written");
        }
        None => print!("{}", render_sources(&result.sources)),
    }
}

/// Concatenates sources, each under a `// ---- {hint_name} ----` banner.
pub fn render_sources(sources: &[GeneratedSource]) -> String {
    let mut out = String::new();
    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "// ---- {} ----", source.hint_name);
        out.push_str(&source.text);
    }
    out
}

/// Writes each source as `dir/{hint_name}`, creating `dir` when missing.
pub fn write_sources(dir: &Path, sources: &[GeneratedSource]) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for source in sources {
        fs::write(dir.join(&source.hint_name), &source.text)?;
    }
    Ok(())
}
