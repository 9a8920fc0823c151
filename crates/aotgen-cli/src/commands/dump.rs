use std::fmt::{self, Write as _};
use std::path::PathBuf;

use aotgen_compiler::driver::{Analysis, SchemaAnalysis};
use aotgen_compiler::model::GenerationEntry;
use aotgen_compiler::semantic::{TypeDefId, TypeSymbol};
use aotgen_compiler::{Compilation, GeneratorDriver};
use aotgen_core::Colors;
use serde::Serialize;

use super::run_common::build_compilation;

pub struct DumpArgs {
    pub paths: Vec<PathBuf>,
    pub schema: Option<String>,
    pub json: bool,
    pub color: bool,
}

/// JSON shape of one schema class in `dump --json`.
#[derive(Serialize)]
pub struct SchemaDump<'a> {
    pub schema: String,
    pub entries: &'a [GenerationEntry],
}

pub fn run(args: DumpArgs) {
    let compilation = build_compilation(&args.paths);
    if compilation.diagnostics().has_errors() {
        eprint!(
            "{}",
            compilation
                .diagnostics()
                .render_colored(compilation.source_map(), args.color)
        );
        std::process::exit(1);
    }

    let analysis = match GeneratorDriver::default().analyze(&compilation) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    if !analysis.diagnostics.is_empty() {
        eprint!(
            "{}",
            analysis
                .diagnostics
                .render_colored(compilation.source_map(), args.color)
        );
    }

    let selected = select(&compilation, &analysis, args.schema.as_deref());
    if selected.is_empty() {
        match &args.schema {
            Some(name) => eprintln!("error: no schema class named '{}'", name),
            None => eprintln!("error: no schema classes found"),
        }
        std::process::exit(1);
    }

    if args.json {
        match render_json(&compilation, &selected) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let colors = Colors::new(args.color);
    print!("{}", render(&compilation, &selected, colors));
}

/// Schemas whose simple or qualified name equals `name`; all when `None`.
pub fn select<'a>(
    compilation: &Compilation,
    analysis: &'a Analysis,
    name: Option<&str>,
) -> Vec<&'a SchemaAnalysis> {
    analysis
        .schemas
        .iter()
        .filter(|schema| match name {
            Some(name) => {
                compilation.def(schema.schema_class).name == name
                    || schema_name(compilation, schema.schema_class) == name
            }
            None => true,
        })
        .collect()
}

pub fn render_json(
    compilation: &Compilation,
    schemas: &[&SchemaAnalysis],
) -> serde_json::Result<String> {
    let dumps: Vec<SchemaDump<'_>> = schemas
        .iter()
        .map(|schema| SchemaDump {
            schema: schema_name(compilation, schema.schema_class),
            entries: &schema.entries,
        })
        .collect();
    serde_json::to_string_pretty(&dumps)
}

pub fn render(compilation: &Compilation, schemas: &[&SchemaAnalysis], colors: Colors) -> String {
    let mut out = String::new();
    for (i, schema) in schemas.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write_schema(&mut out, compilation, schema, colors);
    }
    out
}

fn write_schema(
    out: &mut String,
    compilation: &Compilation,
    schema: &SchemaAnalysis,
    c: Colors,
) -> fmt::Result {
    let processed = &schema.processed;
    writeln!(
        out,
        "{}schema{} {}{}{}",
        c.dim,
        c.reset,
        c.blue,
        schema_name(compilation, schema.schema_class),
        c.reset
    )?;

    let roots = [
        ("query", &processed.query_root_graph_type),
        ("mutation", &processed.mutation_root_graph_type),
        ("subscription", &processed.subscription_root_graph_type),
    ];
    for (label, root) in roots {
        if let Some(root) = root {
            writeln!(
                out,
                "  {}{}{}{}:{} {}{}{}",
                c.blue,
                label,
                c.reset,
                c.dim,
                c.reset,
                c.green,
                compilation.display_minimal(root),
                c.reset
            )?;
        }
    }

    let graph_types: Vec<String> = processed
        .discovered_graph_types
        .iter()
        .map(|ty| format!("{}{}{}", c.green, compilation.display_minimal(ty), c.reset))
        .collect();
    write_section(out, "graph types", &graph_types, c)?;

    let output_mappings = pairs(compilation, processed.output_clr_type_mappings.iter(), c);
    write_section(out, "output mappings", &output_mappings, c)?;
    let input_mappings = pairs(compilation, processed.input_clr_type_mappings.iter(), c);
    write_section(out, "input mappings", &input_mappings, c)?;
    let remapped = pairs(compilation, processed.remapped_graph_types.iter(), c);
    write_section(out, "remapped", &remapped, c)?;

    let list_types: Vec<String> = processed
        .input_list_types
        .iter()
        .map(|ty| format!("{}{}{}", c.blue, compilation.display_minimal(ty), c.reset))
        .collect();
    write_section(out, "input list types", &list_types, c)?;

    let files: Vec<String> = schema
        .entries
        .iter()
        .map(|entry| format!("{}{}{}", c.green, entry.hint_name(), c.reset))
        .collect();
    write_section(out, "files", &files, c)
}

fn pairs<'a>(
    compilation: &Compilation,
    map: impl Iterator<Item = (&'a TypeSymbol, &'a TypeSymbol)>,
    c: Colors,
) -> Vec<String> {
    map.map(|(from, to)| {
        format!(
            "{}{}{} {}->{} {}{}{}",
            c.blue,
            compilation.display_minimal(from),
            c.reset,
            c.dim,
            c.reset,
            c.green,
            compilation.display_minimal(to),
            c.reset
        )
    })
    .collect()
}

/// Writes `label (n)` and one indented line per item; skips empty sections.
fn write_section(out: &mut String, label: &str, items: &[String], c: Colors) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "  {}{}{} {}({}){}",
        c.blue,
        label,
        c.reset,
        c.dim,
        items.len(),
        c.reset
    )?;
    for item in items {
        writeln!(out, "    {}", item)?;
    }
    Ok(())
}

fn schema_name(compilation: &Compilation, id: TypeDefId) -> String {
    let qualified = compilation.display_def(id);
    match qualified.strip_prefix("global::") {
        Some(name) => name.to_string(),
        None => qualified,
    }
}
