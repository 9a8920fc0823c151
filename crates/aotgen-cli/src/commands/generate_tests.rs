use std::fs;

use aotgen_compiler::GeneratedSource;
use aotgen_compiler::codegen::generate_entry;
use aotgen_compiler::model::{
    GenerationContext, GenerationEntry, PartialClassInfo, SchemaClassData,
};

use super::generate::{GenerateArgs, render_sources, write_sources};

fn source(hint_name: &str, text: &str) -> GeneratedSource {
    GeneratedSource {
        hint_name: hint_name.to_string(),
        text: text.to_string(),
    }
}

#[test]
fn sources_are_printed_under_banners() {
    let sources = [
        source("Demo.Schema.g.cs", "partial class Schema { }\n"),
        source(
            "Demo.Schema.AutoOutputGraphType_Query.g.cs",
            "partial class Schema { class AutoOutputGraphType_Query { } }\n",
        ),
    ];
    insta::assert_snapshot!(render_sources(&sources), @r"
    // ---- Demo.Schema.g.cs ----
    partial class Schema { }

    // ---- Demo.Schema.AutoOutputGraphType_Query.g.cs ----
    partial class Schema { class AutoOutputGraphType_Query { } }
    ");
}

#[test]
fn no_sources_print_nothing() {
    assert_eq!(render_sources(&[]), "");
}

#[test]
fn sources_are_written_one_file_each() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("generated");

    let sources = [
        source("Demo.Schema.g.cs", "a\n"),
        source("Demo.Schema.AutoInputGraphType_Person.g.cs", "b\n"),
    ];
    write_sources(&out, &sources).unwrap();

    assert_eq!(fs::read_to_string(out.join("Demo.Schema.g.cs")).unwrap(), "a\n");
    assert_eq!(
        fs::read_to_string(out.join("Demo.Schema.AutoInputGraphType_Person.g.cs")).unwrap(),
        "b\n"
    );
}

#[test]
fn args_map_onto_the_generator_config() {
    let args = GenerateArgs {
        paths: Vec::new(),
        output: None,
        indent: 2,
        crlf: true,
        header: false,
        color: false,
    };
    let config = args.config();
    let text = generate_entry(
        &config,
        &GenerationEntry::Schema {
            context: GenerationContext {
                namespace: None,
                hierarchy: vec![PartialClassInfo {
                    name: "Schema".to_string(),
                    accessibility: "public".to_string(),
                    keyword: "class".to_string(),
                    type_params: Vec::new(),
                }],
            },
            data: SchemaClassData {
                has_constructor: true,
                ..Default::default()
            },
        },
    );

    assert!(text.starts_with("#nullable enable\r\n"));
    assert!(text.contains("\r\n  private void Configure()\r\n"));
}
