use std::fmt::Write;

use super::writer::{CodeWriter, render_file};
use crate::config::{GeneratorConfig, LineEnding};
use crate::model::PartialClassInfo;

fn class(name: &str) -> PartialClassInfo {
    PartialClassInfo {
        name: name.to_string(),
        accessibility: "public".to_string(),
        keyword: "class".to_string(),
        type_params: Vec::new(),
    }
}

fn body(w: &mut CodeWriter<'_>) -> std::fmt::Result {
    w.open("private void Configure()")?;
    writeln!(w, "Query = null!;")?;
    w.close("")
}

#[test]
fn empty_hierarchy_renders_nothing() {
    let text = render_file(&GeneratorConfig::default(), Some("Demo"), &[], body);
    assert_eq!(text, "");
}

#[test]
fn nested_partial_classes_wrap_the_body() {
    let mut schema = class("Schema");
    schema.accessibility = "internal".to_string();
    let mut outer = class("Outer");
    outer.keyword = "record".to_string();
    outer.type_params = vec!["T".to_string()];

    let text = render_file(
        &GeneratorConfig::default(),
        Some("Demo.Api"),
        &[outer, schema],
        body,
    );
    insta::assert_snapshot!(text, @r"
    // <auto-generated/>

    #nullable enable

    namespace Demo.Api;

    public partial record Outer<T>
    {
        internal partial class Schema
        {
            private void Configure()
            {
                Query = null!;
            }
        }
    }
    ");
}

#[test]
fn indentation_and_header_follow_the_config() {
    let config = GeneratorConfig::new()
        .indent_width(2)
        .auto_generated_header(false);
    let text = render_file(&config, None, &[class("Schema")], body);
    insta::assert_snapshot!(text, @r"
    #nullable enable

    public partial class Schema
    {
      private void Configure()
      {
        Query = null!;
      }
    }
    ");
}

#[test]
fn crlf_line_endings_apply_to_every_line() {
    let config = GeneratorConfig::new().line_ending(LineEnding::CrLf);
    let text = render_file(&config, None, &[class("Schema")], body);
    assert!(text.ends_with("}\r\n"));
    assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
}

#[test]
fn blank_lines_are_not_indented() {
    let config = GeneratorConfig::default();
    let mut w = CodeWriter::new(&config);
    w.indent();
    write!(w, "a\n\nb\n").unwrap();
    assert_eq!(w.finish(), "    a\n\n    b\n");
}
