use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{compile, compile_clean, compile_without_library};
use crate::{CancellationToken, Error, GeneratorConfig, GeneratorDriver};

const SCHEMA: &str = indoc! {r#"
using GraphQL;
using GraphQL.Types;

namespace Demo;

public class Query
{
    public string Hello => "World";
}

[AotQueryType<Query>]
public partial class Schema : AotSchema { }
"#};

const SCHEMA_WITH_TWO_FIELDS: &str = indoc! {r#"
using GraphQL;
using GraphQL.Types;

namespace Demo;

public class Query
{
    public string Hello => "World";
    public string Goodbye => "Moon";
}

[AotQueryType<Query>]
public partial class Schema : AotSchema { }
"#};

#[test]
fn run_generates_schema_and_graph_type_sources() {
    let compilation = compile_clean(SCHEMA);
    let mut driver = GeneratorDriver::default();
    let result = driver.run(&compilation).unwrap();

    assert!(result.diagnostics.is_empty());
    let hints: Vec<_> = result.sources.iter().map(|s| s.hint_name.as_str()).collect();
    assert_eq!(
        hints,
        ["Demo.Schema.g.cs", "Demo.Schema.AutoOutputGraphType_Query.g.cs"]
    );
    assert!(result.sources[0].text.contains(
        "Query = GetAotType<global::GraphQL.Types.AutoRegisteringObjectGraphType<global::Demo.Query>>();"
    ));
    assert!(
        result.sources[1]
            .text
            .contains(".Resolve(context => context.Source.Hello);")
    );
    assert_eq!(result.reused, 0);
}

#[test]
fn unchanged_entries_are_served_from_the_cache() {
    let mut driver = GeneratorDriver::default();
    let first = driver.run(&compile_clean(SCHEMA)).unwrap();
    let second = driver.run(&compile_clean(SCHEMA)).unwrap();

    assert_eq!(second.reused, 2);
    assert_eq!(first.sources, second.sources);

    let third = driver.run(&compile_clean(SCHEMA_WITH_TWO_FIELDS)).unwrap();
    assert_eq!(third.reused, 1);
    assert!(third.sources[1].text.contains("(\"Goodbye\")"));
}

#[test]
fn compilation_without_candidates_generates_nothing() {
    let compilation = compile_clean("public class Query { }");
    let result = GeneratorDriver::default().run(&compilation).unwrap();
    assert!(result.sources.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn missing_library_is_reported_once() {
    let compilation = compile_without_library(SCHEMA);
    let result = GeneratorDriver::default().run(&compilation).unwrap();

    assert!(result.sources.is_empty());
    let reported = result
        .diagnostics
        .kinds()
        .into_iter()
        .filter(|k| *k == DiagnosticKind::LibraryNotReferenced)
        .count();
    assert_eq!(reported, 1);
}

#[test]
fn analyze_exposes_every_stage() {
    let compilation = compile(SCHEMA);
    let analysis = GeneratorDriver::default().analyze(&compilation).unwrap();

    assert_eq!(analysis.schemas.len(), 1);
    let schema = &analysis.schemas[0];
    assert!(schema.data.query_type.is_some());
    assert_eq!(schema.processed.discovered_graph_types.len(), 2);
    assert_eq!(schema.entries.len(), 2);
}

#[test]
fn cancelled_run_returns_an_error() {
    let token = CancellationToken::new();
    token.cancel();
    let mut driver = GeneratorDriver::new(GeneratorConfig::new().cancellation(token));

    let result = driver.run(&compile_clean(SCHEMA));
    assert!(matches!(result, Err(Error::Cancelled)));
}
