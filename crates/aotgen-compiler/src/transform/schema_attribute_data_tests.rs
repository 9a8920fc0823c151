use indexmap::{IndexMap, IndexSet};
use indoc::indoc;

use super::candidate_class;
use super::schema_attribute_data::{self, Direction, ProcessedSchemaData};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::discover::{KnownSymbols, candidate_classes};
use crate::semantic::{Compilation, TypeSymbol};
use crate::test_utils::{compile, compile_clean, named};
use crate::{CancellationToken, Error};

fn process_with(
    compilation: &Compilation,
    cancellation: &CancellationToken,
) -> crate::Result<(ProcessedSchemaData, Diagnostics)> {
    let known = KnownSymbols::resolve(compilation);
    let candidates = candidate_classes(compilation);
    let mut diagnostics = Diagnostics::new();
    let data = candidate_class::transform(&candidates[0], &known, compilation, &mut diagnostics)
        .expect("schema attributes must lower");
    let data = candidate_class::normalize(data, compilation, &mut diagnostics);
    let processed =
        schema_attribute_data::process(&data, &known, compilation, cancellation, &mut diagnostics)?;
    Ok((processed, diagnostics))
}

fn process(compilation: &Compilation) -> ProcessedSchemaData {
    let (processed, diagnostics) = process_with(compilation, &CancellationToken::new()).unwrap();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.kinds());
    processed
}

fn graph_types(compilation: &Compilation, processed: &ProcessedSchemaData) -> Vec<String> {
    display_set(compilation, &processed.discovered_graph_types)
}

fn display_set(compilation: &Compilation, set: &IndexSet<TypeSymbol>) -> Vec<String> {
    set.iter().map(|t| compilation.display_minimal(t)).collect()
}

fn display_map(compilation: &Compilation, map: &IndexMap<TypeSymbol, TypeSymbol>) -> Vec<String> {
    map.iter()
        .map(|(clr, graph)| {
            format!(
                "{} -> {}",
                compilation.display_minimal(clr),
                compilation.display_minimal(graph)
            )
        })
        .collect()
}

#[test]
fn query_root_reaches_its_scalars() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query
    {
        public string Hello => "World";
    }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(
        compilation.display_minimal(processed.query_root_graph_type.as_ref().unwrap()),
        "AutoRegisteringObjectGraphType<Query>"
    );
    assert_eq!(
        graph_types(&compilation, &processed),
        ["AutoRegisteringObjectGraphType<Query>", "StringGraphType"]
    );
    assert_eq!(
        display_map(&compilation, &processed.output_clr_type_mappings),
        [
            "Query -> AutoRegisteringObjectGraphType<Query>",
            "string -> StringGraphType"
        ]
    );
    assert_eq!(
        display_map(&compilation, &processed.input_clr_type_mappings),
        ["string -> StringGraphType"]
    );
    assert!(
        processed
            .scanned_types
            .contains_key(&(named(&compilation, "Query"), Direction::Output))
    );
    assert!(processed.mutation_root_graph_type.is_none());
}

#[test]
fn list_type_attribute_alone_registers_only_the_list() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    [AotListType<int[]>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert!(processed.discovered_graph_types.is_empty());
    assert!(processed.output_clr_type_mappings.is_empty());
    assert_eq!(
        display_set(&compilation, &processed.input_list_types),
        ["int[]"]
    );
}

#[test]
fn list_type_attribute_with_generic_list() {
    let compilation = compile_clean(indoc! {r#"
    using System.Collections.Generic;
    using GraphQL;
    using GraphQL.Types;

    [AotListType<List<string>>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert!(processed.query_root_graph_type.is_none());
    assert!(processed.discovered_graph_types.is_empty());
    assert!(processed.input_clr_type_mappings.is_empty());
    assert_eq!(
        display_set(&compilation, &processed.input_list_types),
        ["List<string>"]
    );
}

#[test]
fn method_query_reaches_its_return_type() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query
    {
        public string Hello() => "World";
    }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(
        graph_types(&compilation, &processed),
        ["AutoRegisteringObjectGraphType<Query>", "StringGraphType"]
    );
    let scan = &processed.scanned_types[&(named(&compilation, "Query"), Direction::Output)];
    let members: Vec<_> = scan
        .selected_members
        .iter()
        .map(|m| m.member.name.as_str())
        .collect();
    assert_eq!(members, ["Hello"]);
}

#[test]
fn builtin_scalars_map_in_both_directions() {
    let compilation = compile_clean(indoc! {r#"
    using System;
    using GraphQL;
    using GraphQL.Types;

    public class Query
    {
        public DateTime Now => DateTime.UtcNow;
    }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(
        display_map(&compilation, &processed.output_clr_type_mappings),
        [
            "Query -> AutoRegisteringObjectGraphType<Query>",
            "DateTime -> DateTimeGraphType"
        ]
    );
    assert_eq!(
        display_map(&compilation, &processed.input_clr_type_mappings),
        ["DateTime -> DateTimeGraphType"]
    );
}

#[test]
fn self_referencing_types_are_visited_once() {
    let compilation = compile_clean(indoc! {r#"
    using System.Collections.Generic;
    using GraphQL;
    using GraphQL.Types;

    public class Node
    {
        public Node? Parent { get; set; }
        public List<Node> Children { get; set; }
        public int Depth { get; set; }
    }

    [AotQueryType<Node>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(processed.scanned_types.len(), 1);
    assert_eq!(
        graph_types(&compilation, &processed),
        ["AutoRegisteringObjectGraphType<Node>", "IntGraphType"]
    );
}

#[test]
fn types_used_in_both_directions_get_both_graph_types() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public enum Color { Red, Green }

    public class Shape
    {
        public Color Fill { get; set; }
    }

    public class Query
    {
        public Shape Echo(Shape shape) => shape;
    }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(
        graph_types(&compilation, &processed),
        [
            "AutoRegisteringObjectGraphType<Query>",
            "AutoRegisteringObjectGraphType<Shape>",
            "AutoRegisteringInputObjectGraphType<Shape>",
            "EnumerationGraphType<Color>",
        ]
    );
    assert_eq!(
        display_map(&compilation, &processed.input_clr_type_mappings),
        [
            "Shape -> AutoRegisteringInputObjectGraphType<Shape>",
            "Color -> EnumerationGraphType<Color>",
        ]
    );
    let directions: Vec<_> = processed.scanned_types.keys().map(|(_, d)| *d).collect();
    assert_eq!(
        directions,
        [Direction::Output, Direction::Output, Direction::Input]
    );
}

#[test]
fn explicit_graph_type_infers_its_mapping_unless_opted_out() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Widget { }
    public class WidgetType : ObjectGraphType<Widget> { }

    public class Gadget { }
    public class GadgetType : ObjectGraphType<Gadget> { }

    public class Money { }
    [DoNotMapClrType, ClrTypeMapping(typeof(Money))]
    public class MoneyType : StringGraphType { }

    [ClrTypeMapping(typeof(Money))]
    public class PriceType : StringGraphType { }

    [AotGraphType<WidgetType>]
    [AotGraphType<GadgetType>(AutoRegisterClrMapping = false)]
    [AotGraphType<MoneyType>]
    [AotGraphType<PriceType>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(
        display_map(&compilation, &processed.output_clr_type_mappings),
        ["Widget -> WidgetType", "Money -> PriceType"]
    );
    assert!(processed.input_clr_type_mappings.is_empty());
    assert!(processed.scanned_types.is_empty());
}

#[test]
fn explicit_mapping_wins_and_is_not_scanned() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Money { public decimal Amount { get; set; } }
    public class MoneyType : StringGraphType { }

    public class Query
    {
        public Money Price { get; set; }
    }

    [AotQueryType<Query>]
    [AotTypeMapping<Money, MoneyType>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(
        graph_types(&compilation, &processed),
        ["AutoRegisteringObjectGraphType<Query>", "MoneyType"]
    );
    assert_eq!(
        display_map(&compilation, &processed.output_clr_type_mappings),
        [
            "Query -> AutoRegisteringObjectGraphType<Query>",
            "Money -> MoneyType"
        ]
    );
    assert_eq!(
        display_map(&compilation, &processed.input_clr_type_mappings),
        ["Money -> MoneyType"]
    );
    assert_eq!(processed.scanned_types.len(), 1);
}

#[test]
fn output_interface_kinds_pick_the_wrapper() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public interface IPet { string Name { get; } }
    public class Animal { }

    [AotOutputType<IPet>]
    [AotOutputType<Animal>(Kind = OutputTypeKind.Interface)]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(
        graph_types(&compilation, &processed),
        [
            "AutoRegisteringInterfaceGraphType<IPet>",
            "AutoRegisteringInterfaceGraphType<Animal>",
            "StringGraphType",
        ]
    );
}

#[test]
fn remapped_graph_types_are_recorded() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class FastIdType : IdGraphType { }

    [AotRemapType<IdGraphType, FastIdType>]
    public partial class Schema : AotSchema { }
    "#});

    let processed = process(&compilation);
    assert_eq!(graph_types(&compilation, &processed), ["IdGraphType"]);
    assert_eq!(
        display_map(&compilation, &processed.remapped_graph_types),
        ["IdGraphType -> FastIdType"]
    );
}

#[test]
fn unscannable_type_is_reported_at_the_schema() {
    let compilation = compile(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { }

    [AotQueryType<Query>]
    [AotInputType<int[]>]
    public partial class Schema : AotSchema { }
    "#});

    let (processed, diagnostics) =
        process_with(&compilation, &CancellationToken::new()).unwrap();
    assert_eq!(diagnostics.kinds(), [DiagnosticKind::UnscannableType]);
    let message = diagnostics.iter().next().unwrap().message();
    insta::assert_snapshot!(message, @"type `int[]` cannot be scanned");
    assert_eq!(processed.scanned_types.len(), 1);
}

#[test]
fn cancelled_token_aborts_the_walk() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }
    "#});

    let cancellation = CancellationToken::new();
    cancellation.cancel();
    let result = process_with(&compilation, &cancellation);
    assert!(matches!(result, Err(Error::Cancelled)));
}
