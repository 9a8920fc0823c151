use indoc::indoc;

use super::candidate_class::{self, CandidateClassData, OutputTypeKind, SchemaAttributeData};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::discover::{KnownSymbols, candidate_classes};
use crate::semantic::Compilation;
use crate::test_utils::{compile, compile_clean, named};

fn lower(compilation: &Compilation) -> (Option<SchemaAttributeData>, Diagnostics) {
    let known = KnownSymbols::resolve(compilation);
    let candidates = candidate_classes(compilation);
    let mut diagnostics = Diagnostics::new();
    let data = candidate_class::transform(&candidates[0], &known, compilation, &mut diagnostics);
    (data, diagnostics)
}

fn normalized(compilation: &Compilation) -> (CandidateClassData, Diagnostics) {
    let (data, mut diagnostics) = lower(compilation);
    let data = candidate_class::normalize(data.unwrap(), compilation, &mut diagnostics);
    (data, diagnostics)
}

#[test]
fn root_types_are_split_into_clr_and_graph_types() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { }
    public class MutationType : ObjectGraphType { }

    [AotQueryType<Query>]
    [AotMutationType<MutationType>]
    public partial class Schema : AotSchema { }
    "#});

    let (data, diagnostics) = lower(&compilation);
    let data = data.unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(data.query_types.len(), 1);
    assert!(data.query_types[0].is_clr_type);
    assert_eq!(data.query_types[0].ty, named(&compilation, "Query"));
    assert!(!data.mutation_types[0].is_clr_type);
    assert!(data.subscription_types.is_empty());
}

#[test]
fn named_arguments_are_lowered() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public interface IPet { }
    public class Dog : IPet { }
    public class PetType : ObjectGraphType<Dog> { }

    [AotOutputType<IPet>(Kind = OutputTypeKind.Interface)]
    [AotOutputType<Dog>]
    [AotGraphType<PetType>(AutoRegisterClrMapping = false)]
    [AotListType<int[]>]
    public partial class Schema : AotSchema { }
    "#});

    let (data, _) = lower(&compilation);
    let data = data.unwrap();
    let kinds: Vec<_> = data.output_types.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, [OutputTypeKind::Interface, OutputTypeKind::Auto]);
    assert!(!data.graph_types[0].auto_register_clr_mapping);
    assert_eq!(
        compilation.display_minimal(&data.list_types[0]),
        "int[]"
    );
}

#[test]
fn mapping_and_remap_keep_both_type_arguments() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Money { }
    public class MoneyType : StringGraphType { }
    public class FastIdType : IdGraphType { }

    [AotTypeMapping<Money, MoneyType>]
    [AotRemapType<IdGraphType, FastIdType>]
    public partial class Schema : AotSchema { }
    "#});

    let (data, _) = lower(&compilation);
    let data = data.unwrap();
    assert_eq!(data.type_mappings[0].clr_type, named(&compilation, "Money"));
    assert_eq!(data.type_mappings[0].graph_type, named(&compilation, "MoneyType"));
    assert_eq!(
        data.remap_types[0].from,
        named(&compilation, "GraphQL.Types.IdGraphType")
    );
    assert_eq!(data.remap_types[0].to, named(&compilation, "FastIdType"));
}

#[test]
fn schema_not_deriving_from_aot_schema_is_reported() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;

    public class Query { }

    [AotQueryType<Query>]
    public partial class Schema { }
    "#});

    let (data, diagnostics) = lower(&compilation);
    assert!(data.is_none());
    assert_eq!(diagnostics.kinds(), [DiagnosticKind::SchemaNotAotSchema]);
    let message = diagnostics.iter().next().unwrap().message();
    insta::assert_snapshot!(message, @"`Schema` does not derive from `AotSchema`");
}

#[test]
fn attributes_of_every_partial_declaration_are_merged() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { }
    public class Mutation { }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }

    [AotMutationType<Mutation>]
    public partial class Schema { }
    "#});

    let (data, diagnostics) = lower(&compilation);
    let data = data.unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(data.query_types.len(), 1);
    assert_eq!(data.mutation_types.len(), 1);
}

#[test]
fn unresolved_type_argument_is_reported_and_dropped() {
    let compilation = compile(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { }

    [AotQueryType<Query>]
    [AotInputType<Missing>]
    public partial class Schema : AotSchema { }
    "#});

    let (data, diagnostics) = lower(&compilation);
    let data = data.unwrap();
    assert!(data.input_types.is_empty());
    assert_eq!(diagnostics.kinds(), [DiagnosticKind::InvalidAttributeArgument]);
}

#[test]
fn later_root_types_are_dropped_with_a_warning() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { }
    public class OtherQuery { }

    [AotQueryType<Query>]
    [AotQueryType<OtherQuery>]
    public partial class Schema : AotSchema { }
    "#});

    let (data, diagnostics) = normalized(&compilation);
    assert_eq!(
        data.query_type.map(|r| r.ty),
        Some(named(&compilation, "Query"))
    );
    assert_eq!(diagnostics.kinds(), [DiagnosticKind::DuplicateRootType]);
    assert!(!data.has_constructor);
}

#[test]
fn explicit_constructor_is_detected() {
    let compilation = compile_clean(indoc! {r#"
    using System;
    using System.Collections.Generic;
    using GraphQL;
    using GraphQL.DI;
    using GraphQL.Types;

    public class Query { }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema
    {
        public Schema(IServiceProvider services, IEnumerable<IConfigureSchema> configurations)
            : base(services, configurations) { }
    }
    "#});

    let (data, _) = normalized(&compilation);
    assert!(data.has_constructor);
}
