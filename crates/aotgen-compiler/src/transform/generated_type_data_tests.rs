use indoc::indoc;

use super::{candidate_class, generated_type_data, schema_attribute_data};
use crate::CancellationToken;
use crate::diagnostics::Diagnostics;
use crate::discover::{KnownSymbols, candidate_classes};
use crate::model::{
    ConstructorParameterData, GenerationEntry, InjectedArgumentKind, InputFieldData,
    InputGraphTypeData, InputMemberData, ListElementData, MemberAccessKind, MemberAssignment,
    MethodArgumentData, OutputFieldData, OutputGraphTypeData, OutputGraphTypeKind,
    RegisteredGraphType, ResolverKind, SchemaClassData, TypeMappingData,
};
use crate::test_utils::compile_clean;

fn entries(src: &str) -> Vec<GenerationEntry> {
    let compilation = compile_clean(src);
    let known = KnownSymbols::resolve(&compilation);
    let candidates = candidate_classes(&compilation);
    let mut diagnostics = Diagnostics::new();
    let data = candidate_class::transform(&candidates[0], &known, &compilation, &mut diagnostics)
        .expect("schema attributes must lower");
    let data = candidate_class::normalize(data, &compilation, &mut diagnostics);
    let processed = schema_attribute_data::process(
        &data,
        &known,
        &compilation,
        &CancellationToken::new(),
        &mut diagnostics,
    )
    .unwrap();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.kinds());
    generated_type_data::transform(&data, &processed, &known, &compilation)
}

fn schema_data(entries: &[GenerationEntry]) -> &SchemaClassData {
    match &entries[0] {
        GenerationEntry::Schema { data, .. } => data,
        other => panic!("expected the schema entry first, got {other:?}"),
    }
}

fn output_data<'e>(entries: &'e [GenerationEntry], name: &str) -> &'e OutputGraphTypeData {
    entries
        .iter()
        .find_map(|e| match e {
            GenerationEntry::Output { data, .. } if data.generated_name == name => Some(data),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no output entry `{name}`"))
}

fn hint_names(entries: &[GenerationEntry]) -> Vec<String> {
    entries.iter().map(GenerationEntry::hint_name).collect()
}

fn mapping(clr_type: &str, graph_type: &str) -> TypeMappingData {
    TypeMappingData {
        clr_type: clr_type.to_string(),
        graph_type: graph_type.to_string(),
    }
}

const QUERY_GRAPH_TYPE: &str = "global::GraphQL.Types.AutoRegisteringObjectGraphType<global::Demo.Api.Query>";

#[test]
fn schema_entry_comes_first_with_its_class_hierarchy() {
    let entries = entries(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    namespace Demo.Api;

    public class Query
    {
        public string Hello => "World";
    }

    public partial class Outer
    {
        [AotQueryType<Query>]
        internal partial class Schema : AotSchema { }
    }
    "#});

    assert_eq!(
        hint_names(&entries),
        [
            "Demo.Api.Outer.Schema.g.cs",
            "Demo.Api.Outer.Schema.AutoOutputGraphType_Query.g.cs"
        ]
    );

    let context = entries[0].context();
    assert_eq!(context.namespace.as_deref(), Some("Demo.Api"));
    let declarations: Vec<_> = context.hierarchy.iter().map(|c| c.declaration()).collect();
    assert_eq!(
        declarations,
        ["public partial class Outer", "internal partial class Schema"]
    );

    let schema = schema_data(&entries);
    assert_eq!(
        schema.query_root_graph_type.as_deref(),
        Some(QUERY_GRAPH_TYPE)
    );
    assert_eq!(
        schema.registered_graph_types,
        [
            RegisteredGraphType {
                graph_type: QUERY_GRAPH_TYPE.to_string(),
                implementation: Some("AutoOutputGraphType_Query".to_string()),
            },
            RegisteredGraphType {
                graph_type: "global::GraphQL.Types.StringGraphType".to_string(),
                implementation: None,
            },
        ]
    );
    assert_eq!(
        schema.output_type_mappings,
        [
            mapping("global::Demo.Api.Query", QUERY_GRAPH_TYPE),
            mapping("string", "global::GraphQL.Types.StringGraphType"),
        ]
    );
    assert_eq!(
        schema.input_type_mappings,
        [mapping("string", "global::GraphQL.Types.StringGraphType")]
    );

    let query = output_data(&entries, "AutoOutputGraphType_Query");
    assert_eq!(query.source_type, "global::Demo.Api.Query");
    assert_eq!(query.kind, OutputGraphTypeKind::Object);
    assert_eq!(
        query.fields,
        [OutputFieldData {
            name: "Hello".to_string(),
            member_name: "Hello".to_string(),
            member_kind: MemberAccessKind::Property,
            static_owner: None,
            graph_type: "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<string>>".to_string(),
            resolver: ResolverKind::Sync,
            arguments: Vec::new(),
        }]
    );
}

#[test]
fn method_fields_carry_resolver_kind_and_arguments() {
    let entries = entries(indoc! {r#"
    using System;
    using System.Threading.Tasks;
    using GraphQL;
    using GraphQL.Types;

    public class Query
    {
        public static int Version => 1;
        public Task<string?> GreetAsync(string name, IResolveFieldContext context) => null!;
        public IObservable<int> Ticks() => null!;
    }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }
    "#});

    let query = output_data(&entries, "AutoOutputGraphType_Query");
    let [version, greet, ticks] = query.fields.as_slice() else {
        panic!("expected three fields, got {:?}", query.fields);
    };

    assert_eq!(version.static_owner.as_deref(), Some("global::Query"));
    assert_eq!(
        version.graph_type,
        "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>"
    );

    assert_eq!(greet.name, "Greet");
    assert_eq!(greet.member_name, "GreetAsync");
    assert_eq!(greet.member_kind, MemberAccessKind::Method);
    assert_eq!(greet.resolver, ResolverKind::Async);
    assert_eq!(
        greet.graph_type,
        "global::GraphQL.Types.GraphQLClrOutputTypeReference<string>"
    );
    assert_eq!(
        greet.arguments,
        [
            MethodArgumentData {
                name: "name".to_string(),
                type_name: "string".to_string(),
                graph_type: Some(
                    "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>"
                        .to_string()
                ),
                injected: None,
            },
            MethodArgumentData {
                name: "context".to_string(),
                type_name: "global::GraphQL.IResolveFieldContext".to_string(),
                graph_type: None,
                injected: Some(InjectedArgumentKind::Context),
            },
        ]
    );

    assert_eq!(ticks.resolver, ResolverKind::Stream);
    assert_eq!(
        ticks.graph_type,
        "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>"
    );
}

#[test]
fn input_type_splits_constructor_initializer_and_setter_members() {
    let entries = entries(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Person
    {
        public Person(string name) { Name = name; }
        public string Name { get; }
        public int? Age { get; set; }
        public required string Email { get; init; }
    }

    [AotInputType<Person>]
    public partial class Schema : AotSchema { }
    "#});

    let input = entries
        .iter()
        .find_map(|e| match e {
            GenerationEntry::Input { data, .. } => Some(data),
            _ => None,
        })
        .unwrap();

    let non_null_string = "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>";
    assert_eq!(
        *input,
        InputGraphTypeData {
            generated_name: "AutoInputGraphType_Person".to_string(),
            graph_type: "global::GraphQL.Types.AutoRegisteringInputObjectGraphType<global::Person>"
                .to_string(),
            source_type: "global::Person".to_string(),
            fields: vec![
                InputFieldData {
                    name: "Name".to_string(),
                    graph_type: non_null_string.to_string(),
                },
                InputFieldData {
                    name: "Age".to_string(),
                    graph_type: "global::GraphQL.Types.GraphQLClrInputTypeReference<int>"
                        .to_string(),
                },
                InputFieldData {
                    name: "Email".to_string(),
                    graph_type: non_null_string.to_string(),
                },
            ],
            constructible: true,
            constructor_parameters: vec![ConstructorParameterData {
                field_name: "Name".to_string(),
                type_name: "string".to_string(),
                nullable: false,
            }],
            members: vec![
                InputMemberData {
                    field_name: "Age".to_string(),
                    member_name: "Age".to_string(),
                    type_name: "int?".to_string(),
                    nullable: true,
                    assignment: MemberAssignment::Setter,
                },
                InputMemberData {
                    field_name: "Email".to_string(),
                    member_name: "Email".to_string(),
                    type_name: "string".to_string(),
                    nullable: false,
                    assignment: MemberAssignment::Initializer,
                },
            ],
        }
    );
}

#[test]
fn list_types_are_grouped_by_collection_kind() {
    let entries = entries(indoc! {r#"
    using System;
    using System.Collections.Generic;
    using GraphQL;
    using GraphQL.Types;

    [AotListType<int[]>]
    [AotListType<List<string?>>]
    [AotListType<HashSet<Guid>>]
    [AotListType<ISet<int?>>]
    public partial class Schema : AotSchema { }
    "#});

    let element = |element_type: &str, element_nullable| ListElementData {
        element_type: element_type.to_string(),
        element_nullable,
    };
    let schema = schema_data(&entries);
    assert_eq!(schema.array_list_types, [element("int", false)]);
    assert_eq!(schema.generic_list_types, [element("string", true)]);
    assert_eq!(
        schema.hash_set_types,
        [element("global::System.Guid", false), element("int?", false)]
    );
    assert_eq!(schema.generic_list_types[0].display(), "string?");
    assert_eq!(entries.len(), 1);
}

#[test]
fn remapped_auto_graph_type_is_not_generated() {
    let entries = entries(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { public int Count { get; set; } }
    public class CustomQueryType : AutoRegisteringObjectGraphType<Query> { }

    [AotQueryType<Query>]
    [AotRemapType<AutoRegisteringObjectGraphType<Query>, CustomQueryType>]
    public partial class Schema : AotSchema { }
    "#});

    assert_eq!(entries.len(), 1);
    let schema = schema_data(&entries);
    assert_eq!(
        schema.registered_graph_types[0].implementation.as_deref(),
        Some("global::CustomQueryType")
    );
}

#[test]
fn colliding_names_get_a_numeric_suffix() {
    let entries = entries(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    namespace A { public class Item { } }
    namespace B { public class Item { } }

    public class Query
    {
        public A.Item First { get; set; }
        public B.Item Second { get; set; }
    }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }
    "#});

    assert_eq!(
        hint_names(&entries),
        [
            "Schema.g.cs",
            "Schema.AutoOutputGraphType_Query.g.cs",
            "Schema.AutoOutputGraphType_Item.g.cs",
            "Schema.AutoOutputGraphType_Item_2.g.cs",
        ]
    );
    assert_eq!(
        output_data(&entries, "AutoOutputGraphType_Item_2").source_type,
        "global::B.Item"
    );
}
