use super::output_graph_type::generate;
use crate::model::{
    InjectedArgumentKind, MemberAccessKind, MethodArgumentData, OutputFieldData,
    OutputGraphTypeData, OutputGraphTypeKind, PartialClassInfo, ResolverKind,
};

const STRING: &str = "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<string>>";
const INT: &str = "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>";
const STRING_ARG: &str = "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>";

fn schema_class() -> Vec<PartialClassInfo> {
    vec![PartialClassInfo {
        name: "Schema".to_string(),
        accessibility: "public".to_string(),
        keyword: "class".to_string(),
        type_params: Vec::new(),
    }]
}

fn field(
    name: &str,
    kind: MemberAccessKind,
    graph_type: &str,
    resolver: ResolverKind,
) -> OutputFieldData {
    OutputFieldData {
        name: name.to_string(),
        member_name: name.to_string(),
        member_kind: kind,
        static_owner: None,
        graph_type: graph_type.to_string(),
        resolver,
        arguments: Vec::new(),
    }
}

fn argument(
    name: &str,
    type_name: &str,
    injected: Option<InjectedArgumentKind>,
) -> MethodArgumentData {
    MethodArgumentData {
        name: name.to_string(),
        type_name: type_name.to_string(),
        graph_type: injected.is_none().then(|| STRING_ARG.to_string()),
        injected,
    }
}

fn query_type(kind: OutputGraphTypeKind, fields: Vec<OutputFieldData>) -> OutputGraphTypeData {
    OutputGraphTypeData {
        generated_name: "AutoOutputGraphType_Query".to_string(),
        graph_type: "global::GraphQL.Types.AutoRegisteringObjectGraphType<global::Demo.Query>"
            .to_string(),
        source_type: "global::Demo.Query".to_string(),
        kind,
        fields,
    }
}

#[test]
fn missing_data_renders_nothing() {
    assert_eq!(generate(Some("Demo"), &schema_class(), None), "");
}

#[test]
fn empty_hierarchy_renders_nothing() {
    let data = query_type(OutputGraphTypeKind::Object, Vec::new());
    assert_eq!(generate(Some("Demo"), &[], Some(&data)), "");
}

#[test]
fn object_fields_get_resolvers_for_each_member_kind() {
    let mut greet = field("Greet", MemberAccessKind::Method, STRING, ResolverKind::Async);
    greet.member_name = "GreetAsync".to_string();
    greet.arguments = vec![
        argument("name", "string", None),
        argument(
            "context",
            "global::GraphQL.IResolveFieldContext",
            Some(InjectedArgumentKind::Context),
        ),
    ];
    let mut version = field("Version", MemberAccessKind::Property, INT, ResolverKind::Sync);
    version.static_owner = Some("global::Demo.Query".to_string());

    let data = query_type(
        OutputGraphTypeKind::Object,
        vec![
            field("Hello", MemberAccessKind::Property, STRING, ResolverKind::Sync),
            field("class", MemberAccessKind::Field, INT, ResolverKind::Sync),
            greet,
            version,
        ],
    );

    let text = generate(Some("Demo"), &schema_class(), Some(&data));
    insta::assert_snapshot!(text, @r#"
    // <auto-generated/>

    #nullable enable

    namespace Demo;

    public partial class Schema
    {
        private sealed class AutoOutputGraphType_Query : global::GraphQL.Types.AutoRegisteringObjectGraphType<global::Demo.Query>
        {
            public AutoOutputGraphType_Query()
            {
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<string>>>("Hello")
                    .Resolve(context => context.Source.Hello);
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>>("class")
                    .Resolve(context => context.Source.@class);
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<string>>>("Greet")
                    .Argument<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>>("name")
                    .ResolveAsync(async context => await context.Source.GreetAsync(context.GetArgument<string>("name"), context));
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>>("Version")
                    .Resolve(context => global::Demo.Query.Version);
            }
        }
    }
    "#);
}

#[test]
fn stream_resolvers_and_injected_services() {
    let mut ticks = field("Ticks", MemberAccessKind::Method, INT, ResolverKind::Stream);
    ticks.arguments = vec![
        argument(
            "repository",
            "global::Demo.Repository",
            Some(InjectedArgumentKind::Services),
        ),
        argument(
            "user",
            "global::Demo.UserContext?",
            Some(InjectedArgumentKind::UserContext),
        ),
    ];
    let mut feed = field("Feed", MemberAccessKind::Method, INT, ResolverKind::StreamAsync);
    feed.arguments = vec![argument(
        "token",
        "global::System.Threading.CancellationToken",
        Some(InjectedArgumentKind::CancellationToken),
    )];
    let mut items = field("Items", MemberAccessKind::Method, INT, ResolverKind::AsyncEnumerable);
    items.arguments = vec![argument(
        "self",
        "global::Demo.Query",
        Some(InjectedArgumentKind::Source),
    )];

    let data = query_type(OutputGraphTypeKind::Object, vec![ticks, feed, items]);
    let text = generate(None, &schema_class(), Some(&data));
    insta::assert_snapshot!(text, @r#"
    // <auto-generated/>

    #nullable enable

    public partial class Schema
    {
        private sealed class AutoOutputGraphType_Query : global::GraphQL.Types.AutoRegisteringObjectGraphType<global::Demo.Query>
        {
            public AutoOutputGraphType_Query()
            {
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>>("Ticks")
                    .ResolveStream(context => context.Source.Ticks((global::Demo.Repository)context.RequestServices!.GetService(typeof(global::Demo.Repository))!, (global::Demo.UserContext?)context.UserContext));
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>>("Feed")
                    .ResolveStreamAsync(context => context.Source.Feed(context.CancellationToken));
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<int>>>("Items")
                    .ResolveStream(context => global::GraphQL.ObservableExtensions.ToObservable(context.Source.Items(context.Source)));
            }
        }
    }
    "#);
}

#[test]
fn interface_fields_are_declared_without_resolvers() {
    let mut rename = field("Rename", MemberAccessKind::Method, STRING, ResolverKind::Sync);
    rename.arguments = vec![argument("name", "string", None)];
    let mut data = query_type(
        OutputGraphTypeKind::Interface,
        vec![
            field("Name", MemberAccessKind::Property, STRING, ResolverKind::Sync),
            rename,
        ],
    );
    data.generated_name = "AutoInterfaceGraphType_IPet".to_string();
    data.graph_type =
        "global::GraphQL.Types.AutoRegisteringInterfaceGraphType<global::Demo.IPet>".to_string();

    let text = generate(None, &schema_class(), Some(&data));
    insta::assert_snapshot!(text, @r#"
    // <auto-generated/>

    #nullable enable

    public partial class Schema
    {
        private sealed class AutoInterfaceGraphType_IPet : global::GraphQL.Types.AutoRegisteringInterfaceGraphType<global::Demo.IPet>
        {
            public AutoInterfaceGraphType_IPet()
            {
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<string>>>("Name");
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrOutputTypeReference<string>>>("Rename")
                    .Argument<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>>("name");
            }
        }
    }
    "#);
}
