use super::input_graph_type::generate;
use crate::model::{
    ConstructorParameterData, InputFieldData, InputGraphTypeData, InputMemberData,
    MemberAssignment, PartialClassInfo,
};

const STRING: &str = "global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>";
const NULLABLE_INT: &str = "global::GraphQL.Types.GraphQLClrInputTypeReference<int>";

fn schema_class() -> Vec<PartialClassInfo> {
    vec![PartialClassInfo {
        name: "Schema".to_string(),
        accessibility: "public".to_string(),
        keyword: "class".to_string(),
        type_params: Vec::new(),
    }]
}

fn field(name: &str, graph_type: &str) -> InputFieldData {
    InputFieldData {
        name: name.to_string(),
        graph_type: graph_type.to_string(),
    }
}

fn member(
    name: &str,
    type_name: &str,
    nullable: bool,
    assignment: MemberAssignment,
) -> InputMemberData {
    InputMemberData {
        field_name: name.to_string(),
        member_name: name.to_string(),
        type_name: type_name.to_string(),
        nullable,
        assignment,
    }
}

fn input_type(name: &str, source_type: &str) -> InputGraphTypeData {
    InputGraphTypeData {
        generated_name: name.to_string(),
        graph_type: format!("global::GraphQL.Types.AutoRegisteringInputObjectGraphType<{source_type}>"),
        source_type: source_type.to_string(),
        fields: Vec::new(),
        constructible: true,
        constructor_parameters: Vec::new(),
        members: Vec::new(),
    }
}

#[test]
fn missing_data_renders_nothing() {
    assert_eq!(generate(Some("Demo"), &schema_class(), None), "");
}

#[test]
fn empty_hierarchy_renders_nothing() {
    let data = input_type("AutoInputGraphType_Person", "global::Demo.Person");
    assert_eq!(generate(Some("Demo"), &[], Some(&data)), "");
}

#[test]
fn parse_dictionary_uses_constructor_initializers_and_setters() {
    let mut data = input_type("AutoInputGraphType_Person", "global::Demo.Person");
    data.fields = vec![
        field("Name", STRING),
        field("Age", NULLABLE_INT),
        field("Email", STRING),
    ];
    data.constructor_parameters = vec![ConstructorParameterData {
        field_name: "Name".to_string(),
        type_name: "string".to_string(),
        nullable: false,
    }];
    data.members = vec![
        member("Age", "int?", true, MemberAssignment::Setter),
        member("Email", "string", false, MemberAssignment::Initializer),
    ];

    let text = generate(Some("Demo"), &schema_class(), Some(&data));
    insta::assert_snapshot!(text, @r#"
    // <auto-generated/>

    #nullable enable

    namespace Demo;

    public partial class Schema
    {
        private sealed class AutoInputGraphType_Person : global::GraphQL.Types.AutoRegisteringInputObjectGraphType<global::Demo.Person>
        {
            public AutoInputGraphType_Person()
            {
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>>("Name");
                Field<global::GraphQL.Types.GraphQLClrInputTypeReference<int>>("Age");
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>>("Email");
            }

            public override object ParseDictionary(global::System.Collections.Generic.IDictionary<string, object?> value)
            {
                var obj = new global::Demo.Person(
                    value.TryGetValue("Name", out var arg0) ? (string)arg0! : default!)
                {
                    Email = value.TryGetValue("Email", out var init0) ? (string)init0! : default!,
                };
                if (value.TryGetValue("Age", out var member0))
                {
                    obj.Age = (int?)member0;
                }
                return obj;
            }
        }
    }
    "#);
}

#[test]
fn parameterless_construction_with_setters_only() {
    let mut data = input_type("AutoInputGraphType_Point", "global::Point");
    data.fields = vec![field("X", NULLABLE_INT), field("event", STRING)];
    data.members = vec![
        member("X", "int?", true, MemberAssignment::Setter),
        member("event", "string", false, MemberAssignment::Setter),
    ];

    let text = generate(None, &schema_class(), Some(&data));
    insta::assert_snapshot!(text, @r#"
    // <auto-generated/>

    #nullable enable

    public partial class Schema
    {
        private sealed class AutoInputGraphType_Point : global::GraphQL.Types.AutoRegisteringInputObjectGraphType<global::Point>
        {
            public AutoInputGraphType_Point()
            {
                Field<global::GraphQL.Types.GraphQLClrInputTypeReference<int>>("X");
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>>("event");
            }

            public override object ParseDictionary(global::System.Collections.Generic.IDictionary<string, object?> value)
            {
                var obj = new global::Point();
                if (value.TryGetValue("X", out var member0))
                {
                    obj.X = (int?)member0;
                }
                if (value.TryGetValue("event", out var member1))
                {
                    obj.@event = (string)member1!;
                }
                return obj;
            }
        }
    }
    "#);
}

#[test]
fn type_without_constructor_leaves_parsing_to_the_base_class() {
    let mut data = input_type("AutoInputGraphType_Token", "global::Token");
    data.constructible = false;
    data.fields = vec![field("Value", STRING)];
    data.members = vec![member("Value", "string", false, MemberAssignment::Setter)];

    let text = generate(None, &schema_class(), Some(&data));
    insta::assert_snapshot!(text, @r#"
    // <auto-generated/>

    #nullable enable

    public partial class Schema
    {
        private sealed class AutoInputGraphType_Token : global::GraphQL.Types.AutoRegisteringInputObjectGraphType<global::Token>
        {
            public AutoInputGraphType_Token()
            {
                Field<global::GraphQL.Types.NonNullGraphType<global::GraphQL.Types.GraphQLClrInputTypeReference<string>>>("Value");
            }
        }
    }
    "#);
}
