use indoc::indoc;

use super::{Accessibility, MemberKind, TypeKind, TypedConstant};
use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{compile, compile_clean, def, named};

#[test]
fn reference_libraries_bind_cleanly() {
    let compilation = compile_clean("");
    assert!(compilation.get_type_by_metadata_name("System.Int32").is_some());
    assert!(
        compilation
            .get_type_by_metadata_name("GraphQL.Types.AutoRegisteringObjectGraphType`1")
            .is_some()
    );
}

#[test]
fn partial_declarations_merge_into_one_type() {
    let compilation = compile_clean(indoc! {r#"
    namespace Demo
    {
        public partial class Schema { public int A; }
        partial class Schema { public string B; }
    }
    "#});

    let schema = compilation.def(def(&compilation, "Demo.Schema"));
    assert_eq!(schema.declarations.len(), 2);
    assert_eq!(schema.accessibility, Accessibility::Public);
    let names: Vec<_> = schema.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["A", "B", ".ctor"]);
}

#[test]
fn duplicate_non_partial_type_is_reported() {
    let compilation = compile(indoc! {r#"
    class Widget { }
    class Widget { }
    "#});

    assert_eq!(
        compilation.diagnostics().kinds(),
        vec![DiagnosticKind::DuplicateTypeDefinition]
    );
}

#[test]
fn names_resolve_through_usings_and_aliases() {
    let compilation = compile_clean(indoc! {r#"
    using System.Collections.Generic;
    using Strings = System.Collections.Generic.List<string>;

    namespace Demo;

    public class Holder
    {
        public List<int> Numbers { get; set; }
        public Strings Names { get; set; }
        public global::System.Guid Id { get; set; }
    }
    "#});

    let holder = compilation.def(def(&compilation, "Demo.Holder"));
    let types: Vec<_> = holder
        .members
        .iter()
        .filter(|m| matches!(m.kind, MemberKind::Property(_)))
        .map(|m| compilation.display(m.ty()))
        .collect();
    assert_eq!(
        types,
        [
            "global::System.Collections.Generic.List<int>",
            "global::System.Collections.Generic.List<string>",
            "global::System.Guid",
        ]
    );
}

#[test]
fn nested_types_resolve_from_base_hierarchy() {
    let compilation = compile_clean(indoc! {r#"
    public class Outer
    {
        public class Inner { }
    }

    public class Derived : Outer
    {
        public Inner Value { get; set; }
    }
    "#});

    let derived = compilation.def(def(&compilation, "Derived"));
    let value = derived.members.iter().find(|m| m.name == "Value").unwrap();
    assert_eq!(value.ty().def(), Some(def(&compilation, "Outer+Inner")));
}

#[test]
fn nullable_value_type_becomes_nullable_of_t() {
    let compilation = compile_clean(indoc! {r#"
    public class Holder
    {
        public int? Count { get; set; }
        public string? Name { get; set; }
    }
    "#});

    let holder = compilation.def(def(&compilation, "Holder"));
    let count = holder.members.iter().find(|m| m.name == "Count").unwrap();
    let name = holder.members.iter().find(|m| m.name == "Name").unwrap();
    assert_eq!(count.ty().def(), Some(def(&compilation, "System.Nullable`1")));
    assert_eq!(compilation.display_minimal(count.ty()), "int?");
    assert!(name.ty().nullable);
    assert_eq!(name.ty(), &named(&compilation, "System.String"));
}

#[test]
fn record_primary_constructor_synthesizes_init_properties() {
    let compilation = compile_clean(indoc! {r#"
    public record Person(string Name, [property: GraphQL.Id] int Age);
    "#});

    let person = compilation.def(def(&compilation, "Person"));
    assert!(person.is_record);
    assert_eq!(person.kind, TypeKind::Class);

    let name = person.members.iter().find(|m| m.name == "Name").unwrap();
    let setter = name.as_property().unwrap().setter.unwrap();
    assert!(setter.is_init);

    let age = person.members.iter().find(|m| m.name == "Age").unwrap();
    assert_eq!(age.attributes.len(), 1);

    let ctor = person.constructors().next().unwrap().1;
    assert_eq!(ctor.params.len(), 2);
    assert!(person.has_explicit_constructor());
}

#[test]
fn enum_members_count_up_and_combine_flags() {
    let compilation = compile_clean(indoc! {r#"
    [System.Flags]
    public enum Access
    {
        None,
        Read,
        Write = 4,
        Execute,
        All = Read | Write | Execute,
    }
    "#});

    let access = compilation.def(def(&compilation, "Access"));
    assert_eq!(access.enum_value("None"), Some(0));
    assert_eq!(access.enum_value("Read"), Some(1));
    assert_eq!(access.enum_value("Write"), Some(4));
    assert_eq!(access.enum_value("Execute"), Some(5));
    assert_eq!(access.enum_value("All"), Some(5));
}

#[test]
fn attribute_arguments_evaluate_to_constants() {
    let compilation = compile_clean(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    [MemberScan(ScanMemberTypes.Properties | ScanMemberTypes.Fields)]
    [AotOutputType<Widget>(Kind = OutputTypeKind.Interface)]
    [ClrTypeMapping(typeof(Widget))]
    public partial class Widget { }
    "#});

    let widget = compilation.def(def(&compilation, "Widget"));
    assert_eq!(widget.attributes.len(), 3);

    let scan = &widget.attributes[0];
    assert_eq!(scan.args[0].as_int(), Some(3));

    let output = &widget.attributes[1];
    assert_eq!(
        output.class.def(),
        Some(def(&compilation, "GraphQL.AotOutputTypeAttribute`1"))
    );
    let kind = output.named_arg("Kind").unwrap();
    assert_eq!(kind.as_int(), Some(2));
    assert!(matches!(kind, TypedConstant::Enum { .. }));

    let mapping = &widget.attributes[2];
    assert_eq!(mapping.args[0].as_type(), Some(&named(&compilation, "Widget")));
}

#[test]
fn unresolved_names_are_reported_once() {
    let compilation = compile(indoc! {r#"
    public class Holder
    {
        public Missing Value { get; set; }
    }
    "#});

    let messages: Vec<_> = compilation
        .diagnostics()
        .iter()
        .map(|d| d.message().to_string())
        .collect();
    assert_eq!(messages, ["type `Missing` could not be resolved"]);

    let holder = compilation.def(def(&compilation, "Holder"));
    let value = holder.members.iter().find(|m| m.name == "Value").unwrap();
    assert!(value.ty().is_error());
}

#[test]
fn class_without_constructor_gets_an_implicit_one() {
    let compilation = compile_clean(indoc! {r#"
    public class Plain { }
    public abstract class Base { }
    public class Explicit { private Explicit(int x) { } }
    "#});

    let plain = compilation.def(def(&compilation, "Plain"));
    let (member, ctor) = plain.constructors().next().unwrap();
    assert!(ctor.is_implicit);
    assert!(member.is_public());
    assert!(!plain.has_explicit_constructor());

    let base = compilation.def(def(&compilation, "Base"));
    assert_eq!(
        base.constructors().next().unwrap().0.accessibility,
        Accessibility::Protected
    );

    let explicit = compilation.def(def(&compilation, "Explicit"));
    assert_eq!(explicit.constructors().count(), 1);
    assert!(explicit.has_explicit_constructor());
}
