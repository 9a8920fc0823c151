use indoc::indoc;

use super::ast::{Expr, Item, Member, RefKind, Root, TypeDecl, TypeDeclKind, TypeRef};
use super::parse;
use crate::source_map::SourceId;

fn root(source: &str) -> Root {
    let (parse, diagnostics) = parse(source, SourceId::default()).unwrap();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.kinds());
    parse.root().unwrap()
}

fn first_type(root: &Root) -> TypeDecl {
    fn find(items: Vec<Item>) -> Option<TypeDecl> {
        for item in items {
            match item {
                Item::Type(decl) => return Some(decl),
                Item::Namespace(ns) => {
                    if let Some(decl) = find(ns.items().collect()) {
                        return Some(decl);
                    }
                }
                _ => {}
            }
        }
        None
    }
    find(root.items().collect()).unwrap()
}

#[test]
fn type_declaration_shape() {
    let root = root(indoc! {r#"
    namespace App.Models
    {
        [Serializable]
        public sealed partial class Box<T> : Base<T>, IBox where T : class
        {
        }
    }
    "#});
    let decl = first_type(&root);

    assert_eq!(decl.name().unwrap().text(), "Box");
    assert_eq!(decl.kind(), TypeDeclKind::Class);
    assert!(!decl.is_record());
    let modifiers = decl.modifiers().unwrap();
    assert!(modifiers.has("public"));
    assert!(modifiers.has("sealed"));
    assert!(modifiers.has("partial"));
    assert!(!modifiers.has("static"));

    let params: Vec<_> = decl
        .type_params()
        .unwrap()
        .params()
        .map(|p| p.name().unwrap().text().to_string())
        .collect();
    assert_eq!(params, vec!["T"]);

    let bases: Vec<_> = decl.base_list().unwrap().types().map(|t| t.text()).collect();
    assert_eq!(bases, vec!["Base<T>", "IBox"]);
    assert_eq!(decl.attribute_lists().count(), 1);
}

#[test]
fn record_struct_kind() {
    let root = root("public readonly record struct Money(decimal Amount);");
    let decl = first_type(&root);

    assert!(decl.is_record());
    assert_eq!(decl.kind(), TypeDeclKind::Struct);
    assert_eq!(decl.name().unwrap().text(), "Money");
    assert_eq!(decl.param_list().unwrap().params().count(), 1);
}

#[test]
fn using_directive_forms() {
    let root = root(indoc! {r#"
    global using System.Linq;
    using static System.Math;
    using Gql = GraphQL.Types;
    "#});
    let usings: Vec<_> = root
        .items()
        .filter_map(|item| match item {
            Item::Using(u) => Some(u),
            _ => None,
        })
        .collect();

    assert!(usings[0].is_global());
    assert!(!usings[0].is_static());
    assert_eq!(usings[0].target().unwrap().text(), "System.Linq");
    assert!(usings[1].is_static());
    assert_eq!(usings[2].alias().unwrap().text(), "Gql");
    assert_eq!(usings[2].target().unwrap().text(), "GraphQL.Types");
    assert!(usings[1].alias().is_none());
}

#[test]
fn members_of_each_kind() {
    let root = root(indoc! {r#"
    class C
    {
        public const int Max = 3, Min = 1;
        public string Name { get; private set; }
        public int Total => 3;
        public C(int total) { }
        public T Echo<T>(ref T value, out int count, params string[] rest) => value;
        public enum Mode { A }
    }
    "#});
    let decl = first_type(&root);
    let members: Vec<_> = decl.members().collect();
    assert_eq!(members.len(), 6);

    let Member::Field(field) = &members[0] else {
        panic!("expected field");
    };
    assert!(field.modifiers().unwrap().has("const"));
    let names: Vec<_> = field
        .declarators()
        .map(|d| d.name().unwrap().text().to_string())
        .collect();
    assert_eq!(names, vec!["Max", "Min"]);

    let Member::Property(name) = &members[1] else {
        panic!("expected property");
    };
    let accessors: Vec<_> = name.accessors().collect();
    assert_eq!(accessors[0].keyword().unwrap().text(), "get");
    assert_eq!(accessors[1].keyword().unwrap().text(), "set");
    assert!(accessors[1].modifiers().unwrap().has("private"));

    let Member::Property(total) = &members[2] else {
        panic!("expected property");
    };
    assert!(total.has_expr_body());
    assert_eq!(total.accessors().count(), 0);

    let Member::Ctor(ctor) = &members[3] else {
        panic!("expected constructor");
    };
    assert_eq!(ctor.name().unwrap().text(), "C");

    let Member::Method(echo) = &members[4] else {
        panic!("expected method");
    };
    assert_eq!(echo.name().unwrap().text(), "Echo");
    assert_eq!(echo.return_type().unwrap().text(), "T");
    assert_eq!(echo.type_params().unwrap().params().count(), 1);
    let params: Vec<_> = echo.param_list().unwrap().params().collect();
    assert_eq!(params[0].ref_kind(), RefKind::Ref);
    assert_eq!(params[1].ref_kind(), RefKind::Out);
    assert!(params[2].is_params());
    assert_eq!(params[2].type_ref().unwrap().text(), "string[]");

    assert!(matches!(members[5], Member::Type(_)));
}

#[test]
fn type_reference_shapes() {
    let root = root(indoc! {r#"
    class C
    {
        int?[] A;
        List<string>[]? B;
        (int Count, string) C;
        global::System.Guid D;
    }
    "#});
    let decl = first_type(&root);
    let types: Vec<TypeRef> = decl
        .members()
        .filter_map(|m| match m {
            Member::Field(f) => f.type_ref(),
            _ => None,
        })
        .collect();

    let TypeRef::Array(array) = &types[0] else {
        panic!("expected array");
    };
    assert_eq!(array.ranks(), vec![1]);
    assert!(matches!(array.element(), Some(TypeRef::Nullable(_))));

    let TypeRef::Nullable(nullable) = &types[1] else {
        panic!("expected nullable");
    };
    assert!(matches!(nullable.inner(), Some(TypeRef::Array(_))));

    let TypeRef::Tuple(tuple) = &types[2] else {
        panic!("expected tuple");
    };
    assert_eq!(tuple.elements().count(), 2);

    let TypeRef::Qualified(qualified) = &types[3] else {
        panic!("expected qualified name");
    };
    assert!(matches!(qualified.left(), Some(TypeRef::AliasQualified(_))));
    assert_eq!(qualified.right().unwrap().name().unwrap().text(), "Guid");
}

#[test]
fn attribute_arguments() {
    let root = root(indoc! {r#"
    [AotTypeMapping(typeof(Dictionary<,>), typeof(Widget), name: "x", Flags = A.B | A.C)]
    class S { }
    "#});
    let decl = first_type(&root);
    let list = decl.attribute_lists().next().unwrap();
    let attribute = list.attributes().next().unwrap();
    assert_eq!(attribute.name().unwrap().text(), "AotTypeMapping");

    let args: Vec<_> = attribute.args().collect();
    assert_eq!(args.len(), 4);

    let Some(Expr::Typeof(open)) = args[0].value() else {
        panic!("expected typeof");
    };
    let Some(TypeRef::Simple(name)) = open.type_ref() else {
        panic!("expected simple name");
    };
    let type_args = name.type_args().unwrap();
    assert!(type_args.is_unbound());
    assert_eq!(type_args.arity(), 2);

    assert_eq!(args[2].name_colon().unwrap().text(), "name");
    assert!(args[2].name_equals().is_none());
    assert_eq!(args[3].name_equals().unwrap().text(), "Flags");
    assert!(matches!(args[3].value(), Some(Expr::Binary(_))));
}

#[test]
fn attribute_targets() {
    let root = root("record R([property: Id] int Key);");
    let decl = first_type(&root);
    let param = decl.param_list().unwrap().params().next().unwrap();
    let list = param.attribute_lists().next().unwrap();
    assert_eq!(list.target().as_deref(), Some("property"));
}
