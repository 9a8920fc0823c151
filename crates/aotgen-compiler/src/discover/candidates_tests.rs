use indoc::indoc;

use super::{candidate_classes, is_candidate};
use crate::parser::ast::Item;
use crate::parser::parse;
use crate::source_map::SourceId;
use crate::test_utils::{compile, def};

fn first_type_is_candidate(src: &str) -> bool {
    let (parse, _) = parse(src, SourceId::default()).unwrap();
    let root = parse.root().unwrap();
    let decl = root
        .items()
        .find_map(|item| match item {
            Item::Type(decl) => Some(decl),
            _ => None,
        })
        .unwrap();
    is_candidate(&decl)
}

#[test]
fn partial_class_with_marker_is_a_candidate() {
    assert!(first_type_is_candidate(
        "[AotQueryType<Query>] public partial class Schema : AotSchema { }"
    ));
    assert!(first_type_is_candidate(
        "[GraphQL.AotListTypeAttribute<int[]>] partial class Schema { }"
    ));
    assert!(first_type_is_candidate(
        "[Serializable, global::GraphQL.AotRemapType<A, B>] partial record Schema;"
    ));
}

#[test]
fn non_partial_class_is_not_a_candidate() {
    assert!(!first_type_is_candidate(
        "[AotQueryType<Query>] public class Schema : AotSchema { }"
    ));
}

#[test]
fn unrelated_attributes_and_kinds_are_ignored() {
    assert!(!first_type_is_candidate("[Obsolete] partial class Schema { }"));
    assert!(!first_type_is_candidate("partial class Schema { }"));
    assert!(!first_type_is_candidate(
        "[AotQueryType<Query>] partial struct Schema { }"
    ));
    assert!(!first_type_is_candidate(
        "[assembly: AotQueryType<Query>] partial class Schema { }"
    ));
}

#[test]
fn candidates_include_nested_classes_and_bind_symbols() {
    let compilation = compile(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    namespace Demo
    {
        public class Query { }

        public partial class Outer
        {
            [AotQueryType<Query>]
            public partial class Schema : AotSchema { }
        }

        [AotQueryType<Query>]
        public class NotPartial : AotSchema { }
    }
    "#});

    let candidates = candidate_classes(&compilation);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].symbol, def(&compilation, "Demo.Outer+Schema"));
}

#[test]
fn each_partial_declaration_is_its_own_candidate() {
    let compilation = compile(indoc! {r#"
    using GraphQL;
    using GraphQL.Types;

    public class Query { }
    public class Mutation { }

    [AotQueryType<Query>]
    public partial class Schema : AotSchema { }

    [AotMutationType<Mutation>]
    public partial class Schema { }
    "#});

    let candidates = candidate_classes(&compilation);
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].symbol, candidates[1].symbol);
}
