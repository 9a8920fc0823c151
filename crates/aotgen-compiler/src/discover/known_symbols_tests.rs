use super::KnownSymbols;
use crate::test_utils::{compile, compile_without_library, def, generic, named};

#[test]
fn resolves_every_symbol_against_the_full_library() {
    let compilation = compile("");
    let known = KnownSymbols::resolve(&compilation);

    assert!(known.is_available());
    assert_eq!(known.list_types.len(), 9);
    assert!(known.aot_remap_type.is_some());
    assert!(known.resolve_field_context_t.is_some());
    assert_eq!(
        known.auto_registering_object_graph_type,
        Some(def(&compilation, "GraphQL.Types.AutoRegisteringObjectGraphType`1"))
    );
}

#[test]
fn missing_library_leaves_graphql_symbols_unresolved() {
    let compilation = compile_without_library("");
    let known = KnownSymbols::resolve(&compilation);

    assert!(!known.is_available());
    assert!(known.aot_query_type.is_none());
    assert!(known.igraph_type.is_none());
    assert!(known.task_t.is_some());
    assert!(
        known
            .builtin_scalar_graph_type(&named(&compilation, "System.String"))
            .is_none()
    );
}

#[test]
fn scalar_table_maps_clr_types_to_graph_types() {
    let compilation = compile("");
    let known = KnownSymbols::resolve(&compilation);

    let scalar = |clr: &str| {
        known
            .builtin_scalar_graph_type(&named(&compilation, clr))
            .map(|g| compilation.display_minimal(&g))
    };
    assert_eq!(scalar("System.Int32").as_deref(), Some("IntGraphType"));
    assert_eq!(scalar("System.Guid").as_deref(), Some("IdGraphType"));
    assert_eq!(scalar("System.TimeSpan").as_deref(), Some("TimeSpanSecondsGraphType"));
    assert_eq!(scalar("System.Object"), None);
}

#[test]
fn list_whitelist_excludes_other_collections() {
    let compilation = compile("");
    let known = KnownSymbols::resolve(&compilation);
    let int = named(&compilation, "System.Int32");

    let list = generic(&compilation, "System.Collections.Generic.List`1", vec![int.clone()]);
    let queue = generic(&compilation, "System.Collections.Generic.Queue`1", vec![int.clone()]);
    assert_eq!(known.list_element(&list), Some(&int));
    assert_eq!(known.list_element(&queue), None);
}
