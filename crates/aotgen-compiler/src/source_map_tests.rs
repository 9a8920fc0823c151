use crate::source_map::{SourceId, SourceMap};

#[test]
fn ids_are_sequential() {
    let mut map = SourceMap::new();
    let a = map.add_file("a.cs", "class A {}");
    let b = map.add_inline("class B {}");
    assert_eq!(a, SourceId(0));
    assert_eq!(b, SourceId(1));
    assert_eq!(map.content(b), "class B {}");
    assert_eq!(map.path(a), Some("a.cs"));
    assert_eq!(map.path(b), None);
}

#[test]
fn metadata_is_not_a_user_source() {
    let mut map = SourceMap::inline("class A {}");
    map.add_metadata("<metadata:System>", "namespace System {}");
    assert_eq!(map.len(), 2);
    assert_eq!(map.user_sources().count(), 1);
    assert_eq!(map.kind(SourceId(1)).display_name(), "<metadata:System>");
}
