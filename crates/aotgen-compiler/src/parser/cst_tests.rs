use crate::parser::cst::{CsLang, SyntaxKind::*, TokenSet};
use rowan::Language;

#[test]
fn token_set_contains() {
    let set = TokenSet::new(&[ParenOpen, ParenClose, Semicolon]);
    assert!(set.contains(ParenOpen));
    assert!(set.contains(ParenClose));
    assert!(set.contains(Semicolon));
    assert!(!set.contains(Comma));
    assert!(!set.contains(Colon));
}

#[test]
fn token_set_union() {
    let a = TokenSet::new(&[ParenOpen, ParenClose]);
    let b = TokenSet::new(&[KwClass, Id]);
    let c = a.union(b);
    assert!(c.contains(ParenOpen));
    assert!(c.contains(KwClass));
    assert!(c.contains(Id));
    assert!(!c.contains(Colon));
}

#[test]
fn token_set_single() {
    let set = TokenSet::single(Colon);
    assert!(set.contains(Colon));
    assert!(!set.contains(ParenOpen));
}

#[test]
fn node_kinds_never_match_token_sets() {
    let set = TokenSet::new(&[Id]);
    assert!(!set.contains(TypeDecl));
    assert!(!set.contains(Root));
}

#[test]
fn is_trivia() {
    assert!(Whitespace.is_trivia());
    assert!(Newline.is_trivia());
    assert!(LineComment.is_trivia());
    assert!(BlockComment.is_trivia());
    assert!(Directive.is_trivia());
    assert!(!ParenOpen.is_trivia());
    assert!(!Error.is_trivia());
}

#[test]
fn modifier_keywords() {
    assert!(KwPublic.is_modifier_keyword());
    assert!(KwStatic.is_modifier_keyword());
    assert!(!KwClass.is_modifier_keyword());
}

#[test]
fn token_kinds_fit_token_set() {
    assert!(
        (Error as u16) < 128,
        "token kinds exceed TokenSet capacity: {}",
        Error as u16
    );
}

#[test]
fn raw_kind_round_trip() {
    let raw = CsLang::kind_to_raw(MethodDecl);
    assert_eq!(CsLang::kind_from_raw(raw), MethodDecl);
}
