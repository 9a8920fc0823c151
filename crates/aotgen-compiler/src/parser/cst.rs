//! Syntax kinds for the C# declaration subset.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `CsLang` implements Rowan's `Language` trait for tree construction.
//!
//! Contextual keywords (`partial`, `record`, `get`, `set`, `init`, `where`, `required`, ...)
//! are lexed as `Id`; the grammar checks their text where it matters.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("<")]
    Lt,

    /// Closing angle. `>>` is never produced so nested type arguments close one at a time.
    #[token(">")]
    Gt,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    /// `::` for alias qualification (`global::System.String`). Defined before `Colon`.
    #[token("::")]
    DoubleColon,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("?")]
    Question,

    #[token("|")]
    Pipe,

    #[token("-")]
    Minus,

    #[token("<<")]
    ShiftLeft,

    #[token("=>")]
    Arrow,

    /// Every other operator. Only meaningful inside skipped bodies.
    #[regex(r"[*/%^&!~+]")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("??")]
    #[token("??=")]
    #[token("?.")]
    #[token("->")]
    #[token("..")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    Operator,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r#"@"(?:[^"]|"")*""#)]
    #[regex(r#"\$"(?:[^"\\\n]|\\.)*""#)]
    #[regex(r#"(?:\$@|@\$)"(?:[^"]|"")*""#)]
    #[regex(r#""""(?:[^"]|"[^"]|""[^"])*""""#)]
    StringLiteral,

    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    CharLiteral,

    #[regex(r"[0-9][0-9_]*(?:\.[0-9][0-9_]*)?(?:[eE][+-]?[0-9]+)?[a-zA-Z]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+[a-zA-Z]*")]
    #[regex(r"0[bB][01_]+[a-zA-Z]*")]
    NumberLiteral,

    #[token("class")]
    KwClass,

    #[token("struct")]
    KwStruct,

    #[token("interface")]
    KwInterface,

    #[token("enum")]
    KwEnum,

    #[token("namespace")]
    KwNamespace,

    #[token("using")]
    KwUsing,

    #[token("public")]
    KwPublic,

    #[token("private")]
    KwPrivate,

    #[token("protected")]
    KwProtected,

    #[token("internal")]
    KwInternal,

    #[token("static")]
    KwStatic,

    #[token("abstract")]
    KwAbstract,

    #[token("sealed")]
    KwSealed,

    #[token("readonly")]
    KwReadonly,

    #[token("const")]
    KwConst,

    #[token("override")]
    KwOverride,

    #[token("new")]
    KwNew,

    /// Modifiers with no meaning for the generator.
    #[token("virtual")]
    #[token("extern")]
    #[token("unsafe")]
    #[token("volatile")]
    #[token("fixed")]
    KwModifier,

    #[token("this")]
    KwThis,

    #[token("ref")]
    KwRef,

    #[token("out")]
    KwOut,

    #[token("in")]
    KwIn,

    #[token("params")]
    KwParams,

    #[token("typeof")]
    KwTypeof,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("null")]
    KwNull,

    #[token("void")]
    KwVoid,

    #[token("default")]
    KwDefault,

    #[token("delegate")]
    KwDelegate,

    #[token("event")]
    KwEvent,

    #[token("operator")]
    KwOperator,

    #[token("implicit")]
    #[token("explicit")]
    KwConversion,

    /// Built-in type keywords (`int`, `string`, `object`, ...).
    #[token("bool")]
    #[token("byte")]
    #[token("sbyte")]
    #[token("short")]
    #[token("ushort")]
    #[token("int")]
    #[token("uint")]
    #[token("long")]
    #[token("ulong")]
    #[token("char")]
    #[token("float")]
    #[token("double")]
    #[token("decimal")]
    #[token("string")]
    #[token("object")]
    KwPredefined,

    /// Identifier, optionally verbatim (`@class`). Defined after keywords so they take precedence.
    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Preprocessor line (`#nullable enable`, `#region`, ...), kept as trivia.
    #[regex(r"#[^\n]*", allow_greedy = true)]
    Directive,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    UsingDirective,
    NamespaceDecl,
    TypeDecl,
    DelegateDecl,
    ModifierList,
    AttributeList,
    AttributeTarget,
    Attribute,
    AttributeArgList,
    AttributeArg,
    TypeParamList,
    TypeParam,
    ParamList,
    Param,
    BaseList,
    BaseArgs,
    ConstraintClause,
    MemberList,
    FieldDecl,
    VariableDeclarator,
    PropertyDecl,
    AccessorList,
    Accessor,
    MethodDecl,
    CtorDecl,
    EnumMemberDecl,
    OpaqueMember,
    Initializer,
    Block,
    ExprBody,

    PredefinedType,
    SimpleName,
    TypeArgList,
    QualifiedName,
    AliasQualifiedName,
    ArrayType,
    RankSpecifier,
    NullableType,
    TupleType,

    TypeofExpr,
    LiteralExpr,
    NameExpr,
    MemberAccessExpr,
    BinaryExpr,
    ParenExpr,
    PrefixExpr,
    NameofExpr,
    OpaqueExpr,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | Newline | LineComment | BlockComment | Directive
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    /// Access and declaration modifiers recognized as keywords.
    #[inline]
    pub fn is_modifier_keyword(self) -> bool {
        MODIFIERS.contains(self)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CsLang {}

impl Language for CsLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<CsLang>;
pub type SyntaxToken = rowan::SyntaxToken<CsLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

use token_sets::MODIFIERS;

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const MODIFIERS: TokenSet = TokenSet::new(&[
        KwPublic,
        KwPrivate,
        KwProtected,
        KwInternal,
        KwStatic,
        KwAbstract,
        KwSealed,
        KwReadonly,
        KwConst,
        KwOverride,
        KwNew,
        KwModifier,
    ]);

    pub const TYPE_KEYWORDS: TokenSet = TokenSet::new(&[KwClass, KwStruct, KwInterface, KwEnum]);

    /// FIRST set of a type reference.
    pub const TYPE_FIRST: TokenSet = TokenSet::new(&[Id, KwPredefined, KwVoid, ParenOpen]);

    /// FIRST set of a member or type declaration.
    pub const DECL_FIRST: TokenSet = MODIFIERS
        .union(TYPE_KEYWORDS)
        .union(TYPE_FIRST)
        .union(TokenSet::new(&[
            BracketOpen,
            KwDelegate,
            KwEvent,
            KwConversion,
            Operator,
        ]));

    pub const PARAM_MODIFIERS: TokenSet = TokenSet::new(&[KwThis, KwRef, KwOut, KwIn, KwParams, KwReadonly]);

    pub const LITERALS: TokenSet = TokenSet::new(&[
        StringLiteral,
        CharLiteral,
        NumberLiteral,
        KwTrue,
        KwFalse,
        KwNull,
        KwDefault,
    ]);

    pub const TRIVIA: TokenSet =
        TokenSet::new(&[Whitespace, Newline, LineComment, BlockComment, Directive]);

    /// Where a broken member declaration resynchronizes.
    pub const MEMBER_RECOVERY: TokenSet = TokenSet::new(&[Semicolon, BraceClose]);

    /// Where a broken top-level item resynchronizes.
    pub const ROOT_RECOVERY: TokenSet =
        TokenSet::new(&[KwNamespace, KwUsing, KwClass, KwStruct, KwInterface, KwEnum, BracketOpen]);

    /// Tokens that end a skipped expression at nesting depth zero.
    pub const EXPR_END: TokenSet = TokenSet::new(&[Semicolon, Comma, ParenClose, BracketClose, BraceClose]);

    /// Tokens that end an attribute argument.
    pub const ATTRIBUTE_ARG_END: TokenSet = TokenSet::new(&[Comma, ParenClose, BracketClose]);
}
