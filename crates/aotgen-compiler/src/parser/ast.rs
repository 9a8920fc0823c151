//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(UsingDirective, UsingDirective);
ast_node!(NamespaceDecl, NamespaceDecl);
ast_node!(TypeDecl, TypeDecl);
ast_node!(DelegateDecl, DelegateDecl);
ast_node!(ModifierList, ModifierList);
ast_node!(AttributeList, AttributeList);
ast_node!(Attribute, Attribute);
ast_node!(AttributeArg, AttributeArg);
ast_node!(TypeParamList, TypeParamList);
ast_node!(TypeParam, TypeParam);
ast_node!(ParamList, ParamList);
ast_node!(Param, Param);
ast_node!(BaseList, BaseList);
ast_node!(MemberList, MemberList);
ast_node!(FieldDecl, FieldDecl);
ast_node!(VariableDeclarator, VariableDeclarator);
ast_node!(PropertyDecl, PropertyDecl);
ast_node!(AccessorList, AccessorList);
ast_node!(Accessor, Accessor);
ast_node!(MethodDecl, MethodDecl);
ast_node!(CtorDecl, CtorDecl);
ast_node!(EnumMemberDecl, EnumMemberDecl);
ast_node!(Initializer, Initializer);

ast_node!(PredefinedType, PredefinedType);
ast_node!(SimpleName, SimpleName);
ast_node!(TypeArgList, TypeArgList);
ast_node!(QualifiedName, QualifiedName);
ast_node!(AliasQualifiedName, AliasQualifiedName);
ast_node!(ArrayType, ArrayType);
ast_node!(NullableType, NullableType);
ast_node!(TupleType, TupleType);

ast_node!(TypeofExpr, TypeofExpr);
ast_node!(LiteralExpr, LiteralExpr);
ast_node!(NameExpr, NameExpr);
ast_node!(MemberAccessExpr, MemberAccessExpr);
ast_node!(BinaryExpr, BinaryExpr);
ast_node!(ParenExpr, ParenExpr);
ast_node!(PrefixExpr, PrefixExpr);
ast_node!(NameofExpr, NameofExpr);
ast_node!(OpaqueExpr, OpaqueExpr);

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|it| it.into_token())
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    tokens(node).any(|t| t.kind() == kind)
}

/// Declarations that may appear in a compilation unit or namespace body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Using(UsingDirective),
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    Delegate(DelegateDecl),
}

impl Item {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::UsingDirective => UsingDirective::cast(node).map(Item::Using),
            SyntaxKind::NamespaceDecl => NamespaceDecl::cast(node).map(Item::Namespace),
            SyntaxKind::TypeDecl => TypeDecl::cast(node).map(Item::Type),
            SyntaxKind::DelegateDecl => DelegateDecl::cast(node).map(Item::Delegate),
            _ => None,
        }
    }
}

impl Root {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    /// Assembly- and module-level attribute lists.
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }
}

impl UsingDirective {
    pub fn is_global(&self) -> bool {
        tokens(&self.0)
            .find(|t| !t.kind().is_trivia())
            .is_some_and(|t| t.kind() == SyntaxKind::Id && t.text() == "global")
    }

    pub fn is_static(&self) -> bool {
        has_token(&self.0, SyntaxKind::KwStatic)
    }

    /// `Alias` in `using Alias = Target;`
    pub fn alias(&self) -> Option<SyntaxToken> {
        let mut last_id = None;
        for token in tokens(&self.0) {
            match token.kind() {
                SyntaxKind::Id => last_id = Some(token),
                SyntaxKind::Equals => return last_id,
                _ => {}
            }
        }
        None
    }

    pub fn target(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }
}

impl NamespaceDecl {
    pub fn name(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn is_file_scoped(&self) -> bool {
        !has_token(&self.0, SyntaxKind::BraceOpen)
    }
}

/// Which keyword introduced a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Struct,
    Interface,
    Enum,
}

impl TypeDecl {
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        self.0.children().find_map(ModifierList::cast)
    }

    pub fn kind(&self) -> TypeDeclKind {
        for token in tokens(&self.0) {
            match token.kind() {
                SyntaxKind::KwStruct => return TypeDeclKind::Struct,
                SyntaxKind::KwInterface => return TypeDeclKind::Interface,
                SyntaxKind::KwEnum => return TypeDeclKind::Enum,
                SyntaxKind::KwClass => return TypeDeclKind::Class,
                _ => {}
            }
        }
        TypeDeclKind::Class
    }

    pub fn is_record(&self) -> bool {
        let ids: Vec<_> = tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::Id)
            .collect();
        ids.len() >= 2 && ids[0].text() == "record"
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id).last()
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        self.0.children().find_map(TypeParamList::cast)
    }

    /// Primary constructor parameters (records and primary-constructor classes).
    pub fn param_list(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    pub fn base_list(&self) -> Option<BaseList> {
        self.0.children().find_map(BaseList::cast)
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + use<> {
        self.0
            .children()
            .find_map(MemberList::cast)
            .into_iter()
            .flat_map(|list| list.members().collect::<Vec<_>>())
    }
}

impl DelegateDecl {
    pub fn modifiers(&self) -> Option<ModifierList> {
        self.0.children().find_map(ModifierList::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        self.0.children().find_map(TypeParamList::cast)
    }
}

impl ModifierList {
    pub fn has(&self, modifier: &str) -> bool {
        tokens(&self.0).any(|t| !t.kind().is_trivia() && t.text() == modifier)
    }
}

impl AttributeList {
    /// Explicit target such as `property` in `[property: Id]`.
    pub fn target(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::AttributeTarget)
            .and_then(|n| tokens(&n).find(|t| !t.kind().is_trivia()))
            .map(|t| t.text().to_string())
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.0.children().filter_map(Attribute::cast)
    }
}

impl Attribute {
    pub fn name(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn args(&self) -> impl Iterator<Item = AttributeArg> + use<> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::AttributeArgList)
            .into_iter()
            .flat_map(|list| list.children().filter_map(AttributeArg::cast).collect::<Vec<_>>())
    }
}

impl AttributeArg {
    /// `Name` in `Name = value`.
    pub fn name_equals(&self) -> Option<SyntaxToken> {
        self.name_before(SyntaxKind::Equals)
    }

    /// `name` in `name: value`.
    pub fn name_colon(&self) -> Option<SyntaxToken> {
        self.name_before(SyntaxKind::Colon)
    }

    fn name_before(&self, separator: SyntaxKind) -> Option<SyntaxToken> {
        let mut significant = tokens(&self.0).filter(|t| !t.kind().is_trivia());
        let name = significant.next()?;
        let sep = significant.next()?;
        (name.kind() == SyntaxKind::Id && sep.kind() == separator).then_some(name)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl TypeParamList {
    pub fn params(&self) -> impl Iterator<Item = TypeParam> + '_ {
        self.0.children().filter_map(TypeParam::cast)
    }
}

impl TypeParam {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.0.children().filter_map(Param::cast)
    }
}

/// How an argument is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    #[default]
    Value,
    Ref,
    Out,
    In,
}

impl Param {
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    /// Last identifier, so a contextual `scoped` modifier is skipped.
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id).last()
    }

    pub fn has_default(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::Initializer)
    }

    pub fn ref_kind(&self) -> RefKind {
        for token in tokens(&self.0) {
            match token.kind() {
                SyntaxKind::KwRef => return RefKind::Ref,
                SyntaxKind::KwOut => return RefKind::Out,
                SyntaxKind::KwIn => return RefKind::In,
                _ => {}
            }
        }
        RefKind::Value
    }

    pub fn is_params(&self) -> bool {
        has_token(&self.0, SyntaxKind::KwParams)
    }
}

impl BaseList {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.0.children().filter_map(TypeRef::cast)
    }
}

/// A member of a type body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Ctor(CtorDecl),
    EnumMember(EnumMemberDecl),
    Type(TypeDecl),
    Delegate(DelegateDecl),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FieldDecl => FieldDecl::cast(node).map(Member::Field),
            SyntaxKind::PropertyDecl => PropertyDecl::cast(node).map(Member::Property),
            SyntaxKind::MethodDecl => MethodDecl::cast(node).map(Member::Method),
            SyntaxKind::CtorDecl => CtorDecl::cast(node).map(Member::Ctor),
            SyntaxKind::EnumMemberDecl => EnumMemberDecl::cast(node).map(Member::EnumMember),
            SyntaxKind::TypeDecl => TypeDecl::cast(node).map(Member::Type),
            SyntaxKind::DelegateDecl => DelegateDecl::cast(node).map(Member::Delegate),
            _ => None,
        }
    }
}

impl MemberList {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }
}

impl FieldDecl {
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        self.0.children().find_map(ModifierList::cast)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> + '_ {
        self.0.children().filter_map(VariableDeclarator::cast)
    }
}

impl VariableDeclarator {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn initializer(&self) -> Option<Initializer> {
        self.0.children().find_map(Initializer::cast)
    }
}

impl PropertyDecl {
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        self.0.children().find_map(ModifierList::cast)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn accessors(&self) -> impl Iterator<Item = Accessor> + use<> {
        self.0
            .children()
            .find_map(AccessorList::cast)
            .into_iter()
            .flat_map(|list| list.accessors().collect::<Vec<_>>())
    }

    /// `Type Name => expr;` - a get-only property.
    pub fn has_expr_body(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::ExprBody)
    }
}

impl AccessorList {
    pub fn accessors(&self) -> impl Iterator<Item = Accessor> + '_ {
        self.0.children().filter_map(Accessor::cast)
    }
}

impl Accessor {
    pub fn modifiers(&self) -> Option<ModifierList> {
        self.0.children().find_map(ModifierList::cast)
    }

    /// `get`, `set`, `init`, `add` or `remove`.
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }
}

impl MethodDecl {
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        self.0.children().find_map(ModifierList::cast)
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        self.0.children().find_map(TypeParamList::cast)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }
}

impl CtorDecl {
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        self.0.children().find_map(ModifierList::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }
}

impl EnumMemberDecl {
    pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
        self.0.children().filter_map(AttributeList::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0
            .children()
            .find_map(Initializer::cast)
            .and_then(|init| init.expr())
    }
}

impl Initializer {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

/// A type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Predefined(PredefinedType),
    Simple(SimpleName),
    Qualified(QualifiedName),
    AliasQualified(AliasQualifiedName),
    Array(ArrayType),
    Nullable(NullableType),
    Tuple(TupleType),
}

impl TypeRef {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PredefinedType => PredefinedType::cast(node).map(TypeRef::Predefined),
            SyntaxKind::SimpleName => SimpleName::cast(node).map(TypeRef::Simple),
            SyntaxKind::QualifiedName => QualifiedName::cast(node).map(TypeRef::Qualified),
            SyntaxKind::AliasQualifiedName => {
                AliasQualifiedName::cast(node).map(TypeRef::AliasQualified)
            }
            SyntaxKind::ArrayType => ArrayType::cast(node).map(TypeRef::Array),
            SyntaxKind::NullableType => NullableType::cast(node).map(TypeRef::Nullable),
            SyntaxKind::TupleType => TupleType::cast(node).map(TypeRef::Tuple),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            TypeRef::Predefined(n) => n.as_cst(),
            TypeRef::Simple(n) => n.as_cst(),
            TypeRef::Qualified(n) => n.as_cst(),
            TypeRef::AliasQualified(n) => n.as_cst(),
            TypeRef::Array(n) => n.as_cst(),
            TypeRef::Nullable(n) => n.as_cst(),
            TypeRef::Tuple(n) => n.as_cst(),
        }
    }

    /// Source text without trivia, e.g. `List<int>`.
    pub fn text(&self) -> String {
        self.as_cst()
            .descendants_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !t.kind().is_trivia())
            .map(|t| match t.kind() {
                SyntaxKind::Comma => ", ".to_string(),
                _ => t.text().to_string(),
            })
            .collect()
    }
}

impl PredefinedType {
    /// `int`, `string`, `void`, ...
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }
}

impl SimpleName {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        self.0.children().find_map(TypeArgList::cast)
    }
}

impl TypeArgList {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.0.children().filter_map(TypeRef::cast)
    }

    pub fn arity(&self) -> usize {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Comma).count() + 1
    }

    /// `<>` or `<,>`: an unbound generic in `typeof`.
    pub fn is_unbound(&self) -> bool {
        self.types().next().is_none()
    }
}

impl QualifiedName {
    pub fn left(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn right(&self) -> Option<SimpleName> {
        self.0.children().filter_map(SimpleName::cast).last()
    }
}

impl AliasQualifiedName {
    pub fn alias(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn name(&self) -> Option<SimpleName> {
        self.0.children().find_map(SimpleName::cast)
    }
}

impl ArrayType {
    pub fn element(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    /// Ranks in source order; the first specifier is the outermost array.
    pub fn ranks(&self) -> Vec<u32> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::RankSpecifier)
            .map(|n| tokens(&n).filter(|t| t.kind() == SyntaxKind::Comma).count() as u32 + 1)
            .collect()
    }
}

impl NullableType {
    pub fn inner(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }
}

impl TupleType {
    pub fn elements(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.0.children().filter_map(TypeRef::cast)
    }
}

/// Constant expression forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Typeof(TypeofExpr),
    Literal(LiteralExpr),
    Name(NameExpr),
    MemberAccess(MemberAccessExpr),
    Binary(BinaryExpr),
    Paren(ParenExpr),
    Prefix(PrefixExpr),
    Nameof(NameofExpr),
    Opaque(OpaqueExpr),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::TypeofExpr => TypeofExpr::cast(node).map(Expr::Typeof),
            SyntaxKind::LiteralExpr => LiteralExpr::cast(node).map(Expr::Literal),
            SyntaxKind::NameExpr => NameExpr::cast(node).map(Expr::Name),
            SyntaxKind::MemberAccessExpr => MemberAccessExpr::cast(node).map(Expr::MemberAccess),
            SyntaxKind::BinaryExpr => BinaryExpr::cast(node).map(Expr::Binary),
            SyntaxKind::ParenExpr => ParenExpr::cast(node).map(Expr::Paren),
            SyntaxKind::PrefixExpr => PrefixExpr::cast(node).map(Expr::Prefix),
            SyntaxKind::NameofExpr => NameofExpr::cast(node).map(Expr::Nameof),
            SyntaxKind::OpaqueExpr => OpaqueExpr::cast(node).map(Expr::Opaque),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Typeof(n) => n.as_cst(),
            Expr::Literal(n) => n.as_cst(),
            Expr::Name(n) => n.as_cst(),
            Expr::MemberAccess(n) => n.as_cst(),
            Expr::Binary(n) => n.as_cst(),
            Expr::Paren(n) => n.as_cst(),
            Expr::Prefix(n) => n.as_cst(),
            Expr::Nameof(n) => n.as_cst(),
            Expr::Opaque(n) => n.as_cst(),
        }
    }
}

impl TypeofExpr {
    pub fn type_ref(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }
}

impl LiteralExpr {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }
}

impl NameExpr {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .filter(|t| matches!(t.kind(), SyntaxKind::Id | SyntaxKind::KwPredefined))
            .last()
    }

    /// Whether the name carries a `global::` qualifier.
    pub fn is_global(&self) -> bool {
        has_token(&self.0, SyntaxKind::DoubleColon)
    }
}

impl MemberAccessExpr {
    pub fn receiver(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn member(&self) -> Option<SyntaxToken> {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Id).last()
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl PrefixExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl NameofExpr {
    pub fn arg(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}
