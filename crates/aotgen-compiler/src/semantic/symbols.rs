//! Symbol model: type definitions, constructed types, members, attributes.

use std::hash::{Hash, Hasher};

use indexmap::{IndexMap, IndexSet};

use crate::diagnostics::Span;
use crate::parser::ast;

/// A lightweight handle to a type definition in the [`SymbolTable`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeDefId(u32);

impl TypeDefId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Accessibility {
    Public,
    ProtectedInternal,
    Internal,
    Protected,
    PrivateProtected,
    #[default]
    Private,
}

impl Accessibility {
    /// Reads the accessibility keywords of a modifier list, if any are present.
    pub fn from_modifiers(modifiers: Option<&ast::ModifierList>) -> Option<Self> {
        let modifiers = modifiers?;
        let public = modifiers.has("public");
        let internal = modifiers.has("internal");
        let protected = modifiers.has("protected");
        let private = modifiers.has("private");
        Some(match (public, internal, protected, private) {
            (true, _, _, _) => Accessibility::Public,
            (_, true, true, _) => Accessibility::ProtectedInternal,
            (_, _, true, true) => Accessibility::PrivateProtected,
            (_, true, _, _) => Accessibility::Internal,
            (_, _, true, _) => Accessibility::Protected,
            (_, _, _, true) => Accessibility::Private,
            _ => return None,
        })
    }

    pub fn as_keyword(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Private => "private",
        }
    }
}

/// Where a type parameter is declared.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeParamOwner {
    Type(TypeDefId),
    /// Declared by a method of the given type.
    Method(TypeDefId),
}

/// A constructed type.
///
/// The nullable annotation is carried along but ignored by equality and
/// hashing: `string` and `string?` are the same type.
#[derive(Clone, Debug)]
pub struct TypeSymbol {
    pub shape: TypeShape,
    pub nullable: bool,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeShape {
    Named {
        def: TypeDefId,
        args: Vec<TypeSymbol>,
    },
    /// `rank` is 1 for `T[]`, 2 for `T[,]`, ...
    Array {
        element: Box<TypeSymbol>,
        rank: u32,
    },
    TypeParameter {
        name: String,
        index: u32,
        owner: TypeParamOwner,
    },
    /// A name that failed to bind.
    Error(String),
}

impl PartialEq for TypeSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl Eq for TypeSymbol {}

impl Hash for TypeSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
    }
}

impl TypeSymbol {
    pub fn named(def: TypeDefId, args: Vec<TypeSymbol>) -> Self {
        Self {
            shape: TypeShape::Named { def, args },
            nullable: false,
        }
    }

    pub fn array(element: TypeSymbol, rank: u32) -> Self {
        Self {
            shape: TypeShape::Array {
                element: Box::new(element),
                rank,
            },
            nullable: false,
        }
    }

    pub fn error(name: impl Into<String>) -> Self {
        Self {
            shape: TypeShape::Error(name.into()),
            nullable: false,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// The definition of a named type.
    pub fn def(&self) -> Option<TypeDefId> {
        match &self.shape {
            TypeShape::Named { def, .. } => Some(*def),
            _ => None,
        }
    }

    pub fn type_args(&self) -> &[TypeSymbol] {
        match &self.shape {
            TypeShape::Named { args, .. } => args,
            _ => &[],
        }
    }

    pub fn array_element(&self) -> Option<&TypeSymbol> {
        match &self.shape {
            TypeShape::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.shape, TypeShape::Error(_))
    }

    pub fn is_type_parameter(&self) -> bool {
        matches!(self.shape, TypeShape::TypeParameter { .. })
    }

    /// Whether the type mentions a type parameter or an error anywhere.
    pub fn is_open(&self) -> bool {
        match &self.shape {
            TypeShape::Named { args, .. } => args.iter().any(TypeSymbol::is_open),
            TypeShape::Array { element, .. } => element.is_open(),
            TypeShape::TypeParameter { .. } | TypeShape::Error(_) => true,
        }
    }

    /// Replaces the type parameters of `owner` with `args`, by position.
    pub fn substitute(&self, owner: TypeParamOwner, args: &[TypeSymbol]) -> TypeSymbol {
        match &self.shape {
            TypeShape::TypeParameter {
                index, owner: o, ..
            } if *o == owner => match args.get(*index as usize) {
                Some(arg) => arg.clone().with_nullable(arg.nullable || self.nullable),
                None => self.clone(),
            },
            TypeShape::Named { def, args: inner } => TypeSymbol {
                shape: TypeShape::Named {
                    def: *def,
                    args: inner.iter().map(|a| a.substitute(owner, args)).collect(),
                },
                nullable: self.nullable,
            },
            TypeShape::Array { element, rank } => TypeSymbol {
                shape: TypeShape::Array {
                    element: Box::new(element.substitute(owner, args)),
                    rank: *rank,
                },
                nullable: self.nullable,
            },
            _ => self.clone(),
        }
    }
}

/// One syntactic declaration of a type; partial types have several.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub source: crate::SourceId,
    pub syntax: ast::TypeDecl,
}

impl Declaration {
    pub fn span(&self) -> Span {
        Span::new(self.source, self.syntax.as_cst().text_range())
    }
}

#[derive(Clone, Debug)]
pub struct TypeDef {
    pub name: String,
    /// Dotted namespace, empty for the global namespace.
    pub namespace: String,
    pub containing: Option<TypeDefId>,
    pub kind: TypeKind,
    pub is_record: bool,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_partial: bool,
    pub is_readonly: bool,
    pub type_params: Vec<String>,
    pub base_type: Option<TypeSymbol>,
    pub interfaces: Vec<TypeSymbol>,
    pub members: Vec<MemberSymbol>,
    pub nested: Vec<TypeDefId>,
    pub attributes: Vec<AttributeData>,
    pub declarations: Vec<Declaration>,
    /// Part of a built-in reference library rather than user source.
    pub is_metadata: bool,
}

impl TypeDef {
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// `List`1` style name of this definition alone.
    pub fn metadata_name(&self) -> String {
        if self.type_params.is_empty() {
            self.name.clone()
        } else {
            format!("{}`{}", self.name, self.type_params.len())
        }
    }

    /// Whether any declaration spells out a constructor.
    pub fn has_explicit_constructor(&self) -> bool {
        self.members.iter().any(|m| match &m.kind {
            MemberKind::Constructor(ctor) => !ctor.is_implicit,
            _ => false,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = (&MemberSymbol, &MethodSymbol)> {
        self.members.iter().filter_map(|m| match &m.kind {
            MemberKind::Constructor(ctor) => Some((m, ctor)),
            _ => None,
        })
    }

    pub fn enum_value(&self, member: &str) -> Option<i64> {
        self.members.iter().find_map(|m| match &m.kind {
            MemberKind::Field(field) if m.name == member => field.constant,
            _ => None,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MemberSymbol {
    pub name: String,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_override: bool,
    pub kind: MemberKind,
    pub attributes: Vec<AttributeData>,
    pub declaring_type: TypeDefId,
    pub span: Option<Span>,
}

#[derive(Clone, Debug)]
pub enum MemberKind {
    Field(FieldSymbol),
    Property(PropertySymbol),
    Method(MethodSymbol),
    Constructor(MethodSymbol),
}

#[derive(Clone, Debug)]
pub struct FieldSymbol {
    pub ty: TypeSymbol,
    pub is_readonly: bool,
    pub is_const: bool,
    /// Integral value of an enum member or an integer constant.
    pub constant: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accessor {
    pub accessibility: Accessibility,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Setter {
    pub accessibility: Accessibility,
    pub is_init: bool,
}

#[derive(Clone, Debug)]
pub struct PropertySymbol {
    pub ty: TypeSymbol,
    pub getter: Option<Accessor>,
    pub setter: Option<Setter>,
    pub is_required: bool,
}

impl PropertySymbol {
    pub fn has_public_getter(&self) -> bool {
        self.getter
            .is_some_and(|g| g.accessibility == Accessibility::Public)
    }

    pub fn has_public_setter(&self) -> bool {
        self.setter
            .is_some_and(|s| s.accessibility == Accessibility::Public)
    }
}

#[derive(Clone, Debug)]
pub struct MethodSymbol {
    pub type_params: Vec<String>,
    pub return_type: TypeSymbol,
    pub params: Vec<ParameterSymbol>,
    /// Constructor synthesized for a type that declares none.
    pub is_implicit: bool,
}

#[derive(Clone, Debug)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeSymbol,
    pub ref_kind: ast::RefKind,
    pub has_default: bool,
    pub is_params: bool,
    pub attributes: Vec<AttributeData>,
}

impl MemberSymbol {
    /// Declared type of a field or property, return type of a method.
    pub fn ty(&self) -> &TypeSymbol {
        match &self.kind {
            MemberKind::Field(f) => &f.ty,
            MemberKind::Property(p) => &p.ty,
            MemberKind::Method(m) | MemberKind::Constructor(m) => &m.return_type,
        }
    }

    pub fn as_property(&self) -> Option<&PropertySymbol> {
        match &self.kind {
            MemberKind::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodSymbol> {
        match &self.kind {
            MemberKind::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_public(&self) -> bool {
        self.accessibility == Accessibility::Public
    }

    /// Substitutes `owner`'s type parameters in every signature type.
    pub fn substitute(&self, owner: TypeParamOwner, args: &[TypeSymbol]) -> MemberSymbol {
        let mut member = self.clone();
        match &mut member.kind {
            MemberKind::Field(f) => f.ty = f.ty.substitute(owner, args),
            MemberKind::Property(p) => p.ty = p.ty.substitute(owner, args),
            MemberKind::Method(m) | MemberKind::Constructor(m) => {
                m.return_type = m.return_type.substitute(owner, args);
                for param in &mut m.params {
                    param.ty = param.ty.substitute(owner, args);
                }
            }
        }
        member
    }
}

/// An applied attribute with evaluated arguments.
#[derive(Clone, Debug)]
pub struct AttributeData {
    /// Constructed attribute class, e.g. `AotQueryTypeAttribute<Query>`.
    pub class: TypeSymbol,
    pub args: Vec<TypedConstant>,
    pub named_args: Vec<(String, TypedConstant)>,
    pub span: Span,
}

impl AttributeData {
    pub fn named_arg(&self, name: &str) -> Option<&TypedConstant> {
        self.named_args
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

/// A compile-time constant attribute argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedConstant {
    Type(TypeSymbol),
    Bool(bool),
    Int(i64),
    String(String),
    Enum { ty: TypeDefId, value: i64 },
    Null,
    Error,
}

impl TypedConstant {
    pub fn as_type(&self) -> Option<&TypeSymbol> {
        match self {
            TypedConstant::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedConstant::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integral value of an integer or enum constant.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TypedConstant::Int(v) | TypedConstant::Enum { value: v, .. } => Some(*v),
            _ => None,
        }
    }
}

/// All type definitions of a compilation, source and metadata alike.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    defs: Vec<TypeDef>,
    /// Top-level types by `(namespace, name, arity)`.
    top_level: IndexMap<(String, String, usize), TypeDefId>,
    namespaces: IndexSet<String>,
}

impl SymbolTable {
    pub fn get(&self, id: TypeDefId) -> &TypeDef {
        &self.defs[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: TypeDefId) -> &mut TypeDef {
        &mut self.defs[id.index()]
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TypeDefId> + use<> {
        (0..self.defs.len() as u32).map(TypeDefId::from_raw)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeDefId, &TypeDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeDefId::from_raw(i as u32), def))
    }

    pub(crate) fn insert(&mut self, def: TypeDef) -> TypeDefId {
        let id = TypeDefId::from_raw(self.defs.len() as u32);
        match def.containing {
            Some(outer) => self.defs[outer.index()].nested.push(id),
            None => {
                self.register_namespace(&def.namespace);
                self.top_level
                    .insert((def.namespace.clone(), def.name.clone(), def.arity()), id);
            }
        }
        self.defs.push(def);
        id
    }

    fn register_namespace(&mut self, namespace: &str) {
        let mut end = namespace.len();
        while end > 0 {
            let prefix = &namespace[..end];
            if !self.namespaces.insert(prefix.to_string()) {
                break;
            }
            end = prefix.rfind('.').unwrap_or(0);
        }
    }

    pub fn top_level_type(&self, namespace: &str, name: &str, arity: usize) -> Option<TypeDefId> {
        self.top_level
            .get(&(namespace.to_string(), name.to_string(), arity))
            .copied()
    }

    pub fn nested_type(&self, outer: TypeDefId, name: &str, arity: usize) -> Option<TypeDefId> {
        self.get(outer)
            .nested
            .iter()
            .copied()
            .find(|&id| {
                let def = self.get(id);
                def.name == name && def.arity() == arity
            })
    }

    /// Whether `namespace` (dotted) contains at least one type, directly or nested.
    pub fn is_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }
}
