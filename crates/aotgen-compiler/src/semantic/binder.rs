//! Declares source types and binds their headers, members and attributes.
//!
//! Binding runs in phases over every compilation unit:
//! 1. declare: one `TypeDef` per type, partial declarations merged
//! 2. headers: base types and interfaces
//! 3. enum members, so attribute arguments can refer to them
//! 4. members and attributes

use std::collections::HashMap;

use rowan::TextRange;

use super::symbols::{
    Accessibility, Accessor, AttributeData, Declaration, FieldSymbol, MemberKind, MemberSymbol,
    MethodSymbol, ParameterSymbol, PropertySymbol, Setter, SymbolTable, TypeDef, TypeDefId,
    TypeKind, TypeParamOwner, TypeShape, TypeSymbol, TypedConstant,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::parser::ast::{self, Item, Member, TypeDeclKind, TypeRef};
use crate::source_map::SourceId;

/// Predefined type keywords and the metadata names they stand for.
pub(crate) const PREDEFINED_TYPES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("sbyte", "System.SByte"),
    ("short", "System.Int16"),
    ("ushort", "System.UInt16"),
    ("int", "System.Int32"),
    ("uint", "System.UInt32"),
    ("long", "System.Int64"),
    ("ulong", "System.UInt64"),
    ("char", "System.Char"),
    ("float", "System.Single"),
    ("double", "System.Double"),
    ("decimal", "System.Decimal"),
    ("string", "System.String"),
    ("object", "System.Object"),
    ("void", "System.Void"),
];

/// One parsed source handed to the binder.
pub(crate) struct CompilationUnit {
    pub source: SourceId,
    pub root: ast::Root,
    pub is_metadata: bool,
}

pub(crate) struct BindOutput {
    pub table: SymbolTable,
    pub declared: HashMap<(SourceId, TextRange), TypeDefId>,
    pub diagnostics: Diagnostics,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) struct ScopeId(u32);

impl ScopeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
enum Using {
    Namespace(String),
    Alias { name: String, target: TypeRef },
}

/// A lexical namespace scope with the `using` directives declared in it.
#[derive(Clone, Debug)]
struct Scope {
    parent: Option<ScopeId>,
    namespace: String,
    usings: Vec<Using>,
}

/// Where a name is looked up.
#[derive(Clone, Copy)]
pub(super) struct Context<'m> {
    pub(super) scope: ScopeId,
    pub(super) type_def: Option<TypeDefId>,
    pub(super) method_type_params: &'m [String],
    pub(super) ignore_usings: bool,
}

impl Context<'_> {
    fn new(scope: ScopeId, type_def: Option<TypeDefId>) -> Self {
        Self {
            scope,
            type_def,
            method_type_params: &[],
            ignore_usings: false,
        }
    }
}

/// Result of a simple-name lookup.
pub(super) enum Found {
    Namespace(String),
    Def(TypeDefId),
    Type(TypeSymbol),
}

/// A name that failed to bind: where, and how it was written.
pub(super) struct Unresolved {
    pub range: TextRange,
    pub text: String,
}

pub(crate) fn bind(units: &[CompilationUnit]) -> BindOutput {
    let mut binder = Binder::default();
    for unit in units {
        binder.declare_unit(unit);
    }

    let ids: Vec<_> = binder.table.ids().collect();
    for &id in &ids {
        binder.bind_header(id);
    }
    for &id in &ids {
        if binder.table.get(id).kind == TypeKind::Enum {
            binder.bind_enum_members(id);
        }
    }
    for &id in &ids {
        binder.bind_members(id);
    }

    BindOutput {
        table: binder.table,
        declared: binder.declared,
        diagnostics: binder.diagnostics,
    }
}

#[derive(Default)]
pub(super) struct Binder {
    pub(super) table: SymbolTable,
    diagnostics: Diagnostics,
    scopes: Vec<Scope>,
    global_usings: Vec<Using>,
    /// Scope of each declaration, parallel to `TypeDef::declarations`.
    decl_scopes: Vec<Vec<ScopeId>>,
    declared: HashMap<(SourceId, TextRange), TypeDefId>,
}

impl Binder {
    // ---------------------------------------------------------------------
    // Phase 1: declarations
    // ---------------------------------------------------------------------

    fn declare_unit(&mut self, unit: &CompilationUnit) {
        let usings = self.collect_usings(unit.root.items());
        let scope = self.push_scope(None, String::new(), usings);
        self.declare_items(unit.root.items(), scope, unit);
    }

    fn push_scope(&mut self, parent: Option<ScopeId>, namespace: String, usings: Vec<Using>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            namespace,
            usings,
        });
        id
    }

    fn collect_usings(&mut self, items: impl Iterator<Item = Item>) -> Vec<Using> {
        let mut local = Vec::new();
        for item in items {
            let Item::Using(using) = item else { continue };
            if using.is_static() {
                continue;
            }
            let Some(target) = using.target() else { continue };
            let entry = match using.alias() {
                Some(alias) => Using::Alias {
                    name: alias.text().to_string(),
                    target,
                },
                None => Using::Namespace(
                    target.text().trim_start_matches("global::").to_string(),
                ),
            };
            if using.is_global() {
                self.global_usings.push(entry);
            } else {
                local.push(entry);
            }
        }
        local
    }

    fn declare_items(
        &mut self,
        items: impl Iterator<Item = Item>,
        scope: ScopeId,
        unit: &CompilationUnit,
    ) {
        for item in items {
            match item {
                Item::Using(_) => {}
                Item::Namespace(ns) => {
                    let name = ns.name().map(|n| n.text()).unwrap_or_default();
                    let namespace = join_namespace(&self.scopes[scope.index()].namespace, &name);
                    let usings = self.collect_usings(ns.items());
                    let inner = self.push_scope(Some(scope), namespace, usings);
                    self.declare_items(ns.items(), inner, unit);
                }
                Item::Type(decl) => self.declare_type(decl, scope, None, unit),
                Item::Delegate(decl) => self.declare_delegate(decl, scope, None, unit),
            }
        }
    }

    fn default_accessibility(&self, containing: Option<TypeDefId>) -> Accessibility {
        match containing {
            None => Accessibility::Internal,
            Some(outer) if self.table.get(outer).is_interface() => Accessibility::Public,
            Some(_) => Accessibility::Private,
        }
    }

    fn existing_type(&self, scope: ScopeId, containing: Option<TypeDefId>, name: &str, arity: usize) -> Option<TypeDefId> {
        match containing {
            Some(outer) => self.table.nested_type(outer, name, arity),
            None => {
                self.table
                    .top_level_type(&self.scopes[scope.index()].namespace, name, arity)
            }
        }
    }

    fn declare_type(
        &mut self,
        decl: ast::TypeDecl,
        scope: ScopeId,
        containing: Option<TypeDefId>,
        unit: &CompilationUnit,
    ) {
        let Some(name_token) = decl.name() else { return };
        let name = identifier(name_token.text());
        let type_params = type_param_names(decl.type_params());
        let modifiers = decl.modifiers();
        let has = |m: &str| modifiers.as_ref().is_some_and(|list| list.has(m));
        let is_partial = has("partial");
        let declaration = Declaration {
            source: unit.source,
            syntax: decl.clone(),
        };

        let id = match self.existing_type(scope, containing, &name, type_params.len()) {
            Some(id) if is_partial && self.table.get(id).is_partial => {
                let accessibility = Accessibility::from_modifiers(modifiers.as_ref());
                let def = self.table.get_mut(id);
                if let Some(accessibility) = accessibility {
                    def.accessibility = accessibility;
                }
                def.is_static |= has("static");
                def.is_abstract |= has("abstract");
                def.is_sealed |= has("sealed");
                def.declarations.push(declaration);
                id
            }
            Some(id) => {
                let first = self.table.get(id).declarations.first().map(Declaration::span);
                let mut report = self
                    .diagnostics
                    .report(unit.source, DiagnosticKind::DuplicateTypeDefinition, name_token.text_range())
                    .message(&name);
                if let Some(span) = first {
                    report = report.related_to("first defined here", span);
                }
                report.emit();
                return;
            }
            None => {
                let kind = match decl.kind() {
                    TypeDeclKind::Class => TypeKind::Class,
                    TypeDeclKind::Struct => TypeKind::Struct,
                    TypeDeclKind::Interface => TypeKind::Interface,
                    TypeDeclKind::Enum => TypeKind::Enum,
                };
                let def = TypeDef {
                    name,
                    namespace: self.scopes[scope.index()].namespace.clone(),
                    containing,
                    kind,
                    is_record: decl.is_record(),
                    accessibility: Accessibility::from_modifiers(modifiers.as_ref())
                        .unwrap_or_else(|| self.default_accessibility(containing)),
                    is_static: has("static"),
                    is_abstract: has("abstract"),
                    is_sealed: has("sealed"),
                    is_partial,
                    is_readonly: has("readonly"),
                    type_params,
                    base_type: None,
                    interfaces: Vec::new(),
                    members: Vec::new(),
                    nested: Vec::new(),
                    attributes: Vec::new(),
                    declarations: vec![declaration],
                    is_metadata: unit.is_metadata,
                };
                let id = self.table.insert(def);
                self.decl_scopes.push(Vec::new());
                id
            }
        };

        self.declared
            .insert((unit.source, decl.as_cst().text_range()), id);
        self.decl_scopes[id.index()].push(scope);

        for member in decl.members() {
            match member {
                Member::Type(nested) => self.declare_type(nested, scope, Some(id), unit),
                Member::Delegate(nested) => self.declare_delegate(nested, scope, Some(id), unit),
                _ => {}
            }
        }
    }

    fn declare_delegate(
        &mut self,
        decl: ast::DelegateDecl,
        scope: ScopeId,
        containing: Option<TypeDefId>,
        unit: &CompilationUnit,
    ) {
        let Some(name_token) = decl.name() else { return };
        let name = identifier(name_token.text());
        let type_params = type_param_names(decl.type_params());
        if self
            .existing_type(scope, containing, &name, type_params.len())
            .is_some()
        {
            self.diagnostics
                .report(unit.source, DiagnosticKind::DuplicateTypeDefinition, name_token.text_range())
                .message(&name)
                .emit();
            return;
        }

        let modifiers = decl.modifiers();
        let def = TypeDef {
            name,
            namespace: self.scopes[scope.index()].namespace.clone(),
            containing,
            kind: TypeKind::Delegate,
            is_record: false,
            accessibility: Accessibility::from_modifiers(modifiers.as_ref())
                .unwrap_or_else(|| self.default_accessibility(containing)),
            is_static: false,
            is_abstract: false,
            is_sealed: true,
            is_partial: false,
            is_readonly: false,
            type_params,
            base_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            attributes: Vec::new(),
            declarations: Vec::new(),
            is_metadata: unit.is_metadata,
        };
        self.table.insert(def);
        self.decl_scopes.push(Vec::new());
    }

    // ---------------------------------------------------------------------
    // Phase 2: base types
    // ---------------------------------------------------------------------

    fn bind_header(&mut self, id: TypeDefId) {
        let def = self.table.get(id);
        let kind = def.kind;
        let declarations = def.declarations.clone();
        let scopes = self.decl_scopes[id.index()].clone();

        let mut base_type = None;
        let mut interfaces: Vec<TypeSymbol> = Vec::new();
        for (decl, &scope) in declarations.iter().zip(&scopes) {
            let Some(list) = decl.syntax.base_list() else { continue };
            let ctx = Context::new(scope, Some(id));
            for (i, type_ref) in list.types().enumerate() {
                let ty = self.bind_type(&type_ref, &ctx, decl.source);
                if ty.is_error() || kind == TypeKind::Enum {
                    continue;
                }
                let is_class = ty
                    .def()
                    .is_some_and(|d| self.table.get(d).kind == TypeKind::Class);
                if kind == TypeKind::Class && i == 0 && is_class && base_type.is_none() {
                    base_type = Some(ty);
                } else if !interfaces.contains(&ty) {
                    interfaces.push(ty);
                }
            }
        }

        if base_type.is_none() {
            let def = self.table.get(id);
            let fallback = match kind {
                TypeKind::Class if !(def.namespace == "System" && def.name == "Object") => {
                    Some("Object")
                }
                TypeKind::Struct => Some("ValueType"),
                TypeKind::Enum => Some("Enum"),
                TypeKind::Delegate => Some("Delegate"),
                _ => None,
            };
            base_type = fallback
                .and_then(|name| self.table.top_level_type("System", name, 0))
                .map(|d| TypeSymbol::named(d, Vec::new()));
        }

        let def = self.table.get_mut(id);
        def.base_type = base_type;
        def.interfaces = interfaces;
    }

    // ---------------------------------------------------------------------
    // Phase 3: enum members
    // ---------------------------------------------------------------------

    fn bind_enum_members(&mut self, id: TypeDefId) {
        let declarations = self.table.get(id).declarations.clone();
        let scopes = self.decl_scopes[id.index()].clone();
        let enum_type = TypeSymbol::named(id, Vec::new());

        let mut next = 0i64;
        for (decl, &scope) in declarations.iter().zip(&scopes) {
            let ctx = Context::new(scope, Some(id));
            for member in decl.syntax.members() {
                let Member::EnumMember(member) = member else { continue };
                let Some(name) = member.name() else { continue };
                let value = match member.value() {
                    Some(expr) => {
                        let mut errors = Vec::new();
                        let value = self.eval_constant(&expr, &ctx, &mut errors).as_int();
                        self.report_unresolved(decl.source, errors);
                        value.unwrap_or(next)
                    }
                    None => next,
                };
                next = value.wrapping_add(1);
                let attributes = self.bind_attributes(member.attribute_lists(), &ctx, decl.source, &["field"]);
                let symbol = MemberSymbol {
                    name: identifier(name.text()),
                    accessibility: Accessibility::Public,
                    is_static: true,
                    is_override: false,
                    kind: MemberKind::Field(FieldSymbol {
                        ty: enum_type.clone(),
                        is_readonly: true,
                        is_const: true,
                        constant: Some(value),
                    }),
                    attributes,
                    declaring_type: id,
                    span: Some(Span::new(decl.source, name.text_range())),
                };
                self.table.get_mut(id).members.push(symbol);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Phase 4: members and attributes
    // ---------------------------------------------------------------------

    fn bind_members(&mut self, id: TypeDefId) {
        let def = self.table.get(id);
        let kind = def.kind;
        let is_record = def.is_record;
        let declarations = def.declarations.clone();
        let scopes = self.decl_scopes[id.index()].clone();

        let mut attributes = Vec::new();
        let mut members = Vec::new();
        for (decl, &scope) in declarations.iter().zip(&scopes) {
            let ctx = Context::new(scope, Some(id));
            attributes.extend(self.bind_attributes(
                decl.syntax.attribute_lists(),
                &ctx,
                decl.source,
                &["type"],
            ));
            if kind == TypeKind::Enum {
                continue;
            }
            for member in decl.syntax.members() {
                self.bind_member(id, &member, &ctx, decl.source, &mut members);
            }
            if let Some(params) = decl.syntax.param_list() {
                self.bind_primary_constructor(id, is_record, &params, &ctx, decl, &mut members);
            }
        }

        let has_ctor = |members: &[MemberSymbol], parameterless: bool| {
            members.iter().any(|m| match &m.kind {
                MemberKind::Constructor(ctor) => !parameterless || ctor.params.is_empty(),
                _ => false,
            })
        };
        let needs_implicit = match kind {
            TypeKind::Class => !self.table.get(id).is_static && !has_ctor(&members, false),
            TypeKind::Struct => !has_ctor(&members, true),
            _ => false,
        };
        if needs_implicit {
            members.push(MemberSymbol {
                name: ".ctor".to_string(),
                accessibility: if self.table.get(id).is_abstract {
                    Accessibility::Protected
                } else {
                    Accessibility::Public
                },
                is_static: false,
                is_override: false,
                kind: MemberKind::Constructor(MethodSymbol {
                    type_params: Vec::new(),
                    return_type: self.void_type(),
                    params: Vec::new(),
                    is_implicit: true,
                }),
                attributes: Vec::new(),
                declaring_type: id,
                span: None,
            });
        }

        let def = self.table.get_mut(id);
        def.attributes = attributes;
        def.members.extend(members);
    }

    fn bind_member(
        &mut self,
        id: TypeDefId,
        member: &Member,
        ctx: &Context,
        source: SourceId,
        out: &mut Vec<MemberSymbol>,
    ) {
        let in_interface = self.table.get(id).is_interface();
        let default_access = if in_interface {
            Accessibility::Public
        } else {
            Accessibility::Private
        };
        let access = |modifiers: Option<&ast::ModifierList>| {
            Accessibility::from_modifiers(modifiers).unwrap_or(default_access)
        };
        let has = |modifiers: &Option<ast::ModifierList>, m: &str| {
            modifiers.as_ref().is_some_and(|list| list.has(m))
        };

        match member {
            Member::Field(field) => {
                let modifiers = field.modifiers();
                let is_const = has(&modifiers, "const");
                let ty = match field.type_ref() {
                    Some(t) => self.bind_type(&t, ctx, source),
                    None => return,
                };
                let attributes = self.bind_attributes(field.attribute_lists(), ctx, source, &["field"]);
                for declarator in field.declarators() {
                    let Some(name) = declarator.name() else { continue };
                    let constant = if is_const {
                        declarator
                            .initializer()
                            .and_then(|init| init.expr())
                            .and_then(|expr| {
                                let mut errors = Vec::new();
                                self.eval_constant(&expr, ctx, &mut errors).as_int()
                            })
                    } else {
                        None
                    };
                    out.push(MemberSymbol {
                        name: identifier(name.text()),
                        accessibility: access(modifiers.as_ref()),
                        is_static: is_const || has(&modifiers, "static"),
                        is_override: false,
                        kind: MemberKind::Field(FieldSymbol {
                            ty: ty.clone(),
                            is_readonly: is_const || has(&modifiers, "readonly"),
                            is_const,
                            constant,
                        }),
                        attributes: attributes.clone(),
                        declaring_type: id,
                        span: Some(Span::new(source, name.text_range())),
                    });
                }
            }
            Member::Property(property) => {
                let Some(name) = property.name() else { return };
                let Some(type_ref) = property.type_ref() else { return };
                let modifiers = property.modifiers();
                let accessibility = access(modifiers.as_ref());
                let ty = self.bind_type(&type_ref, ctx, source);

                let mut getter = None;
                let mut setter = None;
                if property.has_expr_body() {
                    getter = Some(Accessor { accessibility });
                }
                for accessor in property.accessors() {
                    let Some(keyword) = accessor.keyword() else { continue };
                    let accessor_access = Accessibility::from_modifiers(accessor.modifiers().as_ref())
                        .unwrap_or(accessibility);
                    match keyword.text() {
                        "get" => getter = Some(Accessor { accessibility: accessor_access }),
                        "set" | "init" => {
                            setter = Some(Setter {
                                accessibility: accessor_access,
                                is_init: keyword.text() == "init",
                            })
                        }
                        _ => {}
                    }
                }

                let attributes =
                    self.bind_attributes(property.attribute_lists(), ctx, source, &["property"]);
                out.push(MemberSymbol {
                    name: identifier(name.text()),
                    accessibility,
                    is_static: has(&modifiers, "static"),
                    is_override: has(&modifiers, "override"),
                    kind: MemberKind::Property(PropertySymbol {
                        ty,
                        getter,
                        setter,
                        is_required: has(&modifiers, "required"),
                    }),
                    attributes,
                    declaring_type: id,
                    span: Some(Span::new(source, name.text_range())),
                });
            }
            Member::Method(method) => {
                let Some(name) = method.name() else { return };
                let modifiers = method.modifiers();
                let type_params = type_param_names(method.type_params());
                let method_ctx = Context {
                    scope: ctx.scope,
                    type_def: ctx.type_def,
                    method_type_params: &type_params,
                    ignore_usings: ctx.ignore_usings,
                };
                let return_type = match method.return_type() {
                    Some(t) => self.bind_type(&t, &method_ctx, source),
                    None => self.void_type(),
                };
                let params = match method.param_list() {
                    Some(list) => self.bind_params(&list, &method_ctx, source),
                    None => Vec::new(),
                };
                let attributes = self.bind_attributes(method.attribute_lists(), ctx, source, &["method"]);
                out.push(MemberSymbol {
                    name: identifier(name.text()),
                    accessibility: access(modifiers.as_ref()),
                    is_static: has(&modifiers, "static"),
                    is_override: has(&modifiers, "override"),
                    kind: MemberKind::Method(MethodSymbol {
                        type_params: type_params.clone(),
                        return_type,
                        params,
                        is_implicit: false,
                    }),
                    attributes,
                    declaring_type: id,
                    span: Some(Span::new(source, name.text_range())),
                });
            }
            Member::Ctor(ctor) => {
                let Some(name) = ctor.name() else { return };
                let modifiers = ctor.modifiers();
                if has(&modifiers, "static") || identifier(name.text()) != self.table.get(id).name {
                    return;
                }
                let params = match ctor.param_list() {
                    Some(list) => self.bind_params(&list, ctx, source),
                    None => Vec::new(),
                };
                let attributes = self.bind_attributes(ctor.attribute_lists(), ctx, source, &["method"]);
                out.push(MemberSymbol {
                    name: ".ctor".to_string(),
                    accessibility: Accessibility::from_modifiers(modifiers.as_ref())
                        .unwrap_or(Accessibility::Private),
                    is_static: false,
                    is_override: false,
                    kind: MemberKind::Constructor(MethodSymbol {
                        type_params: Vec::new(),
                        return_type: self.void_type(),
                        params,
                        is_implicit: false,
                    }),
                    attributes,
                    declaring_type: id,
                    span: Some(Span::new(source, name.text_range())),
                });
            }
            Member::EnumMember(_) | Member::Type(_) | Member::Delegate(_) => {}
        }
    }

    /// Primary constructor; records also get one init-only property per parameter.
    fn bind_primary_constructor(
        &mut self,
        id: TypeDefId,
        is_record: bool,
        list: &ast::ParamList,
        ctx: &Context,
        decl: &Declaration,
        out: &mut Vec<MemberSymbol>,
    ) {
        let params = self.bind_params(list, ctx, decl.source);

        if is_record {
            let def = self.table.get(id);
            let init_only = def.kind == TypeKind::Class || def.is_readonly;
            for (syntax, param) in list.params().zip(&params) {
                let declared = out.iter().any(|m| m.name == param.name);
                if declared {
                    continue;
                }
                let attributes =
                    self.bind_attributes_with_target(syntax.attribute_lists(), ctx, decl.source, "property");
                out.push(MemberSymbol {
                    name: param.name.clone(),
                    accessibility: Accessibility::Public,
                    is_static: false,
                    is_override: false,
                    kind: MemberKind::Property(PropertySymbol {
                        ty: param.ty.clone(),
                        getter: Some(Accessor {
                            accessibility: Accessibility::Public,
                        }),
                        setter: Some(Setter {
                            accessibility: Accessibility::Public,
                            is_init: init_only,
                        }),
                        is_required: false,
                    }),
                    attributes,
                    declaring_type: id,
                    span: syntax.name().map(|n| Span::new(decl.source, n.text_range())),
                });
            }
        }

        out.push(MemberSymbol {
            name: ".ctor".to_string(),
            accessibility: Accessibility::Public,
            is_static: false,
            is_override: false,
            kind: MemberKind::Constructor(MethodSymbol {
                type_params: Vec::new(),
                return_type: self.void_type(),
                params,
                is_implicit: false,
            }),
            attributes: Vec::new(),
            declaring_type: id,
            span: decl
                .syntax
                .name()
                .map(|n| Span::new(decl.source, n.text_range())),
        });
    }

    fn bind_params(&mut self, list: &ast::ParamList, ctx: &Context, source: SourceId) -> Vec<ParameterSymbol> {
        let mut params = Vec::new();
        for param in list.params() {
            let Some(name) = param.name() else { continue };
            let ty = match param.type_ref() {
                Some(t) => self.bind_type(&t, ctx, source),
                None => TypeSymbol::error(""),
            };
            let attributes = self.bind_attributes(param.attribute_lists(), ctx, source, &["param"]);
            params.push(ParameterSymbol {
                name: identifier(name.text()),
                ty,
                ref_kind: param.ref_kind(),
                has_default: param.has_default(),
                is_params: param.is_params(),
                attributes,
            });
        }
        params
    }

    fn void_type(&self) -> TypeSymbol {
        self.table
            .top_level_type("System", "Void", 0)
            .map(|d| TypeSymbol::named(d, Vec::new()))
            .unwrap_or_else(|| TypeSymbol::error("void"))
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    /// Binds attribute lists with no target or one of `targets`.
    fn bind_attributes(
        &mut self,
        lists: impl Iterator<Item = ast::AttributeList>,
        ctx: &Context,
        source: SourceId,
        targets: &[&str],
    ) -> Vec<AttributeData> {
        let mut out = Vec::new();
        for list in lists {
            let applies = match list.target() {
                None => true,
                Some(target) => targets.contains(&target.as_str()),
            };
            if applies {
                self.bind_attribute_list(&list, ctx, source, &mut out);
            }
        }
        out
    }

    /// Binds only the attribute lists that carry exactly `target`.
    fn bind_attributes_with_target(
        &mut self,
        lists: impl Iterator<Item = ast::AttributeList>,
        ctx: &Context,
        source: SourceId,
        target: &str,
    ) -> Vec<AttributeData> {
        let mut out = Vec::new();
        for list in lists {
            if list.target().as_deref() == Some(target) {
                self.bind_attribute_list(&list, ctx, source, &mut out);
            }
        }
        out
    }

    fn bind_attribute_list(
        &mut self,
        list: &ast::AttributeList,
        ctx: &Context,
        source: SourceId,
        out: &mut Vec<AttributeData>,
    ) {
        for attribute in list.attributes() {
            let Some(name) = attribute.name() else { continue };

            // `[Foo]` means `FooAttribute` when that exists, else `Foo`.
            let mut errors = Vec::new();
            let mut class = self.resolve_type(&name, ctx, Some("Attribute"), &mut errors);
            if class.is_error() {
                errors.clear();
                class = self.resolve_type(&name, ctx, None, &mut errors);
            }
            self.report_unresolved(source, errors);
            if class.is_error() {
                continue;
            }

            let mut args = Vec::new();
            let mut named_args = Vec::new();
            for arg in attribute.args() {
                let mut errors = Vec::new();
                let value = match arg.value() {
                    Some(expr) => self.eval_constant(&expr, ctx, &mut errors),
                    None => TypedConstant::Error,
                };
                self.report_unresolved(source, errors);
                match arg.name_equals() {
                    Some(name) => named_args.push((identifier(name.text()), value)),
                    None => args.push(value),
                }
            }

            out.push(AttributeData {
                class,
                args,
                named_args,
                span: Span::new(source, attribute.as_cst().text_range()),
            });
        }
    }

    // ---------------------------------------------------------------------
    // Type binding and lookup
    // ---------------------------------------------------------------------

    /// Binds a type reference, reporting names that fail to resolve.
    fn bind_type(&mut self, type_ref: &TypeRef, ctx: &Context, source: SourceId) -> TypeSymbol {
        let mut errors = Vec::new();
        let ty = self.resolve_type(type_ref, ctx, None, &mut errors);
        self.report_unresolved(source, errors);
        ty
    }

    fn report_unresolved(&mut self, source: SourceId, errors: Vec<Unresolved>) {
        for error in errors {
            self.diagnostics
                .report(source, DiagnosticKind::UnresolvedType, error.range)
                .message(error.text)
                .emit();
        }
    }

    /// Resolves a type without reporting; failures are collected into `errors`.
    ///
    /// `suffix` is appended to the rightmost simple name (attribute lookup).
    pub(super) fn resolve_type(
        &self,
        type_ref: &TypeRef,
        ctx: &Context,
        suffix: Option<&str>,
        errors: &mut Vec<Unresolved>,
    ) -> TypeSymbol {
        match type_ref {
            TypeRef::Predefined(predefined) => {
                let keyword = predefined
                    .keyword()
                    .map(|k| k.text().to_string())
                    .unwrap_or_default();
                self.predefined_type(&keyword)
                    .unwrap_or_else(|| TypeSymbol::error(keyword))
            }
            TypeRef::Array(array) => {
                let element = match array.element() {
                    Some(element) => self.resolve_type(&element, ctx, None, errors),
                    None => TypeSymbol::error(""),
                };
                array
                    .ranks()
                    .into_iter()
                    .rev()
                    .fold(element, TypeSymbol::array)
            }
            TypeRef::Nullable(nullable) => {
                let inner = match nullable.inner() {
                    Some(inner) => self.resolve_type(&inner, ctx, None, errors),
                    None => TypeSymbol::error(""),
                };
                self.make_nullable(inner)
            }
            TypeRef::Tuple(_) => TypeSymbol::error(type_ref.text()),
            TypeRef::Simple(_) | TypeRef::Qualified(_) | TypeRef::AliasQualified(_) => {
                match self.resolve_namespace_or_type(type_ref, ctx, suffix, errors) {
                    Some(Found::Type(ty)) => ty,
                    Some(Found::Def(def)) => TypeSymbol::named(def, Vec::new()),
                    Some(Found::Namespace(_)) => {
                        errors.push(Unresolved {
                            range: type_ref.as_cst().text_range(),
                            text: type_ref.text(),
                        });
                        TypeSymbol::error(type_ref.text())
                    }
                    None => TypeSymbol::error(type_ref.text()),
                }
            }
        }
    }

    pub(super) fn predefined_type(&self, keyword: &str) -> Option<TypeSymbol> {
        let (_, metadata_name) = PREDEFINED_TYPES.iter().find(|(k, _)| *k == keyword)?;
        let (namespace, name) = metadata_name.rsplit_once('.')?;
        self.table
            .top_level_type(namespace, name, 0)
            .map(|d| TypeSymbol::named(d, Vec::new()))
    }

    /// `T?`: `Nullable<T>` for value types, an annotation otherwise.
    fn make_nullable(&self, inner: TypeSymbol) -> TypeSymbol {
        let value_type = inner
            .def()
            .is_some_and(|d| self.table.get(d).is_value_type());
        let nullable_def = self.table.top_level_type("System", "Nullable", 1);
        match nullable_def {
            Some(nullable) if value_type && inner.def() != Some(nullable) => {
                TypeSymbol::named(nullable, vec![inner])
            }
            _ => inner.with_nullable(true),
        }
    }

    fn resolve_namespace_or_type(
        &self,
        type_ref: &TypeRef,
        ctx: &Context,
        suffix: Option<&str>,
        errors: &mut Vec<Unresolved>,
    ) -> Option<Found> {
        let unresolved = |errors: &mut Vec<Unresolved>| {
            errors.push(Unresolved {
                range: type_ref.as_cst().text_range(),
                text: type_ref.text(),
            });
        };

        let (left, simple) = match type_ref {
            TypeRef::Simple(simple) => (None, simple.clone()),
            TypeRef::Qualified(qualified) => {
                let left = qualified.left()?;
                let right = qualified.right()?;
                let left = self.resolve_namespace_or_type(&left, ctx, None, errors)?;
                (Some(left), right)
            }
            TypeRef::AliasQualified(aliased) => {
                let alias = aliased.alias()?;
                let right = aliased.name()?;
                if alias.text() != "global" {
                    unresolved(errors);
                    return None;
                }
                (Some(Found::Namespace(String::new())), right)
            }
            _ => return Some(Found::Type(self.resolve_type(type_ref, ctx, suffix, errors))),
        };

        let name = match simple.name() {
            Some(token) => format!("{}{}", identifier(token.text()), suffix.unwrap_or("")),
            None => return None,
        };
        let type_args = simple.type_args();
        let arity = type_args.as_ref().map_or(0, |list| list.arity());
        let args: Option<Vec<TypeSymbol>> = match &type_args {
            Some(list) if !list.is_unbound() => Some(
                list.types()
                    .map(|t| self.resolve_type(&t, ctx, None, errors))
                    .collect(),
            ),
            _ => None,
        };

        let found = match left {
            None => self.lookup_simple(&name, arity, ctx),
            Some(left) => self.lookup_member(&left, &name, arity),
        };
        let Some(found) = found else {
            unresolved(errors);
            return None;
        };

        Some(match found {
            Found::Def(def) => {
                let args = args.unwrap_or_else(|| self.own_type_arguments(def));
                Found::Type(TypeSymbol::named(def, args))
            }
            other => other,
        })
    }

    /// The definition's own type parameters as type arguments (unbound generic).
    pub(super) fn own_type_arguments(&self, def: TypeDefId) -> Vec<TypeSymbol> {
        self.table
            .get(def)
            .type_params
            .iter()
            .enumerate()
            .map(|(i, name)| TypeSymbol {
                shape: TypeShape::TypeParameter {
                    name: name.clone(),
                    index: i as u32,
                    owner: TypeParamOwner::Type(def),
                },
                nullable: false,
            })
            .collect()
    }

    /// C# simple-name lookup: type parameters, nested types along the
    /// containing chain (and their bases), then namespaces and `using`s.
    pub(super) fn lookup_simple(&self, name: &str, arity: usize, ctx: &Context) -> Option<Found> {
        if arity == 0 {
            if let Some(index) = ctx.method_type_params.iter().position(|p| p == name) {
                let owner = ctx.type_def?;
                return Some(Found::Type(TypeSymbol {
                    shape: TypeShape::TypeParameter {
                        name: name.to_string(),
                        index: index as u32,
                        owner: TypeParamOwner::Method(owner),
                    },
                    nullable: false,
                }));
            }
        }

        let mut current = ctx.type_def;
        while let Some(id) = current {
            let def = self.table.get(id);
            if arity == 0 {
                if let Some(index) = def.type_params.iter().position(|p| p == name) {
                    return Some(Found::Type(TypeSymbol {
                        shape: TypeShape::TypeParameter {
                            name: name.to_string(),
                            index: index as u32,
                            owner: TypeParamOwner::Type(id),
                        },
                        nullable: false,
                    }));
                }
            }
            if let Some(nested) = self.nested_in_hierarchy(id, name, arity) {
                return Some(Found::Def(nested));
            }
            current = def.containing;
        }

        let mut scope = Some(ctx.scope);
        while let Some(id) = scope {
            let current = &self.scopes[id.index()];
            let parent_namespace = current
                .parent
                .map(|p| self.scopes[p.index()].namespace.as_str());
            for (level, namespace) in namespace_levels(&current.namespace, parent_namespace)
                .into_iter()
                .enumerate()
            {
                if let Some(found) = self.lookup_in_namespace(&namespace, name, arity) {
                    return Some(found);
                }
                if level > 0 || ctx.ignore_usings {
                    continue;
                }
                if let Some(found) = self.lookup_in_usings(&current.usings, id, name, arity) {
                    return Some(found);
                }
                if current.parent.is_none() {
                    if let Some(found) = self.lookup_in_usings(&self.global_usings, id, name, arity) {
                        return Some(found);
                    }
                }
            }
            scope = current.parent;
        }
        None
    }

    fn lookup_in_namespace(&self, namespace: &str, name: &str, arity: usize) -> Option<Found> {
        if let Some(def) = self.table.top_level_type(namespace, name, arity) {
            return Some(Found::Def(def));
        }
        let nested = join_namespace(namespace, name);
        (arity == 0 && self.table.is_namespace(&nested)).then_some(Found::Namespace(nested))
    }

    fn lookup_in_usings(&self, usings: &[Using], scope: ScopeId, name: &str, arity: usize) -> Option<Found> {
        if arity == 0 {
            for using in usings {
                let Using::Alias { name: alias, target } = using else { continue };
                if alias != name {
                    continue;
                }
                let parent = self.scopes[scope.index()].parent;
                let ctx = Context {
                    scope: parent.unwrap_or(scope),
                    type_def: None,
                    method_type_params: &[],
                    ignore_usings: parent.is_none(),
                };
                let mut ignored = Vec::new();
                return match target {
                    TypeRef::Simple(_) | TypeRef::Qualified(_) | TypeRef::AliasQualified(_) => {
                        self.resolve_namespace_or_type(target, &ctx, None, &mut ignored)
                    }
                    _ => Some(Found::Type(self.resolve_type(target, &ctx, None, &mut ignored))),
                };
            }
        }
        usings.iter().find_map(|using| match using {
            Using::Namespace(namespace) => self
                .table
                .top_level_type(namespace, name, arity)
                .map(Found::Def),
            Using::Alias { .. } => None,
        })
    }

    pub(super) fn lookup_member(&self, left: &Found, name: &str, arity: usize) -> Option<Found> {
        match left {
            Found::Namespace(namespace) => self.lookup_in_namespace(namespace, name, arity),
            Found::Def(def) => self.nested_in_hierarchy(*def, name, arity).map(Found::Def),
            Found::Type(ty) => {
                let def = ty.def()?;
                self.nested_in_hierarchy(def, name, arity).map(Found::Def)
            }
        }
    }

    /// Nested type of `id` or of one of its base classes.
    fn nested_in_hierarchy(&self, id: TypeDefId, name: &str, arity: usize) -> Option<TypeDefId> {
        let mut current = Some(id);
        for _ in 0..MAX_BASE_DEPTH {
            let def_id = current?;
            if let Some(nested) = self.table.nested_type(def_id, name, arity) {
                return Some(nested);
            }
            current = self.table.get(def_id).base_type.as_ref().and_then(TypeSymbol::def);
        }
        None
    }
}

/// Guards base-type walks against cyclic declarations.
pub(crate) const MAX_BASE_DEPTH: usize = 64;

/// `@class` names the identifier `class`.
fn identifier(text: &str) -> String {
    text.trim_start_matches('@').to_string()
}

fn type_param_names(list: Option<ast::TypeParamList>) -> Vec<String> {
    list.map(|list| {
        list.params()
            .filter_map(|p| p.name())
            .map(|t| identifier(t.text()))
            .collect()
    })
    .unwrap_or_default()
}

fn join_namespace(outer: &str, inner: &str) -> String {
    match (outer.is_empty(), inner.is_empty()) {
        (true, _) => inner.to_string(),
        (_, true) => outer.to_string(),
        _ => format!("{outer}.{inner}"),
    }
}

/// Namespaces searched by one scope, innermost first: `A.B` inside the
/// global scope searches `A.B` then `A`; the global scope searches `""`.
fn namespace_levels(namespace: &str, parent: Option<&str>) -> Vec<String> {
    let Some(parent) = parent else {
        return vec![namespace.to_string()];
    };
    let mut levels = Vec::new();
    let mut current = namespace;
    while current.len() > parent.len() {
        levels.push(current.to_string());
        current = current.rfind('.').map_or("", |i| &current[..i]);
    }
    levels
}
