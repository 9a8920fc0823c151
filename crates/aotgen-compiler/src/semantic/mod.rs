//! Semantic model over parsed C# sources.
//!
//! A [`Compilation`] owns the source map, the syntax trees, and the bound
//! [`SymbolTable`]. Built-in reference libraries are added as metadata
//! sources and bound together with user code, so the whole pipeline reasons
//! over one uniform symbol model.

mod binder;
mod constant;
mod display;
mod metadata;
mod symbols;

#[cfg(test)]
mod binder_tests;

use std::collections::HashMap;

use indexmap::IndexSet;
use rowan::TextRange;

pub use metadata::MetadataReferences;
pub use symbols::{
    Accessibility, Accessor, AttributeData, Declaration, FieldSymbol, MemberKind, MemberSymbol,
    MethodSymbol, ParameterSymbol, PropertySymbol, Setter, SymbolTable, TypeDef, TypeDefId,
    TypeKind, TypeParamOwner, TypeShape, TypeSymbol, TypedConstant,
};

use crate::Result;
use crate::diagnostics::Diagnostics;
use crate::parser::lexer::lex;
use crate::parser::{self, DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, Parse, Parser, ast};
use crate::source_map::{SourceId, SourceMap};
use binder::{CompilationUnit, MAX_BASE_DEPTH};

/// Builds a [`Compilation`] from user sources.
#[derive(Debug)]
pub struct CompilationBuilder {
    sources: SourceMap,
    references: MetadataReferences,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl CompilationBuilder {
    pub fn new(sources: SourceMap) -> Self {
        Self {
            sources,
            references: MetadataReferences::default(),
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    pub fn with_references(mut self, references: MetadataReferences) -> Self {
        self.references = references;
        self
    }

    /// Set execution fuel limit per user source. None = infinite.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Set recursion depth limit per user source. None = infinite.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Parses every source and binds the result.
    ///
    /// Syntax and binding problems end up in [`Compilation::diagnostics`];
    /// only fuel exhaustion aborts.
    pub fn build(self) -> Result<Compilation> {
        let mut sources = self.sources;
        let user: Vec<SourceId> = sources.iter().map(|s| s.id).collect();
        let mut metadata = Vec::new();
        for (name, content) in self.references.libraries() {
            metadata.push(sources.add_metadata(name, content));
        }

        let mut diagnostics = Diagnostics::new();
        let mut trees = Vec::new();
        for &id in metadata.iter().chain(&user) {
            let content = sources.content(id);
            let (exec_fuel, recursion_fuel) = if sources.kind(id).is_metadata() {
                (Some(DEFAULT_EXEC_FUEL), Some(DEFAULT_RECURSION_FUEL))
            } else {
                (self.exec_fuel, self.recursion_fuel)
            };
            let parser = Parser::new(content, id, lex(content))
                .with_exec_fuel(exec_fuel)
                .with_recursion_fuel(recursion_fuel);
            let (parse, parse_diagnostics) = parser::parse_with_parser(parser)?;
            diagnostics.extend(parse_diagnostics);
            trees.push((id, parse));
        }

        let units: Vec<CompilationUnit> = trees
            .iter()
            .filter_map(|(id, parse)| {
                Some(CompilationUnit {
                    source: *id,
                    root: parse.root()?,
                    is_metadata: sources.kind(*id).is_metadata(),
                })
            })
            .collect();
        let bound = binder::bind(&units);
        diagnostics.extend(bound.diagnostics);

        tracing::debug!(
            sources = user.len(),
            types = bound.table.len(),
            diagnostics = diagnostics.len(),
            "compilation bound"
        );

        Ok(Compilation {
            sources,
            trees,
            table: bound.table,
            declared: bound.declared,
            diagnostics,
            references: self.references,
        })
    }
}

/// Parsed and bound sources plus the reference libraries.
#[derive(Debug)]
pub struct Compilation {
    sources: SourceMap,
    trees: Vec<(SourceId, Parse)>,
    table: SymbolTable,
    declared: HashMap<(SourceId, TextRange), TypeDefId>,
    diagnostics: Diagnostics,
    references: MetadataReferences,
}

impl Compilation {
    pub fn source_map(&self) -> &SourceMap {
        &self.sources
    }

    /// Parse and bind diagnostics.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn references(&self) -> MetadataReferences {
        self.references
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }

    pub fn def(&self, id: TypeDefId) -> &TypeDef {
        self.table.get(id)
    }

    /// Roots of user source trees, in source order.
    pub fn syntax_roots(&self) -> impl Iterator<Item = (SourceId, ast::Root)> + '_ {
        self.trees
            .iter()
            .filter(|(id, _)| !self.sources.kind(*id).is_metadata())
            .filter_map(|(id, parse)| Some((*id, parse.root()?)))
    }

    /// Looks up `Ns.Name`1+Nested` style metadata names.
    pub fn get_type_by_metadata_name(&self, name: &str) -> Option<TypeDefId> {
        let mut parts = name.split('+');
        let first = parts.next()?;
        let (namespace, simple) = first.rsplit_once('.').unwrap_or(("", first));
        let (simple, arity) = split_arity(simple);
        let mut id = self.table.top_level_type(namespace, simple, arity)?;
        for nested in parts {
            let (simple, arity) = split_arity(nested);
            id = self.table.nested_type(id, simple, arity)?;
        }
        Some(id)
    }

    /// The definition declared by a type declaration node.
    pub fn declared_type(&self, source: SourceId, decl: &ast::TypeDecl) -> Option<TypeDefId> {
        self.declared
            .get(&(source, decl.as_cst().text_range()))
            .copied()
    }

    /// A definition applied to its own type parameters.
    pub fn type_of(&self, id: TypeDefId) -> TypeSymbol {
        let args = (0..self.def(id).arity() as u32)
            .map(|index| TypeSymbol {
                shape: TypeShape::TypeParameter {
                    name: self.def(id).type_params[index as usize].clone(),
                    index,
                    owner: TypeParamOwner::Type(id),
                },
                nullable: false,
            })
            .collect();
        TypeSymbol::named(id, args)
    }

    /// Direct base class with this type's arguments substituted in.
    pub fn base_type(&self, ty: &TypeSymbol) -> Option<TypeSymbol> {
        match &ty.shape {
            TypeShape::Named { def, args } => self
                .def(*def)
                .base_type
                .as_ref()
                .map(|base| base.substitute(TypeParamOwner::Type(*def), args)),
            TypeShape::Array { .. } => self
                .get_type_by_metadata_name("System.Array")
                .map(|d| TypeSymbol::named(d, Vec::new())),
            _ => None,
        }
    }

    /// Base classes from the direct base up to `object`.
    pub fn base_types(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut out = Vec::new();
        let mut current = self.base_type(ty);
        while let Some(base) = current {
            if out.len() >= MAX_BASE_DEPTH || out.contains(&base) {
                break;
            }
            current = self.base_type(&base);
            out.push(base);
        }
        out
    }

    /// Every interface implemented by the type, its bases, and their interfaces.
    pub fn all_interfaces(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut seen = IndexSet::new();
        let mut chain = vec![ty.clone()];
        chain.extend(self.base_types(ty));
        for t in &chain {
            self.collect_interfaces(t, &mut seen);
        }
        seen.into_iter().collect()
    }

    fn collect_interfaces(&self, ty: &TypeSymbol, seen: &mut IndexSet<TypeSymbol>) {
        let TypeShape::Named { def, args } = &ty.shape else {
            return;
        };
        for interface in &self.def(*def).interfaces {
            let interface = interface.substitute(TypeParamOwner::Type(*def), args);
            if seen.insert(interface.clone()) {
                self.collect_interfaces(&interface, seen);
            }
        }
    }

    /// The type itself, a base class or an interface constructed from `def`.
    pub fn find_ancestor(&self, ty: &TypeSymbol, def: TypeDefId) -> Option<TypeSymbol> {
        if ty.def() == Some(def) {
            return Some(ty.clone());
        }
        self.base_types(ty)
            .into_iter()
            .chain(self.all_interfaces(ty))
            .find(|t| t.def() == Some(def))
    }

    /// Identity or reference conversion from `from` to `to`.
    pub fn is_assignable_to(&self, from: &TypeSymbol, to: &TypeSymbol) -> bool {
        from == to
            || self.base_types(from).contains(to)
            || self.all_interfaces(from).contains(to)
    }

    /// Whether any construction of `def` is among the type's ancestors.
    pub fn derives_from(&self, ty: &TypeSymbol, def: TypeDefId) -> bool {
        self.find_ancestor(ty, def).is_some()
    }

    pub fn is_value_type(&self, ty: &TypeSymbol) -> bool {
        ty.def().is_some_and(|d| self.def(d).is_value_type())
    }

    pub fn is_enum(&self, ty: &TypeSymbol) -> bool {
        ty.def().is_some_and(|d| self.def(d).kind == TypeKind::Enum)
    }

    /// Members of the type and everything it inherits, derived members first.
    ///
    /// Interfaces contribute the members of every inherited interface; classes
    /// contribute their base chain. Inherited constructors are skipped and a
    /// member hidden by a more derived one of the same signature is dropped.
    pub fn members_of(&self, ty: &TypeSymbol) -> Vec<MemberSymbol> {
        let mut chain = vec![ty.clone()];
        match ty.def() {
            Some(def) if self.def(def).is_interface() => chain.extend(self.all_interfaces(ty)),
            Some(_) => chain.extend(self.base_types(ty)),
            None => return Vec::new(),
        }

        let mut seen = IndexSet::new();
        let mut out = Vec::new();
        for (depth, t) in chain.iter().enumerate() {
            let TypeShape::Named { def, args } = &t.shape else {
                continue;
            };
            for member in &self.def(*def).members {
                if depth > 0 && matches!(member.kind, MemberKind::Constructor(_)) {
                    continue;
                }
                let member = member.substitute(TypeParamOwner::Type(*def), args);
                if seen.insert(MemberKey::of(&member)) {
                    out.push(member);
                }
            }
        }
        out
    }
}

/// Signature used to hide inherited members.
#[derive(PartialEq, Eq, Hash)]
enum MemberKey {
    Value(String),
    Method(String, Vec<TypeSymbol>),
    Constructor(Vec<TypeSymbol>),
}

impl MemberKey {
    fn of(member: &MemberSymbol) -> Self {
        let params = |m: &MethodSymbol| m.params.iter().map(|p| p.ty.clone()).collect();
        match &member.kind {
            MemberKind::Field(_) | MemberKind::Property(_) => MemberKey::Value(member.name.clone()),
            MemberKind::Method(m) => MemberKey::Method(member.name.clone(), params(m)),
            MemberKind::Constructor(m) => MemberKey::Constructor(params(m)),
        }
    }
}

fn split_arity(name: &str) -> (&str, usize) {
    match name.split_once('`') {
        Some((simple, arity)) => (simple, arity.parse().unwrap_or(0)),
        None => (name, 0),
    }
}
