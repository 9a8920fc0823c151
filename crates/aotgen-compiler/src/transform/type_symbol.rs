//! Member scanner for a single CLR type.
//!
//! Selects the members that become graph fields and collects everything they
//! reference: CLR types that still need a graph type, explicit graph types from
//! member attributes, and collection types an input parser has to materialize.

use std::ops::BitOr;

use indexmap::IndexSet;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::discover::KnownSymbols;
use crate::parser::ast::RefKind;
use crate::semantic::{
    AttributeData, Compilation, MemberKind, MemberSymbol, MethodSymbol, ParameterSymbol,
    TypeDefId, TypeShape, TypeSymbol, TypedConstant,
};

/// Member kinds a scan looks at. Bit values match `GraphQL.ScanMemberTypes`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScanMemberTypes(u8);

impl ScanMemberTypes {
    pub const PROPERTIES: Self = Self(1);
    pub const FIELDS: Self = Self(2);
    pub const METHODS: Self = Self(4);

    /// Unknown bits are dropped.
    pub fn from_bits(bits: i64) -> Self {
        Self((bits & 0b111) as u8)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Properties and methods for output types, properties for input types.
    pub fn default_for(is_input: bool) -> Self {
        if is_input {
            Self::PROPERTIES
        } else {
            Self::PROPERTIES | Self::METHODS
        }
    }
}

impl BitOr for ScanMemberTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Explicit graph type attached to a member or parameter.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum GraphTypeOverride {
    /// Replaces the whole field type.
    Type(TypeSymbol),
    /// Replaces the leaf; list and non-null wrappers are still inferred.
    Base(TypeSymbol),
}

impl GraphTypeOverride {
    pub fn graph_type(&self) -> &TypeSymbol {
        match self {
            GraphTypeOverride::Type(ty) | GraphTypeOverride::Base(ty) => ty,
        }
    }
}

/// Method parameter supplied by the resolver instead of a field argument.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum InjectedParameter {
    Context,
    CancellationToken,
    Services,
    Source,
    UserContext,
}

#[derive(Clone, Debug)]
pub struct ScannedParameter {
    pub param: ParameterSymbol,
    pub injected: Option<InjectedParameter>,
    pub graph_type: Option<GraphTypeOverride>,
}

/// A selected member with its resolved overrides.
#[derive(Clone, Debug)]
pub struct ScannedMember {
    pub member: MemberSymbol,
    pub graph_type: Option<GraphTypeOverride>,
    /// Method or constructor parameters, in declaration order.
    pub params: Vec<ScannedParameter>,
}

/// Everything one scan found, deduplicated in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct TypeScanResult {
    pub discovered_input_clr_types: IndexSet<TypeSymbol>,
    pub discovered_output_clr_types: IndexSet<TypeSymbol>,
    pub discovered_graph_types: IndexSet<TypeSymbol>,
    pub input_list_types: IndexSet<TypeSymbol>,
    pub selected_members: Vec<ScannedMember>,
    /// Constructor used to build an input object.
    pub constructor: Option<ScannedMember>,
}

/// Scans the members of `ty`.
///
/// Returns `None` for types that cannot be scanned: open generics, arrays,
/// type parameters and unresolved names. `scan` overrides both the
/// `[MemberScan]` attribute and the direction default.
pub fn transform(
    compilation: &Compilation,
    known: &KnownSymbols,
    ty: &TypeSymbol,
    is_input: bool,
    scan: Option<ScanMemberTypes>,
    diagnostics: &mut Diagnostics,
) -> Option<TypeScanResult> {
    let TypeShape::Named { def, .. } = &ty.shape else {
        return None;
    };
    if ty.is_open() {
        return None;
    }

    let scan = scan
        .or_else(|| member_scan_attribute(compilation, known, *def))
        .unwrap_or_else(|| ScanMemberTypes::default_for(is_input));

    let mut scanner = Scanner {
        compilation,
        known,
        result: TypeScanResult::default(),
    };
    let members = compilation.members_of(ty);

    if is_input {
        scanner.scan_input(ty, *def, &members, scan, diagnostics);
    } else {
        scanner.scan_output(&members, scan);
    }

    tracing::trace!(
        ty = %compilation.display_minimal(ty),
        is_input,
        members = scanner.result.selected_members.len(),
        "scanned type"
    );
    Some(scanner.result)
}

fn member_scan_attribute(
    compilation: &Compilation,
    known: &KnownSymbols,
    def: TypeDefId,
) -> Option<ScanMemberTypes> {
    let scan_attribute = known.member_scan_attribute?;
    let attribute = compilation
        .def(def)
        .attributes
        .iter()
        .find(|a| a.class.def() == Some(scan_attribute))?;
    attribute
        .named_arg("MemberTypes")
        .or_else(|| attribute.args.first())
        .and_then(TypedConstant::as_int)
        .map(ScanMemberTypes::from_bits)
}

struct Scanner<'a> {
    compilation: &'a Compilation,
    known: &'a KnownSymbols,
    result: TypeScanResult,
}

impl Scanner<'_> {
    fn scan_output(&mut self, members: &[MemberSymbol], scan: ScanMemberTypes) {
        for member in members {
            if !member.is_public() || self.is_ignored(&member.attributes) {
                continue;
            }
            let selected = match &member.kind {
                MemberKind::Field(_) => scan.contains(ScanMemberTypes::FIELDS),
                MemberKind::Property(p) => {
                    scan.contains(ScanMemberTypes::PROPERTIES) && p.has_public_getter()
                }
                MemberKind::Method(m) => {
                    scan.contains(ScanMemberTypes::METHODS) && self.is_resolver_method(m)
                }
                MemberKind::Constructor(_) => false,
            };
            if !selected {
                continue;
            }

            let graph_type = self.member_override(&member.attributes, false);
            self.discover(member.ty(), false, graph_type.as_ref());

            let params = match &member.kind {
                MemberKind::Method(m) => self.scan_parameters(m, true),
                _ => Vec::new(),
            };
            self.result.selected_members.push(ScannedMember {
                member: member.clone(),
                graph_type,
                params,
            });
        }
    }

    fn scan_input(
        &mut self,
        ty: &TypeSymbol,
        def: TypeDefId,
        members: &[MemberSymbol],
        scan: ScanMemberTypes,
        diagnostics: &mut Diagnostics,
    ) {
        let constructor = self.select_constructor(ty, def, members, diagnostics);
        let ctor_params: Vec<&str> = constructor
            .and_then(|c| match &c.kind {
                MemberKind::Constructor(m) => Some(m),
                _ => None,
            })
            .map(|m| m.params.iter().map(|p| p.name.as_str()).collect())
            .unwrap_or_default();
        let assigned_by_ctor =
            |name: &str| ctor_params.iter().any(|p| p.eq_ignore_ascii_case(name));

        for member in members {
            if member.is_static || !member.is_public() || self.is_ignored(&member.attributes) {
                continue;
            }
            let selected = match &member.kind {
                MemberKind::Field(f) => {
                    scan.contains(ScanMemberTypes::FIELDS) && !f.is_readonly && !f.is_const
                }
                MemberKind::Property(p) => {
                    scan.contains(ScanMemberTypes::PROPERTIES)
                        && p.has_public_getter()
                        && (p.has_public_setter() || assigned_by_ctor(&member.name))
                }
                MemberKind::Method(_) | MemberKind::Constructor(_) => false,
            };
            if !selected {
                continue;
            }

            let graph_type = self.member_override(&member.attributes, true);
            self.discover(member.ty(), true, graph_type.as_ref());
            self.result.selected_members.push(ScannedMember {
                member: member.clone(),
                graph_type,
                params: Vec::new(),
            });
        }

        if let Some(ctor) = constructor {
            let params = match &ctor.kind {
                MemberKind::Constructor(m) => self.scan_parameters(m, false),
                _ => Vec::new(),
            };
            self.result.constructor = Some(ScannedMember {
                member: ctor.clone(),
                graph_type: None,
                params,
            });
        }
    }

    /// `[GraphQLConstructor]`, else parameterless, else the only public one,
    /// else the first public one.
    fn select_constructor<'m>(
        &self,
        ty: &TypeSymbol,
        def: TypeDefId,
        members: &'m [MemberSymbol],
        diagnostics: &mut Diagnostics,
    ) -> Option<&'m MemberSymbol> {
        let ctors: Vec<&MemberSymbol> = members
            .iter()
            .filter(|m| matches!(m.kind, MemberKind::Constructor(_)) && !m.is_static)
            .collect();

        let marked = ctors
            .iter()
            .copied()
            .find(|m| has_attribute(&m.attributes, self.known.graphql_constructor_attribute));
        if marked.is_some() {
            return marked;
        }

        let public: Vec<&MemberSymbol> = ctors.into_iter().filter(|m| m.is_public()).collect();
        let parameterless = public.iter().copied().find(|m| match &m.kind {
            MemberKind::Constructor(c) => c.params.is_empty(),
            _ => false,
        });
        if parameterless.is_some() {
            return parameterless;
        }

        let first = *public.first()?;
        if public.len() > 1 {
            let span = first
                .span
                .or_else(|| self.compilation.def(def).declarations.first().map(|d| d.span()));
            if let Some(span) = span {
                diagnostics
                    .report_at(span, DiagnosticKind::AmbiguousInputConstructor)
                    .message(self.compilation.display_minimal(ty))
                    .emit();
            }
        }
        Some(first)
    }

    /// Non-generic methods with a result and no `ref`/`out` parameters.
    fn is_resolver_method(&self, method: &MethodSymbol) -> bool {
        let returns_nothing = [self.known.void, self.known.task, self.known.value_task]
            .into_iter()
            .any(|d| KnownSymbols::is(&method.return_type, d));
        method.type_params.is_empty()
            && !returns_nothing
            && !method.return_type.is_error()
            && method
                .params
                .iter()
                .all(|p| matches!(p.ref_kind, RefKind::Value | RefKind::In))
    }

    /// Parameters are always scanned in input context.
    fn scan_parameters(
        &mut self,
        method: &MethodSymbol,
        allow_injected: bool,
    ) -> Vec<ScannedParameter> {
        let mut out = Vec::with_capacity(method.params.len());
        for param in &method.params {
            let injected = if allow_injected {
                self.injected_kind(param)
            } else {
                None
            };
            let graph_type = match injected {
                Some(_) => None,
                None => {
                    let graph_type = self.member_override(&param.attributes, true);
                    self.discover(&param.ty, true, graph_type.as_ref());
                    graph_type
                }
            };
            out.push(ScannedParameter {
                param: param.clone(),
                injected,
                graph_type,
            });
        }
        out
    }

    fn injected_kind(&self, param: &ParameterSymbol) -> Option<InjectedParameter> {
        let known = self.known;
        if KnownSymbols::is(&param.ty, known.resolve_field_context)
            || KnownSymbols::single_arg(&param.ty, known.resolve_field_context_t).is_some()
        {
            return Some(InjectedParameter::Context);
        }
        if KnownSymbols::is(&param.ty, known.cancellation_token) {
            return Some(InjectedParameter::CancellationToken);
        }
        let attributes = &param.attributes;
        if has_attribute(attributes, known.from_services_attribute) {
            Some(InjectedParameter::Services)
        } else if has_attribute(attributes, known.from_source_attribute) {
            Some(InjectedParameter::Source)
        } else if has_attribute(attributes, known.from_user_context_attribute) {
            Some(InjectedParameter::UserContext)
        } else {
            None
        }
    }

    fn is_ignored(&self, attributes: &[AttributeData]) -> bool {
        has_attribute(attributes, self.known.ignore_attribute)
    }

    fn member_override(
        &self,
        attributes: &[AttributeData],
        is_input: bool,
    ) -> Option<GraphTypeOverride> {
        graph_type_override(self.known, attributes, is_input)
    }

    /// Records what a member or parameter type references.
    fn discover(
        &mut self,
        ty: &TypeSymbol,
        is_input: bool,
        graph_type: Option<&GraphTypeOverride>,
    ) {
        if let Some(GraphTypeOverride::Type(graph_type)) = graph_type {
            self.discover_graph_type(graph_type);
            return;
        }

        let mut current = self.unwrap(ty, is_input);
        while let Some(element) = self.known.list_element(current) {
            if is_input {
                self.result
                    .input_list_types
                    .insert(current.clone().with_nullable(false));
            }
            current = self.unwrap(element, is_input);
        }

        if let Some(GraphTypeOverride::Base(graph_type)) = graph_type {
            self.discover_graph_type(graph_type);
            return;
        }
        if !self.is_discoverable_leaf(current) {
            return;
        }
        let leaf = current.clone().with_nullable(false);
        if is_input {
            self.result.discovered_input_clr_types.insert(leaf);
        } else {
            self.result.discovered_output_clr_types.insert(leaf);
        }
    }

    /// Graph type references register their CLR type instead of themselves.
    fn discover_graph_type(&mut self, graph_type: &TypeSymbol) {
        let known = self.known;
        let mut current = graph_type;
        while let Some(inner) = KnownSymbols::single_arg(current, known.non_null_graph_type)
            .or_else(|| KnownSymbols::single_arg(current, known.list_graph_type))
        {
            current = inner;
        }

        if let Some(clr) = KnownSymbols::single_arg(current, known.graphql_clr_input_type_reference) {
            self.result
                .discovered_input_clr_types
                .insert(clr.clone().with_nullable(false));
        } else if let Some(clr) =
            KnownSymbols::single_arg(current, known.graphql_clr_output_type_reference)
        {
            self.result
                .discovered_output_clr_types
                .insert(clr.clone().with_nullable(false));
        } else if !current.is_error() && !current.is_type_parameter() {
            self.result
                .discovered_graph_types
                .insert(current.clone().with_nullable(false));
        }
    }

    /// Peels `Nullable<T>`, task wrappers and, for output, stream wrappers.
    fn unwrap<'t>(&self, ty: &'t TypeSymbol, is_input: bool) -> &'t TypeSymbol {
        unwrap_value(self.known, ty, is_input)
    }

    fn is_discoverable_leaf(&self, ty: &TypeSymbol) -> bool {
        matches!(ty.shape, TypeShape::Named { .. })
            && !ty.is_open()
            && !self.known.is_object(ty)
            && !KnownSymbols::is(ty, self.known.void)
    }
}

/// Strips every wrapper that does not change the GraphQL type of a value.
pub(crate) fn unwrap_value<'t>(
    known: &KnownSymbols,
    ty: &'t TypeSymbol,
    is_input: bool,
) -> &'t TypeSymbol {
    let mut current = ty;
    loop {
        let next = known
            .nullable_underlying(current)
            .or_else(|| known.task_result(current))
            .or_else(|| {
                if is_input {
                    return None;
                }
                known
                    .observable_element(current)
                    .or_else(|| known.async_enumerable_element(current))
            });
        match next {
            Some(inner) => current = inner,
            None => return current,
        }
    }
}

/// Resolves a member's graph type attributes.
///
/// Whole-type overrides win over base-type overrides. Within one attribute
/// kind the generic form wins over the `typeof` constructor argument, which
/// wins over the `GraphType` named argument.
pub(crate) fn graph_type_override(
    known: &KnownSymbols,
    attributes: &[AttributeData],
    is_input: bool,
) -> Option<GraphTypeOverride> {
    let (type_attr, base_attr) = if is_input {
        (
            (known.input_type_attribute_t, known.input_type_attribute),
            (known.input_base_type_attribute_t, known.input_base_type_attribute),
        )
    } else {
        (
            (known.output_type_attribute_t, known.output_type_attribute),
            (known.output_base_type_attribute_t, known.output_base_type_attribute),
        )
    };

    if let Some(ty) = attribute_graph_type(attributes, type_attr) {
        return Some(GraphTypeOverride::Type(ty));
    }
    let base = attribute_graph_type(
        attributes,
        (known.base_graph_type_attribute_t, known.base_graph_type_attribute),
    )
    .or_else(|| attribute_graph_type(attributes, base_attr))
    .or_else(|| {
        known
            .id_graph_type
            .filter(|_| has_attribute(attributes, known.id_attribute))
            .map(|id| TypeSymbol::named(id, Vec::new()))
    });
    base.map(GraphTypeOverride::Base)
}

fn attribute_graph_type(
    attributes: &[AttributeData],
    (generic, plain): (Option<TypeDefId>, Option<TypeDefId>),
) -> Option<TypeSymbol> {
    let of = |def: Option<TypeDefId>| {
        attributes
            .iter()
            .filter(move |a| def.is_some() && a.class.def() == def)
    };
    let usable = |ty: &TypeSymbol| !ty.is_error() && !ty.is_type_parameter();

    of(generic)
        .find_map(|a| match a.class.type_args() {
            [ty] if usable(ty) => Some(ty.clone()),
            _ => None,
        })
        .or_else(|| {
            of(plain).find_map(|a| {
                a.args
                    .first()
                    .and_then(TypedConstant::as_type)
                    .filter(|t| usable(t))
                    .cloned()
            })
        })
        .or_else(|| {
            of(plain).find_map(|a| {
                a.named_arg("GraphType")
                    .and_then(TypedConstant::as_type)
                    .filter(|t| usable(t))
                    .cloned()
            })
        })
}

pub(crate) fn has_attribute(attributes: &[AttributeData], def: Option<TypeDefId>) -> bool {
    def.is_some() && attributes.iter().any(|a| a.class.def() == def)
}
