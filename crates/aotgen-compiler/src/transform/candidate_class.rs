//! Lowers the marker attributes of a schema class into [`SchemaAttributeData`].

use indexmap::IndexSet;

use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::discover::{CandidateClass, KnownSymbols};
use crate::semantic::{AttributeData, Compilation, TypeDefId, TypeSymbol};

/// `Kind` of an `[AotOutputType<T>]` attribute.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum OutputTypeKind {
    #[default]
    Auto,
    Object,
    Interface,
}

impl OutputTypeKind {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(OutputTypeKind::Auto),
            1 => Some(OutputTypeKind::Object),
            2 => Some(OutputTypeKind::Interface),
            _ => None,
        }
    }
}

/// Type argument of a root type attribute.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RootType {
    pub ty: TypeSymbol,
    /// A CLR type to wrap rather than a graph type.
    pub is_clr_type: bool,
    pub span: Span,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OutputTypeEntry {
    pub ty: TypeSymbol,
    pub kind: OutputTypeKind,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GraphTypeEntry {
    pub ty: TypeSymbol,
    pub auto_register_clr_mapping: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeMappingEntry {
    pub clr_type: TypeSymbol,
    pub graph_type: TypeSymbol,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RemapEntry {
    pub from: TypeSymbol,
    pub to: TypeSymbol,
}

/// Marker attributes of one schema class, in declaration order.
#[derive(Clone, Debug)]
pub struct SchemaAttributeData {
    pub schema_class: TypeDefId,
    pub span: Span,
    pub query_types: Vec<RootType>,
    pub mutation_types: Vec<RootType>,
    pub subscription_types: Vec<RootType>,
    pub output_types: Vec<OutputTypeEntry>,
    pub input_types: Vec<TypeSymbol>,
    pub graph_types: Vec<GraphTypeEntry>,
    pub type_mappings: Vec<TypeMappingEntry>,
    pub list_types: Vec<TypeSymbol>,
    pub remap_types: Vec<RemapEntry>,
}

impl SchemaAttributeData {
    fn new(schema_class: TypeDefId, span: Span) -> Self {
        Self {
            schema_class,
            span,
            query_types: Vec::new(),
            mutation_types: Vec::new(),
            subscription_types: Vec::new(),
            output_types: Vec::new(),
            input_types: Vec::new(),
            graph_types: Vec::new(),
            type_mappings: Vec::new(),
            list_types: Vec::new(),
            remap_types: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.query_types.is_empty()
            && self.mutation_types.is_empty()
            && self.subscription_types.is_empty()
            && self.output_types.is_empty()
            && self.input_types.is_empty()
            && self.graph_types.is_empty()
            && self.type_mappings.is_empty()
            && self.list_types.is_empty()
            && self.remap_types.is_empty()
    }
}

/// [`SchemaAttributeData`] with one root type per kind.
#[derive(Clone, Debug)]
pub struct CandidateClassData {
    pub schema_class: TypeDefId,
    pub span: Span,
    pub query_type: Option<RootType>,
    pub mutation_type: Option<RootType>,
    pub subscription_type: Option<RootType>,
    pub output_types: Vec<OutputTypeEntry>,
    pub input_types: Vec<TypeSymbol>,
    pub graph_types: Vec<GraphTypeEntry>,
    pub type_mappings: Vec<TypeMappingEntry>,
    pub list_types: Vec<TypeSymbol>,
    pub remap_types: Vec<RemapEntry>,
    /// The user already declared a constructor in some partial declaration.
    pub has_constructor: bool,
}

/// Collects the marker attributes of every partial declaration of the class.
///
/// Returns `None` when the class carries no recognized attribute or does not
/// derive from `AotSchema`.
pub fn transform(
    candidate: &CandidateClass,
    known: &KnownSymbols,
    compilation: &Compilation,
    diagnostics: &mut Diagnostics,
) -> Option<SchemaAttributeData> {
    let def = compilation.def(candidate.symbol);
    let mut data = SchemaAttributeData::new(candidate.symbol, candidate.span());
    let mut seen: IndexSet<Span> = IndexSet::new();

    for attribute in &def.attributes {
        if !seen.insert(attribute.span) {
            continue;
        }
        lower_attribute(attribute, known, compilation, &mut data, diagnostics);
    }

    if data.is_empty() {
        return None;
    }

    let derives_from_aot_schema = known
        .aot_schema
        .is_some_and(|aot| compilation.derives_from(&compilation.type_of(candidate.symbol), aot));
    if !derives_from_aot_schema {
        diagnostics
            .report_at(candidate.span(), DiagnosticKind::SchemaNotAotSchema)
            .message(&def.name)
            .emit();
        return None;
    }

    Some(data)
}

fn lower_attribute(
    attribute: &AttributeData,
    known: &KnownSymbols,
    compilation: &Compilation,
    data: &mut SchemaAttributeData,
    diagnostics: &mut Diagnostics,
) {
    let Some(class) = attribute.class.def() else {
        return;
    };
    let args = attribute.class.type_args();
    let is = |def: Option<TypeDefId>| def == Some(class);

    // Unbound or error type arguments carry nothing to generate.
    if args.iter().any(|a| a.is_error() || a.is_type_parameter()) {
        if [
            known.aot_query_type,
            known.aot_mutation_type,
            known.aot_subscription_type,
            known.aot_output_type,
            known.aot_input_type,
            known.aot_graph_type,
            known.aot_type_mapping,
            known.aot_list_type,
            known.aot_remap_type,
        ]
        .into_iter()
        .any(|d| is(d))
        {
            diagnostics
                .report_at(attribute.span, DiagnosticKind::InvalidAttributeArgument)
                .message("type argument could not be resolved")
                .emit();
        }
        return;
    }

    let root = |ty: &TypeSymbol| RootType {
        ty: ty.clone(),
        is_clr_type: !known.is_graph_type(compilation, ty),
        span: attribute.span,
    };

    match args {
        [ty] if is(known.aot_query_type) => data.query_types.push(root(ty)),
        [ty] if is(known.aot_mutation_type) => data.mutation_types.push(root(ty)),
        [ty] if is(known.aot_subscription_type) => data.subscription_types.push(root(ty)),
        [ty] if is(known.aot_output_type) => {
            let kind = match attribute.named_arg("Kind") {
                None => Some(OutputTypeKind::Auto),
                Some(value) => value.as_int().and_then(OutputTypeKind::from_value),
            };
            let Some(kind) = kind else {
                diagnostics
                    .report_at(attribute.span, DiagnosticKind::InvalidAttributeArgument)
                    .message("`Kind` must be an `OutputTypeKind` value")
                    .emit();
                return;
            };
            data.output_types.push(OutputTypeEntry {
                ty: ty.clone(),
                kind,
            });
        }
        [ty] if is(known.aot_input_type) => data.input_types.push(ty.clone()),
        [ty] if is(known.aot_graph_type) => {
            let auto_register = match attribute.named_arg("AutoRegisterClrMapping") {
                None => Some(true),
                Some(value) => value.as_bool(),
            };
            let Some(auto_register_clr_mapping) = auto_register else {
                diagnostics
                    .report_at(attribute.span, DiagnosticKind::InvalidAttributeArgument)
                    .message("`AutoRegisterClrMapping` must be a boolean")
                    .emit();
                return;
            };
            data.graph_types.push(GraphTypeEntry {
                ty: ty.clone(),
                auto_register_clr_mapping,
            });
        }
        [clr_type, graph_type] if is(known.aot_type_mapping) => {
            data.type_mappings.push(TypeMappingEntry {
                clr_type: clr_type.clone(),
                graph_type: graph_type.clone(),
            })
        }
        [ty] if is(known.aot_list_type) => data.list_types.push(ty.clone()),
        [from, to] if is(known.aot_remap_type) => data.remap_types.push(RemapEntry {
            from: from.clone(),
            to: to.clone(),
        }),
        _ => {}
    }
}

/// Picks the first root type of each kind; later ones are reported and dropped.
pub fn normalize(
    data: SchemaAttributeData,
    compilation: &Compilation,
    diagnostics: &mut Diagnostics,
) -> CandidateClassData {
    let mut first = |roots: Vec<RootType>, kind: &str| {
        let mut roots = roots.into_iter();
        let chosen = roots.next();
        for extra in roots {
            let mut report = diagnostics
                .report_at(extra.span, DiagnosticKind::DuplicateRootType)
                .message(kind);
            if let Some(chosen) = &chosen {
                report = report.related_to("first declared here", chosen.span);
            }
            report.emit();
        }
        chosen
    };

    let query_type = first(data.query_types, "query");
    let mutation_type = first(data.mutation_types, "mutation");
    let subscription_type = first(data.subscription_types, "subscription");

    CandidateClassData {
        schema_class: data.schema_class,
        span: data.span,
        query_type,
        mutation_type,
        subscription_type,
        output_types: data.output_types,
        input_types: data.input_types,
        graph_types: data.graph_types,
        type_mappings: data.type_mappings,
        list_types: data.list_types,
        remap_types: data.remap_types,
        has_constructor: compilation.def(data.schema_class).has_explicit_constructor(),
    }
}
