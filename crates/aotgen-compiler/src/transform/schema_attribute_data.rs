//! Type graph walker.
//!
//! Starting from the schema's declared types, scans every reachable CLR type
//! once per direction, registers CLR to graph type mappings and collects the
//! graph types the schema has to know about ahead of time.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use super::candidate_class::{CandidateClassData, OutputTypeKind, RootType};
use super::type_symbol::{self, TypeScanResult, has_attribute};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::discover::KnownSymbols;
use crate::semantic::{Compilation, TypeDefId, TypeSymbol, TypedConstant};
use crate::{CancellationToken, Result};

/// A CLR type scanned in one direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Output,
    Input,
}

impl Direction {
    pub fn is_input(self) -> bool {
        self == Direction::Input
    }
}

/// Result of walking one schema class.
#[derive(Clone, Debug, Default)]
pub struct ProcessedSchemaData {
    pub query_root_graph_type: Option<TypeSymbol>,
    pub mutation_root_graph_type: Option<TypeSymbol>,
    pub subscription_root_graph_type: Option<TypeSymbol>,
    /// Every graph type the schema registers, in discovery order.
    pub discovered_graph_types: IndexSet<TypeSymbol>,
    pub output_clr_type_mappings: IndexMap<TypeSymbol, TypeSymbol>,
    pub input_clr_type_mappings: IndexMap<TypeSymbol, TypeSymbol>,
    pub input_list_types: IndexSet<TypeSymbol>,
    /// Graph type to the implementation registered in its place.
    pub remapped_graph_types: IndexMap<TypeSymbol, TypeSymbol>,
    /// Member scans keyed by CLR type and direction, in visiting order.
    pub scanned_types: IndexMap<(TypeSymbol, Direction), TypeScanResult>,
}

/// Walks the type graph reachable from the schema class attributes.
///
/// Explicit `AotTypeMapping` and `AotRemapType` entries are applied after the
/// walk and overwrite anything inferred for the same key.
pub fn process(
    data: &CandidateClassData,
    known: &KnownSymbols,
    compilation: &Compilation,
    cancellation: &CancellationToken,
    diagnostics: &mut Diagnostics,
) -> Result<ProcessedSchemaData> {
    let mut walker = Walker {
        compilation,
        known,
        span: data.span,
        explicit_mappings: data
            .type_mappings
            .iter()
            .map(|m| (m.clr_type.clone(), m.graph_type.clone()))
            .collect(),
        visited: IndexSet::new(),
        queue: VecDeque::new(),
        out: ProcessedSchemaData::default(),
    };

    let query = data.query_type.as_ref().map(|r| walker.seed_root(r));
    let mutation = data.mutation_type.as_ref().map(|r| walker.seed_root(r));
    let subscription = data.subscription_type.as_ref().map(|r| walker.seed_root(r));
    walker.out.query_root_graph_type = query;
    walker.out.mutation_root_graph_type = mutation;
    walker.out.subscription_root_graph_type = subscription;

    for entry in &data.output_types {
        walker.seed_output(&entry.ty, entry.kind);
    }
    for ty in &data.input_types {
        walker.seed_input(ty);
    }
    for entry in &data.graph_types {
        walker.add_graph_type(&entry.ty, entry.auto_register_clr_mapping);
    }
    for mapping in &data.type_mappings {
        walker.add_graph_type(&mapping.graph_type, false);
    }
    for remap in &data.remap_types {
        walker.add_graph_type(&remap.from, false);
    }
    for list in &data.list_types {
        walker.out.input_list_types.insert(list.clone());
    }

    while let Some((clr, direction)) = walker.queue.pop_front() {
        cancellation.check()?;
        walker.visit(clr, direction, diagnostics);
    }

    for mapping in &data.type_mappings {
        walker.apply_explicit_mapping(&mapping.clr_type, &mapping.graph_type);
    }
    for remap in &data.remap_types {
        walker
            .out
            .remapped_graph_types
            .insert(remap.from.clone(), remap.to.clone());
    }

    let out = walker.out;
    tracing::debug!(
        schema = %compilation.display_def(data.schema_class),
        graph_types = out.discovered_graph_types.len(),
        output_mappings = out.output_clr_type_mappings.len(),
        input_mappings = out.input_clr_type_mappings.len(),
        list_types = out.input_list_types.len(),
        "schema processed"
    );
    Ok(out)
}

struct Walker<'a> {
    compilation: &'a Compilation,
    known: &'a KnownSymbols,
    span: Span,
    explicit_mappings: IndexMap<TypeSymbol, TypeSymbol>,
    visited: IndexSet<(TypeSymbol, Direction)>,
    queue: VecDeque<(TypeSymbol, Direction)>,
    out: ProcessedSchemaData,
}

impl Walker<'_> {
    fn seed_root(&mut self, root: &RootType) -> TypeSymbol {
        if !root.is_clr_type {
            self.add_graph_type(&root.ty, false);
            return root.ty.clone();
        }
        let graph_type =
            self.auto_graph_type(self.known.auto_registering_object_graph_type, &root.ty);
        self.add_graph_type(&graph_type, true);
        graph_type
    }

    fn seed_output(&mut self, ty: &TypeSymbol, kind: OutputTypeKind) {
        if self.known.is_graph_type(self.compilation, ty) {
            self.add_graph_type(ty, true);
            return;
        }
        let is_interface = match kind {
            OutputTypeKind::Interface => true,
            OutputTypeKind::Object => false,
            OutputTypeKind::Auto => ty
                .def()
                .is_some_and(|d| self.compilation.def(d).is_interface()),
        };
        let wrapper = if is_interface {
            self.known.auto_registering_interface_graph_type
        } else {
            self.known.auto_registering_object_graph_type
        };
        let graph_type = self.auto_graph_type(wrapper, ty);
        self.add_graph_type(&graph_type, true);
    }

    fn seed_input(&mut self, ty: &TypeSymbol) {
        if self.known.is_graph_type(self.compilation, ty) {
            self.add_graph_type(ty, true);
            return;
        }
        let graph_type =
            self.auto_graph_type(self.known.auto_registering_input_object_graph_type, ty);
        self.add_graph_type(&graph_type, true);
    }

    fn auto_graph_type(&self, wrapper: Option<TypeDefId>, clr: &TypeSymbol) -> TypeSymbol {
        match wrapper {
            Some(def) => TypeSymbol::named(def, vec![clr.clone().with_nullable(false)]),
            None => TypeSymbol::error(self.compilation.display_minimal(clr)),
        }
    }

    fn enqueue(&mut self, clr: &TypeSymbol, direction: Direction) {
        let key = (clr.clone().with_nullable(false), direction);
        if !self.visited.contains(&key) {
            self.queue.push_back(key);
        }
    }

    fn visit(&mut self, clr: TypeSymbol, direction: Direction, diagnostics: &mut Diagnostics) {
        if !self.visited.insert((clr.clone(), direction)) {
            return;
        }
        tracing::trace!(
            ty = %self.compilation.display_minimal(&clr),
            ?direction,
            queued = self.queue.len(),
            "visit"
        );

        if self.compilation.is_enum(&clr) || self.known.builtin_scalar_graph_type(&clr).is_some() {
            self.register_clr(&clr, direction);
            return;
        }

        let Some(scan) = type_symbol::transform(
            self.compilation,
            self.known,
            &clr,
            direction.is_input(),
            None,
            diagnostics,
        ) else {
            diagnostics
                .report_at(self.span, DiagnosticKind::UnscannableType)
                .message(self.compilation.display_minimal(&clr))
                .emit();
            return;
        };

        for ty in &scan.discovered_output_clr_types {
            self.register_clr(ty, Direction::Output);
        }
        for ty in &scan.discovered_input_clr_types {
            self.register_clr(ty, Direction::Input);
        }
        for graph_type in &scan.discovered_graph_types {
            self.add_graph_type(graph_type, true);
        }
        self.out
            .input_list_types
            .extend(scan.input_list_types.iter().cloned());
        self.out.scanned_types.insert((clr, direction), scan);
    }

    /// Finds or synthesizes the graph type of a CLR type reached by a member.
    fn register_clr(&mut self, clr: &TypeSymbol, direction: Direction) {
        if let Some(graph_type) = self.explicit_mappings.get(clr).cloned() {
            self.add_graph_type(&graph_type, false);
            return;
        }

        if self.compilation.is_enum(clr) {
            if let Some(enumeration) = self.known.enumeration_graph_type {
                let graph_type = TypeSymbol::named(enumeration, vec![clr.clone()]);
                self.map_both(clr, &graph_type);
                self.out.discovered_graph_types.insert(graph_type);
            }
            return;
        }

        if let Some(graph_type) = self.known.builtin_scalar_graph_type(clr) {
            self.map_both(clr, &graph_type);
            self.out.discovered_graph_types.insert(graph_type);
            return;
        }

        let mappings = match direction {
            Direction::Output => &self.out.output_clr_type_mappings,
            Direction::Input => &self.out.input_clr_type_mappings,
        };
        if mappings.contains_key(clr) {
            return;
        }

        let wrapper = match direction {
            Direction::Output => self.known.auto_registering_object_graph_type,
            Direction::Input => self.known.auto_registering_input_object_graph_type,
        };
        let graph_type = self.auto_graph_type(wrapper, clr);
        self.add_graph_type(&graph_type, true);
    }

    fn map_both(&mut self, clr: &TypeSymbol, graph_type: &TypeSymbol) {
        self.out
            .output_clr_type_mappings
            .entry(clr.clone())
            .or_insert_with(|| graph_type.clone());
        self.out
            .input_clr_type_mappings
            .entry(clr.clone())
            .or_insert_with(|| graph_type.clone());
    }

    /// Registers a graph type once, infers its CLR mapping and queues the CLR
    /// type behind an auto-registering graph type for scanning.
    fn add_graph_type(&mut self, graph_type: &TypeSymbol, infer_mapping: bool) {
        if graph_type.is_error() || graph_type.is_open() {
            return;
        }
        if !self.out.discovered_graph_types.insert(graph_type.clone()) {
            return;
        }

        let known = self.known;
        let compilation = self.compilation;
        let auto_source = |def: Option<TypeDefId>| {
            def.and_then(|d| compilation.find_ancestor(graph_type, d))
                .and_then(|a| a.type_args().first().cloned())
        };
        if let Some(clr) = auto_source(known.auto_registering_object_graph_type)
            .or_else(|| auto_source(known.auto_registering_interface_graph_type))
        {
            self.enqueue(&clr, Direction::Output);
        } else if let Some(clr) = auto_source(known.auto_registering_input_object_graph_type) {
            self.enqueue(&clr, Direction::Input);
        }

        if infer_mapping {
            self.infer_mapping(graph_type);
        }
    }

    fn infer_mapping(&mut self, graph_type: &TypeSymbol) {
        let known = self.known;
        let compilation = self.compilation;
        let Some(def) = graph_type.def() else {
            return;
        };
        let attributes = &compilation.def(def).attributes;
        if has_attribute(attributes, known.do_not_map_clr_type_attribute) {
            return;
        }

        let explicit = known.clr_type_mapping_attribute.and_then(|mapping| {
            attributes
                .iter()
                .find(|a| a.class.def() == Some(mapping))
                .and_then(|a| a.args.first())
                .and_then(TypedConstant::as_type)
                .cloned()
        });
        let ancestor_arg = |def: Option<TypeDefId>| {
            def.and_then(|d| compilation.find_ancestor(graph_type, d))
                .and_then(|a| a.type_args().first().cloned())
        };
        let enumeration = ancestor_arg(known.enumeration_graph_type);
        let is_enumeration = enumeration.is_some();
        let Some(source) = explicit
            .or_else(|| ancestor_arg(known.complex_graph_type))
            .or(enumeration)
        else {
            return;
        };
        if source.is_error() || source.is_open() || known.is_object(&source) {
            return;
        }

        let is_input = known
            .iinput_object_graph_type
            .is_some_and(|d| compilation.derives_from(graph_type, d));
        let source = source.with_nullable(false);
        if is_enumeration || is_input {
            self.out
                .input_clr_type_mappings
                .entry(source.clone())
                .or_insert_with(|| graph_type.clone());
        }
        if is_enumeration || !is_input {
            self.out
                .output_clr_type_mappings
                .entry(source)
                .or_insert_with(|| graph_type.clone());
        }
    }

    /// Input object graph types map inputs, other complex types map outputs,
    /// everything else maps both directions.
    fn apply_explicit_mapping(&mut self, clr: &TypeSymbol, graph_type: &TypeSymbol) {
        let known = self.known;
        let compilation = self.compilation;
        let derives =
            |def: Option<TypeDefId>| def.is_some_and(|d| compilation.derives_from(graph_type, d));
        let is_input = derives(known.iinput_object_graph_type);
        let is_complex = derives(known.complex_graph_type);
        let clr = clr.clone().with_nullable(false);
        if is_input || !is_complex {
            self.out
                .input_clr_type_mappings
                .insert(clr.clone(), graph_type.clone());
        }
        if !is_input {
            self.out
                .output_clr_type_mappings
                .insert(clr, graph_type.clone());
        }
    }
}
