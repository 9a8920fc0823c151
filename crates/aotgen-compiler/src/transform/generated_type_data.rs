//! Projection of a processed schema onto the primitive generation model.

use aotgen_core::utils::{sanitize_identifier, strip_async_suffix};
use indexmap::{IndexMap, IndexSet};

use super::candidate_class::CandidateClassData;
use super::schema_attribute_data::{Direction, ProcessedSchemaData};
use super::type_symbol::{GraphTypeOverride, InjectedParameter, ScannedMember, TypeScanResult};
use crate::discover::KnownSymbols;
use crate::model::{
    ConstructorParameterData, GenerationContext, GenerationEntry, InjectedArgumentKind,
    InputFieldData, InputGraphTypeData, InputMemberData, ListElementData, MemberAccessKind,
    MemberAssignment, MethodArgumentData, OutputFieldData, OutputGraphTypeData,
    OutputGraphTypeKind, PartialClassInfo, RegisteredGraphType, ResolverKind, SchemaClassData,
    TypeMappingData,
};
use crate::semantic::{Compilation, MemberKind, TypeDefId, TypeKind, TypeShape, TypeSymbol};

const NON_NULL_GRAPH_TYPE: &str = "global::GraphQL.Types.NonNullGraphType";
const LIST_GRAPH_TYPE: &str = "global::GraphQL.Types.ListGraphType";
const CLR_INPUT_TYPE_REFERENCE: &str = "global::GraphQL.Types.GraphQLClrInputTypeReference";
const CLR_OUTPUT_TYPE_REFERENCE: &str = "global::GraphQL.Types.GraphQLClrOutputTypeReference";

/// The schema configuration entry followed by one entry per generated
/// auto-registering graph type, in discovery order.
pub fn transform(
    data: &CandidateClassData,
    processed: &ProcessedSchemaData,
    known: &KnownSymbols,
    compilation: &Compilation,
) -> Vec<GenerationEntry> {
    let projector = Projector {
        compilation,
        known,
    };
    let context = projector.context(data.schema_class);

    let generated = projector.generated_types(processed);
    let mut entries = vec![GenerationEntry::Schema {
        context: context.clone(),
        data: projector.schema(data, processed, &generated),
    }];

    for ty in &generated {
        let entry = match ty.direction {
            Direction::Output => GenerationEntry::Output {
                context: context.clone(),
                data: projector.output_type(ty),
            },
            Direction::Input => GenerationEntry::Input {
                context: context.clone(),
                data: projector.input_type(ty),
            },
        };
        entries.push(entry);
    }
    entries
}

/// An auto-registering graph type whose implementation is generated.
struct GeneratedType<'p> {
    graph_type: &'p TypeSymbol,
    clr_type: &'p TypeSymbol,
    direction: Direction,
    is_interface: bool,
    name: String,
    scan: &'p TypeScanResult,
}

struct Projector<'a> {
    compilation: &'a Compilation,
    known: &'a KnownSymbols,
}

impl Projector<'_> {
    fn context(&self, schema_class: TypeDefId) -> GenerationContext {
        let mut hierarchy = Vec::new();
        let mut current = Some(schema_class);
        while let Some(id) = current {
            let def = self.compilation.def(id);
            let keyword = match (def.kind, def.is_record) {
                (TypeKind::Struct, true) => "record struct",
                (TypeKind::Struct, false) => "struct",
                (TypeKind::Interface, _) => "interface",
                (_, true) => "record",
                _ => "class",
            };
            hierarchy.push(PartialClassInfo {
                name: def.name.clone(),
                accessibility: def.accessibility.as_keyword().to_string(),
                keyword: keyword.to_string(),
                type_params: def.type_params.clone(),
            });
            current = def.containing;
        }
        hierarchy.reverse();

        let namespace = &self.compilation.def(schema_class).namespace;
        GenerationContext {
            namespace: (!namespace.is_empty()).then(|| namespace.clone()),
            hierarchy,
        }
    }

    fn generated_types<'p>(&self, processed: &'p ProcessedSchemaData) -> Vec<GeneratedType<'p>> {
        let known = self.known;
        let mut used_names: IndexSet<String> = IndexSet::new();
        let mut out = Vec::new();

        for graph_type in &processed.discovered_graph_types {
            if processed.remapped_graph_types.contains_key(graph_type) {
                continue;
            }
            let Some(def) = graph_type.def() else {
                continue;
            };
            let wrappers = [
                (
                    known.auto_registering_object_graph_type,
                    Direction::Output,
                    false,
                    "AutoOutputGraphType",
                ),
                (
                    known.auto_registering_interface_graph_type,
                    Direction::Output,
                    true,
                    "AutoInterfaceGraphType",
                ),
                (
                    known.auto_registering_input_object_graph_type,
                    Direction::Input,
                    false,
                    "AutoInputGraphType",
                ),
            ];
            let Some((_, direction, is_interface, prefix)) =
                wrappers.into_iter().find(|(wrapper, ..)| *wrapper == Some(def))
            else {
                continue;
            };
            let Some(clr_type) = graph_type.type_args().first() else {
                continue;
            };
            let Some(scan) = processed.scanned_types.get(&(clr_type.clone(), direction)) else {
                continue;
            };

            let stem = format!(
                "{prefix}_{}",
                sanitize_identifier(&self.compilation.display_minimal(clr_type))
            );
            let mut name = stem.clone();
            let mut suffix = 2;
            while !used_names.insert(name.clone()) {
                name = format!("{stem}_{suffix}");
                suffix += 1;
            }

            out.push(GeneratedType {
                graph_type,
                clr_type,
                direction,
                is_interface,
                name,
                scan,
            });
        }
        out
    }

    fn schema(
        &self,
        data: &CandidateClassData,
        processed: &ProcessedSchemaData,
        generated: &[GeneratedType<'_>],
    ) -> SchemaClassData {
        let c = self.compilation;
        let registered_graph_types = processed
            .discovered_graph_types
            .iter()
            .map(|graph_type| {
                let implementation = processed
                    .remapped_graph_types
                    .get(graph_type)
                    .map(|to| c.display(to))
                    .or_else(|| {
                        generated
                            .iter()
                            .find(|g| g.graph_type == graph_type)
                            .map(|g| g.name.clone())
                    });
                RegisteredGraphType {
                    graph_type: c.display(graph_type),
                    implementation,
                }
            })
            .collect();

        let mappings = |map: &IndexMap<TypeSymbol, TypeSymbol>| -> Vec<TypeMappingData> {
            map.iter()
                .map(|(clr, graph)| TypeMappingData {
                    clr_type: c.display(clr),
                    graph_type: c.display(graph),
                })
                .collect()
        };

        let mut arrays = IndexSet::new();
        let mut lists = IndexSet::new();
        let mut hash_sets = IndexSet::new();
        for list_type in &processed.input_list_types {
            let Some(element) = self.known.list_element(list_type) else {
                continue;
            };
            let element = ListElementData {
                element_type: c.display(element),
                element_nullable: element.nullable && !c.is_value_type(element),
            };
            let set_defs = [self.known.hash_set, self.known.iset, self.known.ireadonly_set];
            match &list_type.shape {
                TypeShape::Array { .. } => arrays.insert(element),
                TypeShape::Named { def, .. } if set_defs.contains(&Some(*def)) => {
                    hash_sets.insert(element)
                }
                _ => lists.insert(element),
            };
        }

        let root = |ty: &Option<TypeSymbol>| ty.as_ref().map(|t| c.display(t));
        SchemaClassData {
            has_constructor: data.has_constructor,
            query_root_graph_type: root(&processed.query_root_graph_type),
            mutation_root_graph_type: root(&processed.mutation_root_graph_type),
            subscription_root_graph_type: root(&processed.subscription_root_graph_type),
            registered_graph_types,
            output_type_mappings: mappings(&processed.output_clr_type_mappings),
            input_type_mappings: mappings(&processed.input_clr_type_mappings),
            array_list_types: arrays.into_iter().collect(),
            generic_list_types: lists.into_iter().collect(),
            hash_set_types: hash_sets.into_iter().collect(),
        }
    }

    fn output_type(&self, ty: &GeneratedType<'_>) -> OutputGraphTypeData {
        let fields = ty
            .scan
            .selected_members
            .iter()
            .map(|member| self.output_field(member))
            .collect();
        OutputGraphTypeData {
            generated_name: ty.name.clone(),
            graph_type: self.compilation.display(ty.graph_type),
            source_type: self.compilation.display(ty.clr_type),
            kind: if ty.is_interface {
                OutputGraphTypeKind::Interface
            } else {
                OutputGraphTypeKind::Object
            },
            fields,
        }
    }

    fn output_field(&self, scanned: &ScannedMember) -> OutputFieldData {
        let c = self.compilation;
        let member = &scanned.member;
        let (member_kind, name) = match &member.kind {
            MemberKind::Field(_) => (MemberAccessKind::Field, member.name.clone()),
            MemberKind::Property(_) => (MemberAccessKind::Property, member.name.clone()),
            MemberKind::Method(_) | MemberKind::Constructor(_) => (
                MemberAccessKind::Method,
                strip_async_suffix(&member.name).to_string(),
            ),
        };

        let arguments = scanned
            .params
            .iter()
            .map(|p| MethodArgumentData {
                name: p.param.name.clone(),
                type_name: c.display_annotated(&p.param.ty),
                graph_type: match p.injected {
                    Some(_) => None,
                    None => Some(self.graph_type_expr(&p.param.ty, true, p.graph_type.as_ref())),
                },
                injected: p.injected.map(|kind| match kind {
                    InjectedParameter::Context => InjectedArgumentKind::Context,
                    InjectedParameter::CancellationToken => InjectedArgumentKind::CancellationToken,
                    InjectedParameter::Services => InjectedArgumentKind::Services,
                    InjectedParameter::Source => InjectedArgumentKind::Source,
                    InjectedParameter::UserContext => InjectedArgumentKind::UserContext,
                }),
            })
            .collect();

        OutputFieldData {
            name,
            member_name: member.name.clone(),
            member_kind,
            static_owner: member
                .is_static
                .then(|| c.display_def(member.declaring_type)),
            graph_type: self.graph_type_expr(member.ty(), false, scanned.graph_type.as_ref()),
            resolver: self.resolver_kind(member.ty()),
            arguments,
        }
    }

    fn resolver_kind(&self, ty: &TypeSymbol) -> ResolverKind {
        let known = self.known;
        let awaited = KnownSymbols::single_arg(ty, known.task_t)
            .or_else(|| KnownSymbols::single_arg(ty, known.value_task_t));
        match awaited {
            Some(inner) if known.observable_element(inner).is_some() => ResolverKind::StreamAsync,
            Some(_) => ResolverKind::Async,
            None if known.observable_element(ty).is_some() => ResolverKind::Stream,
            None if known.async_enumerable_element(ty).is_some() => ResolverKind::AsyncEnumerable,
            None => ResolverKind::Sync,
        }
    }

    fn input_type(&self, ty: &GeneratedType<'_>) -> InputGraphTypeData {
        let c = self.compilation;
        let members = &ty.scan.selected_members;
        let mut fields: Vec<InputFieldData> = members
            .iter()
            .map(|m| InputFieldData {
                name: m.member.name.clone(),
                graph_type: self.graph_type_expr(m.member.ty(), true, m.graph_type.as_ref()),
            })
            .collect();

        let mut constructor_parameters = Vec::new();
        let mut assigned_by_ctor: IndexSet<&str> = IndexSet::new();
        if let Some(ctor) = &ty.scan.constructor {
            for p in &ctor.params {
                let matched = members
                    .iter()
                    .find(|m| m.member.name.eq_ignore_ascii_case(&p.param.name));
                let field_name = match matched {
                    Some(m) => {
                        assigned_by_ctor.insert(m.member.name.as_str());
                        m.member.name.clone()
                    }
                    None => {
                        fields.push(InputFieldData {
                            name: p.param.name.clone(),
                            graph_type: self.graph_type_expr(
                                &p.param.ty,
                                true,
                                p.graph_type.as_ref(),
                            ),
                        });
                        p.param.name.clone()
                    }
                };
                constructor_parameters.push(ConstructorParameterData {
                    field_name,
                    type_name: c.display_annotated(&p.param.ty),
                    nullable: self.is_nullable(&p.param.ty),
                });
            }
        }

        let members = members
            .iter()
            .filter(|m| !assigned_by_ctor.contains(m.member.name.as_str()))
            .map(|m| {
                let assignment = match &m.member.kind {
                    MemberKind::Property(p)
                        if p.is_required || p.setter.is_some_and(|s| s.is_init) =>
                    {
                        MemberAssignment::Initializer
                    }
                    _ => MemberAssignment::Setter,
                };
                InputMemberData {
                    field_name: m.member.name.clone(),
                    member_name: m.member.name.clone(),
                    type_name: c.display_annotated(m.member.ty()),
                    nullable: self.is_nullable(m.member.ty()),
                    assignment,
                }
            })
            .collect();

        InputGraphTypeData {
            generated_name: ty.name.clone(),
            graph_type: c.display(ty.graph_type),
            source_type: c.display(ty.clr_type),
            fields,
            constructible: ty.scan.constructor.is_some(),
            constructor_parameters,
            members,
        }
    }

    fn is_nullable(&self, ty: &TypeSymbol) -> bool {
        self.known.nullable_underlying(ty).is_some()
            || (ty.nullable && !self.compilation.is_value_type(ty))
    }

    /// GraphQL type expression of a member, parameter or return type.
    fn graph_type_expr(
        &self,
        ty: &TypeSymbol,
        is_input: bool,
        graph_type: Option<&GraphTypeOverride>,
    ) -> String {
        match graph_type {
            Some(GraphTypeOverride::Type(ty)) => self.compilation.display(ty),
            Some(GraphTypeOverride::Base(base)) => self.wrapped_expr(ty, is_input, Some(base)),
            None => self.wrapped_expr(ty, is_input, None),
        }
    }

    fn wrapped_expr(&self, ty: &TypeSymbol, is_input: bool, base: Option<&TypeSymbol>) -> String {
        let known = self.known;
        let mut current = ty;
        loop {
            let next = known.task_result(current).or_else(|| {
                if is_input {
                    return None;
                }
                known
                    .observable_element(current)
                    .or_else(|| known.async_enumerable_element(current))
            });
            match next {
                Some(inner) => current = inner,
                None => break,
            }
        }

        let (inner, nullable) = match known.nullable_underlying(current) {
            Some(underlying) => (underlying, true),
            None => (current, current.nullable && !self.compilation.is_value_type(current)),
        };
        let core = match known.list_element(inner) {
            Some(element) => format!(
                "{LIST_GRAPH_TYPE}<{}>",
                self.wrapped_expr(element, is_input, base)
            ),
            None => match base {
                Some(base) => self.compilation.display(base),
                None => {
                    let reference = if is_input {
                        CLR_INPUT_TYPE_REFERENCE
                    } else {
                        CLR_OUTPUT_TYPE_REFERENCE
                    };
                    format!("{reference}<{}>", self.compilation.display(inner))
                }
            },
        };
        if nullable {
            core
        } else {
            format!("{NON_NULL_GRAPH_TYPE}<{core}>")
        }
    }
}
