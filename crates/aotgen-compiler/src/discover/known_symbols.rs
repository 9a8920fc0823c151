//! Well-known symbols the pipeline matches against.
//!
//! Resolved once per compilation by metadata name. A symbol the compilation
//! does not define stays `None` and the feature behind it is treated as absent.

use crate::semantic::{Compilation, TypeDefId, TypeShape, TypeSymbol};

/// CLR scalar types and the built-in graph types they map to.
const SCALARS: &[(&str, &str)] = &[
    ("System.Int32", "IntGraphType"),
    ("System.Int64", "LongGraphType"),
    ("System.Numerics.BigInteger", "BigIntGraphType"),
    ("System.Double", "FloatGraphType"),
    ("System.Single", "FloatGraphType"),
    ("System.Half", "HalfGraphType"),
    ("System.Decimal", "DecimalGraphType"),
    ("System.String", "StringGraphType"),
    ("System.Boolean", "BooleanGraphType"),
    ("System.DateTime", "DateTimeGraphType"),
    ("System.DateTimeOffset", "DateTimeOffsetGraphType"),
    ("System.DateOnly", "DateOnlyGraphType"),
    ("System.TimeOnly", "TimeOnlyGraphType"),
    ("System.TimeSpan", "TimeSpanSecondsGraphType"),
    ("System.Guid", "IdGraphType"),
    ("System.Int16", "ShortGraphType"),
    ("System.UInt16", "UShortGraphType"),
    ("System.UInt32", "UIntGraphType"),
    ("System.UInt64", "ULongGraphType"),
    ("System.Byte", "ByteGraphType"),
    ("System.SByte", "SByteGraphType"),
    ("System.Uri", "UriGraphType"),
];

/// Generic collections unwrapped as lists. Other collections are opaque.
const LIST_TYPES: &[&str] = &[
    "System.Collections.Generic.IEnumerable`1",
    "System.Collections.Generic.IList`1",
    "System.Collections.Generic.List`1",
    "System.Collections.Generic.ICollection`1",
    "System.Collections.Generic.IReadOnlyCollection`1",
    "System.Collections.Generic.IReadOnlyList`1",
    "System.Collections.Generic.HashSet`1",
    "System.Collections.Generic.ISet`1",
    "System.Collections.Generic.IReadOnlySet`1",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownSymbols {
    // Schema class markers
    pub aot_schema: Option<TypeDefId>,
    pub aot_query_type: Option<TypeDefId>,
    pub aot_mutation_type: Option<TypeDefId>,
    pub aot_subscription_type: Option<TypeDefId>,
    pub aot_output_type: Option<TypeDefId>,
    pub aot_input_type: Option<TypeDefId>,
    pub aot_graph_type: Option<TypeDefId>,
    pub aot_type_mapping: Option<TypeDefId>,
    pub aot_list_type: Option<TypeDefId>,
    pub aot_remap_type: Option<TypeDefId>,

    // Member and graph type attributes
    pub ignore_attribute: Option<TypeDefId>,
    pub member_scan_attribute: Option<TypeDefId>,
    pub input_type_attribute: Option<TypeDefId>,
    pub input_type_attribute_t: Option<TypeDefId>,
    pub output_type_attribute: Option<TypeDefId>,
    pub output_type_attribute_t: Option<TypeDefId>,
    pub base_graph_type_attribute: Option<TypeDefId>,
    pub base_graph_type_attribute_t: Option<TypeDefId>,
    pub input_base_type_attribute: Option<TypeDefId>,
    pub input_base_type_attribute_t: Option<TypeDefId>,
    pub output_base_type_attribute: Option<TypeDefId>,
    pub output_base_type_attribute_t: Option<TypeDefId>,
    pub id_attribute: Option<TypeDefId>,
    pub do_not_map_clr_type_attribute: Option<TypeDefId>,
    pub clr_type_mapping_attribute: Option<TypeDefId>,
    pub graphql_constructor_attribute: Option<TypeDefId>,
    pub from_services_attribute: Option<TypeDefId>,
    pub from_source_attribute: Option<TypeDefId>,
    pub from_user_context_attribute: Option<TypeDefId>,

    // Graph types
    pub igraph_type: Option<TypeDefId>,
    pub iinput_object_graph_type: Option<TypeDefId>,
    pub iinterface_graph_type: Option<TypeDefId>,
    pub complex_graph_type: Option<TypeDefId>,
    pub enumeration_graph_type: Option<TypeDefId>,
    pub auto_registering_object_graph_type: Option<TypeDefId>,
    pub auto_registering_input_object_graph_type: Option<TypeDefId>,
    pub auto_registering_interface_graph_type: Option<TypeDefId>,
    pub non_null_graph_type: Option<TypeDefId>,
    pub list_graph_type: Option<TypeDefId>,
    pub graphql_clr_input_type_reference: Option<TypeDefId>,
    pub graphql_clr_output_type_reference: Option<TypeDefId>,
    pub id_graph_type: Option<TypeDefId>,

    // Wrappers and injected parameters
    pub object: Option<TypeDefId>,
    pub void: Option<TypeDefId>,
    pub nullable: Option<TypeDefId>,
    pub task: Option<TypeDefId>,
    pub task_t: Option<TypeDefId>,
    pub value_task: Option<TypeDefId>,
    pub value_task_t: Option<TypeDefId>,
    pub iobservable: Option<TypeDefId>,
    pub iasync_enumerable: Option<TypeDefId>,
    pub idata_loader_result: Option<TypeDefId>,
    pub resolve_field_context: Option<TypeDefId>,
    pub resolve_field_context_t: Option<TypeDefId>,
    pub cancellation_token: Option<TypeDefId>,

    // Collections
    pub ienumerable: Option<TypeDefId>,
    pub list: Option<TypeDefId>,
    pub hash_set: Option<TypeDefId>,
    pub iset: Option<TypeDefId>,
    pub ireadonly_set: Option<TypeDefId>,
    /// Generic collection definitions treated as lists.
    pub list_types: Vec<TypeDefId>,

    /// `(clr, graph type)` definitions of the built-in scalars.
    scalars: Vec<(TypeDefId, TypeDefId)>,
}

impl KnownSymbols {
    pub fn resolve(compilation: &Compilation) -> Self {
        let get = |name: &str| compilation.get_type_by_metadata_name(name);
        let graphql = |name: &str| get(&format!("GraphQL.{name}"));
        let types = |name: &str| get(&format!("GraphQL.Types.{name}"));

        let scalars = SCALARS
            .iter()
            .filter_map(|(clr, graph)| Some((get(clr)?, types(graph)?)))
            .collect();
        let list_types = LIST_TYPES.iter().filter_map(|name| get(name)).collect();

        Self {
            aot_schema: types("AotSchema"),
            aot_query_type: graphql("AotQueryTypeAttribute`1"),
            aot_mutation_type: graphql("AotMutationTypeAttribute`1"),
            aot_subscription_type: graphql("AotSubscriptionTypeAttribute`1"),
            aot_output_type: graphql("AotOutputTypeAttribute`1"),
            aot_input_type: graphql("AotInputTypeAttribute`1"),
            aot_graph_type: graphql("AotGraphTypeAttribute`1"),
            aot_type_mapping: graphql("AotTypeMappingAttribute`2"),
            aot_list_type: graphql("AotListTypeAttribute`1"),
            aot_remap_type: graphql("AotRemapTypeAttribute`2"),

            ignore_attribute: graphql("IgnoreAttribute"),
            member_scan_attribute: graphql("MemberScanAttribute"),
            input_type_attribute: graphql("InputTypeAttribute"),
            input_type_attribute_t: graphql("InputTypeAttribute`1"),
            output_type_attribute: graphql("OutputTypeAttribute"),
            output_type_attribute_t: graphql("OutputTypeAttribute`1"),
            base_graph_type_attribute: graphql("BaseGraphTypeAttribute"),
            base_graph_type_attribute_t: graphql("BaseGraphTypeAttribute`1"),
            input_base_type_attribute: graphql("InputBaseTypeAttribute"),
            input_base_type_attribute_t: graphql("InputBaseTypeAttribute`1"),
            output_base_type_attribute: graphql("OutputBaseTypeAttribute"),
            output_base_type_attribute_t: graphql("OutputBaseTypeAttribute`1"),
            id_attribute: graphql("IdAttribute"),
            do_not_map_clr_type_attribute: graphql("DoNotMapClrTypeAttribute"),
            clr_type_mapping_attribute: graphql("ClrTypeMappingAttribute"),
            graphql_constructor_attribute: graphql("GraphQLConstructorAttribute"),
            from_services_attribute: graphql("FromServicesAttribute"),
            from_source_attribute: graphql("FromSourceAttribute"),
            from_user_context_attribute: graphql("FromUserContextAttribute"),

            igraph_type: types("IGraphType"),
            iinput_object_graph_type: types("IInputObjectGraphType"),
            iinterface_graph_type: types("IInterfaceGraphType"),
            complex_graph_type: types("ComplexGraphType`1"),
            enumeration_graph_type: types("EnumerationGraphType`1"),
            auto_registering_object_graph_type: types("AutoRegisteringObjectGraphType`1"),
            auto_registering_input_object_graph_type: types("AutoRegisteringInputObjectGraphType`1"),
            auto_registering_interface_graph_type: types("AutoRegisteringInterfaceGraphType`1"),
            non_null_graph_type: types("NonNullGraphType`1"),
            list_graph_type: types("ListGraphType`1"),
            graphql_clr_input_type_reference: types("GraphQLClrInputTypeReference`1"),
            graphql_clr_output_type_reference: types("GraphQLClrOutputTypeReference`1"),
            id_graph_type: types("IdGraphType"),

            object: get("System.Object"),
            void: get("System.Void"),
            nullable: get("System.Nullable`1"),
            task: get("System.Threading.Tasks.Task"),
            task_t: get("System.Threading.Tasks.Task`1"),
            value_task: get("System.Threading.Tasks.ValueTask"),
            value_task_t: get("System.Threading.Tasks.ValueTask`1"),
            iobservable: get("System.IObservable`1"),
            iasync_enumerable: get("System.Collections.Generic.IAsyncEnumerable`1"),
            idata_loader_result: get("GraphQL.DataLoader.IDataLoaderResult`1"),
            resolve_field_context: graphql("IResolveFieldContext"),
            resolve_field_context_t: graphql("IResolveFieldContext`1"),
            cancellation_token: get("System.Threading.CancellationToken"),

            ienumerable: get("System.Collections.Generic.IEnumerable`1"),
            list: get("System.Collections.Generic.List`1"),
            hash_set: get("System.Collections.Generic.HashSet`1"),
            iset: get("System.Collections.Generic.ISet`1"),
            ireadonly_set: get("System.Collections.Generic.IReadOnlySet`1"),
            list_types,

            scalars,
        }
    }

    /// Whether the compilation references the GraphQL library at all.
    pub fn is_available(&self) -> bool {
        self.aot_schema.is_some() && self.igraph_type.is_some()
    }

    /// The built-in graph type for a scalar CLR type.
    pub fn builtin_scalar_graph_type(&self, clr: &TypeSymbol) -> Option<TypeSymbol> {
        let TypeShape::Named { def, args } = &clr.shape else {
            return None;
        };
        if !args.is_empty() {
            return None;
        }
        self.scalars
            .iter()
            .find(|(c, _)| c == def)
            .map(|(_, graph)| TypeSymbol::named(*graph, Vec::new()))
    }

    /// Whether `def` is a built-in scalar graph type.
    pub fn is_builtin_scalar_graph_type(&self, def: TypeDefId) -> bool {
        self.scalars.iter().any(|(_, graph)| *graph == def)
    }

    /// Element type of an array or a whitelisted generic collection.
    pub fn list_element<'t>(&self, ty: &'t TypeSymbol) -> Option<&'t TypeSymbol> {
        match &ty.shape {
            TypeShape::Array { element, .. } => Some(element),
            TypeShape::Named { def, args } if args.len() == 1 && self.list_types.contains(def) => {
                args.first()
            }
            _ => None,
        }
    }

    /// `T` of `Nullable<T>`.
    pub fn nullable_underlying<'t>(&self, ty: &'t TypeSymbol) -> Option<&'t TypeSymbol> {
        Self::single_arg(ty, self.nullable)
    }

    /// `T` of `Task<T>`, `ValueTask<T>` or `IDataLoaderResult<T>`.
    pub fn task_result<'t>(&self, ty: &'t TypeSymbol) -> Option<&'t TypeSymbol> {
        Self::single_arg(ty, self.task_t)
            .or_else(|| Self::single_arg(ty, self.value_task_t))
            .or_else(|| Self::single_arg(ty, self.idata_loader_result))
    }

    /// `T` of `IObservable<T>`.
    pub fn observable_element<'t>(&self, ty: &'t TypeSymbol) -> Option<&'t TypeSymbol> {
        Self::single_arg(ty, self.iobservable)
    }

    /// `T` of `IAsyncEnumerable<T>`.
    pub fn async_enumerable_element<'t>(&self, ty: &'t TypeSymbol) -> Option<&'t TypeSymbol> {
        Self::single_arg(ty, self.iasync_enumerable)
    }

    /// `T` of a type constructed from the generic definition `def`.
    pub fn single_arg(ty: &TypeSymbol, def: Option<TypeDefId>) -> Option<&TypeSymbol> {
        match &ty.shape {
            TypeShape::Named { def: d, args } if Some(*d) == def && args.len() == 1 => args.first(),
            _ => None,
        }
    }

    /// Whether `ty` is exactly `def` (non-generic).
    pub fn is(ty: &TypeSymbol, def: Option<TypeDefId>) -> bool {
        def.is_some() && ty.def() == def
    }

    /// Whether the type implements `IGraphType`.
    pub fn is_graph_type(&self, compilation: &Compilation, ty: &TypeSymbol) -> bool {
        self.igraph_type
            .is_some_and(|graph_type| compilation.derives_from(ty, graph_type))
    }

    /// Whether `ty` is `object`.
    pub fn is_object(&self, ty: &TypeSymbol) -> bool {
        Self::is(ty, self.object)
    }
}
