//! Primitive generation model.
//!
//! Detached from the symbol table: only strings, flags, enums and vectors of
//! such records. Two runs that produce equal records produce equal text, which
//! is what the driver's output cache relies on.
//!
//! Type names are stored fully qualified (`global::Demo.Query`) and ready to
//! paste into C# source.

use serde::Serialize;

/// One level of the partial class nesting, outermost first.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct PartialClassInfo {
    pub name: String,
    /// `public`, `internal`, ...
    pub accessibility: String,
    /// `class`, `record`, `struct`, `record struct` or `interface`.
    pub keyword: String,
    pub type_params: Vec<String>,
}

impl PartialClassInfo {
    /// `public partial class Name<T>`
    pub fn declaration(&self) -> String {
        let mut out = format!(
            "{} partial {} {}",
            self.accessibility, self.keyword, self.name
        );
        if !self.type_params.is_empty() {
            out.push('<');
            out.push_str(&self.type_params.join(", "));
            out.push('>');
        }
        out
    }
}

/// Where a generated file places its code.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct GenerationContext {
    pub namespace: Option<String>,
    pub hierarchy: Vec<PartialClassInfo>,
}

/// One generated file's worth of data.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum GenerationEntry {
    Schema {
        context: GenerationContext,
        data: SchemaClassData,
    },
    Output {
        context: GenerationContext,
        data: OutputGraphTypeData,
    },
    Input {
        context: GenerationContext,
        data: InputGraphTypeData,
    },
}

impl GenerationEntry {
    pub fn context(&self) -> &GenerationContext {
        match self {
            GenerationEntry::Schema { context, .. }
            | GenerationEntry::Output { context, .. }
            | GenerationEntry::Input { context, .. } => context,
        }
    }

    /// Output file name, e.g. `Demo.MySchema.AutoOutputGraphType_Query.g.cs`.
    pub fn hint_name(&self) -> String {
        let context = self.context();
        let mut parts: Vec<&str> = Vec::new();
        if let Some(namespace) = &context.namespace {
            parts.push(namespace);
        }
        parts.extend(context.hierarchy.iter().map(|c| c.name.as_str()));
        match self {
            GenerationEntry::Schema { .. } => {}
            GenerationEntry::Output { data, .. } => parts.push(&data.generated_name),
            GenerationEntry::Input { data, .. } => parts.push(&data.generated_name),
        }
        format!("{}.g.cs", parts.join("."))
    }
}

/// Schema configuration partial.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct SchemaClassData {
    /// The user already declared a constructor.
    pub has_constructor: bool,
    pub query_root_graph_type: Option<String>,
    pub mutation_root_graph_type: Option<String>,
    pub subscription_root_graph_type: Option<String>,
    pub registered_graph_types: Vec<RegisteredGraphType>,
    pub output_type_mappings: Vec<TypeMappingData>,
    pub input_type_mappings: Vec<TypeMappingData>,
    pub array_list_types: Vec<ListElementData>,
    pub generic_list_types: Vec<ListElementData>,
    pub hash_set_types: Vec<ListElementData>,
}

/// `AddAotType<GraphType>()` or `AddAotType<GraphType, Implementation>()`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct RegisteredGraphType {
    pub graph_type: String,
    /// Generated nested class or remap target.
    pub implementation: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct TypeMappingData {
    pub clr_type: String,
    pub graph_type: String,
}

/// Element type of a collection the input parser converts to.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct ListElementData {
    pub element_type: String,
    /// Reference element annotated `?`.
    pub element_nullable: bool,
}

impl ListElementData {
    /// Element type as written in a type argument list.
    pub fn display(&self) -> String {
        if self.element_nullable {
            format!("{}?", self.element_type)
        } else {
            self.element_type.clone()
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum OutputGraphTypeKind {
    Object,
    Interface,
}

/// Nested output graph type class.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct OutputGraphTypeData {
    /// Name of the nested class, e.g. `AutoOutputGraphType_Query`.
    pub generated_name: String,
    /// Auto-registering base class.
    pub graph_type: String,
    pub source_type: String,
    pub kind: OutputGraphTypeKind,
    pub fields: Vec<OutputFieldData>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum MemberAccessKind {
    Field,
    Property,
    Method,
}

/// How a field resolver awaits or streams the member's value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum ResolverKind {
    Sync,
    /// `Task<T>` or `ValueTask<T>`.
    Async,
    /// `IObservable<T>`.
    Stream,
    /// `Task<IObservable<T>>`.
    StreamAsync,
    /// `IAsyncEnumerable<T>`.
    AsyncEnumerable,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct OutputFieldData {
    pub name: String,
    pub member_name: String,
    pub member_kind: MemberAccessKind,
    /// Static members are accessed through this type.
    pub static_owner: Option<String>,
    pub graph_type: String,
    pub resolver: ResolverKind,
    pub arguments: Vec<MethodArgumentData>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum InjectedArgumentKind {
    Context,
    CancellationToken,
    Services,
    Source,
    UserContext,
}

/// One parameter of a resolver method.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct MethodArgumentData {
    pub name: String,
    /// Parameter type as written in C#.
    pub type_name: String,
    /// `None` for injected parameters, which are not field arguments.
    pub graph_type: Option<String>,
    pub injected: Option<InjectedArgumentKind>,
}

/// Nested input graph type class.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct InputGraphTypeData {
    pub generated_name: String,
    pub graph_type: String,
    pub source_type: String,
    pub fields: Vec<InputFieldData>,
    /// A constructor was selected; otherwise parsing is left to the base class.
    pub constructible: bool,
    pub constructor_parameters: Vec<ConstructorParameterData>,
    /// Members assigned after construction.
    pub members: Vec<InputMemberData>,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct InputFieldData {
    pub name: String,
    pub graph_type: String,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct ConstructorParameterData {
    /// Field name the value is read from.
    pub field_name: String,
    pub type_name: String,
    pub nullable: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum MemberAssignment {
    /// `init` or `required`: always assigned in the object initializer.
    Initializer,
    /// Assigned only when the field is present.
    Setter,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct InputMemberData {
    pub field_name: String,
    pub member_name: String,
    pub type_name: String,
    pub nullable: bool,
    pub assignment: MemberAssignment,
}
