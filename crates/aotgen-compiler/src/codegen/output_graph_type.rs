//! Output graph type classes with explicit field resolvers.

use std::fmt::{self, Write};

use aotgen_core::utils::{escape_identifier, string_literal};

use super::writer::{CodeWriter, render_file};
use crate::config::GeneratorConfig;
use crate::model::{
    InjectedArgumentKind, MemberAccessKind, MethodArgumentData, OutputFieldData,
    OutputGraphTypeData, OutputGraphTypeKind, PartialClassInfo, ResolverKind,
};

/// Generates the nested graph type class with the default configuration.
pub fn generate(
    namespace: Option<&str>,
    hierarchy: &[PartialClassInfo],
    data: Option<&OutputGraphTypeData>,
) -> String {
    generate_with(&GeneratorConfig::default(), namespace, hierarchy, data)
}

pub fn generate_with(
    config: &GeneratorConfig,
    namespace: Option<&str>,
    hierarchy: &[PartialClassInfo],
    data: Option<&OutputGraphTypeData>,
) -> String {
    let Some(data) = data else {
        return String::new();
    };
    render_file(config, namespace, hierarchy, |w| write_class(w, data))
}

fn write_class(w: &mut CodeWriter<'_>, data: &OutputGraphTypeData) -> fmt::Result {
    w.open(format_args!(
        "private sealed class {} : {}",
        data.generated_name, data.graph_type
    ))?;
    w.open(format_args!("public {}()", data.generated_name))?;
    for field in &data.fields {
        write_field(w, field, data.kind)?;
    }
    w.close("")?;
    w.close("")
}

fn write_field(
    w: &mut CodeWriter<'_>,
    field: &OutputFieldData,
    kind: OutputGraphTypeKind,
) -> fmt::Result {
    let arguments: Vec<&MethodArgumentData> = field
        .arguments
        .iter()
        .filter(|a| a.injected.is_none())
        .collect();
    let has_resolver = kind == OutputGraphTypeKind::Object;

    write!(
        w,
        "Field<{}>({})",
        field.graph_type,
        string_literal(&field.name)
    )?;
    if arguments.is_empty() && !has_resolver {
        return writeln!(w, ";");
    }
    writeln!(w)?;

    w.indent();
    for (i, argument) in arguments.iter().enumerate() {
        let graph_type = argument.graph_type.as_deref().unwrap_or_default();
        let end = if i + 1 == arguments.len() && !has_resolver {
            ";"
        } else {
            ""
        };
        writeln!(
            w,
            ".Argument<{graph_type}>({}){end}",
            string_literal(&argument.name)
        )?;
    }
    if has_resolver {
        writeln!(w, "{};", resolver(field))?;
    }
    w.dedent();
    Ok(())
}

fn resolver(field: &OutputFieldData) -> String {
    let value = member_access(field);
    match field.resolver {
        ResolverKind::Sync => format!(".Resolve(context => {value})"),
        ResolverKind::Async => format!(".ResolveAsync(async context => await {value})"),
        ResolverKind::Stream => format!(".ResolveStream(context => {value})"),
        ResolverKind::StreamAsync => format!(".ResolveStreamAsync(context => {value})"),
        ResolverKind::AsyncEnumerable => format!(
            ".ResolveStream(context => global::GraphQL.ObservableExtensions.ToObservable({value}))"
        ),
    }
}

fn member_access(field: &OutputFieldData) -> String {
    let target = match &field.static_owner {
        Some(owner) => owner.as_str(),
        None => "context.Source",
    };
    let member = escape_identifier(&field.member_name);
    match field.member_kind {
        MemberAccessKind::Field | MemberAccessKind::Property => format!("{target}.{member}"),
        MemberAccessKind::Method => {
            let args: Vec<String> = field.arguments.iter().map(argument_value).collect();
            format!("{target}.{member}({})", args.join(", "))
        }
    }
}

fn argument_value(argument: &MethodArgumentData) -> String {
    let ty = &argument.type_name;
    match argument.injected {
        None => format!(
            "context.GetArgument<{ty}>({})",
            string_literal(&argument.name)
        ),
        Some(InjectedArgumentKind::Context) => "context".to_string(),
        Some(InjectedArgumentKind::CancellationToken) => "context.CancellationToken".to_string(),
        Some(InjectedArgumentKind::Source) => "context.Source".to_string(),
        Some(InjectedArgumentKind::Services) => {
            let service = ty.trim_end_matches('?');
            format!("({ty})context.RequestServices!.GetService(typeof({service}))!")
        }
        Some(InjectedArgumentKind::UserContext) => format!("({ty})context.UserContext"),
    }
}
