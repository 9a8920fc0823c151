//! Input graph type classes with a generated `ParseDictionary`.

use std::fmt::{self, Write};

use aotgen_core::utils::{escape_identifier, string_literal};

use super::writer::{CodeWriter, render_file};
use crate::config::GeneratorConfig;
use crate::model::{InputGraphTypeData, MemberAssignment, PartialClassInfo};

/// Generates the nested input graph type class with the default configuration.
pub fn generate(
    namespace: Option<&str>,
    hierarchy: &[PartialClassInfo],
    data: Option<&InputGraphTypeData>,
) -> String {
    generate_with(&GeneratorConfig::default(), namespace, hierarchy, data)
}

pub fn generate_with(
    config: &GeneratorConfig,
    namespace: Option<&str>,
    hierarchy: &[PartialClassInfo],
    data: Option<&InputGraphTypeData>,
) -> String {
    let Some(data) = data else {
        return String::new();
    };
    render_file(config, namespace, hierarchy, |w| write_class(w, data))
}

fn write_class(w: &mut CodeWriter<'_>, data: &InputGraphTypeData) -> fmt::Result {
    w.open(format_args!(
        "private sealed class {} : {}",
        data.generated_name, data.graph_type
    ))?;
    w.open(format_args!("public {}()", data.generated_name))?;
    for field in &data.fields {
        writeln!(
            w,
            "Field<{}>({});",
            field.graph_type,
            string_literal(&field.name)
        )?;
    }
    w.close("")?;

    if data.constructible {
        writeln!(w)?;
        write_parse_dictionary(w, data)?;
    }
    w.close("")
}

fn write_parse_dictionary(w: &mut CodeWriter<'_>, data: &InputGraphTypeData) -> fmt::Result {
    w.open(
        "public override object ParseDictionary(\
         global::System.Collections.Generic.IDictionary<string, object?> value)",
    )?;

    let initializers: Vec<_> = data
        .members
        .iter()
        .filter(|m| m.assignment == MemberAssignment::Initializer)
        .collect();
    let setters: Vec<_> = data
        .members
        .iter()
        .filter(|m| m.assignment == MemberAssignment::Setter)
        .collect();
    let head = format!("var obj = new {}(", data.source_type);
    let after_args = if initializers.is_empty() { ");" } else { ")" };

    if data.constructor_parameters.is_empty() {
        writeln!(w, "{head}{after_args}")?;
    } else {
        writeln!(w, "{head}")?;
        w.indent();
        let count = data.constructor_parameters.len();
        for (i, param) in data.constructor_parameters.iter().enumerate() {
            let end = if i + 1 == count { after_args } else { "," };
            let value = read_value(
                &param.field_name,
                &format!("arg{i}"),
                &param.type_name,
                param.nullable,
            );
            writeln!(w, "{value}{end}")?;
        }
        w.dedent();
    }

    if !initializers.is_empty() {
        writeln!(w, "{{")?;
        w.indent();
        for (i, member) in initializers.iter().enumerate() {
            let value = read_value(
                &member.field_name,
                &format!("init{i}"),
                &member.type_name,
                member.nullable,
            );
            writeln!(w, "{} = {value},", escape_identifier(&member.member_name))?;
        }
        w.close(";")?;
    }

    for (i, member) in setters.iter().enumerate() {
        let local = format!("member{i}");
        w.open(format_args!(
            "if (value.TryGetValue({}, out var {local}))",
            string_literal(&member.field_name)
        ))?;
        writeln!(
            w,
            "obj.{} = {};",
            escape_identifier(&member.member_name),
            cast(&local, &member.type_name, member.nullable)
        )?;
        w.close("")?;
    }

    writeln!(w, "return obj;")?;
    w.close("")
}

/// `value.TryGetValue("Name", out var arg0) ? (string)arg0! : default!`
fn read_value(field_name: &str, local: &str, type_name: &str, nullable: bool) -> String {
    format!(
        "value.TryGetValue({}, out var {local}) ? {} : default!",
        string_literal(field_name),
        cast(local, type_name, nullable)
    )
}

fn cast(local: &str, type_name: &str, nullable: bool) -> String {
    if nullable {
        format!("({type_name}){local}")
    } else {
        format!("({type_name}){local}!")
    }
}
