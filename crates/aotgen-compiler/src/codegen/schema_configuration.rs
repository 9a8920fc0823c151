//! Schema configuration partial: constructor, type registration and roots.

use std::fmt::{self, Write};

use super::writer::{CodeWriter, render_file};
use crate::config::GeneratorConfig;
use crate::model::{PartialClassInfo, SchemaClassData};

/// Generates the schema partial with the default configuration.
pub fn generate(
    namespace: Option<&str>,
    hierarchy: &[PartialClassInfo],
    data: Option<&SchemaClassData>,
) -> String {
    generate_with(&GeneratorConfig::default(), namespace, hierarchy, data)
}

pub fn generate_with(
    config: &GeneratorConfig,
    namespace: Option<&str>,
    hierarchy: &[PartialClassInfo],
    data: Option<&SchemaClassData>,
) -> String {
    let (Some(data), Some(class)) = (data, hierarchy.last()) else {
        return String::new();
    };
    render_file(config, namespace, hierarchy, |w| {
        write_body(w, &class.name, data)
    })
}

fn write_body(w: &mut CodeWriter<'_>, class_name: &str, data: &SchemaClassData) -> fmt::Result {
    if !data.has_constructor {
        w.open(format_args!(
            "public {class_name}(global::System.IServiceProvider services, \
             global::System.Collections.Generic.IEnumerable<global::GraphQL.DI.IConfigureSchema> configurations) \
             : base(services, configurations)"
        ))?;
        writeln!(w, "Configure();")?;
        w.close("")?;
        writeln!(w)?;
    }

    w.open("private void Configure()")?;
    for registered in &data.registered_graph_types {
        match &registered.implementation {
            Some(implementation) => writeln!(
                w,
                "AddAotType<{}, {implementation}>();",
                registered.graph_type
            )?,
            None => writeln!(w, "AddAotType<{}>();", registered.graph_type)?,
        }
    }
    for mapping in &data.output_type_mappings {
        writeln!(
            w,
            "AddOutputTypeMapping<{}, {}>();",
            mapping.clr_type, mapping.graph_type
        )?;
    }
    for mapping in &data.input_type_mappings {
        writeln!(
            w,
            "AddInputTypeMapping<{}, {}>();",
            mapping.clr_type, mapping.graph_type
        )?;
    }
    for element in &data.array_list_types {
        writeln!(w, "RegisterArrayConverter<{}>();", element.display())?;
    }
    for element in &data.generic_list_types {
        writeln!(w, "RegisterListConverter<{}>();", element.display())?;
    }
    for element in &data.hash_set_types {
        writeln!(w, "RegisterHashSetConverter<{}>();", element.display())?;
    }
    let roots = [
        ("Query", &data.query_root_graph_type),
        ("Mutation", &data.mutation_root_graph_type),
        ("Subscription", &data.subscription_root_graph_type),
    ];
    for (property, root) in roots {
        if let Some(graph_type) = root {
            writeln!(w, "{property} = GetAotType<{graph_type}>();")?;
        }
    }
    w.close("")
}
