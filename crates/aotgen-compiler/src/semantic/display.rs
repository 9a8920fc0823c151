//! C# rendering of type symbols.

use std::fmt::Write;

use super::Compilation;
use super::binder::PREDEFINED_TYPES;
use super::symbols::{TypeDefId, TypeShape, TypeSymbol};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Style {
    /// `global::System.Collections.Generic.List<int>`
    Qualified,
    /// `List<int>`
    Minimal,
}

impl Compilation {
    /// Fully qualified C# spelling without nullable reference annotations.
    pub fn display(&self, ty: &TypeSymbol) -> String {
        self.render(ty, Style::Qualified, false)
    }

    /// Fully qualified C# spelling with `?` on annotated reference types.
    pub fn display_annotated(&self, ty: &TypeSymbol) -> String {
        self.render(ty, Style::Qualified, true)
    }

    /// Short spelling for messages and dumps.
    pub fn display_minimal(&self, ty: &TypeSymbol) -> String {
        self.render(ty, Style::Minimal, true)
    }

    /// `global::Ns.Outer.Inner` for a definition, without type arguments.
    pub fn display_def(&self, id: TypeDefId) -> String {
        let mut out = String::new();
        self.write_def_path(id, Style::Qualified, &mut out);
        out
    }

    /// `Ns.Outer+Inner`1` metadata name of a definition.
    pub fn metadata_name(&self, id: TypeDefId) -> String {
        let def = self.def(id);
        match def.containing {
            Some(outer) => format!("{}+{}", self.metadata_name(outer), def.metadata_name()),
            None if def.namespace.is_empty() => def.metadata_name(),
            None => format!("{}.{}", def.namespace, def.metadata_name()),
        }
    }

    fn render(&self, ty: &TypeSymbol, style: Style, annotations: bool) -> String {
        let mut out = String::new();
        self.write_type(ty, style, annotations, &mut out);
        out
    }

    fn write_type(&self, ty: &TypeSymbol, style: Style, annotations: bool, out: &mut String) {
        match &ty.shape {
            TypeShape::Named { def, args } => {
                if Some(*def) == self.get_type_by_metadata_name("System.Nullable`1")
                    && let Some(inner) = args.first()
                {
                    self.write_type(inner, style, annotations, out);
                    out.push('?');
                    return;
                }
                match self.keyword_for(*def) {
                    Some(keyword) => out.push_str(keyword),
                    None => self.write_def_path(*def, style, out),
                }
                if !args.is_empty() {
                    out.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_type(arg, style, annotations, out);
                    }
                    out.push('>');
                }
                if annotations && ty.nullable && !self.is_value_type(ty) {
                    out.push('?');
                }
            }
            TypeShape::Array { .. } => {
                let mut ranks = Vec::new();
                let mut element = ty;
                while let TypeShape::Array { element: inner, rank } = &element.shape {
                    ranks.push(*rank);
                    element = inner;
                }
                self.write_type(element, style, annotations, out);
                for rank in ranks {
                    let _ = write!(out, "[{}]", ",".repeat(rank.saturating_sub(1) as usize));
                }
                if annotations && ty.nullable {
                    out.push('?');
                }
            }
            TypeShape::TypeParameter { name, .. } => {
                out.push_str(name);
                if annotations && ty.nullable {
                    out.push('?');
                }
            }
            TypeShape::Error(name) => out.push_str(name),
        }
    }

    fn write_def_path(&self, id: TypeDefId, style: Style, out: &mut String) {
        let def = self.def(id);
        match def.containing {
            Some(outer) => {
                self.write_def_path(outer, style, out);
                out.push('.');
            }
            None if style == Style::Qualified => {
                out.push_str("global::");
                if !def.namespace.is_empty() {
                    out.push_str(&def.namespace);
                    out.push('.');
                }
            }
            None => {}
        }
        out.push_str(&def.name);
    }

    fn keyword_for(&self, id: TypeDefId) -> Option<&'static str> {
        let def = self.def(id);
        if def.namespace != "System" || def.containing.is_some() || !def.is_metadata {
            return None;
        }
        PREDEFINED_TYPES.iter().find_map(|(keyword, name)| {
            (name.strip_prefix("System.") == Some(def.name.as_str())).then_some(*keyword)
        })
    }
}
