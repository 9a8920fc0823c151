/// Reserved C# keywords. Contextual keywords (`record`, `value`, ...) are valid identifiers.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub fn is_csharp_keyword(s: &str) -> bool {
    CSHARP_KEYWORDS.contains(&s)
}

/// Prefix reserved words with `@` so they can be used as identifiers.
///
/// # Examples
/// ```
/// use aotgen_core::utils::escape_identifier;
/// assert_eq!(escape_identifier("class"), "@class");
/// assert_eq!(escape_identifier("name"), "name");
/// ```
pub fn escape_identifier(s: &str) -> String {
    if is_csharp_keyword(s) {
        format!("@{s}")
    } else {
        s.to_string()
    }
}

/// Strip the verbatim `@` prefix from a source identifier.
pub fn unescape_identifier(s: &str) -> &str {
    s.strip_prefix('@').unwrap_or(s)
}

/// Turn arbitrary text into a valid identifier fragment.
///
/// Runs of characters that cannot appear in an identifier collapse into a single `_`;
/// leading and trailing separators are dropped.
///
/// # Examples
/// ```
/// use aotgen_core::utils::sanitize_identifier;
/// assert_eq!(sanitize_identifier("List<int[]>"), "List_int");
/// assert_eq!(sanitize_identifier("Outer.Inner"), "Outer_Inner");
/// ```
pub fn sanitize_identifier(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut pending_separator = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !result.is_empty() {
                result.push('_');
            }
            pending_separator = false;
            result.push(c);
        } else {
            pending_separator = true;
        }
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Render `s` as a regular C# string literal, quotes included.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Remove a trailing `Async` from a method name, unless nothing would be left.
///
/// # Examples
/// ```
/// use aotgen_core::utils::strip_async_suffix;
/// assert_eq!(strip_async_suffix("GetUserAsync"), "GetUser");
/// assert_eq!(strip_async_suffix("Async"), "Async");
/// ```
pub fn strip_async_suffix(name: &str) -> &str {
    match name.strip_suffix("Async") {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}
