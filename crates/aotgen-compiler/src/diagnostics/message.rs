use rowan::TextRange;

use super::Span;
use crate::source_map::SourceId;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics have overlapping spans, the higher-priority one
/// suppresses the lower-priority one. This prevents cascading error noise.
///
/// Priority rationale:
/// - Unclosed delimiters cause massive cascading errors downstream
/// - Expected token errors are root causes the user should fix first
/// - Stray tokens are specific mistakes at a location
/// - Semantic errors assume valid syntax
/// - Generator warnings describe valid code the generator cannot fully use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the file
    UnclosedBrace,
    UnclosedParen,
    UnclosedBracket,
    UnclosedTypeArguments,

    // User omitted something required - root cause errors
    ExpectedIdentifier,
    ExpectedType,
    ExpectedExpression,
    ExpectedSemicolon,
    ExpectedDeclaration,

    // User wrote something that doesn't belong
    UnexpectedToken,
    UnsupportedDeclaration,

    // Valid syntax, invalid semantics
    DuplicateTypeDefinition,
    UnresolvedType,

    // Generator warnings
    LibraryNotReferenced,
    SchemaNotAotSchema,
    DuplicateRootType,
    InvalidAttributeArgument,
    AmbiguousInputConstructor,
    UnscannableType,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnsupportedDeclaration
            | Self::LibraryNotReferenced
            | Self::SchemaNotAotSchema
            | Self::DuplicateRootType
            | Self::InvalidAttributeArgument
            | Self::AmbiguousInputConstructor
            | Self::UnscannableType => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when spans overlap.
    ///
    /// Uses enum discriminant ordering: lower position = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Structural errors are Unclosed* - they cause cascading errors but
    /// should be suppressed by root-cause errors at the same position.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedBrace
                | Self::UnclosedParen
                | Self::UnclosedBracket
                | Self::UnclosedTypeArguments
        )
    }

    /// Root cause errors - user omitted something required.
    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedIdentifier
                | Self::ExpectedType
                | Self::ExpectedExpression
                | Self::ExpectedSemicolon
                | Self::ExpectedDeclaration
        )
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::SchemaNotAotSchema => Some("derive the schema class from `GraphQL.Types.AotSchema`"),
            Self::UnscannableType => {
                Some("open generic types cannot be scanned; close them with concrete type arguments")
            }
            Self::AmbiguousInputConstructor => {
                Some("mark the intended constructor with `[GraphQLConstructor]`")
            }
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBrace => "missing closing `}`",
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedTypeArguments => "missing closing `>`",

            Self::ExpectedIdentifier => "expected identifier",
            Self::ExpectedType => "expected type",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedSemicolon => "expected `;`",
            Self::ExpectedDeclaration => "expected a declaration",

            Self::UnexpectedToken => "unexpected token",
            Self::UnsupportedDeclaration => "declaration is ignored by the generator",

            Self::DuplicateTypeDefinition => "duplicate type definition",
            Self::UnresolvedType => "type could not be resolved",

            Self::LibraryNotReferenced => "the GraphQL library is not referenced; nothing is generated",
            Self::SchemaNotAotSchema => "schema class does not derive from `AotSchema`",
            Self::DuplicateRootType => "root type declared more than once",
            Self::InvalidAttributeArgument => "attribute argument is ignored",
            Self::AmbiguousInputConstructor => "input type has several public constructors",
            Self::UnscannableType => "type cannot be scanned",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateTypeDefinition => "`{}` is already defined".to_string(),
            Self::UnresolvedType => "type `{}` could not be resolved".to_string(),
            Self::SchemaNotAotSchema => "`{}` does not derive from `AotSchema`".to_string(),
            Self::DuplicateRootType => "{} root type already declared; this one is ignored".to_string(),
            Self::AmbiguousInputConstructor => {
                "`{}` has several public constructors; using the first one".to_string()
            }
            Self::UnscannableType => "type `{}` cannot be scanned".to_string(),

            // Parser supplies the full sentence (`expected field name`)
            Self::ExpectedIdentifier
            | Self::ExpectedType
            | Self::ExpectedExpression
            | Self::ExpectedSemicolon
            | Self::ExpectedDeclaration => "{}".to_string(),

            Self::UnclosedBrace
            | Self::UnclosedParen
            | Self::UnclosedBracket
            | Self::UnclosedTypeArguments => format!("{}; {{}}", self.fallback_message()),

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    /// Which source this diagnostic belongs to.
    pub(crate) source: SourceId,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    /// The range used for suppression logic. Defaults to `range` but can be
    /// set to a parent context (e.g., the enclosing declaration) for better
    /// cascading error suppression.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl Diagnostic {
    pub(crate) fn new(
        source: SourceId,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source,
            range,
            suppression_range: range,
            message: message.into(),
            fix: None,
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(
        source: SourceId,
        kind: DiagnosticKind,
        range: TextRange,
    ) -> Self {
        Self::new(source, kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        Span::new(self.source, self.range)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.span.range.start()),
                u32::from(related.span.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
