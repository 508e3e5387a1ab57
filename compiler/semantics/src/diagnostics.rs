use std::fmt;

/// Kind of a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// `@Path`, `@Name` or `@Customs` without an argument; the directive is ignored.
    EmptyAnnotationArgument,
    /// A verb that expects a body has no body selector; no body binding is generated.
    MissingBodyDeclaration,
    /// GET or DELETE declares a body selector; the selector is ignored.
    BodyOnGetOrDelete,
}

impl DiagnosticKind {
    /// Stable identifier used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::EmptyAnnotationArgument => "empty-annotation-argument",
            DiagnosticKind::MissingBodyDeclaration => "missing-body-declaration",
            DiagnosticKind::BodyOnGetOrDelete => "body-on-get-or-delete",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A structured warning emitted during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WARN[{}]: {}", self.kind, self.message)
    }
}

/// Collector for the warnings of one generation run.
///
/// Every recorded diagnostic is also logged at WARN level as it arrives.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector
    pub fn new() -> Self { Self::default() }

    /// Record a warning
    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = %kind, "{}", message);
        self.entries.push(Diagnostic { kind, message });
    }

    /// All diagnostics in emission order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> { self.entries.iter() }

    /// Number of diagnostics of the given kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Total number of diagnostics
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Consume the collector
    pub fn into_vec(self) -> Vec<Diagnostic> { self.entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.warn(DiagnosticKind::MissingBodyDeclaration, "Post /a does not declare a body.");
        diagnostics.warn(DiagnosticKind::BodyOnGetOrDelete, "Get /b body should not be declared.");
        diagnostics.warn(DiagnosticKind::MissingBodyDeclaration, "Put /c does not declare a body.");

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::MissingBodyDeclaration), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::EmptyAnnotationArgument), 0);

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages[1], "Get /b body should not be declared.");
    }

    #[test]
    fn test_display() {
        let d = Diagnostic {
            kind: DiagnosticKind::EmptyAnnotationArgument,
            message: "the path annotation is empty, use the default value.".into(),
        };
        assert_eq!(
            d.to_string(),
            "WARN[empty-annotation-argument]: the path annotation is empty, use the default value."
        );
    }
}
