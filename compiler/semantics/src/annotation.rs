//! Leading-comment annotations.
//!
//! A comment block is read line by line. `//` markers are optional and
//! stripped. Lines starting with `@` are directives:
//!
//! | Directive | Effect | Argument |
//! |---|---|---|
//! | `@Path("x")` | route prefix / path override | required |
//! | `@Name("x")` | display name | required |
//! | `@Auth` | authenticator + authorizer middleware | - |
//! | `@Operations` | operations middleware | - |
//! | `@Validate` | request validation | - |
//! | `@Customs("a,b")` | custom middleware names | required |
//!
//! Every other line is prose; the last prose line becomes the comment.

use std::fmt;

use thiserror::Error;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Structured directives extracted from one comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Last non-directive line
    pub comment: String,
    /// `@Path` argument
    pub path: Option<String>,
    /// `@Name` argument
    pub name: Option<String>,
    /// `@Auth` present
    pub auth: bool,
    /// `@Operations` present
    pub operations: bool,
    /// `@Validate` present
    pub validate: bool,
    /// `@Customs` argument, split on commas
    pub customs: Vec<String>,
}

impl Annotation {
    /// Fill in the display name when no `@Name` directive supplied one.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        if self.name.is_none() {
            self.name = Some(name.into());
        }
        self
    }

    /// Display name, empty when none was set
    pub fn display_name(&self) -> &str { self.name.as_deref().unwrap_or_default() }
}

/// Recognised directive names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `@Path`
    Path,
    /// `@Name`
    Name,
    /// `@Auth`
    Auth,
    /// `@Operations`
    Operations,
    /// `@Validate`
    Validate,
    /// `@Customs`
    Customs,
}

impl Directive {
    /// Look up a directive by its exact (case-sensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Path" => Some(Directive::Path),
            "Name" => Some(Directive::Name),
            "Auth" => Some(Directive::Auth),
            "Operations" => Some(Directive::Operations),
            "Validate" => Some(Directive::Validate),
            "Customs" => Some(Directive::Customs),
            _ => None,
        }
    }

    /// Directive name as written after `@`
    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::Path => "Path",
            Directive::Name => "Name",
            Directive::Auth => "Auth",
            Directive::Operations => "Operations",
            Directive::Validate => "Validate",
            Directive::Customs => "Customs",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Fatal annotation errors. Any of these aborts the whole generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// A directive name outside the recognised set.
    #[error("{name} is not a valid annotation")]
    Unrecognized {
        /// The offending directive name
        name: String,
    },
    /// An argument that is not wrapped as `("...")`.
    #[error("malformed argument for @{directive}: {argument}")]
    MalformedArgument {
        /// Directive carrying the argument
        directive: Directive,
        /// Raw argument text
        argument: String,
    },
}

/// Parse a leading-comment block.
///
/// Returns `Ok(None)` for a blank comment. Empty arguments on directives that
/// require one are reported to `diagnostics` and otherwise ignored.
pub fn parse_annotation(
    comment: &str,
    diagnostics: &mut Diagnostics,
) -> crate::Result<Option<Annotation>> {
    if comment.trim().is_empty() {
        return Ok(None);
    }

    let mut annotation = Annotation::default();
    for line in comment.lines() {
        let line = line.trim();
        let line = line.strip_prefix("//").unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }
        let Some(directive_text) = line.strip_prefix('@') else {
            annotation.comment = line.to_string();
            continue;
        };

        let compact: String = directive_text.chars().filter(|c| !c.is_whitespace()).collect();
        let split = compact
            .find(|c: char| !(c.is_ascii_alphabetic() || c == '_'))
            .unwrap_or(compact.len());
        let (name, raw_argument) = compact.split_at(split);
        let directive = Directive::from_name(name)
            .ok_or_else(|| AnnotationError::Unrecognized { name: name.to_string() })?;

        match directive {
            Directive::Auth => annotation.auth = true,
            Directive::Operations => annotation.operations = true,
            Directive::Validate => annotation.validate = true,
            Directive::Path => {
                if let Some(value) = required_argument(directive, raw_argument, diagnostics)? {
                    annotation.path = Some(value);
                }
            }
            Directive::Name => {
                if let Some(value) = required_argument(directive, raw_argument, diagnostics)? {
                    annotation.name = Some(value);
                }
            }
            Directive::Customs => {
                if let Some(value) = required_argument(directive, raw_argument, diagnostics)? {
                    let customs: Vec<String> = value
                        .split(',')
                        .map(|item| item.trim_matches(|c| c == '"' || c == '\''))
                        .filter(|item| !item.is_empty())
                        .map(str::to_string)
                        .collect();
                    if customs.is_empty() {
                        warn_empty(directive, diagnostics);
                    } else {
                        annotation.customs = customs;
                    }
                }
            }
        }
    }
    Ok(Some(annotation))
}

/// Extract the quoted argument, warning and yielding `None` when it is empty.
fn required_argument(
    directive: Directive,
    raw: &str,
    diagnostics: &mut Diagnostics,
) -> crate::Result<Option<String>> {
    let value = if raw.is_empty() { String::new() } else { unquote(directive, raw)? };
    if value.is_empty() {
        warn_empty(directive, diagnostics);
        return Ok(None);
    }
    Ok(Some(value))
}

fn warn_empty(directive: Directive, diagnostics: &mut Diagnostics) {
    diagnostics.warn(
        DiagnosticKind::EmptyAnnotationArgument,
        format!("the {} annotation is empty, use the default value.", directive.as_str().to_lowercase()),
    );
}

/// Strip exactly one `("` … `")` layer. Single quotes are accepted as well.
fn unquote(directive: Directive, raw: &str) -> crate::Result<String> {
    let malformed =
        || AnnotationError::MalformedArgument { directive, argument: raw.to_string() };
    let inner = raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')).ok_or_else(malformed)?;
    ['"', '\'']
        .into_iter()
        .find_map(|quote| inner.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)))
        .map(str::to_string)
        .ok_or_else(malformed)
}
