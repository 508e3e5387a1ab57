#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Semantic layer of the generator.
//!
//! Turns the freeform leading comments of services and methods into structured
//! [`Annotation`]s, and models the non-fatal [`Diagnostic`]s raised anywhere in
//! the pipeline. Hard failures ([`AnnotationError`]) and warnings are kept
//! apart: the former abort the run, the latter are collected and reported.

/// Comment annotation mini-language
pub mod annotation;

/// Recoverable diagnostics
pub mod diagnostics;

pub use annotation::{parse_annotation, Annotation, AnnotationError, Directive};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

/// Result type for annotation parsing.
pub type Result<T> = std::result::Result<T, AnnotationError>;
