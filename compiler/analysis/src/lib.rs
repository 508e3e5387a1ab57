#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Resolution of service IR into route descriptors.
//!
//! This crate walks services and methods, resolves `google.api.http` rules
//! (including additional bindings) into [`MethodDescriptor`]s, and aggregates
//! them per service into [`ServiceDescriptor`]s. No text is generated here; the
//! descriptor tree is the hand-off to the code generator.

use semantics::AnnotationError;
use thiserror::Error;

pub mod descriptor;
pub mod naming;
pub mod resolver;

pub use descriptor::{HttpVerb, MethodDescriptor, ServiceDescriptor, ServiceDescriptorBuilder};
pub use resolver::{has_http_rule, HttpRuleResolver, OverloadCounter};

/// Errors that abort resolution.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A leading comment carries an invalid annotation.
    #[error("invalid annotation on {element}: {source}")]
    Annotation {
        /// Fully-qualified service or method the comment belongs to
        element: String,
        /// Underlying parse failure
        #[source]
        source: AnnotationError,
    },
}

impl AnalysisError {
    /// Name of the offending directive, when the failure is an unrecognised one
    pub fn directive_name(&self) -> Option<&str> {
        match self {
            AnalysisError::Annotation { source: AnnotationError::Unrecognized { name }, .. } => {
                Some(name)
            }
            AnalysisError::Annotation { .. } => None,
        }
    }
}

/// Result alias for resolution.
pub type Result<T> = std::result::Result<T, AnalysisError>;
