#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns a generation request into xhttp Go sources.
//!
//! ## Module Organization
//!
//! - `generation_context` - Run inputs (request, options, output directory) and option layering
//! - `orchestration` - Main pipeline entry points (`run`, `compile`)

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the codegen pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
    /// Fatal annotation or resolution error.
    #[error(transparent)]
    Analysis(#[from] analysis::AnalysisError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// Configuration or plugin parameter error.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Request loading error.
    #[error(transparent)]
    Ir(#[from] ir::IrError),
}

pub mod generation_context;
pub mod orchestration;

pub use generation_context::{resolve_options, GenerationContext, GenerationContextBuilder};
pub use orchestration::{compile, run, GenerationOutput};
