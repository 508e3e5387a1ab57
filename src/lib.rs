// SPDX-License-Identifier: CC0-1.0

//! xhttpgen umbrella crate.
//!
//! Re-exports the entry points most embedders need: load a request, pick
//! options, and run the pipeline.
//!
//! ```no_run
//! use xhttpgen::{run, GenerationOptions, GenerationRequest};
//!
//! let request = GenerationRequest::from_file("request.json".as_ref())?;
//! let output = run(&request, &GenerationOptions::from_parameter("omitempty=false")?)?;
//! for file in &output.files {
//!     println!("{}", file.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! All functional code lives in the workspace member crates under
//! `primitives`, `compiler` and `cli`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

pub use config::GenerationOptions;
pub use ir::GenerationRequest;
pub use pipeline::{compile, run, GenerationContext, GenerationOutput, PipelineError};

/// Miscellaneous metadata about the xhttpgen workspace.
pub mod xhttpgen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Name of the protoc plugin binary, as printed in generated-file banners.
    pub const PLUGIN_NAME: &str = codegen::PLUGIN_NAME;
}
