#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! xhttpgen Intermediate Representation (IR)
//!
//! This crate defines the service description consumed by the generator: proto
//! files, their services and methods, and the `google.api.http` binding rules
//! attached to each method. Syntax and semantic validity are assumed to have
//! been established upstream (by `protoc` or `buf`); this crate only models the
//! fields the generator reads and loads them from JSON.

pub mod service_ir;

// Re-export the main IR types for convenience
pub use service_ir::*;
