// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Path template conversion.
//!
//! Rewrites `google.api.http` path templates (`/v1/{message.id}`) into the
//! router's native parameter syntax (`/v1/:message.id`).

pub mod path_template;

// Re-export for convenience
pub use path_template::*;
