//! Generators for the xhttp Go sources.

mod template;

/// Go comment helpers
pub mod doc_comment;

/// Service block: interface, registration function and handlers
pub mod xhttp_server;
pub use xhttp_server::render_service;

/// Whole-file assembly
pub mod go_file;
pub use go_file::GoFileGenerator;
