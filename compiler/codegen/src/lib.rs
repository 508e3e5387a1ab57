#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Go code generation for fiber/kratos xhttp routing.
//!
//! This crate turns resolved [`ServiceDescriptor`]s into `_xhttp.pb.go` sources:
//! a server interface per service, a registration function wiring every route
//! onto a `fiber.Router` group, and one handler constructor per route.
//!
//! Resolution of HTTP rules and annotations lives in the `analysis` crate; this
//! crate only renders and persists.

pub mod generators;
pub mod imports;

use std::fs;
use std::path::{Component, Path, PathBuf};

use analysis::ServiceDescriptor;
use ir::FileDef;
use thiserror::Error;
use tracing::info;

pub use generators::{render_service, GoFileGenerator};
pub use imports::GoImports;

/// Name of the plugin as written into generated banners
pub const PLUGIN_NAME: &str = "protoc-gen-go-xhttp";

/// Version string written into generated banners
pub const RELEASE: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Underlying I/O error while writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<String> for CodegenError {
    fn from(msg: String) -> Self { CodegenError::Message(msg) }
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// One generated source file, named relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path, e.g. `api/hello/v1/hello_xhttp.pb.go`
    pub name: String,
    /// Cleaned file content
    pub content: String,
}

/// Defines the core interface for generating one output file from the resolved
/// services of one input file.
pub trait CodeGenerator {
    /// Render `services` of `file`. `Ok(None)` means the file produces no output.
    fn generate(&self, file: &FileDef, services: &[ServiceDescriptor])
        -> Result<Option<GeneratedFile>>;
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<&str> = src.lines().map(str::trim_end).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

/// Persist generated files under `out_dir`, creating any necessary subdirectories.
///
/// Returns the written paths in input order. Names that are absolute or climb out
/// of `out_dir` are rejected before anything is written.
pub fn write_generated<P: AsRef<Path>>(out_dir: P, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    for file in files {
        let escapes = Path::new(&file.name)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(format!("refusing to write outside the output directory: {}", file.name).into());
        }
    }

    fs::create_dir_all(&out_dir)?;
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.as_ref().join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, clean_generated_source(&file.content).as_bytes())?;
        info!(path = %path.display(), "generated file written");
        written.push(path);
    }
    Ok(written)
}
