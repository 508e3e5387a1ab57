#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Collection of utilities for the `protoc-gen-go-xhttp` command.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use config::Config;
use ir::GenerationRequest;
use pipeline::GenerationContext;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while running the command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The generation run failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The request could not be read or parsed.
    #[error(transparent)]
    Ir(#[from] ir::IrError),
}

/// Result type alias for command operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line interface configuration.
#[derive(Parser, Debug)]
#[command(
    name = "protoc-gen-go-xhttp",
    about = "Generate fiber/kratos xhttp routing code from a service description",
    version = codegen::RELEASE
)]
pub struct Args {
    /// Generation request JSON; read from stdin when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Directory generated files are written under
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Only generate routes for methods with an explicit HTTP rule
    #[arg(long)]
    pub omitempty: Option<bool>,
    /// Configuration file; defaults to the user config directory
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Read the request from `input`, or from stdin when no path is given.
pub fn read_request(input: Option<&Path>) -> Result<GenerationRequest> {
    match input {
        Some(path) => Ok(GenerationRequest::from_file(path)?),
        None => {
            let mut json = String::new();
            std::io::stdin().read_to_string(&mut json).map_err(ir::IrError::from)?;
            Ok(GenerationRequest::from_json(&json)?)
        }
    }
}

/// Run one generation and return the written paths.
pub fn execute(args: &Args) -> Result<Vec<PathBuf>> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default()?,
    };
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_with_file(level, config.logging.file.as_deref());

    let request = read_request(args.input.as_deref())?;
    let options =
        pipeline::resolve_options(&config, request.parameter.as_deref(), args.omitempty)?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output.output_dir.clone());

    let ctx = GenerationContext::builder()
        .request(request)
        .options(options)
        .output_dir(output_dir)
        .build()?;
    let (written, diagnostics) = pipeline::compile(&ctx)?;
    if !diagnostics.is_empty() {
        warn!(count = diagnostics.len(), "generation finished with warnings");
    }
    Ok(written)
}
