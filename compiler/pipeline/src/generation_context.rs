//! Generation context for one pipeline run.
//!
//! This module gathers everything a run needs: the request, the effective
//! options and where output goes.

use std::path::PathBuf;

use config::{Config, GenerationOptions};
use ir::GenerationRequest;

use crate::{PipelineError, Result};

/// Inputs of one generation run
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// The request being generated for
    pub request: GenerationRequest,
    /// Effective options after layering
    pub options: GenerationOptions,
    /// The base output directory for generated files
    pub output_dir: PathBuf,
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }
}

#[derive(Debug, Default)]
/// Builder for GenerationContext
pub struct GenerationContextBuilder {
    request: Option<GenerationRequest>,
    options: Option<GenerationOptions>,
    output_dir: Option<PathBuf>,
}

impl GenerationContextBuilder {
    /// Set the request
    pub fn request(mut self, request: GenerationRequest) -> Self {
        self.request = Some(request);
        self
    }

    /// Set the options; defaults apply when unset
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> Result<GenerationContext> {
        Ok(GenerationContext {
            request: self
                .request
                .ok_or_else(|| PipelineError::Message("request is required".to_string()))?,
            options: self.options.unwrap_or_default(),
            output_dir: self
                .output_dir
                .ok_or_else(|| PipelineError::Message("output_dir is required".to_string()))?,
        })
    }
}

/// Layer options: config file, then the request parameter, then a CLI override.
pub fn resolve_options(
    config: &Config,
    parameter: Option<&str>,
    omit_empty_override: Option<bool>,
) -> Result<GenerationOptions> {
    let mut options = GenerationOptions::from(&config.generation);
    if let Some(parameter) = parameter {
        options = options.with_parameter(parameter)?;
    }
    Ok(options.with_omit_empty(omit_empty_override))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_request_and_output_dir() {
        let err = GenerationContext::builder().output_dir("out").build().expect_err("no request");
        assert_eq!(err.to_string(), "request is required");

        let err = GenerationContext::builder()
            .request(GenerationRequest::default())
            .build()
            .expect_err("no output dir");
        assert_eq!(err.to_string(), "output_dir is required");

        let ctx = GenerationContext::builder()
            .request(GenerationRequest::default())
            .output_dir("out")
            .build()
            .expect("complete");
        assert_eq!(ctx.options, GenerationOptions::default());
        assert_eq!(ctx.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_resolve_options_precedence() {
        let mut config = Config::default();
        config.generation.omit_empty = false;

        assert!(!resolve_options(&config, None, None).expect("config").omit_empty);
        assert!(resolve_options(&config, Some("omitempty=true"), None).expect("param").omit_empty);
        assert!(
            !resolve_options(&config, Some("omitempty=true"), Some(false)).expect("cli").omit_empty
        );
        assert!(matches!(
            resolve_options(&config, Some("bogus=1"), Some(true)),
            Err(PipelineError::Config(_))
        ));
    }
}
