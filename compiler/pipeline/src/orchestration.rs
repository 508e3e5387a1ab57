//! Pipeline orchestration for the main entry points.
//!
//! A run resolves every requested file in input order through a single
//! [`HttpRuleResolver`], so overload numbering is shared by all services of the
//! run. The first fatal error aborts the run and nothing is written.

use std::path::PathBuf;

use analysis::{has_http_rule, HttpRuleResolver};
use codegen::{write_generated, CodeGenerator, GeneratedFile, GoFileGenerator};
use config::GenerationOptions;
use ir::{FileDef, GenerationRequest};
use semantics::{Diagnostic, Diagnostics};
use tracing::{debug, info};

use crate::generation_context::GenerationContext;
use crate::Result;

/// Result of a successful run
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    /// Generated files in input order
    pub files: Vec<GeneratedFile>,
    /// Recoverable conditions encountered along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate sources for every requested file without touching the filesystem.
pub fn run(request: &GenerationRequest, options: &GenerationOptions) -> Result<GenerationOutput> {
    logging::trace("pipeline", "starting generation run");
    let mut resolver = HttpRuleResolver::new(options.omit_empty);
    let generator = GoFileGenerator::new(options.file_suffix.as_str());
    let mut diagnostics = Diagnostics::new();
    let mut files = Vec::new();

    for file in request.files_to_generate() {
        if let Some(generated) = generate_file(&mut resolver, &generator, file, &mut diagnostics)? {
            files.push(generated);
        }
    }

    info!(files = files.len(), warnings = diagnostics.len(), "generation run finished");
    Ok(GenerationOutput { files, diagnostics: diagnostics.into_vec() })
}

fn generate_file(
    resolver: &mut HttpRuleResolver,
    generator: &GoFileGenerator,
    file: &FileDef,
    diagnostics: &mut Diagnostics,
) -> Result<Option<GeneratedFile>> {
    if file.services.is_empty() {
        debug!(file = %file.name, "no services; skipped");
        return Ok(None);
    }
    if resolver.omit_empty() && !has_http_rule(file) {
        debug!(file = %file.name, "no HTTP rules in rules-only mode; skipped");
        return Ok(None);
    }

    let mut services = Vec::with_capacity(file.services.len());
    for service in &file.services {
        if let Some(descriptor) = resolver.resolve_service(file, service, diagnostics)? {
            services.push(descriptor);
        }
    }
    Ok(generator.generate(file, &services)?)
}

/// Run the pipeline for `ctx` and write the results under its output directory.
///
/// Returns the written paths together with the run's diagnostics.
pub fn compile(ctx: &GenerationContext) -> Result<(Vec<PathBuf>, Vec<Diagnostic>)> {
    let output = run(&ctx.request, &ctx.options)?;
    let written = write_generated(&ctx.output_dir, &output.files)?;
    Ok((written, output.diagnostics))
}
