use analysis::ServiceDescriptor;
use ir::FileDef;
use tracing::debug;

use super::template::fill;
use super::xhttp_server::render_service;
use crate::imports::GoImports;
use crate::{clean_generated_source, CodeGenerator, GeneratedFile, Result, PLUGIN_NAME, RELEASE};

const FILE_HEADER_TEMPLATE: &str = include_str!("../../templates/file_header.go.tmpl");

/// Default suffix appended to the proto path of every generated file
pub const DEFAULT_FILE_SUFFIX: &str = "_xhttp.pb.go";

/// Assembles one `_xhttp.pb.go` file per input file.
#[derive(Debug, Clone)]
pub struct GoFileGenerator {
    file_suffix: String,
}

impl Default for GoFileGenerator {
    fn default() -> Self { Self::new(DEFAULT_FILE_SUFFIX) }
}

impl GoFileGenerator {
    /// Create a generator writing files named `<proto path>{file_suffix}`
    pub fn new(file_suffix: impl Into<String>) -> Self { Self { file_suffix: file_suffix.into() } }

    /// Output name for `file`, relative to the output directory
    pub fn file_name(&self, file: &FileDef) -> String {
        format!("{}{}", file.generated_filename_prefix(), self.file_suffix)
    }
}

impl CodeGenerator for GoFileGenerator {
    fn generate(
        &self,
        file: &FileDef,
        services: &[ServiceDescriptor],
    ) -> Result<Option<GeneratedFile>> {
        if services.is_empty() {
            debug!(file = %file.name, "no services with routes; nothing generated");
            return Ok(None);
        }

        let imports = GoImports::collect(&file.go_import_path, services);
        let mut out = fill(
            FILE_HEADER_TEMPLATE,
            &[
                ("PLUGIN_NAME", PLUGIN_NAME),
                ("RELEASE", RELEASE),
                ("PACKAGE", file.go_package_name.as_str()),
                ("IMPORTS", imports.render_block().as_str()),
            ],
        );

        for service in services {
            out.push('\n');
            out.push_str(&render_service(service, &imports)?);
        }

        Ok(Some(GeneratedFile { name: self.file_name(file), content: clean_generated_source(&out) }))
    }
}
