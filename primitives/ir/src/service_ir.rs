//! Service IR
//!
//! The shapes mirror what `protoc` hands to a plugin (files → services →
//! methods), reduced to the fields HTTP route generation needs. The JSON form
//! of [`HttpRule`] follows `google.api.HttpRule`:
//!
//! ```json
//! { "get": "/v1/{name}", "additional_bindings": [{ "post": "/v1/x", "body": "*" }] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or saving IR documents.
#[derive(Debug, Error)]
pub enum IrError {
    /// Failed to read or write the IR document.
    #[error("failed to access IR document: {0}")]
    Io(#[from] std::io::Error),
    /// The IR document is not valid JSON for the expected shape.
    #[error("malformed IR document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A whole generation request: every file the upstream compiler resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Raw plugin parameter string (e.g. `"omitempty=false"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Files in the order the upstream compiler listed them.
    #[serde(default)]
    pub files: Vec<FileDef>,
}

/// One `.proto` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDef {
    /// Proto path, e.g. `api/helloworld/v1/greeter.proto`
    pub name: String,
    /// Proto package, e.g. `helloworld.v1`
    #[serde(default)]
    pub package: String,
    /// Go package name used in the generated `package` clause
    pub go_package_name: String,
    /// Go import path of the generated package
    #[serde(default)]
    pub go_import_path: String,
    /// Whether output should be generated for this file (dependencies are listed too)
    #[serde(default = "default_generate")]
    pub generate: bool,
    /// Services declared in this file, in declaration order
    #[serde(default)]
    pub services: Vec<ServiceDef>,
}

fn default_generate() -> bool { true }

/// A service declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDef {
    /// Unqualified service name, e.g. `Greeter`
    pub name: String,
    /// Leading comment text attached to the service
    #[serde(default)]
    pub leading_comments: String,
    /// Whether the service carries `option deprecated = true`
    #[serde(default)]
    pub deprecated: bool,
    /// Methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

/// An RPC method declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    /// Proto method name, e.g. `SayHello`
    pub name: String,
    /// Request message
    pub input: MessageRef,
    /// Response message
    pub output: MessageRef,
    /// Whether the client streams requests
    #[serde(default)]
    pub client_streaming: bool,
    /// Whether the server streams responses
    #[serde(default)]
    pub server_streaming: bool,
    /// Leading comment text attached to the method
    #[serde(default)]
    pub leading_comments: String,
    /// `google.api.http` option, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpRule>,
}

/// Reference to a message type as seen from generated Go code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    /// Go identifier of the message, e.g. `HelloRequest`
    pub name: String,
    /// Go import path of the package declaring the message
    #[serde(default)]
    pub go_import_path: String,
}

/// A `google.api.HttpRule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRule {
    /// Verb + path template
    #[serde(flatten)]
    pub pattern: HttpPattern,
    /// Request body selector: empty, `*`, or a dotted field path
    #[serde(default)]
    pub body: String,
    /// Response body selector: empty, `*`, or a dotted field path
    #[serde(default)]
    pub response_body: String,
    /// Extra bindings for the same method. Nested additional bindings are ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_bindings: Vec<HttpRule>,
}

/// The verb/path selector of an [`HttpRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpPattern {
    /// `get: "<path>"`
    Get(String),
    /// `put: "<path>"`
    Put(String),
    /// `post: "<path>"`
    Post(String),
    /// `delete: "<path>"`
    Delete(String),
    /// `patch: "<path>"`
    Patch(String),
    /// `custom: { kind, path }`
    Custom(CustomPattern),
}

/// A custom verb binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Verb name, e.g. `HEAD`
    pub kind: String,
    /// Path template
    pub path: String,
}

impl GenerationRequest {
    /// Load a request from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, IrError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a request from a JSON string
    pub fn from_json(json: &str) -> Result<Self, IrError> { Ok(serde_json::from_str(json)?) }

    /// Save the request to a JSON file with pretty formatting
    pub fn to_file(&self, path: &Path) -> Result<(), IrError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        use std::io::Write;
        writeln!(file)?;
        Ok(())
    }

    /// Files whose output was requested
    pub fn files_to_generate(&self) -> impl Iterator<Item = &FileDef> {
        self.files.iter().filter(|f| f.generate)
    }
}

impl FileDef {
    /// Proto path without its `.proto` extension; generated file names derive from it.
    pub fn generated_filename_prefix(&self) -> &str {
        self.name.strip_suffix(".proto").unwrap_or(&self.name)
    }

    /// Fully-qualified name of a service declared in this file
    pub fn service_full_name(&self, service: &ServiceDef) -> String {
        if self.package.is_empty() {
            service.name.clone()
        } else {
            format!("{}.{}", self.package, service.name)
        }
    }
}

impl MethodDef {
    /// Streaming methods never receive HTTP bindings.
    pub fn is_streaming(&self) -> bool { self.client_streaming || self.server_streaming }
}

impl HttpPattern {
    /// Path template of the binding
    pub fn path(&self) -> &str {
        match self {
            HttpPattern::Get(path)
            | HttpPattern::Put(path)
            | HttpPattern::Post(path)
            | HttpPattern::Delete(path)
            | HttpPattern::Patch(path) => path,
            HttpPattern::Custom(custom) => &custom.path,
        }
    }
}

impl HttpRule {
    /// Convenience constructor for a rule without body selectors
    pub fn new(pattern: HttpPattern) -> Self {
        Self {
            pattern,
            body: String::new(),
            response_body: String::new(),
            additional_bindings: Vec::new(),
        }
    }

    /// Set the request body selector
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the response body selector
    pub fn with_response_body(mut self, response_body: impl Into<String>) -> Self {
        self.response_body = response_body.into();
        self
    }

    /// Append an additional binding
    pub fn with_additional_binding(mut self, binding: HttpRule) -> Self {
        self.additional_bindings.push(binding);
        self
    }
}

impl MessageRef {
    /// Reference to a message declared in `go_import_path`
    pub fn new(name: impl Into<String>, go_import_path: impl Into<String>) -> Self {
        Self { name: name.into(), go_import_path: go_import_path.into() }
    }
}
