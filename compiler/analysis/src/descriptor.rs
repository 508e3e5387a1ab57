//! Route descriptors handed to the code generator.

use std::collections::BTreeMap;
use std::fmt;

use ir::MessageRef;
use semantics::Annotation;

use crate::naming;

/// HTTP verb of one binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// Verb taken verbatim from a custom binding
    Custom(String),
}

impl HttpVerb {
    /// Upper-case wire name, e.g. `GET`
    pub fn as_str(&self) -> &str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Put => "PUT",
            HttpVerb::Post => "POST",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Custom(kind) => kind,
        }
    }

    /// Router registration method, e.g. `Get` for `api.Get(...)`
    pub fn router_method(&self) -> String {
        match self {
            HttpVerb::Get => "Get".to_string(),
            HttpVerb::Put => "Put".to_string(),
            HttpVerb::Post => "Post".to_string(),
            HttpVerb::Delete => "Delete".to_string(),
            HttpVerb::Patch => "Patch".to_string(),
            HttpVerb::Custom(kind) => naming::camel_case(&kind.to_lowercase()),
        }
    }

    /// GET and DELETE never carry a request body.
    pub fn forbids_body(&self) -> bool { matches!(self, HttpVerb::Get | HttpVerb::Delete) }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One route: a method bound to one verb/path pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Go method name
    pub name: String,
    /// Occurrence number of `name` within the generation run
    pub overload_index: usize,
    /// Request message
    pub request: MessageRef,
    /// Reply message
    pub reply: MessageRef,
    /// Router-native path
    pub route_path: String,
    /// HTTP verb
    pub http_verb: HttpVerb,
    /// Whether the path binds parameters
    pub has_path_params: bool,
    /// Whether the request body is bound
    pub has_body: bool,
    /// Field path the body binds to (`.MyField.SubId`); empty means the whole message
    pub body_selector: String,
    /// Field path of the response body; empty means the whole message
    pub response_body_selector: String,
    /// Free-text comment rendered above the handler
    pub comments: String,
    /// Method-level annotation, absent for synthesized routes
    pub annotation: Option<Annotation>,
}

impl MethodDescriptor {
    /// Name of the generated handler constructor, unique per run.
    pub fn handler_name(&self, service_type: &str) -> String {
        format!("_{}_{}{}_XHTTP_Handler", service_type, self.name, self.overload_index)
    }

    /// Whether the body binds to a nested field rather than the whole message
    pub fn has_partial_body(&self) -> bool { self.has_body && !self.body_selector.is_empty() }
}

/// All routes of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Go type name, e.g. `Greeter`
    pub type_name: String,
    /// Fully-qualified proto name, e.g. `helloworld.v1.Greeter`
    pub full_name: String,
    /// Group prefix every route is registered under
    pub route_prefix: String,
    /// Free-text comment rendered above the interface
    pub comments: String,
    /// Whether the service is deprecated
    pub deprecated: bool,
    /// Service-level annotation
    pub annotation: Option<Annotation>,
    /// Routes in discovery order
    pub methods: Vec<MethodDescriptor>,
}

impl ServiceDescriptor {
    /// Routes keyed by method name. Later overloads replace earlier ones.
    pub fn methods_by_name(&self) -> BTreeMap<&str, &MethodDescriptor> {
        let mut by_name = BTreeMap::new();
        for method in &self.methods {
            by_name.insert(method.name.as_str(), method);
        }
        by_name
    }

    /// Interface name of the generated server
    pub fn server_interface(&self) -> String { format!("{}XHTTPServer", self.type_name) }
}

/// Builder for [`ServiceDescriptor`]
#[derive(Debug, Default)]
pub struct ServiceDescriptorBuilder {
    type_name: String,
    full_name: String,
    deprecated: bool,
    annotation: Option<Annotation>,
    methods: Vec<MethodDescriptor>,
}

impl ServiceDescriptorBuilder {
    /// Start a service with its Go type name and fully-qualified proto name
    pub fn new(type_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), full_name: full_name.into(), ..Default::default() }
    }

    /// Set the service-level annotation
    pub fn annotation(mut self, annotation: Option<Annotation>) -> Self {
        self.annotation = annotation;
        self
    }

    /// Mark the service deprecated
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Append routes in discovery order
    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Number of routes collected so far
    pub fn method_count(&self) -> usize { self.methods.len() }

    /// Finish the service. A service without routes produces nothing.
    pub fn build(self) -> Option<ServiceDescriptor> {
        if self.methods.is_empty() {
            return None;
        }

        let route_prefix = match self.annotation.as_ref().and_then(|a| a.path.as_deref()) {
            Some(path) => format!("api/{path}"),
            None => naming::route_prefix(&self.full_name),
        };
        let comments =
            self.annotation.as_ref().map(|a| a.comment.clone()).unwrap_or_default();
        let default_name = format!("{}-XHTTPServer", self.type_name);
        let annotation = self.annotation.map(|a| a.with_default_name(default_name));

        Some(ServiceDescriptor {
            type_name: self.type_name,
            full_name: self.full_name,
            route_prefix,
            comments,
            deprecated: self.deprecated,
            annotation,
            methods: self.methods,
        })
    }
}
