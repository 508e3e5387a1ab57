//! HTTP rule resolution.
//!
//! One [`HttpRuleResolver`] lives for exactly one generation run. It owns the
//! overload counter, so handler names stay unique across every service and
//! file of the run.

use std::collections::HashMap;

use ir::{FileDef, HttpPattern, HttpRule, MethodDef, ServiceDef};
use semantics::{parse_annotation, Annotation, DiagnosticKind, Diagnostics};
use tracing::debug;

use crate::descriptor::{HttpVerb, MethodDescriptor, ServiceDescriptor, ServiceDescriptorBuilder};
use crate::naming::{camel_case, camel_case_path};
use crate::{AnalysisError, Result};

/// Per-run occurrence counter keyed by method name.
#[derive(Debug, Clone, Default)]
pub struct OverloadCounter {
    next: HashMap<String, usize>,
}

impl OverloadCounter {
    /// Create an empty counter
    pub fn new() -> Self { Self::default() }

    /// Current index for `name`, then advance it.
    pub fn next(&mut self, name: &str) -> usize {
        let slot = self.next.entry(name.to_string()).or_insert(0);
        let index = *slot;
        *slot += 1;
        index
    }

    /// Index the next descriptor for `name` would receive
    pub fn peek(&self, name: &str) -> usize { self.next.get(name).copied().unwrap_or(0) }
}

/// Resolves services and methods into descriptors.
#[derive(Debug)]
pub struct HttpRuleResolver {
    omit_empty: bool,
    overloads: OverloadCounter,
}

impl HttpRuleResolver {
    /// Create a resolver for one run.
    ///
    /// With `omit_empty` set, methods without an explicit rule are skipped
    /// instead of receiving a synthesized `POST /<service>/<method>` route.
    pub fn new(omit_empty: bool) -> Self { Self { omit_empty, overloads: OverloadCounter::new() } }

    /// Whether rules-only mode is active
    pub fn omit_empty(&self) -> bool { self.omit_empty }

    /// Read access to the run's overload counter
    pub fn overloads(&self) -> &OverloadCounter { &self.overloads }

    /// Resolve one service. Returns `None` when no route survives.
    pub fn resolve_service(
        &mut self,
        file: &FileDef,
        service: &ServiceDef,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<ServiceDescriptor>> {
        let full_name = file.service_full_name(service);
        debug!(service = %full_name, "resolving service");

        let annotation = parse_annotation(&service.leading_comments, diagnostics)
            .map_err(|source| AnalysisError::Annotation { element: full_name.clone(), source })?;

        let mut builder = ServiceDescriptorBuilder::new(camel_case(&service.name), &full_name)
            .annotation(annotation)
            .deprecated(service.deprecated);
        for method in &service.methods {
            builder = builder.methods(self.resolve_method(&full_name, method, diagnostics)?);
        }

        if builder.method_count() == 0 {
            debug!(service = %full_name, "no routes; service skipped");
        }
        Ok(builder.build())
    }

    /// Resolve every binding of one method, additional bindings first.
    pub fn resolve_method(
        &mut self,
        service_full_name: &str,
        method: &MethodDef,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<MethodDescriptor>> {
        if method.is_streaming() {
            debug!(method = %method.name, "streaming method skipped");
            return Ok(Vec::new());
        }

        let Some(rule) = &method.http else {
            if self.omit_empty {
                return Ok(Vec::new());
            }
            let path = format!("/{}/{}", service_full_name, method.name);
            return Ok(vec![self.build_method_desc(method, HttpVerb::Post, path)]);
        };

        let annotation = parse_annotation(&method.leading_comments, diagnostics).map_err(
            |source| AnalysisError::Annotation {
                element: format!("{}.{}", service_full_name, method.name),
                source,
            },
        )?;

        let mut descriptors = Vec::with_capacity(rule.additional_bindings.len() + 1);
        for binding in &rule.additional_bindings {
            descriptors.push(self.build_http_rule(method, binding, annotation.as_ref(), diagnostics));
        }
        descriptors.push(self.build_http_rule(method, rule, annotation.as_ref(), diagnostics));
        Ok(descriptors)
    }

    fn build_http_rule(
        &mut self,
        method: &MethodDef,
        rule: &HttpRule,
        annotation: Option<&Annotation>,
        diagnostics: &mut Diagnostics,
    ) -> MethodDescriptor {
        let (verb, template) = match &rule.pattern {
            HttpPattern::Get(path) => (HttpVerb::Get, path),
            HttpPattern::Put(path) => (HttpVerb::Put, path),
            HttpPattern::Post(path) => (HttpVerb::Post, path),
            HttpPattern::Delete(path) => (HttpVerb::Delete, path),
            HttpPattern::Patch(path) => (HttpVerb::Patch, path),
            HttpPattern::Custom(custom) => (HttpVerb::Custom(custom.kind.clone()), &custom.path),
        };

        let mut md = self.build_method_desc(method, verb, template.clone());
        let route = path::convert(template);
        md.has_path_params = route.has_params;
        md.route_path = route.path;

        if let Some(annotation) = annotation {
            md.comments = annotation.comment.clone();
            let default_name = format!("{}.{}-XHTTP_Handler", md.name, md.overload_index);
            md.annotation = Some(annotation.clone().with_default_name(default_name));
        }

        let router_verb = md.http_verb.router_method();
        if md.http_verb.forbids_body() {
            if !rule.body.is_empty() {
                diagnostics.warn(
                    DiagnosticKind::BodyOnGetOrDelete,
                    format!("{} {} body should not be declared.", router_verb, template),
                );
            }
            md.has_body = false;
        } else if rule.body == "*" {
            md.has_body = true;
            md.body_selector = String::new();
        } else if !rule.body.is_empty() {
            md.has_body = true;
            md.body_selector = format!(".{}", camel_case_path(&rule.body));
        } else {
            md.has_body = false;
            diagnostics.warn(
                DiagnosticKind::MissingBodyDeclaration,
                format!("{} {} does not declare a body.", router_verb, template),
            );
        }

        if !rule.response_body.is_empty() && rule.response_body != "*" {
            md.response_body_selector = format!(".{}", camel_case_path(&rule.response_body));
        }
        md
    }

    fn build_method_desc(
        &mut self,
        method: &MethodDef,
        verb: HttpVerb,
        path: String,
    ) -> MethodDescriptor {
        let name = camel_case(&method.name);
        let overload_index = self.overloads.next(&name);
        debug!(method = %name, overload_index, verb = %verb, path = %path, "route resolved");
        MethodDescriptor {
            name,
            overload_index,
            request: method.input.clone(),
            reply: method.output.clone(),
            route_path: path,
            http_verb: verb,
            has_path_params: false,
            has_body: false,
            body_selector: String::new(),
            response_body_selector: String::new(),
            comments: String::new(),
            annotation: None,
        }
    }
}

/// Whether any non-streaming method of `file` carries an explicit rule.
pub fn has_http_rule(file: &FileDef) -> bool {
    file.services
        .iter()
        .flat_map(|s| &s.methods)
        .any(|m| !m.is_streaming() && m.http.is_some())
}
