//! Service block rendering.
//!
//! A service block is the server interface, the `Register<Svc>XHTTPServer`
//! function and one handler constructor per route. Rendering is pure: the
//! same descriptor and import set always produce the same text.

use std::fmt::Write as _;

use analysis::{MethodDescriptor, ServiceDescriptor};
use semantics::Annotation;

use super::doc_comment::{format_go_comment, service_doc};
use super::template::fill;
use crate::imports::GoImports;
use crate::Result;

const SERVICE_TEMPLATE: &str = include_str!("../../templates/service.go.tmpl");
const HANDLER_TEMPLATE: &str = include_str!("../../templates/handler.go.tmpl");

const SEND_ERROR: &str = "apistate.Error[any]().WithError(err).Send(c)";

/// Render one service block.
pub fn render_service(service: &ServiceDescriptor, imports: &GoImports) -> Result<String> {
    let interface = service.server_interface();

    let mut interface_methods = String::new();
    for (name, method) in service.methods_by_name() {
        writeln!(
            interface_methods,
            "\t{}(context.Context, *{}) (*{}, error)",
            name,
            imports.qualify(&method.request),
            imports.qualify(&method.reply)
        )?;
    }

    let mut routes = String::new();
    for method in &service.methods {
        render_route(&mut routes, &service.type_name, method)?;
    }

    let mut handlers = String::new();
    for method in &service.methods {
        handlers.push('\n');
        handlers.push_str(&render_handler(service, method, imports)?);
    }

    let group_middleware = match &service.annotation {
        Some(annotation) => render_group_middleware(annotation)?,
        None => String::new(),
    };

    let service_doc = service_doc(&service.comments, service.deprecated);
    Ok(fill(
        SERVICE_TEMPLATE,
        &[
            ("SERVICE_DOC", service_doc.as_str()),
            ("SERVER_INTERFACE", interface.as_str()),
            ("INTERFACE_METHODS", interface_methods.as_str()),
            ("ROUTE_PREFIX", service.route_prefix.as_str()),
            ("GROUP_MIDDLEWARE", group_middleware.as_str()),
            ("ROUTES", routes.as_str()),
            ("HANDLERS", handlers.as_str()),
        ],
    ))
}

/// Group-level middleware from the service annotation, applied once.
fn render_group_middleware(annotation: &Annotation) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "\t\t// Register all service annotation")?;
    writeln!(out, "\t\t{{")?;
    writeln!(out, "\t\t\tapi.Name(\"{}\")", annotation.display_name())?;
    if annotation.auth {
        writeln!(out, "\t\t\tapi.Use(middleware.Authenticator(), middleware.Authorizer())")?;
    }
    if annotation.operations {
        writeln!(out, "\t\t\tapi.Use(middleware.Operations())")?;
    }
    if annotation.validate {
        writeln!(out, "\t\t\tapi.Use(middleware.Validator())")?;
    }
    for custom in &annotation.customs {
        writeln!(out, "\t\t\tapi.Use(middleware.CustomMiddleware({custom}))")?;
    }
    writeln!(out, "\t\t}}")?;
    Ok(out)
}

/// One `api.<Verb>(...)` registration line, in discovery order.
fn render_route(out: &mut String, service_type: &str, method: &MethodDescriptor) -> Result<()> {
    let handler = method.handler_name(service_type);
    let verb = method.http_verb.router_method();
    match &method.annotation {
        Some(annotation) => {
            let mut middleware = String::new();
            if annotation.auth {
                middleware.push_str("middleware.Authenticator(), middleware.Authorizer(), ");
            }
            if annotation.operations {
                middleware.push_str("middleware.Operations(), ");
            }
            for custom in &annotation.customs {
                write!(middleware, "middleware.CustomMiddleware({custom}), ")?;
            }
            writeln!(
                out,
                "\t\tapi.{verb}(\"{}\", {middleware}{handler}(srv)).Name(\"{service_type}-{}\")",
                method.route_path,
                annotation.display_name()
            )?;
        }
        None => writeln!(
            out,
            "\t\tapi.{verb}(\"{}\", {handler}(srv)).Name(\"{service_type}-{}.{}-XHTTP_Handler\")",
            method.route_path, method.name, method.overload_index
        )?,
    }
    Ok(())
}

fn render_handler(
    service: &ServiceDescriptor,
    method: &MethodDescriptor,
    imports: &GoImports,
) -> Result<String> {
    let mut bindings = String::new();
    if method.has_path_params {
        push_check(&mut bindings, "binding.BindParams(c, &in)", SEND_ERROR)?;
    }
    if method.has_body {
        let call = format!("binding.BindBody(c, &in{})", method.body_selector);
        push_check(&mut bindings, &call, SEND_ERROR)?;
        if method.has_partial_body() {
            push_check(&mut bindings, "binding.BindQuery(c, &in)", SEND_ERROR)?;
        }
    } else if !method.has_path_params {
        push_check(&mut bindings, "binding.BindQuery(c, &in)", SEND_ERROR)?;
    }
    if method.annotation.as_ref().is_some_and(|a| a.validate) {
        push_check(
            &mut bindings,
            "in.Validate()",
            "apistate.InvalidError[any]().WithError(err).Send(c)",
        )?;
    }

    Ok(fill(
        HANDLER_TEMPLATE,
        &[
            ("HANDLER_DOC", format_go_comment(&method.comments).as_str()),
            ("HANDLER_NAME", method.handler_name(&service.type_name).as_str()),
            ("SERVER_INTERFACE", service.server_interface().as_str()),
            ("REQUEST", imports.qualify(&method.request).as_str()),
            ("REPLY", imports.qualify(&method.reply).as_str()),
            ("METHOD", method.name.as_str()),
            ("BINDINGS", bindings.as_str()),
        ],
    ))
}

/// `if err := <call>; err != nil { return <on_error> }`
fn push_check(out: &mut String, call: &str, on_error: &str) -> Result<()> {
    writeln!(out, "\t\tif err := {call}; err != nil {{")?;
    writeln!(out, "\t\t\treturn {on_error}")?;
    writeln!(out, "\t\t}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use analysis::{HttpVerb, ServiceDescriptorBuilder};
    use ir::MessageRef;

    use super::*;

    fn method(name: &str, verb: HttpVerb, path: &str) -> MethodDescriptor {
        MethodDescriptor {
            name: name.to_string(),
            overload_index: 0,
            request: MessageRef::new(format!("{name}Request"), "example.com/api/v1"),
            reply: MessageRef::new(format!("{name}Reply"), "example.com/api/v1"),
            route_path: path.to_string(),
            http_verb: verb,
            has_path_params: false,
            has_body: false,
            body_selector: String::new(),
            response_body_selector: String::new(),
            comments: String::new(),
            annotation: None,
        }
    }

    fn imports() -> GoImports { GoImports::new("example.com/api/v1") }

    fn handler_for(m: MethodDescriptor) -> String {
        let service = ServiceDescriptorBuilder::new("Greeter", "helloworld.v1.Greeter")
            .methods([m])
            .build()
            .expect("one route");
        render_handler(&service, &service.methods[0], &imports()).expect("render")
    }

    #[test]
    fn test_query_only_when_no_body_and_no_params() {
        let out = handler_for(method("List", HttpVerb::Get, "/v1/items"));
        assert!(out.contains("binding.BindQuery(c, &in)"));
        assert!(!out.contains("BindParams"));
        assert!(!out.contains("BindBody"));
    }

    #[test]
    fn test_params_then_body_then_query() {
        let mut m = method("Update", HttpVerb::Put, "/v1/items/:id");
        m.has_path_params = true;
        m.has_body = true;
        m.body_selector = ".Message.Id".into();
        let out = handler_for(m);

        let params = out.find("binding.BindParams(c, &in)").expect("params");
        let body = out.find("binding.BindBody(c, &in.Message.Id)").expect("body");
        let query = out.find("binding.BindQuery(c, &in)").expect("query");
        assert!(params < body && body < query);
    }

    #[test]
    fn test_whole_body_skips_query() {
        let mut m = method("Create", HttpVerb::Post, "/v1/items");
        m.has_body = true;
        let out = handler_for(m);
        assert!(out.contains("binding.BindBody(c, &in)"));
        assert!(!out.contains("BindQuery"));
    }

    #[test]
    fn test_params_without_body_skip_query() {
        let mut m = method("Get", HttpVerb::Get, "/v1/items/:id");
        m.has_path_params = true;
        let out = handler_for(m);
        assert!(out.contains("BindParams"));
        assert!(!out.contains("BindQuery"));
    }

    #[test]
    fn test_validate_and_comment() {
        let mut m = method("Create", HttpVerb::Post, "/v1/items");
        m.comments = "Create an item".into();
        m.annotation = Some(Annotation { validate: true, ..Default::default() });
        let out = handler_for(m);
        assert!(out.starts_with("// Create an item\nfunc _Greeter_Create0_XHTTP_Handler("));
        assert!(out.contains("if err := in.Validate(); err != nil {"));
        assert!(out.contains("apistate.InvalidError[any]()"));
    }

    #[test]
    fn test_route_lines() {
        let mut out = String::new();
        render_route(&mut out, "Greeter", &method("SayHello", HttpVerb::Post, "/hello")).expect("route");
        assert_eq!(
            out,
            "\t\tapi.Post(\"/hello\", _Greeter_SayHello0_XHTTP_Handler(srv)).Name(\"Greeter-SayHello.0-XHTTP_Handler\")\n"
        );

        let mut m = method("SayHello", HttpVerb::Custom("HEAD".into()), "/hello");
        m.annotation = Some(Annotation {
            name: Some("hello".into()),
            auth: true,
            operations: true,
            customs: vec!["cache".into()],
            ..Default::default()
        });
        let mut out = String::new();
        render_route(&mut out, "Greeter", &m).expect("route");
        assert_eq!(
            out,
            "\t\tapi.Head(\"/hello\", middleware.Authenticator(), middleware.Authorizer(), \
             middleware.Operations(), middleware.CustomMiddleware(cache), \
             _Greeter_SayHello0_XHTTP_Handler(srv)).Name(\"Greeter-hello\")\n"
        );
    }

    #[test]
    fn test_group_middleware() {
        let annotation = Annotation {
            name: Some("Greeter-XHTTPServer".into()),
            auth: true,
            validate: true,
            customs: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        let out = render_group_middleware(&annotation).expect("render");
        assert!(out.contains("api.Name(\"Greeter-XHTTPServer\")"));
        assert!(out.contains("api.Use(middleware.Authenticator(), middleware.Authorizer())"));
        assert!(out.contains("api.Use(middleware.Validator())"));
        assert!(!out.contains("middleware.Operations()"));
        let a = out.find("CustomMiddleware(a)").expect("a");
        let b = out.find("CustomMiddleware(b)").expect("b");
        assert!(a < b);
    }
}
