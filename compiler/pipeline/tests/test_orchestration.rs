use config::GenerationOptions;
use ir::GenerationRequest;
use pipeline::{compile, run, GenerationContext, PipelineError};
use semantics::DiagnosticKind;
use tempfile::TempDir;

const REQUEST: &str = r#"{
  "parameter": "omitempty=false",
  "files": [
    {
      "name": "api/helloworld/v1/greeter.proto",
      "package": "helloworld.v1",
      "go_package_name": "v1",
      "go_import_path": "example.com/api/helloworld/v1",
      "services": [
        {
          "name": "Greeter",
          "leading_comments": "// The greeting service\n// @Path(\"greeter\")\n",
          "methods": [
            {
              "name": "SayHello",
              "input": { "name": "HelloRequest", "go_import_path": "example.com/api/helloworld/v1" },
              "output": { "name": "HelloReply", "go_import_path": "example.com/api/helloworld/v1" },
              "http": {
                "get": "/hello/{name}",
                "additional_bindings": [{ "post": "/hello", "body": "*" }]
              }
            },
            {
              "name": "Stream",
              "input": { "name": "HelloRequest", "go_import_path": "example.com/api/helloworld/v1" },
              "output": { "name": "HelloReply", "go_import_path": "example.com/api/helloworld/v1" },
              "server_streaming": true
            }
          ]
        }
      ]
    },
    {
      "name": "api/helloworld/v1/other.proto",
      "package": "helloworld.v1",
      "go_package_name": "v1",
      "go_import_path": "example.com/api/helloworld/v1",
      "services": [
        {
          "name": "Other",
          "methods": [
            {
              "name": "SayHello",
              "input": { "name": "HelloRequest", "go_import_path": "example.com/api/helloworld/v1" },
              "output": { "name": "HelloReply", "go_import_path": "example.com/api/helloworld/v1" },
              "http": { "put": "/other" }
            }
          ]
        }
      ]
    },
    {
      "name": "api/helloworld/v1/skipped.proto",
      "package": "helloworld.v1",
      "go_package_name": "v1",
      "go_import_path": "example.com/api/helloworld/v1",
      "generate": false,
      "services": []
    }
  ]
}"#;

fn request() -> GenerationRequest { GenerationRequest::from_json(REQUEST).expect("fixture parses") }

#[test]
fn test_run_generates_one_file_per_requested_file() {
    let output = run(&request(), &GenerationOptions::default()).expect("run");
    let names: Vec<_> = output.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["api/helloworld/v1/greeter_xhttp.pb.go", "api/helloworld/v1/other_xhttp.pb.go"]
    );

    let greeter = &output.files[0].content;
    assert!(greeter.contains("api := r.Group(\"api/greeter\")"));
    assert!(!greeter.contains("Stream"));
}

#[test]
fn test_overload_numbering_spans_files() {
    let output = run(&request(), &GenerationOptions::default()).expect("run");
    assert!(output.files[0].content.contains("_Greeter_SayHello0_XHTTP_Handler"));
    assert!(output.files[0].content.contains("_Greeter_SayHello1_XHTTP_Handler"));
    assert!(output.files[1].content.contains("_Other_SayHello2_XHTTP_Handler"));
}

#[test]
fn test_diagnostics_are_returned() {
    let output = run(&request(), &GenerationOptions::default()).expect("run");
    let missing: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::MissingBodyDeclaration)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].message, "Put /other does not declare a body.");
}

#[test]
fn test_rules_only_skips_files_without_rules() {
    let mut request = request();
    for method in &mut request.files[1].services[0].methods {
        method.http = None;
    }

    let options = GenerationOptions::default();
    assert!(options.omit_empty);
    let output = run(&request, &options).expect("run");
    assert_eq!(output.files.len(), 1);

    let options = GenerationOptions::from_parameter("omitempty=false").expect("parameter");
    let output = run(&request, &options).expect("run");
    assert_eq!(output.files.len(), 2);
    assert!(output.files[1]
        .content
        .contains("api.Post(\"/helloworld.v1.Other/SayHello\", _Other_SayHello2_XHTTP_Handler(srv))"));
}

#[test]
fn test_unrecognized_annotation_aborts_run() {
    let mut request = request();
    request.files[1].services[0].methods[0].leading_comments = "// @RequestParam(\"name\")".into();

    let err = run(&request, &GenerationOptions::default()).expect_err("fatal annotation");
    assert!(matches!(err, PipelineError::Analysis(_)));
    assert!(err.to_string().contains("RequestParam is not a valid annotation"));
}

#[test]
fn test_compile_writes_files() {
    let dir = TempDir::new().expect("tempdir");
    let ctx = GenerationContext::builder()
        .request(request())
        .output_dir(dir.path())
        .build()
        .expect("context");

    let (written, _) = compile(&ctx).expect("compile");
    assert_eq!(written.len(), 2);
    for path in &written {
        assert!(path.starts_with(dir.path()));
        let content = std::fs::read_to_string(path).expect("generated file");
        assert!(content.starts_with("// Code generated by protoc-gen-go-xhttp. DO NOT EDIT."));
    }
}

#[test]
fn test_fatal_error_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let mut request = request();
    request.files[0].services[0].leading_comments = "// @Bogus".into();
    let ctx = GenerationContext::builder()
        .request(request)
        .output_dir(dir.path().join("out"))
        .build()
        .expect("context");

    assert!(compile(&ctx).is_err());
    assert!(!dir.path().join("out").exists());
}
