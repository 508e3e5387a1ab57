use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn request_json(comment: &str) -> String {
    serde_json::json!({
        "files": [{
            "name": "api/helloworld/v1/greeter.proto",
            "package": "helloworld.v1",
            "go_package_name": "v1",
            "go_import_path": "example.com/api/helloworld/v1",
            "services": [{
                "name": "Greeter",
                "leading_comments": comment,
                "methods": [
                    {
                        "name": "SayHello",
                        "input": { "name": "HelloRequest", "go_import_path": "example.com/api/helloworld/v1" },
                        "output": { "name": "HelloReply", "go_import_path": "example.com/api/helloworld/v1" },
                        "http": { "get": "/hello/{name}" }
                    },
                    {
                        "name": "Ping",
                        "input": { "name": "HelloRequest", "go_import_path": "example.com/api/helloworld/v1" },
                        "output": { "name": "HelloReply", "go_import_path": "example.com/api/helloworld/v1" }
                    }
                ]
            }]
        }]
    })
    .to_string()
}

fn write_config(dir: &Path, omit_empty: bool) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, format!("[generation]\nomit_empty = {omit_empty}\n")).unwrap();
    path
}

#[test]
fn generates_file_from_input() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("request.json");
    fs::write(&input, request_json("// @Auth")).unwrap();
    let out = tmp.path().join("gen");
    let config = write_config(tmp.path(), true);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("protoc-gen-go-xhttp"));
    cmd.arg("--input").arg(&input).arg("--output-dir").arg(&out).arg("--config").arg(&config);
    cmd.assert().success().stderr(predicate::str::contains("greeter_xhttp.pb.go"));

    let generated = fs::read_to_string(out.join("api/helloworld/v1/greeter_xhttp.pb.go")).unwrap();
    assert!(generated.contains("api.Get(\"/hello/:name\""));
    assert!(!generated.contains("Ping"));
}

#[test]
fn reads_request_from_stdin_and_honours_omitempty_flag() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("gen");
    let config = write_config(tmp.path(), true);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("protoc-gen-go-xhttp"));
    cmd.args(["--omitempty", "false", "--output-dir"]).arg(&out).arg("--config").arg(&config);
    cmd.write_stdin(request_json("")).assert().success();

    let generated = fs::read_to_string(out.join("api/helloworld/v1/greeter_xhttp.pb.go")).unwrap();
    assert!(generated.contains("api.Post(\"/helloworld.v1.Greeter/Ping\""));
}

#[test]
fn request_parameter_overrides_config() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("gen");
    let config = write_config(tmp.path(), true);
    let mut request: serde_json::Value = serde_json::from_str(&request_json("")).unwrap();
    request["parameter"] = "omitempty=false".into();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("protoc-gen-go-xhttp"));
    cmd.arg("--output-dir").arg(&out).arg("--config").arg(&config);
    cmd.write_stdin(request.to_string()).assert().success();

    let generated = fs::read_to_string(out.join("api/helloworld/v1/greeter_xhttp.pb.go")).unwrap();
    assert!(generated.contains("_Greeter_Ping0_XHTTP_Handler"));
}

#[test]
fn unrecognized_annotation_fails() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("request.json");
    fs::write(&input, request_json("// @RequestParam(\"name\")")).unwrap();
    let out = tmp.path().join("gen");
    let config = write_config(tmp.path(), true);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("protoc-gen-go-xhttp"));
    cmd.arg("--input").arg(&input).arg("--output-dir").arg(&out).arg("--config").arg(&config);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("RequestParam is not a valid annotation"));
    assert!(!out.exists());
}

#[test]
fn malformed_request_fails() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), true);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("protoc-gen-go-xhttp"));
    cmd.arg("--config").arg(&config).arg("--output-dir").arg(tmp.path());
    cmd.write_stdin("{ not json").assert().failure().stderr(predicate::str::contains("malformed"));
}
