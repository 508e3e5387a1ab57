//! `protoc-gen-go-xhttp`
//!
//! Reads a generation request, runs the pipeline and writes the generated
//! `_xhttp.pb.go` files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use clap::Parser;
use xhttpgen_cli::{execute, Args};

fn main() {
    let args = Args::parse();
    match execute(&args) {
        Ok(written) => {
            for path in written {
                eprintln!("wrote {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("protoc-gen-go-xhttp: {}", e);
            std::process::exit(1);
        }
    }
}
