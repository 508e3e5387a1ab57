//! Go import bookkeeping for generated files.

use std::collections::{BTreeMap, BTreeSet};

use analysis::ServiceDescriptor;
use ir::MessageRef;

/// Packages every generated file refers to, as `(alias, import path)`.
pub const RUNTIME_PACKAGES: &[(&str, &str)] = &[
    ("context", "context"),
    ("middleware", "github.com/go-kratos/kratos/v2/middleware"),
    ("transport", "github.com/go-kratos/kratos/v2/transport"),
    ("xhttp", "github.com/go-kratos/kratos/v2/transport/xhttp"),
    ("apistate", "github.com/go-kratos/kratos/v2/transport/xhttp/apistate"),
    ("binding", "github.com/go-kratos/kratos/v2/transport/xhttp/binding"),
    ("fiber", "github.com/gofiber/fiber/v2"),
];

/// Identifiers the generated registration and handler code binds locally.
/// An import alias equal to one of these would be shadowed inside them.
const RESERVED_LOCALS: &[&str] = &["api", "c", "ctx", "err", "in", "r", "reply", "s", "srv"];

/// Import set of one generated file, keyed by import path.
///
/// Built once up front so that rendering can qualify message types without
/// mutating anything.
#[derive(Debug, Clone)]
pub struct GoImports {
    local_path: String,
    aliases: BTreeMap<String, String>,
}

impl GoImports {
    /// Runtime packages only
    pub fn new(local_path: impl Into<String>) -> Self {
        let aliases = RUNTIME_PACKAGES
            .iter()
            .map(|(alias, path)| (path.to_string(), alias.to_string()))
            .collect();
        Self { local_path: local_path.into(), aliases }
    }

    /// Runtime packages plus every foreign package a request or reply lives in.
    pub fn collect(local_path: impl Into<String>, services: &[ServiceDescriptor]) -> Self {
        let mut imports = Self::new(local_path);
        let foreign: BTreeSet<String> = services
            .iter()
            .flat_map(|s| &s.methods)
            .flat_map(|m| [&m.request, &m.reply])
            .filter(|msg| !imports.is_local(msg))
            .map(|msg| msg.go_import_path.clone())
            .collect();
        for path in foreign {
            imports.register(&path);
        }
        imports
    }

    fn register(&mut self, path: &str) {
        if self.aliases.contains_key(path) {
            return;
        }
        let base = package_alias(path);
        let mut alias = base.clone();
        let mut suffix = 1;
        while RESERVED_LOCALS.contains(&alias.as_str())
            || self.aliases.values().any(|taken| *taken == alias)
        {
            alias = format!("{base}{suffix}");
            suffix += 1;
        }
        self.aliases.insert(path.to_string(), alias);
    }

    fn is_local(&self, message: &MessageRef) -> bool {
        message.go_import_path.is_empty() || message.go_import_path == self.local_path
    }

    /// Go expression naming `message` from inside the generated package
    pub fn qualify(&self, message: &MessageRef) -> String {
        if self.is_local(message) {
            return message.name.clone();
        }
        let alias = self
            .aliases
            .get(&message.go_import_path)
            .cloned()
            .unwrap_or_else(|| package_alias(&message.go_import_path));
        format!("{}.{}", alias, message.name)
    }

    /// Body of the `import ( ... )` block, sorted by import path
    pub fn render_block(&self) -> String {
        self.aliases
            .iter()
            .map(|(path, alias)| format!("\t{alias} \"{path}\""))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Package identifier derived from the last import path element.
fn package_alias(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    let mut alias: String =
        last.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect();
    if alias.is_empty() {
        alias.push_str("pkg");
    } else if alias.starts_with(|c: char| c.is_ascii_digit()) {
        alias.insert(0, '_');
    }
    alias
}
