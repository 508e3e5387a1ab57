// SPDX-License-Identifier: CC0-1.0

//! Brace-style path template detection and rewriting.
//!
//! A parameter segment is `{name}` where `name` consists of ASCII letters,
//! digits, dots, underscores and whitespace. Nested braces are not supported;
//! text that does not match the pattern is passed through untouched.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn param_regex() -> &'static Regex {
    static PARAM: OnceLock<Regex> = OnceLock::new();
    PARAM.get_or_init(|| {
        Regex::new(r"(?i)\{([a-z.0-9_\s]*)\}").expect("path parameter pattern is a valid regex")
    })
}

/// A path template rewritten into router-native syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    /// Router-native path, e.g. `/v1/:message.id`
    pub path: String,
    /// Whether at least one `{name}` segment was found
    pub has_params: bool,
}

/// Returns true iff `template` contains at least one `{name}` parameter segment.
pub fn has_path_params(template: &str) -> bool { param_regex().is_match(template) }

/// Replace every `{name}` segment with `:name`, trimming whitespace inside the braces.
///
/// # Examples
/// ```
/// use xhttpgen_path::build_path;
/// assert_eq!(build_path("/test/{message.id}"), "/test/:message.id");
/// assert_eq!(build_path("/test/{a}/{ b }"), "/test/:a/:b");
/// assert_eq!(build_path("/test/noparams"), "/test/noparams");
/// ```
pub fn build_path(template: &str) -> String {
    param_regex()
        .replace_all(template, |caps: &Captures<'_>| format!(":{}", caps[1].trim()))
        .into_owned()
}

/// Detect and rewrite parameters in one pass over the template.
pub fn convert(template: &str) -> RoutePath {
    let has_params = has_path_params(template);
    let path = if has_params { build_path(template) } else { template.to_string() };
    RoutePath { path, has_params }
}
