/// Deprecation marker placed above deprecated services
pub const DEPRECATION_COMMENT: &str = "// Deprecated: Do not use.";

/// Render free text as Go line comments, one `// ` line per input line.
///
/// Blank input yields an empty string. Every emitted line ends with `\n`.
pub fn format_go_comment(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        out.push_str("// ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Comment block above a service interface.
pub fn service_doc(comment: &str, deprecated: bool) -> String {
    let mut out = format_go_comment(comment);
    if deprecated {
        out.push_str("//\n");
        out.push_str(DEPRECATION_COMMENT);
        out.push('\n');
    }
    out
}
