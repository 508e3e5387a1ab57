//! Identifier casing for generated code.

/// Convert a proto identifier to its capitalized-word form.
///
/// An interior underscore followed by a lower-case letter is dropped and the
/// letter upper-cased; digits are kept as-is; a leading underscore becomes `X`.
/// Non-ASCII bytes pass through unchanged.
///
/// # Examples
/// ```
/// use xhttpgen_analysis::naming::camel_case;
/// assert_eq!(camel_case("my_field"), "MyField");
/// assert_eq!(camel_case("_my_field_name_2"), "XMyFieldName_2");
/// assert_eq!(camel_case("SayHello"), "SayHello");
/// ```
pub fn camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() + 1);
    let mut i = 0;
    if bytes.first() == Some(&b'_') {
        out.push(b'X');
        i += 1;
    }
    while i < bytes.len() {
        let c = bytes[i];
        if c == b'_' && bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase) {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            out.push(c);
            i += 1;
            continue;
        }
        // Start of a word: upper-case it, then take the lower-case run that follows.
        out.push(c.to_ascii_uppercase());
        while bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase) {
            i += 1;
            out.push(bytes[i]);
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Convert a dotted field path segment by segment, keeping the dots.
///
/// `my_field.sub_id` becomes `MyField.SubId`.
pub fn camel_case_path(path: &str) -> String {
    path.split('.').map(camel_case).collect::<Vec<_>>().join(".")
}

/// Default route prefix for a service: dots become slashes, all lower-case.
pub fn route_prefix(full_name: &str) -> String { full_name.replace('.', "/").to_lowercase() }
