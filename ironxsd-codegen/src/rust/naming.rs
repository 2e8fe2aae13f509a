//! Rust identifier rules.

/// Types emitted verbatim, without a generated definition.
pub const BUILTIN_TYPES: &[&str] = &[
    "i8",
    "i16",
    "i32",
    "i64",
    "i128",
    "isize",
    "u8",
    "u16",
    "u32",
    "u64",
    "u128",
    "usize",
    "f32",
    "f64",
    "bool",
    "char",
    "String",
    "Vec<char>",
    "Vec<String>",
    "Vec<u8>",
];

/// Strict and reserved keywords.
pub const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

const NUMERIC_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
    "f64",
];

/// Returns true for a type emitted verbatim.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Returns true for a keyword.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Returns true for a numeric primitive.
#[must_use]
pub fn is_numeric(name: &str) -> bool {
    NUMERIC_TYPES.contains(&name)
}

/// Returns true for a length-checkable vector built-in.
#[must_use]
pub fn is_vec(name: &str) -> bool {
    name.starts_with("Vec<")
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits on `:` and `.`, upper-casing the first letter of each segment.
fn join_segments(raw: &str) -> String {
    raw.split([':', '.']).map(upper_first).collect()
}

/// Converts a camel/Pascal case name to snake case.
///
/// Acronyms stay together (`HTTPServer` becomes `http_server`) and `-`, `_`
/// and spaces act as word breaks.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '-' | '_' | ' ') {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out.trim_end_matches('_').to_string()
}

/// Replaces characters that cannot appear in an identifier.
fn sanitize(ident: &str, replacement: Option<char>) -> String {
    let mut out: String = ident
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else {
                replacement
            }
        })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Converts a schema name to a field identifier.
#[must_use]
pub fn field_name(raw: &str) -> String {
    let snake = to_snake_case(&join_segments(raw));
    let mut ident = sanitize(&snake, Some('_')).trim_end_matches('_').to_string();
    if ident.is_empty() {
        ident = "field".to_string();
    }
    if is_keyword(&ident) {
        ident.push_str("_attr");
    }
    ident
}

/// Converts a schema name to a type identifier, without dedup.
///
/// Returns an empty string for an empty name.
#[must_use]
pub fn struct_ident(raw: &str) -> String {
    let joined: String = join_segments(raw)
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect();
    let mut ident = sanitize(&joined, None);
    if is_keyword(&ident) {
        ident.push_str("Type");
    }
    ident
}

/// Converts an enumeration literal to a variant identifier.
#[must_use]
pub fn variant_name(literal: &str) -> String {
    let upper = literal.to_uppercase();
    let ident = sanitize(&upper, Some('_'));
    if ident.is_empty() || ident.chars().all(|c| c == '_') {
        format!("EMPTY{ident}")
    } else {
        ident
    }
}
