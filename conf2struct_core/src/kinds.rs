pub const PATH_BUF: &str = "PathBuf";

pub const NATIVE_TYPES: [&str; 19] = [
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "bool",
    "f32", "f64", "String", "OsString", PATH_BUF, "char",
];

pub fn is_native_type(ty: &str) -> bool {
    NATIVE_TYPES.contains(&ty)
}

/// `"[u16]"` -> `Some("u16")`.
pub(crate) fn list_item(ty: &str) -> Option<&str> {
    ty.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// Generated items are spelled out with their full std path so the caller
/// does not need to import them.
pub fn qualified_type(ty: &str) -> String {
    match ty {
        PATH_BUF => "std::path::PathBuf".to_string(),
        "OsString" => "std::ffi::OsString".to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}
