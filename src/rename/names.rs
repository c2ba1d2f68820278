//! File name helpers: validation, sanitizing and extension splitting.

/// Longest file name, in bytes, accepted on common file systems.
pub const MAX_NAME_BYTES: usize = 255;

/// Replacement used when sanitizing leaves nothing behind.
pub const FALLBACK_NAME: &str = "unnamed_file";

#[cfg(windows)]
const INVALID_CHARS: &[char] = &['/', '\\', ':', '"', '*', '?', '<', '>', '|'];
#[cfg(not(windows))]
const INVALID_CHARS: &[char] = &['/'];

/// Split a name into `(base, extension)` where the extension keeps its dot.
///
/// Leading dots never start an extension: `.bashrc` has none, and
/// `archive.tar.gz` splits into `archive.tar` and `.gz`.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// `base_N.ext` for a proposed name and suffix counter
pub fn suffixed_name(name: &str, counter: usize) -> String {
    let (base, ext) = split_extension(name);
    format!("{base}_{counter}{ext}")
}

/// Whether `name` can be used as a single path component here
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(INVALID_CHARS)
        && !name.contains('\0')
        && name.len() <= MAX_NAME_BYTES
}

/// Make `name` usable as a file name: invalid characters become `_`,
/// surrounding whitespace is trimmed, and overlong names are cut while
/// keeping the extension.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) || c == '\0' { '_' } else { c })
        .collect();
    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    if trimmed.len() <= MAX_NAME_BYTES {
        return trimmed.to_string();
    }

    let (base, ext) = split_extension(trimmed);
    if ext.len() >= MAX_NAME_BYTES {
        // no room for any base; cut the whole name instead
        return truncate_to_boundary(trimmed, MAX_NAME_BYTES).to_string();
    }
    let budget = MAX_NAME_BYTES - ext.len();
    let result = format!("{}{}", truncate_to_boundary(base, budget), ext);
    if result.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        result
    }
}

fn truncate_to_boundary(text: &str, max_bytes: usize) -> &str {
    let mut cut = max_bytes.min(text.len());
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    &text[..cut]
}
