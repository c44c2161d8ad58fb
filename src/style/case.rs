//! Property-name case conversions shared by the prefix resolver and surfaces.

use super::prefix::VENDOR_PREFIXES;

/// Converts a hyphenated property name into its camel-case form.
///
/// `background-color` becomes `backgroundColor` and `-webkit-transform`
/// becomes `WebkitTransform`. A dash not followed by a word character is kept.
#[must_use]
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-' {
            if let Some(&next) = chars.peek()
                && is_word(next)
            {
                out.extend(next.to_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Upper-cases the first character of `name`.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Converts a camel-case name into its hyphenated form.
///
/// An upper-case letter preceded by a word character gains a leading dash,
/// and the result is lower-cased: `borderTopWidth` becomes `border-top-width`.
#[must_use]
pub fn hyphenate(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() && prev.is_some_and(is_word) {
            out.push('-');
        }
        out.extend(ch.to_lowercase());
        prev = Some(ch);
    }
    out
}

/// Returns the name a `setProperty` call expects for a resolved property.
///
/// Names that are already hyphenated pass through. Vendor-prefixed camel
/// names gain the leading dash of the wire form, so `WebkitTransform`
/// becomes `-webkit-transform` and `msFlex` becomes `-ms-flex`.
#[must_use]
pub fn wire_name(resolved: &str) -> String {
    if resolved.contains('-') {
        return resolved.to_owned();
    }
    let hyphenated = hyphenate(resolved);
    if is_vendor_prefixed(resolved) {
        format!("-{hyphenated}")
    } else {
        hyphenated
    }
}

fn is_vendor_prefixed(name: &str) -> bool {
    VENDOR_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|ch| ch.is_ascii_uppercase())
    })
}

const fn is_word(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
