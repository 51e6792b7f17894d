//! Deterministic naming for emitted layout documents.
//!
//! A box's human name is reduced to a stable filesystem-safe key: lowercase
//! ASCII letters, digits and single hyphens. Boxes without a usable name fall
//! back to an id-derived key so every group can always be addressed.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::BoxNode;

/// Suffix appended to a document key to form its file stem.
pub const LAYOUT_SUFFIX: &str = "_layout";

/// Reduce a human-readable name to a key token.
///
/// Lowercases, strips diacritics via NFD decomposition, folds runs of
/// whitespace and underscores into single hyphens and drops everything
/// outside `[a-z0-9-]`. Returns `None` when the input (or what survives the
/// reduction) is empty.
pub fn slugify(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    for c in lowered.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_whitespace() || c == '_' || c == '-' {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_alphanumeric() {
            slug.push(c);
        }
        // everything else is dropped without acting as a separator
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Key under which the document of `parent`'s children is emitted.
///
/// Uses the slugified name when one survives, otherwise `box-<id>`.
pub fn document_key(parent: &BoxNode) -> String {
    parent
        .name
        .as_deref()
        .and_then(slugify)
        .unwrap_or_else(|| format!("box-{}", parent.id))
}

/// Key for the optional root-level document.
///
/// Callers tend to pass a file name; a trailing `.json` and/or `_layout`
/// suffix is stripped before the name goes through the same reduction as box
/// names. An unusable name falls back to `root`.
pub fn root_document_key(name: &str) -> String {
    let stripped = strip_suffix_ci(name.trim(), ".json");
    let stripped = strip_suffix_ci(stripped, LAYOUT_SUFFIX);
    slugify(stripped).unwrap_or_else(|| "root".to_string())
}

/// File stem of the document emitted under `key`.
pub fn file_stem(key: &str) -> String {
    format!("{key}{LAYOUT_SUFFIX}")
}

fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> &'a str {
    let Some(cut) = s.len().checked_sub(suffix.len()) else {
        return s;
    };
    if s.is_char_boundary(cut) && s[cut..].eq_ignore_ascii_case(suffix) {
        &s[..cut]
    } else {
        s
    }
}
