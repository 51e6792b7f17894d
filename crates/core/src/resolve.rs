//! Lookup of one entry inside a single layout document.

use crate::model::NormalizedEntry;

/// What a consumer knows about the box it wants: an id, a name, or both.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selector<'a> {
    /// Exact id to look for first.
    pub id: Option<u64>,
    /// Name to fall back to, compared after trimming both sides.
    pub name: Option<&'a str>,
}

impl<'a> Selector<'a> {
    /// Selector matching by id only.
    pub fn by_id(id: u64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    /// Selector matching by name only.
    pub fn by_name(name: &'a str) -> Self {
        Self {
            id: None,
            name: Some(name),
        }
    }
}

/// Find the entry a selector points at, id before name, first match wins.
///
/// A name is only consulted when it is non-empty after trimming; blank names
/// in the document never match anything.
pub fn resolve<'a>(
    document: &'a [NormalizedEntry],
    selector: Selector<'_>,
) -> Option<&'a NormalizedEntry> {
    if let Some(id) = selector.id {
        if let Some(entry) = document.iter().find(|entry| entry.id == id) {
            return Some(entry);
        }
    }
    let wanted = selector.name.map(str::trim).filter(|n| !n.is_empty())?;
    document
        .iter()
        .find(|entry| entry.name.as_deref().map(str::trim) == Some(wanted))
}
