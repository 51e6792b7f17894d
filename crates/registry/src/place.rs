//! Mapping of UI elements onto resolved rectangles.
//!
//! An element declares which box it occupies by id and/or name. Placement is
//! a pure pass over the element sequence with an indexed side table over the
//! document; elements without a usable reference, or whose reference misses,
//! flow through unpositioned.

use std::collections::HashMap;

use boxsplit_core::{NormalizedEntry, Selector};
use serde::Serialize;

/// A UI element's declared box reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxRef {
    /// Id of the box to occupy.
    pub id: Option<u64>,
    /// Name of the box to occupy, consulted when the id is absent or misses.
    pub name: Option<String>,
}

impl BoxRef {
    /// True when neither field can match anything.
    pub fn is_blank(&self) -> bool {
        self.id.is_none()
            && self
                .name
                .as_deref()
                .map_or(true, |name| name.trim().is_empty())
    }

    fn selector(&self) -> Selector<'_> {
        Selector {
            id: self.id,
            name: self.name.as_deref(),
        }
    }
}

/// Absolute rectangle inside the element's immediate container, in percent
/// of the container's extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbsoluteRect {
    /// Distance from the container's left edge.
    pub left_pct: f64,
    /// Distance from the container's top edge.
    pub top_pct: f64,
    /// Rectangle width.
    pub width_pct: f64,
    /// Rectangle height.
    pub height_pct: f64,
}

impl From<&NormalizedEntry> for AbsoluteRect {
    fn from(entry: &NormalizedEntry) -> Self {
        Self {
            left_pct: entry.x_pct,
            top_pct: entry.y_pct,
            width_pct: entry.w_pct,
            height_pct: entry.h_pct,
        }
    }
}

/// Outcome of placing one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The element's reference resolved; render it at this rectangle.
    Positioned(AbsoluteRect),
    /// No usable reference or no matching box; render the element as-is.
    Passthrough,
}

/// Id and trimmed-name indexes over one layout document.
///
/// Lookup semantics match the linear scan in `boxsplit_core::resolve`: id
/// before name, first occurrence wins on duplicates.
#[derive(Debug)]
pub struct IndexedDocument<'a> {
    by_id: HashMap<u64, &'a NormalizedEntry>,
    by_name: HashMap<&'a str, &'a NormalizedEntry>,
}

impl<'a> IndexedDocument<'a> {
    /// Index `document` for repeated lookups.
    pub fn new(document: &'a [NormalizedEntry]) -> Self {
        let mut by_id = HashMap::with_capacity(document.len());
        let mut by_name = HashMap::with_capacity(document.len());
        for entry in document {
            by_id.entry(entry.id).or_insert(entry);
            if let Some(name) = entry.name.as_deref().map(str::trim) {
                if !name.is_empty() {
                    by_name.entry(name).or_insert(entry);
                }
            }
        }
        Self { by_id, by_name }
    }

    /// Entry the selector points at, id before trimmed name.
    pub fn resolve(&self, selector: Selector<'_>) -> Option<&'a NormalizedEntry> {
        if let Some(id) = selector.id {
            if let Some(entry) = self.by_id.get(&id) {
                return Some(entry);
            }
        }
        let wanted = selector.name.map(str::trim).filter(|n| !n.is_empty())?;
        self.by_name.get(wanted).copied()
    }
}

/// Place each element reference against `document`.
///
/// Output order mirrors `refs`; every input produces exactly one placement.
pub fn place(document: &[NormalizedEntry], refs: &[BoxRef]) -> Vec<Placement> {
    let index = IndexedDocument::new(document);
    refs.iter()
        .map(|box_ref| {
            if box_ref.is_blank() {
                return Placement::Passthrough;
            }
            match index.resolve(box_ref.selector()) {
                Some(entry) => Placement::Positioned(AbsoluteRect::from(entry)),
                None => Placement::Passthrough,
            }
        })
        .collect()
}
