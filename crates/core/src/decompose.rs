//! Decomposition of a flat box export into per-parent layout documents.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::{BoxNode, EntryGeometry, LayoutDocument, NormalizedEntry};
use crate::reproject::{reproject, round2};
use crate::slug::{document_key, root_document_key};

/// Errors that abort a decomposition before any document is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecomposeError {
    /// Two boxes in the export share an id.
    #[error("duplicate box id {0} in input collection")]
    DuplicateId(u64),
    /// Two groups reduce to the same document key; emitting both would
    /// silently overwrite one of them at the storage boundary.
    #[error("layout key '{key}' is produced by both box {first_id} and box {second_id}")]
    KeyCollision {
        /// The colliding key.
        key: String,
        /// Id of the parent box that claimed the key first.
        first_id: u64,
        /// Id of the parent box that collided with it.
        second_id: u64,
    },
    /// A per-parent key equals the requested root document key.
    #[error("root layout key '{key}' is also produced by box {parent_id}")]
    RootKeyCollision {
        /// The colliding key.
        key: String,
        /// Id of the parent box whose key matches the root key.
        parent_id: u64,
    },
}

/// What to do with boxes whose ancestor chain breaks on a missing parent id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// A box pointing at an unknown parent loses its membership in that
    /// missing group, but its own children are still grouped under it.
    #[default]
    KeepDescendants,
    /// The whole subtree under an unresolvable parent is excluded: neither
    /// the orphaned box nor any of its descendants contribute entries, and
    /// no documents are emitted for them.
    PruneDescendants,
}

/// Knobs for one decomposition run.
#[derive(Debug, Clone, Default)]
pub struct DecomposeOptions {
    /// When set, also emit a document of the root boxes under this key.
    pub root_key: Option<String>,
    /// Handling of boxes whose declared parent cannot be found.
    pub orphan_policy: OrphanPolicy,
}

/// The full output of one decomposition: every produced document with its
/// key, in deterministic emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decomposition {
    /// Root-canvas document, present only when a root key was requested and
    /// at least one root box exists.
    pub root: Option<(String, LayoutDocument)>,
    /// One document per parent that ended up with at least one child entry,
    /// in first-discovery order of the parent ids.
    pub per_parent: Vec<(String, LayoutDocument)>,
}

impl Decomposition {
    /// All documents in emission order, root first.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &LayoutDocument)> {
        self.root
            .iter()
            .chain(self.per_parent.iter())
            .map(|(key, doc)| (key.as_str(), doc))
    }

    /// Number of documents produced.
    pub fn len(&self) -> usize {
        self.per_parent.len() + usize::from(self.root.is_some())
    }

    /// True when the run produced nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Document emitted under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&LayoutDocument> {
        self.documents().find(|(k, _)| *k == key).map(|(_, d)| d)
    }
}

/// Split `boxes` into one document per parent, plus an optional root
/// document.
///
/// Grouping preserves input order inside each group, and groups are visited
/// in the order their parent id first appears as a `parent_id` value, so the
/// output is reproducible for an unchanged input. Children that cannot be
/// reprojected are skipped, and groups that end up empty are not emitted;
/// only duplicate ids and key collisions abort the run.
pub fn decompose(
    boxes: &[BoxNode],
    options: &DecomposeOptions,
) -> Result<Decomposition, DecomposeError> {
    let mut by_id: HashMap<u64, &BoxNode> = HashMap::with_capacity(boxes.len());
    for node in boxes {
        if by_id.insert(node.id, node).is_some() {
            return Err(DecomposeError::DuplicateId(node.id));
        }
    }

    let mut non_leaf_ids = Vec::new();
    let mut seen = HashSet::new();
    for node in boxes {
        if let Some(parent_id) = node.parent_id {
            if seen.insert(parent_id) {
                non_leaf_ids.push(parent_id);
            }
        }
    }

    let anchored = match options.orphan_policy {
        OrphanPolicy::KeepDescendants => None,
        OrphanPolicy::PruneDescendants => Some(anchored_ids(boxes, &by_id)),
    };
    let in_scope = |id: u64| anchored.as_ref().map_or(true, |set| set.contains(&id));

    let mut result = Decomposition::default();
    // key -> owning parent id; None marks the root document
    let mut used_keys: HashMap<String, Option<u64>> = HashMap::new();

    if let Some(root_key) = options.root_key.as_deref() {
        let entries: LayoutDocument = boxes
            .iter()
            .filter(|node| node.is_root())
            .map(root_entry)
            .collect();
        if !entries.is_empty() {
            let key = root_document_key(root_key);
            used_keys.insert(key.clone(), None);
            result.root = Some((key, entries));
        }
    }

    for &parent_id in &non_leaf_ids {
        let Some(&parent) = by_id.get(&parent_id) else {
            tracing::warn!(parent_id, "skipping group of unknown parent");
            continue;
        };
        if !in_scope(parent_id) {
            tracing::warn!(parent_id, "pruning group under unresolvable ancestor");
            continue;
        }

        let mut entries = LayoutDocument::new();
        for child in boxes.iter().filter(|node| node.parent_id == Some(parent_id)) {
            match reproject(child, parent) {
                Some(geometry) => entries.push(NormalizedEntry::from_geometry(child, geometry)),
                None => {
                    tracing::debug!(
                        child_id = child.id,
                        parent_id,
                        "child skipped: degenerate parent geometry"
                    );
                }
            }
        }
        if entries.is_empty() {
            continue;
        }

        let key = document_key(parent);
        match used_keys.insert(key.clone(), Some(parent_id)) {
            Some(Some(first_id)) => {
                return Err(DecomposeError::KeyCollision {
                    key,
                    first_id,
                    second_id: parent_id,
                });
            }
            Some(None) => {
                return Err(DecomposeError::RootKeyCollision { key, parent_id });
            }
            None => {}
        }
        result.per_parent.push((key, entries));
    }

    Ok(result)
}

fn root_entry(node: &BoxNode) -> NormalizedEntry {
    NormalizedEntry::from_geometry(
        node,
        EntryGeometry {
            x_pct: round2(node.x_pct.unwrap_or(0.0)),
            y_pct: round2(node.y_pct.unwrap_or(0.0)),
            w_pct: round2(node.w_pct.unwrap_or(0.0)),
            h_pct: round2(node.h_pct.unwrap_or(0.0)),
        },
    )
}

/// Ids whose ancestor chain terminates at a root box. A missing parent or a
/// parent cycle leaves every id on the chain unanchored.
fn anchored_ids(boxes: &[BoxNode], by_id: &HashMap<u64, &BoxNode>) -> HashSet<u64> {
    let mut status: HashMap<u64, bool> = HashMap::with_capacity(boxes.len());
    for node in boxes {
        if status.contains_key(&node.id) {
            continue;
        }
        let mut chain = Vec::new();
        let mut on_chain = HashSet::new();
        let mut cursor = node;
        let verdict = loop {
            if let Some(&known) = status.get(&cursor.id) {
                break known;
            }
            if !on_chain.insert(cursor.id) {
                break false; // cycle
            }
            chain.push(cursor.id);
            match cursor.parent_id {
                None => break true,
                Some(parent_id) => match by_id.get(&parent_id) {
                    Some(&parent) => cursor = parent,
                    None => break false,
                },
            }
        };
        for id in chain {
            status.insert(id, verdict);
        }
    }
    status
        .into_iter()
        .filter_map(|(id, anchored)| anchored.then_some(id))
        .collect()
}
