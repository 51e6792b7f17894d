//! Wire types for the flat box export and the derived layout documents.
//!
//! All geometry is expressed as percentages of a container. Input boxes carry
//! absolute (root-canvas) percentages plus an optional embedded record with
//! geometry already relative to the box's own parent. Output entries carry a
//! single reference frame each, decided by the document they live in.

use serde::{Deserialize, Serialize};

/// Geometry of a box relative to its declared parent, as captured by the
/// authoring tool. When present and pointing at the right parent it is
/// authoritative and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeGeometry {
    /// Id of the parent this geometry is relative to.
    pub parent_id: u64,
    /// Left offset, percent of the parent's width.
    pub x_pct: f64,
    /// Top offset, percent of the parent's height.
    pub y_pct: f64,
    /// Width, percent of the parent's width.
    pub w_pct: f64,
    /// Height, percent of the parent's height.
    pub h_pct: f64,
}

/// One rectangular UI region from the flat export.
///
/// Percentages are relative to the root canvas. Fields the exporter omitted
/// deserialize as `None` and count as 0 in derived arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxNode {
    /// Unique identifier within one export.
    pub id: u64,
    /// Human-readable name, possibly blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of the containing box; `None` for a root box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Left offset, percent of the root canvas width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_pct: Option<f64>,
    /// Top offset, percent of the root canvas height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_pct: Option<f64>,
    /// Width, percent of the root canvas width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_pct: Option<f64>,
    /// Height, percent of the root canvas height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_pct: Option<f64>,
    /// Parent-relative geometry captured at authoring time, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<RelativeGeometry>,
}

impl BoxNode {
    /// True when the box has no parent and is placed on the root canvas.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The box's name if it is non-empty after trimming.
    pub fn usable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Rectangle in percent units, one reference frame, not yet tied to an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryGeometry {
    /// Left offset in percent of the frame width.
    pub x_pct: f64,
    /// Top offset in percent of the frame height.
    pub y_pct: f64,
    /// Width in percent of the frame width.
    pub w_pct: f64,
    /// Height in percent of the frame height.
    pub h_pct: f64,
}

/// One record of a layout document. Percentages are relative to the frame of
/// the document that contains the entry (a parent box, or the root canvas),
/// rounded to 2 decimal digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEntry {
    /// Id of the box this entry describes.
    pub id: u64,
    /// Name carried over from the box when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Left offset in percent of the frame width.
    pub x_pct: f64,
    /// Top offset in percent of the frame height.
    pub y_pct: f64,
    /// Width in percent of the frame width.
    pub w_pct: f64,
    /// Height in percent of the frame height.
    pub h_pct: f64,
}

impl NormalizedEntry {
    /// Build an entry for `source`, carrying its name only when usable.
    pub fn from_geometry(source: &BoxNode, geometry: EntryGeometry) -> Self {
        Self {
            id: source.id,
            // the blank check trims, the carried name keeps its spelling
            name: source.usable_name().and_then(|_| source.name.clone()),
            x_pct: geometry.x_pct,
            y_pct: geometry.y_pct,
            w_pct: geometry.w_pct,
            h_pct: geometry.h_pct,
        }
    }
}

/// Ordered records of one hierarchy level, all sharing one reference frame.
pub type LayoutDocument = Vec<NormalizedEntry>;
