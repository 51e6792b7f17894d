//! Reprojection of a child's geometry into its parent's reference frame.

use crate::model::{BoxNode, EntryGeometry};

/// Round to 2 decimal digits, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Express `child`'s rectangle relative to `parent`.
///
/// The authoring tool may have captured parent-relative geometry on the child
/// already; when that record targets `parent` it wins unconditionally, so the
/// precision captured at authoring time is never replaced by a recomputation.
/// Otherwise the geometry is derived from the two absolute rectangles.
/// Returns `None` when the parent has no positive extent to divide by.
pub fn reproject(child: &BoxNode, parent: &BoxNode) -> Option<EntryGeometry> {
    if let Some(rel) = child.parent.as_ref().filter(|rel| rel.parent_id == parent.id) {
        return Some(EntryGeometry {
            x_pct: round2(rel.x_pct),
            y_pct: round2(rel.y_pct),
            w_pct: round2(rel.w_pct),
            h_pct: round2(rel.h_pct),
        });
    }

    let pw = parent.w_pct.unwrap_or(0.0);
    let ph = parent.h_pct.unwrap_or(0.0);
    if pw <= 0.0 || ph <= 0.0 {
        return None;
    }
    let px = parent.x_pct.unwrap_or(0.0);
    let py = parent.y_pct.unwrap_or(0.0);
    Some(EntryGeometry {
        x_pct: round2((child.x_pct.unwrap_or(0.0) - px) / pw * 100.0),
        y_pct: round2((child.y_pct.unwrap_or(0.0) - py) / ph * 100.0),
        w_pct: round2(child.w_pct.unwrap_or(0.0) / pw * 100.0),
        h_pct: round2(child.h_pct.unwrap_or(0.0) / ph * 100.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelativeGeometry;

    fn node(id: u64, x: f64, y: f64, w: f64, h: f64) -> BoxNode {
        BoxNode {
            id,
            name: None,
            parent_id: None,
            x_pct: Some(x),
            y_pct: Some(y),
            w_pct: Some(w),
            h_pct: Some(h),
            parent: None,
        }
    }

    #[test]
    fn derived_path_algebra() {
        let parent = node(1, 10.0, 20.0, 50.0, 40.0);
        let mut child = node(2, 20.0, 30.0, 10.0, 10.0);
        child.parent_id = Some(1);
        let rel = reproject(&child, &parent).unwrap();
        assert_eq!(rel.x_pct, 20.00);
        assert_eq!(rel.y_pct, 25.00);
        assert_eq!(rel.w_pct, 20.00);
        assert_eq!(rel.h_pct, 25.00);
    }

    #[test]
    fn authoritative_record_wins_over_recomputation() {
        let parent = node(1, 10.0, 20.0, 50.0, 40.0);
        let mut child = node(2, 20.0, 30.0, 10.0, 10.0);
        child.parent_id = Some(1);
        // deliberately different from what the derived path would produce
        child.parent = Some(RelativeGeometry {
            parent_id: 1,
            x_pct: 33.33,
            y_pct: 44.44,
            w_pct: 55.55,
            h_pct: 66.66,
        });
        let rel = reproject(&child, &parent).unwrap();
        assert_eq!(rel.x_pct, 33.33);
        assert_eq!(rel.y_pct, 44.44);
        assert_eq!(rel.w_pct, 55.55);
        assert_eq!(rel.h_pct, 66.66);
    }

    #[test]
    fn stale_relative_record_is_ignored() {
        let parent = node(1, 0.0, 0.0, 50.0, 50.0);
        let mut child = node(2, 25.0, 25.0, 25.0, 25.0);
        child.parent_id = Some(1);
        // points at a different parent, so the derived path applies
        child.parent = Some(RelativeGeometry {
            parent_id: 99,
            x_pct: 1.0,
            y_pct: 1.0,
            w_pct: 1.0,
            h_pct: 1.0,
        });
        let rel = reproject(&child, &parent).unwrap();
        assert_eq!(rel.x_pct, 50.0);
        assert_eq!(rel.w_pct, 50.0);
    }

    #[test]
    fn degenerate_parent_yields_none() {
        let parent = node(1, 10.0, 20.0, 0.0, 40.0);
        let child = node(2, 20.0, 30.0, 10.0, 10.0);
        assert_eq!(reproject(&child, &parent), None);

        let parent = node(1, 10.0, 20.0, 50.0, -1.0);
        assert_eq!(reproject(&child, &parent), None);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let parent = node(1, 0.0, 0.0, 50.0, 50.0);
        let mut child = BoxNode {
            id: 2,
            name: None,
            parent_id: Some(1),
            x_pct: None,
            y_pct: Some(10.0),
            w_pct: None,
            h_pct: Some(5.0),
            parent: None,
        };
        let rel = reproject(&child, &parent).unwrap();
        assert_eq!(rel.x_pct, 0.0);
        assert_eq!(rel.y_pct, 20.0);
        assert_eq!(rel.w_pct, 0.0);
        assert_eq!(rel.h_pct, 10.0);
        // a parent with no recorded width cannot host a derived child
        child.parent_id = Some(3);
        let bare_parent = BoxNode {
            id: 3,
            name: None,
            parent_id: None,
            x_pct: None,
            y_pct: None,
            w_pct: None,
            h_pct: None,
            parent: None,
        };
        assert_eq!(reproject(&child, &bare_parent), None);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(33.3333), 33.33);
        assert_eq!(round2(66.666), 66.67);
        assert_eq!(round2(-66.666), -66.67);
    }
}
