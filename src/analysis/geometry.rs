//! Per-branch geometry and its tree-level roll-up.
//!
//! Every non-root segment is treated as a cylinder from its parent's tip to
//! its own tip. Branch strength is `diameter^0.75 / length`, a structural
//! proxy relating thickness to the lever of the branch beyond it.

use crate::model::Segment;
use std::f64::consts::PI;

/// Lower bound of strength denominators.
pub const STRENGTH_EPSILON: f64 = 1e-10;

/// Exponent applied to the diameter in the strength proxy.
const STRENGTH_EXPONENT: f64 = 0.75;

/// Returns `diameter^0.75 / max(length, STRENGTH_EPSILON)`.
pub fn strength(diameter: f64, length: f64) -> f64 {
    diameter.powf(STRENGTH_EXPONENT) / length.max(STRENGTH_EPSILON)
}

// =#========================================================================#=
// BRANCH GEOMETRY
// =#========================================================================#=
/// Geometry of one non-root segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchGeometry {
    /// Cylinder volume
    pub volume: f64,
    /// Diameter at the tip
    pub diameter: f64,
    /// Strength proxy from the segment's own length attribute
    pub strength: f64,
}

impl BranchGeometry {
    /// Computes the geometry of `branch`, hanging off `parent`.
    ///
    /// # Arguments
    /// * `branch` - The segment
    /// * `parent` - Its parent segment
    /// * `length` - The segment's length (distance to furthest leaf)
    pub fn of(branch: &Segment, parent: &Segment, length: f64) -> Self {
        let diameter = branch.diameter();
        BranchGeometry {
            volume: PI * branch.distance_to(parent) * branch.radius * branch.radius,
            diameter,
            strength: strength(diameter, length),
        }
    }
}

// =#========================================================================#=
// TREE GEOMETRY
// =#========================================================================#=
/// Tree-level geometry, stored at the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeGeometry {
    /// Sum of all branch volumes
    pub volume: f64,
    /// Largest branch diameter, a proxy for trunk diameter
    pub diameter: f64,
    /// Length of the root, i.e. longest root-to-leaf distance
    pub height: f64,
    /// `diameter^0.75 / height` from the tree values above
    pub strength: f64,
}

/// Derives the geometry of every non-root segment and of the whole tree.
///
/// # Arguments
/// * `segments` - Segments of one tree, at least the root
/// * `lengths` - Fully propagated lengths, indexed like `segments`
///
/// # Returns
/// Per-segment geometry (`None` at the root) and the tree roll-up.
///
/// # Panics
/// Panics if `segments` is empty or `lengths` is shorter than `segments`.
pub fn derive_geometry(
    segments: &[Segment],
    lengths: &[f64],
) -> (Vec<Option<BranchGeometry>>, TreeGeometry) {
    let mut branches = Vec::with_capacity(segments.len());
    branches.push(None);

    let mut volume = 0.0;
    let mut diameter: f64 = 0.0;
    for (index, branch) in segments.iter().enumerate().skip(1) {
        let Some(parent) = branch.parent else {
            branches.push(None);
            continue;
        };
        let geometry = BranchGeometry::of(branch, &segments[parent], lengths[index]);
        volume += geometry.volume;
        diameter = diameter.max(geometry.diameter);
        branches.push(Some(geometry));
    }

    let height = lengths[0];
    let tree = TreeGeometry {
        volume,
        diameter,
        height,
        strength: strength(diameter, height),
    };

    (branches, tree)
}
