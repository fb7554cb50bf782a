//! Branch dominance and branch angle at branch points.
//!
//! At every segment with more than one child, the two children with the
//! largest representative radius are compared:
//! * dominance `-1 + 2·r1²/(r1² + r2²)`, 0 for an even split and approaching
//!   1 when one child takes all of the cross-section,
//! * angle between their directions, in degrees within `[0, 180]`.
//!
//! A child that continues through exactly one grandchild is represented by
//! that grandchild's radius and direction, which have settled better one
//! segment further out.
//!
//! Tree-level values are means weighted by `r1² + r2²`.

use crate::model::{ChildrenIndex, Segment, SegmentIndex};
use nalgebra::Vector3;

// =#========================================================================#=
// BRANCH POINT
// =#========================================================================#=
/// Metrics of a single branch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchPoint {
    /// Index of the branching segment
    pub index: SegmentIndex,
    /// Representative radius of the dominant child
    pub max_radius: f64,
    /// Representative radius of the runner-up child
    pub second_radius: f64,
    /// Dominance score in `[-1, 1]`
    pub dominance: f64,
    /// Angle between the two dominant children in degrees
    pub angle: f64,
}

impl BranchPoint {
    /// Scores the segment at `index`, or returns `None` if it is not a
    /// branch point.
    ///
    /// Children are ranked by representative radius with strict
    /// comparisons, so on ties the child seen first wins.
    ///
    /// # Arguments
    /// * `segments` - Segments of one tree
    /// * `children` - Children index of the same segments
    /// * `index` - Segment to score
    pub fn score(
        segments: &[Segment],
        children: &ChildrenIndex,
        index: SegmentIndex,
    ) -> Option<BranchPoint> {
        if !children.is_branch_point(index) {
            return None;
        }

        let mut max_radius = -1.0;
        let mut second_radius = -1.0;
        let mut dir1 = Vector3::zeros();
        let mut dir2 = Vector3::zeros();

        for &child in children.children_of(index) {
            let (radius, dir) = match children.single_child(child) {
                Some(grandchild) => (
                    segments[grandchild].radius,
                    segments[grandchild].offset_from(&segments[child]),
                ),
                None => (
                    segments[child].radius,
                    segments[child].offset_from(&segments[index]),
                ),
            };

            if radius > max_radius {
                second_radius = max_radius;
                max_radius = radius;
                dir2 = dir1;
                dir1 = dir;
            } else if radius > second_radius {
                second_radius = radius;
                dir2 = dir;
            }
        }

        Some(BranchPoint {
            index,
            max_radius,
            second_radius,
            dominance: dominance(max_radius, second_radius),
            angle: angle_degrees(&dir1, &dir2),
        })
    }

    /// Returns the aggregation weight, `max_radius² + second_radius²`.
    pub fn weight(&self) -> f64 {
        self.max_radius * self.max_radius + self.second_radius * self.second_radius
    }
}

/// Returns the dominance of a split into radii `max_radius >= second_radius`.
///
/// Two zero radii carry no cross-section to compare; their dominance is
/// reported as 0 (even split).
pub fn dominance(max_radius: f64, second_radius: f64) -> f64 {
    let weight = max_radius * max_radius + second_radius * second_radius;
    if weight <= 0.0 {
        return 0.0;
    }

    -1.0 + 2.0 * max_radius * max_radius / weight
}

/// Returns the angle between two directions in degrees, within `[0, 180]`.
pub fn angle_degrees(dir1: &Vector3<f64>, dir2: &Vector3<f64>) -> f64 {
    dir1.cross(dir2).norm().atan2(dir1.dot(dir2)).to_degrees()
}

// =#========================================================================#=
// WEIGHTED MEAN
// =#========================================================================#=
/// Weighted mean of dominance and angle over the branch points of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BranchingMean {
    weighted_dominance: f64,
    weighted_angle: f64,
    total_weight: f64,
    count: usize,
}

impl BranchingMean {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a branch point, weighted by [`BranchPoint::weight`].
    pub fn add(&mut self, point: &BranchPoint) {
        let weight = point.weight();
        self.weighted_dominance += weight * point.dominance;
        self.weighted_angle += weight * point.angle;
        self.total_weight += weight;
        self.count += 1;
    }

    /// Returns the number of branch points added.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the weighted mean dominance, or `None` without any weight.
    pub fn dominance(&self) -> Option<f64> {
        (self.total_weight > 0.0).then(|| self.weighted_dominance / self.total_weight)
    }

    /// Returns the weighted mean angle, or `None` without any weight.
    pub fn angle(&self) -> Option<f64> {
        (self.total_weight > 0.0).then(|| self.weighted_angle / self.total_weight)
    }
}

/// Scores every branch point among segments `1..n` of a tree.
///
/// The root is not scored, matching the per-segment pass of the info
/// pipeline.
pub fn branch_points(segments: &[Segment], children: &ChildrenIndex) -> Vec<BranchPoint> {
    (1..segments.len())
        .filter_map(|index| BranchPoint::score(segments, children, index))
        .collect()
}
