//! Segment and trunk records of a segment tree.

use nalgebra::{Point3, Vector3};

/// Index of a segment in a tree (arena).
pub type SegmentIndex = usize;

// =#========================================================================#=
// SEGMENT
// =#========================================================================#=
/// One straight cylindrical piece of branch or trunk.
///
/// The cylinder runs from the parent's tip to this segment's `tip`, with
/// `radius` measured at the tip.
///
/// # Invariants
/// - `parent` is `None` only for the root, which sits at index 0
/// - `parent` of any other segment is an index strictly smaller than its own
/// - `attributes` has one value per attribute name of the owning tree,
///   addressed by position
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Distal end of the cylinder
    pub tip: Point3<f64>,
    /// Cylinder radius at the tip
    pub radius: f64,
    /// Index of the parent segment; `None` for the root
    pub parent: Option<SegmentIndex>,
    /// Values of the tree's attributes, positionally matching its names
    pub attributes: Vec<f64>,
}

impl Segment {
    /// Creates a new segment.
    ///
    /// # Arguments
    /// * `tip` - Distal end point
    /// * `radius` - Radius at the tip
    /// * `parent` - Parent index, or `None` for a root
    /// * `attributes` - Attribute values, one per attribute name of the tree
    pub fn new(
        tip: Point3<f64>,
        radius: f64,
        parent: Option<SegmentIndex>,
        attributes: Vec<f64>,
    ) -> Self {
        Segment {
            tip,
            radius,
            parent,
            attributes,
        }
    }

    /// Returns `true` if this is the root segment (no parent).
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the diameter at the tip.
    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    /// Returns the vector from `other`'s tip to this segment's tip.
    pub fn offset_from(&self, other: &Segment) -> Vector3<f64> {
        self.tip - other.tip
    }

    /// Returns the straight-line distance between the tips of both segments.
    pub fn distance_to(&self, other: &Segment) -> f64 {
        self.offset_from(other).norm()
    }

    /// Returns the parent index in the file convention, `-1` for the root.
    pub fn parent_id(&self) -> i64 {
        self.parent.map_or(-1, |parent| parent as i64)
    }
}

// =#========================================================================#=
// TRUNK
// =#========================================================================#=
/// Trunk-only record, as stored in files without branch structure.
///
/// Such records carry a base point and radius per tree but no segments; they
/// are kept so that trunk-only forests survive a load/save round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Trunk {
    /// Base of the trunk
    pub base: Point3<f64>,
    /// Trunk radius
    pub radius: f64,
    /// Values of the forest's trunk attributes
    pub attributes: Vec<f64>,
}
