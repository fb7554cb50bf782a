//! Incremental, validating construction of [Tree]s.
//!
//! The reader and the pruning routines assemble trees segment by segment.
//! [TreeBuilder] checks the arena invariants at every step, so a finished
//! tree never needs a separate validation pass:
//!
//! ```text
//! new(names) ──→ add_root() ──→ add_segment()* ──→ finish()
//! ```
//!
//! # Example
//! ```
//! use nalgebra::Point3;
//! use treetools::model::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new(Vec::new());
//! let root = builder.add_root(Point3::new(0.0, 0.0, 0.0), 0.1, Vec::new())?;
//! builder.add_segment(Point3::new(0.0, 0.0, 1.0), 0.08, root, Vec::new())?;
//! let tree = builder.finish()?;
//! assert_eq!(tree.num_segments(), 2);
//! # Ok::<(), treetools::TreeError>(())
//! ```

use crate::error::TreeError;
use crate::model::segment::{Segment, SegmentIndex};
use crate::model::tree::Tree;
use nalgebra::Point3;

/// Builder for a single [Tree], enforcing parent-before-child order.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    attribute_names: Vec<String>,
    segments: Vec<Segment>,
}

impl TreeBuilder {
    /// Creates a builder for a tree with the given attribute names.
    pub fn new(attribute_names: Vec<String>) -> Self {
        TreeBuilder {
            attribute_names,
            segments: Vec::new(),
        }
    }

    /// Creates a builder with room for `capacity` segments.
    pub fn with_capacity(attribute_names: Vec<String>, capacity: usize) -> Self {
        TreeBuilder {
            attribute_names,
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Adds the root segment, which always receives index 0.
    ///
    /// # Errors
    /// [TreeError::RootAlreadySet] if called twice, or the errors of
    /// [`add_segment`](Self::add_segment) for radius and attribute values.
    pub fn add_root(
        &mut self,
        tip: Point3<f64>,
        radius: f64,
        attributes: Vec<f64>,
    ) -> Result<SegmentIndex, TreeError> {
        if !self.segments.is_empty() {
            return Err(TreeError::RootAlreadySet);
        }

        self.push(Segment::new(tip, radius, None, attributes))
    }

    /// Adds a non-root segment.
    ///
    /// # Arguments
    /// * `tip` - Distal end point
    /// * `radius` - Radius at the tip; non-negative and finite
    /// * `parent` - Index of an already added segment
    /// * `attributes` - One value per attribute name
    ///
    /// # Returns
    /// The index of the new segment.
    ///
    /// # Errors
    /// - [TreeError::RootNotSet] if no root was added yet
    /// - [TreeError::InvalidParent] if `parent` is not smaller than the new index
    /// - [TreeError::InvalidRadius] if `radius` is negative or not finite
    /// - [TreeError::AttributeCount] if the number of values is wrong
    pub fn add_segment(
        &mut self,
        tip: Point3<f64>,
        radius: f64,
        parent: SegmentIndex,
        attributes: Vec<f64>,
    ) -> Result<SegmentIndex, TreeError> {
        if self.segments.is_empty() {
            return Err(TreeError::RootNotSet);
        }
        let index = self.segments.len();
        if parent >= index {
            return Err(TreeError::InvalidParent { index, parent });
        }

        self.push(Segment::new(tip, radius, Some(parent), attributes))
    }

    /// Returns the number of segments added so far.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Finishes construction and returns the tree.
    ///
    /// # Errors
    /// [TreeError::RootNotSet] if no segment was added, or
    /// [TreeError::DuplicateAttribute] if attribute names repeat.
    pub fn finish(self) -> Result<Tree, TreeError> {
        if self.segments.is_empty() {
            return Err(TreeError::RootNotSet);
        }
        for (i, name) in self.attribute_names.iter().enumerate() {
            if self.attribute_names[..i].contains(name) {
                return Err(TreeError::DuplicateAttribute(name.clone()));
            }
        }

        Ok(Tree::from_parts(self.segments, self.attribute_names))
    }

    fn push(&mut self, segment: Segment) -> Result<SegmentIndex, TreeError> {
        let index = self.segments.len();
        if !(segment.radius >= 0.0 && segment.radius.is_finite()) {
            return Err(TreeError::InvalidRadius {
                index,
                radius: segment.radius,
            });
        }
        if segment.attributes.len() != self.attribute_names.len() {
            return Err(TreeError::AttributeCount {
                index,
                expected: self.attribute_names.len(),
                found: segment.attributes.len(),
            });
        }

        self.segments.push(segment);
        Ok(index)
    }
}
