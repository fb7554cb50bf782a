//! Segment tree stored as an arena of [Segment]s.
//!
//! Provides [Tree], the per-plant structure, whose segments reference each
//! other only by [SegmentIndex]:
//! * segment 0 is the root (trunk base) and has no parent,
//! * every other segment's parent precedes it in the arena,
//! * every segment carries one value per attribute name of the tree.

use crate::error::TreeError;
use crate::model::children::ChildrenIndex;
use crate::model::segment::{Segment, SegmentIndex, Trunk};

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A reconstructed plant as a flat, parent-indexed array of segments.
///
/// Segments are stored in topological order (parents before children), so
/// the structure can be checked mechanically and traversed without
/// recursion: a forward pass over the arena visits parents first, a
/// backward pass visits children first.
///
/// A tree loaded from a trunk-only file has no segments and holds a
/// [Trunk] instead. Such trees are rejected by attribute-computing and growth
/// operations.
///
/// # Construction
/// Use [TreeBuilder](crate::model::TreeBuilder), which enforces the ordering
/// invariant while segments are added.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Segments of this tree (arena pattern)
    segments: Vec<Segment>,

    /// Names of the per-segment attributes, in slot order
    attribute_names: Vec<String>,

    /// Trunk record for trunk-only trees
    trunk: Option<Trunk>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a tree from segments already known to satisfy the invariants.
    pub(crate) fn from_parts(segments: Vec<Segment>, attribute_names: Vec<String>) -> Self {
        Tree {
            segments,
            attribute_names,
            trunk: None,
        }
    }

    /// Creates a trunk-only tree.
    ///
    /// # Arguments
    /// * `trunk` - The trunk record
    /// * `attribute_names` - Names of the trunk attributes
    pub fn from_trunk(trunk: Trunk, attribute_names: Vec<String>) -> Self {
        Tree {
            segments: Vec::new(),
            attribute_names,
            trunk: Some(trunk),
        }
    }

    /// Returns the segments in arena order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the segments mutably.
    ///
    /// Topology is not exposed for mutation: parents and the number of
    /// segments are only changed through methods that keep the invariants.
    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        self.segments.iter_mut()
    }

    /// Returns the number of segments.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if this tree has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if this is a trunk-only record.
    pub fn is_trunk_only(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the trunk record of a trunk-only tree, else `None`.
    pub fn trunk(&self) -> Option<&Trunk> {
        self.trunk.as_ref()
    }

    /// Returns the root segment, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Returns the attribute names in slot order.
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    /// Returns the slot of the given attribute name, if present.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attribute_names.iter().position(|n| n == name)
    }

    /// Returns `true` if the tree has an attribute of the given name.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute_index(name).is_some()
    }

    /// Returns the value of the named attribute at the given segment.
    ///
    /// # Returns
    /// `None` if no such attribute exists or `index` is out of bounds.
    pub fn attribute(&self, index: SegmentIndex, name: &str) -> Option<f64> {
        let slot = self.attribute_index(name)?;
        self.segments.get(index).map(|s| s.attributes[slot])
    }

    /// Builds the children index of this tree.
    pub fn children(&self) -> ChildrenIndex {
        ChildrenIndex::build(&self.segments)
    }

    /// Appends new attribute names, adding a zero slot to every segment.
    ///
    /// Names are checked before anything is changed, so on error the tree
    /// is left untouched.
    ///
    /// # Arguments
    /// * `names` - New attribute names
    ///
    /// # Returns
    /// The slot of the first new attribute.
    ///
    /// # Errors
    /// [TreeError::AttributeCollision] if a name is already present,
    /// [TreeError::DuplicateAttribute] if `names` repeats a name.
    pub fn append_attributes(&mut self, names: &[&str]) -> Result<usize, TreeError> {
        for (i, name) in names.iter().enumerate() {
            if self.has_attribute(name) {
                return Err(TreeError::AttributeCollision(name.to_string()));
            }
            if names[..i].contains(name) {
                return Err(TreeError::DuplicateAttribute(name.to_string()));
            }
        }

        let first_slot = self.attribute_names.len();
        self.attribute_names
            .extend(names.iter().map(|name| name.to_string()));
        for segment in &mut self.segments {
            segment.attributes.resize(first_slot + names.len(), 0.0);
        }

        Ok(first_slot)
    }

    /// Appends a new segment as child of `parent`, returning its index.
    ///
    /// # Errors
    /// Returns [TreeError::InvalidParent] if `parent` is not an existing
    /// segment, or [TreeError::AttributeCount] if the value count does not
    /// match the attribute names.
    pub fn push_child(&mut self, mut segment: Segment, parent: SegmentIndex) -> Result<SegmentIndex, TreeError> {
        let index = self.segments.len();
        if parent >= index {
            return Err(TreeError::InvalidParent { index, parent });
        }
        if segment.attributes.len() != self.attribute_names.len() {
            return Err(TreeError::AttributeCount {
                index,
                expected: self.attribute_names.len(),
                found: segment.attributes.len(),
            });
        }

        segment.parent = Some(parent);
        self.segments.push(segment);
        Ok(index)
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Segment 0 exists and is the only segment without parent
    /// - Every other parent index is smaller than the segment's own index
    /// - Every segment has one value per attribute name
    /// - Attribute names are unique
    ///
    /// Trunk-only trees are valid if they hold a trunk record.
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.segments.is_empty() {
            return self.trunk.is_some();
        }

        for (i, name) in self.attribute_names.iter().enumerate() {
            if self.attribute_names[..i].contains(name) {
                return false;
            }
        }

        for (index, segment) in self.segments.iter().enumerate() {
            match (index, segment.parent) {
                (0, None) => {}
                (0, Some(_)) | (_, None) => return false,
                (_, Some(parent)) if parent >= index => return false,
                _ => {}
            }

            if segment.attributes.len() != self.attribute_names.len() {
                return false;
            }
        }

        true
    }
}

impl std::ops::Index<SegmentIndex> for Tree {
    type Output = Segment;

    fn index(&self, index: SegmentIndex) -> &Self::Output {
        &self.segments[index]
    }
}

impl std::ops::IndexMut<SegmentIndex> for Tree {
    fn index_mut(&mut self, index: SegmentIndex) -> &mut Self::Output {
        &mut self.segments[index]
    }
}
