//! Children index derived from parent links.
//!
//! Trees store only parent links. Most traversals need the reverse direction,
//! so [ChildrenIndex] is rebuilt per tree whenever it is needed and never
//! stored alongside the segments.

use crate::model::segment::{Segment, SegmentIndex};

/// Mapping from each segment index to its ordered list of children.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildrenIndex {
    children: Vec<Vec<SegmentIndex>>,
}

impl ChildrenIndex {
    /// Builds the children index of the given segments.
    ///
    /// Visits segments `1..n` in order and appends each to the list of its
    /// parent, so every child list is sorted by index. An empty slice yields
    /// an empty index.
    ///
    /// # Arguments
    /// * `segments` - Segments of one tree in topological order
    pub fn build(segments: &[Segment]) -> Self {
        let mut children = vec![Vec::new(); segments.len()];
        for (index, segment) in segments.iter().enumerate().skip(1) {
            if let Some(parent) = segment.parent {
                children[parent].push(index);
            }
        }

        ChildrenIndex { children }
    }

    /// Returns the children of the given segment.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn children_of(&self, index: SegmentIndex) -> &[SegmentIndex] {
        &self.children[index]
    }

    /// Returns the number of children of the given segment.
    pub fn num_children(&self, index: SegmentIndex) -> usize {
        self.children[index].len()
    }

    /// Returns `true` if the given segment has no children.
    pub fn is_leaf(&self, index: SegmentIndex) -> bool {
        self.children[index].is_empty()
    }

    /// Returns `true` if the given segment has more than one child.
    pub fn is_branch_point(&self, index: SegmentIndex) -> bool {
        self.children[index].len() > 1
    }

    /// Returns the only child if the segment has exactly one, else `None`.
    pub fn single_child(&self, index: SegmentIndex) -> Option<SegmentIndex> {
        match self.children[index].as_slice() {
            [child] => Some(*child),
            _ => None,
        }
    }

    /// Returns the number of segments covered by this index.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the index covers no segments.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns an iterator over all leaf indices, in increasing order.
    pub fn leaves(&self) -> impl Iterator<Item = SegmentIndex> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, children)| children.is_empty())
            .map(|(index, _)| index)
    }
}
