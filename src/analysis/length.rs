//! Leaf-to-root propagation of the "length" attribute.
//!
//! The length of a segment approximates the straight-line distance from its
//! tip to the tip of its furthest descendant leaf. For every leaf the
//! propagator walks up the parent chain and raises each ancestor's length to
//! the distance from that ancestor to the leaf.
//!
//! In [LengthMode::Approximate] the walk stops at the first ancestor that
//! is not improved. Distance to a leaf does not always grow with every step
//! toward the root, so this can under-count for some shapes.
//! [LengthMode::Exact] always walks to the root.

use crate::model::{ChildrenIndex, Segment, SegmentIndex};

/// How far a leaf's distance is propagated toward the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthMode {
    /// Stop at the first ancestor whose length does not increase.
    #[default]
    Approximate,
    /// Always walk to the root.
    Exact,
}

/// Accumulates per-segment lengths while leaves are visited.
///
/// Lengths start at 0 and only ever increase. All leaves must be visited
/// before [`into_lengths`](Self::into_lengths) is read by anything else.
#[derive(Debug, Clone)]
pub struct LengthPropagator<'a> {
    segments: &'a [Segment],
    lengths: Vec<f64>,
    mode: LengthMode,
}

impl<'a> LengthPropagator<'a> {
    /// Creates a propagator with all lengths at zero.
    pub fn new(segments: &'a [Segment], mode: LengthMode) -> Self {
        LengthPropagator {
            segments,
            lengths: vec![0.0; segments.len()],
            mode,
        }
    }

    /// Propagates the tip of `leaf` to its ancestors.
    ///
    /// # Panics
    /// Panics if `leaf` is out of bounds.
    pub fn visit_leaf(&mut self, leaf: SegmentIndex) {
        let tip = self.segments[leaf].tip;
        let mut current = self.segments[leaf].parent;

        while let Some(ancestor) = current {
            let dist = (tip - self.segments[ancestor].tip).norm();
            if dist > self.lengths[ancestor] {
                self.lengths[ancestor] = dist;
            } else if self.mode == LengthMode::Approximate {
                break;
            }
            current = self.segments[ancestor].parent;
        }
    }

    /// Returns the current length of a segment.
    pub fn length(&self, index: SegmentIndex) -> f64 {
        self.lengths[index]
    }

    /// Returns all lengths, indexed like the segments.
    pub fn into_lengths(self) -> Vec<f64> {
        self.lengths
    }
}

/// Computes the lengths of all segments of a tree.
///
/// Leaves are visited in increasing index order; the root is never treated
/// as a leaf, so a root-only tree has length 0.
///
/// # Arguments
/// * `segments` - Segments of one tree
/// * `children` - Children index of the same segments
/// * `mode` - Early-exit behaviour of the upward walk
pub fn propagate_lengths(
    segments: &[Segment],
    children: &ChildrenIndex,
    mode: LengthMode,
) -> Vec<f64> {
    let mut propagator = LengthPropagator::new(segments, mode);
    for leaf in children.leaves().filter(|&i| i != 0) {
        propagator.visit_leaf(leaf);
    }

    propagator.into_lengths()
}
