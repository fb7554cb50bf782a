//! Pruning of segment trees by tip length and by branch diameter.
//!
//! Both operations take a whole forest and return the pruned forest. Trees
//! whose root does not survive are dropped, so the result may hold fewer
//! trees or none at all. Surviving segments keep their relative order, which
//! preserves the parent-before-child invariant under reindexing.

use crate::model::{Forest, Segment, SegmentIndex, Tree};
use tracing::debug;

// =#========================================================================#=
// PRUNER (trait)
// =#========================================================================#=
/// Pruning operations used when shrinking a forest.
///
/// The growth simulator only sequences these calls; implement this trait to
/// substitute other pruning rules.
pub trait Pruner {
    /// Removes `length` of structure from the tips of every tree.
    fn prune_length(&mut self, forest: Forest, length: f64) -> Forest;

    /// Removes branches thinner than `diameter`.
    fn prune_diameter(&mut self, forest: Forest, diameter: f64) -> Forest;
}

/// [Pruner] backed by [prune_length] and [prune_diameter].
#[derive(Debug, Clone, Copy, Default)]
pub struct TipPruner;

impl Pruner for TipPruner {
    fn prune_length(&mut self, forest: Forest, length: f64) -> Forest {
        prune_length(forest, length)
    }

    fn prune_diameter(&mut self, forest: Forest, diameter: f64) -> Forest {
        prune_diameter(forest, diameter)
    }
}

// ============================================================================
// Prune by length (pub)
// ============================================================================
/// Shortens every tree by `length`, measured along paths from the tips.
///
/// See [prune_tree_length] for the per-tree rule.
pub fn prune_length(forest: Forest, length: f64) -> Forest {
    let before = forest.num_trees();
    let pruned: Forest = forest
        .into_iter()
        .filter_map(|tree| prune_tree_length(&tree, length))
        .collect();
    debug!(before, after = pruned.num_trees(), length, "pruned by length");

    pruned
}

/// Shortens one tree by `length`, measured along paths from its tips.
///
/// For every segment, the longest path (sum of segment lengths) down to a
/// descendant leaf tip is computed. Segments whose path is at least `length`
/// survive unchanged. A segment with a shorter path whose parent survives is
/// kept as a shortened leaf if part of it lies more than `length` from the
/// furthest tip: its tip moves toward the parent so that exactly `length` is
/// removed from that path.
///
/// # Returns
/// The pruned tree, or `None` if the root's path is shorter than `length`.
/// Trunk-only trees are returned unchanged.
pub fn prune_tree_length(tree: &Tree, length: f64) -> Option<Tree> {
    let segments = tree.segments();
    if segments.is_empty() {
        return Some(tree.clone());
    }

    let mut path = vec![0.0_f64; segments.len()];
    for index in (1..segments.len()).rev() {
        if let Some(parent) = segments[index].parent {
            let reach = path[index] + segments[index].distance_to(&segments[parent]);
            path[parent] = path[parent].max(reach);
        }
    }
    if path[0] < length {
        return None;
    }

    let mut retained = Retained::new(segments.len());
    retained.keep(0, segments[0].clone());
    for (index, segment) in segments.iter().enumerate().skip(1) {
        let Some(parent) = segment.parent.filter(|&p| retained.is_kept(p)) else {
            continue;
        };

        if path[index] >= length {
            retained.keep(index, segment.clone());
            continue;
        }

        let offset = segment.offset_from(&segments[parent]);
        let remaining = offset.norm() + path[index] - length;
        if remaining > 0.0 {
            let mut shortened = segment.clone();
            shortened.tip = segments[parent].tip + offset * (remaining / offset.norm());
            retained.keep(index, shortened);
        }
    }

    Some(retained.into_tree(tree))
}

// ============================================================================
// Prune by diameter (pub)
// ============================================================================
/// Removes every branch thinner than `diameter`, with all its descendants.
///
/// See [prune_tree_diameter] for the per-tree rule.
pub fn prune_diameter(forest: Forest, diameter: f64) -> Forest {
    let before = forest.num_trees();
    let pruned: Forest = forest
        .into_iter()
        .filter_map(|tree| prune_tree_diameter(&tree, diameter))
        .collect();
    debug!(before, after = pruned.num_trees(), diameter, "pruned by diameter");

    pruned
}

/// Removes every segment thinner than `diameter` from one tree, together
/// with its descendants.
///
/// # Returns
/// The pruned tree, or `None` if the root is thinner than `diameter`.
/// Trunk-only trees are returned unchanged.
pub fn prune_tree_diameter(tree: &Tree, diameter: f64) -> Option<Tree> {
    let segments = tree.segments();
    if segments.is_empty() {
        return Some(tree.clone());
    }
    if segments[0].diameter() < diameter {
        return None;
    }

    let mut retained = Retained::new(segments.len());
    retained.keep(0, segments[0].clone());
    for (index, segment) in segments.iter().enumerate().skip(1) {
        let parent_kept = segment.parent.is_some_and(|p| retained.is_kept(p));
        if parent_kept && segment.diameter() >= diameter {
            retained.keep(index, segment.clone());
        }
    }

    Some(retained.into_tree(tree))
}

// ============================================================================
// Reindexing (private)
// ============================================================================
/// Surviving segments of a tree, with the old-to-new index mapping.
struct Retained {
    new_index: Vec<Option<SegmentIndex>>,
    segments: Vec<Segment>,
}

impl Retained {
    fn new(num_segments: usize) -> Self {
        Retained {
            new_index: vec![None; num_segments],
            segments: Vec::with_capacity(num_segments),
        }
    }

    fn is_kept(&self, old: SegmentIndex) -> bool {
        self.new_index[old].is_some()
    }

    /// Keeps a segment; its parent must already be kept (or it is the root).
    fn keep(&mut self, old: SegmentIndex, mut segment: Segment) {
        segment.parent = segment.parent.and_then(|p| self.new_index[p]);
        self.new_index[old] = Some(self.segments.len());
        self.segments.push(segment);
    }

    fn into_tree(self, original: &Tree) -> Tree {
        Tree::from_parts(self.segments, original.attribute_names().to_vec())
    }
}
