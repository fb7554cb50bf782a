//! Info pipeline: derived attributes for every segment and tree summaries.
//!
//! For each tree of a forest the pipeline:
//! 1. appends the attributes [INFO_ATTRIBUTES] with zeroed slots,
//! 2. runs one pass over segments `1..n`, propagating lengths from every
//!    leaf and scoring every branch point,
//! 3. derives branch geometry from the completed lengths,
//! 4. writes per-segment values and the tree values at the root.
//!
//! Attribute collisions are checked on every tree before any tree is
//! changed, so a failed run leaves the forest as it was.

use crate::analysis::geometry::derive_geometry;
use crate::analysis::length::{LengthMode, LengthPropagator};
use crate::analysis::summary::{ForestSummary, TreeSummary};
use crate::analysis::topology::{BranchPoint, BranchingMean};
use crate::error::TreeError;
use crate::model::{Forest, Tree};
use tracing::{debug, info, warn};

/// Name of the volume attribute.
pub const VOLUME: &str = "volume";
/// Name of the diameter attribute.
pub const DIAMETER: &str = "diameter";
/// Name of the length attribute.
pub const LENGTH: &str = "length";
/// Name of the strength attribute.
pub const STRENGTH: &str = "strength";
/// Name of the dominance attribute.
pub const DOMINANCE: &str = "dominance";
/// Name of the angle attribute.
pub const ANGLE: &str = "angle";

/// Attributes added by the info pipeline, in slot order.
pub const INFO_ATTRIBUTES: [&str; 6] = [VOLUME, DIAMETER, LENGTH, STRENGTH, DOMINANCE, ANGLE];

// =#========================================================================#=
// INFO CONFIG
// =#========================================================================#=
/// Settings of the info pipeline.
///
/// # Example
/// ```
/// use treetools::analysis::{InfoConfig, LengthMode};
///
/// let config = InfoConfig::default().with_length_mode(LengthMode::Exact);
/// assert_eq!(config.length_mode(), LengthMode::Exact);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InfoConfig {
    length_mode: LengthMode,
}

impl InfoConfig {
    /// Sets how lengths are propagated toward the root.
    pub fn with_length_mode(mut self, length_mode: LengthMode) -> Self {
        self.length_mode = length_mode;
        self
    }

    /// Returns the length propagation mode.
    pub fn length_mode(&self) -> LengthMode {
        self.length_mode
    }
}

/// Slots of the info attributes within one tree.
#[derive(Debug, Clone, Copy)]
struct InfoSlots {
    volume: usize,
    diameter: usize,
    length: usize,
    strength: usize,
    dominance: usize,
    angle: usize,
}

impl InfoSlots {
    fn starting_at(first: usize) -> Self {
        InfoSlots {
            volume: first,
            diameter: first + 1,
            length: first + 2,
            strength: first + 3,
            dominance: first + 4,
            angle: first + 5,
        }
    }
}

// =#========================================================================#=
// PIPELINE
// =#========================================================================#=
/// Computes info attributes for every tree of the forest.
///
/// # Arguments
/// * `forest` - Forest to annotate in place
/// * `config` - Pipeline settings
///
/// # Returns
/// One [TreeSummary] per tree, in forest order.
///
/// # Errors
/// - [TreeError::TrunkOnly] if any tree has no segments
/// - [TreeError::AttributeCollision] if any tree already has an info attribute
///
/// In both cases no tree is modified.
pub fn compute_info(forest: &mut Forest, config: &InfoConfig) -> Result<Vec<TreeSummary>, TreeError> {
    if forest.has_trunk_only() {
        return Err(TreeError::TrunkOnly);
    }
    for tree in forest.trees() {
        if let Some(name) = INFO_ATTRIBUTES.iter().find(|name| tree.has_attribute(name)) {
            return Err(TreeError::AttributeCollision(name.to_string()));
        }
    }

    info!(num_trees = forest.num_trees(), "computing tree info");
    let mut summaries = Vec::with_capacity(forest.num_trees());
    for (t, tree) in forest.trees_mut().iter_mut().enumerate() {
        let summary = annotate_tree(tree, config)?;
        debug!(tree = t, ?summary, "tree annotated");
        if summary.dominance.is_none() {
            warn!(tree = t, "tree has no branch points, dominance and angle undefined");
        }
        summaries.push(summary);
    }

    Ok(summaries)
}

/// Computes info attributes and folds them into forest statistics.
///
/// See [compute_info] for errors.
pub fn summarize_forest(forest: &mut Forest, config: &InfoConfig) -> Result<ForestSummary, TreeError> {
    let summaries = compute_info(forest, config)?;
    Ok(ForestSummary::from_trees(&summaries))
}

/// Appends the info attributes to a single tree and fills them in.
///
/// The root's `dominance` and `angle` hold the tree means. A tree without
/// branch points has no such means, and its root keeps 0.0 in both slots;
/// check [TreeSummary::dominance] to tell the two apart.
///
/// # Errors
/// [TreeError::EmptyTree] for a tree without segments, or
/// [TreeError::AttributeCollision] if an info attribute is present.
pub fn annotate_tree(tree: &mut Tree, config: &InfoConfig) -> Result<TreeSummary, TreeError> {
    if tree.is_empty() {
        return Err(TreeError::EmptyTree { tree: 0 });
    }
    let slots = InfoSlots::starting_at(tree.append_attributes(&INFO_ATTRIBUTES)?);

    let children = tree.children();
    let segments = tree.segments();
    let mut propagator = LengthPropagator::new(segments, config.length_mode());
    let mut branching = BranchingMean::new();
    let mut branch_points = Vec::new();

    for index in 1..segments.len() {
        if children.is_leaf(index) {
            propagator.visit_leaf(index);
        } else if let Some(point) = BranchPoint::score(segments, &children, index) {
            branching.add(&point);
            branch_points.push(point);
        }
    }

    let lengths = propagator.into_lengths();
    let (branches, geometry) = derive_geometry(segments, &lengths);

    for point in &branch_points {
        let segment = &mut tree[point.index];
        segment.attributes[slots.dominance] = point.dominance;
        segment.attributes[slots.angle] = point.angle;
    }
    for (index, branch) in branches.iter().enumerate() {
        let segment = &mut tree[index];
        segment.attributes[slots.length] = lengths[index];
        if let Some(branch) = branch {
            segment.attributes[slots.volume] = branch.volume;
            segment.attributes[slots.diameter] = branch.diameter;
            segment.attributes[slots.strength] = branch.strength;
        }
    }

    let summary = TreeSummary {
        volume: geometry.volume,
        diameter: geometry.diameter,
        height: geometry.height,
        strength: geometry.strength,
        dominance: branching.dominance(),
        angle: branching.angle(),
        num_branch_points: branching.count(),
    };

    let root = &mut tree[0];
    root.attributes[slots.volume] = summary.volume;
    root.attributes[slots.diameter] = summary.diameter;
    root.attributes[slots.strength] = summary.strength;
    if let (Some(dominance), Some(angle)) = (summary.dominance, summary.angle) {
        root.attributes[slots.dominance] = dominance;
        root.attributes[slots.angle] = angle;
    }

    Ok(summary)
}
