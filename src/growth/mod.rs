//! Linear growth and shrinkage of forests over a time period.
//!
//! The model is a placeholder linear one; no branches are ever created.
//! 1. Every segment thickens by `0.5 · width_rate · period` in radius
//!    (thins when the period is negative).
//! 2. For a positive period, every leaf gets a new tip segment extending it
//!    by `length_rate · period` along its own direction.
//!    For a non-positive period, the forest is pruned by that length from
//!    the tips, then by a minimum branch diameter.
//!
//! # Example
//! ```
//! use nalgebra::Point3;
//! use treetools::growth::{GrowthConfig, GrowthOutcome, simulate};
//! use treetools::model::{Forest, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new(Vec::new());
//! let root = builder.add_root(Point3::origin(), 0.1, Vec::new())?;
//! builder.add_segment(Point3::new(0.0, 0.0, 1.0), 0.08, root, Vec::new())?;
//! let forest = Forest::from_trees(vec![builder.finish()?]);
//!
//! let outcome = simulate(forest, &GrowthConfig::new(1.0))?;
//! assert!(matches!(outcome, GrowthOutcome::Grown(ref f) if f.trees()[0].num_segments() == 3));
//! # Ok::<(), treetools::TreeError>(())
//! ```

pub mod prune;

pub use prune::{Pruner, TipPruner, prune_diameter, prune_length};

use crate::error::TreeError;
use crate::model::{Forest, Segment, Tree};
use nalgebra::Vector3;
use std::fmt;
use tracing::{debug, info, warn};

/// Default branch length increase per year, in metres.
pub const DEFAULT_LENGTH_RATE: f64 = 0.3;

/// Default branch diameter increase per year, in metres.
pub const DEFAULT_WIDTH_RATE: f64 = 0.004;

/// Thinnest branch diameter kept after shrinking, in metres.
pub const MIN_BRANCH_DIAMETER: f64 = 0.001;

// =#========================================================================#=
// GROWTH CONFIG
// =#========================================================================#=
/// Period and rates of a growth simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthConfig {
    period: f64,
    length_rate: f64,
    width_rate: f64,
    min_branch_diameter: f64,
}

impl GrowthConfig {
    /// Creates a config for the given signed period (in years) with default rates.
    pub fn new(period: f64) -> Self {
        GrowthConfig {
            period,
            length_rate: DEFAULT_LENGTH_RATE,
            width_rate: DEFAULT_WIDTH_RATE,
            min_branch_diameter: MIN_BRANCH_DIAMETER,
        }
    }

    /// Sets the branch length increase per year.
    pub fn with_length_rate(mut self, length_rate: f64) -> Self {
        self.length_rate = length_rate;
        self
    }

    /// Sets the branch diameter increase per year.
    pub fn with_width_rate(mut self, width_rate: f64) -> Self {
        self.width_rate = width_rate;
        self
    }

    /// Sets the thinnest branch diameter kept after shrinking.
    pub fn with_min_branch_diameter(mut self, min_branch_diameter: f64) -> Self {
        self.min_branch_diameter = min_branch_diameter;
        self
    }

    /// Returns the signed period in years.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Returns the branch length increase per year.
    pub fn length_rate(&self) -> f64 {
        self.length_rate
    }

    /// Returns the branch diameter increase per year.
    pub fn width_rate(&self) -> f64 {
        self.width_rate
    }

    /// Returns the thinnest branch diameter kept after shrinking.
    pub fn min_branch_diameter(&self) -> f64 {
        self.min_branch_diameter
    }

    /// Returns the radius change over the period.
    pub fn radius_growth(&self) -> f64 {
        0.5 * self.width_rate * self.period
    }

    /// Returns the tip length change over the period.
    pub fn length_growth(&self) -> f64 {
        self.length_rate * self.period
    }
}

// =#========================================================================#=
// GROWTH OUTCOME
// =#========================================================================#=
/// Stage at which shrinking removed every tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStage {
    /// Pruning by length left no trees.
    Shrinking,
    /// Pruning by diameter left no trees.
    Pruning,
}

impl fmt::Display for EmptyStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmptyStage::Shrinking => write!(f, "shrinking"),
            EmptyStage::Pruning => write!(f, "pruning"),
        }
    }
}

/// Result of a growth simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthOutcome {
    /// The grown (or shrunk) forest, with at least one tree.
    Grown(Forest),
    /// Nothing left to save.
    Empty(EmptyStage),
}

// =#========================================================================#=
// SIMULATION
// =#========================================================================#=
/// Grows or shrinks a forest with the default [TipPruner].
///
/// See [simulate_with] for details.
pub fn simulate(forest: Forest, config: &GrowthConfig) -> Result<GrowthOutcome, TreeError> {
    simulate_with(forest, config, &mut TipPruner)
}

/// Grows or shrinks a forest over `config.period()` years.
///
/// # Arguments
/// * `forest` - Forest to transform
/// * `config` - Period and rates
/// * `pruner` - Pruning operations used for non-positive periods
///
/// # Returns
/// [GrowthOutcome::Grown] with the new forest, or [GrowthOutcome::Empty]
/// if shrinking removed every tree.
///
/// # Errors
/// [TreeError::TrunkOnly] if the forest holds trunk-only records.
pub fn simulate_with<P: Pruner>(
    mut forest: Forest,
    config: &GrowthConfig,
    pruner: &mut P,
) -> Result<GrowthOutcome, TreeError> {
    if forest.has_trunk_only() {
        return Err(TreeError::TrunkOnly);
    }

    let radius_growth = config.radius_growth();
    let length_growth = config.length_growth();
    info!(period = config.period(), radius_growth, length_growth, "simulating growth");
    thicken(&mut forest, radius_growth);

    if config.period() > 0.0 {
        for tree in forest.trees_mut() {
            let num_tips = extend_tips(tree, length_growth, radius_growth)?;
            debug!(num_tips, "extended tips");
        }
        return Ok(GrowthOutcome::Grown(forest));
    }

    let shrunk = pruner.prune_length(forest, -length_growth);
    if shrunk.is_empty() {
        warn!(stage = %EmptyStage::Shrinking, "no trees left");
        return Ok(GrowthOutcome::Empty(EmptyStage::Shrinking));
    }

    let pruned = pruner.prune_diameter(shrunk, config.min_branch_diameter());
    if pruned.is_empty() {
        warn!(stage = %EmptyStage::Pruning, "no trees left");
        return Ok(GrowthOutcome::Empty(EmptyStage::Pruning));
    }

    Ok(GrowthOutcome::Grown(pruned))
}

/// Adds `radius_growth` to the radius of every segment of every tree.
pub fn thicken(forest: &mut Forest, radius_growth: f64) {
    for tree in forest.trees_mut() {
        for segment in tree.segments_mut() {
            segment.radius += radius_growth;
        }
    }
}

/// Appends a new tip segment to every leaf of a tree.
///
/// Leaves are taken from the structure before any tip is added. Each new
/// tip continues its leaf's direction (straight up for a lone root) by
/// `length_growth`, has the leaf's radius minus `radius_growth`, and copies
/// the leaf's attribute values.
///
/// # Returns
/// The number of tips added.
///
/// # Errors
/// Propagates [TreeError]s from appending segments, which cannot occur for
/// a valid tree.
pub fn extend_tips(tree: &mut Tree, length_growth: f64, radius_growth: f64) -> Result<usize, TreeError> {
    let leaves: Vec<_> = tree.children().leaves().collect();

    for &leaf in &leaves {
        let segment = &tree[leaf];
        let direction = match segment.parent {
            Some(parent) => segment
                .offset_from(&tree[parent])
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros),
            None => Vector3::z(),
        };
        let tip = Segment::new(
            segment.tip + direction * length_growth,
            segment.radius - radius_growth,
            None,
            segment.attributes.clone(),
        );
        tree.push_child(tip, leaf)?;
    }

    Ok(leaves.len())
}
