//! Derived structural metrics of segment trees.
//!
//! - [length] - distance from each segment to its furthest descendant leaf
//! - [topology] - branch dominance and angle at branch points
//! - [geometry] - branch volume, diameter and strength, and their roll-up
//! - [summary] - per-tree records and forest statistics
//! - [info] - the pipeline that writes all of the above as attributes

pub mod geometry;
pub mod info;
pub mod length;
pub mod summary;
pub mod topology;

pub use geometry::{BranchGeometry, STRENGTH_EPSILON, TreeGeometry, derive_geometry, strength};
pub use info::{INFO_ATTRIBUTES, InfoConfig, annotate_tree, compute_info, summarize_forest};
pub use length::{LengthMode, LengthPropagator, propagate_lengths};
pub use summary::{ForestSummary, Statistic, TreeSummary, WOOD_DENSITY};
pub use topology::{BranchPoint, BranchingMean, branch_points};
