//! Treetools computes structural metrics for trees reconstructed from point
//! clouds and simulates their linear growth.
//!
//! A forest file holds one tree per line as a flat list of segments, each
//! with a tip point, a radius and a parent index. This crate offers:
//! - Reading and writing forest files, see [crate::io].
//! - Tree models: [Forest], [Tree] and [Segment](model::Segment), using the
//!   arena pattern so segments are referenced by index only. See
//!   [crate::model].
//! - Info: per-segment volume, diameter, length, strength, dominance and
//!   angle written as attributes, per-tree summaries and forest statistics.
//!   See [crate::analysis].
//! - Growth: linear thickening and tip extension, or shrinking by pruning
//!   for negative periods. See [crate::growth].
//! - The `treeinfo` and `treegrow` tools, see [crate::cli].
//!
//! Limitations:
//! - Growth never creates new branches
//! - Trunk-only forests can be loaded and saved but not analysed or grown
//!
//! # Usage patterns
//! 1. The functions below give quick access with default settings.
//! 2. Configure the steps yourself with
//!    [InfoConfig](analysis::InfoConfig) and
//!    [GrowthConfig](growth::GrowthConfig).
//!
//! ## Example
//! ```no_run
//! use treetools::{grow, load_forest, save_forest, summarize};
//!
//! let mut forest = load_forest("forest.txt")?;
//! let summary = summarize(&mut forest)?;
//! println!("{} trees", summary.num_trees);
//! save_forest("forest_info.txt", &forest)?;
//!
//! if let Some(grown) = grow(forest, 2.0)? {
//!     save_forest("forest_grown.txt", &grown)?;
//! }
//! # Ok::<(), treetools::TreeError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod growth;
pub mod io;
pub mod model;

pub use error::TreeError;

use crate::analysis::{ForestSummary, InfoConfig};
use crate::growth::{GrowthConfig, GrowthOutcome};
use crate::model::{Forest, Tree};
use std::path::Path;

// ============================================================================
// Quick IO API
// ============================================================================
/// Loads a forest file.
///
/// See [`io::read_forest_file`] for full documentation.
pub fn load_forest<P: AsRef<Path>>(path: P) -> Result<Forest, TreeError> {
    io::read_forest_file(path)
}

/// Saves a forest file.
///
/// See [`io::write_forest_file`] for full documentation.
pub fn save_forest<P: AsRef<Path>>(path: P, forest: &Forest) -> Result<(), TreeError> {
    io::write_forest_file(path, forest)
}

// ============================================================================
// Quick Info API
// ============================================================================
/// Annotates every segment of the forest with the info attributes using
/// default settings, returning the forest statistics.
///
/// See [`analysis::compute_info`] for full documentation.
pub fn summarize(forest: &mut Forest) -> Result<ForestSummary, TreeError> {
    analysis::summarize_forest(forest, &InfoConfig::default())
}

/// Annotates a single tree with the info attributes using default settings.
///
/// See [`analysis::annotate_tree`] for full documentation.
pub fn annotate(tree: &mut Tree) -> Result<analysis::TreeSummary, TreeError> {
    analysis::annotate_tree(tree, &InfoConfig::default())
}

// ============================================================================
// Quick Growth API
// ============================================================================
/// Grows (or, for a negative `years`, shrinks) a forest with default rates.
///
/// Returns `None` if shrinking removed every tree.
///
/// See [`growth::simulate`] for full documentation.
pub fn grow(forest: Forest, years: f64) -> Result<Option<Forest>, TreeError> {
    match growth::simulate(forest, &GrowthConfig::new(years))? {
        GrowthOutcome::Grown(grown) => Ok(Some(grown)),
        GrowthOutcome::Empty(_) => Ok(None),
    }
}
