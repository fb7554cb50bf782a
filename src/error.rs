//! Error type for operations on segment trees and forests.
//!
//! [TreeError] covers structural violations caught while building a tree,
//! input problems that make a forest unsuitable for an operation
//! (trunk-only records, attribute collisions), and wrapped reader and I/O
//! failures. All of them are terminal for the current run.

use crate::io::ParsingError;
use crate::model::SegmentIndex;
use thiserror::Error;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Errors raised while building, analysing, growing, loading or saving trees.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Forest holds trunk-only records where a branch structure is required.
    #[error("operation only works on tree structures, not trunk-only files")]
    TrunkOnly,

    /// A tree has no segments at all.
    #[error("tree {tree} has no segments")]
    EmptyTree { tree: usize },

    /// An attribute to be added is already present in a tree.
    #[error("cannot add info that is already present: {0}")]
    AttributeCollision(String),

    /// Attribute names within a tree must be unique.
    #[error("duplicate attribute name: {0}")]
    DuplicateAttribute(String),

    /// A segment was added before the root.
    #[error("segment added before the root was set")]
    RootNotSet,

    /// A second root was added to the same tree.
    #[error("tree already has a root")]
    RootAlreadySet,

    /// Parent index does not precede the segment in the arena.
    #[error("segment {index} has parent {parent}, but parents must precede their children")]
    InvalidParent {
        index: SegmentIndex,
        parent: SegmentIndex,
    },

    /// Number of attribute values does not match the tree's attribute names.
    #[error("segment {index} has {found} attribute values, expected {expected}")]
    AttributeCount {
        index: SegmentIndex,
        expected: usize,
        found: usize,
    },

    /// Radius is negative or not finite.
    #[error("segment {index} has invalid radius {radius}")]
    InvalidRadius { index: SegmentIndex, radius: f64 },

    /// Forest file could not be parsed.
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    /// Reading or writing a forest file failed.
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),
}
