//! Data model for segment trees reconstructed from point clouds.
//!
//! # Tree representation
//! A [Forest] owns its [Tree]s. Each tree uses the arena pattern to store
//! [Segment]s, referenced by [SegmentIndex]; a segment knows only its parent.
//! Segment 0 is the root and every parent precedes its children, so the
//! arena is always in topological order.
//!
//! Per-segment attributes are plain `f64` slots whose names live once per
//! tree; slot `k` of every segment belongs to attribute name `k`.
//!
//! # Building trees
//! Trees are constructed with [TreeBuilder], which rejects parents that do
//! not precede their children. The reverse links are derived on demand as
//! a [ChildrenIndex].

pub mod children;
pub mod forest;
pub mod segment;
pub mod tree;
pub mod tree_builder;

pub use children::ChildrenIndex;
pub use forest::Forest;
pub use segment::{Segment, SegmentIndex, Trunk};
pub use tree::Tree;
pub use tree_builder::TreeBuilder;
