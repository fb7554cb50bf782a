//! Collection of independently structured trees.

use crate::model::tree::Tree;

/// An ordered collection of [Tree]s, as loaded from one forest file.
///
/// Trees have no cross-tree references. All trees of a forest share the
/// same attribute names, since a file has a single format line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Forest { trees: Vec::new() }
    }

    /// Creates a forest from the given trees.
    pub fn from_trees(trees: Vec<Tree>) -> Self {
        Forest { trees }
    }

    /// Appends a tree.
    pub fn push(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Returns the trees.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Returns the trees mutably.
    pub fn trees_mut(&mut self) -> &mut [Tree] {
        &mut self.trees
    }

    /// Consumes the forest, returning its trees.
    pub fn into_trees(self) -> Vec<Tree> {
        self.trees
    }

    /// Returns the number of trees.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Returns `true` if the forest holds no trees.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Returns `true` if any tree is a trunk-only record.
    pub fn has_trunk_only(&self) -> bool {
        self.trees.iter().any(Tree::is_trunk_only)
    }

    /// Returns the attribute names of the first tree (shared by all trees),
    /// or an empty slice for an empty forest.
    pub fn attribute_names(&self) -> &[String] {
        self.trees
            .first()
            .map(Tree::attribute_names)
            .unwrap_or(&[])
    }
}

impl FromIterator<Tree> for Forest {
    fn from_iter<I: IntoIterator<Item = Tree>>(iter: I) -> Self {
        Forest {
            trees: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Forest {
    type Item = Tree;
    type IntoIter = std::vec::IntoIter<Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_iter()
    }
}
