use nalgebra::Point3;
use treetools::TreeError;
use treetools::growth::prune::{prune_tree_diameter, prune_tree_length};
use treetools::growth::{
    EmptyStage, GrowthConfig, GrowthOutcome, Pruner, extend_tips, prune_diameter, prune_length, simulate,
    simulate_with,
};
use treetools::model::{Forest, Tree, TreeBuilder};

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-10, "{actual} != {expected}");
}

fn assert_point_close(actual: Point3<f64>, expected: Point3<f64>) {
    assert!((actual - expected).norm() < 1e-10, "{actual} != {expected}");
}

/// Root at the origin with radius 0.1 and one leaf at (0,0,1) with radius 0.08.
fn two_segment_tree() -> Tree {
    let mut builder = TreeBuilder::new(Vec::new());
    let root = builder.add_root(p(0.0, 0.0, 0.0), 0.1, Vec::new()).unwrap();
    builder.add_segment(p(0.0, 0.0, 1.0), 0.08, root, Vec::new()).unwrap();
    builder.finish().unwrap()
}

/// Trunk forking into a long thick branch and a short thin one.
fn forked_tree() -> Tree {
    let mut builder = TreeBuilder::new(vec!["section".to_string()]);
    let root = builder.add_root(p(0.0, 0.0, 0.0), 0.2, vec![1.0]).unwrap();
    let trunk = builder.add_segment(p(0.0, 0.0, 2.0), 0.15, root, vec![2.0]).unwrap();
    let long = builder.add_segment(p(0.0, 0.0, 3.0), 0.1, trunk, vec![3.0]).unwrap();
    builder.add_segment(p(0.5, 0.0, 2.0), 0.0004, trunk, vec![4.0]).unwrap();
    builder.add_segment(p(0.0, 0.0, 4.0), 0.05, long, vec![5.0]).unwrap();
    builder.finish().unwrap()
}

fn single(outcome: GrowthOutcome) -> Tree {
    match outcome {
        GrowthOutcome::Grown(forest) => {
            assert_eq!(forest.num_trees(), 1);
            forest.into_trees().remove(0)
        }
        GrowthOutcome::Empty(stage) => panic!("forest empty after {stage}"),
    }
}

/// Records the thresholds it is called with and returns forests unchanged.
#[derive(Default)]
struct RecordingPruner {
    lengths: Vec<f64>,
    diameters: Vec<f64>,
}

impl Pruner for RecordingPruner {
    fn prune_length(&mut self, forest: Forest, length: f64) -> Forest {
        self.lengths.push(length);
        forest
    }

    fn prune_diameter(&mut self, forest: Forest, diameter: f64) -> Forest {
        self.diameters.push(diameter);
        forest
    }
}

// --- TESTS GROWTH ---
#[test]
fn test_growth_scenario() {
    let forest = Forest::from_trees(vec![two_segment_tree()]);
    let config = GrowthConfig::new(1.0).with_length_rate(0.3).with_width_rate(0.004);
    let tree = single(simulate(forest, &config).unwrap());

    assert_eq!(tree.num_segments(), 3);
    assert_close(tree[0].radius, 0.102);
    assert_close(tree[1].radius, 0.082);
    assert_point_close(tree[2].tip, p(0.0, 0.0, 1.3));
    assert_close(tree[2].radius, 0.08);
    assert_eq!(tree[2].parent, Some(1));
    assert_eq!(tree.children().single_child(1), Some(2));
}

#[test]
fn test_growth_extends_every_leaf_along_its_direction() {
    let mut tree = forked_tree();
    let added = extend_tips(&mut tree, 2.0, 0.0).unwrap();

    assert_eq!(added, 2);
    assert_eq!(tree.num_segments(), 7);
    // Leaves 3 and 4, in index order
    assert_eq!(tree[5].parent, Some(3));
    assert_point_close(tree[5].tip, p(2.5, 0.0, 2.0));
    assert_eq!(tree[5].attributes, vec![4.0]);
    assert_eq!(tree[6].parent, Some(4));
    assert_point_close(tree[6].tip, p(0.0, 0.0, 6.0));
    assert!(tree.is_valid());
}

#[test]
fn test_lone_root_grows_upward() {
    let mut builder = TreeBuilder::new(Vec::new());
    builder.add_root(p(1.0, 2.0, 3.0), 0.1, Vec::new()).unwrap();
    let mut tree = builder.finish().unwrap();

    extend_tips(&mut tree, 0.5, 0.0).unwrap();
    assert_eq!(tree.num_segments(), 2);
    assert_point_close(tree[1].tip, p(1.0, 2.0, 3.5));
}

#[test]
fn test_growth_rejects_trunk_only_forest() {
    let forest = treetools::io::read_forest_str("x,y,z,radius\n0,0,0,0.2\n").unwrap();
    assert!(matches!(simulate(forest, &GrowthConfig::new(1.0)), Err(TreeError::TrunkOnly)));
}

// --- TESTS SHRINKING ---
#[test]
fn test_shrink_scenario_thresholds() {
    let forest = Forest::from_trees(vec![two_segment_tree()]);
    let config = GrowthConfig::new(-1.0).with_length_rate(0.3).with_width_rate(0.004);
    let mut pruner = RecordingPruner::default();
    let tree = single(simulate_with(forest, &config, &mut pruner).unwrap());

    assert_eq!(pruner.lengths.len(), 1);
    assert_close(pruner.lengths[0], 0.3);
    assert_eq!(pruner.diameters, vec![0.001]);
    assert_close(tree[0].radius, 0.098);
    assert_close(tree[1].radius, 0.078);
    assert_eq!(tree.num_segments(), 2);
}

#[test]
fn test_shrink_scenario_with_pruning() {
    let forest = Forest::from_trees(vec![two_segment_tree()]);
    let tree = single(simulate(forest, &GrowthConfig::new(-1.0)).unwrap());

    assert_eq!(tree.num_segments(), 2);
    assert_point_close(tree[1].tip, p(0.0, 0.0, 0.7));
    assert_close(tree[1].radius, 0.078);
}

#[test]
fn test_zero_period_prunes_nothing() {
    let forest = Forest::from_trees(vec![forked_tree()]);
    let tree = single(simulate(forest, &GrowthConfig::new(0.0).with_min_branch_diameter(0.0)).unwrap());
    assert_eq!(tree, forked_tree());
}

#[test]
fn test_shrinking_everything_away() {
    let forest = Forest::from_trees(vec![two_segment_tree()]);
    let outcome = simulate(forest, &GrowthConfig::new(-1000.0)).unwrap();
    assert_eq!(outcome, GrowthOutcome::Empty(EmptyStage::Shrinking));
}

#[test]
fn test_pruning_everything_away() {
    let forest = Forest::from_trees(vec![two_segment_tree()]);
    let config = GrowthConfig::new(-1.0).with_length_rate(0.0001).with_width_rate(0.2);
    let outcome = simulate(forest, &config).unwrap();
    assert_eq!(outcome, GrowthOutcome::Empty(EmptyStage::Pruning));
    assert_eq!(EmptyStage::Pruning.to_string(), "pruning");
}

// --- TESTS PRUNING ---
#[test]
fn test_prune_length_shortens_and_removes_tips() {
    let tree = forked_tree();
    let pruned = prune_tree_length(&tree, 1.5).unwrap();

    // Short side branch (path 0.5 from trunk tip) disappears, the long
    // branch loses 1.5 from its tip: segment 3 drops, segment 2 shrinks.
    assert_eq!(pruned.num_segments(), 3);
    assert_point_close(pruned[2].tip, p(0.0, 0.0, 2.5));
    assert_eq!(pruned[2].parent, Some(1));
    assert_eq!(pruned[2].attributes, vec![3.0]);
    assert!(pruned.is_valid());
}

#[test]
fn test_prune_length_drops_short_trees() {
    let forest = Forest::from_trees(vec![two_segment_tree(), forked_tree()]);
    let pruned = prune_length(forest, 2.0);
    assert_eq!(pruned.num_trees(), 1);
    assert_eq!(pruned.trees()[0].attribute_names(), &["section".to_string()]);
    assert!(prune_length(Forest::new(), 1.0).is_empty());
}

#[test]
fn test_prune_diameter_removes_thin_subtrees() {
    let tree = forked_tree();
    let pruned = prune_tree_diameter(&tree, 0.25).unwrap();
    // Only root and trunk are at least 0.25 thick
    assert_eq!(pruned.num_segments(), 2);

    let pruned = prune_tree_diameter(&tree, 0.001).unwrap();
    assert_eq!(pruned.num_segments(), 4);
    assert_eq!(pruned[3].parent, Some(2));
    assert_eq!(pruned[3].attributes, vec![5.0]);

    assert!(prune_tree_diameter(&tree, 1.0).is_none());
    assert!(prune_diameter(Forest::from_trees(vec![tree]), 1.0).is_empty());
}
