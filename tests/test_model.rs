use nalgebra::Point3;
use treetools::TreeError;
use treetools::model::{Forest, Segment, Tree, TreeBuilder};

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

/// Root, trunk segment splitting into three, one of which continues.
fn branching_tree() -> Tree {
    let mut builder = TreeBuilder::new(Vec::new());
    let root = builder.add_root(p(0.0, 0.0, 0.0), 0.2, Vec::new()).unwrap();
    let trunk = builder.add_segment(p(0.0, 0.0, 1.0), 0.15, root, Vec::new()).unwrap();
    let left = builder.add_segment(p(-1.0, 0.0, 2.0), 0.05, trunk, Vec::new()).unwrap();
    builder.add_segment(p(1.0, 0.0, 2.0), 0.05, trunk, Vec::new()).unwrap();
    builder.add_segment(p(0.0, 1.0, 2.0), 0.05, trunk, Vec::new()).unwrap();
    builder.add_segment(p(-2.0, 0.0, 3.0), 0.03, left, Vec::new()).unwrap();
    builder.finish().unwrap()
}

// --- TESTS TREE BUILDER ---
#[test]
fn test_building_tree() {
    let tree = branching_tree();

    assert_eq!(tree.num_segments(), 6);
    assert!(tree.is_valid());
    assert!(!tree.is_trunk_only());
    assert!(tree.root().unwrap().is_root());
    assert_eq!(tree[0].parent_id(), -1);
    assert_eq!(tree[5].parent, Some(2));
    assert_eq!(tree[1].diameter(), 0.3);
}

#[test]
fn test_builder_rejects_parent_not_preceding_child() {
    let mut builder = TreeBuilder::new(Vec::new());
    let root = builder.add_root(p(0.0, 0.0, 0.0), 0.1, Vec::new()).unwrap();
    builder.add_segment(p(0.0, 0.0, 1.0), 0.1, root, Vec::new()).unwrap();

    let result = builder.add_segment(p(0.0, 0.0, 2.0), 0.1, 2, Vec::new());
    assert!(matches!(result, Err(TreeError::InvalidParent { index: 2, parent: 2 })));
    let result = builder.add_segment(p(0.0, 0.0, 2.0), 0.1, 7, Vec::new());
    assert!(matches!(result, Err(TreeError::InvalidParent { index: 2, parent: 7 })));
    assert_eq!(builder.num_segments(), 2);
}

#[test]
fn test_builder_root_handling() {
    let mut builder = TreeBuilder::new(Vec::new());
    assert!(matches!(
        builder.add_segment(p(0.0, 0.0, 1.0), 0.1, 0, Vec::new()),
        Err(TreeError::RootNotSet)
    ));

    builder.add_root(p(0.0, 0.0, 0.0), 0.1, Vec::new()).unwrap();
    assert!(matches!(
        builder.add_root(p(1.0, 0.0, 0.0), 0.1, Vec::new()),
        Err(TreeError::RootAlreadySet)
    ));

    assert!(matches!(TreeBuilder::new(Vec::new()).finish(), Err(TreeError::RootNotSet)));
}

#[test]
fn test_builder_validates_values() {
    let names = vec!["section".to_string()];
    let mut builder = TreeBuilder::new(names);
    assert!(matches!(
        builder.add_root(p(0.0, 0.0, 0.0), 0.1, Vec::new()),
        Err(TreeError::AttributeCount { index: 0, expected: 1, found: 0 })
    ));
    assert!(matches!(
        builder.add_root(p(0.0, 0.0, 0.0), -0.1, vec![1.0]),
        Err(TreeError::InvalidRadius { index: 0, .. })
    ));
    assert!(matches!(
        builder.add_root(p(0.0, 0.0, 0.0), f64::NAN, vec![1.0]),
        Err(TreeError::InvalidRadius { .. })
    ));
    builder.add_root(p(0.0, 0.0, 0.0), 0.0, vec![1.0]).unwrap();
}

#[test]
fn test_builder_rejects_duplicate_attribute_names() {
    let mut builder = TreeBuilder::new(vec!["a".to_string(), "a".to_string()]);
    builder.add_root(p(0.0, 0.0, 0.0), 0.1, vec![0.0, 0.0]).unwrap();
    assert!(matches!(builder.finish(), Err(TreeError::DuplicateAttribute(name)) if name == "a"));
}

// --- TESTS CHILDREN INDEX ---
#[test]
fn test_children_index_covers_every_segment_once() {
    let tree = branching_tree();
    let children = tree.children();
    assert_eq!(children.len(), tree.num_segments());

    let mut seen = vec![0; tree.num_segments()];
    seen[0] += 1;
    for index in 0..children.len() {
        for &child in children.children_of(index) {
            assert!(child > index);
            assert_eq!(tree[child].parent, Some(index));
            seen[child] += 1;
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
}

#[test]
fn test_children_index_queries() {
    let tree = branching_tree();
    let children = tree.children();

    assert_eq!(children.children_of(1), &[2, 3, 4]);
    assert_eq!(children.num_children(1), 3);
    assert!(children.is_branch_point(1));
    assert!(!children.is_branch_point(0));
    assert_eq!(children.single_child(0), Some(1));
    assert_eq!(children.single_child(2), Some(5));
    assert_eq!(children.single_child(1), None);
    assert_eq!(children.leaves().collect::<Vec<_>>(), vec![3, 4, 5]);
}

// --- TESTS ATTRIBUTES ---
#[test]
fn test_append_attributes() {
    let mut tree = branching_tree();
    let first = tree.append_attributes(&["a", "b"]).unwrap();
    assert_eq!(first, 0);
    assert_eq!(tree.attribute_names(), &["a".to_string(), "b".to_string()]);
    assert!(tree.segments().iter().all(|s| s.attributes == vec![0.0, 0.0]));

    tree[3].attributes[1] = 4.5;
    assert_eq!(tree.attribute(3, "b"), Some(4.5));
    assert_eq!(tree.attribute(3, "c"), None);

    let second = tree.append_attributes(&["c"]).unwrap();
    assert_eq!(second, 2);
    assert!(tree.is_valid());
}

#[test]
fn test_append_attributes_collision_leaves_tree_unchanged() {
    let mut tree = branching_tree();
    tree.append_attributes(&["volume"]).unwrap();
    let before = tree.clone();

    let result = tree.append_attributes(&["length", "volume"]);
    assert!(matches!(result, Err(TreeError::AttributeCollision(name)) if name == "volume"));
    assert_eq!(tree, before);

    let result = tree.append_attributes(&["x1", "x1"]);
    assert!(matches!(result, Err(TreeError::DuplicateAttribute(_))));
    assert_eq!(tree, before);
}

#[test]
fn test_push_child() {
    let mut tree = branching_tree();
    let index = tree
        .push_child(Segment::new(p(1.0, 0.0, 3.0), 0.02, None, Vec::new()), 3)
        .unwrap();
    assert_eq!(index, 6);
    assert_eq!(tree[6].parent, Some(3));
    assert!(matches!(
        tree.push_child(Segment::new(p(0.0, 0.0, 0.0), 0.02, None, Vec::new()), 7),
        Err(TreeError::InvalidParent { .. })
    ));
    assert!(matches!(
        tree.push_child(Segment::new(p(0.0, 0.0, 0.0), 0.02, None, vec![1.0]), 0),
        Err(TreeError::AttributeCount { .. })
    ));
}

// --- TESTS FOREST ---
#[test]
fn test_forest_collects_trees() {
    let forest: Forest = vec![branching_tree(), branching_tree()].into_iter().collect();
    assert_eq!(forest.num_trees(), 2);
    assert!(!forest.has_trunk_only());
    assert!(forest.attribute_names().is_empty());
    assert!(Forest::new().is_empty());
}
