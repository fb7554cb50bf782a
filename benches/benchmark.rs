use criterion::{Criterion, criterion_group, criterion_main};
use nalgebra::Point3;
use std::hint::black_box;
use treetools::analysis::{InfoConfig, LengthMode, compute_info};
use treetools::growth::{GrowthConfig, simulate};
use treetools::io::{read_forest_str, write_forest};
use treetools::model::{Forest, Tree, TreeBuilder};

/// Binary tree of the given depth: each segment splits into two thinner
/// children leaning away from each other.
fn synthetic_tree(depth: u32, offset: f64) -> Tree {
    let mut builder = TreeBuilder::new(Vec::new());
    let root = builder
        .add_root(Point3::new(offset, 0.0, 0.0), 0.3, Vec::new())
        .unwrap();
    let mut frontier = vec![(root, Point3::new(offset, 0.0, 0.0), 0.3)];

    for level in 0..depth {
        let step = 1.0 / (level + 1) as f64;
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for (parent, tip, radius) in frontier {
            for side in [-1.0, 1.0] {
                let child_tip = tip + nalgebra::Vector3::new(side * step * 0.5, 0.0, step);
                let child_radius = radius * if side < 0.0 { 0.75 } else { 0.6 };
                let child = builder
                    .add_segment(child_tip, child_radius, parent, Vec::new())
                    .unwrap();
                next.push((child, child_tip, child_radius));
            }
        }
        frontier = next;
    }

    builder.finish().unwrap()
}

fn synthetic_forest(num_trees: usize, depth: u32) -> Forest {
    (0..num_trees)
        .map(|i| synthetic_tree(depth, 10.0 * i as f64))
        .collect()
}

fn info_pipeline(c: &mut Criterion) {
    let forest = synthetic_forest(20, 10);
    for (name, mode) in [("info_approximate", LengthMode::Approximate), ("info_exact", LengthMode::Exact)] {
        let config = InfoConfig::default().with_length_mode(mode);
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut forest = forest.clone();
                black_box(compute_info(&mut forest, &config).unwrap());
            });
        });
    }
}

fn growth(c: &mut Criterion) {
    let forest = synthetic_forest(20, 10);
    for (name, years) in [("grow", 2.0), ("shrink", -2.0)] {
        let config = GrowthConfig::new(years);
        c.bench_function(name, |b| {
            b.iter(|| black_box(simulate(forest.clone(), &config).unwrap()));
        });
    }
}

fn forest_io(c: &mut Criterion) {
    let mut text = Vec::new();
    write_forest(&mut text, &synthetic_forest(20, 10)).unwrap();
    let text = String::from_utf8(text).unwrap();

    c.bench_function("read_forest", |b| {
        b.iter(|| black_box(read_forest_str(&text).unwrap()));
    });
}

criterion_group!(regression, info_pipeline, growth);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = forest_io
}
criterion_main!(regression, reporting);
