use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng, XorShiftRng};
use rb_collections::red_black_tree::RedBlackTree;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 100;

fn keys() -> Vec<u32> {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.next_u32()).collect()
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench btreeset insert", move |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(*key);
            }
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let keys = keys();
    let set: BTreeSet<u32> = keys.iter().cloned().collect();
    c.bench_function("bench btreeset contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(set.contains(key));
            }
        })
    });
}

fn bench_red_black_tree_add(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench red_black_tree add", move |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::new();
            for key in &keys {
                tree.add(*key);
            }
        })
    });
}

fn bench_red_black_tree_contains(c: &mut Criterion) {
    let keys = keys();
    let tree: RedBlackTree<u32> = keys.iter().cloned().collect();
    c.bench_function("bench red_black_tree contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(tree.contains(key));
            }
        })
    });
}

fn bench_red_black_tree_remove(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench red_black_tree remove", move |b| {
        b.iter(|| {
            let mut tree: RedBlackTree<u32> = keys.iter().cloned().collect();
            for key in &keys {
                black_box(tree.remove(key));
            }
        })
    });
}

fn bench_red_black_tree_extract_min(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench red_black_tree extract_min", move |b| {
        b.iter(|| {
            let mut tree: RedBlackTree<u32> = keys.iter().cloned().collect();
            while let Some(key) = tree.extract_min() {
                black_box(key);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreeset_insert,
    bench_btreeset_contains,
    bench_red_black_tree_add,
    bench_red_black_tree_contains,
    bench_red_black_tree_remove,
    bench_red_black_tree_extract_min,
);
criterion_main!(benches);
