use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use simplex_tree::prelude::*;

/// Random geometric graph on the unit square: edge when the points are closer
/// than `radius`, valued by their distance.
fn random_geometric_graph(n: i32, radius: f64, seed: u64) -> Vec<(i32, i32, f64)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let pts: Vec<(f64, f64)> = (0..n).map(|_| (rng.r#gen(), rng.r#gen())).collect();
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            let (a, b) = (pts[u as usize], pts[v as usize]);
            let d = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
            if d < radius {
                edges.push((u, v, d));
            }
        }
    }
    edges
}

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("flag_expansion");

    for &n in &[200i32, 400i32] {
        let edges = random_geometric_graph(n, 0.15, 11);

        group.bench_with_input(BenchmarkId::new("batch", n), &n, |b, &n| {
            b.iter(|| {
                let mut st = SimplexTree::<FastPersistence>::new();
                st.insert_graph((0..n).map(|v| (v, 0.0)), edges.iter().copied())
                    .unwrap();
                st.expansion(3).unwrap();
                black_box(st.num_simplices());
            });
        });

        let mut sorted = edges.clone();
        sorted.sort_by(|a, b| a.2.total_cmp(&b.2));
        group.bench_with_input(BenchmarkId::new("edge_by_edge", n), &n, |b, _| {
            b.iter(|| {
                let mut st = SimplexTree::<ZigzagPersistence>::new();
                for &(u, v, f) in &sorted {
                    black_box(st.flag_add_edge(u, v, f, 3).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("filtration_order", n), &n, |b, &n| {
            let mut st = SimplexTree::<FastPersistence>::new();
            st.insert_graph((0..n).map(|v| (v, 0.0)), edges.iter().copied())
                .unwrap();
            st.expansion(3).unwrap();
            b.iter(|| {
                st.initialize_filtration();
                black_box(st.filtration_simplex_range().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_expansion);
criterion_main!(benches);
