mod util;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use simplex_tree::prelude::*;
use std::collections::BTreeMap;

fn random_stream(seed: u64, len: usize) -> Vec<ZigzagEdge<i32>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut live: Vec<(i32, i32)> = Vec::new();
    let mut out = Vec::with_capacity(len);
    for t in 0..len {
        let time = t as f64;
        if !live.is_empty() && rng.gen_bool(0.3) {
            let (u, v) = live.swap_remove(rng.gen_range(0..live.len()));
            out.push(ZigzagEdge::remove(u, v, time));
        } else {
            let u = rng.gen_range(0..7);
            let v = rng.gen_range(0..7);
            if u != v && !live.contains(&(u.min(v), u.max(v))) {
                live.push((u.min(v), u.max(v)));
            }
            out.push(ZigzagEdge::insert(u, v, time));
        }
    }
    out
}

#[test]
fn replaying_records_rebuilds_the_complex() {
    let stream = random_stream(42, 200);
    let mut zz = FlagZigzagFiltration::<ZigzagPersistence, _>::new(stream, 3);
    let mut alive: BTreeMap<i64, Vec<i32>> = BTreeMap::new();
    for step in zz.by_ref() {
        let step = step.unwrap();
        match step.direction {
            Direction::Insertion => {
                // faces are alive before their cofaces come in
                if step.dimension() > 0 {
                    let n = step.vertices.len();
                    let faces_alive = (0..n).all(|skip| {
                        let face: Vec<i32> = step
                            .vertices
                            .iter()
                            .enumerate()
                            .filter(|&(i, _)| i != skip)
                            .map(|(_, &v)| v)
                            .collect();
                        alive.values().any(|s| *s == face)
                    });
                    assert!(faces_alive, "{:?} inserted before a face", step.vertices);
                }
                assert!(alive.insert(step.key, step.vertices).is_none());
            }
            Direction::Removal => {
                assert_eq!(alive.remove(&step.key), Some(step.vertices));
            }
        }
    }
    let mut replayed: Vec<Vec<i32>> = alive.into_values().collect();
    replayed.sort();
    assert_eq!(replayed, util::simplex_set(zz.tree()));
}

#[test]
fn keys_are_never_reused() {
    let stream = random_stream(3, 120);
    let steps: Vec<ZigzagSimplex<i32>> = FlagZigzagFiltration::<ZigzagPersistence, _>::new(stream, 2)
        .collect::<Result<_, _>>()
        .unwrap();
    let inserted: Vec<i64> = steps
        .iter()
        .filter(|s| s.direction == Direction::Insertion)
        .map(|s| s.key)
        .collect();
    assert!(inserted.windows(2).all(|w| w[0] + 1 == w[1]));
}

#[test]
fn stream_round_trips_through_json() {
    let stream = random_stream(9, 10);
    let json = serde_json::to_string(&stream).unwrap();
    let back: Vec<ZigzagEdge<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stream);
}
