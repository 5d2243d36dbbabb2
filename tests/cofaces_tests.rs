mod util;

use proptest::prelude::*;
use simplex_tree::prelude::*;
use std::collections::BTreeSet;

fn vertex_lists<O: SimplexTreeOptions>(
    st: &SimplexTree<O>,
    hs: &[SimplexHandle<O::Vertex>],
) -> BTreeSet<Vec<O::Vertex>> {
    hs.iter()
        .map(|&h| st.simplex_vertex_range(h).unwrap().collect())
        .collect()
}

/// Cofaces by definition: every simplex containing `h`, filtered on
/// dimension.
fn cofaces_by_scan<O: SimplexTreeOptions>(
    st: &SimplexTree<O>,
    h: SimplexHandle<O::Vertex>,
    codim: u32,
) -> BTreeSet<Vec<O::Vertex>> {
    let mine: Vec<O::Vertex> = st.simplex_vertex_range(h).unwrap().collect();
    let d = st.dimension_of(h);
    util::simplex_set(st)
        .into_iter()
        .filter(|s| mine.iter().all(|v| s.contains(v)))
        .filter(|s| codim == 0 || s.len() as i32 - 1 == d + codim as i32)
        .collect()
}

proptest! {
    #[test]
    fn star_queries_agree(
        simplices in prop::collection::vec(prop::collection::vec(0i32..8, 1..5), 1..10),
        codim in 0u32..4,
    ) {
        let mut indexed = SimplexTree::<ZigzagPersistence>::new();
        let mut plain = SimplexTree::<FullFeatured>::new();
        for s in &simplices {
            indexed.insert_simplex_and_subfaces(s.iter().copied(), 0.0).unwrap();
            plain.insert_simplex_and_subfaces(s.iter().copied(), 0.0).unwrap();
        }
        for h in indexed.complex_simplex_range() {
            let expected = cofaces_by_scan(&indexed, h, codim);
            let fast = indexed.cofaces(h, codim).unwrap();
            prop_assert_eq!(fast.len(), expected.len());
            prop_assert_eq!(vertex_lists(&indexed, &fast), expected.clone());
            let vs: Vec<i32> = indexed.simplex_vertex_range(h).unwrap().collect();
            let hp = plain.find(vs);
            let slow = plain.cofaces(hp, codim).unwrap();
            prop_assert_eq!(vertex_lists(&plain, &slow), expected);
        }
    }
}

#[test]
fn coboundary_of_missing_vertex_is_an_error() {
    let st = SimplexTree::<ZigzagPersistence>::new();
    assert!(st.coboundary(st.find([3])).is_err());
}

#[test]
fn star_survives_removals() {
    let mut st = SimplexTree::<MorsePersistence>::new();
    st.insert_simplex_and_subfaces([0, 1, 2], 0.0).unwrap();
    st.insert_simplex_and_subfaces([1, 2, 3], 0.0).unwrap();
    let top = st.find([1, 2, 3]);
    st.remove_maximal_simplex(top).unwrap();
    let star = st.star(st.find([2, 3])).unwrap();
    assert_eq!(vertex_lists(&st, &star), BTreeSet::from([vec![3i64, 2]]));
    assert_eq!(st.coboundary(st.find([1, 2])).unwrap().len(), 1);
}
