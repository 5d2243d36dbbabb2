mod util;

use simplex_tree::prelude::*;
use util::{complete_graph, simplex_set};

#[test]
fn triangle_graph_expands_to_one_triangle() {
    let mut st = SimplexTree::<FullFeatured>::new();
    st.insert_graph(std::iter::empty(), complete_graph(3, 1.0)).unwrap();
    st.expansion(2).unwrap();
    let tri = st.find([0, 1, 2]);
    assert!(!tri.is_null());
    assert_eq!(st.filtration(tri), 1.0);
    assert_eq!(st.skeleton_simplex_range(2).filter(|&h| st.dimension_of(h) == 2).count(), 1);
}

#[test]
fn path_graph_has_no_triangle() {
    let mut st = SimplexTree::<FullFeatured>::new();
    st.insert_graph(std::iter::empty(), [(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
    st.expansion(2).unwrap();
    assert_eq!(st.num_simplices(), 5);
    assert_eq!(st.dimension(), 1);
}

#[test]
fn clique_counts_follow_binomials() {
    // K6 up to dimension 4: C(6,1) + C(6,2) + ... + C(6,5)
    let mut st = SimplexTree::<FastPersistence>::new();
    st.insert_graph((0..6).map(|v| (v, 0.0)), complete_graph(6, 0.5)).unwrap();
    st.expansion(4).unwrap();
    assert_eq!(st.num_simplices(), 6 + 15 + 20 + 15 + 6);
    assert_eq!(st.dimension(), 4);
    st.validate_invariants().unwrap();
}

#[test]
fn inserted_simplices_are_face_closed() {
    let mut st = SimplexTree::<FullFeatured>::new();
    st.insert_simplex_and_subfaces([4, 1, 7, 3], 2.0).unwrap();
    st.insert_simplex_and_subfaces([1, 2, 3], 1.0).unwrap();
    let set = simplex_set(&st);
    for simplex in &set {
        for skip in 0..simplex.len() {
            if simplex.len() == 1 {
                break;
            }
            let face: Vec<i32> = simplex
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &v)| v)
                .collect();
            assert!(!st.find(face.clone()).is_null(), "missing face {face:?}");
        }
    }
    assert_eq!(set.len(), 15 + 7 - 3);
}

#[test]
fn subfaces_are_filled_below_an_existing_simplex() {
    let mut st = SimplexTree::<FullFeatured>::new();
    st.insert_simplex([0, 1, 2], 1.0).unwrap();
    assert_eq!(st.filtration_simplex_range().len(), 3);
    assert!(st.find([1, 2]).is_null());

    let outcome = st.insert_simplex_and_subfaces([0, 1, 2], 1.0).unwrap();
    assert!(outcome.is_unchanged());
    for face in [vec![1], vec![2], vec![1, 2], vec![0, 2]] {
        assert!(!st.find(face.clone()).is_null(), "missing face {face:?}");
    }
    assert_eq!(st.num_simplices(), 7);
    // the cached order saw the new faces
    assert_eq!(st.filtration_simplex_range().len(), 7);
}

#[test]
fn boundary_has_d_plus_one_faces() {
    let mut st = SimplexTree::<FullFeatured>::new();
    st.insert_graph(std::iter::empty(), complete_graph(5, 1.0)).unwrap();
    st.expansion(4).unwrap();
    for h in st.complex_simplex_range() {
        let d = st.dimension_of(h);
        let faces: Vec<_> = st.boundary_simplex_range(h).unwrap().collect();
        if d == 0 {
            assert!(faces.is_empty());
            continue;
        }
        assert_eq!(faces.len() as i32, d + 1);
        let mine: Vec<i32> = st.simplex_vertex_range(h).unwrap().collect();
        for f in faces {
            assert_eq!(st.dimension_of(f), d - 1);
            let theirs: Vec<i32> = st.simplex_vertex_range(f).unwrap().collect();
            assert!(theirs.iter().all(|v| mine.contains(v)));
        }
    }
}

#[test]
fn find_round_trips_every_handle() {
    let mut st = SimplexTree::<FullFeatured>::new();
    st.insert_graph(std::iter::empty(), complete_graph(5, 1.0)).unwrap();
    st.expansion(3).unwrap();
    for h in st.complex_simplex_range() {
        let vs: Vec<i32> = st.simplex_vertex_range(h).unwrap().collect();
        assert_eq!(st.find(vs), h);
    }
}

#[test]
fn blocker_sees_every_candidate_once() {
    let mut st = SimplexTree::<FullFeatured>::new();
    st.insert_graph(std::iter::empty(), complete_graph(5, 1.0)).unwrap();
    let mut seen = Vec::new();
    st.expansion_with_blockers(3, |tree, h| {
        let vs: Vec<i32> = tree.simplex_vertex_range(h).unwrap().collect();
        seen.push(vs.clone());
        // forbid any simplex holding both 0 and 4
        if vs.contains(&0) && vs.contains(&4) {
            BlockerVerdict::Block
        } else {
            BlockerVerdict::Accept
        }
    })
    .unwrap();
    let calls = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), calls);
    assert!(st.find([0, 1, 4]).is_null());
    assert!(!st.find([0, 4]).is_null());
    assert!(!st.find([1, 2, 3, 4]).is_null());
    assert!(!st.find([0, 1, 2, 3]).is_null());
    assert!(st.find([0, 1, 2, 4]).is_null());
    st.validate_invariants().unwrap();
}
