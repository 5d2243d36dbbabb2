#![allow(dead_code)]

use simplex_tree::prelude::*;

/// Every simplex as a decreasing vertex list, sorted.
pub fn simplex_set<O: SimplexTreeOptions>(st: &SimplexTree<O>) -> Vec<Vec<O::Vertex>> {
    let mut out: Vec<Vec<O::Vertex>> = st
        .complex_simplex_range()
        .map(|h| st.simplex_vertex_range(h).unwrap().collect())
        .collect();
    out.sort();
    out
}

/// Edges with `u < v`, no self-loops, first occurrence kept.
pub fn normalize_edges(raw: &[(i32, i32, f64)]) -> Vec<(i32, i32, f64)> {
    let mut seen = std::collections::HashSet::new();
    raw.iter()
        .filter(|(u, v, _)| u != v)
        .map(|&(u, v, f)| if v < u { (v, u, f) } else { (u, v, f) })
        .filter(|&(u, v, _)| seen.insert((u, v)))
        .collect()
}

/// `{0,...,n-1}` choose pairs, all at value `f`.
pub fn complete_graph(n: i32, f: f64) -> Vec<(i32, i32, f64)> {
    (0..n)
        .flat_map(|u| ((u + 1)..n).map(move |v| (u, v, f)))
        .collect()
}
