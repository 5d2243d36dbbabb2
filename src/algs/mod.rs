//! Algorithms layered on top of the simplex tree.

pub mod zigzag;

pub use zigzag::{Direction, FlagZigzagFiltration, ZigzagEdge, ZigzagSimplex};
