//! Bound aliases for vertex labels.
//!
//! `VertexLike` has a blanket impl, so any signed primitive integer is a
//! vertex label. The value `-1` is reserved as the null vertex.

use num_traits::{PrimInt, Signed};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Canonical bound set for vertex labels.
///
/// - `PrimInt` for a total order, `Copy` and conversions to `usize`
/// - `Signed` so that `-1` can serve as the null vertex
/// - `Hash` for the coface index
/// - `Debug + Display` for diagnostics and text output
pub trait VertexLike:
    PrimInt + Signed + Hash + Debug + Display + Send + Sync + 'static
{
    /// The reserved null vertex, `-1`.
    #[inline]
    fn null_vertex() -> Self {
        -Self::one()
    }

    #[inline]
    fn is_null_vertex(self) -> bool {
        self == Self::null_vertex()
    }
}

impl<T> VertexLike for T where T: PrimInt + Signed + Hash + Debug + Display + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_vertex_is_minus_one() {
        assert_eq!(<i32 as VertexLike>::null_vertex(), -1);
        assert_eq!(<i64 as VertexLike>::null_vertex(), -1);
        assert!((-1i16).is_null_vertex());
        assert!(!0i16.is_null_vertex());
    }
}
