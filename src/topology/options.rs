//! Compile-time storage options for [`SimplexTree`](crate::topology::SimplexTree).
//!
//! Every optional per-node field is a *slot* type: a real storage variant and
//! a zero-sized variant whose setters are no-ops. An options type picks one
//! variant per slot, so a disabled field costs no memory and its checks fold
//! away at compile time.
//!
//! | option                              | slot / const                          |
//! |-------------------------------------|---------------------------------------|
//! | store_key                           | [`StoredKey`] / [`NoKey`]             |
//! | store_filtration                    | [`StoredFiltration`] / [`NoFiltration`] |
//! | store_annotation_vector             | [`StoredAnnotation`] / [`NoAnnotation`] |
//! | store_morse_pairing                 | [`StoredPairing`] / [`NoPairing`]     |
//! | link_simplices_through_max_vertex   | [`MaxVertexIndex`] / [`NoCofaceIndex`] |
//! | contiguous_vertices                 | `CONTIGUOUS_VERTICES`                 |
//! | simplex_handle_strong_validity      | `SIMPLEX_HANDLE_STRONG_VALIDITY`      |

use crate::topology::bounds::VertexLike;
use crate::topology::handle::SimplexHandle;
use std::fmt::Debug;

pub use crate::topology::simplex_tree::cofaces::{CofaceIndexSlot, MaxVertexIndex, NoCofaceIndex};

/// Key slot. The "no key" value is `-1`.
pub trait KeySlot: Copy + Debug + Default + Send + Sync + 'static {
    const STORED: bool;
    fn get(&self) -> i64;
    fn set(&mut self, key: i64);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StoredKey(i64);

impl Default for StoredKey {
    fn default() -> Self {
        StoredKey(-1)
    }
}

impl KeySlot for StoredKey {
    const STORED: bool = true;
    #[inline]
    fn get(&self) -> i64 {
        self.0
    }
    #[inline]
    fn set(&mut self, key: i64) {
        self.0 = key;
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoKey;

impl KeySlot for NoKey {
    const STORED: bool = false;
    #[inline]
    fn get(&self) -> i64 {
        -1
    }
    #[inline]
    fn set(&mut self, _key: i64) {}
}

/// Filtration slot. Without storage every simplex reads as `0.0`.
pub trait FiltrationSlot: Copy + Debug + Default + Send + Sync + 'static {
    const STORED: bool;
    fn new(value: f64) -> Self;
    fn get(&self) -> f64;
    fn set(&mut self, value: f64);
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StoredFiltration(f64);

impl FiltrationSlot for StoredFiltration {
    const STORED: bool = true;
    #[inline]
    fn new(value: f64) -> Self {
        StoredFiltration(value)
    }
    #[inline]
    fn get(&self) -> f64 {
        self.0
    }
    #[inline]
    fn set(&mut self, value: f64) {
        self.0 = value;
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoFiltration;

impl FiltrationSlot for NoFiltration {
    const STORED: bool = false;
    #[inline]
    fn new(_value: f64) -> Self {
        NoFiltration
    }
    #[inline]
    fn get(&self) -> f64 {
        0.0
    }
    #[inline]
    fn set(&mut self, _value: f64) {}
}

/// Per-simplex user annotation (e.g. a cohomology coefficient vector).
pub trait AnnotationSlot: Clone + Debug + Default + Send + Sync + 'static {
    type Value: Clone + Debug + Send + Sync + 'static;
    const STORED: bool;
    fn get(&self) -> Option<&Self::Value>;
    fn set(&mut self, value: Self::Value);
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoredAnnotation<T>(Option<T>);

impl<T> Default for StoredAnnotation<T> {
    fn default() -> Self {
        StoredAnnotation(None)
    }
}

impl<T: Clone + Debug + Send + Sync + 'static> AnnotationSlot for StoredAnnotation<T> {
    type Value = T;
    const STORED: bool = true;
    #[inline]
    fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
    #[inline]
    fn set(&mut self, value: T) {
        self.0 = Some(value);
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoAnnotation;

impl AnnotationSlot for NoAnnotation {
    type Value = ();
    const STORED: bool = false;
    #[inline]
    fn get(&self) -> Option<&()> {
        None
    }
    #[inline]
    fn set(&mut self, _value: ()) {}
}

/// Discrete Morse pairing. A critical simplex is paired with itself.
pub trait PairingSlot<V>: Copy + Debug + Default + Send + Sync + 'static {
    const STORED: bool;
    fn get(&self) -> Option<SimplexHandle<V>>;
    fn set(&mut self, partner: Option<SimplexHandle<V>>);
}

#[derive(Copy, Clone, Debug)]
pub struct StoredPairing<V>(Option<SimplexHandle<V>>);

impl<V> Default for StoredPairing<V> {
    fn default() -> Self {
        StoredPairing(None)
    }
}

impl<V: VertexLike> PairingSlot<V> for StoredPairing<V> {
    const STORED: bool = true;
    #[inline]
    fn get(&self) -> Option<SimplexHandle<V>> {
        self.0
    }
    #[inline]
    fn set(&mut self, partner: Option<SimplexHandle<V>>) {
        self.0 = partner;
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoPairing;

impl<V: VertexLike> PairingSlot<V> for NoPairing {
    const STORED: bool = false;
    #[inline]
    fn get(&self) -> Option<SimplexHandle<V>> {
        None
    }
    #[inline]
    fn set(&mut self, _partner: Option<SimplexHandle<V>>) {}
}

/// Storage configuration of a simplex tree.
pub trait SimplexTreeOptions: Copy + Debug + Default + Send + Sync + 'static {
    type Vertex: VertexLike;
    type Key: KeySlot;
    type Filtration: FiltrationSlot;
    type Annotation: AnnotationSlot;
    type Pairing: PairingSlot<Self::Vertex>;
    type Cofaces: CofaceIndexSlot<Self::Vertex>;
    /// Vertices are `0..n`; the root lookup becomes a direct index.
    const CONTIGUOUS_VERTICES: bool = false;
    /// Check the slot generation of every handle on access.
    const SIMPLEX_HANDLE_STRONG_VALIDITY: bool = false;
}

/// Keys and filtrations, no coface index. The default.
#[derive(Copy, Clone, Debug, Default)]
pub struct FullFeatured;

impl SimplexTreeOptions for FullFeatured {
    type Vertex = i32;
    type Key = StoredKey;
    type Filtration = StoredFiltration;
    type Annotation = NoAnnotation;
    type Pairing = NoPairing;
    type Cofaces = NoCofaceIndex;
}

/// Vertices labelled `0..n` with direct root lookup.
#[derive(Copy, Clone, Debug, Default)]
pub struct FastPersistence;

impl SimplexTreeOptions for FastPersistence {
    type Vertex = i32;
    type Key = StoredKey;
    type Filtration = StoredFiltration;
    type Annotation = NoAnnotation;
    type Pairing = NoPairing;
    type Cofaces = NoCofaceIndex;
    const CONTIGUOUS_VERTICES: bool = true;
}

/// Coface index by maximal vertex, needed for dynamic flag maintenance.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZigzagPersistence;

impl SimplexTreeOptions for ZigzagPersistence {
    type Vertex = i32;
    type Key = StoredKey;
    type Filtration = StoredFiltration;
    type Annotation = NoAnnotation;
    type Pairing = NoPairing;
    type Cofaces = MaxVertexIndex<i32>;
    const SIMPLEX_HANDLE_STRONG_VALIDITY: bool = true;
}

/// Coface index, Morse pairing and a coefficient vector per simplex.
#[derive(Copy, Clone, Debug, Default)]
pub struct MorsePersistence;

impl SimplexTreeOptions for MorsePersistence {
    type Vertex = i64;
    type Key = StoredKey;
    type Filtration = StoredFiltration;
    type Annotation = StoredAnnotation<Vec<f64>>;
    type Pairing = StoredPairing<i64>;
    type Cofaces = MaxVertexIndex<i64>;
    const SIMPLEX_HANDLE_STRONG_VALIDITY: bool = true;
}

/// Bare combinatorial complex: no keys, no filtration values.
#[derive(Copy, Clone, Debug, Default)]
pub struct Minimal;

impl SimplexTreeOptions for Minimal {
    type Vertex = i32;
    type Key = NoKey;
    type Filtration = NoFiltration;
    type Annotation = NoAnnotation;
    type Pairing = NoPairing;
    type Cofaces = NoCofaceIndex;
}
