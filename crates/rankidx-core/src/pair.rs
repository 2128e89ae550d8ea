//! Paired values crossing the user/uidx boundary.
//!
//! Scoring pipelines produce large numbers of `(user, value)` pairs. Each pair
//! shape comes in two flavors: a generic one carrying any payload `V`, and one
//! specialized to an `f64` score so numeric code never wraps the score in a
//! generic container.
//!
//! | identifier side | generic payload    | `f64` score    |
//! |-----------------|--------------------|----------------|
//! | user            | [`IdValue<U, V>`]  | [`IdScore<U>`] |
//! | uidx            | [`IdxValue<V>`]    | [`IdxScore`]   |
//!
//! All four convert from and into the matching 2-tuple.
//!
//! # Examples
//!
//! ```
//! use rankidx_core::{IdScore, IdxValue};
//!
//! let pair = IdxValue::from((3, "payload"));
//! assert_eq!(pair.idx, 3);
//!
//! let (user, score): (&str, f64) = IdScore::new("alice", 0.25).into();
//! assert_eq!((user, score), ("alice", 0.25));
//! ```

/// A user identifier paired with a generic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::From, derive_more::Into)]
pub struct IdValue<U, V> {
    /// The user identifier.
    pub id: U,
    /// The payload.
    pub value: V,
}

impl<U, V> IdValue<U, V> {
    /// Creates a new pair.
    #[must_use]
    #[inline]
    pub const fn new(id: U, value: V) -> Self {
        Self { id, value }
    }
}

/// A user index paired with a generic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::From, derive_more::Into)]
pub struct IdxValue<V> {
    /// The user index, or [`NOT_FOUND`](crate::NOT_FOUND).
    pub idx: i32,
    /// The payload.
    pub value: V,
}

impl<V> IdxValue<V> {
    /// Creates a new pair.
    #[must_use]
    #[inline]
    pub const fn new(idx: i32, value: V) -> Self {
        Self { idx, value }
    }
}

/// A user identifier paired with an `f64` score.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::From, derive_more::Into)]
pub struct IdScore<U> {
    /// The user identifier.
    pub id: U,
    /// The score.
    pub score: f64,
}

impl<U> IdScore<U> {
    /// Creates a new pair.
    #[must_use]
    #[inline]
    pub const fn new(id: U, score: f64) -> Self {
        Self { id, score }
    }
}

/// A user index paired with an `f64` score.
///
/// This is the shape ranking loops work with: two machine words, no
/// indirection.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::From, derive_more::Into)]
pub struct IdxScore {
    /// The user index, or [`NOT_FOUND`](crate::NOT_FOUND).
    pub idx: i32,
    /// The score.
    pub score: f64,
}

impl IdxScore {
    /// Creates a new pair.
    #[must_use]
    #[inline]
    pub const fn new(idx: i32, score: f64) -> Self {
        Self { idx, score }
    }
}
