//! Dense user indexing for recommender computations.
//!
//! Scoring and ranking code works best over contiguous integer ranges: arrays of
//! scores, rows of a user-item matrix, bitsets of seen users. This crate provides
//! the addressing layer that maps opaque user identifiers to dense indices
//! (`uidx`) in `0..num_users()` and back.
//!
//! # Overview
//!
//! 1. **Index mapping** - [`user_index`]
//!    - [`FastUserIndex`]: the mapping contract. Implementors supply the count
//!      and the two lookup primitives; membership, enumeration and pair
//!      transforms are derived from them.
//!    - [`NOT_FOUND`]: the `-1` sentinel returned for unregistered users.
//!
//! 2. **Paired values** - [`pair`]
//!    - [`IdValue`] / [`IdxValue`]: user or uidx with a generic payload.
//!    - [`IdScore`] / [`IdxScore`]: user or uidx with an unboxed `f64` score.
//!
//! 3. **Testing support** - [`testing`]
//!    - [`ListUserIndex`]: a small `Vec` + `HashMap` backed index.
//!    - [`UserIndexTester`]: assertions for the mapping contract.
//!
//! [`ListUserIndex`]: testing::ListUserIndex
//! [`UserIndexTester`]: testing::UserIndexTester
//!
//! # Examples
//!
//! ```
//! use rankidx_core::{FastUserIndex as _, IdScore, IdxScore, NOT_FOUND, testing::ListUserIndex};
//!
//! let index = ListUserIndex::new(["alice", "bob", "carol"])?;
//!
//! assert_eq!(index.uidx_of(&"bob"), 1);
//! assert_eq!(index.uidx_of(&"dave"), NOT_FOUND);
//! assert_eq!(*index.user_of(2), "carol");
//!
//! // Scores travel by uidx through the numeric pipeline.
//! let scored = index.to_uidx_score(IdScore::new("bob", 0.5));
//! assert_eq!(scored, IdxScore::new(1, 0.5));
//! # Ok::<(), rankidx_core::UserIndexError>(())
//! ```

pub mod pair;
pub mod testing;
pub mod user_index;

pub use self::{
    pair::{IdScore, IdValue, IdxScore, IdxValue},
    user_index::{AllUsers, FastUserIndex, NOT_FOUND, UserIndexError, uidx_bound},
};
