//! The user index contract.
//!
//! A [`FastUserIndex`] assigns every registered user a dense index (`uidx`) in
//! `0..num_users()`. The two directions of the mapping form a bijection:
//!
//! - `index.uidx_of(index.user_of(i)) == i` for every `i` in `0..num_users()`
//! - `index.user_of(index.uidx_of(u)) == u` for every registered `u`
//!
//! Looking up an unregistered user yields [`NOT_FOUND`] instead of an error, so
//! per-candidate lookups in ranking loops stay branch-cheap. Asking for the user
//! behind an index outside `0..num_users()` is a bug in the caller and panics;
//! [`FastUserIndex::try_user_of`] is the checked alternative.
//!
//! # Examples
//!
//! ```
//! use rankidx_core::{FastUserIndex, NOT_FOUND};
//!
//! // A tiny index that finds users by linear search.
//! struct Letters(Vec<char>);
//!
//! impl FastUserIndex for Letters {
//!     type User = char;
//!
//!     fn num_users(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn uidx_of(&self, user: &char) -> i32 {
//!         self.0
//!             .iter()
//!             .position(|c| c == user)
//!             .map_or(NOT_FOUND, |i| i32::try_from(i).unwrap())
//!     }
//!
//!     fn user_of(&self, uidx: i32) -> &char {
//!         &self.0[usize::try_from(uidx).unwrap()]
//!     }
//! }
//!
//! let index = Letters(vec!['x', 'y', 'z']);
//! assert!(index.contains_user(&'y'));
//! assert!(!index.contains_user(&'w'));
//! assert_eq!(index.all_uidx().collect::<Vec<_>>(), [0, 1, 2]);
//! assert_eq!(index.all_users().copied().collect::<String>(), "xyz");
//! ```

use std::{borrow::Borrow, iter::FusedIterator, ops::Range};

use crate::pair::{IdScore, IdValue, IdxScore, IdxValue};

/// The uidx returned for users that are not registered in the index.
pub const NOT_FOUND: i32 = -1;

/// Errors reported by checked index operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum UserIndexError {
    /// A uidx outside `0..num_users` was requested.
    #[display("uidx {uidx} is out of range for {num_users} users")]
    UidxOutOfRange {
        /// The requested index.
        uidx: i32,
        /// The number of registered users.
        num_users: usize,
    },
    /// The same user was registered twice.
    #[display("user at position {position} is already registered as uidx {first}")]
    DuplicateUser {
        /// The uidx assigned to the first occurrence.
        first: i32,
        /// Position of the repeated occurrence in the input.
        position: usize,
    },
    /// More users than a uidx can address.
    #[display("{count} users exceed the uidx range")]
    TooManyUsers {
        /// The number of users offered.
        count: usize,
    },
}

/// Converts a user count into the exclusive upper bound of the uidx range.
///
/// # Panics
///
/// Panics if `num_users` exceeds `i32::MAX`.
#[must_use]
#[inline]
pub fn uidx_bound(num_users: usize) -> i32 {
    match i32::try_from(num_users) {
        Ok(bound) => bound,
        Err(_) => panic!("{num_users} users exceed the uidx range"),
    }
}

/// A bidirectional mapping between users and dense indices.
///
/// Implementors provide the three primitives ([`num_users`], [`uidx_of`],
/// [`user_of`]). Everything else is provided in terms of them and should not be
/// overridden with independent logic: [`contains_user`] in particular must stay
/// equivalent to `uidx_of(user) >= 0`.
///
/// The index is read-only for the duration of any call, including the lifetime
/// of the iterators it returns, so an implementation over immutable storage can
/// be shared between threads without locking.
///
/// [`num_users`]: FastUserIndex::num_users
/// [`uidx_of`]: FastUserIndex::uidx_of
/// [`user_of`]: FastUserIndex::user_of
/// [`contains_user`]: FastUserIndex::contains_user
pub trait FastUserIndex {
    /// The user identifier type.
    type User: Eq;

    /// Returns the number of registered users.
    ///
    /// The result must not exceed `i32::MAX`.
    fn num_users(&self) -> usize;

    /// Returns the uidx assigned to `user`, or [`NOT_FOUND`] if it is not
    /// registered.
    fn uidx_of(&self, user: &Self::User) -> i32;

    /// Returns the user assigned to `uidx`.
    ///
    /// # Panics
    ///
    /// Panics if `uidx` is not in `0..num_users()`.
    fn user_of(&self, uidx: i32) -> &Self::User;

    /// Returns `true` if `user` is registered.
    #[inline]
    fn contains_user(&self, user: &Self::User) -> bool {
        self.uidx_of(user) >= 0
    }

    /// Returns the uidx of `user` as a slice offset, or `None` if it is not
    /// registered.
    #[inline]
    fn try_uidx(&self, user: &Self::User) -> Option<usize> {
        usize::try_from(self.uidx_of(user)).ok()
    }

    /// Returns the user assigned to `uidx`, or an error if `uidx` is out of
    /// range.
    ///
    /// # Errors
    ///
    /// Returns [`UserIndexError::UidxOutOfRange`] if `uidx` is not in
    /// `0..num_users()`.
    #[inline]
    fn try_user_of(&self, uidx: i32) -> Result<&Self::User, UserIndexError> {
        let num_users = self.num_users();
        if usize::try_from(uidx).is_ok_and(|i| i < num_users) {
            Ok(self.user_of(uidx))
        } else {
            Err(UserIndexError::UidxOutOfRange { uidx, num_users })
        }
    }

    /// Returns all indices, `0..num_users()`, in increasing order.
    ///
    /// # Panics
    ///
    /// Panics if `num_users()` exceeds `i32::MAX`.
    #[inline]
    fn all_uidx(&self) -> Range<i32> {
        0..uidx_bound(self.num_users())
    }

    /// Returns all users in uidx order.
    ///
    /// The `i`-th item is `user_of(i)`.
    ///
    /// # Panics
    ///
    /// Panics if `num_users()` exceeds `i32::MAX`.
    #[inline]
    fn all_users(&self) -> AllUsers<'_, Self> {
        AllUsers {
            index: self,
            uidx: self.all_uidx(),
        }
    }

    /// Replaces the user of `pair` with its uidx, leaving the value untouched.
    ///
    /// Unregistered users map to [`NOT_FOUND`].
    #[inline]
    fn to_uidx_pair<Q, V>(&self, pair: IdValue<Q, V>) -> IdxValue<V>
    where
        Q: Borrow<Self::User>,
    {
        IdxValue::new(self.uidx_of(pair.id.borrow()), pair.value)
    }

    /// Replaces the uidx of `pair` with its user, leaving the value untouched.
    ///
    /// # Panics
    ///
    /// Panics if `pair.idx` is not in `0..num_users()`.
    #[inline]
    fn to_user_pair<V>(&self, pair: IdxValue<V>) -> IdValue<&Self::User, V> {
        IdValue::new(self.user_of(pair.idx), pair.value)
    }

    /// Replaces the user of a scored pair with its uidx.
    ///
    /// Unregistered users map to [`NOT_FOUND`].
    #[inline]
    fn to_uidx_score<Q>(&self, pair: IdScore<Q>) -> IdxScore
    where
        Q: Borrow<Self::User>,
    {
        IdxScore::new(self.uidx_of(pair.id.borrow()), pair.score)
    }

    /// Replaces the uidx of a scored pair with its user.
    ///
    /// # Panics
    ///
    /// Panics if `pair.idx` is not in `0..num_users()`.
    #[inline]
    fn to_user_score(&self, pair: IdxScore) -> IdScore<&Self::User> {
        IdScore::new(self.user_of(pair.idx), pair.score)
    }
}

/// Iterator over the users of an index, in uidx order.
///
/// Created by [`FastUserIndex::all_users`]. Each iterator owns its cursor, so
/// any number of them can walk the same index at once.
#[derive(Debug)]
pub struct AllUsers<'a, I: ?Sized> {
    index: &'a I,
    uidx: Range<i32>,
}

impl<I: ?Sized> Clone for AllUsers<'_, I> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            uidx: self.uidx.clone(),
        }
    }
}

impl<'a, I> Iterator for AllUsers<'a, I>
where
    I: FastUserIndex + ?Sized,
{
    type Item = &'a I::User;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        self.uidx.next().map(|uidx| index.user_of(uidx))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.uidx.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let index = self.index;
        self.uidx.nth(n).map(|uidx| index.user_of(uidx))
    }
}

impl<I> DoubleEndedIterator for AllUsers<'_, I>
where
    I: FastUserIndex + ?Sized,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.index;
        self.uidx.next_back().map(|uidx| index.user_of(uidx))
    }
}

impl<I> ExactSizeIterator for AllUsers<'_, I> where I: FastUserIndex + ?Sized {}
impl<I> FusedIterator for AllUsers<'_, I> where I: FastUserIndex + ?Sized {}
