//! Test utilities for user index implementations.
//!
//! This module provides [`ListUserIndex`], a simple in-memory index, and
//! [`UserIndexTester`], a harness that checks any [`FastUserIndex`] against the
//! mapping contract.
//!
//! # Example
//!
//! ```
//! # use rankidx_core::testing::{ListUserIndex, UserIndexTester};
//! let index = ListUserIndex::new(["alice", "bob", "carol"])?;
//!
//! UserIndexTester::new(&index)
//!     .assert_contract()
//!     .assert_uidx(&"bob", 1)
//!     .assert_absent(&"dave");
//! # Ok::<(), rankidx_core::UserIndexError>(())
//! ```

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt::Debug,
    hash::Hash,
};

use crate::{
    FastUserIndex, IdScore, IdValue, IdxScore, IdxValue, NOT_FOUND, UserIndexError, uidx_bound,
};

/// A user index backed by a `Vec` and a `HashMap`.
///
/// Users are assigned indices in the order they are given.
#[derive(Debug, Clone)]
pub struct ListUserIndex<U> {
    users: Vec<U>,
    uidx: HashMap<U, i32>,
}

impl<U> ListUserIndex<U>
where
    U: Eq + Hash + Clone,
{
    /// Creates an index over `users`, assigning uidx `0, 1, ...` in order.
    ///
    /// # Errors
    ///
    /// Returns [`UserIndexError::DuplicateUser`] if a user occurs twice, and
    /// [`UserIndexError::TooManyUsers`] if there are more users than a uidx can
    /// address.
    pub fn new<T>(users: T) -> Result<Self, UserIndexError>
    where
        T: IntoIterator<Item = U>,
    {
        let users = users.into_iter().collect::<Vec<_>>();
        let count = users.len();
        if i32::try_from(count).is_err() {
            return Err(UserIndexError::TooManyUsers { count });
        }

        let mut uidx = HashMap::with_capacity(count);
        for ((position, user), next) in users.iter().enumerate().zip(0..) {
            match uidx.entry(user.clone()) {
                Entry::Occupied(entry) => {
                    return Err(UserIndexError::DuplicateUser {
                        first: *entry.get(),
                        position,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(next);
                }
            }
        }

        log::debug!("indexed {count} users");
        Ok(Self { users, uidx })
    }

    fn push(&mut self, user: U) -> bool {
        let Entry::Vacant(entry) = self.uidx.entry(user) else {
            return false;
        };
        let next = uidx_bound(self.users.len() + 1) - 1;
        self.users.push(entry.key().clone());
        entry.insert(next);
        true
    }
}

impl<U> ListUserIndex<U> {
    /// Returns the users in uidx order.
    #[must_use]
    pub fn users(&self) -> &[U] {
        &self.users
    }
}

/// Collects users into an index, keeping the first occurrence of duplicates.
///
/// # Panics
///
/// Panics if more distinct users are collected than a uidx can address.
impl<U> FromIterator<U> for ListUserIndex<U>
where
    U: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = U>>(iter: T) -> Self {
        let mut index = Self {
            users: Vec::new(),
            uidx: HashMap::new(),
        };
        let mut skipped = 0_usize;
        for user in iter {
            if !index.push(user) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::trace!("skipped {skipped} duplicate users");
        }
        log::debug!("indexed {} users", index.users.len());
        index
    }
}

impl<U> FastUserIndex for ListUserIndex<U>
where
    U: Eq + Hash,
{
    type User = U;

    #[inline]
    fn num_users(&self) -> usize {
        self.users.len()
    }

    #[inline]
    fn uidx_of(&self, user: &U) -> i32 {
        self.uidx.get(user).copied().unwrap_or(NOT_FOUND)
    }

    #[inline]
    fn user_of(&self, uidx: i32) -> &U {
        match usize::try_from(uidx).ok().and_then(|i| self.users.get(i)) {
            Some(user) => user,
            None => panic!(
                "uidx {uidx} is out of range for {} users",
                self.users.len()
            ),
        }
    }
}

/// A test harness for verifying [`FastUserIndex`] implementations.
///
/// All methods return `self`, so checks can be chained.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct UserIndexTester<'a, I: ?Sized> {
    index: &'a I,
}

impl<'a, I> UserIndexTester<'a, I>
where
    I: FastUserIndex + ?Sized,
    I::User: Debug,
{
    /// Creates a tester for `index`.
    #[must_use]
    pub fn new(index: &'a I) -> Self {
        Self { index }
    }

    /// Runs every whole-index check.
    #[track_caller]
    pub fn assert_contract(self) -> Self {
        self.assert_enumeration()
            .assert_bijection()
            .assert_pair_fidelity()
            .assert_score_fidelity()
    }

    /// Asserts that `user` is registered at `expected`.
    #[track_caller]
    pub fn assert_uidx(self, user: &I::User, expected: i32) -> Self {
        let actual = self.index.uidx_of(user);
        assert_eq!(actual, expected, "unexpected uidx for {user:?}");
        assert!(self.index.contains_user(user), "{user:?} is not contained");
        assert_eq!(self.index.user_of(expected), user);
        self
    }

    /// Asserts that `user` is not registered.
    #[track_caller]
    pub fn assert_absent(self, user: &I::User) -> Self {
        assert_eq!(
            self.index.uidx_of(user),
            NOT_FOUND,
            "{user:?} should not be registered"
        );
        assert!(!self.index.contains_user(user), "{user:?} is contained");
        assert_eq!(self.index.try_uidx(user), None);
        self
    }

    /// Asserts that both directions of the mapping invert each other.
    #[track_caller]
    pub fn assert_bijection(self) -> Self {
        for uidx in self.index.all_uidx() {
            let user = self.index.user_of(uidx);
            assert_eq!(
                self.index.uidx_of(user),
                uidx,
                "{user:?} at uidx {uidx} does not map back"
            );
            assert!(self.index.contains_user(user));
            assert_eq!(self.index.user_of(self.index.uidx_of(user)), user);
        }
        self
    }

    /// Asserts that enumeration covers `0..num_users()` in order, and that a
    /// second enumeration repeats the first.
    #[track_caller]
    pub fn assert_enumeration(self) -> Self {
        let num_users = self.index.num_users();

        let uidx = self.index.all_uidx().collect::<Vec<_>>();
        assert_eq!(uidx.len(), num_users, "all_uidx yields a wrong count");
        for (expected, actual) in (0..).zip(&uidx) {
            assert_eq!(*actual, expected, "all_uidx is not 0..num_users");
        }

        let users = self.index.all_users();
        assert_eq!(users.len(), num_users, "all_users reports a wrong length");
        let users = users.collect::<Vec<_>>();
        assert_eq!(users.len(), num_users, "all_users yields a wrong count");
        for (&uidx, user) in uidx.iter().zip(&users) {
            assert_eq!(*user, self.index.user_of(uidx), "all_users[{uidx}]");
        }

        assert_eq!(self.index.all_uidx().collect::<Vec<_>>(), uidx);
        assert_eq!(self.index.all_users().collect::<Vec<_>>(), users);
        self
    }

    /// Asserts that the generic pair transforms swap only the identifier.
    #[track_caller]
    pub fn assert_pair_fidelity(self) -> Self {
        for uidx in self.index.all_uidx() {
            let user = self.index.user_of(uidx);
            let value = format!("value-{uidx}");
            let addr = value.as_ptr();

            let by_uidx = self.index.to_uidx_pair(IdValue::new(user, value));
            assert_eq!(by_uidx.idx, uidx);
            assert_eq!(by_uidx.value.as_ptr(), addr, "value was not moved through");

            let by_user = self.index.to_user_pair(by_uidx);
            assert_eq!(by_user.id, user);
            assert_eq!(by_user.value.as_ptr(), addr, "value was not moved through");

            assert_eq!(
                self.index.to_uidx_pair(IdValue::new(user, uidx)),
                IdxValue::new(uidx, uidx)
            );
        }
        self
    }

    /// Asserts that the score pair transforms swap only the identifier and keep
    /// the score bit for bit.
    #[track_caller]
    pub fn assert_score_fidelity(self) -> Self {
        for (uidx, score) in self.index.all_uidx().zip(scores()) {
            let user = self.index.user_of(uidx);

            let by_uidx: IdxScore = self.index.to_uidx_score(IdScore::new(user, score));
            assert_eq!(by_uidx.idx, uidx);
            assert_eq!(by_uidx.score.to_bits(), score.to_bits());

            let by_user = self.index.to_user_score(by_uidx);
            assert_eq!(by_user.id, user);
            assert_eq!(by_user.score.to_bits(), score.to_bits());
        }
        self
    }
}

/// Scores covering awkward floating-point values, repeated forever.
fn scores() -> impl Iterator<Item = f64> {
    [0.5, -0.0, f64::NAN, f64::INFINITY, f64::MIN_POSITIVE, 1e300]
        .into_iter()
        .cycle()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_assigns_in_order() {
        let index = ListUserIndex::new(["alice", "bob", "carol"]).unwrap();
        assert_eq!(index.users(), ["alice", "bob", "carol"]);
        UserIndexTester::new(&index)
            .assert_uidx(&"alice", 0)
            .assert_uidx(&"bob", 1)
            .assert_uidx(&"carol", 2)
            .assert_absent(&"dave");
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = ListUserIndex::new(["alice", "bob", "alice"]).unwrap_err();
        assert_eq!(
            err,
            UserIndexError::DuplicateUser {
                first: 0,
                position: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "user at position 2 is already registered as uidx 0"
        );
    }

    #[test]
    fn test_collect_keeps_first_occurrence() {
        let index = ["b", "a", "b", "c", "a"]
            .into_iter()
            .collect::<ListUserIndex<_>>();
        assert_eq!(index.users(), ["b", "a", "c"]);
        UserIndexTester::new(&index)
            .assert_contract()
            .assert_uidx(&"c", 2);
    }

    #[test]
    fn test_owned_identifiers() {
        let index = ListUserIndex::new(["x".to_owned(), "y".to_owned()]).unwrap();
        UserIndexTester::new(&index)
            .assert_contract()
            .assert_absent(&"z".to_owned());
        assert_eq!(
            index.to_uidx_score(IdScore::new("y".to_owned(), 1.0)),
            IdxScore::new(1, 1.0)
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let index = ListUserIndex::new(0..1000_u32).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    UserIndexTester::new(&index).assert_enumeration();
                });
            }
        });
    }

    #[test]
    #[should_panic(expected = "should not be registered")]
    fn test_tester_detects_present_user() {
        let index = ListUserIndex::new(["alice"]).unwrap();
        UserIndexTester::new(&index).assert_absent(&"alice");
    }

    proptest! {
        #[test]
        fn contract_holds_for_distinct_users(
            users in prop::collection::hash_set(any::<u16>(), 0..128)
        ) {
            let users = users.into_iter().collect::<Vec<_>>();
            let index = ListUserIndex::new(users.clone()).unwrap();
            prop_assert_eq!(index.num_users(), users.len());
            prop_assert_eq!(index.users(), users.as_slice());
            UserIndexTester::new(&index).assert_contract();
        }

        #[test]
        fn unregistered_users_map_to_sentinel(
            users in prop::collection::hash_set(0..1000_u32, 0..64),
            probe in 1000..2000_u32,
        ) {
            let index = users.into_iter().collect::<ListUserIndex<_>>();
            prop_assert_eq!(index.uidx_of(&probe), NOT_FOUND);
            prop_assert!(!index.contains_user(&probe));
            prop_assert_eq!(
                index.to_uidx_pair(IdValue::new(probe, ())),
                IdxValue::new(NOT_FOUND, ())
            );
        }

        #[test]
        fn collect_matches_first_occurrences(
            users in prop::collection::vec(0..32_u8, 0..64)
        ) {
            let index = users.iter().copied().collect::<ListUserIndex<_>>();
            let mut expected = Vec::new();
            for user in &users {
                if !expected.contains(user) {
                    expected.push(*user);
                }
            }
            prop_assert_eq!(index.users(), expected.as_slice());
            prop_assert_eq!(ListUserIndex::new(users.clone()).is_ok(), expected.len() == users.len());
            UserIndexTester::new(&index).assert_contract();
        }
    }
}
