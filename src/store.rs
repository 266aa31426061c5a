//! In-memory reference data.
//!
//! Two shapes, two miss policies:
//!
//! - [`LookupTable`]: immutable key-to-string data seeded at startup. An
//!   absent key is a *soft miss*: [`LookupTable::get_or`] resolves it to a
//!   fallback chosen at the call site, never an error, never a side effect.
//! - [`TitleSet`]: the one mutable structure. Inserts are unique; each
//!   attempt reports exactly one of [`Insertion::Created`] or
//!   [`Insertion::Duplicate`]. A mutex guards the read-modify-write so the
//!   uniqueness invariant holds under concurrent requests.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

use crate::error::Error;

// ── LookupTable ───────────────────────────────────────────────────────────────

/// Immutable reference data: key to display string.
pub struct LookupTable<K> {
    entries: HashMap<K, String>,
}

impl<K: Eq + Hash> LookupTable<K> {
    pub fn new<V: Into<String>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&str>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key).map(String::as_str)
    }

    /// Soft-miss lookup: an absent key resolves to `fallback`.
    ///
    /// The fallback is chosen where the lookup happens, so every call site
    /// states what a miss means for it.
    pub fn get_or<'a, Q>(&'a self, key: &Q, fallback: &'a str) -> &'a str
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.get(key).unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── TitleSet ─────────────────────────────────────────────────────────────────

/// Outcome of one insertion attempt. Exactly one per attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Insertion {
    Created,
    Duplicate,
}

/// A mutex-guarded set of unique titles.
///
/// Iteration and snapshots are in the set's sorted order.
pub struct TitleSet {
    titles: Mutex<BTreeSet<String>>,
}

impl TitleSet {
    pub fn new<T: Into<String>>(seed: impl IntoIterator<Item = T>) -> Self {
        Self {
            titles: Mutex::new(seed.into_iter().map(Into::into).collect()),
        }
    }

    /// Inserts `title` if it is not already present.
    ///
    /// The lock spans the whole check-then-insert, so two concurrent inserts
    /// of the same title report one `Created` and one `Duplicate`.
    pub fn insert(&self, title: impl Into<String>) -> Insertion {
        let mut titles = self.lock();
        if titles.insert(title.into()) {
            Insertion::Created
        } else {
            Insertion::Duplicate
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.lock().contains(title)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The current contents, sorted.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// The current contents as a JSON array.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        // A poisoned lock means a panic mid-insert; the set itself is still
        // coherent (BTreeSet::insert is all-or-nothing), so keep serving.
        self.titles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts() -> LookupTable<i64> {
        LookupTable::new([
            (1, "I like mayo!"),
            (2, "I hate double rainbow"),
            (3, "YOLO"),
        ])
    }

    fn movies() -> TitleSet {
        TitleSet::new(["Amadeus", "Chicken Run", "Dances With Wolves"])
    }

    #[test]
    fn lookup_hits() {
        assert_eq!(posts().get_or(&3, "Post not found"), "YOLO");
        assert_eq!(posts().get(&1), Some("I like mayo!"));
    }

    #[test]
    fn soft_miss_resolves_to_the_call_site_fallback() {
        let posts = posts();
        assert_eq!(posts.get_or(&99, "Post not found"), "Post not found");
        assert_eq!(posts.get(&99), None);
    }

    #[test]
    fn soft_miss_is_idempotent_and_side_effect_free() {
        let posts = posts();
        let first = posts.get_or(&99, "Post not found").to_owned();
        let second = posts.get_or(&99, "Post not found").to_owned();
        assert_eq!(first, second);
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn duplicate_insert_reports_duplicate_and_leaves_the_set_unchanged() {
        let movies = movies();
        assert_eq!(movies.insert("Amadeus"), Insertion::Duplicate);
        assert_eq!(movies.len(), 3);
    }

    #[test]
    fn new_insert_reports_created_and_grows_the_set() {
        let movies = movies();
        assert_eq!(movies.insert("Alien"), Insertion::Created);
        assert_eq!(movies.len(), 4);
        assert!(movies.contains("Alien"));
    }

    #[test]
    fn snapshot_is_sorted() {
        let movies = movies();
        movies.insert("Alien");
        assert_eq!(
            movies.snapshot(),
            ["Alien", "Amadeus", "Chicken Run", "Dances With Wolves"]
        );
    }

    #[test]
    fn json_export_is_an_array() {
        let json = movies().to_json().expect("serializes");
        let parsed: Vec<String> = serde_json::from_str(&json).expect("array of strings");
        assert_eq!(parsed.len(), 3);
        assert!(parsed.contains(&"Amadeus".to_owned()));
    }

    #[test]
    fn concurrent_inserts_preserve_uniqueness() {
        use std::sync::Arc;

        let movies = Arc::new(movies());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let movies = Arc::clone(&movies);
                std::thread::spawn(move || movies.insert("Alien"))
            })
            .collect();

        let outcomes: Vec<Insertion> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();

        let created = outcomes.iter().filter(|o| **o == Insertion::Created).count();
        assert_eq!(created, 1, "exactly one insert wins");
        assert_eq!(movies.len(), 4);
    }
}
