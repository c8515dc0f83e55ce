//! # Reference Cycle Guard
//!
//! Tracks which reference expansions are in progress along the current
//! descent path, so that a `$ref` chain leading back to itself is reported
//! as [`CircularReference`] instead of recursing without bound.
//!
//! ## Semantics
//!
//! Detection is depth-first over the path being expanded, not over every
//! identifier ever seen. An identifier is inserted before its expansion runs
//! and removed as soon as that expansion returns, on success and on failure
//! alike. Two sibling references to the same target therefore both expand
//! (diamond reuse); only a reference that re-enters itself is rejected.
//!
//! A guard belongs to one top-level composition call. It is driven through
//! `&mut self`, so it cannot be shared between concurrent compositions.

use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::CircularReference;

/// In-progress reference set for one composition call.
#[derive(Debug, Clone)]
pub struct CycleGuard<I> {
    // Insertion order is the expansion path.
    in_progress: IndexSet<I>,
}

impl<I> Default for CycleGuard<I> {
    fn default() -> Self {
        Self {
            in_progress: IndexSet::new(),
        }
    }
}

impl<I> CycleGuard<I>
where
    I: Eq + Hash + Clone + Display,
{
    /// Create an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of expansions currently on the path.
    pub fn depth(&self) -> usize {
        self.in_progress.len()
    }

    /// True if `id` is being expanded somewhere on the current path.
    pub fn is_expanding(&self, id: &I) -> bool {
        self.in_progress.contains(id)
    }

    /// Identifiers on the current path, outermost first.
    pub fn path(&self) -> impl Iterator<Item = &I> {
        self.in_progress.iter()
    }

    /// Run `expansion` with `id` marked as in progress.
    ///
    /// The closure receives the guard back so nested references can be
    /// expanded through it. `id` is removed again before this returns,
    /// whatever the closure's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CircularReference`] (converted into `E`) without running
    /// `expansion` when `id` is already in progress. Errors from `expansion`
    /// are passed through unchanged.
    pub fn expand<T, E, F>(&mut self, id: I, expansion: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<CircularReference>,
    {
        if let Some(first) = self.in_progress.get_index_of(&id) {
            let chain = self
                .in_progress
                .iter()
                .skip(first)
                .chain(std::iter::once(&id))
                .map(ToString::to_string)
                .collect();
            return Err(CircularReference { chain }.into());
        }

        self.in_progress.insert(id.clone());
        let result = expansion(self);
        let popped = self.in_progress.pop();
        debug_assert!(popped.as_ref() == Some(&id), "guard path unbalanced");
        result
    }
}
