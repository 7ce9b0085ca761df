#[cfg(test)]
#[path = "../../tests/unit/utils/collections_test.rs"]
mod collections_test;

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Combines error results.
pub fn combine_error_results<T: Clone>(results: &[Result<(), T>]) -> Result<(), Vec<T>> {
    let errors = results.iter().cloned().flat_map(|result| result.err().into_iter()).collect::<Vec<T>>();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Returns sorted unique duplicates or `None` if all items are unique.
pub fn get_duplicates<'a, T>(items: impl Iterator<Item = &'a T>) -> Option<Vec<T>>
where
    T: Clone + Eq + Hash + Ord + 'a,
{
    let mut ids = FxHashSet::default();
    let duplicates = items.filter(|id| !ids.insert(*id)).cloned().collect::<FxHashSet<_>>();

    if duplicates.is_empty() {
        None
    } else {
        let mut duplicates = duplicates.into_iter().collect::<Vec<_>>();
        duplicates.sort();
        Some(duplicates)
    }
}

/// Joins displayable items with a comma.
pub fn join_ids<T: ToString>(ids: &[T]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}
