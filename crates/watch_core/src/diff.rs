use std::collections::HashSet;

use crate::Link;

/// Candidates absent from `stored`, in candidate order (newest first on the source page).
///
/// Duplicates within `candidates` are kept.
pub fn new_items(candidates: &[Link], stored: &[Link]) -> Vec<Link> {
    let seen: HashSet<&str> = stored.iter().map(String::as_str).collect();
    candidates
        .iter()
        .filter(|link| !seen.contains(link.as_str()))
        .cloned()
        .collect()
}

/// Reorders new items oldest first, the order they are announced in.
pub fn delivery_order(mut new_items: Vec<Link>) -> Vec<Link> {
    new_items.reverse();
    new_items
}
