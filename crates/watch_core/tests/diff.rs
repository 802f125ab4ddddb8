use pretty_assertions::assert_eq;
use watch_core::{delivery_order, new_items};

fn links(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn new_items_keep_candidate_order() {
    let stored = links(&["a", "b"]);
    let candidates = links(&["c", "a", "d", "b"]);
    let fresh = new_items(&candidates, &stored);
    assert_eq!(fresh, links(&["c", "d"]));
    assert_eq!(delivery_order(fresh), links(&["d", "c"]));
}

#[test]
fn everything_is_new_on_first_run() {
    let candidates = links(&["x", "y"]);
    assert_eq!(new_items(&candidates, &[]), candidates);
}

#[test]
fn nothing_is_new_when_listing_is_unchanged() {
    let stored = links(&["a", "b"]);
    assert!(new_items(&stored, &stored).is_empty());
}

#[test]
fn matching_is_exact() {
    let stored = links(&["https://mavanimes.co/a/"]);
    let candidates = links(&["https://mavanimes.co/a", "https://mavanimes.co/A/"]);
    assert_eq!(new_items(&candidates, &stored), candidates);
}

#[test]
fn repeated_new_candidate_is_reported_twice() {
    let candidates = links(&["n", "a", "n"]);
    assert_eq!(new_items(&candidates, &links(&["a"])), links(&["n", "n"]));
}
