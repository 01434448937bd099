//! Parent/child walks over items fetched from the remote service.
//!
//! Parent links come from foreign data and are not guaranteed to be
//! acyclic or even to point at an existing item, so both walks keep a
//! visited set and stop instead of recursing forever.

use std::collections::HashSet;

use crate::Item;

/// The parent chain of `item`, nearest ancestor first.
///
/// Stops at the first dangling `parent_id` and at the first id that was
/// already visited (including `item` itself).
pub fn all_ancestors<'a>(items: &'a [Item], item: &Item) -> Vec<&'a Item> {
    let mut ancestors = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(item.id.as_str());

    let mut next = item.parent_id.as_deref();
    while let Some(parent_id) = next {
        if !visited.insert(parent_id) {
            break;
        }
        let Some(parent) = items.iter().find(|i| i.id == parent_id) else {
            break;
        };
        ancestors.push(parent);
        next = parent.parent_id.as_deref();
    }
    ancestors
}

/// `item` followed by every item below it in the same project, expanded
/// one generation per pass until a pass adds nothing.
pub fn all_descendants<'a>(items: &'a [Item], item: &'a Item) -> Vec<&'a Item> {
    let siblings: Vec<&Item> = items
        .iter()
        .filter(|i| i.project_id == item.project_id)
        .collect();

    let mut collected = vec![item];
    let mut seen: HashSet<&str> = HashSet::from([item.id.as_str()]);
    let mut frontier: HashSet<&str> = HashSet::from([item.id.as_str()]);

    while !frontier.is_empty() {
        let mut next = HashSet::new();
        for candidate in &siblings {
            let Some(parent_id) = candidate.parent_id.as_deref() else {
                continue;
            };
            if frontier.contains(parent_id) && seen.insert(candidate.id.as_str()) {
                collected.push(*candidate);
                next.insert(candidate.id.as_str());
            }
        }
        frontier = next;
    }
    collected
}
