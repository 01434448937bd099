use crate::{Item, ItemFilter};

/// A renumbered item, to be pushed to the service in an `item_reorder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChange {
    pub id: String,
    pub item_order: i64,
}

/// Makes room for an insert at `order`: every item selected by `filter`
/// whose order is `>= order` moves up by one. Mutates `items` in place and
/// returns the changes in the order they were applied.
pub fn shift_orders(items: &mut [Item], filter: &ItemFilter, order: i64) -> Vec<OrderChange> {
    let mut changes = Vec::new();
    for item in items.iter_mut() {
        if filter.matches(item) && item.item_order >= order {
            item.item_order += 1;
            changes.push(OrderChange {
                id: item.id.clone(),
                item_order: item.item_order,
            });
        }
    }
    changes
}
