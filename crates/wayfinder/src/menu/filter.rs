//! Menu visibility filtering.
//!
//! Items are pruned in two phases per level: first the item's children are
//! filtered (and dropped entirely if none survive), then the capability
//! check decides whether the child-pruned item itself is shown.

use tracing::debug;

use super::types::MenuItem;
use crate::authority::AccessCheck;

/// Filter a menu tree down to the items the current principal may see.
///
/// Order is preserved. Items without a label or marked `hide_in_menu` are
/// dropped before the capability check is consulted.
pub fn filter_visible<A>(items: &[MenuItem], access: &A) -> Vec<MenuItem>
where
    A: AccessCheck + ?Sized,
{
    items
        .iter()
        .filter(|item| !item.name.is_empty() && !item.hide_in_menu)
        .filter_map(|item| {
            let candidate = with_visible_children(item, access);
            let authority = candidate.authority.clone();
            let shown = access.check(authority.as_ref(), candidate).into_allowed();
            if shown.is_none() {
                debug!(path = %item.path, "menu item denied");
            }
            shown
        })
        .collect()
}

/// Copy `item`, attaching its filtered children only when some survive.
fn with_visible_children<A>(item: &MenuItem, access: &A) -> MenuItem
where
    A: AccessCheck + ?Sized,
{
    let mut candidate = item.without_children();

    if let Some(children) = &item.children
        && !item.hide_children_in_menu
        && children.iter().any(|child| !child.name.is_empty())
    {
        let visible = filter_visible(children, access);
        if !visible.is_empty() {
            candidate.children = Some(visible);
        }
    }

    candidate
}

/// Paths of every item in the tree, depth-first pre-order.
///
/// The navigation renderer uses these to find the selected entry.
pub fn flat_menu_keys(items: &[MenuItem]) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(items, &mut keys);
    keys
}

fn collect_keys(items: &[MenuItem], keys: &mut Vec<String>) {
    for item in items {
        keys.push(item.path.clone());
        collect_keys(item.children(), keys);
    }
}
