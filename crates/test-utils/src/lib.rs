//! Wayfinder test utilities.
//!
//! Route tree fixtures and small helpers for inspecting formatted menus.

use serde_json::{Value as JsonValue, json};
use wayfinder::{MenuItem, RawMenuNode};

/// An admin console route tree, as a JSON document.
///
/// Contains a route without a name (the layout root's redirect), a hidden
/// route, a route with hidden children, authority-restricted sections, and
/// a `:param` detail route.
pub fn console_routes_json() -> JsonValue {
    json!([
        { "path": "/", "redirect": "/dashboard/analysis" },
        {
            "path": "/dashboard",
            "name": "dashboard",
            "icon": "dashboard",
            "routes": [
                { "path": "/dashboard/analysis", "name": "analysis", "component": "./Dashboard/Analysis" },
                { "path": "/dashboard/monitor", "name": "monitor", "authority": ["admin", "ops"] }
            ]
        },
        {
            "path": "/list",
            "name": "list",
            "icon": "table",
            "routes": [
                {
                    "path": "/list/search",
                    "name": "search",
                    "hideChildrenInMenu": true,
                    "routes": [
                        { "path": "/list/search/articles", "name": "articles" },
                        { "path": "/list/search/projects", "name": "projects" }
                    ]
                },
                { "path": "/list/:id", "name": "detail", "hideInMenu": true }
            ]
        },
        {
            "path": "/system",
            "name": "system",
            "authority": "admin",
            "routes": [
                { "path": "/system/users", "name": "users" },
                {
                    "path": "/system/roles",
                    "name": "roles",
                    "routes": [ { "path": "/system/roles/audit", "name": "audit" } ]
                }
            ]
        },
        {
            "path": "/account",
            "name": "account",
            "routes": [
                { "path": "/account/settings", "name": "settings", "authority": "user" }
            ]
        }
    ])
}

/// The admin console route tree, deserialized.
pub fn console_routes() -> serde_json::Result<Vec<RawMenuNode>> {
    serde_json::from_value(console_routes_json())
}

/// A single chain of `depth` nested routes: `/n0`, `/n0/n1`, ...
pub fn route_chain(depth: usize) -> Vec<RawMenuNode> {
    let mut paths = Vec::with_capacity(depth);
    let mut current = String::new();
    for level in 0..depth {
        current.push_str(&format!("/n{level}"));
        paths.push((format!("n{level}"), current.clone()));
    }

    paths
        .into_iter()
        .rev()
        .fold(Vec::new(), |children, (name, path)| {
            let node = RawMenuNode::new(name, path);
            let node = if children.is_empty() {
                node
            } else {
                node.routes(children)
            };
            vec![node]
        })
}

/// Total number of items in a menu tree.
pub fn count_items(items: &[MenuItem]) -> usize {
    items.iter().map(MenuItem::subtree_len).sum()
}

/// Find an item anywhere in a menu tree by path.
pub fn find_item<'a>(items: &'a [MenuItem], path: &str) -> Option<&'a MenuItem> {
    items.iter().find_map(|item| {
        if item.path == path {
            Some(item)
        } else {
            find_item(item.children(), path)
        }
    })
}
