//! Route tree to menu tree conversion.
//!
//! A single depth-first pass resolves each route's locale key, label and
//! authority, and replaces `routes` with formatted `children`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use super::types::{MenuItem, RawMenuNode};
use crate::authority::Authority;
use crate::config::MenuSettings;
use crate::locale::Localizer;
use crate::memo::{CacheStats, LastCall};

/// Input of the last formatting call.
#[derive(Debug, PartialEq)]
struct FormatKey {
    nodes: Vec<RawMenuNode>,
    authority: Option<Authority>,
}

/// Converts raw routes into menu items, remembering the last result.
pub struct MenuFormatter {
    settings: MenuSettings,
    localizer: Arc<dyn Localizer>,
    memo: LastCall<FormatKey, Vec<MenuItem>>,
}

impl MenuFormatter {
    pub fn new(settings: MenuSettings, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            settings,
            localizer,
            memo: LastCall::new("menu_formatter"),
        }
    }

    /// Format a route tree.
    ///
    /// Input that is structurally equal to the previous call's input returns
    /// the previous output (the same `Arc`) without walking the tree again.
    pub fn format(
        &self,
        nodes: &[RawMenuNode],
        root_authority: Option<&Authority>,
    ) -> Arc<Vec<MenuItem>> {
        self.memo.get_or_compute(
            |key| key.nodes == nodes && key.authority.as_ref() == root_authority,
            || FormatKey {
                nodes: nodes.to_vec(),
                authority: root_authority.cloned(),
            },
            || self.format_uncached(nodes, root_authority),
        )
    }

    /// Format a route tree, bypassing the cache.
    pub fn format_uncached(
        &self,
        nodes: &[RawMenuNode],
        root_authority: Option<&Authority>,
    ) -> Vec<MenuItem> {
        let items = self.format_level(nodes, root_authority, &self.settings.root_locale);
        debug!(
            roots = items.len(),
            total = items.iter().map(MenuItem::subtree_len).sum::<usize>(),
            "formatted menu tree"
        );
        items
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.memo.stats()
    }

    fn format_level(
        &self,
        nodes: &[RawMenuNode],
        parent_authority: Option<&Authority>,
        parent_locale: &str,
    ) -> Vec<MenuItem> {
        nodes
            .iter()
            .filter_map(|node| self.format_node(node, parent_authority, parent_locale))
            .collect()
    }

    fn format_node(
        &self,
        node: &RawMenuNode,
        parent_authority: Option<&Authority>,
        parent_locale: &str,
    ) -> Option<MenuItem> {
        let (Some(name), Some(path)) = (present(&node.name), present(&node.path)) else {
            debug!(name = ?node.name, path = ?node.path, "skipping route without name or path");
            return None;
        };

        let locale = format!("{parent_locale}.{name}");
        let label = if self.settings.disable_locale {
            name.to_string()
        } else {
            self.localizer.translate(&locale, name)
        };

        // Children inherit this route's own authority, not the one it inherited.
        let own_authority = declared(&node.authority);
        let children = match &node.routes {
            Some(routes) if !routes.is_empty() => {
                Some(self.format_level(routes, own_authority, &locale))
            }
            _ => None,
        };

        Some(MenuItem {
            name: label,
            locale,
            authority: own_authority.or(parent_authority).cloned(),
            path: path.to_string(),
            icon: node.icon.clone(),
            hide_in_menu: node.hide_in_menu,
            hide_children_in_menu: node.hide_children_in_menu,
            children,
            extra: passthrough_attributes(node),
        })
    }
}

impl std::fmt::Debug for MenuFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuFormatter")
            .field("settings", &self.settings)
            .field("memo", &self.memo)
            .finish_non_exhaustive()
    }
}

/// Empty strings count as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A route's own authority; an empty name counts as undeclared.
fn declared(authority: &Option<Authority>) -> Option<&Authority> {
    authority
        .as_ref()
        .filter(|a| !matches!(a, Authority::One(name) if name.is_empty()))
}

/// Keys the formatter computes itself and never copies from the route.
const COMPUTED_KEYS: [&str; 2] = ["locale", "children"];

fn passthrough_attributes(node: &RawMenuNode) -> Map<String, Value> {
    node.extra
        .iter()
        .filter(|(key, _)| !COMPUTED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
