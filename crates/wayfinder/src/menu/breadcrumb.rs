//! Path-keyed index of menu items for breadcrumb resolution.
//!
//! The index is built from the full formatted tree, before visibility
//! filtering, so routes hidden from the menu still resolve.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::types::MenuItem;
use crate::memo::{CacheStats, LastCall};

/// Mapping from route path to menu item.
///
/// When two items share a path the one visited last wins. Children are
/// visited before their parent, and earlier siblings before later ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BreadcrumbMap {
    entries: BTreeMap<String, MenuItem>,
    /// Paths containing `:param` segments, most specific first.
    #[serde(skip)]
    patterns: Vec<String>,
}

impl BreadcrumbMap {
    /// Flatten a menu tree into a path index.
    pub fn build(items: &[MenuItem]) -> Self {
        let mut map = Self::default();
        map.flatten(items);
        map.build_patterns();
        map
    }

    fn flatten(&mut self, items: &[MenuItem]) {
        for item in items {
            if let Some(children) = &item.children {
                self.flatten(children);
            }
            self.entries.insert(item.path.clone(), item.clone());
        }
    }

    fn build_patterns(&mut self) {
        self.patterns = self
            .entries
            .keys()
            .filter(|path| path.contains(':'))
            .cloned()
            .collect();

        // Fewer params and more segments first.
        self.patterns.sort_by_key(|path| {
            let param_count = path.matches(':').count();
            let segment_count = path.matches('/').count();
            (param_count, std::cmp::Reverse(segment_count))
        });
    }

    /// Exact lookup by path.
    pub fn get(&self, path: &str) -> Option<&MenuItem> {
        self.entries.get(path)
    }

    /// Look up a concrete location.
    ///
    /// Exact paths win; otherwise the most specific `:param` route whose
    /// segments line up with `location` is returned.
    pub fn resolve(&self, location: &str) -> Option<&MenuItem> {
        if let Some(item) = self.entries.get(location) {
            return Some(item);
        }
        self.patterns
            .iter()
            .find(|pattern| matches_pattern(pattern, location))
            .and_then(|pattern| self.entries.get(pattern))
    }

    /// Items for each ancestor prefix of `location`, outermost first.
    ///
    /// `/list/search/articles` resolves `/list`, `/list/search` and
    /// `/list/search/articles`; prefixes with no item are skipped.
    pub fn trail(&self, location: &str) -> Vec<&MenuItem> {
        path_prefixes(location)
            .iter()
            .filter_map(|prefix| self.resolve(prefix))
            .collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds breadcrumb maps, remembering the last input tree.
#[derive(Debug)]
pub struct BreadcrumbIndexer {
    memo: LastCall<Vec<MenuItem>, BreadcrumbMap>,
}

impl BreadcrumbIndexer {
    pub fn new() -> Self {
        Self {
            memo: LastCall::new("breadcrumb_indexer"),
        }
    }

    /// Index a menu tree; structurally equal input returns the previous map.
    pub fn index(&self, items: &[MenuItem]) -> Arc<BreadcrumbMap> {
        self.memo.get_or_compute(
            |stored| stored.as_slice() == items,
            || items.to_vec(),
            || {
                let map = BreadcrumbMap::build(items);
                debug!(entries = map.len(), patterns = map.patterns.len(), "built breadcrumb map");
                map
            },
        )
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.memo.stats()
    }
}

impl Default for BreadcrumbIndexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a route pattern against a location segment by segment.
///
/// Pattern: "/users/:id/edit"
/// Location: "/users/42/edit"
fn matches_pattern(pattern: &str, location: &str) -> bool {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let location_parts: Vec<&str> = location.split('/').collect();

    pattern_parts.len() == location_parts.len()
        && pattern_parts
            .iter()
            .zip(location_parts.iter())
            .all(|(pat, actual)| (pat.starts_with(':') && !actual.is_empty()) || pat == actual)
}

/// Cumulative prefixes of a location: "/a/b" -> ["/a", "/a/b"].
///
/// The root location yields `["/"]`.
fn path_prefixes(location: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut current = String::new();
    for segment in location.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        prefixes.push(current.clone());
    }
    if prefixes.is_empty() {
        prefixes.push("/".to_string());
    }
    prefixes
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn item(name: &str, path: &str, children: Vec<MenuItem>) -> MenuItem {
        MenuItem {
            name: name.into(),
            locale: format!("menu.{name}"),
            path: path.into(),
            children: (!children.is_empty()).then_some(children),
            ..MenuItem::default()
        }
    }

    #[test]
    fn empty_tree_gives_empty_map() {
        assert!(BreadcrumbMap::build(&[]).is_empty());
    }

    #[test]
    fn every_unique_path_is_indexed() {
        let tree = [
            item("a", "/a", vec![item("b", "/a/b", vec![item("c", "/a/b/c", vec![])])]),
            item("d", "/d", vec![]),
        ];
        let map = BreadcrumbMap::build(&tree);

        assert_eq!(map.len(), 4);
        for path in ["/a", "/a/b", "/a/b/c", "/d"] {
            assert_eq!(map.get(path).unwrap().path, path);
        }
    }

    #[test]
    fn parent_overrides_child_with_same_path() {
        let tree = [item("parent", "/x", vec![item("child", "/x", vec![])])];
        let map = BreadcrumbMap::build(&tree);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("/x").unwrap().name, "parent");
    }

    #[test]
    fn later_subtree_overrides_earlier_descendant() {
        let tree = [
            item("a", "/a", vec![item("first", "/shared", vec![])]),
            item("b", "/b", vec![item("second", "/shared", vec![])]),
        ];
        let map = BreadcrumbMap::build(&tree);
        assert_eq!(map.get("/shared").unwrap().name, "second");
    }

    #[test]
    fn resolve_prefers_exact_then_pattern() {
        let tree = [item(
            "users",
            "/users",
            vec![
                item("new", "/users/new", vec![]),
                item("detail", "/users/:id", vec![]),
            ],
        )];
        let map = BreadcrumbMap::build(&tree);

        assert_eq!(map.resolve("/users/new").unwrap().name, "new");
        assert_eq!(map.resolve("/users/42").unwrap().name, "detail");
        assert!(map.resolve("/users/42/edit").is_none());
        assert!(map.resolve("/users/").is_none());
    }

    #[test]
    fn pattern_specificity() {
        let tree = [
            item("any", "/:kind/:id", vec![]),
            item("post", "/posts/:id", vec![]),
        ];
        let map = BreadcrumbMap::build(&tree);
        assert_eq!(map.resolve("/posts/7").unwrap().name, "post");
        assert_eq!(map.resolve("/pages/7").unwrap().name, "any");
    }

    #[test]
    fn trail_resolves_each_prefix() {
        let tree = [item(
            "list",
            "/list",
            vec![item(
                "search",
                "/list/search",
                vec![item("articles", "/list/search/articles", vec![])],
            )],
        )];
        let map = BreadcrumbMap::build(&tree);

        let names: Vec<&str> = map
            .trail("/list/search/articles")
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["list", "search", "articles"]);
    }

    #[test]
    fn trail_skips_unknown_prefixes() {
        let tree = [item("b", "/a/b", vec![])];
        let map = BreadcrumbMap::build(&tree);
        let trail = map.trail("/a/b");
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].path, "/a/b");
    }

    #[test]
    fn prefixes_of_root_and_nested() {
        assert_eq!(path_prefixes("/"), vec!["/"]);
        assert_eq!(path_prefixes("/a/b/"), vec!["/a", "/a/b"]);
    }

    #[test]
    fn indexer_memoizes_structurally() {
        let indexer = BreadcrumbIndexer::new();
        let tree = vec![item("a", "/a", vec![])];

        let first = indexer.index(&tree);
        let second = indexer.index(&tree.clone());
        assert!(Arc::ptr_eq(&first, &second));

        let mut changed = tree.clone();
        changed[0].hide_in_menu = true;
        let third = indexer.index(&changed);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(indexer.cache_stats(), CacheStats { hits: 1, misses: 2 });
    }
}
