//! Raw route nodes and normalized menu items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::authority::Authority;

/// A route as declared by the routing configuration.
///
/// Nodes without a `name` or `path` never reach the menu, and neither do
/// their descendants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMenuNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Required authority; inherited by direct children that declare none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub hide_in_menu: bool,

    #[serde(default)]
    pub hide_children_in_menu: bool,

    /// Nested routes, consumed into `children` by the formatter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RawMenuNode>>,

    /// Any other route attributes (component, redirect, ...), carried through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawMenuNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn authority(mut self, authority: impl Into<Authority>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide_in_menu = true;
        self
    }

    pub fn hide_children(mut self) -> Self {
        self.hide_children_in_menu = true;
        self
    }

    pub fn routes(mut self, routes: Vec<RawMenuNode>) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A normalized menu entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Display label (localized unless localization is disabled).
    pub name: String,

    /// Dot-joined locale key, e.g. `menu.account.settings`.
    pub locale: String,

    /// Own authority, or the parent's when the route declares none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,

    /// Route path; the breadcrumb lookup key.
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub hide_in_menu: bool,

    #[serde(default)]
    pub hide_children_in_menu: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuItem {
    /// Copy of this item with `children` left unset.
    pub fn without_children(&self) -> Self {
        Self {
            name: self.name.clone(),
            locale: self.locale.clone(),
            authority: self.authority.clone(),
            path: self.path.clone(),
            icon: self.icon.clone(),
            hide_in_menu: self.hide_in_menu,
            hide_children_in_menu: self.hide_children_in_menu,
            children: None,
            extra: self.extra.clone(),
        }
    }

    /// Direct children, or an empty slice.
    pub fn children(&self) -> &[MenuItem] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Number of items in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(MenuItem::subtree_len).sum::<usize>()
    }
}
