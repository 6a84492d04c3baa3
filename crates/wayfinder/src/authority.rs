//! Authorities and the capability check applied to menu items.
//!
//! An item declares the authority it requires; the current principal is
//! represented by an [`AccessCheck`] that decides, per item, whether it is
//! shown. The pipeline never holds identity state of its own.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::menu::MenuItem;

/// Authority required to see a menu item.
///
/// Deserializes from either a single string (`"admin"`) or a list of
/// strings (`["admin", "editor"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Authority {
    /// A single required authority.
    One(String),
    /// Any one of the listed authorities grants access.
    AnyOf(Vec<String>),
}

impl Authority {
    /// Iterate over the authority names this value mentions.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Authority::One(name) => std::slice::from_ref(name),
            Authority::AnyOf(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

impl From<&str> for Authority {
    fn from(name: &str) -> Self {
        Authority::One(name.to_string())
    }
}

impl From<Vec<&str>> for Authority {
    fn from(names: Vec<&str>) -> Self {
        Authority::AnyOf(names.into_iter().map(str::to_string).collect())
    }
}

/// Outcome of a capability check.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    /// Show this representation of the item (possibly decorated).
    Allowed(MenuItem),
    /// The current principal may not see the item.
    Denied,
}

impl AccessDecision {
    /// Convert into the allowed item, if any.
    pub fn into_allowed(self) -> Option<MenuItem> {
        match self {
            AccessDecision::Allowed(item) => Some(item),
            AccessDecision::Denied => None,
        }
    }
}

/// Capability check injected into the visibility filter.
///
/// Receives the item's resolved authority and the item itself (already
/// child-pruned) and returns what should be shown.
pub trait AccessCheck {
    fn check(&self, authority: Option<&Authority>, item: MenuItem) -> AccessDecision;
}

impl<F> AccessCheck for F
where
    F: Fn(Option<&Authority>, MenuItem) -> AccessDecision,
{
    fn check(&self, authority: Option<&Authority>, item: MenuItem) -> AccessDecision {
        self(authority, item)
    }
}

/// The current principal's granted authorities.
///
/// - Items without an authority are always allowed.
/// - Superusers are allowed everything.
/// - Otherwise at least one of the item's authorities must be granted.
#[derive(Debug, Clone, Default)]
pub struct Principal {
    granted: HashSet<String>,
    superuser: bool,
}

impl Principal {
    /// A principal holding the given authorities.
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
            superuser: false,
        }
    }

    /// A principal with no authorities; sees only unrestricted items.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A principal that passes every check.
    pub fn superuser() -> Self {
        Self {
            granted: HashSet::new(),
            superuser: true,
        }
    }

    /// Check whether the principal satisfies an authority requirement.
    pub fn permits(&self, authority: Option<&Authority>) -> bool {
        if self.superuser {
            return true;
        }
        match authority {
            None => true,
            Some(required) => required.names().any(|name| self.granted.contains(name)),
        }
    }
}

impl AccessCheck for Principal {
    fn check(&self, authority: Option<&Authority>, item: MenuItem) -> AccessDecision {
        if self.permits(authority) {
            AccessDecision::Allowed(item)
        } else {
            AccessDecision::Denied
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn authority_deserializes_string_or_list() {
        let one: Authority = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(one, Authority::from("admin"));

        let many: Authority = serde_json::from_str(r#"["admin", "user"]"#).unwrap();
        assert_eq!(many, Authority::from(vec!["admin", "user"]));
    }

    #[test]
    fn principal_allows_unrestricted_items() {
        assert!(Principal::anonymous().permits(None));
    }

    #[test]
    fn principal_matches_single_authority() {
        let principal = Principal::new(["user"]);
        assert!(principal.permits(Some(&Authority::from("user"))));
        assert!(!principal.permits(Some(&Authority::from("admin"))));
    }

    #[test]
    fn principal_matches_any_of_list() {
        let principal = Principal::new(["editor"]);
        assert!(principal.permits(Some(&Authority::from(vec!["admin", "editor"]))));
        assert!(!principal.permits(Some(&Authority::from(vec!["admin"]))));
    }

    #[test]
    fn empty_authority_list_denies() {
        let principal = Principal::new(["admin"]);
        assert!(!principal.permits(Some(&Authority::AnyOf(Vec::new()))));
    }

    #[test]
    fn superuser_passes_everything() {
        let principal = Principal::superuser();
        assert!(principal.permits(Some(&Authority::from("anything"))));
        assert!(principal.permits(Some(&Authority::AnyOf(Vec::new()))));
    }
}
