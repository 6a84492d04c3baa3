//! Wayfinder
//!
//! Converts a nested route description into a permission-filtered
//! navigation menu and a path-keyed breadcrumb index. The `wayfinder`
//! binary runs the same pipeline over route and locale files.

pub mod authority;
pub mod config;
pub mod error;
pub mod locale;
pub mod memo;
pub mod menu;
pub mod source;

pub use authority::{AccessCheck, AccessDecision, Authority, Principal};
pub use config::MenuSettings;
pub use error::{MenuError, MenuResult};
pub use locale::{Localizer, MessageCatalog, Passthrough};
pub use menu::{
    BreadcrumbIndexer, BreadcrumbMap, MenuFormatter, MenuItem, MenuPipeline, MenuState,
    RawMenuNode, filter_visible, flat_menu_keys,
};
