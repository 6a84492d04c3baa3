//! Menu system: route trees to navigation menus and breadcrumbs.
//!
//! - [`MenuFormatter`] turns raw routes into localized, authority-annotated items
//! - [`filter_visible`] prunes items the current principal cannot see
//! - [`BreadcrumbIndexer`] indexes the full tree by path
//! - [`MenuPipeline`] runs all three for one recompute

mod breadcrumb;
mod filter;
mod formatter;
mod pipeline;
mod types;

pub use breadcrumb::{BreadcrumbIndexer, BreadcrumbMap};
pub use filter::{filter_visible, flat_menu_keys};
pub use formatter::MenuFormatter;
pub use pipeline::{MenuPipeline, MenuState};
pub use types::{MenuItem, RawMenuNode};
