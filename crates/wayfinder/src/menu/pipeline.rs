//! The full menu recompute: format, filter, and index.

use std::sync::Arc;

use tracing::debug;

use super::breadcrumb::{BreadcrumbIndexer, BreadcrumbMap};
use super::filter::filter_visible;
use super::formatter::MenuFormatter;
use super::types::{MenuItem, RawMenuNode};
use crate::authority::{AccessCheck, Authority};
use crate::config::MenuSettings;
use crate::locale::Localizer;

/// Result of one menu recompute.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Menu tree filtered for the current principal.
    pub menu_data: Vec<MenuItem>,
    /// Path index over the unfiltered tree.
    pub breadcrumb_map: Arc<BreadcrumbMap>,
    /// The raw routes the state was computed from.
    pub router_data: Vec<RawMenuNode>,
}

/// Formatter and breadcrumb indexer sharing one configuration.
///
/// Both stages keep their own last-call cache, so recomputing with
/// unchanged routes only repeats the (principal-dependent) filter.
#[derive(Debug)]
pub struct MenuPipeline {
    formatter: MenuFormatter,
    indexer: BreadcrumbIndexer,
}

impl MenuPipeline {
    pub fn new(settings: MenuSettings, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            formatter: MenuFormatter::new(settings, localizer),
            indexer: BreadcrumbIndexer::new(),
        }
    }

    /// Recompute the menu for a route tree and principal.
    pub fn compute<A>(
        &self,
        routes: &[RawMenuNode],
        root_authority: Option<&Authority>,
        access: &A,
    ) -> MenuState
    where
        A: AccessCheck + ?Sized,
    {
        let formatted = self.formatter.format(routes, root_authority);
        let menu_data = filter_visible(&formatted, access);
        let breadcrumb_map = self.indexer.index(&formatted);

        debug!(
            visible = menu_data.len(),
            breadcrumbs = breadcrumb_map.len(),
            "recomputed menu"
        );

        MenuState {
            menu_data,
            breadcrumb_map,
            router_data: routes.to_vec(),
        }
    }

    pub fn formatter(&self) -> &MenuFormatter {
        &self.formatter
    }

    pub fn indexer(&self) -> &BreadcrumbIndexer {
        &self.indexer
    }
}
