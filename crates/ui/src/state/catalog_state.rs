//! Admin catalog page state.

use tracing::debug;
use zenkai_domain::{Catalog, MuscleGroup};

/// The catalog as shown on the admin page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Groups and exercises in display order.
    pub catalog: Catalog,
    /// True once the list request completed.
    pub loaded: bool,
}

impl CatalogState {
    /// Replaces the catalog with a freshly fetched one.
    pub fn load(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.loaded = true;
    }

    /// Applies a created or modified group returned by the backend.
    pub fn apply(&mut self, group: MuscleGroup) {
        self.catalog.apply(group);
    }

    /// Applies a rename, keeping the group's position.
    pub fn apply_rename(&mut self, old: &str, group: MuscleGroup) {
        if let Err(err) = self.catalog.rename_group(old, group.name.clone()) {
            debug!(error = %err, "renamed group was not listed");
        }
        self.catalog.apply(group);
    }

    /// Drops a deleted group.
    pub fn apply_delete(&mut self, name: &str) {
        self.catalog.remove_group(name);
    }
}
