//! In-process module loader
//!
//! Serves modules from a table built up-front. Hosts that link their page
//! modules natively register them here; tests use it to fabricate remotes.

use super::{LoaderError, ModuleExport, ModuleLoader, PagesMap, PAGES_MAP_MODULE};
use crate::page::FederatedPage;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

enum StaticModule {
    PagesMap(serde_json::Value),
    Page(Arc<dyn FederatedPage>),
}

/// Module loader backed by an in-memory table
#[derive(Default)]
pub struct StaticLoader {
    modules: RwLock<HashMap<String, StaticModule>>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pages-map payload for a remote alias
    ///
    /// The payload stays raw and is decoded on every load, the same way a
    /// remote fetch would be: each resolution sees a fresh table, and a
    /// malformed payload fails on load rather than on registration.
    pub fn with_pages_map(self, alias: &str, payload: serde_json::Value) -> Self {
        let key = format!("{}/{}", alias, PAGES_MAP_MODULE);
        self.modules
            .write()
            .insert(key, StaticModule::PagesMap(payload));
        self
    }

    /// Register a page component under its full module key
    pub fn with_page(self, key: &str, page: Arc<dyn FederatedPage>) -> Self {
        self.modules
            .write()
            .insert(key.to_string(), StaticModule::Page(page));
        self
    }
}

#[async_trait]
impl ModuleLoader for StaticLoader {
    async fn load(&self, key: &str) -> Result<ModuleExport, LoaderError> {
        let modules = self.modules.read();
        match modules.get(key) {
            Some(StaticModule::PagesMap(payload)) => {
                Ok(ModuleExport::PagesMap(PagesMap::decode(payload)?))
            }
            Some(StaticModule::Page(page)) => Ok(ModuleExport::Page(Arc::clone(page))),
            None => Err(LoaderError::NotFound(key.to_string())),
        }
    }
}
