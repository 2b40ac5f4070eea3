//! Federated page resolution across remotes

use super::matcher::match_path;
use crate::loader::{ModuleExport, ModuleLoader, PagesMap, PAGES_MAP_MODULE};
use crate::registry::RemoteRegistry;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A resolved federated page: which remote, which module, which parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPage {
    /// Alias of the remote serving the page
    pub remote: String,
    /// Module reference inside that remote (conventionally `./Name`)
    pub module: String,
    /// Dynamic path parameters extracted by the matcher
    pub params: HashMap<String, String>,
}

/// Finds the remote page serving a path
pub struct PageResolver {
    registry: Arc<RemoteRegistry>,
    loader: Arc<dyn ModuleLoader>,
}

impl PageResolver {
    pub fn new(registry: Arc<RemoteRegistry>, loader: Arc<dyn ModuleLoader>) -> Self {
        Self { registry, loader }
    }

    /// Search every remote's pages map for the first route matching `path`
    ///
    /// Pages maps are fetched concurrently and the scan waits for all of
    /// them to settle; in-flight fetches are never cancelled. A remote
    /// whose fetch or decode fails is logged and skipped, never surfaced
    /// as an error. Remotes are scanned in registry order and entries in
    /// table order; the first match wins. Absence of a match is `None`.
    pub async fn match_federated_page(&self, path: &str) -> Option<MatchedPage> {
        let aliases = self.registry.aliases();

        let fetches = aliases.iter().map(|alias| async move {
            let key = format!("{}/{}", alias, PAGES_MAP_MODULE);
            match self.loader.load(&key).await {
                Ok(ModuleExport::PagesMap(map)) => Some(map),
                Ok(ModuleExport::Page(_)) => {
                    warn!(remote = %alias, "pages-map export is not a route table");
                    None
                }
                Err(error) => {
                    warn!(remote = %alias, %error, "failed to load remote pages map");
                    None
                }
            }
        });
        let maps: Vec<Option<PagesMap>> = join_all(fetches).await;

        for (alias, map) in aliases.iter().zip(maps) {
            let Some(map) = map else { continue };

            for (route, module) in map.entries() {
                if let Some(matched) = match_path(route, path) {
                    debug!(remote = %alias, route, "matched federated page");
                    return Some(MatchedPage {
                        remote: alias.clone(),
                        module: module.to_string(),
                        params: matched.params,
                    });
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticLoader;
    use crate::registry::{RemoteDescriptor, RemoteInstance};
    use serde_json::json;

    fn registry_for(aliases: &[&str]) -> Arc<RemoteRegistry> {
        let registry = RemoteRegistry::new();
        registry.register_instance(RemoteInstance::new(
            aliases
                .iter()
                .map(|alias| {
                    RemoteDescriptor::new(*alias, format!("http://{}.test/remoteEntry.js", alias))
                })
                .collect(),
        ));
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_resolves_across_remotes() {
        let loader = StaticLoader::new()
            .with_pages_map("shop", json!({ "/item/:id": "./Item" }))
            .with_pages_map("profile", json!({ "/profile": "./Profile" }));
        let resolver = PageResolver::new(registry_for(&["shop", "profile"]), Arc::new(loader));

        let matched = resolver.match_federated_page("/item/77").await.unwrap();
        assert_eq!(matched.remote, "shop");
        assert_eq!(matched.module, "./Item");
        assert_eq!(matched.params.get("id"), Some(&"77".to_string()));

        let matched = resolver.match_federated_page("/profile").await.unwrap();
        assert_eq!(matched.remote, "profile");
        assert_eq!(matched.module, "./Profile");
        assert!(matched.params.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_absence() {
        let loader = StaticLoader::new()
            .with_pages_map("shop", json!({ "/item/:id": "./Item" }))
            .with_pages_map("profile", json!({ "/profile": "./Profile" }));
        let resolver = PageResolver::new(registry_for(&["shop", "profile"]), Arc::new(loader));

        assert!(resolver.match_federated_page("/unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_remote_is_skipped() {
        // "broken" has no pages map registered; its fetch fails
        let loader = StaticLoader::new().with_pages_map("shop", json!({ "/item/:id": "./Item" }));
        let resolver = PageResolver::new(registry_for(&["broken", "shop"]), Arc::new(loader));

        let matched = resolver.match_federated_page("/item/3").await.unwrap();
        assert_eq!(matched.remote, "shop");
    }

    #[tokio::test]
    async fn test_all_remotes_failing_is_absence() {
        let resolver = PageResolver::new(
            registry_for(&["broken-1", "broken-2"]),
            Arc::new(StaticLoader::new()),
        );
        assert!(resolver.match_federated_page("/item/3").await.is_none());
    }

    #[tokio::test]
    async fn test_first_remote_in_registry_order_wins() {
        let loader = StaticLoader::new()
            .with_pages_map("first", json!({ "/item/:id": "./FirstItem" }))
            .with_pages_map("second", json!({ "/item/:id": "./SecondItem" }));
        let resolver = PageResolver::new(registry_for(&["first", "second"]), Arc::new(loader));

        let matched = resolver.match_federated_page("/item/1").await.unwrap();
        assert_eq!(matched.remote, "first");
        assert_eq!(matched.module, "./FirstItem");
    }

    #[tokio::test]
    async fn test_first_entry_in_table_order_wins() {
        let loader = StaticLoader::new().with_pages_map(
            "shop",
            json!({
                "/item/:id": "./Item",
                "/item/special": "./Special",
            }),
        );
        let resolver = PageResolver::new(registry_for(&["shop"]), Arc::new(loader));

        // No specificity rules: the dynamic entry comes first in the table
        let matched = resolver.match_federated_page("/item/special").await.unwrap();
        assert_eq!(matched.module, "./Item");
    }

    #[tokio::test]
    async fn test_malformed_table_is_skipped() {
        let loader = StaticLoader::new()
            .with_pages_map("shop", json!(["not", "a", "table"]))
            .with_pages_map("profile", json!({ "/profile": "./Profile" }));
        let resolver = PageResolver::new(registry_for(&["shop", "profile"]), Arc::new(loader));

        let matched = resolver.match_federated_page("/profile").await.unwrap();
        assert_eq!(matched.remote, "profile");
    }

    #[tokio::test]
    async fn test_empty_registry_resolves_nothing() {
        let resolver = PageResolver::new(registry_for(&[]), Arc::new(StaticLoader::new()));
        assert!(resolver.match_federated_page("/item/1").await.is_none());
    }
}
