//! HTTP manifest loader
//!
//! Route tables travel fine as JSON, so this adapter fetches a remote's
//! pages map from `<entry base>/pages-map.json`, next to the remote entry
//! URL the registry declared for the alias. Executable page modules cannot
//! travel as JSON; those keys delegate to an inner loader supplied by the
//! host. No retries and no timeout of its own.

use super::{LoaderError, ModuleExport, ModuleLoader, PagesMap, PAGES_MAP_MODULE};
use crate::registry::RemoteRegistry;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// Module loader that fetches pages-map manifests over HTTP
pub struct HttpManifestLoader {
    client: Client,
    registry: Arc<RemoteRegistry>,
    inner: Option<Arc<dyn ModuleLoader>>,
}

impl HttpManifestLoader {
    pub fn new(registry: Arc<RemoteRegistry>) -> Self {
        Self {
            client: Client::new(),
            registry,
            inner: None,
        }
    }

    /// Delegate non-manifest keys (page modules) to another loader
    pub fn with_inner(mut self, inner: Arc<dyn ModuleLoader>) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Manifest URL for an alias: the remote entry URL with its last path
    /// component replaced by `pages-map.json`
    fn manifest_url(&self, alias: &str) -> Option<String> {
        let entry = self.registry.entry_for(alias)?;
        let base = entry
            .rsplit_once('/')
            .map(|(base, _)| base)
            .unwrap_or(entry.as_str());
        Some(format!("{}/{}.json", base, PAGES_MAP_MODULE))
    }

    async fn fetch_manifest(&self, alias: &str, key: &str) -> Result<PagesMap, LoaderError> {
        let url = self
            .manifest_url(alias)
            .ok_or_else(|| LoaderError::NotFound(key.to_string()))?;

        debug!(alias, %url, "fetching pages map manifest");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoaderError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| LoaderError::Transport(e.to_string()))?;

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LoaderError::Transport(e.to_string()))?;

        PagesMap::decode(&payload)
    }
}

#[async_trait]
impl ModuleLoader for HttpManifestLoader {
    async fn load(&self, key: &str) -> Result<ModuleExport, LoaderError> {
        if let Some((alias, module)) = key.split_once('/') {
            if module == PAGES_MAP_MODULE {
                let map = self.fetch_manifest(alias, key).await?;
                return Ok(ModuleExport::PagesMap(map));
            }
        }

        match &self.inner {
            Some(inner) => inner.load(key).await,
            None => Err(LoaderError::NotFound(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RemoteDescriptor, RemoteInstance};

    fn registry_with(alias: &str, entry: &str) -> Arc<RemoteRegistry> {
        let registry = RemoteRegistry::new();
        registry.register_instance(RemoteInstance::new(vec![RemoteDescriptor::new(
            alias, entry,
        )]));
        Arc::new(registry)
    }

    #[test]
    fn test_manifest_url_from_entry() {
        let loader =
            HttpManifestLoader::new(registry_with("shop", "http://localhost:3001/remoteEntry.js"));
        assert_eq!(
            loader.manifest_url("shop").as_deref(),
            Some("http://localhost:3001/pages-map.json")
        );
    }

    #[test]
    fn test_manifest_url_unknown_alias() {
        let loader =
            HttpManifestLoader::new(registry_with("shop", "http://localhost:3001/remoteEntry.js"));
        assert!(loader.manifest_url("profile").is_none());
    }

    #[tokio::test]
    async fn test_unknown_alias_is_not_found() {
        let loader =
            HttpManifestLoader::new(registry_with("shop", "http://localhost:3001/remoteEntry.js"));
        assert!(matches!(
            loader.load("profile/pages-map").await,
            Err(LoaderError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_page_key_without_inner_is_not_found() {
        let loader =
            HttpManifestLoader::new(registry_with("shop", "http://localhost:3001/remoteEntry.js"));
        assert!(matches!(
            loader.load("shop/Item").await,
            Err(LoaderError::NotFound(_))
        ));
    }
}
