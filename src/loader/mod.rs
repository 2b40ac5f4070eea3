//! Remote module loading
//!
//! A remote exposes modules by string key, `"<alias>/<module-path>"`. The
//! conventional default export is either a pages map (the remote's route
//! table) or a page component. Payloads arrive untyped from the transport;
//! they are decoded here at the adapter boundary, and a malformed payload
//! is a load failure, never a half-usable table.

pub mod http;
pub mod memory;

pub use http::HttpManifestLoader;
pub use memory::StaticLoader;

use crate::page::FederatedPage;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Module path every remote publishes its route table under
pub const PAGES_MAP_MODULE: &str = "pages-map";

/// Loader-related errors
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Module not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed pages map: {0}")]
    MalformedPagesMap(String),

    #[error("Page initial props failed: {0}")]
    InitialProps(String),
}

/// The conventional default export of a loaded remote module
#[derive(Clone)]
pub enum ModuleExport {
    /// A remote's published route table
    PagesMap(PagesMap),
    /// A page component
    Page(Arc<dyn FederatedPage>),
}

/// Capability to fetch a module from a remote by string key
///
/// Keys follow the `"<alias>/<module-path>"` convention. A failed load is
/// signaled as an error; whether that aborts anything is the caller's
/// decision (the resolver logs and moves on).
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, key: &str) -> Result<ModuleExport, LoaderError>;
}

/// A remote-published route table: route pattern to module reference
///
/// Entries keep the order the remote published them in; the resolver scans
/// in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagesMap {
    entries: Vec<(String, String)>,
}

impl PagesMap {
    /// Decode an untyped pages-map payload, failing closed
    ///
    /// The payload must be a JSON object whose values are all strings.
    pub fn decode(payload: &serde_json::Value) -> Result<Self, LoaderError> {
        let object = payload.as_object().ok_or_else(|| {
            LoaderError::MalformedPagesMap("payload is not an object".to_string())
        })?;

        let mut entries = Vec::with_capacity(object.len());
        for (route, module) in object {
            let module = module.as_str().ok_or_else(|| {
                LoaderError::MalformedPagesMap(format!(
                    "module reference for {} is not a string",
                    route
                ))
            })?;
            entries.push((route.clone(), module.to_string()));
        }

        Ok(Self { entries })
    }

    /// Entries in published table order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(route, module)| (route.as_str(), module.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_preserves_table_order() {
        let payload = json!({
            "/zebra": "./Zebra",
            "/apple": "./Apple",
            "/item/:id": "./Item",
        });

        let map = PagesMap::decode(&payload).unwrap();
        let routes: Vec<&str> = map.entries().map(|(route, _)| route).collect();
        assert_eq!(routes, vec!["/zebra", "/apple", "/item/:id"]);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(matches!(
            PagesMap::decode(&json!(["/a", "/b"])),
            Err(LoaderError::MalformedPagesMap(_))
        ));
        assert!(matches!(
            PagesMap::decode(&json!("not a map")),
            Err(LoaderError::MalformedPagesMap(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_string_module() {
        let payload = json!({ "/item/:id": 42 });
        assert!(matches!(
            PagesMap::decode(&payload),
            Err(LoaderError::MalformedPagesMap(_))
        ));
    }

    #[test]
    fn test_decode_empty_table() {
        let map = PagesMap::decode(&json!({})).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }
}
