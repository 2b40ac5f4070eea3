//! The catch-all page contract
//!
//! The hosting framework routes every otherwise-unmatched path to one
//! catch-all page and drives it through an initial-props hook. The hook
//! resolves the path to a federated page, loads it, and forwards the
//! extracted route parameters to the page's own initial-props hook.
//!
//! Nothing in here is fatal: an upstream request error renders the error
//! page, and everything else that goes wrong degrades to a 404.

use crate::loader::{LoaderError, ModuleExport, ModuleLoader};
use crate::registry::RemoteRegistry;
use crate::router::{MatchedPage, PageResolver};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A page component loaded from a remote
#[async_trait]
pub trait FederatedPage: Send + Sync {
    /// The page's own data-fetching hook
    ///
    /// Returns the plain data object the page renders from. Route
    /// parameters extracted during resolution arrive merged into
    /// `ctx.query`.
    async fn initial_props(&self, ctx: &PageContext) -> Result<serde_json::Value, LoaderError>;
}

/// Request context handed down by the hosting framework
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// The framework reported an error on this request
    pub err: bool,
    /// Resolved request path
    pub path: Option<String>,
    /// Raw request URL, used when no resolved path is available
    pub raw_request: Option<String>,
    /// Query parameters
    pub query: HashMap<String, String>,
}

impl PageContext {
    /// Context for a plain request to `path`
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Render input produced for the catch-all page
#[derive(Clone)]
pub enum PageProps {
    /// Nothing serves this path
    Render404,
    /// The request carried an upstream error, or the matched page failed
    RenderError,
    /// A federated page and its initial props
    Federated {
        page: Arc<dyn FederatedPage>,
        props: serde_json::Value,
    },
}

impl PageProps {
    pub fn is_render_404(&self) -> bool {
        matches!(self, PageProps::Render404)
    }

    pub fn is_render_error(&self) -> bool {
        matches!(self, PageProps::RenderError)
    }
}

/// The catch-all entry point for federated resolution
pub struct CatchAllPage {
    resolver: PageResolver,
    loader: Arc<dyn ModuleLoader>,
}

impl CatchAllPage {
    pub fn new(registry: Arc<RemoteRegistry>, loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            resolver: PageResolver::new(registry, Arc::clone(&loader)),
            loader,
        }
    }

    /// Build the render input for a request
    pub async fn initial_props(&self, ctx: &PageContext) -> PageProps {
        if ctx.err {
            return PageProps::RenderError;
        }

        let path = ctx
            .path
            .clone()
            .or_else(|| ctx.raw_request.clone())
            .unwrap_or_default();
        if path.is_empty() {
            return PageProps::Render404;
        }

        let Some(MatchedPage {
            remote,
            module,
            params,
        }) = self.resolver.match_federated_page(&path).await
        else {
            return PageProps::Render404;
        };

        // A resolved but empty reference is treated the same as no match
        if remote.is_empty() || module.is_empty() {
            return PageProps::Render404;
        }

        let key = format!("{}{}", remote, strip_module_dot(&module));
        let page = match self.loader.load(&key).await {
            Ok(ModuleExport::Page(page)) => page,
            Ok(ModuleExport::PagesMap(_)) => {
                debug!(%key, "expected a page export, got a pages map");
                return PageProps::Render404;
            }
            Err(error) => {
                debug!(%key, %error, "failed to load federated page");
                return PageProps::Render404;
            }
        };

        // Dynamic params become query parameters for the page's own hook
        let mut page_ctx = ctx.clone();
        page_ctx.path = Some(path);
        page_ctx.query.extend(params);

        match page.initial_props(&page_ctx).await {
            Ok(props) => PageProps::Federated { page, props },
            Err(error) => {
                debug!(%error, "federated page initial props failed");
                PageProps::RenderError
            }
        }
    }

    pub fn resolver(&self) -> &PageResolver {
        &self.resolver
    }
}

/// Module references conventionally start with `./`; the loader key wants
/// the path without the leading dot
fn strip_module_dot(module: &str) -> &str {
    if module.starts_with("./") {
        &module[1..]
    } else {
        module
    }
}
