//! Fedhost - federated page routing for a micro-frontend host
//!
//! A micro-frontend host delegates page rendering to modules loaded at
//! runtime from independently deployed "remotes". Each remote publishes a
//! pages map: a table from route pattern to module reference. Fedhost
//! answers "which remote and which module serve this path", extracting
//! dynamic path parameters along the way.
//!
//! The pieces:
//! - [`registry::RemoteRegistry`]: the remotes the hosting runtime declared
//! - [`loader::ModuleLoader`]: how modules are fetched from a remote
//! - [`router::PageResolver`]: concurrent pages-map fetch plus the ordered
//!   scan that picks the first matching route
//! - [`page::CatchAllPage`]: the initial-props contract the hosting
//!   framework drives for every otherwise-unmatched path

pub mod config;
pub mod loader;
pub mod page;
pub mod registry;
pub mod router;

use thiserror::Error;

/// Core error types for fedhost
#[derive(Error, Debug)]
pub enum FedhostError {
    #[error("Loader error: {0}")]
    Loader(#[from] loader::LoaderError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub use config::{Config, ConfigError};
pub use loader::{
    HttpManifestLoader, LoaderError, ModuleExport, ModuleLoader, PagesMap, StaticLoader,
};
pub use page::{CatchAllPage, FederatedPage, PageContext, PageProps};
pub use registry::{RemoteDescriptor, RemoteInstance, RemoteRegistry};
pub use router::{MatchedPage, PageResolver};
