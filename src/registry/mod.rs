//! Remote registry
//!
//! The hosting module-federation runtime declares its configured remotes
//! here at startup. Resolution only ever reads the registry; it is injected
//! into the resolver explicitly so tests can fabricate one.

use crate::config::Config;
use parking_lot::RwLock;
use std::collections::HashSet;

/// One configured remote: an alias plus the entry URL its modules load from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    /// Opaque name the remote is addressed by
    pub alias: String,
    /// Remote entry URL
    pub entry: String,
}

impl RemoteDescriptor {
    pub fn new(alias: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            entry: entry.into(),
        }
    }
}

/// The remotes declared by one federation host instance
///
/// A host may spin up several instances (one per consuming build); the same
/// remote may be declared by more than one of them.
#[derive(Debug, Clone, Default)]
pub struct RemoteInstance {
    pub remotes: Vec<RemoteDescriptor>,
}

impl RemoteInstance {
    pub fn new(remotes: Vec<RemoteDescriptor>) -> Self {
        Self { remotes }
    }
}

/// Registry of federation instances and their declared remotes
#[derive(Default)]
pub struct RemoteRegistry {
    instances: RwLock<Vec<RemoteInstance>>,
}

impl RemoteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry with one instance holding the configured remotes
    pub fn from_config(config: &Config) -> Self {
        let registry = Self::new();
        registry.register_instance(RemoteInstance::new(config.remotes.clone()));
        registry
    }

    /// Register one instance's declared remotes
    pub fn register_instance(&self, instance: RemoteInstance) {
        let mut instances = self.instances.write();
        instances.push(instance);
    }

    /// Distinct remote aliases, in first-seen order
    ///
    /// Duplicate declarations across instances collapse to the first
    /// occurrence, so the resolver's scan order is stable for a given
    /// registration order.
    pub fn aliases(&self) -> Vec<String> {
        let instances = self.instances.read();
        let mut seen = HashSet::new();
        let mut aliases = Vec::new();

        for instance in instances.iter() {
            for remote in &instance.remotes {
                if seen.insert(remote.alias.clone()) {
                    aliases.push(remote.alias.clone());
                }
            }
        }

        aliases
    }

    /// The entry URL declared for an alias (first declaration wins)
    pub fn entry_for(&self, alias: &str) -> Option<String> {
        let instances = self.instances.read();
        instances
            .iter()
            .flat_map(|instance| &instance.remotes)
            .find(|remote| remote.alias == alias)
            .map(|remote| remote.entry.clone())
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }
}
