//! Cloud provider factory
//!
//! Resolves provider names (and optional versions) against a
//! [`ProviderRegistry`] and constructs instances through an
//! [`ImplementationLoader`].
//!
//! # Resolution
//!
//! ```text
//! create_provider("ec2", config, None)
//!         │
//!         ▼
//!   registry.get("ec2") ──── None ───▶ CloudError::ProviderNotFound
//!         │
//!         ▼ highest version (or exact match)
//!   "cloudbridge_ec2.Ec2CloudProviderV1"
//!         │
//!         ▼
//!   loader.load(..) ──────── Err ────▶ CloudError::ImplementationLoad
//!         │
//!         ▼
//!   class.instantiate(config) ─ Err ─▶ constructor error, unchanged
//!         │
//!         ▼
//!   Box<dyn CloudProvider>
//! ```

use crate::config::ProviderConfig;
use crate::error::{CloudError, Result};
use crate::loader::{ImplementationLoader, ProviderClass};
use crate::provider::CloudProvider;
use crate::registry::{ImplIdentifier, ProviderDescriptor, ProviderRegistry};
use std::cmp::Ordering;
use std::sync::Arc;

/// Ordering used to pick the latest implementation when no version is given
pub type VersionOrder = fn(u32, u32) -> Ordering;

/// Plain integer ordering: the highest version wins
pub fn numeric_version_order(a: u32, b: u32) -> Ordering {
    a.cmp(&b)
}

/// Get info and handles on the available cloud provider implementations
#[derive(Debug, Clone)]
pub struct CloudProviderFactory {
    registry: Arc<ProviderRegistry>,
    loader: Arc<ImplementationLoader>,
    version_order: VersionOrder,
}

impl CloudProviderFactory {
    pub fn new(registry: Arc<ProviderRegistry>, loader: Arc<ImplementationLoader>) -> Self {
        Self {
            registry,
            loader,
            version_order: numeric_version_order,
        }
    }

    /// Replace the ordering used to select the latest version
    pub fn with_version_order(mut self, order: VersionOrder) -> Self {
        self.version_order = order;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn loader(&self) -> &ImplementationLoader {
        &self.loader
    }

    /// All provider families and their implementations, in registry order
    pub fn list_providers(&self) -> &[ProviderDescriptor] {
        self.registry.list_providers()
    }

    /// Find the implementation identifier for a provider
    ///
    /// With a version, only an exact match is returned. Without one, the
    /// latest implementation under the configured ordering is returned.
    /// Unknown names and versions are a miss (`None`), not an error.
    pub fn find_provider_impl(&self, name: &str, version: Option<u32>) -> Option<&ImplIdentifier> {
        let provider = self.registry.get(name)?;

        let entry = match version {
            Some(v) => provider.version(v),
            None => provider.latest_by(self.version_order),
        };

        tracing::debug!(
            provider = name,
            requested_version = ?version,
            resolved = ?entry.map(|e| e.identifier.as_str()),
            "Resolved provider implementation"
        );

        entry.map(|e| &e.identifier)
    }

    /// Create a provider instance from its name and configuration
    ///
    /// Errors from the provider constructor (missing credentials, bad
    /// endpoint) are returned unchanged.
    pub fn create_provider(
        &self,
        name: &str,
        config: &ProviderConfig,
        version: Option<u32>,
    ) -> Result<Box<dyn CloudProvider>> {
        let identifier = self
            .find_provider_impl(name, version)
            .ok_or_else(|| CloudError::provider_not_found(name, version))?;

        let class = self.loader.load(identifier.as_str())?;

        tracing::info!(
            provider = name,
            implementation = %identifier,
            "Creating cloud provider"
        );
        class.instantiate(config)
    }

    /// Load the class of every registered implementation
    ///
    /// Fails on the first implementation that cannot be loaded.
    pub fn get_all_provider_classes(&self) -> Result<Vec<ProviderClass>> {
        self.registry
            .entries()
            .map(|(_, entry)| self.loader.load(entry.identifier.as_str()))
            .collect()
    }
}
