//! CloudBridge Core
//!
//! This crate provides the provider abstraction for CloudBridge: a uniform
//! interface over EC2-compatible clouds, OpenStack and other providers, and
//! the registry that locates, versions and constructs provider
//! implementations without the caller knowing which ones exist.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 CloudBridge CLI                  │
//! │          (cloudbridge providers / key-pairs)     │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                cloudbridge-core                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          CloudProviderFactory             │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────┐  ┌────────────────────┐   │
//! │  │ ProviderRegistry │  │ImplementationLoader│   │
//! │  │  name → versions │  │  id → constructor  │   │
//! │  └──────────────────┘  └────────────────────┘   │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │      ec2      │ │   openstack   │
//! │   provider    │ │   provider    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod loader;
pub mod provider;
pub mod registry;

#[cfg(test)]
mod testing;

// Re-exports
pub use config::{DEFAULT_REGION, ExtraValue, ProviderConfig, service_url};
pub use error::{CloudError, Result};
pub use factory::{CloudProviderFactory, VersionOrder, numeric_version_order};
pub use loader::{ImplementationLoader, ProviderClass, ProviderConstructor};
pub use provider::{CloudProvider, KeyPair, SecurityManager};
pub use registry::{
    ImplIdentifier, ImplementationEntry, ProviderDescriptor, ProviderList, ProviderRegistry,
    ProviderRegistryBuilder,
};
