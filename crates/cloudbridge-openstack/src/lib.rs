//! OpenStack provider for CloudBridge
//!
//! This crate implements the CloudProvider trait for OpenStack clouds
//! (Keystone v3), driving the `openstack` command line client.
//!
//! # Requirements
//!
//! - `openstack` CLI (python-openstackclient) must be installed
//! - Credentials come from the provider configuration and are handed to the
//!   CLI through `OS_*` environment variables
//!
//! # Example
//!
//! ```ignore
//! use cloudbridge_core::{CloudProvider, ProviderConfig};
//! use cloudbridge_openstack::OpenStackCloudProviderV1;
//!
//! let config = ProviderConfig::new()
//!     .with_credentials("demo", "password")
//!     .with_endpoint("keystone.example.org")
//!     .with_extra("project_name", "demo");
//! let provider = OpenStackCloudProviderV1::new(&config)?;
//!
//! let key_pairs = provider.security().list_key_pairs().await?;
//! ```

pub mod cli;
pub mod error;
pub mod provider;

pub use cli::{KeypairInfo, OpenStackAuth, OpenStackCli};
pub use error::{OpenStackError, Result};
pub use provider::{
    IDENTIFIER, OpenStackCloudProviderV1, OpenStackSecurityManager, PROVIDER_CLASS,
};
