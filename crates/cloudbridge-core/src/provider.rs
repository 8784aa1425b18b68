//! Cloud provider trait definition

use crate::config::ProviderConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cloud provider abstraction trait
///
/// All cloud providers (EC2, OpenStack, etc.) implement this trait to expose
/// a uniform capability surface. Instances are created by
/// [`CloudProviderFactory`](crate::CloudProviderFactory) and owned by the caller.
pub trait CloudProvider: Send + Sync {
    /// Returns the provider family (e.g., "ec2", "openstack")
    fn cloud_type(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// The configuration the provider was constructed with
    fn config(&self) -> &ProviderConfig;

    /// Security capability (key pairs)
    fn security(&self) -> &dyn SecurityManager;
}

/// Key pair management capability
#[async_trait]
pub trait SecurityManager: Send + Sync {
    /// List all key pairs visible to the configured account
    async fn list_key_pairs(&self) -> Result<Vec<KeyPair>>;
}

/// A named SSH key pair registered with the cloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub name: String,

    /// Fingerprint reported by the cloud, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl KeyPair {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fingerprint: None,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }
}

impl std::fmt::Display for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fingerprint {
            Some(fp) => write!(f, "{} ({})", self.name, fp),
            None => f.write_str(&self.name),
        }
    }
}
