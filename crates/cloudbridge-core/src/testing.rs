//! In-memory providers for unit tests

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::provider::{CloudProvider, KeyPair, SecurityManager};
use async_trait::async_trait;

/// Provider that records how it was built and serves key pairs from config
///
/// Key pairs come from the comma-separated `key_pairs` extra setting.
pub struct FakeProvider {
    cloud_type: &'static str,
    implementation: &'static str,
    config: ProviderConfig,
    security: FakeSecurity,
}

impl FakeProvider {
    pub fn new(
        cloud_type: &'static str,
        implementation: &'static str,
        config: &ProviderConfig,
    ) -> Self {
        let key_pairs = config
            .get("key_pairs")
            .map(|names| {
                names
                    .split(',')
                    .filter(|n| !n.is_empty())
                    .map(KeyPair::new)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            cloud_type,
            implementation,
            config: config.clone(),
            security: FakeSecurity { key_pairs },
        }
    }

    /// Fails like a real provider when credentials are missing
    pub fn strict(
        cloud_type: &'static str,
        implementation: &'static str,
        config: &ProviderConfig,
    ) -> Result<Self> {
        config.access_key()?;
        config.secret_key()?;
        Ok(Self::new(cloud_type, implementation, config))
    }
}

impl CloudProvider for FakeProvider {
    fn cloud_type(&self) -> &str {
        self.cloud_type
    }

    fn display_name(&self) -> &str {
        self.implementation
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn security(&self) -> &dyn SecurityManager {
        &self.security
    }
}

struct FakeSecurity {
    key_pairs: Vec<KeyPair>,
}

#[async_trait]
impl SecurityManager for FakeSecurity {
    async fn list_key_pairs(&self) -> Result<Vec<KeyPair>> {
        Ok(self.key_pairs.clone())
    }
}

/// `ProviderClass` whose instances are [`FakeProvider`]s
macro_rules! fake_class {
    ($identifier:literal, $cloud_type:literal) => {
        $crate::loader::ProviderClass::new($identifier, $cloud_type, |config| {
            Ok(Box::new($crate::testing::FakeProvider::new(
                $cloud_type,
                $identifier,
                config,
            )))
        })
    };
}

/// Like [`fake_class!`] but requires credentials
macro_rules! strict_fake_class {
    ($identifier:literal, $cloud_type:literal) => {
        $crate::loader::ProviderClass::new($identifier, $cloud_type, |config| {
            Ok(Box::new($crate::testing::FakeProvider::strict(
                $cloud_type,
                $identifier,
                config,
            )?))
        })
    };
}

pub(crate) use fake_class;
pub(crate) use strict_fake_class;
