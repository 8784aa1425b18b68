//! OpenStack provider implementation

use crate::cli::{OpenStackAuth, OpenStackCli};
use async_trait::async_trait;
use cloudbridge_core::{
    CloudProvider, KeyPair, ProviderClass, ProviderConfig, SecurityManager, service_url,
};

/// Registry identifier of [`OpenStackCloudProviderV1`]
pub const IDENTIFIER: &str = "cloudbridge_openstack.OpenStackCloudProviderV1";

/// Constructible class registered with the implementation loader
pub const PROVIDER_CLASS: ProviderClass = ProviderClass::new(IDENTIFIER, "openstack", |config| {
    Ok(Box::new(OpenStackCloudProviderV1::new(config)?))
});

inventory::submit! { PROVIDER_CLASS }

const DEFAULT_ENDPOINT: &str = "localhost:5000";
const DEFAULT_CONN_PATH: &str = "/v3";
const DEFAULT_DOMAIN: &str = "Default";
const DEFAULT_PROGRAM: &str = "openstack";

/// Provider-specific keys read from `extra`
const EXTRA_KEYS: &[&str] = &["project_name", "domain_name", "cli_path"];

/// OpenStack cloud provider (interface version 1)
///
/// `access_key` / `secret_key` carry the Keystone user name and password.
/// Provider-specific keys: `project_name`, `domain_name` (default
/// "Default") and `cli_path` (default "openstack"). `region_name` is passed
/// to the client only when configured.
pub struct OpenStackCloudProviderV1 {
    config: ProviderConfig,
    security: OpenStackSecurityManager,
}

impl OpenStackCloudProviderV1 {
    pub fn new(config: &ProviderConfig) -> cloudbridge_core::Result<Self> {
        config.warn_unknown_extras("openstack", EXTRA_KEYS);

        let auth = OpenStackAuth {
            auth_url: auth_url(config),
            username: config.access_key()?.to_string(),
            password: config.secret_key()?.to_string(),
            project_name: config.get("project_name").map(str::to_string),
            domain_name: config.get_or("domain_name", DEFAULT_DOMAIN).to_string(),
            region_name: config.region_name.clone(),
        };

        tracing::info!(
            auth_url = %auth.auth_url,
            region = ?auth.region_name,
            "Configured OpenStack provider"
        );

        let program = config.get_or("cli_path", DEFAULT_PROGRAM);
        Ok(Self {
            config: config.clone(),
            security: OpenStackSecurityManager {
                cli: OpenStackCli::new(program, auth),
            },
        })
    }

    pub fn auth(&self) -> &OpenStackAuth {
        self.security.cli.auth()
    }
}

/// Keystone URL from endpoint, port and path settings
fn auth_url(config: &ProviderConfig) -> String {
    service_url(
        config.is_secure(),
        config.region_endpoint_or(DEFAULT_ENDPOINT),
        config.port,
        config.conn_path_or(DEFAULT_CONN_PATH),
    )
}

impl CloudProvider for OpenStackCloudProviderV1 {
    fn cloud_type(&self) -> &str {
        "openstack"
    }

    fn display_name(&self) -> &str {
        "OpenStack"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn security(&self) -> &dyn SecurityManager {
        &self.security
    }
}

/// Key pair management through the openstack CLI
pub struct OpenStackSecurityManager {
    cli: OpenStackCli,
}

#[async_trait]
impl SecurityManager for OpenStackSecurityManager {
    async fn list_key_pairs(&self) -> cloudbridge_core::Result<Vec<KeyPair>> {
        let keypairs = self.cli.list_keypairs().await?;

        Ok(keypairs
            .into_iter()
            .map(|kp| {
                let key_pair = KeyPair::new(kp.name);
                match kp.fingerprint {
                    Some(fp) => key_pair.with_fingerprint(fp),
                    None => key_pair,
                }
            })
            .collect())
    }
}
