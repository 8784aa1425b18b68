//! EC2 provider implementation

use crate::error::{Ec2Error, Result};
use async_trait::async_trait;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use cloudbridge_core::{
    CloudProvider, KeyPair, ProviderClass, ProviderConfig, SecurityManager, service_url,
};

/// Registry identifier of [`Ec2CloudProviderV1`]
pub const IDENTIFIER: &str = "cloudbridge_ec2.Ec2CloudProviderV1";

/// Constructible class registered with the implementation loader
pub const PROVIDER_CLASS: ProviderClass = ProviderClass::new(IDENTIFIER, "ec2", |config| {
    Ok(Box::new(Ec2CloudProviderV1::new(config)?))
});

inventory::submit! { PROVIDER_CLASS }

const DEFAULT_ENDPOINT: &str = "ec2.us-east-1.amazonaws.com";
const DEFAULT_CONN_PATH: &str = "/";
const CREDENTIALS_PROVIDER_NAME: &str = "cloudbridge";

/// EC2 error codes that mean the credentials were rejected
const AUTH_ERROR_CODES: &[&str] = &["AuthFailure", "UnauthorizedOperation", "InvalidClientTokenId"];

/// Connection settings with every default resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ec2Settings {
    pub region_name: String,
    pub region_endpoint: String,
    pub is_secure: bool,
    pub port: Option<u16>,
    pub conn_path: String,
}

impl Ec2Settings {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            region_name: config.region_name().to_string(),
            region_endpoint: config.region_endpoint_or(DEFAULT_ENDPOINT).to_string(),
            is_secure: config.is_secure(),
            port: config.port,
            conn_path: config.conn_path_or(DEFAULT_CONN_PATH).to_string(),
        }
    }

    /// Full endpoint URL, e.g. `https://ec2.us-east-1.amazonaws.com`
    pub fn endpoint_url(&self) -> Result<String> {
        let host = self.region_endpoint.trim();
        if host.is_empty() || host.contains("://") {
            return Err(Ec2Error::InvalidEndpoint(format!(
                "region_endpoint must be a bare host name, got '{}'",
                self.region_endpoint
            )));
        }

        Ok(service_url(self.is_secure, host, self.port, &self.conn_path))
    }
}

/// EC2-compatible cloud provider (interface version 1)
pub struct Ec2CloudProviderV1 {
    config: ProviderConfig,
    settings: Ec2Settings,
    security: Ec2SecurityManager,
}

impl Ec2CloudProviderV1 {
    /// Build a provider from its configuration
    ///
    /// `access_key` and `secret_key` are required. No request is sent until a
    /// capability is used.
    pub fn new(config: &ProviderConfig) -> cloudbridge_core::Result<Self> {
        let access_key = config.access_key()?;
        let secret_key = config.secret_key()?;
        config.warn_unknown_extras("ec2", &[]);
        let settings = Ec2Settings::from_config(config);
        let endpoint_url = settings.endpoint_url()?;

        tracing::info!(
            region = %settings.region_name,
            endpoint = %endpoint_url,
            "Connecting to EC2"
        );

        let credentials = Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );
        let sdk_config = aws_sdk_ec2::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region_name.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint_url)
            .build();

        Ok(Self {
            config: config.clone(),
            settings,
            security: Ec2SecurityManager {
                client: Client::from_conf(sdk_config),
            },
        })
    }

    pub fn settings(&self) -> &Ec2Settings {
        &self.settings
    }
}

impl CloudProvider for Ec2CloudProviderV1 {
    fn cloud_type(&self) -> &str {
        "ec2"
    }

    fn display_name(&self) -> &str {
        "Amazon EC2"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn security(&self) -> &dyn SecurityManager {
        &self.security
    }
}

/// Key pair management through the EC2 API
pub struct Ec2SecurityManager {
    client: Client,
}

impl Ec2SecurityManager {
    async fn describe_key_pairs(&self) -> Result<Vec<KeyPair>> {
        let output = self.client.describe_key_pairs().send().await.map_err(|e| {
            let code = e.as_service_error().and_then(|se| se.code());
            let message = DisplayErrorContext(&e).to_string();
            match code {
                Some(code) if AUTH_ERROR_CODES.contains(&code) => {
                    Ec2Error::AuthenticationFailed(message)
                }
                _ => Ec2Error::Api(message),
            }
        })?;

        let key_pairs = output
            .key_pairs()
            .iter()
            .filter_map(|kp| {
                let name = kp.key_name()?;
                let key_pair = KeyPair::new(name);
                Some(match kp.key_fingerprint() {
                    Some(fp) => key_pair.with_fingerprint(fp),
                    None => key_pair,
                })
            })
            .collect();

        Ok(key_pairs)
    }
}

#[async_trait]
impl SecurityManager for Ec2SecurityManager {
    async fn list_key_pairs(&self) -> cloudbridge_core::Result<Vec<KeyPair>> {
        tracing::debug!("Listing EC2 key pairs");
        Ok(self.describe_key_pairs().await?)
    }
}
