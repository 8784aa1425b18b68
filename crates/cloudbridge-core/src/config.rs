//! Provider configuration
//!
//! A single struct carries the connection settings for every provider family.
//! Providers read what they need and resolve defaults once, when constructed.
//! The factory passes it through untouched.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Region used when a configuration does not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings handed to a provider constructor
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Access key / user name (required by every provider)
    pub access_key: Option<String>,

    /// Secret key / password (required by every provider)
    pub secret_key: Option<String>,

    /// Region name (default: "us-east-1")
    pub region_name: Option<String>,

    /// API endpoint host (default is provider-specific)
    pub region_endpoint: Option<String>,

    /// Use TLS for the API connection (default: true)
    pub is_secure: Option<bool>,

    /// API port, when not the scheme default
    pub port: Option<u16>,

    /// API path prefix (default is provider-specific)
    pub conn_path: Option<String>,

    /// Additional provider-specific settings
    #[serde(flatten)]
    pub extra: HashMap<String, ExtraValue>,
}

/// Provider-specific setting value
///
/// Scalars of any type are kept in their textual form, so `project_name: 1234`
/// reads as `"1234"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExtraValue(String);

impl ExtraValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ExtraValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl serde::de::Visitor<'_> for ScalarVisitor {
            type Value = ExtraValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<ExtraValue, E> {
                Ok(ExtraValue(v.to_string()))
            }

            fn visit_string<E: serde::de::Error>(
                self,
                v: String,
            ) -> std::result::Result<ExtraValue, E> {
                Ok(ExtraValue(v))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> std::result::Result<ExtraValue, E> {
                Ok(ExtraValue(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<ExtraValue, E> {
                Ok(ExtraValue(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<ExtraValue, E> {
                Ok(ExtraValue(v.to_string()))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<ExtraValue, E> {
                Ok(ExtraValue(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access and secret key
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_region(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = Some(region_name.into());
        self
    }

    pub fn with_endpoint(mut self, region_endpoint: impl Into<String>) -> Self {
        self.region_endpoint = Some(region_endpoint.into());
        self
    }

    pub fn with_secure(mut self, is_secure: bool) -> Self {
        self.is_secure = Some(is_secure);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_conn_path(mut self, conn_path: impl Into<String>) -> Self {
        self.conn_path = Some(conn_path.into());
        self
    }

    /// Add a provider-specific setting
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), ExtraValue(value.into()));
        self
    }

    /// Access key, failing if it is not configured
    pub fn access_key(&self) -> Result<&str> {
        required("access_key", self.access_key.as_deref())
    }

    /// Secret key, failing if it is not configured
    pub fn secret_key(&self) -> Result<&str> {
        required("secret_key", self.secret_key.as_deref())
    }

    pub fn region_name(&self) -> &str {
        self.region_name.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub fn is_secure(&self) -> bool {
        self.is_secure.unwrap_or(true)
    }

    pub fn region_endpoint_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.region_endpoint.as_deref().unwrap_or(default)
    }

    pub fn conn_path_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.conn_path.as_deref().unwrap_or(default)
    }

    /// Look up a provider-specific setting
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(ExtraValue::as_str)
    }

    /// Provider-specific keys outside `known`, sorted
    pub fn unknown_extras(&self, known: &[&str]) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .extra
            .keys()
            .map(String::as_str)
            .filter(|k| !known.contains(k))
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Log a warning for every provider-specific key the provider does not read
    ///
    /// A misspelled field such as `regoin_name` lands in `extra`, so it shows
    /// up here instead of being silently ignored.
    pub fn warn_unknown_extras(&self, provider: &str, known: &[&str]) {
        for key in self.unknown_extras(known) {
            tracing::warn!(provider, key, "Ignoring unknown provider setting");
        }
    }

    /// Look up a provider-specific setting with a fallback
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Look up a provider-specific setting, failing if it is absent
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| CloudError::InvalidConfig(format!("'{key}' is required")))
    }
}

/// Join scheme, host, optional port and path prefix into a service URL
///
/// The path gets a leading `/` when it lacks one and loses any trailing `/`.
pub fn service_url(is_secure: bool, host: &str, port: Option<u16>, path: &str) -> String {
    let scheme = if is_secure { "https" } else { "http" };
    let port = port.map(|p| format!(":{p}")).unwrap_or_default();
    let path = path.trim().trim_end_matches('/');
    let path = if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    format!("{scheme}://{}{port}{path}", host.trim())
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CloudError::InvalidConfig(format!("'{field}' is required"))),
    }
}

// secret_key is never printed
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("region_name", &self.region_name)
            .field("region_endpoint", &self.region_endpoint)
            .field("is_secure", &self.is_secure)
            .field("port", &self.port)
            .field("conn_path", &self.conn_path)
            .field("extra", &self.extra)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::new();

        assert_eq!(config.region_name(), "us-east-1");
        assert!(config.is_secure());
        assert_eq!(
            config.region_endpoint_or("ec2.us-east-1.amazonaws.com"),
            "ec2.us-east-1.amazonaws.com"
        );
        assert_eq!(config.conn_path_or("/"), "/");
        assert_eq!(config.port, None);
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ProviderConfig::new()
            .with_credentials("AKIA", "secret")
            .with_region("eu-west-1")
            .with_endpoint("ec2.eu-west-1.amazonaws.com")
            .with_secure(false)
            .with_port(8773)
            .with_conn_path("/services/Cloud")
            .with_extra("project_name", "demo");

        assert_eq!(config.access_key().unwrap(), "AKIA");
        assert_eq!(config.secret_key().unwrap(), "secret");
        assert_eq!(config.region_name(), "eu-west-1");
        assert!(!config.is_secure());
        assert_eq!(config.region_endpoint_or("x"), "ec2.eu-west-1.amazonaws.com");
        assert_eq!(config.port, Some(8773));
        assert_eq!(config.conn_path_or("/"), "/services/Cloud");
        assert_eq!(config.get("project_name"), Some("demo"));
    }

    #[test]
    fn test_required_fields() {
        let config = ProviderConfig::new();
        assert!(matches!(
            config.access_key(),
            Err(CloudError::InvalidConfig(msg)) if msg.contains("access_key")
        ));
        assert!(matches!(
            config.secret_key(),
            Err(CloudError::InvalidConfig(msg)) if msg.contains("secret_key")
        ));

        // empty strings count as missing
        let config = ProviderConfig {
            access_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.access_key().is_err());
    }

    #[test]
    fn test_extra_lookup() {
        let config = ProviderConfig::new().with_extra("domain_name", "corp");

        assert_eq!(config.get_or("domain_name", "Default"), "corp");
        assert_eq!(config.get_or("project_name", "admin"), "admin");
        assert_eq!(config.require("domain_name").unwrap(), "corp");
        assert!(config.require("project_name").is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = ProviderConfig::new().with_credentials("AKIA", "very-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("AKIA"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_deserialize_with_extra() {
        let json = r#"{
            "access_key": "user",
            "secret_key": "pass",
            "port": 5000,
            "project_name": "demo"
        }"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.access_key().unwrap(), "user");
        assert_eq!(config.port, Some(5000));
        assert_eq!(config.get("project_name"), Some("demo"));
        assert_eq!(config.region_name(), DEFAULT_REGION);
    }

    #[test]
    fn test_extra_accepts_non_string_scalars() {
        let json = r#"{"project_name": 1234, "verify": false, "ratio": 0.5, "domain_name": "corp"}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.get("project_name"), Some("1234"));
        assert_eq!(config.get("verify"), Some("false"));
        assert_eq!(config.get("ratio"), Some("0.5"));
        assert_eq!(config.get("domain_name"), Some("corp"));

        let nested = r#"{"project_name": {"id": 1}}"#;
        assert!(serde_json::from_str::<ProviderConfig>(nested).is_err());
    }

    #[test]
    fn test_unknown_extras() {
        let json = r#"{"regoin_name": "eu-west-1", "project_name": "demo", "cli_path": "/bin/os"}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();

        // a misspelled field never reaches region_name
        assert_eq!(config.region_name(), DEFAULT_REGION);
        assert_eq!(
            config.unknown_extras(&["project_name", "cli_path"]),
            vec!["regoin_name"]
        );
        assert_eq!(
            config.unknown_extras(&[]),
            vec!["cli_path", "project_name", "regoin_name"]
        );
    }

    #[test]
    fn test_service_url() {
        assert_eq!(
            service_url(true, "keystone.example.org", None, "v3"),
            "https://keystone.example.org/v3"
        );
        assert_eq!(
            service_url(false, "keystone.example.org", Some(5000), "/v3/"),
            "http://keystone.example.org:5000/v3"
        );
        assert_eq!(
            service_url(true, "ec2.us-east-1.amazonaws.com", None, "/"),
            "https://ec2.us-east-1.amazonaws.com"
        );
        assert_eq!(service_url(true, "host", Some(8773), ""), "https://host:8773");
    }
}
