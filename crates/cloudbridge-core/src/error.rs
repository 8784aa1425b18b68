//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    /// No registry entry matches the requested family/version.
    #[error("Provider not found: {name}{}", version_suffix(.version))]
    ProviderNotFound { name: String, version: Option<u32> },

    /// The registry names an implementation that could not be resolved to code.
    #[error("Failed to load provider implementation {identifier}: {reason}")]
    ImplementationLoad { identifier: String, reason: String },

    #[error("Invalid provider registry: {0}")]
    InvalidRegistry(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    pub fn provider_not_found(name: impl Into<String>, version: Option<u32>) -> Self {
        Self::ProviderNotFound {
            name: name.into(),
            version,
        }
    }

    pub fn implementation_load(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImplementationLoad {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

fn version_suffix(version: &Option<u32>) -> String {
    version
        .map(|v| format!(" (version {v})"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, CloudError>;
