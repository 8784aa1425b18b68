//! EC2 provider for CloudBridge
//!
//! This crate implements the CloudProvider trait for Amazon EC2 and
//! EC2-compatible private clouds, using the AWS SDK.
//!
//! # Configuration
//!
//! | key | required | default |
//! |---|---|---|
//! | `access_key` | yes | |
//! | `secret_key` | yes | |
//! | `region_name` | no | `us-east-1` |
//! | `region_endpoint` | no | `ec2.us-east-1.amazonaws.com` |
//! | `is_secure` | no | `true` |
//! | `port` | no | scheme default |
//! | `conn_path` | no | `/` |
//!
//! # Example
//!
//! ```ignore
//! use cloudbridge_core::{CloudProvider, ProviderConfig};
//! use cloudbridge_ec2::Ec2CloudProviderV1;
//!
//! let config = ProviderConfig::new().with_credentials("AKIA...", "...");
//! let provider = Ec2CloudProviderV1::new(&config)?;
//!
//! for key_pair in provider.security().list_key_pairs().await? {
//!     println!("{}", key_pair.name);
//! }
//! ```

pub mod error;
pub mod provider;

pub use error::{Ec2Error, Result};
pub use provider::{
    Ec2CloudProviderV1, Ec2SecurityManager, Ec2Settings, IDENTIFIER, PROVIDER_CLASS,
};
