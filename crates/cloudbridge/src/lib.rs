//! CloudBridge
//!
//! Uniform access to cloud providers. Callers pick a provider by name and
//! optional interface version; the factory resolves it against the built-in
//! catalog and returns a ready [`CloudProvider`].
//!
//! ```no_run
//! use cloudbridge::{ProviderConfig, default_factory};
//!
//! # fn main() -> cloudbridge::Result<()> {
//! let factory = default_factory()?;
//! let config = ProviderConfig::new().with_credentials("AKIA...", "secret");
//! let provider = factory.create_provider("ec2", &config, None)?;
//! println!("{}", provider.display_name());
//! # Ok(())
//! # }
//! ```

// Provider crates register through inventory and must be linked
#[cfg(feature = "ec2")]
extern crate cloudbridge_ec2;
#[cfg(feature = "openstack")]
extern crate cloudbridge_openstack;

pub mod catalog;

pub use catalog::{EC2_V1, OPENSTACK_V1, default_factory, default_loader, default_registry};
pub use cloudbridge_core::{
    CloudError, CloudProvider, CloudProviderFactory, ImplIdentifier, ImplementationLoader, KeyPair,
    ProviderClass, ProviderConfig, ProviderDescriptor, ProviderList, ProviderRegistry, Result,
    SecurityManager,
};
