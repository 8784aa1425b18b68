//! Default provider catalog
//!
//! The registry lists every provider family CloudBridge ships, independent
//! of which provider crates are compiled in. The loader is collected from the
//! classes linked provider crates submit, so a provider disabled through its
//! cargo feature shows up as an implementation load error rather than a
//! missing provider.

use cloudbridge_core::{
    CloudError, CloudProviderFactory, ImplementationLoader, ProviderList, ProviderRegistry, Result,
};
use std::sync::{Arc, LazyLock};

/// Identifier of the OpenStack interface v1 implementation
pub const OPENSTACK_V1: &str = "cloudbridge_openstack.OpenStackCloudProviderV1";

/// Identifier of the EC2 interface v1 implementation
pub const EC2_V1: &str = "cloudbridge_ec2.Ec2CloudProviderV1";

struct Catalog {
    registry: Arc<ProviderRegistry>,
    loader: Arc<ImplementationLoader>,
}

// Built once on first access; read-only afterwards.
static CATALOG: LazyLock<std::result::Result<Catalog, String>> = LazyLock::new(|| {
    let registry = build_registry().map_err(|e| e.to_string())?;
    let loader = ImplementationLoader::from_linked().map_err(|e| e.to_string())?;
    tracing::debug!(
        providers = registry.len(),
        implementations = loader.len(),
        "Provider catalog initialised"
    );
    Ok(Catalog {
        registry: Arc::new(registry),
        loader: Arc::new(loader),
    })
});

fn build_registry() -> Result<ProviderRegistry> {
    ProviderRegistry::builder()
        .implementation(ProviderList::OPENSTACK, OPENSTACK_V1, 1)
        .implementation(ProviderList::EC2, EC2_V1, 1)
        .build()
}

fn catalog() -> Result<&'static Catalog> {
    CATALOG
        .as_ref()
        .map_err(|e| CloudError::InvalidRegistry(e.clone()))
}

/// The built-in provider registry
pub fn default_registry() -> Result<Arc<ProviderRegistry>> {
    Ok(catalog()?.registry.clone())
}

/// Implementations compiled into this build
pub fn default_loader() -> Result<Arc<ImplementationLoader>> {
    Ok(catalog()?.loader.clone())
}

/// Factory over the built-in registry and loader
pub fn default_factory() -> Result<CloudProviderFactory> {
    let catalog = catalog()?;
    Ok(CloudProviderFactory::new(
        catalog.registry.clone(),
        catalog.loader.clone(),
    ))
}
