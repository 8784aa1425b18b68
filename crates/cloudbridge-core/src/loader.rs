//! Implementation loader
//!
//! Maps implementation identifiers to constructor functions. Provider crates
//! submit a [`ProviderClass`] for each implementation they ship with
//! `inventory::submit!`; [`ImplementationLoader::from_linked`] collects every
//! class linked into the binary. The table is read-only afterwards.
//!
//! ```ignore
//! inventory::submit! { PROVIDER_CLASS }
//!
//! let loader = ImplementationLoader::from_linked()?;
//!
//! let class = loader.load("cloudbridge_ec2.Ec2CloudProviderV1")?;
//! let provider = class.instantiate(&config)?;
//! ```

use crate::config::ProviderConfig;
use crate::error::{CloudError, Result};
use crate::provider::CloudProvider;
use crate::registry::ImplIdentifier;
use std::collections::BTreeMap;

/// Constructor signature every provider implementation exposes
pub type ProviderConstructor = fn(&ProviderConfig) -> Result<Box<dyn CloudProvider>>;

/// A loaded, constructible provider type
///
/// Provider crates declare one per implementation as a constant.
#[derive(Clone, Copy)]
pub struct ProviderClass {
    identifier: &'static str,
    cloud_type: &'static str,
    constructor: ProviderConstructor,
}

impl ProviderClass {
    pub const fn new(
        identifier: &'static str,
        cloud_type: &'static str,
        constructor: ProviderConstructor,
    ) -> Self {
        Self {
            identifier,
            cloud_type,
            constructor,
        }
    }

    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    /// Provider family this type implements
    pub fn cloud_type(&self) -> &'static str {
        self.cloud_type
    }

    /// Construct a provider instance. Constructor errors are returned as-is.
    pub fn instantiate(&self, config: &ProviderConfig) -> Result<Box<dyn CloudProvider>> {
        (self.constructor)(config)
    }
}

impl std::fmt::Debug for ProviderClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClass")
            .field("identifier", &self.identifier)
            .field("cloud_type", &self.cloud_type)
            .finish_non_exhaustive()
    }
}

// Auto-collection via inventory - provider crates submit classes at compile time
inventory::collect!(ProviderClass);

/// Identifier → constructor table, grouped by module
#[derive(Debug, Default, Clone)]
pub struct ImplementationLoader {
    modules: BTreeMap<String, BTreeMap<String, ProviderClass>>,
}

impl ImplementationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader over every provider class linked into this binary
    ///
    /// A provider crate that is not linked contributes nothing, so its
    /// identifiers fail to load.
    pub fn from_linked() -> Result<Self> {
        let mut loader = Self::new();
        for class in inventory::iter::<ProviderClass>() {
            loader.register(*class)?;
        }
        Ok(loader)
    }

    /// Add a provider class
    ///
    /// Fails if the identifier is malformed or already registered.
    pub fn register(&mut self, class: ProviderClass) -> Result<()> {
        let id = ImplIdentifier::parse(class.identifier)?;
        let module = self.modules.entry(id.module().to_string()).or_default();

        let type_name = id.type_name().to_string();
        if module.contains_key(&type_name) {
            return Err(CloudError::InvalidRegistry(format!(
                "implementation '{}' is registered more than once",
                class.identifier
            )));
        }

        tracing::debug!(identifier = %class.identifier, "Registered provider implementation");
        module.insert(type_name, class);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, class: ProviderClass) -> Result<Self> {
        self.register(class)?;
        Ok(self)
    }

    /// Resolve an identifier to its provider class
    pub fn load(&self, identifier: &str) -> Result<ProviderClass> {
        let id = ImplIdentifier::parse(identifier)
            .map_err(|e| CloudError::implementation_load(identifier, e.to_string()))?;

        let module = self.modules.get(id.module()).ok_or_else(|| {
            let available: Vec<&str> = self.modules.keys().map(String::as_str).collect();
            CloudError::implementation_load(
                identifier,
                format!(
                    "module '{}' is not linked. Available modules: {:?}",
                    id.module(),
                    available
                ),
            )
        })?;

        module.get(id.type_name()).copied().ok_or_else(|| {
            CloudError::implementation_load(
                identifier,
                format!(
                    "module '{}' has no type '{}'",
                    id.module(),
                    id.type_name()
                ),
            )
        })
    }

    pub fn contains(&self, identifier: &str) -> bool {
        ImplIdentifier::parse(identifier).is_ok_and(|id| {
            self.modules
                .get(id.module())
                .is_some_and(|module| module.contains_key(id.type_name()))
        })
    }

    /// Number of registered implementations
    pub fn len(&self) -> usize {
        self.modules.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
