//! Provider registry
//!
//! Static catalog of provider families and their versioned implementations.
//! The registry is pure data: it names implementations by identifier and never
//! touches code. Identifiers are resolved to constructors by
//! [`ImplementationLoader`](crate::ImplementationLoader).

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Well-known provider family names
pub struct ProviderList;

impl ProviderList {
    pub const EC2: &'static str = "ec2";
    pub const OPENSTACK: &'static str = "openstack";
    pub const AZURE: &'static str = "azure";
}

/// Dotted reference to a constructible provider type
///
/// `"cloudbridge_ec2.Ec2CloudProviderV1"` splits at the last `.` into the
/// module (`cloudbridge_ec2`) and the type name (`Ec2CloudProviderV1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImplIdentifier {
    path: String,
    split: usize,
}

impl ImplIdentifier {
    pub fn parse(path: &str) -> Result<Self> {
        let split = path
            .rfind('.')
            .filter(|&i| i > 0 && i + 1 < path.len())
            .ok_or_else(|| {
                CloudError::InvalidRegistry(format!(
                    "malformed implementation identifier '{path}' (expected 'module.TypeName')"
                ))
            })?;

        Ok(Self {
            path: path.to_string(),
            split,
        })
    }

    pub fn module(&self) -> &str {
        &self.path[..self.split]
    }

    pub fn type_name(&self) -> &str {
        &self.path[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl FromStr for ImplIdentifier {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ImplIdentifier {
    type Error = CloudError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ImplIdentifier> for String {
    fn from(value: ImplIdentifier) -> Self {
        value.path
    }
}

impl fmt::Display for ImplIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// One versioned implementation of a provider family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationEntry {
    pub identifier: ImplIdentifier,
    pub version: u32,
}

/// A provider family and its implementations, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub implementations: Vec<ImplementationEntry>,
}

impl ProviderDescriptor {
    /// Entry with exactly this version
    pub fn version(&self, version: u32) -> Option<&ImplementationEntry> {
        self.implementations.iter().find(|i| i.version == version)
    }

    /// Entry that sorts last under `order`
    pub fn latest_by<F>(&self, order: F) -> Option<&ImplementationEntry>
    where
        F: Fn(u32, u32) -> Ordering,
    {
        self.implementations
            .iter()
            .max_by(|a, b| order(a.version, b.version))
    }

    pub fn versions(&self) -> Vec<u32> {
        self.implementations.iter().map(|i| i.version).collect()
    }
}

/// Immutable catalog of provider families
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Build a registry from descriptors, validating the catalog invariants
    ///
    /// Family names must be unique, and versions must be positive and unique
    /// within a family.
    pub fn new(providers: Vec<ProviderDescriptor>) -> Result<Self> {
        let mut names = HashSet::new();
        for provider in &providers {
            if !names.insert(provider.name.as_str()) {
                return Err(CloudError::InvalidRegistry(format!(
                    "provider '{}' is registered more than once",
                    provider.name
                )));
            }

            let mut versions = HashSet::new();
            for entry in &provider.implementations {
                if entry.version == 0 {
                    return Err(CloudError::InvalidRegistry(format!(
                        "{}: version must be positive ({})",
                        provider.name, entry.identifier
                    )));
                }
                if !versions.insert(entry.version) {
                    return Err(CloudError::InvalidRegistry(format!(
                        "{}: version {} is registered more than once",
                        provider.name, entry.version
                    )));
                }
            }
        }

        Ok(Self { providers })
    }

    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// All provider families in registration order
    pub fn list_providers(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    pub fn get(&self, name: &str) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Number of provider families
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Number of implementation entries across all families
    pub fn implementation_count(&self) -> usize {
        self.providers.iter().map(|p| p.implementations.len()).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ProviderDescriptor, &ImplementationEntry)> {
        self.providers
            .iter()
            .flat_map(|p| p.implementations.iter().map(move |i| (p, i)))
    }
}

/// Builder that groups implementations by family in first-seen order
#[derive(Debug, Default)]
pub struct ProviderRegistryBuilder {
    entries: Vec<(String, String, u32)>,
}

impl ProviderRegistryBuilder {
    pub fn implementation(
        mut self,
        name: impl Into<String>,
        identifier: impl Into<String>,
        version: u32,
    ) -> Self {
        self.entries.push((name.into(), identifier.into(), version));
        self
    }

    pub fn build(self) -> Result<ProviderRegistry> {
        let mut providers: Vec<ProviderDescriptor> = Vec::new();

        for (name, identifier, version) in self.entries {
            let entry = ImplementationEntry {
                identifier: ImplIdentifier::parse(&identifier)?,
                version,
            };
            match providers.iter_mut().find(|p| p.name == name) {
                Some(provider) => provider.implementations.push(entry),
                None => providers.push(ProviderDescriptor {
                    name,
                    implementations: vec![entry],
                }),
            }
        }

        ProviderRegistry::new(providers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> ProviderRegistry {
        ProviderRegistry::builder()
            .implementation("openstack", "cloudbridge_openstack.OpenStackCloudProviderV1", 1)
            .implementation("ec2", "cloudbridge_ec2.Ec2CloudProviderV1", 1)
            .implementation("ec2", "cloudbridge_ec2.Ec2CloudProviderV2", 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_identifier_split() {
        let id = ImplIdentifier::parse("pkg.subpkg.TypeName").unwrap();
        assert_eq!(id.module(), "pkg.subpkg");
        assert_eq!(id.type_name(), "TypeName");
        assert_eq!(id.to_string(), "pkg.subpkg.TypeName");
    }

    #[test]
    fn test_identifier_rejects_malformed() {
        for bad in ["", "NoModule", ".Type", "module.", "."] {
            assert!(
                matches!(ImplIdentifier::parse(bad), Err(CloudError::InvalidRegistry(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_identifier_serde_as_string() {
        let id: ImplIdentifier = serde_json::from_str(r#""a.b.C""#).unwrap();
        assert_eq!(id.module(), "a.b");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""a.b.C""#);

        assert!(serde_json::from_str::<ImplIdentifier>(r#""nodot""#).is_err());
    }

    #[test]
    fn test_builder_groups_in_insertion_order() {
        let registry = sample_registry();
        let names: Vec<&str> = registry
            .list_providers()
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        assert_eq!(names, vec!["openstack", "ec2"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.implementation_count(), 3);
        assert_eq!(registry.get("ec2").unwrap().versions(), vec![1, 2]);
    }

    #[test]
    fn test_descriptor_lookup() {
        let registry = sample_registry();
        let ec2 = registry.get("ec2").unwrap();

        assert_eq!(
            ec2.version(1).unwrap().identifier.as_str(),
            "cloudbridge_ec2.Ec2CloudProviderV1"
        );
        assert!(ec2.version(3).is_none());
        assert_eq!(ec2.latest_by(|a, b| a.cmp(&b)).unwrap().version, 2);
        assert_eq!(ec2.latest_by(|a, b| b.cmp(&a)).unwrap().version, 1);
        assert!(registry.get("azure").is_none());
    }

    #[test]
    fn test_duplicate_version_rejected() {
        let result = ProviderRegistry::builder()
            .implementation("ec2", "a.V1", 1)
            .implementation("ec2", "a.V1Again", 1)
            .build();

        assert!(matches!(result, Err(CloudError::InvalidRegistry(msg)) if msg.contains("version 1")));
    }

    #[test]
    fn test_zero_version_rejected() {
        let result = ProviderRegistry::builder()
            .implementation("ec2", "a.V0", 0)
            .build();
        assert!(matches!(result, Err(CloudError::InvalidRegistry(_))));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let entry = |id: &str| ImplementationEntry {
            identifier: ImplIdentifier::parse(id).unwrap(),
            version: 1,
        };
        let result = ProviderRegistry::new(vec![
            ProviderDescriptor {
                name: "ec2".to_string(),
                implementations: vec![entry("a.V1")],
            },
            ProviderDescriptor {
                name: "ec2".to_string(),
                implementations: vec![entry("b.V1")],
            },
        ]);

        assert!(matches!(result, Err(CloudError::InvalidRegistry(msg)) if msg.contains("ec2")));
    }

    #[test]
    fn test_entries_iterates_every_implementation() {
        let registry = sample_registry();
        let pairs: Vec<(&str, u32)> = registry
            .entries()
            .map(|(p, i)| (p.name.as_str(), i.version))
            .collect();

        assert_eq!(pairs, vec![("openstack", 1), ("ec2", 1), ("ec2", 2)]);
    }
}
