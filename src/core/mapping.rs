//! Property mapping registry
//!
//! A property mapping translates the public field names a caller may use in
//! `orderBy` into the storage fields the sort actually runs over. One public
//! name may expand into several storage fields (`name` -> `firstName`,
//! `lastName`), and an entry can invert the caller's direction (`age`
//! ascending means `dateOfBirth` descending).
//!
//! The registry is built once at startup and then shared read-only, typically
//! behind an `Arc`.

use crate::config::MappingConfig;
use crate::core::error::{ConfigError, ShapingError};
use crate::core::resource::Resource;
use crate::core::sort::SortClause;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage side of one mapping entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMappingValue {
    /// Storage fields, in sort-key order
    pub destination_properties: Vec<String>,

    /// Invert the requested direction for these storage fields
    #[serde(default)]
    pub revert: bool,
}

impl PropertyMappingValue {
    pub fn new<I, S>(destination_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            destination_properties: destination_properties.into_iter().map(Into::into).collect(),
            revert: false,
        }
    }

    /// Same as [`new`](Self::new) with the revert flag set
    pub fn reverted<I, S>(destination_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            revert: true,
            ..Self::new(destination_properties)
        }
    }
}

#[derive(Debug, Clone)]
struct MappingEntry {
    name: String,
    value: PropertyMappingValue,
}

/// Case-insensitive dictionary from public name to [`PropertyMappingValue`]
#[derive(Debug, Clone, Default)]
pub struct PropertyMapping {
    // keyed by lowercase public name, declaration order preserved
    entries: IndexMap<String, MappingEntry>,
}

impl PropertyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(public name, value)` pairs
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, PropertyMappingValue)>,
        S: Into<String>,
    {
        let mut mapping = Self::new();
        for (name, value) in entries {
            mapping.insert(name, value)?;
        }
        Ok(mapping)
    }

    /// Add an entry
    ///
    /// Fails when the value has no storage field or when the public name is
    /// already present (case-insensitive).
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: PropertyMappingValue,
    ) -> Result<(), ConfigError> {
        let name = name.into().trim().to_string();
        if value.destination_properties.is_empty()
            || value.destination_properties.iter().any(|p| p.trim().is_empty())
        {
            return Err(ConfigError::EmptyMapping { name });
        }
        let key = name.to_lowercase();
        if self.entries.contains_key(&key) {
            return Err(ConfigError::DuplicateProperty { name });
        }
        self.entries.insert(key, MappingEntry { name, value });
        Ok(())
    }

    /// Look up a public name, ignoring case and surrounding whitespace
    pub fn get(&self, name: &str) -> Option<&PropertyMappingValue> {
        self.entries
            .get(&name.trim().to_lowercase())
            .map(|entry| &entry.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Public names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check an `orderBy` clause against this mapping
    ///
    /// Returns `true` when the clause is empty, or when every token (trimmed,
    /// without its optional `asc`/`desc` suffix) is a mapped public name.
    pub fn valid_mapping_exists_for(&self, order_by: Option<&str>) -> bool {
        match SortClause::parse(order_by) {
            Ok(clause) => clause.terms().iter().all(|term| self.contains(&term.field)),
            Err(_) => false,
        }
    }

    /// Check that every storage field exists on the destination resource `D`
    pub fn check_destination<D: Resource>(&self) -> Result<(), ConfigError> {
        for entry in self.entries.values() {
            for property in &entry.value.destination_properties {
                if D::resolve_field(property).is_none() {
                    return Err(ConfigError::UnknownStorageField {
                        resource: D::resource_type().to_string(),
                        field: property.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Registry key: public (source) type tag and storage (destination) type tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    pub source: String,
    pub destination: String,
}

impl MappingKey {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Key for two resource types, using their type tags
    pub fn of<S: Resource, D: Resource>() -> Self {
        Self::new(S::resource_type(), D::resource_type())
    }
}

/// Registry of all property mappings of the application
#[derive(Debug, Clone, Default)]
pub struct PropertyMappingRegistry {
    mappings: HashMap<MappingKey, PropertyMapping>,
}

impl PropertyMappingRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Build a registry from the `mappings:` section of the configuration
    pub fn from_config(configs: &[MappingConfig]) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for config in configs {
            let mapping = PropertyMapping::from_entries(config.properties.iter().map(|p| {
                let value = PropertyMappingValue {
                    destination_properties: p.storage.clone(),
                    revert: p.revert,
                };
                (p.name.clone(), value)
            }))?;
            registry.register(
                MappingKey::new(config.source.clone(), config.destination.clone()),
                mapping,
            )?;
        }
        Ok(registry)
    }

    /// Register a mapping for a type pair
    ///
    /// Registering the same pair twice is a configuration error.
    pub fn register(&mut self, key: MappingKey, mapping: PropertyMapping) -> Result<(), ConfigError> {
        if self.mappings.contains_key(&key) {
            return Err(ConfigError::DuplicateMapping {
                source: key.source,
                destination: key.destination,
            });
        }
        tracing::debug!(
            source = %key.source,
            destination = %key.destination,
            properties = mapping.len(),
            "registered property mapping"
        );
        self.mappings.insert(key, mapping);
        Ok(())
    }

    /// Register a mapping between two resource types
    ///
    /// The storage fields are checked against `D` so that a typo fails at
    /// startup rather than on the first sorted request.
    pub fn register_for<S: Resource, D: Resource>(
        &mut self,
        mapping: PropertyMapping,
    ) -> Result<(), ConfigError> {
        mapping.check_destination::<D>()?;
        self.register(MappingKey::of::<S, D>(), mapping)
    }

    /// Get the mapping for a type pair
    pub fn get_mapping(&self, key: &MappingKey) -> Result<&PropertyMapping, ConfigError> {
        self.mappings
            .get(key)
            .ok_or_else(|| ConfigError::MissingMapping {
                source: key.source.clone(),
                destination: key.destination.clone(),
            })
    }

    /// Get the mapping between two resource types
    pub fn mapping_for<S: Resource, D: Resource>(&self) -> Result<&PropertyMapping, ShapingError> {
        Ok(self.get_mapping(&MappingKey::of::<S, D>())?)
    }

    /// Check an `orderBy` clause against the mapping of `S -> D`
    ///
    /// A missing mapping is a configuration error, never `false`.
    pub fn valid_mapping_exists_for<S: Resource, D: Resource>(
        &self,
        order_by: Option<&str>,
    ) -> Result<bool, ShapingError> {
        Ok(self.mapping_for::<S, D>()?.valid_mapping_exists_for(order_by))
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertyConfig;

    fn author_mapping() -> PropertyMapping {
        PropertyMapping::from_entries([
            ("Id", PropertyMappingValue::new(["id"])),
            ("Genre", PropertyMappingValue::new(["genre"])),
            ("Age", PropertyMappingValue::reverted(["dateOfBirth"])),
            ("Name", PropertyMappingValue::new(["firstName", "lastName"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mapping = author_mapping();
        assert!(mapping.contains("name"));
        assert!(mapping.contains("NAME"));
        assert!(mapping.contains(" Genre "));
        assert!(!mapping.contains("nickname"));
        assert!(mapping.get("age").unwrap().revert);
    }

    #[test]
    fn test_names_keep_declaration_order() {
        let mapping = author_mapping();
        let names: Vec<&str> = mapping.names().collect();
        assert_eq!(names, vec!["Id", "Genre", "Age", "Name"]);
    }

    #[test]
    fn test_empty_entry_is_rejected() {
        let err = PropertyMapping::from_entries([("name", PropertyMappingValue::new(Vec::<String>::new()))])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyMapping {
                name: "name".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_property_is_rejected() {
        let err = PropertyMapping::from_entries([
            ("name", PropertyMappingValue::new(["firstName"])),
            ("NAME", PropertyMappingValue::new(["lastName"])),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateProperty { .. }));
    }

    #[test]
    fn test_valid_mapping_exists_for() {
        let mapping = author_mapping();
        assert!(mapping.valid_mapping_exists_for(None));
        assert!(mapping.valid_mapping_exists_for(Some("")));
        assert!(mapping.valid_mapping_exists_for(Some("   ")));
        assert!(mapping.valid_mapping_exists_for(Some("name")));
        assert!(mapping.valid_mapping_exists_for(Some("name desc")));
        assert!(mapping.valid_mapping_exists_for(Some("NAME DESC, age ASC")));
        assert!(mapping.valid_mapping_exists_for(Some(" genre ,id desc ")));
        assert!(!mapping.valid_mapping_exists_for(Some("nickname")));
        assert!(!mapping.valid_mapping_exists_for(Some("name, nickname desc")));
        assert!(!mapping.valid_mapping_exists_for(Some("name sideways")));
        // storage names are not public names
        assert!(!mapping.valid_mapping_exists_for(Some("firstName")));
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = PropertyMappingRegistry::new();
        registry
            .register(MappingKey::new("author_dto", "author"), author_mapping())
            .unwrap();

        let mapping = registry
            .get_mapping(&MappingKey::new("author_dto", "author"))
            .unwrap();
        assert_eq!(mapping.len(), 4);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_pair_is_config_error() {
        let registry = PropertyMappingRegistry::new();
        let err = registry
            .get_mapping(&MappingKey::new("book_dto", "book"))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingMapping {
                source: "book_dto".to_string(),
                destination: "book".to_string()
            }
        );
    }

    #[test]
    fn test_overwriting_pair_is_config_error() {
        let mut registry = PropertyMappingRegistry::new();
        let key = MappingKey::new("author_dto", "author");
        registry.register(key.clone(), author_mapping()).unwrap();
        let err = registry.register(key, PropertyMapping::new()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateMapping { .. }));
        // the first registration is untouched
        assert_eq!(
            registry
                .get_mapping(&MappingKey::new("author_dto", "author"))
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn test_from_config() {
        let configs = vec![MappingConfig {
            source: "author_dto".to_string(),
            destination: "author".to_string(),
            properties: vec![
                PropertyConfig {
                    name: "name".to_string(),
                    storage: vec!["firstName".to_string(), "lastName".to_string()],
                    revert: false,
                },
                PropertyConfig {
                    name: "age".to_string(),
                    storage: vec!["dateOfBirth".to_string()],
                    revert: true,
                },
            ],
        }];

        let registry = PropertyMappingRegistry::from_config(&configs).unwrap();
        let mapping = registry
            .get_mapping(&MappingKey::new("author_dto", "author"))
            .unwrap();
        assert_eq!(
            mapping.get("name").unwrap().destination_properties,
            vec!["firstName", "lastName"]
        );
        assert!(mapping.get("age").unwrap().revert);
    }
}
