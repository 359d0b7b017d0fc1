//! Built-in property mappings of the library resources

use super::entities::{Author, Book};
use super::models::{AuthorDto, BookDto};
use crate::config::MappingConfig;
use crate::core::error::ConfigError;
use crate::core::mapping::{PropertyMapping, PropertyMappingRegistry, PropertyMappingValue};

/// `AuthorDto` public names -> `Author` storage fields
///
/// `age` sorts on the birth date with the direction inverted: the oldest
/// author has the earliest date of birth.
pub fn author_mapping() -> Result<PropertyMapping, ConfigError> {
    PropertyMapping::from_entries([
        ("id", PropertyMappingValue::new(["id"])),
        ("genre", PropertyMappingValue::new(["genre"])),
        ("age", PropertyMappingValue::reverted(["dateOfBirth"])),
        ("name", PropertyMappingValue::new(["firstName", "lastName"])),
    ])
}

/// `BookDto` public names -> `Book` storage fields
pub fn book_mapping() -> Result<PropertyMapping, ConfigError> {
    PropertyMapping::from_entries([
        ("id", PropertyMappingValue::new(["id"])),
        ("title", PropertyMappingValue::new(["title"])),
        ("description", PropertyMappingValue::new(["description"])),
        ("authorId", PropertyMappingValue::new(["authorId"])),
    ])
}

/// Registry with the built-in mappings plus any configured extras
pub fn build_registry(extra: &[MappingConfig]) -> Result<PropertyMappingRegistry, ConfigError> {
    let mut registry = PropertyMappingRegistry::from_config(extra)?;
    registry.register_for::<AuthorDto, Author>(author_mapping()?)?;
    registry.register_for::<BookDto, Book>(book_mapping()?)?;
    Ok(registry)
}
