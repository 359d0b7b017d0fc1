//! Core building blocks: resources, property mappings, sorting, paging and
//! data shaping

pub mod error;
pub mod field;
pub mod mapping;
pub mod paged;
pub mod query;
pub mod resource;
pub mod service;
pub mod shaping;
pub mod sort;
pub mod type_helper;

pub use error::{
    ConfigError, EntityError, ShapingError, ShapingResult, StorageError, ValidationError,
};
pub use field::FieldValue;
pub use mapping::{MappingKey, PropertyMapping, PropertyMappingRegistry, PropertyMappingValue};
pub use paged::PagedList;
pub use query::{PaginationMetadata, ResourceParameters};
pub use resource::Resource;
pub use service::DataService;
pub use shaping::{ShapedRecord, shape_collection, shape_data};
pub use sort::{SortClause, SortDirection, SortTerm, apply_sort};
pub use type_helper::{fields_exist, type_has_properties};
