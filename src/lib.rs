//! # Shaping-RS
//!
//! Property mapping, sorting, paging and data shaping for collection APIs.
//!
//! ## Features
//!
//! - **Property Mappings**: Public sort names translate to storage fields, with optional direction inversion
//! - **Dynamic Sorting**: `orderBy` clauses like `"genre, name desc"` applied as stable multi-key sorts
//! - **Paging**: Page slices with total counts and navigation links
//! - **Data Shaping**: Field projection (`"id,name"`) into ordered JSON records
//! - **Configuration-Based**: Extra mappings and paging limits via YAML
//! - **Library API**: An authors/books REST service built on the above
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shaping::prelude::*;
//!
//! #[derive(Clone)]
//! struct Author {
//!     id: Uuid,
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! impl_resource!(Author, "author", {
//!     "id" => id,
//!     "firstName" => first_name,
//!     "lastName" => last_name,
//! });
//!
//! let mapping = PropertyMapping::from_entries([
//!     ("id", PropertyMappingValue::new(["id"])),
//!     ("name", PropertyMappingValue::new(["firstName", "lastName"])),
//! ])?;
//!
//! let sorted = apply_sort(authors, Some("name desc"), &mapping)?;
//! let page = PagedList::create(sorted, 1, 10);
//! let shaped = shape_collection(page.items(), Some("id,firstName"))?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod library;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{DataService, Resource};

    // === Mapping / Sorting / Paging / Shaping ===
    pub use crate::core::{
        FieldValue, MappingKey, PagedList, PaginationMetadata, PropertyMapping,
        PropertyMappingRegistry, PropertyMappingValue, ResourceParameters, ShapedRecord,
        SortClause, SortDirection, apply_sort, fields_exist, shape_collection, shape_data,
        type_has_properties,
    };

    // === Errors ===
    pub use crate::core::{
        ConfigError, EntityError, ShapingError, ShapingResult, StorageError, ValidationError,
    };

    // === Macros ===
    pub use crate::impl_resource;

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{AppConfig, MappingConfig, PagingConfig, PropertyConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
