//! HTTP surface for the library API
//!
//! [`ServerBuilder`] wires storage, property mappings and paging config into
//! an [`AppState`] and produces an Axum router (or serves it directly).

pub mod builder;
pub mod handlers;
pub mod links;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AUTHORS_PATH, AppState, X_PAGINATION};
pub use links::{ResourceUriType, pagination_metadata, resource_uri};
pub use router::build_router;
