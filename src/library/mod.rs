//! Library domain: authors and their books
//!
//! The storage entities ([`Author`], [`Book`]) are what gets filtered and
//! sorted; the DTOs ([`AuthorDto`], [`BookDto`]) are what callers see and
//! shape. The property mappings in [`mappings`] connect the two.

pub mod entities;
pub mod mappings;
pub mod models;
pub mod repository;
pub mod seed;

pub use entities::{Author, Book};
pub use mappings::build_registry;
pub use models::{AuthorDto, AuthorForCreationDto, BookDto, BookForCreationDto};
pub use repository::LibraryRepository;
pub use seed::seed_data;
