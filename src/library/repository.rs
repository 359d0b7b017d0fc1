//! Library repository: filtering, sorting and paging over the data services

use super::entities::{Author, Book};
use super::models::{AuthorDto, AuthorForCreationDto};
use crate::core::error::{EntityError, ShapingResult, StorageError};
use crate::core::mapping::PropertyMappingRegistry;
use crate::core::paged::PagedList;
use crate::core::query::ResourceParameters;
use crate::core::service::DataService;
use crate::core::sort::apply_sort;
use std::sync::Arc;
use uuid::Uuid;

/// Repository over author and book storage
#[derive(Clone)]
pub struct LibraryRepository {
    authors: Arc<dyn DataService<Author>>,
    books: Arc<dyn DataService<Book>>,
    registry: Arc<PropertyMappingRegistry>,
}

impl LibraryRepository {
    pub fn new(
        authors: Arc<dyn DataService<Author>>,
        books: Arc<dyn DataService<Book>>,
        registry: Arc<PropertyMappingRegistry>,
    ) -> Self {
        Self {
            authors,
            books,
            registry,
        }
    }

    pub fn registry(&self) -> &PropertyMappingRegistry {
        &self.registry
    }

    /// One page of authors
    ///
    /// Filters run first, so the total reflects the filtered set. The
    /// snapshot returned by storage is sorted, counted and sliced once.
    pub async fn get_authors(
        &self,
        params: &ResourceParameters,
        page_size: usize,
    ) -> ShapingResult<PagedList<Author>> {
        let mapping = self.registry.mapping_for::<AuthorDto, Author>()?;

        let mut candidates = self
            .authors
            .list()
            .await
            .map_err(|e| StorageError::operation("list authors", e))?;

        if let Some(genre) = params.genre() {
            let genre = genre.to_lowercase();
            candidates.retain(|a| a.genre.to_lowercase() == genre);
        }

        if let Some(query) = params.search_query() {
            let query = query.to_lowercase();
            candidates.retain(|a| {
                a.genre.to_lowercase().contains(&query)
                    || a.first_name.to_lowercase().contains(&query)
                    || a.last_name.to_lowercase().contains(&query)
            });
        }

        let sorted = apply_sort(candidates, params.order_by(), mapping)?;

        Ok(PagedList::create(sorted, params.page_number(), page_size))
    }

    pub async fn get_author(&self, author_id: &Uuid) -> ShapingResult<Author> {
        self.authors
            .get(author_id)
            .await
            .map_err(|e| StorageError::operation("get author", e))?
            .ok_or_else(|| {
                EntityError::NotFound {
                    entity_type: "author".to_string(),
                    id: *author_id,
                }
                .into()
            })
    }

    pub async fn author_exists(&self, author_id: &Uuid) -> ShapingResult<bool> {
        Ok(self
            .authors
            .exists(author_id)
            .await
            .map_err(|e| StorageError::operation("check author", e))?)
    }

    /// Create an author and the books of the payload
    pub async fn add_author(&self, dto: &AuthorForCreationDto) -> ShapingResult<Author> {
        let author = dto.to_author();
        for book in &dto.books {
            self.books
                .create(book.to_book(author.id))
                .await
                .map_err(|e| StorageError::operation("create book", e))?;
        }
        let author = self
            .authors
            .create(author)
            .await
            .map_err(|e| StorageError::operation("create author", e))?;

        tracing::debug!(author_id = %author.id, books = dto.books.len(), "created author");
        Ok(author)
    }

    /// Delete an author and all of their books
    pub async fn delete_author(&self, author_id: &Uuid) -> ShapingResult<()> {
        // existence check first so a missing author is a 404, not a no-op
        self.get_author(author_id).await?;

        for book in self.books_for_author(author_id).await? {
            self.books
                .delete(&book.id)
                .await
                .map_err(|e| StorageError::operation("delete book", e))?;
        }
        self.authors
            .delete(author_id)
            .await
            .map_err(|e| StorageError::operation("delete author", e))?;

        tracing::debug!(author_id = %author_id, "deleted author");
        Ok(())
    }

    /// Books of one author, ordered by title
    pub async fn books_for_author(&self, author_id: &Uuid) -> ShapingResult<Vec<Book>> {
        let mut books: Vec<Book> = self
            .books
            .list()
            .await
            .map_err(|e| StorageError::operation("list books", e))?
            .into_iter()
            .filter(|b| b.author_id == *author_id)
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        Ok(books)
    }

    pub async fn book_for_author(&self, author_id: &Uuid, book_id: &Uuid) -> ShapingResult<Book> {
        self.books
            .get(book_id)
            .await
            .map_err(|e| StorageError::operation("get book", e))?
            .filter(|b| b.author_id == *author_id)
            .ok_or_else(|| {
                EntityError::NotFound {
                    entity_type: "book".to_string(),
                    id: *book_id,
                }
                .into()
            })
    }
}
