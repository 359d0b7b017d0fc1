//! HTTP handlers for the library API
//!
//! Collection requests are checked in full (`orderBy` against the property
//! mapping, `fields` against the DTO) before the repository is touched, so a
//! bad clause never produces a partial page.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::PagingConfig;
use crate::core::error::{EntityError, ShapingError, ShapingResult, ValidationError};
use crate::core::query::ResourceParameters;
use crate::core::shaping::{shape_collection, shape_data};
use crate::core::type_helper::type_has_properties;
use crate::library::{Author, AuthorDto, AuthorForCreationDto, BookDto, LibraryRepository};
use crate::server::links::pagination_metadata;

/// Base path of the authors collection
pub const AUTHORS_PATH: &str = "/api/authors";

/// Header carrying the pagination metadata of collection responses
pub const X_PAGINATION: &str = "x-pagination";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<LibraryRepository>,
    pub paging: PagingConfig,
}

/// `fields` selection of a single-resource request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

fn check_order_by(state: &AppState, order_by: Option<&str>) -> ShapingResult<()> {
    let valid = state
        .repository
        .registry()
        .valid_mapping_exists_for::<AuthorDto, Author>(order_by)?;
    if !valid {
        return Err(ValidationError::InvalidOrderBy {
            clause: order_by.unwrap_or_default().to_string(),
        }
        .into());
    }
    Ok(())
}

fn check_fields(fields: Option<&str>) -> ShapingResult<()> {
    if !type_has_properties::<AuthorDto>(fields) {
        return Err(ValidationError::UnknownFields {
            clause: fields.unwrap_or_default().to_string(),
        }
        .into());
    }
    Ok(())
}

/// GET /api/authors
///
/// Query params: `pageNumber`, `pageSize`, `orderBy`, `fields`, `genre`,
/// `searchQuery`. Returns the shaped page as a JSON array and the metadata in
/// the `X-Pagination` header.
pub async fn get_authors(
    State(state): State<AppState>,
    Query(params): Query<ResourceParameters>,
) -> Result<Response, ShapingError> {
    check_order_by(&state, params.order_by())?;
    check_fields(params.fields())?;

    let page_size = params.page_size(&state.paging);
    let page = state.repository.get_authors(&params, page_size).await?;
    let metadata = pagination_metadata(AUTHORS_PATH, &params, &page);

    let today = Utc::now().date_naive();
    let page = page.map(|author| AuthorDto::from_author(&author, today));
    let shaped = shape_collection(page.items(), params.fields())?;

    tracing::debug!(
        total_count = metadata.total_count,
        current_page = metadata.current_page,
        returned = shaped.len(),
        "served authors page"
    );

    let header_value = serde_json::to_string(&metadata)
        .map_err(|e| ShapingError::Internal(e.to_string()))
        .and_then(|json| {
            HeaderValue::from_str(&json).map_err(|e| ShapingError::Internal(e.to_string()))
        })?;
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(X_PAGINATION), header_value);

    Ok((headers, Json(shaped)).into_response())
}

/// GET /api/authors/{id}
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Response, ShapingError> {
    let fields = query.fields.as_deref();
    check_fields(fields)?;

    let author = state.repository.get_author(&id).await?;
    let shaped = shape_data(&AuthorDto::from(&author), fields)?;

    Ok(Json(shaped).into_response())
}

/// POST /api/authors
///
/// Returns: 201 + the created author, with a `Location` header
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<AuthorForCreationDto>,
) -> Result<Response, ShapingError> {
    payload.validate()?;

    let author = state.repository.add_author(&payload).await?;
    let dto = AuthorDto::from(&author);
    let location = format!("{}/{}", AUTHORS_PATH, dto.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto),
    )
        .into_response())
}

/// POST /api/authors/{id}
///
/// Creating an author at a chosen id is not supported: 409 when it exists,
/// 404 otherwise.
pub async fn block_author_create(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ShapingError> {
    let err = if state.repository.author_exists(&id).await? {
        EntityError::AlreadyExists {
            entity_type: "author".to_string(),
            id,
        }
    } else {
        EntityError::NotFound {
            entity_type: "author".to_string(),
            id,
        }
    };
    Err(err.into())
}

/// DELETE /api/authors/{id}
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ShapingError> {
    state.repository.delete_author(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_author(state: &AppState, author_id: Uuid) -> ShapingResult<()> {
    if !state.repository.author_exists(&author_id).await? {
        return Err(EntityError::NotFound {
            entity_type: "author".to_string(),
            id: author_id,
        }
        .into());
    }
    Ok(())
}

/// GET /api/authors/{author_id}/books
pub async fn get_books_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Vec<BookDto>>, ShapingError> {
    ensure_author(&state, author_id).await?;

    let books = state.repository.books_for_author(&author_id).await?;
    Ok(Json(books.iter().map(BookDto::from).collect()))
}

/// GET /api/authors/{author_id}/books/{book_id}
pub async fn get_book_for_author(
    State(state): State<AppState>,
    Path((author_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookDto>, ShapingError> {
    ensure_author(&state, author_id).await?;

    let book = state.repository.book_for_author(&author_id, &book_id).await?;
    Ok(Json(BookDto::from(&book)))
}

/// POST /api/authorcollections
///
/// Every payload is validated before anything is created.
pub async fn create_author_collection(
    State(state): State<AppState>,
    Json(payload): Json<Vec<AuthorForCreationDto>>,
) -> Result<Json<Vec<AuthorDto>>, ShapingError> {
    for author in &payload {
        author.validate()?;
    }

    let mut created = Vec::with_capacity(payload.len());
    for author in &payload {
        let author = state.repository.add_author(author).await?;
        created.push(AuthorDto::from(&author));
    }

    tracing::debug!(count = created.len(), "created author collection");
    Ok(Json(created))
}
