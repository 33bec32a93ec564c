//! Catalog routes. Mutations sit behind the moderator gate.

use axum::{extract::State, http::StatusCode};
use domain::models::book::{BookSearchQuery, CreateBookRequest, UpdateBookRequest};
use domain::models::Book;
use persistence::repositories::BookRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, CurrentUser, MultiQuery, ValidatedJson};
use crate::response::Data;

/// POST /api/v1/books
pub async fn create_book(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateBookRequest>,
) -> Result<(StatusCode, Data<Book>), ApiError> {
    let book: Book = BookRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    info!(book_id = book.id, created_by = current.id(), "Book created");
    Ok((StatusCode::CREATED, Data::new(book)))
}

/// GET /api/v1/books/:book_id
pub async fn get_book(
    State(state): State<AppState>,
    _current: CurrentUser,
    ApiPath(book_id): ApiPath<i64>,
) -> Result<Data<Book>, ApiError> {
    let book = BookRepository::new(state.pool.clone())
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("book not found".to_string()))?;

    Ok(Data::new(book.into()))
}

/// PATCH /api/v1/books/:book_id
///
/// The body must carry the version the client last read; a stale version is a 409.
pub async fn update_book(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(book_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateBookRequest>,
) -> Result<Data<Book>, ApiError> {
    let book: Book = BookRepository::new(state.pool.clone())
        .update(book_id, &request)
        .await?
        .into();

    info!(book_id, version = book.version, updated_by = current.id(), "Book updated");
    Ok(Data::new(book))
}

/// DELETE /api/v1/books/:book_id
pub async fn delete_book(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(book_id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    BookRepository::new(state.pool.clone())
        .delete(book_id)
        .await?;

    info!(book_id, deleted_by = current.id(), "Book deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/books/search?query=&title=&author=&tag=&min_price=&max_price=&in_stock=
pub async fn search_books(
    State(state): State<AppState>,
    _current: CurrentUser,
    MultiQuery(query): MultiQuery<BookSearchQuery>,
) -> Result<Data<Vec<Book>>, ApiError> {
    let books = BookRepository::new(state.pool.clone())
        .search(&query)
        .await?
        .into_iter()
        .map(Book::from)
        .collect();

    Ok(Data::new(books))
}
