//! Wishlist routes.

use axum::{extract::State, http::StatusCode};
use domain::models::wishlist::{AddToWishlistRequest, RemoveFromWishlistResponse};
use domain::models::{Book, WishlistEntry};
use persistence::repositories::WishlistRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, CurrentUser, ValidatedJson};
use crate::response::Data;

/// GET /api/v1/wishlist
///
/// Books on the caller's wishlist, most recently added first.
pub async fn list_wishlist(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Data<Vec<Book>>, ApiError> {
    let books = WishlistRepository::new(state.pool.clone())
        .find_books(current.id())
        .await?
        .into_iter()
        .map(Book::from)
        .collect();

    Ok(Data::new(books))
}

/// POST /api/v1/wishlist
///
/// Adding a book twice returns the existing entry.
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<AddToWishlistRequest>,
) -> Result<(StatusCode, Data<WishlistEntry>), ApiError> {
    let entry = WishlistRepository::new(state.pool.clone())
        .add(current.id(), request.book_id)
        .await?;

    Ok((StatusCode::CREATED, Data::new(entry.into())))
}

/// DELETE /api/v1/wishlist/:book_id
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(book_id): ApiPath<i64>,
) -> Result<Data<RemoveFromWishlistResponse>, ApiError> {
    WishlistRepository::new(state.pool.clone())
        .remove(current.id(), book_id)
        .await?;

    Ok(Data::new(RemoveFromWishlistResponse::new(book_id)))
}
