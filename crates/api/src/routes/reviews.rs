//! Book reviews. Changes are limited to the review's author.

use axum::{extract::State, http::StatusCode};
use domain::models::review::{CreateReviewRequest, UpdateReviewRequest};
use domain::models::Review;
use persistence::repositories::ReviewRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, CurrentUser, ValidatedJson};
use crate::response::Data;

/// GET /api/v1/books/:book_id/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    _current: CurrentUser,
    ApiPath(book_id): ApiPath<i64>,
) -> Result<Data<Vec<Review>>, ApiError> {
    let reviews = ReviewRepository::new(state.pool.clone())
        .find_by_book(book_id)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();

    Ok(Data::new(reviews))
}

/// POST /api/v1/books/:book_id/reviews
pub async fn create_review(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(book_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Data<Review>), ApiError> {
    let review = ReviewRepository::new(state.pool.clone())
        .create(current.id(), book_id, &request)
        .await?;

    Ok((StatusCode::CREATED, Data::new(review.into())))
}

/// PATCH /api/v1/books/:book_id/reviews/:review_id
pub async fn update_review(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath((book_id, review_id)): ApiPath<(i64, i64)>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> Result<Data<Review>, ApiError> {
    if request.content.is_none() && request.rating.is_none() {
        return Err(ApiError::BadRequest("no fields to update".to_string()));
    }

    let review = ReviewRepository::new(state.pool.clone())
        .update(review_id, current.id(), book_id, &request)
        .await?;

    Ok(Data::new(review.into()))
}

/// DELETE /api/v1/books/:book_id/reviews/:review_id
pub async fn delete_review(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath((book_id, review_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    ReviewRepository::new(state.pool.clone())
        .delete(review_id, current.id(), book_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
