//! Shopping cart routes. Every operation acts on the caller's own cart.

use axum::{extract::State, http::StatusCode};
use domain::models::cart::{AddToCartRequest, UpdateCartItemRequest};
use domain::models::{CartItem, CartItemWithBook, CartView};
use persistence::repositories::CartRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, CurrentUser, ValidatedJson};
use crate::response::{Data, Message};

/// GET /api/v1/carts
pub async fn get_cart(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Data<CartView>, ApiError> {
    let carts = CartRepository::new(state.pool.clone());
    let cart = carts.get_or_create(current.id()).await?;
    let items = carts
        .find_items(cart.id)
        .await?
        .into_iter()
        .map(CartItemWithBook::from)
        .collect();

    Ok(Data::new(CartView {
        cart_id: cart.id,
        items,
    }))
}

/// POST /api/v1/carts
///
/// Adding a book already in the cart adds to its quantity.
pub async fn add_to_cart(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<AddToCartRequest>,
) -> Result<(StatusCode, Data<Message>), ApiError> {
    let carts = CartRepository::new(state.pool.clone());
    let cart = carts.get_or_create(current.id()).await?;
    carts
        .add_item(cart.id, request.book_id, request.quantity)
        .await?;

    Ok((StatusCode::CREATED, Message::new("Item added to cart")))
}

/// DELETE /api/v1/carts
pub async fn delete_cart(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, ApiError> {
    CartRepository::new(state.pool.clone())
        .delete_cart(current.id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/carts/items/:item_id
pub async fn update_cart_item(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(item_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateCartItemRequest>,
) -> Result<Data<CartItem>, ApiError> {
    let item = CartRepository::new(state.pool.clone())
        .update_quantity(item_id, current.id(), request.quantity)
        .await?;

    Ok(Data::new(item.into()))
}

/// DELETE /api/v1/carts/items/:item_id
pub async fn delete_cart_item(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(item_id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    CartRepository::new(state.pool.clone())
        .delete_item(item_id, current.id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
