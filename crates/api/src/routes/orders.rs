//! Order placement and the owner's view of their orders.

use axum::{extract::State, http::StatusCode};
use domain::models::order::{CreateOrderRequest, UpdateOrderRequest};
use domain::models::Order;
use persistence::repositories::OrderRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, CurrentUser, ValidatedJson};
use crate::middleware::metrics::record_order_created;
use crate::response::Data;

/// POST /api/v1/orders
///
/// The order and all its items are written in one transaction. The supplied
/// total must equal the sum of price times quantity over the items.
pub async fn create_order(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Data<Order>), ApiError> {
    let computed = request
        .computed_total()
        .ok_or_else(|| ApiError::BadRequest("order total is out of range".to_string()))?;
    if computed != request.total_amount {
        return Err(ApiError::BadRequest(format!(
            "total_amount {} does not match the item total {}",
            request.total_amount, computed
        )));
    }

    let order = OrderRepository::new(state.pool.clone())
        .create(current.id(), &request)
        .await?;

    record_order_created();
    info!(order_id = order.id, user_id = current.id(), items = order.items.len(), "Order placed");
    Ok((StatusCode::CREATED, Data::new(order)))
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Data<Vec<Order>>, ApiError> {
    let orders = OrderRepository::new(state.pool.clone())
        .find_by_user(current.id())
        .await?;

    Ok(Data::new(orders))
}

/// GET /api/v1/orders/:order_id
pub async fn get_order(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(order_id): ApiPath<i64>,
) -> Result<Data<Order>, ApiError> {
    let order = OrderRepository::new(state.pool.clone())
        .find_for_user(order_id, current.id())
        .await?;

    Ok(Data::new(order))
}

/// PATCH /api/v1/orders/:order_id
///
/// Owners may only change the shipping address.
pub async fn update_order(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(order_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateOrderRequest>,
) -> Result<Data<Order>, ApiError> {
    let order = OrderRepository::new(state.pool.clone())
        .update_by_owner(order_id, current.id(), &request.shipping_address)
        .await?;

    info!(order_id, user_id = current.id(), "Shipping address changed");
    Ok(Data::new(order))
}
