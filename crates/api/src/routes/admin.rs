//! Admin-only routes.

use axum::extract::State;
use domain::models::order::AdminUpdateOrderRequest;
use domain::models::Order;
use persistence::repositories::OrderRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, CurrentUser, ValidatedJson};
use crate::response::Data;

/// PATCH /api/v1/admin/orders/:order_id
///
/// Any of shipping address, payment method and status; omitted fields are kept.
pub async fn update_order(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(order_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<AdminUpdateOrderRequest>,
) -> Result<Data<Order>, ApiError> {
    if request.is_empty() {
        return Err(ApiError::BadRequest("no fields to update".to_string()));
    }

    let order = OrderRepository::new(state.pool.clone())
        .update_by_admin(order_id, &request)
        .await?;

    info!(
        order_id,
        admin_id = current.id(),
        status = %order.status,
        "Order updated by admin"
    );
    Ok(Data::new(order))
}
