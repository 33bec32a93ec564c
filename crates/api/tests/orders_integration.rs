//! Integration tests for order placement and administration.
//!
//! These tests require a running PostgreSQL instance.
//! Set TEST_DATABASE_URL environment variable or use docker-compose.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    book_body, count_rows, create_admin, create_authenticated_user, create_book,
    create_moderator, AuthenticatedUser, TestContext,
};
use serde_json::{json, Value};

/// Three books priced so every total is exact in binary floating point.
async fn three_books(ctx: &TestContext) -> Vec<i64> {
    let moderator = create_moderator(ctx).await;
    let mut ids = Vec::new();
    for (title, price) in [("Order A", 12.5), ("Order B", 7.25), ("Order C", 4.0)] {
        let book = create_book(ctx, &moderator, book_body(title, price, 10)).await;
        ids.push(book["id"].as_i64().unwrap());
    }
    ids
}

fn order_body(ids: &[i64]) -> Value {
    json!({
        "total_amount": 44.25,
        "payment_method": "cash_on_delivery",
        "shipping_address": "221B Baker Street, London",
        "order_items": [
            { "book_id": ids[0], "quantity": 2, "price": 12.5 },
            { "book_id": ids[1], "quantity": 1, "price": 7.25 },
            { "book_id": ids[2], "quantity": 3, "price": 4.0 },
        ],
    })
}

async fn place_order(ctx: &TestContext, user: &AuthenticatedUser, body: Value) -> Value {
    let (status, body) = ctx
        .call(Method::POST, "/api/v1/orders", Some(&user.token), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED, "order failed: {}", body);
    body["data"].clone()
}

async fn order_count(ctx: &TestContext, user_id: i64) -> i64 {
    count_rows(&ctx.pool, "orders", "user_id", user_id).await
}

// ============================================================================
// Placement Tests
// ============================================================================

#[tokio::test]
async fn test_place_order_with_items() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;

    let order = place_order(&ctx, &user, order_body(&ids)).await;
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_method"], "cash_on_delivery");
    assert_eq!(order["total_amount"].as_f64().unwrap(), 44.25);
    assert_eq!(order["user_id"], user.id);

    let items = order["order_items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["book_id"], ids[0]);
    assert_eq!(items[2]["quantity"], 3);

    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(count_rows(&ctx.pool, "order_items", "order_id", order_id).await, 3);
}

#[tokio::test]
async fn test_unknown_book_rolls_back_whole_order() {
    let ctx = TestContext::new().await;
    let mut ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;
    ids[2] = 999_999_999;

    let (status, _) = ctx
        .call(
            Method::POST,
            "/api/v1/orders",
            Some(&user.token),
            Some(order_body(&ids)),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(order_count(&ctx, user.id).await, 0);
}

#[tokio::test]
async fn test_total_mismatch_is_rejected() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;
    let mut body = order_body(&ids);
    body["total_amount"] = json!(40.0);

    let (status, body) = ctx
        .call(Method::POST, "/api/v1/orders", Some(&user.token), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("total_amount"));
    assert_eq!(order_count(&ctx, user.id).await, 0);
}

#[tokio::test]
async fn test_order_validation() {
    let ctx = TestContext::new().await;
    let user = create_authenticated_user(&ctx).await;

    let (status, _) = ctx
        .call(
            Method::POST,
            "/api/v1/orders",
            Some(&user.token),
            Some(json!({
                "total_amount": 10.0,
                "payment_method": "cash_on_delivery",
                "shipping_address": "Somewhere 1",
                "order_items": [],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .call(
            Method::POST,
            "/api/v1/orders",
            Some(&user.token),
            Some(json!({
                "total_amount": 10.0,
                "payment_method": "paypal",
                "shipping_address": "Somewhere 1",
                "order_items": [{ "book_id": 1, "quantity": 1, "price": 10.0 }],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_out_of_range_amounts_are_rejected() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;

    let oversized = [
        // Price beyond the catalog limit
        json!({ "book_id": ids[0], "quantity": 1, "price": 1e9 }),
        // Quantity large enough to overflow the total
        json!({ "book_id": ids[0], "quantity": 2000000000, "price": 1e20 }),
        // More than two decimal places
        json!({ "book_id": ids[0], "quantity": 1, "price": 12.505 }),
    ];
    for item in oversized {
        let total = item["price"].clone();
        let (status, body) = ctx
            .call(
                Method::POST,
                "/api/v1/orders",
                Some(&user.token),
                Some(json!({
                    "total_amount": total,
                    "payment_method": "credit_card",
                    "shipping_address": "221B Baker Street, London",
                    "order_items": [item],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted: {}", body);
    }
    assert_eq!(order_count(&ctx, user.id).await, 0);
}

// ============================================================================
// Owner Access Tests
// ============================================================================

#[tokio::test]
async fn test_list_and_get_own_orders() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;
    let first = place_order(&ctx, &user, order_body(&ids)).await;
    let second = place_order(&ctx, &user, order_body(&ids)).await;

    let (status, body) = ctx
        .call(Method::GET, "/api/v1/orders", Some(&user.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], first["id"]);
    assert_eq!(orders[1]["id"], second["id"]);
    assert_eq!(orders[1]["order_items"].as_array().unwrap().len(), 3);

    let (status, body) = ctx
        .call(
            Method::GET,
            &format!("/api/v1/orders/{}", first["id"]),
            Some(&user.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_other_users_order_is_not_found() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let owner = create_authenticated_user(&ctx).await;
    let other = create_authenticated_user(&ctx).await;
    let order = place_order(&ctx, &owner, order_body(&ids)).await;
    let uri = format!("/api/v1/orders/{}", order["id"]);

    let (status, _) = ctx.call(Method::GET, &uri, Some(&other.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .call(
            Method::PATCH,
            &uri,
            Some(&other.token),
            Some(json!({ "shipping_address": "Elsewhere 42" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_can_only_change_address() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;
    let order = place_order(&ctx, &user, order_body(&ids)).await;
    let uri = format!("/api/v1/orders/{}", order["id"]);

    let (status, body) = ctx
        .call(
            Method::PATCH,
            &uri,
            Some(&user.token),
            Some(json!({ "shipping_address": "742 Evergreen Terrace" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["shipping_address"], "742 Evergreen Terrace");
    assert_eq!(body["data"]["order_items"].as_array().unwrap().len(), 3);

    let (status, _) = ctx
        .call(
            Method::PATCH,
            &uri,
            Some(&user.token),
            Some(json!({ "status": "delivered" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleted_book_keeps_order_item() {
    let ctx = TestContext::new().await;
    let moderator = create_moderator(&ctx).await;
    let user = create_authenticated_user(&ctx).await;
    let book = create_book(&ctx, &moderator, book_body("Out Of Print", 10.0, 5)).await;
    let book_id = book["id"].as_i64().unwrap();

    let order = place_order(
        &ctx,
        &user,
        json!({
            "total_amount": 10.0,
            "payment_method": "credit_card",
            "shipping_address": "1 Infinite Loop",
            "order_items": [{ "book_id": book_id, "quantity": 1, "price": 10.0 }],
        }),
    )
    .await;

    let (status, _) = ctx
        .call(
            Method::DELETE,
            &format!("/api/v1/books/{}", book_id),
            Some(&moderator.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = ctx
        .call(
            Method::GET,
            &format!("/api/v1/orders/{}", order["id"]),
            Some(&user.token),
            None,
        )
        .await;
    let items = body["data"]["order_items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0]["book_id"].is_null());
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_updates_any_order() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;
    let admin = create_admin(&ctx).await;
    let order = place_order(&ctx, &user, order_body(&ids)).await;
    let uri = format!("/api/v1/admin/orders/{}", order["id"]);

    let (status, body) = ctx
        .call(
            Method::PATCH,
            &uri,
            Some(&admin.token),
            Some(json!({ "status": "shipped", "payment_method": "Bkash" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "shipped");
    assert_eq!(body["data"]["payment_method"], "Bkash");
    assert_eq!(body["data"]["shipping_address"], "221B Baker Street, London");

    let (status, body) = ctx.call(Method::PATCH, &uri, Some(&admin.token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no fields to update");

    let (status, _) = ctx
        .call(
            Method::PATCH,
            "/api/v1/admin/orders/999999999",
            Some(&admin.token),
            Some(json!({ "status": "cancelled" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_admins_cannot_use_admin_routes() {
    let ctx = TestContext::new().await;
    let ids = three_books(&ctx).await;
    let user = create_authenticated_user(&ctx).await;
    let moderator = create_moderator(&ctx).await;
    let order = place_order(&ctx, &user, order_body(&ids)).await;
    let uri = format!("/api/v1/admin/orders/{}", order["id"]);

    for token in [&user.token, &moderator.token] {
        let (status, body) = ctx
            .call(
                Method::PATCH,
                &uri,
                Some(token),
                Some(json!({ "status": "cancelled" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "admin access required");
    }
}
