use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use domain::models::RoleTable;
use domain::services::Mailer;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::ApiError;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, require_moderator, require_user_auth,
    security_headers_middleware, trace_id,
};
use crate::routes::{admin, auth, books, carts, health, orders, password, reviews, users, wishlist};
use crate::services::{AuthService, PasswordResetService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    /// Loaded once at startup; roles never change at runtime
    pub roles: Arc<RoleTable>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.pool.clone(),
            self.jwt.clone(),
            self.mailer.clone(),
            self.config.email.invitation_ttl_secs,
        )
    }

    pub fn password_reset_service(&self) -> PasswordResetService {
        PasswordResetService::new(
            self.pool.clone(),
            self.mailer.clone(),
            self.config.email.password_reset_ttl_secs,
        )
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}

pub fn create_app(
    config: Config,
    pool: PgPool,
    roles: RoleTable,
    mailer: Arc<dyn Mailer>,
) -> Result<Router, JwtError> {
    let jwt = JwtConfig::with_leeway(
        &config.jwt.secret,
        &config.jwt.issuer,
        &config.jwt.audience,
        config.jwt.expiry_secs,
        config.jwt.leeway_secs,
    )?;
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt: Arc::new(jwt),
        roles: Arc::new(roles),
        mailer,
    };

    let public_routes = Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/authentication/user", post(auth::register))
        .route("/api/v1/authentication/token", post(auth::login))
        .route("/api/v1/authentication/activate/:token", put(auth::activate))
        .route("/api/v1/password/reset-request", post(password::request_reset))
        .route("/api/v1/password/request/verify", get(password::verify_token))
        .route("/api/v1/password/reset", post(password::reset_password))
        .route("/metrics", get(metrics_handler));

    // Any authenticated user
    let user_routes = Router::new()
        .route(
            "/api/v1/users/me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/api/v1/users/:user_id", get(users::get_user))
        .route("/api/v1/books/search", get(books::search_books))
        .route("/api/v1/books/:book_id", get(books::get_book))
        .route(
            "/api/v1/books/:book_id/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/api/v1/books/:book_id/reviews/:review_id",
            patch(reviews::update_review).delete(reviews::delete_review),
        )
        .route(
            "/api/v1/wishlist",
            get(wishlist::list_wishlist).post(wishlist::add_to_wishlist),
        )
        .route(
            "/api/v1/wishlist/:book_id",
            delete(wishlist::remove_from_wishlist),
        )
        .route(
            "/api/v1/carts",
            get(carts::get_cart)
                .post(carts::add_to_cart)
                .delete(carts::delete_cart),
        )
        .route(
            "/api/v1/carts/items/:item_id",
            patch(carts::update_cart_item).delete(carts::delete_cart_item),
        )
        .route(
            "/api/v1/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/api/v1/orders/:order_id",
            get(orders::get_order).patch(orders::update_order),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user_auth));

    // Catalog changes; the user gate is the outer layer so it runs first
    let moderator_routes = Router::new()
        .route("/api/v1/books", post(books::create_book))
        .route(
            "/api/v1/books/:book_id",
            patch(books::update_book).delete(books::delete_book),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_moderator))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user_auth));

    let admin_routes = Router::new()
        .route("/api/v1/admin/orders/:order_id", patch(admin::update_order))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user_auth));

    Ok(Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(moderator_routes)
        .merge(admin_routes)
        .fallback(route_not_found)
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state))
}
