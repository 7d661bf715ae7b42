use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{authenticate, require_admin};
use crate::state::AppState;

/// Full application router: three route groups with strictly increasing gates
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.frontend_domain);

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .merge(admin_routes(&state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        // Token acquisition
        .route("/auth/register", post(public::auth::register))
        .route("/auth/login", post(public::auth::login))
        .route("/auth/refresh", post(public::auth::refresh))
        // Member accounts
        .route("/users", get(public::accounts::list))
        .route("/users/:id", get(public::accounts::get))
        .route("/users/:id/profile", get(public::accounts::profile))
        .route("/users/:id/reviews", get(public::accounts::reviews))
        // Catalog
        .route("/brands", get(public::catalog::list_brands))
        .route("/brands/:id", get(public::catalog::get_brand))
        .route("/brands/:id/phones", get(public::catalog::brand_phones))
        .route("/phones", get(public::catalog::list_phones))
        .route("/phones/:id", get(public::catalog::get_phone))
        .route("/phones/:id/specification", get(public::catalog::phone_specification))
        .route("/phones/:id/reviews", get(public::catalog::phone_reviews))
        .route("/reviews/:id/comments", get(public::content::review_comments))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/change-password", put(protected::auth::change_password))
        .route("/auth/logout", post(protected::auth::logout))
        .route("/users/role", get(protected::accounts::role))
        .route("/users", put(protected::accounts::update).delete(protected::accounts::delete))
        .route(
            "/profiles",
            post(protected::accounts::create_profile).put(protected::accounts::update_profile),
        )
        .route("/phones/:id/reviews", post(protected::content::create_review))
        .route(
            "/reviews/:id",
            put(protected::content::update_review).delete(protected::content::delete_review),
        )
        .route("/reviews/:id/comments", post(protected::content::create_comment))
        .route(
            "/comments/:id",
            put(protected::content::update_comment).delete(protected::content::delete_comment),
        )
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Roles
        .route("/roles", get(elevated::roles::list).post(elevated::roles::create))
        .route(
            "/roles/:id",
            get(elevated::roles::get)
                .put(elevated::roles::update)
                .delete(elevated::roles::delete),
        )
        .route("/roles/:id/users", get(elevated::roles::accounts))
        // Catalog writes
        .route("/brands", post(elevated::catalog::create_brand))
        .route(
            "/brands/:id",
            put(elevated::catalog::update_brand).delete(elevated::catalog::delete_brand),
        )
        .route("/phones", post(elevated::catalog::create_phone))
        .route(
            "/phones/:id",
            put(elevated::catalog::update_phone).delete(elevated::catalog::delete_phone),
        )
        .route(
            "/phones/:id/specification",
            post(elevated::catalog::create_specification).put(elevated::catalog::update_specification),
        )
        // Accounts
        .route("/users/:id", delete(elevated::accounts::delete_user))
        .route("/admins", get(elevated::accounts::list))
        .route("/admins/register", post(elevated::accounts::register))
        .route("/admins/:id", get(elevated::accounts::get))
        .route("/admins/:id/profile", get(elevated::accounts::profile))
        .route("/admins/:id/reviews", get(elevated::accounts::reviews))
        // Moderation
        .route("/reviews", get(elevated::moderation::list_reviews))
        .route("/comments", get(elevated::moderation::list_comments))
        .route("/comments/:id/admin", delete(elevated::moderation::delete_comment))
        .route("/dashboard/all-count-data", get(elevated::dashboard::all_count_data))
        // Last layer added runs first: authenticate, then require_admin
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

fn cors_layer(frontend_domain: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_domain) {
        Ok(origin) => layer.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            tracing::warn!("FRONTEND_DOMAIN {:?} is not a valid origin; CORS disabled", frontend_domain);
            layer
        }
    }
}
