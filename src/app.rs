// app.rs - Router assembly
//
// Every route lives on one router and the route guard wraps all of it,
// fallback included. Which requests need a session is decided by
// `middleware::guard::classify`, never by the route groups below.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::route_guard;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        .merge(system_routes())
        .merge(project_routes())
        .merge(skill_routes())
        .merge(contact_routes())
        .merge(auth_routes())
        .merge(admin_routes())
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), route_guard))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
                .layer(cors_layer(&config)),
        )
        .with_state(state);

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn system_routes() -> Router<AppState> {
    use handlers::system;

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
}

fn project_routes() -> Router<AppState> {
    use handlers::projects;

    Router::new()
        // Collection, with `?id=` selecting one record
        .route(
            "/api/projects",
            get(projects::list)
                .post(projects::create)
                .put(projects::replace_by_query)
                .patch(projects::patch_by_query)
                .delete(projects::delete_by_query),
        )
        .route(
            "/api/projects/:id",
            get(projects::show)
                .put(projects::replace)
                .patch(projects::patch)
                .delete(projects::delete),
        )
}

fn skill_routes() -> Router<AppState> {
    use handlers::skills;

    Router::new()
        .route(
            "/api/skills",
            get(skills::list)
                .post(skills::create)
                .put(skills::replace_by_query)
                .patch(skills::patch_by_query)
                .delete(skills::delete_by_query),
        )
        .route(
            "/api/skills/:id",
            get(skills::show)
                .put(skills::replace)
                .patch(skills::patch)
                .delete(skills::delete),
        )
}

fn contact_routes() -> Router<AppState> {
    use axum::routing::delete;
    use handlers::contact;

    Router::new()
        .route(
            "/api/contact",
            post(contact::submit).get(contact::list).delete(contact::delete_by_query),
        )
        .route("/api/contact/:id", delete(contact::delete))
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
}

fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/dashboard", get(handlers::admin::dashboard))
}

/// Configured origins, or any origin in development when none are listed
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return if config.is_development() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        };
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
