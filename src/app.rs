use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::Queries;
use crate::handlers::{self, method_not_allowed};
use crate::middleware::cors_layer;

/// Shared by every handler; the query layer owns the pool handle
#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<dyn Queries>,
}

impl AppState {
    pub fn new(queries: Arc<dyn Queries>) -> Self {
        Self { queries }
    }
}

/// Build the router once; resource routes are mounted both at the root and
/// under `/api`, and anything unmatched falls through to the static assets.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let resources = resource_routes();

    Router::new()
        .route("/health", get(handlers::health))
        .merge(resources.clone())
        .nest("/api", resources)
        .fallback_service(ServeDir::new(&config.api.static_dir))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn resource_routes() -> Router<AppState> {
    Router::new()
        .merge(note_routes())
        .merge(folder_routes())
        .merge(user_routes())
        .route("/login", post(handlers::login).fallback(method_not_allowed))
}

fn note_routes() -> Router<AppState> {
    use handlers::notes;

    Router::new()
        .route(
            "/notes",
            get(notes::list).post(notes::create).fallback(method_not_allowed),
        )
        .route(
            "/notes/:id",
            get(notes::get)
                .put(notes::update)
                .delete(notes::delete)
                .fallback(method_not_allowed),
        )
}

fn folder_routes() -> Router<AppState> {
    use handlers::folders;

    Router::new()
        .route(
            "/folders",
            get(folders::list).post(folders::create).fallback(method_not_allowed),
        )
        .route(
            "/folders/:id",
            get(folders::get)
                .put(folders::update)
                .delete(folders::delete)
                .fallback(method_not_allowed),
        )
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route(
            "/users",
            get(users::list).post(users::create).fallback(method_not_allowed),
        )
        .route(
            "/users/:id",
            get(users::get)
                .put(users::update)
                .delete(users::delete)
                .fallback(method_not_allowed),
        )
}
