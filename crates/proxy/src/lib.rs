pub mod error;
pub mod generate;
pub mod routes;
pub mod state;

use axum::{Router, routing::post};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/insight", post(routes::insight::generate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
