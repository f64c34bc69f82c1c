pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/api/health", get(routes::health::health))
        // Bands
        .route("/api/bands", get(routes::bands::list_bands))
        .route("/api/bands", post(routes::bands::create_band))
        .route("/api/bands/{slug}", get(routes::bands::get_band))
        .route("/api/bands/{slug}", delete(routes::bands::delete_band))
        .route(
            "/api/bands/{slug}/members",
            post(routes::bands::add_band_member),
        )
        .route(
            "/api/bands/{slug}/members/{id}",
            delete(routes::bands::remove_band_member),
        )
        // Members and their availability rules
        .route("/api/members", get(routes::members::list_members))
        .route("/api/members", post(routes::members::create_member))
        .route("/api/members/{id}", get(routes::members::get_member))
        .route("/api/members/{id}/rules", get(routes::members::list_rules))
        .route("/api/members/{id}/rules", post(routes::members::add_rule))
        .route(
            "/api/members/{id}/rules/{rule_id}",
            delete(routes::members::delete_rule),
        )
        // Rehearsals
        .route(
            "/api/rehearsals",
            get(routes::rehearsals::list_rehearsals),
        )
        .route(
            "/api/rehearsals",
            post(routes::rehearsals::create_rehearsal),
        )
        .route(
            "/api/rehearsals/{id}",
            put(routes::rehearsals::reschedule_rehearsal),
        )
        .route(
            "/api/rehearsals/{id}",
            delete(routes::rehearsals::delete_rehearsal),
        )
        // Availability
        .route(
            "/api/availability/suggestions",
            get(routes::availability::suggestions),
        )
        .route(
            "/api/availability/{member_id}",
            get(routes::availability::member_free_intervals),
        )
        // Songs
        .route("/api/bands/{slug}/songs", get(routes::songs::list_songs))
        .route("/api/bands/{slug}/songs", post(routes::songs::create_song))
        .route("/api/songs/{id}", put(routes::songs::update_song))
        .route("/api/songs/{id}", delete(routes::songs::delete_song))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the Bandroom API server.
pub async fn serve(root: PathBuf, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(root);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("bandroom API listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
