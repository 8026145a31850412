pub mod auth;
pub mod health;
pub mod pairing;
pub mod player;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth
///     /register           register
///     /login              login
///     /me                 current user (requires auth)
///     /logout             logout (optional auth)
///
/// /pairing
///     /code               create room (requires auth)
///     /join               join room by code (requires auth)
///
/// /player
///     /state              read player state (requires auth)
///     /action             play | pause | seek (requires auth)
/// ```
///
/// Routes carry their full paths so the not-found fallbacks installed by
/// the router builder cover every endpoint.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(pairing::router())
        .merge(player::router())
}
