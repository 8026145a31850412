use axum::routing::post;
use axum::Router;

use crate::handlers::player;
use crate::state::AppState;

/// ```text
/// POST /player/state   -> get_state
/// POST /player/action  -> apply_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/player/state", post(player::get_state))
        .route("/player/action", post(player::apply_action))
}
