use axum::routing::post;
use axum::Router;

use crate::handlers::pairing;
use crate::state::AppState;

/// ```text
/// POST /pairing/code  -> create_code
/// POST /pairing/join  -> join
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pairing/code", post(pairing::create_code))
        .route("/pairing/join", post(pairing::join))
}
