pub mod auth;
pub mod pairing;
pub mod player;

use duet_core::error::CoreError;

use crate::error::AppError;

/// Fallback for unmatched paths and unsupported methods.
pub async fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound("Not found".into()))
}
