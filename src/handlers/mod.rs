pub mod interview;

pub use interview::*;

use crate::error::AppError;
use crate::health;
use actix_web::web;

/// Register every route on an `App`. Shared by `main` and the handler tests so
/// both see the same routing table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(health::status))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(health::detailed_metrics))
        .route("/login", web::post().to(login))
        .route("/questions/{session_id}", web::get().to(get_question))
        .route("/submit/{session_id}", web::post().to(submit_answer))
        .route("/skip/{session_id}", web::post().to(skip_question))
        .route("/sessions/{session_id}", web::get().to(get_session));
}

/// JSON bodies that fail to parse get the same `{"error": ...}` shape as every
/// other failure instead of actix-web's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| AppError::from(err).into())
}
