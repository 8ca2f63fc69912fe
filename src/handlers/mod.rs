pub mod dashboard;
pub mod state_handlers;

use actix_web::web;

/// View of the store for the presentation layer. Only `/refresh` writes,
/// and only by re-reading the REST API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/state")
            .route("/users", web::get().to(state_handlers::users))
            .route("/roles", web::get().to(state_handlers::roles))
            .route("/permissions", web::get().to(state_handlers::permissions))
            .route("/stats", web::get().to(state_handlers::stats))
            .route("/sync", web::get().to(state_handlers::sync_status))
            .route("/refresh", web::post().to(state_handlers::refresh))
            .route("/dashboard", web::get().to(dashboard::index)),
    );
}
