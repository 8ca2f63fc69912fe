use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::console;
use crate::errors::AppError;
use crate::store::Store;

/// GET /api/state/users
pub async fn users(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(store.users())
}

/// GET /api/state/roles
pub async fn roles(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(store.roles())
}

/// GET /api/state/permissions
pub async fn permissions(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(store.permissions())
}

/// GET /api/state/stats
pub async fn stats(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(store.stats())
}

/// GET /api/state/sync - slot revisions and time of the last applied event
pub async fn sync_status(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(store.sync_status())
}

/// POST /api/state/refresh - re-run the bulk load against the REST API
pub async fn refresh(
    store: web::Data<Store>,
    api: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    let skipped = console::load_all(&api, &store).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "skipped": skipped,
        "stats": store.stats(),
    })))
}
