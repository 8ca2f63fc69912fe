use actix_web::{HttpResponse, web};

use crate::store::Store;

/// GET /api/state/dashboard
///
/// Cards and chart series in one body so they always describe the same
/// snapshot of the store.
pub async fn index(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(store.dashboard())
}
