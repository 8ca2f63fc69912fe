use actix_web::{App, HttpResponse, HttpServer, middleware, web};

use rbac_console::config::Config;
use rbac_console::console::Console;
use rbac_console::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env before the logger so RUST_LOG can live there too.
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let console = Console::activate(config).await;
    let store = web::Data::new(console.store().clone());
    let api = web::Data::new(console.api().clone());

    log::info!("Starting server at http://127.0.0.1:8080");

    let result = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(api.clone())
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                HttpResponse::NotFound().json(serde_json::json!({ "error": "Not Found" }))
            }))
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await;

    console.shutdown().await;
    result
}
