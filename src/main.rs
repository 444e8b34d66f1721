use actix_web::{App, HttpServer, middleware, web};

use vkusnosam::config::AppConfig;
use vkusnosam::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env before the logger so RUST_LOG from the file applies
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env: {e}");
        }
    }
    env_logger::init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    log::info!(
        "Step labels: {}, preview limit: {} steps",
        config.labels.code(),
        config.max_preview_steps
    );
    log::info!("Starting server at http://{bind_addr}");

    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(config.clone())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
