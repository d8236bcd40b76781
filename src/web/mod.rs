mod handlers;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::config::AdvisorConfig;

pub use state::AppState;

/// Request body cap for JSON payloads and batch uploads.
pub(crate) const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Register all API routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(MAX_BODY_BYTES))
        .route("/api/predict", web::post().to(handlers::predict))
        .route("/api/predictions/{id}", web::get().to(handlers::get_prediction))
        .route("/api/recommend", web::post().to(handlers::recommend))
        .route("/api/soil-health", web::post().to(handlers::soil_health))
        .route("/api/challenges", web::get().to(handlers::challenges))
        .route("/api/soil/{region}", web::get().to(handlers::soil_profile))
        .route("/api/season", web::get().to(handlers::season))
        .route("/api/batch", web::post().to(handlers::batch));
}

pub async fn start_server(config: AdvisorConfig) -> std::io::Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let data = web::Data::new(AppState::new(config));

    tracing::info!(%host, port, "starting crop advisor web server");
    println!("Starting Crop Yield Advisor web server on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
