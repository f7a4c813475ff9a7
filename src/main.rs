use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use log::info;
use std::io;
use std::sync::Arc;

use chess_match_server::config::Config;
use chess_match_server::models::AppState;
use chess_match_server::records::HttpRecordsService;
use chess_match_server::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();
    let records = HttpRecordsService::new(config.records_url.clone(), config.records_timeout())
        .map_err(io::Error::other)?;

    info!(
        "Starting chess match server at http://{}:{} (records service {})",
        config.host, config.port, config.records_url
    );

    // Create shared application state
    let app_state = web::Data::new(AppState::new(Arc::new(records)));
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(|cfg| routes::configure_routes(cfg, &static_dir))
    })
    .bind(config.bind_address())?
    .run()
    .await
}
