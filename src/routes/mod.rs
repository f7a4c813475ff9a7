use actix_files as fs;
use actix_web::{web, HttpResponse, Responder};
use log::info;
use std::path::Path;

/// HTTP handler for the index page
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Chess match server")
}

/// Configure the HTTP routes. Static files are only served if `static_dir` exists.
pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/").route(web::get().to(index)));

    if static_dir.is_dir() {
        cfg.service(fs::Files::new("/static", static_dir));
    } else {
        info!("Static directory {} not found, /static disabled", static_dir.display());
    }
}
