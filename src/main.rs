mod config;
mod error;
mod fetcher;
mod models;
mod render;
mod routes;
mod state;
mod tests;
mod utils;
use actix_cors::Cors;
use actix_web::{get, web::Data, App, HttpResponse, HttpServer, Responder};
use config::Config;
use fetcher::SessionStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utils::coinranking::CoinRanking;
use utils::cron::start_session_sweeper;

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok().body("Coin Dashboard Server")
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::init()?;
    let source = Arc::new(CoinRanking::init(&config)?);
    info!(base_url = %config.base_url, page_size = config.page_size, "coin source ready");

    let store = Data::new(SessionStore::new(source, config.page_size));
    let sweeper_store = store.clone();
    let (idle, every) = (config.session_idle, config.session_sweep);
    tokio::spawn(async move { start_session_sweeper(sweeper_store, idle, every).await });
    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(Cors::permissive())
            .service(home)
            .configure(routes::dashboard::init)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    info!(host = %config.host, port = config.port, "dashboard server listening");
    server.await?;

    Ok(())
}
