use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use rollcall::config::Config;
use rollcall::database::{self, schema};
use rollcall::state::AppState;
use rollcall::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();

    let pool = database::connect_pool(&config.database_url)
        .await
        .expect("could not connect to database");

    schema::init_schema(&pool)
        .await
        .expect("could not initialize database schema");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = web::router(AppState::new(pool, &config));

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("could not bind listener");
    axum::serve(listener, app).await.expect("server error");
}
