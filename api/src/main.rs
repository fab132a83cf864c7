use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;

use cc_api::{app::create_app, config::Config, routes::reservations::AppState};
use cc_core::services::ReservationService;
use cc_infra::database::{DatabasePool, MySqlProductRepository, MySqlReservationRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::load()?;

    // Initialize logger; RUST_LOG still wins over the configured level
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_filter()));

    info!(
        "Starting ClaveCompás reservations API ({})",
        config.environment()
    );

    let pool = DatabasePool::new(&config.app.database).await?;
    pool.run_migrations().await?;
    info!("Database ready: {}", pool.get_statistics());

    let reservation_repository = Arc::new(MySqlReservationRepository::new(pool.get_pool().clone()));
    let product_repository = Arc::new(MySqlProductRepository::new(pool.get_pool().clone()));
    let reservation_service = Arc::new(ReservationService::new(
        reservation_repository,
        product_repository,
        config.policy(),
    ));
    let app_state = web::Data::new(AppState::new(reservation_service));

    let bind_address = config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let jwt = config.jwt().clone();
    let environment = config.environment();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &jwt, environment));
    if config.workers() > 0 {
        server = server.workers(config.workers());
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}
