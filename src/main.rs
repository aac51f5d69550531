use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use todo_manager::infrastructure::config::AppConfig;
use todo_manager::infrastructure::logging::init_logging;
use todo_manager::presentation::handlers::AppState;
use todo_manager::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use todo_manager::presentation::routes::{ROUTES, configure};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    info!("Logging initialized successfully");

    let config = AppConfig::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        token_ttl_secs = config.token_ttl_secs,
        "Configuration loaded"
    );

    let state = web::Data::new(AppState::in_memory(&config));
    info!("In-memory stores created");

    let server = HttpServer::new(move || {
        tracing::trace!("Creating new application instance");
        App::new()
            .app_data(state.clone())
            .configure(configure)
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Cors::permissive())
    });

    let server = server.bind(config.bind_addr.as_str())?;
    info!(address = %config.bind_addr, routes = %ROUTES, "Starting HTTP server");
    server.run().await?;
    Ok(())
}
