use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salespulse::config::Config;
use salespulse::core::{Clock, SystemClock};
use salespulse::middleware::RequestId;
use salespulse::modules;
use salespulse::modules::dashboard::DashboardService;
use salespulse::modules::sales::repositories::{
    data_source_from_config, CachedSalesSource, SalesDataSource,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!("Starting SalesPulse dashboard service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Data source: {}", config.data_source.kind());
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut source: Arc<dyn SalesDataSource> =
        data_source_from_config(&config.data_source, &config.dashboard, clock.clone()).await?;

    if config.dashboard.refresh_secs > 0 {
        let cached = Arc::new(CachedSalesSource::new(
            source,
            Duration::from_secs(config.dashboard.refresh_secs),
        ));
        tokio::spawn(cached.clone().start());
        source = cached;
    }

    let service = Arc::new(DashboardService::new(
        source,
        clock,
        config.dashboard.clone(),
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let cors_origin = config.app.cors_allowed_origin.clone();
    let server = HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET"])
                .max_age(3600),
            None => Cors::default(),
        };

        App::new()
            .wrap(cors)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(service.clone()))
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("salespulse={},actix_web=info", config.app.log_level).into()
    });

    if config.app.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
