use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::modules::dashboard::services::DashboardService;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub data_source: String,
    pub data_source_reachable: bool,
}

/// GET /health - Liveness probe
/// Does not check the data source
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /ready - Readiness probe
/// Returns 503 while the sales data source cannot be reached
pub async fn readiness_check(service: web::Data<Arc<DashboardService>>) -> impl Responder {
    let data_source_reachable = match service.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                source = service.source_name(),
                "Data source readiness check failed: {}",
                e
            );
            false
        }
    };

    let response = ReadinessResponse {
        ready: data_source_reachable,
        checks: ReadinessChecks {
            data_source: service.source_name().to_string(),
            data_source_reachable,
        },
    };

    if response.ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
