use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::dashboard::services::{DashboardService, DateRangeQuery};
use crate::modules::sales::models::PeriodKey;

/// Query parameters for the KPI endpoint
#[derive(Debug, Deserialize)]
pub struct KpiQuery {
    /// `YYYY-MM` or `YYYY-MM-DD`; defaults to the current period
    #[serde(default)]
    pub period: Option<String>,
}

/// GET /dashboard
///
/// Cards, KPI snapshot and the revenue chart, the chart filtered to the
/// optional `start_date`/`end_date` range.
#[tracing::instrument(skip(service))]
pub async fn get_dashboard(
    service: web::Data<Arc<DashboardService>>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let view = service.dashboard(&query).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /dashboard/kpis
#[tracing::instrument(skip(service))]
pub async fn get_kpis(
    service: web::Data<Arc<DashboardService>>,
    query: web::Query<KpiQuery>,
) -> Result<HttpResponse, AppError> {
    let period = match query.period.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<PeriodKey>()
                .map_err(AppError::validation)?,
        ),
        _ => None,
    };

    let snapshot = service.snapshot(period).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// GET /dashboard/sales
#[tracing::instrument(skip(service))]
pub async fn get_sales(
    service: web::Data<Arc<DashboardService>>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let slice = service.sales(&query).await?;
    Ok(HttpResponse::Ok().json(slice))
}

/// Configure routes for dashboard module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .route("", web::get().to(get_dashboard))
            .route("/kpis", web::get().to(get_kpis))
            .route("/sales", web::get().to(get_sales)),
    );
}
