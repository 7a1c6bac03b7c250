pub mod dashboard;
pub mod health;
pub mod sales;

use actix_web::web;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    dashboard::controllers::configure(cfg);
}
