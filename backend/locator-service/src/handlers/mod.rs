pub mod health;
pub mod locate;

use actix_web::web;

use crate::error::AppError;

// Re-export handlers for convenience
pub use health::{health_check, readiness_check};
pub use locate::{
    browse_inventory, locate_pharmacies, InventoryQuery, InventoryResponse, LocateQuery,
    LocateResponse, LocatorState,
};

/// Register every locator route on an actix app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed query strings get the same JSON envelope as other errors
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid query: {}", err)).into());

    cfg.app_data(query_config)
        .service(health_check)
        .service(readiness_check)
        .service(browse_inventory)
        .service(locate_pharmacies);
}
