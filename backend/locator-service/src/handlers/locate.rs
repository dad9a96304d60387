use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::{Candidate, GeoPoint, RankedPharmacy};
use crate::services::{InventoryRepository, PharmacyRanker};

/// Shared state for locator handlers
pub struct LocatorState {
    pub inventory: Arc<dyn InventoryRepository>,
    pub ranker: PharmacyRanker,
}

impl LocatorState {
    pub fn new(inventory: Arc<dyn InventoryRepository>, ranker: PharmacyRanker) -> Self {
        Self { inventory, ranker }
    }
}

// ===========================================================================
// Request/Response DTOs
// ===========================================================================

#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    pub drug: Option<String>,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct LocateQuery {
    pub drug: Option<String>,
    #[serde(default)]
    pub city: String,
    /// Raw so that malformed input degrades to "no location" instead of a 400
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub limit: Option<usize>,
}

impl LocateQuery {
    fn user_location(&self) -> Option<GeoPoint> {
        match (self.lat.as_deref(), self.lng.as_deref()) {
            (Some(lat), Some(lng)) => GeoPoint::parse(lat, lng),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub drug: String,
    pub city: String,
    pub results: Vec<Candidate>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateResponse {
    pub drug: String,
    pub city: String,
    pub user_location: Option<GeoPoint>,
    pub results: Vec<RankedPharmacy>,
    pub count: usize,
}

fn required_drug(drug: Option<&str>) -> Result<String> {
    match drug.map(str::trim) {
        Some(d) if !d.is_empty() => Ok(d.to_string()),
        _ => Err(AppError::Validation("drug is required".to_string())),
    }
}

// ===========================================================================
// REST API Handlers
// ===========================================================================

/// GET /api/v1/inventory - unranked pharmacies stocking a drug
#[get("/api/v1/inventory")]
pub async fn browse_inventory(
    state: web::Data<LocatorState>,
    query: web::Query<InventoryQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let drug = required_drug(query.drug.as_deref())?;
    let city = query.city.trim().to_string();

    let results = state.inventory.find_candidates(&drug, &city).await?;
    let count = results.len();

    Ok(HttpResponse::Ok().json(InventoryResponse {
        drug,
        city,
        results,
        count,
    }))
}

/// GET /api/v1/locate - pharmacies stocking a drug, best match first
#[get("/api/v1/locate")]
pub async fn locate_pharmacies(
    state: web::Data<LocatorState>,
    query: web::Query<LocateQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let drug = required_drug(query.drug.as_deref())?;
    let city = query.city.trim().to_string();

    let user_location = query.user_location();
    if user_location.is_none() && (query.lat.is_some() || query.lng.is_some()) {
        warn!(
            lat = ?query.lat,
            lng = ?query.lng,
            "Ignoring unusable user coordinates"
        );
    }

    let limit = state.ranker.config().effective_limit(query.limit);
    let candidates = state.inventory.find_candidates(&drug, &city).await?;
    let candidate_count = candidates.len();

    let results = state.ranker.rank(candidates, user_location, Some(limit));
    let count = results.len();

    info!(
        drug = %drug,
        city = %city,
        candidate_count,
        returned = count,
        has_user_location = user_location.is_some(),
        "Locator search completed"
    );

    Ok(HttpResponse::Ok().json(LocateResponse {
        drug,
        city,
        user_location,
        results,
        count,
    }))
}
