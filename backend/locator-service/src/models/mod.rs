use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::parse_coordinate;

/// A coordinate as delivered by the inventory store.
///
/// Feeds are inconsistent: some rows carry real numbers, others carry the
/// number as a string. Both shapes are accepted and parsed lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    /// Numeric value, or `None` when the raw value is blank, malformed or not finite.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoordinateValue::Number(n) if n.is_finite() => Some(*n),
            CoordinateValue::Number(_) => None,
            CoordinateValue::Text(raw) => parse_coordinate(raw),
        }
    }
}

impl From<f64> for CoordinateValue {
    fn from(value: f64) -> Self {
        CoordinateValue::Number(value)
    }
}

impl From<&str> for CoordinateValue {
    fn from(value: &str) -> Self {
        CoordinateValue::Text(value.to_string())
    }
}

/// A validated point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Returns `None` unless both values are finite and inside the valid degree range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }

    /// Build a point from raw query-string values.
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        Self::new(parse_coordinate(latitude)?, parse_coordinate(longitude)?)
    }
}

/// One pharmacy/drug/quantity row eligible for ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub pharmacy_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub drug_name: String,
    pub latitude: Option<CoordinateValue>,
    pub longitude: Option<CoordinateValue>,
    pub quantity: i64,
    pub last_updated: DateTime<Utc>,
}

impl Candidate {
    /// Parsed latitude, if it is a number within ±90.
    pub fn latitude_degrees(&self) -> Option<f64> {
        let latitude = self.latitude.as_ref()?.as_f64()?;
        (-90.0..=90.0).contains(&latitude).then_some(latitude)
    }

    /// Parsed longitude, if it is a number within ±180.
    pub fn longitude_degrees(&self) -> Option<f64> {
        let longitude = self.longitude.as_ref()?.as_f64()?;
        (-180.0..=180.0).contains(&longitude).then_some(longitude)
    }

    /// Location of the pharmacy, if both coordinates parse.
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude_degrees()?, self.longitude_degrees()?)
    }
}

/// A candidate annotated with its signals and composite score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPharmacy {
    pub pharmacy_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub drug_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub quantity: i64,
    pub last_updated: DateTime<Utc>,
    pub score: f64,
    pub stock_signal: f64,
    pub proximity_signal: f64,
    pub freshness_signal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub explanation: String,
}
