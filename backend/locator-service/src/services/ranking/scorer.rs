//! Candidate Scoring Module
//!
//! Scores candidate pharmacies for a locator search in a single pass:
//! distance, filtering, per-factor signals, weighted sum, sort, truncate.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::signals::{
    distance_label, freshness_label, freshness_signal, proximity_signal, stock_label,
    stock_signal,
};
use crate::config::RankingConfig;
use crate::models::{Candidate, GeoPoint, RankedPharmacy};
use crate::utils::distance_km;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Stateless ranker; safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct PharmacyRanker {
    config: RankingConfig,
}

impl Default for PharmacyRanker {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl PharmacyRanker {
    /// `config` is expected to have passed [`RankingConfig::validate`].
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank against the current wall clock.
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        user_location: Option<GeoPoint>,
        limit: Option<usize>,
    ) -> Vec<RankedPharmacy> {
        self.rank_at(candidates, user_location, limit, Utc::now())
    }

    /// Rank with an explicit `now`, so freshness is reproducible.
    pub fn rank_at(
        &self,
        candidates: Vec<Candidate>,
        user_location: Option<GeoPoint>,
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Vec<RankedPharmacy> {
        let limit = limit.unwrap_or(self.config.default_limit);
        let total = candidates.len();

        let mut ranked: Vec<RankedPharmacy> = candidates
            .into_iter()
            .filter_map(|candidate| self.score_candidate(candidate, user_location.as_ref(), now))
            .collect();

        let survivors = ranked.len();

        // Stable sort keeps input order for equal scores
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(limit);

        debug!(
            candidate_count = total,
            survivors,
            returned = ranked.len(),
            has_user_location = user_location.is_some(),
            top_score = ranked.first().map(|r| r.score),
            "Ranked pharmacy candidates"
        );

        ranked
    }

    /// Score one candidate, or `None` if it is out of stock or out of range.
    fn score_candidate(
        &self,
        candidate: Candidate,
        user_location: Option<&GeoPoint>,
        now: DateTime<Utc>,
    ) -> Option<RankedPharmacy> {
        if candidate.quantity <= 0 {
            return None;
        }

        let location = candidate.location();
        let latitude = candidate.latitude_degrees();
        let longitude = candidate.longitude_degrees();
        let distance = distance_km(user_location, location.as_ref());
        if matches!(distance, Some(d) if d >= self.config.max_radius_km) {
            return None;
        }

        let elapsed_hours = (now - candidate.last_updated).num_seconds() as f64 / SECONDS_PER_HOUR;

        let stock = stock_signal(candidate.quantity);
        let proximity = proximity_signal(distance, self.config.max_radius_km);
        let freshness = freshness_signal(elapsed_hours);

        let score = self.config.stock_weight * stock.powf(self.config.stock_exponent)
            + self.config.distance_weight * proximity.powf(self.config.distance_exponent)
            + self.config.freshness_weight * freshness;

        let explanation = explain(candidate.quantity, distance, elapsed_hours);

        Some(RankedPharmacy {
            pharmacy_id: candidate.pharmacy_id,
            name: candidate.name,
            address: candidate.address,
            city: candidate.city,
            drug_name: candidate.drug_name,
            latitude,
            longitude,
            quantity: candidate.quantity,
            last_updated: candidate.last_updated,
            score,
            stock_signal: stock,
            proximity_signal: proximity,
            freshness_signal: freshness,
            distance_km: distance,
            explanation,
        })
    }
}

/// Build the comma-joined justification for a ranked entry.
fn explain(quantity: i64, distance: Option<f64>, elapsed_hours: f64) -> String {
    let mut reasons = Vec::with_capacity(3);
    reasons.push(stock_label(quantity));
    if let Some(d) = distance {
        reasons.push(distance_label(d));
    }
    reasons.push(freshness_label(elapsed_hours));
    reasons.join(", ")
}
