/// Ranking Module
///
/// Orders the pharmacies that stock a requested drug by a weighted blend of
/// three bucketed signals.
///
/// # Workflow
/// 1. Great-circle distance from the user, when both locations are known
/// 2. Drop out-of-stock and out-of-radius candidates
/// 3. Stock, proximity and freshness signals
/// 4. Weighted sum, sort descending, truncate to the requested limit
pub mod scorer;
pub mod signals;

pub use scorer::PharmacyRanker;
pub use signals::{NEUTRAL_PROXIMITY, PROXIMITY_FLOOR};
