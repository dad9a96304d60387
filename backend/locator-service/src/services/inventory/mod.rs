//! Inventory Module
//!
//! Fetches the pharmacy/drug/quantity rows that a locator search ranks.
//! The query only narrows by drug and city; ranking happens elsewhere.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::{Candidate, CoordinateValue};

/// Upper bound on rows a single search may match. Broader searches are
/// rejected rather than ranked on a partial set.
pub const MAX_CANDIDATES: usize = 10_000;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Rows whose drug name contains `drug` and whose city contains `city`,
    /// both case-insensitive. An empty `city` matches every city.
    async fn find_candidates(&self, drug: &str, city: &str) -> Result<Vec<Candidate>>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<()>;
}

#[derive(Debug, sqlx::FromRow)]
struct CandidateRow {
    pharmacy_id: i64,
    name: String,
    address: String,
    city: String,
    drug_name: String,
    latitude: Option<String>,
    longitude: Option<String>,
    quantity: i64,
    last_updated: DateTime<Utc>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Candidate {
            pharmacy_id: row.pharmacy_id,
            name: row.name,
            address: row.address,
            city: row.city,
            drug_name: row.drug_name,
            latitude: row.latitude.map(CoordinateValue::Text),
            longitude: row.longitude.map(CoordinateValue::Text),
            quantity: row.quantity,
            last_updated: row.last_updated,
        }
    }
}

pub struct SqliteInventoryRepository {
    pool: SqlitePool,
    max_candidates: usize,
}

impl SqliteInventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_max_candidates(pool, MAX_CANDIDATES)
    }

    pub fn with_max_candidates(pool: SqlitePool, max_candidates: usize) -> Self {
        Self {
            pool,
            max_candidates,
        }
    }
}

#[async_trait]
impl InventoryRepository for SqliteInventoryRepository {
    async fn find_candidates(&self, drug: &str, city: &str) -> Result<Vec<Candidate>> {
        let drug_pattern = contains_pattern(drug);
        let city_pattern = contains_pattern(city);

        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT p.id AS pharmacy_id,
                   p.name,
                   p.address,
                   p.city,
                   d.name AS drug_name,
                   p.latitude,
                   p.longitude,
                   i.quantity,
                   i.last_updated
            FROM inventory i
            JOIN pharmacies p ON p.id = i.pharmacy_id
            JOIN drugs d ON d.id = i.drug_id
            WHERE d.name LIKE ?1 ESCAPE '\'
              AND p.city LIKE ?2 ESCAPE '\'
            ORDER BY p.id, d.id
            LIMIT ?3
            "#,
        )
        .bind(&drug_pattern)
        .bind(&city_pattern)
        // One extra row tells a full result apart from an overflowing one
        .bind(self.max_candidates as i64 + 1)
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > self.max_candidates {
            warn!(
                drug,
                city,
                limit = self.max_candidates,
                "Inventory search exceeded candidate cap"
            );
            return Err(AppError::Validation(format!(
                "search matches more than {} inventory rows, narrow it with a city",
                self.max_candidates
            )));
        }

        debug!(drug, city, row_count = rows.len(), "Inventory candidates fetched");

        Ok(rows.into_iter().map(Candidate::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
