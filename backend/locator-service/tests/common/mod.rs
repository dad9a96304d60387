#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use locator_service::db;
use sqlx::SqlitePool;

/// Fresh in-memory store with the real schema applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = db::create_pool("sqlite::memory:", 1)
        .await
        .expect("create in-memory pool");
    db::run_migrations(&pool).await.expect("run migrations");
    pool
}

pub async fn insert_pharmacy(
    pool: &SqlitePool,
    name: &str,
    city: &str,
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> i64 {
    sqlx::query(
        "INSERT INTO pharmacies (name, address, city, latitude, longitude) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(name)
    .bind(format!("{} Main Road", name))
    .bind(city)
    .bind(latitude)
    .bind(longitude)
    .execute(pool)
    .await
    .expect("insert pharmacy")
    .last_insert_rowid()
}

pub async fn insert_drug(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO drugs (name, manufacturer) VALUES (?1, ?2)")
        .bind(name)
        .bind("Generic Labs")
        .execute(pool)
        .await
        .expect("insert drug")
        .last_insert_rowid()
}

pub async fn stock(
    pool: &SqlitePool,
    pharmacy_id: i64,
    drug_id: i64,
    quantity: i64,
    last_updated: DateTime<Utc>,
) {
    sqlx::query(
        "INSERT INTO inventory (pharmacy_id, drug_id, quantity, last_updated) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(pharmacy_id)
    .bind(drug_id)
    .bind(quantity)
    .bind(last_updated)
    .execute(pool)
    .await
    .expect("insert inventory");
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    Utc::now() - Duration::hours(hours)
}
