mod common;

use common::{hours_ago, insert_drug, insert_pharmacy, stock, test_pool};
use locator_service::models::CoordinateValue;
use locator_service::{AppError, InventoryRepository, SqliteInventoryRepository};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_find_candidates_matches_drug_and_city_case_insensitively() {
    let pool = test_pool().await;
    let mumbai = insert_pharmacy(&pool, "Wellness Forever", "Mumbai", Some("19.0760"), Some("72.8777")).await;
    let pune = insert_pharmacy(&pool, "Noble Chemists", "Pune", None, None).await;
    let insulin = insert_drug(&pool, "Insulin Glargine").await;
    let aspirin = insert_drug(&pool, "Aspirin").await;

    stock(&pool, mumbai, insulin, 40, hours_ago(2)).await;
    stock(&pool, mumbai, aspirin, 300, hours_ago(2)).await;
    stock(&pool, pune, insulin, 12, hours_ago(30)).await;

    let repo = SqliteInventoryRepository::new(pool);

    let in_mumbai = repo.find_candidates("INSULIN", "mumb").await.unwrap();
    assert_eq!(in_mumbai.len(), 1);
    assert_eq!(in_mumbai[0].name, "Wellness Forever");
    assert_eq!(in_mumbai[0].drug_name, "Insulin Glargine");
    assert_eq!(in_mumbai[0].quantity, 40);
    assert_eq!(
        in_mumbai[0].latitude,
        Some(CoordinateValue::Text("19.0760".to_string()))
    );

    let anywhere = repo.find_candidates("insulin", "").await.unwrap();
    assert_eq!(anywhere.len(), 2);
    assert!(anywhere[1].latitude.is_none());
}

#[tokio::test]
async fn test_find_candidates_treats_wildcards_literally() {
    let pool = test_pool().await;
    let pharmacy = insert_pharmacy(&pool, "City Care", "Delhi", None, None).await;
    let drug = insert_drug(&pool, "Vitamin D3").await;
    stock(&pool, pharmacy, drug, 10, hours_ago(1)).await;

    let repo = SqliteInventoryRepository::new(pool);

    assert!(repo.find_candidates("%", "").await.unwrap().is_empty());
    assert!(repo.find_candidates("vitamin_d3", "").await.unwrap().is_empty());
    assert_eq!(repo.find_candidates("vitamin d", "").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_candidates_without_matches_is_empty() {
    let pool = test_pool().await;
    let repo = SqliteInventoryRepository::new(pool);

    assert!(repo.find_candidates("ibuprofen", "Chennai").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ping() {
    let repo = SqliteInventoryRepository::new(test_pool().await);
    assert!(repo.ping().await.is_ok());
}

#[tokio::test]
async fn test_find_candidates_rejects_search_over_cap() {
    let pool = test_pool().await;
    let drug = insert_drug(&pool, "Azithromycin").await;
    for i in 0..4 {
        let pharmacy = insert_pharmacy(&pool, &format!("Pharmacy {}", i), "Kochi", None, None).await;
        stock(&pool, pharmacy, drug, 10, hours_ago(1)).await;
    }

    let at_cap = SqliteInventoryRepository::with_max_candidates(pool.clone(), 4);
    assert_eq!(assert_ok!(at_cap.find_candidates("azithro", "").await).len(), 4);

    let below = SqliteInventoryRepository::with_max_candidates(pool, 3);
    let err = assert_err!(below.find_candidates("azithro", "").await);
    assert!(matches!(err, AppError::Validation(_)));
}
