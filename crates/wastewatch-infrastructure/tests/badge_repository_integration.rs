use chrono::Utc;
use std::sync::Arc;

use wastewatch_domain::badge::{
    Badge, BadgeCatalog, BadgeCategory, BadgeFilter, BadgeRarity, BadgeRepository,
};
use wastewatch_domain::shared::{BadgeId, DomainError};
use wastewatch_infrastructure::persistence::repositories::SqliteBadgeRepository;


#[tokio::test]
async fn badge_repo_seeding_is_idempotent_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteBadgeRepository::new(Arc::new(pool.clone()));
    let catalog = BadgeCatalog::default_catalog();

    let mut inserted = 0;
    for def in catalog.definitions() {
        let badge = Badge::new(def.clone(), Utc::now()).expect("valid badge");
        if repo.insert_if_absent(&badge).await.expect("insert") {
            inserted += 1;
        }
    }
    assert_eq!(inserted, catalog.len());

    // Second pass with fresh ids inserts nothing
    for def in catalog.definitions() {
        let badge = Badge::new(def.clone(), Utc::now()).expect("valid badge");
        assert!(!repo.insert_if_absent(&badge).await.expect("insert"));
    }

    let all = repo.find_all(&BadgeFilter::default()).await.expect("find all");
    assert_eq!(all.len(), catalog.len());

    // Ordered by category then name
    let keys: Vec<(String, String)> = all
        .iter()
        .map(|b| (b.category().as_str().to_string(), b.name().to_string()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[tokio::test]
async fn badge_repo_filter_and_deactivate_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteBadgeRepository::new(Arc::new(pool.clone()));

    for def in BadgeCatalog::default_catalog().definitions() {
        repo.insert_if_absent(&Badge::new(def.clone(), Utc::now()).unwrap())
            .await
            .unwrap();
    }

    let mut first = repo
        .find_by_name("First Report")
        .await
        .expect("find")
        .expect("seeded");
    assert_eq!(first.category(), BadgeCategory::Reports);

    first.deactivate();
    repo.update(&first).await.expect("update");

    let active = repo.find_active().await.expect("active");
    assert!(active.iter().all(|b| b.name() != "First Report"));

    let reloaded = repo.find_by_id(first.id()).await.unwrap().unwrap();
    assert!(!reloaded.is_active());

    let legendary = repo
        .find_all(&BadgeFilter {
            rarity: Some(BadgeRarity::Legendary),
            ..BadgeFilter::default()
        })
        .await
        .unwrap();
    assert!(!legendary.is_empty());
    assert!(legendary.iter().all(|b| b.rarity() == BadgeRarity::Legendary));
}

#[tokio::test]
async fn badge_repo_unknown_criteria_fails_loudly_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteBadgeRepository::new(Arc::new(pool.clone()));

    sqlx::query(
        r#"INSERT INTO badges (id, name, category, criteria_type, criteria_value, created_at)
           VALUES ('b-legacy', 'Legacy', 'special', 'likes_count', 3, ?1)"#,
    )
    .bind(Utc::now())
    .execute(&pool)
    .await
    .unwrap();

    let result = repo.find_by_id(&BadgeId::from_string("b-legacy")).await;
    assert!(matches!(result, Err(DomainError::InvalidCriteria(_))));
}

#[tokio::test]
async fn badge_repo_update_missing_badge_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteBadgeRepository::new(Arc::new(pool));

    let def = BadgeCatalog::default_catalog().definitions()[0].clone();
    let badge = Badge::new(def, Utc::now()).unwrap();

    assert!(matches!(
        repo.update(&badge).await,
        Err(DomainError::BadgeNotFound(_))
    ));
}
