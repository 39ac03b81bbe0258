use std::collections::HashSet;

use huhu_core::{JokeId, Page};
use huhu_storage::{ReadRepository, Repository, SqliteConfig, SqliteRepository, StorageError};

struct Fixture {
    repo: SqliteRepository,
}

impl Fixture {
    async fn start() -> Self {
        let config = SqliteConfig::builder().path(":memory:").build();
        let repo = SqliteRepository::connect(&config)
            .await
            .expect("open in-memory sqlite");
        Self { repo }
    }

    async fn seed(&self, count: usize) -> Vec<JokeId> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            ids.push(self.repo.create(&format!("joke number {i}")).await.unwrap());
        }
        ids
    }
}

#[tokio::test]
async fn create_then_get_returns_same_text() {
    let fixture = Fixture::start().await;

    let id = fixture.repo.create("why did the chicken").await.unwrap();
    let joke = fixture.repo.get(id).await.unwrap();

    assert!(id.get() > 0);
    assert_eq!(joke.id, id);
    assert_eq!(joke.text, "why did the chicken");
    assert_eq!(joke.created_at, joke.updated_at);
}

#[tokio::test]
async fn get_missing_id_is_not_found() {
    let fixture = Fixture::start().await;

    let err = fixture.repo.get(JokeId::new(42)).await.unwrap_err();
    assert_eq!(err, StorageError::NotFound(JokeId::new(42)));
}

#[tokio::test]
async fn update_replaces_text_and_never_moves_updated_at_back() {
    let fixture = Fixture::start().await;
    let id = fixture.repo.create("before").await.unwrap();
    let before = fixture.repo.get(id).await.unwrap();

    fixture.repo.update(id, "after").await.unwrap();
    let after = fixture.repo.get(id).await.unwrap();

    assert_eq!(after.text, "after");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let fixture = Fixture::start().await;

    let err = fixture
        .repo
        .update(JokeId::new(999), "text")
        .await
        .unwrap_err();
    assert_eq!(err, StorageError::NotFound(JokeId::new(999)));
}

#[tokio::test]
async fn delete_removes_record() {
    let fixture = Fixture::start().await;
    let id = fixture.repo.create("short lived").await.unwrap();

    fixture.repo.delete(id).await.unwrap();

    assert_eq!(
        fixture.repo.get(id).await.unwrap_err(),
        StorageError::NotFound(id)
    );
    assert_eq!(
        fixture.repo.delete(id).await.unwrap_err(),
        StorageError::NotFound(id)
    );
}

#[tokio::test]
async fn random_on_empty_collection() {
    let fixture = Fixture::start().await;

    let err = fixture.repo.random().await.unwrap_err();
    assert_eq!(err, StorageError::Empty);
}

#[tokio::test]
async fn random_reaches_every_record() {
    let fixture = Fixture::start().await;
    let ids: HashSet<JokeId> = fixture.seed(3).await.into_iter().collect();

    let mut seen = HashSet::new();
    for _ in 0..300 {
        seen.insert(fixture.repo.random().await.unwrap().id);
    }

    assert_eq!(seen, ids);
}

#[tokio::test]
async fn count_matches_full_listing() {
    let fixture = Fixture::start().await;
    fixture.seed(7).await;

    let count = fixture.repo.count().await.unwrap();
    let all = fixture
        .repo
        .list(Page::new(u32::try_from(count).unwrap(), 0))
        .await
        .unwrap();

    assert_eq!(count, 7);
    assert_eq!(all.len() as u64, count);
}

#[tokio::test]
async fn list_windows_in_id_order() {
    let fixture = Fixture::start().await;
    let ids = fixture.seed(15).await;

    let page = fixture.repo.list(Page::new(5, 10)).await.unwrap();
    let got: Vec<JokeId> = page.iter().map(|joke| joke.id).collect();

    assert_eq!(got, ids[10..15].to_vec());
}

#[tokio::test]
async fn list_past_the_end_is_empty() {
    let fixture = Fixture::start().await;
    fixture.seed(3).await;

    assert!(fixture.repo.list(Page::new(10, 3)).await.unwrap().is_empty());
    assert!(fixture
        .repo
        .list(Page::new(10, u64::MAX))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn schema_init_is_idempotent_across_reconnects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jokes.db");
    let config = SqliteConfig::builder()
        .path(path.to_string_lossy())
        .build();

    let first = SqliteRepository::connect(&config).await.unwrap();
    let id = first.create("persisted").await.unwrap();
    first.init_schema().await.unwrap();
    first.close().await;

    let second = SqliteRepository::connect(&config).await.unwrap();
    assert_eq!(second.get(id).await.unwrap().text, "persisted");
    assert_eq!(second.count().await.unwrap(), 1);
    second.close().await;
}

#[tokio::test]
async fn close_is_idempotent() {
    let fixture = Fixture::start().await;

    fixture.repo.close().await;
    fixture.repo.close().await;

    let err = fixture.repo.count().await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
}
