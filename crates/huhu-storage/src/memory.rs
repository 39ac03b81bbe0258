use async_trait::async_trait;
use dashmap::DashMap;
use huhu_core::error::{Result, StorageError};
use huhu_core::repository::{ReadRepository, Repository};
use huhu_core::{Joke, JokeId, Page};
use jiff::Timestamp;
use rand::seq::IteratorRandom;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::ensure_affected;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Ids are handed out from an atomic sequence starting at 1 and are never
/// reused, matching an `AUTOINCREMENT` column.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<JokeId, Joke>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, id: JokeId) -> Result<Joke> {
        self.storage
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StorageError::NotFound(id))
    }

    async fn random(&self) -> Result<Joke> {
        let picked = {
            let mut rng = rand::thread_rng();
            self.storage
                .iter()
                .choose(&mut rng)
                .map(|entry| entry.value().clone())
        };

        picked.ok_or(StorageError::Empty)
    }

    async fn list(&self, page: Page) -> Result<Vec<Joke>> {
        let mut jokes: Vec<Joke> = self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        jokes.sort_by_key(|joke| joke.id);

        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);

        Ok(jokes.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.storage.len() as u64)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create(&self, text: &str) -> Result<JokeId> {
        let id = JokeId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let now = Timestamp::now();

        self.storage.insert(
            id,
            Joke {
                id,
                text: text.to_owned(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: JokeId, text: &str) -> Result<()> {
        let rows_affected = match self.storage.get_mut(&id) {
            Some(mut entry) => {
                let joke = entry.value_mut();
                joke.text = text.to_owned();
                joke.updated_at = Timestamp::now().max(joke.updated_at);
                1
            }
            None => 0,
        };

        ensure_affected(rows_affected, id)
    }

    async fn delete(&self, id: JokeId) -> Result<()> {
        let rows_affected = u64::from(self.storage.remove(&id).is_some());
        ensure_affected(rows_affected, id)
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn create_and_get() {
        let repo = InMemoryRepository::new();

        let id = repo.create("why did the chicken").await.unwrap();
        let joke = repo.get(id).await.unwrap();

        assert_eq!(joke.id, id);
        assert_eq!(joke.text, "why did the chicken");
        assert_eq!(joke.created_at, joke.updated_at);
    }

    #[tokio::test]
    async fn ids_start_at_one_and_are_not_reused() {
        let repo = InMemoryRepository::new();

        let first = repo.create("one").await.unwrap();
        repo.delete(first).await.unwrap();
        let second = repo.create("two").await.unwrap();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let err = repo.get(JokeId::new(9)).await.unwrap_err();
        assert_eq!(err, StorageError::NotFound(JokeId::new(9)));
    }

    #[tokio::test]
    async fn update_refreshes_updated_at() {
        let repo = InMemoryRepository::new();
        let id = repo.create("before").await.unwrap();
        let before = repo.get(id).await.unwrap();

        repo.update(id, "after").await.unwrap();
        let after = repo.get(id).await.unwrap();

        assert_eq!(after.text, "after");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn update_and_delete_nonexistent() {
        let repo = InMemoryRepository::new();
        let id = JokeId::new(999);

        assert_eq!(
            repo.update(id, "text").await.unwrap_err(),
            StorageError::NotFound(id)
        );
        assert_eq!(repo.delete(id).await.unwrap_err(), StorageError::NotFound(id));
    }

    #[tokio::test]
    async fn random_on_empty_and_single() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.random().await.unwrap_err(), StorageError::Empty);

        let id = repo.create("only one").await.unwrap();
        assert_eq!(repo.random().await.unwrap().id, id);
    }

    #[tokio::test]
    async fn random_reaches_every_record() {
        let repo = InMemoryRepository::new();
        for text in ["a", "b", "c"] {
            repo.create(text).await.unwrap();
        }

        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(repo.random().await.unwrap().id);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn list_windows_in_id_order() {
        let repo = InMemoryRepository::new();
        for i in 0..15 {
            repo.create(&format!("joke {i}")).await.unwrap();
        }

        let page = repo.list(Page::new(5, 10)).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|joke| joke.id.get()).collect();
        assert_eq!(ids, vec![11, 12, 13, 14, 15]);

        assert!(repo.list(Page::new(5, 15)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create(&format!("joke {i}")).await.unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), 10);
        assert_eq!(repo.count().await.unwrap(), 10);
    }
}
