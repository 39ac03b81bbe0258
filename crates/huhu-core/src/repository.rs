use crate::error::Result;
use crate::joke::{Joke, JokeId};
use crate::page::Page;
use async_trait::async_trait;

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`].
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the joke with the given id.
    /// Returns `Err(NotFound)` if no record has that id.
    async fn get(&self, id: JokeId) -> Result<Joke>;

    /// Picks one joke at random, freshly on every call.
    /// Returns `Err(Empty)` if the collection has no records.
    async fn random(&self) -> Result<Joke>;

    /// Lists jokes in ascending id order within the given window.
    /// An offset past the end yields an empty vector.
    async fn list(&self, page: Page) -> Result<Vec<Joke>>;

    /// Returns the number of stored jokes.
    async fn count(&self) -> Result<u64>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new joke and returns its assigned id.
    /// `created_at` and `updated_at` are both set to the insertion time.
    async fn create(&self, text: &str) -> Result<JokeId>;

    /// Replaces the text of a joke and refreshes `updated_at`.
    /// Returns `Err(NotFound)` when no row was affected.
    async fn update(&self, id: JokeId, text: &str) -> Result<()>;

    /// Permanently removes a joke.
    /// Returns `Err(NotFound)` when no row was affected.
    async fn delete(&self, id: JokeId) -> Result<()>;

    /// Releases the underlying storage handle. Safe to call more than once.
    async fn close(&self);
}
