pub mod memory;
pub mod sqlite;

pub use huhu_core::error::{Result, StorageError};
pub use huhu_core::repository::{ReadRepository, Repository};
pub use memory::InMemoryRepository;
pub use sqlite::{SqliteConfig, SqliteRepository};

use huhu_core::JokeId;

/// Turns the affected-row count of a write into the repository outcome.
///
/// Zero rows means the id matched nothing, which is reported as `NotFound`
/// rather than a silent success.
pub(crate) fn ensure_affected(rows_affected: u64, id: JokeId) -> Result<()> {
    if rows_affected == 0 {
        return Err(StorageError::NotFound(id));
    }
    Ok(())
}
