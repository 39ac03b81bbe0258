//! Core types and traits for the Huhu jokes API.
//!
//! This crate provides the joke model, the pagination window and the
//! repository contract shared by the storage backends and the HTTP gateway.

pub mod error;
pub mod joke;
pub mod page;
pub mod repository;

pub use error::{CoreError, StorageError};
pub use joke::{Joke, JokeId};
pub use page::Page;
pub use repository::{ReadRepository, Repository};
