mod health;
mod joke;

pub use health::{health_handler, root_handler};
pub use joke::{
    create_joke_handler, delete_joke_handler, get_joke_handler, list_jokes_handler,
    not_found_handler, random_joke_handler, update_joke_handler,
};
