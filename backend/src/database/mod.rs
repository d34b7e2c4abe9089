pub mod connection;
pub mod film_logs;
pub mod films;
pub mod models;
pub mod rubric_ratings;
pub mod rubrics;
pub mod setup;
pub mod story_lovers;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
