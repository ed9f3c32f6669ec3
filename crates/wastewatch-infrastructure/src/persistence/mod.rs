pub mod repositories;

mod database;
mod repository_base;

pub use database::Database;
pub use repository_base::{RepositoryErrorMapper, SqliteRepositoryBase};
