pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod envelope;
pub mod error;
pub mod state;

pub use envelope::ApiResponse;
pub use error::ApiError;
pub use state::AppState;
