// Application layer - commands and queries over the repository.
// Any client (CLI today, a UI tomorrow) goes through LedgerService
// rather than touching storage directly.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
