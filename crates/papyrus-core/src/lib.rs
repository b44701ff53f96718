//! Chat session orchestration over retrieval and generation.

pub mod config;
pub mod error;
pub mod prompt;
pub mod session;

pub use config::Config;
pub use error::SessionError;
pub use session::{ChatSession, HistoryTurn, SessionState};
