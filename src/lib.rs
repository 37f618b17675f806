// ============================================================================
// Campus administration backend
// ============================================================================

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod state;

// Re-export the surface the binary and the integration tests wire together.
pub use app::build_router;
pub use config::AppConfig;
pub use domain::errors::DomainError;
pub use state::AppState;
