pub mod auth;
pub mod counter;
pub mod entity_service;
pub mod ids;
pub mod projection;

pub use auth::AuthService;
pub use counter::CounterService;
pub use entity_service::{EntityService, RecordDraft};
pub use ids::IdGenerator;
pub use projection::{project, project_all, Projected};
