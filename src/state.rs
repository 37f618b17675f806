use std::path::PathBuf;
use std::sync::Arc;

use crate::application::auth::AuthService;
use crate::application::counter::CounterService;
use crate::application::entity_service::EntityService;
use crate::domain::kind::Kind;
use crate::domain::records::{
    Achievement, BoardMember, ContactMessage, Course, Enquiry, Event, FacultyMember, NewsItem,
    Placement, RankHolder, Record, Testimonial,
};
use crate::infrastructure::image_store::ImageStore;
use crate::infrastructure::memory::{MemoryCounterStore, MemoryRecordStore};

/// One mutation service per entity kind plus the auth gate. Cheap to clone;
/// everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    pub enquiries: EntityService<Enquiry>,
    pub contacts: EntityService<ContactMessage>,
    pub events: EntityService<Event>,
    pub campus_news: EntityService<NewsItem>,
    pub university_news: EntityService<NewsItem>,
    pub courses: EntityService<Course>,
    pub faculty: EntityService<FacultyMember>,
    pub board_members: EntityService<BoardMember>,
    pub placements: EntityService<Placement>,
    pub rank_holders: EntityService<RankHolder>,
    pub achievements: EntityService<Achievement>,
    pub testimonials: EntityService<Testimonial>,
    pub auth: Arc<AuthService>,
}

fn memory_service<T: Record>(
    kind: Kind,
    counters: &CounterService,
    images: &Arc<ImageStore>,
) -> EntityService<T> {
    EntityService::new(
        kind,
        Arc::new(MemoryRecordStore::new()),
        counters.clone(),
        Arc::clone(images),
    )
}

impl AppState {
    /// Wires every service against the in-memory backends, with images
    /// rooted at `public_dir`.
    pub fn in_memory(public_dir: impl Into<PathBuf>, admin_access_code: impl Into<String>) -> Self {
        let images = Arc::new(ImageStore::new(public_dir));
        let counters = CounterService::new(Arc::new(MemoryCounterStore::new()));

        Self {
            enquiries: memory_service(Kind::Enquiry, &counters, &images),
            contacts: memory_service(Kind::ContactMessage, &counters, &images),
            events: memory_service(Kind::Event, &counters, &images),
            campus_news: memory_service(Kind::CampusNews, &counters, &images),
            university_news: memory_service(Kind::UniversityNews, &counters, &images),
            courses: memory_service(Kind::Course, &counters, &images),
            faculty: memory_service(Kind::Faculty, &counters, &images),
            board_members: memory_service(Kind::BoardMember, &counters, &images),
            placements: memory_service(Kind::Placement, &counters, &images),
            rank_holders: memory_service(Kind::RankHolder, &counters, &images),
            achievements: memory_service(Kind::Achievement, &counters, &images),
            testimonials: memory_service(Kind::Testimonial, &counters, &images),
            auth: Arc::new(AuthService::new(admin_access_code)),
        }
    }
}
