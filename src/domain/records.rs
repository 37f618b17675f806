//! Record types for every managed entity kind.
//!
//! All records carry a kind-scoped external identifier (immutable once
//! assigned), creation/update timestamps, and optionally a public-root
//! relative image path. The [`Record`] trait is the seam the generic
//! mutation service and counter aggregator work through.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::kind::{ContactStatus, EnquiryStatus, EventStatus};

pub trait Record: Clone + Send + Sync + Serialize + 'static {
    /// Client-facing identifier, unique within the kind's namespace.
    fn external_id(&self) -> &str;

    /// Relative image path owned by this record, if any.
    fn image_path(&self) -> Option<&str> {
        None
    }

    fn set_image_path(&mut self, _path: Option<String>) {}

    /// Status bucket this record falls into, for countable kinds.
    fn status_label(&self) -> Option<&'static str> {
        None
    }

    /// Recency field used to order list responses (descending). Kinds
    /// without a natural date return `None` and list in insertion order.
    fn recency(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn touch(&mut self, now: DateTime<Utc>);
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Transgender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    UG,
    PG,
    #[serde(rename = "Add on course")]
    AddOnCourse,
}

impl CourseType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UG" => Some(Self::UG),
            "PG" => Some(Self::PG),
            "Add on course" => Some(Self::AddOnCourse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardMemberType {
    #[default]
    #[serde(rename = "Board Member")]
    BoardMember,
    Visionary,
}

impl BoardMemberType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Board Member" => Some(Self::BoardMember),
            "Visionary" => Some(Self::Visionary),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoardMember => "Board Member",
            Self::Visionary => "Visionary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub syllabus: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub form_id: String,
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    pub contact_no: String,
    pub present_address: String,
    pub nationality: String,
    pub area_of_study: String,
    pub course: String,
    pub email: String,
    #[serde(default)]
    pub referred_by: String,
    pub dob: NaiveDate,
    pub sex: Sex,
    pub comments: Option<String>,
    pub form_status: EnquiryStatus,
    pub form_viewed_status: bool,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Enquiry {
    fn external_id(&self) -> &str {
        &self.form_id
    }

    fn status_label(&self) -> Option<&'static str> {
        Some(self.form_status.as_str())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub contact_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub terms_accepted: bool,
    pub status: ContactStatus,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for ContactMessage {
    fn external_id(&self) -> &str {
        &self.contact_id
    }

    fn status_label(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub event_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: String,
    pub location: String,
    pub total_slots: u32,
    pub booked_slots: u32,
    pub event_status: EventStatus,
    pub image: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Event {
    fn external_id(&self) -> &str {
        &self.event_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn status_label(&self) -> Option<&'static str> {
        Some(self.event_status.as_str())
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(day_start(self.event_date))
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Shared shape for campus and university news; the two feeds live in
/// separate collections with separate identifier namespaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub news_id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for NewsItem {
    fn external_id(&self) -> &str {
        &self.news_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(day_start(self.date))
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
    pub description: Option<String>,
    pub duration: String,
    pub eligibility: String,
    pub course_type: CourseType,
    pub image: Option<String>,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    pub fee_structure: Option<String>,
    pub career_opportunities: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Course {
    fn external_id(&self) -> &str {
        &self.course_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    pub faculty_id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub place: String,
    pub job_title: String,
    pub category: String,
    pub department: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for FacultyMember {
    fn external_id(&self) -> &str {
        &self.faculty_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub place: String,
    pub job_title: String,
    pub category: String,
    pub department: String,
    #[serde(rename = "type")]
    pub member_type: BoardMemberType,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for BoardMember {
    fn external_id(&self) -> &str {
        &self.member_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub placement_id: String,
    pub name: String,
    pub company: String,
    pub designation: String,
    pub salary: String,
    pub location: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Placement {
    fn external_id(&self) -> &str {
        &self.placement_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankHolder {
    pub rank_holder_id: String,
    pub name: String,
    pub contact: String,
    pub place: String,
    pub rank: String,
    pub department: Option<String>,
    pub course: String,
    pub mark: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for RankHolder {
    fn external_id(&self) -> &str {
        &self.rank_holder_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub achievement_id: String,
    pub title: String,
    pub description: String,
    #[serde(default = "Achievement::default_type")]
    pub achievement_type: String,
    pub date: NaiveDate,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Achievement {
    pub fn default_type() -> String {
        "OTHER".to_string()
    }
}

impl Record for Achievement {
    fn external_id(&self) -> &str {
        &self.achievement_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(day_start(self.date))
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub testimonial_id: String,
    pub text: String,
    pub name: String,
    pub profession: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Testimonial {
    fn external_id(&self) -> &str {
        &self.testimonial_id
    }

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_path(&mut self, path: Option<String>) {
        self.image = path;
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
