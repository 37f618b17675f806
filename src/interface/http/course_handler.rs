use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};

use crate::application::entity_service::RecordDraft;
use crate::application::projection::{Projected, project, project_all};
use crate::domain::errors::DomainError;
use crate::domain::records::{Course, CourseModule, CourseType};
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::interface::http::upload::MutationForm;
use crate::interface::http::request_origin;
use crate::state::AppState;

/// Module entries arrive as indexed form fields: `modules[0].name`,
/// `modules[0].syllabus`, `modules[1].name`, ...
fn modules_from_form(form: &MutationForm) -> Vec<CourseModule> {
    let mut modules = Vec::new();
    let mut index = 0;
    loop {
        let name = form.optional(&format!("modules[{index}].name"));
        let syllabus = form.optional(&format!("modules[{index}].syllabus"));
        if name.is_none() && syllabus.is_none() {
            break;
        }
        modules.push(CourseModule {
            name: name.unwrap_or_default(),
            syllabus: syllabus.unwrap_or_default(),
        });
        index += 1;
    }
    modules
}

fn parse_course_type(raw: &str) -> Result<CourseType, DomainError> {
    CourseType::parse(raw).ok_or_else(|| DomainError::validation("Invalid course type."))
}

struct NewCourse {
    course_name: String,
    description: Option<String>,
    duration: String,
    eligibility: String,
    course_type: CourseType,
    modules: Vec<CourseModule>,
    fee_structure: Option<String>,
    career_opportunities: Option<String>,
}

impl NewCourse {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            course_name: form.required("courseName")?,
            description: form.optional("description"),
            duration: form.required("duration")?,
            eligibility: form.required("eligibility")?,
            course_type: parse_course_type(&form.required("courseType")?)?,
            modules: modules_from_form(form),
            fee_structure: form.optional("feeStructure"),
            career_opportunities: form.optional("careerOpportunities"),
        })
    }

    fn into_course(self, draft: RecordDraft) -> Course {
        Course {
            course_id: draft.external_id,
            course_name: self.course_name,
            description: self.description,
            duration: self.duration,
            eligibility: self.eligibility,
            course_type: self.course_type,
            image: draft.image_path,
            modules: self.modules,
            fee_structure: self.fee_structure,
            career_opportunities: self.career_opportunities,
            created_at: draft.now,
            updated_at: draft.now,
        }
    }
}

struct CoursePatch {
    course_name: Option<String>,
    description: Option<String>,
    duration: Option<String>,
    eligibility: Option<String>,
    course_type: Option<CourseType>,
    modules: Vec<CourseModule>,
    fee_structure: Option<String>,
    career_opportunities: Option<String>,
}

impl CoursePatch {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            course_name: form.optional("courseName"),
            description: form.optional("description"),
            duration: form.optional("duration"),
            eligibility: form.optional("eligibility"),
            course_type: form
                .optional("courseType")
                .map(|raw| parse_course_type(&raw))
                .transpose()?,
            modules: modules_from_form(form),
            fee_structure: form.optional("feeStructure"),
            career_opportunities: form.optional("careerOpportunities"),
        })
    }

    fn apply(self, course: &mut Course) {
        if let Some(course_name) = self.course_name {
            course.course_name = course_name;
        }
        if let Some(description) = self.description {
            course.description = Some(description);
        }
        if let Some(duration) = self.duration {
            course.duration = duration;
        }
        if let Some(eligibility) = self.eligibility {
            course.eligibility = eligibility;
        }
        if let Some(course_type) = self.course_type {
            course.course_type = course_type;
        }
        if !self.modules.is_empty() {
            course.modules = self.modules;
        }
        if let Some(fee_structure) = self.fee_structure {
            course.fee_structure = Some(fee_structure);
        }
        if let Some(career_opportunities) = self.career_opportunities {
            course.career_opportunities = Some(career_opportunities);
        }
    }
}

pub async fn add_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<Course>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let payload = NewCourse::from_form(&form)?;

    let course = state
        .courses
        .create(image, |draft| payload.into_course(draft))
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data("Course added successfully!", project(&origin, course)),
    ))
}

pub async fn list_courses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<Course>>>> {
    let origin = request_origin(&headers);
    let courses = state.courses.list().await?;
    Ok(ApiReply::with_data(
        "Courses fetched successfully",
        project_all(&origin, courses),
    ))
}

pub async fn get_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<String>,
) -> ApiResult<ApiReply<Projected<Course>>> {
    let origin = request_origin(&headers);
    let course = state.courses.get(&course_id).await?;
    Ok(ApiReply::with_data(
        "Course fetched successfully",
        project(&origin, course),
    ))
}

pub async fn update_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<Course>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let patch = CoursePatch::from_form(&form)?;

    let course = state
        .courses
        .update(&course_id, image, |course| patch.apply(course))
        .await?;

    Ok(ApiReply::with_data(
        "Course updated successfully",
        project(&origin, course),
    ))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.courses.delete(&course_id).await?;
    Ok(ApiReply::message("Course deleted successfully"))
}
