use crate::validation::ValidationIssue;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use jobboard_db::companies::CompanyPublic;
use jobboard_db::jobs::{JobWithCompany, JobsRow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Body accepted by the create and update handlers. Fields are kept as raw
/// JSON so that missing or mistyped values surface as per-field validation
/// issues, not as deserialisation failures.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub job_title: Option<Value>,
    pub job_type: Option<Value>,
    pub location: Option<Value>,
    /// Integer or numeric string.
    pub salary: Option<Value>,
    pub vacancies: Option<Value>,
    pub experience: Option<Value>,
    pub desc: Option<Value>,
    pub requirements: Option<Value>,
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidJob {
    pub job_title: String,
    pub job_type: String,
    pub location: String,
    pub salary: i64,
    pub vacancies: Option<i64>,
    pub experience: Option<i64>,
    pub desc: String,
    pub requirements: String,
}

impl JobPayload {
    /// Read the extracted request body. A request without a JSON body reads
    /// as an empty payload; unparsable JSON and non-object bodies are
    /// reported against the `body` field.
    pub fn from_body(
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Self, Vec<ValidationIssue>> {
        match body {
            Ok(Json(Value::Object(map))) => Ok(Self::from_object(map)),
            Ok(Json(Value::Null)) | Err(JsonRejection::MissingJsonContentType(_)) => {
                Ok(Self::default())
            }
            Ok(Json(_)) => Err(vec![ValidationIssue::new(
                "body",
                "invalid_type",
                "Request body must be a JSON object",
            )]),
            Err(rejection) => Err(vec![ValidationIssue::new(
                "body",
                "invalid_json",
                rejection.body_text(),
            )]),
        }
    }

    fn from_object(mut map: Map<String, Value>) -> Self {
        Self {
            job_title: map.remove("jobTitle"),
            job_type: map.remove("jobType"),
            location: map.remove("location"),
            salary: map.remove("salary"),
            vacancies: map.remove("vacancies"),
            experience: map.remove("experience"),
            desc: map.remove("desc"),
            requirements: map.remove("requirements"),
        }
    }

    pub fn validate(&self) -> Result<ValidJob, Vec<ValidationIssue>> {
        let mut issues: Vec<ValidationIssue> = Vec::new();

        let job_title = required_text(&self.job_title, "jobTitle", "Job Title", &mut issues);
        let job_type = required_text(&self.job_type, "jobType", "Job Type", &mut issues);
        let location = required_text(&self.location, "location", "Location", &mut issues);

        let salary = match whole_number(self.salary.as_ref()) {
            Ok(Some(v)) => Some(v),
            Ok(None) => {
                issues.push(ValidationIssue::new(
                    "salary",
                    "missing",
                    "Salary is required",
                ));
                None
            }
            Err(()) => {
                issues.push(ValidationIssue::new(
                    "salary",
                    "not_a_number",
                    "Salary must be a whole number",
                ));
                None
            }
        };
        let vacancies = optional_number(self.vacancies.as_ref(), "vacancies", "Vacancies", &mut issues);
        let experience =
            optional_number(self.experience.as_ref(), "experience", "Experience", &mut issues);

        let desc = required_text(&self.desc, "desc", "Job Description", &mut issues);
        let requirements =
            required_text(&self.requirements, "requirements", "Job Requirements", &mut issues);

        match (job_title, job_type, location, salary, desc, requirements) {
            (
                Some(job_title),
                Some(job_type),
                Some(location),
                Some(salary),
                Some(desc),
                Some(requirements),
            ) if issues.is_empty() => Ok(ValidJob {
                job_title,
                job_type,
                location,
                salary,
                vacancies,
                experience,
                desc,
                requirements,
            }),
            _ => Err(issues),
        }
    }
}

fn required_text(
    value: &Option<Value>,
    field: &str,
    label: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            issues.push(ValidationIssue::new(
                field,
                "missing",
                format!("{label} is required"),
            ));
            None
        }
        Some(_) => {
            issues.push(ValidationIssue::new(
                field,
                "invalid_type",
                format!("{label} must be a string"),
            ));
            None
        }
    }
}

fn optional_number(
    value: Option<&Value>,
    field: &str,
    label: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<i64> {
    match whole_number(value) {
        Ok(v) => v,
        Err(()) => {
            issues.push(ValidationIssue::new(
                field,
                "not_a_number",
                format!("{label} must be a whole number"),
            ));
            None
        }
    }
}

/// `Ok(None)` for absent, null or blank input; `Err` for anything that is
/// not a whole number.
fn whole_number(value: Option<&Value>) -> Result<Option<i64>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => Ok(Some(v)),
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                _ => Err(()),
            },
        },
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed.parse::<i64>().map(Some).map_err(|_| ())
            }
        }
        Some(_) => Err(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    pub desc: String,
    pub requirements: String,
}

/// Company fields embedded in job responses. The password never leaves the
/// store layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub profile_url: Option<String>,
    pub job_posts: Vec<Uuid>,
    pub created_at: String,
}

impl From<CompanyPublic> for CompanyResponse {
    fn from(c: CompanyPublic) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            contact: c.contact,
            location: c.location,
            about: c.about,
            profile_url: c.profile_url,
            job_posts: c.job_posts,
            created_at: c.created_at,
        }
    }
}

/// The `company` field of a job: the bare id on mutation responses, the
/// populated document on reads, `null` when the company is gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompanyRef {
    Id(Uuid),
    Populated(CompanyResponse),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    pub job_title: String,
    pub job_type: String,
    pub location: String,
    pub salary: i64,
    pub vacancies: Option<i64>,
    pub experience: Option<i64>,
    pub detail: JobDetail,
    pub company: CompanyRef,
    pub created_at: String,
    pub updated_at: String,
}

impl JobResponse {
    fn from_row(row: JobsRow, company: CompanyRef) -> Self {
        Self {
            id: row.id,
            job_title: row.job_title,
            job_type: row.job_type,
            location: row.location,
            salary: row.salary,
            vacancies: row.vacancies,
            experience: row.experience,
            detail: JobDetail {
                desc: row.description,
                requirements: row.requirements,
            },
            company,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<JobsRow> for JobResponse {
    fn from(row: JobsRow) -> Self {
        let company = CompanyRef::Id(row.company_id);
        Self::from_row(row, company)
    }
}

impl From<JobWithCompany> for JobResponse {
    fn from(joined: JobWithCompany) -> Self {
        let company = match joined.company {
            Some(c) => CompanyRef::Populated(c.into()),
            None => CompanyRef::Missing,
        };
        Self::from_row(joined.job, company)
    }
}

/// Response of create and update.
#[derive(Debug, Serialize)]
pub struct JobMutationResponse {
    pub success: bool,
    pub message: &'static str,
    pub job: JobResponse,
}

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub total_jobs: i64,
    pub data: Vec<JobResponse>,
    pub page: usize,
    pub num_of_page: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailResponse {
    pub success: bool,
    pub data: JobResponse,
    pub similar_jobs: Vec<JobResponse>,
}
