use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json, Path};
use jobboard_db::jobs::JobReplacement;
use serde_json::Value;
use uuid::Uuid;

use crate::handlers::jobs::dto::{JobMutationResponse, JobPayload};
use crate::handlers::utils::now_timestamp;
use crate::identity::ActingCompany;
use crate::{error::ApiError, state::AppState};

/// PATCH /jobs/{id}
///
/// Replaces the posting's fields in one statement and returns the stored
/// result. Any company may update any posting.
pub async fn update(
    Extension(state): Extension<Arc<AppState>>,
    actor: ActingCompany,
    Path(job_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<JobMutationResponse>, ApiError> {
    let valid = JobPayload::from_body(body)
        .and_then(|payload| payload.validate())
        .map_err(ApiError::validation)?;

    let not_found = || ApiError::not_found_text(format!("No Job with id: {job_id}"));
    let id = Uuid::parse_str(&job_id).map_err(|_| not_found())?;

    let replacement = JobReplacement {
        job_title: valid.job_title,
        job_type: valid.job_type,
        location: valid.location,
        salary: valid.salary,
        vacancies: valid.vacancies,
        experience: valid.experience,
        description: valid.desc,
        requirements: valid.requirements,
        updated_at: now_timestamp(),
    };
    let updated = state
        .jobs
        .replace_by_id(&id, &replacement)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(job_id = %id, actor = actor.raw(), "job updated");
    Ok(Json(JobMutationResponse {
        success: true,
        message: "Job Updated Successfully",
        job: updated.into(),
    }))
}
