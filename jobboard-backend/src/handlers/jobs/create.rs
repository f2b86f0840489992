use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use jobboard_db::jobs::JobsRow;
use serde_json::Value;
use uuid::Uuid;

use crate::handlers::jobs::dto::{JobMutationResponse, JobPayload};
use crate::handlers::utils::now_timestamp;
use crate::identity::ActingCompany;
use crate::{error::ApiError, state::AppState};

/// POST /jobs
///
/// Persists the posting first and then appends its id to the owning
/// company. The two writes are independent: if the company cannot be found
/// the posting is kept and the request still succeeds.
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    actor: ActingCompany,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<JobMutationResponse>, ApiError> {
    let valid = JobPayload::from_body(body)
        .and_then(|payload| payload.validate())
        .map_err(ApiError::validation)?;

    let company_id = actor
        .company_id()
        .ok_or_else(|| ApiError::not_found_text(format!("No Company with id: {}", actor.raw())))?;

    let now = now_timestamp();
    let row = JobsRow {
        id: Uuid::now_v7(),
        company_id,
        job_title: valid.job_title,
        job_type: valid.job_type,
        location: valid.location,
        salary: valid.salary,
        vacancies: valid.vacancies,
        experience: valid.experience,
        description: valid.desc,
        requirements: valid.requirements,
        created_at: now.clone(),
        updated_at: now.clone(),
    };
    state.jobs.insert(&row).await?;

    let linked = state
        .companies
        .append_job_post(&company_id, &row.id, &now)
        .await?;
    if linked == 0 {
        tracing::warn!(
            job_id = %row.id,
            company_id = %company_id,
            "company not found; job created without back-reference"
        );
    }

    tracing::info!(job_id = %row.id, company_id = %company_id, "job created");
    Ok(Json(JobMutationResponse {
        success: true,
        message: "Job Posted Successfully",
        job: row.into(),
    }))
}
