use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use jobboard_db::query::JobSort;
use uuid::Uuid;

use crate::handlers::jobs::dto::{JobDetailResponse, JobResponse};
use crate::handlers::jobs::query::similar_filter;
use crate::handlers::jobs::SIMILAR_JOBS_LIMIT;
use crate::{error::ApiError, state::AppState};

/// GET /jobs/{id}
///
/// The posting itself may appear among its own similar jobs.
pub async fn get_by_id(
    Extension(state): Extension<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobDetailResponse>, ApiError> {
    let not_found = || ApiError::not_found("Job Post Not Found");
    let id = Uuid::parse_str(&job_id).map_err(|_| not_found())?;

    let job = state.jobs.find_by_id(&id).await?.ok_or_else(not_found)?;

    let similar = state
        .jobs
        .find(&similar_filter(&job.job), JobSort::IdDesc, 0, SIMILAR_JOBS_LIMIT)
        .await?;

    Ok(Json(JobDetailResponse {
        success: true,
        data: job.into(),
        similar_jobs: similar.into_iter().map(JobResponse::from).collect(),
    }))
}
