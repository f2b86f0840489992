use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use uuid::Uuid;

use crate::handlers::jobs::dto::DeleteJobResponse;
use crate::identity::ActingCompany;
use crate::{error::ApiError, state::AppState};

/// DELETE /jobs/{id}
///
/// Unconditional: deleting a missing posting succeeds, and the owning
/// company's job list is left as it is.
pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    actor: ActingCompany,
    Path(job_id): Path<String>,
) -> Result<Json<DeleteJobResponse>, ApiError> {
    let id = Uuid::parse_str(&job_id)
        .map_err(|_| ApiError::not_found_text(format!("No Job with id: {job_id}")))?;

    let removed = state.jobs.delete_by_id(&id).await?;
    tracing::info!(job_id = %id, actor = actor.raw(), removed, "job deleted");

    Ok(Json(DeleteJobResponse {
        success: true,
        message: "Job Post Delete Successfully.",
    }))
}
