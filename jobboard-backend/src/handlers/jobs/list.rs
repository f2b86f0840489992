use std::sync::Arc;

use axum::extract::{Extension, Json, Query};

use crate::handlers::jobs::dto::{JobListResponse, JobResponse};
use crate::handlers::jobs::query::{build_filter, parse_sort, JobListQuery};
use crate::handlers::utils::positive_or_default;
use crate::{error::ApiError, state::AppState};

/// GET /jobs
/// List postings with optional filtering, sorting and offset pagination.
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<JobListResponse>, ApiError> {
    let filter = build_filter(&query);
    let sort = parse_sort(query.sort.as_deref());
    let page = positive_or_default(query.page.as_deref(), 1);
    let limit = positive_or_default(query.limit.as_deref(), state.listing.default_limit);
    let offset = (page - 1).saturating_mul(limit);

    let total = state.jobs.count(&filter).await?;
    let rows = state.jobs.find(&filter, sort, offset, limit).await?;

    let num_of_page = usize::try_from(total).unwrap_or(0).div_ceil(limit);

    Ok(Json(JobListResponse {
        total_jobs: total,
        data: rows.into_iter().map(JobResponse::from).collect(),
        page,
        num_of_page,
    }))
}
