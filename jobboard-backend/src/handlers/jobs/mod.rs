pub mod create;
pub mod delete;
pub mod dto;
pub mod get_by_id;
pub mod list;
pub mod query;
pub mod update;

/// Upper bound on the "similar jobs" attached to a detail response.
pub const SIMILAR_JOBS_LIMIT: usize = 6;
