#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::{Extension, Json};
use jobboard_backend::handlers::jobs;
use jobboard_backend::identity::ActingCompany;
use jobboard_backend::state::AppState;
use jobboard_db::companies::CompaniesRow;
use jobboard_db::{create_pool, DbConnectionConfig, DbPool};
use serde_json::{json, Value};
use uuid::Uuid;

pub async fn migrated_pool() -> DbPool {
    let pool = create_pool(&DbConnectionConfig::in_memory())
        .await
        .expect("create pool");
    jobboard_migrations::sqlite_migrator()
        .run(&pool)
        .await
        .expect("migrate");
    pool
}

pub async fn test_state() -> (Arc<AppState>, DbPool) {
    let pool = migrated_pool().await;
    (Arc::new(AppState::new(pool.clone())), pool)
}

pub async fn insert_company(state: &AppState, email: &str) -> Uuid {
    let row = CompaniesRow {
        id: Uuid::now_v7(),
        name: "Acme".into(),
        email: email.into(),
        password: "not-a-real-hash".into(),
        contact: Some("+1 555 0100".into()),
        location: Some("Lisbon".into()),
        about: None,
        profile_url: None,
        job_posts: "[]".into(),
        created_at: "2025-01-01T00:00:00.000000Z".into(),
        updated_at: "2025-01-01T00:00:00.000000Z".into(),
    };
    state.companies.insert(&row).await.expect("insert company");
    row.id
}

pub fn job_body(title: &str, job_type: &str, experience: i64) -> Value {
    json!({
        "jobTitle": title,
        "jobType": job_type,
        "location": "Lisbon",
        "salary": 50000,
        "vacancies": 1,
        "experience": experience,
        "desc": format!("{title} description"),
        "requirements": "Experience with Rust"
    })
}

/// Post a job through the create handler and return its id.
pub async fn post_job(state: &Arc<AppState>, company_id: Uuid, body: Value) -> Uuid {
    let res = jobs::create::create(
        Extension(state.clone()),
        ActingCompany::new(company_id.to_string()),
        Ok(Json(body)),
    )
    .await
    .expect("create job");
    res.0.job.id
}
