mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use jobboard_backend::build_router;
use jobboard_backend::identity::COMPANY_ID_HEADER;

use common::{insert_company, job_body, test_state};

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn json_request(method: Method, uri: &str, company: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(company) = company {
        builder = builder.header(COMPANY_ID_HEADER, company);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_and_ready() {
    let (state, _pool) = test_state().await;
    let app = build_router(state);

    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    let (status, _) = send(&app, get("/api/ready")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn job_lifecycle_over_http() {
    let (state, _pool) = test_state().await;
    let company_id = insert_company(&state, "hr@acme.test").await.to_string();
    let app = build_router(state);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/jobs",
            Some(&company_id),
            &job_body("Rust Engineer", "Full-time", 3),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["message"], json!("Job Posted Successfully"));
    assert_eq!(created["job"]["company"], json!(company_id));
    assert_eq!(
        created["job"]["detail"],
        json!({ "desc": "Rust Engineer description", "requirements": "Experience with Rust" })
    );
    let job_id = created["job"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get("/api/jobs?limit=10")).await;
    assert_eq!(status, StatusCode::OK);
    let list: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(list["totalJobs"], json!(1));
    assert_eq!(list["numOfPage"], json!(1));
    assert_eq!(list["page"], json!(1));
    assert_eq!(list["data"][0]["company"]["email"], json!("hr@acme.test"));
    assert!(list["data"][0]["company"].get("password").is_none());

    let (status, body) = send(&app, get(&format!("/api/jobs/{job_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let detail: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(detail["data"]["id"], json!(job_id));
    assert_eq!(detail["similarJobs"].as_array().unwrap().len(), 1);

    let mut update = job_body("Staff Rust Engineer", "Remote", 7);
    update["salary"] = json!(120000);
    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/jobs/{job_id}"),
            Some(&company_id),
            &update,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated["message"], json!("Job Updated Successfully"));
    assert_eq!(updated["job"]["jobTitle"], json!("Staff Rust Engineer"));
    assert_eq!(updated["job"]["salary"], json!(120000));

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/jobs/{job_id}"))
        .header(COMPANY_ID_HEADER, company_id.as_str())
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        deleted,
        json!({ "success": true, "message": "Job Post Delete Successfully." })
    );

    let (status, body) = send(&app, get(&format!("/api/jobs/{job_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let missing: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        missing,
        json!({ "message": "Job Post Not Found", "success": false })
    );
}

#[tokio::test]
async fn validation_failure_lists_every_issue() {
    let (state, _pool) = test_state().await;
    let company_id = insert_company(&state, "hr@acme.test").await.to_string();
    let app = build_router(state);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/jobs",
            Some(&company_id),
            &json!({ "jobTitle": "", "salary": "lots" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    let errors = payload["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"jobTitle"));
    assert!(fields.contains(&"salary"));
    assert!(errors.iter().any(|e| e["message"] == json!("Job Title is required")));
}

fn raw_request(method: Method, uri: &str, company: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header(COMPANY_ID_HEADER, company)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let (state, _pool) = test_state().await;
    let owner = insert_company(&state, "hr@acme.test").await;
    let job_id = common::post_job(&state, owner, job_body("Rust Engineer", "Full-time", 3)).await;
    let company_id = owner.to_string();
    let app = build_router(state);

    let (status, body) = send(
        &app,
        raw_request(Method::POST, "/api/jobs", &company_id, r#"{"jobTitle": "#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["errors"][0]["field"], json!("body"));
    assert_eq!(payload["errors"][0]["code"], json!("invalid_json"));

    let (status, body) = send(
        &app,
        raw_request(
            Method::PATCH,
            &format!("/api/jobs/{job_id}"),
            &company_id,
            "[1, 2, 3]",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["errors"][0]["code"], json!("invalid_type"));
}

#[tokio::test]
async fn mistyped_field_is_reported_per_field() {
    let (state, _pool) = test_state().await;
    let company_id = insert_company(&state, "hr@acme.test").await.to_string();
    let app = build_router(state);

    let mut body = job_body("Rust Engineer", "Full-time", 3);
    body["jobTitle"] = json!(5);
    let (status, bytes) = send(
        &app,
        json_request(Method::POST, "/api/jobs", Some(&company_id), &body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        payload,
        json!({ "errors": [
            { "field": "jobTitle", "code": "invalid_type", "message": "Job Title must be a string" }
        ] })
    );
}

#[tokio::test]
async fn text_not_found_bodies() {
    let (state, _pool) = test_state().await;
    let app = build_router(state);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/jobs",
            Some("nobody"),
            &job_body("Rust Engineer", "Full-time", 3),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "No Company with id: nobody");

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri("/api/jobs/nope")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "No Job with id: nope");
}

#[tokio::test]
async fn store_failure_is_opaque_server_error() {
    let (state, pool) = test_state().await;
    let app = build_router(state);
    pool.close().await;

    let (status, body) = send(&app, get("/api/jobs")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload, json!({ "message": "Server Error" }));

    let (status, _) = send(&app, get("/api/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
