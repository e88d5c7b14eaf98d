//! HTTP-level integration tests for the onboarding workflow: job creation
//! with round-robin assignment, status moves, the LinkedIn phase, move
//! history, and comments.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, get_auth, patch_json_auth, post_json_auth};
use sqlx::PgPool;

use opsdesk_api::auth::password::hash_password;
use opsdesk_db::models::client::CreateClient;
use opsdesk_db::models::staff::CreateStaff;
use opsdesk_db::repositories::{ClientRepo, StaffRepo};

const ROLE_CSM: i64 = 2;
const ROLE_OPERATOR: i64 = 4;
const ROLE_RESUME_WRITER: i64 = 5;
const ROLE_LINKEDIN_SPECIALIST: i64 = 6;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_staff(pool: &PgPool, username: &str, role_id: i64) -> i64 {
    let input = CreateStaff {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password("irrelevant-password-1!").unwrap(),
        role_id,
    };
    StaffRepo::create(pool, &input)
        .await
        .expect("staff creation should succeed")
        .id
}

async fn create_client(pool: &PgPool, email: &str, plan: &str) -> i64 {
    let price = match plan {
        "ignite" => 9900,
        "professional" => 19900,
        "executive" => 39900,
        other => panic!("unexpected plan {other}"),
    };
    let input = CreateClient {
        email: email.to_string(),
        full_name: "Onboarding Client".to_string(),
        phone: None,
        plan: plan.to_string(),
        operator_id: None,
    };
    ClientRepo::create(pool, &input, price)
        .await
        .expect("client creation should succeed")
        .id
}

/// Open an onboarding job via the API, returning its JSON representation.
async fn create_onboarding(pool: &PgPool, token: &str, client_id: i64) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "client_id": client_id });
    let response = post_json_auth(app, "/api/v1/onboarding", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Move an onboarding job via the API and return the raw response.
async fn move_to(
    pool: &PgPool,
    token: &str,
    job_id: i64,
    to_status: &str,
) -> axum::http::Response<axum::body::Body> {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "to_status": to_status });
    patch_json_auth(app, &format!("/api/v1/onboarding/{job_id}/status"), token, body).await
}

// ---------------------------------------------------------------------------
// Creation and assignment
// ---------------------------------------------------------------------------

/// Opening a job assigns the resume writer least recently handed work, and
/// consecutive jobs rotate between writers.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_assigns_resume_writers_round_robin(pool: PgPool) {
    let writer_a = create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let writer_b = create_staff(&pool, "writer_b", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");

    let client_1 = create_client(&pool, "c1@example.com", "ignite").await;
    let client_2 = create_client(&pool, "c2@example.com", "ignite").await;
    let client_3 = create_client(&pool, "c3@example.com", "ignite").await;

    let job_1 = create_onboarding(&pool, &token, client_1).await;
    let job_2 = create_onboarding(&pool, &token, client_2).await;
    let job_3 = create_onboarding(&pool, &token, client_3).await;

    assert_eq!(job_1["status"], "resume_in_progress");
    // Never-assigned writers go first, lowest id breaking the tie.
    assert_eq!(job_1["resume_writer_id"], writer_a);
    assert_eq!(job_2["resume_writer_id"], writer_b);
    // Third assignment wraps back around to the least recently assigned.
    assert_eq!(job_3["resume_writer_id"], writer_a);
}

/// With no active resume writer the job cannot be opened.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_without_resume_writer_conflicts(pool: PgPool) {
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "client_id": client });
    let response = post_json_auth(app, "/api/v1/onboarding", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A deactivated writer is skipped by the rotation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_inactive_writer_skipped(pool: PgPool) {
    let writer_a = create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let writer_b = create_staff(&pool, "writer_b", ROLE_RESUME_WRITER).await;
    StaffRepo::deactivate(&pool, writer_a).await.unwrap();

    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;

    let job = create_onboarding(&pool, &token, client).await;
    assert_eq!(job["resume_writer_id"], writer_b);
}

/// One onboarding job per client: a second attempt returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_one_job_per_client(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;

    create_onboarding(&pool, &token, client).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "client_id": client });
    let response = post_json_auth(app, "/api/v1/onboarding", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Status moves
// ---------------------------------------------------------------------------

/// A legal table move succeeds and is recorded in the history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_legal_move_recorded_in_history(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let response = move_to(&pool, &token, job_id, "resume_in_review").await;
    assert_eq!(response.status(), StatusCode::OK);
    let moved = body_json(response).await["data"].clone();
    assert_eq!(moved["status"], "resume_in_review");

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/onboarding/{job_id}/history"), &token).await;
    let history = body_json(response).await["data"].clone();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["from_status"], "resume_in_progress");
    assert_eq!(history[0]["to_status"], "resume_in_review");
    assert_eq!(history[0]["moved_by"], operator);
}

/// Skipping ahead in the table is rejected for a non-privileged mover.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_illegal_move_rejected_for_operator(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let response = move_to(&pool, &token, job_id, "portal_setup").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A CSM may move a job backwards, bypassing the table.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_csm_may_move_backwards(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let csm = create_staff(&pool, "csm1", ROLE_CSM).await;
    let op_token = auth_token(operator, "operator");
    let csm_token = auth_token(csm, "csm");

    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &op_token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let response = move_to(&pool, &op_token, job_id, "resume_in_review").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Operator cannot go back, but a CSM can.
    let response = move_to(&pool, &op_token, job_id, "resume_in_progress").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = move_to(&pool, &csm_token, job_id, "resume_in_progress").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The plan allow-list binds everyone: a CSM cannot move an ignite client
/// into the LinkedIn sub-phase.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_plan_gate_binds_csm(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let csm = create_staff(&pool, "csm1", ROLE_CSM).await;
    let token = auth_token(csm, "csm");

    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let response = move_to(&pool, &token, job_id, "linkedin_in_progress").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An unknown status string returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_status_rejected(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let response = move_to(&pool, &token, job_id, "resume_done").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// LinkedIn phase
// ---------------------------------------------------------------------------

/// Starting the LinkedIn phase assigns a specialist and unlocks the side
/// channel into linkedin_in_progress from later statuses.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_linkedin_phase_flow(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let specialist = create_staff(&pool, "li_a", ROLE_LINKEDIN_SPECIALIST).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");

    let client = create_client(&pool, "c1@example.com", "professional").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    // Walk the resume phase, then past the LinkedIn branch into portal setup.
    for to in ["resume_in_review", "resume_approved", "portal_setup"] {
        let response = move_to(&pool, &token, job_id, to).await;
        assert_eq!(response.status(), StatusCode::OK, "move to {to} should succeed");
    }

    // Side channel is closed until the phase is started.
    let response = move_to(&pool, &token, job_id, "linkedin_in_progress").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/onboarding/{job_id}/linkedin-phase"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let started = body_json(response).await["data"].clone();
    assert_eq!(started["linkedin_phase_started"], true);
    assert_eq!(started["linkedin_specialist_id"], specialist);

    // Now the jump is legal even though portal_setup -> linkedin_in_progress
    // is not a table edge.
    let response = move_to(&pool, &token, job_id, "linkedin_in_progress").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The LinkedIn phase is not available on the ignite tier.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_linkedin_phase_rejected_on_ignite(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    create_staff(&pool, "li_a", ROLE_LINKEDIN_SPECIALIST).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");

    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/onboarding/{job_id}/linkedin-phase"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The LinkedIn phase cannot start before the resume is approved.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_linkedin_phase_requires_resume_approved(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    create_staff(&pool, "li_a", ROLE_LINKEDIN_SPECIALIST).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");

    let client = create_client(&pool, "c1@example.com", "executive").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/onboarding/{job_id}/linkedin-phase"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Comments append in order and return oldest first.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_comments_append_in_order(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    for body in ["first note", "second note"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/onboarding/{job_id}/comments"),
            &token,
            serde_json::json!({ "body": body }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/onboarding/{job_id}/comments"), &token).await;
    let comments = body_json(response).await["data"].clone();
    assert_eq!(comments.as_array().unwrap().len(), 2);
    assert_eq!(comments[0]["body"], "first note");
    assert_eq!(comments[1]["body"], "second note");
    assert_eq!(comments[0]["author_id"], operator);
}

/// A blank comment body is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_blank_comment_rejected(pool: PgPool) {
    create_staff(&pool, "writer_a", ROLE_RESUME_WRITER).await;
    let operator = create_staff(&pool, "op1", ROLE_OPERATOR).await;
    let token = auth_token(operator, "operator");
    let client = create_client(&pool, "c1@example.com", "ignite").await;
    let job = create_onboarding(&pool, &token, client).await;
    let job_id = job["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/onboarding/{job_id}/comments"),
        &token,
        serde_json::json!({ "body": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
