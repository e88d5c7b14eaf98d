//! HTTP-level integration tests for marketing campaign codes.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, get_auth, post_json_auth};
use sqlx::PgPool;

use opsdesk_api::auth::password::hash_password;
use opsdesk_db::models::staff::CreateStaff;
use opsdesk_db::repositories::StaffRepo;

const ROLE_CSM: i64 = 2;

async fn csm_token(pool: &PgPool) -> String {
    let input = CreateStaff {
        username: "csm1".to_string(),
        email: "csm1@test.com".to_string(),
        password_hash: hash_password("irrelevant-password-1!").unwrap(),
        role_id: ROLE_CSM,
    };
    let staff = StaffRepo::create(pool, &input).await.unwrap();
    auth_token(staff.id, "csm")
}

/// Creating a campaign returns 201 and it is retrievable by code.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_fetch_campaign(pool: PgPool) {
    let token = csm_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Spring referral push",
        "code": "spring26",
        "source": "newsletter",
        "medium": "email",
    });
    let response = post_json_auth(app, "/api/v1/campaigns", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/campaigns/spring26", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let campaign = body_json(response).await["data"].clone();
    assert_eq!(campaign["name"], "Spring referral push");
    assert_eq!(campaign["source"], "newsletter");
}

/// A duplicate code returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_code_conflicts(pool: PgPool) {
    let token = csm_token(&pool).await;

    for (i, expected) in [(1, StatusCode::CREATED), (2, StatusCode::CONFLICT)] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({
            "name": format!("Campaign {i}"),
            "code": "dupcode",
            "source": null,
            "medium": null,
        });
        let response = post_json_auth(app, "/api/v1/campaigns", &token, body).await;
        assert_eq!(response.status(), expected);
    }
}

/// A blank code is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_blank_code_rejected(pool: PgPool) {
    let token = csm_token(&pool).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Nameless",
        "code": "  ",
        "source": null,
        "medium": null,
    });
    let response = post_json_auth(app, "/api/v1/campaigns", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An unknown code returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_code_not_found(pool: PgPool) {
    let token = csm_token(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/campaigns/nope", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
