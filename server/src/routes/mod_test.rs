use super::*;
use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use crate::state::test_helpers::test_app_state;

const TOKEN: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
const BOUNDARY: &str = "----rivanna-test-boundary";

fn balance_form_body(password: &str, account_type: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"csrfmiddlewaretoken\"\r\n\r\n\
         {TOKEN}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"password\"\r\n\r\n\
         {password}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"account_type\"\r\n\r\n\
         {account_type}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

fn balance_form_request(
    csrf_header: Option<&str>,
    cookie: Option<&str>,
    password: &str,
    account_type: &str,
) -> Request<Body> {
    let mut builder = Request::post(CHECK_BALANCE_PATH)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .header("X-Requested-With", "XMLHttpRequest");
    if let Some(token) = csrf_header {
        builder = builder.header("X-CSRFToken", token);
    }
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(balance_form_body(password, account_type))).unwrap()
}

fn balance_request(csrf_header: Option<&str>, cookie: Option<&str>) -> Request<Body> {
    balance_form_request(csrf_header, cookie, "engine", "savings")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let app = api_routes(test_app_state());
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn csrf_endpoint_mints_token_and_cookie() {
    let app = api_routes(test_app_state());
    let response = app
        .oneshot(Request::get("/api/csrf").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("csrf cookie should be set");
    let body = json_body(response).await;
    let token = body["token"].as_str().unwrap();
    assert_eq!(token.len(), 64);
    assert!(set_cookie.starts_with(&format!("csrftoken={token}")));
}

#[tokio::test]
async fn csrf_endpoint_reuses_existing_cookie() {
    let app = api_routes(test_app_state());
    let request = Request::get("/api/csrf")
        .header(header::COOKIE, format!("csrftoken={TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(json_body(response).await["token"], TOKEN);
}

#[tokio::test]
async fn check_balance_without_csrf_header_is_rejected() {
    let app = api_routes(test_app_state());
    let response = app
        .oneshot(balance_request(None, Some(&format!("csrftoken={TOKEN}"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await, serde_json::json!({ "error": "CSRF verification failed." }));
}

#[tokio::test]
async fn check_balance_with_mismatched_csrf_is_rejected() {
    let app = api_routes(test_app_state());
    let other = TOKEN.replace('a', "b");
    let response = app
        .oneshot(balance_request(Some(&other), Some(&format!("csrftoken={TOKEN}"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn check_balance_without_session_reports_not_logged_in() {
    let app = api_routes(test_app_state());
    let response = app
        .oneshot(balance_request(Some(TOKEN), Some(&format!("csrftoken={TOKEN}"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await, serde_json::json!({ "error": "Not logged in" }));
}

#[tokio::test]
async fn deposit_without_session_reports_not_logged_in() {
    let app = api_routes(test_app_state());
    let request = Request::post("/api/deposit")
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-CSRFToken", TOKEN)
        .header(header::COOKIE, format!("csrftoken={TOKEN}"))
        .body(Body::from(r#"{"amount":"10","password":"x","account_type":"savings"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["error"], "Not logged in");
}

#[tokio::test]
async fn transactions_require_session() {
    let app = api_routes(test_app_state());
    let response = app
        .oneshot(Request::get("/api/transactions").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::services::account::{AccountType, deposit};
    use crate::services::test_support::{integration_pool, seed_signed_in_customer};
    use crate::state::{AppState, SessionSettings};
    use rust_decimal::dec;

    const PASSWORD: &str = "engine";

    fn signed_in_cookie(session_token: &str) -> String {
        format!("csrftoken={TOKEN}; session_token={session_token}")
    }

    fn live_state(pool: sqlx::PgPool) -> AppState {
        AppState::new(pool, SessionSettings { cookie_secure: false, ttl_days: 1 })
    }

    fn json_post(path: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-CSRFToken", TOKEN)
            .header(header::COOKIE, cookie)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn check_balance_returns_balance_for_signed_in_customer() {
        let pool = integration_pool().await;
        let (customer_id, session) = seed_signed_in_customer(&pool, "ada@example.com", "ada", PASSWORD).await;
        deposit(&pool, customer_id, AccountType::Savings, dec!(1234.50)).await.unwrap();

        let response = api_routes(live_state(pool))
            .oneshot(balance_form_request(Some(TOKEN), Some(&signed_in_cookie(&session)), PASSWORD, "savings"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({ "balance": 1234.5 }));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn check_balance_verifies_password_before_account_type() {
        let pool = integration_pool().await;
        let (_, session) = seed_signed_in_customer(&pool, "bob@example.com", "bob", PASSWORD).await;
        let app = api_routes(live_state(pool));
        let cookie = signed_in_cookie(&session);

        let response = app
            .clone()
            .oneshot(balance_form_request(Some(TOKEN), Some(&cookie), "wrong", "business"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await, serde_json::json!({ "error": "Incorrect password." }));

        let response = app
            .clone()
            .oneshot(balance_form_request(Some(TOKEN), Some(&cookie), "wrong", "savings"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(balance_form_request(Some(TOKEN), Some(&cookie), PASSWORD, "business"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, serde_json::json!({ "error": "Business account not found." }));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn deposit_route_credits_and_rejects_overflow() {
        let pool = integration_pool().await;
        let (_, session) = seed_signed_in_customer(&pool, "cy@example.com", "cy", PASSWORD).await;
        let app = api_routes(live_state(pool));
        let cookie = signed_in_cookie(&session);
        let body = serde_json::json!({ "amount": "9999999999999.99", "password": PASSWORD, "account_type": "chequing" });

        let response = app.clone().oneshot(json_post("/api/deposit", &cookie, body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["balance"], serde_json::json!(9_999_999_999_999.99));

        let response = app.oneshot(json_post("/api/deposit", &cookie, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "Deposit would exceed the maximum account balance." })
        );
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn send_money_route_moves_funds_and_reports_errors() {
        let pool = integration_pool().await;
        let (sender, session) = seed_signed_in_customer(&pool, "dee@example.com", "dee", PASSWORD).await;
        seed_signed_in_customer(&pool, "eve@example.com", "eve", PASSWORD).await;
        deposit(&pool, sender, AccountType::Chequing, dec!(50)).await.unwrap();
        let app = api_routes(live_state(pool));
        let cookie = signed_in_cookie(&session);

        let ok = serde_json::json!({ "amount": "20", "account_type": "chequing", "email": "eve@example.com" });
        let response = app.clone().oneshot(json_post("/api/send-money", &cookie, ok)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "message": "$20.00 sent to eve@example.com successfully." })
        );

        let overdraft = serde_json::json!({ "amount": "100", "account_type": "chequing", "email": "eve@example.com" });
        let response = app.clone().oneshot(json_post("/api/send-money", &cookie, overdraft)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"], "Insufficient funds in your account.");

        let unknown = serde_json::json!({ "amount": "1", "account_type": "chequing", "email": "nobody@example.com" });
        let response = app.oneshot(json_post("/api/send-money", &cookie, unknown)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "Recipient email not registered.");
    }
}
