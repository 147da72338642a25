//! API routes configuration

use crate::api::handlers::{self, AppState};
use crate::auth;
use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::services::ServeDir;

/// Create the application router.
///
/// Everything under the record panel requires a live session; the login
/// surface and the session probes stay public.
pub fn create_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/login", get(auth::login_page))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/session", get(auth::session_check))
        .route("/api/health", get(health_check));

    let gated = Router::new()
        .route("/", get(handlers::list_page))
        .route("/add", post(handlers::add_record))
        .route("/update/:id", post(handlers::update_record))
        .route("/delete/:id", get(handlers::delete_record))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    public
        .merge(gated)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vista-admin",
        "version": crate::VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{hash_password, AuthGateway, SessionStore};
    use crate::core::config::SessionConfig;
    use crate::db::manager::DatabaseManager;
    use crate::db::repository::{AccountRepository, RecordRepository};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    async fn test_app_with_db() -> (Router, Arc<DatabaseManager>) {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        let accounts = Arc::new(AccountRepository::new(db.clone()));
        let hash = hash_password("admin123").unwrap();
        accounts.create("admin", &hash).await.unwrap();

        let state = AppState {
            records: Arc::new(RecordRepository::new(db.clone())),
            gateway: Arc::new(AuthGateway::new(accounts, SessionStore::new(3600))),
            session: SessionConfig {
                ttl_secs: 3600,
                cookie_name: "vista_session".to_string(),
            },
        };

        (create_routes(state), db)
    }

    async fn test_app() -> Router {
        test_app_with_db().await.0
    }

    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::post("/api/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"username":"admin","password":"admin123"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_anonymous_structured_call_gets_401_body() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::post("/update/1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"a","email":"b@c.d"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_string(response).await;
        assert!(body.contains("\"ok\":false"));
    }

    #[tokio::test]
    async fn test_anonymous_navigation_redirects_to_login() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::ACCEPT, "text/html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_with_generic_message() {
        let app = test_app().await;

        for body in [
            r#"{"username":"admin","password":"wrong"}"#,
            r#"{"username":"nobody","password":"admin123"}"#,
        ] {
            let response = app
                .clone()
                .oneshot(
                    Request::post("/api/login")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let text = body_string(response).await;
            assert!(text.contains("Invalid username or password"));
        }
    }

    #[tokio::test]
    async fn test_login_malformed_body_gets_structured_error() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::post("/api/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"username":"admin""#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("\"ok\":false"));
        assert!(body.contains("message"));
    }

    #[tokio::test]
    async fn test_full_crud_flow() {
        let app = test_app().await;
        let cookie = login(&app).await;

        // Create two records through the form endpoint.
        for payload in ["name=Ana&email=ana%40example.com", "name=Beto&email=beto%40example.com"] {
            let response = app
                .clone()
                .oneshot(
                    Request::post("/add")
                        .header(header::COOKIE, &cookie)
                        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(Body::from(payload))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert!(response.status().is_redirection());
        }

        // Newest first on the list page.
        let response = app
            .clone()
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_string(response).await;
        let beto = page.find("Beto").unwrap();
        let ana = page.find("Ana").unwrap();
        assert!(beto < ana);

        // Structured update answers {ok:true}.
        let response = app
            .clone()
            .oneshot(
                Request::post("/update/1")
                    .header(header::COOKIE, &cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Ana Maria","email":"ana@example.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"ok\":true"));

        // Delete twice; both land back on the list page.
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::get("/delete/2")
                        .header(header::COOKIE, &cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert!(response.status().is_redirection());
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        }

        let response = app
            .clone()
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let page = body_string(response).await;
        assert!(page.contains("Ana Maria"));
        assert!(!page.contains("Beto"));
    }

    #[tokio::test]
    async fn test_list_page_degrades_to_empty_on_store_failure() {
        let (app, db) = test_app_with_db().await;
        let cookie = login(&app).await;

        // Break the record store out from under the page.
        db.execute(|conn| {
            conn.execute_batch("DROP TABLE records")
                .map_err(crate::core::error::AdminError::DatabaseError)
        })
        .await
        .unwrap();

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_string(response).await;
        assert!(page.contains("<tbody>"));
        assert!(!page.contains("data-id="));
    }

    #[tokio::test]
    async fn test_update_blank_fields_rejected() {
        let app = test_app().await;
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::post("/update/1")
                    .header(header::COOKIE, &cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"   ","email":"a@b.c"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("\"ok\":false"));
    }

    #[tokio::test]
    async fn test_update_missing_record_is_silent_success() {
        let app = test_app().await;
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::post("/update/999")
                    .header(header::COOKIE, &cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Ghost","email":"g@h.i"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"ok\":true"));
    }

    #[tokio::test]
    async fn test_session_probe_and_logout() {
        let app = test_app().await;
        let cookie = login(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/session")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("\"ok\":true"));
        assert!(body.contains("admin"));

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/logout")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The token is dead server-side even if the client keeps the cookie.
        let response = app
            .oneshot(
                Request::get("/api/session")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("\"ok\":false"));
    }

    #[tokio::test]
    async fn test_login_page_redirects_when_authenticated() {
        let app = test_app().await;
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::get("/login")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }
}
