pub mod forms;

pub mod stats;

pub mod subjects;

pub mod system;

pub mod users;

pub mod views;

pub use forms::configure_form_routes;
pub use stats::configure_stats_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
pub use views::configure_view_routes;

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use super::*;
    use crate::runtime::AppState;
    use crate::runtime::state::test_support::state_with;
    use crate::storage::Backend;
    use crate::storage::testing::FakeRemote;
    use crate::utils::{json_error_handler, query_error_handler};

    const ADMIN: &str = "1";
    const COORDINATOR: &str = "2";
    const TEACHER: &str = "10";
    const STUDENT: &str = "101";

    fn connected() -> (Arc<AppState>, Arc<FakeRemote>) {
        let remote = Arc::new(FakeRemote::default());
        let state = Arc::new(state_with(Backend::Connected(remote.clone())));
        (state, remote)
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_user_routes)
                    .configure(configure_subject_routes)
                    .configure(configure_form_routes)
                    .configure(configure_stats_routes)
                    .configure(configure_view_routes)
                    .configure(configure_system_routes),
            )
            .await
        };
    }

    macro_rules! create_subject {
        ($app:expr, $code:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/v1/subjects")
                .insert_header(("X-User-Id", ADMIN))
                .set_json(json!({
                    "code": $code,
                    "name": format!("{} course", $code),
                    "program": "MBA",
                    "semester": "I",
                    "teacherId": 10
                }))
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(resp).await;
            body["data"]["id"].as_i64().unwrap()
        }};
    }

    macro_rules! rate {
        ($app:expr, $subject_id:expr, $rating:expr) => {{
            let req = test::TestRequest::put()
                .uri(&format!("/api/v1/form/items/{}", $subject_id))
                .insert_header(("X-User-Id", STUDENT))
                .set_json(json!({ "rating": $rating, "comment": "Clear and practical" }))
                .to_request();
            test::call_service(&$app, req).await.status()
        }};
    }

    #[actix_web::test]
    async fn test_rated_submission_shows_up_in_summary() {
        let (state, remote) = connected();
        let app = init_app!(state);
        let subject_id = create_subject!(app, "FIN101");

        let req = test::TestRequest::get()
            .uri("/api/v1/form")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["remaining"], 1);

        assert_eq!(rate!(app, subject_id, 4), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/form/submit")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(remote.submission_rows().len(), 1);
        assert_eq!(remote.item_rows().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/stats/summary?program=MBA&semester=I")
            .insert_header(("X-User-Id", COORDINATOR))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let summary = &body["data"]["summaries"][0];
        assert_eq!(summary["code"], "FIN101");
        assert_eq!(summary["responseCount"], 1);
        assert_eq!(summary["averageDisplay"], "4.00");
        assert_eq!(summary["comments"][0]["comment"], "Clear and practical");
        assert_eq!(body["data"]["completion"]["submitted"], 1);
    }

    #[actix_web::test]
    async fn test_edit_after_submit_is_rejected() {
        let (state, _remote) = connected();
        let app = init_app!(state);
        let subject_id = create_subject!(app, "MKT102");

        let req = test::TestRequest::get()
            .uri("/api/v1/form")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        test::call_service(&app, req).await;
        assert_eq!(rate!(app, subject_id, 5), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/form/submit")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        assert_eq!(rate!(app, subject_id, 2), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/v1/form/submit")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_submit_without_remote_store_is_unavailable() {
        let state = Arc::new(state_with(Backend::LocalOnly));
        let app = init_app!(state);
        let subject_id = create_subject!(app, "OPS103");

        let req = test::TestRequest::get()
            .uri("/api/v1/form")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        test::call_service(&app, req).await;
        assert_eq!(rate!(app, subject_id, 3), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/form/submit")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(state.submissions.len().await, 0);
    }

    #[actix_web::test]
    async fn test_remote_failure_on_submit_returns_generic_notice() {
        let (state, remote) = connected();
        let app = init_app!(state);
        let subject_id = create_subject!(app, "HRM104");

        let req = test::TestRequest::get()
            .uri("/api/v1/form")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        test::call_service(&app, req).await;
        assert_eq!(rate!(app, subject_id, 4), StatusCode::OK);

        remote.set_failing(true);
        let req = test::TestRequest::post()
            .uri("/api/v1/form/submit")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert!(!body["message"].as_str().unwrap().contains("refused"));

        // 表单仍可编辑
        assert_eq!(rate!(app, subject_id, 5), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_role_restrictions() {
        let (state, _remote) = connected();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/subjects")
            .insert_header(("X-User-Id", TEACHER))
            .set_json(json!({
                "code": "FIN101",
                "name": "Finance",
                "program": "MBA",
                "semester": "I",
                "teacherId": 10
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/v1/form")
            .insert_header(("X-User-Id", ADMIN))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get().uri("/api/v1/dashboard").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .insert_header(("X-User-Id", "999"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/v1/subjects")
            .insert_header(("X-User-Id", TEACHER))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_reminders_list_pending_students_and_log_activity() {
        let (state, _remote) = connected();
        let app = init_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/system/reminders?program=MBA&semester=I")
            .insert_header(("X-User-Id", COORDINATOR))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let reminded = body["data"]["reminded"].as_array().unwrap();
        assert!(reminded.iter().any(|u| u["id"] == 101));
        assert!(reminded.iter().all(|u| u["program"] == "MBA" && u["semester"] == "I"));

        let req = test::TestRequest::get()
            .uri("/api/v1/system/activity")
            .insert_header(("X-User-Id", ADMIN))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let entries = body["data"].as_array().unwrap();
        assert!(entries.iter().any(|e| {
            e["message"]
                .as_str()
                .is_some_and(|m| m.starts_with("Reminder sent to Priya Nair"))
        }));
    }

    #[actix_web::test]
    async fn test_status_does_not_require_acting_user() {
        let (state, _remote) = connected();
        let app = init_app!(state);

        let req = test::TestRequest::get().uri("/api/v1/system/status").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["backend"], "connected");
        assert_eq!(body["data"]["subjects"], 0);
    }

    #[actix_web::test]
    async fn test_anonymous_submission_is_hidden_in_bulk_export() {
        let (state, _remote) = connected();
        let app = init_app!(state);
        let subject_id = create_subject!(app, "FIN101");

        let req = test::TestRequest::get()
            .uri("/api/v1/form")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::put()
            .uri("/api/v1/form/anonymous")
            .insert_header(("X-User-Id", STUDENT))
            .set_json(json!({ "anonymous": true }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(rate!(app, subject_id, 4), StatusCode::OK);
        let req = test::TestRequest::post()
            .uri("/api/v1/form/submit")
            .insert_header(("X-User-Id", STUDENT))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/v1/stats/submissions/export")
            .insert_header(("X-User-Id", ADMIN))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let csv = String::from_utf8(body.to_vec()).unwrap();
        assert!(csv.contains("\"\",\"MBA\",\"I\""));
        assert!(!csv.contains("\"101\""));
    }
}
