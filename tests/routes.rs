use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use scheduling_crm::repository::DieselRepository;
use scheduling_crm::routes;
use serde_json::{Value, json};

mod common;

fn app_with(
    repo: DieselRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(repo))
        .service(web::scope("/api/v1").configure(routes::configure))
        .configure(routes::configure)
}

#[actix_web::test]
async fn test_client_lifecycle_over_http() {
    let test_db = common::TestDb::new("test_client_lifecycle_over_http.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(json!({"name": "Alice", "email": "alice@example.com", "phone": "111"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["phone"], "111");
    assert!(created["updated_at"].is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/clients/{id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["email"], "alice@example.com");

    let req = test::TestRequest::put()
        .uri(&format!("/clients/{id}"))
        .set_json(json!({"name": "Alice B", "email": "alice@example.com"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Alice B");
    assert!(updated["phone"].is_null());

    let req = test::TestRequest::delete()
        .uri(&format!("/clients/{id}"))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["message"], "Client deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/clients/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Client not found");
}

#[actix_web::test]
async fn test_duplicate_email_is_conflict() {
    let test_db = common::TestDb::new("test_duplicate_email_is_conflict.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/clients")
            .set_json(json!({"name": "Alice", "email": "alice@example.com"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_invalid_client_payload_is_unprocessable() {
    let test_db = common::TestDb::new("test_invalid_client_payload_is_unprocessable.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(json!({"name": "Alice", "email": "not-an-email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(json!({"email": "alice@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_client_listing_paginates_and_rejects_zero_page_size() {
    let test_db =
        common::TestDb::new("test_client_listing_paginates_and_rejects_zero_page_size.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    for i in 0..25 {
        let req = test::TestRequest::post()
            .uri("/clients")
            .set_json(json!({"name": format!("Client {i}"), "email": format!("c{i}@example.com")}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri("/clients?page=99&page_size=10")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["page"], 3);
    assert_eq!(page["total"], 25);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 5);
    assert_eq!(page["has_next"], false);
    assert_eq!(page["has_previous"], true);

    let req = test::TestRequest::get()
        .uri("/clients?page_size=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_appointment_lifecycle_over_http() {
    let test_db = common::TestDb::new("test_appointment_lifecycle_over_http.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(json!({"name": "Alice", "email": "alice@example.com"}))
        .to_request();
    let client: Value = test::call_and_read_body_json(&app, req).await;
    let client_id = client["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/appointments")
        .set_json(json!({
            "client_id": client_id,
            "time": "2024-01-01T10:00:00",
            "notes": "first visit",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["status"], "scheduled");

    let req = test::TestRequest::get()
        .uri(&format!("/appointments/{id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["client"]["name"], "Alice");
    assert_eq!(fetched["notes"], "first visit");

    let req = test::TestRequest::put()
        .uri(&format!("/appointments/{id}"))
        .set_json(json!({"time": "2024-01-02T09:00:00", "status": "confirmed"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "confirmed");
    assert!(updated["notes"].is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/clients/{client_id}/appointments"))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], id);

    let req = test::TestRequest::delete()
        .uri(&format!("/appointments/{id}"))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["message"], "Appointment deleted successfully");

    let req = test::TestRequest::delete()
        .uri(&format!("/appointments/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_appointment_for_missing_client_is_not_found() {
    let test_db = common::TestDb::new("test_appointment_for_missing_client_is_not_found.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::post()
        .uri("/appointments")
        .set_json(json!({"client_id": 42, "time": "2024-01-01T10:00:00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/appointments").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 0);
}

#[actix_web::test]
async fn test_appointment_listing_filters() {
    let test_db = common::TestDb::new("test_appointment_listing_filters.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(json!({"name": "Alice", "email": "alice@example.com"}))
        .to_request();
    let client: Value = test::call_and_read_body_json(&app, req).await;

    for (time, status) in [
        ("2024-01-01T00:00:00", "scheduled"),
        ("2024-01-01T23:59:59", "cancelled"),
        ("2024-01-02T00:00:00", "scheduled"),
    ] {
        let req = test::TestRequest::post()
            .uri("/appointments")
            .set_json(json!({"client_id": client["id"], "time": time, "status": status}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/appointments?start_date=2024-01-01&end_date=2024-01-01")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 2);

    let req = test::TestRequest::get()
        .uri("/appointments?status=cancelled&search=ali")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["client"]["email"], "alice@example.com");

    let req = test::TestRequest::get()
        .uri("/appointments?status=postponed")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_routes_are_mounted_under_api_prefix() {
    let test_db = common::TestDb::new("test_routes_are_mounted_under_api_prefix.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/appointments/7")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_client_search_is_unicode_case_insensitive() {
    let test_db = common::TestDb::new("test_client_search_is_unicode_case_insensitive.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(json!({"name": "Émile", "email": "emile@example.com"}))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get()
        .uri("/clients?search=%C3%A9mile")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["name"], "Émile");
}

#[actix_web::test]
async fn test_appointment_time_accepts_utc_offsets() {
    let test_db = common::TestDb::new("test_appointment_time_accepts_utc_offsets.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    let req = test::TestRequest::post()
        .uri("/clients")
        .set_json(json!({"name": "Alice", "email": "alice@example.com"}))
        .to_request();
    let client: Value = test::call_and_read_body_json(&app, req).await;

    for time in ["2024-01-01T10:00:00Z", "2024-01-01T12:00:00+02:00"] {
        let req = test::TestRequest::post()
            .uri("/appointments")
            .set_json(json!({"client_id": client["id"], "time": time}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "{time}");
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["time"], "2024-01-01T10:00:00");
    }

    let req = test::TestRequest::post()
        .uri("/appointments")
        .set_json(json!({"client_id": 0, "time": "2024-01-01T10:00:00Z"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_huge_page_size_returns_single_page() {
    let test_db = common::TestDb::new("test_huge_page_size_returns_single_page.db");
    let app = test::init_service(app_with(test_db.repo())).await;

    for name in ["Alice", "Bob"] {
        let req = test::TestRequest::post()
            .uri("/clients")
            .set_json(json!({"name": name, "email": format!("{name}@example.com")}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri(&format!("/clients?page_size={}", i64::MAX))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 2);
    assert_eq!(page["total_pages"], 1);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
}
