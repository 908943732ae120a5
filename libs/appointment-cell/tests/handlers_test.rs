use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::handlers::*;
use appointment_cell::models::*;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig, TestUser};

fn party_json(user: &TestUser) -> serde_json::Value {
    json!({
        "id": user.id,
        "name": user.name,
        "email": user.email
    })
}

fn profile_json(user: &TestUser) -> serde_json::Value {
    json!({
        "id": user.id,
        "name": user.name,
        "avatar": null
    })
}

/// Mounts the account lookups every booking makes: the provider check
/// for the target and the plain lookup for the requesting client.
async fn mount_booking_users(mock_server: &MockServer, client: &TestUser, provider: &TestUser) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", format!("eq.{}", provider.id)))
        .and(query_param("provider", "is.true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([MockSupabaseResponses::user_row(provider)])),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", format!("eq.{}", client.id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([MockSupabaseResponses::user_row(client)])),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_list_appointments_returns_page() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");

    let slot = Utc::now() + Duration::hours(30);
    let appointment_id = Uuid::new_v4();
    let mut row =
        MockSupabaseResponses::appointment_row(appointment_id, client.id, provider.id, &slot.to_rfc3339());
    row["provider"] = profile_json(&provider);

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("user_id", format!("eq.{}", client.id)))
        .and(query_param("canceled_at", "is.null"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&mock_server)
        .await;

    let result = list_appointments(
        State(Arc::new(config)),
        Extension(client.to_auth_user()),
        Query(ListAppointmentsQuery { page: None }),
    )
    .await;

    assert!(result.is_ok(), "Expected listing to succeed, got: {:?}", result.err());
    let response = result.unwrap().0;
    let entries = response.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], json!(appointment_id));
    assert_eq!(entries[0]["past"], json!(false));
    assert_eq!(entries[0]["cancelable"], json!(true));
    assert_eq!(entries[0]["provider"]["name"], json!("Diego"));
    // The listing never leaks the provider's email
    assert!(entries[0]["provider"]["email"].is_null());
}

#[tokio::test]
async fn test_list_appointments_requests_second_page() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("user_id", format!("eq.{}", client.id)))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = list_appointments(
        State(Arc::new(config)),
        Extension(client.to_auth_user()),
        Query(ListAppointmentsQuery { page: Some(2) }),
    )
    .await;

    assert!(result.is_ok(), "Expected page 2 to succeed, got: {:?}", result.err());
    assert_eq!(result.unwrap().0, json!([]));
}

#[tokio::test]
async fn test_book_appointment_success() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");
    mount_booking_users(&mock_server, &client, &provider).await;

    // Requested twenty past the hour; stored at the top of the hour
    let requested = (Utc::now() + Duration::hours(25))
        .date_naive()
        .and_hms_opt(14, 20, 0)
        .unwrap()
        .and_utc();
    let slot = requested.date_naive().and_hms_opt(14, 0, 0).unwrap().and_utc();
    let appointment_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("provider_id", format!("eq.{}", provider.id)))
        .and(query_param("date", format!("eq.{}", slot.to_rfc3339())))
        .and(query_param("canceled_at", "is.null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::appointment_row(
                appointment_id,
                client.id,
                provider.id,
                &slot.to_rfc3339(),
            )
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/notifications"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::notification_row(Uuid::new_v4(), provider.id, "Novo agendamento")
        ])))
        .mount(&mock_server)
        .await;

    let result = book_appointment(
        State(Arc::new(config)),
        Extension(client.to_auth_user()),
        Json(BookAppointmentRequest {
            provider_id: provider.id,
            date: requested,
        }),
    )
    .await;

    assert!(result.is_ok(), "Expected booking to succeed, got: {:?}", result.err());
    let response = result.unwrap().0;
    assert_eq!(response["id"], json!(appointment_id));
    assert_eq!(response["date"], json!(slot));
    assert_eq!(response["provider_id"], json!(provider.id));
    assert_eq!(response["past"], json!(false));
    assert_eq!(response["cancelable"], json!(true));
    assert!(response["canceled_at"].is_null());
}

#[tokio::test]
async fn test_book_appointment_rejects_non_provider() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let target = TestUser::client("Pedro", "pedro@example.com");

    // The provider-flag filter finds nothing for a plain client
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", format!("eq.{}", target.id)))
        .and(query_param("provider", "is.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = book_appointment(
        State(Arc::new(config)),
        Extension(client.to_auth_user()),
        Json(BookAppointmentRequest {
            provider_id: target.id,
            date: Utc::now() + Duration::hours(25),
        }),
    )
    .await;

    match result.unwrap_err() {
        AppError::BadRequest(msg) => assert!(msg.contains("providers")),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_book_appointment_rejects_taken_slot() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");
    mount_booking_users(&mock_server, &client, &provider).await;

    let requested = (Utc::now() + Duration::hours(25))
        .date_naive()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        .and_utc();

    // Someone else already holds the slot
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("provider_id", format!("eq.{}", provider.id)))
        .and(query_param("canceled_at", "is.null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::appointment_row(
                Uuid::new_v4(),
                Uuid::new_v4(),
                provider.id,
                &requested.to_rfc3339(),
            )
        ])))
        .mount(&mock_server)
        .await;

    let result = book_appointment(
        State(Arc::new(config)),
        Extension(client.to_auth_user()),
        Json(BookAppointmentRequest {
            provider_id: provider.id,
            date: requested,
        }),
    )
    .await;

    match result.unwrap_err() {
        AppError::BadRequest(msg) => assert!(msg.contains("not available")),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_book_appointment_conflict_on_insert() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");
    mount_booking_users(&mock_server, &client, &provider).await;

    let requested = (Utc::now() + Duration::hours(25))
        .date_naive()
        .and_hms_opt(11, 0, 0)
        .unwrap()
        .and_utc();

    // The slot looked free, but a concurrent insert won the race
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("provider_id", format!("eq.{}", provider.id)))
        .and(query_param("canceled_at", "is.null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(MockSupabaseResponses::unique_violation()),
        )
        .mount(&mock_server)
        .await;

    let result = book_appointment(
        State(Arc::new(config)),
        Extension(client.to_auth_user()),
        Json(BookAppointmentRequest {
            provider_id: provider.id,
            date: requested,
        }),
    )
    .await;

    match result.unwrap_err() {
        AppError::BadRequest(msg) => assert!(msg.contains("not available")),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_book_appointment_rejects_past_date() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");
    mount_booking_users(&mock_server, &client, &provider).await;

    let result = book_appointment(
        State(Arc::new(config)),
        Extension(client.to_auth_user()),
        Json(BookAppointmentRequest {
            provider_id: provider.id,
            date: Utc::now() - Duration::hours(3),
        }),
    )
    .await;

    match result.unwrap_err() {
        AppError::BadRequest(msg) => assert!(msg.contains("Past dates")),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_appointment_success() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");
    let appointment_id = Uuid::new_v4();
    let slot = Utc::now() + Duration::hours(30);

    let mut row =
        MockSupabaseResponses::appointment_row(appointment_id, client.id, provider.id, &slot.to_rfc3339());
    row["provider"] = party_json(&provider);
    row["user"] = party_json(&client);

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&mock_server)
        .await;

    let mut updated =
        MockSupabaseResponses::appointment_row(appointment_id, client.id, provider.id, &slot.to_rfc3339());
    updated["canceled_at"] = json!(Utc::now());

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([updated])))
        .mount(&mock_server)
        .await;

    let result = cancel_appointment(
        State(Arc::new(config)),
        Path(appointment_id),
        Extension(client.to_auth_user()),
    )
    .await;

    assert!(result.is_ok(), "Expected cancel to succeed, got: {:?}", result.err());
    let response = result.unwrap().0;
    assert_eq!(response["id"], json!(appointment_id));
    assert!(!response["canceled_at"].is_null());
    assert_eq!(response["cancelable"], json!(false));
    assert_eq!(response["provider"]["email"], json!("diego@example.com"));
    assert_eq!(response["user"]["name"], json!("Laura"));
}

#[tokio::test]
async fn test_cancel_appointment_rejects_foreign_user() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let owner = TestUser::client("Laura", "laura@example.com");
    let intruder = TestUser::client("Pedro", "pedro@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");
    let appointment_id = Uuid::new_v4();

    let mut row = MockSupabaseResponses::appointment_row(
        appointment_id,
        owner.id,
        provider.id,
        &(Utc::now() + Duration::hours(30)).to_rfc3339(),
    );
    row["provider"] = party_json(&provider);
    row["user"] = party_json(&owner);

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&mock_server)
        .await;

    let result = cancel_appointment(
        State(Arc::new(config)),
        Path(appointment_id),
        Extension(intruder.to_auth_user()),
    )
    .await;

    match result.unwrap_err() {
        AppError::Auth(msg) => assert!(msg.contains("permission")),
        other => panic!("Expected Auth error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_appointment_rejects_inside_two_hours() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let provider = TestUser::provider("Diego", "diego@example.com");
    let appointment_id = Uuid::new_v4();

    let mut row = MockSupabaseResponses::appointment_row(
        appointment_id,
        client.id,
        provider.id,
        &(Utc::now() + Duration::minutes(90)).to_rfc3339(),
    );
    row["provider"] = party_json(&provider);
    row["user"] = party_json(&client);

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&mock_server)
        .await;

    let result = cancel_appointment(
        State(Arc::new(config)),
        Path(appointment_id),
        Extension(client.to_auth_user()),
    )
    .await;

    match result.unwrap_err() {
        AppError::Auth(msg) => assert!(msg.contains("2 hours in advance")),
        other => panic!("Expected Auth error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_appointment_unknown_id() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    let client = TestUser::client("Laura", "laura@example.com");
    let appointment_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = cancel_appointment(
        State(Arc::new(config)),
        Path(appointment_id),
        Extension(client.to_auth_user()),
    )
    .await;

    match result.unwrap_err() {
        AppError::NotFound(msg) => assert!(msg.contains("not found")),
        other => panic!("Expected NotFound, got: {:?}", other),
    }
}
