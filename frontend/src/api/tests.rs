#![cfg(not(coverage))]

use super::*;
use httpmock::prelude::*;
use serde_json::json;

fn user_json(id: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "username": "nurse",
        "email": "nurse@example.com",
        "created_at": "2025-01-01 09:00:00+00:00",
        "updated_at": "2025-01-01 09:00:00+00:00"
    })
}

fn patient_json(id: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "supervisor": "u1",
        "name": "Jane Roe",
        "gender": "Female",
        "age": 54,
        "bed": 12,
        "department": "Surgery",
        "blood_type": "A+",
        "wound": {
            "type": "Burn",
            "location": "Arm",
            "severity": "Mild",
            "infected": "No",
            "size": 2.5,
            "treatment": "Moist Wound Dressing"
        },
        "created_at": "2025-01-02 10:00:00+00:00",
        "updated_at": "2025-01-02 10:00:00+00:00"
    })
}

fn new_patient() -> NewPatient {
    serde_json::from_value(json!({
        "name": "Jane Roe",
        "gender": "Female",
        "age": 54,
        "bed": 12,
        "department": "Surgery",
        "blood_type": "A+",
        "wound": {
            "type": "Burn",
            "location": "Arm",
            "severity": "Mild",
            "infected": "No",
            "size": 2.5,
            "treatment": "Moist Wound Dressing"
        }
    }))
    .unwrap()
}

fn bearer(token: &str) -> RequestOptions {
    RequestOptions::with_token(Some(token.to_string()))
}

#[tokio::test]
async fn login_posts_credentials_and_returns_session() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(json!({ "email": "nurse@example.com", "password": "secret" }));
            then.status(200).json_body(json!({
                "msg": "Login successful",
                "user": user_json("u1"),
                "token": "jwt-token"
            }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let response = client
        .login(&LoginRequest {
            email: "nurse@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.token, "jwt-token");
    assert_eq!(response.user.id, "u1");
    assert_eq!(response.user.name, "nurse");
}

#[tokio::test]
async fn signup_surfaces_structured_error_field() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/signup");
            then.status(400)
                .json_body(json!({ "error": "Email already exists" }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let err = client
        .signup(&SignupRequest {
            username: "nurse".into(),
            email: "nurse@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.status, Some(400));
    assert_eq!(err.error, "Email already exists");
}

#[tokio::test]
async fn current_user_sends_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/user/get")
                .header("Authorization", "Bearer jwt-token");
            then.status(200).json_body(json!({ "user": user_json("u1") }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let user = client.current_user(&bearer("jwt-token")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(user.email, "nurse@example.com");
}

#[tokio::test]
async fn get_patient_unwraps_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/patient/p1");
            then.status(200).json_body(json!({ "patient": patient_json("p1") }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let patient = client.get_patient("p1", &bearer("t")).await.unwrap();
    assert_eq!(patient.id, "p1");
    assert_eq!(patient.wound.infected.as_bool(), Some(false));
}

#[tokio::test]
async fn list_patients_selects_current_supervisor() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/list");
            then.status(200).json_body(json!({
                "users": [
                    { "_id": "u0", "patients": [patient_json("other")] },
                    { "_id": "u1", "patients": [patient_json("p1"), patient_json("p2")] }
                ]
            }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let patients = client.list_patients("u1", &bearer("t")).await.unwrap();
    let ids: Vec<_> = patients.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);

    let none = client.list_patients("u9", &bearer("t")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn create_patient_posts_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/patient/new")
                .header("Authorization", "Bearer t");
            then.status(201).json_body(json!({
                "msg": "Patient created",
                "patient": patient_json("p9")
            }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let created = client
        .create_patient(&new_patient(), &bearer("t"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, "p9");
}

#[tokio::test]
async fn invalid_patient_is_rejected_before_sending() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/patient/new");
            then.status(201).json_body(json!({}));
        })
        .await;

    let mut draft = new_patient();
    draft.gender = "Unknown".into();

    let client = ApiClient::new_with_base_url(server.base_url());
    let err = client.create_patient(&draft, &bearer("t")).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn update_and_delete_hit_id_scoped_paths() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT).path("/patient/update/p1");
            then.status(200).json_body(json!({ "patient": patient_json("p1") }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/patient/delete/p1");
            then.status(200)
                .json_body(json!({ "message": "Patient deleted successfully" }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    client
        .update_patient("p1", &new_patient(), &bearer("t"))
        .await
        .unwrap();
    let deleted = client.delete_patient("p1", &bearer("t")).await.unwrap();

    update.assert_async().await;
    delete.assert_async().await;
    assert_eq!(
        deleted.message.as_deref(),
        Some("Patient deleted successfully")
    );
}

#[tokio::test]
async fn non_json_error_body_uses_status_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/patient/p1");
            then.status(500).body("Internal Server Error");
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let err = client.get_patient("p1", &bearer("t")).await.unwrap_err();
    assert_eq!(err.status, Some(500));
    assert_eq!(err.error, "Request failed with status code 500");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let client = ApiClient::new_with_base_url("http://127.0.0.1:9");
    let err = client.current_user(&bearer("t")).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert!(err.status.is_none());
    assert!(!err.error.is_empty());
}

#[tokio::test]
async fn predictions_post_feature_labels() {
    let server = MockServer::start_async().await;
    let infection = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/infection").json_body(json!({
                "Wound Temperature": 37.8,
                "Wound pH": 6.8,
                "Moisture Level": 75.0,
                "Drug Release": 0.5
            }));
            then.status(200).json_body(json!({
                "infection_prediction": "Yes",
                "infection_probability": 0.82,
                "input_parameters": {}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/healing");
            then.status(200).json_body(json!({
                "healing_time_days": 14.5,
                "input_parameters": {}
            }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let prediction = client
        .predict_infection(
            &InfectionFeatures {
                wound_temperature: 37.8,
                wound_ph: 6.8,
                moisture_level: 75.0,
                drug_release: 0.5,
            },
            &RequestOptions::default(),
        )
        .await
        .unwrap();
    infection.assert_async().await;
    assert!(prediction.is_infected());

    let patient: Patient = serde_json::from_value(patient_json("p1")).unwrap();
    let healing = client
        .predict_healing(&HealingFeatures::from(&patient), &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(healing.healing_time_days, 14.5);
}

#[tokio::test]
async fn connect_source_uploads_csv_as_multipart_file() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/patient/connect/p1")
                .header("Authorization", "Bearer t")
                .header_exists("content-type")
                .body_contains("name=\"file\"")
                .body_contains("filename=\"readings.csv\"")
                .body_contains("Time,Wound Temperature");
            then.status(200)
                .json_body(json!({ "message": "Patient connected to data source" }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let response = client
        .connect_patient_source(
            "p1",
            "readings.csv",
            b"Time,Wound Temperature\n1,36.5\n".to_vec(),
            &bearer("t"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        response.message.as_deref(),
        Some("Patient connected to data source")
    );
}

#[tokio::test]
async fn connect_source_rejects_non_csv_before_sending() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/patient/connect/p1");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let err = client
        .connect_patient_source("p1", "readings.xlsx", vec![1, 2, 3], &bearer("t"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(err.error, "Invalid file extension");
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn connect_source_surfaces_missing_patient() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/patient/connect/p9");
            then.status(404).json_body(json!({ "error": "Patient not found" }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let err = client
        .connect_patient_source("p9", "data.CSV", b"Time\n".to_vec(), &bearer("t"))
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(404));
    assert_eq!(err.error, "Patient not found");
}

#[tokio::test]
async fn delete_account_calls_user_delete() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/user/delete")
                .header("Authorization", "Bearer jwt-token");
            then.status(200).json_body(json!({ "msg": "User deleted" }));
        })
        .await;

    let client = ApiClient::new_with_base_url(server.base_url());
    let response = client.delete_account(&bearer("jwt-token")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.message.as_deref(), Some("User deleted"));
}

#[test]
fn csv_extension_check_ignores_case() {
    assert!(is_csv_file("readings.csv"));
    assert!(is_csv_file("READINGS.CSV"));
    assert!(is_csv_file("a.b.csv"));
    assert!(!is_csv_file("csv"));
    assert!(!is_csv_file("readings.txt"));
}
