use blood_bank::domain::model::{
    BloodGroup, NewBloodRequest, NewUser, RequestStatus, Sex, UrgencyLevel, UserType,
};
use blood_bank::{BloodBankApi, BloodBankError, ClientConfig, HttpBloodBankApi};
use httpmock::prelude::*;

fn api_for(server: &MockServer) -> HttpBloodBankApi {
    let config = ClientConfig::default().with_api_base_url(server.url("/api"));
    HttpBloodBankApi::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_blood_stock() {
    let server = MockServer::start();
    let stock_mock = server.mock(|when, then| {
        when.method(GET).path("/api/blood-stock");
        then.status(200).json_body(serde_json::json!([
            {"bloodGroup": "O+", "units": 14},
            {"bloodGroup": "AB-", "units": 2}
        ]));
    });

    let levels = api_for(&server).blood_stock().await.unwrap();

    stock_mock.assert();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].blood_group, BloodGroup::OPositive);
    assert_eq!(levels[1].units, 2);
}

#[tokio::test]
async fn test_fetch_blood_requests_tolerates_unknown_labels() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blood-requests");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 7,
                "userEmail": "ward7@citygeneral.org",
                "userName": "Dr. Mensah",
                "userType": "Receiver",
                "requiredBloodGroup": "B-",
                "quantityRequired": 2,
                "totalAmount": 2200,
                "urgencyLevel": "Emergency",
                "hospitalName": "City General",
                "status": "Archived"
            }
        ]));
    });

    let requests = api_for(&server).blood_requests().await.unwrap();

    assert_eq!(requests[0].urgency_level, "Emergency");
    assert_eq!(requests[0].urgency(), None);
    assert_eq!(requests[0].status, Some(RequestStatus::Unknown));
    assert_eq!(requests[0].referred_by, None);
}

#[tokio::test]
async fn test_create_blood_request_posts_camel_case_body() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/blood-requests")
            .json_body(serde_json::json!({
                "userEmail": "dee@example.org",
                "userName": "Dee",
                "userType": "Donor",
                "requiredBloodGroup": "A+",
                "quantityRequired": 1,
                "totalAmount": 0,
                "urgencyLevel": "Normal"
            }));
        then.status(201).json_body(serde_json::json!({
            "id": 42,
            "userEmail": "dee@example.org",
            "userName": "Dee",
            "userType": "Donor",
            "requiredBloodGroup": "A+",
            "quantityRequired": 1,
            "totalAmount": 0,
            "urgencyLevel": "Normal",
            "status": "Pending"
        }));
    });

    let payload = NewBloodRequest {
        user_email: "dee@example.org".into(),
        user_name: "Dee".into(),
        user_type: UserType::Donor,
        required_blood_group: BloodGroup::APositive,
        quantity_required: 1,
        total_amount: 0,
        urgency_level: UrgencyLevel::Normal,
        hospital_name: None,
        referred_by: None,
        purpose_of_issue: None,
    };
    let created = api_for(&server).create_blood_request(&payload).await.unwrap();

    create_mock.assert();
    assert_eq!(created.id, 42);
    assert_eq!(created.status, Some(RequestStatus::Pending));
}

#[tokio::test]
async fn test_non_success_surfaces_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/users");
        then.status(409)
            .json_body(serde_json::json!({"message": "Email already registered"}));
    });

    let user = NewUser {
        full_name: "Mina Park".into(),
        age: 30,
        sex: Sex::Female,
        blood_group: BloodGroup::AbPositive,
        email: "mina@example.com".into(),
        phone_number: "555-0101".into(),
        full_address: "12 Elm St".into(),
    };
    let err = api_for(&server).create_user(&user).await.unwrap_err();

    assert!(matches!(err, BloodBankError::NetworkError { .. }));
    assert_eq!(err.user_friendly_message(), "Email already registered");
}

#[tokio::test]
async fn test_non_success_without_message_uses_generic_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blood-requests");
        then.status(500).body("upstream exploded");
    });

    let err = api_for(&server).blood_requests().await.unwrap_err();

    assert_eq!(err.user_friendly_message(), "Failed to fetch blood requests");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 locally.
    let config = ClientConfig::default().with_api_base_url("http://127.0.0.1:9/api");
    let api = HttpBloodBankApi::new(&config).unwrap();

    let err = api.users().await.unwrap_err();

    assert!(matches!(err, BloodBankError::NetworkError { .. }));
    assert_eq!(err.user_friendly_message(), "Failed to fetch users");
}
