//! Wire-level tests for the HTTP gateway.
//!
//! Each test starts a mock server, points a `FetchGateway` at it, and checks
//! the exact requests sent and how responses map onto results and errors.

use pawmatch_client::{ClientConfig, FetchGateway};
use pawmatch_core::{
    DogGateway, DogId, Error, SearchQuery, SortKey, LOGIN_FAILED_MESSAGE,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> FetchGateway {
    let config = ClientConfig {
        base_url: server.uri(),
        timeout_seconds: Some(10),
    };
    FetchGateway::new(config).expect("Failed to create gateway")
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "Ada", "email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    let result = gateway.authenticate("Ada", "ada@example.com").await;
    assert!(result.is_ok(), "Login should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_session_cookie_sent_on_later_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "fetch-access-token=abc123; Path=/; HttpOnly"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .and(header("cookie", "fetch-access-token=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Beagle", "Pug"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    gateway.authenticate("Ada", "ada@example.com").await.unwrap();
    let breeds = gateway.list_breeds().await.unwrap();
    assert_eq!(breeds, vec!["Beagle", "Pug"]);
}

#[tokio::test]
async fn test_login_rejection_surfaces_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Email is not valid"})),
        )
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    match gateway.authenticate("Ada", "not-an-email").await {
        Err(Error::Auth(msg)) => assert_eq!(msg, "Email is not valid"),
        other => panic!("Expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_rejection_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    match gateway.authenticate("Ada", "ada@example.com").await {
        Err(Error::Auth(msg)) => assert_eq!(msg, LOGIN_FAILED_MESSAGE),
        other => panic!("Expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_serializes_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param("breeds[]", "Beagle"))
        .and(query_param("zipCodes[]", "02139"))
        .and(query_param("ageMin", "2"))
        .and(query_param("ageMax", "5"))
        .and(query_param("size", "25"))
        .and(query_param("from", "25"))
        .and(query_param("sort", "age:asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultIds": ["dog-3", "dog-1"],
            "total": 27,
            "next": "/dogs/search?from=50",
            "prev": "/dogs/search?from=0"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut query = SearchQuery::default();
    query.toggle_breed("Beagle");
    query.set_zip_code(Some("02139".to_string()));
    query.set_age_range(Some(2), Some(5));
    query.set_sort("age:asc".parse::<SortKey>().unwrap());
    query.go_to_page(2);

    let gateway = gateway_for(&mock_server);
    let page = gateway.search_dog_ids(&query).await.unwrap();
    assert_eq!(page.total, 27);
    assert_eq!(
        page.result_ids,
        vec![DogId::from("dog-3"), DogId::from("dog-1")]
    );
}

#[tokio::test]
async fn test_search_server_error_maps_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    match gateway.search_dog_ids(&SearchQuery::default()).await {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_malformed_body_is_serialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    assert!(matches!(
        gateway.search_dog_ids(&SearchQuery::default()).await,
        Err(Error::Serialization(_))
    ));
}

#[tokio::test]
async fn test_fetch_dogs_posts_ids_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dogs"))
        .and(body_json(json!(["dog-2", "dog-1"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "dog-2", "img": "https://img/2.jpg", "name": "Bella", "age": 1, "zip_code": "02139", "breed": "Pug"},
            {"id": "dog-1", "img": "https://img/1.jpg", "name": "Rex", "age": 3, "zip_code": "02139", "breed": "Beagle"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    let dogs = gateway
        .fetch_dogs_by_ids(&[DogId::from("dog-2"), DogId::from("dog-1")])
        .await
        .unwrap();
    let names: Vec<_> = dogs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Bella", "Rex"]);
}

#[tokio::test]
async fn test_fetch_dogs_empty_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dogs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    let dogs = gateway.fetch_dogs_by_ids(&[]).await.unwrap();
    assert!(dogs.is_empty());
}

#[tokio::test]
async fn test_compute_match_posts_favorites() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dogs/match"))
        .and(body_json(json!(["dog-1", "dog-2"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"match": "dog-2"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    let matched = gateway
        .compute_match(&[DogId::from("dog-1"), DogId::from("dog-2")])
        .await
        .unwrap();
    assert_eq!(matched, DogId::from("dog-2"));
}

#[tokio::test]
async fn test_logout_failure_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server);
    assert!(matches!(
        gateway.end_session().await,
        Err(Error::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = ClientConfig {
        // Port 9 (discard) on localhost is closed in test environments.
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_seconds: Some(2),
    };
    let gateway = FetchGateway::new(config).unwrap();
    assert!(matches!(
        gateway.list_breeds().await,
        Err(Error::Network(_))
    ));
}
