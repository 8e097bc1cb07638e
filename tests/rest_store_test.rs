//! Integration tests for the REST store adapter
//!
//! These tests pin the request shape the adapter sends (query encoding,
//! headers, Prefer semantics) and the error mapping, against a mock HTTP
//! server.

use medboard::adapters::store::{DataStore, Filter, OrderBy, RestStore, SelectQuery};
use medboard::config::schema::{SessionConfig, StoreConfig};
use medboard::config::secret::secret_string;
use medboard::domain::errors::{MedboardError, StoreError};
use mockito::Matcher;
use serde_json::json;

fn store_config(base_url: &str) -> StoreConfig {
    StoreConfig {
        base_url: base_url.to_string(),
        api_key: secret_string("anon-key".to_string()),
        schema: "public".to_string(),
        timeout_seconds: 5,
        tls_verify: true,
    }
}

fn session_with_token(token: &str) -> SessionConfig {
    SessionConfig {
        access_token: Some(secret_string(token.to_string())),
        user_id: None,
    }
}

#[tokio::test]
async fn select_builds_a_postgrest_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/patients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*, rooms(room_number)".into()),
            Matcher::UrlEncoded("status".into(), "eq.critical".into()),
            Matcher::UrlEncoded("order".into(), "admission_date.desc".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer anon-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"full_name": "John Doe"}]"#)
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let query = SelectQuery::new()
        .columns("*, rooms(room_number)")
        .filter(Filter::eq("status", "critical"))
        .order(OrderBy::descending("admission_date"))
        .limit(10);

    let rows = store.select("patients", &query).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["full_name"], "John Doe");
    mock.assert_async().await;
}

#[tokio::test]
async fn session_token_rides_as_the_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/patients")
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer user-jwt")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let store =
        RestStore::new(&store_config(&server.url()), &session_with_token("user-jwt")).unwrap();
    store.select("patients", &SelectQuery::new()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn count_reads_the_content_range_total() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("HEAD", "/rest/v1/patients")
        .match_header("prefer", "count=exact")
        .with_status(200)
        .with_header("content-range", "0-24/57")
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let total = store.count("patients", &[]).await.unwrap();

    assert_eq!(total, 57);
    mock.assert_async().await;
}

#[tokio::test]
async fn count_with_filters_encodes_them() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("HEAD", "/rest/v1/rooms")
        .match_query(Matcher::UrlEncoded(
            "is_occupied".into(),
            "eq.false".into(),
        ))
        .with_status(200)
        .with_header("content-range", "*/3")
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let total = store
        .count("rooms", &[Filter::eq("is_occupied", "false")])
        .await
        .unwrap();

    assert_eq!(total, 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn insert_returns_the_representation() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/patients")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::Json(json!([{"patient_id": "P001"}])))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "7d44b88c-4199-4bad-97dc-d78268e01398", "patient_id": "P001"}]"#)
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let inserted = store
        .insert("patients", vec![json!({"patient_id": "P001"})])
        .await
        .unwrap();

    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0]["id"], "7d44b88c-4199-4bad-97dc-d78268e01398");
    mock.assert_async().await;
}

#[tokio::test]
async fn update_counts_the_affected_rows() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/rooms")
        .match_query(Matcher::UrlEncoded(
            "id".into(),
            "eq.84d7c3f5-1f6a-4f87-aa95-5d9c6b8f3a29".into(),
        ))
        .match_body(Matcher::Json(json!({"is_occupied": true})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "84d7c3f5-1f6a-4f87-aa95-5d9c6b8f3a29", "is_occupied": true}]"#)
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let affected = store
        .update(
            "rooms",
            json!({"is_occupied": true}),
            &[Filter::eq("id", "84d7c3f5-1f6a-4f87-aa95-5d9c6b8f3a29")],
        )
        .await
        .unwrap();

    assert_eq!(affected, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_counts_the_removed_rows() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/rest/v1/patients")
        .match_query(Matcher::UrlEncoded(
            "id".into(),
            "eq.7d44b88c-4199-4bad-97dc-d78268e01398".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "7d44b88c-4199-4bad-97dc-d78268e01398"}]"#)
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let removed = store
        .delete(
            "patients",
            &[Filter::eq("id", "7d44b88c-4199-4bad-97dc-d78268e01398")],
        )
        .await
        .unwrap();

    assert_eq!(removed, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn rejected_credentials_map_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/patients")
        .with_status(401)
        .with_body(r#"{"message": "JWT expired"}"#)
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let err = store
        .select("patients", &SelectQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MedboardError::Store(StoreError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn server_errors_map_to_query_failed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/patients")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let err = store
        .select("patients", &SelectQuery::new())
        .await
        .unwrap_err();

    match err {
        MedboardError::Store(StoreError::QueryFailed { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected query failure, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_insert_maps_to_insert_failed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/rest/v1/patients")
        .with_status(409)
        .with_body(r#"{"message": "duplicate key"}"#)
        .create_async()
        .await;

    let store = RestStore::new(&store_config(&server.url()), &SessionConfig::default()).unwrap();
    let err = store
        .insert("patients", vec![json!({"patient_id": "P001"})])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MedboardError::Store(StoreError::InsertFailed(_))
    ));
}

#[tokio::test]
async fn unreachable_store_maps_to_connection_failed() {
    // Nothing listens on this port.
    let config = store_config("http://127.0.0.1:1");
    let store = RestStore::new(&config, &SessionConfig::default()).unwrap();

    let err = store
        .select("patients", &SelectQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MedboardError::Store(StoreError::ConnectionFailed(_))
    ));
}
