pub mod common;

use serde_json::json;

#[tokio::test]
async fn returns_ok_status() {
    let client = common::Client::spawn().await;

    let response = client.health().await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn is_unaffected_by_previous_requests() {
    let client = common::Client::spawn().await;

    client.generate_ticket(&json!({})).await;
    client.generate_ticket(&json!({ "total": "bogus" })).await;

    let body = client
        .health()
        .await
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}
