mod common;

use common::TestApp;
use reqwest::Client;

#[tokio::test]
async fn root_greets_the_world() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::json!({ "message": "Hello World" }));

    app.cleanup().await;
}

#[tokio::test]
async fn hello_echoes_the_path_name() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/hello/Amass", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::json!({ "message": "Hello Amass" }));

    app.cleanup().await;
}
