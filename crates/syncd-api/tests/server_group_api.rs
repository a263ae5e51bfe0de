mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use common::TestApp;

async fn create_group(app: &TestApp, name: &str) {
    let (status, body) = app
        .post_form("/api/server/group/update", &format!("name={}", name))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn creates_and_lists_groups() {
    let app = TestApp::new();
    create_group(&app, "web").await;
    create_group(&app, "db").await;

    let (status, body) = app.get("/api/server/group/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["total"], 2);
    // Newest first.
    assert_eq!(body["data"]["list"][0]["name"], "db");
    assert_eq!(body["data"]["list"][1]["name"], "web");
}

#[tokio::test]
async fn empty_name_is_a_param_error() {
    let app = TestApp::new();
    let (status, body) = app.post_form("/api/server/group/update", "name=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["message"], "group name can not empty");
    assert!(body["data"].is_null());

    let (_, body) = app.get("/api/server/group/list").await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn missing_form_body_reads_as_empty_fields() {
    let app = TestApp::new();
    let req = Request::post("/api/server/group/update").body(Body::empty()).unwrap();
    assert_eq!(app.status(req).await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn numeric_keyword_matches_exact_id() {
    let app = TestApp::new();
    app.state
        .db
        .with_conn(|conn| {
            conn.execute_batch(
                "INSERT INTO server_group (id, name) VALUES (42, 'payments');
                 INSERT INTO server_group (id, name) VALUES (7, 'search-42');",
            )?;
            Ok(())
        })
        .unwrap();

    let (_, body) = app.get("/api/server/group/list?keyword=42").await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["list"], json!([{ "id": 42, "name": "payments" }]));

    let (_, body) = app.get("/api/server/group/list?keyword=99").await;
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["list"], json!([]));
}

#[tokio::test]
async fn text_keyword_matches_substring() {
    let app = TestApp::new();
    for name in ["web-east", "web-west", "batch"] {
        create_group(&app, name).await;
    }

    let (_, body) = app.get("/api/server/group/list?keyword=web").await;
    assert_eq!(body["data"]["total"], 2);

    let (_, body) = app.get("/api/server/group/list?keyword=zero").await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn non_positive_numeric_keyword_is_unfiltered() {
    let app = TestApp::new();
    create_group(&app, "a").await;
    create_group(&app, "b").await;

    let (_, body) = app.get("/api/server/group/list?keyword=0").await;
    assert_eq!(body["data"]["total"], 2);
}

#[tokio::test]
async fn paging_keeps_the_full_total() {
    let app = TestApp::new();
    for i in 0..5 {
        create_group(&app, &format!("g{}", i)).await;
    }

    let (_, body) = app.get("/api/server/group/list?offset=1&limit=2").await;
    assert_eq!(body["data"]["total"], 5);
    let list = body["data"]["list"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "g3");
    assert_eq!(list[1]["name"], "g2");

    let (_, body) = app.get("/api/server/group/list?limit=0").await;
    assert_eq!(body["data"]["list"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn update_renames_existing_group() {
    let app = TestApp::new();
    create_group(&app, "old").await;

    let (status, _) = app.post_form("/api/server/group/update", "id=1&name=new").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/server/group/detail?id=1").await;
    assert_eq!(body["data"]["detail"], json!({ "id": 1, "name": "new" }));
}

#[tokio::test]
async fn update_of_unknown_id_is_an_app_error() {
    let app = TestApp::new();
    let (status, body) = app.post_form("/api/server/group/update", "id=9&name=x").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 1002);
    assert_eq!(body["message"], "server group data update failed");
}

#[tokio::test]
async fn detail_requires_an_id() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/server/group/detail").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "id can not be empty");

    let (status, _) = app.get("/api/server/group/detail?id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detail_of_missing_group_is_an_app_error() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/server/group/detail?id=3").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "get server group detail data failed");
}

#[tokio::test]
async fn delete_removes_group() {
    let app = TestApp::new();
    create_group(&app, "doomed").await;

    let (status, body) = app.post_form("/api/server/group/delete", "id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    let (status, body) = app.post_form("/api/server/group/delete", "id=1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "delete server group data failed");

    let (status, body) = app.post_form("/api/server/group/delete", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "id can not be empty");
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let app = TestApp::new();
    let req = Request::get("/api/server/group/update").body(Body::empty()).unwrap();
    assert_eq!(app.status(req).await, StatusCode::METHOD_NOT_ALLOWED);

    let req = Request::post("/api/server/group/list").body(Body::empty()).unwrap();
    assert_eq!(app.status(req).await, StatusCode::METHOD_NOT_ALLOWED);
}
