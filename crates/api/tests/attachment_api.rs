//! Integration tests for the generic attachment endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, post_multipart, Part, TestApp};
use serde_json::json;

async fn app_with_site_and_meal() -> TestApp {
    let app = TestApp::new();
    post_json(app.router(), "/api/v1/sites", json!({"site_name": "Dock"})).await;
    post_json(app.router(), "/api/v1/sites", json!({"site_name": "Yard"})).await;
    post_json(app.router(), "/api/v1/meals", json!({})).await;
    app
}

#[tokio::test]
async fn upload_classifies_and_titles_files() {
    let app = app_with_site_and_meal().await;
    let response = post_multipart(
        app.router(),
        "/api/v1/attachments/site/1",
        &[
            Part::File("files", "permit.pdf", Some("application/pdf"), b"%PDF"),
            Part::File("files", "notes.txt", Some("text/plain"), b"hello"),
            Part::File("files", "raw.bin", None, b"\x00\x01"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["file_type"], "pdf");
    assert_eq!(data[1]["file_type"], "other");
    assert_eq!(data[2]["file_type"], "other");
    assert_eq!(data[0]["title"], "permit.pdf");
    assert!(app.root.path().join("uploads/site/permit.pdf").exists());
}

#[tokio::test]
async fn shared_title_applies_to_every_file() {
    let app = app_with_site_and_meal().await;
    let response = post_multipart(
        app.router(),
        "/api/v1/attachments/meal/1",
        &[
            Part::Text("title", "Catering menu"),
            Part::Text("note", "vegan options"),
            Part::File("files", "menu.jpg", Some("image/jpeg"), b"jpg"),
        ],
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["title"], "Catering menu");
    assert_eq!(json["data"][0]["note"], "vegan options");
    assert_eq!(json["data"][0]["file_type"], "image");
}

#[tokio::test]
async fn listing_is_scoped_to_module_and_ref() {
    let app = app_with_site_and_meal().await;
    for uri in [
        "/api/v1/attachments/site/1",
        "/api/v1/attachments/site/2",
        "/api/v1/attachments/meal/1",
    ] {
        post_multipart(
            app.router(),
            uri,
            &[Part::File("files", "a.png", Some("image/png"), b"png")],
        )
        .await;
    }

    let json = body_json(get(app.router(), "/api/v1/attachments/site/2").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["ref_id"], 2);
    assert_eq!(data[0]["module"], "site");
}

#[tokio::test]
async fn zero_files_is_a_no_op() {
    let app = app_with_site_and_meal().await;
    let response = post_multipart(
        app.router(),
        "/api/v1/attachments/site/1",
        &[Part::Text("title", "nothing")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
    assert!(!app.root.path().join("data/attachments.csv").exists());
}

#[tokio::test]
async fn unfilled_file_input_counts_as_no_files() {
    let app = app_with_site_and_meal().await;
    let response = post_multipart(
        app.router(),
        "/api/v1/attachments/site/1",
        &[
            Part::Text("title", "nothing"),
            Part::File("files", "", Some("application/octet-stream"), b""),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn file_name_without_a_base_name_is_rejected() {
    let app = app_with_site_and_meal().await;
    let response = post_multipart(
        app.router(),
        "/api/v1/attachments/site/1",
        &[Part::File("files", "..", Some("text/plain"), b"x")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_module_and_missing_parent_are_rejected() {
    let app = app_with_site_and_meal().await;
    let response = get(app.router(), "/api/v1/attachments/catering/1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_multipart(
        app.router(),
        "/api/v1/attachments/schedule/5",
        &[Part::File("files", "a.png", Some("image/png"), b"png")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn directory_components_are_stripped_and_same_name_overwrites() {
    let app = app_with_site_and_meal().await;
    post_multipart(
        app.router(),
        "/api/v1/attachments/site/1",
        &[Part::File("files", "../../etc/plan.txt", Some("text/plain"), b"first")],
    )
    .await;
    post_multipart(
        app.router(),
        "/api/v1/attachments/site/2",
        &[Part::File("files", "plan.txt", Some("text/plain"), b"second")],
    )
    .await;

    let stored = std::fs::read(app.root.path().join("uploads/site/plan.txt")).unwrap();
    assert_eq!(stored, b"second");
    let json = body_json(get(app.router(), "/api/v1/attachments/site/1").await).await;
    assert_eq!(json["data"][0]["file_name"], "plan.txt");
}

#[tokio::test]
async fn preview_dispatch_and_missing_file_warning() {
    let app = app_with_site_and_meal().await;
    post_multipart(
        app.router(),
        "/api/v1/attachments/site/1",
        &[
            Part::File("files", "shot.png", Some("image/png"), b"png"),
            Part::File("files", "clip.mp4", Some("video/mp4"), b"mp4"),
        ],
    )
    .await;

    let image = body_json(get(app.router(), "/api/v1/attachments/1/preview").await).await;
    assert_eq!(image["data"]["kind"], "image");
    let video = body_json(get(app.router(), "/api/v1/attachments/2/preview").await).await;
    assert_eq!(video["data"]["kind"], "video");

    std::fs::remove_file(app.root.path().join("uploads/site/shot.png")).unwrap();
    let response = get(app.router(), "/api/v1/attachments/1/preview").await;
    assert_eq!(response.status(), StatusCode::OK);
    let missing = body_json(response).await;
    assert_eq!(missing["data"]["kind"], "missing");

    let response = get(app.router(), "/api/v1/attachments/1/file").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app.router(), "/api/v1/attachments/2/file").await;
    assert_eq!(response.headers()["content-type"], "video/mp4");
    assert_eq!(
        response.headers()["content-disposition"],
        "inline; filename=\"clip.mp4\""
    );
}

#[tokio::test]
async fn delete_keeps_file_on_disk() {
    let app = app_with_site_and_meal().await;
    post_multipart(
        app.router(),
        "/api/v1/attachments/site/1",
        &[Part::File("files", "keep.pdf", Some("application/pdf"), b"%PDF")],
    )
    .await;

    assert_eq!(
        delete(app.router(), "/api/v1/attachments/1").await.status(),
        StatusCode::NO_CONTENT
    );
    assert!(app.root.path().join("uploads/site/keep.pdf").exists());
    let json = body_json(get(app.router(), "/api/v1/attachments/site/1").await).await;
    assert_eq!(json["data"], json!([]));
}
