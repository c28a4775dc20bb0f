//! End-to-end task API tests, exercising the nested slug scope and the
//! two-write create unit through the full router.


use axum::http::{Method, StatusCode};
use serde_json::json;
use test_support::TestApp;

async fn seed_project(app: &TestApp, token: &str, name: &str) -> String {
    let (status, body) = app
        .request_json(
            Method::POST,
            "/projects",
            Some(token),
            Some(json!({"name": name})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["slug"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_links_task_into_parent() {
    let app = TestApp::new();
    let (_, token) = app.user();
    let project = seed_project(&app, &token, "My Plan").await;

    let (status, task) = app
        .request_json(
            Method::POST,
            &format!("/projects/{}/tasks", project),
            Some(&token),
            Some(json!({"name": "First Step"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["slug"], "first-step");

    // Parent's member list now carries the task id.
    let (_, body) = app
        .request_json(Method::GET, "/projects/my-plan", Some(&token), None)
        .await;
    assert_eq!(body["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(body["tasks"][0], task["task_id"]);
}

#[tokio::test]
async fn task_slugs_are_scoped_per_project() {
    let app = TestApp::new();
    let (_, token) = app.user();
    let first = seed_project(&app, &token, "First").await;
    let second = seed_project(&app, &token, "Second").await;

    for project in [&first, &second] {
        let (status, body) = app
            .request_json(
                Method::POST,
                &format!("/projects/{}/tasks", project),
                Some(&token),
                Some(json!({"name": "Setup!!"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["slug"], "setup");
    }

    // Within one project the duplicate gets a suffix.
    let (_, body) = app
        .request_json(
            Method::POST,
            &format!("/projects/{}/tasks", first),
            Some(&token),
            Some(json!({"name": "Setup!!"})),
        )
        .await;
    assert_eq!(body["slug"], "setup-1");
}

#[tokio::test]
async fn non_owner_task_create_is_forbidden() {
    let app = TestApp::new();
    let (_, owner) = app.user();
    let (_, stranger) = app.user();
    let project = seed_project(&app, &owner, "My Plan").await;

    let (status, body) = app
        .request_json(
            Method::POST,
            &format!("/projects/{}/tasks", project),
            Some(&stranger),
            Some(json!({"name": "Intrusion"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn missing_project_wins_over_missing_task() {
    let app = TestApp::new();
    let (_, token) = app.user();

    let (status, body) = app
        .request_json(
            Method::GET,
            "/projects/absent/tasks/also-absent",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROJECT_NOT_FOUND");

    let project = seed_project(&app, &token, "My Plan").await;
    let (status, body) = app
        .request_json(
            Method::GET,
            &format!("/projects/{}/tasks/absent", project),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TASK_NOT_FOUND");
}

#[tokio::test]
async fn update_and_delete_are_owner_gated() {
    let app = TestApp::new();
    let (_, owner) = app.user();
    let (_, stranger) = app.user();
    let project = seed_project(&app, &owner, "My Plan").await;

    app.request_json(
        Method::POST,
        &format!("/projects/{}/tasks", project),
        Some(&owner),
        Some(json!({"name": "Step"})),
    )
    .await;

    let uri = format!("/projects/{}/tasks/step", project);
    let (status, _) = app
        .request_json(
            Method::PUT,
            &uri,
            Some(&stranger),
            Some(json!({"name": "Hijack"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request_json(
            Method::PUT,
            &uri,
            Some(&owner),
            Some(json!({"name": "Renamed Step"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "step");
    assert_eq!(body["name"], "Renamed Step");

    let (status, body) = app
        .request_json(Method::DELETE, &uri, Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted successfully");

    let (status, _) = app.request_json(Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn task_listing_is_paginated() {
    let app = TestApp::new();
    let (_, token) = app.user();
    let project = seed_project(&app, &token, "My Plan").await;

    for i in 0..5 {
        app.request_json(
            Method::POST,
            &format!("/projects/{}/tasks", project),
            Some(&token),
            Some(json!({"name": format!("Step {}", i)})),
        )
        .await;
    }

    let (status, body) = app
        .request_json(
            Method::GET,
            &format!("/projects/{}/tasks?page=2&limit=2", project),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_project_cascades_to_tasks() {
    let app = TestApp::new();
    let (_, token) = app.user();
    let project = seed_project(&app, &token, "My Plan").await;

    app.request_json(
        Method::POST,
        &format!("/projects/{}/tasks", project),
        Some(&token),
        Some(json!({"name": "Step"})),
    )
    .await;

    app.request_json(
        Method::DELETE,
        &format!("/projects/{}", project),
        Some(&token),
        None,
    )
    .await;

    let (status, body) = app
        .request_json(
            Method::GET,
            &format!("/projects/{}/tasks/step", project),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROJECT_NOT_FOUND");
}
