//! Integration tests for the employee API.
//!
//! Every test gets its own in-memory SurrealDB and drives the fully layered
//! router through `oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use directory_server::{Config, ServerState, build_app};

async fn test_app() -> Router {
    let state = ServerState::initialize(&Config::in_memory())
        .await
        .expect("in-memory database should start");
    build_app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            panic!("non-JSON body ({e}): {}", String::from_utf8_lossy(&bytes))
        })
    };
    (status, value)
}

async fn create(app: &Router, name: &str, email: &str, reports_to: Option<&str>) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/employees",
        Some(json!({
            "name": name,
            "email": email,
            "description": format!("{name} description"),
            "reportsTo": reports_to,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

fn id_of(employee: &Value) -> String {
    employee["id"].as_str().unwrap().to_string()
}

fn count_nodes(nodes: &Value) -> usize {
    nodes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| 1 + count_nodes(&n["children"]))
        .sum()
}

// ========== Health ==========

#[tokio::test]
async fn health_reports_database_ok() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/employees/simple")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

// ========== Create / read ==========

#[tokio::test]
async fn create_then_get_by_id() {
    let app = test_app().await;
    let boss = create(&app, "Ada", "ada@example.com", None).await;
    let report = create(&app, "Grace", "grace@example.com", Some(&id_of(&boss))).await;

    assert!(id_of(&report).starts_with("employee:"));
    assert_eq!(report["reportsTo"], boss["id"]);
    assert!(report["createdAt"].as_i64().unwrap() > 0);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/employees/{}", id_of(&report)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Grace");
    assert_eq!(body["email"], "grace@example.com");
    assert_eq!(body["manager"]["id"], boss["id"]);
    assert_eq!(body["manager"]["name"], "Ada");
}

#[tokio::test]
async fn get_accepts_bare_key() {
    let app = test_app().await;
    let ada = create(&app, "Ada", "ada@example.com", None).await;
    let key = id_of(&ada).trim_start_matches("employee:").to_string();

    let (status, body) = send(&app, Method::GET, &format!("/employees/{key}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ada["id"]);
    assert!(body["manager"].is_null());
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({ "description": "no name, no email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("name").is_some(), "body: {body}");
    assert!(body["details"].get("email").is_some(), "body: {body}");

    let (status, _) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({ "name": "Bad", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/employees/simple", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({ "name": "   ", "email": "blank@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    assert_eq!(body["details"]["name"], json!(["name is required"]));

    let ada = create(&app, "Ada", "ada@example.com", None).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/employees/{}", id_of(&ada)),
        Some(json!({ "name": "\t", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, Method::GET, &format!("/employees/{}", id_of(&ada)), None).await;
    assert_eq!(fetched["name"], "Ada");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/employees")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({ "name": "Imposter", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    let (_, list) = send(&app, Method::GET, "/employees/simple", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_id_is_not_found_everywhere() {
    let app = test_app().await;
    let uri = "/employees/employee:nobody";

    let (status, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 8001);
    assert_eq!(body["details"]["id"], "employee:nobody");

    let (status, _) = send(
        &app,
        Method::PUT,
        uri,
        Some(json!({ "name": "Ghost", "email": "ghost@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn simple_list_is_ordered_by_name() {
    let app = test_app().await;
    create(&app, "Charlie", "c@example.com", None).await;
    create(&app, "Alice", "a@example.com", None).await;
    create(&app, "Bob", "b@example.com", None).await;

    let (status, body) = send(&app, Method::GET, "/employees/simple", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
    assert!(body[0].get("email").is_none());
}

// ========== Update / delete ==========

#[tokio::test]
async fn update_replaces_fields() {
    let app = test_app().await;
    let boss = create(&app, "Ada", "ada@example.com", None).await;
    let grace = create(&app, "Grace", "grace@example.com", Some(&id_of(&boss))).await;
    let uri = format!("/employees/{}", id_of(&grace));

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "name": "Grace Hopper",
            "email": "hopper@example.com",
            "phone": "555-0100",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["name"], "Grace Hopper");
    assert_eq!(body["email"], "hopper@example.com");
    assert_eq!(body["phone"], "555-0100");
    assert!(body["reportsTo"].is_null());
    assert!(body["description"].is_null());
    assert_eq!(body["createdAt"], grace["createdAt"]);

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["name"], "Grace Hopper");
    assert!(fetched["manager"].is_null());
}

#[tokio::test]
async fn update_rejects_taken_email_and_self_report() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com", None).await;
    let grace = create(&app, "Grace", "grace@example.com", None).await;
    let uri = format!("/employees/{}", id_of(&grace));

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Grace", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Grace", "email": "grace@example.com", "reportsTo": id_of(&grace) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Keeping one's own email is fine
    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Grace H.", "email": "grace@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_returns_removed_record() {
    let app = test_app().await;
    let ada = create(&app, "Ada", "ada@example.com", None).await;
    let uri = format!("/employees/{}", id_of(&ada));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ada["id"]);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Email is free again
    create(&app, "Ada", "ada@example.com", None).await;
}

// ========== Hierarchy ==========

#[tokio::test]
async fn hierarchy_contains_everyone_once() {
    let app = test_app().await;
    let ceo = create(&app, "Ceo", "ceo@example.com", None).await;
    let cto = create(&app, "Cto", "cto@example.com", Some(&id_of(&ceo))).await;
    create(&app, "Dev", "dev@example.com", Some(&id_of(&cto))).await;
    create(&app, "Loner", "loner@example.com", None).await;

    let (status, forest) = send(&app, Method::GET, "/employees/hierarchy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count_nodes(&forest), 4);

    let roots: Vec<&str> = forest
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert_eq!(roots, vec!["Ceo", "Loner"]);
    assert_eq!(forest[0]["children"][0]["name"], "Cto");
    assert_eq!(forest[0]["children"][0]["children"][0]["name"], "Dev");
}

#[tokio::test]
async fn hierarchy_treats_deleted_manager_as_root() {
    let app = test_app().await;
    let boss = create(&app, "Boss", "boss@example.com", None).await;
    create(&app, "Orphan", "orphan@example.com", Some(&id_of(&boss))).await;

    send(&app, Method::DELETE, &format!("/employees/{}", id_of(&boss)), None).await;

    let (_, forest) = send(&app, Method::GET, "/employees/hierarchy", None).await;
    assert_eq!(count_nodes(&forest), 1);
    assert_eq!(forest[0]["name"], "Orphan");
}

#[tokio::test]
async fn clearing_reports_to_moves_employee_to_root() {
    let app = test_app().await;
    let boss = create(&app, "Boss", "boss@example.com", None).await;
    let ada = create(&app, "Ada", "ada@example.com", Some(&id_of(&boss))).await;

    let (_, before) = send(&app, Method::GET, "/employees/hierarchy", None).await;
    assert_eq!(before.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/employees/{}", id_of(&ada)),
        Some(json!({ "name": "Ada", "email": "ada@example.com", "reportsTo": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send(&app, Method::GET, "/employees/hierarchy", None).await;
    let roots: Vec<&str> = after
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert_eq!(roots, vec!["Ada", "Boss"]);
    assert_eq!(count_nodes(&after), 2);
}

#[tokio::test]
async fn hierarchy_survives_reporting_cycle() {
    let app = test_app().await;
    let a = create(&app, "A", "a@example.com", None).await;
    let b = create(&app, "B", "b@example.com", Some(&id_of(&a))).await;

    // Close the loop: A reports to B
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/employees/{}", id_of(&a)),
        Some(json!({ "name": "A", "email": "a@example.com", "reportsTo": id_of(&b) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, forest) = send(&app, Method::GET, "/employees/hierarchy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count_nodes(&forest), 2);
    assert_eq!(forest.as_array().unwrap().len(), 1);
}

// ========== Search ==========

#[tokio::test]
async fn search_paginates_with_total() {
    let app = test_app().await;
    for i in 0..45 {
        create(
            &app,
            &format!("Engineer {i:02}"),
            &format!("eng{i:02}@example.com"),
            None,
        )
        .await;
    }
    create(&app, "Zed", "zed@other.org", None).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/employees/search?searchTerm=ENGINEER&page=2&rowsPerPage=20",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["totalResults"], 45);
    assert_eq!(body["page"], 2);
    assert_eq!(body["rowsPerPage"], 20);
    assert_eq!(body["totalPages"], 3);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 20);
    assert_eq!(results[0]["name"], "Engineer 20");
    assert_eq!(results[19]["name"], "Engineer 39");

    let (_, last) = send(
        &app,
        Method::GET,
        "/employees/search?searchTerm=engineer&page=3&rowsPerPage=20",
        None,
    )
    .await;
    assert_eq!(last["results"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn search_without_term_returns_everyone() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com", None).await;
    create(&app, "Grace", "grace@example.com", None).await;

    let (status, body) = send(&app, Method::GET, "/employees/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["rowsPerPage"], 20);
}

#[tokio::test]
async fn search_clamps_negative_page() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com", None).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/employees/search?page=-1&rowsPerPage=-3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["page"], 1);
    assert_eq!(body["rowsPerPage"], 1);
    assert_eq!(body["results"][0]["name"], "Ada");
}

#[tokio::test]
async fn search_group_limits_fields() {
    let app = test_app().await;
    create(&app, "Ada", "lovelace@example.com", None).await;

    let (_, by_name) = send(
        &app,
        Method::GET,
        "/employees/search?searchTerm=lovelace&group=name",
        None,
    )
    .await;
    assert_eq!(by_name["totalResults"], 0);

    let (_, by_email) = send(
        &app,
        Method::GET,
        "/employees/search?searchTerm=lovelace&group=name,email",
        None,
    )
    .await;
    assert_eq!(by_email["totalResults"], 1);

    let (status, _) = send(
        &app,
        Method::GET,
        "/employees/search?searchTerm=x&group=salary",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_my_circle() {
    let app = test_app().await;
    let boss = create(&app, "Boss", "boss@example.com", None).await;
    let ada = create(&app, "Ada", "ada@example.com", Some(&id_of(&boss))).await;
    create(&app, "Bob", "bob@example.com", Some(&id_of(&boss))).await;
    create(&app, "Outsider", "out@example.com", None).await;

    let (status, peers) = send(
        &app,
        Method::GET,
        &format!(
            "/employees/search?filter=my_circle&employeeId={}",
            id_of(&ada)
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {peers}");
    let names: Vec<&str> = peers["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Bob"]);

    // Top-level employee: only themselves
    let (_, alone) = send(
        &app,
        Method::GET,
        &format!(
            "/employees/search?filter=my_circle&employeeId={}",
            id_of(&boss)
        ),
        None,
    )
    .await;
    assert_eq!(alone["totalResults"], 1);
    assert_eq!(alone["results"][0]["name"], "Boss");

    let (status, _) = send(
        &app,
        Method::GET,
        "/employees/search?filter=my_circle",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/employees/search?filter=my_circle&employeeId=employee:nobody",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
