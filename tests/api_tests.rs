//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so repeated runs don't collide on unique email columns
fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Register a fresh user and return a bearer token for it
async fn get_auth_token(client: &Client) -> String {
    let email = format!("librarian{}@lectern.test", unique_suffix());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": "librarian",
            "email": email,
            "password": "shelving-is-fun"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "shelving-is-fun"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn create_book(client: &Client, token: &str, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "author": "Integration Author",
            "published_year": 1998,
            "isbn": "978-0-00-000000-0"
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No id in book response")
}

async fn create_member(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/members", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": name,
            "email": format!("{}{}@lectern.test", name, unique_suffix())
        }))
        .send()
        .await
        .expect("Failed to create member");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse member response");
    body["id"].as_i64().expect("No id in member response")
}

async fn borrow(client: &Client, token: &str, book_id: i64, member_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/borrowing_records", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"book_id": book_id, "member_id": member_id}))
        .send()
        .await
        .expect("Failed to send borrow request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let email = format!("reader{}@lectern.test", unique_suffix());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": "reader",
            "email": email,
            "password": "quiet-please"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({"email": email, "password": "quiet-please"}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email() {
    let client = Client::new();
    let email = format!("twice{}@lectern.test", unique_suffix());
    let payload = json!({
        "username": "twice",
        "email": email,
        "password": "once-is-enough"
    });

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_login_failures_are_indistinguishable() {
    let client = Client::new();
    let email = format!("known{}@lectern.test", unique_suffix());

    client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": "known",
            "email": email,
            "password": "right-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    let wrong_password = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({"email": email, "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(wrong_password.status(), 401);
    let wrong_password_body: Value = wrong_password.json().await.expect("Failed to parse");

    let unknown_email = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({"email": "nobody@lectern.test", "password": "whatever"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(unknown_email.status(), 401);
    let unknown_email_body: Value = unknown_email.json().await.expect("Failed to parse");

    assert_eq!(wrong_password_body["message"], unknown_email_body["message"]);
}

#[tokio::test]
#[ignore]
async fn test_mutations_require_token() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "No Token",
            "author": "Anon",
            "published_year": 2020,
            "isbn": "0"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book_returns_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_new_book_is_available() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, "Fresh Arrival").await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_borrow_return_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book = create_book(&client, &token, "The Lifecycle").await;
    let member1 = create_member(&client, &token, "alice").await;
    let member2 = create_member(&client, &token, "bob").await;

    // First borrow opens a record and makes the book unavailable
    let response = borrow(&client, &token, book, member1).await;
    assert_eq!(response.status(), 201);
    let record: Value = response.json().await.expect("Failed to parse record");
    let borrow_id = record["borrow_id"].as_i64().expect("No borrow_id");
    assert!(record["return_date"].is_null());

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], false);

    // A second borrow of the same book conflicts
    let response = borrow(&client, &token, book, member2).await;
    assert_eq!(response.status(), 409);

    // Returning closes the record and frees the book
    let response = client
        .patch(format!("{}/borrowing_records/{}", BASE_URL, borrow_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let closed: Value = response.json().await.expect("Failed to parse record");
    assert!(closed["return_date"].is_string());

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);

    // The freed book can be borrowed again, by the other member
    let response = borrow(&client, &token, book, member2).await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_double_return_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book = create_book(&client, &token, "Return Twice").await;
    let member = create_member(&client, &token, "carol").await;

    let response = borrow(&client, &token, book, member).await;
    let record: Value = response.json().await.expect("Failed to parse record");
    let borrow_id = record["borrow_id"].as_i64().expect("No borrow_id");

    let response = client
        .patch(format!("{}/borrowing_records/{}", BASE_URL, borrow_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let closed: Value = response.json().await.expect("Failed to parse record");
    let first_return_date = closed["return_date"].clone();

    let response = client
        .patch(format!("{}/borrowing_records/{}", BASE_URL, borrow_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // First return date is untouched
    let response = client
        .get(format!("{}/borrowing_records", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let records: Vec<Value> = response.json().await.expect("Failed to parse records");
    let record = records
        .iter()
        .find(|r| r["borrow_id"].as_i64() == Some(borrow_id))
        .expect("Record missing from list");
    assert_eq!(record["return_date"], first_return_date);
}

#[tokio::test]
#[ignore]
async fn test_return_date_before_borrow_date_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book = create_book(&client, &token, "Time Traveler").await;
    let member = create_member(&client, &token, "dave").await;

    let response = borrow(&client, &token, book, member).await;
    let record: Value = response.json().await.expect("Failed to parse record");
    let borrow_id = record["borrow_id"].as_i64().expect("No borrow_id");

    let response = client
        .patch(format!("{}/borrowing_records/{}", BASE_URL, borrow_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"return_date": "1970-01-01"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Record is still open
    let response = client
        .get(format!("{}/borrowing_records", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let records: Vec<Value> = response.json().await.expect("Failed to parse records");
    let record = records
        .iter()
        .find(|r| r["borrow_id"].as_i64() == Some(borrow_id))
        .expect("Record missing from list");
    assert!(record["return_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_borrow_missing_book_or_member() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let member = create_member(&client, &token, "erin").await;
    let book = create_book(&client, &token, "Existing").await;

    let response = borrow(&client, &token, 999999999, member).await;
    assert_eq!(response.status(), 404);

    let response = borrow(&client, &token, book, 999999999).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_member_deletion_blocked_by_open_loan() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book = create_book(&client, &token, "Keepsake").await;
    let member = create_member(&client, &token, "frank").await;

    let response = borrow(&client, &token, book, member).await;
    let record: Value = response.json().await.expect("Failed to parse record");
    let borrow_id = record["borrow_id"].as_i64().expect("No borrow_id");

    // Blocked while the loan is open
    let response = client
        .delete(format!("{}/members/{}", BASE_URL, member))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Member is still there, with the open loan annotated
    let response = client
        .get(format!("{}/members/{}", BASE_URL, member))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let details: Value = response.json().await.expect("Failed to parse details");
    let current = details["currently_borrowed_books"]
        .as_array()
        .expect("No current loans array");
    assert_eq!(current.len(), 1);
    assert_eq!(current[0]["days_borrowed"], 0);

    // Close the loan, deletion now succeeds
    client
        .patch(format!("{}/borrowing_records/{}", BASE_URL, borrow_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .delete(format!("{}/members/{}", BASE_URL, member))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/members/{}", BASE_URL, member))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_availability_filter() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let borrowed = create_book(&client, &token, "On Loan").await;
    let shelved = create_book(&client, &token, "On Shelf").await;
    let member = create_member(&client, &token, "grace").await;
    borrow(&client, &token, borrowed, member).await;

    let response = client
        .get(format!("{}/books?is_available=true", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let available: Vec<Value> = response.json().await.expect("Failed to parse books");
    assert!(available.iter().all(|b| b["is_available"] == true));
    assert!(available.iter().any(|b| b["id"].as_i64() == Some(shelved)));
    assert!(!available.iter().any(|b| b["id"].as_i64() == Some(borrowed)));

    let response = client
        .get(format!("{}/books?is_available=false", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let unavailable: Vec<Value> = response.json().await.expect("Failed to parse books");
    assert!(unavailable.iter().any(|b| b["id"].as_i64() == Some(borrowed)));
}

#[tokio::test]
#[ignore]
async fn test_me_returns_principal() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "librarian");
    assert!(body["password"].is_null());
}
