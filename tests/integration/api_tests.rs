//! API integration tests

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to create a member and return its JSON body
async fn create_member(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": name,
            "email": "test@example.com",
            "phone": "555-0100"
        }))
        .send()
        .await
        .expect("Failed to send create member request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse member response")
}

/// Helper to create a book and return its JSON body
async fn create_book(client: &Client, title: &str, cost: Option<&str>) -> Value {
    let mut body = json!({
        "title": title,
        "author": "Test Author",
        "isbn": "978-0-00-000000-0",
        "year": 2020,
        "genre": "fiction"
    });
    if let Some(cost) = cost {
        body["cost"] = json!(cost);
    }

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book response")
}

async fn delete_entity(client: &Client, path: &str, id: &str) {
    let _ = client
        .delete(format!("{}/{}/{}", BASE_URL, path, id))
        .send()
        .await;
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
async fn test_create_and_delete_member() {
    let client = Client::new();

    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": "Marguerite Duras",
            "email": "marguerite@example.com",
            "phone": "555-0101"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let location = response
        .headers()
        .get("location")
        .expect("No Location header")
        .to_str()
        .unwrap()
        .to_string();

    let body: Value = response.json().await.expect("Failed to parse response");
    let member_id = body["id"].as_str().expect("No member ID").to_string();

    assert_eq!(location, format!("/members/{}", member_id));
    assert_eq!(body["name"], "Marguerite Duras");
    assert_eq!(body["cost_incurred"], "0.00");

    let response = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_member_validation() {
    let client = Client::new();

    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": "Bad Email",
            "email": "not-an-email",
            "phone": "555-0102"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_list_members() {
    let client = Client::new();
    let member = create_member(&client, "Listable Member").await;
    let member_id = member["id"].as_str().unwrap().to_string();

    let response = client
        .get(format!("{}/members?name=listable", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].as_i64().unwrap() >= 1);

    delete_entity(&client, "members", &member_id).await;
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_book() {
    let client = Client::new();

    let book = create_book(&client, "The Lover", Some("2.50")).await;
    let book_id = book["id"].as_str().expect("No book ID").to_string();

    assert_eq!(book["status"], "available");
    assert_eq!(book["cost"], "2.50");
    assert!(book["date_added"].is_string());
    assert!(book["date_updated"].is_string());
    assert!(book["borrower_id"].is_null());

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_same_day_return() {
    let client = Client::new();
    let member = create_member(&client, "Same Day Borrower").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let book = create_book(&client, "Short Loan", Some("2.50")).await;
    let book_id = book["id"].as_str().unwrap().to_string();

    // Borrow
    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let transaction_id = body["id"].as_i64().expect("No transaction ID");

    assert_eq!(body["borrowed_days"], 0);
    assert_eq!(body["total_cost"], "0.00");
    assert_eq!(body["returned"], false);

    // Return the same day: zero days, zero cost, not an error
    let response = client
        .post(format!("{}/transactions/{}/return", BASE_URL, transaction_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "returned");
    assert_eq!(body["transaction"]["returned"], true);
    assert_eq!(body["transaction"]["borrowed_days"], 0);
    assert_eq!(body["transaction"]["total_cost"], "0.00");

    // Returning again is rejected
    let response = client
        .post(format!("{}/transactions/{}/return", BASE_URL, transaction_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    delete_entity(&client, "members", &member_id).await;
    delete_entity(&client, "books", &book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_return_after_five_days_accrues_cost() {
    let client = Client::new();
    let member = create_member(&client, "Five Day Borrower").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let book = create_book(&client, "Week Loan", Some("2.50")).await;
    let book_id = book["id"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let transaction_id = body["id"].as_i64().expect("No transaction ID");

    // Close the transaction five days out; the margin keeps the whole-day
    // count at 5 regardless of request latency
    let date_returned = (Utc::now() + Duration::days(5) + Duration::hours(1)).to_rfc3339();

    let response = client
        .put(format!("{}/transactions/{}", BASE_URL, transaction_id))
        .json(&json!({ "date_returned": date_returned, "returned": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["borrowed_days"], 5);
    assert_eq!(body["total_cost"], "12.50");

    // The member's cost_incurred mirrors the transaction cost
    let response = client
        .get(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["cost_incurred"], "12.50");

    // Aggregate adds cost_incurred to the transaction history sum
    let response = client
        .get(format!("{}/members/{}/costs", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["cost_incurred"], "12.50");
    assert_eq!(body["total_costs"], "25.00");

    delete_entity(&client, "members", &member_id).await;
    delete_entity(&client, "books", &book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_borrowing_costless_book_fails() {
    let client = Client::new();
    let member = create_member(&client, "Costless Borrower").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let book = create_book(&client, "Priceless", None).await;
    let book_id = book["id"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    delete_entity(&client, "members", &member_id).await;
    delete_entity(&client, "books", &book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_return_date_before_borrow_rejected() {
    let client = Client::new();
    let member = create_member(&client, "Time Traveler").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let book = create_book(&client, "Backdated", Some("2.50")).await;
    let book_id = book["id"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let transaction_id = body["id"].as_i64().expect("No transaction ID");

    let date_returned = (Utc::now() - Duration::days(2)).to_rfc3339();

    let response = client
        .put(format!("{}/transactions/{}", BASE_URL, transaction_id))
        .json(&json!({ "date_returned": date_returned, "returned": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    delete_entity(&client, "members", &member_id).await;
    delete_entity(&client, "books", &book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_deleting_member_cascades_transactions() {
    let client = Client::new();
    let member = create_member(&client, "Departing Member").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let book = create_book(&client, "Surviving Book", Some("2.50")).await;
    let book_id = book["id"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let transaction_id = body["id"].as_i64().expect("No transaction ID");

    let response = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    // The transaction went with the member
    let response = client
        .get(format!("{}/transactions/{}", BASE_URL, transaction_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    // The book did not
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    delete_entity(&client, "books", &book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_deleting_member_releases_borrowed_books() {
    let client = Client::new();
    let member = create_member(&client, "Book Holder").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let book = create_book(&client, "Held Book", Some("2.50")).await;
    let book_id = book["id"].as_str().unwrap().to_string();

    // Hand the book to the member
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "borrower_id": member_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["borrower_id"], member_id.as_str());

    let response = client
        .get(format!("{}/members/{}/books", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Held Book");

    // Deleting the member nulls the reference instead of deleting the book
    let response = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["borrower_id"].is_null());

    delete_entity(&client, "books", &book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["members"]["total"].is_number());
    assert!(body["books"]["total"].is_number());
    assert!(body["transactions"]["active"].is_number());
}
