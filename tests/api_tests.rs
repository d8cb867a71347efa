use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::TestApp;

/// Amounts serialize as decimal strings; parse for numeric assertions
fn amount(value: &Value) -> f64 {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
        .parse()
        .expect("decimal string parses as f64")
}

async fn create_expense(
    app: &TestApp,
    token: &str,
    title: &str,
    amount: f64,
    category: &str,
    date: &str,
) -> Value {
    let payload = json!({
        "title": title,
        "amount": amount,
        "category": category,
        "date": date
    });
    let response = app.post("/expenses", &payload, Some(token)).await;
    assert_eq!(response.status(), 201, "expense creation must succeed");
    let body = response.json().await;
    body["data"]["expense"].clone()
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let response = app.get("/health", None).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["status"], "healthy");
}

// ============================================================================
// Auth
// ============================================================================

#[actix_rt::test]
async fn test_register_success() {
    let app = TestApp::new().await;
    let email = app.unique_email("newuser");

    let payload = json!({
        "name": "New User",
        "email": email,
        "password": "Password123"
    });

    let response = app.post("/auth/register", &payload, None).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["email"], email);
    assert_eq!(body["data"]["user"]["name"], "New User");
}

#[actix_rt::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let email = app.unique_email("duplicate");

    let payload = json!({
        "name": "Dup User",
        "email": email,
        "password": "Password123"
    });

    let response1 = app.post("/auth/register", &payload, None).await;
    assert_eq!(response1.status(), 201);

    let response2 = app.post("/auth/register", &payload, None).await;
    assert_eq!(response2.status(), 409);
    let body: Value = response2.json().await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_register_invalid_email() {
    let app = TestApp::new().await;

    let payload = json!({
        "name": "Bad Email",
        "email": "not-an-email",
        "password": "Password123"
    });

    let response = app.post("/auth/register", &payload, None).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["success"], false);
    let fields: Vec<_> = body["errors"]
        .as_array()
        .expect("per-field errors")
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"email".to_string()));
}

#[actix_rt::test]
async fn test_register_weak_password() {
    let app = TestApp::new().await;
    let email = app.unique_email("weakpass");

    // No uppercase or digit
    let payload = json!({
        "name": "Weak Pass",
        "email": email,
        "password": "password"
    });

    let response = app.post("/auth/register", &payload, None).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let email = app.unique_email("login");

    let register_payload = json!({
        "name": "Login Test",
        "email": email,
        "password": "Password123"
    });
    app.post("/auth/register", &register_payload, None).await;

    let login_payload = json!({
        "email": email,
        "password": "Password123"
    });

    let response = app.post("/auth/login", &login_payload, None).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["email"], email);
}

#[actix_rt::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let email = app.unique_email("wrongpass");

    let register_payload = json!({
        "name": "Wrong Pass",
        "email": email,
        "password": "Password123"
    });
    app.post("/auth/register", &register_payload, None).await;

    let login_payload = json!({
        "email": email,
        "password": "Password456"
    });

    let response = app.post("/auth/login", &login_payload, None).await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new().await;

    let payload = json!({
        "email": app.unique_email("nonexistent"),
        "password": "Password123"
    });

    let response = app.post("/auth/login", &payload, None).await;

    assert_eq!(response.status(), 401);
}

#[actix_rt::test]
async fn test_me_returns_current_user() {
    let app = TestApp::new().await;
    let token = app.register_user("me").await;

    let response = app.get("/auth/me", Some(&token)).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["name"], "Test User");
}

#[actix_rt::test]
async fn test_me_without_token() {
    let app = TestApp::new().await;

    let response = app.get("/auth/me", None).await;

    assert_eq!(response.status(), 401);
}

#[actix_rt::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let token = app.register_user("profile").await;
    let new_email = app.unique_email("profile_renamed");

    let payload = json!({
        "name": "Renamed User",
        "email": new_email
    });

    let response = app.put("/auth/profile", &payload, Some(&token)).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["data"]["user"]["name"], "Renamed User");
    assert_eq!(body["data"]["user"]["email"], new_email);
}

// ============================================================================
// Expense CRUD
// ============================================================================

#[actix_rt::test]
async fn test_create_expense_success() {
    let app = TestApp::new().await;
    let token = app.register_user("create").await;

    let payload = json!({
        "title": "Weekly groceries",
        "amount": 42.5,
        "category": "Food & Dining",
        "date": "2024-01-05",
        "description": "Fruit and bread"
    });

    let response = app.post("/expenses", &payload, Some(&token)).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Expense created successfully");
    let expense = &body["data"]["expense"];
    assert_eq!(expense["title"], "Weekly groceries");
    assert_eq!(amount(&expense["amount"]), 42.5);
    assert_eq!(expense["category"], "Food & Dining");
    assert_eq!(expense["date"], "2024-01-05");
    assert_eq!(expense["description"], "Fruit and bread");
    assert!(expense["id"].is_string());
    assert!(expense["createdAt"].is_string());
}

#[actix_rt::test]
async fn test_create_expense_zero_amount_rejected() {
    let app = TestApp::new().await;
    let token = app.register_user("zeroamount").await;

    let payload = json!({
        "title": "Free lunch",
        "amount": 0,
        "category": "Food & Dining",
        "date": "2024-01-05"
    });

    let response = app.post("/expenses", &payload, Some(&token)).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_create_expense_one_cent_succeeds() {
    let app = TestApp::new().await;
    let token = app.register_user("onecent").await;

    let expense = create_expense(
        &app,
        &token,
        "Penny sweet",
        0.01,
        "Food & Dining",
        "2024-01-05",
    )
    .await;

    assert_eq!(amount(&expense["amount"]), 0.01);
}

#[actix_rt::test]
async fn test_create_expense_future_date_rejected() {
    let app = TestApp::new().await;
    let token = app.register_user("futuredate").await;
    let tomorrow = (Utc::now().date_naive() + Duration::days(1)).to_string();

    let payload = json!({
        "title": "Time travel",
        "amount": 10,
        "category": "Travel",
        "date": tomorrow
    });

    let response = app.post("/expenses", &payload, Some(&token)).await;

    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn test_create_expense_today_succeeds() {
    let app = TestApp::new().await;
    let token = app.register_user("today").await;
    let today = Utc::now().date_naive().to_string();

    let expense = create_expense(&app, &token, "Coffee", 3.2, "Food & Dining", &today).await;

    assert_eq!(expense["date"], today);
}

#[actix_rt::test]
async fn test_create_expense_invalid_category_rejected() {
    let app = TestApp::new().await;
    let token = app.register_user("badcategory").await;

    let payload = json!({
        "title": "Mystery",
        "amount": 10,
        "category": "Groceries",
        "date": "2024-01-05"
    });

    let response = app.post("/expenses", &payload, Some(&token)).await;

    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn test_get_expense_by_id() {
    let app = TestApp::new().await;
    let token = app.register_user("getone").await;

    let created = create_expense(&app, &token, "Cinema", 12.0, "Entertainment", "2024-02-01").await;
    let id = created["id"].as_str().unwrap();

    let response = app.get(&format!("/expenses/{id}"), Some(&token)).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["data"]["expense"]["id"], *id);
    assert_eq!(body["data"]["expense"]["title"], "Cinema");
}

#[actix_rt::test]
async fn test_get_nonexistent_expense() {
    let app = TestApp::new().await;
    let token = app.register_user("getmissing").await;

    let response = app
        .get(&format!("/expenses/{}", Uuid::new_v4()), Some(&token))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_foreign_expense_indistinguishable_from_missing() {
    let app = TestApp::new().await;
    let owner_token = app.register_user("owner").await;
    let other_token = app.register_user("intruder").await;

    let created =
        create_expense(&app, &owner_token, "Private", 50.0, "Shopping", "2024-03-01").await;
    let id = created["id"].as_str().unwrap();

    // get, update, and delete by a non-owner all behave like a missing record
    let response = app.get(&format!("/expenses/{id}"), Some(&other_token)).await;
    assert_eq!(response.status(), 404);

    let replacement = json!({
        "title": "Hijacked",
        "amount": 1,
        "category": "Other",
        "date": "2024-03-01"
    });
    let response = app
        .put(&format!("/expenses/{id}"), &replacement, Some(&other_token))
        .await;
    assert_eq!(response.status(), 404);

    let response = app
        .delete(&format!("/expenses/{id}"), Some(&other_token))
        .await;
    assert_eq!(response.status(), 404);

    // Owner still sees the untouched record
    let response = app.get(&format!("/expenses/{id}"), Some(&owner_token)).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["data"]["expense"]["title"], "Private");
}

#[actix_rt::test]
async fn test_update_replaces_all_fields() {
    let app = TestApp::new().await;
    let token = app.register_user("update").await;

    let created = create_expense(&app, &token, "Bus fare", 2.5, "Transportation", "2024-04-01").await;
    let id = created["id"].as_str().unwrap();

    let replacement = json!({
        "title": "Train fare",
        "amount": 8.75,
        "category": "Travel",
        "date": "2024-04-02",
        "description": "Off-peak return"
    });

    let response = app
        .put(&format!("/expenses/{id}"), &replacement, Some(&token))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Expense updated successfully");
    let expense = &body["data"]["expense"];
    assert_eq!(expense["title"], "Train fare");
    assert_eq!(amount(&expense["amount"]), 8.75);
    assert_eq!(expense["category"], "Travel");
    assert_eq!(expense["date"], "2024-04-02");
    assert_eq!(expense["description"], "Off-peak return");
}

#[actix_rt::test]
async fn test_delete_expense() {
    let app = TestApp::new().await;
    let token = app.register_user("delete").await;

    let created = create_expense(&app, &token, "Doomed", 1.0, "Other", "2024-05-01").await;
    let id = created["id"].as_str().unwrap();

    let response = app.delete(&format!("/expenses/{id}"), Some(&token)).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Expense deleted successfully");

    let response = app.get(&format!("/expenses/{id}"), Some(&token)).await;
    assert_eq!(response.status(), 404);
}

// ============================================================================
// Listing: filters, sorting, pagination
// ============================================================================

#[actix_rt::test]
async fn test_list_pagination_over_sorted_dates() {
    let app = TestApp::new().await;
    let token = app.register_user("paging").await;

    for day in 1..=5 {
        create_expense(
            &app,
            &token,
            &format!("Day {day}"),
            day as f64,
            "Other",
            &format!("2024-06-{day:02}"),
        )
        .await;
    }

    // Date descending ranks days 5,4,3,2,1; page 2 of size 2 holds ranks 3 and 4
    let response = app
        .get(
            "/expenses?page=2&limit=2&sortBy=date&sortOrder=desc",
            Some(&token),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let titles: Vec<_> = body["data"]["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Day 3", "Day 2"]);

    let pagination = &body["data"]["pagination"];
    assert_eq!(pagination["currentPage"], 2);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(pagination["totalExpenses"], 5);
    assert_eq!(pagination["hasNextPage"], true);
    assert_eq!(pagination["hasPrevPage"], true);
}

#[actix_rt::test]
async fn test_list_sorted_by_amount_ascending() {
    let app = TestApp::new().await;
    let token = app.register_user("amountsort").await;

    create_expense(&app, &token, "Mid", 10.0, "Other", "2024-06-01").await;
    create_expense(&app, &token, "High", 20.0, "Other", "2024-06-02").await;
    create_expense(&app, &token, "Low", 5.0, "Other", "2024-06-03").await;

    let response = app
        .get("/expenses?sortBy=amount&sortOrder=asc", Some(&token))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let amounts: Vec<f64> = body["data"]["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| amount(&e["amount"]))
        .collect();
    assert_eq!(amounts, vec![5.0, 10.0, 20.0]);
}

#[actix_rt::test]
async fn test_list_category_filter_and_all_sentinel() {
    let app = TestApp::new().await;
    let token = app.register_user("catfilter").await;

    create_expense(&app, &token, "Lunch", 10.0, "Food & Dining", "2024-06-01").await;
    create_expense(&app, &token, "Flight", 200.0, "Travel", "2024-06-02").await;

    let response = app
        .get("/expenses?category=Food%20%26%20Dining", Some(&token))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let expenses = body["data"]["expenses"].as_array().unwrap().clone();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["title"], "Lunch");

    let response = app.get("/expenses?category=all", Some(&token)).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["data"]["expenses"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_list_amount_and_date_range_filters() {
    let app = TestApp::new().await;
    let token = app.register_user("rangefilter").await;

    create_expense(&app, &token, "Cheap", 5.0, "Other", "2024-06-01").await;
    create_expense(&app, &token, "Fair", 15.0, "Other", "2024-06-10").await;
    create_expense(&app, &token, "Steep", 50.0, "Other", "2024-06-20").await;

    // Inclusive amount bounds
    let response = app
        .get("/expenses?minAmount=5&maxAmount=15", Some(&token))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["data"]["expenses"].as_array().unwrap().len(), 2);

    // Inclusive date bounds
    let response = app
        .get(
            "/expenses?startDate=2024-06-10&endDate=2024-06-20",
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let titles: Vec<_> = body["data"]["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Fair".to_string()));
    assert!(titles.contains(&"Steep".to_string()));
}

#[actix_rt::test]
async fn test_list_malformed_amount_bound_rejected() {
    let app = TestApp::new().await;
    let token = app.register_user("badbound").await;

    let response = app.get("/expenses?minAmount=abc", Some(&token)).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_list_requires_auth() {
    let app = TestApp::new().await;

    let response = app.get("/expenses", None).await;

    assert_eq!(response.status(), 401);
}

// ============================================================================
// Statistics
// ============================================================================

#[actix_rt::test]
async fn test_stats_overall_and_breakdown() {
    let app = TestApp::new().await;
    let token = app.register_user("stats").await;

    create_expense(&app, &token, "Lunch", 10.0, "Food & Dining", "2024-01-05").await;
    create_expense(&app, &token, "Flight", 20.0, "Travel", "2024-02-10").await;
    create_expense(&app, &token, "Snack", 5.0, "Food & Dining", "2024-01-20").await;

    let response = app.get("/expenses/stats", Some(&token)).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let overall = &body["data"]["stats"]["overall"];
    assert_eq!(amount(&overall["totalAmount"]), 35.0);
    assert_eq!(overall["totalExpenses"], 3);
    assert!((amount(&overall["avgAmount"]) - 35.0 / 3.0).abs() < 1e-9);
    assert_eq!(amount(&overall["maxAmount"]), 20.0);
    assert_eq!(amount(&overall["minAmount"]), 5.0);

    let by_category = body["data"]["stats"]["byCategory"].as_array().unwrap();
    assert_eq!(by_category.len(), 2);
    assert_eq!(by_category[0]["category"], "Travel");
    assert_eq!(amount(&by_category[0]["totalAmount"]), 20.0);
    assert_eq!(by_category[0]["count"], 1);
    assert_eq!(by_category[1]["category"], "Food & Dining");
    assert_eq!(amount(&by_category[1]["totalAmount"]), 15.0);
    assert_eq!(by_category[1]["count"], 2);
}

#[actix_rt::test]
async fn test_stats_empty_set_is_all_zeros() {
    let app = TestApp::new().await;
    let token = app.register_user("emptystats").await;

    let response = app.get("/expenses/stats", Some(&token)).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let overall = &body["data"]["stats"]["overall"];
    assert_eq!(amount(&overall["totalAmount"]), 0.0);
    assert_eq!(overall["totalExpenses"], 0);
    assert_eq!(amount(&overall["avgAmount"]), 0.0);
    assert_eq!(amount(&overall["maxAmount"]), 0.0);
    assert_eq!(amount(&overall["minAmount"]), 0.0);
    assert!(body["data"]["stats"]["byCategory"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[actix_rt::test]
async fn test_stats_respects_date_range() {
    let app = TestApp::new().await;
    let token = app.register_user("statsrange").await;

    create_expense(&app, &token, "January", 10.0, "Other", "2024-01-15").await;
    create_expense(&app, &token, "February", 30.0, "Other", "2024-02-15").await;

    let response = app
        .get(
            "/expenses/stats?startDate=2024-02-01&endDate=2024-02-28",
            Some(&token),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let overall = &body["data"]["stats"]["overall"];
    assert_eq!(amount(&overall["totalAmount"]), 30.0);
    assert_eq!(overall["totalExpenses"], 1);
}
