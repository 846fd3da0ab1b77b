// Test-specific lint overrides: integration tests use unwrap/expect freely,
// and some pedantic/nursery lints are not appropriate for test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::future_not_send,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! End-to-end tests for the task and schedule pages.
//!
//! An in-process axum "upstream" stands in for the remote JSON source. Each
//! test starts a dashboard server on `127.0.0.1:0` pointed at it and fetches
//! pages over real HTTP. These tests validate:
//! - Well-formed documents produce one card per entity on both pages
//! - Completed tasks are truncated to five
//! - HTTP 500, unreachable sources, and malformed JSON render only the
//!   failure heading
//! - Missing collections render the empty-group messages

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Value, json};
use taskboard_server::config::{DashboardConfig, SourceUrls};
use taskboard_server::pages::{self, AppState};

// =============================================================================
// Helpers
// =============================================================================

/// Starts an upstream serving fixed documents and returns its base URL.
///
/// Routes:
/// - `/tasks.json`, `/cron.json`: the given documents
/// - `/broken`: HTTP 500
/// - `/garbage`: 200 with a body that is not JSON
async fn start_upstream(tasks: Value, schedules: Value) -> String {
    let app = axum::Router::new()
        .route(
            "/tasks.json",
            axum::routing::get(move || {
                let tasks = tasks.clone();
                async move { axum::Json(tasks) }
            }),
        )
        .route(
            "/cron.json",
            axum::routing::get(move || {
                let schedules = schedules.clone();
                async move { axum::Json(schedules) }
            }),
        )
        .route(
            "/broken",
            axum::routing::get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/garbage",
            axum::routing::get(|| async { "<html>not json</html>" }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Starts a dashboard reading from the given source URLs, caching disabled.
async fn start_dashboard(tasks_url: String, schedules_url: String) -> String {
    let config = DashboardConfig {
        sources: SourceUrls {
            tasks: tasks_url,
            schedules: schedules_url,
        },
        revalidate: Duration::ZERO,
        request_timeout: Duration::from_secs(5),
        ..DashboardConfig::default()
    };
    let state = Arc::new(AppState::from_config(&config).unwrap());
    let (addr, _handle) = pages::start_server("127.0.0.1:0", state).await.unwrap();
    format!("http://{addr}")
}

/// GETs a page, asserting a 200 HTML response, and returns the body.
async fn get_page(base: &str, path: &str) -> String {
    let response = reqwest::get(format!("{base}{path}")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {content_type}");
    response.text().await.unwrap()
}

fn card_count(html: &str) -> usize {
    html.matches("class=\"card ").count()
}

fn section<'a>(html: &'a str, key: &str) -> &'a str {
    let start = html
        .find(&format!("<section data-group=\"{key}\">"))
        .unwrap_or_else(|| panic!("no section {key}"));
    let end = html[start..].find("</section>").unwrap() + start;
    &html[start..end]
}

fn tasks_fixture() -> Value {
    let completed: Vec<Value> = (1..=8)
        .map(|i| json!({ "id": i + 100, "title": format!("done-{i}"), "completedAt": "2026-01-15T09:30:00Z" }))
        .collect();
    json!({
        "tasks": {
            "in_progress": [
                { "id": 1, "title": "Write report", "priority": "high", "status": "active",
                  "estimatedDuration": "2h" },
                { "id": "two", "title": "Fix <bug>", "blockedBy": "Vendor" }
            ],
            "planned": [
                { "id": 3, "title": "Plan trip", "scheduledFor": "Friday", "priority": "low" }
            ],
            "backburner": [
                { "id": 4, "title": "Learn piano", "notes": "someday" }
            ],
            "completed": completed
        },
        "meta": { "lastUpdated": "2026-01-15T10:00:00Z" }
    })
}

fn schedules_fixture() -> Value {
    json!({
        "jobs": [
            { "name": "morning-brief", "description": "Health brief", "enabled": true,
              "schedule": "0 9 * * *", "nextRun": "Daily at 9am" },
            { "name": "weekly-review", "description": "Review", "enabled": true,
              "schedule": "0 18 * * 0", "nextRun": "Sunday 6pm" },
            { "name": "rent", "description": "Pay rent", "enabled": false,
              "schedule": "0 9 27 * *", "nextRun": "27th" },
            { "name": "daily-until-27", "description": "Overlap", "enabled": true,
              "schedule": "0 7 * * *", "nextRun": "Daily until the 27th" },
            { "name": "adhoc", "description": "Manual", "enabled": true,
              "schedule": "", "nextRun": "On demand" }
        ],
        "meta": { "lastUpdated": "2026-01-15T10:00:00Z" }
    })
}

// =============================================================================
// Task page
// =============================================================================

#[tokio::test]
async fn task_page_renders_every_group() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let base = start_dashboard(
        format!("{upstream}/tasks.json"),
        format!("{upstream}/cron.json"),
    )
    .await;

    let html = get_page(&base, "/").await;

    assert!(html.contains("<a href=\"/\" aria-current=\"page\""));
    assert!(html.contains("Last updated: "));
    assert_eq!(card_count(section(&html, "in_progress")), 2);
    assert_eq!(card_count(section(&html, "planned")), 1);
    assert_eq!(card_count(section(&html, "backburner")), 1);
    assert!(html.contains("🔴 Write report"));
    assert!(html.contains("ACTIVE"));
    assert!(html.contains("Fix &lt;bug&gt;"));
    assert!(html.contains("🚫 Vendor"));
    assert!(html.contains("📅 Scheduled: Friday"));
}

#[tokio::test]
async fn task_page_truncates_completed_to_five() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let base = start_dashboard(
        format!("{upstream}/tasks.json"),
        format!("{upstream}/cron.json"),
    )
    .await;

    let html = get_page(&base, "/").await;
    let completed = section(&html, "completed");

    assert_eq!(card_count(completed), 5);
    assert!(completed.contains("Recently Completed (5)"));
    assert!(completed.contains(">done-1</h3>"));
    assert!(completed.contains(">done-5</h3>"));
    assert!(!completed.contains("done-6"));
    assert!(!completed.contains("done-8"));
    // 2 + 1 + 1 + 5: nothing else dropped or duplicated.
    assert_eq!(card_count(&html), 9);
}

#[tokio::test]
async fn task_page_with_missing_groups_shows_empty_messages() {
    let upstream = start_upstream(
        json!({ "tasks": { "planned": [{ "id": 1, "title": "Only one" }] } }),
        schedules_fixture(),
    )
    .await;
    let base = start_dashboard(
        format!("{upstream}/tasks.json"),
        format!("{upstream}/cron.json"),
    )
    .await;

    let html = get_page(&base, "/").await;
    let in_progress = section(&html, "in_progress");

    assert!(in_progress.contains("No tasks in progress"));
    assert_eq!(card_count(in_progress), 0);
    assert!(html.contains("No back-burner tasks"));
    assert!(html.contains("No completed tasks"));
    assert!(html.contains("Last updated: unknown"));
    assert_eq!(card_count(&html), 1);
}

#[tokio::test]
async fn task_page_tolerates_mistyped_display_fields() {
    let upstream = start_upstream(
        json!({
            "tasks": {
                "in_progress": [
                    { "id": 1.5, "title": "Numeric estimate", "estimatedDuration": 30 }
                ]
            },
            "meta": { "lastUpdated": 1_737_000_000_000_i64 }
        }),
        schedules_fixture(),
    )
    .await;
    let base = start_dashboard(
        format!("{upstream}/tasks.json"),
        format!("{upstream}/cron.json"),
    )
    .await;

    let html = get_page(&base, "/").await;

    assert!(!html.contains("Failed to load"));
    let in_progress = section(&html, "in_progress");
    assert_eq!(card_count(in_progress), 1);
    assert!(in_progress.contains("data-key=\"1.5\""));
    assert!(in_progress.contains("⏱️ Est: 30"));
    assert!(!html.contains("Last updated: unknown"));
    assert!(!html.contains("Last updated: 1737000000000"));
}

#[tokio::test]
async fn task_page_server_error_renders_only_failure_heading() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let base = start_dashboard(format!("{upstream}/broken"), format!("{upstream}/cron.json")).await;

    let html = get_page(&base, "/").await;

    assert!(html.contains("<h1>Failed to load tasks</h1>"));
    assert_eq!(card_count(&html), 0);
    assert!(!html.contains("<nav"));
    assert!(!html.contains("<section"));
    assert!(!html.contains("Last updated"));
}

#[tokio::test]
async fn task_page_malformed_json_renders_failure() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let base = start_dashboard(format!("{upstream}/garbage"), format!("{upstream}/cron.json")).await;

    let html = get_page(&base, "/").await;
    assert!(html.contains("<h1>Failed to load tasks</h1>"));
    assert_eq!(card_count(&html), 0);
}

// =============================================================================
// Schedule page
// =============================================================================

#[tokio::test]
async fn schedule_page_groups_by_cadence() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let base = start_dashboard(
        format!("{upstream}/tasks.json"),
        format!("{upstream}/cron.json"),
    )
    .await;

    let html = get_page(&base, "/schedules").await;

    assert!(html.contains("<a href=\"/schedules\" aria-current=\"page\""));

    let daily = section(&html, "daily");
    assert_eq!(card_count(daily), 2);
    assert!(daily.contains("Daily (2)"));
    let brief = daily.find("data-key=\"morning-brief\"").unwrap();
    let overlap = daily.find("data-key=\"daily-until-27\"").unwrap();
    assert!(brief < overlap, "daily bucket must keep document order");

    let weekly = section(&html, "weekly");
    assert_eq!(card_count(weekly), 1);
    assert!(weekly.contains("data-key=\"weekly-review\""));

    let monthly = section(&html, "monthly");
    assert_eq!(card_count(monthly), 2);
    assert!(monthly.contains("data-key=\"rent\""));
    assert!(monthly.contains("data-key=\"daily-until-27\""));
    assert!(monthly.contains(">DISABLED</span>"));

    assert!(!html.contains("data-key=\"adhoc\""));
}

#[tokio::test]
async fn schedule_page_server_error_renders_only_failure_heading() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let base = start_dashboard(format!("{upstream}/tasks.json"), format!("{upstream}/broken")).await;

    let html = get_page(&base, "/schedules").await;

    assert!(html.contains("<h1>Failed to load schedules</h1>"));
    assert_eq!(card_count(&html), 0);
    assert!(!html.contains("<nav"));
    assert!(!html.contains("<section"));

    // The other page is unaffected.
    let tasks = get_page(&base, "/").await;
    assert!(!tasks.contains("Failed to load"));
}

#[tokio::test]
async fn unreachable_source_renders_failure_for_both_pages() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    let base = start_dashboard(
        format!("http://{dead}/tasks.json"),
        format!("http://{dead}/cron.json"),
    )
    .await;

    let tasks = get_page(&base, "/").await;
    assert!(tasks.contains("<h1>Failed to load tasks</h1>"));
    assert_eq!(card_count(&tasks), 0);

    let schedules = get_page(&base, "/schedules").await;
    assert!(schedules.contains("<h1>Failed to load schedules</h1>"));
    assert_eq!(card_count(&schedules), 0);
}

#[tokio::test]
async fn pages_carry_revalidation_hint() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let config = DashboardConfig {
        sources: SourceUrls {
            tasks: format!("{upstream}/tasks.json"),
            schedules: format!("{upstream}/cron.json"),
        },
        ..DashboardConfig::default()
    };
    let state = Arc::new(AppState::from_config(&config).unwrap());
    let (addr, _handle) = pages::start_server("127.0.0.1:0", state).await.unwrap();

    let response = reqwest::get(format!("http://{addr}/schedules")).await.unwrap();
    let cache_control = response
        .headers()
        .get(reqwest::header::CACHE_CONTROL)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(cache_control, "public, s-maxage=60, stale-while-revalidate");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let upstream = start_upstream(tasks_fixture(), schedules_fixture()).await;
    let base = start_dashboard(
        format!("{upstream}/tasks.json"),
        format!("{upstream}/cron.json"),
    )
    .await;

    let response = reqwest::get(format!("{base}/api/tasks")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
