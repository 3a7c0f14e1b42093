mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use course_staffing_api::testing::{StaticCourseDirectory, StubContractDirectory};

fn apply_body(course_id: &str, grade: f64) -> Value {
    json!({
        "course_id": course_id,
        "grade": grade,
        "motivation": "I enjoyed this course",
        "contact_email": "jsmith@tudelft.nl"
    })
}

#[tokio::test]
async fn apply_then_status_shows_pending() -> Result<()> {
    let app = common::default_app();
    let token = app.bearer("jsmith");

    let (status, body) = app
        .request(
            "POST",
            "/applications/apply",
            Some(&token),
            Some(apply_body("CSE1300", 7.0)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "PENDING");

    let (status, body) = app
        .request("GET", "/applications/status/CSE1300", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["net_id"], "jsmith");
    assert_eq!(body["data"]["grade"], 7.0);
    Ok(())
}

#[tokio::test]
async fn apply_requires_authentication() -> Result<()> {
    let app = common::default_app();

    let (status, _) = app
        .request(
            "POST",
            "/applications/apply",
            None,
            Some(apply_body("CSE1300", 7.0)),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn unknown_course_is_404() -> Result<()> {
    let app = common::default_app();

    let (status, _) = app
        .request(
            "POST",
            "/applications/apply",
            Some(&app.bearer("jsmith")),
            Some(apply_body("CSE9999", 7.0)),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn out_of_range_grade_is_forbidden() -> Result<()> {
    let app = common::default_app();

    let (status, _) = app
        .request(
            "POST",
            "/applications/apply",
            Some(&app.bearer("jsmith")),
            Some(apply_body("CSE1300", 0.5)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn fourth_pending_application_is_forbidden() -> Result<()> {
    let app = common::build_app(
        StaticCourseDirectory::new()
            .with_course("CSE1300")
            .with_course("CSE1305")
            .with_course("CSE1310")
            .with_course("CSE1315"),
        StubContractDirectory::new(),
    );
    let token = app.bearer("jsmith");

    for course in ["CSE1300", "CSE1305", "CSE1310"] {
        let (status, _) = app
            .request(
                "POST",
                "/applications/apply",
                Some(&token),
                Some(apply_body(course, 7.0)),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = app
        .request(
            "POST",
            "/applications/apply",
            Some(&token),
            Some(apply_body("CSE1315", 7.0)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn duplicate_application_conflicts() -> Result<()> {
    let app = common::default_app();
    let token = app.bearer("jsmith");

    let (status, _) = app
        .request(
            "POST",
            "/applications/apply",
            Some(&token),
            Some(apply_body("CSE1300", 7.0)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "POST",
            "/applications/apply",
            Some(&token),
            Some(apply_body("CSE1300", 8.0)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn withdraw_deletes_pending_application() -> Result<()> {
    let app = common::default_app();
    let token = app.bearer("jsmith");

    app.request(
        "POST",
        "/applications/apply",
        Some(&token),
        Some(apply_body("CSE1300", 7.0)),
    )
    .await;

    let (status, _) = app
        .request("DELETE", "/applications/withdraw/CSE1300", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request("GET", "/applications/status/CSE1300", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn withdraw_without_application_is_404() -> Result<()> {
    let app = common::default_app();

    let (status, _) = app
        .request(
            "DELETE",
            "/applications/withdraw/CSE1300",
            Some(&app.bearer("jsmith")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn decisions_are_lecturer_only() -> Result<()> {
    let app = common::default_app();

    app.request(
        "POST",
        "/applications/apply",
        Some(&app.bearer("jsmith")),
        Some(apply_body("CSE1300", 7.0)),
    )
    .await;

    let (status, _) = app
        .request(
            "POST",
            "/applications/reject/CSE1300/jsmith",
            Some(&app.bearer("mallory")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            "GET",
            "/applications/CSE1300/pending",
            Some(&app.bearer("mallory")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn reject_then_withdraw_is_not_allowed() -> Result<()> {
    let app = common::default_app();
    let student = app.bearer("jsmith");

    app.request(
        "POST",
        "/applications/apply",
        Some(&student),
        Some(apply_body("CSE1300", 7.0)),
    )
    .await;

    let (status, _) = app
        .request(
            "POST",
            "/applications/reject/CSE1300/jsmith",
            Some(&app.bearer("ajansen")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // The decision is terminal: withdrawal is off the table
    let (status, _) = app
        .request("DELETE", "/applications/withdraw/CSE1300", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // And a second decision conflicts
    let (status, _) = app
        .request(
            "POST",
            "/applications/accept/CSE1300/jsmith",
            Some(&app.bearer("ajansen")),
            Some(json!({ "duties": "grade homework", "max_hours": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn pending_queue_is_ranked_by_historical_rating() -> Result<()> {
    let app = common::build_app(
        StaticCourseDirectory::new()
            .with_course("CSE1300")
            .with_lecturer("ajansen", "CSE1300"),
        StubContractDirectory::new()
            .with_rating("experienced", 9.0)
            .with_rating("threshold", 5.75)
            .with_rating("struggling", 5.74),
    );

    for net_id in ["struggling", "unrated", "experienced", "threshold"] {
        let (status, _) = app
            .request(
                "POST",
                "/applications/apply",
                Some(&app.bearer(net_id)),
                Some(apply_body("CSE1300", 7.0)),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .request(
            "GET",
            "/applications/CSE1300/pending",
            Some(&app.bearer("ajansen")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let queue = body["data"].as_array().expect("queue is a list");
    let order: Vec<&str> = queue
        .iter()
        .map(|e| e["net_id"].as_str().expect("net_id"))
        .collect();
    assert_eq!(order, vec!["experienced", "threshold", "unrated", "struggling"]);
    // Missing history shows up as the -1 sentinel
    assert_eq!(queue[2]["rating"], -1.0);
    Ok(())
}
