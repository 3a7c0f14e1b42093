mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use course_staffing_api::domain::Contract;
use course_staffing_api::repository::ContractRepository;
use course_staffing_api::testing::{StaticCourseDirectory, StubContractDirectory};

fn apply_body(course_id: &str) -> Value {
    json!({
        "course_id": course_id,
        "grade": 7.0,
        "motivation": "I enjoyed this course",
        "contact_email": "jsmith@tudelft.nl"
    })
}

#[tokio::test]
async fn accept_leaves_a_fresh_contract_on_record() -> Result<()> {
    let app = common::default_app();
    let student = app.bearer("jsmith");

    app.request(
        "POST",
        "/applications/apply",
        Some(&student),
        Some(apply_body("CSE1300")),
    )
    .await;

    let (status, _) = app
        .request(
            "POST",
            "/applications/accept/CSE1300/jsmith",
            Some(&app.bearer("ajansen")),
            Some(json!({ "duties": "grade homework", "max_hours": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request("GET", "/applications/status/CSE1300", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ACCEPTED");

    let (status, body) = app
        .request("GET", "/contracts/CSE1300", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["max_hours"], 5);
    assert_eq!(body["data"]["signed"], false);
    assert_eq!(body["data"]["rating"], 0.0);
    assert_eq!(body["data"]["actual_worked_hours"], 0);
    Ok(())
}

#[tokio::test]
async fn refused_contract_aborts_the_accept() -> Result<()> {
    let app = common::build_app(
        StaticCourseDirectory::new()
            .with_course("CSE1300")
            .with_lecturer("ajansen", "CSE1300"),
        StubContractDirectory::new().refusing(),
    );
    let student = app.bearer("jsmith");

    app.request(
        "POST",
        "/applications/apply",
        Some(&student),
        Some(apply_body("CSE1300")),
    )
    .await;

    let (status, _) = app
        .request(
            "POST",
            "/applications/accept/CSE1300/jsmith",
            Some(&app.bearer("ajansen")),
            Some(json!({ "duties": "grade homework", "max_hours": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // No partial state: the application is still pending, no contract exists
    let (_, body) = app
        .request("GET", "/applications/status/CSE1300", Some(&student), None)
        .await;
    assert_eq!(body["data"]["status"], "PENDING");

    let (status, _) = app
        .request("GET", "/contracts/CSE1300", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn missing_contract_is_404() -> Result<()> {
    let app = common::default_app();

    let (status, _) = app
        .request("GET", "/contracts/CSE1300", Some(&app.bearer("jsmith")), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn rating_bounds_are_enforced() -> Result<()> {
    let app = common::default_app();
    let lecturer = app.bearer("ajansen");

    let (status, _) = app
        .request(
            "POST",
            "/contracts",
            Some(&lecturer),
            Some(json!({
                "net_id": "jsmith",
                "course_id": "CSE1300",
                "max_hours": 5,
                "duties": "grade homework"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "PUT",
            "/contracts/CSE1300/jsmith/rating",
            Some(&lecturer),
            Some(json!({ "rating": 10.5 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "PUT",
            "/contracts/CSE1300/jsmith/rating",
            Some(&lecturer),
            Some(json!({ "rating": 8.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "PUT",
            "/contracts/CSE1300/jsmith/worked-hours",
            Some(&lecturer),
            Some(json!({ "hours": -2 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn hour_declarations_flow_submit_review_once() -> Result<()> {
    let app = common::default_app();
    let student = app.bearer("jsmith");
    let lecturer = app.bearer("ajansen");

    app.request(
        "POST",
        "/contracts",
        Some(&lecturer),
        Some(json!({
            "net_id": "jsmith",
            "course_id": "CSE1300",
            "max_hours": 5,
            "duties": "grade homework"
        })),
    )
    .await;

    let (status, body) = app
        .request(
            "POST",
            "/hours/submit",
            Some(&student),
            Some(json!({
                "course_id": "CSE1300",
                "worked_time": 120,
                "date": "2022-03-14",
                "description": "lab session"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["approved"], false);
    assert_eq!(body["data"]["reviewed"], false);
    let id = body["data"]["id"].as_str().expect("declaration id").to_string();

    let (status, body) = app
        .request("GET", "/hours/pending/CSE1300", Some(&lecturer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().expect("pending list").len(), 1);

    let (status, _) = app
        .request(
            "PUT",
            &format!("/hours/{id}/review"),
            Some(&lecturer),
            Some(json!({ "approve": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Reviewed declarations leave the pending queue permanently
    let (_, body) = app
        .request("GET", "/hours/pending/CSE1300", Some(&lecturer), None)
        .await;
    assert!(body["data"].as_array().expect("pending list").is_empty());

    let (status, _) = app
        .request(
            "PUT",
            &format!("/hours/{id}/review"),
            Some(&lecturer),
            Some(json!({ "approve": false })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn hours_without_contract_are_404() -> Result<()> {
    let app = common::default_app();

    let (status, _) = app
        .request(
            "POST",
            "/hours/submit",
            Some(&app.bearer("jsmith")),
            Some(json!({
                "course_id": "CSE1300",
                "worked_time": 120,
                "date": "2022-03-14",
                "description": "lab session"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn average_ratings_cover_signed_rated_contracts_only() -> Result<()> {
    let app = common::default_app();

    for (course_id, rating, signed) in
        [("CSE2310", 8.0, true), ("CSE1250", 9.0, false), ("CSE3200", 5.0, true)]
    {
        let mut contract = Contract::new("WinstijnSmit", course_id, 10, "duties");
        contract.rating = rating;
        contract.signed = signed;
        app.contracts.insert_new(&contract).await?;
    }

    let (status, body) = app
        .request(
            "GET",
            "/ratings?net_ids=WinstijnSmit,nobody",
            Some(&app.bearer("sibling-service")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["WinstijnSmit"], 6.5);
    // No qualifying contracts: omitted rather than reported as zero
    assert!(body["data"].get("nobody").is_none());
    Ok(())
}
