#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use course_staffing_api::auth::{SystemClock, TokenService};
use course_staffing_api::remote::CourseDirectory;
use course_staffing_api::routes;
use course_staffing_api::services::{ApplicationService, ContractService};
use course_staffing_api::state::AppState;
use course_staffing_api::testing::{
    MemoryApplicationRepository, MemoryContractRepository, MemoryHourDeclarationRepository,
    StaticCourseDirectory, StubContractDirectory,
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// The router wired against in-memory repositories and directory stubs.
/// Contract creations from the accept flow loop back into `contracts`, so
/// scenarios end with a real contract on record, like a sibling instance
/// serving the directory surface would leave behind.
pub struct TestApp {
    pub app: Router,
    pub tokens: Arc<TokenService>,
    pub contracts: Arc<MemoryContractRepository>,
}

pub fn build_app(courses: StaticCourseDirectory, directory: StubContractDirectory) -> TestApp {
    let tokens = Arc::new(TokenService::new(TEST_SECRET, Arc::new(SystemClock)));
    let course_directory: Arc<dyn CourseDirectory> = Arc::new(courses);
    let contracts = Arc::new(MemoryContractRepository::new());
    let directory = directory.with_repository(contracts.clone());

    let state = AppState {
        token_service: tokens.clone(),
        applications: Arc::new(ApplicationService::new(
            Arc::new(MemoryApplicationRepository::new()),
            course_directory.clone(),
            Arc::new(directory),
        )),
        contracts: Arc::new(ContractService::new(
            contracts.clone(),
            Arc::new(MemoryHourDeclarationRepository::new()),
            course_directory,
        )),
    };

    TestApp {
        app: routes::app(state),
        tokens,
        contracts,
    }
}

/// One course, one responsible lecturer, a cooperative contract directory.
pub fn default_app() -> TestApp {
    build_app(
        StaticCourseDirectory::new()
            .with_course("CSE1300")
            .with_lecturer("ajansen", "CSE1300"),
        StubContractDirectory::new(),
    )
}

impl TestApp {
    pub fn bearer(&self, net_id: &str) -> String {
        let token = self.tokens.issue(net_id).expect("failed to issue test token");
        format!("Bearer {token}")
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
            None => builder.body(Body::empty()).expect("failed to build request"),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}
